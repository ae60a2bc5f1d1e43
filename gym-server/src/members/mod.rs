//! Members: directory operations and the attendance tracker

pub mod attendance;
pub mod directory;

pub use attendance::apply_toggle;
pub use directory::MemberDirectory;
