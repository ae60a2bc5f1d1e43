//! Error type shared by the server and its clients
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MemberImageRequired).with_detail("field", "image");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 2002);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
