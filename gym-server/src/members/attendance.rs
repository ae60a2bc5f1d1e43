//! Attendance toggle
//!
//! Only the absent -> present edge counts as a visit: it bumps the
//! attendance counter and records the hour of day. Leaving changes nothing
//! but the presence flag.

use shared::models::{Member, MemberUpdate};

/// Field changes produced by one toggle
pub fn apply_toggle(member: &Member, hour: u8) -> MemberUpdate {
    let now_present = !member.is_present;

    let (attendance_count, visit_hours) = if now_present {
        let mut hours = member.visit_hours.clone();
        hours.push(hour.min(23));
        (member.attendance_count + 1, hours)
    } else {
        (member.attendance_count, member.visit_hours.clone())
    };

    MemberUpdate {
        is_present: Some(now_present),
        attendance_count: Some(attendance_count),
        visit_hours: Some(visit_hours),
        ..Default::default()
    }
}
