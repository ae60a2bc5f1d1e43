//! Membership lifecycle engine
//!
//! Pure functions over member records and an explicit `now`. Nothing here
//! reads the clock or touches storage.

pub mod activity;
pub mod countdown;
pub mod filter;
pub mod stats;
pub mod subscription;

pub use activity::{DayBucket, HourBucket, daily_joins, hourly_visits, monthly_joins};
pub use countdown::{Countdown, time_until_close};
pub use filter::{MemberFilter, StatusFilter};
pub use stats::{DashboardStats, dashboard_stats};
pub use subscription::{
    EXPIRING_SOON_DAYS, SubscriptionState, remaining_days, state_at, subscription_state,
};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use shared::models::{Member, MembershipType};

    pub fn sample_member(id: i64) -> Member {
        let join = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Member {
            id,
            name: format!("Member {id}"),
            phone: String::new(),
            membership_type: MembershipType::Silver,
            join_date: join,
            end_date: join + Duration::days(365),
            image: String::new(),
            is_present: false,
            attendance_count: 0,
            visit_hours: Vec::new(),
            created_at: 0,
        }
    }

    /// Member whose remaining days at `now` equal `days` (for a `now` after midnight)
    pub fn member_ending_in(id: i64, days: i64, now: NaiveDateTime) -> Member {
        let mut m = sample_member(id);
        m.end_date = now.date() + Duration::days(days);
        m
    }
}
