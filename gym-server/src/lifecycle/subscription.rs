//! Subscription state derived from a member's end date

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Members with this many days left or fewer are "expiring soon"
pub const EXPIRING_SOON_DAYS: i64 = 5;

/// Derived subscription state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    Active,
    ExpiringSoon,
    Expired,
}

/// Days left until `end_date` (taken at local 00:00), rounded up
///
/// Any partial day still counts as a full day; zero or negative means the
/// subscription has ended.
pub fn remaining_days(end_date: NaiveDate, now: NaiveDateTime) -> i64 {
    let end = end_date.and_time(chrono::NaiveTime::MIN);
    let ms = (end - now).num_milliseconds();
    // ceil(ms / DAY_MS) for signed values
    -(-ms).div_euclid(DAY_MS)
}

pub fn subscription_state(remaining_days: i64) -> SubscriptionState {
    if remaining_days <= 0 {
        SubscriptionState::Expired
    } else if remaining_days <= EXPIRING_SOON_DAYS {
        SubscriptionState::ExpiringSoon
    } else {
        SubscriptionState::Active
    }
}

/// Shorthand for `subscription_state(remaining_days(end_date, now))`
pub fn state_at(end_date: NaiveDate, now: NaiveDateTime) -> SubscriptionState {
    subscription_state(remaining_days(end_date, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_remaining_days_rounds_up() {
        let end = ymd(2024, 1, 11);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 1), 0, 0, 0)), 10);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 1), 12, 0, 0)), 10);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 10), 23, 59, 59)), 1);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 11), 0, 0, 0)), 0);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 11), 8, 0, 0)), 0);
        assert_eq!(remaining_days(end, at(ymd(2024, 1, 12), 8, 0, 0)), -1);
    }

    #[test]
    fn test_state_boundaries() {
        assert_eq!(subscription_state(-3), SubscriptionState::Expired);
        assert_eq!(subscription_state(0), SubscriptionState::Expired);
        assert_eq!(subscription_state(1), SubscriptionState::ExpiringSoon);
        assert_eq!(subscription_state(5), SubscriptionState::ExpiringSoon);
        assert_eq!(subscription_state(6), SubscriptionState::Active);
    }

    #[test]
    fn test_five_days_exactly_is_expiring_soon() {
        let now = at(ymd(2024, 3, 1), 0, 0, 0);
        let end = ymd(2024, 3, 6);
        assert_eq!(remaining_days(end, now), 5);
        assert_eq!(state_at(end, now), SubscriptionState::ExpiringSoon);
    }

    #[test]
    fn test_five_days_and_one_second_is_active() {
        let now = at(ymd(2024, 3, 1), 0, 0, 0) - Duration::seconds(1);
        assert_eq!(state_at(ymd(2024, 3, 6), now), SubscriptionState::Active);
    }

    #[test]
    fn test_end_date_now_or_past_is_expired() {
        let now = at(ymd(2024, 3, 6), 0, 0, 0);
        assert_eq!(state_at(ymd(2024, 3, 6), now), SubscriptionState::Expired);
        assert_eq!(state_at(ymd(2024, 2, 1), now), SubscriptionState::Expired);
    }

    #[test]
    fn test_state_agrees_with_remaining_days() {
        let base = at(ymd(2024, 6, 15), 17, 42, 9);
        for offset in -10..=20 {
            let end = ymd(2024, 6, 15) + Duration::days(offset);
            let days = remaining_days(end, base);
            let state = state_at(end, base);
            assert_eq!(days <= 0, state == SubscriptionState::Expired);
            assert_eq!(
                days > 0 && days <= 5,
                state == SubscriptionState::ExpiringSoon
            );
            assert_eq!(days > 5, state == SubscriptionState::Active);
        }
    }
}
