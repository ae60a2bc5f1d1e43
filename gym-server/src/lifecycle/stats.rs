//! Dashboard aggregate statistics

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use shared::models::Member;

use super::subscription::{SubscriptionState, state_at};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Members whose end date is strictly in the future
    ///
    /// This is a wider set than `active`: it also contains the expiring-soon
    /// window. Both numbers are shown on the dashboard and are kept apart on
    /// purpose until the product owner decides which one "active" means.
    pub total_active: usize,
    /// Members currently checked in
    pub present: usize,
    /// Members in the `Active` state (more than 5 days left)
    pub active: usize,
    /// Members in the `ExpiringSoon` state (1 to 5 days left)
    pub expiring_soon: usize,
}

pub fn dashboard_stats(members: &[Member], now: NaiveDateTime) -> DashboardStats {
    members.iter().fold(DashboardStats::default(), |mut stats, m| {
        if m.end_date.and_time(NaiveTime::MIN) > now {
            stats.total_active += 1;
        }
        if m.is_present {
            stats.present += 1;
        }
        match state_at(m.end_date, now) {
            SubscriptionState::Active => stats.active += 1,
            SubscriptionState::ExpiringSoon => stats.expiring_soon += 1,
            SubscriptionState::Expired => {}
        }
        stats
    })
}
