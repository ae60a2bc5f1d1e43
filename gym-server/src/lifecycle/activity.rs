//! Activity series for the dashboard charts

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use shared::models::Member;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u8,
    /// "HH:00"
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: usize,
}

/// Check-ins per hour of day across every recorded visit
pub fn hourly_visits(members: &[Member]) -> Vec<HourBucket> {
    let mut counts = [0usize; 24];
    for hour in members.iter().flat_map(|m| m.visit_hours.iter()) {
        if let Some(slot) = counts.get_mut(*hour as usize) {
            *slot += 1;
        }
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, count)| HourBucket {
            hour: hour as u8,
            label: format!("{:02}:00", hour),
            count: *count,
        })
        .collect()
}

fn joins_on(members: &[Member], date: NaiveDate) -> usize {
    members.iter().filter(|m| m.join_date == date).count()
}

/// New members per day for the 7 days ending `today`, oldest first
pub fn daily_joins(members: &[Member], today: NaiveDate) -> Vec<DayBucket> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayBucket {
                date,
                count: joins_on(members, date),
            }
        })
        .collect()
}

/// New members per day for every day of `today`'s month
pub fn monthly_joins(members: &[Member], today: NaiveDate) -> Vec<DayBucket> {
    let Some(first) = today.with_day(1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .map(|date| DayBucket {
            date,
            count: joins_on(members, date),
        })
        .collect()
}
