//! Time left until the gym closes

use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Remaining time until closing
///
/// Serializes as zero-padded strings (`{"hours":"02","minutes":"05","seconds":"09"}`)
/// so the dashboard can render it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    fn from_duration(d: Duration) -> Self {
        let total = d.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl Serialize for Countdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Countdown", 4)?;
        s.serialize_field("hours", &format!("{:02}", self.hours))?;
        s.serialize_field("minutes", &format!("{:02}", self.minutes))?;
        s.serialize_field("seconds", &format!("{:02}", self.seconds))?;
        s.serialize_field("display", &self.to_string())?;
        s.end()
    }
}

/// Countdown to today's closing time, or tomorrow's once today's has passed
pub fn time_until_close(now: NaiveDateTime, closing: NaiveTime) -> Countdown {
    let mut close = now.date().and_time(closing);
    if now > close {
        close += Duration::days(1);
    }
    Countdown::from_duration(close - now)
}
