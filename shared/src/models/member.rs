//! Member Model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Membership tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Gold,
    #[default]
    Silver,
    Bronze,
}

impl MembershipType {
    /// Display label shown on member cards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gold => "ذهبي",
            Self::Silver => "فضي",
            Self::Bronze => "برونزي",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub membership_type: MembershipType,
    pub join_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Embedded image payload (data URL)
    pub image: String,
    pub is_present: bool,
    pub attendance_count: i64,
    /// Hour of day (0-23) of every check-in, in order
    #[cfg_attr(feature = "db", sqlx(json))]
    pub visit_hours: Vec<u8>,
    pub created_at: i64,
}

impl Member {
    /// Zero-padded id as displayed on cards and used by text search
    pub fn display_id(&self) -> String {
        format_member_id(self.id)
    }
}

/// Create member payload
///
/// `end_date` defaults to one year after `join_date` when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub membership_type: MembershipType,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub image: String,
}

/// Update member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub membership_type: Option<MembershipType>,
    pub join_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub is_present: Option<bool>,
    pub attendance_count: Option<i64>,
    pub visit_hours: Option<Vec<u8>>,
}

/// Format a member id zero-padded to 4 digits
pub fn format_member_id(id: i64) -> String {
    format!("{:04}", id)
}

/// Same calendar day one year later
///
/// 29 February has no counterpart in a common year and rolls over to 1 March.
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    let next = date.year() + 1;
    date.with_year(next)
        .or_else(|| NaiveDate::from_ymd_opt(next, 3, 1))
        .unwrap_or(date)
}
