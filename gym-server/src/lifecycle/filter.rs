//! Member list filtering (text search AND status bucket)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::models::{Member, format_member_id};

use super::subscription::{SubscriptionState, state_at};

/// Status bucket selected in the member list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    #[serde(alias = "expiringSoon")]
    ExpiringSoon,
    Expired,
}

impl StatusFilter {
    pub fn matches(&self, state: SubscriptionState) -> bool {
        match self {
            Self::All => true,
            Self::Active => state == SubscriptionState::Active,
            Self::ExpiringSoon => state == SubscriptionState::ExpiringSoon,
            Self::Expired => state == SubscriptionState::Expired,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFilter {
    /// Free text matched against the name (case-insensitive) or the padded id
    #[serde(default, alias = "q")]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

impl MemberFilter {
    pub fn matches_search(&self, member: &Member) -> bool {
        // Untrimmed: whitespace is part of the term
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        member.name.to_lowercase().contains(&term.to_lowercase())
            || format_member_id(member.id).contains(term)
    }

    pub fn matches(&self, member: &Member, now: NaiveDateTime) -> bool {
        self.matches_search(member) && self.status.matches(state_at(member.end_date, now))
    }

    pub fn apply<'a>(&self, members: &'a [Member], now: NaiveDateTime) -> Vec<&'a Member> {
        members.iter().filter(|m| self.matches(m, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::test_support::member_ending_in;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn ids(members: Vec<&Member>) -> Vec<i64> {
        members.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_expiring_soon_bucket() {
        let members = vec![
            member_ending_in(1, 10, now()),
            member_ending_in(2, 3, now()),
            member_ending_in(3, -1, now()),
            member_ending_in(4, 5, now()),
        ];
        let filter = MemberFilter {
            search: None,
            status: StatusFilter::ExpiringSoon,
        };
        assert_eq!(ids(filter.apply(&members, now())), vec![2, 4]);
    }

    #[test]
    fn test_search_by_name_and_padded_id() {
        let mut ali = member_ending_in(12, 30, now());
        ali.name = "Ali Ben Salah".to_string();
        let mut sara = member_ending_in(7, 30, now());
        sara.name = "Sara".to_string();
        let members = vec![sara, ali];

        let by_name = MemberFilter {
            search: Some("ALI".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(by_name.apply(&members, now())), vec![12]);

        let by_id = MemberFilter {
            search: Some("0007".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(by_id.apply(&members, now())), vec![7]);

        let empty = MemberFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.apply(&members, now()).len(), 2);

        // whitespace is matched literally, not ignored
        let blank = MemberFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.apply(&members, now()).is_empty());
    }

    #[test]
    fn test_search_and_status_compose() {
        let mut a = member_ending_in(1, 30, now());
        a.name = "Omar".to_string();
        let mut b = member_ending_in(2, -2, now());
        b.name = "Omar".to_string();
        let members = vec![a, b];

        let filter = MemberFilter {
            search: Some("omar".to_string()),
            status: StatusFilter::Expired,
        };
        assert_eq!(ids(filter.apply(&members, now())), vec![2]);
    }

    #[test]
    fn test_status_filter_deserialize() {
        let f: StatusFilter = serde_json::from_str("\"expiringSoon\"").unwrap();
        assert_eq!(f, StatusFilter::ExpiringSoon);
        let f: StatusFilter = serde_json::from_str("\"expiring_soon\"").unwrap();
        assert_eq!(f, StatusFilter::ExpiringSoon);
    }
}
