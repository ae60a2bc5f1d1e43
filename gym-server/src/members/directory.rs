//! Member directory
//!
//! Every mutation answers with the complete, freshly read member collection
//! so the dashboard always re-renders from one consistent snapshot instead of
//! patching single rows into its local copy.
//!
//! Store failures on mutations are logged and never escape: the caller gets
//! the best collection available (a re-read, or the last successful read).

use std::sync::Arc;

use parking_lot::RwLock;
use shared::ErrorCode;
use shared::models::{Member, MemberCreate, MemberUpdate, one_year_after};

use super::attendance::apply_toggle;
use crate::db::repository::{MemberStore, RepoError};
use crate::utils::time::current_hour;
use crate::{AppError, AppResult};

pub struct MemberDirectory {
    store: Arc<dyn MemberStore>,
    /// Last collection successfully read from the store
    snapshot: RwLock<Vec<Member>>,
}

impl MemberDirectory {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Last known collection without touching the store
    pub fn snapshot(&self) -> Vec<Member> {
        self.snapshot.read().clone()
    }

    /// All members ordered by id; falls back to the last known collection
    pub async fn list(&self) -> Vec<Member> {
        match self.store.find_all().await {
            Ok(members) => {
                *self.snapshot.write() = members.clone();
                members
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch members, serving last known list");
                self.snapshot()
            }
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<Member> {
        match self.store.find_by_id(id).await {
            Ok(Some(member)) => Ok(member),
            Ok(None) => Err(AppError::member_not_found(id)),
            Err(e) => {
                tracing::error!(member_id = id, error = %e, "Failed to fetch member");
                self.snapshot
                    .read()
                    .iter()
                    .find(|m| m.id == id)
                    .cloned()
                    .ok_or_else(|| AppError::from(e))
            }
        }
    }

    /// Currently checked-in members
    pub async fn present(&self) -> Vec<Member> {
        self.list()
            .await
            .into_iter()
            .filter(|m| m.is_present)
            .collect()
    }

    pub async fn add(&self, mut data: MemberCreate) -> AppResult<Vec<Member>> {
        data.name = data.name.trim().to_string();
        if data.name.is_empty() {
            return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "name"));
        }
        if data.image.trim().is_empty() {
            return Err(AppError::new(ErrorCode::MemberImageRequired).with_detail("field", "image"));
        }
        if data.end_date.is_none() {
            data.end_date = Some(one_year_after(data.join_date));
        }

        match self.store.insert(data).await {
            Ok(member) => tracing::info!(member_id = member.id, "Member created"),
            Err(e) => tracing::error!(error = %e, "Failed to create member"),
        }
        Ok(self.list().await)
    }

    /// Partial update
    ///
    /// Changing `join_date` without an explicit `end_date` moves the end date
    /// to one year after the new join date.
    pub async fn update(&self, id: i64, mut data: MemberUpdate) -> AppResult<Vec<Member>> {
        if let Some(join) = data.join_date
            && data.end_date.is_none()
        {
            data.end_date = Some(one_year_after(join));
        }
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "name"));
        }
        if let Some(hours) = &data.visit_hours
            && hours.iter().any(|h| *h > 23)
        {
            return Err(AppError::validation("Visit hours must be between 0 and 23"));
        }
        if let Some(count) = data.attendance_count
            && count < 0
        {
            return Err(AppError::validation("Attendance count cannot be negative")
                .with_detail("field", "attendance_count"));
        }

        match self.store.update(id, data).await {
            Ok(_) => tracing::info!(member_id = id, "Member updated"),
            Err(RepoError::NotFound(_)) => return Err(AppError::member_not_found(id)),
            Err(e) => tracing::error!(member_id = id, error = %e, "Failed to update member"),
        }
        Ok(self.list().await)
    }

    /// Hard delete; deleting an unknown id is a no-op
    pub async fn delete(&self, id: i64) -> Vec<Member> {
        match self.store.delete(id).await {
            Ok(true) => tracing::info!(member_id = id, "Member deleted"),
            Ok(false) => tracing::warn!(member_id = id, "Delete matched no member"),
            Err(e) => tracing::error!(member_id = id, error = %e, "Failed to delete member"),
        }
        self.list().await
    }

    /// Toggle presence, recording the current wall-clock hour on check-in
    pub async fn toggle_attendance(&self, id: i64) -> AppResult<Vec<Member>> {
        self.toggle_attendance_at(id, current_hour()).await
    }

    /// Toggle presence with an explicit hour of day
    ///
    /// Read-modify-write without a lock: two sessions toggling the same
    /// member at the same moment can both read the old row, and the second
    /// write wins (one check-in may be lost).
    pub async fn toggle_attendance_at(&self, id: i64, hour: u8) -> AppResult<Vec<Member>> {
        let member = match self.store.find_by_id(id).await {
            Ok(Some(member)) => member,
            Ok(None) => return Err(AppError::member_not_found(id)),
            Err(e) => {
                tracing::error!(member_id = id, error = %e, "Failed to fetch member for attendance toggle");
                return Ok(self.list().await);
            }
        };

        let update = apply_toggle(&member, hour);
        let checked_in = update.is_present == Some(true);

        match self.store.update(id, update).await {
            Ok(_) => tracing::info!(member_id = id, checked_in, hour, "Attendance toggled"),
            Err(e) => tracing::error!(member_id = id, error = %e, "Failed to toggle attendance"),
        }
        Ok(self.list().await)
    }

    /// Check a member in by id from the present-members view
    pub async fn check_in(&self, id: i64) -> AppResult<Vec<Member>> {
        self.check_in_at(id, current_hour()).await
    }

    pub async fn check_in_at(&self, id: i64, hour: u8) -> AppResult<Vec<Member>> {
        let members = self.list().await;
        let member = members
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::member_not_found(id))?;
        if member.is_present {
            return Err(AppError::new(ErrorCode::MemberAlreadyPresent).with_detail("member_id", id));
        }
        self.toggle_attendance_at(id, hour).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::MemoryMemberStore;
    use chrono::NaiveDate;
    use shared::models::MembershipType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create(name: &str) -> MemberCreate {
        MemberCreate {
            name: name.to_string(),
            phone: "0550".to_string(),
            membership_type: MembershipType::Silver,
            join_date: ymd(2024, 1, 10),
            end_date: None,
            image: "data:image/jpeg;base64,AAAA".to_string(),
        }
    }

    fn directory() -> (Arc<MemoryMemberStore>, MemberDirectory) {
        let store = Arc::new(MemoryMemberStore::new());
        let dir = MemberDirectory::new(store.clone());
        (store, dir)
    }

    #[tokio::test]
    async fn test_add_defaults_end_date_to_one_year() {
        let (_, dir) = directory();
        let members = dir.add(create("Ali")).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].end_date, ymd(2025, 1, 10));
        assert!(!members[0].is_present);
        assert_eq!(members[0].attendance_count, 0);
    }

    #[tokio::test]
    async fn test_add_requires_image() {
        let (_, dir) = directory();
        let mut data = create("Ali");
        data.image = String::new();
        let err = dir.add(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberImageRequired);
        assert!(dir.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let (_, dir) = directory();
        let err = dir.add(create("   ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_changing_join_date_recomputes_end_date() {
        let (_, dir) = directory();
        let id = dir.add(create("Ali")).await.unwrap()[0].id;

        let members = dir
            .update(
                id,
                MemberUpdate {
                    join_date: Some(ymd(2024, 2, 1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(members[0].join_date, ymd(2024, 2, 1));
        assert_eq!(members[0].end_date, ymd(2025, 2, 1));
    }

    #[tokio::test]
    async fn test_explicit_end_date_wins() {
        let (_, dir) = directory();
        let id = dir.add(create("Ali")).await.unwrap()[0].id;

        let members = dir
            .update(
                id,
                MemberUpdate {
                    join_date: Some(ymd(2024, 2, 1)),
                    end_date: Some(ymd(2024, 3, 1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(members[0].end_date, ymd(2024, 3, 1));
    }

    #[tokio::test]
    async fn test_update_unknown_member() {
        let (_, dir) = directory();
        let err = dir.update(42, MemberUpdate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }

    #[tokio::test]
    async fn test_negative_attendance_count_rejected() {
        let (store, dir) = directory();
        let id = dir.add(create("Ali")).await.unwrap()[0].id;

        let err = dir
            .update(
                id,
                MemberUpdate {
                    attendance_count: Some(-7),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().attendance_count, 0);
    }

    #[tokio::test]
    async fn test_toggle_twice() {
        let (_, dir) = directory();
        let id = dir.add(create("Ali")).await.unwrap()[0].id;

        let after_in = dir.toggle_attendance_at(id, 18).await.unwrap();
        assert!(after_in[0].is_present);
        assert_eq!(after_in[0].attendance_count, 1);
        assert_eq!(after_in[0].visit_hours, vec![18]);

        let after_out = dir.toggle_attendance_at(id, 20).await.unwrap();
        assert!(!after_out[0].is_present);
        assert_eq!(after_out[0].attendance_count, 1);
        assert_eq!(after_out[0].visit_hours, vec![18]);
    }

    #[tokio::test]
    async fn test_toggle_unknown_member() {
        let (_, dir) = directory();
        let err = dir.toggle_attendance_at(9, 10).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }

    #[tokio::test]
    async fn test_check_in_rules() {
        let (_, dir) = directory();
        let id = dir.add(create("Ali")).await.unwrap()[0].id;

        assert_eq!(
            dir.check_in_at(99, 9).await.unwrap_err().code,
            ErrorCode::MemberNotFound
        );

        let members = dir.check_in_at(id, 9).await.unwrap();
        assert!(members[0].is_present);
        assert_eq!(dir.present().await.len(), 1);

        assert_eq!(
            dir.check_in_at(id, 10).await.unwrap_err().code,
            ErrorCode::MemberAlreadyPresent
        );
        // the rejected check-in wrote nothing
        assert_eq!(dir.get(id).await.unwrap().attendance_count, 1);
    }

    #[tokio::test]
    async fn test_store_failure_falls_back_to_last_known_list() {
        let (store, dir) = directory();
        dir.add(create("Ali")).await.unwrap();
        dir.add(create("Sara")).await.unwrap();

        store.set_failing(true);

        // mutations do not error, they answer with the last known collection
        let members = dir.delete(1).await;
        assert_eq!(members.len(), 2);
        let members = dir.add(create("Omar")).await.unwrap();
        assert_eq!(members.len(), 2);
        let members = dir.toggle_attendance_at(1, 12).await.unwrap();
        assert!(!members[0].is_present);

        // single reads use the snapshot too
        assert_eq!(dir.get(2).await.unwrap().name, "Sara");
        assert_eq!(dir.get(3).await.unwrap_err().code, ErrorCode::DatabaseError);

        store.set_failing(false);
        assert_eq!(dir.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_returns_remaining() {
        let (_, dir) = directory();
        dir.add(create("Ali")).await.unwrap();
        dir.add(create("Sara")).await.unwrap();
        let members = dir.delete(1).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Sara");
    }
}
