//! In-memory stores
//!
//! Same contract as the SQLite stores. Used by `STORE_BACKEND=memory` and by
//! tests, which can also switch a store into a failing mode to exercise the
//! store-failure fallbacks.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{GymSettings, Member, MemberCreate, MemberUpdate, one_year_after};

use super::{MemberStore, RepoError, RepoResult, SettingsStore};

fn unavailable() -> RepoError {
    RepoError::Database("store unavailable".to_string())
}

#[derive(Default)]
struct MemberTable {
    rows: BTreeMap<i64, Member>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryMemberStore {
    table: Mutex<MemberTable>,
    failing: AtomicBool,
}

impl MemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl MemberStore for MemoryMemberStore {
    async fn find_all(&self) -> RepoResult<Vec<Member>> {
        self.check()?;
        Ok(self.table.lock().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        self.check()?;
        Ok(self.table.lock().rows.get(&id).cloned())
    }

    async fn insert(&self, data: MemberCreate) -> RepoResult<Member> {
        self.check()?;
        let mut table = self.table.lock();
        table.next_id += 1;
        let member = Member {
            id: table.next_id,
            name: data.name,
            phone: data.phone,
            membership_type: data.membership_type,
            end_date: data.end_date.unwrap_or_else(|| one_year_after(data.join_date)),
            join_date: data.join_date,
            image: data.image,
            is_present: false,
            attendance_count: 0,
            visit_hours: Vec::new(),
            created_at: shared::util::now_millis(),
        };
        table.rows.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update(&self, id: i64, data: MemberUpdate) -> RepoResult<Member> {
        self.check()?;
        let mut table = self.table.lock();
        let member = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))?;

        if let Some(v) = data.name {
            member.name = v;
        }
        if let Some(v) = data.phone {
            member.phone = v;
        }
        if let Some(v) = data.membership_type {
            member.membership_type = v;
        }
        if let Some(v) = data.join_date {
            member.join_date = v;
        }
        if let Some(v) = data.end_date {
            member.end_date = v;
        }
        if let Some(v) = data.image {
            member.image = v;
        }
        if let Some(v) = data.is_present {
            member.is_present = v;
        }
        if let Some(v) = data.attendance_count {
            member.attendance_count = v;
        }
        if let Some(v) = data.visit_hours {
            member.visit_hours = v;
        }
        Ok(member.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.check()?;
        Ok(self.table.lock().rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    row: Mutex<Option<GymSettings>>,
    inserts: AtomicUsize,
    failing: AtomicBool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_settings(settings: GymSettings) -> Self {
        Self {
            row: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    /// Number of successful insert calls so far
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> RepoResult<Option<GymSettings>> {
        self.check()?;
        Ok(self.row.lock().clone())
    }

    async fn insert_default(&self, defaults: &GymSettings) -> RepoResult<()> {
        self.check()?;
        let mut row = self.row.lock();
        if row.is_none() {
            *row = Some(defaults.clone());
            self.inserts.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn update(&self, settings: &GymSettings) -> RepoResult<()> {
        self.check()?;
        let mut row = self.row.lock();
        // update-by-id on a missing row touches nothing
        if row.is_some() {
            *row = Some(settings.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create(name: &str) -> MemberCreate {
        MemberCreate {
            name: name.to_string(),
            phone: String::new(),
            membership_type: Default::default(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: None,
            image: "img".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = MemoryMemberStore::new();
        assert_eq!(store.insert(create("A")).await.unwrap().id, 1);
        assert_eq!(store.insert(create("B")).await.unwrap().id, 2);
        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = MemoryMemberStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.find_all().await,
            Err(RepoError::Database(_))
        ));
        store.set_failing(false);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_insert_is_if_absent() {
        let store = MemorySettingsStore::new();
        store.insert_default(&GymSettings::default()).await.unwrap();
        store.insert_default(&GymSettings::default()).await.unwrap();
        assert_eq!(store.insert_count(), 1);
    }
}
