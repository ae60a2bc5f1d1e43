//! Member Repository (SQLite)

use async_trait::async_trait;
use shared::models::{Member, MemberCreate, MemberUpdate, one_year_after};
use sqlx::SqlitePool;

use super::{MemberStore, RepoError, RepoResult};

const MEMBER_SELECT: &str = "SELECT id, name, phone, membership_type, join_date, end_date, image, is_present, attendance_count, visit_hours, created_at FROM members";

#[derive(Clone)]
pub struct SqliteMemberStore {
    pool: SqlitePool,
}

impl SqliteMemberStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn encode_hours(hours: &[u8]) -> RepoResult<String> {
    serde_json::to_string(hours).map_err(|e| RepoError::Validation(e.to_string()))
}

#[async_trait]
impl MemberStore for SqliteMemberStore {
    async fn find_all(&self) -> RepoResult<Vec<Member>> {
        let sql = format!("{} ORDER BY id ASC", MEMBER_SELECT);
        let rows = sqlx::query_as::<_, Member>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let sql = format!("{} WHERE id = ?", MEMBER_SELECT);
        let row = sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, data: MemberCreate) -> RepoResult<Member> {
        let now = shared::util::now_millis();
        let end_date = data.end_date.unwrap_or_else(|| one_year_after(data.join_date));
        let result = sqlx::query(
            "INSERT INTO members (name, phone, membership_type, join_date, end_date, image, is_present, attendance_count, visit_hours, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0, '[]', ?7)",
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(data.membership_type)
        .bind(data.join_date)
        .bind(end_date)
        .bind(&data.image)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create member".into()))
    }

    async fn update(&self, id: i64, data: MemberUpdate) -> RepoResult<Member> {
        let visit_hours = data.visit_hours.as_deref().map(encode_hours).transpose()?;
        let rows = sqlx::query(
            "UPDATE members SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), membership_type = COALESCE(?3, membership_type), join_date = COALESCE(?4, join_date), end_date = COALESCE(?5, end_date), image = COALESCE(?6, image), is_present = COALESCE(?7, is_present), attendance_count = COALESCE(?8, attendance_count), visit_hours = COALESCE(?9, visit_hours) WHERE id = ?10",
        )
        .bind(data.name)
        .bind(data.phone)
        .bind(data.membership_type)
        .bind(data.join_date)
        .bind(data.end_date)
        .bind(data.image)
        .bind(data.is_present)
        .bind(data.attendance_count)
        .bind(visit_hours)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Member {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use chrono::NaiveDate;
    use shared::models::MembershipType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create(name: &str) -> MemberCreate {
        MemberCreate {
            name: name.to_string(),
            phone: "0550000000".to_string(),
            membership_type: MembershipType::Gold,
            join_date: ymd(2024, 1, 10),
            end_date: None,
            image: "data:image/jpeg;base64,AAAA".to_string(),
        }
    }

    async fn store() -> SqliteMemberStore {
        let db = DbService::in_memory().await.unwrap();
        SqliteMemberStore::new(db.pool)
    }

    #[tokio::test]
    async fn test_insert_then_get_forces_defaults() {
        let store = store().await;
        let created = store.insert(create("Ali")).await.unwrap();

        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ali");
        assert_eq!(fetched.phone, "0550000000");
        assert_eq!(fetched.membership_type, MembershipType::Gold);
        assert_eq!(fetched.join_date, ymd(2024, 1, 10));
        assert_eq!(fetched.end_date, ymd(2025, 1, 10));
        assert!(!fetched.is_present);
        assert_eq!(fetched.attendance_count, 0);
        assert!(fetched.visit_hours.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let store = store().await;
        let a = store.insert(create("A")).await.unwrap();
        let b = store.insert(create("B")).await.unwrap();
        let c = store.insert(create("C")).await.unwrap();

        let ids: Vec<i64> = store
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = store().await;
        let created = store.insert(create("Ali")).await.unwrap();

        let updated = store
            .update(
                created.id,
                MemberUpdate {
                    is_present: Some(true),
                    attendance_count: Some(1),
                    visit_hours: Some(vec![18]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_present);
        assert_eq!(updated.attendance_count, 1);
        assert_eq!(updated.visit_hours, vec![18]);
        assert_eq!(updated.name, "Ali");
        assert_eq!(updated.end_date, ymd(2025, 1, 10));
    }

    #[tokio::test]
    async fn test_update_missing_member() {
        let store = store().await;
        let err = store
            .update(99, MemberUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store().await;
        let created = store.insert(create("Ali")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }
}
