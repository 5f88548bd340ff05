use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{Admin, AdminRepository, Result};
use sqlx::Row;
use uuid::Uuid;

use super::{db_error, sql, SqliteStore};

#[async_trait]
impl AdminRepository for SqliteStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let row = sqlx::query(sql::SELECT_ADMIN_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Admin {
            id: row.try_get::<Uuid, _>("id").map_err(db_error)?,
            email: row.try_get("email").map_err(db_error)?,
            password_hash: row.try_get("password_hash").map_err(db_error)?,
            name: row.try_get("name").map_err(db_error)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_error)?,
        }))
    }

    async fn insert(&self, admin: &Admin) -> Result<()> {
        sqlx::query(sql::INSERT_ADMIN)
            .bind(admin.id)
            .bind(&admin.email)
            .bind(&admin.password_hash)
            .bind(&admin.name)
            .bind(admin.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::DomainError;

    fn admin(email: &str) -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            name: "Desk".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let store = SqliteStore::in_memory().await.unwrap();
        let stored = admin("desk@example.com");
        store.insert(&stored).await.unwrap();

        let found = store.find_by_email("desk@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert_eq!(found.password_hash, stored.password_hash);
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert(&admin("desk@example.com")).await.unwrap();

        let err = store.insert(&admin("desk@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
