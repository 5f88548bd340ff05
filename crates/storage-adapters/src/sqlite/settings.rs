use async_trait::async_trait;
use domains::{DomainError, Result, Settings, SettingsRepository};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use super::{db_error, sql, SqliteStore};

#[async_trait]
impl SettingsRepository for SqliteStore {
    async fn load(&self) -> Result<Option<Settings>> {
        let row = sqlx::query(sql::SELECT_SETTINGS)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Settings {
            id: row.try_get::<Uuid, _>("id").map_err(db_error)?,
            site_name: row.try_get("site_name").map_err(db_error)?,
            tagline: row.try_get("tagline").map_err(db_error)?,
            is_public: row.try_get("is_public").map_err(db_error)?,
        }))
    }

    async fn load_or_insert(&self, initial: &Settings) -> Result<Settings> {
        let inserted = sqlx::query(sql::INSERT_SETTINGS_IF_ABSENT)
            .bind(initial.id)
            .bind(&initial.site_name)
            .bind(&initial.tagline)
            .bind(initial.is_public)
            .execute(&self.pool)
            .await
            .map_err(db_error)?
            .rows_affected();
        if inserted == 0 {
            debug!("settings row already present");
        }

        self.load()
            .await?
            .ok_or_else(|| DomainError::Internal("settings row missing after insert".into()))
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        sqlx::query(sql::UPSERT_SETTINGS)
            .bind(settings.id)
            .bind(&settings.site_name)
            .bind(&settings.tagline)
            .bind(settings.is_public)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_is_upsert() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.load().await.unwrap().is_none());

        let mut settings = Settings::initial();
        store.save(&settings).await.unwrap();

        settings.site_name = "Synthetic Times".into();
        settings.tagline = None;
        settings.is_public = false;
        store.save(&settings).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, settings);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_save_keeps_stored_id() {
        let store = SqliteStore::in_memory().await.unwrap();
        let first = Settings::initial();
        store.save(&first).await.unwrap();

        let mut other = Settings::initial();
        other.site_name = "Synthetic Times".into();
        store.save(&other).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.id, first.id);
        assert_eq!(loaded.site_name, "Synthetic Times");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_reads_share_one_row() {
        let dir = std::env::temp_dir().join(format!("intelligencer-{}", Uuid::new_v4()));
        let url = format!("sqlite://{}", dir.join("settings.db").display());
        let store = std::sync::Arc::new(SqliteStore::connect(&url, 5).await.unwrap());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.load_or_insert(&Settings::initial()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);

        store.pool().close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
