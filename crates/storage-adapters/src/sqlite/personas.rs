use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{Persona, PersonaRepository, PersonaRole, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_error, parse_column, sql, SqliteStore};

fn persona_from_row(row: &SqliteRow) -> Result<Persona> {
    let role: String = row.try_get("role").map_err(db_error)?;
    Ok(Persona {
        id: row.try_get::<Uuid, _>("id").map_err(db_error)?,
        name: row.try_get("name").map_err(db_error)?,
        bio: row.try_get("bio").map_err(db_error)?,
        role: parse_column::<PersonaRole>("role", &role)?,
        profile_image_url: row.try_get("profile_image_url").map_err(db_error)?,
        more_info_text: row.try_get("more_info_text").map_err(db_error)?,
        external_links: row.try_get("external_links").map_err(db_error)?,
        display_order: row.try_get("display_order").map_err(db_error)?,
        is_active: row.try_get("is_active").map_err(db_error)?,
        article_count: row.try_get("article_count").map_err(db_error)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_error)?,
    })
}

#[async_trait]
impl PersonaRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Persona>> {
        sqlx::query(sql::SELECT_PERSONAS)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?
            .iter()
            .map(persona_from_row)
            .collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Persona>> {
        sqlx::query(sql::SELECT_PERSONA)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .as_ref()
            .map(persona_from_row)
            .transpose()
    }

    async fn insert(&self, persona: &Persona) -> Result<()> {
        sqlx::query(sql::INSERT_PERSONA)
            .bind(persona.id)
            .bind(&persona.name)
            .bind(&persona.bio)
            .bind(persona.role.as_str())
            .bind(&persona.profile_image_url)
            .bind(&persona.more_info_text)
            .bind(&persona.external_links)
            .bind(persona.display_order)
            .bind(persona.is_active)
            .bind(persona.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn update(&self, persona: &Persona) -> Result<bool> {
        let result = sqlx::query(sql::UPDATE_PERSONA)
            .bind(&persona.name)
            .bind(&persona.bio)
            .bind(persona.role.as_str())
            .bind(&persona.profile_image_url)
            .bind(&persona.more_info_text)
            .bind(&persona.external_links)
            .bind(persona.display_order)
            .bind(persona.is_active)
            .bind(persona.id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool> {
        let result = sqlx::query(sql::SET_PERSONA_ACTIVE)
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(name: &str, order: i32) -> Persona {
        Persona {
            id: Uuid::new_v4(),
            name: name.into(),
            bio: format!("{name} writes things"),
            role: PersonaRole::Reporter,
            profile_image_url: Some("https://img.example.com/p.png".into()),
            more_info_text: None,
            external_links: None,
            display_order: order,
            is_active: true,
            article_count: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_display_order_then_name() {
        let store = SqliteStore::in_memory().await.unwrap();
        for p in [persona("Zed", 1), persona("Bea", 1), persona("Cal", 0)] {
            store.insert(&p).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Cal", "Bea", "Zed"]);
    }

    #[tokio::test]
    async fn test_set_active_keeps_row() {
        let store = SqliteStore::in_memory().await.unwrap();
        let p = persona("Ada", 0);
        store.insert(&p).await.unwrap();

        assert!(store.set_active(p.id, false).await.unwrap());
        let found = store.find(p.id).await.unwrap().unwrap();
        assert!(!found.is_active);
        assert_eq!(found.profile_image_url, p.profile_image_url);
        assert!(!store.set_active(Uuid::new_v4(), false).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut p = persona("Ada", 0);
        store.insert(&p).await.unwrap();

        p.role = PersonaRole::Commentator;
        p.profile_image_url = None;
        p.display_order = 7;
        assert!(store.update(&p).await.unwrap());

        let found = store.find(p.id).await.unwrap().unwrap();
        assert_eq!(found.role, PersonaRole::Commentator);
        assert_eq!(found.profile_image_url, None);
        assert_eq!(found.display_order, 7);
    }
}
