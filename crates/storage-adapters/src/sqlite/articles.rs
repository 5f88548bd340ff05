use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{Article, ArticleRepository, ArticleStyle, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{db_error, parse_column, sql, SqliteStore};

fn article_from_row(row: &SqliteRow) -> Result<Article> {
    let style: String = row.try_get("style").map_err(db_error)?;
    Ok(Article {
        id: row.try_get::<Uuid, _>("id").map_err(db_error)?,
        title: row.try_get("title").map_err(db_error)?,
        body: row.try_get("body").map_err(db_error)?,
        excerpt: row.try_get("excerpt").map_err(db_error)?,
        featured_image_url: row.try_get("featured_image_url").map_err(db_error)?,
        persona_id: row.try_get::<Uuid, _>("persona_id").map_err(db_error)?,
        persona_name: row.try_get("persona_name").map_err(db_error)?,
        category: row.try_get("category").map_err(db_error)?,
        tags: row.try_get("tags").map_err(db_error)?,
        style: parse_column::<ArticleStyle>("style", &style)?,
        is_public: row.try_get("is_public").map_err(db_error)?,
        published_at: row
            .try_get::<Option<DateTime<Utc>>, _>("published_at")
            .map_err(db_error)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(db_error)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(db_error)?,
    })
}

#[async_trait]
impl ArticleRepository for SqliteStore {
    async fn list(&self) -> Result<Vec<Article>> {
        sqlx::query(sql::SELECT_ARTICLES)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?
            .iter()
            .map(article_from_row)
            .collect()
    }

    async fn list_public(&self) -> Result<Vec<Article>> {
        sqlx::query(sql::SELECT_PUBLIC_ARTICLES)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?
            .iter()
            .map(article_from_row)
            .collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Article>> {
        sqlx::query(sql::SELECT_ARTICLE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .as_ref()
            .map(article_from_row)
            .transpose()
    }

    async fn insert(&self, article: &Article) -> Result<()> {
        sqlx::query(sql::INSERT_ARTICLE)
            .bind(article.id)
            .bind(&article.title)
            .bind(&article.body)
            .bind(&article.excerpt)
            .bind(&article.featured_image_url)
            .bind(article.persona_id)
            .bind(&article.category)
            .bind(&article.tags)
            .bind(article.style.as_str())
            .bind(article.is_public)
            .bind(article.published_at)
            .bind(article.created_at)
            .bind(article.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<bool> {
        let result = sqlx::query(sql::UPDATE_ARTICLE)
            .bind(&article.title)
            .bind(&article.body)
            .bind(&article.excerpt)
            .bind(&article.featured_image_url)
            .bind(article.persona_id)
            .bind(&article.category)
            .bind(&article.tags)
            .bind(article.style.as_str())
            .bind(article.is_public)
            .bind(article.published_at)
            .bind(article.updated_at)
            .bind(article.id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(sql::DELETE_ARTICLE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
