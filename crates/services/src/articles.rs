//! Article management.
//!
//! Every article must be attributed to an existing persona; new attributions
//! must point at an active one. Deletion is permanent.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    Article, ArticleDraft, ArticleRepository, DomainError, Persona, PersonaRepository, Result,
};
use tracing::info;
use uuid::Uuid;

use crate::validation::{clean, require};

/// Upper bound for generated excerpts, before the trailing ellipsis.
pub const EXCERPT_MAX_CHARS: usize = 200;

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    personas: Arc<dyn PersonaRepository>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleRepository>, personas: Arc<dyn PersonaRepository>) -> Self {
        Self { articles, personas }
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        self.articles.list().await
    }

    pub async fn list_public(&self) -> Result<Vec<Article>> {
        self.articles.list_public().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Article> {
        self.articles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Article", id))
    }

    /// Like [`get`](Self::get) but drafts are reported as missing.
    pub async fn get_public(&self, id: Uuid) -> Result<Article> {
        match self.articles.find(id).await? {
            Some(article) if article.is_public => Ok(article),
            _ => Err(DomainError::not_found("Article", id)),
        }
    }

    pub async fn create(&self, draft: ArticleDraft) -> Result<Article> {
        let (title, body) = required_fields(&draft)?;
        let author = self.author(draft.persona_id).await?;
        if !author.is_active {
            return Err(inactive_author(&author));
        }

        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            excerpt: excerpt_for(&draft.excerpt, &body),
            title,
            body,
            featured_image_url: clean(draft.featured_image_url),
            persona_id: author.id,
            persona_name: author.name,
            category: clean(draft.category),
            tags: clean(draft.tags),
            style: draft.style,
            is_public: draft.is_public,
            published_at: draft.is_public.then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.articles.insert(&article).await?;

        info!(article_id = %article.id, persona_id = %article.persona_id, "article created");
        Ok(article)
    }

    /// Replaces every form field. Keeping the current author is allowed even if
    /// that persona has since been deactivated.
    pub async fn update(&self, id: Uuid, draft: ArticleDraft) -> Result<Article> {
        let existing = self.get(id).await?;
        let (title, body) = required_fields(&draft)?;
        let author = self.author(draft.persona_id).await?;
        if author.id != existing.persona_id && !author.is_active {
            return Err(inactive_author(&author));
        }

        let now = Utc::now();
        let article = Article {
            id,
            excerpt: excerpt_for(&draft.excerpt, &body),
            title,
            body,
            featured_image_url: clean(draft.featured_image_url),
            persona_id: author.id,
            persona_name: author.name,
            category: clean(draft.category),
            tags: clean(draft.tags),
            style: draft.style,
            is_public: draft.is_public,
            published_at: if draft.is_public {
                existing.published_at.or(Some(now))
            } else {
                None
            },
            created_at: existing.created_at,
            updated_at: now,
        };

        if !self.articles.update(&article).await? {
            return Err(DomainError::not_found("Article", id));
        }

        info!(article_id = %id, "article updated");
        Ok(article)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.articles.delete(id).await? {
            return Err(DomainError::not_found("Article", id));
        }

        info!(article_id = %id, "article deleted");
        Ok(())
    }

    async fn author(&self, persona_id: Option<Uuid>) -> Result<Persona> {
        let id = persona_id
            .ok_or_else(|| DomainError::ValidationError("personaId is required".into()))?;
        self.personas.find(id).await?.ok_or_else(|| {
            DomainError::ValidationError(format!("persona {id} does not exist"))
        })
    }
}

fn required_fields(draft: &ArticleDraft) -> Result<(String, String)> {
    Ok((require("title", &draft.title)?, require("body", &draft.body)?))
}

fn inactive_author(persona: &Persona) -> DomainError {
    DomainError::ValidationError(format!(
        "persona {} is inactive and cannot author articles",
        persona.name
    ))
}

fn excerpt_for(submitted: &str, body: &str) -> String {
    match submitted.trim() {
        "" => generate_excerpt(body),
        excerpt => excerpt.to_string(),
    }
}

/// Builds a one-paragraph teaser from the article body.
///
/// Whitespace is collapsed; bodies longer than [`EXCERPT_MAX_CHARS`] are cut on
/// a word boundary and get a trailing `...`.
pub fn generate_excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_MAX_CHARS {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(EXCERPT_MAX_CHARS).collect();
    let on_boundary = collapsed.chars().nth(EXCERPT_MAX_CHARS) == Some(' ');
    let kept = match cut.rfind(' ') {
        Some(idx) if !on_boundary && idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}...", kept.trim_end_matches([',', ';', ':', '.', ' ']))
}
