//! # In-memory store
//!
//! A `DashMap`-backed implementation of every repository port. It mirrors the
//! relational store's behaviour: unique admin emails, the article → persona
//! reference, and derived `article_count` / `persona_name` columns.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{
    Admin, AdminRepository, Article, ArticleRepository, DomainError, Persona, PersonaRepository,
    Result, Settings, SettingsRepository,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    /// Keyed by email, which is unique
    admins: DashMap<String, Admin>,
    personas: DashMap<Uuid, Persona>,
    articles: DashMap<Uuid, Article>,
    settings: RwLock<Option<Settings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn persona_name(&self, id: Uuid) -> String {
        self.personas
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn with_persona_name(&self, mut article: Article) -> Article {
        article.persona_name = self.persona_name(article.persona_id);
        article
    }

    fn article_counts(&self) -> HashMap<Uuid, i64> {
        let mut counts = HashMap::new();
        for article in self.articles.iter() {
            *counts.entry(article.persona_id).or_insert(0) += 1;
        }
        counts
    }

    fn check_author(&self, article: &Article) -> Result<()> {
        if self.personas.contains_key(&article.persona_id) {
            Ok(())
        } else {
            Err(DomainError::ValidationError(format!(
                "persona {} does not exist",
                article.persona_id
            )))
        }
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        Ok(self.admins.get(email).map(|a| a.value().clone()))
    }

    async fn insert(&self, admin: &Admin) -> Result<()> {
        match self.admins.entry(admin.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "an admin with email {} already exists",
                admin.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(admin.clone());
                Ok(())
            }
        }
    }
}

#[async_trait]
impl PersonaRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Persona>> {
        let counts = self.article_counts();
        let mut personas: Vec<Persona> = self
            .personas
            .iter()
            .map(|p| Persona {
                article_count: counts.get(&p.id).copied().unwrap_or(0),
                ..p.value().clone()
            })
            .collect();
        personas.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(personas)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Persona>> {
        let Some(persona) = self.personas.get(&id).map(|p| p.value().clone()) else {
            return Ok(None);
        };
        let article_count = self
            .articles
            .iter()
            .filter(|a| a.persona_id == id)
            .count() as i64;
        Ok(Some(Persona {
            article_count,
            ..persona
        }))
    }

    async fn insert(&self, persona: &Persona) -> Result<()> {
        match self.personas.entry(persona.id) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "persona {} already exists",
                persona.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(persona.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, persona: &Persona) -> Result<bool> {
        match self.personas.get_mut(&persona.id) {
            Some(mut stored) => {
                *stored = persona.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool> {
        match self.personas.get_mut(&id) {
            Some(mut stored) => {
                stored.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Article>> {
        let mut articles: Vec<Article> = self.articles.iter().map(|a| a.value().clone()).collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles
            .into_iter()
            .map(|a| self.with_persona_name(a))
            .collect())
    }

    async fn list_public(&self) -> Result<Vec<Article>> {
        let mut articles: Vec<Article> = self
            .articles
            .iter()
            .filter(|a| a.is_public)
            .map(|a| a.value().clone())
            .collect();
        articles.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(articles
            .into_iter()
            .map(|a| self.with_persona_name(a))
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Article>> {
        let article = self.articles.get(&id).map(|a| a.value().clone());
        Ok(article.map(|a| self.with_persona_name(a)))
    }

    async fn insert(&self, article: &Article) -> Result<()> {
        self.check_author(article)?;
        match self.articles.entry(article.id) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "article {} already exists",
                article.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(article.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, article: &Article) -> Result<bool> {
        self.check_author(article)?;
        match self.articles.get_mut(&article.id) {
            Some(mut stored) => {
                *stored = article.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.articles.remove(&id).is_some())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn load(&self) -> Result<Option<Settings>> {
        Ok(self.settings.read().await.clone())
    }

    async fn load_or_insert(&self, initial: &Settings) -> Result<Settings> {
        let mut slot = self.settings.write().await;
        Ok(slot.get_or_insert_with(|| initial.clone()).clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}
