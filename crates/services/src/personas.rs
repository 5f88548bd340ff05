//! Persona management. "Deleting" a persona only deactivates it, so articles
//! attributed to it keep their author.

use std::sync::Arc;

use chrono::Utc;
use domains::{DomainError, Persona, PersonaDraft, PersonaRepository, Result};
use tracing::info;
use uuid::Uuid;

use crate::validation::{clean, require};

#[derive(Clone)]
pub struct PersonaService {
    personas: Arc<dyn PersonaRepository>,
}

impl PersonaService {
    pub fn new(personas: Arc<dyn PersonaRepository>) -> Self {
        Self { personas }
    }

    pub async fn list(&self) -> Result<Vec<Persona>> {
        self.personas.list().await
    }

    /// The personas offered as article authors.
    pub async fn list_active(&self) -> Result<Vec<Persona>> {
        let mut personas = self.personas.list().await?;
        personas.retain(|p| p.is_active);
        Ok(personas)
    }

    pub async fn get(&self, id: Uuid) -> Result<Persona> {
        self.personas
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Persona", id))
    }

    pub async fn create(&self, draft: PersonaDraft) -> Result<Persona> {
        let persona = build(Uuid::new_v4(), draft, None)?;
        self.personas.insert(&persona).await?;

        info!(persona_id = %persona.id, name = %persona.name, "persona created");
        Ok(persona)
    }

    /// Replaces every form field of the persona.
    pub async fn update(&self, id: Uuid, draft: PersonaDraft) -> Result<Persona> {
        let existing = self.get(id).await?;
        let persona = build(id, draft, Some(&existing))?;

        if !self.personas.update(&persona).await? {
            return Err(DomainError::not_found("Persona", id));
        }

        info!(persona_id = %id, "persona updated");
        Ok(persona)
    }

    /// Soft delete: flips `is_active` off and returns the persona as stored.
    pub async fn deactivate(&self, id: Uuid) -> Result<Persona> {
        if !self.personas.set_active(id, false).await? {
            return Err(DomainError::not_found("Persona", id));
        }

        info!(persona_id = %id, "persona deactivated");
        self.get(id).await
    }
}

fn build(id: Uuid, draft: PersonaDraft, existing: Option<&Persona>) -> Result<Persona> {
    let name = require("name", &draft.name)?;
    let bio = require("bio", &draft.bio)?;

    Ok(Persona {
        id,
        name,
        bio,
        role: draft.role,
        profile_image_url: clean(draft.profile_image_url),
        more_info_text: clean(draft.more_info_text),
        external_links: clean(draft.external_links),
        display_order: draft.display_order,
        is_active: draft
            .is_active
            .or(existing.map(|p| p.is_active))
            .unwrap_or(true),
        article_count: existing.map_or(0, |p| p.article_count),
        created_at: existing.map_or_else(Utc::now, |p| p.created_at),
    })
}
