//! HTML form models.
//!
//! Browsers post every input as a string and omit unchecked checkboxes, so
//! these mirror the inputs one-to-one and convert into domain drafts only on
//! submit. Keeping the raw strings lets a rejected form be re-rendered exactly
//! as the admin typed it.

use domains::{
    Article, ArticleDraft, ArticleStyle, DomainError, Persona, PersonaDraft, PersonaRole, Result,
    Settings, SettingsDraft,
};
use serde::Deserialize;
use uuid::Uuid;

/// One `<option>` of a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Sign-in payload, shared by the login form and `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ─── Articles ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image_url: String,
    #[serde(default)]
    pub persona_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub style: String,
    /// Checkbox: present when ticked
    pub is_public: Option<String>,
}

impl ArticleForm {
    /// A blank article: analysis, public, by the first available author.
    pub fn empty(personas: &[Persona]) -> Self {
        Self {
            persona_id: personas
                .iter()
                .find(|p| p.is_active)
                .map(|p| p.id.to_string())
                .unwrap_or_default(),
            style: ArticleStyle::default().as_str().to_string(),
            is_public: Some(checked()),
            ..Self::default()
        }
    }

    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            body: article.body.clone(),
            excerpt: article.excerpt.clone(),
            featured_image_url: article.featured_image_url.clone().unwrap_or_default(),
            persona_id: article.persona_id.to_string(),
            category: article.category.clone().unwrap_or_default(),
            tags: article.tags.clone().unwrap_or_default(),
            style: article.style.as_str().to_string(),
            is_public: article.is_public.then(checked),
        }
    }

    pub fn is_public(&self) -> bool {
        self.is_public.is_some()
    }

    pub fn to_draft(&self) -> Result<ArticleDraft> {
        Ok(ArticleDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            excerpt: self.excerpt.clone(),
            featured_image_url: optional(&self.featured_image_url),
            persona_id: parse_persona_id(&self.persona_id)?,
            category: optional(&self.category),
            tags: optional(&self.tags),
            style: parse_or_default(&self.style)?,
            is_public: self.is_public(),
        })
    }

    /// Active personas, plus the current author when it has since been deactivated.
    pub fn author_options(&self, personas: &[Persona]) -> Vec<SelectOption> {
        personas
            .iter()
            .filter(|p| p.is_active || p.id.to_string() == self.persona_id)
            .map(|p| SelectOption {
                value: p.id.to_string(),
                label: format!("{} ({})", p.name, p.role),
                selected: p.id.to_string() == self.persona_id,
            })
            .collect()
    }

    pub fn style_options(&self) -> Vec<SelectOption> {
        ArticleStyle::ALL
            .iter()
            .map(|s| option(s.as_str(), s.label(), &self.style))
            .collect()
    }
}

// ─── Personas ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub more_info_text: String,
    #[serde(default)]
    pub external_links: String,
    #[serde(default)]
    pub display_order: String,
    /// Checkbox, only rendered on the edit form
    pub is_active: Option<String>,
}

impl PersonaForm {
    pub fn empty() -> Self {
        Self {
            role: PersonaRole::default().as_str().to_string(),
            display_order: "0".to_string(),
            is_active: Some(checked()),
            ..Self::default()
        }
    }

    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            bio: persona.bio.clone(),
            role: persona.role.as_str().to_string(),
            profile_image_url: persona.profile_image_url.clone().unwrap_or_default(),
            more_info_text: persona.more_info_text.clone().unwrap_or_default(),
            external_links: persona.external_links.clone().unwrap_or_default(),
            display_order: persona.display_order.to_string(),
            is_active: persona.is_active.then(checked),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active.is_some()
    }

    /// `editing` decides whether the Active checkbox was on the page; a
    /// missing checkbox on the create form must not deactivate anything.
    pub fn to_draft(&self, editing: bool) -> Result<PersonaDraft> {
        let display_order = match self.display_order.trim() {
            "" => 0,
            raw => raw.parse().map_err(|_| {
                DomainError::ValidationError("displayOrder must be a whole number".into())
            })?,
        };

        Ok(PersonaDraft {
            name: self.name.clone(),
            bio: self.bio.clone(),
            role: parse_or_default(&self.role)?,
            profile_image_url: optional(&self.profile_image_url),
            more_info_text: optional(&self.more_info_text),
            external_links: optional(&self.external_links),
            display_order,
            is_active: editing.then(|| self.is_active()),
        })
    }

    pub fn role_options(&self) -> Vec<SelectOption> {
        PersonaRole::ALL
            .iter()
            .map(|r| option(r.as_str(), r.label(), &self.role))
            .collect()
    }
}

// ─── Settings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    pub is_public: Option<String>,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            tagline: settings.tagline.clone().unwrap_or_default(),
            is_public: settings.is_public.then(checked),
        }
    }

    pub fn is_public(&self) -> bool {
        self.is_public.is_some()
    }

    pub fn to_draft(&self) -> SettingsDraft {
        SettingsDraft {
            site_name: self.site_name.clone(),
            tagline: optional(&self.tagline),
            is_public: self.is_public(),
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn checked() -> String {
    "on".to_string()
}

fn optional(raw: &str) -> Option<String> {
    match raw.trim() {
        "" => None,
        value => Some(value.to_string()),
    }
}

fn parse_persona_id(raw: &str) -> Result<Option<Uuid>> {
    match raw.trim() {
        "" => Ok(None),
        value => value
            .parse()
            .map(Some)
            .map_err(|_| DomainError::ValidationError(format!("'{value}' is not a persona id"))),
    }
}

fn parse_or_default<T>(raw: &str) -> Result<T>
where
    T: Default + std::str::FromStr<Err = DomainError>,
{
    match raw.trim() {
        "" => Ok(T::default()),
        value => value.parse(),
    }
}

fn option(value: &str, label: &str, current: &str) -> SelectOption {
    SelectOption {
        value: value.to_string(),
        label: label.to_string(),
        selected: value == current.trim(),
    }
}
