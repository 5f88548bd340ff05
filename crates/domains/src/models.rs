//! # Domain Models
//!
//! These structs represent the editorial entities managed by the admin panel.
//! Wire names are camelCase so the JSON API mirrors the admin forms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

pub const DEFAULT_SITE_NAME: &str = "The Artificial Intelligencer";
pub const DEFAULT_TAGLINE: &str = "AI-Powered Editorial Content";

// ─── Admins ─────────────────────────────────────────────────────────────────

/// A staff account allowed into the admin panel.
///
/// Provisioned out-of-band (see the `seed` binary) and only ever read by the
/// authenticator afterwards.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    /// Unique login identifier
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The identity carried inside a session token after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&Admin> for SessionIdentity {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
        }
    }
}

// ─── Personas ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaRole {
    #[default]
    Reporter,
    Commentator,
    Contributor,
}

impl PersonaRole {
    pub const ALL: [PersonaRole; 3] = [Self::Reporter, Self::Commentator, Self::Contributor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reporter => "reporter",
            Self::Commentator => "commentator",
            Self::Contributor => "contributor",
        }
    }

    /// Capitalised label for select boxes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reporter => "Reporter",
            Self::Commentator => "Commentator",
            Self::Contributor => "Contributor",
        }
    }
}

impl fmt::Display for PersonaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reporter" => Ok(Self::Reporter),
            "commentator" => Ok(Self::Commentator),
            "contributor" => Ok(Self::Contributor),
            other => Err(DomainError::ValidationError(format!(
                "unknown persona role '{other}'"
            ))),
        }
    }
}

/// An AI-generated author profile that articles are attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub role: PersonaRole,
    pub profile_image_url: Option<String>,
    pub more_info_text: Option<String>,
    pub external_links: Option<String>,
    pub display_order: i32,
    /// `false` once the persona has been "deleted" from the panel
    pub is_active: bool,
    /// Derived by the store at read time; ignored on writes
    #[serde(default)]
    pub article_count: i64,
    pub created_at: DateTime<Utc>,
}

/// The persona form payload. Updates replace every field; `is_active` is only
/// touched when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub role: PersonaRole,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub more_info_text: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub external_links: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_active: Option<bool>,
}

// ─── Articles ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStyle {
    #[default]
    Analysis,
    Commentary,
    Satire,
}

impl ArticleStyle {
    pub const ALL: [ArticleStyle; 3] = [Self::Analysis, Self::Commentary, Self::Satire];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Commentary => "commentary",
            Self::Satire => "satire",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Commentary => "Commentary",
            Self::Satire => "Satire",
        }
    }
}

impl fmt::Display for ArticleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analysis" => Ok(Self::Analysis),
            "commentary" => Ok(Self::Commentary),
            "satire" => Ok(Self::Satire),
            other => Err(DomainError::ValidationError(format!(
                "unknown article style '{other}'"
            ))),
        }
    }
}

/// A content piece attributed to one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub featured_image_url: Option<String>,
    pub persona_id: Uuid,
    /// Joined from the persona at read time
    #[serde(default)]
    pub persona_name: String,
    pub category: Option<String>,
    /// Free-form, comma separated
    pub tags: Option<String>,
    pub style: ArticleStyle,
    pub is_public: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The article form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Generated from the body when blank
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub featured_image_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub persona_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tags: Option<String>,
    #[serde(default)]
    pub style: ArticleStyle,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl Default for ArticleDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            excerpt: String::new(),
            featured_image_url: None,
            persona_id: None,
            category: None,
            tags: None,
            style: ArticleStyle::default(),
            is_public: true,
        }
    }
}

// ─── Settings ───────────────────────────────────────────────────────────────

/// Site-wide settings. Exactly one row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: Uuid,
    pub site_name: String,
    pub tagline: Option<String>,
    /// When false the public site hides all articles
    pub is_public: bool,
}

impl Settings {
    /// The row materialised on first read.
    pub fn initial() -> Self {
        Self {
            id: Uuid::new_v4(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            tagline: Some(DEFAULT_TAGLINE.to_string()),
            is_public: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDraft {
    #[serde(default)]
    pub site_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tagline: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

// ─── Serde helpers ──────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

/// Admin forms submit `""` for untouched optional inputs; treat those as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
