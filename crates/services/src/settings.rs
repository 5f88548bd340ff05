//! The site settings singleton.

use std::sync::Arc;

use domains::{Result, Settings, SettingsDraft, SettingsRepository};
use tracing::info;

use crate::validation::{clean, require};

#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    /// Returns the stored settings, materialising the defaults on first use.
    pub async fn get(&self) -> Result<Settings> {
        if let Some(settings) = self.settings.load().await? {
            return Ok(settings);
        }

        let initial = Settings::initial();
        let settings = self.settings.load_or_insert(&initial).await?;
        if settings.id == initial.id {
            info!(settings_id = %settings.id, "default site settings created");
        }
        Ok(settings)
    }

    /// Edits the singleton in place. The id never changes.
    pub async fn update(&self, draft: SettingsDraft) -> Result<Settings> {
        let site_name = require("siteName", &draft.site_name)?;

        let mut settings = self.get().await?;
        settings.site_name = site_name;
        settings.tagline = clean(draft.tagline);
        settings.is_public = draft.is_public;
        self.settings.save(&settings).await?;

        info!(site_name = %settings.site_name, is_public = settings.is_public, "site settings updated");
        Ok(settings)
    }
}
