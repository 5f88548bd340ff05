use services::{ArticleService, AuthService, PersonaService, SettingsService};

/// Shared by every handler behind an `Arc`.
pub struct AppState {
    pub auth: AuthService,
    pub personas: PersonaService,
    pub articles: ArticleService,
    pub settings: SettingsService,
    pub cookies: CookiePolicy,
}

/// How the session cookie is issued.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiePolicy {
    /// Adds the `Secure` attribute; enable behind HTTPS
    pub secure: bool,
}
