//! Askama page and panel templates.

use askama::Template;
use chrono::{Datelike, Utc};
use domains::{Article, DomainError, Persona, Result, SessionIdentity, Settings};
use tracing::error;

use super::forms::{ArticleForm, PersonaForm, SelectOption, SettingsForm};
use super::panel::{PanelMode, Tab};

pub const NO_AUTHORS_HINT: &str = "Create a persona first before writing articles.";
pub const CONFIRM_DELETE_ARTICLE: &str = "Delete this article permanently?";
pub const CONFIRM_DEACTIVATE_PERSONA: &str = "Deactivate this persona?";

/// Renders a template, reporting failures as internal errors.
pub fn render<T: Template>(template: &T) -> Result<String> {
    template.render().map_err(|e| {
        error!(error = %e, "template rendering failed");
        DomainError::Internal(format!("template error: {e}"))
    })
}

/// "1 article" / "3 articles"
pub fn article_count_label(count: i64) -> String {
    if count == 1 {
        "1 article".to_string()
    } else {
        format!("{count} articles")
    }
}

// ─── Public site ────────────────────────────────────────────────────────────

/// Header and footer data shared by every public page.
pub struct SiteChrome {
    pub site_name: String,
    pub tagline: Option<String>,
    pub year: i32,
}

impl SiteChrome {
    pub fn new(settings: &Settings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            tagline: settings.tagline.clone(),
            year: Utc::now().year(),
        }
    }
}

#[derive(Template)]
#[template(path = "site/home.html")]
pub struct HomePage {
    pub chrome: SiteChrome,
    pub is_public: bool,
    pub articles: Vec<Article>,
}

#[derive(Template)]
#[template(path = "site/article.html")]
pub struct ArticlePage {
    pub chrome: SiteChrome,
    pub article: Article,
    pub paragraphs: Vec<String>,
}

impl ArticlePage {
    pub fn new(settings: &Settings, article: Article) -> Self {
        let paragraphs = article
            .body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        Self {
            chrome: SiteChrome::new(settings),
            article,
            paragraphs,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub message: String,
}

// ─── Admin ──────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub email: String,
}

pub struct TabLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardPage {
    pub admin_name: String,
    pub tabs: Vec<TabLink>,
    /// The rendered panel of the open tab
    pub panel: String,
}

impl DashboardPage {
    pub fn new(admin: &SessionIdentity, open: Tab, panel: String) -> Self {
        Self {
            admin_name: admin.name.clone(),
            tabs: Tab::ALL
                .iter()
                .map(|tab| TabLink {
                    label: tab.label(),
                    href: tab.href(),
                    active: *tab == open,
                })
                .collect(),
            panel,
        }
    }
}

/// The create/edit card of the articles tab.
pub struct ArticleEditor {
    pub heading: &'static str,
    pub action: String,
    pub form: ArticleForm,
    pub author_options: Vec<SelectOption>,
    pub style_options: Vec<SelectOption>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/articles_panel.html")]
pub struct ArticlesPanel {
    pub articles: Vec<Article>,
    pub creating: bool,
    pub has_authors: bool,
    pub editor: Option<ArticleEditor>,
    pub no_authors_hint: &'static str,
    pub confirm_delete: &'static str,
}

impl ArticlesPanel {
    /// `rejected` carries a submitted form and the reason it was refused.
    pub fn build(
        articles: Vec<Article>,
        personas: &[Persona],
        mode: PanelMode,
        rejected: Option<(ArticleForm, String)>,
    ) -> Result<Self> {
        let (form, error) = match rejected {
            Some((form, error)) => (Some(form), Some(error)),
            None => (None, None),
        };

        let editor = match mode {
            PanelMode::Idle => None,
            PanelMode::Creating => {
                let form = form.unwrap_or_else(|| ArticleForm::empty(personas));
                Some(article_editor("New Article", "/admin/dashboard/articles".into(), form, personas, error))
            }
            PanelMode::Editing(id) => {
                let form = match form {
                    Some(form) => form,
                    None => articles
                        .iter()
                        .find(|a| a.id == id)
                        .map(ArticleForm::from_article)
                        .ok_or_else(|| DomainError::not_found("Article", id))?,
                };
                let action = format!("/admin/dashboard/articles/{id}");
                Some(article_editor("Edit Article", action, form, personas, error))
            }
        };

        Ok(Self {
            articles,
            creating: mode.is_creating(),
            has_authors: personas.iter().any(|p| p.is_active),
            editor,
            no_authors_hint: NO_AUTHORS_HINT,
            confirm_delete: CONFIRM_DELETE_ARTICLE,
        })
    }
}

fn article_editor(
    heading: &'static str,
    action: String,
    form: ArticleForm,
    personas: &[Persona],
    error: Option<String>,
) -> ArticleEditor {
    ArticleEditor {
        heading,
        action,
        author_options: form.author_options(personas),
        style_options: form.style_options(),
        form,
        error,
    }
}

pub struct PersonaRow {
    pub persona: Persona,
    pub article_label: String,
}

pub struct PersonaEditor {
    pub heading: &'static str,
    pub action: String,
    pub form: PersonaForm,
    pub role_options: Vec<SelectOption>,
    /// Reactivation is only offered on the edit form
    pub show_active: bool,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/personas_panel.html")]
pub struct PersonasPanel {
    pub personas: Vec<PersonaRow>,
    pub creating: bool,
    pub editor: Option<PersonaEditor>,
    pub confirm_deactivate: &'static str,
}

impl PersonasPanel {
    pub fn build(
        personas: Vec<Persona>,
        mode: PanelMode,
        rejected: Option<(PersonaForm, String)>,
    ) -> Result<Self> {
        let (form, error) = match rejected {
            Some((form, error)) => (Some(form), Some(error)),
            None => (None, None),
        };

        let editor = match mode {
            PanelMode::Idle => None,
            PanelMode::Creating => {
                let form = form.unwrap_or_else(PersonaForm::empty);
                Some(PersonaEditor {
                    heading: "New Persona",
                    action: "/admin/dashboard/personas".into(),
                    role_options: form.role_options(),
                    form,
                    show_active: false,
                    error,
                })
            }
            PanelMode::Editing(id) => {
                let form = match form {
                    Some(form) => form,
                    None => personas
                        .iter()
                        .find(|p| p.id == id)
                        .map(PersonaForm::from_persona)
                        .ok_or_else(|| DomainError::not_found("Persona", id))?,
                };
                Some(PersonaEditor {
                    heading: "Edit Persona",
                    action: format!("/admin/dashboard/personas/{id}"),
                    role_options: form.role_options(),
                    form,
                    show_active: true,
                    error,
                })
            }
        };

        Ok(Self {
            personas: personas
                .into_iter()
                .map(|persona| PersonaRow {
                    article_label: article_count_label(persona.article_count),
                    persona,
                })
                .collect(),
            creating: mode.is_creating(),
            editor,
            confirm_deactivate: CONFIRM_DEACTIVATE_PERSONA,
        })
    }
}

#[derive(Template)]
#[template(path = "admin/settings_panel.html")]
pub struct SettingsPanel {
    pub form: SettingsForm,
    pub error: Option<String>,
    pub saved: bool,
}

impl SettingsPanel {
    pub fn build(settings: &Settings, rejected: Option<(SettingsForm, String)>, saved: bool) -> Self {
        match rejected {
            Some((form, error)) => Self {
                form,
                error: Some(error),
                saved: false,
            },
            None => Self {
                form: SettingsForm::from_settings(settings),
                error: None,
                saved,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{ArticleStyle, PersonaRole};
    use uuid::Uuid;

    fn persona(name: &str, active: bool, articles: i64) -> Persona {
        Persona {
            id: Uuid::new_v4(),
            name: name.into(),
            bio: format!("{name} writes things"),
            role: PersonaRole::Commentator,
            profile_image_url: None,
            more_info_text: None,
            external_links: None,
            display_order: 0,
            is_active: active,
            article_count: articles,
            created_at: Utc::now(),
        }
    }

    fn article(author: &Persona) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            title: "Robots <3 Markets".into(),
            body: "First.\n\nSecond.".into(),
            excerpt: "First. Second.".into(),
            featured_image_url: None,
            persona_id: author.id,
            persona_name: author.name.clone(),
            category: Some("technology".into()),
            tags: None,
            style: ArticleStyle::Commentary,
            is_public: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_count_label() {
        assert_eq!(article_count_label(0), "0 articles");
        assert_eq!(article_count_label(1), "1 article");
        assert_eq!(article_count_label(7), "7 articles");
    }

    #[test]
    fn test_articles_panel_without_authors_shows_hint() {
        let panel = ArticlesPanel::build(vec![], &[persona("Gone", false, 0)], PanelMode::Idle, None)
            .unwrap();
        let html = render(&panel).unwrap();

        assert!(!panel.has_authors);
        assert!(html.contains(NO_AUTHORS_HINT));
        assert!(html.contains("No articles yet"));
    }

    #[test]
    fn test_articles_panel_edit_form_is_populated_and_escaped() {
        let author = persona("Ada", true, 1);
        let item = article(&author);
        let panel = ArticlesPanel::build(
            vec![item.clone()],
            std::slice::from_ref(&author),
            PanelMode::Editing(item.id),
            None,
        )
        .unwrap();
        let html = render(&panel).unwrap();

        assert!(html.contains("Edit Article"));
        assert!(html.contains(&format!("/admin/dashboard/articles/{}", item.id)));
        assert!(html.contains("Robots &lt;3 Markets") || html.contains("Robots &#60;3 Markets"));
        assert!(html.contains("Draft"));
        assert!(html.contains(CONFIRM_DELETE_ARTICLE));
    }

    #[test]
    fn test_editing_unknown_article_is_not_found() {
        let result = ArticlesPanel::build(vec![], &[], PanelMode::Editing(Uuid::new_v4()), None);
        assert!(matches!(result, Err(DomainError::NotFound(..))));
    }

    #[test]
    fn test_rejected_form_is_rerendered_with_message() {
        let author = persona("Ada", true, 0);
        let submitted = ArticleForm {
            title: "Half written".into(),
            ..ArticleForm::empty(std::slice::from_ref(&author))
        };
        let panel = ArticlesPanel::build(
            vec![],
            std::slice::from_ref(&author),
            PanelMode::Creating,
            Some((submitted, "body is required".into())),
        )
        .unwrap();
        let html = render(&panel).unwrap();

        assert!(html.contains("Half written"));
        assert!(html.contains("body is required"));
    }

    #[test]
    fn test_personas_panel_marks_inactive() {
        let panel = PersonasPanel::build(
            vec![persona("Ada", true, 1), persona("Bert", false, 3)],
            PanelMode::Idle,
            None,
        )
        .unwrap();
        let html = render(&panel).unwrap();

        assert!(html.contains("Inactive"));
        assert!(html.contains("1 article"));
        assert!(html.contains("3 articles"));
        assert!(html.contains(CONFIRM_DEACTIVATE_PERSONA));
        assert!(panel.editor.is_none());
    }

    #[test]
    fn test_persona_create_form_hides_active_checkbox() {
        let panel = PersonasPanel::build(vec![], PanelMode::Creating, None).unwrap();
        let editor = panel.editor.as_ref().unwrap();
        assert!(!editor.show_active);
        assert_eq!(editor.heading, "New Persona");
    }

    #[test]
    fn test_footer_names_the_site() {
        let mut settings = Settings::initial();
        settings.site_name = "Synthetic Times".into();
        let page = HomePage {
            chrome: SiteChrome::new(&settings),
            is_public: true,
            articles: vec![],
        };
        let html = render(&page).unwrap();
        let year = Utc::now().year();

        assert!(html.contains(&format!("© {year} Synthetic Times. All rights reserved.")));
    }
}
