//! Server-rendered views: panel state, form models and askama templates.
//! Independent of the web framework.

pub mod forms;
pub mod pages;
pub mod panel;

pub use forms::{ArticleForm, Credentials, PersonaForm, SelectOption, SettingsForm};
pub use pages::{
    render, ArticlePage, ArticlesPanel, DashboardPage, ErrorPage, HomePage, LoginPage,
    PersonasPanel, SettingsPanel, SiteChrome,
};
pub use panel::{DashboardQuery, PanelMode, Tab};
