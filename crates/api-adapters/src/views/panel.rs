//! Which dashboard tab is open and what it is doing.
//!
//! The dashboard is driven entirely by its query string
//! (`?tab=articles&new=1`, `?tab=personas&edit={id}`), so a reload or a
//! redirect after a successful submit always lands on a consistent view.

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Articles,
    Personas,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Articles, Self::Personas, Self::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Articles => "articles",
            Self::Personas => "personas",
            Self::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Articles => "Articles",
            Self::Personas => "Personas",
            Self::Settings => "Settings",
        }
    }

    /// Unknown or missing values open the first tab.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("personas") => Self::Personas,
            Some("settings") => Self::Settings,
            _ => Self::Articles,
        }
    }

    pub fn href(&self) -> String {
        format!("/admin/dashboard?tab={}", self.as_str())
    }
}

/// The list-only view, the create form, or the edit form for one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelMode {
    #[default]
    Idle,
    Creating,
    Editing(Uuid),
}

impl PanelMode {
    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Creating)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub new: Option<String>,
    pub edit: Option<String>,
    pub saved: Option<String>,
}

impl DashboardQuery {
    pub fn tab(&self) -> Tab {
        Tab::parse(self.tab.as_deref())
    }

    /// `edit` wins over `new`; an unparsable id falls back to the list.
    pub fn mode(&self) -> PanelMode {
        if let Some(raw) = self.edit.as_deref() {
            return raw
                .trim()
                .parse()
                .map(PanelMode::Editing)
                .unwrap_or(PanelMode::Idle);
        }
        if flag(self.new.as_deref()) {
            return PanelMode::Creating;
        }
        PanelMode::Idle
    }

    pub fn saved(&self) -> bool {
        flag(self.saved.as_deref())
    }
}

fn flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some(v) if !v.is_empty() && v != "0" && v != "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(tab: Option<&str>, new: Option<&str>, edit: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            tab: tab.map(String::from),
            new: new.map(String::from),
            edit: edit.map(String::from),
            saved: None,
        }
    }

    #[test]
    fn test_unknown_tab_opens_articles() {
        assert_eq!(query(Some("billing"), None, None).tab(), Tab::Articles);
        assert_eq!(query(None, None, None).tab(), Tab::Articles);
        assert_eq!(query(Some("personas"), None, None).tab(), Tab::Personas);
    }

    #[test]
    fn test_mode_from_query() {
        let id = Uuid::new_v4();
        assert_eq!(query(None, None, None).mode(), PanelMode::Idle);
        assert_eq!(query(None, Some("1"), None).mode(), PanelMode::Creating);
        assert_eq!(query(None, Some("0"), None).mode(), PanelMode::Idle);
        assert_eq!(
            query(None, Some("1"), Some(&id.to_string())).mode(),
            PanelMode::Editing(id)
        );
        assert_eq!(query(None, None, Some("nope")).mode(), PanelMode::Idle);
    }
}
