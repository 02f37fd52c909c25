//! Navigation targets of the companies list.
//!
//! The current query string is passed in explicitly so that "create" can carry
//! the list state (search, sort, page) over to the next view.

use serde::Serialize;

use crate::domain::types::CompanyId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Edit(CompanyId),
    /// Form target of the destructive delete action.
    Delete(CompanyId),
}

/// How the browser history is updated when following a navigation.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    Replace,
    Push,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigateRequest {
    pub resource: &'static str,
    pub action: Action,
    pub preserve_query: bool,
    pub mode: HistoryMode,
}

/// A resolved navigation the rendering layer can follow.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Navigation {
    pub location: String,
    pub mode: HistoryMode,
}

pub trait Navigator {
    fn navigate(&self, request: &NavigateRequest, current_query: &str) -> Navigation;
}

/// Maps resources and actions onto the application's URL layout.
#[derive(Clone, Debug, Default)]
pub struct UrlNavigator {
    base_path: String,
}

impl UrlNavigator {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into().trim_end_matches('/').to_string(),
        }
    }

    fn path(&self, resource: &str, action: &Action) -> String {
        let base = &self.base_path;
        match action {
            Action::List => format!("{base}/{resource}"),
            Action::Create => format!("{base}/{resource}/create"),
            Action::Edit(id) => format!("{base}/{resource}/edit/{id}"),
            Action::Delete(id) => format!("{base}/{resource}/delete/{id}"),
        }
    }
}

impl Navigator for UrlNavigator {
    fn navigate(&self, request: &NavigateRequest, current_query: &str) -> Navigation {
        let mut location = self.path(request.resource, &request.action);
        let query = current_query.trim_start_matches('?');
        if request.preserve_query && !query.is_empty() {
            location.push('?');
            location.push_str(query);
        }
        Navigation {
            location,
            mode: request.mode,
        }
    }
}
