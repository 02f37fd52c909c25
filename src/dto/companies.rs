//! DTOs bridging the companies list services with templates and URLs.

use serde::{Deserialize, Serialize};

use crate::binder::ListQueryBinder;
use crate::columns::{Column, RowView};
use crate::domain::query::{FilterField, SortField, SortOrder, Sorter};
use crate::navigation::Navigation;
use crate::pagination::Pager;

/// List state carried in the query string of the companies page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompaniesQuery {
    /// Name search text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl CompaniesQuery {
    /// Canonical query describing the binder state.
    pub fn from_binder(binder: &ListQueryBinder) -> Self {
        let sorter = binder.sorter();
        let page = binder.pagination().page_index + 1;
        Self {
            name: binder
                .default_filter_value(FilterField::Name)
                .map(str::to_string),
            page: (page > 1).then_some(page),
            sort: (sorter != Sorter::default()).then(|| sorter.field.to_string()),
            order: (sorter != Sorter::default()).then(|| sorter.order.to_string()),
        }
    }

    /// Parses `sort`/`order`, ignoring values the view does not support.
    pub fn sorter(&self) -> Option<Sorter> {
        let field = self.sort.as_deref()?.parse::<SortField>().ok()?;
        let order = self
            .order
            .as_deref()
            .and_then(|order| order.parse::<SortOrder>().ok())
            .unwrap_or(SortOrder::Asc);
        Some(Sorter::new(field, order))
    }

    /// Encodes the query for links; empty when every value is the default.
    pub fn to_query_string(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to encode list query: {err}");
            String::new()
        })
    }

    /// Same query pointing at another page.
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: (page > 1).then_some(page),
            ..self.clone()
        }
    }
}

/// One entry of the pager; `number` is `None` for a gap.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: Option<usize>,
    pub href: String,
    pub current: bool,
}

/// Sort link of a column header.
#[derive(Debug, Serialize)]
pub struct SortLink {
    pub active: bool,
    pub order: Option<SortOrder>,
    pub href: String,
}

/// Data required to render the companies list template.
#[derive(Debug, Serialize)]
pub struct CompaniesPageData {
    pub columns: &'static [Column],
    pub rows: Vec<RowView>,
    pub pager: Pager,
    pub page_links: Vec<PageLink>,
    pub name_sort: SortLink,
    /// Value pre-populating the search input.
    pub search: Option<String>,
    pub query_string: String,
    pub create: Navigation,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_encodes_as_empty_query() {
        let binder = ListQueryBinder::new();
        let query = CompaniesQuery::from_binder(&binder);

        assert_eq!(query, CompaniesQuery::default());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn binder_state_round_trips_through_the_url() {
        let mut binder = ListQueryBinder::new();
        binder.set_search(Some("acme co"));
        binder.set_sort(SortField::Name, SortOrder::Asc);
        binder.set_page(2);

        let encoded = CompaniesQuery::from_binder(&binder).to_query_string();
        assert_eq!(encoded, "name=acme+co&page=3&sort=name&order=asc");

        let decoded: CompaniesQuery = serde_html_form::from_str(&encoded).unwrap();
        assert_eq!(decoded.page, Some(3));
        assert_eq!(
            decoded.sorter(),
            Some(Sorter::new(SortField::Name, SortOrder::Asc))
        );
    }

    #[test]
    fn unknown_sort_values_are_ignored() {
        let query = CompaniesQuery {
            sort: Some("revenue".into()),
            order: Some("desc".into()),
            ..CompaniesQuery::default()
        };
        assert_eq!(query.sorter(), None);

        let query = CompaniesQuery {
            sort: Some("createdAt".into()),
            order: Some("sideways".into()),
            ..CompaniesQuery::default()
        };
        assert_eq!(
            query.sorter(),
            Some(Sorter::new(SortField::CreatedAt, SortOrder::Asc))
        );
    }
}
