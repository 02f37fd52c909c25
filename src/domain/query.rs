//! List request and result model shared by the binder and data providers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::company::Company;
use crate::domain::types::TypeConstraintError;

/// Number of rows per page in the companies list.
pub const PAGE_SIZE: usize = 12;

/// Highest zero-based page index a list view accepts.
pub const MAX_PAGE_INDEX: usize = u32::MAX as usize;

/// Resource name the list view is bound to.
pub const COMPANIES_RESOURCE: &str = "companies";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Name,
}

impl FilterField {
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterField::Name => "name",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Substring match. Case handling is delegated to the backend.
    Contains,
}

impl FilterOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
        }
    }
}

/// A `{field, operator, value}` constraint; an absent value applies no filter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: Option<String>,
}

impl Filter {
    pub fn contains(field: FilterField, value: Option<String>) -> Self {
        Self {
            field,
            operator: FilterOperator::Contains,
            value,
        }
    }

}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    CreatedAt,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "createdAt",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "createdAt" => Ok(SortField::CreatedAt),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort field `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The opposite direction, used by sortable column headers.
    pub const fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort order `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sorter {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sorter {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self::new(SortField::CreatedAt, SortOrder::Desc)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    pub const fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: PAGE_SIZE,
        }
    }
}

/// Parameters handed to a data provider for one list fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRequest {
    pub resource: &'static str,
    pub filters: Vec<Filter>,
    pub sorters: Vec<Sorter>,
    pub pagination: Pagination,
    /// Backend-specific query document.
    pub query: &'static str,
}

impl ListRequest {
    /// Value of the filter on `field`, if one is set.
    pub fn filter_value(&self, field: FilterField) -> Option<&str> {
        self.filters
            .iter()
            .find(|filter| filter.field == field)
            .and_then(|filter| filter.value.as_deref())
    }
}

/// Rows of one page together with the total number of matching records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListResult {
    pub rows: Vec<Company>,
    pub total_count: usize,
}

impl ListResult {
    pub fn new(rows: Vec<Company>, total_count: usize) -> Self {
        Self { rows, total_count }
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(page_size)
    }
}
