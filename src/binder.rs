//! Finite-state binder between the list view and a data provider.
//!
//! The binder owns the filter, sorter and pagination state of one list view and
//! the last successfully fetched page. Fetches are split into [`issue`] and
//! [`settle`] so callers can release the binder while the provider call is in
//! flight; only the most recently issued ticket may update the visible result.
//!
//! [`issue`]: ListQueryBinder::issue
//! [`settle`]: ListQueryBinder::settle

use thiserror::Error;

use crate::domain::query::{
    COMPANIES_RESOURCE, Filter, FilterField, ListRequest, ListResult, MAX_PAGE_INDEX, PAGE_SIZE,
    Pagination, SortField, SortOrder, Sorter,
};
use crate::provider::CompanyReader;
use crate::provider::errors::ProviderResult;
use crate::provider::queries::COMPANIES_LIST_QUERY;

/// Failure surfaced to the rendering layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Failed to load companies: {0}")]
    FetchFailed(String),
}

/// A fetch issued by the binder; settling it requires handing it back.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    request: ListRequest,
}

impl FetchTicket {
    pub fn request(&self) -> &ListRequest {
        &self.request
    }
}

/// What happened to a fetch outcome handed to [`ListQueryBinder::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The result replaced the visible page.
    Applied,
    /// The fetch failed; the previous page stays visible.
    Failed,
    /// A newer fetch was issued after this one; the outcome was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListQueryBinder {
    filters: Vec<Filter>,
    sorters: Vec<Sorter>,
    pagination: Pagination,
    last_result: ListResult,
    /// Pagination of the request that produced `last_result`.
    result_pagination: Pagination,
    last_error: Option<ListError>,
    /// Bumped on every state change and every issued fetch.
    generation: u64,
    settled: u64,
}

impl Default for ListQueryBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQueryBinder {
    pub fn new() -> Self {
        let pagination = Pagination {
            page_index: 0,
            page_size: PAGE_SIZE,
        };
        Self {
            filters: vec![Filter::contains(FilterField::Name, None)],
            sorters: vec![Sorter::default()],
            pagination,
            last_result: ListResult::default(),
            result_pagination: pagination,
            last_error: None,
            generation: 0,
            settled: 0,
        }
    }

    /// Replaces the name filter value; blank text clears the filter.
    ///
    /// A changed search starts again from the first page.
    pub fn set_search(&mut self, text: Option<&str>) {
        let value = text
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let Some(filter) = self
            .filters
            .iter_mut()
            .find(|filter| filter.field == FilterField::Name)
        else {
            self.filters.push(Filter::contains(FilterField::Name, value));
            self.pagination.page_index = 0;
            self.invalidate();
            return;
        };

        if filter.value != value {
            filter.value = value;
            self.pagination.page_index = 0;
        }
        self.invalidate();
    }

    /// Replaces the sorters with a single entry.
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sorters = vec![Sorter::new(field, order)];
        self.invalidate();
    }

    /// Moves to the zero-based page `index`, clamped to [`MAX_PAGE_INDEX`].
    pub fn set_page(&mut self, index: usize) {
        self.pagination.page_index = index.min(MAX_PAGE_INDEX);
        self.invalidate();
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sorters(&self) -> &[Sorter] {
        &self.sorters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The active sorter; the view supports exactly one.
    pub fn sorter(&self) -> Sorter {
        self.sorters.first().copied().unwrap_or_default()
    }

    /// Latest successfully fetched page.
    pub fn current_result(&self) -> &ListResult {
        &self.last_result
    }

    /// Page the visible result belongs to; lags behind [`Self::pagination`]
    /// while a page change is loading or after it failed.
    pub fn result_pagination(&self) -> Pagination {
        self.result_pagination
    }

    pub fn last_error(&self) -> Option<&ListError> {
        self.last_error.as_ref()
    }

    /// Hands the pending error to the caller so it is shown only once.
    pub fn take_error(&mut self) -> Option<ListError> {
        self.last_error.take()
    }

    pub fn default_filter_value(&self, field: FilterField) -> Option<&str> {
        self.filters
            .iter()
            .find(|filter| filter.field == field)
            .and_then(|filter| filter.value.as_deref())
    }

    /// Snapshot of the request the current state describes.
    pub fn request(&self) -> ListRequest {
        ListRequest {
            resource: COMPANIES_RESOURCE,
            filters: self.filters.clone(),
            sorters: self.sorters.clone(),
            pagination: self.pagination,
            query: COMPANIES_LIST_QUERY,
        }
    }

    /// Starts a fetch; any ticket issued earlier becomes stale.
    pub fn issue(&mut self) -> FetchTicket {
        self.invalidate();
        FetchTicket {
            generation: self.generation,
            request: self.request(),
        }
    }

    /// Applies the outcome of `ticket` unless a newer fetch superseded it.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: ProviderResult<ListResult>) -> Settled {
        if ticket.generation != self.generation || ticket.generation <= self.settled {
            log::debug!(
                "Discarding stale list response (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return Settled::Stale;
        }
        self.settled = ticket.generation;

        match outcome {
            Ok(result) => {
                self.last_result = result;
                self.result_pagination = ticket.request.pagination;
                self.last_error = None;
                Settled::Applied
            }
            Err(err) => {
                log::error!("Failed to fetch companies: {err}");
                self.last_error = Some(ListError::FetchFailed(err.to_string()));
                Settled::Failed
            }
        }
    }

    /// Issues a fetch, waits for the provider and settles the outcome.
    pub async fn refresh<R>(&mut self, provider: &R) -> Settled
    where
        R: CompanyReader + ?Sized,
    {
        let ticket = self.issue();
        let outcome = provider.get_list(ticket.request()).await;
        self.settle(ticket, outcome)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }
}
