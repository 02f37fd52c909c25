//! Data provider contract used by the list binder and page services.

use async_trait::async_trait;

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::query::{ListRequest, ListResult};
use crate::domain::types::CompanyId;
use crate::provider::errors::ProviderResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod graphql;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod queries;

#[async_trait]
pub trait CompanyReader: Send + Sync {
    /// Executes a parameterized list query and returns one page with the total count.
    async fn get_list(&self, request: &ListRequest) -> ProviderResult<ListResult>;
    async fn get_one(&self, id: &CompanyId) -> ProviderResult<Company>;
}

#[async_trait]
pub trait CompanyWriter: Send + Sync {
    async fn create(&self, company: &NewCompany) -> ProviderResult<Company>;
    async fn update(&self, id: &CompanyId, updates: &UpdateCompany) -> ProviderResult<Company>;
    async fn delete_one(&self, id: &CompanyId) -> ProviderResult<()>;
}
