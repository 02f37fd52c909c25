//! Mock provider implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::query::{ListRequest, ListResult};
use crate::domain::types::CompanyId;
use crate::provider::errors::ProviderResult;
use crate::provider::{CompanyReader, CompanyWriter};

mock! {
    pub Provider {}

    #[async_trait]
    impl CompanyReader for Provider {
        async fn get_list(&self, request: &ListRequest) -> ProviderResult<ListResult>;
        async fn get_one(&self, id: &CompanyId) -> ProviderResult<Company>;
    }

    #[async_trait]
    impl CompanyWriter for Provider {
        async fn create(&self, company: &NewCompany) -> ProviderResult<Company>;
        async fn update(&self, id: &CompanyId, updates: &UpdateCompany) -> ProviderResult<Company>;
        async fn delete_one(&self, id: &CompanyId) -> ProviderResult<()>;
    }
}
