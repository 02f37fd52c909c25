use crate::binder::{ListQueryBinder, Settled};
use crate::columns::{COLUMNS, render_row};
use crate::currency::CurrencyFormat;
use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::query::{COMPANIES_RESOURCE, SortField, SortOrder};
use crate::domain::types::CompanyId;
pub use crate::dto::companies::CompaniesQuery;
use crate::dto::companies::{CompaniesPageData, PageLink, SortLink};
use crate::forms::companies::{AddCompanyForm, SaveCompanyForm};
use crate::navigation::{Action, HistoryMode, NavigateRequest, Navigator};
use crate::pagination::Pager;
use crate::provider::{CompanyReader, CompanyWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::views::{ListViews, ViewId};

/// Rendering collaborators of the list page.
pub struct ListPresenter<'a, N: ?Sized> {
    pub currency: &'a CurrencyFormat,
    pub navigator: &'a N,
}

/// Moves the binder to the state described by the URL query.
pub fn apply_query(binder: &mut ListQueryBinder, query: &CompaniesQuery) {
    binder.set_search(query.name.as_deref());
    let sorter = query.sorter().unwrap_or_default();
    binder.set_sort(sorter.field, sorter.order);
    binder.set_page(query.page.unwrap_or(1).saturating_sub(1));
}

fn list_href<N>(navigator: &N, query: &CompaniesQuery) -> String
where
    N: Navigator + ?Sized,
{
    let request = NavigateRequest {
        resource: COMPANIES_RESOURCE,
        action: Action::List,
        preserve_query: true,
        mode: HistoryMode::Push,
    };
    navigator
        .navigate(&request, &query.to_query_string())
        .location
}

/// Snapshot of the binder shaped for the list template.
pub fn build_page_data<N>(
    binder: &mut ListQueryBinder,
    presenter: &ListPresenter<'_, N>,
) -> CompaniesPageData
where
    N: Navigator + ?Sized,
{
    let navigator = presenter.navigator;
    let query = CompaniesQuery::from_binder(binder);
    let query_string = query.to_query_string();

    let result = binder.current_result();
    let rows = result
        .rows
        .iter()
        .map(|company| render_row(company, presenter.currency, navigator))
        .collect();

    let pager = Pager::new(result, binder.result_pagination());
    let page_links = pager
        .pages
        .iter()
        .map(|page| match page {
            Some(number) => PageLink {
                number: Some(*number),
                href: list_href(navigator, &query.with_page(*number)),
                current: *number == pager.page,
            },
            None => PageLink {
                number: None,
                href: String::new(),
                current: false,
            },
        })
        .collect();

    let sorter = binder.sorter();
    let name_active = sorter.field == SortField::Name;
    let next_order = if name_active {
        sorter.order.toggled()
    } else {
        SortOrder::Asc
    };
    let name_sort = SortLink {
        active: name_active,
        order: name_active.then_some(sorter.order),
        href: list_href(
            navigator,
            &CompaniesQuery {
                sort: Some(SortField::Name.to_string()),
                order: Some(next_order.to_string()),
                page: None,
                ..query.clone()
            },
        ),
    };

    let create = navigator.navigate(
        &NavigateRequest {
            resource: COMPANIES_RESOURCE,
            action: Action::Create,
            preserve_query: true,
            mode: HistoryMode::Replace,
        },
        &query_string,
    );

    CompaniesPageData {
        columns: &COLUMNS,
        rows,
        pager,
        page_links,
        name_sort,
        search: query.name.clone(),
        query_string,
        create,
        error: binder.take_error().map(|err| err.to_string()),
    }
}

/// Loads the companies list for the view owned by `view_id`.
///
/// Fetch failures do not fail the page: the last good result stays visible and
/// the failure is reported in [`CompaniesPageData::error`].
pub async fn load_companies_page<R, N>(
    provider: &R,
    views: &ListViews,
    view_id: ViewId,
    query: &CompaniesQuery,
    presenter: &ListPresenter<'_, N>,
) -> CompaniesPageData
where
    R: CompanyReader + ?Sized,
    N: Navigator + ?Sized,
{
    let ticket = views.with_binder(view_id, |binder| {
        apply_query(binder, query);
        binder.issue()
    });

    let outcome = provider.get_list(ticket.request()).await;

    views.with_binder(view_id, |binder| {
        if binder.settle(ticket, outcome) == Settled::Stale {
            log::debug!("List view {view_id:?} was superseded by a newer request");
        }
        build_page_data(binder, presenter)
    })
}

/// Fetches a company for the edit and delete pages.
pub async fn load_company<R>(provider: &R, company_id: &str) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    let company_id = CompanyId::new(company_id).map_err(|_| ServiceError::NotFound)?;
    provider.get_one(&company_id).await.map_err(|err| {
        log::error!("Failed to load company {company_id}: {err}");
        ServiceError::from(err)
    })
}

/// Validates the add-company form and creates the record.
pub async fn create_company<R>(provider: &R, form: AddCompanyForm) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    let new_company = NewCompany::try_from(form).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    provider.create(&new_company).await.map_err(|err| {
        log::error!("Failed to create a company: {err}");
        ServiceError::from(err)
    })
}

/// Validates the edit form and applies it to the company.
pub async fn update_company<R>(
    provider: &R,
    company_id: &str,
    form: &SaveCompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    let company_id = CompanyId::new(company_id).map_err(|_| ServiceError::NotFound)?;
    let updates = UpdateCompany::try_from(form).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    provider.update(&company_id, &updates).await.map_err(|err| {
        log::error!("Failed to update company {company_id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a company after the user confirmed the action.
///
/// The list is not touched locally; the next fetch reflects the deletion.
pub async fn delete_company<R>(provider: &R, company_id: &str) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    let company_id = CompanyId::new(company_id).map_err(|_| ServiceError::NotFound)?;
    provider.delete_one(&company_id).await.map_err(|err| {
        log::error!("Failed to delete company {company_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::query::{FilterField, ListResult, MAX_PAGE_INDEX, PAGE_SIZE};
    use crate::navigation::UrlNavigator;
    use crate::provider::errors::ProviderError;
    use crate::provider::graphql::list_variables;
    use crate::provider::mock::MockProvider;

    fn company(id: &str, name: &str) -> Company {
        Company {
            id: CompanyId::new(id).unwrap(),
            name: name.to_string(),
            avatar_url: None,
            deals_aggregate: None,
            created_at: Utc::now(),
        }
    }

    fn presenter<'a>(
        currency: &'a CurrencyFormat,
        navigator: &'a UrlNavigator,
    ) -> ListPresenter<'a, UrlNavigator> {
        ListPresenter {
            currency,
            navigator,
        }
    }

    /// Checks the first load sends the default request and renders the rows.
    #[tokio::test]
    async fn first_load_uses_defaults() {
        let mut provider = MockProvider::new();
        provider
            .expect_get_list()
            .withf(|request| {
                request.filter_value(FilterField::Name).is_none()
                    && request.pagination.page_index == 0
                    && request.pagination.page_size == 12
            })
            .times(1)
            .returning(|_| Ok(ListResult::new(vec![company("1", "Acme")], 1)));

        let views = ListViews::new(4);
        let (currency, navigator) = (CurrencyFormat::default(), UrlNavigator::default());

        let page = load_companies_page(
            &provider,
            &views,
            ViewId::new(),
            &CompaniesQuery::default(),
            &presenter(&currency, &navigator),
        )
        .await;

        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].revenue, "$0.00");
        assert_eq!(page.create.location, "/companies/create");
        assert!(page.error.is_none());
    }

    /// Ensures a failed page change keeps showing the previous page.
    #[tokio::test]
    async fn failed_fetch_keeps_previous_rows() {
        let mut provider = MockProvider::new();
        provider
            .expect_get_list()
            .withf(|request| request.pagination.page_index == 0)
            .times(1)
            .returning(|_| Ok(ListResult::new(vec![company("1", "Acme")], 30)));
        provider
            .expect_get_list()
            .withf(|request| request.pagination.page_index == 1)
            .times(1)
            .returning(|_| Err(ProviderError::Transport("connection refused".into())));

        let views = ListViews::new(4);
        let view_id = ViewId::new();
        let (currency, navigator) = (CurrencyFormat::default(), UrlNavigator::default());
        let presenter = presenter(&currency, &navigator);

        load_companies_page(
            &provider,
            &views,
            view_id,
            &CompaniesQuery::default(),
            &presenter,
        )
        .await;
        let query = CompaniesQuery {
            page: Some(2),
            ..CompaniesQuery::default()
        };
        let page = load_companies_page(&provider, &views, view_id, &query, &presenter).await;

        assert_eq!(page.rows[0].name, "Acme");
        assert_eq!(page.pager.page, 1);
        assert!(
            page.error
                .as_deref()
                .is_some_and(|message| message.contains("connection refused"))
        );
        assert_eq!(page.create.location, "/companies/create?page=2");
    }

    /// Ensures a page number beyond any real page is clamped before paging.
    #[test]
    fn huge_page_number_is_clamped() {
        let query: CompaniesQuery =
            serde_html_form::from_str("page=18446744073709551615").unwrap();
        let mut binder = ListQueryBinder::new();
        apply_query(&mut binder, &query);

        let request = binder.request();
        assert_eq!(request.pagination.page_index, MAX_PAGE_INDEX);
        let variables = list_variables(&request);
        assert_eq!(
            variables["paging"]["offset"],
            MAX_PAGE_INDEX.saturating_mul(PAGE_SIZE)
        );

        let ticket = binder.issue();
        binder.settle(ticket, Ok(ListResult::new(Vec::new(), 30)));
        let (currency, navigator) = (CurrencyFormat::default(), UrlNavigator::default());
        let page = build_page_data(&mut binder, &presenter(&currency, &navigator));
        assert_eq!(page.pager.page, MAX_PAGE_INDEX + 1);
        assert_eq!(page.pager.page_count, 3);
        assert_eq!(page.page_links.len(), 3);
    }

    /// Verifies the create link keeps search and sorting.
    #[test]
    fn page_data_preserves_query_in_links() {
        let mut binder = ListQueryBinder::new();
        apply_query(
            &mut binder,
            &CompaniesQuery {
                name: Some("acme".into()),
                page: Some(1),
                sort: Some("name".into()),
                order: Some("desc".into()),
            },
        );
        let ticket = binder.issue();
        binder.settle(
            ticket,
            Ok(ListResult::new(
                (1..=12).map(|i| company(&i.to_string(), "Acme")).collect(),
                40,
            )),
        );

        let (currency, navigator) = (CurrencyFormat::default(), UrlNavigator::default());
        let page = build_page_data(&mut binder, &presenter(&currency, &navigator));

        assert_eq!(page.query_string, "name=acme&sort=name&order=desc");
        assert_eq!(
            page.create.location,
            "/companies/create?name=acme&sort=name&order=desc"
        );
        assert_eq!(page.create.mode, HistoryMode::Replace);
        assert_eq!(page.search.as_deref(), Some("acme"));
        assert!(page.name_sort.active);
        assert_eq!(
            page.name_sort.href,
            "/companies?name=acme&sort=name&order=asc"
        );
        assert_eq!(page.page_links.len(), 4);
        assert_eq!(
            page.page_links[1].href,
            "/companies?name=acme&page=2&sort=name&order=desc"
        );
    }

    /// Confirms deleting forwards the id and surfaces backend failures.
    #[tokio::test]
    async fn delete_forwards_id_and_errors() {
        let mut provider = MockProvider::new();
        provider
            .expect_delete_one()
            .withf(|id| id.as_str() == "5")
            .times(1)
            .returning(|_| Ok(()));
        provider
            .expect_delete_one()
            .withf(|id| id.as_str() == "6")
            .times(1)
            .returning(|_| Err(ProviderError::NotFound));

        assert_eq!(delete_company(&provider, "5").await, Ok(()));
        assert_eq!(
            delete_company(&provider, "6").await,
            Err(ServiceError::NotFound)
        );
    }

    /// Ensures invalid forms never reach the backend.
    #[tokio::test]
    async fn create_rejects_invalid_form() {
        let mut provider = MockProvider::new();
        provider.expect_create().times(0);

        let form = AddCompanyForm {
            name: "  ".to_string(),
            sales_owner_id: String::new(),
            query: String::new(),
        };

        assert!(matches!(
            create_company(&provider, form).await,
            Err(ServiceError::Form(_))
        ));
    }

    /// Checks a missing company on the edit page maps to not found.
    #[tokio::test]
    async fn load_company_maps_missing_record() {
        let mut provider = MockProvider::new();
        provider
            .expect_get_one()
            .times(1)
            .returning(|_| Err(ProviderError::NotFound));

        assert_eq!(
            load_company(&provider, "404").await,
            Err(ServiceError::NotFound)
        );
        assert_eq!(load_company(&provider, " ").await, Err(ServiceError::NotFound));
    }

    /// Confirms updates are sent with normalized values.
    #[tokio::test]
    async fn update_sends_normalized_values() {
        let mut provider = MockProvider::new();
        provider
            .expect_update()
            .withf(|id, updates| {
                id.as_str() == "3"
                    && updates.name.as_str() == "Initech"
                    && updates.avatar_url.is_none()
            })
            .times(1)
            .returning(|id, updates| {
                Ok(Company {
                    id: id.clone(),
                    name: updates.name.to_string(),
                    avatar_url: None,
                    deals_aggregate: None,
                    created_at: Utc::now(),
                })
            });

        let form = SaveCompanyForm {
            name: " Initech ".to_string(),
            avatar_url: " ".to_string(),
            query: String::new(),
        };

        let company = update_company(&provider, "3", &form).await.unwrap();
        assert_eq!(company.name, "Initech");
    }
}
