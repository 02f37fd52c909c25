//! Company reader and writer backed by a nestjs-query GraphQL API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::query::{Filter, FilterOperator, ListRequest, ListResult, SortOrder};
use crate::domain::types::CompanyId;
use crate::provider::errors::{ProviderError, ProviderResult};
use crate::provider::queries::{
    COMPANY_QUERY, CREATE_COMPANY_MUTATION, DELETE_COMPANY_MUTATION, UPDATE_COMPANY_MUTATION,
};
use crate::provider::{CompanyReader, CompanyWriter};

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQlError {
    fn is_not_found(&self) -> bool {
        let code = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str);
        code == Some("NOT_FOUND") || self.message.starts_with("Unable to find")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    nodes: Vec<Company>,
    total_count: usize,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Converts backend errors, keeping "not found" distinguishable.
fn to_provider_error(errors: Vec<GraphQlError>) -> ProviderError {
    if errors.iter().any(GraphQlError::is_not_found) {
        return ProviderError::NotFound;
    }
    let message = errors
        .into_iter()
        .map(|err| err.message)
        .collect::<Vec<_>>()
        .join("; ");
    ProviderError::Backend(message)
}

fn filter_variable(filters: &[Filter]) -> Value {
    let mut filter = Map::new();
    for item in filters {
        let Some(value) = item.value.as_deref() else {
            continue;
        };
        let condition = match item.operator {
            FilterOperator::Contains => json!({ "iLike": format!("%{value}%") }),
        };
        filter.insert(item.field.as_str().to_string(), condition);
    }
    Value::Object(filter)
}

/// Builds the `filter`, `sorting` and `paging` variables for a list request.
pub fn list_variables(request: &ListRequest) -> Value {
    let sorting = request
        .sorters
        .iter()
        .map(|sorter| {
            let direction = match sorter.order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            json!({ "field": sorter.field.as_str(), "direction": direction })
        })
        .collect::<Vec<_>>();

    json!({
        "filter": filter_variable(&request.filters),
        "sorting": sorting,
        "paging": {
            "limit": request.pagination.page_size,
            "offset": request.pagination.offset(),
        },
    })
}

/// GraphQL client for the companies resource.
#[derive(Clone)]
pub struct GraphQlProvider {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQlProvider {
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    async fn execute(&self, document: &str, variables: Value) -> ProviderResult<Value> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": document, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body: GraphQlResponse = match response.json().await {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => {
                return Err(ProviderError::Backend(format!(
                    "unexpected response status {status}"
                )));
            }
        };

        if !body.errors.is_empty() {
            return Err(to_provider_error(body.errors));
        }

        body.data
            .ok_or_else(|| ProviderError::Decode("response carried no data".to_string()))
    }

    /// Runs `document` and decodes the field `key` of the response data.
    async fn fetch_field<T>(&self, document: &str, variables: Value, key: &str) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let mut data = self.execute(document, variables).await?;
        match data.get_mut(key).map(Value::take) {
            None | Some(Value::Null) => Err(ProviderError::NotFound),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

#[async_trait]
impl CompanyReader for GraphQlProvider {
    async fn get_list(&self, request: &ListRequest) -> ProviderResult<ListResult> {
        let connection: Connection = self
            .fetch_field(request.query, list_variables(request), request.resource)
            .await?;
        Ok(ListResult::new(connection.nodes, connection.total_count))
    }

    async fn get_one(&self, id: &CompanyId) -> ProviderResult<Company> {
        self.fetch_field(COMPANY_QUERY, json!({ "id": id.as_str() }), "company")
            .await
    }
}

#[async_trait]
impl CompanyWriter for GraphQlProvider {
    async fn create(&self, company: &NewCompany) -> ProviderResult<Company> {
        let mut fields = json!({ "name": company.name.as_str() });
        if let Some(owner) = &company.sales_owner_id {
            fields["salesOwnerId"] = json!(owner.as_str());
        }
        let variables = json!({ "input": { "company": fields } });
        self.fetch_field(CREATE_COMPANY_MUTATION, variables, "createOneCompany")
            .await
    }

    async fn update(&self, id: &CompanyId, updates: &UpdateCompany) -> ProviderResult<Company> {
        let variables = json!({
            "input": {
                "id": id.as_str(),
                "update": {
                    "name": updates.name.as_str(),
                    "avatarUrl": updates.avatar_url,
                },
            }
        });
        self.fetch_field(UPDATE_COMPANY_MUTATION, variables, "updateOneCompany")
            .await
    }

    async fn delete_one(&self, id: &CompanyId) -> ProviderResult<()> {
        let variables = json!({ "input": { "id": id.as_str() } });
        self.execute(DELETE_COMPANY_MUTATION, variables).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{FilterField, Pagination, SortField, Sorter};
    use crate::provider::queries::COMPANIES_LIST_QUERY;

    fn request(search: Option<&str>, page_index: usize) -> ListRequest {
        ListRequest {
            resource: "companies",
            filters: vec![Filter::contains(
                FilterField::Name,
                search.map(str::to_string),
            )],
            sorters: vec![Sorter::new(SortField::CreatedAt, SortOrder::Desc)],
            pagination: Pagination {
                page_index,
                page_size: 12,
            },
            query: COMPANIES_LIST_QUERY,
        }
    }

    #[test]
    fn absent_filter_value_sends_empty_filter() {
        let variables = list_variables(&request(None, 0));
        assert_eq!(variables["filter"], json!({}));
        assert_eq!(
            variables["sorting"],
            json!([{ "field": "createdAt", "direction": "DESC" }])
        );
        assert_eq!(variables["paging"], json!({ "limit": 12, "offset": 0 }));
    }

    #[test]
    fn contains_maps_to_case_insensitive_like() {
        let variables = list_variables(&request(Some("acme"), 2));
        assert_eq!(variables["filter"], json!({ "name": { "iLike": "%acme%" } }));
        assert_eq!(variables["paging"]["offset"], json!(24));
    }

    #[test]
    fn not_found_errors_are_recognized() {
        let errors = vec![GraphQlError {
            message: "Unable to find Company with id: 9".to_string(),
            extensions: None,
        }];
        assert_eq!(to_provider_error(errors), ProviderError::NotFound);

        let errors = vec![
            GraphQlError {
                message: "first".to_string(),
                extensions: Some(json!({ "code": "INTERNAL_SERVER_ERROR" })),
            },
            GraphQlError {
                message: "second".to_string(),
                extensions: None,
            },
        ];
        assert_eq!(
            to_provider_error(errors),
            ProviderError::Backend("first; second".to_string())
        );
    }
}
