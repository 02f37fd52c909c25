use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, CompanyName, SalesOwnerId};

/// Sum computed by the backend for an aggregate bucket.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateSum {
    pub value: Option<f64>,
}

/// One bucket of the deals aggregate attached to a company.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct DealsAggregate {
    pub sum: Option<AggregateSum>,
}

/// Read projection of a company as shown in the list view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Aggregates over open deals; only the first bucket is meaningful.
    #[serde(default)]
    pub deals_aggregate: Option<Vec<DealsAggregate>>,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Summed value of open deals, or zero when the backend sent no bucket.
    pub fn total_revenue(&self) -> f64 {
        self.deals_aggregate
            .as_ref()
            .and_then(|buckets| buckets.first())
            .and_then(|bucket| bucket.sum.as_ref())
            .and_then(|sum| sum.value)
            .unwrap_or(0.0)
    }

    /// Non-empty avatar reference, if any.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCompany {
    pub name: CompanyName,
    pub sales_owner_id: Option<SalesOwnerId>,
}

impl NewCompany {
    #[must_use]
    pub fn new(name: CompanyName, sales_owner_id: Option<SalesOwnerId>) -> Self {
        Self {
            name,
            sales_owner_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateCompany {
    pub name: CompanyName,
    pub avatar_url: Option<String>,
}

impl UpdateCompany {
    #[must_use]
    pub fn new(name: CompanyName, avatar_url: Option<String>) -> Self {
        Self {
            name,
            avatar_url: avatar_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(deals_aggregate: Option<Vec<DealsAggregate>>) -> Company {
        Company {
            id: CompanyId::new("1").unwrap(),
            name: "Acme".to_string(),
            avatar_url: None,
            deals_aggregate,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_revenue_reads_first_bucket() {
        let buckets = vec![
            DealsAggregate {
                sum: Some(AggregateSum {
                    value: Some(1500.5),
                }),
            },
            DealsAggregate {
                sum: Some(AggregateSum { value: Some(9.0) }),
            },
        ];
        assert_eq!(company(Some(buckets)).total_revenue(), 1500.5);
    }

    #[test]
    fn total_revenue_defaults_to_zero() {
        assert_eq!(company(None).total_revenue(), 0.0);
        assert_eq!(company(Some(vec![])).total_revenue(), 0.0);
        assert_eq!(
            company(Some(vec![DealsAggregate { sum: None }])).total_revenue(),
            0.0
        );
        assert_eq!(
            company(Some(vec![DealsAggregate {
                sum: Some(AggregateSum { value: None })
            }]))
            .total_revenue(),
            0.0
        );
    }

    #[test]
    fn deserializes_graphql_node() {
        let node = serde_json::json!({
            "id": "12",
            "name": "Globex",
            "avatarUrl": null,
            "createdAt": "2024-03-01T10:00:00.000Z",
            "dealsAggregate": [{ "sum": { "value": 250 } }]
        });

        let company: Company = serde_json::from_value(node).unwrap();

        assert_eq!(company.id.as_str(), "12");
        assert_eq!(company.avatar(), None);
        assert_eq!(company.total_revenue(), 250.0);
    }

    #[test]
    fn update_company_drops_blank_avatar() {
        let update = UpdateCompany::new(CompanyName::new("Acme").unwrap(), Some("  ".into()));
        assert_eq!(update.avatar_url, None);
    }
}
