//! Column rendering contract of the companies table.

use serde::Serialize;

use crate::currency::CurrencyFormat;
use crate::domain::company::Company;
use crate::domain::query::{COMPANIES_RESOURCE, FilterField, FilterOperator, SortField};
use crate::navigation::{Action, HistoryMode, NavigateRequest, Navigator};

/// Placeholder avatar palette, indexed by a hash of the company name.
const AVATAR_COLORS: [&str; 11] = [
    "#ff9c6e", "#ff7875", "#ffc069", "#ffd666", "#fadb14", "#95de64", "#5cdbd3", "#69c0ff",
    "#85a5ff", "#b37feb", "#ff85c0",
];

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Name,
    Revenue,
    Actions,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Right,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ColumnFilter {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub placeholder: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Column {
    pub kind: ColumnKind,
    pub title: &'static str,
    pub data_index: &'static str,
    pub filter: Option<ColumnFilter>,
    pub sort: Option<SortField>,
    pub pinned: Option<Pin>,
}

/// Columns of the list view, in display order.
pub const COLUMNS: [Column; 3] = [
    Column {
        kind: ColumnKind::Name,
        title: "Company Title",
        data_index: "name",
        filter: Some(ColumnFilter {
            field: FilterField::Name,
            operator: FilterOperator::Contains,
            placeholder: "Search Company",
        }),
        sort: Some(SortField::Name),
        pinned: None,
    },
    Column {
        kind: ColumnKind::Revenue,
        title: "Open deals amount",
        data_index: "totalRevenue",
        filter: None,
        sort: None,
        pinned: None,
    },
    Column {
        kind: ColumnKind::Actions,
        title: "Actions",
        data_index: "id",
        filter: None,
        sort: None,
        pinned: Some(Pin::Right),
    },
];

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Avatar {
    Image { src: String, alt: String },
    Placeholder { initials: String, color: &'static str },
}

impl Avatar {
    pub fn for_company(company: &Company) -> Self {
        match company.avatar() {
            Some(src) => Avatar::Image {
                src: src.to_string(),
                alt: company.name.clone(),
            },
            None => Avatar::placeholder(&company.name),
        }
    }

    /// Placeholder derived only from `name`.
    pub fn placeholder(name: &str) -> Self {
        Avatar::Placeholder {
            initials: name_initials(name),
            color: color_for(name),
        }
    }
}

/// Up to two upper-case initials taken from the words of `name`.
pub fn name_initials(name: &str) -> String {
    let initials = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|ch| ch.is_alphabetic())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect::<String>();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// Stable palette colour for `name` (31-based string hash over UTF-16 units).
pub fn color_for(name: &str) -> &'static str {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    let index = hash.rem_euclid(AVATAR_COLORS.len() as i32) as usize;
    AVATAR_COLORS[index]
}

/// Everything a template needs to draw one table row.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub avatar: Avatar,
    pub revenue: String,
    pub edit_url: String,
    /// Confirmation page of the delete action.
    pub delete_url: String,
}

pub fn render_row<N>(company: &Company, currency: &CurrencyFormat, navigator: &N) -> RowView
where
    N: Navigator + ?Sized,
{
    let target = |action: Action| NavigateRequest {
        resource: COMPANIES_RESOURCE,
        action,
        preserve_query: false,
        mode: HistoryMode::Push,
    };
    let edit = navigator.navigate(&target(Action::Edit(company.id.clone())), "");
    let delete = navigator.navigate(&target(Action::Delete(company.id.clone())), "");

    RowView {
        id: company.id.to_string(),
        name: company.name.clone(),
        avatar: Avatar::for_company(company),
        revenue: currency.format(company.total_revenue()),
        edit_url: edit.location,
        delete_url: delete.location,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::company::{AggregateSum, DealsAggregate};
    use crate::domain::types::CompanyId;
    use crate::navigation::UrlNavigator;

    fn company(name: &str, avatar_url: Option<&str>) -> Company {
        Company {
            id: CompanyId::new("7").unwrap(),
            name: name.to_string(),
            avatar_url: avatar_url.map(str::to_string),
            deals_aggregate: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn columns_are_declared_in_fixed_order() {
        let kinds: Vec<_> = COLUMNS.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ColumnKind::Name, ColumnKind::Revenue, ColumnKind::Actions]
        );
        assert_eq!(COLUMNS[0].filter.map(|f| f.field), Some(FilterField::Name));
        assert_eq!(COLUMNS[2].pinned, Some(Pin::Right));
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(name_initials("acme corp international"), "AC");
        assert_eq!(name_initials("Globex"), "G");
        assert_eq!(name_initials("  42 things  "), "T");
        assert_eq!(name_initials(""), "?");
    }

    #[test]
    fn placeholder_depends_only_on_name() {
        let first = Avatar::for_company(&company("Initech", None));
        let mut other = company("Initech", Some("   "));
        other.id = CompanyId::new("99").unwrap();

        assert_eq!(first, Avatar::for_company(&other));
        assert_eq!(color_for("Initech"), color_for("Initech"));
        assert_eq!(color_for(""), AVATAR_COLORS[0]);
    }

    #[test]
    fn avatar_url_renders_as_image() {
        let avatar = Avatar::for_company(&company("Acme", Some("https://cdn/acme.png")));
        assert_eq!(
            avatar,
            Avatar::Image {
                src: "https://cdn/acme.png".to_string(),
                alt: "Acme".to_string()
            }
        );
    }

    #[test]
    fn row_without_aggregate_renders_zero_revenue() {
        let row = render_row(
            &company("Acme", None),
            &CurrencyFormat::default(),
            &UrlNavigator::default(),
        );

        assert_eq!(row.revenue, "$0.00");
        assert_eq!(row.edit_url, "/companies/edit/7");
        assert_eq!(row.delete_url, "/companies/delete/7");
    }

    #[test]
    fn row_renders_first_bucket_as_currency() {
        let mut acme = company("Acme", None);
        acme.deals_aggregate = Some(vec![DealsAggregate {
            sum: Some(AggregateSum {
                value: Some(12500.0),
            }),
        }]);

        let row = render_row(&acme, &CurrencyFormat::default(), &UrlNavigator::default());
        assert_eq!(row.revenue, "$12,500.00");
    }
}
