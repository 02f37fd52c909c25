//! GraphQL documents sent to the nestjs-query backend.

/// Open deals are those whose stage is neither won nor lost.
pub const COMPANIES_LIST_QUERY: &str = r#"
query CompaniesList($filter: CompanyFilter!, $sorting: [CompanySort!], $paging: OffsetPaging!) {
    companies(filter: $filter, sorting: $sorting, paging: $paging) {
        totalCount
        nodes {
            id
            name
            avatarUrl
            createdAt
            dealsAggregate(filter: { stage: { title: { notIn: ["WON", "LOST"] } } }) {
                sum {
                    value
                }
            }
        }
    }
}
"#;

pub const COMPANY_QUERY: &str = r#"
query Company($id: ID!) {
    company(id: $id) {
        id
        name
        avatarUrl
        createdAt
    }
}
"#;

pub const CREATE_COMPANY_MUTATION: &str = r#"
mutation CreateCompany($input: CreateOneCompanyInput!) {
    createOneCompany(input: $input) {
        id
        name
        avatarUrl
        createdAt
    }
}
"#;

pub const UPDATE_COMPANY_MUTATION: &str = r#"
mutation UpdateCompany($input: UpdateOneCompanyInput!) {
    updateOneCompany(input: $input) {
        id
        name
        avatarUrl
        createdAt
    }
}
"#;

pub const DELETE_COMPANY_MUTATION: &str = r#"
mutation DeleteCompany($input: DeleteOneCompanyInput!) {
    deleteOneCompany(input: $input) {
        id
    }
}
"#;
