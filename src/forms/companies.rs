use serde::Deserialize;
use validator::{Validate, ValidateUrl};

use crate::domain::company::{NewCompany, UpdateCompany};
use crate::domain::types::{CompanyName, SalesOwnerId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a company.
pub struct AddCompanyForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Optional owner; blank means "assign on the backend".
    #[serde(default)]
    pub sales_owner_id: String,
    /// Query string of the list the user came from.
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing company.
pub struct SaveCompanyForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub query: String,
}

/// Form posted by the delete confirmation page.
#[derive(Debug, Deserialize)]
pub struct DeleteCompanyForm {
    #[serde(default)]
    pub query: String,
}

impl TryFrom<AddCompanyForm> for NewCompany {
    type Error = FormError;

    fn try_from(form: AddCompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = CompanyName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let owner = form.sales_owner_id.trim();
        let sales_owner_id = if owner.is_empty() {
            None
        } else {
            Some(SalesOwnerId::new(owner).map_err(|_| FormError::InvalidSalesOwnerId)?)
        };
        Ok(NewCompany::new(name, sales_owner_id))
    }
}

impl TryFrom<&SaveCompanyForm> for UpdateCompany {
    type Error = FormError;

    fn try_from(form: &SaveCompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = CompanyName::new(form.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let avatar_url = form.avatar_url.trim();
        if !avatar_url.is_empty() && !avatar_url.validate_url() {
            return Err(FormError::InvalidUrl);
        }
        Ok(UpdateCompany::new(name, Some(avatar_url.to_string())))
    }
}
