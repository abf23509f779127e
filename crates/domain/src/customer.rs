//! Customer contact fields and their validation.

use store::NewCustomer;

use crate::error::ValidationError;

/// Contact fields as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub home_phone: Option<String>,
    pub business_phone: Option<String>,
}

/// Validated customer contact fields.
///
/// First name, last name and email are always present and non-blank. Every
/// field is trimmed; blank optional fields are stored as `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    first_name: String,
    last_name: String,
    email: String,
    address: Option<String>,
    city: Option<String>,
    province: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    home_phone: Option<String>,
    business_phone: Option<String>,
}

impl CustomerDetails {
    /// Validates raw contact fields.
    ///
    /// Every field must fit its `customers` column; an over-long value is
    /// `InvalidField` and nothing is written.
    pub fn from_input(input: ContactInput) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required(input.first_name, "first name", 25)?,
            last_name: required(input.last_name, "last name", 25)?,
            email: required(input.email, "email", 50)?,
            address: optional(input.address, "address", 75)?,
            city: optional(input.city, "city", 50)?,
            province: optional(input.province, "province", 2)?,
            postal_code: optional(input.postal_code, "postal code", 7)?,
            country: optional(input.country, "country", 25)?,
            home_phone: optional(input.home_phone, "home phone", 20)?,
            business_phone: optional(input.business_phone, "business phone", 20)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the insertable customer row.
    pub fn to_new_customer(&self) -> NewCustomer {
        NewCustomer {
            cust_first_name: self.first_name.clone(),
            cust_last_name: self.last_name.clone(),
            cust_email: self.email.clone(),
            cust_address: self.address.clone(),
            cust_city: self.city.clone(),
            cust_prov: self.province.clone(),
            cust_postal: self.postal_code.clone(),
            cust_country: self.country.clone(),
            cust_home_phone: self.home_phone.clone(),
            cust_bus_phone: self.business_phone.clone(),
        }
    }
}

fn optional(
    value: Option<String>,
    field: &'static str,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        // Column widths are VARCHAR(n), counted in characters.
        Some(v) if v.chars().count() > max_chars => Err(ValidationError::InvalidField(field)),
        other => Ok(other),
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    optional(value, field, max_chars)?.ok_or(ValidationError::MissingField(field))
}
