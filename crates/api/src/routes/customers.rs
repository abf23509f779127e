//! Customer registration endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use domain::{ContactInput, RegisterCustomer};
use serde::{Deserialize, Serialize};
use store::TravelStore;

use crate::error::{ApiError, Operation};
use crate::state::AppState;

/// Customer contact fields as posted by the client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactFields {
    pub cust_first_name: Option<String>,
    pub cust_last_name: Option<String>,
    pub cust_email: Option<String>,
    pub cust_address: Option<String>,
    pub cust_city: Option<String>,
    pub cust_prov: Option<String>,
    pub cust_postal: Option<String>,
    pub cust_country: Option<String>,
    pub cust_home_phone: Option<String>,
    pub cust_bus_phone: Option<String>,
}

impl From<ContactFields> for ContactInput {
    fn from(fields: ContactFields) -> Self {
        ContactInput {
            first_name: fields.cust_first_name,
            last_name: fields.cust_last_name,
            email: fields.cust_email,
            address: fields.cust_address,
            city: fields.cust_city,
            province: fields.cust_prov,
            postal_code: fields.cust_postal,
            country: fields.cust_country,
            home_phone: fields.cust_home_phone,
            business_phone: fields.cust_bus_phone,
        }
    }
}

#[derive(Serialize)]
pub struct RegisteredResponse {
    pub ok: bool,
    pub message: &'static str,
}

/// POST /api/register: inserts a customer without booking anything.
#[tracing::instrument(skip(state, payload))]
pub async fn register<S: TravelStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<ContactFields>, JsonRejection>,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = RegisterCustomer::new(req.into())
        .map_err(|e| ApiError::from_domain(Operation::Register, e.into()))?;

    state
        .registration
        .register(cmd)
        .await
        .map_err(|e| ApiError::from_domain(Operation::Register, e))?;

    Ok(Json(RegisteredResponse {
        ok: true,
        message: "Registration successful!",
    }))
}
