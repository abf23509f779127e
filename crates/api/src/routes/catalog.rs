//! Package and agency listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::{AgencyListing, PackageListing};
use store::TravelStore;

use super::DataResponse;
use crate::error::{ApiError, Operation};
use crate::state::AppState;

/// GET /api/packages: packages that have not ended, in start-date order.
#[tracing::instrument(skip(state))]
pub async fn packages<S: TravelStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DataResponse<Vec<PackageListing>>>, ApiError> {
    let listings = state
        .catalog
        .list_packages()
        .await
        .map_err(|e| ApiError::from_catalog(Operation::Packages, e))?;

    Ok(Json(DataResponse::new(listings)))
}

/// GET /api/agencies: every agency with its agents.
#[tracing::instrument(skip(state))]
pub async fn agencies<S: TravelStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DataResponse<Vec<AgencyListing>>>, ApiError> {
    let listings = state
        .catalog
        .list_agencies()
        .await
        .map_err(|e| ApiError::from_catalog(Operation::Agencies, e))?;

    Ok(Json(DataResponse::new(listings)))
}
