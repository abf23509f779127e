//! API error types with HTTP response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// The endpoint a server-side failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Packages,
    Agencies,
    Register,
    Order,
}

impl Operation {
    /// Error code reported to the client for a server-side failure.
    pub fn error_code(self) -> &'static str {
        match self {
            Operation::Packages => "DB_ERROR_PACKAGES",
            Operation::Agencies => "DB_ERROR_AGENCIES",
            Operation::Register => "DB_ERROR_REGISTER",
            Operation::Order => "DB_ERROR_ORDER",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Packages | Operation::Agencies => "fetch failed",
            Operation::Register => "registration failed",
            Operation::Order => "order failed",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Operation::Packages => "list_packages",
            Operation::Agencies => "list_agencies",
            Operation::Register => "register",
            Operation::Order => "create_booking",
        }
    }
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was missing or had an invalid field.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The store failed; the detail is logged, never sent to the client.
    #[error("{} failed: {detail}", .operation.name())]
    Internal {
        operation: Operation,
        detail: String,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    error: &'a str,
    message: String,
}

impl ApiError {
    /// Maps a domain error raised while serving `operation`.
    pub fn from_domain(operation: Operation, err: DomainError) -> Self {
        match &err {
            DomainError::Validation(validation) => ApiError::BadRequest(validation.to_string()),
            DomainError::PackageNotFound(_) => ApiError::NotFound(err.to_string()),
            DomainError::BookingNumberExhausted { .. } | DomainError::Store(_) => {
                ApiError::Internal {
                    operation,
                    detail: err.to_string(),
                }
            }
        }
    }

    /// Maps a catalog error raised while serving `operation`.
    pub fn from_catalog(operation: Operation, err: CatalogError) -> Self {
        ApiError::Internal {
            operation,
            detail: err.to_string(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    /// An unreadable body (bad JSON, wrong content type, mistyped field) is
    /// answered with the same envelope as any other bad request.
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(message) => ErrorBody {
                ok: false,
                error: "BAD_REQUEST",
                message,
            },
            ApiError::NotFound(message) => ErrorBody {
                ok: false,
                error: "NOT_FOUND",
                message,
            },
            ApiError::Internal { operation, detail } => {
                tracing::error!(operation = operation.name(), error = %detail, "request failed");
                ErrorBody {
                    ok: false,
                    error: operation.error_code(),
                    message: operation.failure_message().to_string(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use domain::ValidationError;
    use store::{PackageId, PackageRef, StoreError};

    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let err = ApiError::from_domain(
            Operation::Order,
            ValidationError::MissingField("email").into(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required field: email");
    }

    #[test]
    fn unknown_package_is_not_found() {
        let err = ApiError::from_domain(
            Operation::Order,
            DomainError::PackageNotFound(PackageRef::Id(PackageId::new(999))),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_is_internal_with_operation_code() {
        let err = ApiError::from_domain(
            Operation::Register,
            StoreError::ForeignKeyViolation {
                constraint: "x".to_string(),
            }
            .into(),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            err,
            ApiError::Internal {
                operation: Operation::Register,
                ..
            }
        ));
    }

    #[test]
    fn exhausted_booking_numbers_is_internal() {
        let err = ApiError::from_domain(
            Operation::Order,
            DomainError::BookingNumberExhausted { attempts: 5 },
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
