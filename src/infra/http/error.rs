use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::admin::customers::AdminCustomerError;
use crate::application::admin::products::AdminProductError;
use crate::application::catalog::CatalogError;
use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const NOT_FOUND: &str = "not_found";
    pub const DUPLICATE: &str = "duplicate";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const VALIDATION: &str = "validation_error";
    pub const INTEGRITY: &str = "integrity_error";
    pub const REPO: &str = "repo_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    source: &'static str,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            source: "infra::http",
        }
    }

    /// Name the handler module in the diagnostic report picked up by the response logger.
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            self.source,
            self.status,
            format!("{}: {}", self.code, hint.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Malformed request body", Some(rejection.body_text()))
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate { constraint } => Self::new(
                StatusCode::CONFLICT,
                codes::DUPLICATE,
                "Duplicate record",
                Some(constraint),
            ),
            RepoError::NotFound => Self::not_found("resource not found"),
            RepoError::InvalidInput { message } => Self::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_INPUT,
                "Invalid input",
                Some(message),
            ),
            RepoError::Integrity { message } => Self::new(
                StatusCode::CONFLICT,
                codes::INTEGRITY,
                "Integrity constraint violated",
                Some(message),
            ),
            RepoError::Persistence(message) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Persistence error",
                Some(message),
            ),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Repo(repo) => repo.into(),
        }
    }
}

impl From<AdminProductError> for ApiError {
    fn from(err: AdminProductError) -> Self {
        match err {
            AdminProductError::Validation(domain) => Self::new(
                StatusCode::BAD_REQUEST,
                codes::VALIDATION,
                "Invalid product",
                Some(domain.to_string()),
            ),
            AdminProductError::NotFound { .. } => Self::not_found("product not found"),
            AdminProductError::Repo(repo) => repo.into(),
        }
    }
}

impl From<AdminCustomerError> for ApiError {
    fn from(err: AdminCustomerError) -> Self {
        match err {
            AdminCustomerError::NotFound { .. } => Self::not_found("customer not found"),
            AdminCustomerError::Repo(repo) => repo.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = ApiError::from(AdminProductError::Validation(DomainError::validation(
            "price must be a non-negative number",
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), codes::VALIDATION);
    }

    #[test]
    fn foreign_key_conflicts_map_to_conflict() {
        let err = ApiError::from(AdminProductError::Repo(RepoError::Integrity {
            message: "FOREIGN KEY constraint failed".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), codes::INTEGRITY);
    }

    #[test]
    fn response_carries_error_report() {
        let response = ApiError::not_found("product not found")
            .with_source("infra::http::public")
            .into_response();
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("error report attached");
        assert_eq!(report.source, "infra::http::public");
        assert_eq!(report.status, StatusCode::NOT_FOUND);
    }
}
