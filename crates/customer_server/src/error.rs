//! Protocol-level errors and their status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use customer_core::RepoError;
use log::error;

use crate::envelope::{Reply, MSG_MARSHAL_ERROR};

pub const MSG_NOT_FOUND: &str = "not found";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Invalid HTTP Method";
pub const MSG_MISSING_ID: &str = "Please provide id";
pub const MSG_INVALID_ID: &str = "Invalid id";

/// Handler failure carrying the status and the envelope message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Request body could not be decoded into a `{name, age}` document.
    pub fn malformed_body(err: &serde_json::Error) -> Self {
        log::warn!("event=body_decode module=http status=error error={err}");
        Self::internal(MSG_MARSHAL_ERROR)
    }

    /// Maps a persistence failure; `store_message` is used for store errors.
    pub fn from_repo(err: RepoError, store_message: &str) -> Self {
        match err {
            RepoError::NotFound(_) => Self::not_found(),
            other => {
                error!("event=store_call module=http status=error error={other}");
                Self::internal(store_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Reply::message(self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_core::DbError;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from_repo(RepoError::NotFound(3), "Error UpdateCustomer");
        assert_eq!(err, ApiError::not_found());
    }

    #[test]
    fn test_store_errors_map_to_500_with_context_message() {
        let repo_err = RepoError::Db(DbError::StoreFile {
            path: PathBuf::from("customers.db"),
            source: std::io::Error::other("disk gone"),
        });
        let err = ApiError::from_repo(repo_err, "query error");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "query error");
    }

    #[test]
    fn test_schema_errors_map_to_500() {
        let err = ApiError::from_repo(RepoError::MissingRequiredTable("Customers"), "query error");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_malformed_body_is_internal_error() {
        let decode_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::malformed_body(&decode_err);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, MSG_MARSHAL_ERROR);
    }
}
