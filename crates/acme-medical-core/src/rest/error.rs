//! Boundary errors and their status codes.

use serde_json::json;
use thiserror::Error;

use super::Response;
use crate::security::{IdentityError, Rejection};
use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthenticated => 401,
            ApiError::Forbidden => 403,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::BadRequest(_) => 400,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }

    /// `{"statusCode": .., "reasonPhrase": ..}`
    pub fn into_response(self) -> Response {
        Response {
            status: self.status(),
            body: Some(json!({
                "statusCode": self.status(),
                "reasonPhrase": self.to_string(),
            })),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Precondition(msg) => ApiError::BadRequest(msg),
            ServiceError::Duplicate(msg) | ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Lookup(msg) => ApiError::Internal(msg),
            ServiceError::Database(e) => ApiError::Internal(e.to_string()),
            ServiceError::Password(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(e: Rejection) -> Self {
        match e {
            Rejection::Unauthenticated => ApiError::Unauthenticated,
            Rejection::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
