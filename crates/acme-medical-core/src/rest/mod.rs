//! Request boundary.
//!
//! Transport-agnostic: a host (HTTP server, FFI caller, CLI) hands over
//! method, path, credentials and a JSON body and gets back a status and a
//! JSON body.
//!
//! ```text
//! Request ─► route ─► authenticate ─► access policy ─► ownership ─► service ─► Response
//! ```

mod error;
mod resources;
mod router;

pub use error::ApiError;
pub use router::{Route, Target};

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::db::Database;
use crate::security::{authenticate, evaluate, Access, Caller, Credentials, Resource};
use crate::service::MedicalService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("Unsupported method: {}", other)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub credentials: Option<Credentials>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            credentials: None,
            body: None,
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_value(value)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {}", e)))?;
        Ok(Self {
            status,
            body: Some(body),
        })
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Process one request end to end.
pub fn handle(db: &Database, config: &Config, request: Request) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %request.method,
        path = %request.path,
    );

    let _entered = span.enter();
    let response = match process(db, config, request) {
        Ok(response) => response,
        Err(error) => {
            if error.status() >= 500 {
                tracing::error!(%error, "request failed");
            } else {
                tracing::warn!(%error, "request rejected");
            }
            error.into_response()
        }
    };
    tracing::debug!(status = response.status, "request complete");
    response
}

fn process(db: &Database, config: &Config, request: Request) -> Result<Response, ApiError> {
    let route = Route::parse(request.method, &request.path)?;

    let caller = match &request.credentials {
        Some(credentials) => authenticate(db, credentials)?,
        None => None,
    };

    let service = MedicalService::new(db, config);
    if evaluate(caller.as_ref(), route.resource, route.operation)? == Access::NeedsOwnership {
        // NeedsOwnership is only returned for an authenticated caller
        let caller = caller.as_ref().ok_or(ApiError::Unauthenticated)?;
        if !owns(&service, caller, &route)? {
            tracing::warn!(username = %caller.username, "ownership check failed");
            return Err(ApiError::Forbidden);
        }
    }

    resources::dispatch(&service, &route, request.body)
}

fn owns(service: &MedicalService<'_>, caller: &Caller, route: &Route) -> Result<bool, ApiError> {
    let Target::Item(id) = route.target else {
        return Ok(false);
    };
    Ok(match route.resource {
        Resource::Physician => service.owns_physician(caller, id),
        Resource::Patient => service.owns_patient(caller, id),
        Resource::Medicine => service.owns_medicine(caller, id)?,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<Method>(), Ok(Method::Get));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_no_content() {
        let response = Response::no_content();
        assert_eq!(response.status, 204);
        assert!(response.is_success());
        assert!(response.body.is_none());
    }
}
