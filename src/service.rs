//! Request/response surface for a presentation layer.
//!
//! Transport-agnostic: the caller hands over the request method and raw body
//! and gets back a status plus a JSON body to send.

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::{ResolveError, Result};
use crate::resolver::RowResolver;
use crate::types::Row;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ServiceResponse {
    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": message.into() }) }
    }

    pub fn is_success(&self) -> bool { self.status.is_success() }
}

pub struct ResolveService {
    resolver: RowResolver,
}

impl ResolveService {
    pub fn new(resolver: RowResolver) -> Self { Self { resolver } }

    /// POST `{ "rows": [...] }` -> 200 with the media items in row order.
    /// Any row failure fails the whole request with 500.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> ServiceResponse {
        if *method != Method::POST {
            return ServiceResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
        }
        let rows = match parse_request(body) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "rejecting resolve request");
                return ServiceResponse::error(StatusCode::BAD_REQUEST, "rows missing");
            }
        };
        let items = match self.resolver.resolve(&rows).await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "resolver failed");
                return ServiceResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        };
        match serde_json::to_value(&items) {
            Ok(body) => ServiceResponse { status: StatusCode::OK, body },
            Err(e) => ServiceResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

/// Extract the `rows` array from a request body.
pub fn parse_request(body: &[u8]) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ResolveError::Validation(format!("body is not JSON: {e}")))?;
    let rows = value
        .get("rows")
        .filter(|r| r.is_array())
        .ok_or_else(|| ResolveError::Validation("rows missing".into()))?;
    serde_json::from_value(rows.clone()).map_err(|e| ResolveError::Validation(format!("rows malformed: {e}")))
}
