//! Response shaping and error mapping.
//!
//! # Responsibilities
//! - Map handler failures to status codes and static `{message}` bodies
//! - Log storage causes server-side; never put them in a response
//!
//! # Status Mapping
//! ```text
//! UserNotFound / RouteNotFound → 404
//! BadRequest                   → 400
//! MethodNotAllowed             → 405
//! RequestTimeout               → 408
//! PayloadTooLarge              → 413
//! Storage                      → 500 (route-specific message, also on statement timeout)
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::observability::metrics;
use crate::store::StoreError;
use crate::users::MessageBody;

/// Every way a request can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Lookup by external identifier matched nothing.
    #[error("User not found")]
    UserNotFound,

    /// No route matches the request path.
    #[error("Not found")]
    RouteNotFound,

    /// The request could not be parsed into the expected shape.
    #[error("{0}")]
    BadRequest(&'static str),

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The whole request outlived `timeouts.request_secs`.
    #[error("Request timed out")]
    RequestTimeout,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// The store failed; `message` names the operation.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with its route message.
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { message, source } = &self {
            tracing::error!(error = %source, "{}", message);
            metrics::record_store_error(*message);
        }
        (self.status(), Json(MessageBody::new(self.to_string()))).into_response()
    }
}

/// `{ "message": ... }` with 200 OK.
pub fn message(text: &'static str) -> Json<MessageBody> {
    Json(MessageBody::new(text))
}
