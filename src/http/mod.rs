//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID span, typed body / path extraction)
//!     → users.rs (route → one store statement)
//!     → response.rs (status + JSON body, error mapping)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod server;
pub mod users;

pub use request::{UserIdPath, ValidatedJson, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
