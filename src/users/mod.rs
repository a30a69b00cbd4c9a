//! User record domain types.
//!
//! # Data Flow
//! ```text
//! JSON request body
//!     → types.rs (NewUser / flag bodies, parsed by serde)
//!     → store (one parameterized statement)
//!     → types.rs (User / ManagerSummary rows)
//!     → JSON response body
//! ```
//!
//! # Design Decisions
//! - `id` is storage-assigned and never accepted from callers
//! - Flag updates are addressed by `UserFlag`, which owns the column name
//! - `manager_id` is nullable everywhere; referential integrity is left to storage

pub mod types;

pub use types::{
    ActiveFlag, AdminFlag, CreatedUser, ManagerAssignment, ManagerFlag, ManagerSummary,
    MessageBody, NewUser, User, UserFlag,
};
