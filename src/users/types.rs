//! Request, response and row types for the `users` table.

use serde::{Deserialize, Serialize};

/// A full row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Surrogate key assigned by storage.
    pub id: i64,
    /// Identity reference from the external auth provider.
    pub google_user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_manager: bool,
    /// Surrogate key of this user's manager, if any.
    pub manager_id: Option<i64>,
}

/// Insert payload: every column except `id`.
///
/// All fields are required except `manager_id`, which defaults to `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub google_user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_manager: bool,
    #[serde(default)]
    pub manager_id: Option<i64>,
}

impl NewUser {
    /// Materialize the row storage would hold after assigning `id`.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            google_user_id: self.google_user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_admin: self.is_admin,
            is_active: self.is_active,
            is_manager: self.is_manager,
            manager_id: self.manager_id,
        }
    }
}

/// Projection served by `GET /api/managers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ManagerSummary {
    pub id: i64,
    /// `"<first_name> <last_name>"`.
    pub name: String,
}

impl ManagerSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: format!("{} {}", user.first_name, user.last_name),
        }
    }
}

/// Boolean columns that can be toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFlag {
    Admin,
    Active,
    Manager,
}

impl UserFlag {
    /// Column backing this flag.
    pub fn column(self) -> &'static str {
        match self {
            UserFlag::Admin => "is_admin",
            UserFlag::Active => "is_active",
            UserFlag::Manager => "is_manager",
        }
    }

    /// Single-statement update for this flag. Binds: value, id.
    pub fn update_statement(self) -> &'static str {
        match self {
            UserFlag::Admin => "UPDATE users SET is_admin = ? WHERE id = ?",
            UserFlag::Active => "UPDATE users SET is_active = ? WHERE id = ?",
            UserFlag::Manager => "UPDATE users SET is_manager = ? WHERE id = ?",
        }
    }

    /// Apply the flag to an in-memory row.
    pub fn apply(self, user: &mut User, value: bool) {
        match self {
            UserFlag::Admin => user.is_admin = value,
            UserFlag::Active => user.is_active = value,
            UserFlag::Manager => user.is_manager = value,
        }
    }
}

/// Body of `PATCH /api/users/{id}/admin`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AdminFlag {
    pub is_admin: bool,
}

/// Body of `PATCH /api/users/{id}/active`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ActiveFlag {
    pub is_active: bool,
}

/// Body of `PATCH /api/users/{id}/management`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ManagerFlag {
    pub is_manager: bool,
}

/// Body of `PATCH /api/users/{id}/assign-manager`.
///
/// A missing or `null` `manager_id` clears the assignment.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ManagerAssignment {
    #[serde(default)]
    pub manager_id: Option<i64>,
}

/// `{ "message": ... }`, the shape of every non-collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `POST /api/users`. `userId` echoes the external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}
