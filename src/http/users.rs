//! `/api` route handlers: one route, one statement.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use crate::http::request::{UserIdPath, ValidatedJson};
use crate::http::response::{message, ApiError};
use crate::http::server::AppState;
use crate::users::{
    ActiveFlag, AdminFlag, CreatedUser, ManagerAssignment, ManagerFlag, ManagerSummary,
    MessageBody, NewUser, User, UserFlag,
};

/// Routes mounted under `/api`.
///
/// `{id}` is the external identifier on `GET` and the surrogate key on the
/// `PATCH` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/admin", patch(set_admin))
        .route("/users/{id}/active", patch(set_active))
        .route("/users/{id}/management", patch(set_management))
        .route("/users/{id}/assign-manager", patch(assign_manager))
        .route("/managers", get(list_managers))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(ApiError::storage("Error fetching users"))?;
    Ok(Json(users))
}

async fn list_managers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ManagerSummary>>, ApiError> {
    let managers = state
        .store
        .list_managers()
        .await
        .map_err(ApiError::storage("Error fetching managers"))?;
    Ok(Json(managers))
}

async fn get_user(
    State(state): State<AppState>,
    Path(google_user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .find_by_google_id(&google_user_id)
        .await
        .map_err(ApiError::storage("Error fetching user"))?
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(user): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<CreatedUser>), ApiError> {
    let id = state
        .store
        .insert_user(&user)
        .await
        .map_err(ApiError::storage("Error creating user"))?;

    tracing::info!(id, google_user_id = %user.google_user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            message: "User created successfully".to_string(),
            user_id: user.google_user_id,
        }),
    ))
}

async fn set_admin(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(body): ValidatedJson<AdminFlag>,
) -> Result<Json<MessageBody>, ApiError> {
    update_flag(&state, id, UserFlag::Admin, body.is_admin).await
}

async fn set_active(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(body): ValidatedJson<ActiveFlag>,
) -> Result<Json<MessageBody>, ApiError> {
    update_flag(&state, id, UserFlag::Active, body.is_active).await
}

async fn set_management(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(body): ValidatedJson<ManagerFlag>,
) -> Result<Json<MessageBody>, ApiError> {
    update_flag(&state, id, UserFlag::Manager, body.is_manager).await
}

async fn assign_manager(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(body): ValidatedJson<ManagerAssignment>,
) -> Result<Json<MessageBody>, ApiError> {
    let matched = state
        .store
        .assign_manager(id, body.manager_id)
        .await
        .map_err(ApiError::storage("Error assigning user manager"))?;

    log_update(id, "manager_id", matched);
    Ok(message("User manager assigned successfully"))
}

/// Static (success, failure) messages for a flag route.
fn flag_messages(flag: UserFlag) -> (&'static str, &'static str) {
    match flag {
        UserFlag::Admin => (
            "User admin status updated successfully",
            "Error updating user admin status",
        ),
        UserFlag::Active => (
            "User active status updated successfully",
            "Error updating user active status",
        ),
        UserFlag::Manager => (
            "User manager status updated successfully",
            "Error updating user manager status",
        ),
    }
}

async fn update_flag(
    state: &AppState,
    id: i64,
    flag: UserFlag,
    value: bool,
) -> Result<Json<MessageBody>, ApiError> {
    let (success, failure) = flag_messages(flag);
    let matched = state
        .store
        .set_flag(id, flag, value)
        .await
        .map_err(ApiError::storage(failure))?;

    log_update(id, flag.column(), matched);
    Ok(message(success))
}

// Zero matched rows is not an error: the caller still gets the success message.
fn log_update(id: i64, column: &'static str, matched: u64) {
    if matched == 0 {
        tracing::debug!(id, column, "Update matched no rows");
    } else {
        tracing::info!(id, column, "User updated");
    }
}
