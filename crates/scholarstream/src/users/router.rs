use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::error::ApiError;

use super::domain::{User, UserDraft};
use super::repository::UserRepository;
use super::service::UserDirectory;

pub struct UserRouterState<U> {
    pub directory: Arc<UserDirectory<U>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<U> Clone for UserRouterState<U> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn user_router<U>(directory: Arc<UserDirectory<U>>, policy: Arc<AccessPolicy<U>>) -> Router
where
    U: UserRepository + 'static,
{
    Router::new()
        .route("/users", get(list_handler::<U>).post(register_handler::<U>))
        .route("/users/:id", get(by_email_handler::<U>))
        .route("/users/:id/role", put(assign_role_handler::<U>))
        .with_state(UserRouterState { directory, policy })
}

async fn list_handler<U: UserRepository>(
    State(state): State<UserRouterState<U>>,
    caller: CallerIdentity,
) -> Result<Json<Vec<User>>, ApiError> {
    state.policy.authorize(&caller, Capability::AdminOnly)?;
    Ok(Json(state.directory.list()?))
}

async fn register_handler<U: UserRepository>(
    State(state): State<UserRouterState<U>>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<Value>, ApiError> {
    let id = state.directory.register(draft)?;
    Ok(Json(json!({ "success": true, "insertedId": id.0 })))
}

/// Mirrors the upstream contract: an unknown email answers 200 with `null`.
async fn by_email_handler<U: UserRepository>(
    State(state): State<UserRouterState<U>>,
    caller: CallerIdentity,
    Path(email): Path<String>,
) -> Result<Json<Option<User>>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    Ok(Json(state.directory.find_by_email(&email)?))
}

#[derive(Debug, Deserialize)]
struct RoleAssignmentBody {
    #[serde(default)]
    role: Option<String>,
}

async fn assign_role_handler<U: UserRepository>(
    State(state): State<UserRouterState<U>>,
    caller: CallerIdentity,
    Path(user_id): Path<String>,
    Json(body): Json<RoleAssignmentBody>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::AdminOnly)?;
    let role = body.role.ok_or(ApiError::InvalidRole)?;
    state.directory.assign_role(&user_id, &role)?;
    Ok(Json(
        json!({ "success": true, "message": "Role updated successfully" }),
    ))
}
