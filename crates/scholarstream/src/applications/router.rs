use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::error::ApiError;
use crate::users::UserRepository;

use super::domain::{Application, ApplicationDraft, ApplicationPatch};
use super::repository::ApplicationRepository;
use super::service::ApplicationWorkflow;

pub struct ApplicationRouterState<A, U> {
    pub workflow: Arc<ApplicationWorkflow<A>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<A, U> Clone for ApplicationRouterState<A, U> {
    fn clone(&self) -> Self {
        Self {
            workflow: self.workflow.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn application_router<A, U>(
    workflow: Arc<ApplicationWorkflow<A>>,
    policy: Arc<AccessPolicy<U>>,
) -> Router
where
    A: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/applications", post(create_handler::<A, U>))
        .route("/applications/user", get(by_applicant_handler::<A, U>))
        .route("/applications/data/:id", get(get_handler::<A, U>))
        .route("/applications/update/:id", put(update_full_handler::<A, U>))
        .route("/applications/delete/:id", delete(force_delete_handler::<A, U>))
        .route(
            "/applications/:id",
            get(by_issuer_handler::<A, U>).delete(guarded_delete_handler::<A, U>),
        )
        .route("/applications/:id/status", put(status_handler::<A, U>))
        .route("/applications/:id/feedback", put(feedback_handler::<A, U>))
        .with_state(ApplicationRouterState { workflow, policy })
}

async fn create_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Json(draft): Json<ApplicationDraft>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let id = state.workflow.create(draft)?;
    Ok(Json(json!({ "success": true, "insertedId": id.0 })))
}

#[derive(Debug, Default, Deserialize)]
struct ApplicantParams {
    #[serde(default)]
    email: Option<String>,
}

async fn by_applicant_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Query(params): Query<ApplicantParams>,
) -> Result<Json<Vec<Application>>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let email = params
        .email
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingParameter("email"))?;
    Ok(Json(state.workflow.list_by_applicant(email)?))
}

async fn get_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Application>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    Ok(Json(state.workflow.get(&id)?))
}

async fn by_issuer_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(issuer_email): Path<String>,
) -> Result<Json<Vec<Application>>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    Ok(Json(state.workflow.list_by_issuer(&issuer_email)?))
}

#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: Option<String>,
}

async fn status_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    let status = body.status.ok_or(ApiError::MissingFields(vec!["status"]))?;
    state.workflow.update_status(&id, &status)?;
    Ok(Json(
        json!({ "success": true, "message": "Status updated successfully" }),
    ))
}

#[derive(Debug, Default, Deserialize)]
struct FeedbackBody {
    #[serde(default)]
    feedback: Option<String>,
}

async fn feedback_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(body): Json<FeedbackBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    let feedback = body
        .feedback
        .ok_or(ApiError::MissingFields(vec!["feedback"]))?;
    state.workflow.update_feedback(&id, feedback)?;
    Ok(Json(
        json!({ "success": true, "message": "Feedback updated successfully" }),
    ))
}

async fn update_full_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(patch): Json<ApplicationPatch>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    state.workflow.update_full(&id, patch)?;
    Ok(Json(
        json!({ "success": true, "message": "Updated successfully" }),
    ))
}

async fn guarded_delete_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let deleted = state.workflow.delete_if_pending(&id)?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

/// Administrative removal; the same store primitive as the guarded path,
/// but reachable only with the Admin capability.
async fn force_delete_handler<A: ApplicationRepository, U: UserRepository>(
    State(state): State<ApplicationRouterState<A, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::AdminOnly)?;
    let deleted = state.workflow.force_delete(&id)?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
