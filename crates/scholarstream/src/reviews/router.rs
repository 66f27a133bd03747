use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::error::ApiError;
use crate::users::UserRepository;

use super::domain::{Review, ReviewDraft, ReviewFilter, ReviewPatch};
use super::repository::ReviewRepository;
use super::service::ReviewLedger;

pub struct ReviewRouterState<R, U> {
    pub ledger: Arc<ReviewLedger<R>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<R, U> Clone for ReviewRouterState<R, U> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn review_router<R, U>(ledger: Arc<ReviewLedger<R>>, policy: Arc<AccessPolicy<U>>) -> Router
where
    R: ReviewRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/reviews", get(list_handler::<R, U>).post(create_handler::<R, U>))
        .route(
            "/reviews/:id",
            axum::routing::put(update_handler::<R, U>).delete(delete_handler::<R, U>),
        )
        .with_state(ReviewRouterState { ledger, policy })
}

async fn list_handler<R: ReviewRepository, U: UserRepository>(
    State(state): State<ReviewRouterState<R, U>>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.ledger.list(&filter)?))
}

async fn create_handler<R: ReviewRepository, U: UserRepository>(
    State(state): State<ReviewRouterState<R, U>>,
    caller: CallerIdentity,
    Json(draft): Json<ReviewDraft>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let id = state.ledger.create(draft)?;
    Ok(Json(json!({ "success": true, "insertedId": id.0 })))
}

async fn update_handler<R: ReviewRepository, U: UserRepository>(
    State(state): State<ReviewRouterState<R, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(patch): Json<ReviewPatch>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    state.ledger.update(&id, patch)?;
    Ok(Json(
        json!({ "success": true, "message": "Updated successfully" }),
    ))
}

async fn delete_handler<R: ReviewRepository, U: UserRepository>(
    State(state): State<ReviewRouterState<R, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let deleted = state.ledger.delete(&id)?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
