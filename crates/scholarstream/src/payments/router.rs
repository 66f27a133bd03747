use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::error::ApiError;
use crate::users::UserRepository;

use super::domain::PaymentDraft;
use super::repository::PaymentRepository;
use super::service::PaymentLedger;

pub struct PaymentRouterState<P, U> {
    pub ledger: Arc<PaymentLedger<P>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<P, U> Clone for PaymentRouterState<P, U> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn payment_router<P, U>(ledger: Arc<PaymentLedger<P>>, policy: Arc<AccessPolicy<U>>) -> Router
where
    P: PaymentRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/payments", post(record_handler::<P, U>))
        .with_state(PaymentRouterState { ledger, policy })
}

async fn record_handler<P: PaymentRepository, U: UserRepository>(
    State(state): State<PaymentRouterState<P, U>>,
    caller: CallerIdentity,
    Json(draft): Json<PaymentDraft>,
) -> Result<Json<Value>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    let id = state.ledger.record(draft)?;
    Ok(Json(json!({ "success": true, "insertedId": id.0 })))
}
