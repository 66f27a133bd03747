use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::applications::ApplicationRepository;
use crate::catalog::ScholarshipRepository;
use crate::error::ApiError;
use crate::payments::PaymentRepository;
use crate::users::UserRepository;

use super::service::{AnalyticsAggregator, DashboardStats, HomeStats};

pub struct AnalyticsRouterState<U, S, A, P> {
    pub aggregator: Arc<AnalyticsAggregator<U, S, A, P>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<U, S, A, P> Clone for AnalyticsRouterState<U, S, A, P> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn analytics_router<U, S, A, P>(
    aggregator: Arc<AnalyticsAggregator<U, S, A, P>>,
    policy: Arc<AccessPolicy<U>>,
) -> Router
where
    U: UserRepository + 'static,
    S: ScholarshipRepository + 'static,
    A: ApplicationRepository + 'static,
    P: PaymentRepository + 'static,
{
    Router::new()
        .route("/home/stats", get(home_handler::<U, S, A, P>))
        .route("/analytics/stats", get(dashboard_handler::<U, S, A, P>))
        .with_state(AnalyticsRouterState { aggregator, policy })
}

async fn home_handler<U, S, A, P>(
    State(state): State<AnalyticsRouterState<U, S, A, P>>,
) -> Json<HomeStats>
where
    U: UserRepository,
    S: ScholarshipRepository,
    A: ApplicationRepository,
    P: PaymentRepository,
{
    Json(state.aggregator.home_stats())
}

async fn dashboard_handler<U, S, A, P>(
    State(state): State<AnalyticsRouterState<U, S, A, P>>,
    caller: CallerIdentity,
) -> Result<Json<DashboardStats>, ApiError>
where
    U: UserRepository,
    S: ScholarshipRepository,
    A: ApplicationRepository,
    P: PaymentRepository,
{
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    Ok(Json(state.aggregator.dashboard_stats()))
}
