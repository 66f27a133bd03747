use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryPaymentRepository, InMemoryReviewRepository,
    InMemoryScholarshipRepository, InMemoryUserRepository,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use scholarstream::access::AccessPolicy;
use scholarstream::analytics::{analytics_router, AnalyticsAggregator};
use scholarstream::applications::{application_router, ApplicationWorkflow};
use scholarstream::catalog::{catalog_router, ScholarshipCatalog};
use scholarstream::payments::{payment_router, PaymentLedger};
use scholarstream::reviews::{review_router, ReviewLedger};
use scholarstream::users::{user_router, UserDirectory};

/// Everything the HTTP surface needs, wired over the process-wide store.
pub(crate) struct Services {
    pub(crate) policy: Arc<AccessPolicy<InMemoryUserRepository>>,
    pub(crate) directory: Arc<UserDirectory<InMemoryUserRepository>>,
    pub(crate) catalog: Arc<ScholarshipCatalog<InMemoryScholarshipRepository>>,
    pub(crate) workflow: Arc<ApplicationWorkflow<InMemoryApplicationRepository>>,
    pub(crate) payments: Arc<PaymentLedger<InMemoryPaymentRepository>>,
    pub(crate) reviews: Arc<ReviewLedger<InMemoryReviewRepository>>,
    pub(crate) analytics: Arc<
        AnalyticsAggregator<
            InMemoryUserRepository,
            InMemoryScholarshipRepository,
            InMemoryApplicationRepository,
            InMemoryPaymentRepository,
        >,
    >,
}

pub(crate) fn build_router(services: Services) -> axum::Router {
    axum::Router::new()
        .merge(user_router(services.directory, services.policy.clone()))
        .merge(catalog_router(services.catalog, services.policy.clone()))
        .merge(application_router(services.workflow, services.policy.clone()))
        .merge(payment_router(services.payments, services.policy.clone()))
        .merge(review_router(services.reviews, services.policy.clone()))
        .merge(analytics_router(services.analytics, services.policy))
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn root() -> &'static str {
    "ScholarStream server"
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
