use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryPaymentRepository, InMemoryReviewRepository,
    InMemoryScholarshipRepository, InMemoryUserRepository,
};
use crate::routes::{build_router, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use scholarstream::access::AccessPolicy;
use scholarstream::analytics::AnalyticsAggregator;
use scholarstream::applications::ApplicationWorkflow;
use scholarstream::catalog::ScholarshipCatalog;
use scholarstream::config::AppConfig;
use scholarstream::error::AppError;
use scholarstream::payments::PaymentLedger;
use scholarstream::reviews::ReviewLedger;
use scholarstream::telemetry;
use scholarstream::users::UserDirectory;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // One store handle per collection, opened here and reused for the
    // process lifetime; nothing closes them.
    let users = Arc::new(InMemoryUserRepository::default());
    let scholarships = Arc::new(InMemoryScholarshipRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let payments = Arc::new(InMemoryPaymentRepository::default());
    let reviews = Arc::new(InMemoryReviewRepository::default());

    let services = Services {
        policy: Arc::new(AccessPolicy::new(users.clone())),
        directory: Arc::new(UserDirectory::new(users.clone())),
        catalog: Arc::new(ScholarshipCatalog::new(scholarships.clone())),
        workflow: Arc::new(ApplicationWorkflow::new(applications.clone())),
        payments: Arc::new(PaymentLedger::new(payments.clone())),
        reviews: Arc::new(ReviewLedger::new(reviews)),
        analytics: Arc::new(AnalyticsAggregator::new(
            users,
            scholarships,
            applications,
            payments,
        )),
    };

    let app = build_router(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ScholarStream server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
