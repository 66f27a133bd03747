use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::applications::ApplicationRepository;
use crate::catalog::ScholarshipRepository;
use crate::error::StoreError;
use crate::payments::PaymentRepository;
use crate::users::UserRepository;

/// Landing-page counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub users: u64,
    pub applications: u64,
    pub scholarships: u64,
}

/// Dashboard aggregates. `applications_by_university` folds the full
/// application set per request; linear, acceptable at this scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: u64,
    pub scholarships: u64,
    pub total_payments: f64,
    pub applications_by_university: BTreeMap<String, u64>,
}

/// Read-only aggregation over the other stores, recomputed per request.
/// Never mutates, never fails a request: a store read error degrades the
/// response to the zero-valued shape.
pub struct AnalyticsAggregator<U, S, A, P> {
    users: Arc<U>,
    scholarships: Arc<S>,
    applications: Arc<A>,
    payments: Arc<P>,
}

impl<U, S, A, P> AnalyticsAggregator<U, S, A, P>
where
    U: UserRepository,
    S: ScholarshipRepository,
    A: ApplicationRepository,
    P: PaymentRepository,
{
    pub fn new(users: Arc<U>, scholarships: Arc<S>, applications: Arc<A>, payments: Arc<P>) -> Self {
        Self {
            users,
            scholarships,
            applications,
            payments,
        }
    }

    pub fn home_stats(&self) -> HomeStats {
        self.try_home_stats().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "home stats degraded to zero");
            HomeStats::default()
        })
    }

    fn try_home_stats(&self) -> Result<HomeStats, StoreError> {
        Ok(HomeStats {
            users: self.users.count()?,
            applications: self.applications.count()?,
            scholarships: self.scholarships.count()?,
        })
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        self.try_dashboard_stats().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "dashboard stats degraded to zero");
            DashboardStats::default()
        })
    }

    fn try_dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let total_payments = self
            .payments
            .all()?
            .iter()
            .map(|payment| payment.amount)
            .sum();

        let mut applications_by_university = BTreeMap::new();
        for application in self.applications.all()? {
            *applications_by_university
                .entry(application.scholar.university_name)
                .or_insert(0) += 1;
        }

        Ok(DashboardStats {
            users: self.users.count()?,
            scholarships: self.scholarships.count()?,
            total_payments,
            applications_by_university,
        })
    }
}
