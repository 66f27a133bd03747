use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::ids;

use super::domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationPatch, ApplicationStatus,
    ScholarshipSnapshot,
};
use super::repository::ApplicationRepository;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    ApplicationId(ids::next_in_sequence(
        ApplicationId::PREFIX,
        &APPLICATION_SEQUENCE,
    ))
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Owns the application lifecycle: intake, status transitions, feedback
/// annotation, and the two deletion paths.
pub struct ApplicationWorkflow<A> {
    applications: Arc<A>,
}

impl<A: ApplicationRepository> ApplicationWorkflow<A> {
    pub fn new(applications: Arc<A>) -> Self {
        Self { applications }
    }

    /// Intake. Every required field is checked before anything is written;
    /// a rejected draft never produces a partial insert. Status defaults to
    /// pending, appliedDate to now.
    pub fn create(&self, draft: ApplicationDraft) -> Result<ApplicationId, ApiError> {
        let mut missing = Vec::new();

        let snapshot = draft.scholar.as_ref();
        if snapshot.is_none() {
            missing.push("scholar");
        }
        if !present(&draft.scholarship_id) {
            missing.push("scholarshipId");
        }
        if snapshot.is_some_and(|s| !present(&s.scholarship_name)) {
            missing.push("scholarshipName");
        }
        if snapshot.is_some_and(|s| !present(&s.university_name)) {
            missing.push("universityName");
        }
        if snapshot.is_some_and(|s| s.application_fees.is_none()) {
            missing.push("applicationFees");
        }
        if !present(&draft.applicant) {
            missing.push("applicant");
        }
        if !present(&draft.user_name) {
            missing.push("userName");
        }
        let (
            Some(snapshot),
            Some(scholarship_id),
            Some(applicant),
            Some(user_name),
        ) = (
            draft.scholar,
            draft.scholarship_id,
            draft.applicant,
            draft.user_name,
        )
        else {
            return Err(ApiError::MissingFields(missing));
        };
        let (Some(scholarship_name), Some(university_name), Some(application_fees)) = (
            snapshot.scholarship_name,
            snapshot.university_name,
            snapshot.application_fees,
        )
        else {
            return Err(ApiError::MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        let status = match draft.status.as_deref() {
            None => ApplicationStatus::Pending,
            Some(raw) => ApplicationStatus::parse(raw)
                .ok_or_else(|| ApiError::InvalidStatus(raw.to_string()))?,
        };

        let id = next_application_id();
        self.applications.insert(Application {
            id: id.clone(),
            scholar: ScholarshipSnapshot {
                scholarship_name,
                university_name,
                university_country: snapshot.university_country.unwrap_or_default(),
                subject_category: snapshot.subject_category.unwrap_or_default(),
                scholarship_category: snapshot.scholarship_category.unwrap_or_default(),
                application_fees,
                posted_user_email: snapshot.posted_user_email.unwrap_or_default(),
            },
            scholarship_id,
            applicant,
            user_name,
            applied_date: draft.applied_date.unwrap_or_else(Utc::now),
            status,
            feedback: draft.feedback,
            payment: draft.payment,
        })?;

        Ok(id)
    }

    pub fn list_by_applicant(&self, email: &str) -> Result<Vec<Application>, ApiError> {
        Ok(self.applications.find_by_applicant(email)?)
    }

    /// The moderator/admin review queue: applications whose embedded
    /// snapshot names this issuer.
    pub fn list_by_issuer(&self, email: &str) -> Result<Vec<Application>, ApiError> {
        Ok(self.applications.find_by_issuer(email)?)
    }

    pub fn get(&self, raw_id: &str) -> Result<Application, ApiError> {
        let id = self.parse_id(raw_id)?;
        self.applications
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Application"))
    }

    /// Status transition. The target only has to be one of the four values;
    /// there is no transition graph beyond that.
    pub fn update_status(&self, raw_id: &str, raw_status: &str) -> Result<(), ApiError> {
        let status = ApplicationStatus::parse(raw_status)
            .ok_or_else(|| ApiError::InvalidStatus(raw_status.to_string()))?;
        let id = self.parse_id(raw_id)?;

        let mut application = self
            .applications
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Application"))?;
        application.status = status;
        if !self.applications.update(application)? {
            return Err(ApiError::NotFound("Application"));
        }
        Ok(())
    }

    pub fn update_feedback(&self, raw_id: &str, feedback: String) -> Result<(), ApiError> {
        let id = self.parse_id(raw_id)?;
        let mut application = self
            .applications
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Application"))?;
        application.feedback = Some(feedback);
        if !self.applications.update(application)? {
            return Err(ApiError::NotFound("Application"));
        }
        Ok(())
    }

    /// Broader edit: merge every supplied patch field.
    pub fn update_full(&self, raw_id: &str, patch: ApplicationPatch) -> Result<(), ApiError> {
        let status = patch
            .status
            .as_deref()
            .map(|raw| {
                ApplicationStatus::parse(raw)
                    .ok_or_else(|| ApiError::InvalidStatus(raw.to_string()))
            })
            .transpose()?;
        let id = self.parse_id(raw_id)?;

        let mut application = self
            .applications
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Application"))?;
        if let Some(user_name) = patch.user_name {
            application.user_name = user_name;
        }
        if let Some(status) = status {
            application.status = status;
        }
        if let Some(feedback) = patch.feedback {
            application.feedback = Some(feedback);
        }
        if let Some(payment) = patch.payment {
            application.payment = Some(payment);
        }
        if !self.applications.update(application)? {
            return Err(ApiError::NotFound("Application"));
        }
        Ok(())
    }

    /// Guarded deletion: only a pending application may be removed through
    /// this path.
    pub fn delete_if_pending(&self, raw_id: &str) -> Result<u64, ApiError> {
        let id = self.parse_id(raw_id)?;
        let application = self
            .applications
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Application"))?;
        if application.status != ApplicationStatus::Pending {
            return Err(ApiError::InvalidState(
                "Only pending applications can be deleted",
            ));
        }
        Ok(self.applications.delete(&id)?)
    }

    /// Administrative override: removes the record regardless of state.
    /// Callers gate this behind the Admin capability.
    pub fn force_delete(&self, raw_id: &str) -> Result<u64, ApiError> {
        let id = self.parse_id(raw_id)?;
        let deleted = self.applications.delete(&id)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Application"));
        }
        Ok(deleted)
    }

    fn parse_id(&self, raw: &str) -> Result<ApplicationId, ApiError> {
        ApplicationId::parse(raw).ok_or_else(|| ApiError::InvalidId(raw.to_string()))
    }
}
