use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::access::AccessPolicy;
use crate::applications::domain::{
    Application, ApplicationDraft, ApplicationId, SnapshotDraft,
};
use crate::applications::repository::ApplicationRepository;
use crate::applications::router::application_router;
use crate::applications::service::ApplicationWorkflow;
use crate::error::StoreError;
use crate::users::{Role, User, UserId, UserRepository};

pub(super) fn snapshot_draft() -> SnapshotDraft {
    SnapshotDraft {
        scholarship_name: Some("STEM Grant".to_string()),
        university_name: Some("Iowa State University".to_string()),
        university_country: Some("USA".to_string()),
        subject_category: Some("STEM".to_string()),
        scholarship_category: Some("Full fund".to_string()),
        application_fees: Some(50.0),
        posted_user_email: Some("mod@example.com".to_string()),
    }
}

pub(super) fn draft() -> ApplicationDraft {
    ApplicationDraft {
        scholar: Some(snapshot_draft()),
        scholarship_id: Some("sch-000001".to_string()),
        applicant: Some("student@example.com".to_string()),
        user_name: Some("Sam Student".to_string()),
        ..ApplicationDraft::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    records: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: Application) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, application: Application) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Ok(false);
        }
        guard.insert(application.id.clone(), application);
        Ok(true)
    }

    fn find_by_applicant(&self, email: &str) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.applicant == email)
            .cloned()
            .collect())
    }

    fn find_by_issuer(&self, email: &str) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.scholar.posted_user_email == email)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &ApplicationId) -> Result<u64, StoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.remove(id).map(|_| 1).unwrap_or(0))
    }

    fn all(&self) -> Result<Vec<Application>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.len() as u64)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryUsers {
    records: Arc<Mutex<BTreeMap<String, User>>>,
}

impl MemoryUsers {
    pub(super) fn seeded() -> Self {
        let users = Self::default();
        users.seed("student@example.com", Some(Role::Student));
        users.seed("mod@example.com", Some(Role::Moderator));
        users.seed("admin@example.com", Some(Role::Admin));
        users
    }

    fn seed(&self, email: &str, role: Option<Role>) {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        let id = UserId(format!("usr-{:06}", guard.len() + 1));
        guard.insert(
            email.to_string(),
            User {
                id,
                email: email.to_string(),
                name: None,
                role,
                moderator_for: Vec::new(),
                created_at: Utc::now(),
            },
        );
    }
}

impl UserRepository for MemoryUsers {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        guard.insert(user.email.clone(), user);
        Ok(())
    }

    fn update(&self, user: User) -> Result<bool, StoreError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.insert(user.email.clone(), user).is_some())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.values().find(|user| &user.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn all(&self) -> Result<Vec<User>, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.len() as u64)
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: Application) -> Result<(), StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<bool, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn find_by_applicant(&self, _email: &str) -> Result<Vec<Application>, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn find_by_issuer(&self, _email: &str) -> Result<Vec<Application>, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn delete(&self, _id: &ApplicationId) -> Result<u64, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Application>, StoreError> {
        Err(StoreError("database offline".to_string()))
    }

    fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError("database offline".to_string()))
    }
}

pub(super) fn build_workflow() -> (
    ApplicationWorkflow<MemoryApplications>,
    Arc<MemoryApplications>,
) {
    let repository = Arc::new(MemoryApplications::default());
    let workflow = ApplicationWorkflow::new(repository.clone());
    (workflow, repository)
}

pub(super) fn build_router() -> axum::Router {
    let repository = Arc::new(MemoryApplications::default());
    let workflow = Arc::new(ApplicationWorkflow::new(repository));
    let policy = Arc::new(AccessPolicy::new(Arc::new(MemoryUsers::seeded())));
    application_router(workflow, policy)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
