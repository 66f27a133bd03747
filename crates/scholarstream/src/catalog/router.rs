use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::access::{AccessPolicy, CallerIdentity, Capability};
use crate::error::ApiError;
use crate::users::UserRepository;

use super::domain::{CatalogQueryParams, Scholarship, ScholarshipDraft, ScholarshipPage, ScholarshipPatch};
use super::repository::ScholarshipRepository;
use super::service::ScholarshipCatalog;

pub struct CatalogRouterState<S, U> {
    pub catalog: Arc<ScholarshipCatalog<S>>,
    pub policy: Arc<AccessPolicy<U>>,
}

impl<S, U> Clone for CatalogRouterState<S, U> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            policy: self.policy.clone(),
        }
    }
}

pub fn catalog_router<S, U>(
    catalog: Arc<ScholarshipCatalog<S>>,
    policy: Arc<AccessPolicy<U>>,
) -> Router
where
    S: ScholarshipRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(
            "/scholarships",
            get(list_handler::<S, U>).post(create_handler::<S, U>),
        )
        .route("/scholarships/featured", get(featured_handler::<S, U>))
        .route(
            "/scholarships/recommended",
            get(recommended_handler::<S, U>),
        )
        .route("/scholarships/:ownerEmail", get(by_owner_handler::<S, U>))
        .route("/scholarship/data/:id", get(get_handler::<S, U>))
        .route("/scholarship/update/:id", put(update_handler::<S, U>))
        .route("/scholarships/delete/:id", delete(delete_handler::<S, U>))
        .with_state(CatalogRouterState { catalog, policy })
}

async fn list_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<Json<ScholarshipPage>, ApiError> {
    Ok(Json(state.catalog.list(&params)?))
}

async fn featured_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    Query(params): Query<FeaturedParams>,
) -> Result<Json<Vec<Scholarship>>, ApiError> {
    Ok(Json(state.catalog.list_featured(&params.limit)?))
}

#[derive(Debug, Default, Deserialize)]
struct FeaturedParams {
    #[serde(default)]
    limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendedParams {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    exclude: Option<String>,
}

async fn recommended_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    Query(params): Query<RecommendedParams>,
) -> Result<Json<Vec<Scholarship>>, ApiError> {
    let category = params
        .category
        .as_deref()
        .ok_or(ApiError::MissingParameter("category"))?;
    let exclude = params
        .exclude
        .as_deref()
        .ok_or(ApiError::MissingParameter("exclude"))?;
    Ok(Json(state.catalog.list_recommended(category, exclude)?))
}

async fn by_owner_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    caller: CallerIdentity,
    Path(owner_email): Path<String>,
) -> Result<Json<Vec<Scholarship>>, ApiError> {
    state.policy.authorize(&caller, Capability::Authenticated)?;
    Ok(Json(state.catalog.list_by_owner(&owner_email)?))
}

async fn create_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    caller: CallerIdentity,
    Json(draft): Json<ScholarshipDraft>,
) -> Result<Json<Value>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    let id = state.catalog.create(draft)?;
    Ok(Json(json!({ "success": true, "insertedId": id.0 })))
}

async fn get_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    Path(id): Path<String>,
) -> Result<Json<Scholarship>, ApiError> {
    Ok(Json(state.catalog.get(&id)?))
}

async fn update_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    Json(patch): Json<ScholarshipPatch>,
) -> Result<Json<Value>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    state.catalog.update(&id, patch)?;
    Ok(Json(
        json!({ "success": true, "message": "Updated successfully" }),
    ))
}

async fn delete_handler<S: ScholarshipRepository, U: UserRepository>(
    State(state): State<CatalogRouterState<S, U>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .policy
        .authorize(&caller, Capability::ModeratorOrAdmin)?;
    let deleted_count = state.catalog.delete(&id)?;
    Ok(Json(
        json!({ "success": true, "deletedCount": deleted_count }),
    ))
}
