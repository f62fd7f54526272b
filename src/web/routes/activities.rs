use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::models::Activity;
use crate::services::activities_service::{self, Confirmation};
use crate::web::error::ApiError;
use crate::web::AppState;

/// Query pairs in request order; a repeated key resolves to its last value.
type QueryPairs = Vec<(String, String)>;

fn required_param(
    query: Result<Query<QueryPairs>, QueryRejection>,
    key: &'static str,
) -> Result<String, ApiError> {
    let Query(pairs) = query?;
    pairs
        .into_iter()
        .rev()
        .find_map(|(k, v)| (k == key).then_some(v))
        .ok_or(ApiError::MissingQuery(key))
}

pub async fn list_activities_handler(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, Activity>> {
    Json(activities_service::list_activities(&state.registry).await)
}

pub async fn signup_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Confirmation>, ApiError> {
    let Path(activity_name) = path?;
    let email = required_param(query, "email")?;
    let confirmation = activities_service::signup(&state.registry, &activity_name, &email).await?;
    Ok(Json(confirmation))
}

pub async fn unregister_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Confirmation>, ApiError> {
    let Path(activity_name) = path?;
    let email = required_param(query, "email")?;
    let confirmation =
        activities_service::unregister(&state.registry, &activity_name, &email).await?;
    Ok(Json(confirmation))
}
