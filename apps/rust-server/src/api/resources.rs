// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Teaching resource API endpoints, nested under their class.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{CreateResourceRequest, ResourceListResponse},
    services::ResourceService,
    state::AppState,
    storage::{Resource, ResourcePatch},
};

#[utoipa::path(
    post,
    path = "/v1/classes/{class_id}/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Invalid URL or age range")
    )
)]
pub async fn create_resource(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let resource = ResourceService::new(state.store()).create(&user.user_id, &class_id, request)?;
    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    get,
    path = "/v1/classes/{class_id}/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Resources of the class", body = ResourceListResponse),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn list_resources(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<ResourceListResponse>, ApiError> {
    let resources = ResourceService::new(state.store()).list(&user.user_id, &class_id)?;
    let total = resources.len();
    Ok(Json(ResourceListResponse { resources, total }))
}

/// Get a resource. 404 if it exists but belongs to a different class.
#[utoipa::path(
    get,
    path = "/v1/classes/{class_id}/resources/{resource_id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(
        ("class_id" = String, Path, description = "Class ID"),
        ("resource_id" = String, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource details", body = Resource),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Resource not found in this class")
    )
)]
pub async fn get_resource(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path((class_id, resource_id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    let resource =
        ResourceService::new(state.store()).get(&user.user_id, &class_id, &resource_id)?;
    Ok(Json(resource))
}

#[utoipa::path(
    put,
    path = "/v1/classes/{class_id}/resources/{resource_id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(
        ("class_id" = String, Path, description = "Class ID"),
        ("resource_id" = String, Path, description = "Resource ID")
    ),
    request_body = ResourcePatch,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Resource not found in this class"),
        (status = 422, description = "Invalid URL or age range")
    )
)]
pub async fn update_resource(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path((class_id, resource_id)): Path<(String, String)>,
    Json(patch): Json<ResourcePatch>,
) -> Result<Json<Resource>, ApiError> {
    let resource = ResourceService::new(state.store()).update(
        &user.user_id,
        &class_id,
        &resource_id,
        patch,
    )?;
    Ok(Json(resource))
}

#[utoipa::path(
    delete,
    path = "/v1/classes/{class_id}/resources/{resource_id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(
        ("class_id" = String, Path, description = "Class ID"),
        ("resource_id" = String, Path, description = "Resource ID")
    ),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Resource not found in this class")
    )
)]
pub async fn delete_resource(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path((class_id, resource_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    ResourceService::new(state.store()).delete(&user.user_id, &class_id, &resource_id)?;
    Ok(StatusCode::NO_CONTENT)
}
