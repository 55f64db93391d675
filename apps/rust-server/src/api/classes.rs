// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class API endpoints.
//!
//! A teacher sees and manages only the classes they own. Touching another
//! teacher's class is 403; an unknown id is 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{ClassListResponse, CreateClassRequest},
    services::ClassService,
    state::AppState,
    storage::{Class, ClassPatch},
};

/// Create a class owned by the caller.
#[utoipa::path(
    post,
    path = "/v1/classes",
    tag = "Classes",
    security(("bearer_auth" = [])),
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_class(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), ApiError> {
    let class = ClassService::new(state.store()).create(&user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// List the caller's classes.
#[utoipa::path(
    get,
    path = "/v1/classes",
    tag = "Classes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Classes owned by the caller", body = ClassListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_classes(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
) -> Result<Json<ClassListResponse>, ApiError> {
    let classes = ClassService::new(state.store()).list(&user.user_id)?;
    let total = classes.len();
    Ok(Json(ClassListResponse { classes, total }))
}

#[utoipa::path(
    get,
    path = "/v1/classes/{class_id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn get_class(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<Class>, ApiError> {
    let class = ClassService::new(state.store()).get(&user.user_id, &class_id)?;
    Ok(Json(class))
}

/// Partially update a class. The owner cannot be changed.
#[utoipa::path(
    put,
    path = "/v1/classes/{class_id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    request_body = ClassPatch,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn update_class(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(patch): Json<ClassPatch>,
) -> Result<Json<Class>, ApiError> {
    let class = ClassService::new(state.store()).update(&user.user_id, &class_id, patch)?;
    Ok(Json(class))
}

/// Delete a class with its sessions, enrollments, resources and attendance.
#[utoipa::path(
    delete,
    path = "/v1/classes/{class_id}",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn delete_class(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ClassService::new(state.store()).delete(&user.user_id, &class_id)?;
    Ok(StatusCode::NO_CONTENT)
}
