// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Student and roster API endpoints.
//!
//! Student visibility follows the caller's roster. Roster membership has
//! no effect on class, enrollment or attendance permissions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{CreateStudentRequest, StudentListResponse},
    services::StudentService,
    state::AppState,
    storage::{RosterEntry, Student},
};

/// Create a student and add them to the caller's roster.
#[utoipa::path(
    post,
    path = "/v1/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_student(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = StudentService::new(state.store()).create(&user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// List students on the caller's roster.
#[utoipa::path(
    get,
    path = "/v1/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Roster", body = StudentListResponse)
    )
)]
pub async fn list_students(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
) -> Result<Json<StudentListResponse>, ApiError> {
    let students = StudentService::new(state.store()).list(&user.user_id)?;
    let total = students.len();
    Ok(Json(StudentListResponse { students, total }))
}

#[utoipa::path(
    get,
    path = "/v1/students/{student_id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 403, description = "Forbidden - not on your roster"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let student = StudentService::new(state.store()).get(&user.user_id, &student_id)?;
    Ok(Json(student))
}

/// Delete a student everywhere (enrollments, attendance, rosters).
#[utoipa::path(
    delete,
    path = "/v1/students/{student_id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 403, description = "Forbidden - not on your roster"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    StudentService::new(state.store()).delete(&user.user_id, &student_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add an existing student to the caller's roster. Idempotent.
#[utoipa::path(
    put,
    path = "/v1/students/{student_id}/roster",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student is on the roster", body = RosterEntry),
        (status = 404, description = "Student not found")
    )
)]
pub async fn add_to_roster(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<RosterEntry>, ApiError> {
    let entry = StudentService::new(state.store()).add_to_roster(&user.user_id, &student_id)?;
    Ok(Json(entry))
}

/// Remove a student from the caller's roster. The student is kept.
#[utoipa::path(
    delete,
    path = "/v1/students/{student_id}/roster",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Removed from roster"),
        (status = 404, description = "Student not on roster")
    )
)]
pub async fn remove_from_roster(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    StudentService::new(state.store()).remove_from_roster(&user.user_id, &student_id)?;
    Ok(StatusCode::NO_CONTENT)
}
