// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Attendance API endpoints.
//!
//! Recording, reading, updating and listing attendance is open to any
//! teacher; only deletion checks ownership of the session's class.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{AttendanceListResponse, CreateAttendanceRequest},
    services::AttendanceService,
    state::AppState,
    storage::{Attendance, AttendancePatch},
};

#[utoipa::path(
    post,
    path = "/v1/attendance",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    request_body = CreateAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 409, description = "Already recorded, or unknown session or student")
    )
)]
pub async fn record_attendance(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateAttendanceRequest>,
) -> Result<(StatusCode, Json<Attendance>), ApiError> {
    let attendance = AttendanceService::new(state.store()).record(&user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}/attendance",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("session_id" = String, Path, description = "Class session ID")),
    responses(
        (status = 200, description = "Attendance of the session", body = AttendanceListResponse),
        (status = 404, description = "Session not found")
    )
)]
pub async fn list_attendance(
    TeacherOnly(_user): TeacherOnly,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<AttendanceListResponse>, ApiError> {
    let attendance = AttendanceService::new(state.store()).list_by_session(&session_id)?;
    let total = attendance.len();
    Ok(Json(AttendanceListResponse { attendance, total }))
}

#[utoipa::path(
    get,
    path = "/v1/attendance/{attendance_id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("attendance_id" = String, Path, description = "Attendance ID")),
    responses(
        (status = 200, description = "Attendance details", body = Attendance),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn get_attendance(
    TeacherOnly(_user): TeacherOnly,
    State(state): State<AppState>,
    Path(attendance_id): Path<String>,
) -> Result<Json<Attendance>, ApiError> {
    let attendance = AttendanceService::new(state.store()).get(&attendance_id)?;
    Ok(Json(attendance))
}

#[utoipa::path(
    put,
    path = "/v1/attendance/{attendance_id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("attendance_id" = String, Path, description = "Attendance ID")),
    request_body = AttendancePatch,
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn update_attendance(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(attendance_id): Path<String>,
    Json(patch): Json<AttendancePatch>,
) -> Result<Json<Attendance>, ApiError> {
    let attendance =
        AttendanceService::new(state.store()).update(&user.user_id, &attendance_id, patch)?;
    Ok(Json(attendance))
}

#[utoipa::path(
    delete,
    path = "/v1/attendance/{attendance_id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("attendance_id" = String, Path, description = "Attendance ID")),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn delete_attendance(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(attendance_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    AttendanceService::new(state.store()).delete(&user.user_id, &attendance_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{teacher, test_state};
    use crate::storage::test_support::{seed_class, seed_session, seed_student};

    #[tokio::test]
    async fn any_teacher_records_but_only_owner_deletes() {
        let (state, _dir) = test_state();
        let c1 = seed_class(state.store(), "teacher-a");
        let s1 = seed_session(state.store(), &c1.id);
        let student = seed_student(state.store(), "st1");

        let (status, Json(record)) = record_attendance(
            teacher("teacher-b"),
            State(state.clone()),
            Json(CreateAttendanceRequest {
                class_session_id: s1.id.clone(),
                student_id: student.id.clone(),
                present: false,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(list) = list_attendance(teacher("teacher-b"), State(state.clone()), Path(s1.id))
            .await
            .unwrap();
        assert_eq!(list.attendance, vec![record.clone()]);

        let Json(updated) = update_attendance(
            teacher("teacher-b"),
            State(state.clone()),
            Path(record.id.clone()),
            Json(AttendancePatch { present: Some(true) }),
        )
        .await
        .unwrap();
        assert!(updated.present);

        let err = delete_attendance(teacher("teacher-b"), State(state.clone()), Path(record.id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let status = delete_attendance(teacher("teacher-a"), State(state.clone()), Path(record.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let gone = get_attendance(teacher("teacher-a"), State(state), Path(record.id))
            .await
            .unwrap_err();
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }
}
