// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Enrollment API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{CreateEnrollmentRequest, EnrollmentListResponse},
    services::EnrollmentService,
    state::AppState,
    storage::Enrollment,
};

/// Enroll a student into a class owned by the caller.
///
/// Having the student on the caller's roster is neither required nor
/// sufficient: only ownership of the target class counts.
#[utoipa::path(
    post,
    path = "/v1/enrollments",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Student enrolled", body = Enrollment),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Already enrolled, or unknown student")
    )
)]
pub async fn create_enrollment(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let enrollment = EnrollmentService::new(state.store()).create(&user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/v1/classes/{class_id}/enrollments",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Enrollments of the class", body = EnrollmentListResponse),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn list_enrollments(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<EnrollmentListResponse>, ApiError> {
    let enrollments = EnrollmentService::new(state.store()).list(&user.user_id, &class_id)?;
    let total = enrollments.len();
    Ok(Json(EnrollmentListResponse { enrollments, total }))
}

#[utoipa::path(
    delete,
    path = "/v1/enrollments/{enrollment_id}",
    tag = "Enrollments",
    security(("bearer_auth" = [])),
    params(("enrollment_id" = String, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn delete_enrollment(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(enrollment_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    EnrollmentService::new(state.store()).delete(&user.user_id, &enrollment_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{teacher, test_state};
    use crate::storage::test_support::{seed_class, seed_student};

    fn request(class_id: &str, student_id: &str) -> Json<CreateEnrollmentRequest> {
        Json(CreateEnrollmentRequest {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
        })
    }

    #[tokio::test]
    async fn enrollment_lifecycle() {
        let (state, _dir) = test_state();
        let class = seed_class(state.store(), "teacher-a");
        let student = seed_student(state.store(), "st1");

        let (status, Json(enrollment)) = create_enrollment(
            teacher("teacher-a"),
            State(state.clone()),
            request(&class.id, &student.id),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let duplicate = create_enrollment(
            teacher("teacher-a"),
            State(state.clone()),
            request(&class.id, &student.id),
        )
        .await
        .unwrap_err();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);

        let Json(list) =
            list_enrollments(teacher("teacher-a"), State(state.clone()), Path(class.id.clone()))
                .await
                .unwrap();
        assert_eq!(list.total, 1);

        let status = delete_enrollment(teacher("teacher-a"), State(state), Path(enrollment.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn enrolling_into_someone_elses_class_is_403() {
        let (state, _dir) = test_state();
        let c1 = seed_class(state.store(), "teacher-a");
        seed_class(state.store(), "teacher-b");
        let st1 = seed_student(state.store(), "st1");

        let err = create_enrollment(teacher("teacher-b"), State(state), request(&c1.id, &st1.id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
