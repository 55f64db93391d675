// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class session API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::TeacherOnly,
    error::ApiError,
    models::{CreateSessionRequest, SessionListResponse},
    services::SessionService,
    state::AppState,
    storage::{ClassSession, ClassSessionPatch},
};

/// Schedule a session for a class owned by the caller.
#[utoipa::path(
    post,
    path = "/v1/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = ClassSession),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_session(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ClassSession>), ApiError> {
    let session = SessionService::new(state.store()).create(&user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// List the sessions of a class, ordered by date.
#[utoipa::path(
    get,
    path = "/v1/classes/{class_id}/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Sessions of the class", body = SessionListResponse),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn list_sessions(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<SessionListResponse>, ApiError> {
    let sessions = SessionService::new(state.store()).list(&user.user_id, &class_id)?;
    let total = sessions.len();
    Ok(Json(SessionListResponse { sessions, total }))
}

#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = String, Path, description = "Class session ID")),
    responses(
        (status = 200, description = "Session details", body = ClassSession),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_session(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClassSession>, ApiError> {
    let session = SessionService::new(state.store()).get(&user.user_id, &session_id)?;
    Ok(Json(session))
}

#[utoipa::path(
    put,
    path = "/v1/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = String, Path, description = "Class session ID")),
    request_body = ClassSessionPatch,
    responses(
        (status = 200, description = "Session updated", body = ClassSession),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn update_session(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(patch): Json<ClassSessionPatch>,
) -> Result<Json<ClassSession>, ApiError> {
    let session = SessionService::new(state.store()).update(&user.user_id, &session_id, patch)?;
    Ok(Json(session))
}

/// Delete a session and its attendance.
#[utoipa::path(
    delete,
    path = "/v1/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = String, Path, description = "Class session ID")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 403, description = "Forbidden - not your class"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn delete_session(
    TeacherOnly(user): TeacherOnly,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    SessionService::new(state.store()).delete(&user.user_id, &session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{teacher, test_state};
    use crate::storage::test_support::seed_class;
    use crate::storage::ClassroomStore;
    use chrono::NaiveDate;

    fn request(class_id: &str) -> Json<CreateSessionRequest> {
        Json(CreateSessionRequest {
            class_id: class_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            topic: None,
        })
    }

    #[tokio::test]
    async fn create_and_list_sessions() {
        let (state, _dir) = test_state();
        let class = seed_class(state.store(), "teacher-a");

        let (status, Json(session)) =
            create_session(teacher("teacher-a"), State(state.clone()), request(&class.id))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(list) = list_sessions(teacher("teacher-a"), State(state), Path(class.id))
            .await
            .unwrap();
        assert_eq!(list.sessions, vec![session]);
    }

    #[tokio::test]
    async fn create_under_foreign_or_missing_class_fails() {
        let (state, _dir) = test_state();
        let class = seed_class(state.store(), "teacher-a");

        let forbidden = create_session(teacher("teacher-b"), State(state.clone()), request(&class.id))
            .await
            .unwrap_err();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let missing = create_session(teacher("teacher-a"), State(state.clone()), request("xNOPE"))
            .await
            .unwrap_err();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        assert!(state.store().list_sessions_by_class(&class.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_session_by_owner() {
        let (state, _dir) = test_state();
        let class = seed_class(state.store(), "teacher-a");
        let (_, Json(session)) =
            create_session(teacher("teacher-a"), State(state.clone()), request(&class.id))
                .await
                .unwrap();

        let forbidden =
            delete_session(teacher("teacher-b"), State(state.clone()), Path(session.id.clone()))
                .await
                .unwrap_err();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let status = delete_session(teacher("teacher-a"), State(state.clone()), Path(session.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let gone = get_session(teacher("teacher-a"), State(state), Path(session.id))
            .await
            .unwrap_err();
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }
}
