// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        AttendanceListResponse, ClassListResponse, CreateAttendanceRequest, CreateClassRequest,
        CreateEnrollmentRequest, CreateResourceRequest, CreateSessionRequest,
        CreateStudentRequest, EnrollmentListResponse, ResourceListResponse, SessionListResponse,
        StudentListResponse,
    },
    state::AppState,
    storage::{
        Attendance, AttendancePatch, Class, ClassPatch, ClassSession, ClassSessionPatch,
        Enrollment, Resource, ResourcePatch, ResourceType, RosterEntry, Student,
    },
};

pub mod attendance;
pub mod classes;
pub mod enrollments;
pub mod health;
pub mod resources;
pub mod sessions;
pub mod students;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        // Classes
        .route(
            "/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route(
            "/classes/{class_id}",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        // Sessions
        .route("/sessions", post(sessions::create_session))
        .route(
            "/classes/{class_id}/sessions",
            get(sessions::list_sessions),
        )
        .route(
            "/sessions/{session_id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        // Enrollments
        .route("/enrollments", post(enrollments::create_enrollment))
        .route(
            "/classes/{class_id}/enrollments",
            get(enrollments::list_enrollments),
        )
        .route(
            "/enrollments/{enrollment_id}",
            delete(enrollments::delete_enrollment),
        )
        // Resources
        .route(
            "/classes/{class_id}/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/classes/{class_id}/resources/{resource_id}",
            get(resources::get_resource)
                .put(resources::update_resource)
                .delete(resources::delete_resource),
        )
        // Attendance
        .route("/attendance", post(attendance::record_attendance))
        .route(
            "/attendance/{attendance_id}",
            get(attendance::get_attendance)
                .put(attendance::update_attendance)
                .delete(attendance::delete_attendance),
        )
        .route(
            "/sessions/{session_id}/attendance",
            get(attendance::list_attendance),
        )
        // Students and rosters
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{student_id}",
            get(students::get_student).delete(students::delete_student),
        )
        .route(
            "/students/{student_id}/roster",
            put(students::add_to_roster).delete(students::remove_from_roster),
        );

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Registers the `bearer_auth` scheme referenced by every `/v1` path.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        classes::create_class,
        classes::list_classes,
        classes::get_class,
        classes::update_class,
        classes::delete_class,
        sessions::create_session,
        sessions::list_sessions,
        sessions::get_session,
        sessions::update_session,
        sessions::delete_session,
        enrollments::create_enrollment,
        enrollments::list_enrollments,
        enrollments::delete_enrollment,
        resources::create_resource,
        resources::list_resources,
        resources::get_resource,
        resources::update_resource,
        resources::delete_resource,
        attendance::record_attendance,
        attendance::list_attendance,
        attendance::get_attendance,
        attendance::update_attendance,
        attendance::delete_attendance,
        students::create_student,
        students::list_students,
        students::get_student,
        students::delete_student,
        students::add_to_roster,
        students::remove_from_roster
    ),
    components(
        schemas(
            Class,
            ClassSession,
            Enrollment,
            Resource,
            Attendance,
            Student,
            RosterEntry,
            ClassPatch,
            ClassSessionPatch,
            ResourcePatch,
            AttendancePatch,
            CreateClassRequest,
            CreateSessionRequest,
            CreateEnrollmentRequest,
            CreateResourceRequest,
            CreateAttendanceRequest,
            CreateStudentRequest,
            ClassListResponse,
            SessionListResponse,
            EnrollmentListResponse,
            ResourceListResponse,
            AttendanceListResponse,
            StudentListResponse,
            ResourceType,
            Role,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Classes", description = "Classes owned by the calling teacher"),
        (name = "Sessions", description = "Dated meetings of a class"),
        (name = "Enrollments", description = "Students enrolled in a class"),
        (name = "Resources", description = "Teaching material attached to a class"),
        (name = "Attendance", description = "Presence of a student at a session"),
        (name = "Students", description = "Students and per-teacher rosters")
    )
)]
struct ApiDoc;
