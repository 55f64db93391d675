// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies used by the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! Stored entities (`Class`, `ClassSession`, ...) are returned as-is and live
//! in [`crate::storage`]. Partial updates reuse the patch types defined next
//! to each entity.
//!
//! Owner fields never appear in a request: the owning teacher is always the
//! authenticated principal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{Attendance, Class, ClassSession, Enrollment, Resource, Student};

// =============================================================================
// Classes
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateClassRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassListResponse {
    pub classes: Vec<Class>,
    pub total: usize,
}

// =============================================================================
// Class Sessions
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Class the session is held for. Must be owned by the caller.
    pub class_id: String,
    /// Day of the session (`YYYY-MM-DD`)
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionListResponse {
    pub sessions: Vec<ClassSession>,
    pub total: usize,
}

// =============================================================================
// Enrollments
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEnrollmentRequest {
    /// Target class. Must be owned by the caller.
    pub class_id: String,
    pub student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentListResponse {
    pub enrollments: Vec<Enrollment>,
    pub total: usize,
}

// =============================================================================
// Resources
// =============================================================================

/// New resource. The class comes from the request path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    /// Absolute `http`/`https` URL of the material
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceListResponse {
    pub resources: Vec<Resource>,
    pub total: usize,
}

// =============================================================================
// Attendance
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAttendanceRequest {
    pub class_session_id: String,
    pub student_id: String,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub attendance: Vec<Attendance>,
    pub total: usize,
}

// =============================================================================
// Students
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: String,
    /// Date of birth (`YYYY-MM-DD`), not in the future
    pub birth_date: NaiveDate,
}

/// Students on the caller's roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
    pub total: usize,
}
