// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Attendance records: whether a student was present at a class session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::ownership::{OwnedResource, OwnershipLink};
use super::super::paths::ATTENDANCE;
use super::Record;

/// Presence of one student at one session. At most one per pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Attendance {
    pub id: String,
    pub class_session_id: String,
    pub student_id: String,
    pub present: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Partial update for attendance. Only presence can change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AttendancePatch {
    pub present: Option<bool>,
}

impl Attendance {
    pub fn apply(&mut self, patch: AttendancePatch, now: DateTime<Utc>) {
        if let Some(present) = patch.present {
            self.present = present;
            self.recorded_at = now;
        }
    }

    /// Whether two records collide on the unique `(session, student)` pair.
    pub fn same_pair(&self, other: &Attendance) -> bool {
        self.class_session_id == other.class_session_id && self.student_id == other.student_id
    }
}

impl Record for Attendance {
    const COLLECTION: &'static str = ATTENDANCE;
    const LABEL: &'static str = "Attendance";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for Attendance {
    fn ownership_link(&self) -> OwnershipLink<'_> {
        OwnershipLink::Session(&self.class_session_id)
    }
}
