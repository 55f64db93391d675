// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Enrollment records linking a student to a class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::ownership::{OwnedResource, OwnershipLink};
use super::super::paths::ENROLLMENTS;
use super::Record;

/// A student enrolled in a class. At most one per `(class_id, student_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Enrollment {
    pub id: String,
    pub class_id: String,
    pub student_id: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// Whether two enrollments collide on the unique pair.
    pub fn same_pair(&self, other: &Enrollment) -> bool {
        self.class_id == other.class_id && self.student_id == other.student_id
    }
}

impl Record for Enrollment {
    const COLLECTION: &'static str = ENROLLMENTS;
    const LABEL: &'static str = "Enrollment";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for Enrollment {
    fn ownership_link(&self) -> OwnershipLink<'_> {
        OwnershipLink::Class(&self.class_id)
    }
}
