// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class session records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::ownership::{OwnedResource, OwnershipLink};
use super::super::paths::SESSIONS;
use super::Record;

/// One meeting of a class on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ClassSession {
    /// Unique session identifier (UUID)
    pub id: String,
    /// Class this session belongs to
    pub class_id: String,
    /// Day the session takes place
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a session. The parent class is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClassSessionPatch {
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
}

impl ClassSession {
    pub fn apply(&mut self, patch: ClassSessionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(topic) = patch.topic {
            self.topic = Some(topic);
        }
    }
}

impl Record for ClassSession {
    const COLLECTION: &'static str = SESSIONS;
    const LABEL: &'static str = "Class session";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for ClassSession {
    fn ownership_link(&self) -> OwnershipLink<'_> {
        OwnershipLink::Class(&self.class_id)
    }
}
