// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class records. A class is the root of every ownership chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::ownership::{OwnedResource, OwnershipLink};
use super::super::paths::CLASSES;
use super::Record;

/// A class owned by exactly one teacher.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Class {
    /// Unique class identifier (UUID)
    pub id: String,
    /// Owning teacher. Set from the principal at creation and never changed.
    pub teacher_id: String,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a class. The owner is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Class {
    pub fn apply(&mut self, patch: ClassPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }
}

impl Record for Class {
    const COLLECTION: &'static str = CLASSES;
    const LABEL: &'static str = "Class";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for Class {
    fn ownership_link(&self) -> OwnershipLink<'_> {
        OwnershipLink::Teacher(&self.teacher_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn apply_patch_keeps_owner_and_bumps_timestamp() {
        let created = Utc::now();
        let mut class = Class {
            id: "c1".into(),
            teacher_id: "t1".into(),
            name: "Algebra".into(),
            description: None,
            created_at: created,
            updated_at: created,
        };

        let later = created + Duration::minutes(5);
        class.apply(
            ClassPatch {
                name: None,
                description: Some("Tuesdays".into()),
            },
            later,
        );

        assert_eq!(class.name, "Algebra");
        assert_eq!(class.description.as_deref(), Some("Tuesdays"));
        assert_eq!(class.teacher_id, "t1");
        assert_eq!(class.updated_at, later);
        assert_eq!(class.created_at, created);
    }
}
