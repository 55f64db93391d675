// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Teaching resources attached to a class (links to external material).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::ownership::{OwnedResource, OwnershipLink};
use super::super::paths::RESOURCES;
use super::Record;

/// A link to teaching material, optionally tagged with a target age range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub class_id: String,
    /// Absolute URL of the material
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a resource. The parent class is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResourcePatch {
    pub resource: Option<String>,
    pub title: Option<String>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
}

impl Resource {
    pub fn apply(&mut self, patch: ResourcePatch) {
        if let Some(resource) = patch.resource {
            self.resource = resource;
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(age_min) = patch.age_min {
            self.age_min = Some(age_min);
        }
        if let Some(age_max) = patch.age_max {
            self.age_max = Some(age_max);
        }
    }
}

impl Record for Resource {
    const COLLECTION: &'static str = RESOURCES;
    const LABEL: &'static str = "Resource";

    fn id(&self) -> &str {
        &self.id
    }
}

impl OwnedResource for Resource {
    fn ownership_link(&self) -> OwnershipLink<'_> {
        OwnershipLink::Class(&self.class_id)
    }
}
