// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership resolution: from any guarded row to the teacher who owns it.
//!
//! The reference graph is a fixed-depth tree rooted at classes:
//!
//! ```text
//! Attendance -> ClassSession -> Class -> teacher_id
//! Enrollment ----------------> Class
//! Resource ------------------> Class
//! ```
//!
//! Each hop is one point read through [`ClassroomStore`]. Nothing here
//! writes, so resolution is safe to run speculatively.

use tracing::trace;

use crate::storage::{ClassroomStore, OwnedResource, OwnershipLink, ResourceType, StorageResult};

/// Walks ownership links to the owning teacher id.
#[derive(Clone, Copy)]
pub struct OwnershipResolver<'a> {
    store: &'a dyn ClassroomStore,
}

impl<'a> OwnershipResolver<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self { store }
    }

    /// Resolve the teacher that owns `id`.
    ///
    /// Returns `Ok(None)` when the row, or any row on its chain, is missing.
    pub fn resolve_owner(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> StorageResult<Option<String>> {
        trace!(%resource_type, id, "Resolving owner");

        match resource_type {
            ResourceType::Class => self.owner_of(self.store.find_class(id)?),
            ResourceType::ClassSession => self.owner_of(self.store.find_session(id)?),
            ResourceType::Enrollment => self.owner_of(self.store.find_enrollment(id)?),
            ResourceType::Resource => self.owner_of(self.store.find_resource(id)?),
            ResourceType::Attendance => self.owner_of(self.store.find_attendance(id)?),
        }
    }

    fn owner_of<T: OwnedResource>(&self, row: Option<T>) -> StorageResult<Option<String>> {
        match row {
            Some(row) => self.follow(row.ownership_link()),
            None => Ok(None),
        }
    }

    fn follow(&self, link: OwnershipLink<'_>) -> StorageResult<Option<String>> {
        match link {
            OwnershipLink::Teacher(teacher_id) => Ok(Some(teacher_id.to_string())),
            OwnershipLink::Class(class_id) => self.resolve_owner(ResourceType::Class, class_id),
            OwnershipLink::Session(session_id) => {
                self.resolve_owner(ResourceType::ClassSession, session_id)
            }
        }
    }
}
