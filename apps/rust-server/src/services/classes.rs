// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class service. Classes are the root of every ownership chain.

use chrono::Utc;
use tracing::info;

use super::{new_id, validation, ServiceResult};
use crate::access::{AccessGuard, ResourceType};
use crate::models::CreateClassRequest;
use crate::services::ServiceError;
use crate::storage::{Class, ClassPatch, ClassroomStore};

pub struct ClassService<'a> {
    store: &'a dyn ClassroomStore,
    guard: AccessGuard<'a>,
}

impl<'a> ClassService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    /// Create a class owned by `principal_id`.
    ///
    /// The owner is always the principal; the request has no owner field.
    pub fn create(&self, principal_id: &str, request: CreateClassRequest) -> ServiceResult<Class> {
        let name = validation::non_empty("name", &request.name)?;
        let now = Utc::now();

        let class = Class {
            id: new_id(),
            teacher_id: principal_id.to_string(),
            name,
            description: request.description,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_class(&class)?;

        info!(class_id = %class.id, teacher_id = %principal_id, "Class created");
        Ok(class)
    }

    /// Classes owned by `principal_id`.
    pub fn list(&self, principal_id: &str) -> ServiceResult<Vec<Class>> {
        Ok(self.store.list_classes_by_teacher(principal_id)?)
    }

    pub fn get(&self, principal_id: &str, class_id: &str) -> ServiceResult<Class> {
        self.guard.ensure(principal_id, ResourceType::Class, class_id)?;
        self.load(class_id)
    }

    pub fn update(
        &self,
        principal_id: &str,
        class_id: &str,
        patch: ClassPatch,
    ) -> ServiceResult<Class> {
        let patch = ClassPatch {
            name: validation::non_empty_opt("name", patch.name)?,
            description: patch.description,
        };

        self.guard.ensure(principal_id, ResourceType::Class, class_id)?;
        let mut class = self.load(class_id)?;
        class.apply(patch, Utc::now());
        self.store.update_class(&class)?;

        info!(class_id = %class_id, "Class updated");
        Ok(class)
    }

    /// Delete a class together with its sessions, enrollments and resources.
    pub fn delete(&self, principal_id: &str, class_id: &str) -> ServiceResult<()> {
        self.guard.ensure(principal_id, ResourceType::Class, class_id)?;
        self.store.delete_class(class_id)?;

        info!(class_id = %class_id, "Class deleted");
        Ok(())
    }

    // The row can vanish between the check and the read.
    fn load(&self, class_id: &str) -> ServiceResult<Class> {
        self.store
            .find_class(class_id)?
            .ok_or_else(|| ServiceError::not_found(format!("Class {class_id} not found")))
    }
}
