// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Teaching resource service.
//!
//! Resources are addressed as `/classes/{class_id}/resources/{resource_id}`.
//! Besides the ownership check, every operation on an existing resource
//! verifies that it really belongs to the class named in the path; a
//! mismatch is reported as not found.

use chrono::Utc;
use tracing::{info, warn};

use super::{new_id, validation, ServiceError, ServiceResult};
use crate::access::{AccessGuard, ResourceType};
use crate::models::CreateResourceRequest;
use crate::storage::{ClassroomStore, Resource, ResourcePatch};

pub struct ResourceService<'a> {
    store: &'a dyn ClassroomStore,
    guard: AccessGuard<'a>,
}

impl<'a> ResourceService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    pub fn create(
        &self,
        principal_id: &str,
        class_id: &str,
        request: CreateResourceRequest,
    ) -> ServiceResult<Resource> {
        let url = validation::resource_url(&request.resource)?;
        let title = validation::non_empty_opt("title", request.title)?;
        validation::age_range(request.age_min, request.age_max)?;

        self.guard.ensure_parent(principal_id, class_id)?;

        let resource = Resource {
            id: new_id(),
            class_id: class_id.to_string(),
            resource: url,
            title,
            age_min: request.age_min,
            age_max: request.age_max,
            created_at: Utc::now(),
        };
        self.store.insert_resource(&resource)?;

        info!(resource_id = %resource.id, class_id = %class_id, "Resource created");
        Ok(resource)
    }

    pub fn list(&self, principal_id: &str, class_id: &str) -> ServiceResult<Vec<Resource>> {
        self.guard.ensure_parent(principal_id, class_id)?;
        Ok(self.store.list_resources_by_class(class_id)?)
    }

    pub fn get(
        &self,
        principal_id: &str,
        class_id: &str,
        resource_id: &str,
    ) -> ServiceResult<Resource> {
        self.authorized_in_class(principal_id, class_id, resource_id)
    }

    pub fn update(
        &self,
        principal_id: &str,
        class_id: &str,
        resource_id: &str,
        patch: ResourcePatch,
    ) -> ServiceResult<Resource> {
        let patch = ResourcePatch {
            resource: patch
                .resource
                .map(|url| validation::resource_url(&url))
                .transpose()?,
            title: validation::non_empty_opt("title", patch.title)?,
            ..patch
        };

        let mut resource = self.authorized_in_class(principal_id, class_id, resource_id)?;
        resource.apply(patch);
        // Checked on the merged row: a patch may move only one bound.
        validation::age_range(resource.age_min, resource.age_max)?;
        self.store.update_resource(&resource)?;

        info!(resource_id = %resource_id, "Resource updated");
        Ok(resource)
    }

    pub fn delete(&self, principal_id: &str, class_id: &str, resource_id: &str) -> ServiceResult<()> {
        self.authorized_in_class(principal_id, class_id, resource_id)?;
        self.store.delete_resource(resource_id)?;

        info!(resource_id = %resource_id, "Resource deleted");
        Ok(())
    }

    /// Self-gated load plus the path class check.
    fn authorized_in_class(
        &self,
        principal_id: &str,
        class_id: &str,
        resource_id: &str,
    ) -> ServiceResult<Resource> {
        self.guard
            .ensure(principal_id, ResourceType::Resource, resource_id)?;

        let not_found = || {
            ServiceError::not_found(format!(
                "Resource {resource_id} not found in class {class_id}"
            ))
        };
        let resource = self.store.find_resource(resource_id)?.ok_or_else(not_found)?;

        if resource.class_id != class_id {
            warn!(
                resource_id = %resource_id,
                path_class_id = %class_id,
                actual_class_id = %resource.class_id,
                "Resource addressed through the wrong class"
            );
            return Err(not_found());
        }

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{seed_class, snapshot, temp_store};

    fn request(url: &str) -> CreateResourceRequest {
        CreateResourceRequest {
            resource: url.to_string(),
            title: Some("Number line".into()),
            age_min: Some(6),
            age_max: Some(9),
        }
    }

    #[test]
    fn owner_creates_and_reads_resource() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let service = ResourceService::new(&store);

        let resource = service
            .create("teacher-a", &class.id, request("https://example.org/line.pdf"))
            .unwrap();

        assert_eq!(
            service.get("teacher-a", &class.id, &resource.id).unwrap(),
            resource
        );
        assert_eq!(service.list("teacher-a", &class.id).unwrap(), vec![resource]);
    }

    #[test]
    fn invalid_input_is_rejected_before_any_write() {
        let (store, dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let service = ResourceService::new(&store);
        let before = snapshot(dir.path());

        let bad_url = service.create("teacher-a", &class.id, request("not a url"));
        assert!(matches!(bad_url, Err(ServiceError::Validation(_))));

        let mut inverted = request("https://example.org/line.pdf");
        inverted.age_min = Some(10);
        let bad_range = service.create("teacher-a", &class.id, inverted);
        assert!(matches!(bad_range, Err(ServiceError::Validation(_))));

        let forbidden =
            service.create("teacher-b", &class.id, request("https://example.org/line.pdf"));
        assert!(matches!(forbidden, Err(ServiceError::Forbidden(_))));

        assert_eq!(snapshot(dir.path()), before);
    }

    #[test]
    fn resource_must_belong_to_the_path_class() {
        let (store, _dir) = temp_store();
        let c1 = seed_class(&store, "teacher-a");
        let c2 = seed_class(&store, "teacher-a");
        let service = ResourceService::new(&store);
        let resource = service
            .create("teacher-a", &c1.id, request("https://example.org/line.pdf"))
            .unwrap();

        assert!(matches!(
            service.get("teacher-a", &c2.id, &resource.id),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.update("teacher-a", &c2.id, &resource.id, ResourcePatch::default()),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete("teacher-a", &c2.id, &resource.id),
            Err(ServiceError::NotFound(_))
        ));
        assert!(store.find_resource(&resource.id).unwrap().is_some());
    }

    #[test]
    fn update_checks_merged_age_range() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let service = ResourceService::new(&store);
        let resource = service
            .create("teacher-a", &class.id, request("https://example.org/line.pdf"))
            .unwrap();

        let lower_max = ResourcePatch {
            age_max: Some(4),
            ..ResourcePatch::default()
        };
        assert!(matches!(
            service.update("teacher-a", &class.id, &resource.id, lower_max),
            Err(ServiceError::Validation(_))
        ));

        let retitle = ResourcePatch {
            title: Some("Fractions".into()),
            ..ResourcePatch::default()
        };
        let updated = service
            .update("teacher-a", &class.id, &resource.id, retitle)
            .unwrap();
        assert_eq!(updated.title.as_deref(), Some("Fractions"));
        assert_eq!(updated.age_max, Some(9));
    }

    #[test]
    fn other_teacher_is_forbidden_even_with_the_right_path() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let service = ResourceService::new(&store);
        let resource = service
            .create("teacher-a", &class.id, request("https://example.org/line.pdf"))
            .unwrap();

        assert!(matches!(
            service.delete("teacher-b", &class.id, &resource.id),
            Err(ServiceError::Forbidden(_))
        ));
        service.delete("teacher-a", &class.id, &resource.id).unwrap();
        assert!(store.find_resource(&resource.id).unwrap().is_none());
    }
}
