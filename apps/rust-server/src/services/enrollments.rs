// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Enrollment service.
//!
//! Enrolling a student is gated on the target class, not on the enrollment
//! (which does not exist yet) and not on the teacher's roster. A teacher who
//! knows a student still cannot enroll them into someone else's class.

use chrono::Utc;
use tracing::info;

use super::{new_id, ServiceError, ServiceResult};
use crate::access::{AccessGuard, ResourceType};
use crate::models::CreateEnrollmentRequest;
use crate::storage::{ClassroomStore, Enrollment};

pub struct EnrollmentService<'a> {
    store: &'a dyn ClassroomStore,
    guard: AccessGuard<'a>,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    pub fn create(
        &self,
        principal_id: &str,
        request: CreateEnrollmentRequest,
    ) -> ServiceResult<Enrollment> {
        self.guard.ensure_parent(principal_id, &request.class_id)?;

        let enrollment = Enrollment {
            id: new_id(),
            class_id: request.class_id,
            student_id: request.student_id,
            enrolled_at: Utc::now(),
        };
        self.store.insert_enrollment(&enrollment)?;

        info!(
            enrollment_id = %enrollment.id,
            class_id = %enrollment.class_id,
            student_id = %enrollment.student_id,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    pub fn list(&self, principal_id: &str, class_id: &str) -> ServiceResult<Vec<Enrollment>> {
        self.guard.ensure_parent(principal_id, class_id)?;
        Ok(self.store.list_enrollments_by_class(class_id)?)
    }

    /// Remove an enrollment.
    ///
    /// Ownership is checked by reading the enrollment's class directly (one
    /// hop) which is equivalent to resolving the enrollment itself.
    pub fn delete(&self, principal_id: &str, enrollment_id: &str) -> ServiceResult<()> {
        let enrollment = self.store.find_enrollment(enrollment_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("Enrollment {enrollment_id} not found"))
        })?;

        // A missing class here means a concurrent class delete orphaned the
        // row; report the enrollment as not found.
        self.guard
            .authorize_parent(principal_id, &enrollment.class_id)?
            .require(ResourceType::Enrollment, enrollment_id)?;

        self.store.delete_enrollment(enrollment_id)?;

        info!(enrollment_id = %enrollment_id, "Enrollment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{seed_class, seed_student, snapshot, temp_store};
    use crate::storage::RosterEntry;

    fn request(class_id: &str, student_id: &str) -> CreateEnrollmentRequest {
        CreateEnrollmentRequest {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
        }
    }

    #[test]
    fn owner_enrolls_student() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let student = seed_student(&store, "st1");
        let service = EnrollmentService::new(&store);

        let enrollment = service
            .create("teacher-a", request(&class.id, &student.id))
            .unwrap();

        assert_eq!(service.list("teacher-a", &class.id).unwrap(), vec![enrollment]);
    }

    #[test]
    fn roster_membership_does_not_grant_enrollment_rights() {
        let (store, dir) = temp_store();
        let c1 = seed_class(&store, "teacher-a");
        let _c2 = seed_class(&store, "teacher-b");
        let st1 = seed_student(&store, "st1");
        let service = EnrollmentService::new(&store);
        service.create("teacher-a", request(&c1.id, &st1.id)).unwrap();
        store
            .insert_roster_entry(&RosterEntry {
                teacher_id: "teacher-b".into(),
                student_id: st1.id.clone(),
                added_at: Utc::now(),
            })
            .unwrap();
        let before = snapshot(dir.path());

        let result = service.create("teacher-b", request(&c1.id, &st1.id));

        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
        assert_eq!(snapshot(dir.path()), before);
    }

    #[test]
    fn duplicate_enrollment_is_a_conflict_not_an_auth_failure() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let student = seed_student(&store, "st1");
        let service = EnrollmentService::new(&store);
        service
            .create("teacher-a", request(&class.id, &student.id))
            .unwrap();

        let result = service.create("teacher-a", request(&class.id, &student.id));
        assert!(matches!(result, Err(ServiceError::Conflict(_))));

        let missing_student = service.create("teacher-a", request(&class.id, "ghost"));
        assert!(matches!(missing_student, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn delete_is_gated_on_the_enrollment_class() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "teacher-a");
        let student = seed_student(&store, "st1");
        let service = EnrollmentService::new(&store);
        let enrollment = service
            .create("teacher-a", request(&class.id, &student.id))
            .unwrap();

        assert!(matches!(
            service.delete("teacher-b", &enrollment.id),
            Err(ServiceError::Forbidden(ref m)) if m.starts_with("Enrollment")
        ));
        assert!(matches!(
            service.delete("teacher-b", "xNOPE"),
            Err(ServiceError::NotFound(_))
        ));

        service.delete("teacher-a", &enrollment.id).unwrap();
        assert!(store.find_enrollment(&enrollment.id).unwrap().is_none());
    }
}
