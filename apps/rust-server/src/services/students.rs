// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Student and roster service.
//!
//! Students are shared rows. What a teacher may see is decided by their own
//! roster (a direct filter on `teacher_id`), never by the ownership chain,
//! and being on a roster grants nothing on classes.

use chrono::Utc;
use tracing::info;

use super::{new_id, validation, ServiceError, ServiceResult};
use crate::models::CreateStudentRequest;
use crate::storage::{ClassroomStore, RosterEntry, Student};

pub struct StudentService<'a> {
    store: &'a dyn ClassroomStore,
}

impl<'a> StudentService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self { store }
    }

    /// Create a student and put them on the principal's roster.
    pub fn create(
        &self,
        principal_id: &str,
        request: CreateStudentRequest,
    ) -> ServiceResult<Student> {
        // Checked up front: the roster insert comes after the student row.
        validation::principal_id(principal_id)?;
        let name = validation::non_empty("name", &request.name)?;
        validation::birth_date(request.birth_date, Utc::now().date_naive())?;

        let student = Student {
            id: new_id(),
            name,
            birth_date: request.birth_date,
            created_at: Utc::now(),
        };
        self.store.insert_student(&student)?;
        self.store.insert_roster_entry(&RosterEntry {
            teacher_id: principal_id.to_string(),
            student_id: student.id.clone(),
            added_at: student.created_at,
        })?;

        info!(student_id = %student.id, teacher_id = %principal_id, "Student created");
        Ok(student)
    }

    /// Students on the principal's roster.
    pub fn list(&self, principal_id: &str) -> ServiceResult<Vec<Student>> {
        let mut students = Vec::new();
        for entry in self.store.list_roster(principal_id)? {
            // Skip entries whose student was deleted mid-scan.
            if let Some(student) = self.store.find_student(&entry.student_id)? {
                students.push(student);
            }
        }
        Ok(students)
    }

    /// A student on the principal's roster.
    pub fn get(&self, principal_id: &str, student_id: &str) -> ServiceResult<Student> {
        let student = self.load(student_id)?;
        if !self.on_roster(principal_id, student_id)? {
            return Err(ServiceError::Forbidden(format!(
                "Student {student_id} is not on your roster"
            )));
        }
        Ok(student)
    }

    /// Put an existing student on the principal's roster.
    ///
    /// Idempotent: an existing entry is returned unchanged.
    pub fn add_to_roster(&self, principal_id: &str, student_id: &str) -> ServiceResult<RosterEntry> {
        validation::principal_id(principal_id)?;
        self.load(student_id)?;

        if let Some(entry) = self.roster_entry(principal_id, student_id)? {
            return Ok(entry);
        }

        let entry = RosterEntry {
            teacher_id: principal_id.to_string(),
            student_id: student_id.to_string(),
            added_at: Utc::now(),
        };
        self.store.insert_roster_entry(&entry)?;

        info!(student_id = %student_id, teacher_id = %principal_id, "Student added to roster");
        Ok(entry)
    }

    /// Take a student off the principal's roster. The student row stays.
    pub fn remove_from_roster(&self, principal_id: &str, student_id: &str) -> ServiceResult<()> {
        self.store.delete_roster_entry(principal_id, student_id)?;

        info!(student_id = %student_id, teacher_id = %principal_id, "Student removed from roster");
        Ok(())
    }

    /// Delete a student on the principal's roster, with their enrollments,
    /// attendance and roster entries everywhere.
    pub fn delete(&self, principal_id: &str, student_id: &str) -> ServiceResult<()> {
        self.get(principal_id, student_id)?;
        self.store.delete_student(student_id)?;

        info!(student_id = %student_id, deleted_by = %principal_id, "Student deleted");
        Ok(())
    }

    fn load(&self, student_id: &str) -> ServiceResult<Student> {
        self.store
            .find_student(student_id)?
            .ok_or_else(|| ServiceError::not_found(format!("Student {student_id} not found")))
    }

    fn roster_entry(&self, principal_id: &str, student_id: &str) -> ServiceResult<Option<RosterEntry>> {
        Ok(self
            .store
            .list_roster(principal_id)?
            .into_iter()
            .find(|entry| entry.student_id == student_id))
    }

    fn on_roster(&self, principal_id: &str, student_id: &str) -> ServiceResult<bool> {
        Ok(self.roster_entry(principal_id, student_id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::paths::STUDENTS;
    use crate::storage::test_support::{seed_class, seed_enrollment, snapshot, temp_store};
    use chrono::{Duration, NaiveDate};

    fn request(name: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2016, 4, 12).unwrap(),
        }
    }

    #[test]
    fn create_puts_student_on_own_roster_only() {
        let (store, _dir) = temp_store();
        let service = StudentService::new(&store);

        let ada = service.create("teacher-a", request("Ada")).unwrap();

        assert_eq!(service.list("teacher-a").unwrap(), vec![ada.clone()]);
        assert!(service.list("teacher-b").unwrap().is_empty());
        assert_eq!(service.get("teacher-a", &ada.id).unwrap(), ada);
        assert!(matches!(
            service.get("teacher-b", &ada.id),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            service.get("teacher-b", "xNOPE"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn create_validates_input() {
        let (store, _dir) = temp_store();
        let service = StudentService::new(&store);

        let mut future = request("Ada");
        future.birth_date = Utc::now().date_naive() + Duration::days(2);
        assert!(matches!(
            service.create("teacher-a", future),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create("teacher-a", request(" ")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn unusable_principal_id_creates_nothing() {
        let (store, dir) = temp_store();
        let service = StudentService::new(&store);
        let before = snapshot(dir.path());

        assert!(matches!(
            service.create("auth|org/teacher-1", request("Ada")),
            Err(ServiceError::Validation(_))
        ));

        assert_eq!(snapshot(dir.path()), before);
        assert!(store
            .storage()
            .list_files(dir.path().join(STUDENTS), "json")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn roster_add_is_idempotent_and_remove_keeps_student() {
        let (store, _dir) = temp_store();
        let service = StudentService::new(&store);
        let ada = service.create("teacher-a", request("Ada")).unwrap();

        let first = service.add_to_roster("teacher-b", &ada.id).unwrap();
        let again = service.add_to_roster("teacher-b", &ada.id).unwrap();
        assert_eq!(first, again);
        assert_eq!(service.list("teacher-b").unwrap(), vec![ada.clone()]);

        service.remove_from_roster("teacher-b", &ada.id).unwrap();
        assert!(service.list("teacher-b").unwrap().is_empty());
        assert!(store.find_student(&ada.id).unwrap().is_some());

        assert!(matches!(
            service.remove_from_roster("teacher-b", &ada.id),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.add_to_roster("teacher-b", "xNOPE"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn delete_requires_roster_membership_and_cascades() {
        let (store, _dir) = temp_store();
        let service = StudentService::new(&store);
        let ada = service.create("teacher-a", request("Ada")).unwrap();
        let class = seed_class(&store, "teacher-b");
        let enrollment = seed_enrollment(&store, &class.id, &ada.id);

        assert!(matches!(
            service.delete("teacher-b", &ada.id),
            Err(ServiceError::Forbidden(_))
        ));

        service.delete("teacher-a", &ada.id).unwrap();
        assert!(store.find_student(&ada.id).unwrap().is_none());
        assert!(store.find_enrollment(&enrollment.id).unwrap().is_none());
        assert!(service.list("teacher-a").unwrap().is_empty());
    }
}
