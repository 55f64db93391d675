// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Data-access interface consumed by the resolver and the domain services.
//!
//! [`ClassroomStore`] is the only way the rest of the crate touches
//! persisted state. [`FileStore`] implements it on top of [`JsonStorage`],
//! and is where referential integrity and cascading deletes live.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::repository::{
    Attendance, Class, ClassSession, Enrollment, Repository, Resource, RosterEntry,
    RosterRepository, Student,
};
use super::{JsonStorage, StorageError, StoragePaths, StorageResult};

/// Point reads, filtered lists and per-entity writes.
///
/// Point reads return `Ok(None)` for rows that do not exist. Writes report
/// integrity violations as [`StorageError::AlreadyExists`] (uniqueness) or
/// [`StorageError::ForeignKey`] (missing referenced row), ids that cannot
/// name a file as [`StorageError::InvalidId`], and writes against a row that
/// vanished as [`StorageError::NotFound`].
pub trait ClassroomStore: Send + Sync {
    // ========== Point reads ==========

    fn find_class(&self, id: &str) -> StorageResult<Option<Class>>;
    fn find_session(&self, id: &str) -> StorageResult<Option<ClassSession>>;
    fn find_enrollment(&self, id: &str) -> StorageResult<Option<Enrollment>>;
    fn find_resource(&self, id: &str) -> StorageResult<Option<Resource>>;
    fn find_attendance(&self, id: &str) -> StorageResult<Option<Attendance>>;
    fn find_student(&self, id: &str) -> StorageResult<Option<Student>>;

    // ========== Filtered lists ==========

    fn list_classes_by_teacher(&self, teacher_id: &str) -> StorageResult<Vec<Class>>;
    fn list_sessions_by_class(&self, class_id: &str) -> StorageResult<Vec<ClassSession>>;
    fn list_enrollments_by_class(&self, class_id: &str) -> StorageResult<Vec<Enrollment>>;
    fn list_resources_by_class(&self, class_id: &str) -> StorageResult<Vec<Resource>>;
    fn list_attendance_by_session(&self, session_id: &str) -> StorageResult<Vec<Attendance>>;
    fn list_roster(&self, teacher_id: &str) -> StorageResult<Vec<RosterEntry>>;

    // ========== Writes ==========

    fn insert_class(&self, class: &Class) -> StorageResult<()>;
    fn update_class(&self, class: &Class) -> StorageResult<()>;
    /// Cascades to sessions (and their attendance), enrollments and resources.
    fn delete_class(&self, id: &str) -> StorageResult<()>;

    fn insert_session(&self, session: &ClassSession) -> StorageResult<()>;
    fn update_session(&self, session: &ClassSession) -> StorageResult<()>;
    /// Cascades to the session's attendance.
    fn delete_session(&self, id: &str) -> StorageResult<()>;

    fn insert_enrollment(&self, enrollment: &Enrollment) -> StorageResult<()>;
    fn delete_enrollment(&self, id: &str) -> StorageResult<()>;

    fn insert_resource(&self, resource: &Resource) -> StorageResult<()>;
    fn update_resource(&self, resource: &Resource) -> StorageResult<()>;
    fn delete_resource(&self, id: &str) -> StorageResult<()>;

    fn insert_attendance(&self, attendance: &Attendance) -> StorageResult<()>;
    fn update_attendance(&self, attendance: &Attendance) -> StorageResult<()>;
    fn delete_attendance(&self, id: &str) -> StorageResult<()>;

    fn insert_student(&self, student: &Student) -> StorageResult<()>;
    /// Cascades to enrollments, attendance and roster entries of the student.
    fn delete_student(&self, id: &str) -> StorageResult<()>;

    fn insert_roster_entry(&self, entry: &RosterEntry) -> StorageResult<()>;
    fn delete_roster_entry(&self, teacher_id: &str, student_id: &str) -> StorageResult<()>;

    /// Verify the backing store is usable.
    fn health_check(&self) -> StorageResult<()>;
}

/// [`ClassroomStore`] backed by JSON files.
///
/// Writes are serialized through a process-local lock so that
/// check-then-insert sequences (uniqueness, foreign keys, cascades) cannot
/// interleave. Reads never take the lock.
#[derive(Debug)]
pub struct FileStore {
    storage: JsonStorage,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `paths`.
    pub fn open(paths: StoragePaths) -> StorageResult<Self> {
        let mut storage = JsonStorage::new(paths);
        storage.initialize()?;
        Ok(Self {
            storage,
            write_lock: Mutex::new(()),
        })
    }

    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn classes(&self) -> Repository<'_, Class> {
        Repository::new(&self.storage)
    }

    fn sessions(&self) -> Repository<'_, ClassSession> {
        Repository::new(&self.storage)
    }

    fn enrollments(&self) -> Repository<'_, Enrollment> {
        Repository::new(&self.storage)
    }

    fn resources(&self) -> Repository<'_, Resource> {
        Repository::new(&self.storage)
    }

    fn attendance(&self) -> Repository<'_, Attendance> {
        Repository::new(&self.storage)
    }

    fn students(&self) -> Repository<'_, Student> {
        Repository::new(&self.storage)
    }

    fn rosters(&self) -> RosterRepository<'_> {
        RosterRepository::new(&self.storage)
    }

    fn require_student(&self, student_id: &str) -> StorageResult<()> {
        if self.students().exists(student_id) {
            Ok(())
        } else {
            Err(StorageError::ForeignKey(format!("Student {student_id}")))
        }
    }

    fn require_class(&self, class_id: &str) -> StorageResult<()> {
        if self.classes().exists(class_id) {
            Ok(())
        } else {
            Err(StorageError::ForeignKey(format!("Class {class_id}")))
        }
    }

    /// Delete a session and its attendance. Caller holds the write lock.
    fn remove_session_cascade(&self, session_id: &str) -> StorageResult<()> {
        let attendance = self
            .attendance()
            .list_where(|a| a.class_session_id == session_id)?;
        for record in &attendance {
            self.attendance().delete(&record.id)?;
        }
        self.sessions().delete(session_id)?;

        debug!(
            session_id = %session_id,
            attendance = attendance.len(),
            "Deleted class session with dependents"
        );
        Ok(())
    }
}

impl ClassroomStore for FileStore {
    fn find_class(&self, id: &str) -> StorageResult<Option<Class>> {
        self.classes().find(id)
    }

    fn find_session(&self, id: &str) -> StorageResult<Option<ClassSession>> {
        self.sessions().find(id)
    }

    fn find_enrollment(&self, id: &str) -> StorageResult<Option<Enrollment>> {
        self.enrollments().find(id)
    }

    fn find_resource(&self, id: &str) -> StorageResult<Option<Resource>> {
        self.resources().find(id)
    }

    fn find_attendance(&self, id: &str) -> StorageResult<Option<Attendance>> {
        self.attendance().find(id)
    }

    fn find_student(&self, id: &str) -> StorageResult<Option<Student>> {
        self.students().find(id)
    }

    fn list_classes_by_teacher(&self, teacher_id: &str) -> StorageResult<Vec<Class>> {
        self.classes().list_where(|c| c.teacher_id == teacher_id)
    }

    fn list_sessions_by_class(&self, class_id: &str) -> StorageResult<Vec<ClassSession>> {
        let mut sessions = self.sessions().list_where(|s| s.class_id == class_id)?;
        sessions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(sessions)
    }

    fn list_enrollments_by_class(&self, class_id: &str) -> StorageResult<Vec<Enrollment>> {
        self.enrollments().list_where(|e| e.class_id == class_id)
    }

    fn list_resources_by_class(&self, class_id: &str) -> StorageResult<Vec<Resource>> {
        self.resources().list_where(|r| r.class_id == class_id)
    }

    fn list_attendance_by_session(&self, session_id: &str) -> StorageResult<Vec<Attendance>> {
        self.attendance()
            .list_where(|a| a.class_session_id == session_id)
    }

    fn list_roster(&self, teacher_id: &str) -> StorageResult<Vec<RosterEntry>> {
        self.rosters().list_by_teacher(teacher_id)
    }

    fn insert_class(&self, class: &Class) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.classes().create(class)
    }

    fn update_class(&self, class: &Class) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.classes().update(class)
    }

    fn delete_class(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;

        if !self.classes().exists(id) {
            return Err(StorageError::NotFound(format!("Class {id}")));
        }

        for session in self.sessions().list_where(|s| s.class_id == id)? {
            self.remove_session_cascade(&session.id)?;
        }
        for enrollment in self.enrollments().list_where(|e| e.class_id == id)? {
            self.enrollments().delete(&enrollment.id)?;
        }
        for resource in self.resources().list_where(|r| r.class_id == id)? {
            self.resources().delete(&resource.id)?;
        }

        self.classes().delete(id)
    }

    fn insert_session(&self, session: &ClassSession) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.require_class(&session.class_id)?;
        self.sessions().create(session)
    }

    fn update_session(&self, session: &ClassSession) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.sessions().update(session)
    }

    fn delete_session(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;

        if !self.sessions().exists(id) {
            return Err(StorageError::NotFound(format!("Class session {id}")));
        }
        self.remove_session_cascade(id)
    }

    fn insert_enrollment(&self, enrollment: &Enrollment) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.require_class(&enrollment.class_id)?;
        self.require_student(&enrollment.student_id)?;

        let duplicate = self
            .enrollments()
            .list_where(|e| e.same_pair(enrollment))?;
        if !duplicate.is_empty() {
            return Err(StorageError::AlreadyExists(format!(
                "Enrollment of student {} in class {}",
                enrollment.student_id, enrollment.class_id
            )));
        }

        self.enrollments().create(enrollment)
    }

    fn delete_enrollment(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.enrollments().delete(id)
    }

    fn insert_resource(&self, resource: &Resource) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.require_class(&resource.class_id)?;
        self.resources().create(resource)
    }

    fn update_resource(&self, resource: &Resource) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.resources().update(resource)
    }

    fn delete_resource(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.resources().delete(id)
    }

    fn insert_attendance(&self, attendance: &Attendance) -> StorageResult<()> {
        let _guard = self.lock()?;

        if !self.sessions().exists(&attendance.class_session_id) {
            return Err(StorageError::ForeignKey(format!(
                "Class session {}",
                attendance.class_session_id
            )));
        }
        self.require_student(&attendance.student_id)?;

        let duplicate = self
            .attendance()
            .list_where(|a| a.same_pair(attendance))?;
        if !duplicate.is_empty() {
            return Err(StorageError::AlreadyExists(format!(
                "Attendance of student {} at session {}",
                attendance.student_id, attendance.class_session_id
            )));
        }

        self.attendance().create(attendance)
    }

    fn update_attendance(&self, attendance: &Attendance) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.attendance().update(attendance)
    }

    fn delete_attendance(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.attendance().delete(id)
    }

    fn insert_student(&self, student: &Student) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.students().create(student)
    }

    fn delete_student(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;

        if !self.students().exists(id) {
            return Err(StorageError::NotFound(format!("Student {id}")));
        }

        let enrollments = self.enrollments().list_where(|e| e.student_id == id)?;
        for enrollment in &enrollments {
            self.enrollments().delete(&enrollment.id)?;
        }
        let attendance = self.attendance().list_where(|a| a.student_id == id)?;
        for record in &attendance {
            self.attendance().delete(&record.id)?;
        }
        let rosters = self.rosters().delete_student_everywhere(id)?;

        self.students().delete(id)?;

        debug!(
            student_id = %id,
            enrollments = enrollments.len(),
            attendance = attendance.len(),
            rosters,
            "Deleted student with dependents"
        );
        Ok(())
    }

    fn insert_roster_entry(&self, entry: &RosterEntry) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.require_student(&entry.student_id)?;
        self.rosters().create(entry)
    }

    fn delete_roster_entry(&self, teacher_id: &str, student_id: &str) -> StorageResult<()> {
        let _guard = self.lock()?;
        self.rosters().delete(teacher_id, student_id)
    }

    fn health_check(&self) -> StorageResult<()> {
        self.storage.health_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{
        seed_attendance, seed_class, seed_enrollment, seed_resource, seed_session,
        seed_student, temp_store,
    };
    use chrono::Utc;

    #[test]
    fn duplicate_enrollment_is_a_uniqueness_violation() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");
        let student = seed_student(&store, "Ada");
        seed_enrollment(&store, &class.id, &student.id);

        let again = Enrollment {
            id: uuid::Uuid::new_v4().to_string(),
            class_id: class.id.clone(),
            student_id: student.id.clone(),
            enrolled_at: Utc::now(),
        };
        let result = store.insert_enrollment(&again);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
        assert_eq!(store.list_enrollments_by_class(&class.id).unwrap().len(), 1);
    }

    #[test]
    fn enrollment_requires_existing_student() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");

        let enrollment = Enrollment {
            id: "e1".into(),
            class_id: class.id.clone(),
            student_id: "missing".into(),
            enrolled_at: Utc::now(),
        };
        let result = store.insert_enrollment(&enrollment);
        assert!(matches!(result, Err(StorageError::ForeignKey(_))));
    }

    #[test]
    fn attendance_requires_existing_session() {
        let (store, _dir) = temp_store();
        let student = seed_student(&store, "Ada");

        let record = Attendance {
            id: "a1".into(),
            class_session_id: "missing".into(),
            student_id: student.id.clone(),
            present: true,
            recorded_at: Utc::now(),
        };
        let result = store.insert_attendance(&record);
        assert!(matches!(result, Err(StorageError::ForeignKey(_))));
    }

    #[test]
    fn deleting_class_cascades_to_children() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");
        let other = seed_class(&store, "t1");
        let student = seed_student(&store, "Ada");
        let session = seed_session(&store, &class.id);
        let kept_session = seed_session(&store, &other.id);
        let enrollment = seed_enrollment(&store, &class.id, &student.id);
        let resource = seed_resource(&store, &class.id);
        let attendance = seed_attendance(&store, &session.id, &student.id);

        store.delete_class(&class.id).unwrap();

        assert!(store.find_class(&class.id).unwrap().is_none());
        assert!(store.find_session(&session.id).unwrap().is_none());
        assert!(store.find_enrollment(&enrollment.id).unwrap().is_none());
        assert!(store.find_resource(&resource.id).unwrap().is_none());
        assert!(store.find_attendance(&attendance.id).unwrap().is_none());

        assert!(store.find_class(&other.id).unwrap().is_some());
        assert!(store.find_session(&kept_session.id).unwrap().is_some());
        assert!(store.find_student(&student.id).unwrap().is_some());
    }

    #[test]
    fn deleting_student_cascades_to_dependents() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");
        let student = seed_student(&store, "Ada");
        let session = seed_session(&store, &class.id);
        let enrollment = seed_enrollment(&store, &class.id, &student.id);
        let attendance = seed_attendance(&store, &session.id, &student.id);
        store
            .insert_roster_entry(&RosterEntry {
                teacher_id: "t1".into(),
                student_id: student.id.clone(),
                added_at: Utc::now(),
            })
            .unwrap();

        store.delete_student(&student.id).unwrap();

        assert!(store.find_student(&student.id).unwrap().is_none());
        assert!(store.find_enrollment(&enrollment.id).unwrap().is_none());
        assert!(store.find_attendance(&attendance.id).unwrap().is_none());
        assert!(store.list_roster("t1").unwrap().is_empty());
        assert!(store.find_session(&session.id).unwrap().is_some());
    }

    #[test]
    fn sessions_are_listed_by_date() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");

        let mut later = seed_session(&store, &class.id);
        later.date = later.date.succ_opt().unwrap();
        store.update_session(&later).unwrap();
        let earlier = seed_session(&store, &class.id);

        let ids: Vec<String> = store
            .list_sessions_by_class(&class.id)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![earlier.id, later.id]);
    }

    #[test]
    fn update_of_vanished_row_is_not_found() {
        let (store, _dir) = temp_store();
        let class = seed_class(&store, "t1");
        store.delete_class(&class.id).unwrap();

        let result = store.update_class(&class);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
