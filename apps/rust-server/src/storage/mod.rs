// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for the classroom domain, one JSON file per row.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   classes/{class_id}.json
//!   sessions/{session_id}.json
//!   enrollments/{enrollment_id}.json
//!   resources/{resource_id}.json
//!   attendance/{attendance_id}.json
//!   students/{student_id}.json
//!   rosters/{teacher_id}/{student_id}.json
//! ```
//!
//! Everything above this module goes through the [`ClassroomStore`] trait;
//! the file layout is an implementation detail of [`FileStore`].

pub mod json_fs;
pub mod ownership;
pub mod paths;
pub mod repository;
pub mod store;

pub use json_fs::{JsonStorage, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipLink, ResourceType};
pub use paths::StoragePaths;
pub use repository::{
    Attendance, AttendancePatch, Class, ClassPatch, ClassSession, ClassSessionPatch, Enrollment,
    Resource, ResourcePatch, RosterEntry, Student,
};
pub use store::{ClassroomStore, FileStore};

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures shared by storage, access and service tests.

    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;

    pub fn temp_storage() -> (JsonStorage, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = JsonStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().expect("Failed to initialize storage");
        (storage, dir)
    }

    pub fn temp_store() -> (FileStore, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(StoragePaths::new(dir.path())).expect("Failed to open store");
        (store, dir)
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn seed_class(store: &dyn ClassroomStore, teacher_id: &str) -> Class {
        let now = Utc::now();
        let class = Class {
            id: new_id(),
            teacher_id: teacher_id.to_string(),
            name: "Reading club".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        store.insert_class(&class).expect("seed class");
        class
    }

    pub fn seed_student(store: &dyn ClassroomStore, name: &str) -> Student {
        let student = Student {
            id: new_id(),
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 9, 1).expect("valid date"),
            created_at: Utc::now(),
        };
        store.insert_student(&student).expect("seed student");
        student
    }

    pub fn seed_session(store: &dyn ClassroomStore, class_id: &str) -> ClassSession {
        let session = ClassSession {
            id: new_id(),
            class_id: class_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
            topic: Some("Phonics".to_string()),
            created_at: Utc::now(),
        };
        store.insert_session(&session).expect("seed session");
        session
    }

    pub fn seed_enrollment(
        store: &dyn ClassroomStore,
        class_id: &str,
        student_id: &str,
    ) -> Enrollment {
        let enrollment = Enrollment {
            id: new_id(),
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
            enrolled_at: Utc::now(),
        };
        store.insert_enrollment(&enrollment).expect("seed enrollment");
        enrollment
    }

    pub fn seed_resource(store: &dyn ClassroomStore, class_id: &str) -> Resource {
        let resource = Resource {
            id: new_id(),
            class_id: class_id.to_string(),
            resource: "https://example.org/worksheet.pdf".to_string(),
            title: Some("Worksheet".to_string()),
            age_min: Some(6),
            age_max: Some(8),
            created_at: Utc::now(),
        };
        store.insert_resource(&resource).expect("seed resource");
        resource
    }

    pub fn seed_attendance(
        store: &dyn ClassroomStore,
        session_id: &str,
        student_id: &str,
    ) -> Attendance {
        let attendance = Attendance {
            id: new_id(),
            class_session_id: session_id.to_string(),
            student_id: student_id.to_string(),
            present: true,
            recorded_at: Utc::now(),
        };
        store.insert_attendance(&attendance).expect("seed attendance");
        attendance
    }

    /// Every file under `root` with its contents, for "nothing was written"
    /// assertions.
    pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        fn walk(dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
            for entry in fs::read_dir(dir).expect("read dir") {
                let path = entry.expect("dir entry").path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.insert(path.clone(), fs::read(&path).expect("read file"));
                }
            }
        }

        let mut files = BTreeMap::new();
        walk(root, &mut files);
        files
    }
}
