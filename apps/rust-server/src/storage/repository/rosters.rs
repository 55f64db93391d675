// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Roster repository (the teacher/student relation).
//!
//! A roster entry records that a teacher knows a student. It grants nothing
//! on classes: enrollment is governed by class ownership alone.
//!
//! ```text
//! rosters/{teacher_id}/{student_id}.json
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::paths::{is_safe_id, ROSTERS};
use super::super::{JsonStorage, StorageError, StorageResult};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RosterEntry {
    pub teacher_id: String,
    pub student_id: String,
    pub added_at: DateTime<Utc>,
}

/// Repository for roster membership.
pub struct RosterRepository<'a> {
    storage: &'a JsonStorage,
}

impl<'a> RosterRepository<'a> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self { storage }
    }

    /// Check if a student is on a teacher's roster.
    pub fn contains(&self, teacher_id: &str, student_id: &str) -> bool {
        is_safe_id(teacher_id)
            && is_safe_id(student_id)
            && self
                .storage
                .exists(self.storage.paths().roster_entry(teacher_id, student_id))
    }

    /// Add a roster entry.
    pub fn create(&self, entry: &RosterEntry) -> StorageResult<()> {
        for id in [&entry.teacher_id, &entry.student_id] {
            if !is_safe_id(id) {
                return Err(StorageError::InvalidId(id.clone()));
            }
        }

        if self.contains(&entry.teacher_id, &entry.student_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Student {} on roster of {}",
                entry.student_id, entry.teacher_id
            )));
        }

        self.storage.write_json(
            self.storage
                .paths()
                .roster_entry(&entry.teacher_id, &entry.student_id),
            entry,
        )
    }

    /// Remove a roster entry.
    pub fn delete(&self, teacher_id: &str, student_id: &str) -> StorageResult<()> {
        if !self.contains(teacher_id, student_id) {
            return Err(StorageError::NotFound(format!(
                "Student {student_id} on roster of {teacher_id}"
            )));
        }

        self.storage
            .delete(self.storage.paths().roster_entry(teacher_id, student_id))
    }

    /// All entries on one teacher's roster.
    pub fn list_by_teacher(&self, teacher_id: &str) -> StorageResult<Vec<RosterEntry>> {
        if !is_safe_id(teacher_id) {
            return Ok(Vec::new());
        }

        let student_ids = self
            .storage
            .list_files(self.storage.paths().roster_dir(teacher_id), "json")?;

        let mut entries = Vec::new();
        for student_id in student_ids {
            let path = self.storage.paths().roster_entry(teacher_id, &student_id);
            if let Some(entry) = self.storage.read_json_opt(path)? {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    /// Remove a student from every roster. Returns how many entries went.
    pub fn delete_student_everywhere(&self, student_id: &str) -> StorageResult<usize> {
        let teachers = self
            .storage
            .list_dirs(self.storage.paths().collection_dir(ROSTERS))?;

        let mut removed = 0;
        for teacher_id in teachers {
            if self.contains(&teacher_id, student_id) {
                self.delete(&teacher_id, student_id)?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
