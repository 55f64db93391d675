// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the on-disk storage layout.

use std::path::{Path, PathBuf};

/// Default base directory for persistent storage.
pub const DATA_ROOT: &str = "./data";

/// Collection directory names, one per entity table.
pub const CLASSES: &str = "classes";
pub const SESSIONS: &str = "sessions";
pub const ENROLLMENTS: &str = "enrollments";
pub const RESOURCES: &str = "resources";
pub const ATTENDANCE: &str = "attendance";
pub const STUDENTS: &str = "students";
pub const ROSTERS: &str = "rosters";

/// Every collection created by `JsonStorage::initialize`.
pub const COLLECTIONS: [&str; 7] = [
    CLASSES,
    SESSIONS,
    ENROLLMENTS,
    RESOURCES,
    ATTENDANCE,
    STUDENTS,
    ROSTERS,
];

/// Whether an identifier can be used as a single path component.
///
/// Ids arrive from request paths, so anything that could escape the
/// collection directory is treated as an id that cannot exist.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one collection.
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// Path to a single record file inside a collection.
    pub fn record(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    // ========== Roster Paths ==========

    /// Directory with one file per student on a teacher's roster.
    pub fn roster_dir(&self, teacher_id: &str) -> PathBuf {
        self.collection_dir(ROSTERS).join(teacher_id)
    }

    /// Path to a roster membership file.
    pub fn roster_entry(&self, teacher_id: &str, student_id: &str) -> PathBuf {
        self.roster_dir(teacher_id).join(format!("{student_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn record_paths_are_correct() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(
            paths.record(CLASSES, "c1"),
            PathBuf::from("/tmp/test-data/classes/c1.json")
        );
        assert_eq!(
            paths.record(ATTENDANCE, "a1"),
            PathBuf::from("/tmp/test-data/attendance/a1.json")
        );
    }

    #[test]
    fn roster_paths_are_nested_per_teacher() {
        let paths = StoragePaths::new("/srv");
        assert_eq!(paths.roster_dir("t1"), PathBuf::from("/srv/rosters/t1"));
        assert_eq!(
            paths.roster_entry("t1", "s9"),
            PathBuf::from("/srv/rosters/t1/s9.json")
        );
    }

    #[test]
    fn unsafe_ids_are_rejected() {
        assert!(is_safe_id("0b7c2f5e-1d3a-4c1e-9d8e-2f6a7b8c9d0e"));
        assert!(is_safe_id("xNOPE"));
        assert!(!is_safe_id(""));
        assert!(!is_safe_id(".."));
        assert!(!is_safe_id("../classes/c1"));
        assert!(!is_safe_id("a\\b"));
    }
}
