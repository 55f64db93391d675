// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to JSON storage.
//!
//! Every entity except roster entries is keyed by its own id and stored as
//! `{collection}/{id}.json`, so a single generic [`Repository`] covers them.
//! Roster entries are keyed by the `(teacher, student)` pair and have their
//! own [`RosterRepository`].

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use super::paths::is_safe_id;
use super::{JsonStorage, StorageError, StorageResult};

pub mod attendance;
pub mod classes;
pub mod enrollments;
pub mod resources;
pub mod rosters;
pub mod sessions;
pub mod students;

pub use attendance::{Attendance, AttendancePatch};
pub use classes::{Class, ClassPatch};
pub use enrollments::Enrollment;
pub use resources::{Resource, ResourcePatch};
pub use rosters::{RosterEntry, RosterRepository};
pub use sessions::{ClassSession, ClassSessionPatch};
pub use students::Student;

/// A row stored as one JSON file in a collection directory.
pub trait Record: Serialize + DeserializeOwned {
    /// Collection directory name.
    const COLLECTION: &'static str;
    /// Human-readable entity name used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// Generic repository over one collection.
pub struct Repository<'a, T> {
    storage: &'a JsonStorage,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Repository<'a, T> {
    pub fn new(storage: &'a JsonStorage) -> Self {
        Self {
            storage,
            _record: PhantomData,
        }
    }

    /// Check if a record exists.
    pub fn exists(&self, id: &str) -> bool {
        is_safe_id(id)
            && self
                .storage
                .exists(self.storage.paths().record(T::COLLECTION, id))
    }

    /// Point read. Ids that cannot name a file read as absent.
    pub fn find(&self, id: &str) -> StorageResult<Option<T>> {
        if !is_safe_id(id) {
            return Ok(None);
        }
        self.storage
            .read_json_opt(self.storage.paths().record(T::COLLECTION, id))
    }

    /// Insert a new record.
    pub fn create(&self, record: &T) -> StorageResult<()> {
        let id = record.id();

        if !is_safe_id(id) {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        if self.exists(id) {
            return Err(StorageError::AlreadyExists(format!("{} {id}", T::LABEL)));
        }

        self.storage
            .write_json(self.storage.paths().record(T::COLLECTION, id), record)
    }

    /// Overwrite an existing record.
    pub fn update(&self, record: &T) -> StorageResult<()> {
        let id = record.id();

        if !self.exists(id) {
            return Err(StorageError::NotFound(format!("{} {id}", T::LABEL)));
        }

        self.storage
            .write_json(self.storage.paths().record(T::COLLECTION, id), record)
    }

    /// Delete a record.
    pub fn delete(&self, id: &str) -> StorageResult<()> {
        if !self.exists(id) {
            return Err(StorageError::NotFound(format!("{} {id}", T::LABEL)));
        }

        self.storage
            .delete(self.storage.paths().record(T::COLLECTION, id))
    }

    /// All records matching a predicate, ordered by id.
    ///
    /// Records deleted between the directory scan and the read are skipped.
    pub fn list_where(&self, mut predicate: impl FnMut(&T) -> bool) -> StorageResult<Vec<T>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().collection_dir(T::COLLECTION), "json")?;

        let mut records = Vec::new();
        for id in ids {
            if let Some(record) = self.find(&id)? {
                if predicate(&record) {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }
}
