// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Student records.
//!
//! Students are shared rows, not owned by any teacher. Which teachers know a
//! student is recorded separately on rosters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::paths::STUDENTS;
use super::Record;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Record for Student {
    const COLLECTION: &'static str = STUDENTS;
    const LABEL: &'static str = "Student";

    fn id(&self) -> &str {
        &self.id
    }
}
