// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Services
//!
//! One service per entity family. Each method takes the acting principal
//! explicitly and follows one of two shapes:
//!
//! - **parent-gated create**: validate, authorize against the parent class,
//!   then insert. A failed check writes nothing.
//! - **self-gated read/update/delete**: authorize against the row's own
//!   ownership chain, then act.
//!
//! Attendance (mostly ungated) and students (roster-filtered) are the
//! exceptions and document their own rules.

pub mod attendance;
pub mod classes;
pub mod enrollments;
pub mod error;
pub mod resources;
pub mod sessions;
pub mod students;
pub mod validation;

pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use error::{ServiceError, ServiceResult};
pub use resources::ResourceService;
pub use sessions::SessionService;
pub use students::StudentService;

/// Fresh row id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
