// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Attendance service.
//!
//! Recording, reading, updating and listing attendance is not gated on
//! class ownership: any authenticated teacher can act on attendance by
//! session id. This differs from every other entity family and is kept as
//! the observed behavior (co-teachers and substitutes take the register).
//! Deleting a record is gated on the owner of the session's class.

use chrono::Utc;
use tracing::info;

use super::{new_id, ServiceError, ServiceResult};
use crate::access::{AccessGuard, ResourceType};
use crate::models::CreateAttendanceRequest;
use crate::storage::{Attendance, AttendancePatch, ClassroomStore};

pub struct AttendanceService<'a> {
    store: &'a dyn ClassroomStore,
    guard: AccessGuard<'a>,
}

impl<'a> AttendanceService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    /// Record presence of a student at a session. Ungated.
    pub fn record(
        &self,
        principal_id: &str,
        request: CreateAttendanceRequest,
    ) -> ServiceResult<Attendance> {
        let attendance = Attendance {
            id: new_id(),
            class_session_id: request.class_session_id,
            student_id: request.student_id,
            present: request.present,
            recorded_at: Utc::now(),
        };
        self.store.insert_attendance(&attendance)?;

        info!(
            attendance_id = %attendance.id,
            session_id = %attendance.class_session_id,
            recorded_by = %principal_id,
            "Attendance recorded"
        );
        Ok(attendance)
    }

    /// Ungated.
    pub fn get(&self, attendance_id: &str) -> ServiceResult<Attendance> {
        self.store.find_attendance(attendance_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("Attendance {attendance_id} not found"))
        })
    }

    /// Ungated. A missing session is reported as not found rather than as
    /// an empty list.
    pub fn list_by_session(&self, session_id: &str) -> ServiceResult<Vec<Attendance>> {
        if self.store.find_session(session_id)?.is_none() {
            return Err(ServiceError::not_found(format!(
                "Class session {session_id} not found"
            )));
        }
        Ok(self.store.list_attendance_by_session(session_id)?)
    }

    /// Ungated.
    pub fn update(
        &self,
        principal_id: &str,
        attendance_id: &str,
        patch: AttendancePatch,
    ) -> ServiceResult<Attendance> {
        let mut attendance = self.get(attendance_id)?;
        attendance.apply(patch, Utc::now());
        self.store.update_attendance(&attendance)?;

        info!(
            attendance_id = %attendance_id,
            present = attendance.present,
            recorded_by = %principal_id,
            "Attendance updated"
        );
        Ok(attendance)
    }

    /// Gated through the full chain: attendance, session, class.
    pub fn delete(&self, principal_id: &str, attendance_id: &str) -> ServiceResult<()> {
        self.guard
            .ensure(principal_id, ResourceType::Attendance, attendance_id)?;
        self.store.delete_attendance(attendance_id)?;

        info!(attendance_id = %attendance_id, "Attendance deleted");
        Ok(())
    }
}
