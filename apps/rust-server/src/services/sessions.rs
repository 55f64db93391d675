// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Class session service.

use chrono::Utc;
use tracing::info;

use super::{new_id, validation, ServiceError, ServiceResult};
use crate::access::{AccessGuard, ResourceType};
use crate::models::CreateSessionRequest;
use crate::storage::{ClassSession, ClassSessionPatch, ClassroomStore};

pub struct SessionService<'a> {
    store: &'a dyn ClassroomStore,
    guard: AccessGuard<'a>,
}

impl<'a> SessionService<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            guard: AccessGuard::new(store),
        }
    }

    /// Schedule a session. Gated on the owner of `request.class_id`.
    pub fn create(
        &self,
        principal_id: &str,
        request: CreateSessionRequest,
    ) -> ServiceResult<ClassSession> {
        let topic = validation::non_empty_opt("topic", request.topic)?;

        self.guard.ensure_parent(principal_id, &request.class_id)?;

        let session = ClassSession {
            id: new_id(),
            class_id: request.class_id,
            date: request.date,
            topic,
            created_at: Utc::now(),
        };
        self.store.insert_session(&session)?;

        info!(session_id = %session.id, class_id = %session.class_id, "Class session created");
        Ok(session)
    }

    /// Sessions of a class, ordered by date.
    pub fn list(&self, principal_id: &str, class_id: &str) -> ServiceResult<Vec<ClassSession>> {
        self.guard.ensure_parent(principal_id, class_id)?;
        Ok(self.store.list_sessions_by_class(class_id)?)
    }

    pub fn get(&self, principal_id: &str, session_id: &str) -> ServiceResult<ClassSession> {
        self.guard
            .ensure(principal_id, ResourceType::ClassSession, session_id)?;
        self.load(session_id)
    }

    pub fn update(
        &self,
        principal_id: &str,
        session_id: &str,
        patch: ClassSessionPatch,
    ) -> ServiceResult<ClassSession> {
        let patch = ClassSessionPatch {
            date: patch.date,
            topic: validation::non_empty_opt("topic", patch.topic)?,
        };

        self.guard
            .ensure(principal_id, ResourceType::ClassSession, session_id)?;
        let mut session = self.load(session_id)?;
        session.apply(patch);
        self.store.update_session(&session)?;

        info!(session_id = %session_id, "Class session updated");
        Ok(session)
    }

    /// Delete a session and its attendance.
    pub fn delete(&self, principal_id: &str, session_id: &str) -> ServiceResult<()> {
        self.guard
            .ensure(principal_id, ResourceType::ClassSession, session_id)?;
        self.store.delete_session(session_id)?;

        info!(session_id = %session_id, "Class session deleted");
        Ok(())
    }

    fn load(&self, session_id: &str) -> ServiceResult<ClassSession> {
        self.store.find_session(session_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("Class session {session_id} not found"))
        })
    }
}
