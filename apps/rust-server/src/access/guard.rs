// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access guard: the authorization policy on top of ownership resolution.
//!
//! Authorization is two explicit steps:
//!
//! 1. resolve the owner through [`OwnershipResolver`] (existence),
//! 2. compare it with the principal ([`AccessDecision::compare`]).
//!
//! Existence is checked first, so a missing row is always `NotFound` no
//! matter who asks. A row that exists under another teacher is `Forbidden`.
//! The two outcomes stay distinct all the way to the HTTP status code, which
//! means a non-owner can tell "missing" from "not yours".

use thiserror::Error;
use tracing::{debug, warn};

use super::resolver::OwnershipResolver;
use crate::storage::{ClassroomStore, ResourceType, StorageError, StorageResult};

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized,
    Forbidden,
    NotFound,
}

impl AccessDecision {
    /// Compare a resolved owner with the acting principal.
    pub fn compare(principal_id: &str, owner: Option<&str>) -> Self {
        match owner {
            None => AccessDecision::NotFound,
            Some(owner) if owner == principal_id => AccessDecision::Authorized,
            Some(_) => AccessDecision::Forbidden,
        }
    }

    /// Turn a decision into a `?`-friendly result.
    pub fn require(self, resource_type: ResourceType, id: &str) -> Result<(), AccessError> {
        match self {
            AccessDecision::Authorized => Ok(()),
            AccessDecision::NotFound => Err(AccessError::NotFound {
                resource_type,
                id: id.to_string(),
            }),
            AccessDecision::Forbidden => Err(AccessError::Forbidden {
                resource_type,
                id: id.to_string(),
            }),
        }
    }
}

/// Authorization failure, or a storage failure while resolving.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{resource_type} {id} not found")]
    NotFound {
        resource_type: ResourceType,
        id: String,
    },
    #[error("{resource_type} {id} belongs to another teacher")]
    Forbidden {
        resource_type: ResourceType,
        id: String,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ownership-based access guard.
#[derive(Clone, Copy)]
pub struct AccessGuard<'a> {
    store: &'a dyn ClassroomStore,
    resolver: OwnershipResolver<'a>,
}

impl<'a> AccessGuard<'a> {
    pub fn new(store: &'a dyn ClassroomStore) -> Self {
        Self {
            store,
            resolver: OwnershipResolver::new(store),
        }
    }

    /// Authorize `principal_id` against an existing row.
    pub fn authorize(
        &self,
        principal_id: &str,
        resource_type: ResourceType,
        id: &str,
    ) -> StorageResult<AccessDecision> {
        let owner = self.resolver.resolve_owner(resource_type, id)?;
        let decision = AccessDecision::compare(principal_id, owner.as_deref());
        log_decision(principal_id, resource_type, id, decision);
        Ok(decision)
    }

    /// Authorize the creation of a child row under `class_id`.
    ///
    /// The child does not exist yet, so this reads the class directly
    /// instead of walking a chain.
    pub fn authorize_parent(
        &self,
        principal_id: &str,
        class_id: &str,
    ) -> StorageResult<AccessDecision> {
        let class = self.store.find_class(class_id)?;
        let decision =
            AccessDecision::compare(principal_id, class.as_ref().map(|c| c.teacher_id.as_str()));
        log_decision(principal_id, ResourceType::Class, class_id, decision);
        Ok(decision)
    }

    /// [`authorize`](Self::authorize), failing unless authorized.
    pub fn ensure(
        &self,
        principal_id: &str,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<(), AccessError> {
        self.authorize(principal_id, resource_type, id)?
            .require(resource_type, id)
    }

    /// [`authorize_parent`](Self::authorize_parent), failing unless authorized.
    pub fn ensure_parent(&self, principal_id: &str, class_id: &str) -> Result<(), AccessError> {
        self.authorize_parent(principal_id, class_id)?
            .require(ResourceType::Class, class_id)
    }
}

fn log_decision(principal_id: &str, resource_type: ResourceType, id: &str, decision: AccessDecision) {
    match decision {
        AccessDecision::Forbidden => warn!(
            principal_id,
            %resource_type,
            id,
            "Access denied: resource owned by another teacher"
        ),
        _ => debug!(principal_id, %resource_type, id, ?decision, "Access checked"),
    }
}
