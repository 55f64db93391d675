// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy shared by the domain services.
//!
//! Authorization outcomes and store integrity violations stay separate
//! kinds: a duplicate enrollment is a `Conflict`, never a `Forbidden`.

use thiserror::Error;

use crate::access::AccessError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The row, or an ancestor on its ownership chain, does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The row exists but resolves to another teacher.
    #[error("{0}")]
    Forbidden(String),
    /// Uniqueness or referential-integrity violation reported by the store.
    #[error("{0}")]
    Conflict(String),
    /// Malformed input.
    #[error("{0}")]
    Validation(String),
    /// Anything else the store failed at.
    #[error("Storage failure: {0}")]
    Storage(#[source] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::AlreadyExists(what) => {
                ServiceError::Conflict(format!("{what} already exists"))
            }
            StorageError::ForeignKey(what) => {
                ServiceError::Conflict(format!("Referenced {what} does not exist"))
            }
            StorageError::InvalidId(id) => {
                ServiceError::Validation(format!("Identifier {id:?} is not usable"))
            }
            // A row that vanished between the check and the write.
            StorageError::NotFound(what) => ServiceError::NotFound(format!("{what} not found")),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<AccessError> for ServiceError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound { .. } => ServiceError::NotFound(capitalize(&e.to_string())),
            AccessError::Forbidden { .. } => ServiceError::Forbidden(capitalize(&e.to_string())),
            AccessError::Storage(inner) => inner.into(),
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
