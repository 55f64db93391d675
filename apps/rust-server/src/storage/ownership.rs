// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership links between stored entities.
//!
//! Only a [`Class`](super::Class) names its owning teacher directly. Every
//! other guarded entity names its parent, and the owner is found by following
//! those links until a teacher id is reached. Each entity knows exactly one
//! hop; walking the chain is the resolver's job.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Entity families that can be authorized through the ownership chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Class,
    ClassSession,
    Enrollment,
    Resource,
    Attendance,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::Class => "class",
            ResourceType::ClassSession => "class session",
            ResourceType::Enrollment => "enrollment",
            ResourceType::Resource => "resource",
            ResourceType::Attendance => "attendance",
        };
        f.write_str(name)
    }
}

/// The next hop from an entity towards its owning teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipLink<'a> {
    /// The entity is owned directly by this teacher.
    Teacher(&'a str),
    /// The entity belongs to this class.
    Class(&'a str),
    /// The entity belongs to this class session.
    Session(&'a str),
}

/// Trait for entities that take part in ownership-chain authorization.
pub trait OwnedResource {
    /// The single parent reference stored on this row.
    fn ownership_link(&self) -> OwnershipLink<'_>;
}
