// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Access Module
//!
//! Ownership-based authorization for classroom data.
//!
//! A teacher may act on a class only if they own it, and on any descendant
//! of a class (session, enrollment, resource, attendance) only if they own
//! the class at the top of its chain. [`OwnershipResolver`] finds the owner;
//! [`AccessGuard`] turns that into an [`AccessDecision`] for a principal.
//!
//! Nothing in this module writes.

pub mod guard;
pub mod resolver;

pub use guard::{AccessDecision, AccessError, AccessGuard};
pub use resolver::OwnershipResolver;

pub use crate::storage::ResourceType;
