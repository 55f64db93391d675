// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Classroom Server - multi-tenant classroom management service
//!
//! Teachers own classes. Sessions, enrollments and resources belong to a
//! class, attendance belongs to a session. Guarded operations resolve the
//! owning teacher by following those links back to the class and compare it
//! with the caller.
//!
//! ## Modules
//!
//! - `access` - Ownership resolution and authorization decisions
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - JWT authentication and role checks
//! - `services` - Validated, authorized domain operations
//! - `storage` - JSON file store behind the `ClassroomStore` trait

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
