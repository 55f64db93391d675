// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Supplies the principal for every classroom request.
//!
//! ## Auth Flow
//!
//! 1. The client sends `Authorization: Bearer <JWT>`
//! 2. The server:
//!    - verifies the HS256 signature, expiry, issuer, audience (production),
//!      or only structure and expiry (development)
//!    - extracts:
//!      - `sub` → principal id (`user_id`)
//!      - `role` → `teacher` or `student` (default)
//! 3. Handlers pass `user_id` explicitly to the domain services
//!
//! ## Security
//!
//! - All classroom endpoints require the teacher role
//! - Health and docs endpoints are public
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::{Auth, TeacherOnly};
pub use roles::Role;
