// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and role errors.
//!
//! Classroom routes accept only teachers. A request is rejected with 401 when
//! no principal can be established from the bearer token, and with 403 when
//! the token is valid but its `role` claim is not `teacher`. Ownership
//! failures are not reported here; they come from the services.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingAuthHeader,
    #[error("Authorization header must be 'Bearer <token>'")]
    InvalidAuthHeader,
    #[error("Token is malformed")]
    MalformedToken,
    #[error("Token signature does not match the configured secret")]
    InvalidSignature,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token was issued by an unexpected issuer")]
    InvalidIssuer,
    #[error("Token is meant for another audience")]
    InvalidAudience,
    #[error("Token is not yet valid")]
    TokenNotYetValid,
    /// The principal is known but is not a teacher.
    #[error("This operation requires the teacher role")]
    TeacherRoleRequired,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: &'static str,
}

impl AuthError {
    /// Stable machine-readable code, sent next to the message.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::TeacherRoleRequired => "teacher_role_required",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TeacherRoleRequired => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
