// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated principals.
//!
//! Use `TeacherOnly` on classroom handlers and hand the principal id to the
//! service explicitly:
//!
//! ```rust,ignore
//! async fn list_classes(
//!     TeacherOnly(user): TeacherOnly,
//!     State(state): State<AppState>,
//! ) -> Result<Json<ClassListResponse>, ApiError> {
//!     let classes = ClassService::new(state.store()).list(&user.user_id)?;
//!     // ...
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use tracing::warn;

use super::claims::TokenClaims;
use super::{AuthError, AuthenticatedUser};
use crate::state::{AppState, AuthConfig};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Extractor for any authenticated principal.
///
/// ## Authentication Modes
///
/// - **Production mode** (`JWT_SECRET` set): HS256 signature, expiry, and the
///   optional issuer/audience are verified.
/// - **Development mode** (no `JWT_SECRET`): structure and expiry only, no
///   signature check.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = verify_jwt(token, &state.auth_config)?;

        Ok(Auth(user))
    }
}

/// Extractor that requires the teacher role.
pub struct TeacherOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for TeacherOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_teacher() {
            warn!(user_id = %user.user_id, role = %user.role, "Non-teacher rejected");
            return Err(AuthError::TeacherRoleRequired);
        }

        Ok(TeacherOnly(user))
    }
}

/// Verify a bearer token and extract the principal.
pub fn verify_jwt(token: &str, auth_config: &AuthConfig) -> Result<AuthenticatedUser, AuthError> {
    match auth_config.secret {
        Some(ref secret) => verify_jwt_production(token, secret, auth_config),
        None => verify_jwt_development(token),
    }
}

fn verify_jwt_production(
    token: &str,
    secret: &str,
    auth_config: &AuthConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    if let Some(ref issuer) = auth_config.issuer {
        validation.set_issuer(&[issuer]);
    }

    if let Some(ref audience) = auth_config.audience {
        validation.set_audience(&[audience]);
    } else {
        validation.validate_aud = false;
    }

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
        _ => AuthError::MalformedToken,
    })?;

    Ok(AuthenticatedUser::from_claims(token_data.claims))
}

/// Development JWT verification (no signature check).
///
/// WARNING: This should only be used in development environments.
fn verify_jwt_development(token: &str) -> Result<AuthenticatedUser, AuthError> {
    let token_data = jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token)
        .map_err(|_| AuthError::MalformedToken)?;

    let claims = token_data.claims;
    if claims.exp < Utc::now().timestamp() - CLOCK_SKEW_LEEWAY as i64 {
        return Err(AuthError::TokenExpired);
    }

    Ok(AuthenticatedUser::from_claims(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::storage::test_support::temp_store;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tempfile::TempDir;

    const SECRET: &str = "test-secret";

    fn create_test_state(secret: Option<&str>) -> (AppState, TempDir) {
        let (store, dir) = temp_store();
        let state = AppState::new(store).with_auth_config(AuthConfig {
            secret: secret.map(str::to_string),
            issuer: Some("test".to_string()),
            audience: None,
        });
        (state, dir)
    }

    /// Unsigned token, accepted only in development mode.
    fn create_dev_jwt(user_id: &str, role: Option<&str>, exp: i64) -> String {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let role = role
            .map(|r| format!(r#","role":"{r}""#))
            .unwrap_or_default();
        let claims = format!(r#"{{"sub":"{user_id}","exp":{exp}{role}}}"#);

        let header_b64 = URL_SAFE_NO_PAD.encode(header.as_bytes());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        format!("{header_b64}.{claims_b64}.fake_signature")
    }

    fn create_signed_jwt(user_id: &str, secret: &str, iss: &str) -> String {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Some(Utc::now().timestamp()),
            iss: Some(iss.to_string()),
            role: Some("teacher".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn parts_with_token(token: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/v1/classes");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _dir) = create_test_state(None);
        let mut parts = parts_with_token(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn development_mode_accepts_unsigned_token() {
        let (state, _dir) = create_test_state(None);
        let token = create_dev_jwt("teacher_1", Some("teacher"), 9_999_999_999);
        let mut parts = parts_with_token(Some(&token));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, "teacher_1");
        assert_eq!(user.role, Role::Teacher);
    }

    #[tokio::test]
    async fn development_mode_still_checks_expiry() {
        let (state, _dir) = create_test_state(None);
        let token = create_dev_jwt("teacher_1", Some("teacher"), 1_609_459_200);
        let mut parts = parts_with_token(Some(&token));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn production_mode_rejects_unsigned_token() {
        let (state, _dir) = create_test_state(Some(SECRET));
        let token = create_dev_jwt("teacher_1", Some("teacher"), 9_999_999_999);
        let mut parts = parts_with_token(Some(&token));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn production_mode_verifies_signature_and_issuer() {
        let (state, _dir) = create_test_state(Some(SECRET));

        let good = create_signed_jwt("teacher_1", SECRET, "test");
        let Auth(user) = Auth::from_request_parts(&mut parts_with_token(Some(&good)), &state)
            .await
            .unwrap();
        assert_eq!(user.user_id, "teacher_1");

        let forged = create_signed_jwt("teacher_1", "other-secret", "test");
        let result = Auth::from_request_parts(&mut parts_with_token(Some(&forged)), &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));

        let foreign = create_signed_jwt("teacher_1", SECRET, "elsewhere");
        let result = Auth::from_request_parts(&mut parts_with_token(Some(&foreign)), &state).await;
        assert!(matches!(result, Err(AuthError::InvalidIssuer)));
    }

    #[tokio::test]
    async fn teacher_only_rejects_students() {
        let (state, _dir) = create_test_state(None);

        let student = create_dev_jwt("student_1", None, 9_999_999_999);
        let result =
            TeacherOnly::from_request_parts(&mut parts_with_token(Some(&student)), &state).await;
        assert!(matches!(result, Err(AuthError::TeacherRoleRequired)));

        let teacher = create_dev_jwt("teacher_1", Some("teacher"), 9_999_999_999);
        let TeacherOnly(user) =
            TeacherOnly::from_request_parts(&mut parts_with_token(Some(&teacher)), &state)
                .await
                .unwrap();
        assert_eq!(user.user_id, "teacher_1");
    }

    #[tokio::test]
    async fn malformed_header_is_rejected() {
        let (state, _dir) = create_test_state(None);
        let mut parts = Request::builder()
            .uri("/v1/classes")
            .header("Authorization", "Basic abc")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }
}
