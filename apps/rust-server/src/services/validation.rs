// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Input checks run before any authorization or storage call.

use chrono::NaiveDate;
use url::Url;

use super::error::{ServiceError, ServiceResult};
use crate::storage::paths::is_safe_id;

/// Trim `value` and reject it if nothing is left.
pub fn non_empty(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Same as [`non_empty`] for optional patch fields.
pub fn non_empty_opt(field: &str, value: Option<String>) -> ServiceResult<Option<String>> {
    value.map(|v| non_empty(field, &v)).transpose()
}

/// The principal id keys the roster on disk, so it must be usable as an id.
pub fn principal_id(value: &str) -> ServiceResult<()> {
    if is_safe_id(value) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "Principal id {value:?} cannot own a roster"
        )))
    }
}

/// A resource must be an absolute `http` or `https` URL.
pub fn resource_url(value: &str) -> ServiceResult<String> {
    let url = Url::parse(value.trim())
        .map_err(|e| ServiceError::validation(format!("Invalid resource URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(ServiceError::validation(format!(
            "Unsupported resource URL scheme: {other}"
        ))),
    }
}

pub fn age_range(age_min: Option<u8>, age_max: Option<u8>) -> ServiceResult<()> {
    match (age_min, age_max) {
        (Some(min), Some(max)) if min > max => Err(ServiceError::validation(format!(
            "age_min ({min}) must not exceed age_max ({max})"
        ))),
        _ => Ok(()),
    }
}

pub fn birth_date(date: NaiveDate, today: NaiveDate) -> ServiceResult<()> {
    if date > today {
        return Err(ServiceError::validation("birth_date must not be in the future"));
    }
    Ok(())
}
