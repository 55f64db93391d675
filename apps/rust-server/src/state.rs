// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::storage::ClassroomStore;

/// JWT verification settings.
///
/// `secret: None` selects development mode (no signature check).
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub secret: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn is_production(&self) -> bool {
        self.secret.is_some()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClassroomStore>,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(store: impl ClassroomStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            auth_config: AuthConfig::default(),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    pub fn store(&self) -> &dyn ClassroomStore {
        self.store.as_ref()
    }
}
