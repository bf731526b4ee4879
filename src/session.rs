// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable session state: the access/refresh token pair and the cached user
//! record, stored under three fixed keys in the platform config dir. A session
//! with no readable access token is anonymous; unreadable or corrupt storage
//! is treated the same way rather than retried.

use crate::models::User;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const APP_QUALIFIER: &str = "com.alphavelocity";
const APP_ORGANIZATION: &str = "Moneydash";
const APP_NAME: &str = "moneydash";

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to write session key '{key}': {source}")]
    Write {
        key: &'static str,
        source: std::io::Error,
    },
    #[error("Failed to serialize user record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One file per key under a private directory, mirroring the three
/// localStorage-style entries the session contract names.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Store rooted at the platform-specific config dir.
    pub fn open_default() -> Result<Self> {
        let proj = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .context("Could not determine platform-specific config dir")?;
        let root = proj.config_dir().join("session");
        fs::create_dir_all(&root).context("Failed to create session dir")?;
        Ok(SessionStore { root })
    }

    /// Store rooted at an explicit directory. Used by tests.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        SessionStore { root: root.into() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.root.join(key)) {
            Ok(v) if !v.is_empty() => Some(v),
            _ => None,
        }
    }

    pub fn set(&self, key: &'static str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(self.root.join(key), value))
            .map_err(|source| SessionError::Write { key, source })
    }

    /// Removal is best-effort; a missing key is already the desired state.
    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.root.join(key));
    }
}

/// In-memory session state backed by a [`SessionStore`]. All token writes go
/// through here; nothing else touches the store.
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Rehydrate from storage. Unreadable keys yield an anonymous session;
    /// a token may be present without a user record (the profile is fetched
    /// lazily after token acquisition).
    pub fn load(store: SessionStore) -> Self {
        let access_token = store.get(ACCESS_TOKEN_KEY);
        let refresh_token = store.get(REFRESH_TOKEN_KEY);
        let user = store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Session {
            store,
            access_token,
            refresh_token,
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Persist a new token pair and mark the session authenticated.
    pub fn set_tokens(&mut self, access: &str, refresh: &str) -> Result<(), SessionError> {
        self.store.set(ACCESS_TOKEN_KEY, access)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        self.access_token = Some(access.to_string());
        self.refresh_token = Some(refresh.to_string());
        Ok(())
    }

    pub fn set_user(&mut self, user: User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&user)?;
        self.store.set(USER_KEY, &raw)?;
        self.user = Some(user);
        Ok(())
    }

    /// Purge all three storage keys and reset in-memory state. Used by both
    /// explicit logout and irrecoverable refresh failure.
    pub fn clear(&mut self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
    }
}
