//! The staff credential store: a JSON file keyed by username.
//!
//! Values are `{username, password}` where `password` holds an argon2
//! PHC hash string. Hashing and verification live here so the server's
//! login route and the `add-staff` CLI share one implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A staff account as persisted in the credential file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub username: String,
    /// Argon2 PHC hash string, stored under the original file format's
    /// "password" key.
    #[serde(rename = "password")]
    pub password_hash: String,
}

/// File-backed staff credential store.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl UserStore {
    /// Creates a store handle for the given file. A missing file reads
    /// as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds a staff account with a freshly hashed password.
    ///
    /// Rejects empty usernames, passwords shorter than
    /// [`MIN_PASSWORD_LENGTH`], and duplicate usernames.
    pub async fn add_user(&self, username: &str, password: &str) -> StoreResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::InvalidUsername(
                "username cannot be empty".to_string(),
            ));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(StoreError::InvalidPassword(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        let _guard = self.lock.write().await;
        let mut users = self.read_map().await?;
        if users.contains_key(username) {
            return Err(StoreError::UserExists(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        users.insert(
            username.to_string(),
            StaffUser {
                username: username.to_string(),
                password_hash,
            },
        );
        self.write_map(&users).await?;

        tracing::info!(username, "added staff account");
        Ok(())
    }

    /// Looks up a staff account by username.
    pub async fn get_user(&self, username: &str) -> StoreResult<Option<StaffUser>> {
        let _guard = self.lock.read().await;
        let users = self.read_map().await?;
        Ok(users.get(username).cloned())
    }

    async fn read_map(&self) -> StoreResult<BTreeMap<String, StaffUser>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupted {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, users: &BTreeMap<String, StaffUser>) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(users).map_err(StoreError::Serialization)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Hashes a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> StoreResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
