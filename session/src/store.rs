//! Token Store: durable home of the bearer token and cached profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller writes token and user together and clears them together.
//! Implementations only persist; they never talk to the network. Readers
//! treat unreadable or corrupt records as absent, since the gateway is the
//! source of truth anyway.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::types::User;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Durable key-value access for the persisted credential record.
pub trait TokenStore {
    /// Persist the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn set_token(&self, token: &str) -> Result<(), StoreError>;

    fn get_token(&self) -> Option<String>;

    /// Persist the cached user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be encoded or written.
    fn set_user_data(&self, user: &User) -> Result<(), StoreError>;

    fn get_user_data(&self) -> Option<User>;

    /// Remove both token and profile.
    ///
    /// # Errors
    ///
    /// Returns an error if either record exists and cannot be removed.
    fn clear_all(&self) -> Result<(), StoreError>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        (**self).set_token(token)
    }

    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }

    fn set_user_data(&self, user: &User) -> Result<(), StoreError> {
        (**self).set_user_data(user)
    }

    fn get_user_data(&self) -> Option<User> {
        (**self).get_user_data()
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        (**self).clear_all()
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Default)]
struct Record {
    token: Option<String>,
    user: Option<User>,
}

/// In-process store. Lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    record: Mutex<Record>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a credential, as if a previous run had saved it.
    #[must_use]
    pub fn with_credential(token: impl Into<String>, user: User) -> Self {
        Self {
            record: Mutex::new(Record {
                token: Some(token.into()),
                user: Some(user),
            }),
        }
    }

    /// True when neither token nor user is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let record = self.lock();
        record.token.is_none() && record.user.is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Record> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.lock().token = Some(token.to_owned());
        Ok(())
    }

    fn get_token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    fn set_user_data(&self, user: &User) -> Result<(), StoreError> {
        self.lock().user = Some(user.clone());
        Ok(())
    }

    fn get_user_data(&self) -> Option<User> {
        self.lock().user.clone()
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        *self.lock() = Record::default();
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Directory-backed store for native clients: `token` plus `user.json`.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn write_private(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, contents)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "token store read failed");
            None
        }
    }
}

fn remove_optional(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

impl TokenStore for FileTokenStore {
    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.write_private(&self.token_path(), token.as_bytes())
    }

    fn get_token(&self) -> Option<String> {
        let raw = read_optional(&self.token_path())?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_owned())
    }

    fn set_user_data(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(user)?;
        self.write_private(&self.user_path(), &raw)
    }

    fn get_user_data(&self) -> Option<User> {
        let path = self.user_path();
        let raw = read_optional(&path)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cached user");
                None
            }
        }
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        let token = remove_optional(&self.token_path());
        let user = remove_optional(&self.user_path());
        token.and(user)
    }
}
