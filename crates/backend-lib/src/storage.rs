// ============================
// authgate-lib/src/storage.rs
// ============================
//! User storage abstraction with in-memory and flat-file implementations.
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};
use parking_lot::RwLock;
use tempfile::NamedTempFile;
use thiserror::Error;
use uuid::Uuid;
use crate::user::{User, UserQuery, UserUpdate};

/// Errors raised by user stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No user matches {0:?}")]
    NotFound(UserQuery),

    #[error("User {0} already exists")]
    Duplicate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for user storage backends
///
/// Implementations synchronize internally and are shared by cloning a handle.
pub trait UserStore: Send + Sync {
    /// Persist a new user; the email must be unused
    fn add_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError>;

    /// Return the single user matching `query`
    fn find_user_by(&self, query: &UserQuery) -> Result<User, StoreError>;

    /// Every user registered under `email`
    fn find_users_by_email(&self, email: &str) -> Vec<User>;

    /// Apply `update` to the user with `id`
    fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError>;

    /// Snapshot of all users, oldest first
    fn all_users(&self) -> Vec<User>;
}

/// In-memory user store
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_users(users: Vec<User>) -> Self {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        Self { users: Arc::new(RwLock::new(map)) }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn remove(&self, id: Uuid) {
        self.users.write().remove(&id);
    }

    fn put(&self, user: User) {
        self.users.write().insert(user.id, user);
    }
}

impl UserStore for MemoryUserStore {
    fn add_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate(email.to_string()));
        }
        let user = User::new(email, hashed_password);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user_by(&self, query: &UserQuery) -> Result<User, StoreError> {
        let users = self.users.read();
        let found = match query {
            UserQuery::Id(id) => users.get(id),
            _ => users.values().find(|u| query.matches(u)),
        };
        found.cloned().ok_or_else(|| StoreError::NotFound(query.clone()))
    }

    fn find_users_by_email(&self, email: &str) -> Vec<User> {
        self.users
            .read()
            .values()
            .filter(|u| u.email == email)
            .cloned()
            .collect()
    }

    fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or(StoreError::NotFound(UserQuery::Id(id)))?;
        update.apply(user);
        Ok(user.clone())
    }

    fn all_users(&self) -> Vec<User> {
        let mut all: Vec<User> = self.users.read().values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        all
    }
}

/// Flat-file user store
///
/// Keeps every user in memory and rewrites the whole JSON file after each
/// mutation. Writes go through a temp file in the same directory so the file
/// on disk is always a complete snapshot. A mutation whose snapshot cannot be
/// written is undone in memory.
#[derive(Clone)]
pub struct FlatFileUserStore {
    path: PathBuf,
    inner: MemoryUserStore,
    // serializes snapshot writes
    write_lock: Arc<parking_lot::Mutex<()>>,
}

impl FlatFileUserStore {
    /// Open the store at `path`, creating parent directories as needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let users: Vec<User> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), users = users.len(), "user store opened");

        Ok(Self {
            path,
            inner: MemoryUserStore::from_users(users),
            write_lock: Arc::new(parking_lot::Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Callers hold `write_lock`
    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.inner.all_users())?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl UserStore for FlatFileUserStore {
    fn add_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError> {
        let _guard = self.write_lock.lock();
        let user = self.inner.add_user(email, hashed_password)?;
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "user store save failed, add rolled back");
            self.inner.remove(user.id);
            return Err(e);
        }
        Ok(user)
    }

    fn find_user_by(&self, query: &UserQuery) -> Result<User, StoreError> {
        self.inner.find_user_by(query)
    }

    fn find_users_by_email(&self, email: &str) -> Vec<User> {
        self.inner.find_users_by_email(email)
    }

    fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, StoreError> {
        let _guard = self.write_lock.lock();
        let previous = self.inner.find_user_by(&UserQuery::Id(id))?;
        let user = self.inner.update_user(id, update)?;
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "user store save failed, update rolled back");
            self.inner.put(previous);
            return Err(e);
        }
        Ok(user)
    }

    fn all_users(&self) -> Vec<User> {
        self.inner.all_users()
    }
}
