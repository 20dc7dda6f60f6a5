//! Persisted session keys and the shared authentication state.
//!
//! The session store is a small durable key-value map. The auth context is
//! an explicit handle passed to whoever needs it; readers subscribe to a
//! watch channel and always observe the latest value.

use std::collections::BTreeMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::{Mutex, watch};
use tracing::{debug, instrument};

use crate::errors::EventMapError;

/// Key holding the serialized user profile.
pub const USER_INFO_KEY: &str = "userInfo";

/// Key holding the API access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// File name of the persisted session inside the session directory.
const SESSION_FILE: &str = "session.json";

/// Durable key-value storage.
pub trait SessionStore {
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, EventMapError>> + Send;

    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), EventMapError>> + Send;

    /// Remove every key in `keys`; either all are removed or none.
    fn multi_remove(&self, keys: &[&str]) -> impl Future<Output = Result<(), EventMapError>> + Send;
}

/// Session store backed by a JSON object file.
///
/// Every write replaces the whole file through a rename, so a crash mid-way
/// leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store in `dir/session.json`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, EventMapError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), EventMapError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, EventMapError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), EventMapError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn multi_remove(&self, keys: &[&str]) -> Result<(), EventMapError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() != before {
            self.write_map(&map).await?;
        }
        debug!("removed {} session keys", before - map.len());
        Ok(())
    }
}

/// Volatile session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, EventMapError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), EventMapError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), EventMapError> {
        let mut items = self.items.lock().await;
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// Signed-in user as persisted by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_info: String,
    pub access_token: String,
}

/// Shared authentication state.
///
/// `None` means logged out. Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    tx: Arc<watch::Sender<Option<Credentials>>>,
}

impl AuthContext {
    #[must_use]
    pub fn new(value: Option<Credentials>) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Seed the context from persisted keys; both must be present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore<S: SessionStore>(store: &S) -> Result<Self, EventMapError> {
        let user_info = store.get_item(USER_INFO_KEY).await?;
        let access_token = store.get_item(ACCESS_TOKEN_KEY).await?;
        let value = match (user_info, access_token) {
            (Some(user_info), Some(access_token)) => Some(Credentials {
                user_info,
                access_token,
            }),
            _ => None,
        };
        debug!(signed_in = value.is_some(), "restored auth context");
        Ok(Self::new(value))
    }

    /// Replace the current value and notify subscribers.
    pub fn set_value(&self, value: Option<Credentials>) {
        self.tx.send_replace(value);
    }

    #[must_use]
    pub fn value(&self) -> Option<Credentials> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Credentials>> {
        self.tx.subscribe()
    }
}
