//! JSON-file backed user registry.
//!
//! The file holds a single object mapping Telegram user id to first name and
//! is rewritten whenever a new user appears.
#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use ethiopack_core::UserStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct JsonUserStore {
    path: PathBuf,
    users: Mutex<BTreeMap<u64, String>>,
}

impl JsonUserStore {
    /// Open the registry, creating an empty file if none exists.
    ///
    /// A file that cannot be parsed is logged and treated as empty; it is
    /// overwritten on the next new user.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let users = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Error reading users file {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let users = BTreeMap::new();
                save(&path, &users).await?;
                users
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} users from {}", users.len(), path.display());

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }
}

async fn save(path: &Path, users: &BTreeMap<u64, String>) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(users)?;
    tokio::fs::write(path, data).await?;
    Ok(())
}

#[async_trait]
impl UserStore for JsonUserStore {
    async fn record(&self, id: u64, name: &str) -> anyhow::Result<bool> {
        let mut users = self.users.lock().await;
        if users.contains_key(&id) {
            return Ok(false);
        }

        users.insert(id, name.to_string());
        save(&self.path, &users).await?;
        info!("New user added: {name} ({id}). Total users: {}", users.len());
        Ok(true)
    }

    async fn users(&self) -> anyhow::Result<Vec<(u64, String)>> {
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.users.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = JsonUserStore::open(&path).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn records_each_user_once_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = JsonUserStore::open(&path).await.unwrap();
        assert!(store.record(7, "Abebe").await.unwrap());
        assert!(!store.record(7, "Abebe Again").await.unwrap());
        assert!(store.record(3, "Sara").await.unwrap());

        let reopened = JsonUserStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.users().await.unwrap(),
            vec![(3, "Sara".to_string()), (7, "Abebe".to_string())]
        );
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn reads_string_keyed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{ "413906777": "Hossiy" }"#).unwrap();

        let store = JsonUserStore::open(&path).await.unwrap();
        assert_eq!(store.users().await.unwrap(), vec![(413_906_777, "Hossiy".to_string())]);
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonUserStore::open(&path).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.record(1, "A").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
