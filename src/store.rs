//! Remote dataset store client.
//!
//! The [`DatasetStore`] trait is the seam between the session layer and the
//! hosted dataset service; tests substitute an in-memory fake behind the
//! same trait. [`HubStore`] is the real implementation: JSON over HTTP with
//! bearer-token auth.
//!
//! The store is treated as an opaque full-replace blob keyed by dataset id —
//! both `fetch` and `push` move the entire record list, and no partial-write
//! API is assumed or used. A push that fails mid-flight may have partially
//! succeeded remotely; the client has no way to verify beyond the status the
//! store returns.
//!
//! # Credentials
//!
//! The bearer token comes from a local key-value text file with a line
//! `TOKEN=<value>`, read once at startup and threaded explicitly through the
//! constructor. There is no ambient login state.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::CurateError;
use crate::models::{Record, Snapshot};

/// Abstract remote dataset store.
///
/// Implementations must be `Send + Sync` so a session can be shared across
/// HTTP handlers. Both operations are whole-dataset: there is no record-level
/// API, no compare-and-swap, and no retry — the last push wins.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Fetch the complete dataset as a fresh snapshot.
    async fn fetch(&self, dataset: &str) -> Result<Snapshot>;

    /// Overwrite the complete dataset. Not atomic on the remote side.
    async fn push(&self, dataset: &str, snapshot: &Snapshot, private: bool) -> Result<()>;
}

/// HTTP client for the hosted dataset hub.
pub struct HubStore {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

/// Full-replace push payload.
#[derive(Serialize)]
struct PushBody<'a> {
    records: &'a [Record],
    private: bool,
}

impl HubStore {
    /// Build a store client with an explicit credential.
    pub fn new(endpoint: &str, token: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build a store client from config, reading the credential file.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let token = load_token(&config.credential_file)?;
        Self::new(&config.endpoint, token, config.timeout_secs)
    }

    fn records_url(&self, dataset: &str) -> String {
        format!("{}/api/datasets/{}/records", self.endpoint, dataset)
    }
}

#[async_trait]
impl DatasetStore for HubStore {
    async fn fetch(&self, dataset: &str) -> Result<Snapshot> {
        let response = self
            .client
            .get(self.records_url(dataset))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CurateError::RemoteStore(format!("fetch {}: {}", dataset, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurateError::RemoteStore(format!(
                "fetch {}: HTTP {}",
                dataset, status
            ))
            .into());
        }

        let records: Vec<Record> = response
            .json()
            .await
            .map_err(|e| CurateError::RemoteStore(format!("fetch {}: bad body: {}", dataset, e)))?;

        Ok(Snapshot::new(records))
    }

    async fn push(&self, dataset: &str, snapshot: &Snapshot, private: bool) -> Result<()> {
        let body = PushBody {
            records: &snapshot.records,
            private,
        };
        let response = self
            .client
            .put(self.records_url(dataset))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| CurateError::RemoteStore(format!("push {}: {}", dataset, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurateError::RemoteStore(format!(
                "push {}: HTTP {}",
                dataset, status
            ))
            .into());
        }

        Ok(())
    }
}

/// Read the `TOKEN=<value>` line from a local credential file.
///
/// Fails with [`CurateError::MissingCredential`] when the file is absent or
/// no non-empty `TOKEN=` line is found.
pub fn load_token(path: &Path) -> Result<String, CurateError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| CurateError::MissingCredential(path.to_path_buf()))?;

    for line in content.lines() {
        if let Some(value) = line.trim().strip_prefix("TOKEN=") {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }

    Err(CurateError::MissingCredential(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_token_finds_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# hub credential").unwrap();
        writeln!(file, "TOKEN=hf_abc123").unwrap();
        assert_eq!(load_token(file.path()).unwrap(), "hf_abc123");
    }

    #[test]
    fn test_load_token_missing_file() {
        let err = load_token(Path::new("/nonexistent/credential.txt")).unwrap_err();
        assert!(matches!(err, CurateError::MissingCredential(_)));
    }

    #[test]
    fn test_load_token_missing_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "API_KEY=nope").unwrap();
        assert!(matches!(
            load_token(file.path()),
            Err(CurateError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_load_token_empty_value_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TOKEN=").unwrap();
        assert!(matches!(
            load_token(file.path()),
            Err(CurateError::MissingCredential(_))
        ));
    }
}
