//! Presentation-agnostic curation operations.
//!
//! Both shells — the text menu and the HTTP form surface — translate their
//! I/O into the calls here, so the view/remove/add/import semantics live in
//! exactly one place.
//!
//! Every operation is one linear fetch → transform → push with no
//! intermediate checkpoint. A failure before push leaves the remote dataset
//! untouched; nothing is retried. Pairing (even length, user-then-assistant
//! roles) is checked on every fetch and every bulk import, so later view and
//! remove calls can never mislabel content.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::error::CurateError;
use crate::import;
use crate::index::parse_indices;
use crate::models::{Snapshot, TurnPair};
use crate::pairs::{append_bulk, append_pair, pairs, remove_pairs};
use crate::store::{DatasetStore, HubStore};

/// Result of a remove operation, for shell reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Pairs actually removed (after dedup).
    pub removed: usize,
    /// Pairs remaining in the pushed snapshot.
    pub remaining: usize,
}

/// A single-user curation session against one remote dataset.
///
/// Holds no dataset state of its own — each operation re-fetches, so
/// concurrent external writers are not coordinated with (last push wins).
pub struct Session {
    store: Arc<dyn DatasetStore>,
    dataset: String,
    private: bool,
}

impl Session {
    pub fn new(store: Arc<dyn DatasetStore>, dataset: impl Into<String>, private: bool) -> Self {
        Self {
            store,
            dataset: dataset.into(),
            private,
        }
    }

    /// Build a session over the real hub store described by the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = HubStore::from_config(&config.store)?;
        Ok(Self::new(
            Arc::new(store),
            config.store.dataset.clone(),
            config.store.private,
        ))
    }

    /// Dataset identifier this session curates.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    async fn fetch(&self) -> Result<Snapshot> {
        let snapshot = self.store.fetch(&self.dataset).await?;
        snapshot.check_pairing()?;
        Ok(snapshot)
    }

    async fn push(&self, snapshot: &Snapshot) -> Result<()> {
        self.store.push(&self.dataset, snapshot, self.private).await
    }

    /// List all turn pairs in original order.
    pub async fn view(&self) -> Result<Vec<TurnPair>> {
        let snapshot = self.fetch().await?;
        Ok(pairs(&snapshot).collect())
    }

    /// Remove the pairs named by index/range tokens (e.g. `"1 3 5-7"`) and
    /// push the result.
    pub async fn remove(&self, tokens: &str) -> Result<RemoveOutcome> {
        let snapshot = self.fetch().await?;
        let indices = parse_indices(tokens, snapshot.pair_count())?;
        let removed = indices.len();
        let updated = remove_pairs(snapshot, &indices);
        self.push(&updated).await?;
        Ok(RemoveOutcome {
            removed,
            remaining: updated.pair_count(),
        })
    }

    /// Append one manual pair and push. Returns the new pair count.
    pub async fn add(&self, user: &str, assistant: &str) -> Result<usize> {
        let snapshot = self.fetch().await?;
        let updated = append_pair(snapshot, user, assistant);
        self.push(&updated).await?;
        Ok(updated.pair_count())
    }

    /// Append several pairs from parallel user/assistant lists and push.
    ///
    /// Fails with [`CurateError::ShapeMismatch`] before any fetch when the
    /// list lengths differ. Returns the number of pairs appended.
    pub async fn add_many(&self, users: &[String], assistants: &[String]) -> Result<usize> {
        if users.len() != assistants.len() {
            return Err(CurateError::ShapeMismatch {
                users: users.len(),
                assistants: assistants.len(),
            }
            .into());
        }
        let mut snapshot = self.fetch().await?;
        for (user, assistant) in users.iter().zip(assistants) {
            snapshot = append_pair(snapshot, user, assistant);
        }
        self.push(&snapshot).await?;
        Ok(users.len())
    }

    /// Append schema-validated imported records and push.
    ///
    /// Imported entries are held to the same pairing rule as everything else:
    /// even count, strict user/assistant alternation. Returns the number of
    /// pairs appended.
    pub async fn import(&self, entries: Vec<crate::models::Record>) -> Result<usize> {
        let incoming = Snapshot::new(entries);
        incoming.check_pairing()?;
        let added = incoming.pair_count();

        let snapshot = self.fetch().await?;
        let updated = append_bulk(snapshot, incoming.records);
        self.push(&updated).await?;
        Ok(added)
    }

    /// Validate and append records from a raw JSON value (HTTP import path).
    pub async fn import_json(&self, value: serde_json::Value) -> Result<usize> {
        let entries = import::records_from_json(value)?;
        self.import(entries).await
    }
}
