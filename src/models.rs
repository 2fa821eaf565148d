//! Core data types for the curation pipeline.
//!
//! A dataset is a flat ordered sequence of [`Record`]s; physical position is
//! the only identity a record has. Two consecutive records at flat positions
//! `2i` and `2i+1` form logical turn pair `i`, surfaced as a [`TurnPair`].

use serde::{Deserialize, Serialize};

use crate::error::CurateError;

/// Speaker role of a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Any role string outside the fixed schema. Kept verbatim so imported
    /// data round-trips unchanged, but rejected by pairing validation.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
            Role::Other(s) => f.write_str(s),
        }
    }
}

/// One atomic stored unit of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub role: Role,
    pub content: String,
    /// Fields beyond the fixed schema, passed through unchanged.
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// The complete in-memory copy of the remote dataset at a point in time.
///
/// A snapshot is fetched fresh at the start of every operation, mutated in
/// memory, pushed back whole, and discarded. Nothing survives across
/// operations, so a concurrent external writer can still be overwritten by
/// the next push (last push wins; see the crate docs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of flat records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of whole logical turn pairs.
    pub fn pair_count(&self) -> usize {
        self.records.len() / 2
    }

    /// Verify the flat sequence forms strict user/assistant turn pairs:
    /// even length, and every pair `user` followed by `assistant`.
    ///
    /// Run on every fetch and on every bulk import, so view/remove can never
    /// silently mislabel content. The reported pair number is 1-based.
    pub fn check_pairing(&self) -> Result<(), CurateError> {
        if self.records.len() % 2 != 0 {
            return Err(CurateError::OddRecordCount(self.records.len()));
        }
        for (i, pair) in self.records.chunks(2).enumerate() {
            if pair[0].role != Role::User || pair[1].role != Role::Assistant {
                return Err(CurateError::RolePairing(i + 1));
            }
        }
        Ok(())
    }
}

/// A logical (user, assistant) content pair derived from two consecutive
/// flat records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnPair {
    /// 0-based pair index; shells display it 1-based.
    pub index: usize,
    pub user: String,
    pub assistant: String,
}
