//! Error kinds shared across the curation core.
//!
//! The core modules (index parsing, pairing, import, store) fail with a
//! [`CurateError`] so callers can tell kinds apart; shell boundaries wrap
//! these in `anyhow` with context. The HTTP surface maps kinds to status
//! codes via `downcast_ref` (see `server.rs`).

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong inside the curation core.
#[derive(Debug, Error)]
pub enum CurateError {
    /// The credential file is absent or has no `TOKEN=` line.
    #[error("no TOKEN=<value> line found in credential file {}", .0.display())]
    MissingCredential(PathBuf),

    /// A token that is neither a bare positive integer nor a `start-end` range.
    #[error("invalid token '{0}': expected an index or a start-end range")]
    Token(String),

    /// A bare index outside `1..=pair_count` (reported 1-based, as entered).
    #[error("invalid index: {0}")]
    InvalidIndex(usize),

    /// A range with `start < 1`, `end > pair_count`, or `start > end`.
    #[error("invalid range: {0}-{1}")]
    InvalidRange(usize, usize),

    /// Bulk-import input is not a list, or an entry is missing `role`/`content`.
    #[error("invalid import schema: {0}")]
    InvalidImportSchema(String),

    /// Opaque failure from the remote dataset store.
    #[error("remote store error: {0}")]
    RemoteStore(String),

    /// Multi-line add where the user and assistant entry counts differ.
    #[error("entry counts differ: {users} user value(s), {assistants} assistant value(s)")]
    ShapeMismatch { users: usize, assistants: usize },

    /// A snapshot whose flat record count cannot form whole turn pairs.
    #[error("dataset has an odd number of records ({0}); expected whole user/assistant pairs")]
    OddRecordCount(usize),

    /// A pair whose records are not `user` followed by `assistant`.
    #[error("pair {0} is not a user/assistant pair")]
    RolePairing(usize),
}
