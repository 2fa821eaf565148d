//! # turndeck
//!
//! An interactive curation tool for remotely hosted conversational datasets
//! stored as alternating user/assistant turn pairs.
//!
//! turndeck fetches the full dataset from a hosted store, lets a single user
//! view, remove, and append turn pairs through either a text menu or a
//! browser form, and pushes the whole updated dataset back after every
//! mutation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌─────────────┐
//! │  Menu    │──▶│ Session  │──▶│  Remote     │
//! │  (deck)  │   │ view /   │   │  dataset    │
//! ├──────────┤   │ remove / │   │  store      │
//! │  HTTP    │──▶│ add /    │   │ (fetch/push)│
//! │  form    │   │ import   │   └─────────────┘
//! └──────────┘   └──────────┘
//! ```
//!
//! Both shells are thin translators over the same session layer; the only
//! non-trivial logic is index parsing ([`index`]) and the mapping between
//! logical pair indices and the flat two-rows-per-pair layout ([`pairs`]).
//!
//! ## Concurrency model
//!
//! Single-writer, single-session, whole-dataset overwrite. Every operation
//! re-fetches, mutates in memory, and pushes the full dataset; there is no
//! lock, version check, or conflict detection, so the last push silently
//! wins over a concurrent writer. This is a deliberate, documented
//! limitation, not something the shells work around.
//!
//! ## Quick Start
//!
//! ```bash
//! deck menu                          # interactive text menu
//! deck view                          # one-shot: list all pairs
//! deck remove 1 3 5-7                # one-shot: remove pairs
//! deck add --user "Hi" --assistant "Hello"
//! deck import new_pairs.json
//! deck serve                         # browser form surface
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Record, snapshot, and turn-pair types |
//! | [`error`] | Error kinds for the curation core |
//! | [`index`] | Index/range token parsing |
//! | [`pairs`] | Pairwise record store adapter |
//! | [`import`] | Bulk-import schema validation |
//! | [`store`] | Remote dataset store client and trait |
//! | [`session`] | Shared view/remove/add/import operations |
//! | [`menu`] | Interactive text-menu shell |
//! | [`server`] | HTTP form surface |

pub mod config;
pub mod error;
pub mod import;
pub mod index;
pub mod menu;
pub mod models;
pub mod pairs;
pub mod server;
pub mod session;
pub mod store;
