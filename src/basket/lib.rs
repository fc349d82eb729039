//! # Basket Architecture
//!
//! Basket is a **UI-agnostic shopping-list library** with a command-line client on top.
//! Everything from the API inward takes Rust values and returns Rust values; only the
//! CLI knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders lists, handles terminal I/O    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the current AppState and the store                  │
//! │  - Resolves display indexes to ids, commits, persists       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Engine (state.rs, commands/*.rs) + views.rs          │
//! │  - Pure transitions: (&AppState, args) -> AppState          │
//! │  - Sorting, grouping and stats computed on demand           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BlobStore trait, FileStore and InMemoryStore             │
//! │  - load_state / save_state own the serialized format        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Export (Markdown documents) and share (clipboard) sit beside the API as thin
//! adapters; neither can change state.
//!
//! ## Indexes
//!
//! Users type `3`, not a UUID. Item numbers follow the list's current display order,
//! list numbers follow storage order. See [`index`].
//!
//! ## Testing Strategy
//!
//! 1. **State engine** (`commands/*.rs`, `views.rs`): the bulk of the tests, on
//!    fixtures built with `test_utils::StateFixture`.
//! 2. **API** (`api.rs`): dispatch, commit and persistence against `InMemoryStore`.
//! 3. **CLI** (`tests/`): the binary end to end, with `BASKET_HOME` in a temp dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: State transitions for lists, items and display preferences
//! - [`views`]: Sorting, grouping and statistics
//! - [`state`]: `AppState`, the lists plus the selection
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`ShoppingList`, `Item`, `Category`, ...)
//! - [`index`]: Display indexing for lists and items
//! - [`config`]: Configuration management
//! - [`export`]: Markdown export documents
//! - [`share`]: Clipboard sharing
//! - [`init`]: Data directory discovery and wiring
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod init;
pub mod model;
pub mod share;
pub mod state;
pub mod store;
pub mod views;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
