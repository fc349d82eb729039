//! # Storage Layer
//!
//! Persistence is a keyed blob store behind the [`BlobStore`] trait. The core never
//! looks inside a backend; it hands over serialized text and gets it back.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per key inside the data directory.
//! - [`memory::InMemoryStore`]: a `RefCell`-backed map for tests.
//!
//! ## Keys
//!
//! ```text
//! <data dir>/
//! ├── shoppingLists.json   # every list, as a JSON array
//! ├── selectedList.json    # id of the selected list
//! └── config.json          # see config.rs (not managed by the store)
//! ```
//!
//! ## Load and Save
//!
//! [`load_state`] runs once at startup; [`save_state`] after every committed
//! operation. Loading backfills fields that older data lacks (`sortBy`, `sortOrder`,
//! `view`, `budget`) and normalizes `currency`, so whatever was on disk comes back as
//! a complete [`AppState`].

use crate::error::{BasketError, Result};
use crate::model::ShoppingList;
use crate::state::AppState;
use uuid::Uuid;

pub mod fs;
pub mod memory;

pub const LISTS_KEY: &str = "shoppingLists";
pub const SELECTION_KEY: &str = "selectedList";

/// Abstract interface for blob persistence.
pub trait BlobStore {
    /// Returns the blob stored under `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

pub fn load_state<S: BlobStore>(store: &S) -> Result<AppState> {
    let lists: Vec<ShoppingList> = match store.load(LISTS_KEY)? {
        Some(blob) if !blob.trim().is_empty() => {
            serde_json::from_str(&blob).map_err(BasketError::Serialization)?
        }
        _ => Vec::new(),
    };

    let selected = store
        .load(SELECTION_KEY)?
        .and_then(|blob| serde_json::from_str::<Option<Uuid>>(&blob).ok())
        .flatten();

    let state = AppState::new(lists, selected);
    tracing::debug!(
        lists = state.lists.len(),
        selected = ?state.selected,
        "loaded state"
    );
    Ok(state)
}

pub fn save_state<S: BlobStore>(store: &S, state: &AppState) -> Result<()> {
    let lists = serde_json::to_string_pretty(&state.lists).map_err(BasketError::Serialization)?;
    store.save(LISTS_KEY, &lists)?;

    let selected = serde_json::to_string(&state.selected).map_err(BasketError::Serialization)?;
    store.save(SELECTION_KEY, &selected)?;

    tracing::debug!(lists = state.lists.len(), "saved state");
    Ok(())
}
