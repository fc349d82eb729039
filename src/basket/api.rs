//! # API Facade
//!
//! The single entry point for basket operations, whatever the UI. It owns the current
//! [`AppState`] and the [`BlobStore`] it came from, and for every call:
//!
//! 1. resolves display indexes and list selectors to ids,
//! 2. runs the pure operation from [`crate::commands`],
//! 3. swaps in the new state and saves it.
//!
//! ## Failure Modes
//!
//! - Validation errors come back as `Err`; the state is unchanged.
//! - A list or item that vanished between display and action is not an error: the
//!   call returns a warning message and changes nothing.
//! - A failed save comes back as `Err`, but the new state stays in memory.
//! - Export and share failures never touch state. They are logged and reported as
//!   messages.
//!
//! ## What the API Does NOT Do
//!
//! No stdout, no stderr, no formatting. It returns [`CmdResult`] values and the CLI
//! decides how they look.
//!
//! `BasketApi<S: BlobStore>` runs on `FileStore` in production and `InMemoryStore`
//! in tests.

use crate::commands::{self, display, items, lists};
use crate::config::BasketConfig;
use crate::error::{BasketError, Result};
use crate::export;
use crate::index::{resolve_items, resolve_list, ItemIndex, ListSelector};
use crate::model::{ItemFields, ShoppingList, SortKey, ViewMode};
use crate::share::{self, ShareRequest};
use crate::state::AppState;
use crate::store::{load_state, save_state, BlobStore};
use chrono::Local;
use std::path::PathBuf;
use uuid::Uuid;

pub struct BasketApi<S: BlobStore> {
    store: S,
    state: AppState,
    config_dir: PathBuf,
}

impl<S: BlobStore> BasketApi<S> {
    /// Loads the persisted state from `store`. `config_dir` holds `config.json`.
    pub fn load(store: S, config_dir: PathBuf) -> Result<Self> {
        let state = load_state(&store)?;
        Ok(Self {
            store,
            state,
            config_dir,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_list(&mut self, name: &str) -> Result<CmdResult> {
        let next = lists::create(&self.state, name)?;
        self.commit(next, "create list")?;

        let list = self.selected()?.clone();
        let message = CmdMessage::success(format!("Created list '{}'", list.name));
        Ok(CmdResult::default()
            .with_affected_lists(vec![list])
            .with_message(message))
    }

    pub fn delete_list(&mut self, selector: &ListSelector) -> Result<CmdResult> {
        let id = resolve_list(&self.state, selector)?;
        let removed = self.list_by_id(&id)?.clone();

        let next = match lists::delete(&self.state, &id) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "delete list")?;

        let mut result = CmdResult::default()
            .with_message(CmdMessage::success(format!("Deleted list '{}'", removed.name)));
        if let Some(now_selected) = self.state.selected_list() {
            result.add_message(CmdMessage::info(format!(
                "Now showing '{}'",
                now_selected.name
            )));
        }
        Ok(result.with_affected_lists(vec![removed]))
    }

    pub fn select_list(&mut self, selector: &ListSelector) -> Result<CmdResult> {
        let id = resolve_list(&self.state, selector)?;
        let next = match lists::select(&self.state, &id) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "select list")?;

        let list = self.selected()?.clone();
        let message = CmdMessage::success(format!("Switched to '{}'", list.name));
        Ok(CmdResult::default()
            .with_affected_lists(vec![list])
            .with_message(message))
    }

    pub fn update_budget(&mut self, budget: f64) -> Result<CmdResult> {
        let id = self.selected_id()?;
        let next = match lists::update_budget(&self.state, &id, budget) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "update budget")?;

        let list = self.list_by_id(&id)?.clone();
        let message = CmdMessage::success(format!(
            "Budget for '{}' set to {}",
            list.name,
            list.currency.format(list.budget)
        ));
        Ok(CmdResult::default()
            .with_affected_lists(vec![list])
            .with_message(message))
    }

    /// `None` or blank text clears the description.
    pub fn update_description(&mut self, description: Option<&str>) -> Result<CmdResult> {
        let id = self.selected_id()?;
        let next = match lists::update_description(&self.state, &id, description) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "update description")?;

        let list = self.list_by_id(&id)?.clone();
        let message = match &list.description {
            Some(_) => CmdMessage::success(format!("Updated description of '{}'", list.name)),
            None => CmdMessage::success(format!("Cleared description of '{}'", list.name)),
        };
        Ok(CmdResult::default()
            .with_affected_lists(vec![list])
            .with_message(message))
    }

    pub fn add_item(&mut self, fields: ItemFields) -> Result<CmdResult> {
        let list_id = self.selected_id()?;
        let (next, item_id) = match items::add(&self.state, &list_id, fields) {
            Ok(added) => added,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "add item")?;

        let list = self.list_by_id(&list_id)?;
        let item = list
            .item(&item_id)
            .cloned()
            .ok_or(BasketError::ItemNotFound(item_id))?;
        let message = CmdMessage::success(format!("Added '{}' to '{}'", item.name, list.name));
        Ok(CmdResult::default()
            .with_affected_items(vec![item])
            .with_message(message))
    }

    /// Flips the purchased flag of every indexed item. Indexes refer to the display
    /// order shown before the call.
    pub fn toggle_items(&mut self, indexes: &[ItemIndex]) -> Result<CmdResult> {
        let list_id = self.selected_id()?;
        let targets = resolve_items(self.selected()?, indexes)?;

        let mut next = self.state.clone();
        let mut result = CmdResult::default();
        let mut changed = Vec::new();
        for (index, item_id) in targets {
            match items::toggle(&next, &list_id, &item_id) {
                Ok(toggled) => {
                    next = toggled;
                    changed.push(item_id);
                }
                Err(e) if e.is_not_found() => {
                    result.add_message(CmdMessage::warning(format!("Item {}: {}", index, e)));
                }
                Err(e) => return Err(e),
            }
        }
        if changed.is_empty() {
            return Ok(result);
        }
        self.commit(next, "toggle items")?;

        let list = self.list_by_id(&list_id)?;
        let affected: Vec<_> = changed
            .iter()
            .filter_map(|id| list.item(id).cloned())
            .collect();
        for item in &affected {
            let verb = if item.purchased { "Bought" } else { "Unmarked" };
            result.add_message(CmdMessage::success(format!("{} '{}'", verb, item.name)));
        }
        Ok(result.with_affected_items(affected))
    }

    /// Edits one item. `update` receives the item's current fields and returns the
    /// complete replacement; optional fields left as `None` are cleared.
    pub fn edit_item<F>(&mut self, index: ItemIndex, update: F) -> Result<CmdResult>
    where
        F: FnOnce(ItemFields) -> ItemFields,
    {
        let list_id = self.selected_id()?;
        let (_, item_id) = resolve_items(self.selected()?, &[index])?[0];
        let current = self
            .selected()?
            .item(&item_id)
            .map(ItemFields::from_item)
            .ok_or(BasketError::ItemNotFound(item_id))?;

        let next = match items::edit(&self.state, &list_id, &item_id, update(current)) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "edit item")?;

        let item = self
            .list_by_id(&list_id)?
            .item(&item_id)
            .cloned()
            .ok_or(BasketError::ItemNotFound(item_id))?;
        let message = CmdMessage::success(format!("Updated '{}'", item.name));
        Ok(CmdResult::default()
            .with_affected_items(vec![item])
            .with_message(message))
    }

    pub fn delete_items(&mut self, indexes: &[ItemIndex]) -> Result<CmdResult> {
        let list_id = self.selected_id()?;
        let list = self.selected()?;
        let targets = resolve_items(list, indexes)?;
        let removed: Vec<_> = targets
            .iter()
            .filter_map(|(_, id)| list.item(id).cloned())
            .collect();

        let mut next = self.state.clone();
        let mut result = CmdResult::default();
        let mut deleted = Vec::new();
        for item in removed {
            match items::delete(&next, &list_id, &item.id) {
                Ok(after) => {
                    next = after;
                    result.add_message(CmdMessage::success(format!("Removed '{}'", item.name)));
                    deleted.push(item);
                }
                Err(e) if e.is_not_found() => {
                    result.add_message(CmdMessage::warning(e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }
        if deleted.is_empty() {
            return Ok(result);
        }
        self.commit(next, "delete items")?;
        Ok(result.with_affected_items(deleted))
    }

    pub fn set_view(&mut self, view: ViewMode) -> Result<CmdResult> {
        let id = self.selected_id()?;
        let next = match display::set_view(&self.state, &id, view) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "set view")?;

        let list = self.list_by_id(&id)?.clone();
        Ok(CmdResult::default().with_affected_lists(vec![list]))
    }

    /// Sorting by the current key again flips the direction.
    pub fn set_sort(&mut self, sort_by: SortKey) -> Result<CmdResult> {
        let id = self.selected_id()?;
        let next = match display::set_sort(&self.state, &id, sort_by) {
            Ok(next) => next,
            Err(e) => return skip_missing(e),
        };
        self.commit(next, "set sort")?;

        let list = self.list_by_id(&id)?.clone();
        Ok(CmdResult::default().with_affected_lists(vec![list]))
    }

    /// The named list, or the selected one. Read-only; does not change selection.
    pub fn show_list(&self, selector: Option<&ListSelector>) -> Result<CmdResult> {
        let list = self.target(selector)?.clone();
        Ok(CmdResult::default().with_affected_lists(vec![list]))
    }

    pub fn list_lists(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_affected_lists(self.state.lists.clone()))
    }

    /// Writes a Markdown export into the configured export directory.
    pub fn export_list(&self, selector: Option<&ListSelector>) -> Result<CmdResult> {
        let list = self.target(selector)?;
        let config = BasketConfig::load(&self.config_dir)?;
        let today = Local::now().date_naive();

        match export::write_export(list, &config.export_dir(), config.rows_per_page, today) {
            Ok(path) => {
                let message =
                    CmdMessage::success(format!("Exported '{}' to {}", list.name, path.display()));
                Ok(CmdResult::default()
                    .with_export_path(path)
                    .with_message(message))
            }
            Err(e) => {
                tracing::warn!(list = %list.name, error = %e, "export failed");
                Ok(CmdResult::default()
                    .with_message(CmdMessage::error(format!("Export failed: {}", e))))
            }
        }
    }

    /// Copies the list to the clipboard. Failures become a warning.
    pub fn share_list(&self, selector: Option<&ListSelector>) -> Result<CmdResult> {
        let list = self.target(selector)?;
        let request = ShareRequest::for_list(list);

        let message = match share::share(&request) {
            Ok(()) => CmdMessage::success(format!("Copied '{}' to the clipboard", list.name)),
            Err(e) => {
                tracing::warn!(list = %list.name, error = %e, "share failed");
                CmdMessage::warning(format!("Could not share '{}': {}", list.name, e))
            }
        };
        Ok(CmdResult::default().with_message(message))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    fn commit(&mut self, next: AppState, operation: &str) -> Result<()> {
        self.state = next;
        tracing::debug!(
            operation,
            lists = self.state.lists.len(),
            selected = ?self.state.selected,
            "committed"
        );
        save_state(&self.store, &self.state)
    }

    fn selected_id(&self) -> Result<Uuid> {
        self.state.selected.ok_or_else(|| {
            BasketError::Api("No list selected. Create one with `basket new <name>`".to_string())
        })
    }

    fn selected(&self) -> Result<&ShoppingList> {
        let id = self.selected_id()?;
        self.list_by_id(&id)
    }

    fn list_by_id(&self, id: &Uuid) -> Result<&ShoppingList> {
        self.state.list(id).ok_or(BasketError::ListNotFound(*id))
    }

    fn target(&self, selector: Option<&ListSelector>) -> Result<&ShoppingList> {
        match selector {
            Some(selector) => {
                let id = resolve_list(&self.state, selector)?;
                self.list_by_id(&id)
            }
            None => self.selected(),
        }
    }
}

/// Turns a vanished list or item into a no-op warning; other errors pass through.
fn skip_missing(err: BasketError) -> Result<CmdResult> {
    if err.is_not_found() {
        tracing::debug!(error = %err, "target missing, nothing changed");
        Ok(CmdResult::default().with_message(CmdMessage::warning(err.to_string())))
    } else {
        Err(err)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
