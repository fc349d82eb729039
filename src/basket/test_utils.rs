//! Fixtures shared by unit tests (and by downstream tests via the `test_utils` feature).

use crate::model::{Item, ItemFields, ShoppingList};
use crate::state::AppState;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

/// Builder for an [`AppState`] with predictable contents.
pub struct StateFixture {
    pub state: AppState,
}

impl Default for StateFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StateFixture {
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
        }
    }

    /// Appends a list whose timestamps are a day in the past, so refreshes are visible.
    pub fn with_list(mut self, name: &str) -> Self {
        let mut list = ShoppingList::new(name.to_string());
        let past = Utc::now() - Duration::days(1);
        list.created_at = past;
        list.last_modified = past;
        if self.state.selected.is_none() {
            self.state.selected = Some(list.id);
        }
        self.state.lists.push(list);
        self
    }

    /// Appends an item to the most recently added list.
    pub fn with_item(mut self, fields: ItemFields) -> Self {
        let list = self
            .state
            .lists
            .last_mut()
            .expect("with_item needs a list first");
        list.items.push(Item::new(fields));
        self
    }

    pub fn build(self) -> AppState {
        self.state
    }
}

pub fn list_id(state: &AppState, index: usize) -> Uuid {
    state.lists[index].id
}

pub fn item_id(state: &AppState, list: usize, item: usize) -> Uuid {
    state.lists[list].items[item].id
}

/// Midnight UTC on the given day of June 2026.
pub fn june(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, 0, 0, 0).unwrap()
}
