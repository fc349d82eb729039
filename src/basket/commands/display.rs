//! Display preferences. These change how a list is shown, not what it holds, so
//! neither operation refreshes `last_modified`.

use crate::error::Result;
use crate::model::{SortKey, SortOrder, ViewMode};
use crate::state::AppState;
use uuid::Uuid;

pub fn set_view(state: &AppState, list_id: &Uuid, view: ViewMode) -> Result<AppState> {
    state.with_list(list_id, |list| {
        list.view = view;
        Ok(())
    })
}

/// Re-selecting the current key while ascending flips to descending; anything else
/// (a new key, or the current key while descending) resets to ascending.
pub fn set_sort(state: &AppState, list_id: &Uuid, sort_by: SortKey) -> Result<AppState> {
    state.with_list(list_id, |list| {
        list.sort_order = if list.sort_by == sort_by && list.sort_order == SortOrder::Ascending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        list.sort_by = sort_by;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{list_id, StateFixture};

    #[test]
    fn set_view_keeps_last_modified() {
        let state = StateFixture::new().with_list("A").build();
        let id = list_id(&state, 0);
        let next = set_view(&state, &id, ViewMode::Calendar).unwrap();
        assert_eq!(next.lists[0].view, ViewMode::Calendar);
        assert_eq!(next.lists[0].last_modified, state.lists[0].last_modified);
    }

    #[test]
    fn same_key_cycles_ascending_descending_ascending() {
        let state = StateFixture::new().with_list("A").build();
        let id = list_id(&state, 0);

        let first = set_sort(&state, &id, SortKey::Price).unwrap();
        assert_eq!(first.lists[0].sort_by, SortKey::Price);
        assert_eq!(first.lists[0].sort_order, SortOrder::Ascending);

        let second = set_sort(&first, &id, SortKey::Price).unwrap();
        assert_eq!(second.lists[0].sort_order, SortOrder::Descending);

        let third = set_sort(&second, &id, SortKey::Price).unwrap();
        assert_eq!(third.lists[0].sort_order, SortOrder::Ascending);
    }

    #[test]
    fn current_key_flips_immediately() {
        // Lists start sorted by name ascending.
        let state = StateFixture::new().with_list("A").build();
        let id = list_id(&state, 0);
        let next = set_sort(&state, &id, SortKey::Name).unwrap();
        assert_eq!(next.lists[0].sort_order, SortOrder::Descending);
    }

    #[test]
    fn changing_key_resets_to_ascending() {
        let state = StateFixture::new().with_list("A").build();
        let id = list_id(&state, 0);
        let desc = set_sort(&state, &id, SortKey::Name).unwrap();
        let next = set_sort(&desc, &id, SortKey::Priority).unwrap();
        assert_eq!(next.lists[0].sort_by, SortKey::Priority);
        assert_eq!(next.lists[0].sort_order, SortOrder::Ascending);
        assert_eq!(next.lists[0].last_modified, state.lists[0].last_modified);
    }
}
