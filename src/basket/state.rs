use crate::error::{BasketError, Result};
use crate::model::ShoppingList;
use uuid::Uuid;

/// The full in-memory state: every list plus the selected one.
///
/// Operations in [`crate::commands`] never mutate an `AppState`; they clone it,
/// change the clone and hand it back. Whenever `selected` is `Some`, the id is
/// present in `lists`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub lists: Vec<ShoppingList>,
    pub selected: Option<Uuid>,
}

impl AppState {
    pub fn new(lists: Vec<ShoppingList>, selected: Option<Uuid>) -> Self {
        let mut state = Self { lists, selected };
        state.repair_selection();
        state
    }

    pub fn list(&self, id: &Uuid) -> Option<&ShoppingList> {
        self.lists.iter().find(|list| &list.id == id)
    }

    pub fn selected_list(&self) -> Option<&ShoppingList> {
        self.selected.as_ref().and_then(|id| self.list(id))
    }

    /// Copies the state and runs `f` against the copy of list `id`.
    pub(crate) fn with_list<F>(&self, id: &Uuid, f: F) -> Result<AppState>
    where
        F: FnOnce(&mut ShoppingList) -> Result<()>,
    {
        let mut next = self.clone();
        let list = next
            .lists
            .iter_mut()
            .find(|list| &list.id == id)
            .ok_or(BasketError::ListNotFound(*id))?;
        f(list)?;
        Ok(next)
    }

    /// Points `selected` at an existing list: the current one if still present,
    /// otherwise the first list, otherwise none.
    pub(crate) fn repair_selection(&mut self) {
        let valid = self
            .selected
            .map(|id| self.lists.iter().any(|list| list.id == id))
            .unwrap_or(false);
        if !valid {
            self.selected = self.lists.first().map(|list| list.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selects_first_list_when_selection_is_stale() {
        let a = ShoppingList::new("A".into());
        let b = ShoppingList::new("B".into());
        let first = a.id;
        let state = AppState::new(vec![a, b], Some(Uuid::new_v4()));
        assert_eq!(state.selected, Some(first));
    }

    #[test]
    fn new_keeps_valid_selection() {
        let a = ShoppingList::new("A".into());
        let b = ShoppingList::new("B".into());
        let second = b.id;
        let state = AppState::new(vec![a, b], Some(second));
        assert_eq!(state.selected_list().map(|l| l.name.as_str()), Some("B"));
    }

    #[test]
    fn empty_state_has_no_selection() {
        let state = AppState::new(Vec::new(), Some(Uuid::new_v4()));
        assert!(state.selected.is_none());
        assert!(state.selected_list().is_none());
    }

    #[test]
    fn with_list_leaves_original_untouched() {
        let state = AppState::new(vec![ShoppingList::new("A".into())], None);
        let id = state.lists[0].id;
        let next = state
            .with_list(&id, |list| {
                list.name = "Renamed".into();
                Ok(())
            })
            .unwrap();
        assert_eq!(state.lists[0].name, "A");
        assert_eq!(next.lists[0].name, "Renamed");
    }

    #[test]
    fn with_list_reports_missing_list() {
        let state = AppState::default();
        let missing = Uuid::new_v4();
        let err = state.with_list(&missing, |_| Ok(())).unwrap_err();
        assert!(matches!(err, BasketError::ListNotFound(id) if id == missing));
    }
}
