use crate::commands::{non_negative, required_name};
use crate::error::{BasketError, Result};
use crate::model::ShoppingList;
use crate::state::AppState;
use uuid::Uuid;

/// Appends a new empty list and selects it.
pub fn create(state: &AppState, name: &str) -> Result<AppState> {
    let name = required_name(name, "List name")?;
    let list = ShoppingList::new(name);

    let mut next = state.clone();
    next.selected = Some(list.id);
    next.lists.push(list);
    Ok(next)
}

/// Removes a list. When it was selected, the first remaining list takes over.
pub fn delete(state: &AppState, list_id: &Uuid) -> Result<AppState> {
    if state.list(list_id).is_none() {
        return Err(BasketError::ListNotFound(*list_id));
    }

    let mut next = state.clone();
    next.lists.retain(|list| &list.id != list_id);
    if next.selected.as_ref() == Some(list_id) {
        next.selected = next.lists.first().map(|list| list.id);
    }
    Ok(next)
}

pub fn select(state: &AppState, list_id: &Uuid) -> Result<AppState> {
    if state.list(list_id).is_none() {
        return Err(BasketError::ListNotFound(*list_id));
    }

    let mut next = state.clone();
    next.selected = Some(*list_id);
    Ok(next)
}

pub fn update_budget(state: &AppState, list_id: &Uuid, budget: f64) -> Result<AppState> {
    let budget = non_negative(budget, "Budget")?;
    state.with_list(list_id, |list| {
        list.budget = budget;
        list.touch();
        Ok(())
    })
}

/// Sets the list description. Blank text clears it.
pub fn update_description(
    state: &AppState,
    list_id: &Uuid,
    description: Option<&str>,
) -> Result<AppState> {
    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    state.with_list(list_id, |list| {
        list.description = description;
        list.touch();
        Ok(())
    })
}
