use crate::commands::checked_fields;
use crate::error::{BasketError, Result};
use crate::model::{Item, ItemFields};
use crate::state::AppState;
use uuid::Uuid;

/// Appends a new item to the list and returns the new state with the item's id.
pub fn add(state: &AppState, list_id: &Uuid, fields: ItemFields) -> Result<(AppState, Uuid)> {
    let fields = checked_fields(fields)?;
    let item = Item::new(fields);
    let item_id = item.id;

    let next = state.with_list(list_id, |list| {
        list.items.push(item);
        list.touch();
        Ok(())
    })?;
    Ok((next, item_id))
}

pub fn toggle(state: &AppState, list_id: &Uuid, item_id: &Uuid) -> Result<AppState> {
    state.with_list(list_id, |list| {
        let item = list
            .items
            .iter_mut()
            .find(|item| &item.id == item_id)
            .ok_or(BasketError::ItemNotFound(*item_id))?;
        item.purchased = !item.purchased;
        list.touch();
        Ok(())
    })
}

/// Replaces every mutable field of the item with `fields`; absent values clear the
/// corresponding field.
pub fn edit(
    state: &AppState,
    list_id: &Uuid,
    item_id: &Uuid,
    fields: ItemFields,
) -> Result<AppState> {
    let fields = checked_fields(fields)?;
    state.with_list(list_id, |list| {
        let item = list
            .items
            .iter_mut()
            .find(|item| &item.id == item_id)
            .ok_or(BasketError::ItemNotFound(*item_id))?;
        item.apply(fields);
        list.touch();
        Ok(())
    })
}

pub fn delete(state: &AppState, list_id: &Uuid, item_id: &Uuid) -> Result<AppState> {
    state.with_list(list_id, |list| {
        let before = list.items.len();
        list.items.retain(|item| &item.id != item_id);
        if list.items.len() == before {
            return Err(BasketError::ItemNotFound(*item_id));
        }
        list.touch();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Priority};
    use crate::test_utils::{item_id, june, list_id, StateFixture};

    fn one_list() -> (AppState, Uuid) {
        let state = StateFixture::new().with_list("Weekly").build();
        let id = list_id(&state, 0);
        (state, id)
    }

    #[test]
    fn add_appends_with_defaults() {
        let (state, list) = one_list();
        let (next, id) = add(&state, &list, ItemFields::new("  Milk ")).unwrap();

        let items = &next.lists[0].items;
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, Category::FruitsAndVegetables);
        assert!(!item.purchased);
        assert_eq!(item.quantity, Some(1));
        assert_eq!(item.priority, Some(Priority::Low));
        assert!(next.lists[0].last_modified > state.lists[0].last_modified);
        assert!(state.lists[0].items.is_empty());
    }

    #[test]
    fn add_keeps_supplied_fields() {
        let (state, list) = one_list();
        let fields = ItemFields::new("Paneer")
            .category(Category::Dairy)
            .price(80.0)
            .store("DMart")
            .due_date(june(5))
            .quantity(2)
            .priority(Priority::High);
        let (next, _) = add(&state, &list, fields).unwrap();

        let item = &next.lists[0].items[0];
        assert_eq!(item.category, Category::Dairy);
        assert_eq!(item.price, Some(80.0));
        assert_eq!(item.store.as_deref(), Some("DMart"));
        assert_eq!(item.due_date, Some(june(5)));
        assert_eq!(item.quantity, Some(2));
        assert_eq!(item.priority, Some(Priority::High));
    }

    #[test]
    fn add_rejects_blank_name_and_negative_price() {
        let (state, list) = one_list();
        assert!(matches!(
            add(&state, &list, ItemFields::new(" ")),
            Err(BasketError::Validation(_))
        ));
        assert!(matches!(
            add(&state, &list, ItemFields::new("Milk").price(-2.0)),
            Err(BasketError::Validation(_))
        ));
    }

    #[test]
    fn add_to_missing_list_is_not_found() {
        let (state, _) = one_list();
        let err = add(&state, &Uuid::new_v4(), ItemFields::new("Milk")).unwrap_err();
        assert!(matches!(err, BasketError::ListNotFound(_)));
    }

    #[test]
    fn add_then_delete_restores_items() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(ItemFields::new("Bread"))
            .build();
        let list = list_id(&state, 0);

        let (added, id) = add(&state, &list, ItemFields::new("Milk")).unwrap();
        let removed = delete(&added, &list, &id).unwrap();
        assert_eq!(removed.lists[0].items, state.lists[0].items);
    }

    #[test]
    fn toggle_twice_restores_purchased() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(ItemFields::new("Milk"))
            .build();
        let list = list_id(&state, 0);
        let item = item_id(&state, 0, 0);

        let once = toggle(&state, &list, &item).unwrap();
        assert!(once.lists[0].items[0].purchased);
        assert!(once.lists[0].last_modified > state.lists[0].last_modified);

        let twice = toggle(&once, &list, &item).unwrap();
        assert!(!twice.lists[0].items[0].purchased);
    }

    #[test]
    fn toggle_only_changes_purchased() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(ItemFields::new("Milk").price(30.0))
            .build();
        let next = toggle(&state, &list_id(&state, 0), &item_id(&state, 0, 0)).unwrap();
        let (before, after) = (&state.lists[0].items[0], &next.lists[0].items[0]);
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, before.price);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn toggle_missing_item_is_not_found() {
        let (state, list) = one_list();
        let err = toggle(&state, &list, &Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, BasketError::ItemNotFound(_)));
    }

    #[test]
    fn edit_overwrites_and_clears_optional_fields() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(
                ItemFields::new("Milk")
                    .price(30.0)
                    .store("More")
                    .due_date(june(1)),
            )
            .build();
        let list = list_id(&state, 0);
        let item = item_id(&state, 0, 0);
        let toggled = toggle(&state, &list, &item).unwrap();

        let fields = ItemFields::new("Toned Milk").category(Category::Dairy);
        let next = edit(&toggled, &list, &item, fields).unwrap();

        let edited = &next.lists[0].items[0];
        assert_eq!(edited.id, item);
        assert_eq!(edited.name, "Toned Milk");
        assert_eq!(edited.category, Category::Dairy);
        assert_eq!(edited.price, None);
        assert_eq!(edited.store, None);
        assert_eq!(edited.due_date, None);
        assert_eq!(edited.quantity, None);
        assert_eq!(edited.priority, None);
        assert!(edited.purchased);
        assert_eq!(edited.created_at, state.lists[0].items[0].created_at);

        let renamed = edit(&state, &list, &item, ItemFields::new("Milk")).unwrap();
        assert!(renamed.lists[0].last_modified > state.lists[0].last_modified);
    }

    #[test]
    fn edit_rejects_blank_name() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(ItemFields::new("Milk"))
            .build();
        let err = edit(
            &state,
            &list_id(&state, 0),
            &item_id(&state, 0, 0),
            ItemFields::new(""),
        )
        .unwrap_err();
        assert!(matches!(err, BasketError::Validation(_)));
    }

    #[test]
    fn delete_removes_item_and_refreshes_list() {
        let state = StateFixture::new()
            .with_list("Weekly")
            .with_item(ItemFields::new("Bread"))
            .with_item(ItemFields::new("Milk"))
            .build();
        let list = list_id(&state, 0);

        let next = delete(&state, &list, &item_id(&state, 0, 0)).unwrap();
        let names: Vec<_> = next.lists[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Milk"]);
        assert!(next.lists[0].last_modified > state.lists[0].last_modified);
    }

    #[test]
    fn delete_missing_item_is_not_found() {
        let (state, list) = one_list();
        let err = delete(&state, &list, &Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }
}
