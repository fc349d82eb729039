//! # Display Indexes
//!
//! Users refer to lists and items by the numbers they see, not by UUIDs. This module
//! maps those numbers back to stable ids:
//!
//! - Lists are numbered 1, 2, ... in storage order, or picked by name.
//! - Items are numbered 1, 2, ... in **display order** (the list's current sort), so
//!   `basket toggle 2` always means the second row the user was just shown.
//!
//! Indexes are only meaningful against the state they were shown from; ids are what
//! the state engine works with.

use crate::error::{BasketError, Result};
use crate::model::{Item, ShoppingList};
use crate::state::AppState;
use crate::views::sorted_items;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A user input naming a list: its position, or its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSelector {
    Index(usize),
    Name(String),
}

impl FromStr for ListSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("List selector cannot be empty".to_string());
        }
        match trimmed.parse::<usize>() {
            Ok(0) => Err("List indexes start at 1".to_string()),
            Ok(n) => Ok(ListSelector::Index(n)),
            Err(_) => Ok(ListSelector::Name(trimmed.to_string())),
        }
    }
}

impl fmt::Display for ListSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListSelector::Index(i) => write!(f, "{}", i),
            ListSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// A 1-based position in a list's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIndex(pub usize);

impl FromStr for ItemIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Item indexes start at 1".to_string()),
            Ok(n) => Ok(ItemIndex(n)),
            Err(_) => Err(format!("Invalid item index: {}", s)),
        }
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item paired with the index it is shown under.
#[derive(Debug, Clone)]
pub struct DisplayItem<'a> {
    pub index: ItemIndex,
    pub item: &'a Item,
}

/// Numbers a list's items in display order.
pub fn index_items(list: &ShoppingList) -> Vec<DisplayItem<'_>> {
    sorted_items(list)
        .into_iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            index: ItemIndex(i + 1),
            item,
        })
        .collect()
}

pub fn resolve_list(state: &AppState, selector: &ListSelector) -> Result<Uuid> {
    let found = match selector {
        ListSelector::Index(n) => state.lists.get(n.wrapping_sub(1)),
        ListSelector::Name(name) => {
            let needle = name.to_lowercase();
            state
                .lists
                .iter()
                .find(|list| list.name.to_lowercase() == needle)
        }
    };
    found
        .map(|list| list.id)
        .ok_or_else(|| BasketError::Api(format!("List {} not found", selector)))
}

/// Resolves display indexes to item ids, failing on the first index that is out of range.
pub fn resolve_items(list: &ShoppingList, indexes: &[ItemIndex]) -> Result<Vec<(ItemIndex, Uuid)>> {
    let indexed = index_items(list);
    indexes
        .iter()
        .map(|idx| {
            indexed
                .iter()
                .find(|di| &di.index == idx)
                .map(|di| (*idx, di.item.id))
                .ok_or_else(|| {
                    BasketError::Api(format!("Item {} not found in list '{}'", idx, list.name))
                })
        })
        .collect()
}
