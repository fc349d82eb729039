//! # View Computation
//!
//! Derived, read-only views over a [`ShoppingList`]: display order, category and
//! calendar grouping, and budget statistics. Nothing here changes the list; storage
//! order stays the insertion order no matter how the items are displayed.

use crate::model::{Category, Item, ShoppingList, SortKey, SortOrder};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Items in display order for the list's `sort_by` / `sort_order`.
///
/// The sort is stable in both directions: items that compare equal keep their
/// storage order, descending included.
pub fn sorted_items(list: &ShoppingList) -> Vec<&Item> {
    sort_items(&list.items, list.sort_by, list.sort_order)
}

pub fn sort_items(items: &[Item], key: SortKey, order: SortOrder) -> Vec<&Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => collation_key(&a.name)
            .cmp(&collation_key(&b.name))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::Category => a.category.label().cmp(b.category.label()),
        SortKey::Price => a.price.unwrap_or(0.0).total_cmp(&b.price.unwrap_or(0.0)),
        // No due date sorts as +infinity.
        SortKey::DueDate => {
            (a.due_date.is_none(), a.due_date).cmp(&(b.due_date.is_none(), b.due_date))
        }
        SortKey::Priority => a
            .effective_priority()
            .rank()
            .cmp(&b.effective_priority().rank()),
    }
}

/// Case- and accent-folded form of a name: `Éclairs` collates as `eclairs`.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Partitions already-sorted items by category, preserving order within each group.
///
/// Keys iterate in [`Category::ALL`] order; empty categories are absent.
pub fn grouped_by_category<'a>(sorted: &[&'a Item]) -> BTreeMap<Category, Vec<&'a Item>> {
    let mut groups: BTreeMap<Category, Vec<&'a Item>> = BTreeMap::new();
    for item in sorted {
        groups.entry(item.category).or_default().push(*item);
    }
    groups
}

/// Groups already-sorted items by the UTC calendar day of their due date.
///
/// Items without a due date are left out. Keys iterate chronologically.
pub fn grouped_by_due_date<'a>(sorted: &[&'a Item]) -> BTreeMap<NaiveDate, Vec<&'a Item>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&'a Item>> = BTreeMap::new();
    for item in sorted {
        if let Some(due) = item.due_date {
            groups.entry(due.date_naive()).or_default().push(*item);
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListStats {
    pub total_items: usize,
    pub purchased_items: usize,
    /// Rounded to the nearest whole percent; 0 for an empty list.
    pub completion_percentage: u32,
    pub total_spent: f64,
    /// May be negative when spending exceeds the budget.
    pub remaining_budget: f64,
}

impl ListStats {
    pub fn remaining_items(&self) -> usize {
        self.total_items - self.purchased_items
    }

    pub fn over_budget(&self) -> bool {
        self.remaining_budget < 0.0
    }
}

pub fn stats(list: &ShoppingList) -> ListStats {
    let total_items = list.items.len();
    let purchased_items = list.items.iter().filter(|item| item.purchased).count();
    let completion_percentage = if total_items == 0 {
        0
    } else {
        (100.0 * purchased_items as f64 / total_items as f64).round() as u32
    };
    let total_spent: f64 = list.items.iter().map(|item| item.price.unwrap_or(0.0)).sum();

    ListStats {
        total_items,
        purchased_items,
        completion_percentage,
        total_spent,
        remaining_budget: list.budget - total_spent,
    }
}
