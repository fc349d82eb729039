//! # Data Model
//!
//! Plain data: [`ShoppingList`], [`Item`] and the enumerated domains they draw from.
//! No behavior lives here beyond constructors, labels and parsing; every state change
//! goes through the operations in [`crate::commands`].
//!
//! The serialized shape (camelCase keys, epoch-millisecond timestamps) is the on-disk
//! format read and written by [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store names offered as suggestions. Items may carry any other store name.
pub const STORES: [&str; 7] = [
    "Big Bazaar",
    "Reliance Fresh",
    "DMart",
    "More",
    "Spencer's",
    "Local Market",
    "Other",
];

/// Matches `name` against [`STORES`] ignoring case and surrounding space, returning
/// the known spelling. Unknown names come back trimmed but otherwise unchanged.
pub fn canonical_store(name: &str) -> String {
    let name = name.trim();
    STORES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(name))
        .map_or_else(|| name.to_string(), |known| known.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Fruits & Vegetables")]
    FruitsAndVegetables,
    Dairy,
    #[serde(rename = "Meat & Fish")]
    MeatAndFish,
    Pantry,
    Beverages,
    Snacks,
    Household,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::FruitsAndVegetables,
        Category::Dairy,
        Category::MeatAndFish,
        Category::Pantry,
        Category::Beverages,
        Category::Snacks,
        Category::Household,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FruitsAndVegetables => "Fruits & Vegetables",
            Category::Dairy => "Dairy",
            Category::MeatAndFish => "Meat & Fish",
            Category::Pantry => "Pantry",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Category::FruitsAndVegetables => "produce",
            Category::Dairy => "dairy",
            Category::MeatAndFish => "meat",
            Category::Pantry => "pantry",
            Category::Beverages => "beverages",
            Category::Snacks => "snacks",
            Category::Household => "household",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the full label ("Meat & Fish") or the short slug ("meat"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().to_lowercase() == needle || c.slug() == needle)
            .ok_or_else(|| {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.slug()).collect();
                format!("Unknown category '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ordinal used for sorting: low=0, medium=1, high=2.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            _ => Err(format!("Unknown priority '{}' (expected low, medium or high)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Category,
    Price,
    DueDate,
    Priority,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Category => "Category",
            SortKey::Price => "Price",
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "price" => Ok(SortKey::Price),
            "duedate" | "due" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            _ => Err(format!(
                "Unknown sort key '{}' (expected name, category, price, due-date or priority)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
    Calendar,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "grid" => Ok(ViewMode::Grid),
            "calendar" | "cal" => Ok(ViewMode::Calendar),
            _ => Err(format!("Unknown view '{}' (expected list, grid or calendar)", s)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::List => f.write_str("list"),
            ViewMode::Grid => f.write_str("grid"),
            ViewMode::Calendar => f.write_str("calendar"),
        }
    }
}

/// The single supported display currency.
///
/// Any stored value deserializes to [`Currency::Inr`], which is how currency gets
/// normalized on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
        }
    }

    /// Formats an amount with two decimals, e.g. `₹12.50`.
    pub fn format(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.symbol(), -amount)
        } else {
            format!("{}{:.2}", self.symbol(), amount)
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Currency::Inr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub purchased: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Item {
    /// Builds a fresh, unpurchased item from already validated fields.
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            category: fields.category,
            purchased: false,
            created_at: Utc::now(),
            price: fields.price,
            store: fields.store,
            due_date: fields.due_date,
            quantity: Some(fields.quantity.unwrap_or(1)),
            priority: Some(fields.priority.unwrap_or_default()),
        }
    }

    /// Quantity with the absent case read as 1.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Priority with the absent case read as low.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    /// Overwrites every mutable field. `id`, `created_at` and `purchased` are kept.
    pub(crate) fn apply(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.category = fields.category;
        self.price = fields.price;
        self.store = fields.store;
        self.due_date = fields.due_date;
        self.quantity = fields.quantity;
        self.priority = fields.priority;
    }
}

/// Caller-supplied values for creating or editing an item.
///
/// `None` means "absent": on add, quantity and priority fall back to 1 and low; on
/// edit, the field is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub category: Category,
    pub price: Option<f64>,
    pub store: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub quantity: Option<u32>,
    pub priority: Option<Priority>,
}

impl ItemFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The current values of an existing item, as a starting point for edits.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category,
            price: item.price,
            store: item.store.clone(),
            due_date: item.due_date,
            quantity: item.quantity,
            priority: item.priority,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // Lists written before budgets existed have no budget; they load as 0.
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub view: ViewMode,
}

impl ShoppingList {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            items: Vec::new(),
            created_at: now,
            last_modified: now,
            description: None,
            budget: 0.0,
            currency: Currency::Inr,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            view: ViewMode::default(),
        }
    }

    pub fn item(&self, id: &Uuid) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_store_uses_known_spelling() {
        assert_eq!(canonical_store("dmart"), "DMart");
        assert_eq!(canonical_store("  spencer's "), "Spencer's");
        assert_eq!(canonical_store("Corner Shop"), "Corner Shop");
    }

    #[test]
    fn category_parses_labels_and_slugs() {
        assert_eq!("Meat & Fish".parse::<Category>(), Ok(Category::MeatAndFish));
        assert_eq!("dairy".parse::<Category>(), Ok(Category::Dairy));
        assert_eq!("PRODUCE".parse::<Category>(), Ok(Category::FruitsAndVegetables));
        assert!("toys".parse::<Category>().is_err());
    }

    #[test]
    fn category_default_is_first_in_display_order() {
        assert_eq!(Category::default(), Category::ALL[0]);
    }

    #[test]
    fn sort_key_accepts_due_date_spellings() {
        assert_eq!("due-date".parse::<SortKey>(), Ok(SortKey::DueDate));
        assert_eq!("dueDate".parse::<SortKey>(), Ok(SortKey::DueDate));
        assert_eq!("due".parse::<SortKey>(), Ok(SortKey::DueDate));
    }

    #[test]
    fn new_item_fills_defaults() {
        let item = Item::new(ItemFields::new("Milk"));
        assert!(!item.purchased);
        assert_eq!(item.category, Category::FruitsAndVegetables);
        assert_eq!(item.quantity, Some(1));
        assert_eq!(item.priority, Some(Priority::Low));
    }

    #[test]
    fn absent_quantity_and_priority_read_as_defaults() {
        let mut item = Item::new(ItemFields::new("Eggs"));
        item.quantity = None;
        item.priority = None;
        assert_eq!(item.effective_quantity(), 1);
        assert_eq!(item.effective_priority(), Priority::Low);
    }

    #[test]
    fn currency_normalizes_any_stored_value() {
        let c: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(c, Currency::Inr);
        let c: Currency = serde_json::from_str("null").unwrap();
        assert_eq!(c, Currency::Inr);
        assert_eq!(serde_json::to_string(&Currency::Inr).unwrap(), "\"INR\"");
    }

    #[test]
    fn currency_formats_two_decimals() {
        assert_eq!(Currency::Inr.format(12.5), "₹12.50");
        assert_eq!(Currency::Inr.format(-3.0), "-₹3.00");
    }

    #[test]
    fn list_serializes_with_camel_case_keys() {
        let list = ShoppingList::new("Weekly".into());
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["sortBy"], "name");
        assert_eq!(json["sortOrder"], "asc");
        assert_eq!(json["view"], "list");
        assert_eq!(json["currency"], "INR");
        assert!(json["lastModified"].is_i64());
        assert!(json.get("description").is_none());
    }
}
