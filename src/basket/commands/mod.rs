//! # State Engine
//!
//! Every operation here is a pure transition `(&AppState, args) -> Result<AppState>`.
//! The input state is never touched; callers swap in the returned state and decide
//! when to persist it (see [`crate::api`]).
//!
//! Errors:
//! - [`BasketError::Validation`]: rejected input, nothing changed.
//! - [`BasketError::ListNotFound`] / [`BasketError::ItemNotFound`]: the id is gone.
//!   The API treats these as no-ops.

use crate::config::BasketConfig;
use crate::error::{BasketError, Result};
use crate::model::{Item, ItemFields, ShoppingList};
use std::path::PathBuf;

pub mod config;
pub mod display;
pub mod items;
pub mod lists;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_lists: Vec<ShoppingList>,
    pub affected_items: Vec<Item>,
    pub export_path: Option<PathBuf>,
    pub config: Option<BasketConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_lists(mut self, lists: Vec<ShoppingList>) -> Self {
        self.affected_lists = lists;
        self
    }

    pub fn with_affected_items(mut self, items: Vec<Item>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: BasketConfig) -> Self {
        self.config = Some(config);
        self
    }
}

pub(crate) fn required_name(raw: &str, what: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BasketError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_negative(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(BasketError::Validation(format!(
            "{} must be a non-negative number, got {}",
            what, value
        )));
    }
    Ok(value)
}

/// Validates and normalizes item fields: trims the name, checks numbers, and
/// turns a blank store into an absent one.
pub(crate) fn checked_fields(fields: ItemFields) -> Result<ItemFields> {
    let name = required_name(&fields.name, "Item name")?;
    let price = fields
        .price
        .map(|p| non_negative(p, "Price"))
        .transpose()?;
    if fields.quantity == Some(0) {
        return Err(BasketError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    let store = fields
        .store
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(ItemFields {
        name,
        price,
        store,
        ..fields
    })
}
