//! # Rendering
//!
//! Turns lists and command results into terminal text. Every `render_*` function
//! returns a `String` so output can be tested; the `print_*` wrappers write it.
//!
//! Width math uses `unicode-width`, since item names, the rupee sign and the status
//! glyphs are not all one column wide.

use basket::api::{CmdMessage, MessageLevel};
use basket::index::{index_items, ItemIndex};
use basket::model::{Item, ShoppingList, SortOrder, ViewMode};
use basket::views::{grouped_by_category, grouped_by_due_date, stats};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use std::collections::HashMap;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

pub const LINE_WIDTH: usize = 80;
const GRID_COLUMNS: usize = 3;
const NAME_WIDTH: usize = 28;
const PRICE_WIDTH: usize = 11;
const BOUGHT: &str = "✓";
const PENDING: &str = "□";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// One row per list; the selected list is starred.
pub fn render_lists(lists: &[ShoppingList], selected: Option<Uuid>) -> String {
    if lists.is_empty() {
        return "No lists yet. Create one with `basket new <name>`.\n".to_string();
    }

    let mut out = String::new();
    for (i, list) in lists.iter().enumerate() {
        let marker = if Some(list.id) == selected { "*" } else { " " };
        let s = stats(list);
        let idx = format!("{}.", i + 1);
        let name = pad_to_width(&truncate_to_width(&list.name, NAME_WIDTH), NAME_WIDTH);
        let counts = format!("{}/{} bought", s.purchased_items, s.total_items);
        let updated = format!("updated {}", format_time_ago(list.last_modified));

        out.push_str(&format!(
            "{} {:>3} {} {:<14} {}\n",
            marker.yellow().bold(),
            idx,
            if Some(list.id) == selected {
                name.bold()
            } else {
                name.normal()
            },
            counts,
            updated.dimmed()
        ));
    }
    out
}

/// Header, stats and the items laid out in the list's view mode.
pub fn render_list(list: &ShoppingList, show_purchased: bool, today: NaiveDate) -> String {
    let mut out = render_header(list);
    out.push('\n');

    let indexed = index_items(list);
    if indexed.is_empty() {
        out.push_str("No items yet. Add one with `basket add <name>`.\n");
        return out;
    }

    let indexes: HashMap<Uuid, ItemIndex> = indexed
        .iter()
        .map(|di| (di.item.id, di.index))
        .collect();
    let visible: Vec<&Item> = indexed
        .iter()
        .map(|di| di.item)
        .filter(|item| show_purchased || !item.purchased)
        .collect();

    if visible.is_empty() {
        out.push_str(&format!("{}\n", "Everything on this list is bought.".green()));
        return out;
    }

    match list.view {
        ViewMode::List => render_category_rows(&mut out, list, &visible, &indexes),
        ViewMode::Grid => render_category_grid(&mut out, list, &visible, &indexes),
        ViewMode::Calendar => render_calendar(&mut out, list, &visible, &indexes, today),
    }

    let hidden = indexed.len() - visible.len();
    if hidden > 0 {
        out.push('\n');
        out.push_str(&format!("{}\n", format!("{} bought item(s) hidden", hidden).dimmed()));
    }
    out
}

fn render_header(list: &ShoppingList) -> String {
    let s = stats(list);
    let mut out = format!("{}\n", list.name.bold());
    if let Some(description) = &list.description {
        out.push_str(&format!("{}\n", description.italic()));
    }

    out.push_str(&format!(
        "{} items · {} bought · {}% done\n",
        s.total_items, s.purchased_items, s.completion_percentage
    ));

    if list.budget > 0.0 {
        let remaining = list.currency.format(s.remaining_budget.abs());
        let tail = if s.over_budget() {
            format!("{} over", remaining).red()
        } else {
            format!("{} left", remaining).green()
        };
        out.push_str(&format!(
            "Spent {} of {} · {}\n",
            list.currency.format(s.total_spent),
            list.currency.format(list.budget),
            tail
        ));
    } else if s.total_spent > 0.0 {
        out.push_str(&format!("Total {}\n", list.currency.format(s.total_spent)));
    }

    let arrow = match list.sort_order {
        SortOrder::Ascending => "↑",
        SortOrder::Descending => "↓",
    };
    out.push_str(&format!(
        "{}\n",
        format!("Sorted by {} {} · {} view", list.sort_by.label(), arrow, list.view).dimmed()
    ));
    out
}

fn render_category_rows(
    out: &mut String,
    list: &ShoppingList,
    visible: &[&Item],
    indexes: &HashMap<Uuid, ItemIndex>,
) {
    for (category, items) in grouped_by_category(visible) {
        out.push('\n');
        out.push_str(&format!("{}\n", category.label().bold().cyan()));
        for item in items {
            out.push_str(&item_row(item, list, indexes, true));
        }
    }
}

fn render_category_grid(
    out: &mut String,
    list: &ShoppingList,
    visible: &[&Item],
    indexes: &HashMap<Uuid, ItemIndex>,
) {
    let cell_width = LINE_WIDTH / GRID_COLUMNS;
    for (category, items) in grouped_by_category(visible) {
        out.push('\n');
        out.push_str(&format!("{}\n", category.label().bold().cyan()));
        for row in items.chunks(GRID_COLUMNS) {
            let mut line = String::new();
            for item in row {
                // Plain text first: escape codes would throw off the width math.
                let glyph = if item.purchased { BOUGHT } else { PENDING };
                let cell = format!(
                    "{} {}. {} {}",
                    glyph,
                    index_of(item, indexes),
                    item.name,
                    item.price
                        .map(|p| list.currency.format(p))
                        .unwrap_or_default()
                );
                let cell = pad_to_width(&truncate_to_width(&cell, cell_width - 1), cell_width);
                if item.purchased {
                    line.push_str(&cell.dimmed().to_string());
                } else {
                    line.push_str(&cell);
                }
            }
            out.push_str(&format!("  {}\n", line.trim_end()));
        }
    }
}

fn render_calendar(
    out: &mut String,
    list: &ShoppingList,
    visible: &[&Item],
    indexes: &HashMap<Uuid, ItemIndex>,
    today: NaiveDate,
) {
    let days = grouped_by_due_date(visible);
    if days.is_empty() {
        out.push_str("No items with due dates.
");
    }
    for (day, items) in days {
        out.push('\n');
        out.push_str(&format!("{}\n", day_label(day, today)));
        for item in items {
            out.push_str(&item_row(item, list, indexes, false));
        }
    }

    let undated = visible.iter().filter(|i| i.due_date.is_none()).count();
    if undated > 0 {
        out.push('\n');
        out.push_str(&format!(
            "{}\n",
            format!("{} item(s) without a due date not shown", undated).dimmed()
        ));
    }
}

fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    let text = day.format("%a %b %-d, %Y").to_string();
    if day == today {
        format!("{} {}", text.bold().cyan(), "Today".yellow().bold())
    } else if day < today {
        format!("{} {}", text.bold().red(), "overdue".red())
    } else {
        text.bold().cyan().to_string()
    }
}

fn item_row(
    item: &Item,
    list: &ShoppingList,
    indexes: &HashMap<Uuid, ItemIndex>,
    with_due: bool,
) -> String {
    let idx = format!("{}.", index_of(item, indexes));

    let mut name = item.name.clone();
    if item.effective_quantity() > 1 {
        name.push_str(&format!(" ×{}", item.effective_quantity()));
    }
    let name = pad_to_width(&truncate_to_width(&name, NAME_WIDTH), NAME_WIDTH);
    let name = if item.purchased {
        name.dimmed().strikethrough()
    } else {
        name.normal()
    };

    let price = item
        .price
        .map(|p| list.currency.format(p))
        .unwrap_or_default();

    let mut details = Vec::new();
    if let Some(store) = &item.store {
        details.push(store.clone());
    }
    if with_due {
        if let Some(due) = item.due_date {
            details.push(format!("due {}", due.format("%b %-d")));
        }
    }
    if let Some(priority) = item.priority.filter(|p| p.rank() > 0) {
        details.push(priority.label().to_lowercase());
    }

    let line = format!(
        "  {} {:>4} {} {:>width$}  {}",
        status_glyph(item),
        idx,
        name,
        price,
        details.join(" · ").dimmed(),
        width = PRICE_WIDTH
    );
    format!("{}\n", line.trim_end())
}

fn status_glyph(item: &Item) -> colored::ColoredString {
    if item.purchased {
        BOUGHT.green()
    } else {
        PENDING.normal()
    }
}

fn index_of(item: &Item, indexes: &HashMap<Uuid, ItemIndex>) -> String {
    indexes
        .get(&item.id)
        .map(|idx| idx.to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn render_config(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(&format!("{} = {}\n", key, value));
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
