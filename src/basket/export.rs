//! # Export
//!
//! Turns a list into a paginated Markdown document: a header block (title, dates,
//! description, budget summary), one table per page, and a closing summary.
//!
//! Building the document ([`ExportDocument::from_list`]) is separate from rendering it
//! ([`render_markdown`]) and from writing it ([`write_export`]), so the content can be
//! checked without touching the filesystem. Rows follow storage order, not the
//! list's current sort.

use crate::error::{BasketError, Result};
use crate::model::{Item, ShoppingList};
use crate::views::stats;
use chrono::NaiveDate;
use pulldown_cmark::{Alignment, CowStr, Event, HeadingLevel, Tag, TagEnd};
use pulldown_cmark_to_cmark::cmark;
use std::fs;
use std::path::{Path, PathBuf};

const PLACEHOLDER: &str = "-";
const PURCHASED_GLYPH: &str = "✓";
const PENDING_GLYPH: &str = "□";
const HEADERS: [&str; 6] = ["Item", "Category", "Price", "Store", "Due Date", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub category: String,
    pub price: String,
    pub store: String,
    pub due_date: String,
    pub status: String,
}

impl ExportRow {
    fn from_item(item: &Item, list: &ShoppingList) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.label().to_string(),
            price: item
                .price
                .filter(|p| *p > 0.0)
                .map(|p| list.currency.format(p))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            store: item
                .store
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            due_date: item
                .due_date
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            status: if item.purchased {
                PURCHASED_GLYPH
            } else {
                PENDING_GLYPH
            }
            .to_string(),
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.category,
            &self.price,
            &self.store,
            &self.due_date,
            &self.status,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSummary {
    pub budget: String,
    pub spent: String,
    pub remaining: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_items: usize,
    pub purchased: usize,
    pub remaining: usize,
    pub total_spent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub created: String,
    pub modified: String,
    pub description: Option<String>,
    pub budget: BudgetSummary,
    /// Always at least one page; an empty list yields one empty page.
    pub pages: Vec<Vec<ExportRow>>,
    pub summary: ExportSummary,
}

impl ExportDocument {
    pub fn from_list(list: &ShoppingList, rows_per_page: usize) -> Self {
        let s = stats(list);
        let rows: Vec<ExportRow> = list
            .items
            .iter()
            .map(|item| ExportRow::from_item(item, list))
            .collect();

        let mut pages: Vec<Vec<ExportRow>> = rows
            .chunks(rows_per_page.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }

        let budget = BudgetSummary {
            budget: list.currency.format(list.budget),
            spent: list.currency.format(s.total_spent),
            remaining: list.currency.format(s.remaining_budget),
        };

        Self {
            title: list.name.clone(),
            created: list.created_at.format("%B %-d, %Y").to_string(),
            modified: list.last_modified.format("%B %-d, %Y").to_string(),
            description: list.description.clone(),
            budget,
            pages,
            summary: ExportSummary {
                total_items: s.total_items,
                purchased: s.purchased_items,
                remaining: s.remaining_items(),
                total_spent: list.currency.format(s.total_spent),
            },
        }
    }
}

/// Renders the document as Markdown.
pub fn render_markdown(doc: &ExportDocument) -> Result<String> {
    let mut events: Vec<Event> = Vec::new();

    heading(&mut events, HeadingLevel::H1, doc.title.clone());

    let mut info = vec![
        format!("Created: {}", doc.created),
        format!("Last Modified: {}", doc.modified),
    ];
    if let Some(description) = &doc.description {
        info.push(format!("Description: {}", description));
    }
    paragraph(&mut events, info);

    paragraph(
        &mut events,
        vec![
            format!("Budget: {}", doc.budget.budget),
            format!("Total Spent: {}", doc.budget.spent),
            format!("Remaining: {}", doc.budget.remaining),
        ],
    );

    let page_count = doc.pages.len();
    for (i, page) in doc.pages.iter().enumerate() {
        if i > 0 {
            events.push(Event::Rule);
        }
        heading(
            &mut events,
            HeadingLevel::H2,
            format!("Page {} of {}", i + 1, page_count),
        );
        table(&mut events, page);
    }

    heading(&mut events, HeadingLevel::H2, "Summary".to_string());
    paragraph(
        &mut events,
        vec![
            format!("Total Items: {}", doc.summary.total_items),
            format!("Purchased: {}", doc.summary.purchased),
            format!("Remaining: {}", doc.summary.remaining),
            format!("Total Spent: {}", doc.summary.total_spent),
        ],
    );

    let mut output = String::new();
    cmark(events.iter(), &mut output)
        .map_err(|e| BasketError::Export(format!("markdown serialization failed: {:?}", e)))?;
    output.push('\n');
    Ok(output)
}

fn heading(events: &mut Vec<Event<'static>>, level: HeadingLevel, text: String) {
    events.push(Event::Start(Tag::Heading {
        level,
        id: None,
        classes: Vec::new(),
        attrs: Vec::new(),
    }));
    events.push(Event::Text(CowStr::from(text)));
    events.push(Event::End(TagEnd::Heading(level)));
}

/// One paragraph, lines separated by hard breaks.
fn paragraph(events: &mut Vec<Event<'static>>, lines: Vec<String>) {
    events.push(Event::Start(Tag::Paragraph));
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            events.push(Event::HardBreak);
        }
        events.push(Event::Text(CowStr::from(line)));
    }
    events.push(Event::End(TagEnd::Paragraph));
}

fn table(events: &mut Vec<Event<'static>>, rows: &[ExportRow]) {
    events.push(Event::Start(Tag::Table(vec![
        Alignment::Left,
        Alignment::Left,
        Alignment::Right,
        Alignment::Left,
        Alignment::Left,
        Alignment::Center,
    ])));

    events.push(Event::Start(Tag::TableHead));
    for header in HEADERS {
        cell(events, header.to_string());
    }
    events.push(Event::End(TagEnd::TableHead));

    for row in rows {
        events.push(Event::Start(Tag::TableRow));
        for value in row.cells() {
            cell(events, value.to_string());
        }
        events.push(Event::End(TagEnd::TableRow));
    }

    events.push(Event::End(TagEnd::Table));
}

fn cell(events: &mut Vec<Event<'static>>, text: String) {
    events.push(Event::Start(Tag::TableCell));
    events.push(Event::Text(CowStr::from(text)));
    events.push(Event::End(TagEnd::TableCell));
}

/// `Weekly Groceries` on 2026-06-05 becomes `weekly-groceries-2026-06-05.md`.
pub fn export_file_name(list_name: &str, date: NaiveDate) -> String {
    let base = list_name
        .to_lowercase()
        .split_whitespace()
        .map(sanitize_filename)
        .collect::<Vec<_>>()
        .join("-");
    let base = if base.is_empty() {
        "list".to_string()
    } else {
        base
    };
    format!("{}-{}.md", base, date.format("%Y-%m-%d"))
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Renders and writes the export into `dir`, returning the written path.
pub fn write_export(
    list: &ShoppingList,
    dir: &Path,
    rows_per_page: usize,
    date: NaiveDate,
) -> Result<PathBuf> {
    let doc = ExportDocument::from_list(list, rows_per_page);
    let markdown = render_markdown(&doc)?;

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(BasketError::Io)?;
    }
    let path = dir.join(export_file_name(&list.name, date));
    fs::write(&path, markdown).map_err(BasketError::Io)?;
    tracing::debug!(path = %path.display(), pages = doc.pages.len(), "exported list");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ItemFields};
    use crate::test_utils::{june, StateFixture};
    use tempfile::TempDir;

    fn groceries() -> ShoppingList {
        let mut list = StateFixture::new()
            .with_list("Weekly Groceries")
            .with_item(
                ItemFields::new("Paneer")
                    .category(Category::Dairy)
                    .price(80.0)
                    .store("DMart")
                    .due_date(june(5)),
            )
            .with_item(ItemFields::new("Bananas"))
            .with_item(ItemFields::new("Soap").category(Category::Household).price(40.0))
            .build()
            .lists
            .remove(0);
        list.items[1].purchased = true;
        list
    }

    #[test]
    fn rows_use_placeholders_and_glyphs() {
        let doc = ExportDocument::from_list(&groceries(), 25);
        let rows = &doc.pages[0];

        assert_eq!(rows[0].name, "Paneer");
        assert_eq!(rows[0].category, "Dairy");
        assert_eq!(rows[0].price, "₹80.00");
        assert_eq!(rows[0].store, "DMart");
        assert_eq!(rows[0].due_date, "Jun 5, 2026");
        assert_eq!(rows[0].status, "□");

        assert_eq!(rows[1].price, "-");
        assert_eq!(rows[1].store, "-");
        assert_eq!(rows[1].due_date, "-");
        assert_eq!(rows[1].status, "✓");
    }

    #[test]
    fn summary_counts_items_and_spend() {
        let doc = ExportDocument::from_list(&groceries(), 25);
        assert_eq!(doc.summary.total_items, 3);
        assert_eq!(doc.summary.purchased, 1);
        assert_eq!(doc.summary.remaining, 2);
        assert_eq!(doc.summary.total_spent, "₹120.00");
    }

    #[test]
    fn budget_block_is_always_present() {
        let mut list = groceries();
        let unset = ExportDocument::from_list(&list, 25);
        assert_eq!(unset.budget.budget, "₹0.00");
        assert!(render_markdown(&unset).unwrap().contains("Budget: ₹0.00"));

        list.budget = 100.0;
        let budget = ExportDocument::from_list(&list, 25).budget;
        assert_eq!(budget.budget, "₹100.00");
        assert_eq!(budget.spent, "₹120.00");
        assert_eq!(budget.remaining, "-₹20.00");
    }

    #[test]
    fn paginates_rows() {
        let doc = ExportDocument::from_list(&groceries(), 2);
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].len(), 2);
        assert_eq!(doc.pages[1].len(), 1);
        assert_eq!(doc.pages[1][0].name, "Soap");
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let doc = ExportDocument::from_list(&ShoppingList::new("Empty".into()), 25);
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].is_empty());
        assert_eq!(doc.summary.total_items, 0);
    }

    #[test]
    fn markdown_contains_sections() {
        let mut list = groceries();
        list.description = Some("Saturday run".into());
        let markdown = render_markdown(&ExportDocument::from_list(&list, 2)).unwrap();

        assert!(markdown.contains("# Weekly Groceries"));
        assert!(markdown.contains("Description: Saturday run"));
        assert!(markdown.contains("Page 1 of 2"));
        assert!(markdown.contains("Page 2 of 2"));
        assert!(markdown.contains("Paneer"));
        assert!(markdown.contains("Due Date"));
        assert!(markdown.contains("Total Items: 3"));
    }

    #[test]
    fn file_name_from_list_name_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 5).unwrap();
        assert_eq!(
            export_file_name("Weekly  Groceries", date),
            "weekly-groceries-2026-06-05.md"
        );
        assert_eq!(
            export_file_name("Mom/Dad", date),
            "mom_dad-2026-06-05.md"
        );
    }

    #[test]
    fn write_export_creates_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("exports");
        let date = NaiveDate::from_ymd_opt(2026, 6, 5).unwrap();

        let path = write_export(&groceries(), &dir, 25, date).unwrap();
        assert_eq!(path, dir.join("weekly-groceries-2026-06-05.md"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("Bananas"));
    }
}
