use basket::index::{ItemIndex, ListSelector};
use basket::model::{canonical_store, Category, ItemFields, Priority, SortKey, ViewMode};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "basket",
    bin_name = "basket",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Shopping lists, budgets and due dates on the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    List,
    Item,
    Display,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::List => "List Commands:",
            CommandGroup::Item => "Item Commands:",
            CommandGroup::Display => "Display Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "new" | "lists" | "select" | "drop" | "budget" | "describe" => {
                Some(CommandGroup::List)
            }
            "add" | "show" | "toggle" | "edit" | "rm" => Some(CommandGroup::Item),
            "view" | "sort" => Some(CommandGroup::Display),
            "export" | "share" => Some(CommandGroup::Data),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::List,
            CommandGroup::Item,
            CommandGroup::Display,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("basket {version}\n"));
    output.push_str("Shopping lists, budgets and due dates on the command line\n");
    output.push('\n');
    output.push_str("Usage: basket [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints clap's help for one subcommand, or the grouped help if it is unknown.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    List(ListCommands),

    #[command(flatten)]
    Item(ItemCommands),

    #[command(flatten)]
    Display(DisplayCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List(c) => match c {
                ListCommands::New { .. } => "new",
                ListCommands::Lists => "lists",
                ListCommands::Select { .. } => "select",
                ListCommands::Drop { .. } => "drop",
                ListCommands::Budget { .. } => "budget",
                ListCommands::Describe { .. } => "describe",
            },
            Commands::Item(c) => match c {
                ItemCommands::Add { .. } => "add",
                ItemCommands::Show { .. } => "show",
                ItemCommands::Toggle { .. } => "toggle",
                ItemCommands::Edit { .. } => "edit",
                ItemCommands::Rm { .. } => "rm",
            },
            Commands::Display(c) => match c {
                DisplayCommands::View { .. } => "view",
                DisplayCommands::Sort { .. } => "sort",
            },
            Commands::Data(c) => match c {
                DataCommands::Export { .. } => "export",
                DataCommands::Share { .. } => "share",
            },
            Commands::Misc(c) => match c {
                MiscCommands::Config { .. } => "config",
                MiscCommands::Help { .. } => "help",
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Create a list and switch to it
    #[command(alias = "n", display_order = 1)]
    New {
        /// List name words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Show all lists
    #[command(alias = "ls", display_order = 2)]
    Lists,

    /// Switch to another list
    #[command(alias = "s", display_order = 3)]
    Select {
        /// List number or name
        list: ListSelector,
    },

    /// Delete a list and all its items
    #[command(display_order = 4)]
    Drop {
        /// List number or name
        list: ListSelector,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Set the budget of the current list
    #[command(display_order = 5)]
    Budget {
        /// Amount in rupees (0 removes the budget)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Set or clear the description of the current list
    #[command(display_order = 6)]
    Describe {
        /// Description words (omit to clear)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add an item to the current list
    #[command(alias = "a", display_order = 10)]
    Add {
        /// Item name words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        #[command(flatten)]
        fields: ItemArgs,
    },

    /// Show a list (the current one by default)
    #[command(display_order = 11)]
    Show {
        /// List number or name
        list: Option<ListSelector>,
    },

    /// Mark items as bought, or unmark them
    #[command(alias = "t", display_order = 12)]
    Toggle {
        /// Item numbers as shown by `show` (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<ItemIndex>,
    },

    /// Change an item
    #[command(alias = "e", display_order = 13)]
    Edit {
        /// Item number as shown by `show`
        index: ItemIndex,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ItemArgs,

        /// Remove the price
        #[arg(long, conflicts_with = "price")]
        no_price: bool,

        /// Remove the store
        #[arg(long, conflicts_with = "store")]
        no_store: bool,

        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        no_due: bool,
    },

    /// Remove items from the current list
    #[command(alias = "delete", display_order = 14)]
    Rm {
        /// Item numbers as shown by `show` (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<ItemIndex>,
    },
}

/// Optional item attributes shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct ItemArgs {
    /// Category (produce, dairy, meat, pantry, beverages, snacks, household, other)
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Price in rupees
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Store name (Big Bazaar, Reliance Fresh, DMart, More, Spencer's, Local Market, Other, or any name)
    #[arg(short, long, value_parser = parse_store)]
    pub store: Option<String>,

    /// Due date
    #[arg(short, long, value_name = "YYYY-MM-DD", value_parser = parse_due_date)]
    pub due: Option<DateTime<Utc>>,

    /// Quantity
    #[arg(short, long)]
    pub qty: Option<u32>,

    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<Priority>,
}

impl ItemArgs {
    /// Overlays the flags that were given on top of `fields`.
    pub fn apply(&self, mut fields: ItemFields) -> ItemFields {
        if let Some(category) = self.category {
            fields.category = category;
        }
        if let Some(price) = self.price {
            fields.price = Some(price);
        }
        if let Some(store) = &self.store {
            fields.store = Some(store.clone());
        }
        if let Some(due) = self.due {
            fields.due_date = Some(due);
        }
        if let Some(qty) = self.qty {
            fields.quantity = Some(qty);
        }
        if let Some(priority) = self.priority {
            fields.priority = Some(priority);
        }
        fields
    }
}

fn parse_store(s: &str) -> Result<String, String> {
    let store = canonical_store(s);
    if store.is_empty() {
        return Err("Store name cannot be empty".to_string());
    }
    Ok(store)
}

/// Due dates are whole days, stored as midnight UTC.
pub fn parse_due_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
        .and_then(|date| {
            date.and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| format!("Invalid date '{}'", s))
        })
}

#[derive(Subcommand, Debug)]
pub enum DisplayCommands {
    /// Switch the layout of the current list
    #[command(display_order = 20)]
    View {
        /// list, grid or calendar
        mode: ViewMode,
    },

    /// Sort the current list (repeat to reverse)
    #[command(display_order = 21)]
    Sort {
        /// name, category, price, due-date or priority
        key: SortKey,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export a list to a Markdown document
    #[command(display_order = 30)]
    Export {
        /// List number or name (defaults to the current list)
        list: Option<ListSelector>,
    },

    /// Copy a list to the clipboard
    #[command(display_order = 31)]
    Share {
        /// List number or name (defaults to the current list)
        list: Option<ListSelector>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (export-dir, rows-per-page, show-purchased)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for basket or a subcommand
    #[command(display_order = 41)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("basket").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn add_collects_name_and_flags() {
        let cli = parse(&["add", "basmati", "rice", "-c", "pantry", "-p", "120", "--due", "2026-06-05"]);
        match cli.command {
            Some(Commands::Item(ItemCommands::Add { name, fields })) => {
                assert_eq!(name, ["basmati", "rice"]);
                assert_eq!(fields.category, Some(Category::Pantry));
                assert_eq!(fields.price, Some(120.0));
                assert_eq!(
                    fields.due.map(|d| d.date_naive()),
                    NaiveDate::from_ymd_opt(2026, 6, 5)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn toggle_parses_indexes() {
        let cli = parse(&["toggle", "1", "3"]);
        match cli.command {
            Some(Commands::Item(ItemCommands::Toggle { indexes })) => {
                assert_eq!(indexes, [ItemIndex(1), ItemIndex(3)]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn store_flag_uses_known_spelling() {
        let cli = parse(&["add", "milk", "-s", "reliance fresh"]);
        match cli.command {
            Some(Commands::Item(ItemCommands::Add { fields, .. })) => {
                assert_eq!(fields.store.as_deref(), Some("Reliance Fresh"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["basket", "add", "milk", "-s", "  "]).is_err());
    }

    #[test]
    fn zero_index_is_rejected() {
        let args = ["basket", "toggle", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn edit_clear_flags_conflict_with_values() {
        let args = ["basket", "edit", "1", "--price", "5", "--no-price"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn sort_accepts_due_date_spellings() {
        for spelling in ["due-date", "dueDate", "due"] {
            let cli = parse(&["sort", spelling]);
            assert!(matches!(
                cli.command,
                Some(Commands::Display(DisplayCommands::Sort { key: SortKey::DueDate }))
            ));
        }
    }

    #[test]
    fn item_args_only_override_given_flags() {
        let args = ItemArgs {
            store: Some("DMart".into()),
            ..Default::default()
        };
        let fields = args.apply(ItemFields::new("Milk").price(30.0));
        assert_eq!(fields.price, Some(30.0));
        assert_eq!(fields.store.as_deref(), Some("DMart"));
    }

    #[test]
    fn grouped_help_lists_every_group() {
        let help = get_grouped_help();
        for group in CommandGroup::all() {
            assert!(help.contains(group.heading()));
        }
        assert!(help.contains("toggle"));
    }

    #[test]
    fn every_command_belongs_to_a_group() {
        let cmd = Cli::command();
        for sc in cmd.get_subcommands() {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no group",
                sc.get_name()
            );
        }
    }

    #[test]
    fn bad_due_date_is_rejected() {
        assert!(parse_due_date("05/06/2026").is_err());
        assert!(parse_due_date("2026-06-05").is_ok());
    }
}
