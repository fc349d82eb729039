//! # CLI Layer
//!
//! One possible client for the basket library. This is the only code that reads
//! stdin, writes stdout/stderr or decides exit codes.
//!
//! Each `handle_*` function calls one API method and prints its [`CmdResult`]:
//! rendered lists first, then messages. After a change to the current list, the list
//! is shown again so new display indexes are visible right away.

use super::render::{print_messages, render_config, render_list, render_lists};
use super::setup::{
    print_grouped_help, print_help_for_command, Cli, Commands, DataCommands, DisplayCommands,
    ItemArgs, ItemCommands, ListCommands, MiscCommands,
};
use basket::api::{BasketApi, CmdMessage, CmdResult, ConfigAction};
use basket::config::BasketConfig;
use basket::error::Result;
use basket::index::{ItemIndex, ListSelector};
use basket::init::initialize;
use basket::model::{ItemFields, SortKey, ViewMode};
use basket::store::fs::FileStore;
use chrono::Local;
use std::io::{self, Write};

struct AppContext {
    api: BasketApi<FileStore>,
    config: BasketConfig,
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.help {
        match &cli.command {
            Some(command) => print_help_for_command(command.name()),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    // Help needs no data directory.
    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.clone());
    }

    let ctx = initialize()?;
    let mut ctx = AppContext {
        api: ctx.api,
        config: ctx.config,
    };

    match cli.command {
        Some(Commands::List(cmd)) => match cmd {
            ListCommands::New { name } => handle_new(&mut ctx, name.join(" ")),
            ListCommands::Lists => handle_lists(&ctx),
            ListCommands::Select { list } => handle_select(&mut ctx, list),
            ListCommands::Drop { list, yes } => handle_drop(&mut ctx, list, yes),
            ListCommands::Budget { amount } => handle_budget(&mut ctx, amount),
            ListCommands::Describe { text } => handle_describe(&mut ctx, text),
        },
        Some(Commands::Item(cmd)) => match cmd {
            ItemCommands::Add { name, fields } => handle_add(&mut ctx, name.join(" "), fields),
            ItemCommands::Show { list } => handle_show(&ctx, list.as_ref()),
            ItemCommands::Toggle { indexes } => handle_toggle(&mut ctx, &indexes),
            ItemCommands::Edit {
                index,
                name,
                fields,
                no_price,
                no_store,
                no_due,
            } => handle_edit(
                &mut ctx,
                index,
                EditFlags {
                    name,
                    fields,
                    no_price,
                    no_store,
                    no_due,
                },
            ),
            ItemCommands::Rm { indexes } => handle_rm(&mut ctx, &indexes),
        },
        Some(Commands::Display(cmd)) => match cmd {
            DisplayCommands::View { mode } => handle_view(&mut ctx, mode),
            DisplayCommands::Sort { key } => handle_sort(&mut ctx, key),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export { list } => handle_export(&ctx, list.as_ref()),
            DataCommands::Share { list } => handle_share(&ctx, list.as_ref()),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { command } => handle_help(command),
        },
        None => handle_show(&ctx, None),
    }
}

/// Prints the current list, if there is one.
fn show_current(ctx: &AppContext) {
    if let Some(list) = ctx.api.state().selected_list() {
        print!(
            "{}",
            render_list(list, ctx.config.show_purchased, Local::now().date_naive())
        );
    }
}

fn finish(ctx: &AppContext, result: &CmdResult, reshow: bool) {
    print_messages(&result.messages);
    if reshow {
        println!();
        show_current(ctx);
    }
}

fn handle_new(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.create_list(&name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_lists(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_lists()?;
    print!(
        "{}",
        render_lists(&result.affected_lists, ctx.api.state().selected)
    );
    Ok(())
}

fn handle_select(ctx: &mut AppContext, list: ListSelector) -> Result<()> {
    let result = ctx.api.select_list(&list)?;
    finish(ctx, &result, true);
    Ok(())
}

fn handle_drop(ctx: &mut AppContext, list: ListSelector, yes: bool) -> Result<()> {
    if !yes {
        let shown = ctx.api.show_list(Some(&list))?;
        if let Some(target) = shown.affected_lists.first() {
            println!(
                "This will permanently remove '{}' and its {} item(s).",
                target.name,
                target.items.len()
            );
        }
        print!("[Y] To delete: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim() != "Y" {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_list(&list)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_budget(ctx: &mut AppContext, amount: f64) -> Result<()> {
    let result = ctx.api.update_budget(amount)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_describe(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let text = text.join(" ");
    let description = if text.trim().is_empty() {
        None
    } else {
        Some(text.as_str())
    };
    let result = ctx.api.update_description(description)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, name: String, fields: ItemArgs) -> Result<()> {
    let result = ctx.api.add_item(fields.apply(ItemFields::new(name)))?;
    finish(ctx, &result, true);
    Ok(())
}

fn handle_show(ctx: &AppContext, list: Option<&ListSelector>) -> Result<()> {
    if list.is_none() && ctx.api.state().lists.is_empty() {
        print!("{}", render_lists(&[], None));
        return Ok(());
    }

    let result = ctx.api.show_list(list)?;
    let today = Local::now().date_naive();
    for list in &result.affected_lists {
        print!("{}", render_list(list, ctx.config.show_purchased, today));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: &[ItemIndex]) -> Result<()> {
    let result = ctx.api.toggle_items(indexes)?;
    finish(ctx, &result, !result.affected_items.is_empty());
    Ok(())
}

struct EditFlags {
    name: Option<String>,
    fields: ItemArgs,
    no_price: bool,
    no_store: bool,
    no_due: bool,
}

fn handle_edit(ctx: &mut AppContext, index: ItemIndex, flags: EditFlags) -> Result<()> {
    let result = ctx.api.edit_item(index, |current| {
        let mut fields = flags.fields.apply(current);
        if let Some(name) = flags.name {
            fields.name = name;
        }
        if flags.no_price {
            fields.price = None;
        }
        if flags.no_store {
            fields.store = None;
        }
        if flags.no_due {
            fields.due_date = None;
        }
        fields
    })?;
    finish(ctx, &result, true);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, indexes: &[ItemIndex]) -> Result<()> {
    let result = ctx.api.delete_items(indexes)?;
    finish(ctx, &result, !result.affected_items.is_empty());
    Ok(())
}

fn handle_view(ctx: &mut AppContext, mode: ViewMode) -> Result<()> {
    let result = ctx.api.set_view(mode)?;
    finish(ctx, &result, true);
    Ok(())
}

fn handle_sort(ctx: &mut AppContext, key: SortKey) -> Result<()> {
    let result = ctx.api.set_sort(key)?;
    finish(ctx, &result, true);
    Ok(())
}

fn handle_export(ctx: &AppContext, list: Option<&ListSelector>) -> Result<()> {
    let result = ctx.api.export_list(list)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_share(ctx: &AppContext, list: Option<&ListSelector>) -> Result<()> {
    let result = ctx.api.share_list(list)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if key.is_none() {
            print!("{}", render_config(&config.list_all()));
        }
        ctx.config = config.clone();
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<String>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(&cmd),
        None => print_grouped_help(),
    }
    Ok(())
}
