use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;
use inquire::Confirm;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    cli::{
        Context,
        commands::{ExitOnErr, ObjectArgs, new_spinner, parse_object_type},
    },
    compare::SkipSelection,
    types::ComparisonObjectType,
};

#[derive(Subcommand, Debug)]
pub enum SkipsCommands {
    /// List the skip selections stored in a session
    List {
        #[arg(long, short, required = true)]
        session: PathBuf,
    },

    /// Skip, or with --undo restore, every difference of one object type
    #[clap(after_help = r#"
EXAMPLES:
    # semdiff skips type --type Role --session ./sales.session.json
    Skip every role that differs between the snapshots.

    # semdiff skips type --type Role --session ./sales.session.json --undo
    Restore the default action of every skipped role.
    "#)]
    Type {
        #[arg(long, short, required = true)]
        session: PathBuf,

        #[arg(long = "type", short = 't', required = true, value_parser = parse_object_type)]
        object_type: ComparisonObjectType,

        #[arg(long)]
        undo: bool,
    },

    /// Remove every skip selection from a session
    Clear {
        #[arg(long, short, required = true)]
        session: PathBuf,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct SkipSelectionRow {
    #[tabled(rename = "#")]
    index: String,

    #[tabled(rename = "Type")]
    object_type: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Source")]
    source_internal_name: String,

    #[tabled(rename = "Target")]
    target_internal_name: String,
}

impl SkipSelectionRow {
    fn new(index: usize, selection: &SkipSelection) -> Self {
        Self {
            index: (index + 1).to_string(),
            object_type: selection.comparison_object_type().to_colored_string(),
            status: selection.status().to_colored_string(),
            source_internal_name: selection.source_object_internal_name().to_string(),
            target_internal_name: selection.target_object_internal_name().to_string(),
        }
    }
}

pub async fn execute(action: &SkipsCommands, ctx: &Context<'_>) {
    match action {
        SkipsCommands::List { session } => list(session, ctx).await,
        SkipsCommands::Type {
            session,
            object_type,
            undo,
        } => set_skip_for_type(session, *object_type, !undo, ctx).await,
        SkipsCommands::Clear { session, yes } => clear(session, *yes, ctx).await,
    }
}

pub async fn set_skip(args: &ObjectArgs, skip: bool, ctx: &Context<'_>) {
    let (spinner, events) = new_spinner();
    let identity = args.identity();

    let object = ctx
        .services
        .comparison_service
        .set_skip(&args.session, &identity, skip, &events)
        .await;
    spinner.finish_and_clear();

    let object = object.exit_on_err(&format!(
        "Failed to update {} '{}'",
        identity.object_type,
        display_name(args)
    ));

    println!(
        "✅ {} '{}' ({}) is now {}",
        object.object_type(),
        object.display_name(),
        object.status().to_colored_string(),
        object.update_action().to_colored_string()
    );
}

fn display_name(args: &ObjectArgs) -> &str {
    if args.source_name.is_empty() {
        &args.target_name
    } else {
        &args.source_name
    }
}

async fn set_skip_for_type(
    session: &Path,
    object_type: ComparisonObjectType,
    skip: bool,
    ctx: &Context<'_>,
) {
    let (spinner, events) = new_spinner();
    let changed = ctx
        .services
        .comparison_service
        .set_skip_for_type(session, object_type, skip, &events)
        .await;
    spinner.finish_and_clear();

    let changed = changed.exit_on_err(&format!("Failed to update {} objects", object_type));
    let verb = if skip { "skipped" } else { "restored" };
    println!("✅ {} {} object(s) {}", changed, object_type, verb);
}

async fn list(session: &Path, ctx: &Context<'_>) {
    let session_file = ctx
        .services
        .comparison_service
        .load_session(session)
        .await
        .exit_on_err("Failed to list skip selections");

    println!("{}", "=== Skip selections ===".blue());

    if session_file.skip_selections.is_empty() {
        println!("✅ No skip selections found");
        return;
    }

    let rows: Vec<SkipSelectionRow> = session_file
        .skip_selections
        .iter()
        .enumerate()
        .map(|(i, s)| SkipSelectionRow::new(i, s))
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();
    println!("{}", table);
}

async fn clear(session: &Path, yes: bool, ctx: &Context<'_>) {
    let proceed = yes
        || Confirm::new("This will remove all skip selections from the session. Continue?")
            .with_default(false)
            .prompt()
            .unwrap_or(false);

    if !proceed {
        println!("✅ Aborted");
        return;
    }

    let count = ctx
        .services
        .comparison_service
        .clear_skip_selections(session)
        .await
        .exit_on_err("Failed to clear skip selections");

    println!("✅ Removed {} skip selection(s)", count);
}
