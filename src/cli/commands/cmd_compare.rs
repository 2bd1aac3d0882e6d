use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    cli::{
        Context,
        commands::{ExitOnErr, new_spinner},
    },
    compare::{
        Comparison, ComparisonSummary, ReportRow, ValidationMessage, flatten, planned_changes,
        summarize,
    },
    utils::validate_file,
};

#[derive(Args, Debug, Clone)]
#[clap(after_help = r#"
EXAMPLES:
    # semdiff compare --source ./dev.json --target ./prod.json
    Compare two snapshots and list every difference.

    # semdiff compare --session ./sales.session.json --all --plan
    Compare the snapshots of a session, re-apply its skip selections, list
    identical objects too and print the changes an update would apply.

    # semdiff compare --session ./sales.session.json --save
    Same as above, and rewrite the stored skip selections. Selections that no
    longer match any object are dropped.
    "#)]
pub struct CompareArgs {
    /// Session file holding the snapshot paths and skip selections
    #[arg(long, short, conflicts_with_all = ["source", "target"], required_unless_present_all = ["source", "target"])]
    session: Option<PathBuf>,

    /// Source snapshot
    #[arg(long, value_parser = validate_file, requires = "target")]
    source: Option<PathBuf>,

    /// Target snapshot
    #[arg(long, value_parser = validate_file, requires = "source")]
    target: Option<PathBuf>,

    /// Also list objects with identical definitions
    #[arg(long)]
    all: bool,

    /// Comma-separated list of object types to leave out of the comparison
    #[arg(long, value_delimiter = ',')]
    exclude_object_types: Vec<String>,

    /// Print the changes an update would apply, in order
    #[arg(long)]
    plan: bool,

    /// Write the resulting skip selections back to the session file
    #[arg(long, requires = "session")]
    save: bool,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "#")]
    index: String,

    #[tabled(rename = "Type")]
    object_type: String,

    #[tabled(rename = "Source")]
    source: String,

    #[tabled(rename = "Target")]
    target: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Action")]
    action: String,
}

impl ComparisonRow {
    fn from_report_row(index: usize, row: &ReportRow) -> Self {
        let indent = "  ".repeat(row.depth);
        Self {
            index: (index + 1).to_string(),
            object_type: format!("{}{}", indent, row.object_type.to_colored_string()),
            source: side_label(&row.source_object_name, &row.source_object_internal_name),
            target: side_label(&row.target_object_name, &row.target_object_internal_name),
            status: row.status.to_colored_string(),
            action: row.update_action.to_colored_string(),
        }
    }
}

fn side_label(name: &str, internal_name: &str) -> String {
    if internal_name.is_empty() {
        String::new()
    } else if name == internal_name {
        name.to_string()
    } else {
        format!("{} {}", name, format!("({})", internal_name).bright_black())
    }
}

pub async fn execute(args: &CompareArgs, ctx: &Context<'_>) {
    let service = &ctx.services.comparison_service;
    let exclude = Some(args.exclude_object_types.clone());
    let (spinner, events) = new_spinner();

    let comparison = match (&args.session, &args.source, &args.target) {
        (Some(session_path), _, _) => {
            let (mut session, mut comparison) = service
                .compare_session(session_path, exclude, &events)
                .await
                .exit_on_err("Comparison failed");

            if args.save {
                let count = service
                    .save_skip_selections(&mut session, &mut comparison, session_path)
                    .await
                    .exit_on_err("Failed to save session");
                spinner.println(format!(
                    "✅ Saved {} skip selection(s) to '{}'",
                    count,
                    session_path.display()
                ));
            }
            comparison
        }
        (None, Some(source), Some(target)) => service
            .compare_files(source, target, exclude, &events)
            .await
            .exit_on_err("Comparison failed"),
        _ => {
            spinner.finish_and_clear();
            eprintln!("❌ Either --session or both --source and --target are required");
            std::process::exit(1);
        }
    };

    let messages = comparison.validate_selection(&events);
    spinner.finish_and_clear();

    let include_same = args.all || service.compare_config().show_same_definitions;
    print_comparison(&comparison, include_same);
    print_validation_messages(&messages);

    if args.plan {
        print_planned_changes(&comparison);
    }
}

pub fn print_comparison(comparison: &Comparison, include_same_definitions: bool) {
    println!(
        "{} {}",
        "=== Comparison ===".blue(),
        format!("(compatibility level {})", comparison.compatibility_level()).bright_black()
    );

    let rows = flatten(comparison.comparison_objects(), include_same_definitions);
    if rows.is_empty() {
        println!("✅ No differences found");
    } else {
        let table_rows: Vec<ComparisonRow> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| ComparisonRow::from_report_row(i, row))
            .collect();

        let table = Table::new(table_rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
            .to_string();
        println!("{}", table);
    }

    print_summary(&summarize(comparison.comparison_objects()));
}

fn print_summary(summary: &ComparisonSummary) {
    println!(
        "{} same, {} different, {} missing in target, {} missing in source, {} skipped",
        summary.same_definition,
        summary.different_definitions.to_string().yellow(),
        summary.missing_in_target.to_string().green(),
        summary.missing_in_source.to_string().red(),
        summary.skipped.to_string().bright_black()
    );
}

pub fn print_validation_messages(messages: &[ValidationMessage]) {
    if messages.is_empty() {
        return;
    }

    println!("{}", "=== Validation ===".blue());
    for message in messages {
        println!(
            "{} {} '{}': {}",
            message.status.to_colored_string(),
            message.object_type,
            message.name,
            message.message
        );
    }
}

fn print_planned_changes(comparison: &Comparison) {
    let changes = planned_changes(comparison.comparison_objects());

    println!("{}", "=== Planned changes ===".blue());
    if changes.is_empty() {
        println!("✅ Nothing to apply");
        return;
    }

    for (i, change) in changes.iter().enumerate() {
        println!(
            "{:>4}. {} {} '{}'",
            i + 1,
            change.action.to_colored_string(),
            change.object_type,
            change.name
        );
    }
}
