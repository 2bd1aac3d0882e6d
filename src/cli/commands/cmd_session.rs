use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::{
    cli::{
        Context,
        commands::{ExitOnErr, cmd_compare::print_validation_messages, new_spinner},
    },
    utils::validate_file,
};

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Create a session file for two snapshots
    #[clap(after_help = r#"
EXAMPLES:
    # semdiff session init --source ./dev.json --target ./prod.json --session ./sales.session.json
    Relative snapshot paths are stored as given and resolved against the
    directory of the session file.
    "#)]
    Init {
        #[arg(long, required = true, value_parser = validate_file)]
        source: PathBuf,

        #[arg(long, required = true, value_parser = validate_file)]
        target: PathBuf,

        #[arg(long, short, required = true)]
        session: PathBuf,
    },

    /// Show the snapshots and selection count of a session
    Show {
        #[arg(long, short, required = true)]
        session: PathBuf,
    },
}

pub async fn execute(action: &SessionCommands, ctx: &Context<'_>) {
    match action {
        SessionCommands::Init {
            source,
            target,
            session,
        } => {
            ctx.services
                .comparison_service
                .init_session(session, source, target)
                .await
                .exit_on_err("Session creation failed");
            println!("✅ Session created at '{}'", session.display());
        }
        SessionCommands::Show { session } => {
            let session_file = ctx
                .services
                .comparison_service
                .load_session(session)
                .await
                .exit_on_err("Failed to read session");
            let (source, target) = session_file.resolved_paths(session);

            println!("{}", "=== Session ===".blue());
            println!("Source:          {}", source.display());
            println!("Target:          {}", target.display());
            println!("Skip selections: {}", session_file.skip_selections.len());
            if let Some(saved_at) = session_file.saved_at {
                println!("Saved at:        {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
    }
}

pub async fn validate(session: &Path, ctx: &Context<'_>) {
    let (spinner, events) = new_spinner();
    let messages = ctx
        .services
        .comparison_service
        .validate_session(session, &events)
        .await;
    spinner.finish_and_clear();

    let messages = messages.exit_on_err("Validation failed");
    if messages.is_empty() {
        println!("✅ No conflicting actions found");
        return;
    }
    print_validation_messages(&messages);
}
