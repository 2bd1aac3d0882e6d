mod commands;

use clap::Parser;
use colored::Colorize;

use crate::cli::commands::{
    Commands, cmd_compare, cmd_config, cmd_session, cmd_skips, cmd_version,
};
use crate::config::Settings;
use crate::services::AppServices;

pub struct Context<'a> {
    pub settings: &'a Settings,
    pub services: &'a AppServices,
}

#[derive(Parser, Debug)]
#[command(
    name = "semdiff",
    about = "Semantic model comparison CLI",
    long_about = format!(
r#"{} - {}
Compares two tabular model snapshots and remembers the differences you skip."#,
"SEMDIFF".green().bold(),
"Schema comparison for tabular semantic models."
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub async fn execute(&self, ctx: &Context<'_>) {
        match &self.command {
            Some(Commands::Compare(args)) => cmd_compare::execute(args, ctx).await,
            Some(Commands::Skip(args)) => cmd_skips::set_skip(args, true, ctx).await,
            Some(Commands::Unskip(args)) => cmd_skips::set_skip(args, false, ctx).await,
            Some(Commands::Skips { action }) => cmd_skips::execute(action, ctx).await,
            Some(Commands::Session { action }) => cmd_session::execute(action, ctx).await,
            Some(Commands::Validate { session }) => cmd_session::validate(session, ctx).await,
            Some(Commands::Config) => cmd_config::execute(ctx.settings).await,
            Some(Commands::Version(action)) => cmd_version::execute(action).await,
            None => {}
        }
    }

    /// Without a subcommand the help text is printed instead.
    pub fn should_run_main(&self) -> bool {
        self.command.is_none()
    }
}
