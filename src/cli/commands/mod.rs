pub mod cmd_compare;
pub mod cmd_config;
pub mod cmd_session;
pub mod cmd_skips;
pub mod cmd_version;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use crate::{
    cli::commands::{
        cmd_compare::CompareArgs, cmd_session::SessionCommands, cmd_skips::SkipsCommands,
        cmd_version::VersionCommand,
    },
    compare::ObjectIdentity,
    types::ComparisonObjectType,
    utils::{ComparisonEvent, EventReporter},
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two model snapshots, or the snapshots of a session
    Compare(CompareArgs),

    /// Skip one difference and remember it in the session
    Skip(ObjectArgs),

    /// Restore the default action of a skipped difference
    Unskip(ObjectArgs),

    /// Manage stored skip selections
    Skips {
        #[command(subcommand)]
        action: SkipsCommands,
    },

    /// Manage session files
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },

    /// Validate the selected actions of a session
    Validate {
        /// Session file
        #[arg(long, short, required = true)]
        session: PathBuf,
    },

    /// Print the effective configuration
    Config,

    /// Print version
    Version(VersionCommand),
}

/// Identifies one comparison object. Absent sides are left empty.
#[derive(Args, Debug, Clone)]
pub struct ObjectArgs {
    /// Session file
    #[arg(long, short, required = true)]
    pub session: PathBuf,

    /// Object type (Connection, Table, Relationship, Measure, Kpi, Perspective, Culture, Role, Action)
    #[arg(long = "type", short = 't', required = true, value_parser = parse_object_type)]
    pub object_type: ComparisonObjectType,

    /// Source display name
    #[arg(long, default_value = "")]
    pub source_name: String,

    /// Source internal name
    #[arg(long, default_value = "")]
    pub source_id: String,

    /// Target display name
    #[arg(long, default_value = "")]
    pub target_name: String,

    /// Target internal name
    #[arg(long, default_value = "")]
    pub target_id: String,
}

impl ObjectArgs {
    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::new(
            &self.source_name,
            &self.source_id,
            &self.target_name,
            &self.target_id,
            self.object_type,
        )
    }
}

pub fn parse_object_type(input: &str) -> Result<ComparisonObjectType, String> {
    input.parse().map_err(|_| {
        format!(
            "Unknown object type '{}', expected one of: {}",
            input,
            ComparisonObjectType::iter().join(", ")
        )
    })
}

pub trait ExitOnErr<T> {
    fn exit_on_err(self, msg: &str) -> T;
}

impl<T, E: std::fmt::Display> ExitOnErr<T> for Result<T, E> {
    fn exit_on_err(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("❌ {}: {:#}", msg, e);
                std::process::exit(1);
            }
        }
    }
}

/// A spinner fed by comparison events. Progress replaces the spinner message;
/// password prompts are printed above it.
pub fn new_spinner() -> (ProgressBar, EventReporter) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));

    let (tx, mut rx) = mpsc::unbounded_channel::<ComparisonEvent>();
    let pb = spinner.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ComparisonEvent::Progress(message) => pb.set_message(message),
                ComparisonEvent::PasswordPromptNeeded { connection, side } => pb.println(format!(
                    "🔑 Connection '{}' in the {} impersonates an account without a password",
                    connection.yellow(),
                    side
                )),
                ComparisonEvent::Validation(_) => {}
            }
        }
    });

    (spinner, EventReporter::new(Some(tx)))
}
