use clap::{Args, crate_name, crate_version};
use colored::Colorize;

#[derive(Args, Debug)]
pub struct VersionCommand {
    /// Print only the version number
    #[arg(long, short)]
    short: bool,
}

pub async fn execute(action: &VersionCommand) {
    if action.short {
        println!("{}", crate_version!());
    } else {
        println!(
            "{} version: {}",
            crate_name!().to_uppercase().green().bold(),
            crate_version!()
        );
    }
}
