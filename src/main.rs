use clap::CommandFactory;
use semdiff::{
    cli::{Cli, Context},
    config::Settings,
    services::AppServices,
    utils,
};

#[tokio::main]
async fn main() {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let cli = Cli::parse_args();

    utils::logger::init_logging(&settings.logs);

    if cli.should_run_main() {
        let _ = Cli::command().print_help();
        return;
    }

    let app_services = AppServices::new(&settings);

    cli.execute(&Context {
        settings: &settings,
        services: &app_services,
    })
    .await;
}
