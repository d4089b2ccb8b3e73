pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bharatshop_core::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "bharatshop",
    about = "BharatShop shopping assistant CLI",
    long_about = "Query the BharatShop recommendation engine: one-shot recommendations, \
                  an interactive chat loop, catalog listing, and config inspection.",
    after_help = "Examples:\n  bharatshop recommend \"vegan snacks under ₹300\"\n  \
                  bharatshop recommend --ai --json \"cotton kurta for summer\"\n  \
                  bharatshop chat\n  bharatshop catalog --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend products for a single free-text query")]
    Recommend {
        #[arg(help = "The shopping query, e.g. \"vegan snacks under ₹300\"")]
        message: String,
        #[arg(long, help = "Consult the Gemini analyzer before scoring")]
        ai: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Interactive chat session (type 'exit' to leave)")]
    Chat,
    #[command(about = "List the product catalog")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with secrets redacted")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config error: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Recommend { message, ai: false, json } => {
            commands::recommend::run(&config, &message, json)
        }
        Command::Recommend { message, ai: true, json } => {
            commands::recommend::run_assisted(&config, &message, json).await
        }
        Command::Chat => commands::chat::run(&config).await,
        Command::Catalog { json } => commands::catalog::run(json),
        Command::Config => commands::CommandResult { exit_code: 0, output: commands::config::run(&config) },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
