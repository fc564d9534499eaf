use std::fs::OpenOptions;

use anyhow::bail;
use anyhow::Result;
use clap::CommandFactory;
use clap::FromArgMatches;
use log::LevelFilter;
use specforge_chat::{Config, ConfigKey, PipelineStatus, RequestPipeline, SpecApiClient};

mod cli;
mod commands;
mod render;
mod repl;

use cli::{Cli, Commands, ConfigCommands};

const LOG_FILE: &str = "specforge.log";

fn init_logging(command: &Commands) -> Result<()> {
    let log_level_filter = Config::get(ConfigKey::LogLevel)
        .parse()
        .unwrap_or(LevelFilter::Info);

    match command {
        Commands::Chat => {
            // Keep the interactive prompt clean.
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(LOG_FILE)?;

            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
        }
        _ => {
            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .init();
        }
    }

    return Ok(());
}

async fn ask(prompt: &str) -> Result<()> {
    let mut pipeline = RequestPipeline::new(Box::<SpecApiClient>::default());
    pipeline.send(prompt).await?;

    if let Some(reply) = pipeline.messages().last() {
        println!("{}", render::render_message(reply));
    }

    if pipeline.status() == PipelineStatus::Failed {
        bail!(
            "Specification generation failed: {}",
            pipeline.last_error().unwrap_or("unknown error")
        );
    }

    return Ok(());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    Config::load(cmd.clone(), vec![&matches]).await?;

    let command = cli.command.unwrap_or(Commands::Chat);
    init_logging(&command)?;
    log::info!("Using spec API at {}", Config::get(ConfigKey::ApiUrl));

    match command {
        Commands::Chat => repl::start(Box::<SpecApiClient>::default()).await,
        Commands::Ask { prompt } => ask(&prompt).await,
        Commands::Config {
            action: ConfigCommands::Default,
        } => {
            println!("{}", Config::serialize_default(cmd));
            Ok(())
        }
        Commands::Config {
            action: ConfigCommands::Path,
        } => {
            println!("{}", Config::get(ConfigKey::ConfigFile));
            Ok(())
        }
    }
}
