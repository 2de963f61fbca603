use std::path::PathBuf;

use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::Serialize;

mod cli;

use cli::{Cli, Command, OutputFormat};
use weartube::config::{self, Config};
use weartube::{CatalogClient, output, page};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("weartube.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weartube")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nAPI KEY:\n  Set {} or add `api_key` to {}\n\nLogs are written to: {}",
        config::API_KEY_ENV,
        config::config_path().display(),
        log_dir().join("weartube.log").display()
    )
}

fn video_id(input: &str) -> Result<String> {
    weartube::extract_video_id(input).ok_or_else(|| {
        eyre::eyre!(
            "could not extract video ID from: {input}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  <11-character video ID>"
        )
    })
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => println!("{}", output::render_json(value)),
    }
}

/// Build the API client from the config file and environment
fn connect(verbose: bool) -> Result<CatalogClient> {
    let config = Config::load().wrap_err_with(|| format!("invalid config file {}", config::config_path().display()))?;
    let catalog_config = config.catalog_config()?;
    if verbose {
        eprintln!("Config: {catalog_config:?}");
    }
    debug!("Catalog config: {catalog_config:?}");
    Ok(CatalogClient::connect(catalog_config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cmd = <Cli as clap::CommandFactory>::command().after_help(build_after_help());
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    let format = cli.format;
    match cli.command {
        Command::Search { query, page_token } => {
            let client = connect(cli.verbose)?;
            let results = client.search(&query, page_token.as_deref()).await?;
            emit(format, &results, output::render_videos);
        }
        Command::Trending { page_token } => {
            let client = connect(cli.verbose)?;
            let results = client.browse_trending(page_token.as_deref()).await?;
            emit(format, &results, output::render_videos);
        }
        Command::Video { url } => {
            let id = video_id(&url)?;
            let client = connect(cli.verbose)?;
            let video_page = page::load_video_page(&client, &id).await;
            emit(format, &video_page, output::render_video_page);
        }
        Command::Comments { url, page_token } => {
            let id = video_id(&url)?;
            let client = connect(cli.verbose)?;
            let comments = client.video_comments(&id, page_token.as_deref()).await?;
            emit(format, &comments, output::render_comments);
        }
        Command::Channel { id } => {
            let client = connect(cli.verbose)?;
            match client.channel_details(&id).await? {
                Some(channel) => emit(format, &channel, output::render_channel),
                None => eprintln!("No channel found for {id}"),
            }
        }
        Command::Embed { url, autoplay } => {
            println!("{}", weartube::build_embed_reference(&video_id(&url)?, autoplay));
        }
        Command::Duration { iso8601 } => {
            println!("{}", weartube::parse_duration(Some(&iso8601)));
        }
    }

    Ok(())
}
