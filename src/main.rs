use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use docs_parser::{Cli, FetchSession, HttpTransport, ResponseCache, Settings, dispatcher, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::configure_logging(&settings) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    log::info!("Parser started!");
    log::info!("Command line arguments: {:?}", cli);

    match run(&cli, &settings).await {
        Ok(()) => {
            log::info!("Parser finished.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Program failure: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let transport = HttpTransport::new(settings.request_timeout()).context("Failed to build HTTP client")?;
    let cache = ResponseCache::open(settings.cache_path())
        .with_context(|| format!("Failed to open response cache {}", settings.cache_path().display()))?;
    let session = FetchSession::new(transport, cache);

    if cli.clear_cache {
        let removed = session.clear_cache()?;
        log::info!("Cache cleared: {} responses removed", removed);
    }

    dispatcher::run(cli.mode, &session, cli.output, settings)
        .await
        .with_context(|| format!("Mode {} failed", cli.mode))
}
