use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use weathercards::store::source_from_location;
use weathercards::{
    Controller, ControllerState, DataStore, FileSurface, InputEvent, Renderer, Surface,
    WeatherCardsConfig, logging,
};

/// City weather cards with debounced live search
#[derive(Parser, Debug)]
#[command(name = "weathercards", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL or file path of the weather document, overrides the configuration
    #[arg(short, long)]
    source: Option<String>,

    /// Treat each line as typing (debounced) instead of pressing Enter
    #[arg(long)]
    live: bool,

    /// Write rendered content to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Prints each frame to stdout
struct StdoutSurface;

impl Surface for StdoutSurface {
    fn display(&self, content: String) {
        println!("{content}");
    }
}

/// Forward each line of `input` as a search field event until EOF.
///
/// Lines that are not valid UTF-8 are decoded lossily rather than ending the session.
async fn pump_lines<R>(mut input: R, live: bool, tx: mpsc::Sender<InputEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                let event = if live {
                    InputEvent::Changed(line)
                } else {
                    InputEvent::Submit(line)
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WeatherCardsConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if let Some(source) = cli.source {
        config.source.location = source;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging);

    let source = source_from_location(&config.source.location, config.source.timeout())
        .context("Failed to set up data source")?;
    let surface: Arc<dyn Surface> = match cli.output {
        Some(path) => Arc::new(FileSurface::new(path)),
        None => Arc::new(StdoutSurface),
    };

    let controller = Arc::new(Controller::new(
        DataStore::new(source),
        Renderer::new(surface),
        config.search.debounce_delay(),
    ));

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(pump_lines(BufReader::new(tokio::io::stdin()), cli.live, tx));

    info!("Serving weather cards from {}", config.source.location);
    let state = controller
        .launch(rx)
        .await
        .context("Session task failed")?;

    // let the last typed query fire before exiting
    while controller.has_pending_search() {
        tokio::time::sleep(controller.debounce_delay()).await;
    }

    if state == ControllerState::Failed {
        warn!("Exiting after failed load");
        std::process::exit(1);
    }
    Ok(())
}
