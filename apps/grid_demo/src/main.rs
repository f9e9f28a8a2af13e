use std::path::PathBuf;

use anyhow::Result;
use card_grid::CardController;
use clap::Parser;
use entity_client::{EntityFetcher, HttpEntityApi};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, DEFAULT_SETTINGS_FILE};
use terminal::TerminalRenderer;

#[derive(Parser, Debug)]
struct Args {
    /// TOML settings file; missing files fall back to defaults.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    grid_size: Option<usize>,
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Cards to click after loading, 0-based.
    #[arg(long, value_delimiter = ',')]
    reveal: Vec<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(grid_size) = args.grid_size {
        settings.grid_size = grid_size;
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.simulated_delay_ms = delay_ms;
    }
    settings.validate()?;
    info!(
        api_base_url = %settings.api_base_url,
        grid_size = settings.grid_size,
        simulated_delay_ms = settings.simulated_delay_ms,
        "card grid starting"
    );

    let fetcher = EntityFetcher::new(
        HttpEntityApi::new(settings.api_base_url()?),
        settings.total_entity_count,
    );
    let mut controller = CardController::new(TerminalRenderer::new())
        .with_simulated_delay(settings.simulated_delay());

    controller.initialize(settings.grid_size);
    print!("{}", controller.renderer().render());

    let summary = controller.load_entities(&fetcher).await?;
    info!(
        bound = summary.bound,
        unbound = summary.unbound,
        "cards loaded"
    );

    for index in args.reveal {
        let Some(target) = controller.renderer().label_node(index) else {
            warn!(index, "no card to click");
            continue;
        };
        controller.dispatch_click(target);
    }

    print!("{}", controller.renderer().render());
    Ok(())
}
