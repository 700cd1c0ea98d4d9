use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pulsegate_session::config::SessionConfig;
use pulsegate_session::content::ContentDirector;
use pulsegate_session::duration::parse_duration;
use pulsegate_session::intervention::{Intervention, NoopIntervention};
use pulsegate_session::session::Session;
use pulsegate_types::Bpm;

#[derive(Parser, Debug)]
#[command(name = "pulsegate")]
#[command(about = "Heart-rate-gated exposure session controller")]
struct Args {
    /// Path to a session config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// UDP port to listen on for BPM datagrams
    #[arg(short, long)]
    port: Option<u16>,

    /// Trigger threshold in BPM (samples strictly above count as elevated)
    #[arg(long)]
    trigger: Option<u16>,

    /// Recovery threshold in BPM (recovery completes at or below this)
    #[arg(long)]
    recovery: Option<u16>,

    /// Sustained-elevation window before an intervention (e.g. "3s", "1500ms")
    #[arg(long)]
    sustain: Option<String>,

    /// Minimum intervention duration (e.g. "10s")
    #[arg(long)]
    floor: Option<String>,

    /// Scheduling-tick interval (e.g. "100ms")
    #[arg(long)]
    tick: Option<String>,

    /// Calming content identifier
    #[arg(long)]
    calming: Option<String>,

    /// Exposure content identifier for level 1 (repeat for more items)
    #[arg(long = "content")]
    content: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };

    // CLI flags override the file
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bpm) = args.trigger {
        config.thresholds.trigger = Bpm::new(bpm);
    }
    if let Some(bpm) = args.recovery {
        config.thresholds.recovery = Bpm::new(bpm);
    }
    if let Some(ref sustain) = args.sustain {
        config.thresholds.sustain = parse_duration(sustain)?;
    }
    if let Some(ref floor) = args.floor {
        config.thresholds.cooldown_floor = parse_duration(floor)?;
    }
    if let Some(ref tick) = args.tick {
        config.tick = parse_duration(tick)?;
    }
    if args.calming.is_some() {
        config.calming = args.calming.clone();
    }
    if !args.content.is_empty() {
        config.levels = vec![args.content.clone()];
    }
    config.validate()?;

    let intervention: Box<dyn Intervention> = match config.calming.clone() {
        Some(calming) => Box::new(ContentDirector::new(config.levels.clone(), calming)),
        None => {
            warn!("no calming content configured; interventions will be no-ops");
            Box::new(NoopIntervention)
        }
    };

    let session = Session::start(config, intervention).await?;
    session.run().await
}
