use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xrsim_common::{Hand, SimConfig};
use xrsim_input::{DeviceState, ThreadRandom};
use xrsim_rig::{Intents, Rig, RigParams};
use xrsim_session::{Session, parse_script};
use xrsim_tools::{AnchorInfo, DeviceLine, RigInspector, RigSummary};

#[derive(Parser)]
#[command(name = "xrsim-cli", about = "Headless simulated XR input")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Simulation config (YAML). Defaults are used when missing or invalid.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective configuration
    Info,
    /// Integrate the rig with fixed intents
    Walk {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.0166667")]
        dt: f32,
        #[command(flatten)]
        intents: IntentFlags,
    },
    /// Feed a key script through a session and print both controllers
    Keys {
        /// Script text, e.g. "down:W tick:1 up:W tap:ctrl+M tick"
        script: Option<String>,
        /// Read the script from a file instead
        #[arg(short, long, conflicts_with = "script")]
        file: Option<PathBuf>,
        /// Seed for reproducible value resampling
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct IntentFlags {
    #[arg(long)]
    forward: bool,
    #[arg(long)]
    backward: bool,
    #[arg(long)]
    left: bool,
    #[arg(long)]
    right: bool,
    #[arg(long)]
    turn_left: bool,
    #[arg(long)]
    turn_right: bool,
    #[arg(long)]
    look_up: bool,
    #[arg(long)]
    look_down: bool,
}

impl From<&IntentFlags> for Intents {
    fn from(f: &IntentFlags) -> Self {
        Intents {
            move_forward: f.forward,
            move_backward: f.backward,
            move_left: f.left,
            move_right: f.right,
            rotate_left: f.turn_left,
            rotate_right: f.turn_right,
            look_up: f.look_up,
            look_down: f.look_down,
        }
    }
}

#[derive(Serialize)]
struct WalkReport {
    summary: RigSummary,
    anchors: Vec<AnchorInfo>,
}

#[derive(Serialize)]
struct KeysReport {
    frames: u64,
    left: DeviceState,
    right: DeviceState,
    rig: RigSummary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SimConfig::load_or_default(path),
        None => SimConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            println!("xrsim-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", xrsim_common::crate_info());
            println!("input: {}", xrsim_input::crate_info());
            println!("rig: {}", xrsim_rig::crate_info());
            println!("session: {}", xrsim_session::crate_info());
            println!("tools: {}", xrsim_tools::crate_info());
            print!("config:\n{}", config.to_yaml_string()?);
        }
        Commands::Walk { ticks, dt, intents } => {
            let mut rig = Rig::with_default_anchors(RigParams::from(&config));
            rig.intents = Intents::from(&intents);
            for _ in 0..ticks {
                rig.tick(dt);
            }
            let transitions = rig.drain_events();

            let report = WalkReport {
                summary: RigInspector::summary(&rig),
                anchors: RigInspector::list_anchors(&rig),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Walk: ticks={ticks}, dt={dt}");
                println!("{}", report.summary);
                for anchor in &report.anchors {
                    println!("  {anchor}");
                }
                println!("Tracking transitions: {}", transitions.len());
            }
        }
        Commands::Keys { script, file, seed } => {
            let text = match (script, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading script {}", path.display()))?,
                (None, None) => anyhow::bail!("no script given; pass text or --file"),
            };
            let steps = parse_script(&text)?;

            let mut session = match seed {
                Some(seed) => Session::seeded(config, seed),
                None => Session::new(config, Box::new(ThreadRandom)),
            };
            session.run_script(&steps);

            let report = KeysReport {
                frames: session.frame(),
                left: session.sample(Hand::Left),
                right: session.sample(Hand::Right),
                rig: RigInspector::summary(session.rig()),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Keys: steps={}, frames={}", steps.len(), report.frames);
                println!("left:  {}", DeviceLine(&report.left));
                println!("right: {}", DeviceLine(&report.right));
                println!("{}", report.rig);
            }
        }
    }

    Ok(())
}
