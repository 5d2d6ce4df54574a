//! Yule CLI - run the holiday scene headless and report what happened

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{defaults, simulate};

#[derive(Parser)]
#[command(name = "yule")]
#[command(about = "Headless simulator for the Yule holiday scene", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted simulation at a fixed frame rate
    Simulate {
        /// Path to scene file (built-in defaults when omitted)
        scene: Option<String>,

        /// Simulated duration in seconds
        #[arg(long, default_value = "10")]
        seconds: f64,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Request an airdrop at this time (seconds); repeatable
        #[arg(long = "airdrop-at")]
        airdrop_at: Vec<f64>,

        /// Click a campfire, as TIME:INDEX (e.g. 0.5:1); repeatable
        #[arg(long = "flare-at", value_parser = simulate::parse_flare_at)]
        flare_at: Vec<simulate::FlareAt>,

        /// Override the scene's RNG seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the default scene configuration as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Simulate {
            scene,
            seconds,
            fps,
            airdrop_at,
            flare_at,
            seed,
            format,
        } => simulate::run(simulate::SimulateArgs {
            scene,
            seconds,
            fps,
            airdrop_at,
            flare_at,
            seed,
            format,
            verbose: cli.verbose,
        }),
        Commands::Defaults => defaults::run(),
    }
}
