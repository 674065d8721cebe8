//! PS3 Pad Tester - DualShock 3 input display and pairing guide

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use ps3_pad_tester::config::{AppConfig, PairingConfig};
use ps3_pad_tester::headless::run_headless;
use ps3_pad_tester::input::gamepad::{print_device_diagnostics, GilrsBackend};
use ps3_pad_tester::pairing::{PairingHelper, SixpairHelper};
use ps3_pad_tester::paths::AppPaths;
use ps3_pad_tester::tester::{Tester, TesterSettings};
use ps3_pad_tester::visualizer::run_visualizer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// PS3 Pad Tester - show DualShock 3 input and guide through pairing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Run without a window, reporting to the log
    #[arg(long)]
    headless: bool,

    /// List detected controllers and exit
    #[arg(long)]
    list_devices: bool,

    /// Run the pairing helper once and exit
    #[arg(long)]
    pair: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting PS3 Pad Tester v{}...", env!("CARGO_PKG_VERSION"));

    let paths = AppPaths::detect(args.config);
    let config = AppConfig::load_or_default(&paths.config)?;

    if args.list_devices {
        let count = print_device_diagnostics(&config.device);
        let summary = format!("{} controller(s) found", count);
        if count == 0 {
            println!("{}", summary.yellow().bold());
        } else {
            println!("{}", summary.green().bold());
        }
        return Ok(());
    }

    if args.pair {
        return pair_once(&config.pairing);
    }

    let backend = GilrsBackend::new().context("Failed to initialize controller input")?;
    let mut tester = Tester::new(backend, TesterSettings::from_config(&config));
    if config.pairing.enabled {
        tester = tester.with_helper(Box::new(SixpairHelper::from_config(&config.pairing)));
    } else {
        info!("Pairing helper disabled");
    }

    if args.headless {
        run_headless(&mut tester);
    } else {
        run_visualizer(tester, &config.display)?;
    }

    info!("Exiting tester.");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

fn pair_once(config: &PairingConfig) -> Result<()> {
    let mut helper = SixpairHelper::from_config(config);

    println!("\n{}", "=== Pairing ===".bold().cyan());
    println!("  Program: {}", helper.program().green());
    println!("  Connect the controller with a USB cable first.\n");

    match helper.attempt_pairing_handshake() {
        Ok(()) => {
            println!("{}", "Pairing info sent.".green().bold());
            println!("Unplug the cable and press the PS button to connect wirelessly.");
            Ok(())
        },
        Err(e) => {
            println!("{} {}", "Pairing failed:".red().bold(), e);
            Err(e).context("Pairing helper did not succeed")
        },
    }
}
