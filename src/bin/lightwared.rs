//! lightwared - Lightware device metrics poller daemon.
//!
//! Polls the devices listed in a TOML configuration file on a fixed
//! interval and writes one influx-style line per device per cycle to
//! stdout.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use lightwared::collector::{ReqwestFetcher, gather};
use lightwared::config::Config;
use lightwared::sink::LineProtocolSink;

/// Lightware device metrics poller daemon.
#[derive(Parser)]
#[command(name = "lightwared", about = "Lightware device metrics poller", version)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: String,

    /// Collection interval in seconds.
    #[arg(short, long, default_value = "30")]
    interval: u64,

    /// Run a single collection cycle and exit. Use this when an
    /// external scheduler drives the cadence.
    #[arg(long)]
    once: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr so they never interleave with the metric stream.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("lightwared={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("lightwared {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}", args.config, e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_defaults();

    if config.devices.is_empty() {
        warn!("No devices configured; nothing to poll");
    }
    info!(
        "Config: {} devices, {} paths, timeout={}s, interval={}s",
        config.devices.len(),
        config.paths.len(),
        config.timeout,
        args.interval
    );

    let fetcher = match ReqwestFetcher::new(Duration::from_secs_f64(config.timeout)) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let sink = LineProtocolSink::new();

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let interval = Duration::from_secs(args.interval);
    let mut cycle_count: u64 = 0;

    info!("Starting collection loop");

    while running.load(Ordering::SeqCst) {
        cycle_count += 1;
        let started = std::time::Instant::now();

        gather(&mut config, &fetcher, &sink);

        info!(
            "Cycle #{}: {} devices in {:.1}s",
            cycle_count,
            config.devices.len(),
            started.elapsed().as_secs_f64()
        );

        if args.once {
            break;
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete");
    ExitCode::SUCCESS
}
