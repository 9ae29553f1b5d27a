mod cli;
mod console;
mod demo;
mod export;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use emubridge_common::BridgeError;
use emubridge_config::BridgeConfig;
use emubridge_host::{init_worker, Emulator};
use emubridge_surface::FixedDisplay;

use console::ConsoleHost;

const DEFAULT_DIRECTIVE: &str = "emubridge=info,engine=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config is loaded before logging so its [logging] section can apply;
    // a load failure is reported once the subscriber is up.
    let loaded = emubridge_config::load_config(args.config.as_deref());

    let log_directive = args.log_level.clone().unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|c| c.logging.directive())
            .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string())
    });
    let (filter, rejected) = build_filter(&log_directive);
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("emubridge v{} starting...", env!("CARGO_PKG_VERSION"));
    for part in rejected {
        tracing::warn!("Ignoring invalid log directive: {part}");
    }

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BridgeConfig::default()
    });

    if let Some(scale_factor) = args.scale_factor {
        config.display.scale_factor = scale_factor;
    }
    if let Some(dir) = args.frames_dir {
        config.output.frames_dir = Some(dir);
    }
    if let Err(e) = emubridge_config::validation::validate(&config) {
        tracing::error!("Invalid settings: {e}");
        return ExitCode::from(2);
    }
    tracing::info!(
        scale_factor = config.display.scale_factor,
        program = ?config.engine.program,
        "Config loaded"
    );

    match run(config).await {
        Ok(code) => {
            tracing::info!(code, "Shutdown complete");
            ExitCode::from(exit_status(code))
        }
        Err(e) => {
            tracing::error!("Bridge error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Env filter from `RUST_LOG` plus each comma-separated part of
/// `directive`. Parts that fail to parse are returned instead of applied.
fn build_filter(directive: &str) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::from_default_env();
    let mut rejected = Vec::new();
    for part in directive.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(_) => rejected.push(part.to_string()),
        }
    }
    (filter, rejected)
}

/// Process status for an engine exit code. Codes outside 0..=255 are
/// reported as a generic failure.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

/// Launch the demo engine, bridge it until it closes, then export surfaces.
/// Returns the engine's exit code.
async fn run(config: BridgeConfig) -> Result<i32, BridgeError> {
    let engine = config.engine.clone();
    let worker = init_worker(move |port| demo::spawn(port, engine)).await?;

    let mut emulator = Emulator::new(
        worker,
        ConsoleHost::new(config.output.echo_stdout),
        Box::new(FixedDisplay(config.display.scale_factor)),
    );
    emulator.start()?;
    emulator.run().await?;

    match serde_json::to_string(&emulator.window_infos()) {
        Ok(windows) => tracing::info!(%windows, "Final window set"),
        Err(e) => tracing::warn!("Failed to serialize window set: {e}"),
    }
    let host = emulator.host();
    if !host.errors().is_empty() {
        tracing::warn!(count = host.errors().len(), "Engine reported errors");
    }
    tracing::debug!(changes = host.window_changes(), "Window notifications");

    if let Some(ref dir) = config.output.frames_dir {
        let written = export::export_windows(emulator.windows(), dir)?;
        tracing::info!(count = written.len(), dir = %dir.display(), "Surfaces exported");
    }

    Ok(emulator.exit_code().or(host.exit_code()).unwrap_or(0))
}
