use std::path::PathBuf;

use clap::Parser;

/// emubridge: run an emulation engine behind the host bridge.
#[derive(Parser, Debug)]
#[command(name = "emubridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. "emubridge=debug,engine=warn".
    #[arg(long)]
    pub log_level: Option<String>,

    /// Physical pixels per logical unit.
    #[arg(long)]
    pub scale_factor: Option<f64>,

    /// Write each window's final surface as a PNG into this directory.
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
