//! Command-line argument parsing for the map builder.

use std::path::PathBuf;

use clap::Parser;

use crate::keymap::types::KeyInput;

/// Builds the keyboard map for a layout and prints it
#[derive(Parser, Debug)]
#[command(name = "layout-keymap", version, about = "Build the key input map for a keyboard layout")]
pub struct CliArgs {
    /// Configuration file, created with defaults when missing
    #[arg(short, long, value_name = "FILE", default_value = "Config.toml")]
    pub config: PathBuf,

    /// Layout description to build from (overrides the configured one)
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Write the map to FILE instead of stdout (overrides the configured one)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only print the physical keys producing these key inputs, e.g. `a` or `<CR>`
    #[arg(long, value_name = "KEYINPUT")]
    pub lookup: Vec<KeyInput>,
}
