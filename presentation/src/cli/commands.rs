//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for lutro
#[derive(Parser, Debug)]
#[command(name = "lutro")]
#[command(author, version, about = "Run a lutro game script frame by frame")]
#[command(long_about = r#"
Runs a Lua game script against a headless software framebuffer.

The script may define any of these hooks on the `lutro` table:
  lutro.conf(t)      adjust t.width / t.height before rendering starts
  lutro.load()       one-time setup
  lutro.update(dt)   advance the game by dt seconds
  lutro.draw()       draw the current frame

Configuration files are loaded from (in priority order):
1. LUTRO_<SECTION>__<KEY>   Environment variables
2. --config <path>          Explicit config file
3. ./lutro.toml             Project-level config
4. ~/.config/lutro/config.toml   Global config

Example:
  lutro games/pong/main.lua
  lutro --frames 600 --fixed-step games/pong/main.lua
"#)]
pub struct Cli {
    /// Path to the game's entry script
    #[arg(value_name = "SCRIPT", required_unless_present = "show_config")]
    pub script: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Target frames per second
    #[arg(long, value_name = "N")]
    pub fps: Option<u32>,

    /// Step frames as fast as possible with a constant delta
    #[arg(long)]
    pub fixed_step: bool,

    /// Keep running after update/draw errors
    #[arg(long)]
    pub keep_going: bool,

    /// Initial width before the script's conf hook
    #[arg(long, value_name = "PX")]
    pub width: Option<i64>,

    /// Initial height before the script's conf hook
    #[arg(long, value_name = "PX")]
    pub height: Option<i64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the run summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show the resolved configuration and exit
    #[arg(long)]
    pub show_config: bool,
}
