//! tapo-pywal CLI — sync a Tapo smart bulb with your pywal color scheme.

use std::path::PathBuf;

use clap::Parser;

mod cli;

const EXAMPLES: &str = "\
Examples:
  tapo-pywal --pywal                # Use the pywal accent color (color 0)
  tapo-pywal --pywal --index 2      # Use pywal color 2
  tapo-pywal --color \"#FF0000\"      # Set red
  tapo-pywal --color \"255,128,0\"    # Set orange
  tapo-pywal --brightness 40        # Only change brightness
  tapo-pywal --off                  # Turn the bulb off
  tapo-pywal --on                   # Turn the bulb on
  tapo-pywal --status               # Show power, color and brightness";

#[derive(Parser)]
#[command(
    name = "tapo-pywal",
    version,
    about = "Sync your Tapo smart bulb with pywal colors",
    after_help = EXAMPLES
)]
struct Args {
    /// Use a pywal palette color
    #[arg(long)]
    pywal: bool,

    /// Pywal color index, 0-15 (default: 0 = accent)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    index: Option<i64>,

    /// Set color (hex: #FF0000 or RGB: 255,0,0)
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Brightness 1-100 (alone: change brightness only)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    brightness: Option<i64>,

    /// Turn on bulb
    #[arg(long)]
    on: bool,

    /// Turn off bulb
    #[arg(long)]
    off: bool,

    /// Show bulb status
    #[arg(long)]
    status: bool,

    /// Path to config.json (default: ./config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the pywal colors file (default: ~/.cache/wal/colors)
    #[arg(long, value_name = "PATH")]
    palette: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_options(self) -> cli::Options {
        let mut paths = tapo_pywal_lib::dispatch::Paths::default();
        if let Some(config) = self.config {
            paths.config = config;
        }
        if let Some(palette) = self.palette {
            paths.palette = Some(palette);
        }
        cli::Options {
            flags: tapo_pywal_lib::dispatch::ActionFlags {
                pywal: self.pywal,
                index: self.index,
                color: self.color,
                brightness: self.brightness,
                on: self.on,
                off: self.off,
                status: self.status,
            },
            paths,
            json: self.json,
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = cli::run(args.into_options()) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
