use std::path::PathBuf;
use std::process::ExitCode;

use bidikit::BaseDirection;
use clap::Parser;

use crate::app::App;
use crate::config::Config;

mod app;
mod config;
mod page;
mod utils;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum DirectionArg {
    Ltr,
    Rtl,
    #[default]
    Auto,
}

impl From<DirectionArg> for BaseDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Ltr => Self::Ltr,
            DirectionArg::Rtl => Self::Rtl,
            DirectionArg::Auto => Self::Auto,
        }
    }
}

/// A terminal visualizer for bidirectional text resolution
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Text to resolve immediately, skipping the input page
    text: Option<String>,

    /// Base direction for the paragraph
    #[arg(long, short, default_value_t = DirectionArg::Auto)]
    direction: DirectionArg,

    /// Override the config directory
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::get(args.config);
    let initial = args.text.map(|text| (text, args.direction.into()));

    if let Err(error) = App::new(config, initial).run() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
