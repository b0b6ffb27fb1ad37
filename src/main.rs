use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use go_tour::{tour, Tour, TourConfig};

/// Convert the parseable `ColorChoice` to `env_logger`'s `WriteStyle`
fn log_color(color: clap::ColorChoice) -> env_logger::WriteStyle {
    use clap::ColorChoice as C;
    use env_logger::WriteStyle as S;

    match color {
        C::Never => S::Never,
        C::Auto => S::Auto,
        C::Always => S::Always,
    }
}

#[derive(Parser)]
#[command(author, version, about)]
/// Run the Rust tour, or just some of its sections
struct Opts {
    /// Adjust log level globally or on a per-module basis
    ///
    /// This flag uses the same syntax as the env_logger crate.
    #[arg(long, env = env_logger::DEFAULT_FILTER_ENV, default_value = "warn")]
    log_level: String,

    /// Adjust when to output colors to the terminal
    #[arg(long, env = env_logger::DEFAULT_WRITE_STYLE_ENV, default_value_t = clap::ColorChoice::Auto)]
    color: clap::ColorChoice,

    /// TOML file overriding the default timings and counts
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// List section names and exit
    #[arg(long)]
    list: bool,

    /// Sections to run, in tour order (default: all)
    sections: Vec<String>,
}

fn main() -> Result<()> {
    let Opts {
        log_level,
        color,
        config,
        list,
        sections,
    } = Opts::parse();

    env_logger::builder()
        .parse_filters(&log_level)
        .write_style(log_color(color))
        .init();

    match color {
        clap::ColorChoice::Always => colored::control::set_override(true),
        clap::ColorChoice::Never => colored::control::set_override(false),
        clap::ColorChoice::Auto => {
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if list {
        for section in tour::SECTIONS {
            writeln!(out, "{} {}", format!("{:<24}", section.name).bold(), section.title)?;
        }
        return Ok(());
    }

    let config = TourConfig::load(config.as_deref()).context("failed to load tour config")?;
    let selected = tour::select(&sections)?;

    Tour::new(&mut out, config).run(&selected)?;
    Ok(())
}
