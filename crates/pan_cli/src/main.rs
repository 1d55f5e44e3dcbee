//! Pan CLI
//!
//! Drive the three-slot pager on a simulated scroll surface from a gesture
//! script and print the callbacks it produces.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pan_core::{LoopMode, ScrollAxis};
use pan_effects::EffectKind;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod demo;
mod script;

use config::{PanToml, CONFIG_FILE};
use demo::Output;

#[derive(Parser)]
#[command(name = "pan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Three-slot pager demo host", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a gesture script against a simulated pager
    Run {
        /// Configuration file
        #[arg(short, long, default_value = CONFIG_FILE)]
        config: PathBuf,

        /// Gesture script, e.g. "drag:next release settle jump-animated:3 settle"
        #[arg(short, long)]
        script: Option<String>,

        /// Number of pages
        #[arg(short, long)]
        pages: Option<usize>,

        /// Loop mode (none, loop, bounded)
        #[arg(short, long, value_parser = parse_loop_mode)]
        loop_mode: Option<LoopMode>,

        /// Scroll axis (horizontal, vertical)
        #[arg(short, long, value_parser = parse_axis)]
        axis: Option<ScrollAxis>,

        /// Transition effect (none, parallax, card_stack, flip, rotate)
        #[arg(short, long)]
        effect: Option<EffectKind>,

        /// Also print per-frame change notifications
        #[arg(long)]
        changes: bool,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// List the available transition effects
    Effects,
}

fn parse_loop_mode(value: &str) -> std::result::Result<LoopMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "none" => Ok(LoopMode::None),
        "loop" => Ok(LoopMode::Loop),
        "bounded" => Ok(LoopMode::Bounded),
        other => Err(format!("unknown loop mode '{other}' (none, loop, bounded)")),
    }
}

fn parse_axis(value: &str) -> std::result::Result<ScrollAxis, String> {
    match value.to_ascii_lowercase().as_str() {
        "horizontal" | "h" => Ok(ScrollAxis::Horizontal),
        "vertical" | "v" => Ok(ScrollAxis::Vertical),
        other => Err(format!("unknown axis '{other}' (horizontal, vertical)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            config,
            script,
            pages,
            loop_mode,
            axis,
            effect,
            changes,
            json,
        } => {
            let mut file = PanToml::load_or_default(&config)?;
            if let Some(pages) = pages {
                file.demo.pages = pages;
            }
            if let Some(loop_mode) = loop_mode {
                file.pager.loop_mode = loop_mode;
            }
            if let Some(axis) = axis {
                file.pager.axis = axis;
            }
            if let Some(effect) = effect {
                file.demo.effect = effect;
            }
            if let Some(script) = script {
                file.demo.script = script;
            }
            let output = Output {
                json,
                show_changes: changes || file.demo.show_changes,
            };
            cmd_run(&file, output)
        }

        Commands::Init { path, force } => cmd_init(&path, force),

        Commands::Effects => cmd_effects(),
    }
}

fn cmd_run(config: &PanToml, output: Output) -> Result<()> {
    let steps = script::parse_script(&config.demo.script).context("Invalid gesture script")?;
    info!(
        "Running {} steps on {} pages ({:?}, {:?}, effect {})",
        steps.len(),
        config.demo.pages,
        config.pager.loop_mode,
        config.pager.axis,
        config.demo.effect
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run_script(config, &steps, output, &mut out)?;
    out.flush()?;
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let content = PanToml::default().to_toml_string()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    info!("Run `pan run` to play the default script");

    Ok(())
}

fn cmd_effects() -> Result<()> {
    println!("Transition effects:");
    for effect in EffectKind::ALL {
        println!("  - {effect}");
    }
    Ok(())
}
