//! Command-line interface for xibao.
//!
//! This module handles CLI argument parsing and the subcommands that render
//! banners, dispatch chat messages and write the default config.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use xibao_config::Config;
use xibao_fonts::FontCatalog;
use xibao_render::{Canvas, Renderer};

use crate::presets::{Preset, PresetStyle};
use crate::service::RenderService;

/// Default output file when `-o` is not given.
const DEFAULT_OUTPUT: &str = "xibao.png";

/// xibao - Celebratory and lamenting banner generator
#[derive(Parser)]
#[command(name = "xibao")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/xibao/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG and the config
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_level_filter)]
    pub log_level: Option<log::LevelFilter>,
}

fn parse_level_filter(s: &str) -> Result<log::LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid log level '{s}' (off, error, warn, info, debug, trace)"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render TEXT onto a preset background
    Render {
        /// Banner variant
        #[arg(long, value_enum, default_value_t = Preset::Celebratory)]
        preset: Preset,

        /// Background image overriding the preset's
        #[arg(long, value_name = "PATH")]
        background: Option<PathBuf>,

        /// Font size in pixels, skipping size fitting
        #[arg(long, value_name = "PX")]
        size: Option<u32>,

        /// Output PNG path, `-` for stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        text: String,
    },

    /// Handle a raw chat message such as `/喜报 内容`
    Message {
        /// Output PNG path, `-` for stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        message: String,
    },

    /// Print wrapped lines with their font runs
    Segments {
        /// Banner variant whose background sets the canvas size
        #[arg(long, value_enum, default_value_t = Preset::Celebratory)]
        preset: Preset,

        /// Font size in pixels, skipping size fitting
        #[arg(long, value_name = "PX")]
        size: Option<u32>,

        text: String,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Load the configuration named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Commands::InitConfig { force } = cli.command {
        let path = cli.config.clone().unwrap_or_else(Config::config_path);
        return init_config(&path, force);
    }

    let config = load_config(&cli)?;
    crate::debug::apply_config_level(config.log_level);

    match cli.command {
        Commands::Render {
            preset,
            background,
            size,
            output,
            text,
        } => {
            let renderer = build_renderer(&config)?;
            let preset_style = PresetStyle::from_config(preset, &config);
            let background = background.unwrap_or(preset_style.background);
            let canvas = Canvas::load(&background)?;
            let bytes = renderer.render(&canvas, &text, &preset_style.style, size)?;
            write_output(output.as_deref(), &bytes)
        }
        Commands::Message { output, message } => {
            let catalog = Arc::new(discover_fonts(&config));
            let service = RenderService::new(catalog, &config)?;
            let runtime = Runtime::new()?;
            let bytes = runtime.block_on(service.handle_message(&message))?;
            write_output(output.as_deref(), &bytes)
        }
        Commands::Segments { preset, size, text } => {
            let renderer = build_renderer(&config)?;
            let canvas = Canvas::load(&PresetStyle::from_config(preset, &config).background)?;
            print_segments(&renderer, &canvas, &text, size)
        }
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn discover_fonts(config: &Config) -> FontCatalog {
    let extra: Vec<PathBuf> = config.font_path.iter().cloned().collect();
    FontCatalog::discover(&extra)
}

fn build_renderer(config: &Config) -> Result<Renderer> {
    let catalog = Arc::new(discover_fonts(config));
    log::info!("{}", catalog);
    Ok(Renderer::new(catalog, config)?)
}

fn print_segments(renderer: &Renderer, canvas: &Canvas, text: &str, size: Option<u32>) -> Result<()> {
    let plan = renderer.plan(canvas.width(), canvas.height(), text, size)?;
    let catalog = renderer.catalog();

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "canvas {}x{}, size {}px, {} line(s)",
        canvas.width(),
        canvas.height(),
        plan.size,
        plan.lines.len()
    )?;
    for (i, line) in plan.lines.iter().enumerate() {
        writeln!(
            stdout,
            "line {}: {:?} width {:.1}px at x {:.1}",
            i + 1,
            line.text,
            line.width,
            line.x
        )?;
        for run in &line.runs {
            let family = catalog.family_name(run.font.typeface).unwrap_or("notdef");
            writeln!(stdout, "  {:?} -> {} ({})", run.text, family, run.font)?;
        }
    }
    Ok(())
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) if path == Path::new("-") => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        _ => {
            let path = output.unwrap_or(Path::new(DEFAULT_OUTPUT));
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
    }
    Ok(())
}

/// Write the default config to `path`.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
