use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use screenpen::capture::{BlankSource, CaptureProvider, FileSaveConfig, PngFileSource};
use screenpen::engine::{CompositingEngine, EngineSettings};
use screenpen::input::BoardMode;
use screenpen::replay::{Script, run_script};
use screenpen::{Config, draw::render_eraser_cursor};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCREENPEN_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "screenpen")]
#[command(version = VERSION, about = "Screen annotation overlay: draw on top of a captured screen")]
struct Cli {
    /// Screenshot (PNG) to annotate; a blank transparent screen is used otherwise
    #[arg(long, short = 'c', value_name = "PNG")]
    capture: Option<PathBuf>,

    /// Size of the blank screen when no capture is given
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size)]
    size: (u32, u32),

    /// Window size the scripted pointer coordinates refer to (defaults to the capture size)
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    window: Option<(u32, u32)>,

    /// Session script (TOML list of [[step]] entries)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Initial board mode (transparent, whiteboard, or blackboard)
    #[arg(long, short = 'm', value_name = "MODE")]
    mode: Option<String>,

    /// Directory for saved snapshots (overrides the config file)
    #[arg(long, short = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/screenpen/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the eraser cursor image to FILE and exit
    #[arg(long, value_name = "FILE")]
    eraser_cursor: Option<PathBuf>,
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got '{value}'"));
    }
    Ok((w, h))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(path) = &cli.eraser_cursor {
        let cursor = render_eraser_cursor()?;
        let mut out = BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        cursor.write_png(&mut out)?;
        println!("{}", path.display());
        return Ok(());
    }

    let Some(script_path) = &cli.script else {
        println!("screenpen: screen annotation overlay");
        println!();
        println!("Usage:");
        println!("  screenpen --script session.toml [--capture shot.png] [--mode whiteboard]");
        println!("  screenpen --eraser-cursor cursor.png");
        println!("  screenpen --help      Show help");
        println!();
        println!("Default keys: Ctrl+Z undo, Ctrl+Y redo, Ctrl+S save, E clear, Escape exit");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(mode) = &cli.mode {
        mode.parse::<BoardMode>().map_err(anyhow::Error::msg)?;
        config.board.default_mode = mode.clone();
    }

    let screen = match &cli.capture {
        Some(path) => PngFileSource::new(path).capture(),
        None => BlankSource::new(cli.size.0, cli.size.1).capture(),
    }
    .context("Screen capture unavailable")?;

    let window = cli.window.unwrap_or(screen.geometry.dimensions());
    let settings = EngineSettings::from_config(&config)?;
    let mut engine = CompositingEngine::new(screen, window, settings)?;

    let script = Script::load(script_path)?;
    let mut save = FileSaveConfig::from_config(&config.capture);
    if let Some(dir) = &cli.output {
        save = save.with_directory(dir);
    }

    let outcome = run_script(&mut engine, &script, &save)?;
    for path in &outcome.saved {
        println!("{}", path.display());
    }
    log::info!(
        "Ran {} steps, saved {} snapshot(s){}",
        outcome.steps_run,
        outcome.saved.len(),
        if outcome.exited { ", exit requested" } else { "" }
    );

    Ok(())
}
