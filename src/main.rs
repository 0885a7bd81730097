mod app;
mod collectors;
mod config;
mod event;
mod input;
mod metrics;
mod models;
mod render;
mod state;
mod store;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use collectors::FeedSource;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::EventHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use ui::theme::{Theme, ThemeVariant};

#[derive(Parser, Debug)]
#[command(name = "pooltop", about = "Live per-disk I/O for storage pools", version)]
struct Cli {
    /// Sample source: "local", a JSON lines file, or "-" for stdin
    #[arg(short, long)]
    feed: Option<String>,

    /// Nominal sampling interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Maximum number of disks shown
    #[arg(short, long)]
    count: Option<usize>,

    /// Local feed: stop after this many sample rounds
    #[arg(long)]
    rounds: Option<u64>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Print one JSON line per sample instead of the dashboard
    #[arg(long)]
    json: bool,

    /// Print config file path and effective values, then exit
    #[arg(long)]
    config: bool,

    /// Log file (dashboard mode only; --json logs to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, cfg: &mut Config) {
        if let Some(f) = &self.feed     { cfg.feed.source = f.clone(); }
        if let Some(i) = self.interval  { cfg.general.interval_ms = i; }
        if let Some(c) = self.count     { cfg.general.count = c; }
        if let Some(r) = self.rounds    { cfg.feed.rounds = r; }
        if let Some(t) = &self.theme    { cfg.general.theme = t.clone(); }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.config {
        init_logging(cli.verbose, cli.json, cli.log_file.clone())?;
    }

    let mut cfg = Config::load();
    cli.apply(&mut cfg);
    if cli.config {
        return run_print_config(&cfg);
    }

    let source = FeedSource::parse(&cfg.feed.source, cfg.feed.rounds);
    let interval = Duration::from_millis(cfg.general.interval_ms);

    if cli.json {
        let events = EventHandler::new();
        let inventory = collectors::start(&source, interval, events.sender())?;
        let mut app = App::new(
            inventory,
            Theme::for_variant(ThemeVariant::Default),
            cfg.general.interval_ms,
            cfg.row_limit(),
            cfg.feed.source.clone(),
        );
        return app.run_headless(&events, &mut io::stdout().lock());
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Inventory is read before the terminal switches so startup errors stay visible
    let events = EventHandler::new();
    let inventory = collectors::start(&source, interval, events.sender())?;
    let theme = Theme::for_variant(ThemeVariant::from_name(&cfg.general.theme));
    let mut app = App::new(inventory, theme, cfg.general.interval_ms, cfg.row_limit(), cfg.feed.source.clone());

    let pulse = Duration::from_millis(cfg.general.pulse_ms.max(20));
    let result = run(&mut app, &events, pulse);
    restore_terminal()?;
    let last = result?;
    print!("{}", render::to_text(&last));
    Ok(())
}

fn run(app: &mut App, events: &EventHandler, pulse: Duration) -> Result<render::DiskFrame> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    events.watch_terminal(pulse);
    info!(disks = app.inventory.len(), "dashboard started");
    app.run(&mut term, events)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  interval_ms = {}", cfg.general.interval_ms);
    println!("  count       = {}", cfg.row_limit());
    println!("  theme       = {}", ThemeVariant::from_name(&cfg.general.theme).name());
    println!("  pulse_ms    = {}", cfg.general.pulse_ms);
    println!();
    println!("[feed]");
    println!("  source      = {}", cfg.feed.source);
    println!("  rounds      = {}", cfg.feed.rounds);
    Ok(())
}

/// Dashboard mode owns the terminal, so logs go to a file there.
/// Default level is INFO; `-v` DEBUG, `-vv` TRACE. `RUST_LOG` adds directives.
fn init_logging(verbose: u8, to_stderr: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("pooltop={}", level).parse()?);

    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    let Some(path) = log_file.or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("pooltop").join("pooltop.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["pooltop", "--feed", "-", "-i", "2000", "-c", "3", "-t", "nord"]);
        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.feed.source, "-");
        assert_eq!(cfg.general.interval_ms, 2000);
        assert_eq!(cfg.general.count, 3);
        assert_eq!(cfg.general.theme, "nord");
        assert_eq!(cfg.feed.rounds, 0);
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["pooltop", "-vv"]);
        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg, Config::default());
        assert_eq!(cli.verbose, 2);
    }
}
