use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;
use uxlatency_overlay::{
    demo, events, export, ui, App, ChannelSource, FileSource, OverlayConfig, Overrides,
    ReportSource,
};
use uxlatency_sdk::Tracker;
use uxlatency_types::Thresholds;

#[derive(Parser, Debug)]
#[command(name = "uxlatency")]
#[command(about = "Terminal overlay for perceived UI latency reports")]
struct Args {
    /// Path to the JSON report written by the tracker [default: uxlatency.json]
    #[arg(short, long, conflicts_with = "demo")]
    file: Option<PathBuf>,

    /// Refresh interval, e.g. "1s", "500ms" [default: 1s]
    #[arg(short, long)]
    refresh: Option<String>,

    /// Latencies below this are green, e.g. "400ms"
    #[arg(long)]
    green: Option<String>,

    /// Latencies below this (and not green) are orange, e.g. "900ms"
    #[arg(long)]
    orange: Option<String>,

    /// Config file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export the report to a CSV file and exit
    #[arg(short, long, conflicts_with = "demo")]
    export: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Show simulated taps from an in-process tracker instead of a file
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref())?;

    let overrides = Overrides {
        file: args.file.clone(),
        refresh: args.refresh.clone(),
        green: args.green.clone(),
        orange: args.orange.clone(),
    };
    let config = OverlayConfig::load(args.config.as_deref(), &overrides)?;
    tracing::info!(?config, "configuration loaded");

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        let rows = export::export_report(&config.file, &export_path)?;
        println!("Exported {} interactions to: {}", rows, export_path.display());
        return Ok(());
    }

    if args.demo {
        return run_with_demo(config.thresholds);
    }

    run_with_file(&config.file, config.thresholds, config.refresh)
}

/// Log to a file when asked; the terminal belongs to the UI.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run with a file-based report source
fn run_with_file(path: &Path, thresholds: Option<Thresholds>, refresh: Duration) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, thresholds, refresh)
}

/// Run against an in-process tracker fed with simulated taps
fn run_with_demo(thresholds: Option<Thresholds>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let tracker = Tracker::builder()
        .thresholds(thresholds.unwrap_or_default())
        .build();
    let (tx, source) = ChannelSource::create("demo");
    rt.spawn(demo::simulate(tracker.clone(), tx, None));

    // Channel updates arrive as they happen; poll often
    let result = run_tui(Box::new(source), thresholds, Duration::from_millis(100));

    tracker.log_final_summary();
    rt.shutdown_background();

    result
}

/// Run the TUI with the given report source
fn run_tui(
    source: Box<dyn ReportSource>,
    thresholds: Option<Thresholds>,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, thresholds);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();
            ui::render(frame, app, area);
        })?;

        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
