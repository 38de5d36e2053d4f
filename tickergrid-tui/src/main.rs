//! TickerGrid TUI: portfolio grid, detail chart and allocation view.
//!
//! Panels:
//! 1. Portfolio: grid of holdings with the selected ticker's chart below
//! 2. Allocation: holdings weighted by average price, linked to the grid
//! 3. Help: keyboard shortcuts and filter syntax

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use tickergrid_core::data::{load_model, sample_portfolio};
use tickergrid_core::{AppConfig, RowDataModel};

use tickergrid_tui::app::AppState;
use tickergrid_tui::{input, logging, persistence, ui};

#[derive(Parser)]
#[command(name = "tickergrid-tui", version, about = "Terminal portfolio grid")]
struct Cli {
    /// Portfolio JSON file (defaults to the configured path, else sample data)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Config file (defaults to <config_dir>/tickergrid/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the sample portfolio
    #[arg(long)]
    seed: Option<u64>,

    /// Log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not restore the previous session
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref()).context("loading config")?;

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, &config.log_level)?;

    // Load data before touching the terminal so errors print normally.
    let data_path = cli.data.clone().or_else(|| config.data_path.clone());
    let (model, source_label) = match &data_path {
        Some(path) => (
            load_model(path).with_context(|| format!("loading {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let seed = cli.seed.unwrap_or(config.sample_seed);
            (
                RowDataModel::from_tickers(sample_portfolio(seed))?,
                format!("sample portfolio (seed {seed})"),
            )
        }
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = persistence::default_path();

    // Build app state
    let mut app = AppState::new(model, config.render_options(), source_label);
    app.data_path = data_path;

    // Apply persisted state
    if !cli.fresh {
        let persisted = persistence::load(&state_path);
        persistence::apply(&mut app, persisted);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let tick = Duration::from_millis(config.tick_rate_ms);
    let result = run_app(&mut terminal, &mut app, tick);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        log::warn!("failed to save state to {}: {e}", state_path.display());
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick: Duration,
) -> Result<()> {
    loop {
        // 1. Keep the grid scroll in step with the terminal size
        let size = terminal.size()?;
        app.grid.viewport = ui::grid_viewport(Rect::new(0, 0, size.width, size.height));
        app.grid.ensure_visible();

        // 2. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 3. Poll for input events
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
