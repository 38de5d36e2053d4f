//! TickerGrid CLI: print, chart, generate and validate portfolios.
//!
//! Commands:
//! - `show`: print the derived grid as a table or JSON, optionally filtered
//! - `chart`: print the chart input for a selected ticker as JSON
//! - `allocation`: print the allocation view
//! - `sample`: write the seeded sample portfolio to a JSON file
//! - `validate`: check a portfolio file for identity and field errors
//! - `config`: print the effective configuration

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;

use tickergrid_core::data::{load_model, load_records, sample_portfolio, save_tickers};
use tickergrid_core::{
    allocation, format_currency, AppConfig, ColumnFilter, FilterSet, RowDataModel,
    SelectionChanged, SelectionProjector, SelectionState, ALLOCATION_TITLE, COLUMNS,
};

#[derive(Parser)]
#[command(
    name = "tickergrid",
    version,
    about = "TickerGrid CLI: portfolio grid from the command line"
)]
struct Cli {
    /// Config file. Defaults to <config_dir>/tickergrid/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where rows come from: a JSON file, or the seeded sample portfolio.
#[derive(clap::Args)]
struct Source {
    /// Portfolio JSON file. Falls back to the configured path, then sample data.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed for the sample portfolio.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived grid.
    Show {
        #[command(flatten)]
        source: Source,

        /// Output format.
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Column filter, e.g. `ticker~a` or `PnL>0`. Repeat to combine.
        #[arg(long = "filter")]
        filters: Vec<String>,
    },
    /// Print the chart input for a ticker (or the empty chart) as JSON.
    Chart {
        #[command(flatten)]
        source: Source,

        /// Ticker to select.
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Print the allocation view.
    Allocation {
        #[command(flatten)]
        source: Source,

        /// Output format.
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Write the sample portfolio to a JSON file.
    Sample {
        /// Output path.
        #[arg(long, short)]
        output: PathBuf,

        /// Seed for the random walk.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check a portfolio file. Exits non-zero on any problem.
    Validate {
        /// Portfolio JSON file.
        #[arg(long)]
        data: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref()).context("loading config")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Show {
            source,
            format,
            filters,
        } => run_show(&config, source, format, &filters),
        Commands::Chart { source, ticker } => run_chart(&config, source, ticker.as_deref()),
        Commands::Allocation { source, format } => run_allocation(&config, source, format),
        Commands::Sample { output, seed } => run_sample(&config, output, seed),
        Commands::Validate { data } => run_validate(data),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_source(config: &AppConfig, source: Source) -> Result<RowDataModel> {
    match source.data.or_else(|| config.data_path.clone()) {
        Some(path) => load_model(&path).with_context(|| format!("loading {}", path.display())),
        None => {
            let seed = source.seed.unwrap_or(config.sample_seed);
            log::info!("using sample portfolio (seed {seed})");
            Ok(RowDataModel::from_tickers(sample_portfolio(seed))?)
        }
    }
}

fn run_show(
    config: &AppConfig,
    source: Source,
    format: OutputFormat,
    filter_args: &[String],
) -> Result<()> {
    let model = load_source(config, source)?;
    let options = config.render_options();

    let mut filters = FilterSet::new();
    for arg in filter_args {
        let filter: ColumnFilter = arg.parse().with_context(|| format!("filter {arg:?}"))?;
        filters.set(filter);
    }

    let rows: Vec<_> = filters
        .visible_indices(&model)
        .into_iter()
        .map(|i| model.rows()[i].derive(&options))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| r.cells.iter().map(|c| c.text.clone()).collect())
                .collect();
            print_table(&cells);
            println!();
            println!(
                "{} of {} rows | Total P&L {}",
                rows.len(),
                model.len(),
                format_currency(model.total_profit_and_loss())
            );
        }
    }
    Ok(())
}

/// Aligned plain-text table with schema headers. Numeric columns right-aligned.
fn print_table(rows: &[Vec<String>]) {
    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|t| t.chars().count())
                .chain(std::iter::once(col.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let headers: Vec<&str> = COLUMNS.iter().map(|c| c.header).collect();
    print_line(&headers, &widths);
    for row in rows {
        let texts: Vec<&str> = row.iter().map(String::as_str).collect();
        print_line(&texts, &widths);
    }
}

fn print_line(texts: &[&str], widths: &[usize]) {
    let parts: Vec<String> = texts
        .iter()
        .zip(COLUMNS.iter())
        .zip(widths)
        .map(|((t, col), &w)| {
            if col.is_numeric() {
                format!("{t:>w$}")
            } else {
                format!("{t:<w$}")
            }
        })
        .collect();
    println!("{}", parts.join("  ").trim_end());
}

fn run_chart(config: &AppConfig, source: Source, ticker: Option<&str>) -> Result<()> {
    let model = load_source(config, source)?;
    let event = match ticker {
        Some(t) => {
            let mut selection = SelectionState::new();
            match selection.select_id(&model, t) {
                Some(event) => event,
                None if model.get(t).is_some() => bail!("{t} is malformed and cannot be charted"),
                None => bail!("no row with ticker {t}"),
            }
        }
        None => SelectionChanged::none(),
    };
    let chart = SelectionProjector::project(&event);
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

fn run_allocation(config: &AppConfig, source: Source, format: OutputFormat) -> Result<()> {
    let model = load_source(config, source)?;
    let slices = allocation(&model);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&slices)?),
        OutputFormat::Table => {
            println!("{ALLOCATION_TITLE}");
            for s in &slices {
                println!(
                    "{:<8} {:>6.1}%  {:>16}  {}",
                    s.ticker,
                    s.share * 100.0,
                    format_currency(s.profit_and_loss),
                    s.hint.label()
                );
            }
        }
    }
    Ok(())
}

fn run_sample(config: &AppConfig, output: PathBuf, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or(config.sample_seed);
    let tickers = sample_portfolio(seed);
    save_tickers(&output, &tickers)?;
    println!(
        "Wrote {} tickers (seed {seed}) to {}",
        tickers.len(),
        output.display()
    );
    Ok(())
}

fn run_validate(data: PathBuf) -> Result<()> {
    let records = load_records(&data)?;
    let model = RowDataModel::ingest(records)
        .with_context(|| format!("{} failed identity checks", data.display()))?;

    let malformed: Vec<_> = model
        .rows()
        .iter()
        .filter_map(|r| r.malformed())
        .collect();

    println!(
        "{}: {} rows, {} valid, {} malformed",
        data.display(),
        model.len(),
        model.len() - malformed.len(),
        malformed.len()
    );
    for err in &malformed {
        eprintln!("  {err}");
    }

    if !malformed.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
