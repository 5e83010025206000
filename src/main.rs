use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ecodash::config::AppConfig;
use ecodash::loader::{InputSource, load_dashboard, write_text, write_wide_csv_file};
use ecodash::models::ChartPeriod;
use ecodash::pipeline::RecordQuery;
use ecodash::{report, utils};

#[derive(Parser)]
#[command(name = "ecodash", about = "Sector credit dashboard engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args, Clone)]
struct InputArgs {
    /// Semicolon-delimited source file (header + name;amount;total;date rows)
    #[arg(long, conflicts_with = "json", required_unless_present = "json")]
    csv: Option<PathBuf>,

    /// Previously exported JSON document
    #[arg(long)]
    json: Option<PathBuf>,
}

impl InputArgs {
    fn source(&self) -> Result<InputSource> {
        match (&self.csv, &self.json) {
            (Some(path), _) => Ok(InputSource::Csv(path.clone())),
            (None, Some(path)) => Ok(InputSource::Json(path.clone())),
            (None, None) => bail!("one of --csv or --json is required"),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Headline figures for the latest date of a period
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long, value_enum)]
        period: Option<ChartPeriod>,
    },

    /// Wide table: one row per day, one column per sector
    Table {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long, value_enum)]
        period: Option<ChartPeriod>,
        /// Write the table as CSV instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Growth and volatility of one sector over the full history
    Sector {
        #[command(flatten)]
        input: InputArgs,
        name: String,
    },

    /// Sector shares at the latest date
    Distribution {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long, value_enum)]
        period: Option<ChartPeriod>,
    },

    /// Newest-first record listing
    Records {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long, value_enum)]
        period: Option<ChartPeriod>,
        /// Sector substring (any case) or date text substring
        #[arg(short, long)]
        search: Option<String>,
        /// Exact sector name
        #[arg(long)]
        sector: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write the record set as a JSON document
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "ecodash=info,warn",
        1 => "ecodash=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let default_period = config.dashboard.default_period;

    match cli.command {
        Command::Summary { input, period } => {
            let dashboard = load_dashboard(&input.source()?, config)?;
            let snapshot = dashboard.snapshot(period.unwrap_or(default_period));
            print!("{}", report::format_summary(&snapshot));
        }

        Command::Table { input, period, out } => {
            let dashboard = load_dashboard(&input.source()?, config)?;
            let snapshot = dashboard.snapshot(period.unwrap_or(default_period));
            match out {
                Some(path) => {
                    let _t = utils::Timer::start("Wide table export");
                    write_wide_csv_file(&path, &snapshot.rows)?;
                }
                None => print!("{}", report::format_wide_table(&snapshot.rows)),
            }
        }

        Command::Sector { input, name } => {
            let dashboard = load_dashboard(&input.source()?, config)?;
            match dashboard.sector_details(&name) {
                Some(stats) => print!("{}", report::format_sector_details(&stats)),
                None => {
                    println!("No records for sector {:?}.", name);
                    println!("Known sectors: {}", dashboard.sectors().join(", "));
                }
            }
        }

        Command::Distribution { input, period } => {
            let dashboard = load_dashboard(&input.source()?, config)?;
            let snapshot = dashboard.snapshot(period.unwrap_or(default_period));
            if let Some(stats) = &snapshot.stats {
                println!("Distribution at {}:", stats.latest_date);
            }
            print!("{}", report::format_distribution(&snapshot.distribution));
        }

        Command::Records { input, period, search, sector, limit } => {
            let dashboard = load_dashboard(&input.source()?, config)?;
            let snapshot = dashboard.snapshot(period.unwrap_or(default_period));
            let query = RecordQuery { search, sector, limit };
            let rows = dashboard.search(&snapshot.records, &query);
            print!("{}", report::format_records(&rows));
        }

        Command::Export { input, out } => {
            let _t = utils::Timer::start("JSON export");
            let dashboard = load_dashboard(&input.source()?, config)?;
            write_text(&out, &dashboard.export_document()?)?;
            info!("Exported {} records", dashboard.records().len());
        }
    }

    Ok(())
}
