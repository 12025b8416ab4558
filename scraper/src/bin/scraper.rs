use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;
use track_stats_scraper::{run, Config, RunOptions, ScrapeError};

/// Append yesterday's Southern Rail performance figures to the tracking file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report page to fetch
    #[arg(long)]
    url: Option<String>,

    /// JSON file holding every day captured so far
    #[arg(long)]
    output: Option<PathBuf>,

    /// Date to store the figures under (defaults to yesterday)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Parse a saved HTML page instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print the extracted rows without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let mut options = RunOptions::at(Utc::now(), config.timezone);
    if let Some(date) = cli.date {
        options.report_date = date;
    }
    options.input = cli.input;
    options.dry_run = cli.dry_run;

    if let Err(e) = run(&config, &options) {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &anyhow::Error) {
    println!("Error: {:#}", error);
    if let Some(dump) = error
        .downcast_ref::<ScrapeError>()
        .and_then(ScrapeError::diagnostic)
    {
        println!("Dumping context and quitting:");
        println!("{}", dump);
    }
}
