use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch::{fetch_html, read_html};
use crate::postprocess::{key_rows, strip_percentages, KeyedRow};
use crate::store::Store;
use crate::table::{extract_headers, extract_rows, locate_table, reconcile_headers};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use scraper::Html;
use std::path::PathBuf;

/// Per-invocation choices, as opposed to the fixed [`Config`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Day the report covers, used as the dataset key.
    pub report_date: NaiveDate,
    /// Day the run happens, used to name backups.
    pub today: NaiveDate,
    /// Read the page from this file instead of fetching it.
    pub input: Option<PathBuf>,
    /// Print the extracted rows without touching the data file.
    pub dry_run: bool,
}

impl RunOptions {
    /// Options for a run happening at `now`, with dates taken in `timezone`.
    pub fn at(now: DateTime<Utc>, timezone: Tz) -> Self {
        let today = now.with_timezone(&timezone).date_naive();
        // The page reports on the previous day
        let report_date = today.pred_opt().unwrap_or(today);
        RunOptions {
            report_date,
            today,
            input: None,
            dry_run: false,
        }
    }
}

/// Pull the keyed, cleaned rows out of a report page.
pub fn extract_report(html: &str, config: &Config) -> Result<Vec<KeyedRow>, ScrapeError> {
    let document = Html::parse_document(html);

    // Find the table, then line up its columns with the ones we want
    let table = locate_table(&document, &config.anchor_selector)?;
    let headers = extract_headers(table)?;
    let header_map = reconcile_headers(config.expected_columns.as_slice(), &headers)?;
    let rows = extract_rows(table, &header_map)?;

    // Re-key by column name and clean up the figures
    let keyed = key_rows(rows, &header_map);
    Ok(strip_percentages(keyed, config.percentage_columns.as_slice()))
}

/// Fetch, extract and store one day's report. Nothing is written unless every
/// step before the write succeeds.
pub fn run(config: &Config, options: &RunOptions) -> Result<()> {
    // Get the page, either saved or live
    let html = match &options.input {
        Some(path) => {
            println!("Reading from {}", path.display());
            read_html(path)?
        }
        None => {
            println!("Getting from {}", config.url);
            fetch_html(&config.url)?
        }
    };

    // Extract everything before touching the data file
    let rows = extract_report(&html, config)?;
    let date_key = options.report_date.format("%Y-%m-%d").to_string();
    log::info!("extracted {} rows for {}", rows.len(), date_key);

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        println!("Dry run, not writing to {}", config.output_path.display());
        return Ok(());
    }

    // Add the new day, refusing if this date has already been stored
    let store = Store::new(&config.output_path);
    let dataset = store.load()?.insert_day(&date_key, rows)?;
    log::debug!("dataset now holds {} days", dataset.len());

    store.persist(&dataset, options.today)?;

    println!("Data written to {}", store.path().display());
    Ok(())
}
