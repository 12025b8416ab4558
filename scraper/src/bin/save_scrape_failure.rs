use anyhow::{Context, Result};
use clap::Parser;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use track_stats_scraper::config::STATS_URL;
use track_stats_scraper::{extract_report, fetch_html, Config};

/// Save the live report page as a regression fixture and check whether it parses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the fixture file to write (without .html)
    test_name: String,

    /// Report page to fetch
    #[arg(long, default_value = STATS_URL)]
    url: String,
}

fn has_match(document: &Html, selector: &str) -> Result<bool> {
    let selector = Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("invalid selector {}: {:?}", selector, e))?;
    Ok(document.select(&selector).next().is_some())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config {
        url: cli.url,
        ..Config::default()
    };

    // Fetch the page
    println!("Fetching HTML from {}...", config.url);
    let html = fetch_html(&config.url)?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", cli.test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    // Check each structural step the extractor relies on
    let document = Html::parse_document(&html);
    let anchor = config.anchor_selector.as_str();
    let has_anchor = has_match(&document, anchor)?;
    let has_table = has_match(&document, &format!("{} table", anchor))?;
    let has_thead = has_match(&document, &format!("{} table thead", anchor))?;
    let has_body_rows = has_match(&document, &format!("{} table tbody > tr", anchor))?;

    println!("HTML analysis results:");
    println!("  - Has anchor: {}", has_anchor);
    println!("  - Has table: {}", has_table);
    println!("  - Has thead: {}", has_thead);
    println!("  - Has body rows: {}", has_body_rows);

    // Now try to parse it with the actual extractor
    match extract_report(&html, &config) {
        Ok(rows) => {
            println!("Parse succeeded with {} rows. This may not be a failure case.", rows.len());
        }
        Err(e) => {
            println!("Parse failed with error: {}", e);

            if !has_anchor || !has_table || !has_thead {
                println!("   Missing required HTML elements - structural issue");
            } else {
                println!("   Has all required elements - likely a column or row issue");
            }

            println!("\nThis page has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
