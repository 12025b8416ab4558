use chrono_tz::Tz;
use std::path::PathBuf;

pub const STATS_URL: &str =
    "https://www.southernrailway.com/about-us/how-were-performing/daily-performance-report";
pub const STATS_TRACK_FILE: &str = "southern-rail-performance.json";
pub const ANCHOR_SELECTOR: &str = r#"div.c-performance-info[data-test="performance-info"]"#;

/// Columns written to the data file. These must match headers in the table.
/// "On Time" replaced "Right Time" in April 2017.
pub const EXPECTED_COLUMNS: &[&str] = &["Route", "PPM", "On Time"];

pub const PERCENTAGE_COLUMNS: &[&str] = &["PPM", "On Time"];

/// Dates in the report, and the backup names, follow UK time.
pub const REPORT_TIMEZONE: Tz = chrono_tz::Europe::London;

/// Everything a run needs to know about where the report lives and what to
/// pull out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub output_path: PathBuf,
    pub anchor_selector: String,
    pub expected_columns: Vec<String>,
    pub percentage_columns: Vec<String>,
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: STATS_URL.to_string(),
            output_path: PathBuf::from(STATS_TRACK_FILE),
            anchor_selector: ANCHOR_SELECTOR.to_string(),
            expected_columns: EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            percentage_columns: PERCENTAGE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            timezone: REPORT_TIMEZONE,
        }
    }
}
