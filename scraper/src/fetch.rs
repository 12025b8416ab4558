use crate::error::FetchError;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;

pub fn fetch_html(url: &str) -> Result<String, FetchError> {
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(request_error)?;
    response.text().map_err(request_error)
}

/// Read a previously saved report page instead of going to the network.
pub fn read_html(path: &Path) -> Result<String, FetchError> {
    fs::read_to_string(path).map_err(|source| FetchError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
