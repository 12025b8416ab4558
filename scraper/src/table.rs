use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Expected column name paired with its position in the document's header row,
/// kept in expected-column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, usize)>,
}

impl HeaderMap {
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, index)| *index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, index)| (name.as_str(), *index))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Find the performance table inside the anchor element. Headings and any
/// other markup the anchor wraps are ignored.
pub fn locate_table<'a>(
    document: &'a Html,
    anchor_selector: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    let anchor_sel = parse_selector(anchor_selector)?;
    let table_sel = parse_selector("table")?;

    // Find the surrounding div
    let anchor = document
        .select(&anchor_sel)
        .next()
        .ok_or_else(|| ScrapeError::AnchorNotFound {
            selector: anchor_selector.to_string(),
            document: document.root_element().html(),
        })?;

    // Skip the heading and anything else between the div and the table
    anchor
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound {
            selector: anchor_selector.to_string(),
            fragment: anchor.html(),
        })
}

/// Header cell text in document order. Text is not trimmed.
pub fn extract_headers(table: ElementRef) -> Result<Vec<String>, ScrapeError> {
    let thead_sel = parse_selector("thead")?;
    let cell_sel = parse_selector("th, td")?;

    let thead = table
        .select(&thead_sel)
        .next()
        .ok_or_else(|| ScrapeError::HeaderSectionMissing {
            table: table.html(),
        })?;

    // Visible text only, nested markup is flattened
    let headers: Vec<String> = thead
        .select(&cell_sel)
        .map(|cell| cell.text().collect::<String>())
        .collect();

    if headers.is_empty() {
        return Err(ScrapeError::NoHeaderCells {
            thead: thead.html(),
        });
    }

    log::debug!("found headers {:?}", headers);
    Ok(headers)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Map each expected column to its position in the actual headers, so a
/// reordered table still lines up. The first matching header wins.
pub fn reconcile_headers<S: AsRef<str>>(
    expected: &[S],
    actual: &[String],
) -> Result<HeaderMap, ScrapeError> {
    let normalized: Vec<String> = actual.iter().map(|h| normalize_header(h)).collect();

    let mut entries = Vec::with_capacity(expected.len());
    for column in expected {
        let column = column.as_ref();
        let wanted = normalize_header(column);
        // First match wins if a header appears twice
        let index = normalized
            .iter()
            .position(|header| *header == wanted)
            .ok_or_else(|| ScrapeError::ColumnMissing {
                column: column.to_string(),
                headers: actual.to_vec(),
            })?;
        entries.push((column.to_string(), index));
    }

    Ok(HeaderMap { entries })
}

/// Cell values of one body row, in document order.
fn row_cells(row: ElementRef) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

/// Read every body row, picking out the cells named by `header_map`. Each
/// returned row is ordered like the expected columns, not like the document.
pub fn extract_rows(
    table: ElementRef,
    header_map: &HeaderMap,
) -> Result<Vec<Vec<String>>, ScrapeError> {
    let row_sel = parse_selector("tbody > tr")?;

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        let cells = row_cells(row);
        // Blank rows carry no data
        if cells.is_empty() && row.text().all(|t| t.trim().is_empty()) {
            continue;
        }

        // Link up to the requested header columns
        let mut values = Vec::with_capacity(header_map.len());
        for (column, index) in header_map.iter() {
            let value = cells.get(index).ok_or_else(|| ScrapeError::RowTooShort {
                column: column.to_string(),
                index,
                cells: cells.len(),
                row: row.html(),
            })?;
            values.push(value.clone());
        }
        rows.push(values);
    }

    log::debug!("extracted {} rows", rows.len());
    Ok(rows)
}
