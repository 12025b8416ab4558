use super::fixtures;
use crate::error::ScrapeError;
use crate::table::{extract_headers, extract_rows, locate_table, reconcile_headers};
use scraper::Html;

const ANCHOR: &str = r#"div.c-performance-info[data-test="performance-info"]"#;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_locate_table_skips_tables_outside_anchor() {
    let html = fixtures::load_html_fixture("sample_report");
    let document = Html::parse_document(&html);

    let table = locate_table(&document, ANCHOR).unwrap();

    assert_eq!(table.value().attr("class"), Some("c-performance-info__table"));
}

#[test]
fn test_missing_anchor() {
    let html = r#"
    <html>
    <body>
        <div class="c-performance"><table><tr><td>x</td></tr></table></div>
    </body>
    </html>
    "#;
    let document = Html::parse_document(html);

    let result = locate_table(&document, ANCHOR);
    match result {
        Err(ScrapeError::AnchorNotFound { document, .. }) => {
            assert!(document.contains("c-performance"));
        }
        other => panic!("expected AnchorNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_table_inside_anchor() {
    let html = fixtures::report_page("<p>No figures today</p>");
    let document = Html::parse_document(&html);

    let result = locate_table(&document, ANCHOR);
    match result {
        Err(ScrapeError::TableNotFound { fragment, .. }) => {
            assert!(fragment.contains("No figures today"));
        }
        other => panic!("expected TableNotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_anchor_selector() {
    let document = Html::parse_document("<html></html>");
    let result = locate_table(&document, "div[");
    assert!(matches!(result, Err(ScrapeError::InvalidSelector { .. })));
}

#[test]
fn test_extract_headers_keeps_inner_text() {
    let html = fixtures::load_html_fixture("sample_report");
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();

    let headers = extract_headers(table).unwrap();

    assert_eq!(headers, vec!["Route", " On Time ", "PPM", "Cancellations"]);
}

#[test]
fn test_extract_headers_strips_nested_markup() {
    let html = fixtures::report_page(
        "<table><thead><tr><th><span>Route</span></th><th>On <em>Time</em></th></tr></thead></table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();

    assert_eq!(extract_headers(table).unwrap(), vec!["Route", "On Time"]);
}

#[test]
fn test_missing_thead() {
    let html = fixtures::report_page("<table><tr><td>Route</td><td>PPM</td></tr></table>");
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();

    let result = extract_headers(table);
    match result {
        Err(ScrapeError::HeaderSectionMissing { table }) => {
            assert!(table.contains("Route"));
        }
        other => panic!("expected HeaderSectionMissing, got {:?}", other),
    }
}

#[test]
fn test_thead_without_cells() {
    let html = fixtures::report_page(
        "<table><thead><tr></tr></thead><tbody><tr><td>Metro</td></tr></tbody></table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();

    let result = extract_headers(table);
    assert!(matches!(result, Err(ScrapeError::NoHeaderCells { .. })));
}

#[test]
fn test_reconcile_is_order_independent() {
    let map = reconcile_headers(&["A", "B"], &headers(&["B", "A"])).unwrap();

    assert_eq!(map.index_of("A"), Some(1));
    assert_eq!(map.index_of("B"), Some(0));
    assert_eq!(map.columns().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_reconcile_ignores_case_and_whitespace() {
    let map = reconcile_headers(&["On Time"], &headers(&["Route", "  on time  "])).unwrap();
    assert_eq!(map.index_of("On Time"), Some(1));
}

#[test]
fn test_reconcile_first_match_wins() {
    let map = reconcile_headers(&["PPM"], &headers(&["ppm", "Route", "PPM"])).unwrap();
    assert_eq!(map.index_of("PPM"), Some(0));
}

#[test]
fn test_reconcile_missing_column() {
    let actual = headers(&["Route", "PPM", "Right Time"]);

    let result = reconcile_headers(&["Route", "PPM", "On Time"], &actual);
    match result {
        Err(ScrapeError::ColumnMissing { column, headers }) => {
            assert_eq!(column, "On Time");
            assert_eq!(headers, actual);
        }
        other => panic!("expected ColumnMissing, got {:?}", other),
    }
}

#[test]
fn test_extract_rows_follow_header_map() {
    let html = fixtures::load_html_fixture("sample_report");
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let headers = extract_headers(table).unwrap();
    let map = reconcile_headers(&["Route", "PPM", "On Time"], &headers).unwrap();

    let rows = extract_rows(table, &map).unwrap();

    assert_eq!(
        rows,
        vec![
            vec!["Brighton Main Line", "88.4%", "71.2%"],
            vec!["Coastway", "92.3%", "80.5%"],
            vec!["Metro", "84.9%", "65.0%"],
        ]
    );
}

#[test]
fn test_extract_rows_reads_swapped_columns() {
    let html = fixtures::report_page(
        "<table>
            <thead><tr><th>B</th><th>A</th></tr></thead>
            <tbody><tr><td>b1</td><td>a1</td></tr><tr><td>b2</td><td>a2</td></tr></tbody>
        </table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let map = reconcile_headers(&["A", "B"], &extract_headers(table).unwrap()).unwrap();

    let rows = extract_rows(table, &map).unwrap();

    assert_eq!(rows, vec![vec!["a1", "b1"], vec!["a2", "b2"]]);
}

#[test]
fn test_extract_rows_skips_empty_rows() {
    let html = fixtures::report_page(
        "<table>
            <thead><tr><th>Route</th></tr></thead>
            <tbody><tr>  </tr><tr><td>Metro</td></tr><tr></tr></tbody>
        </table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let map = reconcile_headers(&["Route"], &extract_headers(table).unwrap()).unwrap();

    let rows = extract_rows(table, &map).unwrap();

    assert_eq!(rows, vec![vec!["Metro"]]);
}

#[test]
fn test_extract_rows_short_row() {
    let html = fixtures::report_page(
        "<table>
            <thead><tr><th>Route</th><th>PPM</th><th>On Time</th></tr></thead>
            <tbody>
                <tr><td>Metro</td><td>84.9%</td><td>65.0%</td></tr>
                <tr><td colspan=\"3\">Figures are provisional</td></tr>
            </tbody>
        </table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let map = reconcile_headers(&["Route", "On Time"], &extract_headers(table).unwrap()).unwrap();

    let result = extract_rows(table, &map);
    match result {
        Err(ScrapeError::RowTooShort {
            column,
            index,
            cells,
            row,
        }) => {
            assert_eq!(column, "On Time");
            assert_eq!(index, 2);
            assert_eq!(cells, 1);
            assert!(row.contains("Figures are provisional"));
        }
        other => panic!("expected RowTooShort, got {:?}", other),
    }
}

#[test]
fn test_extract_rows_accepts_extra_cells() {
    let html = fixtures::report_page(
        "<table>
            <thead><tr><th>Route</th><th>PPM</th></tr></thead>
            <tbody><tr><td>Metro</td><td>84.9%</td><td>extra</td></tr></tbody>
        </table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let map = reconcile_headers(&["PPM"], &extract_headers(table).unwrap()).unwrap();

    assert_eq!(extract_rows(table, &map).unwrap(), vec![vec!["84.9%"]]);
}

#[test]
fn test_row_header_cells_count_as_columns() {
    let html = fixtures::report_page(
        "<table>
            <thead><tr><th>Route</th><th>PPM</th></tr></thead>
            <tbody><tr><th scope=\"row\">Coastway</th><td>92.3%</td></tr></tbody>
        </table>",
    );
    let document = Html::parse_document(&html);
    let table = locate_table(&document, ANCHOR).unwrap();
    let map = reconcile_headers(&["Route", "PPM"], &extract_headers(table).unwrap()).unwrap();

    assert_eq!(extract_rows(table, &map).unwrap(), vec![vec!["Coastway", "92.3%"]]);
}
