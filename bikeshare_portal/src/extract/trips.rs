//! Row extraction for the paginated trip-history table.

use crate::dom::{element_text, Page};
use crate::types::RawTrip;
use scraper::{ElementRef, Selector};

const TRIP_TABLE: &str = "ed-html-table ed-html-table_trip";
const PAGE_LAST: &str =
    "ed-paginated-navigation__pages-group__link_last ed-paginated-navigation__pages-group__link";

/// Extracts every trip row from one history page, most recent first.
///
/// Rows without data cells (the header row, spacers) are skipped. Within a
/// data row, the first two cells stack station name / time / optional
/// points divs for the start and end side; the remaining cells carry the
/// duration, billed amount, and a `"<points> <suffix>"` total. Missing or
/// non-numeric points default to 0; a page with no recognizable trip table
/// yields no rows.
pub fn extract_trip_data(html: &str) -> Vec<RawTrip> {
    let page = Page::parse(html);
    let Some(table) = page.first_exact("table", TRIP_TABLE) else {
        tracing::warn!("trip table not found in page");
        return Vec::new();
    };

    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("td").expect("static selector");

    let mut trips = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.is_empty() {
            continue;
        }

        let (start_name, start_time, start_points) = side_cell(&cells[0]);
        let (end_name, end_time, end_points) = cells
            .get(1)
            .map(side_cell)
            .unwrap_or_default();

        let duration = cells.get(2).map(element_text).unwrap_or_default();
        let billed = cells.get(3).map(element_text).unwrap_or_default();
        let points = cells
            .get(4)
            .map(element_text)
            .and_then(|t| t.split(' ').next().and_then(|p| p.parse().ok()))
            .unwrap_or(0);

        trips.push(RawTrip {
            start_name,
            end_name,
            start_time,
            end_time,
            start_points,
            end_points,
            points,
            billed,
            duration,
        });
    }

    trips
}

/// One side of a trip row: stacked divs for station name, time text, and
/// an optional points figure.
fn side_cell(cell: &ElementRef) -> (String, String, i64) {
    let div_sel = Selector::parse("div").expect("static selector");
    let divs: Vec<String> = cell.select(&div_sel).map(|el| element_text(&el)).collect();
    let name = divs.first().cloned().unwrap_or_default();
    let time = divs.get(1).cloned().unwrap_or_default();
    let points = divs
        .get(2)
        .and_then(|t| t.parse().ok())
        .unwrap_or(0);
    (name, time, points)
}

/// Page count from the paginated navigation's "last page" control: the
/// integer query parameter of its link target.
pub fn last_page_number(html: &str) -> Option<i64> {
    let page = Page::parse(html);
    let href = page.attr_exact("a", PAGE_LAST, "href")?;
    href.split('=').nth(1)?.parse().ok()
}
