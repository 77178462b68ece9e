use crate::models::{DeltaMarker, RawDeltaCell, RawListingRow};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Structural marker for the one listing table on the page.
const TABLE_SELECTOR: &str = "table.type_1";

/// Rows at the top of the table that are headers, not data.
const HEADER_ROWS: usize = 2;

/// A data row has exactly this many cells; every other shape (spacer rows,
/// separators, ad rows) is dropped without a diagnostic.
pub const CELLS_PER_ROW: usize = 7;

/// Page-structure failure: a valid listing page always carries the table,
/// so its absence is fatal rather than an empty result.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("listing table not found in page")]
    MissingTable,

    #[error("bad selector {0}")]
    Selector(String),
}

fn sel(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector(format!("{selector}: {e:?}")))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>()
}

/// Pull the magnitude text and direction marker out of the delta cell.
///
/// The magnitude lives in a `span.tah` sub-element (`"0"` when missing);
/// the sign lives in the class of a sibling `<em>`, never in the text.
fn delta_cell(cell: &ElementRef, value_sel: &Selector, marker_sel: &Selector) -> RawDeltaCell {
    let text = cell
        .select(value_sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_else(|| "0".to_string());

    let marker = match cell.select(marker_sel).next() {
        Some(em) if em.value().classes().any(|c| c == "bu_pdn") => DeltaMarker::Down,
        Some(em) if em.value().classes().any(|c| c == "bu_pup") => DeltaMarker::Up,
        _ => DeltaMarker::Absent,
    };

    RawDeltaCell { text, marker }
}

/// Extract raw listing rows from one page's markup.
///
/// Skips the first two rows (headers), keeps only rows with exactly
/// [`CELLS_PER_ROW`] cells, and reads the delta cell's value/marker
/// sub-structure. Raw cell text is returned untouched; cleanup belongs
/// to the cleaner.
pub fn extract_listing_rows(html: &str) -> Result<Vec<RawListingRow>, ExtractError> {
    let doc = Html::parse_document(html);

    let table_sel = sel(TABLE_SELECTOR)?;
    let tr_sel = sel("tr")?;
    let td_sel = sel("td")?;
    let value_sel = sel("span.tah")?;
    let marker_sel = sel("em")?;

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or(ExtractError::MissingTable)?;

    let mut rows = Vec::new();
    for tr in table.select(&tr_sel).skip(HEADER_ROWS) {
        let cells: Vec<ElementRef> = tr.select(&td_sel).collect();
        if cells.len() != CELLS_PER_ROW {
            continue;
        }

        rows.push(RawListingRow {
            name: cell_text(&cells[0]),
            price: cell_text(&cells[1]),
            delta: delta_cell(&cells[2], &value_sel, &marker_sel),
            rate: cell_text(&cells[3]),
            volume: cell_text(&cells[4]),
            trade_value: cell_text(&cells[5]),
            market_cap: cell_text(&cells[6]),
        });
    }

    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Wrap body rows in the listing table with its two header rows.
    fn page(body_rows: &str) -> String {
        format!(
            "<html><body><table class=\"type_1\">\
             <tr><th>종목명</th></tr><tr><td colspan=\"7\"></td></tr>\
             {body_rows}</table></body></html>"
        )
    }

    fn stock_row(name: &str, delta_cell: &str) -> String {
        format!(
            "<tr><td><a href=\"#\">{name}</a></td><td>12,345</td>{delta_cell}\
             <td>+3.2%</td><td>1,000,000</td><td>12,345</td><td>500,000</td></tr>"
        )
    }

    const DELTA_DOWN: &str =
        "<td><em class=\"bu_p bu_pdn\"></em><span class=\"tah p11\">150</span></td>";
    const DELTA_UP: &str =
        "<td><em class=\"bu_p bu_pup\"></em><span class=\"tah p11\">150</span></td>";
    const DELTA_UNMARKED: &str = "<td><span class=\"tah p11\">150</span></td>";

    #[test]
    fn extracts_rows_with_marker_and_text() {
        let html = page(&format!(
            "{}{}{}",
            stock_row("Acme Corp", DELTA_DOWN),
            stock_row("Globex", DELTA_UP),
            stock_row("Initech", DELTA_UNMARKED),
        ));

        let rows = extract_listing_rows(&html).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].name, "Acme Corp");
        assert_eq!(rows[0].price, "12,345");
        assert_eq!(rows[0].delta.text, "150");
        assert_eq!(rows[0].delta.marker, DeltaMarker::Down);
        assert_eq!(rows[0].rate, "+3.2%");
        assert_eq!(rows[0].volume, "1,000,000");

        assert_eq!(rows[1].delta.marker, DeltaMarker::Up);
        assert_eq!(rows[2].delta.marker, DeltaMarker::Absent);
    }

    #[test]
    fn missing_table_is_fatal() {
        let html = "<html><body><table class=\"other\"><tr></tr></table></body></html>";
        assert!(matches!(
            extract_listing_rows(html),
            Err(ExtractError::MissingTable)
        ));
    }

    #[test]
    fn header_rows_are_skipped_even_with_seven_cells() {
        // Two leading rows are dropped unconditionally.
        let seven_cells = format!("<tr>{}</tr>", "<td>h</td>".repeat(7));
        let html = format!(
            "<html><body><table class=\"type_1\">{}{}{}</table></body></html>",
            seven_cells,
            seven_cells,
            stock_row("Acme Corp", DELTA_UP),
        );

        let rows = extract_listing_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Acme Corp");
    }

    #[test]
    fn missing_value_span_defaults_to_zero_text() {
        let bare = "<td><em class=\"bu_p bu_pdn\"></em></td>";
        let html = page(&stock_row("Acme Corp", bare));

        let rows = extract_listing_rows(&html).unwrap();
        assert_eq!(rows[0].delta.text, "0");
        assert_eq!(rows[0].delta.marker, DeltaMarker::Down);
    }

    #[test]
    fn unrecognized_marker_class_reads_as_absent() {
        let odd = "<td><em class=\"bu_p\"></em><span class=\"tah\">150</span></td>";
        let html = page(&stock_row("Acme Corp", odd));

        let rows = extract_listing_rows(&html).unwrap();
        assert_eq!(rows[0].delta.marker, DeltaMarker::Absent);
    }

    #[test]
    fn table_with_no_data_rows_is_empty_not_fatal() {
        let rows = extract_listing_rows(&page("")).unwrap();
        assert!(rows.is_empty());
    }

    proptest! {
        #[test]
        fn rows_without_seven_cells_never_extract(cells in 0usize..=12) {
            prop_assume!(cells != 7);
            let row = format!("<tr>{}</tr>", "<td>1</td>".repeat(cells));
            let rows = extract_listing_rows(&page(&row)).unwrap();
            prop_assert!(rows.is_empty());
        }
    }
}
