use crate::models::{CleanRow, DeltaMarker, RawDeltaCell, RawListingRow};

// ── Text transforms ───────────────────────────────────────────────────────────

/// Trim and drop thousands separators: " 12,345 " → "12345".
pub fn strip_separators(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Trim and drop a trailing percent sign: "+3.2%" → "+3.2".
pub fn strip_percent(s: &str) -> String {
    s.trim().trim_end_matches('%').to_string()
}

/// Lenient numeric parse of a cell's text form, separators stripped.
/// Empty or non-numeric text is `None`, never an error.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned = strip_separators(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

// ── Delta sign rule ───────────────────────────────────────────────────────────

/// Apply the marker rule to the delta cell's magnitude text.
///
/// The sign comes from the marker alone; any sign baked into the source
/// text is discarded along with the separators. No marker means the value
/// is not meaningful: the magnitude is thrown away and the delta is the
/// literal zero, not an assumed-positive number.
pub fn signed_delta_text(cell: &RawDeltaCell) -> String {
    let cleaned = strip_separators(&cell.text);
    let magnitude = cleaned.trim_start_matches(['+', '-']);

    match cell.marker {
        DeltaMarker::Down => format!("-{magnitude}"),
        DeltaMarker::Up => magnitude.to_string(),
        DeltaMarker::Absent => "0".to_string(),
    }
}

// ── Raw row → clean row ───────────────────────────────────────────────────────

/// Normalize one raw row into text-typed fields. Total: any input shape
/// produces a well-formed row, and bad numerics surface later as nulls
/// during coercion.
pub fn clean_row(raw: &RawListingRow) -> CleanRow {
    CleanRow {
        name: raw.name.trim().to_string(),
        price: strip_separators(&raw.price),
        delta: signed_delta_text(&raw.delta),
        rate: strip_percent(&raw.rate),
        volume: strip_separators(&raw.volume),
        trade_value: raw.trade_value.trim().to_string(),
        market_cap: raw.market_cap.trim().to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
