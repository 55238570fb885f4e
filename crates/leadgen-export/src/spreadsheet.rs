//! `.xlsx` rendering of a lead list.

use std::path::Path;

use chrono::NaiveDateTime;
use leadgen_core::LeadRecord;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::ExportError;

/// Header row, in column order.
pub const COLUMNS: [&str; 12] = [
    "Business Name",
    "Address",
    "Phone",
    "Email",
    "Rating",
    "Total Ratings",
    "Business Status",
    "Types",
    "Location Searched",
    "Query Used",
    "Has Website",
    "Place ID",
];

const MISSING: &str = "N/A";
const SHEET_NAME: &str = "Leads";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Number(f64),
}

fn text_or_missing(value: Option<&str>) -> Cell {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Cell::Text(s.to_owned()),
        _ => Cell::Text(MISSING.to_owned()),
    }
}

/// Cell values for one lead, aligned with [`COLUMNS`].
pub(crate) fn row_cells(lead: &LeadRecord) -> [Cell; 12] {
    let rating = lead
        .rating
        .map_or_else(|| Cell::Text(MISSING.to_owned()), Cell::Number);
    let types = if lead.types.is_empty() {
        None
    } else {
        Some(lead.types.as_str())
    };

    [
        text_or_missing(lead.business_name.as_deref()),
        text_or_missing(lead.address.as_deref()),
        text_or_missing(lead.phone.as_deref()),
        Cell::Text(lead.email_or_sentinel().to_owned()),
        rating,
        Cell::Number(f64::from(lead.total_ratings)),
        text_or_missing(lead.business_status.as_deref()),
        text_or_missing(types),
        Cell::Text(lead.location_searched.clone()),
        Cell::Text(lead.query_used.clone()),
        Cell::Text(lead.has_website().to_owned()),
        Cell::Text(lead.place_id.clone()),
    ]
}

/// Build an in-memory workbook with a bold header row and one row per lead.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if a cell cannot be written.
pub fn render_workbook(leads: &[LeadRecord]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, title) in (0u16..).zip(COLUMNS) {
            sheet.write_string_with_format(0, col, title, &header)?;
        }

        for (row, lead) in (1u32..).zip(leads) {
            for (col, cell) in (0u16..).zip(row_cells(lead)) {
                match cell {
                    Cell::Text(s) => sheet.write_string(row, col, s)?,
                    Cell::Number(n) => sheet.write_number(row, col, n)?,
                };
            }
        }

        sheet.set_freeze_panes(1, 0)?;
        sheet.autofit();
    }

    Ok(workbook)
}

/// Write `leads` to an `.xlsx` file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if rendering fails or the file cannot be
/// saved.
pub fn write_leads_xlsx(path: &Path, leads: &[LeadRecord]) -> Result<(), ExportError> {
    let mut workbook = render_workbook(leads)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = leads.len(), "spreadsheet written");
    Ok(())
}

/// Lowercase a location into a filename-safe slug: runs of anything other
/// than ASCII letters and digits collapse to a single `_`.
#[must_use]
pub fn location_slug(location: &str) -> String {
    let mut slug = String::with_capacity(location.len());
    for ch in location.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Generated output filename.
///
/// `leads_{YYYYMMDD_HHMMSS}.xlsx`, or `leads_{slug}_{YYYYMMDD_HHMMSS}.xlsx`
/// when exactly one location was searched.
#[must_use]
pub fn default_filename(timestamp: NaiveDateTime, locations: &[String]) -> String {
    let stamp = timestamp.format("%Y%m%d_%H%M%S");
    match locations {
        [only] => {
            let slug = location_slug(only);
            if slug.is_empty() {
                format!("leads_{stamp}.xlsx")
            } else {
                format!("leads_{slug}_{stamp}.xlsx")
            }
        }
        _ => format!("leads_{stamp}.xlsx"),
    }
}

#[cfg(test)]
#[path = "spreadsheet_test.rs"]
mod tests;
