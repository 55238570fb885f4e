//! Spreadsheet export and report email delivery.

pub mod error;
pub mod mailer;
pub mod spreadsheet;

pub use error::ExportError;
pub use mailer::{build_report_message, send_report, XLSX_CONTENT_TYPE};
pub use spreadsheet::{default_filename, location_slug, render_workbook, write_leads_xlsx, COLUMNS};
