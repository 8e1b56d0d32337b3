/*!
 * Serialization of the translation table.
 *
 * - `csv_export`: UTF-8 CSV with a byte order mark (opens cleanly in Excel)
 * - `xlsx`: single-sheet workbook named `translations`
 */

pub mod csv_export;
pub mod xlsx;

pub use csv_export::to_csv_bytes;
pub use xlsx::{SHEET_NAME, to_xlsx_bytes};

/// Base name of exported files
pub const EXPORT_BASENAME: &str = "translations";
