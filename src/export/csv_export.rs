use csv::Writer;

use crate::errors::ExportError;
use crate::pipeline::TranslationTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize the table as CSV, prefixed with a UTF-8 BOM
pub fn to_csv_bytes(table: &TranslationTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
