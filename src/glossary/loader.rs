use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::index::GlossaryEntry;
use crate::errors::GlossaryError;
use crate::language_utils::{SOURCE_COLUMN, TargetLanguage};

/// Required header names, in canonical order
pub fn required_columns() -> Vec<&'static str> {
    std::iter::once(SOURCE_COLUMN)
        .chain(TargetLanguage::ALL.iter().map(|lang| lang.code()))
        .collect()
}

/// Read glossary rows from CSV.
///
/// The header must contain `EN,ID,JA,KO,MS,TH,VI,ZH` (case-sensitive, any order, extra
/// columns ignored). If any are missing the whole file is rejected. Short rows are
/// allowed; their missing cells count as blank.
pub fn read_glossary<R: Read>(reader: R) -> Result<Vec<GlossaryEntry>, GlossaryError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let column_of = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|name| column_of(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(GlossaryError::MissingColumns(missing));
    }

    // Presence checked above
    let source_idx = column_of(SOURCE_COLUMN).unwrap_or_default();
    let target_idx: Vec<(TargetLanguage, usize)> = TargetLanguage::ALL
        .iter()
        .filter_map(|lang| column_of(lang.code()).map(|idx| (*lang, idx)))
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let mut entry = GlossaryEntry::new(cell(source_idx));
        for (lang, idx) in &target_idx {
            entry.set_override(*lang, cell(*idx));
        }
        rows.push(entry);
    }

    Ok(rows)
}

/// Read glossary rows from a CSV file on disk
pub fn load_glossary_file<P: AsRef<Path>>(path: P) -> Result<Vec<GlossaryEntry>, GlossaryError> {
    let file = File::open(path.as_ref())?;
    read_glossary(file)
}
