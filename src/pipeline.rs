/*!
 * Pipeline driver: OCR lines in, aligned multilingual table out.
 *
 * raw lines → corrections → trim → dedup (first occurrence wins) → resolver → table
 */

use log::{debug, info};
use std::collections::HashSet;

use crate::errors::OcrError;
use crate::language_utils::{SOURCE_COLUMN, TargetLanguage};
use crate::ocr::TextExtractor;
use crate::text::apply_corrections;
use crate::translation::{ResolutionStats, TranslationResolver, TranslationResult};

/// A cleaned, deduplicated string from the OCR output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    /// Cleaned text as shown in the EN column
    pub text: String,
    /// Position in the cleaned list
    pub index: usize,
}

impl AsRef<str> for ExtractedString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Apply corrections, trim, drop blanks and drop exact repeats, keeping first-seen order
pub fn clean_strings<I, S>(raw_lines: I) -> Vec<ExtractedString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for line in raw_lines {
        let text = apply_corrections(line.as_ref()).trim().to_string();
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        cleaned.push(ExtractedString {
            index: cleaned.len(),
            text,
        });
    }

    cleaned
}

/// Final table: `EN` plus one column per selected target, one row per string
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    stats: ResolutionStats,
}

impl TranslationTable {
    /// Assemble rows from the source strings and their aligned translations
    pub fn from_result(strings: &[ExtractedString], result: &TranslationResult) -> Self {
        let headers = std::iter::once(SOURCE_COLUMN.to_string())
            .chain(result.targets().map(|lang| lang.code().to_string()))
            .collect();

        let rows = strings
            .iter()
            .enumerate()
            .map(|(i, extracted)| {
                std::iter::once(extracted.text.clone())
                    .chain(result.columns().iter().map(|(_, column)| column[i].clone()))
                    .collect()
            })
            .collect();

        Self {
            headers,
            rows,
            stats: result.stats(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }

    /// All values under `header`
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Threads extracted strings through clean-up and translation
pub struct PipelineDriver {
    resolver: TranslationResolver,
}

impl PipelineDriver {
    pub fn new(resolver: TranslationResolver) -> Self {
        Self { resolver }
    }

    /// Build the table from raw OCR lines
    pub async fn run_lines<S: AsRef<str>>(&self, raw_lines: &[S], targets: &[TargetLanguage]) -> TranslationTable {
        let strings = clean_strings(raw_lines);
        debug!("{} raw line(s) -> {} unique string(s)", raw_lines.len(), strings.len());

        let result = self.resolver.translate_all(&strings, targets).await;
        TranslationTable::from_result(&strings, &result)
    }

    /// Run OCR on `image_bytes`, then build the table.
    ///
    /// OCR failures abort the run; nothing is produced.
    pub async fn run_image(
        &self,
        extractor: &dyn TextExtractor,
        image_bytes: &[u8],
        targets: &[TargetLanguage],
    ) -> Result<TranslationTable, OcrError> {
        let lines = extractor.extract_lines(image_bytes).await?;
        info!("OCR returned {} line(s)", lines.len());
        Ok(self.run_lines(&lines, targets).await)
    }
}
