use crate::language_utils::TargetLanguage;

/// Where a table cell came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    /// Noise string copied unchanged
    PassThrough,
    /// Glossary override
    Glossary,
    /// Machine translation
    Machine,
    /// Machine translation failed; the cell holds an error marker
    Failed,
}

/// Per-source cell counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub pass_through: usize,
    pub glossary: usize,
    pub machine: usize,
    pub failed: usize,
}

impl ResolutionStats {
    pub fn record(&mut self, source: CellSource) {
        match source {
            CellSource::PassThrough => self.pass_through += 1,
            CellSource::Glossary => self.glossary += 1,
            CellSource::Machine => self.machine += 1,
            CellSource::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass_through + self.glossary + self.machine + self.failed
    }
}

/// Marker written into a cell whose translation failed
pub fn error_marker(description: impl std::fmt::Display) -> String {
    format!("[Translation error: {}]", description)
}

/// Translated columns, each index-aligned with the input strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationResult {
    columns: Vec<(TargetLanguage, Vec<String>)>,
    stats: ResolutionStats,
}

impl TranslationResult {
    pub(crate) fn new(columns: Vec<(TargetLanguage, Vec<String>)>, stats: ResolutionStats) -> Self {
        Self { columns, stats }
    }

    /// Column for `lang`, if it was requested
    pub fn column(&self, lang: TargetLanguage) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(code, _)| *code == lang)
            .map(|(_, values)| values.as_slice())
    }

    /// Requested targets in request order
    pub fn targets(&self) -> impl Iterator<Item = TargetLanguage> + '_ {
        self.columns.iter().map(|(code, _)| *code)
    }

    pub fn columns(&self) -> &[(TargetLanguage, Vec<String>)] {
        &self.columns
    }

    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }
}
