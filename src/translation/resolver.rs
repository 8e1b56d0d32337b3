/*!
 * Per-cell decision between pass-through, glossary override and machine translation.
 *
 * Each cell is resolved by a fixed decision table:
 *
 * | noise? | glossary value for target | result                          |
 * |--------|---------------------------|---------------------------------|
 * | yes    | -                         | original string                 |
 * | no     | non-empty                 | glossary value                  |
 * | no     | missing / empty           | machine translation             |
 * | no     | missing / empty, MT fails | `[Translation error: ...]`      |
 *
 * Machine translation requests run with a bounded fan-out. Every request carries its
 * cell coordinates, so completion order never affects the table layout.
 */

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::sync::Arc;

use super::result::{CellSource, ResolutionStats, TranslationResult, error_marker};
use super::retry::RetryPolicy;
use crate::glossary::GlossaryIndex;
use crate::language_utils::{SOURCE_LANGUAGE, TargetLanguage};
use crate::providers::Translator;
use crate::text::should_translate;

/// A cell waiting for machine translation
struct MachineJob {
    row: usize,
    column: usize,
}

/// Resolves every (string, target) cell of the output table
pub struct TranslationResolver {
    translator: Arc<dyn Translator>,
    glossary: Arc<GlossaryIndex>,
    retry: RetryPolicy,
    concurrency: usize,
    progress: Option<ProgressBar>,
}

impl TranslationResolver {
    /// Create a resolver that translates sequentially without retries
    pub fn new(translator: Arc<dyn Translator>, glossary: Arc<GlossaryIndex>) -> Self {
        Self {
            translator,
            glossary,
            retry: RetryPolicy::none(),
            concurrency: 1,
            progress: None,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Maximum machine translation requests in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Report machine translation progress on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn glossary(&self) -> &GlossaryIndex {
        &self.glossary
    }

    /// Translate every string into every target.
    ///
    /// `result.column(t)[i]` always corresponds to `strings[i]`. Failures never abort the
    /// batch; the failed cell holds an error marker instead.
    pub async fn translate_all<S: AsRef<str>>(
        &self,
        strings: &[S],
        targets: &[TargetLanguage],
    ) -> TranslationResult {
        let mut cells: Vec<Vec<String>> = vec![vec![String::new(); strings.len()]; targets.len()];
        let mut stats = ResolutionStats::default();
        let mut jobs = Vec::new();

        for (row, text) in strings.iter().map(AsRef::as_ref).enumerate() {
            if !should_translate(text) {
                for column in cells.iter_mut() {
                    column[row] = text.to_string();
                    stats.record(CellSource::PassThrough);
                }
                continue;
            }

            let entry = self.glossary.lookup(text);
            for (column, lang) in targets.iter().enumerate() {
                match entry.and_then(|e| e.override_for(*lang)) {
                    Some(value) => {
                        debug!("Glossary override for '{}' ({})", text, lang);
                        cells[column][row] = value.to_string();
                        stats.record(CellSource::Glossary);
                    }
                    None => jobs.push(MachineJob { row, column }),
                }
            }
        }

        if !jobs.is_empty() {
            info!(
                "Machine translating {} cell(s) with {}",
                jobs.len(),
                self.translator.name()
            );
        }
        if let Some(progress) = &self.progress {
            progress.set_length(jobs.len() as u64);
        }

        let outcomes: Vec<(MachineJob, Result<String, String>)> = stream::iter(jobs)
            .map(|job| {
                let text = strings[job.row].as_ref();
                let lang = targets[job.column];
                async move {
                    let outcome = self
                        .retry
                        .run(|| self.translator.translate(text, SOURCE_LANGUAGE, lang.service_code()))
                        .await
                        .map_err(|e| e.to_string());
                    if let Some(progress) = &self.progress {
                        progress.inc(1);
                    }
                    (job, outcome)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for (job, outcome) in outcomes {
            match outcome {
                Ok(translated) => {
                    cells[job.column][job.row] = translated;
                    stats.record(CellSource::Machine);
                }
                Err(description) => {
                    warn!(
                        "Translation of '{}' to {} failed: {}",
                        strings[job.row].as_ref(),
                        targets[job.column],
                        description
                    );
                    cells[job.column][job.row] = error_marker(description);
                    stats.record(CellSource::Failed);
                }
            }
        }

        let columns = targets.iter().copied().zip(cells).collect();
        TranslationResult::new(columns, stats)
    }
}
