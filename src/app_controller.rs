use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{Config, TranslationProvider};
use crate::export::{to_csv_bytes, to_xlsx_bytes};
use crate::file_utils::FileManager;
use crate::glossary::{GlossaryIndex, load_glossary_file};
use crate::ocr::{TesseractExtractor, TextExtractor};
use crate::pipeline::{PipelineDriver, TranslationTable};
use crate::providers::Translator;
use crate::providers::anthropic::Anthropic;
use crate::providers::google::GoogleTranslate;
use crate::translation::{RetryPolicy, TranslationResolver};

// @module: Application controller for image translation runs

/// Outcome of a run that produced a table
#[derive(Debug)]
pub struct RunOutput {
    /// The exported table
    pub table: TranslationTable,
    /// Every file written, fixed names first, then timestamped copies
    pub written: Vec<PathBuf>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(mut config: Config) -> Result<Self> {
        config.dedup_target_languages();
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured glossary.
    ///
    /// A missing or malformed glossary is reported and replaced by an empty index,
    /// so the run continues with machine translation only.
    pub fn load_glossary(&self) -> GlossaryIndex {
        let matcher = self.config.glossary.matcher();
        let Some(path) = self.config.glossary.path.as_deref() else {
            debug!("No glossary configured");
            return GlossaryIndex::build_with_matcher(Vec::new(), matcher);
        };

        match load_glossary_file(path) {
            Ok(rows) => {
                let index = GlossaryIndex::build_with_matcher(rows, matcher);
                info!("Loaded glossary with {} entries.", index.len());
                index
            }
            Err(e) => {
                error!("Failed to load glossary '{}': {}", path, e);
                GlossaryIndex::build_with_matcher(Vec::new(), matcher)
            }
        }
    }

    // @creates: Translator for the active provider
    pub fn create_translator(&self) -> Arc<dyn Translator> {
        let translation = &self.config.translation;
        match translation.provider {
            TranslationProvider::Google => Arc::new(GoogleTranslate::new(
                translation.get_endpoint(),
                translation.get_timeout_secs(),
            )),
            TranslationProvider::Anthropic => Arc::new(
                Anthropic::new(
                    translation.get_api_key(),
                    translation.get_endpoint(),
                    translation.get_model(),
                    translation.get_timeout_secs(),
                )
                .with_prompt(
                    translation.common.system_prompt.clone(),
                    translation.common.temperature,
                ),
            ),
        }
    }

    fn create_progress_bar() -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Resolver wired with the configured retry policy and fan-out
    pub fn build_resolver(
        &self,
        translator: Arc<dyn Translator>,
        glossary: Arc<GlossaryIndex>,
        progress: Option<ProgressBar>,
    ) -> TranslationResolver {
        let common = &self.config.translation.common;
        let resolver = TranslationResolver::new(translator, glossary)
            .with_retry(RetryPolicy::new(common.retry_count, common.retry_backoff_ms))
            .with_concurrency(self.config.translation.get_concurrent_requests());

        match progress {
            Some(progress) => resolver.with_progress(progress),
            None => resolver,
        }
    }

    /// Run the whole workflow on an image file with the configured engines
    pub async fn run(&self, image_path: &Path) -> Result<Option<RunOutput>> {
        let image_bytes = FileManager::read_bytes(image_path)?;
        let extractor = TesseractExtractor::new(&self.config.ocr);
        let translator = self.create_translator();

        info!(
            "Translating {:?} with {}",
            image_path,
            self.config.translation.provider.display_name()
        );
        self.run_with(&extractor, translator, &image_bytes).await
    }

    /// Run the workflow with the given engines.
    ///
    /// Returns `None` when the image contains no text; nothing is written then.
    pub async fn run_with(
        &self,
        extractor: &dyn TextExtractor,
        translator: Arc<dyn Translator>,
        image_bytes: &[u8],
    ) -> Result<Option<RunOutput>> {
        let start_time = Instant::now();
        let targets = &self.config.target_languages;

        let lines = extractor
            .extract_lines(image_bytes)
            .await
            .context("Text extraction failed")?;
        if lines.is_empty() {
            warn!("No text detected in the image.");
            return Ok(None);
        }

        if targets.is_empty() {
            info!("No target languages selected, the table will contain EN only.");
        } else if let Err(e) = translator.test_connection().await {
            warn!("{} connection check failed: {}", translator.name(), e);
        }

        let glossary = Arc::new(self.load_glossary());
        let progress = Self::create_progress_bar();
        let driver = PipelineDriver::new(self.build_resolver(translator, glossary, Some(progress.clone())));

        let table = driver.run_lines(&lines, targets).await;
        progress.finish_and_clear();

        let stats = table.stats();
        info!(
            "Resolved {} cell(s): {} glossary, {} machine, {} pass-through, {} failed",
            stats.total(),
            stats.glossary,
            stats.machine,
            stats.pass_through,
            stats.failed
        );

        let written = self.export(&table)?;
        for path in &written {
            info!("Success: {:?}", path);
        }
        debug!("Run finished in {:.2?}", start_time.elapsed());

        Ok(Some(RunOutput { table, written }))
    }

    /// Write the CSV and XLSX exports, plus timestamped copies when enabled
    pub fn export(&self, table: &TranslationTable) -> Result<Vec<PathBuf>> {
        let csv = to_csv_bytes(table).context("Failed to build CSV export")?;
        let xlsx = to_xlsx_bytes(table).context("Failed to build XLSX export")?;
        let exports: [(&str, &[u8]); 2] = [("csv", csv.as_slice()), ("xlsx", xlsx.as_slice())];

        let export_config = &self.config.export;
        let mut written = FileManager::save_exports(&export_config.output_dir, &exports, None)?;

        if export_config.save_copy {
            let copies = FileManager::save_exports(&export_config.storage_dir, &exports, Some(Local::now()))?;
            written.extend(copies);
        }

        Ok(written)
    }
}
