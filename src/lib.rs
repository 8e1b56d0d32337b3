/*!
 * # polytable - image to multilingual translation table
 *
 * A Rust library that turns the text of a UI screenshot into an aligned translation
 * table for Indonesian, Japanese, Korean, Malay, Thai, Vietnamese and Chinese.
 *
 * ## Features
 *
 * - OCR of PNG/JPEG images through the tesseract engine
 * - OCR clean-up: typographic corrections, trimming and order-preserving dedup
 * - Glossary overrides loaded from CSV, matched exactly or fuzzily
 * - Machine translation through Google Translate or Anthropic, with bounded
 *   concurrency and retries for transient failures
 * - CSV (UTF-8 with BOM) and XLSX export
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `text`: Normalization, noise filtering and OCR corrections
 * - `glossary`: Glossary loading and exact/fuzzy lookup
 * - `translation`: Per-cell resolution between glossary and machine translation
 * - `providers`: Machine translation clients:
 *   - `providers::google`: Google Translate client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Deterministic test double
 * - `ocr`: Text extraction from images
 * - `pipeline`: Clean-up, dedup and table assembly
 * - `export`: CSV and XLSX writers
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported target languages and their codes
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod glossary;
pub mod language_utils;
pub mod ocr;
pub mod pipeline;
pub mod providers;
pub mod text;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutput};
pub use errors::{AppError, ExportError, GlossaryError, OcrError, ProviderError};
pub use glossary::{GlossaryEntry, GlossaryIndex};
pub use language_utils::TargetLanguage;
pub use pipeline::{PipelineDriver, TranslationTable};
pub use translation::{TranslationResolver, TranslationResult};
