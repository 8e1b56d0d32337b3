/*!
 * Text extraction from images.
 *
 * The pipeline only needs the recognized lines in reading order, so engines
 * are hidden behind the `TextExtractor` trait.
 */

use async_trait::async_trait;

use crate::errors::OcrError;

pub mod tesseract;

pub use tesseract::TesseractExtractor;

/// An OCR engine returning raw text lines in reading order
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Recognize the text lines of a PNG or JPEG image
    async fn extract_lines(&self, image_bytes: &[u8]) -> Result<Vec<String>, OcrError>;
}
