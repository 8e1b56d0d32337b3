use async_trait::async_trait;
use image::ImageFormat;
use log::debug;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::process::Command;

use super::TextExtractor;
use crate::app_config::OcrConfig;
use crate::errors::OcrError;

/// OCR through the `tesseract` command line tool
#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    command: String,
    languages: String,
    psm: u32,
}

impl TesseractExtractor {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            languages: config.languages.clone(),
            psm: config.psm,
        }
    }

    async fn run(&self, path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("--psm")
            .arg(self.psm.to_string())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| OcrError::Engine(format!("failed to run {} (is it installed?): {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(format!("{} failed: {}", self.command, stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Check that `image_bytes` is a PNG or JPEG image
pub fn check_image_format(image_bytes: &[u8]) -> Result<ImageFormat, OcrError> {
    let format = image::guess_format(image_bytes)
        .map_err(|_| OcrError::UnsupportedFormat("unrecognized image data".to_string()))?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg => Ok(format),
        other => Err(OcrError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Non-blank lines of engine output, in order
pub fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode the image and re-encode it as a temporary PNG for the engine
fn write_engine_input(image_bytes: &[u8]) -> Result<NamedTempFile, OcrError> {
    let format = check_image_format(image_bytes)?;
    let image = image::load_from_memory_with_format(image_bytes, format)?.to_rgb8();
    debug!("Decoded {:?} image {}x{}", format, image.width(), image.height());

    let tmp = tempfile::Builder::new().suffix(".png").tempfile()?;
    image
        .save_with_format(tmp.path(), ImageFormat::Png)
        .map_err(|e| OcrError::Engine(format!("failed to write temp image: {}", e)))?;
    Ok(tmp)
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_lines(&self, image_bytes: &[u8]) -> Result<Vec<String>, OcrError> {
        let bytes = image_bytes.to_vec();
        let tmp = tokio::task::spawn_blocking(move || write_engine_input(&bytes))
            .await
            .map_err(|e| OcrError::Engine(format!("image preparation task failed: {}", e)))??;

        let text = self.run(tmp.path()).await?;
        Ok(split_lines(&text))
    }
}
