/*!
 * Error types for the polytable application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a machine translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) | Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }

    /// Map a non-success HTTP status onto the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else if let Some(status) = error.status() {
            Self::from_status(status.as_u16(), error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while loading a glossary file.
///
/// Any of these aborts glossary loading only; translation continues without overrides.
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// The header row lacks one or more required columns
    #[error("Glossary missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The file could not be parsed as CSV
    #[error("Failed to read glossary: {0}")]
    Csv(#[from] csv::Error),

    /// The file could not be opened
    #[error("Failed to open glossary: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from image decoding and text extraction
#[derive(Error, Debug)]
pub enum OcrError {
    /// Input bytes are not a PNG or JPEG image
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Image bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The OCR engine could not be run or reported a failure
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// Temporary file handling failed
    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from writing the exported table
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook packaging failed
    #[error("XLSX export failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing the output failed
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from glossary loading
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from text extraction
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Error from export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
