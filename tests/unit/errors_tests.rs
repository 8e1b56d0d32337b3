/*!
 * Tests for error types and their classification
 */

use polytable::errors::{AppError, ExportError, GlossaryError, OcrError, ProviderError};

/// Test that HTTP statuses map onto the matching provider error variants
#[test]
fn test_providerError_fromStatus_shouldMapKnownCodes() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "forbidden"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow down"), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(502, "bad gateway"),
        ProviderError::ApiError { status_code: 502, .. }
    ));
}

/// Only failures a retry can fix are transient
#[test]
fn test_providerError_isTransient_shouldSeparateRetryableFailures() {
    assert!(ProviderError::ConnectionError("reset".into()).is_transient());
    assert!(ProviderError::RateLimitExceeded("429".into()).is_transient());
    assert!(ProviderError::from_status(503, "unavailable").is_transient());

    assert!(!ProviderError::from_status(400, "bad request").is_transient());
    assert!(!ProviderError::AuthenticationError("nope".into()).is_transient());
    assert!(!ProviderError::ParseError("garbage".into()).is_transient());
}

/// Test display formatting of provider errors
#[test]
fn test_providerError_display_shouldIncludeDetails() {
    let err = ProviderError::ApiError {
        status_code: 500,
        message: "Internal".to_string(),
    };
    assert_eq!(err.to_string(), "API responded with error: 500 - Internal");
}

/// Test conversion of module errors into the application error
#[test]
fn test_appError_fromModuleErrors_shouldWrapWithContext() {
    let glossary: AppError = GlossaryError::MissingColumns(vec!["ZH".to_string()]).into();
    assert_eq!(glossary.to_string(), "Glossary error: Glossary missing columns: ZH");

    let ocr: AppError = OcrError::UnsupportedFormat("gif".to_string()).into();
    assert!(matches!(ocr, AppError::Ocr(_)));

    let export: AppError = ExportError::Io(std::io::Error::other("disk full")).into();
    assert!(export.to_string().contains("disk full"));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(other, AppError::Unknown(msg) if msg == "boom"));
}
