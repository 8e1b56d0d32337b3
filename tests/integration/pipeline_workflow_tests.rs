/*!
 * End-to-end tests from OCR lines to the aligned translation table
 */

use anyhow::Result;
use std::sync::Arc;

use polytable::glossary::{GlossaryIndex, read_glossary};
use polytable::language_utils::TargetLanguage;
use polytable::pipeline::PipelineDriver;
use polytable::providers::mock::{MockCall, MockTranslator};
use polytable::translation::{RetryPolicy, TranslationResolver};
use crate::common::{self, BrokenExtractor, StaticExtractor};

fn glossary() -> Result<GlossaryIndex> {
    let data = format!(
        "{}\nApply,Terapkan,,,,,,\nCheck-in,Check-in,チェックイン,체크인,Daftar masuk,เช็คอิน,Nhận phòng,入住\n",
        common::GLOSSARY_HEADER
    );
    Ok(GlossaryIndex::build(read_glossary(data.as_bytes())?))
}

fn driver(translator: &MockTranslator, glossary: GlossaryIndex) -> PipelineDriver {
    common::init_test_logging();
    PipelineDriver::new(
        TranslationResolver::new(Arc::new(translator.clone()), Arc::new(glossary))
            .with_retry(RetryPolicy::new(2, 1))
            .with_concurrency(4),
    )
}

/// Glossary overrides win, everything else is machine translated, noise passes through
#[tokio::test]
async fn test_runImage_withGlossaryAndNoise_shouldMixSources() -> Result<()> {
    let translator = MockTranslator::working();
    let extractor = StaticExtractor::new(&["Apply", "check in", "42", "Cancel booking", "Apply"]);

    let table = driver(&translator, glossary()?)
        .run_image(&extractor, b"ignored", &[TargetLanguage::Indonesian, TargetLanguage::Korean])
        .await?;

    assert_eq!(table.headers(), &["EN", "ID", "KO"]);
    assert_eq!(table.column("EN").unwrap(), vec!["Apply", "check in", "42", "Cancel booking"]);
    assert_eq!(table.column("ID").unwrap(), vec!["Terapkan", "Check-in", "42", "[id] Cancel booking"]);
    assert_eq!(table.column("KO").unwrap(), vec!["[ko] Apply", "체크인", "42", "[ko] Cancel booking"]);

    let stats = table.stats();
    assert_eq!(stats.glossary, 3);
    assert_eq!(stats.machine, 3);
    assert_eq!(stats.pass_through, 2);
    assert_eq!(translator.request_count(), 3);
    Ok(())
}

/// Transient backend failures are retried before giving up on a cell
#[tokio::test]
async fn test_runLines_withFlakyBackend_shouldRecoverThroughRetries() {
    let translator = MockTranslator::flaky(2);

    let table = driver(&translator, GlossaryIndex::default())
        .run_lines(&["Pay at hotel"], &[TargetLanguage::Thai])
        .await;

    assert_eq!(table.column("TH").unwrap(), vec!["[th] Pay at hotel"]);
    assert_eq!(translator.request_count(), 3);
}

/// Non-transient failures produce markers without aborting the batch
#[tokio::test]
async fn test_runLines_withUnauthorizedBackend_shouldMarkEveryMachineCell() -> Result<()> {
    let translator = MockTranslator::unauthorized();

    let table = driver(&translator, glossary()?)
        .run_lines(&["Apply", "Free cancellation"], &[TargetLanguage::Indonesian, TargetLanguage::Malay])
        .await;

    assert_eq!(table.rows()[0][1], "Terapkan");
    for cell in [&table.rows()[0][2], &table.rows()[1][1], &table.rows()[1][2]] {
        assert!(cell.starts_with("[Translation error: Authentication error"), "{}", cell);
    }
    assert_eq!(table.stats().failed, 3);
    assert_eq!(translator.request_count(), 3);
    Ok(())
}

/// Every column stays aligned with the EN column under concurrency
#[tokio::test]
async fn test_runLines_withManyStrings_shouldKeepColumnsAligned() {
    let translator = MockTranslator::working()
        .with_custom_response(|call: &MockCall| format!("{}:{}", call.target_language, call.text.len()));
    let lines: Vec<String> = (0..40).map(|i| format!("Room type {}", "x".repeat(i))).collect();

    let table = driver(&translator, GlossaryIndex::default())
        .run_lines(&lines, &TargetLanguage::ALL)
        .await;

    assert_eq!(table.headers().len(), 8);
    for row in table.rows() {
        let len = row[0].len();
        for (cell, lang) in row[1..].iter().zip(TargetLanguage::ALL) {
            assert_eq!(cell, &format!("{}:{}", lang.service_code(), len));
        }
    }
}

/// OCR failures abort the run
#[tokio::test]
async fn test_runImage_withBrokenExtractor_shouldFail() {
    let translator = MockTranslator::working();

    let result = driver(&translator, GlossaryIndex::default())
        .run_image(&BrokenExtractor, b"ignored", &[TargetLanguage::Japanese])
        .await;

    assert!(result.is_err());
    assert_eq!(translator.request_count(), 0);
}
