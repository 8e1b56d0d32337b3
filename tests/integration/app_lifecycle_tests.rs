/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use polytable::app_config::Config;
use polytable::app_controller::Controller;
use polytable::language_utils::TargetLanguage;
use polytable::providers::mock::MockTranslator;
use crate::common::{self, BrokenExtractor, StaticExtractor};

fn test_config(output_dir: &std::path::Path) -> Config {
    common::init_test_logging();
    let mut config = Config::default();
    config.export.output_dir = output_dir.join("out").to_string_lossy().to_string();
    config.export.storage_dir = output_dir.join("storage").to_string_lossy().to_string();
    config.translation.common.retry_backoff_ms = 1;
    config
}

/// Test a full run: glossary, translation and both exports on disk
#[tokio::test]
async fn test_runWith_withGlossaryAndTargets_shouldWriteBothExports() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let glossary_path = common::create_test_glossary(
        temp_dir.path(),
        "glossary.csv",
        &["Book now,Pesan sekarang,今すぐ予約,,,,,立即预订"],
    )?;

    let mut config = test_config(temp_dir.path());
    config.target_languages = vec![TargetLanguage::Indonesian, TargetLanguage::Thai];
    config.glossary.path = Some(glossary_path.to_string_lossy().to_string());
    let controller = Controller::with_config(config)?;

    let translator = MockTranslator::working();
    let extractor = StaticExtractor::new(&["Book now", "Pay at hotel", "Book now"]);
    let output = controller
        .run_with(&extractor, Arc::new(translator.clone()), b"png")
        .await?
        .expect("table expected");

    assert_eq!(output.table.rows().len(), 2);
    assert_eq!(output.table.column("ID").unwrap(), vec!["Pesan sekarang", "[id] Pay at hotel"]);
    assert_eq!(output.written.len(), 2);

    let csv = fs::read(temp_dir.path().join("out").join("translations.csv"))?;
    let csv_text = String::from_utf8(csv[3..].to_vec())?;
    assert_eq!(
        csv_text,
        "EN,ID,TH\nBook now,Pesan sekarang,[th] Book now\nPay at hotel,[id] Pay at hotel,[th] Pay at hotel\n"
    );
    assert!(temp_dir.path().join("out").join("translations.xlsx").is_file());
    assert!(!temp_dir.path().join("storage").exists());
    Ok(())
}

/// Test that repeated target languages from the config produce one column each
#[tokio::test]
async fn test_runWith_withRepeatedTargets_shouldProduceSingleColumn() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = test_config(temp_dir.path());
    config.target_languages = serde_json::from_str(r#"["ID","ID"]"#)?;
    let controller = Controller::with_config(config)?;
    assert_eq!(controller.config().target_languages, vec![TargetLanguage::Indonesian]);

    let translator = MockTranslator::working();
    let output = controller
        .run_with(&StaticExtractor::new(&["Apply"]), Arc::new(translator.clone()), b"png")
        .await?
        .expect("table expected");

    assert_eq!(output.table.headers(), &["EN", "ID"]);
    assert_eq!(output.table.rows(), &[vec!["Apply".to_string(), "[id] Apply".to_string()]]);
    Ok(())
}

/// Test that save_copy also writes timestamped copies
#[tokio::test]
async fn test_runWith_withSaveCopy_shouldWriteTimestampedCopies() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = test_config(temp_dir.path());
    config.export.save_copy = true;
    let controller = Controller::with_config(config)?;

    let output = controller
        .run_with(&StaticExtractor::new(&["Welcome"]), Arc::new(MockTranslator::working()), b"png")
        .await?
        .expect("table expected");

    assert_eq!(output.written.len(), 4);
    let copies: Vec<String> = fs::read_dir(temp_dir.path().join("storage"))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<Result<_, _>>()?;
    assert_eq!(copies.len(), 2);
    for name in copies {
        assert!(name.starts_with("translations_"), "{}", name);
        assert!(name.ends_with(".csv") || name.ends_with(".xlsx"), "{}", name);
        // translations_YYYYMMDD-HHMMSS.ext
        assert_eq!(name.split('.').next().map(str::len), Some("translations_".len() + 15));
    }
    Ok(())
}

/// Test that an image without text produces no output
#[tokio::test]
async fn test_runWith_withNoText_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(test_config(temp_dir.path()))?;
    let translator = MockTranslator::working();

    let output = controller
        .run_with(&StaticExtractor::new(&[]), Arc::new(translator.clone()), b"png")
        .await?;

    assert!(output.is_none());
    assert!(!temp_dir.path().join("out").exists());
    assert_eq!(translator.request_count(), 0);
    Ok(())
}

/// Test that a malformed glossary is reported but does not stop the run
#[tokio::test]
async fn test_runWith_withMalformedGlossary_shouldFallBackToMachineTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let bad_glossary = common::create_test_file(temp_dir.path(), "bad.csv", "EN,ID\nApply,Terapkan\n")?;

    let mut config = test_config(temp_dir.path());
    config.target_languages = vec![TargetLanguage::Indonesian];
    config.glossary.path = Some(bad_glossary.to_string_lossy().to_string());
    let controller = Controller::with_config(config)?;

    let output = controller
        .run_with(&StaticExtractor::new(&["Apply"]), Arc::new(MockTranslator::working()), b"png")
        .await?
        .expect("table expected");

    assert_eq!(output.table.column("ID").unwrap(), vec!["[id] Apply"]);
    Ok(())
}

/// Test that no targets gives an EN-only table
#[tokio::test]
async fn test_runWith_withoutTargets_shouldExportEnglishOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(test_config(temp_dir.path()))?;

    let output = controller
        .run_with(&StaticExtractor::new(&["Deluxe room", "2"]), Arc::new(MockTranslator::working()), b"png")
        .await?
        .expect("table expected");

    assert_eq!(output.table.headers(), &["EN"]);
    assert_eq!(output.table.rows().len(), 2);
    Ok(())
}

/// Test that OCR failures abort the run without output
#[tokio::test]
async fn test_runWith_withOcrFailure_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(test_config(temp_dir.path()))?;

    let result = controller
        .run_with(&BrokenExtractor, Arc::new(MockTranslator::working()), b"png")
        .await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("out").exists());
    Ok(())
}

/// Test that running on a missing image file fails before any work
#[tokio::test]
async fn test_run_withMissingImage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(test_config(temp_dir.path()))?;

    assert!(controller.run(&temp_dir.path().join("missing.png")).await.is_err());
    Ok(())
}
