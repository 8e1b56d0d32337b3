/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use polytable::app_config::{Config, LogLevel, TranslationProvider};
use polytable::glossary::FuzzyScorer;
use polytable::language_utils::TargetLanguage;
use std::fs;
use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.get_concurrent_requests(), 4);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.translation.common.retry_backoff_ms, 1000);
    assert_eq!(config.glossary.scorer, FuzzyScorer::Ratio);
    assert_eq!(config.glossary.min_length_ratio, 0.0);
    assert_eq!(config.export.output_dir, ".");
    assert!(!config.export.save_copy);
    assert_eq!(config.log_level, LogLevel::Info);

    let anthropic = config
        .translation
        .get_provider_config(&TranslationProvider::Anthropic)
        .expect("Anthropic provider config should exist");
    assert_eq!(anthropic.timeout_secs, 60);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.glossary.min_length_ratio = 1.5;
    assert!(config.validate().is_err());
    config.glossary.min_length_ratio = 0.5;
    assert!(config.validate().is_ok());

    config.translation.active_provider_config_mut().concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.active_provider_config_mut().concurrent_requests = 1;

    config.glossary.fuzzy_threshold = -1.0;
    assert!(config.validate().is_err());
}

/// Test saving a config to disk and loading it back
#[test]
fn test_config_fileRoundTrip_shouldPreserveSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_languages = vec![TargetLanguage::Thai, TargetLanguage::Malay];
    config.glossary.path = Some("glossary.csv".to_string());
    config.glossary.scorer = FuzzyScorer::Levenshtein;
    config.log_level = LogLevel::Debug;
    fs::write(&path, serde_json::to_string_pretty(&config)?)?;

    let loaded: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;

    assert_eq!(loaded.target_languages, config.target_languages);
    assert_eq!(loaded.glossary.path.as_deref(), Some("glossary.csv"));
    assert_eq!(loaded.glossary.scorer, FuzzyScorer::Levenshtein);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Serialized configs use the short display codes and lowercase identifiers
#[test]
fn test_config_serialization_shouldUseCodesAndLowercaseNames() -> Result<()> {
    let mut config = Config::default();
    config.target_languages = vec![TargetLanguage::Vietnamese];

    let json = serde_json::to_value(&config)?;

    assert_eq!(json["target_languages"][0], "VI");
    assert_eq!(json["translation"]["provider"], "google");
    assert_eq!(json["glossary"]["scorer"], "ratio");
    assert_eq!(json["translation"]["available_providers"][1]["type"], "anthropic");
    Ok(())
}

/// Test parsing provider names
#[test]
fn test_translationProvider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("Google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("ANTHROPIC".parse::<TranslationProvider>().unwrap(), TranslationProvider::Anthropic);
    assert!("deepl".parse::<TranslationProvider>().is_err());
}

/// Provider getters fall back to defaults when no entry is configured
#[test]
fn test_translationConfig_withoutProviderEntries_shouldUseDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Anthropic;

    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.translation.get_api_key(), "");
    assert_eq!(config.translation.get_concurrent_requests(), 4);
}

/// Test mapping log levels onto log filters
#[test]
fn test_logLevel_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
