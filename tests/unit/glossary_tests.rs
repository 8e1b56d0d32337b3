/*!
 * Tests for glossary loading and lookup
 */

use anyhow::Result;
use polytable::app_config::GlossaryConfig;
use polytable::errors::GlossaryError;
use polytable::glossary::{FuzzyMatcher, FuzzyScorer, GlossaryIndex, load_glossary_file, read_glossary};
use polytable::language_utils::TargetLanguage;
use crate::common;

/// Test loading a glossary file from disk and looking up an override
#[test]
fn test_loadGlossaryFile_withValidFile_shouldResolveOverrides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_glossary(
        temp_dir.path(),
        "glossary.csv",
        &["Apply,Terapkan,適用,적용,Mohon,สมัคร,Áp dụng,应用", "Check-in,,チェックイン,,,,,"],
    )?;

    let index = GlossaryIndex::build(load_glossary_file(&path)?);

    assert_eq!(index.len(), 2);
    let entry = index.lookup("APPLY").expect("exact match");
    assert_eq!(entry.override_for(TargetLanguage::Vietnamese), Some("Áp dụng"));
    assert_eq!(entry.override_for(TargetLanguage::Chinese), Some("应用"));

    let check_in = index.lookup("Check in").expect("fuzzy match");
    assert_eq!(check_in.override_for(TargetLanguage::Japanese), Some("チェックイン"));
    assert_eq!(check_in.override_for(TargetLanguage::Indonesian), None);
    Ok(())
}

/// Test that a missing header column rejects the whole file and names every gap
#[test]
fn test_readGlossary_withMissingColumns_shouldNameAllOfThem() {
    let data = "EN,ID,JA,KO,MS\nApply,Terapkan,,,\n";

    let err = read_glossary(data.as_bytes()).unwrap_err();

    assert!(matches!(&err, GlossaryError::MissingColumns(cols) if cols.len() == 3));
    assert_eq!(err.to_string(), "Glossary missing columns: TH, VI, ZH");
}

/// Header names are case-sensitive
#[test]
fn test_readGlossary_withLowercaseHeader_shouldReject() {
    let data = "en,id,ja,ko,ms,th,vi,zh\nApply,,,,,,,\n";
    assert!(matches!(read_glossary(data.as_bytes()), Err(GlossaryError::MissingColumns(cols)) if cols.len() == 8));
}

/// A BOM and reordered or extra columns are tolerated
#[test]
fn test_readGlossary_withBomAndExtraColumns_shouldLoad() -> Result<()> {
    let data = "\u{feff}Notes,ZH,VI,TH,MS,KO,JA,ID,EN\nfooter,付款,,,,,,Bayar,Pay\n";

    let rows = read_glossary(data.as_bytes())?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].english, "Pay");
    assert_eq!(rows[0].override_for(TargetLanguage::Indonesian), Some("Bayar"));
    assert_eq!(rows[0].override_for(TargetLanguage::Chinese), Some("付款"));
    Ok(())
}

/// Test that a missing file surfaces as an I/O error
#[test]
fn test_loadGlossaryFile_withMissingFile_shouldReturnIoError() {
    let result = load_glossary_file("definitely/not/here.csv");
    assert!(matches!(result, Err(GlossaryError::Io(_))));
}

/// The configured threshold decides whether a typo still matches
#[test]
fn test_lookup_withConfiguredThreshold_shouldFollowConfig() -> Result<()> {
    let rows = read_glossary("EN,ID,JA,KO,MS,TH,VI,ZH\nApply,Terapkan,,,,,,\n".as_bytes())?;

    let strict = GlossaryIndex::build_with_matcher(rows.clone(), GlossaryConfig::default().matcher());
    assert!(strict.lookup("Aply").is_none());

    let config = GlossaryConfig {
        fuzzy_threshold: 85.0,
        ..GlossaryConfig::default()
    };
    let lenient = GlossaryIndex::build_with_matcher(rows, config.matcher());
    assert_eq!(
        lenient.lookup("Aply").and_then(|e| e.override_for(TargetLanguage::Indonesian)),
        Some("Terapkan")
    );
    Ok(())
}

/// The length gate skips candidates of very different length
#[test]
fn test_lookup_withLengthGate_shouldSkipDisproportionateKeys() -> Result<()> {
    let rows = read_glossary("EN,ID,JA,KO,MS,TH,VI,ZH\nBreakfast included,Termasuk sarapan,,,,,,\n".as_bytes())?;

    let open = GlossaryIndex::build_with_matcher(rows.clone(), FuzzyMatcher::new(FuzzyScorer::Ratio, 60.0));
    assert!(open.lookup("Breakfast").is_some());

    let gated = GlossaryIndex::build_with_matcher(
        rows,
        FuzzyMatcher::new(FuzzyScorer::Ratio, 60.0).with_min_length_ratio(0.6),
    );
    assert!(gated.lookup("Breakfast").is_none());
    Ok(())
}
