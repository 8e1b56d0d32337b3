use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language utilities for the supported target languages
///
/// The table only ever carries a fixed set of display codes. Each display code maps
/// to the code understood by the translation backend, and to an ISO 639-1 code
/// used for human-readable names.

/// Target language shown as a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    #[serde(rename = "ID")]
    Indonesian,
    #[serde(rename = "JA")]
    Japanese,
    #[serde(rename = "KO")]
    Korean,
    #[serde(rename = "MS")]
    Malay,
    #[serde(rename = "TH")]
    Thai,
    #[serde(rename = "VI")]
    Vietnamese,
    #[serde(rename = "ZH")]
    Chinese,
}

/// Source language of every extracted string
pub const SOURCE_LANGUAGE: &str = "en";

/// Header of the source column
pub const SOURCE_COLUMN: &str = "EN";

impl TargetLanguage {
    /// All supported targets, in glossary column order
    pub const ALL: [TargetLanguage; 7] = [
        Self::Indonesian,
        Self::Japanese,
        Self::Korean,
        Self::Malay,
        Self::Thai,
        Self::Vietnamese,
        Self::Chinese,
    ];

    /// Column header / display code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Indonesian => "ID",
            Self::Japanese => "JA",
            Self::Korean => "KO",
            Self::Malay => "MS",
            Self::Thai => "TH",
            Self::Vietnamese => "VI",
            Self::Chinese => "ZH",
        }
    }

    /// Code passed to the translation backend
    pub fn service_code(&self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Malay => "ms",
            Self::Thai => "th",
            Self::Vietnamese => "vi",
            // Simplified Chinese
            Self::Chinese => "zh-CN",
        }
    }

    /// English name of the language
    pub fn name(&self) -> String {
        language_name(self.service_code())
    }
}

/// English name for a backend language code such as `en` or `zh-CN`
///
/// Only the primary subtag is looked up. Unknown codes are returned unchanged.
pub fn language_name(code: &str) -> String {
    let primary = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();
    Language::from_639_1(&primary)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "Invalid target language: {} (expected one of {})",
                    s,
                    Self::ALL.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
                )
            })
    }
}

/// Parse a comma separated list of display codes, keeping order and dropping repeats
pub fn parse_target_list(list: &str) -> Result<Vec<TargetLanguage>> {
    let mut targets = Vec::new();
    for part in list.split(',').filter(|p| !p.trim().is_empty()) {
        let lang: TargetLanguage = part.parse()?;
        if !targets.contains(&lang) {
            targets.push(lang);
        }
    }
    Ok(targets)
}
