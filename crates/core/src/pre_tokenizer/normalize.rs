//! Unicode normalization for pre-tokenization.
//!
//! Normalization is off by default so that words are split into exactly the
//! codepoints of the input.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizationForm {
    /// Canonical composition
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    NFKC,
    /// Compatibility decomposition
    NFKD,
    /// No normalization
    #[default]
    None,
}

impl FromStr for NormalizationForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfc" => Ok(Self::NFC),
            "nfd" => Ok(Self::NFD),
            "nfkc" => Ok(Self::NFKC),
            "nfkd" => Ok(Self::NFKD),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "unknown normalization form {s:?} (expected nfc, nfd, nfkc, nfkd or none)"
            )),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NFC => "nfc",
            Self::NFD => "nfd",
            Self::NFKC => "nfkc",
            Self::NFKD => "nfkd",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Unicode normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Create an NFC normalizer.
    pub fn nfc() -> Self {
        Self::new(NormalizationForm::NFC)
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Normalize text, borrowing when no normalization is configured.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.form {
            NormalizationForm::NFC => Cow::Owned(text.nfc().collect()),
            NormalizationForm::NFD => Cow::Owned(text.nfd().collect()),
            NormalizationForm::NFKC => Cow::Owned(text.nfkc().collect()),
            NormalizationForm::NFKD => Cow::Owned(text.nfkd().collect()),
            NormalizationForm::None => Cow::Borrowed(text),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_normalization() {
        let normalizer = Normalizer::nfc();
        let text = "e\u{0301}"; // e + combining acute accent
        assert_eq!(normalizer.normalize(text), "\u{00e9}");
    }

    #[test]
    fn test_nfd_normalization() {
        let normalizer = Normalizer::new(NormalizationForm::NFD);
        assert_eq!(normalizer.normalize("\u{00e9}"), "e\u{0301}");
    }

    #[test]
    fn test_default_borrows_input() {
        let normalizer = Normalizer::default();
        assert!(!normalizer.is_enabled());
        assert!(matches!(normalizer.normalize("Hello"), Cow::Borrowed("Hello")));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("NFKC".parse::<NormalizationForm>(), Ok(NormalizationForm::NFKC));
        assert_eq!("none".parse::<NormalizationForm>(), Ok(NormalizationForm::None));
        assert!("nfx".parse::<NormalizationForm>().is_err());
        assert_eq!(NormalizationForm::NFD.to_string(), "nfd");
    }
}
