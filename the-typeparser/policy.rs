//! Knobs that steer the text pipeline.

use std::borrow::Cow;

use serde::Deserialize;
use smallvec::{
  SmallVec,
  smallvec,
};
use unicode_normalization::{
  UnicodeNormalization,
  is_nfc,
  is_nfd,
  is_nfkc,
  is_nfkd,
};

/// What to do when there is no input at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullPolicy {
  /// Return no value.
  #[default]
  Preserve,
  /// Treat as the empty string and keep going.
  ToEmpty,
  /// Fail with [`ParserMessage::Required`](crate::ParserMessage::Required).
  Reject,
}

/// What to do with input that is empty or only whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankPolicy {
  /// Run the rest of the pipeline as usual.
  #[default]
  Preserve,
  ToNull,
  Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitespacePolicy {
  /// Whitespace is subject to the accepted set like any other character.
  #[default]
  Preserve,
  /// Trim both ends and collapse inner runs into a single U+0020.
  Normalize,
  /// Drop all whitespace.
  Remove,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseFolding {
  #[default]
  #[serde(rename = "none")]
  Keep,
  Upper,
  Lower,
}

impl CaseFolding {
  pub(crate) fn fold(self, ch: char) -> SmallVec<[char; 3]> {
    match self {
      CaseFolding::Keep => smallvec![ch],
      CaseFolding::Upper => ch.to_uppercase().collect(),
      CaseFolding::Lower => ch.to_lowercase().collect(),
    }
  }
}

/// Unicode normalization applied before any per-character work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationForm {
  #[default]
  #[serde(rename = "none")]
  Off,
  Nfc,
  Nfd,
  Nfkc,
  Nfkd,
}

impl NormalizationForm {
  pub(crate) fn apply(self, text: &str) -> Cow<'_, str> {
    match self {
      NormalizationForm::Off => Cow::Borrowed(text),
      NormalizationForm::Nfc if is_nfc(text) => Cow::Borrowed(text),
      NormalizationForm::Nfd if is_nfd(text) => Cow::Borrowed(text),
      NormalizationForm::Nfkc if is_nfkc(text) => Cow::Borrowed(text),
      NormalizationForm::Nfkd if is_nfkd(text) => Cow::Borrowed(text),
      NormalizationForm::Nfc => Cow::Owned(text.nfc().collect()),
      NormalizationForm::Nfd => Cow::Owned(text.nfd().collect()),
      NormalizationForm::Nfkc => Cow::Owned(text.nfkc().collect()),
      NormalizationForm::Nfkd => Cow::Owned(text.nfkd().collect()),
    }
  }
}
