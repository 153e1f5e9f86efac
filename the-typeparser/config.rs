//! Declarative parser definitions.
//!
//! A [`ParserConfig`] is the TOML form of a [`TypeParserBuilder`]:
//!
//! ```toml
//! message = "Not a valid account id"
//! code = "account.invalid"
//! accept = ["ascii-letters", "ascii-digits"]
//! accept-chars = "_"
//! whitespace = "remove"
//! case = "upper"
//! max-length = 12
//! ```

use serde::Deserialize;
use the_charset::{
  blocks,
  category,
  sets,
};
use thiserror::Error;

use crate::{
  error::BuildError,
  parser::{
    TypeParser,
    TypeParserBuilder,
  },
  policy::{
    BlankPolicy,
    CaseFolding,
    NormalizationForm,
    NullPolicy,
    WhitespacePolicy,
  },
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("invalid parser definition: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("unknown general category '{0}'")]
  UnknownCategory(String),
  #[error("unknown block '{0}'")]
  UnknownBlock(String),
  #[error(transparent)]
  Build(#[from] BuildError),
}

/// Ready-made character groups for `accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedSet {
  AsciiLetters,
  AsciiLowercase,
  AsciiUppercase,
  AsciiDigits,
  AsciiAlphanumeric,
  AsciiPrintable,
  HexDigits,
  Letters,
  Digits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ParserConfig {
  pub message:          Option<String>,
  pub code:             Option<String>,
  pub accept:           Vec<NamedSet>,
  pub accept_chars:     String,
  /// General category names, short (`Lu`) or long (`Uppercase_Letter`).
  pub categories:       Vec<String>,
  pub blocks:           Vec<String>,
  pub reject_chars:     String,
  pub whitespace:       WhitespacePolicy,
  pub canonical_dashes: bool,
  pub case:             CaseFolding,
  pub normalization:    NormalizationForm,
  pub min_length:       Option<usize>,
  pub max_length:       Option<usize>,
  pub null:             NullPolicy,
  pub blank:            BlankPolicy,
  pub regex:            Option<String>,
}

impl ParserConfig {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  /// A builder preloaded with this definition. Hooks that cannot be
  /// expressed in TOML, like validators, can still be added to it.
  pub fn builder(&self) -> Result<TypeParserBuilder, ConfigError> {
    let mut builder = TypeParserBuilder::new()
      .whitespace(self.whitespace)
      .canonical_dashes(self.canonical_dashes)
      .case(self.case)
      .normalization(self.normalization)
      .null(self.null)
      .blank(self.blank)
      .accept_chars(&self.accept_chars)
      .reject_chars(&self.reject_chars);

    builder = match (&self.code, &self.message) {
      (Some(code), Some(text)) => builder.message_code(code.clone(), text.clone()),
      (Some(code), None) => builder.message_code(code.clone(), "Invalid value"),
      (None, Some(text)) => builder.message(text.clone()),
      (None, None) => builder,
    };

    for set in &self.accept {
      builder = match set {
        NamedSet::AsciiLetters => builder.accept_ascii_letters(),
        NamedSet::AsciiLowercase => builder.accept_subset(&sets::ASCII_LOWERCASE),
        NamedSet::AsciiUppercase => builder.accept_subset(&sets::ASCII_UPPERCASE),
        NamedSet::AsciiDigits => builder.accept_ascii_digits(),
        NamedSet::AsciiAlphanumeric => builder.accept_ascii_alphanumeric(),
        NamedSet::AsciiPrintable => builder.accept_subset(&sets::ASCII_PRINTABLE),
        NamedSet::HexDigits => builder.accept_subset(&sets::HEX_DIGITS),
        NamedSet::Letters => builder.accept_letters(),
        NamedSet::Digits => builder.accept_digits(),
      };
    }

    for name in &self.categories {
      let category =
        category::lookup(name).ok_or_else(|| ConfigError::UnknownCategory(name.clone()))?;
      builder = builder.accept_category(category);
    }

    for name in &self.blocks {
      let block = blocks::block(name).ok_or_else(|| ConfigError::UnknownBlock(name.clone()))?;
      builder = builder.accept_subset(block);
    }

    if let Some(min) = self.min_length {
      builder = builder.min_length(min);
    }
    if let Some(max) = self.max_length {
      builder = builder.max_length(max);
    }
    if let Some(regex) = &self.regex {
      builder = builder.regex(regex.as_str());
    }
    Ok(builder)
  }

  pub fn build(&self) -> Result<TypeParser, ConfigError> {
    Ok(self.builder()?.build()?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::message::ParserMessage;

  const ACCOUNT: &str = r#"
    message = "Not a valid account id"
    code = "account.invalid"
    accept = ["ascii-letters", "ascii-digits"]
    accept-chars = "_"
    categories = ["Lu"]
    whitespace = "remove"
    canonical-dashes = true
    case = "upper"
    normalization = "nfkc"
    min-length = 4
    max-length = 12
    null = "reject"
    blank = "to-null"
    regex = "[A-Z].*"
  "#;

  #[test]
  fn full_definition() {
    let config = ParserConfig::from_toml(ACCOUNT).unwrap();
    assert_eq!(config.case, CaseFolding::Upper);
    assert_eq!(config.blank, BlankPolicy::ToNull);

    let parser = config.build().unwrap();
    assert_eq!(parser.parse(" ab_12 ").unwrap(), "AB_12");
    // Fullwidth letters fold to ASCII under NFKC.
    assert_eq!(parser.parse("ＡＢＣＤ").unwrap(), "ABCD");

    let err = parser.parse("1abc").unwrap_err();
    assert_eq!(err.reason(), &ParserMessage::RegexMismatch);
    assert_eq!(err.public_message().code(), Some("account.invalid"));
    assert_eq!(err.public_message().text(), "Not a valid account id");

    assert_eq!(
      parser.parse_optional(None).unwrap_err().reason(),
      &ParserMessage::Required
    );
    assert_eq!(parser.parse_optional(Some("  ")).unwrap(), None);
  }

  #[test]
  fn defaults() {
    let config = ParserConfig::from_toml(r#"accept = ["digits"]"#).unwrap();
    assert_eq!(config.whitespace, WhitespacePolicy::Preserve);
    assert_eq!(config.case, CaseFolding::Keep);
    assert_eq!(config.normalization, NormalizationForm::Off);
    let parser = config.build().unwrap();
    assert_eq!(parser.parse("٤٢").unwrap(), "٤٢");
  }

  #[test]
  fn blocks_and_rejections() {
    let config = ParserConfig::from_toml(
      r#"
        blocks = ["Greek and Coptic"]
        reject-chars = "ω"
      "#,
    )
    .unwrap();
    let parser = config.build().unwrap();
    assert_eq!(parser.parse("αβγ").unwrap(), "αβγ");
    assert!(parser.parse("ω").is_err());
  }

  #[test]
  fn category_names_ignore_case() {
    let parser = ParserConfig::from_toml(r#"categories = ["lu", "decimal number"]"#)
      .unwrap()
      .build()
      .unwrap();
    assert_eq!(parser.parse("AB12").unwrap(), "AB12");
    assert!(parser.parse("ab").is_err());
  }

  #[test]
  fn invalid_definitions() {
    assert!(matches!(
      ParserConfig::from_toml("colour = \"red\""),
      Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
      ParserConfig::from_toml("whitespace = \"squash\""),
      Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
      ParserConfig::from_toml(r#"categories = ["Qq"]"#)
        .unwrap()
        .builder(),
      Err(ConfigError::UnknownCategory(name)) if name == "Qq"
    ));
    assert!(matches!(
      ParserConfig::from_toml(r#"blocks = ["Klingon"]"#)
        .unwrap()
        .builder(),
      Err(ConfigError::UnknownBlock(_))
    ));
    assert!(matches!(
      ParserConfig::from_toml("").unwrap().build(),
      Err(ConfigError::Build(BuildError::NothingAccepted))
    ));
  }
}
