//! Errors raised while configuring and running parsers.

use std::{
  borrow::Cow,
  fmt,
};

use num_bigint::BigInt;
use the_charset::base::BaseError;
use thiserror::Error;

use crate::message::{
  MessageSource,
  ParserMessage,
};

pub type Result<T> = std::result::Result<T, ParseError>;

/// The caller-facing half of a rejection, e.g. "Invalid account number".
///
/// This is set once per parser and shown to end users; the technical
/// [`ParserMessage`] explains which rule failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicMessage {
  code: Option<Cow<'static, str>>,
  text: Cow<'static, str>,
}

impl PublicMessage {
  pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
    Self {
      code: None,
      text: text.into(),
    }
  }

  pub fn with_code(code: impl Into<Cow<'static, str>>, text: impl Into<Cow<'static, str>>) -> Self {
    Self {
      code: Some(code.into()),
      text: text.into(),
    }
  }

  pub fn code(&self) -> Option<&str> {
    self.code.as_deref()
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}

impl Default for PublicMessage {
  fn default() -> Self {
    Self::new("Invalid value")
  }
}

impl fmt::Display for PublicMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}

/// A rejected value.
///
/// The offending input is kept for the caller but never appears in
/// `Display` or `Debug` output, so errors can be logged without leaking it.
#[derive(Clone, PartialEq, Eq, Error)]
#[error("{public}: {reason}")]
pub struct ParseError {
  public:        PublicMessage,
  reason:        ParserMessage,
  invalid_value: Option<String>,
}

impl ParseError {
  pub(crate) fn new(
    public: PublicMessage,
    reason: ParserMessage,
    invalid_value: Option<String>,
  ) -> Self {
    Self {
      public,
      reason,
      invalid_value,
    }
  }

  pub fn public_message(&self) -> &PublicMessage {
    &self.public
  }

  pub fn reason(&self) -> &ParserMessage {
    &self.reason
  }

  pub fn key(&self) -> &'static str {
    self.reason.key()
  }

  /// The rejected input, exactly as it was passed in. `None` when there
  /// was no input.
  pub fn invalid_value(&self) -> Option<&str> {
    self.invalid_value.as_deref()
  }

  pub fn into_invalid_value(self) -> Option<String> {
    self.invalid_value
  }

  /// Renders the reason with `source` templates.
  pub fn render(&self, source: &dyn MessageSource) -> String {
    format!("{}: {}", self.public, self.reason.render(source))
  }
}

impl fmt::Debug for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ParseError")
      .field("public", &self.public)
      .field("reason", &self.reason)
      .field(
        "invalid_value",
        &self.invalid_value.as_ref().map(|_| "<redacted>"),
      )
      .finish()
  }
}

/// A parser configuration that can never accept anything meaningful.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
  #[error("minimum length {min} is greater than maximum length {max}")]
  LengthBounds { min: usize, max: usize },
  #[error("no characters are accepted")]
  NothingAccepted,
  #[error("invalid pattern: {0}")]
  Regex(#[from] regex_automata::meta::BuildError),
  #[error(transparent)]
  Base(#[from] BaseError),
  #[error("no value lies between {min} and {max}")]
  NumericBounds { min: BigInt, max: BigInt },
  #[error("'{ch}' is a digit but is also read as punctuation or whitespace")]
  SeparatorConflict { ch: char },
  #[error("decimal and grouping separators are both '{0}'")]
  SameSeparators(char),
}
