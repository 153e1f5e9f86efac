//! Parser message codes and their rendering.
//!
//! Every rejection is described by exactly one [`ParserMessage`]. A message
//! has a stable lookup [`key`](ParserMessage::key), a default English
//! template with positional placeholders (`{0}`, `{1}`, ...) and the
//! arguments to interpolate. Localized templates are looked up through a
//! [`MessageSource`]; anything the source does not know falls back to the
//! default template.
//!
//! Arguments are limited to counts, bounds and single offending characters.
//! The rejected value itself is never part of a message.

use std::{
  borrow::Cow,
  collections::HashMap,
  fmt::{
    self,
    Write,
  },
};

use num_bigint::BigInt;
use smallvec::{
  SmallVec,
  smallvec,
};

pub type MessageArgs = SmallVec<[MessageArg; 1]>;

/// A value interpolated into a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
  /// Rendered quoted, e.g. `'1'`.
  Char(char),
  /// Rendered as `U+0009`.
  CodePoint(u32),
  Count(usize),
  /// Rendered with digit grouping, e.g. `100,000,000`.
  Number(BigInt),
}

impl MessageArg {
  fn render(&self, out: &mut String, grouping: char) {
    let _ = match self {
      MessageArg::Char(ch) => write!(out, "'{ch}'"),
      MessageArg::CodePoint(cp) => write!(out, "U+{cp:04X}"),
      MessageArg::Count(n) => write!(out, "{n}"),
      MessageArg::Number(n) => {
        out.push_str(&group_digits(n, grouping));
        Ok(())
      },
    };
  }
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParserMessage {
  Required,
  InvalidCharacter { ch: char },
  InvalidControlCharacter { code_point: u32 },
  InvalidQuoteCharacter { ch: char },
  InvalidWhitespaceCharacter { code_point: u32 },
  UnmatchedHighSurrogate { unit: u16 },
  UnmatchedLowSurrogate { unit: u16 },
  RegexMismatch,
  CustomValidation,
  TooLong { max: usize },
  TooShort { min: usize },
  InvalidNumber,
  SignNotAllowed,
  RoundingNecessary,
  GreaterThan { limit: BigInt },
  GreaterThanOrEqual { limit: BigInt },
  LessThan { limit: BigInt },
  LessThanOrEqual { limit: BigInt },
}

impl ParserMessage {
  /// Lookup key for localized templates.
  pub fn key(&self) -> &'static str {
    match self {
      ParserMessage::Required => "parser.required",
      ParserMessage::InvalidCharacter { .. } => "parser.invalid-character",
      ParserMessage::InvalidControlCharacter { .. } => "parser.invalid-control-character",
      ParserMessage::InvalidQuoteCharacter { .. } => "parser.invalid-quote-character",
      ParserMessage::InvalidWhitespaceCharacter { .. } => "parser.invalid-whitespace-character",
      ParserMessage::UnmatchedHighSurrogate { .. } => "parser.unmatched-high-surrogate",
      ParserMessage::UnmatchedLowSurrogate { .. } => "parser.unmatched-low-surrogate",
      ParserMessage::RegexMismatch => "parser.regex-mismatch",
      ParserMessage::CustomValidation => "parser.custom-validation",
      ParserMessage::TooLong { .. } => "parser.too-long",
      ParserMessage::TooShort { .. } => "parser.too-short",
      ParserMessage::InvalidNumber => "parser.invalid-number",
      ParserMessage::SignNotAllowed => "parser.sign-not-allowed",
      ParserMessage::RoundingNecessary => "parser.rounding-necessary",
      ParserMessage::GreaterThan { .. } => "parser.greater-than",
      ParserMessage::GreaterThanOrEqual { .. } => "parser.greater-than-or-equal",
      ParserMessage::LessThan { .. } => "parser.less-than",
      ParserMessage::LessThanOrEqual { .. } => "parser.less-than-or-equal",
    }
  }

  pub fn default_template(&self) -> &'static str {
    match self {
      ParserMessage::Required => "is required.",
      ParserMessage::InvalidCharacter { .. } => "contains invalid character {0}.",
      ParserMessage::InvalidControlCharacter { .. } => "contains invalid control character {0}.",
      ParserMessage::InvalidQuoteCharacter { .. } => "contains invalid quote character {0}.",
      ParserMessage::InvalidWhitespaceCharacter { .. } => {
        "contains invalid whitespace character {0}."
      },
      ParserMessage::UnmatchedHighSurrogate { .. } => "contains unmatched high surrogate {0}.",
      ParserMessage::UnmatchedLowSurrogate { .. } => "contains unmatched low surrogate {0}.",
      ParserMessage::RegexMismatch => "does not have the expected format.",
      ParserMessage::CustomValidation => "is not valid.",
      ParserMessage::TooLong { .. } => "must be at most {0} characters long.",
      ParserMessage::TooShort { .. } => "must be at least {0} characters long.",
      ParserMessage::InvalidNumber => "is not a valid number.",
      ParserMessage::SignNotAllowed => "must not have this sign.",
      ParserMessage::RoundingNecessary => "must be a whole number.",
      ParserMessage::GreaterThan { .. } => "must be greater than {0}.",
      ParserMessage::GreaterThanOrEqual { .. } => "must be greater than or equal to {0}.",
      ParserMessage::LessThan { .. } => "must be less than {0}.",
      ParserMessage::LessThanOrEqual { .. } => "must be less than or equal to {0}.",
    }
  }

  pub fn args(&self) -> MessageArgs {
    match self {
      ParserMessage::InvalidCharacter { ch } | ParserMessage::InvalidQuoteCharacter { ch } => {
        smallvec![MessageArg::Char(*ch)]
      },
      ParserMessage::InvalidControlCharacter { code_point }
      | ParserMessage::InvalidWhitespaceCharacter { code_point } => {
        smallvec![MessageArg::CodePoint(*code_point)]
      },
      ParserMessage::UnmatchedHighSurrogate { unit }
      | ParserMessage::UnmatchedLowSurrogate { unit } => {
        smallvec![MessageArg::CodePoint(u32::from(*unit))]
      },
      ParserMessage::TooLong { max: n } | ParserMessage::TooShort { min: n } => {
        smallvec![MessageArg::Count(*n)]
      },
      ParserMessage::GreaterThan { limit }
      | ParserMessage::GreaterThanOrEqual { limit }
      | ParserMessage::LessThan { limit }
      | ParserMessage::LessThanOrEqual { limit } => smallvec![MessageArg::Number(limit.clone())],
      _ => SmallVec::new(),
    }
  }

  /// Renders the message with the template `source` provides for its key.
  pub fn render(&self, source: &dyn MessageSource) -> String {
    let template = source
      .template(self.key())
      .unwrap_or(Cow::Borrowed(self.default_template()));
    interpolate(&template, &self.args(), source.grouping_separator())
  }
}

impl fmt::Display for ParserMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render(&DefaultMessages))
  }
}

/// Supplies localized message templates.
///
/// Implementations usually wrap a resource bundle loaded by the application.
pub trait MessageSource {
  fn template(&self, key: &str) -> Option<Cow<'_, str>>;

  /// Separator used between digit groups when numbers are interpolated.
  fn grouping_separator(&self) -> char {
    ','
  }
}

/// Always falls back to the built-in English templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageSource for DefaultMessages {
  fn template(&self, _key: &str) -> Option<Cow<'_, str>> {
    None
  }
}

/// An in-memory template table.
#[derive(Debug, Clone)]
pub struct MessageTable {
  templates: HashMap<String, String>,
  grouping:  char,
}

impl Default for MessageTable {
  fn default() -> Self {
    Self {
      templates: HashMap::new(),
      grouping:  ',',
    }
  }
}

impl MessageTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
    self.templates.insert(key.into(), template.into());
    self
  }

  pub fn with_grouping_separator(mut self, separator: char) -> Self {
    self.grouping = separator;
    self
  }
}

impl FromIterator<(String, String)> for MessageTable {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self {
      templates: iter.into_iter().collect(),
      ..Self::default()
    }
  }
}

impl MessageSource for MessageTable {
  fn template(&self, key: &str) -> Option<Cow<'_, str>> {
    self.templates.get(key).map(|t| Cow::Borrowed(t.as_str()))
  }

  fn grouping_separator(&self) -> char {
    self.grouping
  }
}

/// Replaces `{n}` placeholders with rendered arguments. Placeholders without
/// a matching argument are kept verbatim.
pub fn interpolate(template: &str, args: &[MessageArg], grouping: char) -> String {
  let mut out = String::with_capacity(template.len() + 16);
  let mut rest = template;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open + 1..];
    let placeholder = after
      .find('}')
      .and_then(|close| Some((close, after[..close].parse::<usize>().ok()?)))
      .and_then(|(close, index)| Some((close, args.get(index)?)));
    match placeholder {
      Some((close, arg)) => {
        arg.render(&mut out, grouping);
        rest = &after[close + 1..];
      },
      None => {
        out.push('{');
        rest = after;
      },
    }
  }
  out.push_str(rest);
  out
}

/// Formats `n` in decimal with `separator` between groups of three digits.
pub fn group_digits(n: &BigInt, separator: char) -> String {
  let digits = n.magnitude().to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  if n.sign() == num_bigint::Sign::Minus {
    out.push('-');
  }
  let lead = digits.len() % 3;
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (i + 3 - lead) % 3 == 0 {
      out.push(separator);
    }
    out.push(ch);
  }
  out
}
