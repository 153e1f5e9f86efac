//! The text pipeline.
//!
//! A [`TypeParser`] turns untrusted input into a validated string. Stages run
//! in a fixed order:
//!
//! 1. null and blank policies
//! 2. Unicode normalization
//! 3. per code point: case folding, explicit conversions, the whitespace
//!    policy, dash canonicalization, then the accepted-set check
//! 4. length limits, counted in code points of the output
//! 5. the full-match regex
//! 6. the custom validator
//!
//! The first failing stage produces the error; later stages never run.
//! Parsers are immutable once built and cheap to clone and share across
//! threads.

use std::{
  borrow::Cow,
  collections::HashMap,
  fmt,
  sync::Arc,
};

use regex_automata::meta::Regex;
use the_charset::{
  CategoryMask,
  Leaf,
  Subset,
  SubsetBuilder,
  Union,
  category,
  chars::{
    CharClass,
    char_is_dash,
    char_is_whitespace,
    classify_char,
  },
  sets,
};

use crate::{
  error::{
    BuildError,
    ParseError,
    PublicMessage,
    Result,
  },
  message::ParserMessage,
  policy::{
    BlankPolicy,
    CaseFolding,
    NormalizationForm,
    NullPolicy,
    WhitespacePolicy,
  },
};

pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct TypeParser {
  rules: Arc<Rules>,
}

struct Rules {
  public:           PublicMessage,
  null:             NullPolicy,
  blank:            BlankPolicy,
  normalization:    NormalizationForm,
  case:             CaseFolding,
  whitespace:       WhitespacePolicy,
  canonical_dashes: bool,
  conversions:      HashMap<char, Box<str>>,
  accepted:         Subset,
  categories:       CategoryMask,
  rejected:         Subset,
  min_length:       Option<usize>,
  max_length:       Option<usize>,
  regex:            Option<Regex>,
  validator:        Option<Validator>,
}

impl TypeParser {
  pub fn builder() -> TypeParserBuilder {
    TypeParserBuilder::new()
  }

  /// Parses `input`. A result of "no value" (from the blank policy) is
  /// reported as [`ParserMessage::Required`].
  pub fn parse(&self, input: &str) -> Result<String> {
    match self.parse_optional(Some(input))? {
      Some(text) => Ok(text),
      None => Err(self.reject(ParserMessage::Required, Some(input))),
    }
  }

  /// Parses input that may be absent.
  pub fn parse_optional(&self, input: Option<&str>) -> Result<Option<String>> {
    self
      .run(input)
      .map_err(|reason| self.reject(reason, input))
  }

  /// Parses UTF-16 code units, reporting unpaired surrogates instead of
  /// replacing them.
  pub fn parse_utf16(&self, units: &[u16]) -> Result<String> {
    let text = decode_utf16(units).map_err(|reason| {
      let lossy = String::from_utf16_lossy(units);
      self.reject(reason, Some(lossy.as_str()))
    })?;
    self.parse(&text)
  }

  /// Parses `input` and hands the result to `factory`, typically the
  /// constructor of a domain type.
  pub fn parse_with<T>(&self, input: &str, factory: impl FnOnce(String) -> T) -> Result<T> {
    self.parse(input).map(factory)
  }

  pub fn public_message(&self) -> &PublicMessage {
    &self.rules.public
  }

  /// Whether `ch` passes the accepted-set check on its own.
  pub fn accepts(&self, ch: char) -> bool {
    self.rules.accepts(ch)
  }

  pub(crate) fn run(
    &self,
    input: Option<&str>,
  ) -> std::result::Result<Option<String>, ParserMessage> {
    self.rules.run(input)
  }

  pub(crate) fn reject(&self, reason: ParserMessage, input: Option<&str>) -> ParseError {
    tracing::trace!(key = reason.key(), "rejected input");
    ParseError::new(
      self.rules.public.clone(),
      reason,
      input.map(str::to_owned),
    )
  }
}

impl fmt::Debug for TypeParser {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rules = &*self.rules;
    f.debug_struct("TypeParser")
      .field("public", &rules.public)
      .field("whitespace", &rules.whitespace)
      .field("case", &rules.case)
      .field("normalization", &rules.normalization)
      .field("accepted", &rules.accepted)
      .field("categories", &rules.categories)
      .field("min_length", &rules.min_length)
      .field("max_length", &rules.max_length)
      .finish_non_exhaustive()
  }
}

/// Output buffer that defers a single space until something follows it, so
/// normalized whitespace never leads or trails.
#[derive(Default)]
struct Output {
  text:          String,
  len:           usize,
  pending_space: bool,
}

impl Output {
  fn push(&mut self, ch: char) {
    self.flush_space();
    self.text.push(ch);
    self.len += 1;
  }

  fn push_str(&mut self, s: &str) {
    if s.is_empty() {
      return;
    }
    self.flush_space();
    self.text.push_str(s);
    self.len += s.chars().count();
  }

  fn flush_space(&mut self) {
    if std::mem::take(&mut self.pending_space) {
      self.text.push(' ');
      self.len += 1;
    }
  }
}

type Step<T> = std::result::Result<T, ParserMessage>;

impl Rules {
  fn run(&self, input: Option<&str>) -> Step<Option<String>> {
    let input = match (input, self.null) {
      (Some(input), _) => input,
      (None, NullPolicy::Preserve) => return Ok(None),
      (None, NullPolicy::ToEmpty) => "",
      (None, NullPolicy::Reject) => return Err(ParserMessage::Required),
    };

    if input.chars().all(char_is_whitespace) {
      match self.blank {
        BlankPolicy::Preserve => {},
        BlankPolicy::ToNull => return Ok(None),
        BlankPolicy::Reject => return Err(ParserMessage::Required),
      }
    }

    let normalized = self.normalization.apply(input);
    let output = self.scan(&normalized)?;
    self.check(&output)?;
    Ok(Some(output.text))
  }

  fn scan(&self, text: &str) -> Step<Output> {
    let mut out = Output {
      text: String::with_capacity(text.len()),
      ..Output::default()
    };
    for ch in text.chars() {
      for ch in self.case.fold(ch) {
        self.emit(ch, &mut out)?;
      }
    }
    Ok(out)
  }

  fn emit(&self, ch: char, out: &mut Output) -> Step<()> {
    if let Some(replacement) = self.conversions.get(&ch) {
      out.push_str(replacement);
      return Ok(());
    }

    if char_is_whitespace(ch) {
      match self.whitespace {
        WhitespacePolicy::Preserve => {},
        WhitespacePolicy::Normalize => {
          out.pending_space = out.len > 0;
          return Ok(());
        },
        WhitespacePolicy::Remove => return Ok(()),
      }
    }

    if self.canonical_dashes && char_is_dash(ch) {
      out.push('-');
      return Ok(());
    }

    if !self.accepts(ch) {
      return Err(rejection(ch));
    }
    out.push(ch);
    Ok(())
  }

  fn accepts(&self, ch: char) -> bool {
    (self.accepted.contains_char(ch) || self.categories.contains_char(ch))
      && !self.rejected.contains_char(ch)
  }

  fn check(&self, out: &Output) -> Step<()> {
    if let Some(min) = self.min_length
      && out.len < min
    {
      return Err(ParserMessage::TooShort { min });
    }
    if let Some(max) = self.max_length
      && out.len > max
    {
      return Err(ParserMessage::TooLong { max });
    }
    if let Some(regex) = &self.regex
      && !regex.is_match(out.text.as_str())
    {
      return Err(ParserMessage::RegexMismatch);
    }
    if let Some(validator) = &self.validator
      && !validator(&out.text)
    {
      return Err(ParserMessage::CustomValidation);
    }
    Ok(())
  }
}

fn rejection(ch: char) -> ParserMessage {
  match classify_char(ch) {
    CharClass::Control => ParserMessage::InvalidControlCharacter {
      code_point: ch as u32,
    },
    CharClass::Whitespace => ParserMessage::InvalidWhitespaceCharacter {
      code_point: ch as u32,
    },
    CharClass::Quote => ParserMessage::InvalidQuoteCharacter { ch },
    CharClass::Dash | CharClass::Other => ParserMessage::InvalidCharacter { ch },
  }
}

fn decode_utf16(units: &[u16]) -> Step<String> {
  char::decode_utf16(units.iter().copied())
    .map(|decoded| {
      decoded.map_err(|err| {
        let unit = err.unpaired_surrogate();
        if (0xD800..=0xDBFF).contains(&unit) {
          ParserMessage::UnmatchedHighSurrogate { unit }
        } else {
          ParserMessage::UnmatchedLowSurrogate { unit }
        }
      })
    })
    .collect()
}

/// Configures a [`TypeParser`].
///
/// Nothing is accepted by default; at least one character source (a set,
/// a category or a conversion) must be added before [`build`](Self::build).
#[derive(Clone, Default)]
#[must_use]
pub struct TypeParserBuilder {
  public:           PublicMessage,
  null:             NullPolicy,
  blank:            BlankPolicy,
  normalization:    NormalizationForm,
  case:             CaseFolding,
  whitespace:       WhitespacePolicy,
  canonical_dashes: bool,
  conversions:      HashMap<char, Box<str>>,
  accepted:         SubsetBuilder,
  categories:       CategoryMask,
  rejected:         SubsetBuilder,
  min_length:       Option<usize>,
  max_length:       Option<usize>,
  regex:            Option<String>,
  validator:        Option<Validator>,
}

impl TypeParserBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// The caller-facing message attached to every error.
  pub fn message(mut self, text: impl Into<Cow<'static, str>>) -> Self {
    self.public = PublicMessage::new(text);
    self
  }

  pub fn message_code(
    mut self,
    code: impl Into<Cow<'static, str>>,
    text: impl Into<Cow<'static, str>>,
  ) -> Self {
    self.public = PublicMessage::with_code(code, text);
    self
  }

  pub fn accept_code_point(mut self, cp: u32) -> Self {
    self.accepted.include_code_point(cp);
    self
  }

  pub fn accept_chars(mut self, chars: &str) -> Self {
    self.accepted.include_chars(chars);
    self
  }

  pub fn accept_char(mut self, ch: char) -> Self {
    self.accepted.include_char(ch);
    self
  }

  /// # Panics
  ///
  /// Panics if either end is not a Unicode code point.
  pub fn accept_range(mut self, from: u32, to: u32) -> Self {
    self.accepted.include_range(from, to);
    self
  }

  pub fn accept_subset(mut self, subset: &Subset) -> Self {
    self.accepted.include_subset(subset);
    self
  }

  /// Accepts every character of the given general categories.
  pub fn accept_category(mut self, mask: impl Into<CategoryMask>) -> Self {
    self.categories |= mask.into();
    self
  }

  pub fn accept_ascii_letters(self) -> Self {
    self.accept_subset(&sets::ASCII_LETTERS)
  }

  pub fn accept_ascii_digits(self) -> Self {
    self.accept_subset(&sets::ASCII_DIGITS)
  }

  pub fn accept_ascii_alphanumeric(self) -> Self {
    self.accept_subset(&sets::ASCII_ALPHANUMERIC)
  }

  /// Every Unicode letter (`L`).
  pub fn accept_letters(self) -> Self {
    self.accept_category(category::union(Union::Letter))
  }

  /// Every Unicode decimal digit (`Nd`).
  pub fn accept_digits(self) -> Self {
    self.accept_category(Leaf::DecimalNumber)
  }

  /// Rejects `chars` even when a set or category accepts them.
  pub fn reject_chars(mut self, chars: &str) -> Self {
    self.rejected.include_chars(chars);
    self
  }

  pub fn reject_subset(mut self, subset: &Subset) -> Self {
    self.rejected.include_subset(subset);
    self
  }

  /// Replaces `from` with `to` in the output. The replacement is emitted
  /// as is; it does not have to be accepted.
  pub fn convert(self, from: char, to: char) -> Self {
    self.convert_to_str(from, to.encode_utf8(&mut [0; 4]))
  }

  pub fn convert_to_str(mut self, from: char, to: &str) -> Self {
    self.conversions.insert(from, to.into());
    self
  }

  /// Silently drops `ch`.
  pub fn remove(self, ch: char) -> Self {
    self.convert_to_str(ch, "")
  }

  pub fn whitespace(mut self, policy: WhitespacePolicy) -> Self {
    self.whitespace = policy;
    self
  }

  /// Rewrites every dash-like character to `-`.
  pub fn canonical_dashes(mut self, enabled: bool) -> Self {
    self.canonical_dashes = enabled;
    self
  }

  /// Whether the built-in whitespace or dash rules replace `ch` before
  /// the accepted set sees it.
  pub(crate) fn rewrites(&self, ch: char) -> bool {
    (self.canonical_dashes && char_is_dash(ch))
      || (self.whitespace != WhitespacePolicy::Preserve && char_is_whitespace(ch))
  }

  pub fn case(mut self, folding: CaseFolding) -> Self {
    self.case = folding;
    self
  }

  pub fn normalization(mut self, form: NormalizationForm) -> Self {
    self.normalization = form;
    self
  }

  pub fn min_length(mut self, min: usize) -> Self {
    self.min_length = Some(min);
    self
  }

  pub fn max_length(mut self, max: usize) -> Self {
    self.max_length = Some(max);
    self
  }

  /// Both limits at once; `length(n, n)` fixes the size.
  pub fn length(self, min: usize, max: usize) -> Self {
    self.min_length(min).max_length(max)
  }

  pub fn null(mut self, policy: NullPolicy) -> Self {
    self.null = policy;
    self
  }

  pub fn blank(mut self, policy: BlankPolicy) -> Self {
    self.blank = policy;
    self
  }

  /// The output must match `pattern` in full.
  pub fn regex(mut self, pattern: impl Into<String>) -> Self {
    self.regex = Some(pattern.into());
    self
  }

  pub fn validator(mut self, validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
    self.validator = Some(Arc::new(validator));
    self
  }

  pub fn build(self) -> std::result::Result<TypeParser, BuildError> {
    if let (Some(min), Some(max)) = (self.min_length, self.max_length)
      && min > max
    {
      return Err(BuildError::LengthBounds { min, max });
    }

    let accepted = self.accepted.build();
    if accepted.is_empty()
      && self.categories.is_empty()
      && self.conversions.is_empty()
      && !self.canonical_dashes
    {
      return Err(BuildError::NothingAccepted);
    }

    let regex = match &self.regex {
      Some(pattern) => Some(Regex::new(&format!("^(?:{pattern})$"))?),
      None => None,
    };

    tracing::debug!(
      ranges = accepted.range_count(),
      categories = self.categories.leaves().count(),
      conversions = self.conversions.len(),
      "built type parser"
    );

    Ok(TypeParser {
      rules: Arc::new(Rules {
        public: self.public,
        null: self.null,
        blank: self.blank,
        normalization: self.normalization,
        case: self.case,
        whitespace: self.whitespace,
        canonical_dashes: self.canonical_dashes,
        conversions: self.conversions,
        accepted,
        categories: self.categories,
        rejected: self.rejected.build(),
        min_length: self.min_length,
        max_length: self.max_length,
        regex,
        validator: self.validator,
      }),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lowercase_words() -> TypeParser {
    TypeParser::builder()
      .message("Invalid name")
      .accept_range('a' as u32, 'z' as u32)
      .whitespace(WhitespacePolicy::Normalize)
      .build()
      .unwrap()
  }

  fn reason(result: Result<String>) -> ParserMessage {
    result.unwrap_err().reason().clone()
  }

  #[test]
  fn normalizes_whitespace() {
    let parser = lowercase_words();
    assert_eq!(parser.parse("  hello   world  ").unwrap(), "hello world");
    assert_eq!(parser.parse("hello\t\u{A0}\nworld").unwrap(), "hello world");
    assert_eq!(parser.parse("   ").unwrap(), "");
  }

  #[test]
  fn names_the_invalid_character() {
    let err = lowercase_words().parse("hello1world").unwrap_err();
    assert_eq!(err.reason(), &ParserMessage::InvalidCharacter { ch: '1' });
    assert_eq!(
      err.to_string(),
      "Invalid name: contains invalid character '1'."
    );
    assert_eq!(err.invalid_value(), Some("hello1world"));
  }

  #[test]
  fn rejections_are_classified() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_LETTERS)
      .build()
      .unwrap();
    assert_eq!(
      reason(parser.parse("a\u{7}")),
      ParserMessage::InvalidControlCharacter { code_point: 7 }
    );
    assert_eq!(
      reason(parser.parse("a b")),
      ParserMessage::InvalidWhitespaceCharacter { code_point: 0x20 }
    );
    assert_eq!(
      reason(parser.parse("it\u{2019}s")),
      ParserMessage::InvalidQuoteCharacter { ch: '\u{2019}' }
    );
    assert_eq!(
      reason(parser.parse("a-b")),
      ParserMessage::InvalidCharacter { ch: '-' }
    );
  }

  #[test]
  fn remove_whitespace() {
    let parser = TypeParser::builder()
      .accept_ascii_digits()
      .whitespace(WhitespacePolicy::Remove)
      .build()
      .unwrap();
    assert_eq!(parser.parse(" 12 34\u{2009}56 ").unwrap(), "123456");
  }

  #[test]
  fn categories_and_rejections() {
    let parser = TypeParser::builder()
      .accept_letters()
      .accept_digits()
      .reject_chars("xX")
      .build()
      .unwrap();
    assert_eq!(parser.parse("Ωmega٣").unwrap(), "Ωmega٣");
    assert_eq!(
      reason(parser.parse("box")),
      ParserMessage::InvalidCharacter { ch: 'x' }
    );
    assert!(!parser.accepts('X'));
    assert!(parser.accepts('ж'));
  }

  #[test]
  fn conversions_and_dashes() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_ALPHANUMERIC)
      .convert_to_str('ß', "ss")
      .convert('_', '-')
      .remove('.')
      .canonical_dashes(true)
      .build()
      .unwrap();
    assert_eq!(parser.parse("stra\u{DF}e").unwrap(), "strasse");
    assert_eq!(parser.parse("a\u{2013}b\u{2212}c_d").unwrap(), "a-b-c-d");
    assert_eq!(parser.parse("v1.2.3").unwrap(), "v123");
  }

  #[test]
  fn case_folding_runs_before_the_set_check() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_UPPERCASE)
      .case(CaseFolding::Upper)
      .build()
      .unwrap();
    assert_eq!(parser.parse("Straße").unwrap(), "STRASSE");
  }

  #[test]
  fn normalization_runs_first() {
    let parser = TypeParser::builder()
      .accept_char('\u{E9}')
      .normalization(NormalizationForm::Nfc)
      .build()
      .unwrap();
    assert_eq!(parser.parse("e\u{301}").unwrap(), "\u{E9}");

    let unnormalized = TypeParser::builder()
      .accept_char('\u{E9}')
      .build()
      .unwrap();
    assert_eq!(
      reason(unnormalized.parse("e\u{301}")),
      ParserMessage::InvalidCharacter { ch: 'e' }
    );
  }

  #[test]
  fn null_and_blank_policies() {
    let letters = || TypeParser::builder().accept_ascii_letters();

    let parser = letters().build().unwrap();
    assert_eq!(parser.parse_optional(None).unwrap(), None);
    assert_eq!(parser.parse("").unwrap(), "");

    let parser = letters().null(NullPolicy::ToEmpty).build().unwrap();
    assert_eq!(parser.parse_optional(None).unwrap().as_deref(), Some(""));

    let parser = letters().null(NullPolicy::Reject).build().unwrap();
    let err = parser.parse_optional(None).unwrap_err();
    assert_eq!(err.reason(), &ParserMessage::Required);
    assert_eq!(err.invalid_value(), None);

    let parser = letters().blank(BlankPolicy::ToNull).build().unwrap();
    assert_eq!(parser.parse_optional(Some(" \t")).unwrap(), None);
    assert_eq!(reason(parser.parse(" ")), ParserMessage::Required);

    let parser = letters().blank(BlankPolicy::Reject).build().unwrap();
    assert_eq!(reason(parser.parse("")), ParserMessage::Required);
  }

  #[test]
  fn lengths_count_code_points() {
    let parser = TypeParser::builder()
      .accept_category(category::union(Union::Letter))
      .min_length(2)
      .max_length(3)
      .build()
      .unwrap();
    assert_eq!(parser.parse("ééé").unwrap(), "ééé");
    assert_eq!(parser.parse("𝒜𝒜").unwrap(), "𝒜𝒜");
    assert_eq!(reason(parser.parse("é")), ParserMessage::TooShort { min: 2 });
    assert_eq!(
      reason(parser.parse("éééé")),
      ParserMessage::TooLong { max: 3 }
    );
  }

  #[test]
  fn lengths_see_converted_output() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_LETTERS)
      .convert_to_str('ß', "ss")
      .max_length(3)
      .build()
      .unwrap();
    assert_eq!(reason(parser.parse("aßb")), ParserMessage::TooLong { max: 3 });
  }

  #[test]
  fn regex_must_match_in_full() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_ALPHANUMERIC)
      .regex("[A-Z]{2}[0-9]+|x")
      .build()
      .unwrap();
    assert_eq!(parser.parse("AB12").unwrap(), "AB12");
    assert_eq!(parser.parse("x").unwrap(), "x");
    assert_eq!(reason(parser.parse("AB12C")), ParserMessage::RegexMismatch);
    assert_eq!(reason(parser.parse("xAB1")), ParserMessage::RegexMismatch);
  }

  #[test]
  fn validator_runs_last() {
    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_DIGITS)
      .max_length(4)
      .validator(|text| text.bytes().map(|b| u32::from(b - b'0')).sum::<u32>() % 2 == 0)
      .build()
      .unwrap();
    assert_eq!(parser.parse("1212").unwrap(), "1212");
    assert_eq!(reason(parser.parse("1211")), ParserMessage::CustomValidation);
    assert_eq!(reason(parser.parse("12121")), ParserMessage::TooLong { max: 4 });
  }

  #[test]
  fn utf16_input() {
    let parser = TypeParser::builder()
      .accept_category(category::union(Union::Symbol))
      .accept_subset(&sets::ASCII_LETTERS)
      .build()
      .unwrap();
    let units: Vec<u16> = "a😀b".encode_utf16().collect();
    assert_eq!(parser.parse_utf16(&units).unwrap(), "a😀b");

    let err = parser.parse_utf16(&[0x61, 0xD83D, 0x62]).unwrap_err();
    assert_eq!(
      err.reason(),
      &ParserMessage::UnmatchedHighSurrogate { unit: 0xD83D }
    );
    assert_eq!(
      err.reason().to_string(),
      "contains unmatched high surrogate U+D83D."
    );
    assert_eq!(
      parser.parse_utf16(&[0xDE00]).unwrap_err().reason(),
      &ParserMessage::UnmatchedLowSurrogate { unit: 0xDE00 }
    );
  }

  #[test]
  fn parse_with_factory() {
    #[derive(Debug, PartialEq)]
    struct Code(String);

    let parser = TypeParser::builder()
      .accept_subset(&sets::ASCII_UPPERCASE)
      .case(CaseFolding::Upper)
      .build()
      .unwrap();
    assert_eq!(parser.parse_with("abc", Code).unwrap(), Code("ABC".into()));
  }

  #[test]
  fn invalid_configurations() {
    assert!(matches!(
      TypeParser::builder().build(),
      Err(BuildError::NothingAccepted)
    ));
    assert!(matches!(
      TypeParser::builder()
        .accept_char('a')
        .min_length(3)
        .max_length(2)
        .build(),
      Err(BuildError::LengthBounds { min: 3, max: 2 })
    ));
    assert!(matches!(
      TypeParser::builder().accept_char('a').regex("(").build(),
      Err(BuildError::Regex(_))
    ));
  }

  #[test]
  fn shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypeParser>();

    let parser = lowercase_words();
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let parser = parser.clone();
        std::thread::spawn(move || parser.parse(" a  b ").unwrap())
      })
      .collect();
    for handle in handles {
      assert_eq!(handle.join().unwrap(), "a b");
    }
  }

  quickcheck::quickcheck! {
    fn normalized_output_is_stable(input: String) -> bool {
      let parser = TypeParser::builder()
        .accept_category(category::union(Union::Letter))
        .whitespace(WhitespacePolicy::Normalize)
        .build()
        .unwrap();
      match parser.parse(&input) {
        Ok(out) => {
          !out.starts_with(' ')
            && !out.ends_with(' ')
            && !out.contains("  ")
            && parser.parse(&out).as_deref() == Ok(out.as_str())
        },
        Err(_) => true,
      }
    }
  }
}
