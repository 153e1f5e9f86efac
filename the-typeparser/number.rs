//! Integer parsing on top of the text pipeline.
//!
//! The text stage runs first with rules derived from the numeric settings
//! (digits of the base, sign characters, separators, ignored punctuation).
//! The surviving text is then read as a signed magnitude in the configured
//! radix, rounded to an integer and checked against the bounds. Magnitudes
//! are arbitrary precision until the very end, so overflow shows up as a
//! bound violation naming the limit instead of as a wrapped value. Digits
//! past the largest bound are only validated, and fraction digits are only
//! compared with one half, so very long input costs linear time.

use std::{
  cmp::Ordering,
  marker::PhantomData,
  sync::Arc,
};

use num_bigint::{
  BigInt,
  BigUint,
  Sign,
};
use num_traits::{
  ToPrimitive,
  Zero,
};
use the_charset::{
  NumericBase,
  base::BaseError,
};

use crate::{
  error::{
    BuildError,
    Result,
  },
  message::ParserMessage,
  parser::{
    TypeParser,
    TypeParserBuilder,
  },
  policy::{
    BlankPolicy,
    WhitespacePolicy,
  },
};

/// Primitive integers a [`NumberParser`] can produce.
pub trait Integral: Copy + Into<BigInt> + Send + Sync + 'static {
  const MIN: Self;
  const MAX: Self;

  fn from_bigint(value: &BigInt) -> Option<Self>;
}

macro_rules! integral {
  ($($ty:ty => $to:ident),* $(,)?) => {$(
    impl Integral for $ty {
      const MIN: Self = <$ty>::MIN;
      const MAX: Self = <$ty>::MAX;

      #[inline]
      fn from_bigint(value: &BigInt) -> Option<Self> {
        value.$to()
      }
    }
  )*};
}

integral! {
  i8 => to_i8,
  i16 => to_i16,
  i32 => to_i32,
  i64 => to_i64,
  i128 => to_i128,
  isize => to_isize,
  u8 => to_u8,
  u16 => to_u16,
  u32 => to_u32,
  u64 => to_u64,
  u128 => to_u128,
  usize => to_usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignPolicy {
  /// Leading `+` or `-`.
  #[default]
  Signed,
  /// Leading `+` only.
  Unsigned,
  NoSign,
}

/// How a fractional part is folded into an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundingMode {
  /// Away from zero.
  Up,
  /// Towards zero.
  Down,
  Ceiling,
  Floor,
  HalfUp,
  HalfDown,
  HalfEven,
  /// Any non-zero fraction is an error.
  #[default]
  Unnecessary,
}

impl RoundingMode {
  /// Rounds a non-negative magnitude whose dropped digits amount to
  /// `fraction`.
  fn round(
    self,
    integer: BigUint,
    fraction: Fraction,
    negative: bool,
  ) -> std::result::Result<BigUint, ParserMessage> {
    let half = match fraction {
      Fraction::Zero => return Ok(integer),
      Fraction::BelowHalf => Ordering::Less,
      Fraction::Half => Ordering::Equal,
      Fraction::AboveHalf => Ordering::Greater,
    };
    let away = match self {
      RoundingMode::Unnecessary => return Err(ParserMessage::RoundingNecessary),
      RoundingMode::Up => true,
      RoundingMode::Down => false,
      RoundingMode::Ceiling => !negative,
      RoundingMode::Floor => negative,
      RoundingMode::HalfUp => half != Ordering::Less,
      RoundingMode::HalfDown => half == Ordering::Greater,
      RoundingMode::HalfEven => match half {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => integer.bit(0),
      },
    };
    Ok(if away { integer + 1u32 } else { integer })
  }
}

/// A fractional part reduced to what rounding needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fraction {
  Zero,
  BelowHalf,
  Half,
  AboveHalf,
}

/// Compares fraction digits against the expansion of one half, one digit
/// at a time.
///
/// In an even radix one half is `0.h000...` with `h = radix / 2`; in an
/// odd radix it is `0.hhh...` with `h = (radix - 1) / 2` repeating, so a
/// finite fraction is never exactly one half there.
#[derive(Debug)]
struct FractionScan {
  radix:       u32,
  seen:        bool,
  nonzero:     bool,
  versus_half: Ordering,
}

impl FractionScan {
  fn new(radix: u32) -> Self {
    Self {
      radix,
      seen: false,
      nonzero: false,
      versus_half: Ordering::Equal,
    }
  }

  fn push(&mut self, digit: u32) {
    let odd = self.radix % 2 == 1;
    let half_digit = if odd || !self.seen { self.radix / 2 } else { 0 };
    if self.versus_half == Ordering::Equal {
      self.versus_half = digit.cmp(&half_digit);
    }
    self.nonzero |= digit != 0;
    self.seen = true;
  }

  fn finish(self) -> Fraction {
    if !self.nonzero {
      return Fraction::Zero;
    }
    match self.versus_half {
      Ordering::Less => Fraction::BelowHalf,
      Ordering::Greater => Fraction::AboveHalf,
      Ordering::Equal if self.radix % 2 == 1 => Fraction::BelowHalf,
      Ordering::Equal => Fraction::Half,
    }
  }
}

/// Decimal and grouping separators of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
  pub decimal:  char,
  pub grouping: char,
}

impl NumberLocale {
  pub const EN: Self = Self {
    decimal:  '.',
    grouping: ',',
  };
  pub const DE: Self = Self {
    decimal:  ',',
    grouping: '.',
  };
  /// Narrow no-break space groups.
  pub const FR: Self = Self {
    decimal:  ',',
    grouping: '\u{202F}',
  };
  pub const CH: Self = Self {
    decimal:  '.',
    grouping: '\'',
  };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound<N> {
  Inclusive(N),
  Exclusive(N),
}

#[derive(Debug)]
struct NumericRules {
  base:          NumericBase,
  sign:          SignPolicy,
  decimal:       char,
  grouping:      Option<char>,
  ignored:       Vec<char>,
  ignore_dashes: bool,
  rounding:      RoundingMode,
  min:           Bound<BigInt>,
  max:           Bound<BigInt>,
  /// Largest magnitude either bound admits. Integer parts beyond it fail
  /// the bound check whatever their exact value.
  cap:           BigUint,
}

impl NumericRules {
  fn coerce<N: Integral>(&self, text: &str) -> std::result::Result<N, ParserMessage> {
    let mut chars = text.chars().peekable();
    let negative = match chars.next_if(|&ch| ch == '-' || ch == '+') {
      Some('-') if self.sign == SignPolicy::Signed => true,
      Some('+') if self.sign != SignPolicy::NoSign => false,
      Some(_) => return Err(ParserMessage::SignNotAllowed),
      None => false,
    };

    let radix = self.base.radix();
    let mut integer = BigUint::zero();
    let mut fraction = FractionScan::new(radix);
    let mut digits = 0usize;
    let mut in_fraction = false;

    for ch in chars {
      if let Some(value) = self.base.digit_value(ch) {
        digits += 1;
        if in_fraction {
          fraction.push(value);
        } else if integer <= self.cap {
          integer = integer * radix + value;
        }
      } else if ch == self.decimal && !in_fraction {
        in_fraction = true;
      } else if (Some(ch) == self.grouping && !in_fraction)
        || self.ignored.contains(&ch)
        || (self.ignore_dashes && ch == '-')
      {
        continue;
      } else {
        return Err(ParserMessage::InvalidNumber);
      }
    }
    if digits == 0 {
      return Err(ParserMessage::InvalidNumber);
    }

    let magnitude = self.rounding.round(integer, fraction.finish(), negative)?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    let value = BigInt::from_biguint(sign, magnitude);
    self.check_bounds(&value)?;
    N::from_bigint(&value).ok_or(ParserMessage::InvalidNumber)
  }

  fn check_bounds(&self, value: &BigInt) -> std::result::Result<(), ParserMessage> {
    match &self.min {
      Bound::Inclusive(limit) if value < limit => {
        return Err(ParserMessage::GreaterThanOrEqual {
          limit: limit.clone(),
        });
      },
      Bound::Exclusive(limit) if value <= limit => {
        return Err(ParserMessage::GreaterThan {
          limit: limit.clone(),
        });
      },
      _ => {},
    }
    match &self.max {
      Bound::Inclusive(limit) if value > limit => {
        Err(ParserMessage::LessThanOrEqual {
          limit: limit.clone(),
        })
      },
      Bound::Exclusive(limit) if value >= limit => {
        Err(ParserMessage::LessThan {
          limit: limit.clone(),
        })
      },
      _ => Ok(()),
    }
  }
}

/// Parses text into a primitive integer.
#[derive(Debug)]
pub struct NumberParser<N> {
  text:    TypeParser,
  rules:   Arc<NumericRules>,
  _target: PhantomData<fn() -> N>,
}

impl<N> Clone for NumberParser<N> {
  fn clone(&self) -> Self {
    Self {
      text:    self.text.clone(),
      rules:   Arc::clone(&self.rules),
      _target: PhantomData,
    }
  }
}

impl<N: Integral> NumberParser<N> {
  pub fn builder() -> NumberParserBuilder<N> {
    NumberParserBuilder::new()
  }

  pub fn parse(&self, input: &str) -> Result<N> {
    match self.parse_optional(Some(input))? {
      Some(value) => Ok(value),
      None => Err(self.text.reject(ParserMessage::Required, Some(input))),
    }
  }

  pub fn parse_optional(&self, input: Option<&str>) -> Result<Option<N>> {
    self
      .run(input)
      .map_err(|reason| self.text.reject(reason, input))
  }

  pub fn parse_utf16(&self, units: &[u16]) -> Result<N> {
    let text = self.text.parse_utf16(units)?;
    self
      .rules
      .coerce(&text)
      .map_err(|reason| {
        let lossy = String::from_utf16_lossy(units);
        self.text.reject(reason, Some(lossy.as_str()))
      })
  }

  pub fn parse_with<T>(&self, input: &str, factory: impl FnOnce(N) -> T) -> Result<T> {
    self.parse(input).map(factory)
  }

  fn run(&self, input: Option<&str>) -> std::result::Result<Option<N>, ParserMessage> {
    match self.text.run(input)? {
      Some(text) => self.rules.coerce(&text).map(Some),
      None => Ok(None),
    }
  }
}

/// Configures a [`NumberParser`].
///
/// Defaults: decimal digits, signed, whitespace removed, dash variants read
/// as `-`, blank input treated as absent, no locale separators, and no
/// rounding.
#[must_use]
pub struct NumberParserBuilder<N> {
  text:          TypeParserBuilder,
  base:          std::result::Result<NumericBase, BaseError>,
  sign:          SignPolicy,
  ignored:       Vec<char>,
  ignore_dashes: bool,
  locale:        Option<NumberLocale>,
  rounding:      RoundingMode,
  min:           Option<Bound<N>>,
  max:           Option<Bound<N>>,
}

impl<N: Integral> Default for NumberParserBuilder<N> {
  fn default() -> Self {
    Self::new()
  }
}

impl<N: Integral> NumberParserBuilder<N> {
  pub fn new() -> Self {
    Self {
      text:          TypeParserBuilder::new()
        .whitespace(WhitespacePolicy::Remove)
        .canonical_dashes(true)
        .blank(BlankPolicy::ToNull),
      base:          Ok(NumericBase::decimal()),
      sign:          SignPolicy::Signed,
      ignored:       Vec::new(),
      ignore_dashes: false,
      locale:        None,
      rounding:      RoundingMode::Unnecessary,
      min:           None,
      max:           None,
    }
  }

  /// Adjusts the text-stage rules, e.g. length limits or the message.
  pub fn text(mut self, configure: impl FnOnce(TypeParserBuilder) -> TypeParserBuilder) -> Self {
    self.text = configure(self.text);
    self
  }

  pub fn base(mut self, base: NumericBase) -> Self {
    self.base = Ok(base);
    self
  }

  /// Uses an ordered digit alphabet. An invalid alphabet is reported by
  /// [`build`](Self::build).
  pub fn custom_base(mut self, alphabet: &str, case_sensitive: bool) -> Self {
    self.base = NumericBase::custom(alphabet, case_sensitive);
    self
  }

  pub fn sign(mut self, policy: SignPolicy) -> Self {
    self.sign = policy;
    self
  }

  /// Characters skipped anywhere in the number, such as `_` or `'`.
  pub fn ignore_chars(mut self, chars: &str) -> Self {
    self.ignored.extend(chars.chars());
    self
  }

  /// Skips dashes after the sign, as in `1234-5678`.
  pub fn ignore_dashes(mut self) -> Self {
    self.ignore_dashes = true;
    self
  }

  pub fn locale(mut self, locale: NumberLocale) -> Self {
    self.locale = Some(locale);
    self
  }

  pub fn rounding(mut self, mode: RoundingMode) -> Self {
    self.rounding = mode;
    self
  }

  pub fn min_inclusive(mut self, min: N) -> Self {
    self.min = Some(Bound::Inclusive(min));
    self
  }

  pub fn min_exclusive(mut self, min: N) -> Self {
    self.min = Some(Bound::Exclusive(min));
    self
  }

  pub fn max_inclusive(mut self, max: N) -> Self {
    self.max = Some(Bound::Inclusive(max));
    self
  }

  pub fn max_exclusive(mut self, max: N) -> Self {
    self.max = Some(Bound::Exclusive(max));
    self
  }

  pub fn build(self) -> std::result::Result<NumberParser<N>, BuildError> {
    let base = self.base?;
    let (decimal, grouping) = match self.locale {
      Some(locale) if locale.decimal == locale.grouping => {
        return Err(BuildError::SameSeparators(locale.decimal));
      },
      Some(locale) => (locale.decimal, Some(locale.grouping)),
      None => ('.', None),
    };

    let mut punctuation = vec!['+', '-', decimal];
    punctuation.extend(grouping);
    punctuation.extend(self.ignored.iter().copied());
    if let Some(&ch) = punctuation
      .iter()
      .find(|&&ch| base.digit_value(ch).is_some())
    {
      return Err(BuildError::SeparatorConflict { ch });
    }
    // Digits have no case variants among dashes or whitespace.
    if let Some(&ch) = base.digits().iter().find(|&&ch| self.text.rewrites(ch)) {
      return Err(BuildError::SeparatorConflict { ch });
    }

    let min = to_big(self.min.unwrap_or(Bound::Inclusive(N::MIN)));
    let max = to_big(self.max.unwrap_or(Bound::Inclusive(N::MAX)));
    let lowest = match &min {
      Bound::Inclusive(v) => v.clone(),
      Bound::Exclusive(v) => v + 1u32,
    };
    let highest = match &max {
      Bound::Inclusive(v) => v.clone(),
      Bound::Exclusive(v) => v - 1u32,
    };
    if lowest > highest {
      return Err(BuildError::NumericBounds {
        min: lowest,
        max: highest,
      });
    }

    let cap = lowest.magnitude().max(highest.magnitude()).clone();

    let punctuation: String = punctuation.into_iter().collect();
    let text = self
      .text
      .accept_subset(base.accepted())
      .accept_chars(&punctuation)
      .build()?;

    tracing::debug!(radix = base.radix(), %lowest, %highest, "built number parser");

    Ok(NumberParser {
      text,
      rules: Arc::new(NumericRules {
        base,
        sign: self.sign,
        decimal,
        grouping,
        ignored: self.ignored,
        ignore_dashes: self.ignore_dashes,
        rounding: self.rounding,
        min,
        max,
        cap,
      }),
      _target: PhantomData,
    })
  }
}

fn to_big<N: Integral>(bound: Bound<N>) -> Bound<BigInt> {
  match bound {
    Bound::Inclusive(v) => Bound::Inclusive(v.into()),
    Bound::Exclusive(v) => Bound::Exclusive(v.into()),
  }
}
