//! Digit alphabets for positional number systems.
//!
//! A [`NumericBase`] is an ordered list of distinct code points; the position
//! of a code point is its digit value and the length of the list is the radix.
//! Case-insensitive bases also accept the other case of every letter digit.

use std::collections::HashMap;

use thiserror::Error;

use crate::subset::Subset;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BaseError {
  #[error("digit alphabet is empty")]
  Empty,
  #[error("digit alphabet needs at least two digits, got {0}")]
  TooSmall(usize),
  #[error("digits '{first}' and '{second}' are the same when case is ignored")]
  CaseCollision { first: char, second: char },
}

#[derive(Debug, Clone)]
pub struct NumericBase {
  digits:         Vec<char>,
  case_sensitive: bool,
  values:         HashMap<char, u32>,
  accepted:       Subset,
}

impl NumericBase {
  /// Builds a base from an ordered alphabet.
  ///
  /// Exact repeats are dropped, keeping the first occurrence.
  pub fn custom(alphabet: &str, case_sensitive: bool) -> Result<Self, BaseError> {
    let mut digits: Vec<char> = Vec::with_capacity(alphabet.len());
    for ch in alphabet.chars() {
      if !digits.contains(&ch) {
        digits.push(ch);
      }
    }

    match digits.len() {
      0 => return Err(BaseError::Empty),
      1 => return Err(BaseError::TooSmall(1)),
      _ => {},
    }

    let mut values = HashMap::with_capacity(digits.len() * 2);
    let mut accepted = Subset::builder();
    for (value, &digit) in digits.iter().enumerate() {
      let value = value as u32;
      for variant in case_variants(digit, case_sensitive) {
        if let Some(&previous) = values.get(&variant)
          && previous != value
        {
          return Err(BaseError::CaseCollision {
            first:  digits[previous as usize],
            second: digit,
          });
        }
        values.insert(variant, value);
        accepted.include_char(variant);
      }
    }

    Ok(Self {
      digits,
      case_sensitive,
      values,
      accepted: accepted.build(),
    })
  }

  pub fn binary() -> Self {
    Self::named("01", true)
  }

  pub fn octal() -> Self {
    Self::named("01234567", true)
  }

  pub fn decimal() -> Self {
    Self::named("0123456789", true)
  }

  /// Hexadecimal, accepting either case.
  pub fn hexadecimal() -> Self {
    Self::named("0123456789abcdef", false)
  }

  /// Digits then letters, accepting either case.
  pub fn base36() -> Self {
    Self::named("0123456789abcdefghijklmnopqrstuvwxyz", false)
  }

  /// Digits, uppercase then lowercase letters. Case matters.
  pub fn base62() -> Self {
    Self::named(
      "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
      true,
    )
  }

  fn named(alphabet: &str, case_sensitive: bool) -> Self {
    match Self::custom(alphabet, case_sensitive) {
      Ok(base) => base,
      Err(err) => unreachable!("built-in alphabet {alphabet:?} is invalid: {err}"),
    }
  }

  pub fn radix(&self) -> u32 {
    self.digits.len() as u32
  }

  pub fn is_case_sensitive(&self) -> bool {
    self.case_sensitive
  }

  /// The canonical digits, ordered by value.
  pub fn digits(&self) -> &[char] {
    &self.digits
  }

  #[inline]
  pub fn digit_value(&self, ch: char) -> Option<u32> {
    self.values.get(&ch).copied()
  }

  pub fn digit(&self, value: u32) -> Option<char> {
    self.digits.get(value as usize).copied()
  }

  /// Every code point that reads as a digit, including case variants.
  pub fn accepted(&self) -> &Subset {
    &self.accepted
  }
}

impl PartialEq for NumericBase {
  fn eq(&self, other: &Self) -> bool {
    self.digits == other.digits && self.case_sensitive == other.case_sensitive
  }
}

impl Eq for NumericBase {}

impl Default for NumericBase {
  fn default() -> Self {
    Self::decimal()
  }
}

/// `ch` itself, plus its other-case forms when case is ignored. Letters whose
/// case mapping expands to several characters keep only themselves.
fn case_variants(ch: char, case_sensitive: bool) -> Vec<char> {
  let mut variants = vec![ch];
  if case_sensitive {
    return variants;
  }
  for other in [single(ch.to_lowercase()), single(ch.to_uppercase())]
    .into_iter()
    .flatten()
  {
    if !variants.contains(&other) {
      variants.push(other);
    }
  }
  variants
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}
