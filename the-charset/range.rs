//! Inclusive code point intervals.

use std::fmt;

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Panics when `cp` is not a Unicode code point.
///
/// Passing an out-of-range value to any builder is a caller bug, so we
/// abort immediately instead of threading an error through every call.
#[inline]
#[track_caller]
pub fn check_code_point(cp: u32) {
  assert!(
    cp <= MAX_CODE_POINT,
    "code point {cp:#X} is outside the Unicode range"
  );
}

/// A single inclusive `[from, to]` interval over code points.
///
/// Ranges order by `(from, to)`, which is also the order the subset store
/// keeps them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointRange {
  pub from: u32,
  pub to:   u32,
}

impl CodePointRange {
  /// Creates a range from two endpoints given in any order.
  #[track_caller]
  pub fn new(a: u32, b: u32) -> Self {
    check_code_point(a);
    check_code_point(b);
    if a <= b {
      Self { from: a, to: b }
    } else {
      Self { from: b, to: a }
    }
  }

  #[track_caller]
  pub fn single(cp: u32) -> Self {
    Self::new(cp, cp)
  }

  pub fn from_chars(a: char, b: char) -> Self {
    Self::new(a as u32, b as u32)
  }

  #[inline]
  pub fn contains(&self, cp: u32) -> bool {
    self.from <= cp && cp <= self.to
  }

  /// Number of code points covered. Never zero.
  #[inline]
  pub fn len(&self) -> u32 {
    self.to - self.from + 1
  }

  /// Iterate the code points of this range.
  pub fn code_points(&self) -> std::ops::RangeInclusive<u32> {
    self.from..=self.to
  }
}

impl fmt::Display for CodePointRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.from == self.to {
      write!(f, "U+{:04X}", self.from)
    } else {
      write!(f, "U+{:04X}..U+{:04X}", self.from, self.to)
    }
  }
}

impl From<char> for CodePointRange {
  fn from(ch: char) -> Self {
    Self::single(ch as u32)
  }
}

impl From<std::ops::RangeInclusive<char>> for CodePointRange {
  fn from(range: std::ops::RangeInclusive<char>) -> Self {
    Self::from_chars(*range.start(), *range.end())
  }
}
