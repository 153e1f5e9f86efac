//! Frequently used subsets, built on first use.

use once_cell::sync::Lazy;

use crate::subset::Subset;

pub static ASCII_LOWERCASE: Lazy<Subset> =
  Lazy::new(|| Subset::builder().include_range(0x61, 0x7A).build());

pub static ASCII_UPPERCASE: Lazy<Subset> =
  Lazy::new(|| Subset::builder().include_range(0x41, 0x5A).build());

pub static ASCII_LETTERS: Lazy<Subset> = Lazy::new(|| ASCII_LOWERCASE.union(&ASCII_UPPERCASE));

pub static ASCII_DIGITS: Lazy<Subset> =
  Lazy::new(|| Subset::builder().include_range(0x30, 0x39).build());

pub static ASCII_ALPHANUMERIC: Lazy<Subset> = Lazy::new(|| ASCII_LETTERS.union(&ASCII_DIGITS));

pub static HEX_DIGITS: Lazy<Subset> = Lazy::new(|| {
  Subset::builder()
    .include_range(0x30, 0x39)
    .include_range(0x41, 0x46)
    .include_range(0x61, 0x66)
    .build()
});

/// Space through tilde.
pub static ASCII_PRINTABLE: Lazy<Subset> =
  Lazy::new(|| Subset::builder().include_range(0x20, 0x7E).build());
