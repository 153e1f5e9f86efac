//! Code point sets and character classification.
//!
//! - [`range`] - inclusive code point intervals
//! - [`subset`] - immutable, tiered sets of code points and their builder
//! - [`category`] - Unicode general categories as bit masks
//! - [`sets`] / [`blocks`] - ready-made subsets
//! - [`base`] - digit alphabets for arbitrary radixes
//! - [`chars`] - character classes used by text validation

pub mod base;
pub mod blocks;
pub mod category;
pub mod chars;
pub mod range;
pub mod sets;
pub mod subset;

pub use base::NumericBase;
pub use category::{
  Category,
  CategoryMask,
  Leaf,
  Union,
};
pub use range::{
  CodePointRange,
  MAX_CODE_POINT,
};
pub use subset::{
  Subset,
  SubsetBuilder,
};
