//! Parse untrusted text into validated values.
//!
//! A [`TypeParser`] is configured once through [`TypeParserBuilder`] and then
//! shared freely; every call either returns the normalized value or a
//! [`ParseError`] that names exactly one failed rule. Integers go through
//! [`NumberParser`], which layers radix, sign, locale, rounding and bounds
//! on top of the same text pipeline.
//!
//! ```
//! use the_typeparser::{TypeParser, WhitespacePolicy};
//!
//! let words = TypeParser::builder()
//!   .accept_range('a' as u32, 'z' as u32)
//!   .whitespace(WhitespacePolicy::Normalize)
//!   .build()
//!   .unwrap();
//! assert_eq!(words.parse("  hello   world  ").unwrap(), "hello world");
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod number;
pub mod parser;
pub mod policy;

pub use config::{
  ConfigError,
  ParserConfig,
};
pub use error::{
  BuildError,
  ParseError,
  PublicMessage,
  Result,
};
pub use message::{
  DefaultMessages,
  MessageArg,
  MessageSource,
  MessageTable,
  ParserMessage,
};
pub use number::{
  Integral,
  NumberLocale,
  NumberParser,
  NumberParserBuilder,
  RoundingMode,
  SignPolicy,
};
pub use parser::{
  TypeParser,
  TypeParserBuilder,
};
pub use policy::{
  BlankPolicy,
  CaseFolding,
  NormalizationForm,
  NullPolicy,
  WhitespacePolicy,
};
