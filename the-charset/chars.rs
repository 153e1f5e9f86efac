use crate::category::Leaf;

/// Coarse character classes used to pick the most specific rejection
/// message and to drive whitespace and dash canonicalization.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CharClass {
  Control,
  Whitespace,
  Dash,
  Quote,
  Other,
}

pub fn classify_char(ch: char) -> CharClass {
  match ch {
    c if char_is_whitespace(c) => CharClass::Whitespace,
    c if char_is_control(c) => CharClass::Control,
    c if char_is_dash(c) => CharClass::Dash,
    c if char_is_quote(c) => CharClass::Quote,
    _ => CharClass::Other,
  }
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      // Covers tab, line endings, the Zs category and the line/paragraph
      // separators.
      c if c.is_whitespace() => true,

      '\u{180E}' | // Mongolian Vowel Separator
      '\u{200B}' | // Zero Width Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      _ => false,
    }
}

#[inline]
pub fn char_is_control(ch: char) -> bool {
  Leaf::of(ch) == Leaf::Control
}

/// Dash punctuation plus the minus signs that people type in place of a
/// hyphen.
#[inline]
pub fn char_is_dash(ch: char) -> bool {
  matches!(ch, '\u{2212}' | '\u{207B}' | '\u{208B}') || Leaf::of(ch) == Leaf::DashPunctuation
}

#[inline]
pub fn char_is_quote(ch: char) -> bool {
  matches!(
    ch,
    '"'
      | '\''
      | '`'
      | '\u{00AB}'
      | '\u{00BB}'
      | '\u{2018}'..='\u{201F}'
      | '\u{2039}'
      | '\u{203A}'
      | '\u{300C}'..='\u{300F}'
      | '\u{FF02}'
      | '\u{FF07}'
  )
}
