//! Subsets for common Unicode blocks.
//!
//! Block boundaries come from `Blocks.txt`. Per-script subsets are produced
//! by the data generator and are not part of this table.

use once_cell::sync::Lazy;

use crate::subset::Subset;

const BLOCKS: &[(&str, u32, u32)] = &[
  ("Basic Latin", 0x0000, 0x007F),
  ("Latin-1 Supplement", 0x0080, 0x00FF),
  ("Latin Extended-A", 0x0100, 0x017F),
  ("Latin Extended-B", 0x0180, 0x024F),
  ("IPA Extensions", 0x0250, 0x02AF),
  ("Spacing Modifier Letters", 0x02B0, 0x02FF),
  ("Combining Diacritical Marks", 0x0300, 0x036F),
  ("Greek and Coptic", 0x0370, 0x03FF),
  ("Cyrillic", 0x0400, 0x04FF),
  ("Cyrillic Supplement", 0x0500, 0x052F),
  ("Armenian", 0x0530, 0x058F),
  ("Hebrew", 0x0590, 0x05FF),
  ("Arabic", 0x0600, 0x06FF),
  ("Syriac", 0x0700, 0x074F),
  ("Thaana", 0x0780, 0x07BF),
  ("Devanagari", 0x0900, 0x097F),
  ("Bengali", 0x0980, 0x09FF),
  ("Gurmukhi", 0x0A00, 0x0A7F),
  ("Gujarati", 0x0A80, 0x0AFF),
  ("Oriya", 0x0B00, 0x0B7F),
  ("Tamil", 0x0B80, 0x0BFF),
  ("Telugu", 0x0C00, 0x0C7F),
  ("Kannada", 0x0C80, 0x0CFF),
  ("Malayalam", 0x0D00, 0x0D7F),
  ("Sinhala", 0x0D80, 0x0DFF),
  ("Thai", 0x0E00, 0x0E7F),
  ("Lao", 0x0E80, 0x0EFF),
  ("Tibetan", 0x0F00, 0x0FFF),
  ("Myanmar", 0x1000, 0x109F),
  ("Georgian", 0x10A0, 0x10FF),
  ("Hangul Jamo", 0x1100, 0x11FF),
  ("Ethiopic", 0x1200, 0x137F),
  ("Cherokee", 0x13A0, 0x13FF),
  ("Khmer", 0x1780, 0x17FF),
  ("Mongolian", 0x1800, 0x18AF),
  ("Latin Extended Additional", 0x1E00, 0x1EFF),
  ("Greek Extended", 0x1F00, 0x1FFF),
  ("General Punctuation", 0x2000, 0x206F),
  ("Superscripts and Subscripts", 0x2070, 0x209F),
  ("Currency Symbols", 0x20A0, 0x20CF),
  ("Letterlike Symbols", 0x2100, 0x214F),
  ("Number Forms", 0x2150, 0x218F),
  ("Arrows", 0x2190, 0x21FF),
  ("Mathematical Operators", 0x2200, 0x22FF),
  ("Box Drawing", 0x2500, 0x257F),
  ("Geometric Shapes", 0x25A0, 0x25FF),
  ("Miscellaneous Symbols", 0x2600, 0x26FF),
  ("Dingbats", 0x2700, 0x27BF),
  ("CJK Symbols and Punctuation", 0x3000, 0x303F),
  ("Hiragana", 0x3040, 0x309F),
  ("Katakana", 0x30A0, 0x30FF),
  ("Bopomofo", 0x3100, 0x312F),
  ("Hangul Compatibility Jamo", 0x3130, 0x318F),
  ("CJK Unified Ideographs Extension A", 0x3400, 0x4DBF),
  ("CJK Unified Ideographs", 0x4E00, 0x9FFF),
  ("Hangul Syllables", 0xAC00, 0xD7AF),
  ("High Surrogates", 0xD800, 0xDB7F),
  ("Low Surrogates", 0xDC00, 0xDFFF),
  ("Private Use Area", 0xE000, 0xF8FF),
  ("CJK Compatibility Ideographs", 0xF900, 0xFAFF),
  ("Alphabetic Presentation Forms", 0xFB00, 0xFB4F),
  ("Arabic Presentation Forms-A", 0xFB50, 0xFDFF),
  ("Arabic Presentation Forms-B", 0xFE70, 0xFEFF),
  ("Halfwidth and Fullwidth Forms", 0xFF00, 0xFFEF),
  ("Specials", 0xFFF0, 0xFFFF),
  ("Linear B Syllabary", 0x10000, 0x1007F),
  ("Gothic", 0x10330, 0x1034F),
  ("Egyptian Hieroglyphs", 0x13000, 0x1342F),
  ("Musical Symbols", 0x1D100, 0x1D1FF),
  ("Mathematical Alphanumeric Symbols", 0x1D400, 0x1D7FF),
  ("Emoticons", 0x1F600, 0x1F64F),
  ("Supplemental Symbols and Pictographs", 0x1F900, 0x1F9FF),
  ("CJK Unified Ideographs Extension B", 0x20000, 0x2A6DF),
  ("Supplementary Private Use Area-A", 0xF0000, 0xFFFFF),
  ("Supplementary Private Use Area-B", 0x100000, 0x10FFFF),
];

static SUBSETS: Lazy<Vec<Subset>> = Lazy::new(|| {
  BLOCKS
    .iter()
    .map(|&(_, from, to)| Subset::builder().include_range(from, to).build())
    .collect()
});

/// Block names in code point order.
pub fn names() -> impl Iterator<Item = &'static str> {
  BLOCKS.iter().map(|&(name, ..)| name)
}

/// Looks a block up by name.
///
/// Matching ignores case, spaces, underscores and hyphens, and an optional
/// `Is` prefix, so `"IsBasicLatin"`, `"basic_latin"` and `"Basic Latin"` all
/// resolve to the same block.
pub fn block(name: &str) -> Option<&'static Subset> {
  let wanted = loose(name);
  find(&wanted).or_else(|| wanted.strip_prefix("is").and_then(find))
}

fn find(wanted: &str) -> Option<&'static Subset> {
  BLOCKS
    .iter()
    .position(|&(candidate, ..)| loose(candidate) == wanted)
    .map(|index| &SUBSETS[index])
}

fn loose(name: &str) -> String {
  name
    .chars()
    .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
    .flat_map(char::to_lowercase)
    .collect()
}
