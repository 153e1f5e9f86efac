//! Unicode general categories as 64-bit masks.
//!
//! Each of the 30 leaf categories owns one bit. The standard unions (`L`,
//! `LC`, `M`, `N`, `P`, `S`, `Z`, `C`) are declared as lists of leaves and
//! their masks are computed once when the catalogue is first touched.
//! Testing a code point against any mask, however many leaves it combines, is
//! a single classification followed by a shift and an AND.

use std::{
  fmt,
  ops::{
    BitOr,
    BitOrAssign,
  },
};

use once_cell::sync::Lazy;
use unicode_general_category::{
  GeneralCategory,
  get_general_category,
};

use self::Leaf::*;
use crate::{
  range::{
    MAX_CODE_POINT,
    check_code_point,
  },
  subset::{
    Subset,
    SubsetBuilder,
  },
};

/// A leaf general category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Leaf {
  UppercaseLetter,
  LowercaseLetter,
  TitlecaseLetter,
  ModifierLetter,
  OtherLetter,
  NonspacingMark,
  SpacingMark,
  EnclosingMark,
  DecimalNumber,
  LetterNumber,
  OtherNumber,
  ConnectorPunctuation,
  DashPunctuation,
  OpenPunctuation,
  ClosePunctuation,
  InitialPunctuation,
  FinalPunctuation,
  OtherPunctuation,
  MathSymbol,
  CurrencySymbol,
  ModifierSymbol,
  OtherSymbol,
  SpaceSeparator,
  LineSeparator,
  ParagraphSeparator,
  Control,
  Format,
  Surrogate,
  PrivateUse,
  Unassigned,
}

/// `(abbreviation, long name)` indexed by `Leaf as usize`.
const LEAVES: [(&str, &str); Leaf::COUNT] = [
  ("Lu", "Uppercase_Letter"),
  ("Ll", "Lowercase_Letter"),
  ("Lt", "Titlecase_Letter"),
  ("Lm", "Modifier_Letter"),
  ("Lo", "Other_Letter"),
  ("Mn", "Nonspacing_Mark"),
  ("Mc", "Spacing_Mark"),
  ("Me", "Enclosing_Mark"),
  ("Nd", "Decimal_Number"),
  ("Nl", "Letter_Number"),
  ("No", "Other_Number"),
  ("Pc", "Connector_Punctuation"),
  ("Pd", "Dash_Punctuation"),
  ("Ps", "Open_Punctuation"),
  ("Pe", "Close_Punctuation"),
  ("Pi", "Initial_Punctuation"),
  ("Pf", "Final_Punctuation"),
  ("Po", "Other_Punctuation"),
  ("Sm", "Math_Symbol"),
  ("Sc", "Currency_Symbol"),
  ("Sk", "Modifier_Symbol"),
  ("So", "Other_Symbol"),
  ("Zs", "Space_Separator"),
  ("Zl", "Line_Separator"),
  ("Zp", "Paragraph_Separator"),
  ("Cc", "Control"),
  ("Cf", "Format"),
  ("Cs", "Surrogate"),
  ("Co", "Private_Use"),
  ("Cn", "Unassigned"),
];

impl Leaf {
  pub const COUNT: usize = 30;

  pub const ALL: [Leaf; Leaf::COUNT] = [
    Leaf::UppercaseLetter,
    Leaf::LowercaseLetter,
    Leaf::TitlecaseLetter,
    Leaf::ModifierLetter,
    Leaf::OtherLetter,
    Leaf::NonspacingMark,
    Leaf::SpacingMark,
    Leaf::EnclosingMark,
    Leaf::DecimalNumber,
    Leaf::LetterNumber,
    Leaf::OtherNumber,
    Leaf::ConnectorPunctuation,
    Leaf::DashPunctuation,
    Leaf::OpenPunctuation,
    Leaf::ClosePunctuation,
    Leaf::InitialPunctuation,
    Leaf::FinalPunctuation,
    Leaf::OtherPunctuation,
    Leaf::MathSymbol,
    Leaf::CurrencySymbol,
    Leaf::ModifierSymbol,
    Leaf::OtherSymbol,
    Leaf::SpaceSeparator,
    Leaf::LineSeparator,
    Leaf::ParagraphSeparator,
    Leaf::Control,
    Leaf::Format,
    Leaf::Surrogate,
    Leaf::PrivateUse,
    Leaf::Unassigned,
  ];

  #[inline]
  pub const fn bit(self) -> u64 {
    1 << self as u8
  }

  pub const fn mask(self) -> CategoryMask {
    CategoryMask(self.bit())
  }

  pub fn abbr(self) -> &'static str {
    LEAVES[self as usize].0
  }

  pub fn name(self) -> &'static str {
    LEAVES[self as usize].1
  }

  /// The leaf category of `ch`.
  #[allow(unreachable_patterns)]
  pub fn of(ch: char) -> Leaf {
    match get_general_category(ch) {
      GeneralCategory::UppercaseLetter => Leaf::UppercaseLetter,
      GeneralCategory::LowercaseLetter => Leaf::LowercaseLetter,
      GeneralCategory::TitlecaseLetter => Leaf::TitlecaseLetter,
      GeneralCategory::ModifierLetter => Leaf::ModifierLetter,
      GeneralCategory::OtherLetter => Leaf::OtherLetter,
      GeneralCategory::NonspacingMark => Leaf::NonspacingMark,
      GeneralCategory::SpacingMark => Leaf::SpacingMark,
      GeneralCategory::EnclosingMark => Leaf::EnclosingMark,
      GeneralCategory::DecimalNumber => Leaf::DecimalNumber,
      GeneralCategory::LetterNumber => Leaf::LetterNumber,
      GeneralCategory::OtherNumber => Leaf::OtherNumber,
      GeneralCategory::ConnectorPunctuation => Leaf::ConnectorPunctuation,
      GeneralCategory::DashPunctuation => Leaf::DashPunctuation,
      GeneralCategory::OpenPunctuation => Leaf::OpenPunctuation,
      GeneralCategory::ClosePunctuation => Leaf::ClosePunctuation,
      GeneralCategory::InitialPunctuation => Leaf::InitialPunctuation,
      GeneralCategory::FinalPunctuation => Leaf::FinalPunctuation,
      GeneralCategory::OtherPunctuation => Leaf::OtherPunctuation,
      GeneralCategory::MathSymbol => Leaf::MathSymbol,
      GeneralCategory::CurrencySymbol => Leaf::CurrencySymbol,
      GeneralCategory::ModifierSymbol => Leaf::ModifierSymbol,
      GeneralCategory::OtherSymbol => Leaf::OtherSymbol,
      GeneralCategory::SpaceSeparator => Leaf::SpaceSeparator,
      GeneralCategory::LineSeparator => Leaf::LineSeparator,
      GeneralCategory::ParagraphSeparator => Leaf::ParagraphSeparator,
      GeneralCategory::Control => Leaf::Control,
      GeneralCategory::Format => Leaf::Format,
      GeneralCategory::Surrogate => Leaf::Surrogate,
      GeneralCategory::PrivateUse => Leaf::PrivateUse,
      GeneralCategory::Unassigned => Leaf::Unassigned,
      _ => Leaf::Unassigned,
    }
  }
}

/// Classifies any code point, including lone surrogates which have no `char`.
#[track_caller]
pub fn classify(cp: u32) -> Leaf {
  check_code_point(cp);
  match char::from_u32(cp) {
    Some(ch) => Leaf::of(ch),
    None => Leaf::Surrogate,
  }
}

/// A set of leaf categories.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategoryMask(u64);

impl CategoryMask {
  pub const EMPTY: CategoryMask = CategoryMask(0);

  pub const fn bits(self) -> u64 {
    self.0
  }

  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  #[inline]
  pub fn contains(self, cp: u32) -> bool {
    self.0 & classify(cp).bit() != 0
  }

  #[inline]
  pub fn contains_char(self, ch: char) -> bool {
    self.0 & Leaf::of(ch).bit() != 0
  }

  #[inline]
  pub const fn contains_leaf(self, leaf: Leaf) -> bool {
    self.0 & leaf.bit() != 0
  }

  pub fn leaves(self) -> impl Iterator<Item = Leaf> {
    Leaf::ALL
      .into_iter()
      .filter(move |leaf| self.contains_leaf(*leaf))
  }
}

impl BitOr for CategoryMask {
  type Output = CategoryMask;

  fn bitor(self, rhs: Self) -> Self {
    CategoryMask(self.0 | rhs.0)
  }
}

impl BitOrAssign for CategoryMask {
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}

impl From<Leaf> for CategoryMask {
  fn from(leaf: Leaf) -> Self {
    leaf.mask()
  }
}

impl fmt::Debug for CategoryMask {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.leaves().map(Leaf::abbr)).finish()
  }
}

/// The standard unions of leaf categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Union {
  Letter,
  CasedLetter,
  Mark,
  Number,
  Punctuation,
  Symbol,
  Separator,
  Other,
}

/// `(abbreviation, long name, leaves)` indexed by `Union as usize`.
const UNIONS: [(&str, &str, &[Leaf]); 8] = [
  ("L", "Letter", &[
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
  ]),
  ("LC", "Cased_Letter", &[
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
  ]),
  ("M", "Mark", &[NonspacingMark, SpacingMark, EnclosingMark]),
  ("N", "Number", &[DecimalNumber, LetterNumber, OtherNumber]),
  ("P", "Punctuation", &[
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
  ]),
  ("S", "Symbol", &[
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
  ]),
  ("Z", "Separator", &[
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
  ]),
  ("C", "Other", &[Control, Format, Surrogate, PrivateUse, Unassigned]),
];

/// A named entry of the catalogue: either a leaf or a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
  abbr: &'static str,
  name: &'static str,
  mask: CategoryMask,
}

impl Category {
  pub fn abbr(&self) -> &'static str {
    self.abbr
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn mask(&self) -> CategoryMask {
    self.mask
  }

  pub fn is_leaf(&self) -> bool {
    self.mask.0.count_ones() == 1
  }

  #[inline]
  pub fn contains(&self, cp: u32) -> bool {
    self.mask.contains(cp)
  }

  #[inline]
  pub fn contains_char(&self, ch: char) -> bool {
    self.mask.contains_char(ch)
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.abbr)
  }
}

/// Leaves first, in bit order, then the unions.
static CATALOGUE: Lazy<Vec<Category>> = Lazy::new(|| {
  let leaves = Leaf::ALL.iter().map(|&leaf| Category {
    abbr: leaf.abbr(),
    name: leaf.name(),
    mask: leaf.mask(),
  });
  let unions = UNIONS.iter().map(|&(abbr, name, members)| Category {
    abbr,
    name,
    mask: mask(members.iter().map(|&leaf| leaf.mask())),
  });
  let catalogue: Vec<Category> = leaves.chain(unions).collect();
  tracing::debug!(entries = catalogue.len(), "built general category catalogue");
  catalogue
});

pub fn catalogue() -> &'static [Category] {
  &CATALOGUE
}

pub fn leaf(leaf: Leaf) -> &'static Category {
  &CATALOGUE[leaf as usize]
}

pub fn union(union: Union) -> &'static Category {
  &CATALOGUE[Leaf::COUNT + union as usize]
}

/// Finds a category by abbreviation (`"Lu"`, `"lu"`) or long name
/// (`"Uppercase_Letter"`, `"uppercase letter"`).
///
/// Abbreviations are distinct ignoring ASCII case, so both forms match
/// loosely.
pub fn lookup(name: &str) -> Option<&'static Category> {
  let wanted = normalize_name(name);
  CATALOGUE.iter().find(|category| {
    category.abbr.eq_ignore_ascii_case(name) || normalize_name(category.name) == wanted
  })
}

fn normalize_name(name: &str) -> String {
  name
    .chars()
    .filter(|ch| !matches!(ch, '_' | ' ' | '-'))
    .flat_map(char::to_lowercase)
    .collect()
}

/// ORs any number of masks together.
pub fn mask<I, M>(categories: I) -> CategoryMask
where
  I: IntoIterator<Item = M>,
  M: Into<CategoryMask>,
{
  categories
    .into_iter()
    .fold(CategoryMask::EMPTY, |acc, m| acc | m.into())
}

impl From<&Category> for CategoryMask {
  fn from(category: &Category) -> Self {
    category.mask
  }
}

#[inline]
pub fn is_in_categories(cp: u32, mask: CategoryMask) -> bool {
  mask.contains(cp)
}

/// One subset per leaf, computed in a single sweep over every code point.
static LEAF_SUBSETS: Lazy<Vec<Subset>> = Lazy::new(|| {
  let mut builders = vec![SubsetBuilder::new(); Leaf::COUNT];
  let mut run_start = 0;
  let mut run_leaf = classify(0);
  for cp in 1..=MAX_CODE_POINT {
    let leaf = classify(cp);
    if leaf != run_leaf {
      builders[run_leaf as usize].include_range(run_start, cp - 1);
      run_start = cp;
      run_leaf = leaf;
    }
  }
  builders[run_leaf as usize].include_range(run_start, MAX_CODE_POINT);

  let subsets: Vec<Subset> = builders.iter().map(SubsetBuilder::build).collect();
  tracing::debug!(
    ranges = subsets.iter().map(Subset::range_count).sum::<usize>(),
    "built general category subsets"
  );
  subsets
});

/// Every code point of a single leaf category.
pub fn leaf_subset(leaf: Leaf) -> &'static Subset {
  &LEAF_SUBSETS[leaf as usize]
}

/// Expands a category into ranges.
pub fn category_subset(category: &Category) -> Subset {
  Subset::builder().include_category(category).build()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leaf_bits_are_distinct() {
    let all = mask(Leaf::ALL);
    assert_eq!(all.bits().count_ones() as usize, Leaf::COUNT);
    assert_eq!(all.leaves().count(), Leaf::COUNT);
  }

  #[test]
  fn classify_common_code_points() {
    assert_eq!(classify('A' as u32), Leaf::UppercaseLetter);
    assert_eq!(classify('a' as u32), Leaf::LowercaseLetter);
    assert_eq!(classify('5' as u32), Leaf::DecimalNumber);
    assert_eq!(classify('-' as u32), Leaf::DashPunctuation);
    assert_eq!(classify(' ' as u32), Leaf::SpaceSeparator);
    assert_eq!(classify(0x0A), Leaf::Control);
    assert_eq!(classify(0xD800), Leaf::Surrogate);
    assert_eq!(classify(0xE000), Leaf::PrivateUse);
    assert_eq!(classify(0x0665), Leaf::DecimalNumber);
  }

  #[test]
  fn unions_contain_every_member_leaf() {
    let representatives = [
      (UppercaseLetter, 'Q'),
      (LowercaseLetter, 'q'),
      (TitlecaseLetter, '\u{01C5}'),
      (ModifierLetter, '\u{02B0}'),
      (OtherLetter, '\u{05D0}'),
      (NonspacingMark, '\u{0301}'),
      (SpacingMark, '\u{0903}'),
      (EnclosingMark, '\u{20DD}'),
      (DecimalNumber, '7'),
      (LetterNumber, '\u{2160}'),
      (OtherNumber, '\u{00B2}'),
      (ConnectorPunctuation, '_'),
      (DashPunctuation, '-'),
      (OpenPunctuation, '('),
      (ClosePunctuation, ')'),
      (InitialPunctuation, '\u{00AB}'),
      (FinalPunctuation, '\u{00BB}'),
      (OtherPunctuation, '!'),
      (MathSymbol, '+'),
      (CurrencySymbol, '$'),
      (ModifierSymbol, '^'),
      (OtherSymbol, '\u{00A9}'),
      (SpaceSeparator, ' '),
      (LineSeparator, '\u{2028}'),
      (ParagraphSeparator, '\u{2029}'),
      (Control, '\u{0007}'),
      (Format, '\u{200D}'),
      (PrivateUse, '\u{E000}'),
    ];
    for &(leaf, ch) in &representatives {
      assert_eq!(Leaf::of(ch), leaf, "{ch:?}");
    }

    // Surrogates have no `char`, so they are checked by code point.
    assert_eq!(classify(0xD800), Surrogate);
    assert!(union(Union::Other).contains(0xD800));
    assert!(!union(Union::Letter).contains(0xD800));
    assert!(!union(Union::Symbol).contains(0xDFFF));

    for (index, &(abbr, _, members)) in UNIONS.iter().enumerate() {
      let category = &catalogue()[Leaf::COUNT + index];
      assert_eq!(category.abbr(), abbr);
      for &(leaf, ch) in &representatives {
        assert_eq!(
          category.contains_char(ch),
          members.contains(&leaf),
          "{abbr} vs {ch:?}"
        );
      }
    }
  }

  #[test]
  fn composite_mask_membership() {
    let alnum = mask([union(Union::Letter), leaf(DecimalNumber)]);
    assert!(is_in_categories('x' as u32, alnum));
    assert!(is_in_categories('\u{0665}' as u32, alnum));
    assert!(!is_in_categories('.' as u32, alnum));
    assert!(!is_in_categories(' ' as u32, alnum));
  }

  #[test]
  fn lookup_by_abbreviation_or_name() {
    assert_eq!(lookup("Lu").map(Category::abbr), Some("Lu"));
    assert_eq!(lookup("L").map(Category::abbr), Some("L"));
    assert_eq!(lookup("decimal number").map(Category::abbr), Some("Nd"));
    assert_eq!(lookup("Cased_Letter").map(Category::abbr), Some("LC"));
    assert_eq!(lookup("lu").map(Category::abbr), Some("Lu"));
    assert_eq!(lookup("LL").map(Category::abbr), Some("Ll"));
    assert_eq!(lookup("lc").map(Category::abbr), Some("LC"));
    assert_eq!(lookup("cs").map(Category::abbr), Some("Cs"));
    assert!(lookup("Xx").is_none());
    assert!(union(Union::Letter).contains_char('é'));
    assert!(!union(Union::Letter).is_leaf());
    assert!(leaf(Control).is_leaf());
  }

  #[test]
  fn leaf_subsets_agree_with_classifier() {
    let digits = leaf_subset(DecimalNumber);
    assert!(digits.contains('0' as u32));
    assert!(digits.contains(0x0669));
    assert!(!digits.contains('a' as u32));
    for range in digits.ranges() {
      assert_eq!(classify(range.from), DecimalNumber);
      assert_eq!(classify(range.to), DecimalNumber);
    }

    let total: u32 = Leaf::ALL
      .iter()
      .map(|&leaf| leaf_subset(leaf).covered_code_point_count())
      .sum();
    assert_eq!(total, MAX_CODE_POINT + 1);
  }

  #[test]
  fn category_subset_expands_union() {
    let separators = category_subset(union(Union::Separator));
    assert!(separators.contains(' ' as u32));
    assert!(separators.contains(0x2028));
    assert!(separators.contains(0x3000));
    assert!(!separators.contains('\t' as u32));
  }
}
