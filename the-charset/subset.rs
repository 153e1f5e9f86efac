//! Immutable code point subsets.
//!
//! A [`Subset`] is an arbitrary set of code points stored as a union of
//! disjoint inclusive ranges. Ranges live in three tiers keyed by magnitude
//! so the common cases stay small:
//!
//! - **Latin-1** - both endpoints `< 0x100`, packed into a `u16`
//! - **BMP** - both endpoints `< 0x10000`, packed into a `u32`
//! - **Astral** - endpoints up to `0x10FFFF`, packed into a `u64`
//!
//! A packed cell stores `from` in its high half and `to` in its low half, so
//! the native unsigned ordering of the cells is the `(from, to)` ordering of
//! the ranges.
//!
//! # Building
//!
//! [`SubsetBuilder`] accepts ranges in any order and quantity, including
//! overlapping, adjacent and duplicated ones. Ranges crossing `0xFF` or
//! `0xFFFF` are split so no tier ever holds a straddling range. On
//! [`SubsetBuilder::build`] every tier is sorted once and merged in a single
//! linear pass. After the build, within each tier, ranges are sorted by
//! `from`, pairwise disjoint and never adjacent.
//!
//! ```ignore
//! use the_charset::subset::Subset;
//!
//! let digits = Subset::builder()
//!   .include_range(0x30, 0x39)
//!   .include_range(0x0660, 0x0669)
//!   .build();
//!
//! assert!(digits.contains_char('5'));
//! assert!(digits.contains(0x0665));
//! assert!(!digits.contains_char('a'));
//! ```
//!
//! # Membership
//!
//! [`Subset::contains`] picks the tier from the magnitude of the code point,
//! rejects anything outside the tier's `[first.from, last.to]` envelope and
//! binary searches the rest, so a lookup is `O(log n)` in the size of a single
//! tier.
//!
//! Built subsets are plain immutable values and may be shared across threads
//! freely. Builders are single-writer.

use std::{
  cmp::Ordering,
  fmt,
  hash::Hash,
  iter::FusedIterator,
  slice,
};

use crate::{
  category::{
    Category,
    Leaf,
    leaf_subset,
  },
  range::{
    CodePointRange,
    MAX_CODE_POINT,
    check_code_point,
  },
};

const LATIN_MAX: u32 = 0xFF;
const BMP_MAX: u32 = 0xFFFF;

/// A packed `(from, to)` pair.
trait Cell: Copy + Ord + Hash + fmt::Debug {
  /// Largest endpoint the cell can hold.
  const MAX: u32;

  fn pack(from: u32, to: u32) -> Self;
  fn start(self) -> u32;
  fn end(self) -> u32;

  #[inline]
  fn range(self) -> CodePointRange {
    CodePointRange {
      from: self.start(),
      to:   self.end(),
    }
  }
}

impl Cell for u16 {
  const MAX: u32 = LATIN_MAX;

  #[inline]
  fn pack(from: u32, to: u32) -> Self {
    ((from << 8) | to) as u16
  }

  #[inline]
  fn start(self) -> u32 {
    u32::from(self >> 8)
  }

  #[inline]
  fn end(self) -> u32 {
    u32::from(self & 0xFF)
  }
}

impl Cell for u32 {
  const MAX: u32 = BMP_MAX;

  #[inline]
  fn pack(from: u32, to: u32) -> Self {
    (from << 16) | to
  }

  #[inline]
  fn start(self) -> u32 {
    self >> 16
  }

  #[inline]
  fn end(self) -> u32 {
    self & 0xFFFF
  }
}

impl Cell for u64 {
  const MAX: u32 = MAX_CODE_POINT;

  #[inline]
  fn pack(from: u32, to: u32) -> Self {
    (u64::from(from) << 32) | u64::from(to)
  }

  #[inline]
  fn start(self) -> u32 {
    (self >> 32) as u32
  }

  #[inline]
  fn end(self) -> u32 {
    self as u32
  }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct Tier<C> {
  cells: Vec<C>,
}

impl<C: Cell> Tier<C> {
  #[inline]
  fn push(&mut self, from: u32, to: u32) {
    debug_assert!(from <= to && to <= C::MAX);
    self.cells.push(C::pack(from, to));
  }

  /// Sorts the cells and merges overlapping or adjacent neighbours.
  fn coalesce(&mut self) {
    let cells = &mut self.cells;
    cells.sort_unstable();
    if cells.len() < 2 {
      return;
    }

    let mut write = 0;
    for read in 1..cells.len() {
      let current = cells[write];
      let next = cells[read];
      // Endpoints are widened to u32 before the `+ 1`, so a range ending at
      // the tier maximum never wraps.
      if next.start() <= current.end() + 1 {
        if next.end() > current.end() {
          cells[write] = C::pack(current.start(), next.end());
        }
      } else {
        write += 1;
        cells[write] = next;
      }
    }
    cells.truncate(write + 1);
  }

  /// Removes every code point covered by `holes`. Both tiers must already be
  /// coalesced.
  fn subtract(&mut self, holes: &Self) {
    if self.cells.is_empty() || holes.cells.is_empty() {
      return;
    }

    let mut out = Vec::with_capacity(self.cells.len());
    let mut pending = holes.cells.iter().peekable();
    for &cell in &self.cells {
      let (mut from, to) = (cell.start(), cell.end());
      while pending.next_if(|hole| hole.end() < from).is_some() {}

      let mut survives = true;
      for hole in pending.clone() {
        if hole.start() > to {
          break;
        }
        if hole.start() > from {
          out.push(C::pack(from, hole.start() - 1));
        }
        if hole.end() >= to {
          survives = false;
          break;
        }
        from = hole.end() + 1;
      }
      if survives {
        out.push(C::pack(from, to));
      }
    }
    self.cells = out;
  }

  fn contains(&self, cp: u32) -> bool {
    let (Some(first), Some(last)) = (self.cells.first(), self.cells.last()) else {
      return false;
    };
    if cp < first.start() || cp > last.end() {
      return false;
    }

    self
      .cells
      .binary_search_by(|cell| {
        if cell.end() < cp {
          Ordering::Less
        } else if cell.start() > cp {
          Ordering::Greater
        } else {
          Ordering::Equal
        }
      })
      .is_ok()
  }

  fn covered(&self) -> u32 {
    self.cells.iter().map(|cell| cell.end() - cell.start() + 1).sum()
  }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct Tiers {
  latin:  Tier<u16>,
  bmp:    Tier<u32>,
  astral: Tier<u64>,
}

impl Tiers {
  /// Appends `[from, to]`, splitting it at the tier boundaries.
  fn add_range(&mut self, mut from: u32, to: u32) {
    if from <= LATIN_MAX {
      self.latin.push(from, to.min(LATIN_MAX));
      if to <= LATIN_MAX {
        return;
      }
      from = LATIN_MAX + 1;
    }
    if from <= BMP_MAX {
      self.bmp.push(from, to.min(BMP_MAX));
      if to <= BMP_MAX {
        return;
      }
      from = BMP_MAX + 1;
    }
    self.astral.push(from, to);
  }

  fn coalesce(&mut self) {
    self.latin.coalesce();
    self.bmp.coalesce();
    self.astral.coalesce();
  }

  fn subtract(&mut self, holes: &Self) {
    self.latin.subtract(&holes.latin);
    self.bmp.subtract(&holes.bmp);
    self.astral.subtract(&holes.astral);
  }

  fn is_empty(&self) -> bool {
    self.latin.cells.is_empty() && self.bmp.cells.is_empty() && self.astral.cells.is_empty()
  }
}

/// Mutable accumulator for a [`Subset`].
///
/// Every `include_*` and `exclude_*` method panics when handed a value
/// outside `0..=0x10FFFF`. Exclusions always win over inclusions, whatever
/// order the calls were made in.
#[derive(Clone, Default)]
pub struct SubsetBuilder {
  include: Tiers,
  exclude: Tiers,
}

impl SubsetBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  #[track_caller]
  pub fn include_code_point(&mut self, cp: u32) -> &mut Self {
    self.include_range(cp, cp)
  }

  pub fn include_char(&mut self, ch: char) -> &mut Self {
    self.include_code_point(ch as u32)
  }

  /// Includes `[from, to]`. The endpoints may be given in either order.
  #[track_caller]
  pub fn include_range(&mut self, from: u32, to: u32) -> &mut Self {
    let range = CodePointRange::new(from, to);
    self.include.add_range(range.from, range.to);
    self
  }

  pub fn include_chars(&mut self, chars: &str) -> &mut Self {
    for ch in chars.chars() {
      self.include_char(ch);
    }
    self
  }

  pub fn include_subset(&mut self, subset: &Subset) -> &mut Self {
    for range in subset.ranges() {
      self.include.add_range(range.from, range.to);
    }
    self
  }

  /// Includes every code point whose general category belongs to `category`.
  pub fn include_category(&mut self, category: &Category) -> &mut Self {
    for leaf in category.mask().leaves() {
      self.include_leaf(leaf);
    }
    self
  }

  pub fn include_leaf(&mut self, leaf: Leaf) -> &mut Self {
    self.include_subset(leaf_subset(leaf))
  }

  #[track_caller]
  pub fn exclude_code_point(&mut self, cp: u32) -> &mut Self {
    self.exclude_range(cp, cp)
  }

  pub fn exclude_char(&mut self, ch: char) -> &mut Self {
    self.exclude_code_point(ch as u32)
  }

  #[track_caller]
  pub fn exclude_range(&mut self, from: u32, to: u32) -> &mut Self {
    let range = CodePointRange::new(from, to);
    self.exclude.add_range(range.from, range.to);
    self
  }

  pub fn exclude_chars(&mut self, chars: &str) -> &mut Self {
    for ch in chars.chars() {
      self.exclude_char(ch);
    }
    self
  }

  pub fn exclude_subset(&mut self, subset: &Subset) -> &mut Self {
    for range in subset.ranges() {
      self.exclude.add_range(range.from, range.to);
    }
    self
  }

  pub fn exclude_category(&mut self, category: &Category) -> &mut Self {
    for leaf in category.mask().leaves() {
      self.exclude_leaf(leaf);
    }
    self
  }

  pub fn exclude_leaf(&mut self, leaf: Leaf) -> &mut Self {
    self.exclude_subset(leaf_subset(leaf))
  }

  /// Coalesces everything added so far into an immutable [`Subset`].
  ///
  /// The builder is left untouched and can keep growing.
  pub fn build(&self) -> Subset {
    let mut tiers = self.include.clone();
    tiers.coalesce();
    if !self.exclude.is_empty() {
      let mut holes = self.exclude.clone();
      holes.coalesce();
      tiers.subtract(&holes);
    }

    let subset = Subset { tiers };
    tracing::trace!(
      ranges = subset.range_count(),
      code_points = subset.covered_code_point_count(),
      "built code point subset"
    );
    subset
  }
}

/// An immutable set of code points.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Subset {
  tiers: Tiers,
}

impl Subset {
  pub fn builder() -> SubsetBuilder {
    SubsetBuilder::default()
  }

  /// The subset containing nothing.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn from_chars(chars: &str) -> Self {
    Self::builder().include_chars(chars).build()
  }

  /// Whether `cp` is a member. Values above `0x10FFFF` are never members.
  #[inline]
  pub fn contains(&self, cp: u32) -> bool {
    match cp {
      0..=LATIN_MAX => self.tiers.latin.contains(cp),
      0..=BMP_MAX => self.tiers.bmp.contains(cp),
      0..=MAX_CODE_POINT => self.tiers.astral.contains(cp),
      _ => false,
    }
  }

  #[inline]
  pub fn contains_char(&self, ch: char) -> bool {
    self.contains(ch as u32)
  }

  /// The stored ranges across all tiers in ascending order.
  ///
  /// The iterator is finite and can be cloned to restart it. A range that was
  /// split at a tier boundary shows up as two touching ranges.
  pub fn ranges(&self) -> Ranges<'_> {
    Ranges {
      latin:  self.tiers.latin.cells.iter(),
      bmp:    self.tiers.bmp.cells.iter(),
      astral: self.tiers.astral.cells.iter(),
    }
  }

  /// Iterate every member code point in ascending order.
  pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
    self.ranges().flat_map(|range| range.code_points())
  }

  pub fn range_count(&self) -> usize {
    self.tiers.latin.cells.len() + self.tiers.bmp.cells.len() + self.tiers.astral.cells.len()
  }

  pub fn covered_code_point_count(&self) -> u32 {
    self.tiers.latin.covered() + self.tiers.bmp.covered() + self.tiers.astral.covered()
  }

  pub fn is_empty(&self) -> bool {
    self.tiers.is_empty()
  }

  pub fn union(&self, other: &Subset) -> Subset {
    Self::builder()
      .include_subset(self)
      .include_subset(other)
      .build()
  }

  pub fn difference(&self, other: &Subset) -> Subset {
    Self::builder()
      .include_subset(self)
      .exclude_subset(other)
      .build()
  }
}

impl fmt::Debug for Subset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.ranges()).finish()
  }
}

impl FromIterator<CodePointRange> for Subset {
  fn from_iter<I: IntoIterator<Item = CodePointRange>>(iter: I) -> Self {
    let mut builder = SubsetBuilder::default();
    for range in iter {
      builder.include_range(range.from, range.to);
    }
    builder.build()
  }
}

/// Iterator returned by [`Subset::ranges`].
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
  latin:  slice::Iter<'a, u16>,
  bmp:    slice::Iter<'a, u32>,
  astral: slice::Iter<'a, u64>,
}

impl Iterator for Ranges<'_> {
  type Item = CodePointRange;

  fn next(&mut self) -> Option<CodePointRange> {
    if let Some(cell) = self.latin.next() {
      return Some(cell.range());
    }
    if let Some(cell) = self.bmp.next() {
      return Some(cell.range());
    }
    self.astral.next().map(|cell| cell.range())
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.len();
    (len, Some(len))
  }
}

impl ExactSizeIterator for Ranges<'_> {
  fn len(&self) -> usize {
    self.latin.len() + self.bmp.len() + self.astral.len()
  }
}

impl FusedIterator for Ranges<'_> {}

#[cfg(test)]
mod tests {
  use super::*;

  fn ranges_of(subset: &Subset) -> Vec<(u32, u32)> {
    subset.ranges().map(|r| (r.from, r.to)).collect()
  }

  /// Spreads arbitrary input across all three tiers and the boundaries
  /// between them.
  fn spread(seed: u32) -> u32 {
    let value = seed >> 2;
    match seed & 3 {
      0 => value & 0xFF,
      1 => value & 0xFFFF,
      2 => value % (MAX_CODE_POINT + 1),
      _ => {
        const EDGES: [u32; 3] = [0xF0, 0xFFF0, MAX_CODE_POINT - 0x20];
        EDGES[(value % 3) as usize] + (value >> 2) % 0x20
      },
    }
  }

  fn to_ranges(raw: &[(u32, u8)]) -> Vec<CodePointRange> {
    raw
      .iter()
      .map(|&(seed, len)| {
        let from = spread(seed);
        let to = (from + u32::from(len % 64)).min(MAX_CODE_POINT);
        CodePointRange::new(from, to)
      })
      .collect()
  }

  /// Reference merge over plain sorted ranges.
  fn reference_count(ranges: &[CodePointRange]) -> u32 {
    let mut sorted = ranges.to_vec();
    sorted.sort();
    let mut merged: Vec<CodePointRange> = Vec::new();
    for range in sorted {
      match merged.last_mut() {
        Some(last) if range.from <= last.to + 1 => last.to = last.to.max(range.to),
        _ => merged.push(range),
      }
    }
    merged.iter().map(CodePointRange::len).sum()
  }

  fn is_tier_boundary(prev_to: u32, next_from: u32) -> bool {
    (prev_to == LATIN_MAX && next_from == LATIN_MAX + 1)
      || (prev_to == BMP_MAX && next_from == BMP_MAX + 1)
  }

  quickcheck::quickcheck! {
      fn membership_matches_inserted_ranges(raw: Vec<(u32, u8)>, probes: Vec<u32>) -> bool {
          let ranges = to_ranges(&raw);
          let subset: Subset = ranges.iter().copied().collect();
          let endpoints_present = ranges
              .iter()
              .all(|r| subset.contains(r.from) && subset.contains(r.to));
          let probes_agree = probes.iter().map(|&p| spread(p)).all(|p| {
              subset.contains(p) == ranges.iter().any(|r| r.contains(p))
          });
          endpoints_present && probes_agree
      }

      fn merge_is_order_and_split_independent(raw: Vec<(u32, u8)>) -> bool {
          let ranges = to_ranges(&raw);
          let direct: Subset = ranges.iter().copied().collect();

          let mut builder = SubsetBuilder::new();
          for range in ranges.iter().rev() {
              let mid = range.from + (range.to - range.from) / 2;
              builder.include_range(range.from, mid);
              builder.include_range(mid, range.to);
              builder.include_range(range.to, range.from);
          }
          ranges_of(&direct) == ranges_of(&builder.build())
      }

      fn tiers_never_straddle(raw: Vec<(u32, u8)>) -> bool {
          let ranges = to_ranges(&raw);
          let subset: Subset = ranges.iter().copied().collect();
          let stored: Vec<CodePointRange> = subset.ranges().collect();

          let no_straddle = stored.iter().all(|r| {
              !(r.from <= LATIN_MAX && r.to > LATIN_MAX) && !(r.from <= BMP_MAX && r.to > BMP_MAX)
          });
          let disjoint = stored
              .windows(2)
              .all(|w| w[0].to + 1 < w[1].from || is_tier_boundary(w[0].to, w[1].from));
          no_straddle && disjoint && subset.covered_code_point_count() == reference_count(&ranges)
      }
  }

  #[test]
  fn ascii_and_arabic_indic_digits() {
    let subset = Subset::builder()
      .include_range(0x30, 0x39)
      .include_range(0x0660, 0x0669)
      .build();
    assert!(subset.contains_char('5'));
    assert!(subset.contains(0x0665));
    assert!(!subset.contains_char('a'));
    assert!(!subset.contains(0x0670));
    assert_eq!(subset.range_count(), 2);
    assert_eq!(subset.covered_code_point_count(), 20);
  }

  #[test]
  fn overlapping_and_adjacent_ranges_merge() {
    let subset = Subset::builder()
      .include_range(10, 20)
      .include_range(15, 30)
      .include_range(31, 40)
      .include_range(42, 42)
      .include_code_point(5)
      .build();
    assert_eq!(ranges_of(&subset), vec![(5, 5), (10, 40), (42, 42)]);
  }

  #[test]
  fn straddling_range_is_split_per_tier() {
    let subset = Subset::builder().include_range(0xF0, 0x10010).build();
    assert_eq!(ranges_of(&subset), vec![
      (0xF0, 0xFF),
      (0x100, 0xFFFF),
      (0x10000, 0x10010)
    ]);
    assert_eq!(subset.covered_code_point_count(), 0x10010 - 0xF0 + 1);
  }

  #[test]
  fn binary_search_boundaries() {
    let subset = Subset::builder()
      .include_range(0x400, 0x4FF)
      .include_range(0x600, 0x6FF)
      .include_range(0x900, 0x97F)
      .build();
    assert!(!subset.contains(0x3FF));
    assert!(!subset.contains(0x980));
    assert!(!subset.contains(0x500));
    assert!(!subset.contains(0x5FF));
    for range in subset.ranges() {
      assert!(subset.contains(range.from));
      assert!(subset.contains(range.to));
    }
  }

  #[test]
  fn tier_maximums_do_not_wrap() {
    let subset = Subset::builder()
      .include_code_point(0xFF)
      .include_code_point(0xFE)
      .include_code_point(0xFFFF)
      .include_code_point(MAX_CODE_POINT)
      .include_code_point(MAX_CODE_POINT - 1)
      .build();
    assert_eq!(ranges_of(&subset), vec![
      (0xFE, 0xFF),
      (0xFFFF, 0xFFFF),
      (MAX_CODE_POINT - 1, MAX_CODE_POINT)
    ]);
    assert!(!subset.contains(MAX_CODE_POINT + 1));
    assert!(!subset.contains(0x100));
  }

  #[test]
  fn exclusions_win_regardless_of_order() {
    let subset = Subset::builder()
      .exclude_chars("aeiou")
      .include_range('a' as u32, 'z' as u32)
      .exclude_range(0x1F600, 0x1F64F)
      .include_range(0x1F600, 0x1F610)
      .build();
    assert!(subset.contains_char('b'));
    assert!(!subset.contains_char('a'));
    assert!(!subset.contains_char('u'));
    assert!(subset.contains_char('z'));
    assert!(!subset.contains(0x1F600));
    assert_eq!(subset.covered_code_point_count(), 21);
  }

  #[test]
  fn exclude_splits_ranges() {
    let subset = Subset::builder()
      .include_range(0, 100)
      .exclude_range(10, 20)
      .exclude_range(50, 50)
      .exclude_range(90, 200)
      .build();
    assert_eq!(ranges_of(&subset), vec![(0, 9), (21, 49), (51, 89)]);
  }

  #[test]
  fn union_and_difference() {
    let lower = Subset::builder().include_range('a' as u32, 'z' as u32).build();
    let upper = Subset::builder().include_range('A' as u32, 'Z' as u32).build();
    let letters = lower.union(&upper);
    assert_eq!(letters.covered_code_point_count(), 52);
    assert_eq!(letters.difference(&upper), lower);
  }

  #[test]
  fn ranges_iterator_restarts() {
    let subset = Subset::from_chars("ace");
    let ranges = subset.ranges();
    assert_eq!(ranges.len(), 3);
    let first: Vec<_> = ranges.clone().collect();
    let second: Vec<_> = ranges.collect();
    assert_eq!(first, second);
    assert_eq!(subset.code_points().collect::<Vec<_>>(), vec![0x61, 0x63, 0x65]);
  }

  #[test]
  fn empty_subset() {
    let subset = Subset::empty();
    assert!(subset.is_empty());
    assert!(!subset.contains(0));
    assert_eq!(subset.ranges().count(), 0);
  }

  #[test]
  #[should_panic(expected = "outside the Unicode range")]
  fn builder_rejects_invalid_code_point() {
    Subset::builder().include_code_point(0x110000);
  }
}
