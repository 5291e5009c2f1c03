//! `constraints` — parsing and normalization of user-supplied search filters.
//!
//! Raw filter values arrive as free text (query parameters or CLI flags) and
//! are never trusted: every field is case-folded and stripped down to the
//! characters it may legally contain, malformed position pins are dropped,
//! and the admissible word-length range is derived up front. Downstream code
//! (the predicate builder and the rack matcher) assumes a fully normalized
//! [`ConstraintSet`] and performs no further sanitization.

use log::debug;

use crate::tiles::{RackChar, MAX_WORD_LENGTH};
use crate::word_store::WordQuery;

/// Unsanitized filter values exactly as the caller supplied them.
///
/// `positions` and `letters` are paired by index (position N gets letter N);
/// the longer list is truncated to the shorter one, as in the request format
/// where `pos[]` and `letter[]` arrive as parallel arrays.
#[derive(Debug, Clone, Default)]
pub struct RawFilters {
    pub rack: String,
    pub starts_with: String,
    pub ends_with: String,
    pub contains: String,
    pub positions: Vec<usize>,
    pub letters: Vec<String>,
}

/// A single structural constraint: the word must have `letter` at the given
/// 1-based `position`. Words shorter than `position` never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPin {
    pub position: usize,
    pub letter: char,
}

/// A normalized, immutable search request.
///
/// Built once per request by [`ConstraintSet::build`] and discarded after the
/// response is produced. All fields are sanitized; the derived length bounds
/// and fixed letter pool are computed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    rack: String,
    starts_with: String,
    ends_with: String,
    contains: String,
    pins: Vec<PositionPin>,
    /// Letters contributed by pins, in pin order. Appended to the rack to
    /// form the effective tile pool for formability checks.
    fixed_letter_pool: String,
    min_length: usize,
    max_length: usize,
}

impl ConstraintSet {
    /// Sanitize raw filters into a normalized constraint set.
    ///
    /// Returns `None` when no field carries signal after sanitization (empty
    /// rack, no text filters, no valid pins) — the caller answers such a
    /// request with an empty result set rather than an error.
    ///
    /// Sanitization rules:
    /// - everything is case-folded to lowercase first;
    /// - `rack` keeps only `a-z` and `?`, capped at [`MAX_WORD_LENGTH`] tiles;
    /// - `starts_with`/`ends_with`/`contains` keep only `a-z`;
    /// - a pin survives only if its position is in `1..=15` and its letter
    ///   sanitizes to exactly one `a-z` character; at most 15 pins are kept.
    ///   Duplicate positions are all retained — two pins that disagree on the
    ///   same position form an unsatisfiable conjunction and simply yield
    ///   zero matches.
    #[must_use]
    pub fn build(raw: &RawFilters) -> Option<ConstraintSet> {
        let rack = sanitize_rack(&raw.rack);
        let starts_with = sanitize_letters(&raw.starts_with);
        let ends_with = sanitize_letters(&raw.ends_with);
        let contains = sanitize_letters(&raw.contains);
        let pins = sanitize_pins(&raw.positions, &raw.letters);

        if rack.is_empty()
            && starts_with.is_empty()
            && ends_with.is_empty()
            && contains.is_empty()
            && pins.is_empty()
        {
            debug!("no filter carries signal; treating request as an empty query");
            return None;
        }

        let fixed_letter_pool: String = pins.iter().map(|pin| pin.letter).collect();

        // With a rack, no word can use more tiles than rack + pinned letters
        // (blanks count as tiles). Without one, structural searches are only
        // capped by the board.
        let max_length = if rack.is_empty() {
            MAX_WORD_LENGTH
        } else {
            rack.len() + fixed_letter_pool.len()
        };

        let min_length = [starts_with.len(), ends_with.len(), contains.len()]
            .into_iter()
            .max()
            .unwrap_or(0)
            .max(usize::from(!pins.is_empty()));

        Some(ConstraintSet {
            rack,
            starts_with,
            ends_with,
            contains,
            pins,
            fixed_letter_pool,
            min_length,
            max_length,
        })
    }

    #[must_use]
    pub fn rack(&self) -> &str {
        &self.rack
    }

    #[must_use]
    pub fn pins(&self) -> &[PositionPin] {
        &self.pins
    }

    #[must_use]
    pub fn fixed_letter_pool(&self) -> &str {
        &self.fixed_letter_pool
    }

    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The effective tile pool for formability checks: rack tiles followed by
    /// the letters every matching word is already known to contain via pins.
    #[must_use]
    pub fn letter_pool(&self) -> String {
        let mut pool = String::with_capacity(self.rack.len() + self.fixed_letter_pool.len());
        pool.push_str(&self.rack);
        pool.push_str(&self.fixed_letter_pool);
        pool
    }

    /// Lower this constraint set into the store's typed predicate.
    #[must_use]
    pub fn to_word_query(&self) -> WordQuery {
        WordQuery {
            min_length: self.min_length,
            max_length: self.max_length,
            prefix: self.starts_with.clone(),
            suffix: self.ends_with.clone(),
            substring: self.contains.clone(),
            pins: self.pins.clone(),
        }
    }
}

/// Keep only lowercase `a-z`, case-folding first.
fn sanitize_letters(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(char::is_tile_letter)
        .collect()
}

/// Keep only `a-z` and `?`, capped at the rack size the board supports.
fn sanitize_rack(input: &str) -> String {
    let mut rack: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_tile_letter() || c.is_wildcard())
        .collect();
    if rack.len() > MAX_WORD_LENGTH {
        debug!(
            "rack has {} tiles; keeping the first {MAX_WORD_LENGTH}",
            rack.len()
        );
        rack.truncate(MAX_WORD_LENGTH);
    }
    rack
}

/// Pair positions with letters by index and keep only well-formed pins.
fn sanitize_pins(positions: &[usize], letters: &[String]) -> Vec<PositionPin> {
    let mut pins: Vec<PositionPin> = positions
        .iter()
        .zip(letters.iter())
        .filter_map(|(&position, letter)| {
            let letter = sanitize_letters(letter);
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if (1..=MAX_WORD_LENGTH).contains(&position) => {
                    Some(PositionPin { position, letter: c })
                }
                _ => {
                    debug!("dropping malformed pin ({position}, {letter:?})");
                    None
                }
            }
        })
        .collect();
    if pins.len() > MAX_WORD_LENGTH {
        debug!("keeping the first {MAX_WORD_LENGTH} of {} pins", pins.len());
        pins.truncate(MAX_WORD_LENGTH);
    }
    pins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rack_only(rack: &str) -> RawFilters {
        RawFilters {
            rack: rack.to_string(),
            ..RawFilters::default()
        }
    }

    #[test]
    fn test_all_empty_is_an_empty_query() {
        assert_eq!(ConstraintSet::build(&RawFilters::default()), None);
    }

    #[test]
    fn test_rack_is_sanitized_and_lowercased() {
        let set = ConstraintSet::build(&rack_only("C a-T?!")).unwrap();
        assert_eq!(set.rack(), "cat?");
        assert_eq!(set.max_length(), 4);
        assert_eq!(set.min_length(), 0);
    }

    #[test]
    fn test_rack_of_only_junk_is_empty_query() {
        assert_eq!(ConstraintSet::build(&rack_only("123 !!")), None);
    }

    #[test]
    fn test_rack_capped_at_board_size() {
        let set = ConstraintSet::build(&rack_only("abcdefghijklmnopqrst")).unwrap();
        assert_eq!(set.rack().len(), MAX_WORD_LENGTH);
        assert_eq!(set.max_length(), MAX_WORD_LENGTH);
    }

    #[test]
    fn test_text_filters_drive_min_length() {
        let raw = RawFilters {
            starts_with: "qu".to_string(),
            contains: "art".to_string(),
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(set.min_length(), 3);
        assert_eq!(set.max_length(), MAX_WORD_LENGTH);
    }

    #[test]
    fn test_pins_pair_by_index_and_drop_malformed() {
        let raw = RawFilters {
            positions: vec![1, 0, 99, 3, 4],
            letters: vec![
                "z".to_string(),
                "a".to_string(),  // position out of range
                "b".to_string(),  // position out of range
                "ab".to_string(), // two letters after sanitizing
                "Q!".to_string(), // sanitizes to exactly "q"
            ],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(
            set.pins(),
            &[
                PositionPin { position: 1, letter: 'z' },
                PositionPin { position: 4, letter: 'q' },
            ]
        );
        assert_eq!(set.fixed_letter_pool(), "zq");
        assert_eq!(set.min_length(), 1);
    }

    #[test]
    fn test_letters_list_truncated_to_positions_list() {
        let raw = RawFilters {
            positions: vec![2],
            letters: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(set.pins(), &[PositionPin { position: 2, letter: 'a' }]);
    }

    #[test]
    fn test_only_invalid_pins_is_empty_query() {
        let raw = RawFilters {
            positions: vec![0, 16],
            letters: vec!["a".to_string(), "b".to_string()],
            ..RawFilters::default()
        };
        assert_eq!(ConstraintSet::build(&raw), None);
    }

    #[test]
    fn test_duplicate_positions_are_both_kept() {
        let raw = RawFilters {
            positions: vec![2, 2],
            letters: vec!["a".to_string(), "b".to_string()],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(set.pins().len(), 2);
        assert_eq!(set.fixed_letter_pool(), "ab");
    }

    #[test]
    fn test_pool_combines_rack_and_pins() {
        let raw = RawFilters {
            rack: "ebra?".to_string(),
            positions: vec![1],
            letters: vec!["z".to_string()],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(set.letter_pool(), "ebra?z");
        // five rack tiles (the blank counts) plus one pinned letter
        assert_eq!(set.max_length(), 6);
    }

    #[test]
    fn test_pins_without_rack_leave_max_length_unbounded() {
        let raw = RawFilters {
            positions: vec![1],
            letters: vec!["z".to_string()],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        assert_eq!(set.min_length(), 1);
        assert_eq!(set.max_length(), MAX_WORD_LENGTH);
    }

    #[test]
    fn test_to_word_query_mirrors_the_set() {
        let raw = RawFilters {
            rack: "cat".to_string(),
            ends_with: "T".to_string(),
            positions: vec![1],
            letters: vec!["c".to_string()],
            ..RawFilters::default()
        };
        let set = ConstraintSet::build(&raw).unwrap();
        let query = set.to_word_query();
        assert_eq!(query.min_length, 1);
        assert_eq!(query.max_length, 4);
        assert_eq!(query.suffix, "t");
        assert_eq!(query.pins, set.pins().to_vec());
    }
}
