//! `rack` — multiset matching of a candidate word against a pool of tiles.
//!
//! The pool is the player's rack plus any letters contributed by position
//! pins. Matching is a single greedy left-to-right pass: each letter of the
//! word consumes a physical tile if one remains, otherwise a blank. Blanks
//! are fungible (a blank can stand in for any letter), so first-fit
//! consumption of physical tiles before blanks is exact and needs no
//! backtracking. If blanks ever gained per-letter restrictions, this pass
//! would no longer be sufficient and a backtracking or flow-based matcher
//! would be required.

use std::collections::BTreeMap;

use crate::tiles::{RackChar, ALPHABET_SIZE};

/// Which word positions were filled by a blank tile, and with what letter.
/// Keys are 0-based character indices into the spelled word. A `BTreeMap`
/// keeps the assignment deterministic for display and serialization.
pub type BlankAssignments = BTreeMap<usize, char>;

/// A multiset of available tiles: per-letter counts plus a blank count.
///
/// The pool is at most 30 tiles and `Copy`; [`TilePool::spell`] consumes its
/// receiver, so each candidate word works on a fresh copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TilePool {
    counts: [u8; ALPHABET_SIZE],
    blanks: u8,
}

impl TilePool {
    /// Build a pool from a tile string of lowercase letters and `?` blanks.
    ///
    /// The input is expected to be pre-sanitized (see `ConstraintSet::build`);
    /// any other character is ignored rather than miscounted.
    #[must_use]
    pub fn from_tiles(tiles: &str) -> Self {
        let mut pool = TilePool::default();
        for c in tiles.chars() {
            if c.is_tile_letter() {
                pool.counts[c.letter_index()] += 1;
            } else if c.is_wildcard() {
                pool.blanks += 1;
            }
        }
        pool
    }

    /// Total number of tiles (physical + blank) in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&n| n as usize).sum::<usize>() + self.blanks as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Try to spell `word` from this pool.
    ///
    /// Scans the word once, left to right: a physical tile of the needed
    /// letter is consumed if available, else a blank is consumed and the
    /// substitution recorded, else the word is not formable and the scan
    /// aborts. Runs in O(|word|) after O(|pool|) construction.
    ///
    /// Returns `Some(assignments)` when the word is formable (the map is
    /// empty if no blanks were needed), `None` when it is not. An empty pool
    /// can spell nothing but the empty word.
    #[must_use]
    pub fn spell(mut self, word: &str) -> Option<BlankAssignments> {
        let mut assignments = BlankAssignments::new();
        for (i, letter) in word.chars().enumerate() {
            let idx = letter.letter_index();
            if self.counts[idx] > 0 {
                self.counts[idx] -= 1;
            } else if self.blanks > 0 {
                self.blanks -= 1;
                assignments.insert(i, letter);
            } else {
                return None;
            }
        }
        Some(assignments)
    }
}
