//! The query engine: constraint set in, grouped scored matches out.
//!
//! A search runs in two sequential stages. First the constraint set is
//! lowered to a structural predicate and evaluated against the store, which
//! yields candidates in contract order (length descending, word ascending).
//! Then, when the request carries a rack, each candidate is checked for
//! formability against the combined tile pool and dropped if it cannot be
//! spelled; survivors are grouped by length, preserving the candidate order
//! within each group. With no rack there is nothing to spell from, so every
//! structural match survives unchanged.
//!
//! The engine is stateless: each call is a pure function of the constraint
//! set and the (immutable) store contents. No result cap is imposed here —
//! pagination is a presentation concern.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::constraints::ConstraintSet;
use crate::rack::{BlankAssignments, TilePool};
use crate::word_store::{DictionaryEntry, WordStore};

/// One surviving word, annotated for the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub word: String,
    pub length: usize,
    pub score: u32,
    /// Word positions a blank tile had to fill, 0-based index → letter.
    /// Omitted from the serialized form when no blanks were used.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub blank_substitutions: BlankAssignments,
}

impl MatchResult {
    fn new(entry: &DictionaryEntry, blank_substitutions: BlankAssignments) -> Self {
        MatchResult {
            word: entry.word.clone(),
            length: entry.length,
            score: entry.score,
            blank_substitutions,
        }
    }
}

/// Matches keyed by word length. Within a length, matches stay in the
/// store's word-ascending order.
pub type GroupedResults = BTreeMap<usize, Vec<MatchResult>>;

/// Run one search against the store.
///
/// Candidates that pass the structural predicate are kept if the rack (plus
/// pinned letters) can spell them; a request without a rack skips the spell
/// check entirely, since pins already guarantee their letters structurally.
#[must_use]
pub fn search(store: &WordStore, set: &ConstraintSet) -> GroupedResults {
    let candidates = store.query(&set.to_word_query());
    let pool = TilePool::from_tiles(&set.letter_pool());
    let check_rack = !set.rack().is_empty();

    let mut grouped = GroupedResults::new();
    let mut kept = 0usize;
    for entry in candidates {
        let blank_substitutions = if check_rack {
            match pool.spell(&entry.word) {
                Some(assignments) => assignments,
                None => continue,
            }
        } else {
            BlankAssignments::new()
        };
        grouped
            .entry(entry.length)
            .or_default()
            .push(MatchResult::new(entry, blank_substitutions));
        kept += 1;
    }

    debug!("search kept {kept} words across {} length groups", grouped.len());
    grouped
}
