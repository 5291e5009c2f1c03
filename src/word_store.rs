//! `word_store` — the preprocessed dictionary and its predicate queries.
//!
//! The store is populated once, at first use, from a plain wordlist (one word
//! per line) and is immutable afterwards. Each accepted entry carries its
//! length and tile score, both recomputed at load time; nothing from the
//! source file is trusted beyond the word itself. Entries are held pre-sorted
//! in the ordering the query contract promises (length descending, then word
//! ascending), so a predicate scan yields candidates in contract order with
//! no per-query sort.
//!
//! Loading is idempotent: duplicate lines collapse to the first occurrence,
//! and re-parsing the same source produces an identical store. The shared
//! process-wide instance is created through a `OnceCell`, so concurrent first
//! requests cannot race to populate it twice; if the load fails, the cell
//! stays empty and a later request may retry.

use std::path::Path;

use log::{debug, info};
use once_cell::sync::OnceCell;

use crate::constraints::PositionPin;
use crate::errors::FinderError;
use crate::tiles::{word_score, RackChar};

/// One dictionary word with its precomputed length and tile score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub length: usize,
    pub score: u32,
}

/// A structural predicate over the store, built from a `ConstraintSet`.
///
/// This is a list of typed clauses rather than an assembled query string —
/// each field is applied as one AND term. Empty text fields are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordQuery {
    pub min_length: usize,
    pub max_length: usize,
    pub prefix: String,
    pub suffix: String,
    pub substring: String,
    pub pins: Vec<PositionPin>,
}

impl WordQuery {
    /// Whether `entry` satisfies every clause of this predicate.
    ///
    /// Pins compare the byte at the 1-based pinned position; entries shorter
    /// than the position fail the clause. Pinned letters are `a-z`, and store
    /// words are ASCII by construction, so byte indexing is sound.
    #[must_use]
    pub fn admits(&self, entry: &DictionaryEntry) -> bool {
        if entry.length < self.min_length || entry.length > self.max_length {
            return false;
        }
        if !self.prefix.is_empty() && !entry.word.starts_with(&self.prefix) {
            return false;
        }
        if !self.suffix.is_empty() && !entry.word.ends_with(&self.suffix) {
            return false;
        }
        if !self.substring.is_empty() && !entry.word.contains(&self.substring) {
            return false;
        }
        self.pins.iter().all(|pin| {
            entry.word.as_bytes().get(pin.position - 1) == Some(&(pin.letter as u8))
        })
    }
}

/// The loaded, immutable dictionary.
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    /// All entries, sorted by length descending then word ascending.
    entries: Vec<DictionaryEntry>,
}

static SHARED_STORE: OnceCell<WordStore> = OnceCell::new();

impl WordStore {
    /// Parse a raw wordlist from an in-memory string.
    ///
    /// Each line is trimmed and lowercased; lines that are empty or contain
    /// anything outside `a-z` are skipped. Length and score are computed
    /// here. Duplicates keep the first occurrence, so loading the same
    /// source twice yields the same store as loading it once.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordStore {
        let mut seen = std::collections::HashSet::new();
        let mut entries: Vec<DictionaryEntry> = contents
            .lines()
            .filter_map(|raw_line| {
                let word = raw_line.trim().to_lowercase();
                if word.is_empty() || !word.chars().all(|c| c.is_tile_letter()) {
                    None
                } else if seen.insert(word.clone()) {
                    let length = word.len();
                    let score = word_score(&word);
                    Some(DictionaryEntry { word, length, score })
                } else {
                    // duplicate line; keeping the first occurrence is a no-op
                    None
                }
            })
            .collect();

        // Pre-sort into the query contract's order: longest words first,
        // alphabetical within a length.
        entries.sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.word.cmp(&b.word)));

        WordStore { entries }
    }

    /// Read a wordlist file and parse it.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the file cannot be read; `WordlistEmpty` if it
    /// parses to zero usable entries (such a store would answer every query
    /// with nothing, which is indistinguishable from misconfiguration).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<WordStore, FinderError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| FinderError::StoreUnavailable {
            path: path_ref.display().to_string(),
            source: e,
        })?;

        let store = Self::parse_from_str(&data);
        if store.is_empty() {
            return Err(FinderError::WordlistEmpty {
                path: path_ref.display().to_string(),
            });
        }
        info!("loaded {} dictionary entries from '{}'", store.count(), path_ref.display());
        Ok(store)
    }

    /// The process-wide store, loaded from `path` on first use.
    ///
    /// The `OnceCell` serializes concurrent first calls: exactly one caller
    /// performs the load, the rest block and then share the result. A failed
    /// load leaves the cell empty, so a later request retries.
    ///
    /// # Errors
    ///
    /// Propagates [`WordStore::load_from_path`] failures.
    pub fn shared<P: AsRef<Path>>(path: P) -> Result<&'static WordStore, FinderError> {
        SHARED_STORE.get_or_try_init(|| Self::load_from_path(path))
    }

    /// Total number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries satisfying `query`, in contract order: length descending,
    /// then word ascending.
    #[must_use]
    pub fn query(&self, query: &WordQuery) -> Vec<&DictionaryEntry> {
        let matches: Vec<&DictionaryEntry> =
            self.entries.iter().filter(|e| query.admits(e)).collect();
        debug!("predicate admitted {} of {} entries", matches.len(), self.entries.len());
        matches
    }
}
