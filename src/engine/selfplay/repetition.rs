use std::collections::HashMap;
use crate::utils::Bitboard;

/// Occurrences of each position within one game, keyed by transposition key.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    counts: HashMap<Bitboard, u32>,
}

impl RepetitionTable {
    pub fn new() -> RepetitionTable {
        RepetitionTable::default()
    }

    /// Counts one more occurrence of `key` and returns the new total.
    pub fn increment(&mut self, key: Bitboard) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, key: Bitboard) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
