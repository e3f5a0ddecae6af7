//! Per-search memo keyed by board signature.
//!
//! Entries carry the remaining depth they were searched with and whether the
//! stored value is exact or only a bound from an alpha-beta cutoff. The table
//! is cleared at the start and end of every top-level search, and its size at
//! the end of a search is the "nodes explored" metric.

use std::collections::HashMap;

/// Remaining depth recorded for finished games. Their value never depends on
/// how deep the search was going to look.
pub const TERMINAL_DEPTH: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least the stored value.
    Lower,
    /// True value is at most the stored value.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoEntry {
    pub value: f64,
    pub bound: Bound,
    pub remaining_depth: u8,
    /// Side to move when the entry was stored. Signatures do not encode the
    /// turn, so an entry only applies to states with the same mover.
    pub max_turn: bool,
}

impl MemoEntry {
    #[inline]
    pub const fn exact(value: f64, remaining_depth: u8, max_turn: bool) -> Self {
        Self {
            value,
            bound: Bound::Exact,
            remaining_depth,
            max_turn,
        }
    }

    /// Value usable for a node searched with exactly `remaining_depth` plies
    /// left inside the window `(alpha, beta)`, if this entry is decisive
    /// there.
    pub fn usable_value(
        &self,
        remaining_depth: u8,
        max_turn: bool,
        alpha: f64,
        beta: f64,
    ) -> Option<f64> {
        let depth_matches =
            self.remaining_depth == remaining_depth || self.remaining_depth == TERMINAL_DEPTH;
        if self.max_turn != max_turn || !depth_matches {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.value),
            Bound::Lower if self.value >= beta => Some(self.value),
            Bound::Upper if self.value <= alpha => Some(self.value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, MemoEntry>,
    stats: MemoStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = MemoStats::default();
    }

    /// Distinct signatures stored since the last clear.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn probe(&mut self, signature: &str) -> Option<MemoEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(signature).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Store `entry`, keeping an existing entry searched deeper.
    pub fn store(&mut self, signature: &str, entry: MemoEntry) {
        self.stats.stores += 1;
        match self.entries.get_mut(signature) {
            Some(existing) => {
                if entry.remaining_depth >= existing.remaining_depth {
                    *existing = entry;
                }
            }
            None => {
                self.entries.insert(signature.to_owned(), entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, MemoEntry, TranspositionTable, TERMINAL_DEPTH};

    #[test]
    fn store_and_probe() {
        let mut tt = TranspositionTable::new();
        assert!(tt.probe("a").is_none());

        tt.store("a", MemoEntry::exact(0.25, 2, true));
        let got = tt.probe("a").expect("entry should exist");
        assert_eq!(got.value, 0.25);
        assert_eq!(got.bound, Bound::Exact);
        assert_eq!(tt.len(), 1);

        let stats = tt.stats();
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.stores, 1);
    }

    #[test]
    fn depth_preferred_replacement() {
        let mut tt = TranspositionTable::new();
        tt.store("k", MemoEntry::exact(0.5, 3, false));
        tt.store(
            "k",
            MemoEntry {
                value: -0.5,
                bound: Bound::Upper,
                remaining_depth: 1,
                max_turn: false,
            },
        );
        assert_eq!(tt.probe("k").expect("exists").value, 0.5);

        tt.store(
            "k",
            MemoEntry {
                value: 0.125,
                bound: Bound::Lower,
                remaining_depth: 4,
                max_turn: false,
            },
        );
        let got = tt.probe("k").expect("exists");
        assert_eq!(got.remaining_depth, 4);
        assert_eq!(got.bound, Bound::Lower);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn bounds_are_only_used_when_decisive() {
        let lower = MemoEntry {
            value: 0.25,
            bound: Bound::Lower,
            remaining_depth: 2,
            max_turn: true,
        };
        assert_eq!(lower.usable_value(2, true, -1.0, 0.2), Some(0.25));
        assert_eq!(lower.usable_value(2, true, -1.0, 0.5), None);
        // Searched to a different horizon, or stored for the other mover.
        assert_eq!(lower.usable_value(3, true, -1.0, 0.2), None);
        assert_eq!(lower.usable_value(1, true, -1.0, 0.2), None);
        assert_eq!(lower.usable_value(2, false, -1.0, 0.2), None);

        let upper = MemoEntry {
            bound: Bound::Upper,
            ..lower
        };
        assert_eq!(upper.usable_value(2, true, 0.3, 1.0), Some(0.25));
        assert_eq!(upper.usable_value(2, true, 0.0, 1.0), None);

        let exact = MemoEntry::exact(-0.5, 0, false);
        assert_eq!(exact.usable_value(0, false, 0.0, 0.1), Some(-0.5));

        let finished = MemoEntry::exact(1.0, TERMINAL_DEPTH, true);
        assert_eq!(finished.usable_value(3, true, -1.0, 1.0), Some(1.0));
    }

    #[test]
    fn clear_resets_entries_and_stats() {
        let mut tt = TranspositionTable::new();
        tt.store("x", MemoEntry::exact(1.0, 0, true));
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.stats().stores, 0);
    }
}
