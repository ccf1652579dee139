//! Deterministic, per-session variant selection. Spec §4.6: "seeded by the
//! session id (linear-congruential advance per selection so variety is
//! consistent within a session)". No teacher analogue and no `rand`
//! dependency (DESIGN.md) — a plain LCG needs neither.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Knuth's MMIX constants, operating mod 2^64 via wrapping arithmetic.
const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

/// A per-session pseudo-random sequence. Constructing two instances from
/// the same session id and calling `pick` the same number of times yields
/// identical choices — the point is consistent-but-varied phrasing across
/// a single call, not unpredictability.
pub struct SeededSequence {
    state: u64,
}

impl SeededSequence {
    /// `turn_index` is folded into the seed (not just the session id) so
    /// that each turn in a call starts from a distinct point in the
    /// sequence — otherwise every turn would re-derive the same first pick.
    pub fn new(session_id: &str, turn_index: u32) -> Self {
        let mut hasher = DefaultHasher::new();
        session_id.hash(&mut hasher);
        turn_index.hash(&mut hasher);
        Self { state: hasher.finish() }
    }

    /// Advances the sequence and returns an index into `len` (0 if `len`
    /// is 0, in which case the caller has nothing to index into).
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state >> 33) as usize % len
    }

    /// Picks a variant, advancing the sequence. `None` if `variants` is
    /// empty.
    pub fn pick<'a, T>(&mut self, variants: &'a [T]) -> Option<&'a T> {
        if variants.is_empty() {
            return None;
        }
        let idx = self.next_index(variants.len());
        variants.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_session_and_turn_picks_the_same_sequence() {
        let variants = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let mut seq_a = SeededSequence::new("call-42", 0);
        let mut seq_b = SeededSequence::new("call-42", 0);
        let picks_a: Vec<_> = (0..5).map(|_| seq_a.pick(&variants).cloned()).collect();
        let picks_b: Vec<_> = (0..5).map(|_| seq_b.pick(&variants).cloned()).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn different_session_ids_usually_diverge() {
        let variants: Vec<u32> = (0..100).collect();
        let mut seq_a = SeededSequence::new("call-1", 0);
        let mut seq_b = SeededSequence::new("call-2", 0);
        let a: Vec<_> = (0..5).map(|_| *seq_a.pick(&variants).unwrap()).collect();
        let b: Vec<_> = (0..5).map(|_| *seq_b.pick(&variants).unwrap()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn different_turn_indices_usually_diverge() {
        let variants: Vec<u32> = (0..100).collect();
        let mut seq_a = SeededSequence::new("call-1", 0);
        let mut seq_b = SeededSequence::new("call-1", 1);
        let a: Vec<_> = (0..5).map(|_| *seq_a.pick(&variants).unwrap()).collect();
        let b: Vec<_> = (0..5).map(|_| *seq_b.pick(&variants).unwrap()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_variants_yields_none() {
        let variants: Vec<String> = Vec::new();
        let mut seq = SeededSequence::new("call-3", 0);
        assert!(seq.pick(&variants).is_none());
    }

    #[test]
    fn advances_on_each_call() {
        let variants: Vec<u32> = (0..1000).collect();
        let mut seq = SeededSequence::new("call-4", 0);
        let first = *seq.pick(&variants).unwrap();
        let second = *seq.pick(&variants).unwrap();
        assert_ne!(first, second);
    }
}
