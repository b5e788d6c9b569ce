//! Bounded top-k candidate slate.
//!
//! The ranking scan needs a fixed-size working set ordered by descending
//! score, with a conditional admission check in the middle of insertion: a
//! candidate that turns out to alias an already-ranked cross-listing must be
//! rejected without displacing anything. A generic priority queue cannot
//! express that, so the slate is an explicit fixed-capacity ordered list
//! with insertion-sort placement.

use crate::types::RankEntry;

/// Fixed-capacity list of `(subject id, score)` slots in descending score
/// order. Unfilled slots hold an empty id and score 0.
pub struct Slate {
    entries: Vec<RankEntry>,
}

impl Slate {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![
                RankEntry {
                    subject_id: String::new(),
                    score: 0.0,
                };
                capacity
            ],
        }
    }

    /// Try to admit a candidate.
    ///
    /// Scans slots left to right and stops at the first slot whose score is
    /// <= `score`. Before displacing, `conflict` is consulted with the id
    /// occupying that slot; returning true rejects the candidate outright
    /// (nothing moves, and the candidate gets no second chance further down
    /// the slate). Otherwise the candidate is inserted there and the last
    /// slot falls off.
    ///
    /// Returns whether the candidate was admitted.
    pub fn admit<F>(&mut self, candidate: &str, score: f64, conflict: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        for position in 0..self.entries.len() {
            if self.entries[position].score <= score {
                let occupant = &self.entries[position].subject_id;
                if !occupant.is_empty() && conflict(occupant) {
                    return false;
                }

                self.entries.insert(
                    position,
                    RankEntry {
                        subject_id: candidate.to_string(),
                        score,
                    },
                );
                self.entries.pop();
                return true;
            }
        }
        false
    }

    /// Finish the scan: entries with positive scores, still descending.
    /// Unfilled and zero-score slots are dropped.
    pub fn into_ranked(self) -> Vec<RankEntry> {
        self.entries
            .into_iter()
            .filter(|entry| entry.score > 0.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_conflict(_: &str) -> bool {
        false
    }

    #[test]
    fn test_keeps_descending_order() {
        let mut slate = Slate::new(3);
        assert!(slate.admit("a", 1.0, no_conflict));
        assert!(slate.admit("b", 3.0, no_conflict));
        assert!(slate.admit("c", 2.0, no_conflict));

        let ranked = slate.into_ranked();
        let ids: Vec<_> = ranked.iter().map(|e| e.subject_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut slate = Slate::new(2);
        slate.admit("a", 1.0, no_conflict);
        slate.admit("b", 2.0, no_conflict);
        slate.admit("c", 3.0, no_conflict);

        let ids: Vec<_> = slate
            .into_ranked()
            .into_iter()
            .map(|e| e.subject_id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_low_scores_fall_off_the_end() {
        let mut slate = Slate::new(2);
        slate.admit("a", 3.0, no_conflict);
        slate.admit("b", 2.0, no_conflict);
        assert!(!slate.admit("c", 1.0, no_conflict));
    }

    #[test]
    fn test_conflict_rejects_without_displacing() {
        let mut slate = Slate::new(3);
        slate.admit("6.036", 5.0, no_conflict);
        slate.admit("9.660", 2.0, no_conflict);

        // "6.862" would land on top of "6.036", but the conflict check says no
        let admitted = slate.admit("6.862", 6.0, |occupant| occupant == "6.036");
        assert!(!admitted);

        let ids: Vec<_> = slate
            .into_ranked()
            .into_iter()
            .map(|e| e.subject_id)
            .collect();
        assert_eq!(ids, vec!["6.036", "9.660"]);
    }

    #[test]
    fn test_conflict_not_consulted_for_empty_slots() {
        let mut slate = Slate::new(2);
        // Panicking predicate proves it never runs against an empty slot
        assert!(slate.admit("a", 1.0, |_| panic!("checked an empty slot")));
    }

    #[test]
    fn test_zero_score_entries_are_dropped() {
        let mut slate = Slate::new(3);
        slate.admit("a", 0.0, no_conflict);
        slate.admit("b", 1.5, no_conflict);

        let ranked = slate.into_ranked();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].subject_id, "b");
    }

    #[test]
    fn test_empty_slate() {
        let slate = Slate::new(10);
        assert!(slate.into_ranked().is_empty());
    }
}
