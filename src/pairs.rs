//! Pairwise record store adapter.
//!
//! Bridges the logical turn-pair view and the physical flat record layout:
//! pair `i` occupies flat positions `2i` and `2i+1`. All operations work on
//! an owned [`Snapshot`] and return the updated one; nothing here touches the
//! remote store.

use std::collections::HashSet;

use crate::models::{Record, Snapshot, TurnPair};

/// Group the flat sequence two-at-a-time, in original order.
///
/// Restartable and side-effect free: calling it twice on the same snapshot
/// yields identical output. A trailing unpaired record is never produced
/// because fetch-time pairing validation rejects odd-length snapshots.
pub fn pairs(snapshot: &Snapshot) -> impl Iterator<Item = TurnPair> + '_ {
    snapshot
        .records
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| TurnPair {
            index,
            user: pair[0].content.clone(),
            assistant: pair[1].content.clone(),
        })
}

/// Remove the given 0-based pair indices from the snapshot.
///
/// The full flat row set (`2i` and `2i+1` for every index) is computed before
/// any mutation, then filtered out in one stable pass. Untouched records keep
/// their relative order and are renumbered implicitly by position, so a
/// non-contiguous, unsorted index set removes exactly the pairs it names.
///
/// Indices are assumed validated against `snapshot.pair_count()` by
/// [`parse_indices`](crate::index::parse_indices).
pub fn remove_pairs(snapshot: Snapshot, pair_indices: &[usize]) -> Snapshot {
    let rows: HashSet<usize> = pair_indices
        .iter()
        .flat_map(|&i| [2 * i, 2 * i + 1])
        .collect();

    let records = snapshot
        .records
        .into_iter()
        .enumerate()
        .filter(|(row, _)| !rows.contains(row))
        .map(|(_, record)| record)
        .collect();

    Snapshot::new(records)
}

/// Append one turn pair: a `user` record then an `assistant` record, content
/// taken verbatim.
pub fn append_pair(
    mut snapshot: Snapshot,
    user: impl Into<String>,
    assistant: impl Into<String>,
) -> Snapshot {
    snapshot.records.push(Record::user(user));
    snapshot.records.push(Record::assistant(assistant));
    snapshot
}

/// Append pre-built records verbatim, in input order.
pub fn append_bulk(mut snapshot: Snapshot, entries: Vec<Record>) -> Snapshot {
    snapshot.records.extend(entries);
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn three_pairs() -> Snapshot {
        Snapshot::new(vec![
            Record::user("Q1"),
            Record::assistant("A1"),
            Record::user("Q2"),
            Record::assistant("A2"),
            Record::user("Q3"),
            Record::assistant("A3"),
        ])
    }

    #[test]
    fn test_pairs_in_original_order() {
        let snapshot = three_pairs();
        let listed: Vec<TurnPair> = pairs(&snapshot).collect();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].index, 0);
        assert_eq!(listed[0].user, "Q1");
        assert_eq!(listed[0].assistant, "A1");
        assert_eq!(listed[2].user, "Q3");
    }

    #[test]
    fn test_pairs_is_idempotent() {
        let snapshot = three_pairs();
        let first: Vec<TurnPair> = pairs(&snapshot).collect();
        let second: Vec<TurnPair> = pairs(&snapshot).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_middle_pair_preserves_order() {
        // Removing pair 2 (0-based 1) keeps Q1/A1 and Q3/A3 in order.
        let updated = remove_pairs(three_pairs(), &[1]);
        assert_eq!(updated.pair_count(), 2);
        let contents: Vec<&str> = updated.records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["Q1", "A1", "Q3", "A3"]);
    }

    #[test]
    fn test_remove_non_contiguous_unsorted_set() {
        let updated = remove_pairs(three_pairs(), &[2, 0]);
        assert_eq!(updated.pair_count(), 1);
        assert_eq!(updated.records[0].content, "Q2");
        assert_eq!(updated.records[1].content, "A2");
    }

    #[test]
    fn test_remove_all_pairs_leaves_empty_snapshot() {
        let updated = remove_pairs(three_pairs(), &[0, 1, 2]);
        assert!(updated.is_empty());
    }

    #[test]
    fn test_remove_nothing_is_identity() {
        let updated = remove_pairs(three_pairs(), &[]);
        assert_eq!(updated, three_pairs());
    }

    #[test]
    fn test_append_pair_roles_and_contents() {
        let updated = append_pair(Snapshot::default(), "Hi", "Hello");
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.records[0].role, Role::User);
        assert_eq!(updated.records[0].content, "Hi");
        assert_eq!(updated.records[1].role, Role::Assistant);
        assert_eq!(updated.records[1].content, "Hello");
    }

    #[test]
    fn test_append_then_remove_round_trips() {
        let original = three_pairs();
        let appended = append_pair(original.clone(), "Q4", "A4");
        let removed = remove_pairs(appended, &[original.pair_count()]);
        assert_eq!(removed, original);
    }

    #[test]
    fn test_removed_content_is_gone() {
        let updated = remove_pairs(three_pairs(), &[1]);
        assert!(pairs(&updated).all(|p| p.user != "Q2" && p.assistant != "A2"));
    }

    #[test]
    fn test_append_bulk_preserves_input_order() {
        let entries = vec![
            Record::user("Q4"),
            Record::assistant("A4"),
            Record::user("Q5"),
            Record::assistant("A5"),
        ];
        let updated = append_bulk(three_pairs(), entries);
        assert_eq!(updated.pair_count(), 5);
        assert_eq!(updated.records[6].content, "Q4");
        assert_eq!(updated.records[9].content, "A5");
    }
}
