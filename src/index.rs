//! Index and range token parsing.
//!
//! Converts user-supplied text like `1 3 5-7` into a validated, deduplicated,
//! ascending list of 0-based pair indices. Input indices are 1-based and
//! ranges are inclusive, matching what the shells display.
//!
//! The ascending output order is load-bearing: the removal path in
//! [`pairs`](crate::pairs) relies on a stable, fully precomputed row set so
//! that index semantics never shift mid-removal.

use std::collections::BTreeSet;

use crate::error::CurateError;

/// Parse whitespace-delimited index/range tokens against the current number
/// of logical pairs.
///
/// Rules:
/// - a bare token `k` maps to 0-based index `k-1`; fails with
///   [`CurateError::InvalidIndex`] when `k < 1` or `k > max_pairs`;
/// - a range token `a-b` maps to `a-1..=b-1`; fails with
///   [`CurateError::InvalidRange`] when `a < 1`, `b > max_pairs`, or `a > b`;
/// - anything else fails with [`CurateError::Token`].
///
/// Overlapping tokens are deduplicated by set union. A single bad token
/// aborts the whole batch; no partial result is ever returned.
pub fn parse_indices(input: &str, max_pairs: usize) -> Result<Vec<usize>, CurateError> {
    let mut indices = BTreeSet::new();

    for token in input.split_whitespace() {
        if let Some((a, b)) = token.split_once('-') {
            let start: usize = a
                .parse()
                .map_err(|_| CurateError::Token(token.to_string()))?;
            let end: usize = b
                .parse()
                .map_err(|_| CurateError::Token(token.to_string()))?;
            if start < 1 || end > max_pairs || start > end {
                return Err(CurateError::InvalidRange(start, end));
            }
            indices.extend(start - 1..end);
        } else {
            let display: usize = token
                .parse()
                .map_err(|_| CurateError::Token(token.to_string()))?;
            if display < 1 || display > max_pairs {
                return Err(CurateError::InvalidIndex(display));
            }
            indices.insert(display - 1);
        }
    }

    Ok(indices.into_iter().collect())
}
