//! Bounded approximate substring matching (bitap / shift-and with errors).
//!
//! A matcher is built once per pattern and then tested against many
//! candidates. `matches` answers "does the pattern occur somewhere in the
//! candidate with at most `k` substitutions, insertions or deletions?".
//! Transposition is not an edit operation here; a swapped pair costs two
//! substitutions unless an insertion/deletion pair happens to line up.
//!
//! State layout: bit `j` of row `d` is set when the first `j` pattern
//! characters match a suffix of the text read so far with at most `d`
//! errors. Bit 0 (the empty prefix) is always set, so the pattern can start
//! at any text position. A match is reported once bit `m` of row `k` is set.
//!
//! Patterns are limited to [`MAX_PATTERN_LEN`] characters so every state
//! fits in one `u64`.

use tracing::trace;

use crate::error::MatcherError;

/// Number of distinguished symbols (the ASCII range).
pub const ALPHABET_SIZE: usize = 128;

/// Longest pattern representable with 64-bit state words.
pub const MAX_PATTERN_LEN: usize = u64::BITS as usize - 1;

/// Shared bucket for every character outside the ASCII range.
const FALLBACK_BUCKET: usize = ALPHABET_SIZE;

/// Precomputed bitap tables for one pattern and one error budget.
#[derive(Debug, Clone)]
pub struct ApproximateMatcher {
    masks: [u64; ALPHABET_SIZE + 1],
    pattern_len: usize,
    max_errors: usize,
}

impl ApproximateMatcher {
    /// Build the per-symbol masks for `pattern`, tolerating `max_errors` edits.
    pub fn new(pattern: &str, max_errors: usize) -> Result<Self, MatcherError> {
        let pattern_len = pattern.chars().count();
        if pattern_len > MAX_PATTERN_LEN {
            return Err(MatcherError::PatternTooLong {
                len: pattern_len,
                max: MAX_PATTERN_LEN,
            });
        }

        let mut masks = [0u64; ALPHABET_SIZE + 1];
        for (i, c) in pattern.chars().enumerate() {
            masks[bucket(c)] |= 1u64 << (i + 1);
        }

        trace!(pattern, pattern_len, max_errors, "built approximate matcher");
        Ok(Self {
            masks,
            pattern_len,
            max_errors,
        })
    }

    /// Test whether the pattern occurs in `candidate` within the error budget.
    pub fn matches(&self, candidate: &str) -> bool {
        // Deleting every pattern character is within budget: trivially a match.
        // This also covers the empty pattern.
        if self.max_errors >= self.pattern_len {
            return true;
        }

        let goal = 1u64 << self.pattern_len;
        // Row d starts with prefixes 0..=d matched (by deleting them).
        let mut rows: Vec<u64> = (0..=self.max_errors)
            .map(|d| (1u64 << (d + 1)) - 1)
            .collect();

        for c in candidate.chars() {
            let mask = self.masks[bucket(c)];

            let mut above_old = rows[0];
            rows[0] = ((above_old << 1) & mask) | 1;

            for d in 1..rows.len() {
                let old = rows[d];
                rows[d] = ((old << 1) & mask) // match
                    | above_old               // insertion: extra text char
                    | (above_old << 1)        // substitution
                    | (rows[d - 1] << 1)      // deletion: skipped pattern char
                    | 1;
                above_old = old;
            }

            if rows[self.max_errors] & goal != 0 {
                return true;
            }
        }

        false
    }
}

fn bucket(c: char) -> usize {
    let code = c as usize;
    if code < ALPHABET_SIZE {
        code
    } else {
        FALLBACK_BUCKET
    }
}
