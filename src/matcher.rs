use crate::blocking::BlockIndex;
use crate::normalize::NormalizedName;

pub const DEFAULT_MIN_SCORE: f64 = 0.86;

#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Lowest similarity ratio still accepted as a match. A candidate scoring
    /// exactly at the threshold is accepted.
    pub min_score: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// Similarity ratio in [0, 1]: twice the longest-common-subsequence length
/// over the combined length. 1.0 for identical strings (including two empty
/// strings).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    // Canonical names are pure ASCII, so byte positions are char positions.
    let lcs = lcs_length(a.as_bytes(), b.as_bytes());
    (2.0 * lcs as f64) / (a.len() as f64 + b.len() as f64)
}

fn lcs_length(a: &[u8], b: &[u8]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &byte_a in a {
        for (j, &byte_b) in b.iter().enumerate() {
            curr[j + 1] = if byte_a == byte_b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Greedy best-of-bucket matcher over the season-statistics dataset.
///
/// Each transfer record is matched independently; two transfers may resolve
/// to the same candidate. That is the contract here, not an oversight.
pub struct NameMatcher<'a> {
    season_names: &'a [NormalizedName],
    index: &'a BlockIndex,
    config: MatcherConfig,
}

impl<'a> NameMatcher<'a> {
    pub fn new(
        season_names: &'a [NormalizedName],
        index: &'a BlockIndex,
        config: MatcherConfig,
    ) -> Self {
        Self {
            season_names,
            index,
            config,
        }
    }

    /// Best candidate canonical name for `target`, or None when the target is
    /// empty, its bucket is absent, or nothing in the bucket clears the
    /// threshold.
    pub fn best_match(&self, target: &NormalizedName) -> Option<String> {
        if target.canonical.is_empty() {
            return None;
        }
        let rows = self.index.bucket(&target.block_key())?;

        // Distinct candidates, lexicographic order so equal scores resolve
        // deterministically to the first.
        let mut candidates: Vec<&str> = rows
            .iter()
            .map(|&row| self.season_names[row].canonical.as_str())
            .filter(|canonical| !canonical.is_empty())
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<(&str, f64)> = None;
        for candidate in candidates {
            let score = sequence_ratio(&target.canonical, candidate);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        let (name, score) = best?;
        (score >= self.config.min_score).then(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::BlockIndex;
    use crate::normalize::normalize_name;

    fn matcher_over<'a>(
        names: &'a [NormalizedName],
        index: &'a BlockIndex,
        min_score: f64,
    ) -> NameMatcher<'a> {
        NameMatcher::new(names, index, MatcherConfig { min_score })
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(sequence_ratio("jon smith", "jon smith"), 1.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn ratio_matches_the_lcs_definition() {
        // LCS("jon smith", "john smith") = 9, lengths 9 + 10.
        let score = sequence_ratio("jon smith", "john smith");
        assert!((score - 18.0 / 19.0).abs() < 1e-12);
        assert!(score >= DEFAULT_MIN_SCORE);

        assert!(sequence_ratio("jon smith", "jan smythe") < DEFAULT_MIN_SCORE);
    }

    #[test]
    fn close_spelling_matches() {
        let names = vec![normalize_name("John Smith")];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, DEFAULT_MIN_SCORE);

        let target = normalize_name("Jon Smith");
        assert_eq!(matcher.best_match(&target), Some("john smith".to_string()));
    }

    #[test]
    fn different_blocking_key_is_never_compared() {
        // Same first initial, different last token: no bucket, no fallback.
        let names = vec![normalize_name("Jon Smyth")];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, 0.0);

        let target = normalize_name("Jon Smith");
        assert_eq!(matcher.best_match(&target), None);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // Single-token names: block key is ("", "a") for all of these.
        let at_threshold = format!("{}{}", "a".repeat(43), "b".repeat(7));
        let below_threshold = format!("{}{}", "a".repeat(42), "b".repeat(8));
        let target = normalize_name(&"a".repeat(50));

        let names = vec![normalize_name(&at_threshold)];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, DEFAULT_MIN_SCORE);
        // 2 * 43 / 100 = 0.86 exactly: accepted.
        assert_eq!(matcher.best_match(&target), Some(at_threshold.clone()));

        let names = vec![normalize_name(&below_threshold)];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, DEFAULT_MIN_SCORE);
        assert_eq!(matcher.best_match(&target), None);
    }

    #[test]
    fn equal_scores_pick_the_lexicographically_first() {
        // Both candidates share LCS length 8 against "jon smith".
        let names = vec![normalize_name("jen smith"), normalize_name("jan smith")];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, 0.5);

        let target = normalize_name("jon smith");
        let a = sequence_ratio("jon smith", "jan smith");
        let b = sequence_ratio("jon smith", "jen smith");
        assert_eq!(a, b);
        assert_eq!(matcher.best_match(&target), Some("jan smith".to_string()));
    }

    #[test]
    fn duplicate_season_rows_collapse_to_one_candidate() {
        let names = vec![normalize_name("John Smith"), normalize_name("John Smith")];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, DEFAULT_MIN_SCORE);

        let target = normalize_name("John Smith");
        assert_eq!(matcher.best_match(&target), Some("john smith".to_string()));
    }

    #[test]
    fn empty_target_never_matches() {
        let names = vec![NormalizedName::default()];
        let index = BlockIndex::build(&names);
        let matcher = matcher_over(&names, &index, 0.0);

        assert_eq!(matcher.best_match(&NormalizedName::default()), None);
    }
}
