use crate::model::{joined_name, Results};
use ahash::AHashMap;
use tracing::debug;

pub const DEFAULT_MIN_MATCHES: usize = 1;

/// Merge several result sets into one.
///
/// Matches are concatenated result by result. A match is kept only when its
/// unordered pair occurs at least `min_matches` times across all inputs, so
/// `min_matches > 1` surfaces pairs that collide on several assignment parts.
pub fn merge_results(results: &[Results], min_matches: usize) -> Results {
    let name = joined_name(results);

    let mut pair_counts: AHashMap<(String, String), usize> = AHashMap::new();
    for m in results.iter().flat_map(|r| r.matches.iter()) {
        *pair_counts.entry(m.unordered_pair_key()).or_default() += 1;
    }

    let matches: Vec<_> = results
        .iter()
        .flat_map(|r| r.matches.iter())
        .filter(|m| {
            pair_counts
                .get(&m.unordered_pair_key())
                .is_some_and(|count| *count >= min_matches)
        })
        .cloned()
        .collect();

    debug!(
        "Merged {} result sets into '{}': {} distinct pairs, {} matches kept (min_matches={})",
        results.len(),
        name,
        pair_counts.len(),
        matches.len(),
        min_matches,
    );

    Results::new(name, matches)
}
