use crate::error::Error;
use crate::model::{Match, Results};
use ahash::AHashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// All matches reported for one literal file pair, labelled with the result
/// set each came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub pair: (String, String),
    pub entries: Vec<(String, Match)>,
}

impl ReportGroup {
    fn sorted_result_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Group matches of every result set by `(first, second)` as reported.
///
/// Groups with more entries come first; ties are broken by the sorted list
/// of contributing result names, descending. Groups that still tie keep the
/// order in which their pair was first seen.
pub fn build_report(results: &[Results]) -> Vec<ReportGroup> {
    let mut index: AHashMap<(String, String), usize> = AHashMap::new();
    let mut groups: Vec<ReportGroup> = Vec::new();

    for res in results {
        for m in &res.matches {
            let key = m.literal_pair_key();
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(ReportGroup {
                    pair: key,
                    entries: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].entries.push((res.name.clone(), m.clone()));
        }
    }

    for group in &mut groups {
        group.entries.sort();
    }

    groups.sort_by(|a, b| {
        b.entries
            .len()
            .cmp(&a.entries.len())
            .then_with(|| b.sorted_result_names().cmp(&a.sorted_result_names()))
    });

    groups
}

pub fn render_report(groups: &[ReportGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "Pair: {} and {}", group.pair.0, group.pair.1);
        for (name, m) in &group.entries {
            let _ = writeln!(out, "{}: {}", name, m.url);
        }
        out.push_str("\n\n");
    }
    out
}

/// Write the report, replacing any existing file at `path`.
pub fn write_report(path: &Path, groups: &[ReportGroup]) -> Result<(), Error> {
    fs::write(path, render_report(groups))?;
    info!("Report with {} pairs written to {}", groups.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::File;

    fn make_match(a: &str, b: &str, lines: u32, url: &str) -> Match {
        Match::new(File::new(a, 90), File::new(b, 90), lines, url)
    }

    #[test]
    fn test_single_pair_two_results() {
        let results = vec![
            Results::new("r1", vec![make_match("A", "B", 5, "url1")]),
            Results::new("r2", vec![make_match("A", "B", 3, "url2")]),
        ];
        let groups = build_report(&results);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pair, ("A".to_string(), "B".to_string()));
        let labels: Vec<&str> = groups[0].entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(labels, vec!["r1", "r2"]);
    }

    #[test]
    fn test_entries_sorted_by_result_name() {
        let results = vec![
            Results::new("r2", vec![make_match("A", "B", 3, "url2")]),
            Results::new("r1", vec![make_match("A", "B", 5, "url1")]),
        ];
        let groups = build_report(&results);
        let urls: Vec<&str> = groups[0].entries.iter().map(|(_, m)| m.url.as_str()).collect();
        assert_eq!(urls, vec!["url1", "url2"]);
    }

    #[test]
    fn test_literal_pairs_are_not_normalized() {
        let results = vec![
            Results::new("r1", vec![make_match("A", "B", 5, "url1")]),
            Results::new("r2", vec![make_match("B", "A", 3, "url2")]),
        ];
        let groups = build_report(&results);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_groups_ordered_by_count_then_names() {
        let results = vec![
            Results::new(
                "hw1",
                vec![make_match("C", "D", 5, "u1"), make_match("A", "B", 5, "u2")],
            ),
            Results::new(
                "hw2",
                vec![make_match("E", "F", 5, "u3"), make_match("A", "B", 5, "u4")],
            ),
        ];
        let groups = build_report(&results);
        let pairs: Vec<&str> = groups.iter().map(|g| g.pair.0.as_str()).collect();
        // A-B appears twice; E-F (from hw2) sorts before C-D (from hw1).
        assert_eq!(pairs, vec!["A", "E", "C"]);
    }

    #[test]
    fn test_full_ties_keep_first_seen_order() {
        let results = vec![Results::new(
            "hw1",
            vec![make_match("Y", "Z", 5, "u1"), make_match("A", "B", 5, "u2")],
        )];
        let groups = build_report(&results);
        let pairs: Vec<&str> = groups.iter().map(|g| g.pair.0.as_str()).collect();
        assert_eq!(pairs, vec!["Y", "A"]);
    }

    #[test]
    fn test_render_report_format() {
        let results = vec![
            Results::new("r1", vec![make_match("A", "B", 5, "url1")]),
            Results::new("r2", vec![make_match("A", "B", 3, "url2")]),
        ];
        let text = render_report(&build_report(&results));
        assert_eq!(text, "Pair: A and B\nr1: url1\nr2: url2\n\n\n");
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&[]), "");
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r1.txt");
        fs::write(&path, "stale contents that are longer than the report").unwrap();

        let results = vec![Results::new("r1", vec![make_match("A", "B", 5, "url1")])];
        write_report(&path, &build_report(&results)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Pair: A and B\nr1: url1\n\n\n"
        );
    }
}
