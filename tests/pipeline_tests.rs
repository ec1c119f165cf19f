use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use mossum::anonymize::NameGenerator;
use mossum::fetch::PageFetcher;
use mossum::graph::{GraphEdge, Renderer};
use mossum::{Error, FilterConfig, Mossum, NameTransformer, RunConfig, SilentReporter};
use tempfile::tempdir;

struct MapFetcher {
    pages: HashMap<String, String>,
}

impl PageFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> Result<String, Error> {
        self.pages.get(url).cloned().ok_or_else(|| Error::Fetch {
            url: url.to_string(),
            reason: "404 Not Found".to_string(),
        })
    }
}

#[derive(Default)]
struct RecordingRenderer {
    rendered: RefCell<Vec<(PathBuf, Vec<GraphEdge>)>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, edges: &[GraphEdge], path: &Path, _format: &str) -> Result<(), Error> {
        self.rendered
            .borrow_mut()
            .push((path.to_path_buf(), edges.to_vec()));
        Ok(())
    }
}

struct SequenceGenerator;

impl NameGenerator for SequenceGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, Error> {
        Ok((0..count).map(|i| format!("student{}", i)).collect())
    }
}

/// Build a Moss-like result page from `(first, second, lines)` rows.
fn moss_page(name: &str, rows: &[(&str, &str, u32)]) -> String {
    let mut html = format!(
        "<html><body><p>Moss Results</p><p>date</p><p>{}</p><table>\
         <tr><th>File 1</th><th>File 2</th><th>Lines Matched</th></tr>",
        name
    );
    for (i, (first, second, lines)) in rows.iter().enumerate() {
        let url = format!("http://moss/{}/match{}.html", name, i);
        html.push_str(&format!(
            "<tr><td><a href=\"{url}\">{first}</a></td><td><a href=\"{url}\">{second}</a></td><td>{lines}</td></tr>",
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn fetcher() -> MapFetcher {
    let mut pages = HashMap::new();
    pages.insert(
        "http://moss/hw1".to_string(),
        moss_page(
            "hw1",
            &[
                ("subs/alice/a.c (90%)", "subs/bob/a.c (95%)", 50),
                ("subs/carol/a.c (99%)", "subs/dave/a.c (98%)", 20),
                ("subs/erin/a.c (10%)", "subs/frank/a.c (12%)", 80),
            ],
        ),
    );
    pages.insert(
        "http://moss/hw2".to_string(),
        moss_page(
            "hw2",
            &[
                ("subs/alice/b.c (90%)", "subs/bob/b.c (92%)", 30),
                ("subs/carol/b.c (93%)", "subs/carol/c.c (93%)", 30),
            ],
        ),
    );
    MapFetcher { pages }
}

fn urls() -> Vec<String> {
    vec!["http://moss/hw1".to_string(), "http://moss/hw2".to_string()]
}

fn base_config(output: &Path) -> RunConfig {
    RunConfig {
        transformer: NameTransformer::new(r"subs/(\w+)").unwrap(),
        filter: FilterConfig::default(),
        output: Some(output.to_string_lossy().into_owned()),
        ..RunConfig::default()
    }
}

#[test]
fn test_unmerged_run_renders_each_page() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let mossum = Mossum::new(base_config(&dir.path().join("out")));

    let summary = mossum
        .run(&urls(), &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap();

    assert_eq!(summary.pages, 2);
    // erin/frank falls below the percentage threshold.
    assert_eq!(summary.matches, 4);
    assert!(summary.report.is_none());

    let rendered = renderer.rendered.borrow();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].0, dir.path().join("out-1.png"));
    assert_eq!(rendered[1].0, dir.path().join("out-2.png"));
    assert_eq!(rendered[0].1.len(), 2);
    // The carol/carol self match is kept in results but not drawn.
    assert_eq!(rendered[1].1.len(), 1);
}

#[test]
fn test_merge_with_min_matches() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let config = RunConfig {
        merge: true,
        min_matches: 2,
        ..base_config(&dir.path().join("merged"))
    };

    let summary = Mossum::new(config)
        .run(&urls(), &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap();

    assert_eq!(summary.images, vec![dir.path().join("merged.png")]);
    let rendered = renderer.rendered.borrow();
    let edges = &rendered[0].1;
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.a == "alice" && e.b == "bob"));
}

#[test]
fn test_merge_threshold_above_recurrence_is_empty() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let config = RunConfig {
        merge: true,
        min_matches: 3,
        ..base_config(&dir.path().join("merged"))
    };

    Mossum::new(config)
        .run(&urls(), &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap();
    assert!(renderer.rendered.borrow()[0].1.is_empty());
}

#[test]
fn test_report_written_from_unmerged_results() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let config = RunConfig {
        merge: true,
        min_matches: 2,
        report: true,
        ..base_config(&dir.path().join("hw"))
    };

    let summary = Mossum::new(config)
        .run(&urls(), &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap();

    let report_path = summary.report.unwrap();
    assert_eq!(report_path, dir.path().join("hw.txt"));
    let text = fs::read_to_string(report_path).unwrap();
    assert_eq!(
        text,
        "Pair: alice and bob\n\
         hw1: http://moss/hw1/match0.html\n\
         hw2: http://moss/hw2/match0.html\n\n\n\
         Pair: carol and carol\n\
         hw2: http://moss/hw2/match1.html\n\n\n\
         Pair: carol and dave\n\
         hw1: http://moss/hw1/match1.html\n\n\n"
    );
}

#[test]
fn test_anonymize_applies_one_mapping_everywhere() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let config = RunConfig {
        anonymize: true,
        report: true,
        ..base_config(&dir.path().join("anon"))
    };

    let summary = Mossum::new(config)
        .run(&urls(), &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap();

    let rendered = renderer.rendered.borrow();
    // Sorted originals: alice, bob, carol, dave.
    assert_eq!(rendered[0].1[0].a, "student0");
    assert_eq!(rendered[0].1[0].b, "student1");
    assert_eq!(rendered[1].1[0].a, "student0");

    let text = fs::read_to_string(summary.report.unwrap()).unwrap();
    assert!(text.starts_with("Pair: student0 and student1\n"));
    assert!(!text.contains("alice"));
}

#[test]
fn test_fetch_failure_aborts_run() {
    let dir = tempdir().unwrap();
    let renderer = RecordingRenderer::default();
    let mut bad_urls = urls();
    bad_urls.insert(1, "http://moss/missing".to_string());

    let err = Mossum::new(base_config(&dir.path().join("out")))
        .run(&bad_urls, &fetcher(), &renderer, &mut SequenceGenerator, &SilentReporter)
        .unwrap_err();

    assert!(matches!(err, Error::Fetch { ref url, .. } if url == "http://moss/missing"));
    assert!(renderer.rendered.borrow().is_empty());
}

#[test]
fn test_malformed_page_aborts_run() {
    let mut pages = HashMap::new();
    pages.insert(
        "http://moss/bad".to_string(),
        moss_page("bad", &[("subs/alice/a.c", "subs/bob/a.c (95%)", 50)]),
    );
    let renderer = RecordingRenderer::default();
    let dir = tempdir().unwrap();

    let err = Mossum::new(base_config(&dir.path().join("out")))
        .run(
            &["http://moss/bad".to_string()],
            &MapFetcher { pages },
            &renderer,
            &mut SequenceGenerator,
            &SilentReporter,
        )
        .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_names_default_to_page_names() {
    let config = RunConfig {
        transformer: NameTransformer::new(r"subs/(\w+)").unwrap(),
        ..RunConfig::default()
    };
    let mossum = Mossum::new(config);

    let results = mossum.collect(&urls(), &fetcher(), &SilentReporter).unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["hw1", "hw2"]);
}
