use crate::anonymize::{anonymize_results, NameGenerator};
use crate::config::RunConfig;
use crate::error::Error;
use crate::fetch::PageFetcher;
use crate::graph::{build_edges, image_base_names, output_file_name, Renderer};
use crate::html::{extract_page, results_from_page};
use crate::merge::merge_results;
use crate::model::{joined_name, Results};
use crate::progress::ProgressReporter;
use crate::report::{build_report, write_report};
use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Mossum {
    config: RunConfig,
}

#[derive(Debug)]
pub struct RunSummary {
    pub fetch_duration: Duration,
    pub pages: usize,
    pub matches: usize,
    pub images: Vec<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Mossum {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Fetch and parse every page in order, failing on the first bad one.
    pub fn collect(
        &self,
        urls: &[String],
        fetcher: &dyn PageFetcher,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<Results>, Error> {
        let mut all_results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            reporter.on_fetch_start(i + 1, urls.len(), url);
            info!("Fetching {}", url);

            let html = fetcher.fetch(url)?;
            let page = extract_page(&html)?;
            let raw_rows = page.rows.len();
            let results = results_from_page(
                page,
                &self.config.transformer,
                &self.config.filter,
                &Local::now().naive_local(),
            )?;
            debug!(
                "'{}': {} rows, {} kept after filtering",
                results.name,
                raw_rows,
                results.matches.len()
            );

            reporter.on_page_parsed(&results.name, results.matches.len());
            all_results.push(results);
        }
        Ok(all_results)
    }

    /// Run the whole pipeline:
    /// 1. Fetch, parse and filter each page
    /// 2. Anonymize all results with one shared mapping (optional)
    /// 3. Render one merged graph, or one graph per page
    /// 4. Write the recurrence report (optional)
    pub fn run(
        &self,
        urls: &[String],
        fetcher: &dyn PageFetcher,
        renderer: &dyn Renderer,
        generator: &mut dyn NameGenerator,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunSummary, Error> {
        let fetch_start = Instant::now();
        let mut all_results = self.collect(urls, fetcher, reporter)?;
        let fetch_duration = fetch_start.elapsed();

        if self.config.anonymize {
            anonymize_results(&mut all_results, generator)?;
        }

        let images = if self.config.merge {
            let merged = merge_results(&all_results, self.config.min_matches);
            let base = self.config.output.clone().unwrap_or_else(|| merged.name.clone());
            vec![self.image(&merged, &base, renderer, reporter)?]
        } else {
            let bases = image_base_names(&all_results, self.config.output.as_deref());
            all_results
                .iter()
                .zip(bases)
                .map(|(results, base)| self.image(results, &base, renderer, reporter))
                .collect::<Result<Vec<_>, _>>()?
        };

        let report = if self.config.report {
            let base = self
                .config
                .output
                .clone()
                .unwrap_or_else(|| joined_name(&all_results));
            let path = PathBuf::from(format!("{}.txt", base));
            let groups = build_report(&all_results);
            write_report(&path, &groups)?;
            reporter.on_report_written(&path.to_string_lossy(), groups.len());
            Some(path)
        } else {
            None
        };

        Ok(RunSummary {
            fetch_duration,
            pages: all_results.len(),
            matches: all_results.iter().map(|r| r.matches.len()).sum(),
            images,
            report,
        })
    }

    fn image(
        &self,
        results: &Results,
        base: &str,
        renderer: &dyn Renderer,
        reporter: &dyn ProgressReporter,
    ) -> Result<PathBuf, Error> {
        let path = output_file_name(base, &self.config.format);
        let path_str = path.to_string_lossy().into_owned();
        info!("Generating image for {}", results.name);

        reporter.on_render_start(&path_str);
        let edges = build_edges(results, &self.config.graph);
        renderer.render(&edges, &path, &self.config.format)?;
        reporter.on_render_complete(&path_str, edges.len());

        Ok(path)
    }
}
