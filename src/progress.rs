/// Trait for reporting run progress.
///
/// The CLI implements it with indicatif spinners. All methods have default
/// no-op implementations.
pub trait ProgressReporter {
    fn on_fetch_start(&self, _index: usize, _total: usize, _url: &str) {}
    fn on_page_parsed(&self, _name: &str, _matches: usize) {}
    fn on_render_start(&self, _path: &str) {}
    fn on_render_complete(&self, _path: &str, _edges: usize) {}
    fn on_report_written(&self, _path: &str, _pairs: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
