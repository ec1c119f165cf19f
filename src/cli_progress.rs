use indicatif::{ProgressBar, ProgressStyle};
use mossum::ProgressReporter;
use std::cell::RefCell;
use std::time::Duration;

/// CLI progress reporter using an indicatif spinner per fetch and render.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_spinner(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_fetch_start(&self, index: usize, total: usize, url: &str) {
        self.start_spinner(format!("[{}/{}] Fetching {}", index, total, url));
    }

    fn on_page_parsed(&self, name: &str, matches: usize) {
        self.finish_spinner();
        eprintln!("  \x1b[32m✓\x1b[0m {}: {} matches", name, matches);
    }

    fn on_render_start(&self, path: &str) {
        self.start_spinner(format!("Rendering {}...", path));
    }

    fn on_render_complete(&self, path: &str, edges: usize) {
        self.finish_spinner();
        eprintln!("  \x1b[32m✓\x1b[0m {} ({} edges)", path, edges);
    }

    fn on_report_written(&self, path: &str, pairs: usize) {
        eprintln!("  \x1b[32m✓\x1b[0m {} ({} pairs)", path, pairs);
    }
}

impl Drop for CliReporter {
    fn drop(&mut self) {
        self.finish_spinner();
    }
}
