pub mod anonymize;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod graph;
pub mod html;
pub mod merge;
pub mod model;
pub mod parser;
pub mod progress;
pub mod report;

pub use color::link_color;
pub use config::{AppConfig, RunConfig};
pub use engine::{Mossum, RunSummary};
pub use error::Error;
pub use filter::{filter_matches, FilterConfig};
pub use merge::merge_results;
pub use model::{File, Match, Results};
pub use parser::{parse_column, NameTransformer};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::{build_report, render_report};
