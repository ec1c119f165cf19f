use crate::color::{ColorScale, Rgb};
use crate::error::Error;
use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::filter::{FilterConfig, DEFAULT_MIN_LINES, DEFAULT_MIN_PERCENT};
use crate::graph::{GraphOptions, DEFAULT_FORMAT};
use crate::merge::DEFAULT_MIN_MATCHES;
use crate::parser::{NameTransformer, DEFAULT_TRANSFORMER};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::time::Duration;

/// Defaults read from `Mossum.toml` and `MOSSUM_*` environment variables.
/// Command-line flags take precedence over everything here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub min_percent: u8,
    pub min_lines: u32,
    pub min_matches: usize,
    pub format: String,
    pub transformer: String,
    pub timeout_secs: u64,
    pub low_color: String,
    pub high_color: String,
    pub graphviz: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let colors = ColorScale::default();
        Self {
            min_percent: DEFAULT_MIN_PERCENT,
            min_lines: DEFAULT_MIN_LINES,
            min_matches: DEFAULT_MIN_MATCHES,
            format: DEFAULT_FORMAT.to_string(),
            transformer: DEFAULT_TRANSFORMER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            low_color: colors.low.to_string(),
            high_color: colors.high.to_string(),
            graphviz: "dot".to_string(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Mossum").required(false))
        .add_source(Environment::with_prefix("MOSSUM"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    pub fn color_scale(&self) -> Result<ColorScale, Error> {
        Ok(ColorScale::new(
            self.low_color.parse::<Rgb>()?,
            self.high_color.parse::<Rgb>()?,
        ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything one run needs, fixed before the first page is fetched.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub filter: FilterConfig,
    pub transformer: NameTransformer,
    pub graph: GraphOptions,
    pub format: String,
    pub output: Option<String>,
    pub merge: bool,
    pub min_matches: usize,
    pub anonymize: bool,
    pub report: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            transformer: NameTransformer::default(),
            graph: GraphOptions::default(),
            format: DEFAULT_FORMAT.to_string(),
            output: None,
            merge: false,
            min_matches: DEFAULT_MIN_MATCHES,
            anonymize: false,
            report: false,
        }
    }
}
