use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Parse error: {context} (in {raw:?})")]
    Parse { context: String, raw: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid transformer pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Anonymize error: {0}")]
    Anonymize(String),
}

impl Error {
    pub fn parse(context: impl Into<String>, raw: impl Into<String>) -> Self {
        Error::Parse {
            context: context.into(),
            raw: raw.into(),
        }
    }
}
