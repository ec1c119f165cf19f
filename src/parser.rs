use crate::error::Error;
use crate::model::File;
use regex::Regex;

lazy_static::lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("digit pattern is valid");
}

pub const DEFAULT_TRANSFORMER: &str = ".*";

/// Rewrites raw Moss file labels (usually submission paths) into the names
/// shown in graphs and reports.
///
/// The pattern is anchored at the start of the label. When it has capture
/// groups the captured pieces are joined with `_`, otherwise the whole match
/// is used. Labels the pattern does not match are kept as they are.
#[derive(Debug, Clone)]
pub struct NameTransformer {
    pattern: Regex,
}

impl NameTransformer {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let anchored = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self { pattern: anchored })
    }

    pub fn transform(&self, name: &str) -> String {
        let captures = match self.pattern.captures(name) {
            Some(captures) => captures,
            None => return name.to_string(),
        };

        if self.pattern.captures_len() > 1 {
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()).unwrap_or(""))
                .collect::<Vec<_>>()
                .join("_")
        } else {
            captures
                .get(0)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        }
    }
}

impl Default for NameTransformer {
    fn default() -> Self {
        Self {
            pattern: Regex::new(&format!("^(?:{})", DEFAULT_TRANSFORMER))
                .expect("default transformer is valid"),
        }
    }
}

/// Parse a `"<name> (<percent>%)"` cell into a [`File`].
pub fn parse_column(raw: &str, transformer: &NameTransformer) -> Result<File, Error> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let (name, percent_token) = match tokens.as_slice() {
        [name, percent] => (*name, *percent),
        _ => {
            return Err(Error::parse(
                format!("expected name and percentage, found {} tokens", tokens.len()),
                raw,
            ))
        }
    };

    let digits = DIGITS
        .find(percent_token)
        .ok_or_else(|| Error::parse("no digits in percentage", raw))?;
    let percent: u8 = digits
        .as_str()
        .parse()
        .ok()
        .filter(|p| *p <= 100)
        .ok_or_else(|| Error::parse("percentage out of range", raw))?;

    Ok(File::new(transformer.transform(name), percent))
}

/// Parse the matched-lines column.
pub fn parse_lines(raw: &str) -> Result<u32, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::parse("lines matched is not a non-negative integer", raw))
}
