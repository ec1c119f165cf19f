use crate::model::Match;
use ahash::AHashSet;

pub const DEFAULT_MIN_PERCENT: u8 = 90;
pub const DEFAULT_MIN_LINES: u32 = 1;

/// Inclusion rules applied to every match of a page.
///
/// All active rules must pass. Contradictory sets (a name in both `filter`
/// and `filterx`) are not rejected; they simply leave nothing included.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Only matches between these names.
    pub filter: Option<AHashSet<String>>,
    /// Only matches involving at least one of these names.
    pub filteri: Option<AHashSet<String>>,
    /// Drop matches between these names.
    pub filterx: Option<AHashSet<String>>,
    /// Drop matches involving any of these names.
    pub filterxi: Option<AHashSet<String>>,
    pub min_percent: u8,
    pub min_lines: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter: None,
            filteri: None,
            filterx: None,
            filterxi: None,
            min_percent: DEFAULT_MIN_PERCENT,
            min_lines: DEFAULT_MIN_LINES,
        }
    }
}

/// Turn an optional CLI name list into a filter set.
pub fn name_set(names: Option<Vec<String>>) -> Option<AHashSet<String>> {
    names.map(|names| names.into_iter().collect())
}

impl FilterConfig {
    pub fn include(&self, m: &Match) -> bool {
        let first = m.first.name.as_str();
        let second = m.second.name.as_str();

        if let Some(filter) = &self.filter {
            if !filter.contains(first) || !filter.contains(second) {
                return false;
            }
        }
        if let Some(filteri) = &self.filteri {
            if !filteri.contains(first) && !filteri.contains(second) {
                return false;
            }
        }
        if let Some(filterx) = &self.filterx {
            if filterx.contains(first) && filterx.contains(second) {
                return false;
            }
        }
        if let Some(filterxi) = &self.filterxi {
            if filterxi.contains(first) || filterxi.contains(second) {
                return false;
            }
        }

        m.lines > self.min_lines && m.percent() > self.min_percent
    }
}

/// Keep the matches `config` includes, in their original order.
pub fn filter_matches(matches: Vec<Match>, config: &FilterConfig) -> Vec<Match> {
    matches.into_iter().filter(|m| config.include(m)).collect()
}
