use chrono::NaiveDateTime;

/// One side of a match: a (possibly transformed) submission name and the
/// share of that file Moss reported as matched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct File {
    pub name: String,
    pub percent: u8,
}

impl File {
    pub fn new(name: impl Into<String>, percent: u8) -> Self {
        Self {
            name: name.into(),
            percent,
        }
    }
}

/// A single row of a Moss result page.
///
/// `first` and `second` are kept in the order Moss reported them. Anything
/// that needs pair identity goes through [`Match::unordered_pair_key`] or
/// [`Match::literal_pair_key`] and never compares the fields directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub first: File,
    pub second: File,
    pub lines: u32,
    pub url: String,
}

impl Match {
    pub fn new(first: File, second: File, lines: u32, url: impl Into<String>) -> Self {
        Self {
            first,
            second,
            lines,
            url: url.into(),
        }
    }

    /// Highest matched percentage of the two files.
    pub fn percent(&self) -> u8 {
        self.first.percent.max(self.second.percent)
    }

    /// Both sides name the same submission.
    pub fn is_loop(&self) -> bool {
        self.first.name == self.second.name
    }

    /// Order-independent pair identity, used for merging and counting.
    pub fn unordered_pair_key(&self) -> (String, String) {
        let (a, b) = (&self.first.name, &self.second.name);
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }

    /// Pair identity exactly as reported, used for report grouping.
    pub fn literal_pair_key(&self) -> (String, String) {
        (self.first.name.clone(), self.second.name.clone())
    }
}

/// All matches taken from one result page, or the merge of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Results {
    pub name: String,
    pub matches: Vec<Match>,
}

impl Results {
    pub fn new(name: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            name: name.into(),
            matches,
        }
    }
}

/// Fallback name for a page that does not carry one.
pub fn default_results_name(now: &NaiveDateTime) -> String {
    format!("moss_{}", now.format("%d-%m-%Y_%H%M%S"))
}

/// Result names joined with `+`, in the given order.
pub fn joined_name(results: &[Results]) -> String {
    results
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join("+")
}
