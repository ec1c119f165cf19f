use clap::Parser;

/// Mossum summarizes results from Stanford's Moss. It draws a graph for one
/// or more result pages, which helps spot groups of students that shared
/// solutions, and can write a report of which pairs match across several
/// assignment parts.
#[derive(Debug, Parser)]
#[command(name = "mossum", version)]
pub struct Cli {
    /// URLs to Moss result pages. Read from stdin, one per line, when omitted.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Ignore matches where no more than P% of either file is matched.
    #[arg(short = 'p', long, value_name = "P", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_percent: Option<u8>,

    /// Ignore matches with no more than L matched lines.
    #[arg(short = 'l', long, value_name = "L")]
    pub min_lines: Option<u32>,

    /// Output format, passed to Graphviz (png, svg, pdf, dot, xlib, ...).
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Regular expression used to transform the names of matched files.
    #[arg(short = 't', long)]
    pub transformer: Option<String>,

    /// Replace the names of matched files with random names.
    #[arg(short = 'a', long)]
    pub anonymize: bool,

    /// Merge all results into one image.
    #[arg(short = 'm', long)]
    pub merge: bool,

    /// When merging, keep only pairs that match on at least N pages.
    #[arg(short = 'c', long, value_name = "N")]
    pub min_matches: Option<usize>,

    /// Write a report of the submissions each pair has in common.
    #[arg(short = 'r', long)]
    pub report: bool,

    /// Add hyperlinks to Moss results on graph edges (svg and xlib only).
    #[arg(short = 's', long)]
    pub show_links: bool,

    /// Draw matches of a file with itself.
    #[arg(long)]
    pub show_loops: bool,

    /// Base name of output files.
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Include only matches between these names.
    #[arg(long, value_name = "N", num_args = 1..)]
    pub filter: Option<Vec<String>>,

    /// Include only matches involving these names.
    #[arg(long, value_name = "N", num_args = 1..)]
    pub filteri: Option<Vec<String>>,

    /// Exclude matches between these names.
    #[arg(long, value_name = "N", num_args = 1..)]
    pub filterx: Option<Vec<String>>,

    /// Exclude matches involving any of these names.
    #[arg(long, value_name = "N", num_args = 1..)]
    pub filterxi: Option<Vec<String>>,

    /// HTTP timeout in seconds for fetching result pages.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}
