use crate::color::{pen_width, ColorScale};
use crate::error::Error;
use crate::model::Results;
use std::fmt::Write as _;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub const DEFAULT_FORMAT: &str = "png";

/// Visual attributes of one graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: String,
    pub pen_width: f64,
    pub label: Option<String>,
    pub url: Option<String>,
    pub font_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub a: String,
    pub b: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub show_links: bool,
    pub show_loops: bool,
    pub min_percent: u8,
    pub colors: ColorScale,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            show_links: false,
            show_loops: false,
            min_percent: crate::filter::DEFAULT_MIN_PERCENT,
            colors: ColorScale::default(),
        }
    }
}

/// One edge per match. Matches of a file with itself are dropped unless
/// `show_loops` is set.
pub fn build_edges(results: &Results, options: &GraphOptions) -> Vec<GraphEdge> {
    results
        .matches
        .iter()
        .filter(|m| options.show_loops || !m.is_loop())
        .map(|m| {
            let ratio = f64::from(m.percent()) / 100.0;
            let color = options.colors.link_color(ratio, options.min_percent);
            let (label, url) = if options.show_links {
                (Some("M".to_string()), Some(m.url.clone()))
            } else {
                (None, None)
            };
            GraphEdge {
                a: m.first.name.clone(),
                b: m.second.name.clone(),
                style: EdgeStyle {
                    font_color: color.clone(),
                    color,
                    pen_width: pen_width(ratio, options.min_percent),
                    label,
                    url,
                },
            }
        })
        .collect()
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render edges as an undirected Graphviz document.
pub fn to_dot(edges: &[GraphEdge]) -> String {
    let mut out = String::from("graph G {\n");
    for edge in edges {
        let style = &edge.style;
        let mut attrs = vec![
            format!("color={}", quote(&style.color)),
            format!("penwidth={:.2}", style.pen_width),
            format!("fontcolor={}", quote(&style.font_color)),
        ];
        if let Some(label) = &style.label {
            attrs.push(format!("label={}", quote(label)));
        }
        if let Some(url) = &style.url {
            attrs.push(format!("URL={}", quote(url)));
            attrs.push(format!("labelURL={}", quote(url)));
        }
        let _ = writeln!(
            out,
            "  {} -- {} [{}];",
            quote(&edge.a),
            quote(&edge.b),
            attrs.join(", ")
        );
    }
    out.push_str("}\n");
    out
}

/// `<base>.<format>`
pub fn output_file_name(base: &str, format: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", base, format))
}

/// Base names for un-merged images. An explicit output name is shared by
/// all images, so it gets a 1-based `-<index>` suffix when there is more
/// than one.
pub fn image_base_names(results: &[Results], output: Option<&str>) -> Vec<String> {
    match output {
        Some(base) if results.len() > 1 => (1..=results.len())
            .map(|i| format!("{}-{}", base, i))
            .collect(),
        Some(base) => vec![base.to_string(); results.len()],
        None => results.iter().map(|r| r.name.clone()).collect(),
    }
}

/// Writes a graph to disk in some output format.
pub trait Renderer {
    fn render(&self, edges: &[GraphEdge], path: &Path, format: &str) -> Result<(), Error>;
}

/// Renders through the Graphviz `dot` executable.
pub struct GraphvizRenderer {
    program: String,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, edges: &[GraphEdge], path: &Path, format: &str) -> Result<(), Error> {
        if path.exists() {
            debug!("Removing existing {}", path.display());
            fs::remove_file(path)?;
        }

        let dot = to_dot(edges);
        if format == "dot" || format == "gv" {
            fs::write(path, dot)?;
            info!("Wrote {}", path.display());
            return Ok(());
        }

        let mut command = Command::new(&self.program);
        command.arg(format!("-T{}", format));
        // xlib opens a window and leaves nothing behind.
        if format != "xlib" {
            command.arg("-o").arg(path);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Render(format!("failed to run {}: {}", self.program, e)))?;

        // stdin is dropped once written so the child sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        match written {
            // The child stopped reading but still exited cleanly.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("{} closed its input early: {}", self.program, e)
            }
            Err(e) => {
                return Err(Error::Render(format!(
                    "failed to write graph to {}: {}: {}",
                    self.program,
                    e,
                    stderr.trim()
                )))
            }
            Ok(()) => {}
        }

        if format != "xlib" {
            info!("Wrote {}", path.display());
        }
        Ok(())
    }
}
