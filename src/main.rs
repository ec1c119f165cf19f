mod cli;
mod cli_progress;
mod logging;

use std::io::{self, Read};
use std::process;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use cli_progress::CliReporter;
use colored::*;
use dotenv::dotenv;
use mossum::anonymize::WordNameGenerator;
use mossum::fetch::HttpFetcher;
use mossum::filter::name_set;
use mossum::graph::{GraphOptions, GraphvizRenderer};
use mossum::{AppConfig, FilterConfig, Mossum, NameTransformer, RunConfig};
use tracing::{debug, error, info};

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();

    let args = Cli::parse();

    if let Err(err) = run(args) {
        error!("Error: {:#}", err);
        drop(guard);
        process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = mossum::config::load_configuration().context("loading configuration")?;

    if args.print_config {
        println!("Configuration: {:#?}", config);
        return Ok(());
    }

    let run_config = build_run_config(&config, &args)?;
    debug!("Run configuration: {:?}", run_config);

    let urls = if args.urls.is_empty() {
        read_urls(io::stdin())?
    } else {
        args.urls
    };
    if urls.is_empty() {
        anyhow::bail!("no result URLs given on the command line or stdin");
    }

    let timeout = args.timeout.map(std::time::Duration::from_secs).unwrap_or(config.timeout());
    let fetcher = HttpFetcher::new(timeout)?;
    let renderer = GraphvizRenderer::new(config.graphviz.clone());
    let mut generator = WordNameGenerator::new();
    let reporter = CliReporter::new();

    let summary =
        Mossum::new(run_config).run(&urls, &fetcher, &renderer, &mut generator, &reporter)?;

    info!(
        "{} pages, {} matches kept, fetched in {}",
        format!("{}", summary.pages).cyan(),
        format!("{}", summary.matches).red(),
        format!("{:.2}s", summary.fetch_duration.as_secs_f64()).green(),
    );
    for image in &summary.images {
        info!("Image: {}", image.display());
    }
    if let Some(report) = &summary.report {
        info!("Report: {}", report.display());
    }

    Ok(())
}

fn build_run_config(config: &AppConfig, args: &Cli) -> anyhow::Result<RunConfig> {
    let min_percent = args.min_percent.unwrap_or(config.min_percent);
    let transformer = args.transformer.as_deref().unwrap_or(&config.transformer);

    Ok(RunConfig {
        filter: FilterConfig {
            filter: name_set(args.filter.clone()),
            filteri: name_set(args.filteri.clone()),
            filterx: name_set(args.filterx.clone()),
            filterxi: name_set(args.filterxi.clone()),
            min_percent,
            min_lines: args.min_lines.unwrap_or(config.min_lines),
        },
        transformer: NameTransformer::new(transformer)
            .with_context(|| format!("compiling transformer '{}'", transformer))?,
        graph: GraphOptions {
            show_links: args.show_links,
            show_loops: args.show_loops,
            min_percent,
            colors: config.color_scale().context("reading edge colors")?,
        },
        format: args.format.clone().unwrap_or_else(|| config.format.clone()),
        output: args.output.clone(),
        merge: args.merge,
        min_matches: args.min_matches.unwrap_or(config.min_matches),
        anonymize: args.anonymize,
        report: args.report,
    })
}

fn read_urls(mut input: impl Read) -> io::Result<Vec<String>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
