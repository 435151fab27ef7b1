//! Ranks the HTML pages of a directory by PageRank, once by sampling a
//! random walk and once by iteration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use link_rank::page_rank::{iterated, sampled, PageRank, PageRankResult};
use link_rank::{crawl, exit_codes, report};

#[derive(Debug, Parser)]
#[command(name = "pagerank", version, about)]
struct Cli {
    /// Directory holding the *.html corpus
    corpus: PathBuf,

    /// Probability of following a link rather than teleporting
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Random-walk steps for the sampling estimate
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// Largest per-page change still counted as converged
    #[arg(long, default_value_t = 0.001)]
    threshold: f64,

    /// Round-robin cycles before iteration gives up
    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,

    /// Seed for the random walk; OS entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<link_rank::Error>()
            .map(link_rank::Error::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let graph = crawl(&cli.corpus)?;
    tracing::info!(pages = graph.page_count(), links = graph.link_count(), "corpus loaded");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sampled_cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let iterated_cfg = iterated::Config {
        damping: cli.damping,
        threshold: cli.threshold,
        max_iterations: cli.max_iterations,
    };
    let sampler = sampled::SampledPageRank::new(&graph, &sampled_cfg, rng)?;
    let solver = iterated::IteratedPageRank::new(&graph, &iterated_cfg)?;

    let sampled = sampler.calc()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_ranks(
        &mut out,
        &report::sampling_header(cli.samples),
        &sampled.rank_map(&graph),
    )?;
    out.flush()?;

    let iterated = solver.calc()?;
    report::write_ranks(
        &mut out,
        report::ITERATION_HEADER,
        &iterated.rank_map(&graph),
    )?;
    out.flush()?;
    Ok(())
}
