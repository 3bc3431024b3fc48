mod explain;
mod report;

use agari::dataset;
use agari::hand::hand;
use agari::stats::Stats;
use agari::tile::Variant;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// 14 tiles, 34 kinds
    Four,
    /// 11 tiles, dragons and ranks 1-6 only
    Three,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Four => Self::Four,
            VariantArg::Three => Self::Three,
        }
    }
}

/// Scores every hand of an enumerated record file and prints per-pattern
/// statistics weighted by the number of physical draws of each hand.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Record file, decompressed if it ends in `.gz`. Defaults to
    /// `patterns_general_four.dat` or `patterns_general_three.dat`.
    path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = VariantArg::Four)]
    variant: VariantArg,

    /// Worker threads. With more than one the whole file is loaded first.
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Show every pair choice of one hand, e.g. "CC 234s 345m 567p 678s".
    #[arg(long, value_name = "HAND")]
    explain: Option<String>,

    #[arg(long)]
    no_progress: bool,

    /// -v for info, -vv for debug, -vvv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    let variant = Variant::from(args.variant);
    if let Some(s) = &args.explain {
        let h = hand(variant, s).with_context(|| format!("invalid hand {s:?}"))?;
        print!("{}", explain::explain(&h));
        return Ok(());
    }

    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(variant.default_input()));
    log::info!("reading {} as {variant} records", path.display());

    let stats = tally(&args, variant, &path)
        .with_context(|| format!("error when tallying {}", path.display()))?;
    log::info!(
        "{} records, {} combinations",
        stats.records(),
        stats.total_combinations(),
    );

    if args.json {
        println!("{}", report::to_json(&stats)?);
    } else {
        print!("{}", report::to_text(&stats));
    }
    Ok(())
}

fn tally(args: &Args, variant: Variant, path: &Path) -> Result<Stats> {
    if args.jobs > 1 {
        let data = dataset::read_all(path)?;
        let pb = progress_bar(
            Some(dataset::record_count(variant, data.len() as u64)),
            args.no_progress,
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build()
            .context("failed to build the worker pool")?;
        let stats = pool.install(|| {
            let hands = dataset::par_records(variant, &data).progress_with(pb.clone());
            dataset::tally_par(variant, hands)
        })?;
        pb.finish_and_clear();
        Ok(stats)
    } else {
        let len = dataset::input_len(path).map(|bytes| dataset::record_count(variant, bytes));
        let pb = progress_bar(len, args.no_progress);
        let hands = dataset::records(variant, path)?.progress_with(pb.clone());
        let stats = dataset::tally(variant, hands)?;
        pb.finish_and_clear();
        Ok(stats)
    }
}

fn progress_bar(len: Option<u64>, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let (pb, template) = match len {
        Some(n) => (
            ProgressBar::new(n),
            "{spinner:.cyan} [{elapsed_precise}] [{wide_bar}] {human_pos}/{human_len} ({eta})",
        ),
        None => (
            ProgressBar::new_spinner(),
            "{spinner:.cyan} [{elapsed_precise}] {human_pos} records ({per_sec})",
        ),
    };
    match ProgressStyle::with_template(template) {
        Ok(style) => pb.set_style(style),
        Err(err) => log::debug!("progress template: {err}"),
    }
    pb
}
