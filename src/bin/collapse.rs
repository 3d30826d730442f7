use anyhow::{Context, Result};
use clap::Parser;
use collapse::{
    representatives, Agglomerative, Centroid, LastBySuffix, Partition, RepresentativeSelector,
    ScoreTable, Strategy, WithFallback, DEFAULT_THRESHOLD,
};
use std::fs;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Collapse near-duplicate files into clusters and print one file per cluster.
///
/// Usage:
///    sherlock -t 15 *.c* > report.txt
///    collapse --report report.txt --dir . --ext c --ext cpp
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comparison report, one `<a> and <b>: <score>%` line per pair (`-` for stdin)
    #[arg(short, long)]
    report: PathBuf,

    /// Directory whose files are the items to cluster
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// File extensions to include
    #[arg(short, long = "ext", default_values = ["c", "cpp"])]
    extensions: Vec<String>,

    /// Take the items from the report instead of listing a directory
    #[arg(long, conflicts_with = "dir")]
    items_from_report: bool,

    /// Minimum link score required to merge two clusters
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Representative policy: `last` or `centroid`
    #[arg(short, long, default_value_t = Strategy::Last, value_parser = parse_strategy)]
    strategy: Strategy,

    /// Use the centroid when `last` cannot read a sequence number
    #[arg(long)]
    fallback: bool,

    /// Print every cluster member after its representative
    #[arg(short, long)]
    members: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_strategy(s: &str) -> collapse::Result<Strategy> {
    s.parse()
}

fn configure_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Where the comparison report comes from.
#[derive(Debug, PartialEq, Eq)]
enum ReportSource<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> ReportSource<'a> {
    fn from_arg(report: &'a Path) -> Self {
        if report == Path::new("-") {
            ReportSource::Stdin
        } else {
            ReportSource::File(report)
        }
    }
}

fn read_scores(source: ReportSource<'_>) -> Result<ScoreTable> {
    match source {
        ReportSource::Stdin => {
            ScoreTable::from_reader(io::stdin().lock()).context("reading report from stdin")
        }
        ReportSource::File(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("opening report {}", path.display()))?;
            ScoreTable::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing report {}", path.display()))
        }
    }
}

fn list_items(dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x == e));
        if !wanted {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => items.push(name),
            Err(name) => debug!(?name, "skipping non-UTF-8 file name"),
        }
    }
    Ok(items)
}

fn build_selector(strategy: Strategy, fallback: bool) -> Box<dyn RepresentativeSelector> {
    match (strategy, fallback) {
        (Strategy::Last, true) => Box::new(WithFallback::new(LastBySuffix::new(), Centroid)),
        (strategy, _) => Box::new(strategy),
    }
}

/// One line per cluster: the representative, then (with `members`) a tab and
/// the remaining members separated by spaces.
fn write_representatives<W: Write>(
    out: &mut W,
    partition: &Partition,
    reps: &[&str],
    members: bool,
) -> io::Result<()> {
    for (rep, cluster) in reps.iter().zip(partition.clusters()) {
        if members {
            let others: Vec<&str> = cluster.members().filter(|m| m != rep).collect();
            writeln!(out, "{rep}\t{}", others.join(" "))?;
        } else {
            writeln!(out, "{rep}")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let scores = read_scores(ReportSource::from_arg(&args.report))?;
    info!(pairs = scores.len(), "loaded scores");

    let items: Vec<String> = if args.items_from_report {
        scores.items().into_iter().map(str::to_string).collect()
    } else {
        list_items(&args.dir, &args.extensions)?
    };
    info!(items = items.len(), "collected items");

    let partition = Agglomerative::new()
        .with_threshold(args.threshold)
        .fit(&items, &scores);

    let selector = build_selector(args.strategy, args.fallback);
    let reps = representatives(&partition, &scores, selector.as_ref())
        .context("selecting representatives")?;

    let stdout = io::stdout();
    write_representatives(&mut stdout.lock(), &partition, &reps, args.members)?;
    Ok(())
}
