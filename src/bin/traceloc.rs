use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Once;
use tracing::info;
use traceloc::dictionary::Dictionary;
use traceloc::pipeline::{self, LocalizeConfig};
use traceloc::report::{self, CsvFile};
use traceloc::scorer::TokenTableScorer;
use traceloc::trace::Sample;

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

#[derive(Parser, Debug)]
#[command(name = "traceloc", version, about = "Localize the most anomalous segments of API-call traces")]
struct Cli {
    /// Trace file: one JSON array of call ids per line (`-` for stdin)
    #[arg(required = true)]
    traces: String,

    /// Scorer model file (JSON: {"weights": {call id: log-likelihood weight}, "unknown_weight": float})
    #[arg(long = "model")]
    model: PathBuf,

    /// Dictionary file (JSON: method name -> call id)
    #[arg(long = "dict")]
    dict: PathBuf,

    /// Injected behavior pattern to evaluate against, as comma-separated
    /// method names. Omit for real data with no ground truth.
    #[arg(long = "pattern")]
    pattern: Option<String>,

    /// Minimum length a split block may have
    #[arg(long = "min-length-blocks", default_value_t = 2)]
    min_length_blocks: usize,

    /// Write the ranked table to this CSV file instead of stdout
    #[arg(long = "output")]
    output: Option<PathBuf>,
}

fn read_samples(path: &str) -> anyhow::Result<Vec<Sample>> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    let mut samples = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let calls: Vec<u32> = serde_json::from_str(&line)?;
        samples.push(Sample::new(calls));
    }
    Ok(samples)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    init_parallelism();
    let cli = Cli::parse();

    let samples = read_samples(&cli.traces)?;
    let scorer = TokenTableScorer::from_json(&fs::read_to_string(&cli.model)?)?;
    let dictionary = Dictionary::from_json(&fs::read_to_string(&cli.dict)?)?;
    let pattern: Option<Vec<String>> = cli
        .pattern
        .map(|p| p.split(',').map(|s| s.trim().to_string()).collect());

    let cfg = LocalizeConfig { min_length_blocks: cli.min_length_blocks };
    let outcome = pipeline::localize_corpus(&samples, &cfg, &scorer);
    info!(
        localized = outcome.localized,
        unlocalized = outcome.unlocalized,
        failed = outcome.failed,
        "corpus localized"
    );

    let report = report::assemble(&outcome.table, &dictionary, pattern.as_deref());
    match cli.output {
        Some(path) => {
            let mut sink = CsvFile::create(&path)?;
            let written = report::write_csv(&report, &mut sink);
            info!(written, path = %path.display(), "report written");
        }
        None => {
            for line in report::csv_lines(&report) {
                println!("{line}");
            }
        }
    }

    // Keep the denominator auditable next to the ranked table.
    eprintln!(
        "{} of {} traces localized ({} unlocalized, {} failed, {} rows skipped)",
        outcome.localized,
        samples.len(),
        outcome.unlocalized,
        outcome.failed,
        report.skipped
    );
    Ok(())
}
