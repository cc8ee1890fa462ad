//! Batch final-grade prediction.
//!
//! Reads one student record per line as JSON and writes one result per
//! line, predicting rows in parallel.
//!
//! Usage:
//!   gradecast-batch [OPTIONS]
//!
//! Options:
//!   --model PATH    Model artifact (default: model.json)
//!   --input FILE    JSONL input (default: stdin)
//!   --output FILE   JSONL output (default: stdout)
//!   --threads N     Worker threads (default: 4)
//!   --sample N      Predict N random form answers instead of reading input
//!   --seed N        Seed for --sample, 0 for entropy (default: 0)
//!   --log LEVEL     Log level (default: info)
//!   --quiet         Suppress log output

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use gradecast::batch::{self, BatchRow};
use gradecast::config::{BatchConfig, Config, Invocation};
use gradecast::logging;
use gradecast::Predictor;

fn main() {
    let parsed = Config::from_env()
        .and_then(|base| BatchConfig::new(base).parse_args(env::args().skip(1)));
    let config = match parsed {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(2);
        }
    };
    logging::init(config.base.log_level);

    let predictor = match Predictor::load(&config.base.model_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let rows = match load_rows(&config) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: failed to read input: {}", e);
            process::exit(1);
        }
    };

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("error: failed to build thread pool: {}", e);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let echo = config.sample.is_some();
    let records = pool.install(|| batch::run_batch(&predictor, rows, echo));
    log::info!(
        "Batch of {} finished in {:.1}ms on {} threads",
        records.len(),
        start.elapsed().as_secs_f64() * 1000.0,
        config.threads
    );

    let written = match &config.output {
        Some(path) => File::create(path)
            .and_then(|file| batch::write_jsonl(&records, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            batch::write_jsonl(&records, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        eprintln!("error: failed to write output: {}", e);
        process::exit(1);
    }
}

fn load_rows(config: &BatchConfig) -> io::Result<Vec<BatchRow>> {
    if let Some(count) = config.sample {
        let mut rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        return Ok(batch::sample_rows(count, &mut rng));
    }
    match &config.input {
        Some(path) => batch::read_jsonl(BufReader::new(File::open(path)?)),
        None => {
            let stdin = io::stdin();
            batch::read_jsonl(stdin.lock())
        }
    }
}

fn print_usage() {
    eprintln!("Usage: gradecast-batch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --model PATH    Model artifact, .json or .onnx (default: model.json)");
    eprintln!("  --input FILE    JSONL input (default: stdin)");
    eprintln!("  --output FILE   JSONL output (default: stdout)");
    eprintln!("  --threads N     Worker threads (default: 4)");
    eprintln!("  --sample N      Predict N random form answers instead of reading input");
    eprintln!("  --seed N        Seed for --sample, 0 for entropy (default: 0)");
    eprintln!("  --log LEVEL     off, error, warn, info, debug, trace (default: info)");
    eprintln!("  --quiet         Suppress log output");
    eprintln!("  --help          Show this help");
}
