//! Gradecast -- interactive final-grade predictor.
//!
//! Loads the model, walks the operator through the questionnaire on
//! stdin/stdout, and prints the predicted G3 grade.
//!
//! Usage:
//!   gradecast [--model PATH] [--log LEVEL] [--quiet]

use std::env;
use std::io::{self, Write};
use std::process;

use gradecast::config::{Config, Invocation};
use gradecast::form::{run_form, RESULT_LABEL};
use gradecast::logging;
use gradecast::Predictor;

fn main() {
    let config = match Config::from_env().and_then(|c| c.parse_args(env::args().skip(1))) {
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
    logging::init(config.log_level);

    // The model must load before any question is asked.
    let predictor = match Predictor::load(&config.model_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = io::BufWriter::new(stdout.lock());

    let raw = match run_form(&mut input, &mut out) {
        Ok(raw) => raw,
        Err(e) => {
            let _ = out.flush();
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    match predictor.predict(&raw) {
        Ok(grade) => {
            if writeln!(out, "{} {}", RESULT_LABEL, grade)
                .and_then(|_| out.flush())
                .is_err()
            {
                process::exit(1);
            }
        }
        Err(e) => {
            let _ = out.flush();
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: gradecast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --model PATH   Model artifact, .json or .onnx (default: model.json)");
    eprintln!("  --log LEVEL    off, error, warn, info, debug, trace (default: info)");
    eprintln!("  --quiet        Same as --log off");
    eprintln!("  --help         Show this help");
    eprintln!();
    eprintln!("Environment: GRADECAST_MODEL, GRADECAST_LOG");
}
