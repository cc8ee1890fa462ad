//! Runtime configuration.
//!
//! Values start from built-in defaults, are overridden by `GRADECAST_*`
//! environment variables, then by command-line flags.

use std::path::PathBuf;

use log::LevelFilter;

/// Model artifact used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Environment variable naming the model artifact.
pub const ENV_MODEL: &str = "GRADECAST_MODEL";

/// Environment variable holding the log level.
pub const ENV_LOG: &str = "GRADECAST_LOG";

/// Errors from environment or argument parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {flag}: '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Outcome of parsing a command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<T> {
    Run(T),
    Help,
}

/// Settings shared by every binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(path) = lookup(ENV_MODEL).filter(|p| !p.is_empty()) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG) {
            config.log_level = parse_level(ENV_LOG, &level)?;
        }
        Ok(config)
    }

    /// Applies a shared flag. Returns `Ok(false)` if `flag` is not one.
    fn apply_flag<I: Iterator<Item = String>>(
        &mut self,
        flag: &str,
        args: &mut I,
    ) -> Result<bool, ConfigError> {
        match flag {
            "--model" => self.model_path = PathBuf::from(next_value(flag, args)?),
            "--log" => self.log_level = parse_level(flag, &next_value(flag, args)?)?,
            "--quiet" => self.log_level = LevelFilter::Off,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Parses the interactive binary's arguments (program name excluded).
    pub fn parse_args<I>(mut self, args: I) -> Result<Invocation<Config>, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if is_help(&arg) {
                return Ok(Invocation::Help);
            }
            if !self.apply_flag(&arg, &mut args)? {
                return Err(ConfigError::UnknownArgument(arg));
            }
        }
        Ok(Invocation::Run(self))
    }
}

/// Settings for the batch binary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub base: Config,
    /// JSONL input file; stdin when unset.
    pub input: Option<PathBuf>,
    /// JSONL output file; stdout when unset.
    pub output: Option<PathBuf>,
    /// Worker threads for parallel prediction.
    pub threads: usize,
    /// Generate this many random records instead of reading input.
    pub sample: Option<usize>,
    /// Seed for `sample` (0 = entropy).
    pub seed: u64,
}

impl BatchConfig {
    pub fn new(base: Config) -> Self {
        BatchConfig {
            base,
            input: None,
            output: None,
            threads: 4,
            sample: None,
            seed: 0,
        }
    }

    /// Parses the batch binary's arguments (program name excluded).
    pub fn parse_args<I>(mut self, args: I) -> Result<Invocation<BatchConfig>, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if is_help(&arg) {
                return Ok(Invocation::Help);
            }
            if self.base.apply_flag(&arg, &mut args)? {
                continue;
            }
            match arg.as_str() {
                "--input" => self.input = Some(PathBuf::from(next_value(&arg, &mut args)?)),
                "--output" => self.output = Some(PathBuf::from(next_value(&arg, &mut args)?)),
                "--threads" => {
                    self.threads = parse_number(&arg, &next_value(&arg, &mut args)?)?;
                    if self.threads == 0 {
                        return Err(ConfigError::InvalidValue {
                            flag: arg,
                            value: "0".to_string(),
                        });
                    }
                }
                "--sample" => self.sample = Some(parse_number(&arg, &next_value(&arg, &mut args)?)?),
                "--seed" => self.seed = parse_number(&arg, &next_value(&arg, &mut args)?)?,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(Invocation::Run(self))
    }
}

fn is_help(arg: &str) -> bool {
    arg == "--help" || arg == "-h"
}

fn next_value<I: Iterator<Item = String>>(flag: &str, args: &mut I) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

fn parse_level(source: &str, value: &str) -> Result<LevelFilter, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        flag: source.to_string(),
        value: value.to_string(),
    })
}
