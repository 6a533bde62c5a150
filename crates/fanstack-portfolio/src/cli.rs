#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand. Environment variables with the `FANSTACK_DEMO_*`
//! prefix supply defaults that explicit flags override.

use std::fmt;
use std::path::PathBuf;

use fanstack_core::motion::parse_bool;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
fanstack demo: certifications card stack with auto-advance

USAGE:
    fanstack-demo [OPTIONS]

OPTIONS:
    --store=PATH         Persist portfolio sections in a JSON file
                         (default: in-memory sample content)
    --interval-ms=N      Auto-advance period in ms, at least 700 (default: 3000)
    --ticks=N            Stop after N timer ticks (default: 3)
    --reduced-motion     Disable swipes and auto-advance
    --resume             Print the resume and exit
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    FANSTACK_DEMO_STORE           Override --store
    FANSTACK_DEMO_INTERVAL_MS     Override --interval-ms
    FANSTACK_DEMO_TICKS           Override --ticks
    FANSTACK_REDUCED_MOTION       Request reduced motion (1/0)
    FANSTACK_LOG                  Log filter (default: info)
    FANSTACK_LOG_JSON             Log as JSON lines (1/0)
    FANSTACK_ADMIN_USERNAME       Admin account name
    FANSTACK_ADMIN_PASSWORD       Admin account password";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// JSON file backing the section store; `None` keeps content in memory.
    pub store: Option<PathBuf>,
    pub interval_ms: u64,
    /// Timer ticks to wait for before exiting.
    pub ticks: u32,
    /// Force reduced motion regardless of `FANSTACK_REDUCED_MOTION`.
    pub reduced_motion: bool,
    pub print_resume: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            store: None,
            interval_ms: 3000,
            ticks: 3,
            reduced_motion: false,
            print_resume: false,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            CliError::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, CliError> {
        Self::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parse `args` (without the program name) using a custom environment
    /// lookup.
    pub fn parse_from<I, F>(args: I, get_env: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment defaults first.
        if let Some(val) = get_env("FANSTACK_DEMO_STORE")
            && !val.is_empty()
        {
            opts.store = Some(PathBuf::from(val));
        }
        if let Some(val) = get_env("FANSTACK_DEMO_INTERVAL_MS")
            && let Ok(n) = val.parse()
        {
            opts.interval_ms = n;
        }
        if let Some(val) = get_env("FANSTACK_DEMO_TICKS")
            && let Ok(n) = val.parse()
        {
            opts.ticks = n;
        }
        if let Some(true) = get_env("FANSTACK_REDUCED_MOTION").and_then(|v| parse_bool(&v)) {
            opts.reduced_motion = true;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--reduced-motion" => opts.reduced_motion = true,
                "--resume" => opts.print_resume = true,
                other => {
                    if let Some(val) = other.strip_prefix("--store=") {
                        opts.store = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--interval-ms=") {
                        opts.interval_ms = parse_value("--interval-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--ticks=") {
                        opts.ticks = parse_value("--ticks", val)?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}

fn parse_value<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}
