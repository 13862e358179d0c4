include!(concat!(env!("OUT_DIR"), "/version.rs"));

use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::{ArgGroup, Parser};
use log::LevelFilter;

use crate::codec::Format;
use crate::error::PercentileError;
use crate::percentile::{median_rank, rank_for_percentile};
use crate::signal::ElementType;

/// Running percentile of a one-dimensional signal.
#[derive(Parser, Debug, Default)]
#[clap(group(ArgGroup::new("rank_source").args(["nth", "median", "percentile"])))]
pub struct Opts {
    /// Number of trailing samples in the window
    #[clap(short, long, required_unless_present_any = ["schema", "version"])]
    pub window: Option<usize>,
    /// Report the n-th smallest value of each window (1-indexed)
    #[clap(short = 'n', long = "rank")]
    pub nth: Option<usize>,
    /// Report the median, rank ceil(window / 2)
    #[clap(short, long)]
    pub median: bool,
    /// Report the nearest-rank percentile, 0 to 100
    #[clap(short, long)]
    pub percentile: Option<f64>,
    /// Element type of text input: single, double or logical
    #[clap(short = 't', long = "type", default_value = "double")]
    pub element_type: ElementType,
    /// text or json
    #[clap(short, long, default_value = "text")]
    pub format: Format,
    /// Input file, stdin when omitted
    #[clap(short, long)]
    pub input: Option<PathBuf>,
    /// Output file, stdout when omitted
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Process text input line by line with bounded memory
    #[clap(short, long)]
    pub stream: bool,
    /// Print the JSON schema of the document format and exit
    #[clap(long)]
    pub schema: bool,
    #[clap(short, long, default_value = "info")]
    pub log_level: String,
    #[clap(short, long)]
    pub version: bool,
}

impl Opts {
    pub fn window_len(&self) -> Result<NonZeroUsize, PercentileError> {
        self.window
            .and_then(NonZeroUsize::new)
            .ok_or(PercentileError::InvalidWindow)
    }

    /// Rank from whichever of `--rank`, `--median` or `--percentile` was given.
    pub fn resolve_rank(&self, window: NonZeroUsize) -> Result<NonZeroUsize, PercentileError> {
        match (self.nth, self.median, self.percentile) {
            (Some(nth), _, _) => NonZeroUsize::new(nth).ok_or(PercentileError::InvalidRank),
            (None, true, _) => Ok(median_rank(window)),
            (None, false, Some(percent)) => rank_for_percentile(window, percent),
            (None, false, None) => Err(PercentileError::MissingRank),
        }
    }
}

pub struct Options {
    pub exe: String,
    pub log_level: LevelFilter,
}

impl Options {
    pub fn new(opts: &Opts) -> Self {
        let exe_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        let log_level = match opts.log_level.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };

        Options {
            exe: exe_name,
            log_level,
        }
    }
}

// Singleton for Options, read by the logger
lazy_static::lazy_static! {
    static ref OPTIONS: Arc<Mutex<Options>> = Arc::new(Mutex::new(Options {
        exe: String::new(),
        log_level: LevelFilter::Info,
    }));
}

fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Build date: {}", BUILD_DATE);
    println!("Commit date: {}", GIT_COMMIT_DATE);
    println!("Branch: {}", GIT_BRANCH);
    println!("Hash: {} - {}", GIT_HASH, GIT_IS_DIRTY);
}

/// Parses `args` and stores the program-wide options.
pub fn try_init_from<I, T>(args: I) -> Result<Opts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let opts = Opts::try_parse_from(args)?;
    if opts.version {
        print_version();
        exit(0)
    }
    let mut options = OPTIONS.lock().unwrap_or_else(|e| e.into_inner());
    *options = Options::new(&opts);
    Ok(opts)
}

pub fn try_init() -> Result<Opts, clap::Error> {
    try_init_from(std::env::args_os())
}

/// Like [`try_init`], but prints usage and exits on bad arguments.
pub fn init() -> Opts {
    match try_init() {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    }
}

pub fn exe_name() -> String {
    let options = OPTIONS.lock().unwrap_or_else(|e| e.into_inner());
    options.exe.clone()
}

pub fn log_lvl() -> LevelFilter {
    let options = OPTIONS.lock().unwrap_or_else(|e| e.into_inner());
    options.log_level
}
