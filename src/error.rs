use thiserror::Error;

#[derive(Debug, Error)]
pub enum PercentileError {
    #[error("Window length must be a positive integer")]
    InvalidWindow,
    #[error("Rank must be a positive integer")]
    InvalidRank,
    #[error("No rank given, pass a rank, --median or --percentile")]
    MissingRank,
    #[error("Percentile must be a finite value in [0, 100], got {0}")]
    InvalidPercentile(f64),
    #[error("The data type '{0}' is not supported, expected single, double or logical")]
    UnsupportedType(String),
    #[error("Output buffer holds {output} elements but the input has {input}")]
    LengthMismatch { input: usize, output: usize },
    #[error("Cannot parse '{token}' on line {line}")]
    Parse { line: usize, token: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
