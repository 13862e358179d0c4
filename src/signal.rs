use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PercentileError;
use crate::percentile::running_percentile;

/// Element types accepted at the caller-facing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementType {
    Single,
    #[default]
    Double,
    Logical,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ElementType::Single => write!(f, "single"),
            ElementType::Double => write!(f, "double"),
            ElementType::Logical => write!(f, "logical"),
        }
    }
}

impl FromStr for ElementType {
    type Err = PercentileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "float" | "f32" => Ok(ElementType::Single),
            "double" | "f64" => Ok(ElementType::Double),
            "logical" | "bool" => Ok(ElementType::Logical),
            _ => Err(PercentileError::UnsupportedType(s.to_string())),
        }
    }
}

/// A one-dimensional signal of one of the supported element types.
///
/// Serialized as `{"type": "double", "data": [1.0, 2.0]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Signal {
    Single(Vec<f32>),
    Double(Vec<f64>),
    Logical(Vec<bool>),
}

impl Signal {
    pub fn len(&self) -> usize {
        match self {
            Signal::Single(data) => data.len(),
            Signal::Double(data) => data.len(),
            Signal::Logical(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Signal::Single(_) => ElementType::Single,
            Signal::Double(_) => ElementType::Double,
            Signal::Logical(_) => ElementType::Logical,
        }
    }

    /// JSON schema of the serialized document.
    pub fn schema() -> Result<String, PercentileError> {
        Ok(serde_json::to_string_pretty(&schemars::schema_for!(Signal))?)
    }

    /// Running `rank`-th smallest value over a trailing window of `window`
    /// samples. The result has the same element type and length.
    ///
    /// Zero window or rank are rejected here so the core never sees them.
    pub fn running_percentile(&self, window: usize, rank: usize) -> Result<Signal, PercentileError> {
        let window = NonZeroUsize::new(window).ok_or(PercentileError::InvalidWindow)?;
        let rank = NonZeroUsize::new(rank).ok_or(PercentileError::InvalidRank)?;
        debug!(
            "Dispatching {} signal of {} samples",
            self.element_type(),
            self.len()
        );

        Ok(match self {
            Signal::Single(data) => Signal::Single(running_percentile(data, window, rank)),
            Signal::Double(data) => Signal::Double(running_percentile(data, window, rank)),
            Signal::Logical(data) => Signal::Logical(running_percentile(data, window, rank)),
        })
    }
}

impl From<Vec<f32>> for Signal {
    fn from(data: Vec<f32>) -> Self {
        Signal::Single(data)
    }
}

impl From<Vec<f64>> for Signal {
    fn from(data: Vec<f64>) -> Self {
        Signal::Double(data)
    }
}

impl From<Vec<bool>> for Signal {
    fn from(data: Vec<bool>) -> Self {
        Signal::Logical(data)
    }
}
