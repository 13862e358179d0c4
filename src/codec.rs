//! Reading and writing signals as plain text or JSON documents.
//!
//! Text input is a sequence of whitespace or newline separated tokens. Text
//! output writes one value per line.

use std::fmt;
use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::PercentileError;
use crate::sample::Sample;
use crate::signal::{ElementType, Signal};
use crate::sliding_percentile::SlidingPercentile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown format '{}', expected text or json", s)),
        }
    }
}

/// A sample that has a text representation.
trait Token: Sample + fmt::Display {
    fn parse_token(token: &str) -> Option<Self>;
}

impl Token for f32 {
    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Token for f64 {
    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Token for bool {
    fn parse_token(token: &str) -> Option<Self> {
        match token {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// Parses every token of one line, `line_no` is 1-based.
fn parse_line<T: Token>(line: &str, line_no: usize) -> Result<Vec<T>, PercentileError> {
    line.split_whitespace()
        .map(|token| {
            T::parse_token(token).ok_or_else(|| PercentileError::Parse {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

fn read_tokens<T: Token, R: BufRead>(reader: R) -> Result<Vec<T>, PercentileError> {
    let mut values = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        values.extend(parse_line::<T>(&line?, index + 1)?);
    }
    Ok(values)
}

fn write_tokens<T: Token, W: Write>(writer: &mut W, values: &[T]) -> Result<(), PercentileError> {
    for value in values {
        writeln!(writer, "{}", value)?;
    }
    Ok(())
}

/// Reads a whole signal. Text input is interpreted as `element_type`; a JSON
/// document carries its own type.
pub fn read_signal<R: BufRead>(
    reader: R,
    format: Format,
    element_type: ElementType,
) -> Result<Signal, PercentileError> {
    let signal = match format {
        Format::Json => {
            let signal: Signal = serde_json::from_reader(reader)?;
            if signal.element_type() != element_type {
                debug!(
                    "Document type {} overrides requested type {}",
                    signal.element_type(),
                    element_type
                );
            }
            signal
        }
        Format::Text => match element_type {
            ElementType::Single => Signal::Single(read_tokens(reader)?),
            ElementType::Double => Signal::Double(read_tokens(reader)?),
            ElementType::Logical => Signal::Logical(read_tokens(reader)?),
        },
    };
    debug!("Read {} {} samples", signal.len(), signal.element_type());
    Ok(signal)
}

pub fn write_signal<W: Write>(
    writer: &mut W,
    format: Format,
    signal: &Signal,
) -> Result<(), PercentileError> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *writer, signal)?;
            writeln!(writer)?;
        }
        Format::Text => match signal {
            Signal::Single(data) => write_tokens(writer, data)?,
            Signal::Double(data) => write_tokens(writer, data)?,
            Signal::Logical(data) => write_tokens(writer, data)?,
        },
    }
    writer.flush()?;
    Ok(())
}

fn stream_tokens<T: Token, R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    window: NonZeroUsize,
    rank: NonZeroUsize,
) -> Result<usize, PercentileError> {
    let mut filter = SlidingPercentile::<T>::new(window, rank);
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let values = parse_line::<T>(&line?, index + 1)?;
        for value in values {
            writeln!(writer, "{}", filter.consume(value))?;
            count += 1;
        }
        // Keep output in step with input when reading from a pipe.
        writer.flush()?;
        trace!("Line {}: occupancy {}", index + 1, filter.occupancy());
    }
    Ok(count)
}

/// Filters text input line by line with bounded memory, writing one output
/// value per input value as soon as its line has been read. Returns the
/// number of values processed.
pub fn stream_text<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    element_type: ElementType,
    window: NonZeroUsize,
    rank: NonZeroUsize,
) -> Result<usize, PercentileError> {
    match element_type {
        ElementType::Single => stream_tokens::<f32, _, _>(reader, writer, window, rank),
        ElementType::Double => stream_tokens::<f64, _, _>(reader, writer, window, rank),
        ElementType::Logical => stream_tokens::<bool, _, _>(reader, writer, window, rank),
    }
}
