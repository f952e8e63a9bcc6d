use std::path::Path;

use crate::foundation::error::{OverlogError, OverlogResult};

/// An immutable, time-ordered instrument log.
///
/// Times are seconds (converted from the log file's milliseconds at load), non-decreasing,
/// length >= 2. Value bounds are computed once at load so the chart's y axis never jitters
/// frame to frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<i64>,
    min_value: i64,
    max_value: i64,
}

impl TimeSeries {
    /// Build from parallel time/value columns, validating the series invariants.
    pub fn from_parts(times: Vec<f64>, values: Vec<i64>) -> OverlogResult<Self> {
        if times.len() != values.len() {
            return Err(OverlogError::load(format!(
                "series columns differ in length: {} times, {} values",
                times.len(),
                values.len()
            )));
        }
        if times.len() < 2 {
            return Err(OverlogError::load(format!(
                "series must contain at least 2 records, got {}",
                times.len()
            )));
        }
        for (i, pair) in times.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(OverlogError::load(format!(
                    "series times decrease at record {}: {} -> {}",
                    i + 2,
                    pair[0],
                    pair[1]
                )));
            }
        }
        let min_value = values.iter().copied().min().unwrap_or(0);
        let max_value = values.iter().copied().max().unwrap_or(0);
        Ok(Self {
            times,
            values,
            min_value,
            max_value,
        })
    }

    /// Parse log text: one `"<time_ms>, <value>"` record per line.
    ///
    /// A malformed line is a load error naming its 1-based line number; a trailing blank line
    /// is tolerated.
    pub fn parse(text: &str) -> OverlogResult<Self> {
        let mut times = Vec::new();
        let mut values = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (time_ms, value) = parse_record(line)
                .map_err(|msg| OverlogError::load(format!("log line {}: {msg}", idx + 1)))?;
            times.push(time_ms / 1000.0);
            values.push(value);
        }
        Self::from_parts(times, values)
    }

    /// Read and parse a log file.
    pub fn load(path: &Path) -> OverlogResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OverlogError::load(format!("failed to read log '{}': {e}", path.display()))
        })?;
        Self::parse(&text)
            .map_err(|e| OverlogError::load(format!("log '{}': {e}", path.display())))
    }

    /// Number of records. Always >= 2.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of record `idx`, in seconds.
    pub fn time(&self, idx: usize) -> f64 {
        self.times[idx]
    }

    /// Value of record `idx`.
    pub fn value(&self, idx: usize) -> i64 {
        self.values[idx]
    }

    /// First record time, in seconds.
    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    /// Last record time, in seconds.
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Smallest value in the series.
    pub fn min_value(&self) -> i64 {
        self.min_value
    }

    /// Largest value in the series.
    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    /// All records as `(seconds, value)` plot points, in series order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .zip(self.values.iter())
            .map(|(&t, &v)| (t, v as f64))
    }
}

fn parse_record(line: &str) -> Result<(f64, i64), String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 2 {
        return Err(format!("expected 2 fields, got {}", fields.len()));
    }
    let time_ms: f64 = fields[0]
        .trim()
        .parse()
        .map_err(|_| format!("invalid time '{}'", fields[0].trim()))?;
    let value: i64 = fields[1]
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}'", fields[1].trim()))?;
    Ok((time_ms, value))
}

#[cfg(test)]
#[path = "../../tests/unit/series/log.rs"]
mod tests;
