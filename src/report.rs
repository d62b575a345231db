use std::io::Write;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::indicators::WindowSize;

/// Result of a closure together with how long it took.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Averages of one series plus how they were computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub name: String,
    pub window_size: usize,
    pub count: usize,
    pub elapsed_nanos: u64,
    pub averages: Vec<f64>,
}

impl Report {
    pub fn new(name: impl Into<String>, window_size: WindowSize, timed: Timed<Vec<f64>>) -> Self {
        Report {
            name: name.into(),
            window_size: window_size.get(),
            count: timed.value.len(),
            elapsed_nanos: u64::try_from(timed.elapsed.as_nanos()).unwrap_or(u64::MAX),
            averages: timed.value,
        }
    }

    /// Writes the timing line and the formatted averages. `named` adds a
    /// leading line with the series name.
    pub fn write_text<W: Write>(&self, out: &mut W, precision: usize, named: bool) -> std::io::Result<()> {
        if named {
            writeln!(out, "{}:", self.name)?;
        }
        writeln!(out, "Total computation time: {}", self.elapsed_nanos)?;
        writeln!(out, "{}", format_averages(&self.averages, precision))
    }
}

/// Each average with `precision` decimals, every one followed by two spaces.
pub fn format_averages(averages: &[f64], precision: usize) -> String {
    let mut line = String::with_capacity(averages.len() * (precision + 6));
    for average in averages {
        line.push_str(&format!("{:.*}  ", precision, average));
    }
    line
}

pub fn write_json<W: Write>(out: &mut W, reports: &[Report]) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out).map_err(serde_json::Error::io)
}
