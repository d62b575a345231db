//! Turns command-line arguments, an optional JSON settings file and, when
//! needed, interactive answers into a validated [`RunConfig`].

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use getopts::{Matches, Options};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InputError;
use crate::generator::{DEFAULT_MAX, DEFAULT_MIN, ValueRange};
use crate::indicators::WindowSize;

pub const DEFAULT_PRECISION: usize = 2;
/// Enough digits to round-trip any `f64`.
pub const MAX_PRECISION: usize = 17;

const NUMBER_PROMPT: &str = "Array Size (value over 2): ";
const WINDOW_PROMPT: &str = "Window Size: (positive int less than array size): ";
const WINDOW_ONLY_PROMPT: &str = "Window Size: (positive int): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings file contents. Every field is optional; command-line values win.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub number: Option<i64>,
    pub window_size: Option<i64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: Option<usize>,
    pub seed: Option<u64>,
    pub input: Option<String>,
    pub column: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Where the values to average come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Random { number: usize },
    Files { pattern: String, column: Option<usize> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub source: Source,
    pub window_size: WindowSize,
    pub range: ValueRange,
    pub precision: usize,
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Run(RunConfig),
    Help(String),
}

/// Source of interactive answers. `Ok(None)` means the input is exhausted.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>, InputError>;
}

/// Prompts on a writer and reads one answer per line.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompt { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>, InputError> {
        write!(self.writer, "{}", message)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

pub fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("c", "config", "read settings from a JSON file", "PATH");
    opts.optopt("i", "input", "average values from CSV files matching a glob", "GLOB");
    opts.optopt("", "column", "zero-based CSV column to read (default: last)", "INDEX");
    opts.optopt("s", "seed", "seed for generated values", "SEED");
    opts.optopt("p", "precision", "decimal places when printing (default: 2)", "DIGITS");
    opts.optopt("", "min", "lower bound for generated values (default: -10)", "VALUE");
    opts.optopt("", "max", "upper bound for generated values (default: 10)", "VALUE");
    opts.optflag("", "json", "print reports as JSON");
    opts.optflag("v", "verbose", "enable debug logging");
    opts.optflag("h", "help", "print this help");
    opts
}

pub fn usage() -> String {
    options().usage(
        "Usage: moving-average [options] <number> <window_size>\n       \
         moving-average [options] --input <glob> <window_size>",
    )
}

/// Resolves a run configuration from `args` (program name excluded).
///
/// With `--input`, the single positional argument is the window size. Without
/// it, the positionals are the array length and the window size. Whatever is
/// missing or not an integer (and not supplied by the settings file) is asked
/// for through `prompt`; an array length below 2 is asked for again.
pub fn resolve<P: Prompt + ?Sized>(args: &[String], prompt: &mut P) -> Result<Resolution, InputError> {
    let matches = options().parse(args)?;
    if matches.opt_present("help") {
        return Ok(Resolution::Help(usage()));
    }

    let file = match matches.opt_str("config") {
        Some(path) => FileConfig::load(Path::new(&path))?,
        None => FileConfig::default(),
    };

    let range = ValueRange::new(
        parse_opt(&matches, "min")?.or(file.min).unwrap_or(DEFAULT_MIN),
        parse_opt(&matches, "max")?.or(file.max).unwrap_or(DEFAULT_MAX),
    )?;
    let precision = parse_opt(&matches, "precision")?
        .or(file.precision)
        .unwrap_or(DEFAULT_PRECISION);
    if precision > MAX_PRECISION {
        return Err(InputError::InvalidValue {
            option: "precision".to_string(),
            value: precision.to_string(),
        });
    }
    let seed = parse_opt(&matches, "seed")?.or(file.seed);
    let column = parse_opt(&matches, "column")?.or(file.column);
    let format = if matches.opt_present("json") {
        OutputFormat::Json
    } else {
        file.format.unwrap_or_default()
    };

    let free = &matches.free;
    let (source, window_size) = match matches.opt_str("input").or(file.input) {
        Some(pattern) => {
            let window_size = match positional(free, 0).or(file.window_size) {
                Some(w) => WindowSize::try_from(w)?,
                None => prompt_window_size(prompt, None)?,
            };
            (Source::Files { pattern, column }, window_size)
        }
        None => match (
            positional(free, 0).or(file.number),
            positional(free, 1).or(file.window_size),
        ) {
            (Some(number), Some(window_size)) => (
                Source::Random {
                    number: validate_number(number)?,
                },
                WindowSize::try_from(window_size)?,
            ),
            (Some(number), None) if number >= 2 => {
                debug!(number, "window size not given as an argument, prompting");
                let number = validate_number(number)?;
                let window_size = prompt_window_size(prompt, Some(number))?;
                (Source::Random { number }, window_size)
            }
            _ => {
                debug!("array size or window size not given as arguments, prompting");
                let number = prompt_number(prompt)?;
                let window_size = prompt_window_size(prompt, Some(number))?;
                (Source::Random { number }, window_size)
            }
        },
    };

    Ok(Resolution::Run(RunConfig {
        source,
        window_size,
        range,
        precision,
        seed,
        format,
    }))
}

/// Whether `args` ask for debug logging. Unparsable arguments count as no.
pub fn wants_verbose(args: &[String]) -> bool {
    options()
        .parse(args)
        .map(|m| m.opt_present("verbose"))
        .unwrap_or(false)
}

fn parse_opt<T: FromStr>(matches: &Matches, name: &str) -> Result<Option<T>, InputError> {
    match matches.opt_str(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| InputError::InvalidValue {
                option: name.to_string(),
                value,
            }),
    }
}

fn positional(free: &[String], index: usize) -> Option<i64> {
    free.get(index).and_then(|s| s.trim().parse().ok())
}

fn validate_number(number: i64) -> Result<usize, InputError> {
    usize::try_from(number).map_err(|_| InputError::InvalidNumber { number })
}

fn prompt_integer<P, F>(prompt: &mut P, message: &str, accept: F) -> Result<i64, InputError>
where
    P: Prompt + ?Sized,
    F: Fn(i64) -> bool,
{
    loop {
        let Some(answer) = prompt.ask(message)? else {
            return Err(InputError::PromptClosed);
        };
        match answer.trim().parse::<i64>() {
            Ok(v) if accept(v) => return Ok(v),
            _ => debug!(answer = answer.trim(), "rejected answer, asking again"),
        }
    }
}

fn prompt_number<P: Prompt + ?Sized>(prompt: &mut P) -> Result<usize, InputError> {
    let number = prompt_integer(prompt, NUMBER_PROMPT, |v| v >= 2)?;
    validate_number(number)
}

/// The interactive rule is stricter than the argument rule: with a known
/// array length the window must not exceed it.
fn prompt_window_size<P: Prompt + ?Sized>(
    prompt: &mut P,
    number: Option<usize>,
) -> Result<WindowSize, InputError> {
    let (message, limit) = match number {
        Some(n) => (WINDOW_PROMPT, n),
        None => (WINDOW_ONLY_PROMPT, usize::MAX),
    };
    let window_size = prompt_integer(prompt, message, |v| {
        v >= 1 && usize::try_from(v).is_ok_and(|v| v <= limit)
    })?;
    Ok(WindowSize::try_from(window_size)?)
}
