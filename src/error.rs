use std::io;
use thiserror::Error;

/// Failure of the averaging engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MovingAverageError {
    #[error("invalid window size {window_size}: must be at least 1")]
    InvalidWindowSize { window_size: i64 },
}

/// Problems turning arguments, prompts, config files or CSV files into engine input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Window(#[from] MovingAverageError),

    #[error("invalid array size {number}: must not be negative")]
    InvalidNumber { number: i64 },

    #[error("invalid value range [{min}, {max}): bounds must be finite with min below max")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid value {value:?} for --{option}")]
    InvalidValue { option: String, value: String },

    #[error(transparent)]
    Options(#[from] getopts::Fail),

    #[error("failed to parse config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("bad input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("no readable input files match {pattern}")]
    NoInput { pattern: String },

    #[error("input closed before a valid answer was given")]
    PromptClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Everything that can stop a command-line run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit status for this error: 2 for bad input, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Input(_) => 2,
            _ => 1,
        }
    }
}
