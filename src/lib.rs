pub mod config;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod loader;
pub mod report;

#[cfg(feature = "python")]
mod python;

pub use error::{Error, InputError, MovingAverageError};
pub use indicators::{
    SlidingWindow, WindowSize, compute_moving_average, moving_average, moving_average_array,
};
