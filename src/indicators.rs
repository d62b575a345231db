pub mod moving_average;
pub mod window;

pub use moving_average::{compute_moving_average, moving_average, moving_average_array};
pub use window::{SlidingWindow, WindowSize};
