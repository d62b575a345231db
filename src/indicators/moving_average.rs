use ndarray::{Array1, ArrayBase, Data, Ix1};

use super::window::{SlidingWindow, WindowSize};
use crate::error::MovingAverageError;

/// Moving average of `values` over a window of `window_size` elements.
///
/// `output[i]` is the mean of the last `min(i + 1, window_size)` values up to
/// and including `values[i]`, so the window grows over the first
/// `window_size - 1` elements before it starts sliding. A window larger than
/// the input is allowed. Fails only when `window_size < 1`.
pub fn compute_moving_average(
    window_size: i64,
    values: &[f64],
) -> Result<Vec<f64>, MovingAverageError> {
    let size = WindowSize::try_from(window_size)?;
    Ok(moving_average(values, size))
}

/// Same as [`compute_moving_average`] for an already validated window size.
pub fn moving_average(values: &[f64], size: WindowSize) -> Vec<f64> {
    let mut window = SlidingWindow::with_capacity(size, values.len());
    values.iter().map(|&v| window.push(v)).collect()
}

/// Moving average over a one-dimensional array, contiguous or strided.
pub fn moving_average_array<S>(data: &ArrayBase<S, Ix1>, size: WindowSize) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    match data.as_slice() {
        Some(s) => Array1::from(moving_average(s, size)),
        None => {
            let mut window = SlidingWindow::with_capacity(size, data.len());
            data.iter().map(|&v| window.push(v)).collect()
        }
    }
}
