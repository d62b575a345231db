use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::MovingAverageError;
use crate::indicators::{SlidingWindow, WindowSize, moving_average_array};

impl From<MovingAverageError> for PyErr {
    fn from(err: MovingAverageError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Moving average of a float64 array. Raises ValueError when window_size < 1.
#[pyfunction]
fn compute_moving_average<'py>(
    py: Python<'py>,
    window_size: i64,
    values: PyReadonlyArray1<'py, f64>,
) -> PyResult<&'py PyArray1<f64>> {
    let size = WindowSize::try_from(window_size)?;
    let averages = moving_average_array(&values.as_array(), size);
    Ok(averages.into_pyarray(py))
}

/// Incremental moving average, one value at a time.
#[pyclass(name = "MovingAverage")]
pub struct PyMovingAverage {
    window: SlidingWindow,
}

#[pymethods]
impl PyMovingAverage {
    #[new]
    fn new(window_size: i64) -> PyResult<Self> {
        Ok(PyMovingAverage {
            window: SlidingWindow::new(WindowSize::try_from(window_size)?),
        })
    }

    fn push(&mut self, value: f64) -> f64 {
        self.window.push(value)
    }

    fn average(&self) -> f64 {
        self.window.average()
    }

    #[getter]
    fn window_size(&self) -> usize {
        self.window.size().get()
    }

    fn __len__(&self) -> usize {
        self.window.len()
    }
}

#[pymodule]
#[pyo3(name = "moving_average")]
fn py_moving_average(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_moving_average, m)?)?;
    m.add_class::<PyMovingAverage>()?;

    Ok(())
}
