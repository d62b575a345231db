use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use crate::error::MovingAverageError;

/// A window size known to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(WindowSize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for WindowSize {
    type Error = MovingAverageError;

    fn try_from(window_size: i64) -> Result<Self, Self::Error> {
        if window_size < 1 {
            return Err(MovingAverageError::InvalidWindowSize { window_size });
        }
        // Anything past usize::MAX behaves the same as usize::MAX: the window never fills.
        let size = usize::try_from(window_size).unwrap_or(usize::MAX);
        WindowSize::new(size).ok_or(MovingAverageError::InvalidWindowSize { window_size })
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = MovingAverageError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        WindowSize::new(size).ok_or(MovingAverageError::InvalidWindowSize { window_size: 0 })
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// FIFO of the most recent values together with their running sum.
///
/// `sum` always equals the sum of the buffered values. It is adjusted on every
/// push and eviction and never recomputed from the buffer.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    values: VecDeque<f64>,
    sum: f64,
    size: WindowSize,
}

impl SlidingWindow {
    pub fn new(size: WindowSize) -> Self {
        SlidingWindow {
            values: VecDeque::new(),
            sum: 0.0,
            size,
        }
    }

    /// Preallocates for `expected` pushes, never more than the window can hold.
    pub fn with_capacity(size: WindowSize, expected: usize) -> Self {
        SlidingWindow {
            values: VecDeque::with_capacity(expected.min(size.get())),
            sum: 0.0,
            size,
        }
    }

    /// Adds `value`, evicting the oldest value first if the window is full,
    /// and returns the new average.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.is_full() {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        self.values.push_back(value);
        self.sum += value;
        self.average()
    }

    /// Mean of the buffered values. An empty window averages to 0.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.sum / self.values.len() as f64
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.size.get()
    }

    pub fn size(&self) -> WindowSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> WindowSize {
        WindowSize::new(n).unwrap()
    }

    #[test]
    fn window_size_rejects_zero_and_negatives() {
        assert_eq!(
            WindowSize::try_from(0i64),
            Err(MovingAverageError::InvalidWindowSize { window_size: 0 })
        );
        assert_eq!(
            WindowSize::try_from(-1i64),
            Err(MovingAverageError::InvalidWindowSize { window_size: -1 })
        );
        assert!(WindowSize::try_from(0usize).is_err());
        assert_eq!(WindowSize::try_from(7i64).unwrap().get(), 7);
    }

    #[test]
    fn empty_window_averages_to_zero() {
        let window = SlidingWindow::new(size(3));
        assert!(window.is_empty());
        assert_eq!(window.average(), 0.0);
    }

    #[test]
    fn evicts_oldest_once_full() {
        let mut window = SlidingWindow::new(size(3));
        // the first value is always the mean
        assert_eq!(window.push(1.0), 1.0);
        assert_eq!(window.push(2.0), 1.5);
        assert_eq!(window.push(3.0), 2.0);
        assert!(window.is_full());
        assert_eq!(window.push(4.0), 3.0);
        assert_eq!(window.push(5.0), 4.0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.sum(), 12.0);
    }

    #[test]
    fn never_exceeds_its_size() {
        let mut window = SlidingWindow::with_capacity(size(2), 100);
        for i in 0..100 {
            window.push(i as f64);
            assert!(window.len() <= 2);
        }
        assert_eq!(window.average(), 98.5);
    }

    #[test]
    fn huge_window_keeps_growing() {
        let mut window = SlidingWindow::with_capacity(WindowSize::try_from(i64::MAX).unwrap(), 4);
        for v in [4.0, 8.0, 6.0, 2.0] {
            window.push(v);
        }
        assert!(!window.is_full());
        assert_eq!(window.len(), 4);
        assert_eq!(window.average(), 5.0);
    }
}
