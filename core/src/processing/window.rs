use std::collections::VecDeque;

/// Fixed-capacity FIFO of absolute sample magnitudes.
///
/// Once `capacity` samples have been pushed the window stays exactly full:
/// every push evicts the oldest element.
#[derive(Debug, Clone)]
pub struct AmplitudeWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl AmplitudeWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends `|sample|`, evicting the head if the window overflows.
    pub fn push(&mut self, sample: f64) {
        self.values.push_back(sample.abs());
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All buffered magnitudes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// The trailing `n` magnitudes (fewer if the window is shorter), oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        let skip = self.values.len().saturating_sub(n);
        self.values.iter().skip(skip).copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_length_is_bounded_by_capacity() {
        let mut window = AmplitudeWindow::with_capacity(4);
        for n in 1..=10 {
            window.push(n as f64);
            assert_eq!(window.len(), n.min(4));
        }
        assert!(window.is_full());
    }

    #[test]
    fn window_keeps_last_pushes_in_arrival_order() {
        let mut window = AmplitudeWindow::with_capacity(3);
        for v in [1.0, -2.0, 3.0, -4.0, 5.0] {
            window.push(v);
        }
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_eq!(window.latest(), Some(5.0));
    }

    #[test]
    fn window_discards_sign() {
        let mut window = AmplitudeWindow::with_capacity(2);
        window.push(-7.5);
        assert_eq!(window.latest(), Some(7.5));
    }

    #[test]
    fn recent_returns_trailing_elements() {
        let mut window = AmplitudeWindow::with_capacity(5);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
            window.push(v);
        }
        assert_eq!(window.recent(2).collect::<Vec<_>>(), vec![5.0, 6.0]);
        assert_eq!(window.recent(10).count(), 5);
    }

    #[test]
    fn partial_window_is_not_full() {
        let mut window = AmplitudeWindow::with_capacity(3);
        window.push(1.0);
        assert!(!window.is_full());
        window.clear();
        assert!(window.is_empty());
    }
}
