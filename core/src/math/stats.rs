pub struct StatsHelper;

impl StatsHelper {
    /// Arithmetic mean, summed in iteration order. `None` for an empty input.
    pub fn mean<I>(values: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            return None;
        }
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_none() {
        assert_eq!(StatsHelper::mean(Vec::<f64>::new()), None);
    }

    #[test]
    fn mean_handles_single_value() {
        assert_eq!(StatsHelper::mean([4.0]), Some(4.0));
    }

    #[test]
    fn mean_of_mixed_values() {
        assert_eq!(StatsHelper::mean([1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }
}
