//! Evenly spaced sample points.

/// Returns `count` evenly spaced values from `start` to `end`, inclusive.
///
/// The last value is exactly `end`. A single point returns `start`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i + 1 == count { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn includes_both_ends() {
        let values = linspace(2.5, 4.5, 5);
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[0], 2.5);
        assert_relative_eq!(values[2], 3.5);
        assert_eq!(values[4], 4.5);
    }

    #[test]
    fn last_node_is_exact() {
        let values = linspace(0.0, 14_400.0, 501);
        assert_eq!(values.last().copied(), Some(14_400.0));
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }
}
