/// Running sum over optional values. Absent values are skipped, not counted as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    total: f64,
    present: usize,
}

impl Accumulator {
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.total += v;
            self.present += 1;
        }
    }

    /// Sum of present values. Zero when nothing was present.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of present values seen.
    pub fn present(&self) -> usize {
        self.present
    }

    /// Arithmetic mean over present values, `None` when there were none.
    pub fn mean(&self) -> Option<f64> {
        mean(self.total, self.present)
    }
}

/// Computes `total / count`, returning `None` instead of dividing by zero.
pub fn mean(total: f64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_with_zero_count() {
        assert_eq!(mean(10.0, 0), None);
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean(30.0, 2), Some(15.0));
        assert_eq!(mean(1.0, 4), Some(0.25));
    }

    #[test]
    fn test_accumulator_skips_absent() {
        let mut acc = Accumulator::default();
        acc.push(Some(10.0));
        acc.push(None);
        acc.push(Some(20.0));

        assert_eq!(acc.total(), 30.0);
        assert_eq!(acc.present(), 2);
        assert_eq!(acc.mean(), Some(15.0));
    }

    #[test]
    fn test_empty_accumulator() {
        let mut acc = Accumulator::default();
        acc.push(None);

        assert_eq!(acc.total(), 0.0);
        assert_eq!(acc.present(), 0);
        assert_eq!(acc.mean(), None);
    }
}
