//! Per-class utilization statistics.
//!
//! The Total Bandwidth Server sizes each deadline by the bandwidth left
//! over by strictly higher-priority classes. That residual comes from a
//! running mean of each class's measured utilization, maintained by the
//! kernel's measurement layer and read here through [`UtilizationStats`].
//!
//! # Metric
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | Mean utilization U(c) | Running mean of utilization samples of class c |
//! | Higher-priority load U_p | Σ U(c) over classes with priority > p |

use serde::{Deserialize, Serialize};

use crate::models::{ClassId, JobClass};

/// Read access to running per-class mean utilization.
pub trait UtilizationStats {
    /// Mean utilization of `class` (0.0 when nothing was measured).
    fn mean_utilization(&self, class: ClassId) -> f64;
}

impl UtilizationStats for [f64] {
    fn mean_utilization(&self, class: ClassId) -> f64 {
        self.get(class).copied().unwrap_or(0.0)
    }
}

impl UtilizationStats for Vec<f64> {
    fn mean_utilization(&self, class: ClassId) -> f64 {
        self.as_slice().mean_utilization(class)
    }
}

/// Running mean of utilization samples, one accumulator per class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassUtilization {
    sums: Vec<f64>,
    samples: Vec<u64>,
}

impl ClassUtilization {
    /// Creates empty accumulators for `classes` classes.
    pub fn new(classes: usize) -> Self {
        Self {
            sums: vec![0.0; classes],
            samples: vec![0; classes],
        }
    }

    /// Adds one utilization sample for `class`, growing the table if needed.
    pub fn record(&mut self, class: ClassId, utilization: f64) {
        if class >= self.sums.len() {
            self.sums.resize(class + 1, 0.0);
            self.samples.resize(class + 1, 0);
        }
        self.sums[class] += utilization;
        self.samples[class] += 1;
    }

    /// Number of samples recorded for `class`.
    pub fn sample_count(&self, class: ClassId) -> u64 {
        self.samples.get(class).copied().unwrap_or(0)
    }
}

impl UtilizationStats for ClassUtilization {
    fn mean_utilization(&self, class: ClassId) -> f64 {
        match (self.sums.get(class), self.samples.get(class)) {
            (Some(&sum), Some(&n)) if n > 0 => sum / n as f64,
            _ => 0.0,
        }
    }
}

/// Summed mean utilization of classes strictly outranking `of`.
pub fn higher_priority_utilization(
    stats: &dyn UtilizationStats,
    classes: &[JobClass],
    of: &JobClass,
) -> f64 {
    classes
        .iter()
        .filter(|c| c.outranks(of))
        .map(|c| stats.mean_utilization(c.id))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_mean() {
        let mut stats = ClassUtilization::new(2);
        stats.record(0, 0.2);
        stats.record(0, 0.4);
        assert!((stats.mean_utilization(0) - 0.3).abs() < 1e-10);
        assert_eq!(stats.mean_utilization(1), 0.0);
        assert_eq!(stats.sample_count(0), 2);
    }

    #[test]
    fn test_record_grows_table() {
        let mut stats = ClassUtilization::new(0);
        stats.record(3, 0.5);
        assert!((stats.mean_utilization(3) - 0.5).abs() < 1e-10);
        assert_eq!(stats.mean_utilization(2), 0.0);
    }

    #[test]
    fn test_higher_priority_utilization_is_strict() {
        let classes = vec![
            JobClass::new(0, "low").with_priority(1),
            JobClass::new(1, "mid").with_priority(2),
            JobClass::new(2, "peer").with_priority(2),
            JobClass::new(3, "high").with_priority(5),
        ];
        let stats = vec![0.1, 0.2, 0.3, 0.15];

        let u = higher_priority_utilization(&stats, &classes, &classes[1]);
        assert!((u - 0.15).abs() < 1e-10);

        let u = higher_priority_utilization(&stats, &classes, &classes[0]);
        assert!((u - 0.65).abs() < 1e-10);

        assert_eq!(higher_priority_utilization(&stats, &classes, &classes[3]), 0.0);
    }
}
