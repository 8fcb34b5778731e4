//! External service-time sampling.
//!
//! Service-time distributions live outside the station core. Disciplines
//! whose order depends on a job's own demand (SJF, LJF, SRPT, TBS) ask the
//! station's [`ServiceStrategy`] for a draw at admission; the job memoizes
//! it, so each job is sampled at most once per visit.

use crate::models::ClassId;

/// Service-time sampler of a station's service section.
pub trait ServiceStrategy {
    /// Draws a service demand for a job of `class`.
    fn wait(&mut self, class: ClassId) -> f64;
}

impl<F> ServiceStrategy for F
where
    F: FnMut(ClassId) -> f64,
{
    fn wait(&mut self, class: ClassId) -> f64 {
        self(class)
    }
}

/// Deterministic per-class service times.
#[derive(Debug, Clone, Default)]
pub struct FixedService {
    times: Vec<f64>,
    draws: usize,
}

impl FixedService {
    /// One constant service time per class id.
    pub fn new(times: Vec<f64>) -> Self {
        Self { times, draws: 0 }
    }

    /// Number of samples taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl ServiceStrategy for FixedService {
    fn wait(&mut self, class: ClassId) -> f64 {
        self.draws += 1;
        self.times.get(class).copied().unwrap_or(0.0)
    }
}
