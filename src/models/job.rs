//! Job model.
//!
//! A job is a unit of simulated work visiting a station. Jobs are created
//! by upstream arrival logic and destroyed on service completion; station
//! policies only move them between positions and read or fill their
//! scheduling fields.
//!
//! # Time Representation
//! All times are simulation time units (`f64`), absolute for deadlines and
//! relative for service demands.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ClassId, JobClass};
use crate::error::{SchedError, SchedResult};

/// Unique job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A job waiting for or receiving service at a station.
///
/// The service time is drawn lazily: disciplines that order by it force the
/// draw at admission, all others leave it to the service section. Once drawn,
/// the remaining time starts equal to it and never increases.
#[derive(Debug, Clone)]
pub struct Job {
    /// Unique identifier.
    pub id: JobId,
    /// Class this job belongs to.
    pub class: Arc<JobClass>,
    /// Arrival sequence number at the current station.
    pub arrival_seq: u64,
    service_time: Option<f64>,
    remaining_time: Option<f64>,
    soft_deadline: Option<f64>,
}

impl Job {
    /// Creates a job with no drawn service time and no deadline.
    pub fn new(id: u64, class: Arc<JobClass>) -> Self {
        Self {
            id: JobId(id),
            class,
            arrival_seq: 0,
            service_time: None,
            remaining_time: None,
            soft_deadline: None,
        }
    }

    /// Sets the arrival sequence number.
    pub fn with_arrival_seq(mut self, seq: u64) -> Self {
        self.arrival_seq = seq;
        self
    }

    /// Sets a drawn service time (remaining time starts equal to it).
    pub fn with_service_time(mut self, service_time: f64) -> Self {
        self.set_service_time(service_time);
        self
    }

    /// Sets the soft deadline (absolute time).
    pub fn with_soft_deadline(mut self, deadline: f64) -> Self {
        self.soft_deadline = Some(deadline);
        self
    }

    /// Class id of this job.
    #[inline]
    pub fn class_id(&self) -> ClassId {
        self.class.id
    }

    /// Priority of this job's class.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.class.priority
    }

    /// Drawn service time, if any.
    pub fn service_time(&self) -> Option<f64> {
        self.service_time
    }

    /// Remaining service demand, if a service time was drawn.
    pub fn remaining_time(&self) -> Option<f64> {
        self.remaining_time
    }

    /// Soft deadline for the current visit, if assigned.
    pub fn soft_deadline(&self) -> Option<f64> {
        self.soft_deadline
    }

    /// Records a drawn service time and resets the remaining demand to it.
    pub fn set_service_time(&mut self, service_time: f64) {
        self.service_time = Some(service_time);
        self.remaining_time = Some(service_time);
    }

    /// Assigns the soft deadline for the current visit.
    pub fn assign_soft_deadline(&mut self, deadline: f64) {
        self.soft_deadline = Some(deadline);
    }

    /// Clears per-visit scheduling state when the job leaves the station.
    pub fn end_visit(&mut self) {
        self.soft_deadline = None;
    }

    /// Service time, failing if it has not been drawn.
    pub fn require_service_time(&self) -> SchedResult<f64> {
        self.service_time
            .ok_or(SchedError::ServiceTimeUnset { job: self.id })
    }

    /// Remaining time, failing if no service time has been drawn.
    pub fn require_remaining_time(&self) -> SchedResult<f64> {
        self.remaining_time
            .ok_or(SchedError::ServiceTimeUnset { job: self.id })
    }

    /// Soft deadline, failing if none was assigned.
    pub fn require_soft_deadline(&self) -> SchedResult<f64> {
        self.soft_deadline
            .ok_or(SchedError::MissingDeadline { job: self.id })
    }

    /// Accounts `elapsed` units of received service.
    ///
    /// Remaining time is clamped at zero; a negative `elapsed` is ignored.
    pub fn consume(&mut self, elapsed: f64) -> SchedResult<()> {
        let remaining = self.require_remaining_time()?;
        if elapsed > 0.0 {
            self.remaining_time = Some((remaining - elapsed).max(0.0));
        }
        Ok(())
    }

    /// Whether all drawn service has been received.
    pub fn is_finished(&self) -> bool {
        matches!(self.remaining_time, Some(r) if r <= 0.0)
    }
}
