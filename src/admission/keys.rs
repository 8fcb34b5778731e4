//! Ordering keys for keyed admission.
//!
//! # Categories
//!
//! - **Arrival-based**: ARRIVAL (FCFS), HEAD (LCFS)
//! - **Due-date**: DEADLINE (EDD/EDF)
//! - **Demand-based**: SERVICE_TIME (SJF), LONGEST_SERVICE_TIME (LJF),
//!   REMAINING_TIME (SRPT)
//!
//! # Tie Convention
//! A key only places a new job ahead of an existing one when it is
//! *strictly* better. Equal keys keep arrival order in the queue, and an
//! arrival with a key equal to the incumbent's never preempts.
//!
//! # References
//! - Kleinrock (1976), "Queueing Systems, Vol. 2", Ch. 3
//! - Harchol-Balter (2013), "Performance Modeling and Design of Computer Systems", Ch. 29-33

use serde::{Deserialize, Serialize};

use crate::error::SchedResult;
use crate::models::Job;

/// Secondary order applied within a priority group (or the whole list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingKey {
    /// First come first served: new jobs go after all peers.
    Arrival,
    /// Last come first served: new jobs go before all peers.
    Head,
    /// Earliest soft deadline first.
    Deadline,
    /// Shortest own service time first.
    ServiceTime,
    /// Longest own service time first.
    LongestServiceTime,
    /// Shortest remaining service time first.
    RemainingTime,
}

impl OrderingKey {
    /// Whether the key reads the job's own service demand.
    ///
    /// Such keys force a service-time draw at admission, since the queue
    /// position depends on it.
    pub fn needs_service_time(self) -> bool {
        matches!(
            self,
            Self::ServiceTime | Self::LongestServiceTime | Self::RemainingTime
        )
    }

    /// Checks that `job` carries the value this key orders by.
    pub fn check(self, job: &Job) -> SchedResult<()> {
        match self {
            Self::Arrival | Self::Head => Ok(()),
            Self::Deadline => job.require_soft_deadline().map(drop),
            Self::ServiceTime | Self::LongestServiceTime => {
                job.require_service_time().map(drop)
            }
            Self::RemainingTime => job.require_remaining_time().map(drop),
        }
    }

    /// Whether `new` ranks strictly ahead of `existing` under this key.
    ///
    /// Used both for queue placement (`new` goes before `existing`) and for
    /// preemption (`new` is the arrival, `existing` the incumbent).
    pub fn ahead(self, new: &Job, existing: &Job) -> SchedResult<bool> {
        Ok(match self {
            Self::Arrival => false,
            Self::Head => true,
            Self::Deadline => {
                new.require_soft_deadline()? < existing.require_soft_deadline()?
            }
            Self::ServiceTime => {
                new.require_service_time()? < existing.require_service_time()?
            }
            Self::LongestServiceTime => {
                new.require_service_time()? > existing.require_service_time()?
            }
            Self::RemainingTime => {
                new.require_remaining_time()? < existing.require_remaining_time()?
            }
        })
    }

    /// Short key name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Arrival => "ARRIVAL",
            Self::Head => "HEAD",
            Self::Deadline => "DEADLINE",
            Self::ServiceTime => "SERVICE_TIME",
            Self::LongestServiceTime => "LONGEST_SERVICE_TIME",
            Self::RemainingTime => "REMAINING_TIME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedError;
    use crate::models::{JobClass, JobId};
    use std::sync::Arc;

    fn make_job(id: u64) -> Job {
        Job::new(id, Arc::new(JobClass::new(0, "c")))
    }

    #[test]
    fn test_deadline_strict() {
        let early = make_job(1).with_soft_deadline(3.0);
        let late = make_job(2).with_soft_deadline(8.0);
        let tie = make_job(3).with_soft_deadline(3.0);
        assert!(OrderingKey::Deadline.ahead(&early, &late).unwrap());
        assert!(!OrderingKey::Deadline.ahead(&late, &early).unwrap());
        assert!(!OrderingKey::Deadline.ahead(&tie, &early).unwrap());
        assert!(!OrderingKey::Deadline.ahead(&early, &tie).unwrap());
    }

    #[test]
    fn test_service_time_directions() {
        let short = make_job(1).with_service_time(1.0);
        let long = make_job(2).with_service_time(5.0);
        assert!(OrderingKey::ServiceTime.ahead(&short, &long).unwrap());
        assert!(OrderingKey::LongestServiceTime.ahead(&long, &short).unwrap());
        assert!(!OrderingKey::LongestServiceTime.ahead(&short, &long).unwrap());
    }

    #[test]
    fn test_remaining_time_uses_progress() {
        let mut served = make_job(1).with_service_time(10.0);
        served.consume(8.0).unwrap();
        let fresh = make_job(2).with_service_time(4.0);
        assert!(OrderingKey::RemainingTime.ahead(&served, &fresh).unwrap());
        assert!(OrderingKey::ServiceTime.ahead(&fresh, &served).unwrap());
    }

    #[test]
    fn test_arrival_and_head() {
        let a = make_job(1);
        let b = make_job(2);
        assert!(!OrderingKey::Arrival.ahead(&a, &b).unwrap());
        assert!(OrderingKey::Head.ahead(&a, &b).unwrap());
    }

    #[test]
    fn test_missing_key_fails() {
        let bare = make_job(4);
        let dated = make_job(5).with_soft_deadline(1.0);
        assert_eq!(
            OrderingKey::Deadline.ahead(&bare, &dated),
            Err(SchedError::MissingDeadline { job: JobId(4) })
        );
        assert_eq!(
            OrderingKey::ServiceTime.check(&bare),
            Err(SchedError::ServiceTimeUnset { job: JobId(4) })
        );
        assert!(OrderingKey::Arrival.check(&bare).is_ok());
    }

    #[test]
    fn test_key_requirements() {
        assert!(OrderingKey::RemainingTime.needs_service_time());
        assert!(!OrderingKey::Deadline.needs_service_time());
        assert_eq!(OrderingKey::LongestServiceTime.name(), "LONGEST_SERVICE_TIME");
    }
}
