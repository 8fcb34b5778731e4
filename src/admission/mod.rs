//! Admission policies: where an arriving job enters the waiting list.
//!
//! A discipline is a composition of three orthogonal choices:
//!
//! - an [`OrderingKey`] (arrival, head, soft deadline, own service time,
//!   remaining time),
//! - an optional priority partition (higher class priority first, key
//!   order within a priority group),
//! - an optional preemption capability (the policy exposes a
//!   [`PreemptionOracle`] built from the same key and partition).
//!
//! [`OrderedAdmission`] covers FCFS/LCFS/SJF/LJF/EDD/EDF/SRPT with and
//! without priority. [`TbsAdmission`] assigns Total-Bandwidth-Server
//! deadlines and delegates to EDF; [`RandomAdmission`] inserts at a uniform
//! random index.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use u_queueing::admission::{AdmissionContext, AdmissionPolicy, OrderedAdmission};
//! use u_queueing::models::{Job, JobClass, WaitingList};
//!
//! let class = Arc::new(JobClass::new(0, "c"));
//! let mut queue = WaitingList::new();
//! let mut edd = OrderedAdmission::edd();
//! let mut ctx = AdmissionContext::at_time(0.0);
//!
//! edd.put(Job::new(1, class.clone()).with_soft_deadline(9.0), &mut queue, &mut ctx).unwrap();
//! edd.put(Job::new(2, class).with_soft_deadline(4.0), &mut queue, &mut ctx).unwrap();
//! assert_eq!(queue.get(0).map(|j| j.id.0), Some(2));
//! ```
//!
//! # Complexity
//! Every discipline is a linear scan of the waiting list; station queues are
//! short in this domain.

mod context;
mod keys;
mod ordered;
mod random;
mod tbs;

pub use context::AdmissionContext;
pub use keys::OrderingKey;
pub use ordered::OrderedAdmission;
pub use random::RandomAdmission;
pub use tbs::TbsAdmission;

use std::fmt::Debug;

use crate::error::SchedResult;
use crate::models::{Job, WaitingList};
use crate::preemption::PreemptionOracle;

/// Inserts arriving jobs into a station's waiting list.
///
/// `put` inserts the job exactly once and returns the index it landed at.
/// On error the job is not inserted.
pub trait AdmissionPolicy: Debug {
    /// Discipline name (e.g., "EDF", "SRPT-PRIO").
    fn name(&self) -> &'static str;

    /// Admits `job` into `queue`.
    fn put(
        &mut self,
        job: Job,
        queue: &mut WaitingList,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize>;

    /// Re-inserts a job displaced from service.
    ///
    /// Keys already carried by the job (drawn service time, assigned
    /// deadline) are kept; policies that assign keys on admission override
    /// this to skip the assignment.
    fn requeue(
        &mut self,
        job: Job,
        queue: &mut WaitingList,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        self.put(job, queue, ctx)
    }

    /// Preemption oracle, for preemptive disciplines.
    fn oracle(&self) -> Option<&dyn PreemptionOracle> {
        None
    }

    /// Whether arrivals may displace the job in service.
    fn is_preemptive(&self) -> bool {
        self.oracle().is_some()
    }

    /// Discipline description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
