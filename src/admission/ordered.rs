//! Keyed admission with optional priority partition and preemption.
//!
//! # Placement
//!
//! The new job is inserted before the first queued job it ranks strictly
//! ahead of, or appended if there is none. With a priority partition the
//! ranking is: higher class priority first, then the key within equal
//! priority. The scan therefore skips every higher-priority job, walks the
//! job's own priority group by key, and stops at the first strictly worse
//! job, which keeps equal keys in arrival order.
//!
//! # Preemption
//!
//! A preemptive policy compares arrival and incumbent with the same
//! ranking. Exact ties favor the incumbent.
//!
//! | Constructor | Key | Priority | Preemptive |
//! |-------------|-----|----------|------------|
//! | `fcfs` | arrival | no | no |
//! | `lcfs` / `lcfs_pr` | head | no | no / yes (arrival always wins) |
//! | `fcfs_priority` / `fcfs_pr_priority` | arrival | yes | no / yes |
//! | `sjf` / `ljf` | service time asc / desc | no | no |
//! | `sjf_priority` / `ljf_priority` | service time asc / desc | yes | no |
//! | `edd` / `edf` | deadline | no | no / yes |
//! | `edd_priority` / `edf_priority` | deadline | yes | no / yes |
//! | `srpt` / `srpt_priority` | remaining time | no / yes | yes |

use std::cmp::Ordering;

use tracing::trace;

use super::{AdmissionContext, AdmissionPolicy, OrderingKey};
use crate::error::SchedResult;
use crate::models::{Job, WaitingList};
use crate::preemption::{verdict, PreemptionOracle};

/// A discipline composed from a key, a priority partition and preemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedAdmission {
    key: OrderingKey,
    priority_partition: bool,
    preemptive: bool,
}

impl OrderedAdmission {
    /// Creates a non-preemptive, non-partitioned discipline over `key`.
    pub fn new(key: OrderingKey) -> Self {
        Self {
            key,
            priority_partition: false,
            preemptive: false,
        }
    }

    /// Partitions the list by class priority (higher first).
    pub fn with_priority_partition(mut self) -> Self {
        self.priority_partition = true;
        self
    }

    /// Lets arrivals displace the job in service.
    pub fn with_preemption(mut self) -> Self {
        self.preemptive = true;
        self
    }

    /// First come first served.
    pub fn fcfs() -> Self {
        Self::new(OrderingKey::Arrival)
    }

    /// Last come first served, non-preemptive.
    pub fn lcfs() -> Self {
        Self::new(OrderingKey::Head)
    }

    /// Preemptive LCFS: every arrival goes to the head and takes the server.
    pub fn lcfs_pr() -> Self {
        Self::lcfs().with_preemption()
    }

    /// FCFS within priority groups.
    pub fn fcfs_priority() -> Self {
        Self::fcfs().with_priority_partition()
    }

    /// Preemptive-resume priority FCFS: only strictly higher priority preempts.
    pub fn fcfs_pr_priority() -> Self {
        Self::fcfs_priority().with_preemption()
    }

    /// Shortest job first.
    pub fn sjf() -> Self {
        Self::new(OrderingKey::ServiceTime)
    }

    /// Shortest job first within priority groups.
    pub fn sjf_priority() -> Self {
        Self::sjf().with_priority_partition()
    }

    /// Longest job first.
    pub fn ljf() -> Self {
        Self::new(OrderingKey::LongestServiceTime)
    }

    /// Longest job first within priority groups.
    pub fn ljf_priority() -> Self {
        Self::ljf().with_priority_partition()
    }

    /// Earliest due date, non-preemptive.
    pub fn edd() -> Self {
        Self::new(OrderingKey::Deadline)
    }

    /// Earliest deadline first, preemptive.
    pub fn edf() -> Self {
        Self::edd().with_preemption()
    }

    /// Earliest due date within priority groups.
    pub fn edd_priority() -> Self {
        Self::edd().with_priority_partition()
    }

    /// Preemptive EDF within priority groups.
    pub fn edf_priority() -> Self {
        Self::edd_priority().with_preemption()
    }

    /// Shortest remaining processing time, preemptive.
    pub fn srpt() -> Self {
        Self::new(OrderingKey::RemainingTime).with_preemption()
    }

    /// SRPT within priority groups, preemptive.
    pub fn srpt_priority() -> Self {
        Self::srpt().with_priority_partition()
    }

    /// Ordering key.
    pub fn key(&self) -> OrderingKey {
        self.key
    }

    /// Whether the list is partitioned by class priority.
    pub fn is_priority_partitioned(&self) -> bool {
        self.priority_partition
    }

    /// Whether `new` ranks strictly ahead of `existing`.
    fn ahead(&self, new: &Job, existing: &Job) -> SchedResult<bool> {
        if self.priority_partition {
            match new.priority().cmp(&existing.priority()) {
                Ordering::Greater => return Ok(true),
                Ordering::Less => return Ok(false),
                Ordering::Equal => {}
            }
        }
        self.key.ahead(new, existing)
    }

    /// Index at which `job` belongs in `queue`.
    pub fn position(&self, job: &Job, queue: &WaitingList) -> SchedResult<usize> {
        for (i, existing) in queue.iter().enumerate() {
            if self.ahead(job, existing)? {
                return Ok(i);
            }
        }
        Ok(queue.len())
    }

    /// Inserts a job whose key is already present.
    pub(crate) fn insert(&self, job: Job, queue: &mut WaitingList) -> SchedResult<usize> {
        self.key.check(&job)?;
        let index = self.position(&job, queue)?;
        trace!(
            policy = self.name(),
            key = self.key.name(),
            job = %job.id,
            index,
            len = queue.len(),
            "admitting job"
        );
        queue.insert(index, job)?;
        Ok(index)
    }
}

impl AdmissionPolicy for OrderedAdmission {
    fn name(&self) -> &'static str {
        use OrderingKey::*;
        match (self.key, self.priority_partition, self.preemptive) {
            (Arrival, false, _) => "FCFS",
            (Arrival, true, false) => "FCFS-PRIO",
            (Arrival, true, true) => "FCFS-PR-PRIO",
            (Head, false, false) => "LCFS",
            (Head, false, true) => "LCFS-PR",
            (Head, true, false) => "LCFS-PRIO",
            (Head, true, true) => "LCFS-PR-PRIO",
            (Deadline, false, false) => "EDD",
            (Deadline, false, true) => "EDF",
            (Deadline, true, false) => "EDD-PRIO",
            (Deadline, true, true) => "EDF-PRIO",
            (ServiceTime, false, false) => "SJF",
            (ServiceTime, false, true) => "SJF-PR",
            (ServiceTime, true, false) => "SJF-PRIO",
            (ServiceTime, true, true) => "SJF-PR-PRIO",
            (LongestServiceTime, false, false) => "LJF",
            (LongestServiceTime, false, true) => "LJF-PR",
            (LongestServiceTime, true, false) => "LJF-PRIO",
            (LongestServiceTime, true, true) => "LJF-PR-PRIO",
            (RemainingTime, false, false) => "SRPT-NP",
            (RemainingTime, false, true) => "SRPT",
            (RemainingTime, true, false) => "SRPT-NP-PRIO",
            (RemainingTime, true, true) => "SRPT-PRIO",
        }
    }

    fn put(
        &mut self,
        mut job: Job,
        queue: &mut WaitingList,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        if self.key.needs_service_time() {
            ctx.ensure_service_time(&mut job, self.name())?;
        }
        self.insert(job, queue)
    }

    fn requeue(
        &mut self,
        job: Job,
        queue: &mut WaitingList,
        _ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        self.insert(job, queue)
    }

    fn oracle(&self) -> Option<&dyn PreemptionOracle> {
        if self.preemptive {
            Some(self)
        } else {
            None
        }
    }
}

impl PreemptionOracle for OrderedAdmission {
    fn compare(&self, arrival: &Job, incumbent: &Job) -> SchedResult<Ordering> {
        let wins = self.ahead(arrival, incumbent)?;
        trace!(
            policy = self.name(),
            arrival = %arrival.id,
            incumbent = %incumbent.id,
            wins,
            "preemption check"
        );
        Ok(verdict(wins))
    }
}
