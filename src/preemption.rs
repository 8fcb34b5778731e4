//! Preemption oracle and removed-item disposition.
//!
//! When a preemptive station is already serving at capacity, the kernel
//! asks the station's oracle whether the arrival should displace the job in
//! service. `Ordering::Greater` means the arrival wins; `Ordering::Less`
//! means the incumbent keeps the server. Exact key ties resolve to `Less`
//! for every keyed discipline, so equal jobs never churn. `Ordering::Equal`
//! is never returned.
//!
//! Where the displaced job goes is not the oracle's business: the station
//! applies its configured [`RemovedDisposition`].

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::SchedResult;
use crate::models::Job;

/// Two-job comparator deciding preemption.
pub trait PreemptionOracle: Debug {
    /// Compares an `arrival` against the `incumbent` in service.
    ///
    /// Returns `Greater` if the arrival preempts, `Less` otherwise.
    fn compare(&self, arrival: &Job, incumbent: &Job) -> SchedResult<Ordering>;

    /// Convenience: whether `arrival` displaces `incumbent`.
    fn preempts(&self, arrival: &Job, incumbent: &Job) -> SchedResult<bool> {
        Ok(self.compare(arrival, incumbent)? == Ordering::Greater)
    }
}

/// Where a preempted job goes once it leaves the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovedDisposition {
    /// Back into the waiting list at the position its discipline assigns.
    #[default]
    OriginalPosition,
    /// Back at the head of the waiting list.
    Front,
    /// Dropped from the station and handed back to the kernel.
    Discard,
}

/// Strict "arrival wins" verdict from a boolean.
#[inline]
pub(crate) fn verdict(arrival_wins: bool) -> Ordering {
    if arrival_wins {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}
