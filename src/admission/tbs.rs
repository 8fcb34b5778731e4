//! Total Bandwidth Server admission.
//!
//! Each arriving job receives a soft deadline sized by the bandwidth left
//! over by strictly higher-priority classes:
//!
//! ```text
//! U_p  = Σ meanUtilization(c)  for classes c with priority(c) > priority(job)
//! d_k  = max(now, d_{k-1}) + serviceTime / (1 - U_p)
//! ```
//!
//! `d_{k-1}` is the last deadline this server handed out, whatever the
//! class. The job is then queued by plain EDF; other jobs' priorities play
//! no part once the deadline is fixed.
//!
//! The running deadline belongs to one station's policy instance. Two
//! stations never share it.
//!
//! # Reference
//! Spuri & Buttazzo (1996), "Scheduling Aperiodic Tasks in Dynamic Priority Systems"

use tracing::debug;

use super::{AdmissionContext, AdmissionPolicy, OrderedAdmission};
use crate::error::{SchedError, SchedResult};
use crate::models::{Job, WaitingList};
use crate::preemption::PreemptionOracle;
use crate::stats::higher_priority_utilization;

/// Deadline-assigning admission delegating to preemptive EDF.
#[derive(Debug, Clone)]
pub struct TbsAdmission {
    current_deadline: f64,
    edf: OrderedAdmission,
}

impl TbsAdmission {
    /// Creates a server whose first deadline is measured from `now`.
    pub fn new() -> Self {
        Self {
            current_deadline: 0.0,
            edf: OrderedAdmission::edf(),
        }
    }

    /// Last deadline assigned by this server.
    pub fn current_deadline(&self) -> f64 {
        self.current_deadline
    }

    /// Computes and records the deadline for `job`.
    fn assign_deadline(
        &mut self,
        job: &mut Job,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<f64> {
        let service_time = ctx.ensure_service_time(job, "TBS")?;

        let higher = match ctx.utilization() {
            Some(stats) => {
                let class = job.class_id();
                if class >= ctx.classes.len() {
                    return Err(SchedError::UnknownClass {
                        class,
                        classes: ctx.classes.len(),
                    });
                }
                higher_priority_utilization(stats, ctx.classes, &job.class)
            }
            None => 0.0,
        };
        if higher >= 1.0 {
            return Err(SchedError::InvalidUtilization {
                job: job.id,
                utilization: higher,
            });
        }

        let deadline = ctx.now.max(self.current_deadline) + service_time / (1.0 - higher);
        debug!(
            job = %job.id,
            now = ctx.now,
            service_time,
            higher_priority_utilization = higher,
            deadline,
            "assigned bandwidth deadline"
        );
        self.current_deadline = deadline;
        job.assign_soft_deadline(deadline);
        Ok(deadline)
    }
}

impl Default for TbsAdmission {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmissionPolicy for TbsAdmission {
    fn name(&self) -> &'static str {
        "TBS"
    }

    fn put(
        &mut self,
        mut job: Job,
        queue: &mut WaitingList,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        self.assign_deadline(&mut job, ctx)?;
        self.edf.insert(job, queue)
    }

    fn requeue(
        &mut self,
        job: Job,
        queue: &mut WaitingList,
        _ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        self.edf.insert(job, queue)
    }

    fn oracle(&self) -> Option<&dyn PreemptionOracle> {
        Some(&self.edf)
    }

    fn description(&self) -> &'static str {
        "Total Bandwidth Server"
    }
}
