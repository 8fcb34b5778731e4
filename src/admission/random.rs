//! Random admission.
//!
//! Inserts each arrival at an index drawn uniformly from `0..=len` using
//! the simulation's shared random stream. Exactly one sample is taken per
//! admission, so a fixed seed and admission sequence reproduce the trace.

use tracing::trace;

use super::{AdmissionContext, AdmissionPolicy};
use crate::error::SchedResult;
use crate::models::{Job, WaitingList};
use crate::random::index_inclusive;

/// Uniform random insertion.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAdmission;

impl AdmissionPolicy for RandomAdmission {
    fn name(&self) -> &'static str {
        "RAND"
    }

    fn put(
        &mut self,
        job: Job,
        queue: &mut WaitingList,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<usize> {
        let index = index_inclusive(ctx.random(self.name())?, queue.len());
        trace!(policy = "RAND", job = %job.id, index, len = queue.len(), "admitting job");
        queue.insert(index, job)?;
        Ok(index)
    }

    fn description(&self) -> &'static str {
        "Uniform Random Position"
    }
}
