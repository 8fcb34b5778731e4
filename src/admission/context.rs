//! Admission context: the kernel collaborators a discipline may consult.

use tracing::trace;

use crate::error::{SchedError, SchedResult};
use crate::models::{Job, JobClass};
use crate::random::RandomEngine;
use crate::service::ServiceStrategy;
use crate::stats::UtilizationStats;

/// Runtime state passed to admission policies on each arrival.
///
/// Only `now` is always present; the rest are attached by the kernel for
/// the disciplines that need them (service sampler for SJF/LJF/SRPT/TBS,
/// class table and utilization for TBS, random stream for random
/// admission).
#[derive(Default)]
pub struct AdmissionContext<'a> {
    /// Current simulation time.
    pub now: f64,
    /// Class table of the model.
    pub classes: &'a [JobClass],
    service: Option<&'a mut dyn ServiceStrategy>,
    utilization: Option<&'a dyn UtilizationStats>,
    random: Option<&'a mut dyn RandomEngine>,
}

impl<'a> AdmissionContext<'a> {
    /// Creates a context at the given time.
    pub fn at_time(now: f64) -> Self {
        Self {
            now,
            ..Default::default()
        }
    }

    /// Attaches the class table.
    pub fn with_classes(mut self, classes: &'a [JobClass]) -> Self {
        self.classes = classes;
        self
    }

    /// Attaches the station's service-time sampler.
    pub fn with_service(mut self, service: &'a mut dyn ServiceStrategy) -> Self {
        self.service = Some(service);
        self
    }

    /// Attaches the running per-class utilization statistic.
    pub fn with_utilization(mut self, stats: &'a dyn UtilizationStats) -> Self {
        self.utilization = Some(stats);
        self
    }

    /// Attaches the simulation random stream.
    pub fn with_random(mut self, random: &'a mut dyn RandomEngine) -> Self {
        self.random = Some(random);
        self
    }

    /// Utilization statistic, if attached.
    pub fn utilization(&self) -> Option<&'a dyn UtilizationStats> {
        self.utilization
    }

    /// Ensures `job` carries a drawn service time, sampling one if unset.
    pub(crate) fn ensure_service_time(
        &mut self,
        job: &mut Job,
        policy: &'static str,
    ) -> SchedResult<f64> {
        if let Some(t) = job.service_time() {
            return Ok(t);
        }
        let service = self
            .service
            .as_deref_mut()
            .ok_or(SchedError::MissingCollaborator {
                policy,
                collaborator: "service strategy",
            })?;
        let t = service.wait(job.class_id());
        trace!(job = %job.id, class = job.class_id(), service_time = t, "drew service time");
        job.set_service_time(t);
        Ok(t)
    }

    /// The random stream, failing if none is attached.
    pub(crate) fn random(
        &mut self,
        policy: &'static str,
    ) -> SchedResult<&mut (dyn RandomEngine + 'a)> {
        match self.random.as_deref_mut() {
            Some(r) => Ok(r),
            None => Err(SchedError::MissingCollaborator {
                policy,
                collaborator: "random engine",
            }),
        }
    }
}

impl std::fmt::Debug for AdmissionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionContext")
            .field("now", &self.now)
            .field("classes", &self.classes.len())
            .field("service", &self.service.is_some())
            .field("utilization", &self.utilization.is_some())
            .field("random", &self.random.is_some())
            .finish()
    }
}
