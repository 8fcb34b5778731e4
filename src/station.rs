//! A single station: waiting list, servers and the policies that drive them.
//!
//! The event kernel owns time and routing; a [`Station`] owns the order of
//! its jobs. It wires the three per-event decisions together:
//!
//! 1. On arrival the admission policy places the job.
//! 2. If a server is free, the removal policy picks the next job to serve.
//!    Otherwise, for preemptive disciplines, the oracle finds the weakest
//!    job in service; if the arrival beats it, that job is displaced and
//!    handled per the station's [`RemovedDisposition`].
//! 3. On completion the job leaves and the freed server pulls the next one;
//!    both paths report which jobs entered service.
//!
//! A station's list is private to it. Policy state (such as the TBS running
//! deadline) lives in the station's own policy instance.

use tracing::{debug, trace};

use crate::admission::{AdmissionContext, AdmissionPolicy};
use crate::error::SchedResult;
use crate::models::{Job, JobId, WaitingList};
use crate::preemption::RemovedDisposition;
use crate::removal::{HeadRemoval, RemovalPolicy};

/// What happened on an arrival.
#[derive(Debug, Default)]
pub struct ArrivalOutcome {
    /// Index the arrival was admitted at.
    pub index: usize,
    /// Jobs that entered service as a result.
    pub started: Vec<JobId>,
    /// Job displaced from service by the arrival.
    pub preempted: Option<JobId>,
    /// Displaced job handed back under [`RemovedDisposition::Discard`].
    pub discarded: Option<Job>,
}

/// What happened on a completion.
#[derive(Debug)]
pub struct CompletionOutcome {
    /// The job that left the station.
    pub job: Job,
    /// Waiting jobs that took the freed server.
    pub started: Vec<JobId>,
}

/// A queueing station with `servers` identical servers.
#[derive(Debug)]
pub struct Station {
    name: String,
    servers: usize,
    disposition: RemovedDisposition,
    admission: Box<dyn AdmissionPolicy>,
    removal: Box<dyn RemovalPolicy>,
    queue: WaitingList,
    in_service: Vec<Job>,
}

impl Station {
    /// Creates a single-server station with head removal.
    pub fn new(name: impl Into<String>, admission: Box<dyn AdmissionPolicy>) -> Self {
        Self {
            name: name.into(),
            servers: 1,
            disposition: RemovedDisposition::default(),
            admission,
            removal: Box::new(HeadRemoval),
            queue: WaitingList::new(),
            in_service: Vec::new(),
        }
    }

    /// Sets the number of servers (at least 1).
    pub fn with_servers(mut self, servers: usize) -> Self {
        self.servers = servers.max(1);
        self
    }

    /// Sets where preempted jobs go.
    pub fn with_disposition(mut self, disposition: RemovedDisposition) -> Self {
        self.disposition = disposition;
        self
    }

    /// Replaces the removal policy.
    pub fn with_removal(mut self, removal: Box<dyn RemovalPolicy>) -> Self {
        self.removal = removal;
        self
    }

    /// Station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Admission discipline.
    pub fn admission(&self) -> &dyn AdmissionPolicy {
        self.admission.as_ref()
    }

    /// Configured removed-item disposition.
    pub fn disposition(&self) -> RemovedDisposition {
        self.disposition
    }

    /// Number of servers.
    pub fn servers(&self) -> usize {
        self.servers
    }

    /// Jobs waiting, in schedule order.
    pub fn queue(&self) -> &WaitingList {
        &self.queue
    }

    /// Jobs in service.
    pub fn in_service(&self) -> &[Job] {
        &self.in_service
    }

    /// Jobs in service, for the kernel to account received service.
    pub fn in_service_mut(&mut self) -> &mut [Job] {
        &mut self.in_service
    }

    /// Total jobs at the station.
    pub fn population(&self) -> usize {
        self.queue.len() + self.in_service.len()
    }

    /// Admits an arriving job and resolves server assignment.
    pub fn arrive(
        &mut self,
        job: Job,
        ctx: &mut AdmissionContext<'_>,
    ) -> SchedResult<ArrivalOutcome> {
        let arrival = job.id;
        let index = self.admission.put(job, &mut self.queue, ctx)?;
        let mut outcome = ArrivalOutcome {
            index,
            ..Default::default()
        };

        if self.in_service.len() < self.servers {
            outcome.started = self.fill_servers();
            return Ok(outcome);
        }

        let Some(oracle) = self.admission.oracle() else {
            return Ok(outcome);
        };
        let Some(candidate) = self.queue.get(index) else {
            return Ok(outcome);
        };

        // weakest incumbent under the policy's ranking; ties keep the earlier slot
        let mut slot = 0;
        for (i, incumbent) in self.in_service.iter().enumerate().skip(1) {
            if oracle.preempts(&self.in_service[slot], incumbent)? {
                slot = i;
            }
        }
        if !oracle.preempts(candidate, &self.in_service[slot])? {
            return Ok(outcome);
        }

        let Some(winner) = self.queue.remove(index) else {
            return Ok(outcome);
        };
        let displaced = std::mem::replace(&mut self.in_service[slot], winner);
        debug!(
            station = %self.name,
            policy = self.admission.name(),
            arrival = %arrival,
            displaced = %displaced.id,
            disposition = ?self.disposition,
            "preempted job in service"
        );
        outcome.started.push(arrival);
        outcome.preempted = Some(displaced.id);

        match self.disposition {
            RemovedDisposition::OriginalPosition => {
                self.admission.requeue(displaced, &mut self.queue, ctx)?;
            }
            RemovedDisposition::Front => self.queue.push_front(displaced),
            RemovedDisposition::Discard => outcome.discarded = Some(displaced),
        }
        Ok(outcome)
    }

    /// Completes the job `id` in service and starts the next waiting jobs.
    ///
    /// Returns `None` if `id` is not in service.
    pub fn complete(&mut self, id: JobId) -> Option<CompletionOutcome> {
        let slot = self.in_service.iter().position(|j| j.id == id)?;
        let mut job = self.in_service.remove(slot);
        job.end_visit();
        trace!(station = %self.name, job = %id, "service complete");
        let started = self.fill_servers();
        Some(CompletionOutcome { job, started })
    }

    /// Moves waiting jobs into free servers; returns the ids started.
    pub fn fill_servers(&mut self) -> Vec<JobId> {
        let mut started = Vec::new();
        while self.in_service.len() < self.servers {
            let Some(job) = self.removal.get(&mut self.queue) else {
                break;
            };
            trace!(station = %self.name, job = %job.id, "service start");
            started.push(job.id);
            self.in_service.push(job);
        }
        started
    }
}
