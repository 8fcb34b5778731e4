//! Removal policies: which job leaves the waiting list when a server frees.
//!
//! Admission already encodes priority in list order, so removal takes the
//! head. An empty result is the normal "nothing to serve" state.

use std::fmt::Debug;

use tracing::trace;

use crate::models::{ClassId, Job, WaitingList};

/// Selects the next job to serve.
pub trait RemovalPolicy: Debug {
    /// Policy name.
    fn name(&self) -> &'static str;

    /// Removes the next job, or `None` if the list is empty.
    fn get(&mut self, queue: &mut WaitingList) -> Option<Job>;

    /// Removes the first job of `class`, or `None` if no such job waits.
    ///
    /// An empty list and a list holding no job of `class` both yield
    /// `None`: either way the server has nothing of that class to take.
    /// A miss leaves the list untouched, so callers that need the
    /// distinction check [`WaitingList::is_empty`] afterwards.
    fn get_class(&mut self, queue: &mut WaitingList, class: ClassId) -> Option<Job>;
}

/// Takes the job at the head of the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadRemoval;

impl RemovalPolicy for HeadRemoval {
    fn name(&self) -> &'static str {
        "HEAD"
    }

    fn get(&mut self, queue: &mut WaitingList) -> Option<Job> {
        let job = queue.pop_front();
        if let Some(job) = &job {
            trace!(job = %job.id, remaining = queue.len(), "removed head");
        }
        job
    }

    fn get_class(&mut self, queue: &mut WaitingList, class: ClassId) -> Option<Job> {
        let index = queue.position(|j| j.class_id() == class)?;
        let job = queue.remove(index);
        if let Some(job) = &job {
            trace!(job = %job.id, class, index, "removed first of class");
        }
        job
    }
}
