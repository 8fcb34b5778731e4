//! Waiting list model.
//!
//! The ordered sequence of jobs held by one station. Admission policies
//! place jobs at a discipline-defined index; removal takes from the front.
//! Processor-sharing stations keep the jobs they are serving in the list,
//! so per-class counts include jobs mid-service.

use std::collections::VecDeque;

use super::{ClassId, Job, JobId};
use crate::error::{SchedError, SchedResult};

/// Ordered jobs at one station. Order is the schedule.
#[derive(Debug, Clone, Default)]
pub struct WaitingList {
    jobs: VecDeque<Job>,
}

impl WaitingList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the list holds no jobs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job at `index`.
    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Inserts `job` before position `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, job: Job) -> SchedResult<()> {
        if index > self.jobs.len() {
            return Err(SchedError::InvalidPosition {
                index,
                len: self.jobs.len(),
            });
        }
        self.jobs.insert(index, job);
        Ok(())
    }

    /// Adds a job at the front.
    pub fn push_front(&mut self, job: Job) {
        self.jobs.push_front(job);
    }

    /// Adds a job at the back.
    pub fn push_back(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    /// Removes and returns the front job.
    pub fn pop_front(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Removes and returns the job at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Job> {
        self.jobs.remove(index)
    }

    /// Index of the first job satisfying `pred`.
    pub fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&Job) -> bool,
    {
        self.jobs.iter().position(pred)
    }

    /// Index of the job with the given id.
    pub fn index_of(&self, id: JobId) -> Option<usize> {
        self.position(|j| j.id == id)
    }

    /// Number of jobs of `class`.
    pub fn count_class(&self, class: ClassId) -> usize {
        self.jobs.iter().filter(|j| j.class_id() == class).count()
    }

    /// Per-class job counts for a table of `classes` classes.
    ///
    /// Jobs whose class id falls outside the table are not counted.
    pub fn class_counts(&self, classes: usize) -> Vec<usize> {
        let mut counts = vec![0; classes];
        for job in &self.jobs {
            if let Some(c) = counts.get_mut(job.class_id()) {
                *c += 1;
            }
        }
        counts
    }

    /// Highest class priority among jobs present.
    pub fn max_priority(&self) -> Option<i32> {
        self.jobs.iter().map(Job::priority).max()
    }

    /// Job ids front to back.
    pub fn ids(&self) -> Vec<JobId> {
        self.jobs.iter().map(|j| j.id).collect()
    }
}

impl<'a> IntoIterator for &'a WaitingList {
    type Item = &'a Job;
    type IntoIter = std::collections::vec_deque::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
