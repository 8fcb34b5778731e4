//! Error type shared by every station policy.
//!
//! All variants describe contract violations by the caller (a job admitted
//! without the key its discipline orders by, capacity vectors that do not
//! cover the class table, ...). None of them is transient: there is nothing
//! to retry inside a single event.

use thiserror::Error;

use crate::models::{ClassId, JobId};

/// Errors raised by admission, preemption, removal and capacity allocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedError {
    /// A deadline-ordered discipline received a job without a soft deadline.
    #[error("job {job} has no soft deadline")]
    MissingDeadline {
        /// Offending job.
        job: JobId,
    },
    /// A service-time key was read before a service time was drawn.
    #[error("job {job} has no drawn service time")]
    ServiceTimeUnset {
        /// Offending job.
        job: JobId,
    },
    /// A capacity vector does not have one entry per class.
    #[error("capacity vector `{vector}` has length {actual}, expected {expected}")]
    VectorLength {
        /// Vector name (`weights`, `saturated`, `compatible`, `splits`).
        vector: &'static str,
        /// Number of classes.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// A class id outside the class table.
    #[error("class {class} is not in a table of {classes} classes")]
    UnknownClass {
        /// Requested class.
        class: ClassId,
        /// Size of the class table.
        classes: usize,
    },
    /// Class ids must be dense and equal to their table position.
    #[error("class at index {index} carries id {id}")]
    ClassIdMismatch {
        /// Position in the table.
        index: usize,
        /// Id found at that position.
        id: ClassId,
    },
    /// Higher-priority utilization leaves no bandwidth for the server.
    #[error("job {job}: higher-priority utilization {utilization} leaves no residual bandwidth")]
    InvalidUtilization {
        /// Job being admitted.
        job: JobId,
        /// Summed utilization of strictly higher-priority classes.
        utilization: f64,
    },
    /// A policy needed a collaborator the admission context does not carry.
    #[error("{policy} admission requires a {collaborator} in the context")]
    MissingCollaborator {
        /// Policy name.
        policy: &'static str,
        /// Missing collaborator (`service strategy`, `random engine`).
        collaborator: &'static str,
    },
    /// Index past the end of a waiting list.
    #[error("position {index} is out of bounds for a list of length {len}")]
    InvalidPosition {
        /// Requested index.
        index: usize,
        /// List length.
        len: usize,
    },
}

/// A type alias for `Result<T, SchedError>`.
pub type SchedResult<T> = Result<T, SchedError>;
