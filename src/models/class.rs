//! Job class model.
//!
//! A class groups jobs that share a priority, a service-time distribution
//! and a routing. Class ids are dense (`0..N`) so per-class vectors can be
//! indexed directly.

use serde::{Deserialize, Serialize};

/// Dense class index.
pub type ClassId = usize;

/// A job class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobClass {
    /// Dense identifier, equal to the class's position in the class table.
    pub id: ClassId,
    /// Human-readable name.
    pub name: String,
    /// Scheduling priority (higher = more important).
    pub priority: i32,
}

impl JobClass {
    /// Creates a class with priority 0.
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether this class strictly outranks `other`.
    #[inline]
    pub fn outranks(&self, other: &JobClass) -> bool {
        self.priority > other.priority
    }
}
