//! Station scheduling domain models.
//!
//! Provides the data a station's policies operate on: jobs, the classes
//! that tag them, and the ordered waiting list whose order *is* the
//! schedule (no policy re-sorts it implicitly).
//!
//! # Domain Mappings
//!
//! | u-queueing | Computer systems | Call centre | Manufacturing |
//! |------------|------------------|-------------|---------------|
//! | Job | Request | Call | Work order |
//! | JobClass | Traffic class | Customer tier | Product family |
//! | WaitingList | Run queue | Hold queue | Buffer |

mod class;
mod job;
mod queue;

pub use class::{ClassId, JobClass};
pub use job::{Job, JobId};
pub use queue::WaitingList;
