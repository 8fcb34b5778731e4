//! Station scheduling for discrete-event queueing networks.
//!
//! Provides the per-station decisions a queueing-network simulator makes
//! on every event: where an arrival enters the waiting list, which job a
//! freed server takes next, whether an arrival preempts the job in service,
//! and, under processor sharing, what capacity fraction each present class
//! receives. The event calendar, routing and service-time distributions
//! stay with the simulation kernel.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Job`, `JobClass`, `WaitingList`)
//! - **`admission`**: FCFS/LCFS/SJF/LJF/EDD/EDF/SRPT (with and without
//!   priority), Total Bandwidth Server, random insertion
//! - **`preemption`**: Two-job preemption oracle and removed-item disposition
//! - **`removal`**: Head-of-list selection, optionally class-filtered
//! - **`sharing`**: EPS/GPS/DPS/QBPS capacity allocation, with priority variants
//! - **`station`**: One station wiring the above together
//! - **`config`**: Serde-selectable disciplines
//! - **`service`**, **`stats`**, **`random`**: Kernel collaborators the
//!   policies consult (service sampler, utilization statistic, random stream)
//! - **`validation`**: Class-table and capacity-vector integrity checks
//!
//! # Architecture
//!
//! Single-threaded and cooperative: each call runs to completion inside one
//! event. Policies neither create nor destroy jobs; they reorder the jobs
//! handed to them and return scalars.
//!
//! # References
//!
//! - Kleinrock (1976), "Queueing Systems, Vol. 2: Computer Applications"
//! - Harchol-Balter (2013), "Performance Modeling and Design of Computer Systems"
//! - Buttazzo (2011), "Hard Real-Time Computing Systems", Ch. 6

pub mod admission;
pub mod config;
pub mod error;
pub mod models;
pub mod preemption;
pub mod random;
pub mod removal;
pub mod service;
pub mod sharing;
pub mod station;
pub mod stats;
pub mod validation;

pub use error::{SchedError, SchedResult};
