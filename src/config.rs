//! Runtime-selectable station configuration.
//!
//! Model files name a station's discipline; these serde types turn that
//! name into a boxed policy so the kernel can switch disciplines through
//! configuration without code changes.
//!
//! # Usage
//!
//! ```
//! use u_queueing::config::{DisciplineConfig, StationConfig};
//! use u_queueing::preemption::RemovedDisposition;
//!
//! let config = StationConfig {
//!     name: "cpu".into(),
//!     discipline: DisciplineConfig::Srpt { priority: false },
//!     servers: 2,
//!     disposition: RemovedDisposition::Front,
//! };
//! let station = config.build();
//! assert_eq!(station.admission().name(), "SRPT");
//! assert_eq!(station.servers(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::admission::{AdmissionPolicy, OrderedAdmission, RandomAdmission, TbsAdmission};
use crate::preemption::RemovedDisposition;
use crate::sharing::{CapacityAllocator, ProcessorSharing, SharingFormula};
use crate::station::Station;

/// Admission discipline of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisciplineConfig {
    /// First come first served, optionally within priority groups.
    Fcfs {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
        /// Strictly higher priority arrivals preempt.
        #[serde(default)]
        preemptive: bool,
    },
    /// Last come first served.
    Lcfs {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
        /// Every arrival preempts (within its priority group).
        #[serde(default)]
        preemptive: bool,
    },
    /// Shortest job first.
    Sjf {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
    },
    /// Longest job first.
    Ljf {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
    },
    /// Earliest due date (non-preemptive).
    Edd {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
    },
    /// Earliest deadline first (preemptive).
    Edf {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
    },
    /// Shortest remaining processing time (preemptive).
    Srpt {
        /// Partition by class priority.
        #[serde(default)]
        priority: bool,
    },
    /// Total Bandwidth Server.
    Tbs,
    /// Uniform random insertion.
    Random,
}

impl DisciplineConfig {
    /// Builds a fresh policy instance (one per station).
    pub fn build(&self) -> Box<dyn AdmissionPolicy> {
        let partition = |policy: OrderedAdmission, priority: bool| {
            if priority {
                policy.with_priority_partition()
            } else {
                policy
            }
        };
        let preempt = |policy: OrderedAdmission, preemptive: bool| {
            if preemptive {
                policy.with_preemption()
            } else {
                policy
            }
        };
        match *self {
            Self::Fcfs {
                priority,
                preemptive,
            } => Box::new(preempt(partition(OrderedAdmission::fcfs(), priority), preemptive)),
            Self::Lcfs {
                priority,
                preemptive,
            } => Box::new(preempt(partition(OrderedAdmission::lcfs(), priority), preemptive)),
            Self::Sjf { priority } => Box::new(partition(OrderedAdmission::sjf(), priority)),
            Self::Ljf { priority } => Box::new(partition(OrderedAdmission::ljf(), priority)),
            Self::Edd { priority } => Box::new(partition(OrderedAdmission::edd(), priority)),
            Self::Edf { priority } => Box::new(partition(OrderedAdmission::edf(), priority)),
            Self::Srpt { priority } => Box::new(partition(OrderedAdmission::srpt(), priority)),
            Self::Tbs => Box::new(TbsAdmission::new()),
            Self::Random => Box::new(RandomAdmission),
        }
    }
}

impl Default for DisciplineConfig {
    fn default() -> Self {
        Self::Fcfs {
            priority: false,
            preemptive: false,
        }
    }
}

/// Processor-sharing discipline of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Share formula.
    pub formula: SharingFormula,
    /// Restrict the pool to the highest priority present.
    #[serde(default)]
    pub priority: bool,
}

impl SharingConfig {
    /// Builds the allocator.
    pub fn build(&self) -> Box<dyn CapacityAllocator> {
        let ps = ProcessorSharing::new(self.formula);
        if self.priority {
            Box::new(ps.with_priority())
        } else {
            Box::new(ps)
        }
    }
}

fn default_servers() -> usize {
    1
}

/// Full description of a queueing station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Station name.
    pub name: String,
    /// Admission discipline.
    #[serde(default)]
    pub discipline: DisciplineConfig,
    /// Number of servers.
    #[serde(default = "default_servers")]
    pub servers: usize,
    /// Where preempted jobs go.
    #[serde(default)]
    pub disposition: RemovedDisposition,
}

impl StationConfig {
    /// Builds the station with its own policy state.
    pub fn build(&self) -> Station {
        Station::new(self.name.clone(), self.discipline.build())
            .with_servers(self.servers)
            .with_disposition(self.disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discipline_names() {
        let cases = [
            (DisciplineConfig::default(), "FCFS"),
            (
                DisciplineConfig::Fcfs {
                    priority: true,
                    preemptive: true,
                },
                "FCFS-PR-PRIO",
            ),
            (
                DisciplineConfig::Lcfs {
                    priority: false,
                    preemptive: true,
                },
                "LCFS-PR",
            ),
            (DisciplineConfig::Sjf { priority: false }, "SJF"),
            (DisciplineConfig::Ljf { priority: true }, "LJF-PRIO"),
            (DisciplineConfig::Edd { priority: true }, "EDD-PRIO"),
            (DisciplineConfig::Edf { priority: false }, "EDF"),
            (DisciplineConfig::Srpt { priority: true }, "SRPT-PRIO"),
            (DisciplineConfig::Tbs, "TBS"),
            (DisciplineConfig::Random, "RAND"),
        ];
        for (config, name) in cases {
            assert_eq!(config.build().name(), name);
        }
    }

    #[test]
    fn test_preemptive_flags() {
        assert!(DisciplineConfig::Edf { priority: true }.build().is_preemptive());
        assert!(DisciplineConfig::Tbs.build().is_preemptive());
        assert!(!DisciplineConfig::Edd { priority: true }.build().is_preemptive());
        assert!(!DisciplineConfig::Random.build().is_preemptive());
    }

    #[test]
    fn test_station_from_json() {
        let json = r#"{
            "name": "disk",
            "discipline": { "kind": "edf", "priority": true },
            "servers": 3,
            "disposition": "discard"
        }"#;
        let config: StationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.discipline, DisciplineConfig::Edf { priority: true });

        let station = config.build();
        assert_eq!(station.name(), "disk");
        assert_eq!(station.servers(), 3);
        assert_eq!(station.disposition(), RemovedDisposition::Discard);
        assert_eq!(station.admission().name(), "EDF-PRIO");
    }

    #[test]
    fn test_station_defaults() {
        let config: StationConfig = serde_json::from_str(r#"{ "name": "q" }"#).unwrap();
        assert_eq!(config.servers, 1);
        assert_eq!(config.disposition, RemovedDisposition::OriginalPosition);
        assert_eq!(config.discipline, DisciplineConfig::default());
    }

    #[test]
    fn test_sharing_from_json() {
        let config: SharingConfig =
            serde_json::from_str(r#"{ "formula": "dps", "priority": true }"#).unwrap();
        assert_eq!(config.build().name(), "DPS-PRIO");

        let config: SharingConfig = serde_json::from_str(r#"{ "formula": "qbps" }"#).unwrap();
        assert_eq!(config.build().name(), "QBPS");
    }

    #[test]
    fn test_tbs_state_is_per_station() {
        use crate::admission::AdmissionContext;
        use crate::models::{Job, JobClass};
        use std::sync::Arc;

        let config = StationConfig {
            name: "tbs".into(),
            discipline: DisciplineConfig::Tbs,
            servers: 1,
            disposition: RemovedDisposition::OriginalPosition,
        };
        let mut a = config.build();
        let mut b = config.build();
        let c = Arc::new(JobClass::new(0, "c"));
        let mut ctx = AdmissionContext::at_time(0.0);

        a.arrive(Job::new(1, c.clone()).with_service_time(5.0), &mut ctx)
            .unwrap();
        b.arrive(Job::new(2, c).with_service_time(3.0), &mut ctx)
            .unwrap();

        assert_eq!(a.in_service()[0].soft_deadline(), Some(5.0));
        assert_eq!(b.in_service()[0].soft_deadline(), Some(3.0));
    }

    #[test]
    fn test_discipline_tag_is_kind() {
        let json = serde_json::to_value(DisciplineConfig::Tbs).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "tbs" }));

        let config: StationConfig = serde_json::from_str(
            r#"{ "name": "cpu", "discipline": { "kind": "sjf", "priority": true } }"#,
        )
        .unwrap();
        assert_eq!(config.discipline, DisciplineConfig::Sjf { priority: true });
    }
}
