//! Processor-sharing capacity allocation.
//!
//! A processor-sharing station serves every present job at once. On each
//! population change the kernel asks the station's [`CapacityAllocator`],
//! once per class, for the fraction of total capacity one job of that class
//! receives until the next change.
//!
//! # Capacity Vectors
//!
//! | Vector | Meaning | Default |
//! |--------|---------|---------|
//! | `weights` | relative rate entitlement | required |
//! | `saturated` | class excluded this round | required |
//! | `compatible` | server may serve the class at all | all `true` |
//! | `splits` | fraction of the class's jobs routed to this server | all `1.0` |
//!
//! All vectors are indexed by class id and must have one entry per class.
//!
//! # Reference
//! - Kleinrock (1967), "Time-Shared Systems: A Theoretical Treatment"
//! - Parekh & Gallager (1993), "A Generalized Processor Sharing Approach to Flow Control"
//! - Fayolle, Mitrani & Iasnogorodski (1980), "Sharing a Processor Among Many Job Classes"

mod formulas;

pub use formulas::{ProcessorSharing, SharingFormula};

use std::fmt::Debug;

use crate::error::{SchedError, SchedResult};
use crate::models::{ClassId, JobClass, WaitingList};

/// Per-call class metadata for capacity allocation.
#[derive(Debug, Clone, Copy)]
pub struct CapacityVectors<'a> {
    /// Relative rate entitlement per class.
    pub weights: &'a [f64],
    /// Classes excluded from this allocation round.
    pub saturated: &'a [bool],
    /// Classes this server may serve; `None` = all.
    pub compatible: Option<&'a [bool]>,
    /// Share of each class's jobs routed to this server; `None` = all 1.0.
    pub splits: Option<&'a [f64]>,
}

impl<'a> CapacityVectors<'a> {
    /// Creates vectors with every class compatible and unsplit.
    pub fn new(weights: &'a [f64], saturated: &'a [bool]) -> Self {
        Self {
            weights,
            saturated,
            compatible: None,
            splits: None,
        }
    }

    /// Sets per-class compatibility.
    pub fn with_compatibility(mut self, compatible: &'a [bool]) -> Self {
        self.compatible = Some(compatible);
        self
    }

    /// Sets per-class split fractions.
    pub fn with_splits(mut self, splits: &'a [f64]) -> Self {
        self.splits = Some(splits);
        self
    }

    /// Fails fast unless every vector has exactly `classes` entries.
    pub fn check(&self, classes: usize) -> SchedResult<()> {
        let lengths = [
            ("weights", Some(self.weights.len())),
            ("saturated", Some(self.saturated.len())),
            ("compatible", self.compatible.map(<[bool]>::len)),
            ("splits", self.splits.map(<[f64]>::len)),
        ];
        for (vector, len) in lengths {
            if let Some(actual) = len {
                if actual != classes {
                    return Err(SchedError::VectorLength {
                        vector,
                        expected: classes,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }

    /// Weight of `class`.
    #[inline]
    pub fn weight(&self, class: ClassId) -> f64 {
        self.weights[class]
    }

    /// Whether `class` is saturated.
    #[inline]
    pub fn is_saturated(&self, class: ClassId) -> bool {
        self.saturated[class]
    }

    /// Whether this server may serve `class`.
    #[inline]
    pub fn is_compatible(&self, class: ClassId) -> bool {
        self.compatible.map_or(true, |c| c[class])
    }

    /// Split fraction of `class`.
    #[inline]
    pub fn split(&self, class: ClassId) -> f64 {
        self.splits.map_or(1.0, |s| s[class])
    }
}

/// Computes per-job capacity fractions for processor-sharing stations.
pub trait CapacityAllocator: Debug {
    /// Discipline name (e.g., "GPS", "DPS-PRIO").
    fn name(&self) -> &'static str;

    /// Fraction of total capacity given to one job of `target`.
    ///
    /// Returns 0 when no compatible job of `target` is present or the class
    /// is excluded from the eligible pool. Fails fast if the vectors or the
    /// class table do not cover `target`.
    fn slice(
        &self,
        list: &WaitingList,
        classes: &[JobClass],
        vectors: &CapacityVectors<'_>,
        target: ClassId,
    ) -> SchedResult<f64>;

    /// Discipline description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let weights = [1.0, 2.0];
        let saturated = [false, true];
        let v = CapacityVectors::new(&weights, &saturated);
        assert!(v.is_compatible(1));
        assert_eq!(v.split(0), 1.0);
        assert!(v.is_saturated(1));
        assert_eq!(v.weight(1), 2.0);
        assert!(v.check(2).is_ok());
    }

    #[test]
    fn test_check_lengths() {
        let weights = [1.0, 2.0];
        let saturated = [false, false];
        let splits = [0.5];
        let v = CapacityVectors::new(&weights, &saturated).with_splits(&splits);
        assert_eq!(
            v.check(2),
            Err(SchedError::VectorLength {
                vector: "splits",
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(
            CapacityVectors::new(&weights, &saturated).check(3),
            Err(SchedError::VectorLength {
                vector: "weights",
                expected: 3,
                actual: 2,
            })
        );
    }
}
