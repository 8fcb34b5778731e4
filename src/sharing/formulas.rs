//! Processor-sharing formulas.
//!
//! `count(i)` is the number of class-`i` jobs in this server's list and
//! `split(i)` the fraction of the class routed here.
//!
//! | Formula | Eligible pool | Per-job share of target `t` |
//! |---------|---------------|-----------------------------|
//! | EPS | compatible, present | `1 / Σ count(i)·split(i)` |
//! | GPS | compatible, non-saturated, present, split > 0 | `(w[t] / Σ w[i]) / (count(t)·split(t))` |
//! | DPS | compatible, non-saturated, split > 0 | `w[t] / Σ w[i]·count(i)·split(i)` |
//! | QBPS | compatible, non-saturated | `1 / Σ count(i)·split(i)` |
//!
//! The priority variants further restrict the pool to classes at the single
//! highest priority among jobs currently in the list.
//!
//! A target with no compatible job present, or outside the pool, gets 0
//! before any division takes place; so does a pool whose denominator is 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CapacityAllocator, CapacityVectors};
use crate::error::{SchedError, SchedResult};
use crate::models::{ClassId, JobClass, WaitingList};
use crate::validation::check_class_table;

/// Share formula of a processor-sharing discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingFormula {
    /// Egalitarian: every eligible job gets an equal share.
    Eps,
    /// Generalized: classes split capacity by weight, jobs split their class's part.
    Gps,
    /// Discriminatory: every job's share is proportional to its class weight.
    Dps,
    /// Queue-based: egalitarian over non-saturated classes.
    Qbps,
}

/// A processor-sharing allocator, optionally restricted to the top priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorSharing {
    formula: SharingFormula,
    priority: bool,
}

impl ProcessorSharing {
    /// Creates an allocator over `formula` without priority restriction.
    pub fn new(formula: SharingFormula) -> Self {
        Self {
            formula,
            priority: false,
        }
    }

    /// Restricts the pool to the highest priority present.
    pub fn with_priority(mut self) -> Self {
        self.priority = true;
        self
    }

    /// Egalitarian processor sharing.
    pub fn eps() -> Self {
        Self::new(SharingFormula::Eps)
    }

    /// EPS among the highest priority present.
    pub fn eps_priority() -> Self {
        Self::eps().with_priority()
    }

    /// Generalized processor sharing.
    pub fn gps() -> Self {
        Self::new(SharingFormula::Gps)
    }

    /// GPS among the highest priority present.
    pub fn gps_priority() -> Self {
        Self::gps().with_priority()
    }

    /// Discriminatory processor sharing.
    pub fn dps() -> Self {
        Self::new(SharingFormula::Dps)
    }

    /// DPS among the highest priority present.
    pub fn dps_priority() -> Self {
        Self::dps().with_priority()
    }

    /// Queue-based processor sharing.
    pub fn qbps() -> Self {
        Self::new(SharingFormula::Qbps)
    }

    /// Share formula.
    pub fn formula(&self) -> SharingFormula {
        self.formula
    }

    /// Whether the pool is restricted to the highest priority present.
    pub fn is_priority(&self) -> bool {
        self.priority
    }

    fn eligible(
        &self,
        class: &JobClass,
        count: usize,
        vectors: &CapacityVectors<'_>,
        ceiling: Option<i32>,
    ) -> bool {
        let i = class.id;
        if !vectors.is_compatible(i) {
            return false;
        }
        if let Some(top) = ceiling {
            if class.priority != top {
                return false;
            }
        }
        match self.formula {
            SharingFormula::Eps => count > 0,
            SharingFormula::Gps => !vectors.is_saturated(i) && count > 0 && vectors.split(i) > 0.0,
            SharingFormula::Dps => !vectors.is_saturated(i) && vectors.split(i) > 0.0,
            SharingFormula::Qbps => !vectors.is_saturated(i),
        }
    }
}

impl CapacityAllocator for ProcessorSharing {
    fn name(&self) -> &'static str {
        match (self.formula, self.priority) {
            (SharingFormula::Eps, false) => "EPS",
            (SharingFormula::Eps, true) => "EPS-PRIO",
            (SharingFormula::Gps, false) => "GPS",
            (SharingFormula::Gps, true) => "GPS-PRIO",
            (SharingFormula::Dps, false) => "DPS",
            (SharingFormula::Dps, true) => "DPS-PRIO",
            (SharingFormula::Qbps, false) => "QBPS",
            (SharingFormula::Qbps, true) => "QBPS-PRIO",
        }
    }

    fn slice(
        &self,
        list: &WaitingList,
        classes: &[JobClass],
        vectors: &CapacityVectors<'_>,
        target: ClassId,
    ) -> SchedResult<f64> {
        check_class_table(classes)?;
        vectors.check(classes.len())?;
        let target_class = classes.get(target).ok_or(SchedError::UnknownClass {
            class: target,
            classes: classes.len(),
        })?;

        let counts = list.class_counts(classes.len());
        if counts[target] == 0 || !vectors.is_compatible(target) {
            return Ok(0.0);
        }

        let ceiling = if self.priority {
            list.max_priority()
        } else {
            None
        };
        if !self.eligible(target_class, counts[target], vectors, ceiling) {
            debug!(
                allocator = self.name(),
                class = target,
                "class outside the eligible pool"
            );
            return Ok(0.0);
        }

        let pool = classes
            .iter()
            .filter(|c| self.eligible(c, counts[c.id], vectors, ceiling));

        let share = match self.formula {
            SharingFormula::Eps | SharingFormula::Qbps => {
                let demand: f64 = pool.map(|c| counts[c.id] as f64 * vectors.split(c.id)).sum();
                (demand > 0.0).then(|| 1.0 / demand)
            }
            SharingFormula::Gps => {
                let total_weight: f64 = pool.map(|c| vectors.weight(c.id)).sum();
                let jobs = counts[target] as f64 * vectors.split(target);
                (total_weight > 0.0 && jobs > 0.0)
                    .then(|| (vectors.weight(target) / total_weight) / jobs)
            }
            SharingFormula::Dps => {
                let demand: f64 = pool
                    .map(|c| vectors.weight(c.id) * counts[c.id] as f64 * vectors.split(c.id))
                    .sum();
                (demand > 0.0).then(|| vectors.weight(target) / demand)
            }
        };

        Ok(share.unwrap_or_else(|| {
            warn!(
                allocator = self.name(),
                class = target,
                jobs = counts[target],
                "eligible pool has no capacity demand"
            );
            0.0
        }))
    }

    fn description(&self) -> &'static str {
        match self.formula {
            SharingFormula::Eps => "Egalitarian Processor Sharing",
            SharingFormula::Gps => "Generalized Processor Sharing",
            SharingFormula::Dps => "Discriminatory Processor Sharing",
            SharingFormula::Qbps => "Queue-Based Processor Sharing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use std::sync::Arc;

    fn table(priorities: &[i32]) -> Vec<JobClass> {
        priorities
            .iter()
            .enumerate()
            .map(|(i, &p)| JobClass::new(i, format!("c{i}")).with_priority(p))
            .collect()
    }

    fn list_with(classes: &[JobClass], counts: &[usize]) -> WaitingList {
        let mut list = WaitingList::new();
        let mut id = 0;
        for (c, &n) in counts.iter().enumerate() {
            let class = Arc::new(classes[c].clone());
            for _ in 0..n {
                list.push_back(Job::new(id, class.clone()));
                id += 1;
            }
        }
        list
    }

    fn shares(
        allocator: &ProcessorSharing,
        list: &WaitingList,
        classes: &[JobClass],
        vectors: &CapacityVectors<'_>,
    ) -> Vec<f64> {
        (0..classes.len())
            .map(|t| allocator.slice(list, classes, vectors, t).unwrap())
            .collect()
    }

    fn allocated(shares: &[f64], counts: &[usize]) -> f64 {
        shares.iter().zip(counts).map(|(s, &n)| s * n as f64).sum()
    }

    #[test]
    fn test_dps_example() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[2, 1]);
        let weights = [1.0, 3.0];
        let saturated = [false, false];
        let v = CapacityVectors::new(&weights, &saturated);

        let s = shares(&ProcessorSharing::dps(), &list, &classes, &v);
        assert!((s[0] - 0.2).abs() < 1e-10);
        assert!((s[1] - 0.6).abs() < 1e-10);
        assert!((allocated(&s, &[2, 1]) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_eps_allocates_everything() {
        let classes = table(&[0, 2, 1]);
        let counts = [3, 1, 4];
        let list = list_with(&classes, &counts);
        let weights = [5.0, 0.1, 2.0];
        let saturated = [true, false, true];
        let v = CapacityVectors::new(&weights, &saturated);

        let s = shares(&ProcessorSharing::eps(), &list, &classes, &v);
        for share in &s {
            assert!((share - 0.125).abs() < 1e-10);
        }
        assert!((allocated(&s, &counts) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_absent_class_gets_zero() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[2, 0]);
        let weights = [1.0, 1.0];
        let saturated = [false, false];
        let v = CapacityVectors::new(&weights, &saturated);
        for allocator in [
            ProcessorSharing::eps(),
            ProcessorSharing::gps(),
            ProcessorSharing::dps(),
            ProcessorSharing::qbps(),
        ] {
            assert_eq!(allocator.slice(&list, &classes, &v, 1), Ok(0.0));
        }
    }

    #[test]
    fn test_incompatible_class_gets_zero() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[1, 1]);
        let weights = [1.0, 1.0];
        let saturated = [false, false];
        let compatible = [true, false];
        let v = CapacityVectors::new(&weights, &saturated).with_compatibility(&compatible);

        let eps = ProcessorSharing::eps();
        assert_eq!(eps.slice(&list, &classes, &v, 1), Ok(0.0));
        assert_eq!(eps.slice(&list, &classes, &v, 0), Ok(1.0));
    }

    #[test]
    fn test_gps_weights_split_by_class() {
        let classes = table(&[0, 0, 0]);
        let list = list_with(&classes, &[2, 1, 3]);
        let weights = [1.0, 3.0, 4.0];
        let saturated = [false, false, true];
        let v = CapacityVectors::new(&weights, &saturated);

        let s = shares(&ProcessorSharing::gps(), &list, &classes, &v);
        // pool = {0, 1}: class 0 gets 1/4 split over 2 jobs, class 1 gets 3/4
        assert!((s[0] - 0.125).abs() < 1e-10);
        assert!((s[1] - 0.75).abs() < 1e-10);
        assert_eq!(s[2], 0.0);
        assert!((allocated(&s, &[2, 1, 3]) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_gps_ignores_absent_weight() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[2, 0]);
        let weights = [1.0, 9.0];
        let saturated = [false, false];
        let v = CapacityVectors::new(&weights, &saturated);
        let s = ProcessorSharing::gps().slice(&list, &classes, &v, 0).unwrap();
        assert!((s - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_splits_scale_demand() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[2, 2]);
        let weights = [1.0, 1.0];
        let saturated = [false, false];
        let splits = [0.5, 1.0];
        let v = CapacityVectors::new(&weights, &saturated).with_splits(&splits);

        // demand = 2*0.5 + 2*1.0 = 3
        let s = ProcessorSharing::eps().slice(&list, &classes, &v, 0).unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-10);

        // GPS: (1/2) / (2*0.5)
        let s = ProcessorSharing::gps().slice(&list, &classes, &v, 0).unwrap();
        assert!((s - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_zero_split_excluded_from_dps() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[1, 1]);
        let weights = [1.0, 1.0];
        let saturated = [false, false];
        let splits = [0.0, 1.0];
        let v = CapacityVectors::new(&weights, &saturated).with_splits(&splits);
        let dps = ProcessorSharing::dps();
        assert_eq!(dps.slice(&list, &classes, &v, 0), Ok(0.0));
        assert_eq!(dps.slice(&list, &classes, &v, 1), Ok(1.0));
    }

    #[test]
    fn test_qbps_matches_eps_without_saturation() {
        let classes = table(&[1, 0, 3]);
        let counts = [2, 5, 1];
        let list = list_with(&classes, &counts);
        let weights = [2.0, 1.0, 7.0];
        let saturated = [false, false, false];
        let splits = [1.0, 0.5, 0.25];
        let v = CapacityVectors::new(&weights, &saturated).with_splits(&splits);

        let eps = shares(&ProcessorSharing::eps(), &list, &classes, &v);
        let qbps = shares(&ProcessorSharing::qbps(), &list, &classes, &v);
        for (a, b) in eps.iter().zip(&qbps) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_qbps_excludes_saturated() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[1, 3]);
        let weights = [1.0, 1.0];
        let saturated = [false, true];
        let v = CapacityVectors::new(&weights, &saturated);
        let qbps = ProcessorSharing::qbps();
        assert_eq!(qbps.slice(&list, &classes, &v, 0), Ok(1.0));
        assert_eq!(qbps.slice(&list, &classes, &v, 1), Ok(0.0));
    }

    #[test]
    fn test_all_saturated_is_zero_not_nan() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[1, 1]);
        let weights = [1.0, 1.0];
        let saturated = [true, true];
        let v = CapacityVectors::new(&weights, &saturated);
        for allocator in [ProcessorSharing::gps(), ProcessorSharing::dps(), ProcessorSharing::qbps()] {
            let s = allocator.slice(&list, &classes, &v, 0).unwrap();
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn test_zero_weights_is_zero_not_nan() {
        let classes = table(&[0]);
        let list = list_with(&classes, &[2]);
        let weights = [0.0];
        let saturated = [false];
        let v = CapacityVectors::new(&weights, &saturated);
        assert_eq!(ProcessorSharing::gps().slice(&list, &classes, &v, 0), Ok(0.0));
        assert_eq!(ProcessorSharing::dps().slice(&list, &classes, &v, 0), Ok(0.0));
    }

    #[test]
    fn test_priority_variants_serve_top_priority_only() {
        let classes = table(&[1, 3, 3]);
        let counts = [4, 1, 2];
        let list = list_with(&classes, &counts);
        let weights = [1.0, 1.0, 2.0];
        let saturated = [false, false, false];
        let v = CapacityVectors::new(&weights, &saturated);

        let eps = shares(&ProcessorSharing::eps_priority(), &list, &classes, &v);
        assert_eq!(eps[0], 0.0);
        assert!((eps[1] - 1.0 / 3.0).abs() < 1e-10);
        assert!((allocated(&eps, &counts) - 1.0).abs() < 1e-10);

        // DPS-PRIO: denom = 1*1 + 2*2 = 5
        let dps = shares(&ProcessorSharing::dps_priority(), &list, &classes, &v);
        assert_eq!(dps[0], 0.0);
        assert!((dps[1] - 0.2).abs() < 1e-10);
        assert!((dps[2] - 0.4).abs() < 1e-10);

        // GPS-PRIO: weight sum = 3
        let gps = shares(&ProcessorSharing::gps_priority(), &list, &classes, &v);
        assert_eq!(gps[0], 0.0);
        assert!((gps[1] - 1.0 / 3.0).abs() < 1e-10);
        assert!((gps[2] - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_drops_when_top_class_leaves() {
        let classes = table(&[1, 3]);
        let list = list_with(&classes, &[2, 0]);
        let weights = [1.0, 1.0];
        let saturated = [false, false];
        let v = CapacityVectors::new(&weights, &saturated);
        let s = ProcessorSharing::eps_priority().slice(&list, &classes, &v, 0).unwrap();
        assert!((s - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_mis_sized_vectors_fail() {
        let classes = table(&[0, 0]);
        let list = list_with(&classes, &[1, 1]);
        let weights = [1.0];
        let saturated = [false, false];
        let v = CapacityVectors::new(&weights, &saturated);
        assert!(matches!(
            ProcessorSharing::gps().slice(&list, &classes, &v, 0),
            Err(SchedError::VectorLength { vector: "weights", .. })
        ));
    }

    #[test]
    fn test_unknown_target_fails() {
        let classes = table(&[0]);
        let list = list_with(&classes, &[1]);
        let weights = [1.0];
        let saturated = [false];
        let v = CapacityVectors::new(&weights, &saturated);
        assert_eq!(
            ProcessorSharing::eps().slice(&list, &classes, &v, 4),
            Err(SchedError::UnknownClass { class: 4, classes: 1 })
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(ProcessorSharing::dps_priority().name(), "DPS-PRIO");
        assert_eq!(ProcessorSharing::qbps().name(), "QBPS");
        assert_eq!(
            ProcessorSharing::gps().description(),
            "Generalized Processor Sharing"
        );
    }
}
