//! Input validation for station models.
//!
//! Checks structural integrity of class tables and capacity vectors before
//! a simulation run. Detects:
//! - Class ids that are not dense table positions
//! - Duplicate class names
//! - Capacity vectors that do not have one entry per class
//! - Negative or non-finite weights and splits, splits above 1
//!
//! The report functions collect every issue; the `check_*` helpers used on
//! hot paths stop at the first one and return a [`SchedError`].

use std::collections::HashSet;

use crate::error::{SchedError, SchedResult};
use crate::models::JobClass;
use crate::sharing::CapacityVectors;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A class id differs from its position in the table.
    NonDenseClassId,
    /// Two classes share the same name.
    DuplicateName,
    /// A capacity vector's length differs from the class count.
    VectorLength,
    /// A weight is negative, NaN or infinite.
    InvalidWeight,
    /// A split is outside `[0, 1]` or not finite.
    InvalidSplit,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a class table.
///
/// Checks:
/// 1. Every class id equals its index
/// 2. No duplicate class names
pub fn validate_classes(classes: &[JobClass]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, class) in classes.iter().enumerate() {
        if class.id != index {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonDenseClassId,
                format!("Class '{}' at index {index} has id {}", class.name, class.id),
            ));
        }
        if !names.insert(class.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate class name: {}", class.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates capacity vectors against a table of `classes` classes.
///
/// Checks:
/// 1. Every vector has exactly one entry per class
/// 2. Weights are finite and non-negative
/// 3. Splits are finite and within `[0, 1]`
pub fn validate_capacity(classes: usize, vectors: &CapacityVectors<'_>) -> ValidationResult {
    let mut errors = Vec::new();

    let lengths = [
        ("weights", Some(vectors.weights.len())),
        ("saturated", Some(vectors.saturated.len())),
        ("compatible", vectors.compatible.map(<[bool]>::len)),
        ("splits", vectors.splits.map(<[f64]>::len)),
    ];
    for (name, len) in lengths {
        if let Some(len) = len {
            if len != classes {
                errors.push(ValidationError::new(
                    ValidationErrorKind::VectorLength,
                    format!("Vector '{name}' has {len} entries for {classes} classes"),
                ));
            }
        }
    }

    for (class, &w) in vectors.weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Class {class} has invalid weight {w}"),
            ));
        }
    }

    for (class, &s) in vectors.splits.unwrap_or(&[]).iter().enumerate() {
        if !s.is_finite() || !(0.0..=1.0).contains(&s) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSplit,
                format!("Class {class} has invalid split {s}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fails fast if class ids are not dense table positions.
pub(crate) fn check_class_table(classes: &[JobClass]) -> SchedResult<()> {
    match classes
        .iter()
        .enumerate()
        .find(|(index, class)| class.id != *index)
    {
        Some((index, class)) => Err(SchedError::ClassIdMismatch {
            index,
            id: class.id,
        }),
        None => Ok(()),
    }
}
