use std::collections::{BTreeMap, HashSet};

use crate::error::ValidationError;
use crate::form::fields::{FieldKind, FieldSpec, FieldValues, FormVariant};

/// Subject name -> credit weight (always >= 1).
pub type CreditAssignment = BTreeMap<String, u32>;

/// Subject name -> rank in [1, N]. Only produced as a full bijection onto
/// {1..N}; a partial assignment is never returned.
pub type PriorityAssignment = BTreeMap<String, u32>;

/// Validates the priority fields in one pass, failing fast on the first
/// offending field:
/// 1. a value that does not parse, or falls outside [1, N], is rejected
///    naming the subject;
/// 2. a value seen twice is rejected naming the duplicated value;
/// 3. after the pass, the accepted set must cover {1..N} exactly.
pub fn validate_priorities(
    fields: &[FieldSpec],
    values: &FieldValues,
) -> Result<PriorityAssignment, ValidationError> {
    let priority_fields: Vec<&FieldSpec> =
        fields.iter().filter(|f| f.kind == FieldKind::Priority).collect();
    let total = priority_fields.len();

    let mut seen: HashSet<u32> = HashSet::new();
    let mut assignment = PriorityAssignment::new();

    for field in &priority_fields {
        let raw = values.get(&field.name);
        let value = match raw.trim().parse::<u32>() {
            Ok(v) if v >= 1 && v as usize <= total => v,
            _ => {
                return Err(ValidationError::PriorityOutOfRange {
                    subject: field.subject().to_string(),
                    max: total,
                })
            }
        };

        if !seen.insert(value) {
            return Err(ValidationError::DuplicatePriority { value });
        }
        assignment.insert(field.subject().to_string(), value);
    }

    // Distinct in-range values over N fields already cover {1..N}, but the
    // completeness of the accepted set is re-checked explicitly rather than
    // inferred from pairwise distinctness.
    if seen.len() != total {
        return Err(ValidationError::IncompleteAssignment { expected: total });
    }

    Ok(assignment)
}

/// Validates the credit fields: each must parse as an integer >= the field
/// minimum (the markup-level `min="1" required` constraint, enforced here).
pub fn validate_credits(
    fields: &[FieldSpec],
    values: &FieldValues,
) -> Result<CreditAssignment, ValidationError> {
    let mut assignment = CreditAssignment::new();

    for field in fields.iter().filter(|f| f.kind == FieldKind::Credit) {
        let raw = values.get(&field.name);
        let value = match raw.trim().parse::<u32>() {
            Ok(v) if v >= field.min => v,
            _ => {
                return Err(ValidationError::InvalidCredit {
                    subject: field.subject().to_string(),
                })
            }
        };
        assignment.insert(field.subject().to_string(), value);
    }

    Ok(assignment)
}

/// Runs whichever validations the active variant requires and returns the
/// collected maps. An empty field set is rejected outright: a page with no
/// subjects has nothing meaningful to submit.
pub fn collect_assignments(
    variant: FormVariant,
    fields: &[FieldSpec],
    values: &FieldValues,
) -> Result<(Option<CreditAssignment>, Option<PriorityAssignment>), ValidationError> {
    if fields.is_empty() {
        return Err(ValidationError::EmptyCatalog);
    }

    let credits = variant
        .collects_credits()
        .then(|| validate_credits(fields, values))
        .transpose()?;
    let priorities = variant
        .collects_priorities()
        .then(|| validate_priorities(fields, values))
        .transpose()?;

    Ok((credits, priorities))
}
