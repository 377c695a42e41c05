//! Entry validators.
//!
//! Pure functions deciding whether user input is well-formed before it is
//! admitted to a draft or the log store.

use crate::entry::{Exercise, Set};
use crate::types::ValidationError;

/// Trims an exercise name, rejecting it if nothing is left.
pub fn validate_exercise_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Drops blank sets (zero reps and zero weight), failing if none remain.
pub fn validate_sets(sets: &[Set]) -> Result<Vec<Set>, ValidationError> {
    let valid: Vec<Set> = sets.iter().filter(|set| !set.is_blank()).copied().collect();
    if valid.is_empty() {
        return Err(ValidationError::NoValidSets);
    }
    Ok(valid)
}

/// Trims a training title, rejecting it if nothing is left.
pub fn validate_training_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Name first, then sets.
pub fn validate_exercise(exercise: &Exercise) -> Result<Exercise, ValidationError> {
    let name = validate_exercise_name(&exercise.name)?;
    let sets = validate_sets(&exercise.sets)?;
    Ok(Exercise { name, sets })
}

/// Rejects negative, NaN or infinite numbers.
pub fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

/// Checks the numeric fields of a single set.
pub fn check_set(set: &Set) -> Result<(), ValidationError> {
    check_non_negative("weight", set.weight)?;
    if let Some(rpe) = set.rpe {
        check_non_negative("rpe", rpe)?;
    }
    Ok(())
}
