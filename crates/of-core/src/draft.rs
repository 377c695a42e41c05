//! Draft editing of a single exercise.
//!
//! An [`ExerciseDraft`] holds the exercise currently being composed (or
//! edited) and only yields an [`Exercise`] when [`ExerciseDraft::commit`]
//! validates it. Nothing leaves the draft on failure.

use serde::Serialize;

use crate::entry::{Exercise, Set};
use crate::types::ValidationError;
use crate::validate::validate_exercise;

/// Where a draft is in its lifecycle.
///
/// The validated and committed states are never observable: `commit` either
/// resets to `Empty` or leaves the draft `Composing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftState {
    /// Untouched: blank name and one blank set.
    Empty,
    /// Edited since the last reset.
    Composing,
}

/// Which numeric column of a set row to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
    Rpe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseDraft {
    name: String,
    sets: Vec<Set>,
    state: DraftState,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: vec![Set::default()],
            state: DraftState::Empty,
        }
    }
}

impl ExerciseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from an existing exercise, for the edit flow.
    pub fn editing(exercise: &Exercise) -> Self {
        let sets = if exercise.sets.is_empty() {
            vec![Set::default()]
        } else {
            exercise.sets.clone()
        };
        Self {
            name: exercise.name.clone(),
            sets,
            state: DraftState::Composing,
        }
    }

    pub const fn state(&self) -> DraftState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set rows as shown in the editor. Never empty.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Appends a blank set row.
    pub fn add_set(&mut self) {
        self.sets.push(Set::default());
        self.touch();
    }

    /// Drops the last row, keeping at least one. Returns whether a row was
    /// removed.
    pub fn remove_last_set(&mut self) -> bool {
        if self.sets.len() <= 1 {
            return false;
        }
        self.sets.pop();
        self.touch();
        true
    }

    /// Drops the row at `index`, keeping at least one. Returns whether a
    /// row was removed.
    pub fn remove_set(&mut self, index: usize) -> bool {
        if self.sets.len() <= 1 || index >= self.sets.len() {
            return false;
        }
        self.sets.remove(index);
        self.touch();
        true
    }

    pub fn set_reps(&mut self, index: usize, reps: u32) -> bool {
        self.update(index, |set| set.reps = reps)
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        self.update(index, |set| set.weight = weight)
    }

    pub fn set_rpe(&mut self, index: usize, rpe: Option<f64>) -> bool {
        self.update(index, |set| set.rpe = rpe)
    }

    /// Applies raw text typed into a set cell.
    ///
    /// Empty or non-numeric input counts as zero for reps and weight, and
    /// clears the RPE. Fractional reps are truncated.
    pub fn set_field(&mut self, index: usize, field: SetField, raw: &str) -> bool {
        let raw = raw.trim();
        match field {
            SetField::Reps => self.set_reps(index, parse_reps(raw)),
            SetField::Weight => {
                let weight = raw.parse::<f64>().ok().filter(|w| w.is_finite() && *w >= 0.0);
                self.set_weight(index, weight.unwrap_or(0.0))
            }
            SetField::Rpe => {
                let rpe = raw.parse::<f64>().ok().filter(|r| r.is_finite() && *r >= 0.0);
                self.set_rpe(index, rpe)
            }
        }
    }

    /// Validates the draft. On success returns the trimmed exercise with
    /// blank sets dropped and resets to `Empty`; on failure the draft is
    /// left as it was.
    pub fn commit(&mut self) -> Result<Exercise, ValidationError> {
        let candidate = Exercise {
            name: self.name.clone(),
            sets: self.sets.clone(),
        };
        let exercise = validate_exercise(&candidate)?;
        self.cancel();
        Ok(exercise)
    }

    /// Discards everything and returns to `Empty`.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    fn update(&mut self, index: usize, apply: impl FnOnce(&mut Set)) -> bool {
        let Some(set) = self.sets.get_mut(index) else {
            return false;
        };
        apply(set);
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.state = DraftState::Composing;
    }
}

/// Reads the leading whole number of a reps cell: "5.5" and "5 reps" give
/// 5. Anything without leading digits gives 0.
fn parse_reps(raw: &str) -> u32 {
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty_with_one_blank_set() {
        let draft = ExerciseDraft::new();
        assert_eq!(draft.state(), DraftState::Empty);
        assert_eq!(draft.name(), "");
        assert_eq!(draft.sets(), [Set::default()]);
    }

    #[test]
    fn any_edit_moves_to_composing() {
        let mut draft = ExerciseDraft::new();
        draft.add_set();
        assert_eq!(draft.state(), DraftState::Composing);

        let mut draft = ExerciseDraft::new();
        assert!(draft.set_reps(0, 5));
        assert_eq!(draft.state(), DraftState::Composing);
    }

    #[test]
    fn at_least_one_set_row_is_kept() {
        let mut draft = ExerciseDraft::new();
        assert!(!draft.remove_last_set());
        assert!(!draft.remove_set(0));
        assert_eq!(draft.sets().len(), 1);

        draft.add_set();
        draft.add_set();
        assert!(draft.remove_set(1));
        assert!(draft.remove_last_set());
        assert!(!draft.remove_last_set());
        assert_eq!(draft.sets().len(), 1);
    }

    #[test]
    fn out_of_range_updates_are_ignored() {
        let mut draft = ExerciseDraft::new();
        assert!(!draft.set_reps(3, 5));
        assert!(!draft.remove_set(7));
        assert_eq!(draft.state(), DraftState::Empty);
    }

    #[test]
    fn raw_text_input_coerces_to_numbers() {
        let mut draft = ExerciseDraft::new();
        draft.set_field(0, SetField::Reps, "8");
        draft.set_field(0, SetField::Weight, "102.5");
        draft.set_field(0, SetField::Rpe, "7");
        assert_eq!(draft.sets()[0], Set::new(8, 102.5).with_rpe(7.0));

        draft.set_field(0, SetField::Reps, "");
        draft.set_field(0, SetField::Weight, "heavy");
        draft.set_field(0, SetField::Rpe, "");
        assert_eq!(draft.sets()[0], Set::default());
    }

    #[test]
    fn fractional_reps_are_truncated() {
        let mut draft = ExerciseDraft::new();
        draft.set_field(0, SetField::Reps, "5.5");
        assert_eq!(draft.sets()[0].reps, 5);
        draft.set_field(0, SetField::Reps, " 12 reps");
        assert_eq!(draft.sets()[0].reps, 12);
        draft.set_field(0, SetField::Reps, "-3");
        assert_eq!(draft.sets()[0].reps, 0);
        draft.set_field(0, SetField::Reps, ".5");
        assert_eq!(draft.sets()[0].reps, 0);
    }

    #[test]
    fn successful_commit_resets_the_draft() {
        let mut draft = ExerciseDraft::new();
        draft.set_name("  Deadlift ");
        draft.set_reps(0, 5);
        draft.set_weight(0, 315.0);
        draft.add_set();

        let exercise = draft.commit().unwrap();
        assert_eq!(exercise.name, "Deadlift");
        assert_eq!(exercise.sets, vec![Set::new(5, 315.0)]);
        assert_eq!(draft, ExerciseDraft::new());
    }

    #[test]
    fn failed_commit_leaves_draft_untouched() {
        let mut draft = ExerciseDraft::new();
        draft.set_reps(0, 5);
        let before = draft.clone();

        assert_eq!(draft.commit(), Err(ValidationError::EmptyName));
        assert_eq!(draft, before);
        assert_eq!(draft.state(), DraftState::Composing);

        draft.set_name("Curl");
        draft.set_reps(0, 0);
        assert_eq!(draft.commit(), Err(ValidationError::NoValidSets));
        assert_eq!(draft.name(), "Curl");
    }

    #[test]
    fn cancel_returns_to_empty() {
        let mut draft = ExerciseDraft::new();
        draft.set_name("Row");
        draft.add_set();
        draft.cancel();
        assert_eq!(draft, ExerciseDraft::new());
    }

    #[test]
    fn editing_seeds_from_existing_exercise() {
        let exercise = Exercise::new("Press", vec![Set::new(5, 95.0), Set::new(5, 100.0)]);
        let mut draft = ExerciseDraft::editing(&exercise);
        assert_eq!(draft.state(), DraftState::Composing);
        assert_eq!(draft.name(), "Press");
        assert_eq!(draft.sets().len(), 2);

        draft.set_weight(1, 105.0);
        let edited = draft.commit().unwrap();
        assert_eq!(edited.sets[1], Set::new(5, 105.0));
    }
}
