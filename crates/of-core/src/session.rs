//! The training session being composed before it is saved as a workout.
//!
//! A [`WorkoutDraft`] owns the title (with its lock), notes, the committed
//! exercises so far, the exercise currently being typed, and at most one
//! open edit of an already-added exercise.

use chrono::NaiveDate;
use thiserror::Error;

use crate::draft::ExerciseDraft;
use crate::entry::{Exercise, LogEntry, Workout};
use crate::types::{LogId, LogTime, ValidationError};
use crate::validate::validate_training_title;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("title is locked; unlock it before editing")]
    TitleLocked,

    #[error("add at least one exercise before saving")]
    NoExercises,

    #[error("no exercise #{index} in this workout")]
    NoSuchExercise { index: usize },

    #[error("no exercise is being edited")]
    NoEditInProgress,

    #[error("exercise #{number} is still being edited; save-edit or cancel-edit first")]
    EditInProgress { number: usize },

    #[error("entry {id} is not a workout")]
    NotAWorkout { id: LogId },
}

/// An open edit of one of the draft's exercises.
#[derive(Debug, Clone, PartialEq)]
struct ExerciseEdit {
    index: usize,
    draft: ExerciseDraft,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkoutDraft {
    title: String,
    title_locked: bool,
    notes: String,
    exercises: Vec<Exercise>,
    current: ExerciseDraft,
    edit: Option<ExerciseEdit>,
    replaces: Option<LogId>,
}

impl WorkoutDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from a stored workout. Finishing it yields an entry
    /// with the same ID, meant to replace the original.
    pub fn editing(entry: &LogEntry) -> Result<Self, DraftError> {
        let workout = entry.as_workout().ok_or_else(|| DraftError::NotAWorkout {
            id: entry.id.clone(),
        })?;
        let title = workout.title.clone().unwrap_or_default();
        Ok(Self {
            title_locked: !title.trim().is_empty(),
            title,
            notes: workout.note.clone().unwrap_or_default(),
            exercises: workout.exercises.clone(),
            current: ExerciseDraft::new(),
            edit: None,
            replaces: Some(entry.id.clone()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn is_title_locked(&self) -> bool {
        self.title_locked
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// ID of the stored workout this draft will replace, if any.
    pub const fn replaces(&self) -> Option<&LogId> {
        self.replaces.as_ref()
    }

    /// True if nothing has been entered.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.notes.is_empty()
            && self.exercises.is_empty()
            && self.current == ExerciseDraft::new()
            && self.edit.is_none()
            && self.replaces.is_none()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DraftError> {
        if self.title_locked {
            return Err(DraftError::TitleLocked);
        }
        self.title = title.into();
        Ok(())
    }

    /// Confirms the title, making it read-only until unlocked.
    pub fn lock_title(&mut self) -> Result<(), DraftError> {
        self.title = validate_training_title(&self.title)?;
        self.title_locked = true;
        Ok(())
    }

    pub fn unlock_title(&mut self) {
        self.title_locked = false;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// The exercise being composed.
    pub const fn current(&self) -> &ExerciseDraft {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut ExerciseDraft {
        &mut self.current
    }

    /// The exercise input goes to: the open edit if there is one, otherwise
    /// the current exercise.
    pub fn active_mut(&mut self) -> &mut ExerciseDraft {
        match &mut self.edit {
            Some(edit) => &mut edit.draft,
            None => &mut self.current,
        }
    }

    /// Commits the current exercise into the workout.
    pub fn add_exercise(&mut self) -> Result<&Exercise, DraftError> {
        let exercise = self.current.commit()?;
        self.exercises.push(exercise);
        Ok(&self.exercises[self.exercises.len() - 1])
    }

    pub fn delete_exercise(&mut self, index: usize) -> Result<Exercise, DraftError> {
        if index >= self.exercises.len() {
            return Err(DraftError::NoSuchExercise { index });
        }
        // Indices after the removed one shift down; an open edit would
        // point at the wrong exercise.
        self.edit = None;
        Ok(self.exercises.remove(index))
    }

    /// Opens an edit of exercise `index`, replacing any edit already open.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), DraftError> {
        let exercise = self
            .exercises
            .get(index)
            .ok_or(DraftError::NoSuchExercise { index })?;
        self.edit = Some(ExerciseEdit {
            index,
            draft: ExerciseDraft::editing(exercise),
        });
        Ok(())
    }

    pub fn edit_draft(&self) -> Option<(usize, &ExerciseDraft)> {
        self.edit.as_ref().map(|edit| (edit.index, &edit.draft))
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut ExerciseDraft> {
        self.edit.as_mut().map(|edit| &mut edit.draft)
    }

    /// Validates the open edit and writes it back in place. On failure the
    /// edit stays open.
    pub fn save_edit(&mut self) -> Result<&Exercise, DraftError> {
        let edit = self.edit.as_mut().ok_or(DraftError::NoEditInProgress)?;
        let index = edit.index;
        let exercise = edit.draft.commit()?;
        self.edit = None;
        self.exercises[index] = exercise;
        Ok(&self.exercises[index])
    }

    pub fn cancel_edit(&mut self) -> Result<(), DraftError> {
        self.edit.take().map(|_| ()).ok_or(DraftError::NoEditInProgress)
    }

    /// Builds the workout entry and resets the draft.
    ///
    /// Requires a non-empty title, at least one exercise and no open
    /// exercise edit. On failure the draft is unchanged.
    pub fn finish(&mut self, date: NaiveDate, time: LogTime) -> Result<LogEntry, DraftError> {
        if let Some(edit) = &self.edit {
            return Err(DraftError::EditInProgress {
                number: edit.index + 1,
            });
        }
        let title = validate_training_title(&self.title)?;
        if self.exercises.is_empty() {
            return Err(DraftError::NoExercises);
        }

        let notes = self.notes.trim();
        let workout = Workout {
            title: Some(title),
            exercises: self.exercises.clone(),
            note: (!notes.is_empty()).then(|| notes.to_string()),
        };
        let mut entry = LogEntry::workout(date, time, workout);
        if let Some(id) = self.replaces.take() {
            entry.id = id;
        }

        *self = Self::new();
        Ok(entry)
    }

    /// Drops everything, including an edit-in-progress of a stored workout.
    pub fn discard(&mut self) {
        *self = Self::new();
    }
}
