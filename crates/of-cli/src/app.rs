//! The interactive session: one store, one workout draft, and the shell
//! commands that act on them.
//!
//! Every command either succeeds completely or leaves the store as it was.
//! A failed `save` keeps the draft so the input can be fixed.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use of_core::views::newest_first;
use of_core::{
    Activity, LogEntry, LogTime, Mindset, Nutrition, SetField, Sleep, WorkoutDraft, YearMonth,
    home_stats, month_grid,
};
use of_store::{LogStore, codec};

use crate::commands::calendar::{format_day, format_month};
use crate::commands::stats::format_home;
use crate::config::Config;
use crate::render::{draft_view, entry_line, format_exercise_compact, plural};

/// Whether the shell loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Parser)]
#[command(
    name = "of",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]...",
    help_template = "{usage-heading} {usage}\n\n{all-args}"
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Commands accepted by the shell.
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    // ----- Workout draft -----
    /// Set the workout title.
    Title {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Lock the title so it survives until the workout is saved.
    Lock,
    /// Unlock the title.
    Unlock,
    /// Set the workout notes.
    Note {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Show the workout being composed.
    Draft,
    /// Save the workout to the log.
    Save,
    /// Throw away the whole draft.
    Discard,

    // ----- Exercise draft -----
    /// Set the exercise name.
    Name {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Add a blank set row.
    AddSet,
    /// Remove a set row (the last one if no number is given).
    RemoveSet { set: Option<usize> },
    /// Set the reps of a set.
    Reps { set: usize, value: String },
    /// Set the weight of a set.
    Weight { set: usize, value: String },
    /// Set the RPE of a set; leave the value out to clear it.
    Rpe { set: usize, value: Option<String> },
    /// Add the exercise to the workout.
    Add,
    /// Clear the exercise being composed.
    Cancel,
    /// Edit an exercise already added to the workout.
    Edit { number: usize },
    /// Write the edited exercise back.
    SaveEdit,
    /// Abandon the exercise edit.
    CancelEdit,
    /// Remove an exercise from the workout.
    DeleteExercise { number: usize },

    // ----- Log -----
    /// Show totals and today's workouts.
    Stats,
    /// Show a month calendar (YYYY-MM, defaults to this month).
    Calendar { month: Option<YearMonth> },
    /// Show the workouts of a day (YYYY-MM-DD, defaults to today).
    Day { date: Option<NaiveDate> },
    /// List every entry, newest first.
    List,
    /// Delete an entry by ID or unique ID prefix.
    Delete { id: String },
    /// Delete the workout logged at a date and time.
    DeleteAt { date: NaiveDate, time: LogTime },
    /// Load a stored workout into the draft for editing.
    EditWorkout { id: String },
    /// Log a mood.
    LogMindset {
        mood: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        notes: Vec<String>,
    },
    /// Log a night of sleep.
    LogSleep {
        hours: f64,
        quality: f64,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        notes: Vec<String>,
    },
    /// Log meals, separated by commas.
    LogNutrition {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        meals: Vec<String>,
    },
    /// Write the log to a snapshot file.
    Export { path: Option<PathBuf> },
    /// Add every entry of a snapshot file to the log.
    Import { path: Option<PathBuf> },
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

/// Converts a 1-based number typed by the user to an index.
fn index(number: usize, what: &str) -> Result<usize> {
    match number.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("{what} numbers start at 1"),
    }
}

fn split_meals(words: &[String]) -> Vec<String> {
    words
        .join(" ")
        .split(',')
        .map(str::trim)
        .filter(|meal| !meal.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Application state for one shell session.
#[derive(Debug)]
pub struct App {
    store: LogStore,
    draft: WorkoutDraft,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_store(LogStore::new(), config)
    }

    pub fn with_store(store: LogStore, config: Config) -> Self {
        Self {
            store,
            draft: WorkoutDraft::new(),
            config,
        }
    }

    pub const fn store(&self) -> &LogStore {
        &self.store
    }

    pub const fn draft(&self) -> &WorkoutDraft {
        &self.draft
    }

    /// Parses and runs one input line. Parse errors and `help` output are
    /// written to `out` rather than returned.
    pub fn execute_line(
        &mut self,
        line: &str,
        now: NaiveDateTime,
        out: &mut impl Write,
    ) -> Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command, now, out),
            Err(err) => {
                write!(out, "{}", err.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    #[expect(
        clippy::too_many_lines,
        reason = "shell command dispatch is inherently verbose"
    )]
    pub fn execute(
        &mut self,
        command: ShellCommand,
        now: NaiveDateTime,
        out: &mut impl Write,
    ) -> Result<Flow> {
        let today = now.date();
        let unit = self.config.weight_unit;

        match command {
            ShellCommand::Title { words } => {
                self.draft.set_title(words.join(" "))?;
                writeln!(out, "Title: {}", self.draft.title())?;
            }
            ShellCommand::Lock => {
                self.draft.lock_title()?;
                writeln!(out, "Title locked: {}", self.draft.title())?;
            }
            ShellCommand::Unlock => {
                self.draft.unlock_title();
                writeln!(out, "Title unlocked")?;
            }
            ShellCommand::Note { words } => {
                self.draft.set_notes(words.join(" "));
                writeln!(out, "Notes updated")?;
            }
            ShellCommand::Draft => {
                write!(out, "{}", draft_view(&self.draft, unit))?;
            }
            ShellCommand::Save => self.save(now, out)?,
            ShellCommand::Discard => {
                self.draft.discard();
                writeln!(out, "Draft discarded")?;
            }

            ShellCommand::Name { words } => {
                self.draft.active_mut().set_name(words.join(" "));
            }
            ShellCommand::AddSet => {
                let draft = self.draft.active_mut();
                draft.add_set();
                writeln!(out, "Set {} added", draft.sets().len())?;
            }
            ShellCommand::RemoveSet { set } => {
                let draft = self.draft.active_mut();
                let removed = match set {
                    Some(number) => draft.remove_set(index(number, "set")?),
                    None => draft.remove_last_set(),
                };
                if !removed {
                    bail!("no set to remove; an exercise keeps at least one set row");
                }
                writeln!(out, "{} left", plural(draft.sets().len(), "set"))?;
            }
            ShellCommand::Reps { set, value } => {
                self.update_set(set, SetField::Reps, &value)?;
            }
            ShellCommand::Weight { set, value } => {
                self.update_set(set, SetField::Weight, &value)?;
            }
            ShellCommand::Rpe { set, value } => {
                self.update_set(set, SetField::Rpe, value.as_deref().unwrap_or(""))?;
            }
            ShellCommand::Add => {
                let exercise = self.draft.add_exercise()?;
                writeln!(out, "Added {}", format_exercise_compact(exercise))?;
            }
            ShellCommand::Cancel => {
                self.draft.current_mut().cancel();
                writeln!(out, "Exercise cleared")?;
            }
            ShellCommand::Edit { number } => {
                self.draft.begin_edit(index(number, "exercise")?)?;
                writeln!(out, "Editing exercise {number}")?;
            }
            ShellCommand::SaveEdit => {
                let exercise = self.draft.save_edit()?;
                writeln!(out, "Updated {}", format_exercise_compact(exercise))?;
            }
            ShellCommand::CancelEdit => {
                self.draft.cancel_edit()?;
                writeln!(out, "Edit cancelled")?;
            }
            ShellCommand::DeleteExercise { number } => {
                let exercise = self.draft.delete_exercise(index(number, "exercise")?)?;
                writeln!(out, "Removed {}", exercise.name)?;
            }

            ShellCommand::Stats => {
                let stats = home_stats(self.store.entries(), today);
                write!(out, "{}", format_home(&stats, unit))?;
            }
            ShellCommand::Calendar { month } => {
                let month = month.unwrap_or_else(|| YearMonth::of(today));
                write!(out, "{}", format_month(&month_grid(self.store.entries(), month)))?;
            }
            ShellCommand::Day { date } => {
                let date = date.unwrap_or(today);
                write!(out, "{}", format_day(self.store.entries(), date, today, unit))?;
            }
            ShellCommand::List => {
                if self.store.is_empty() {
                    writeln!(out, "No entries logged.")?;
                }
                for entry in newest_first(self.store.entries()) {
                    writeln!(out, "{}", entry_line(entry, unit))?;
                }
            }
            ShellCommand::Delete { id } => {
                let id = self.store.find(&id)?.id.clone();
                self.ensure_not_editing(|entry| entry.id == id)?;
                self.store.remove_by_id(&id);
                tracing::info!(%id, "deleted entry");
                writeln!(out, "Deleted [{}]", id.short())?;
            }
            ShellCommand::DeleteAt { date, time } => {
                self.ensure_not_editing(|entry| {
                    entry.is_workout() && entry.date == date && entry.time == time
                })?;
                let removed = self.store.remove_workout_at(date, time);
                if removed == 0 {
                    bail!("no workout logged at {date} {time}");
                }
                tracing::info!(%date, %time, removed, "deleted workouts");
                writeln!(out, "Deleted {}", plural(removed, "workout"))?;
            }
            ShellCommand::EditWorkout { id } => {
                if !self.draft.is_blank() {
                    bail!("save or discard the current draft first");
                }
                let entry = self.store.find(&id)?;
                let draft = WorkoutDraft::editing(entry)?;
                writeln!(out, "Editing workout [{}]", entry.id.short())?;
                self.draft = draft;
            }
            ShellCommand::LogMindset { mood, notes } => {
                let activity = Activity::Mindset(Mindset {
                    mood,
                    notes: notes.join(" "),
                });
                self.log(activity, now, out)?;
            }
            ShellCommand::LogSleep {
                hours,
                quality,
                notes,
            } => {
                let activity = Activity::Sleep(Sleep {
                    duration: hours,
                    quality,
                    notes: notes.join(" "),
                });
                self.log(activity, now, out)?;
            }
            ShellCommand::LogNutrition { meals } => {
                let meals = split_meals(&meals);
                if meals.is_empty() {
                    bail!("list at least one meal");
                }
                let activity = Activity::Nutrition(Nutrition {
                    meals,
                    notes: String::new(),
                });
                self.log(activity, now, out)?;
            }
            ShellCommand::Export { path } => {
                let path = path.unwrap_or_else(|| self.config.export_path.clone());
                self.export(&path, out)?;
            }
            ShellCommand::Import { path } => {
                let path = path.unwrap_or_else(|| self.config.export_path.clone());
                self.import(&path, out)?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Refuses to delete the stored workout the draft is editing; saving
    /// the draft would have nothing left to replace.
    fn ensure_not_editing(&self, doomed: impl Fn(&LogEntry) -> bool) -> Result<()> {
        let editing = self.draft.replaces().and_then(|id| self.store.get(id));
        if let Some(entry) = editing.filter(|&entry| doomed(entry)) {
            bail!(
                "workout [{}] is open for editing; save or discard the draft first",
                entry.id.short()
            );
        }
        Ok(())
    }

    fn update_set(&mut self, number: usize, field: SetField, raw: &str) -> Result<()> {
        let idx = index(number, "set")?;
        if !self.draft.active_mut().set_field(idx, field, raw) {
            bail!("no set #{number}");
        }
        Ok(())
    }

    /// Commits the draft to the store.
    ///
    /// New workouts are stamped with `now`. An edited workout keeps the
    /// date and time it was originally logged at.
    fn save(&mut self, now: NaiveDateTime, out: &mut impl Write) -> Result<()> {
        let original = self
            .draft
            .replaces()
            .and_then(|id| self.store.get(id))
            .map(|entry| (entry.date, entry.time));
        let (date, time) = original.unwrap_or((now.date(), LogTime::from_naive(now.time())));

        // Finish a copy so the draft survives a rejected save.
        let mut draft = self.draft.clone();
        let entry = draft.finish(date, time)?;
        let id = entry.id.clone();

        if self.draft.replaces().is_some() {
            self.store.replace(&id, entry)?;
            tracing::info!(%id, "updated workout");
            writeln!(out, "Updated workout [{}]", id.short())?;
        } else {
            self.store.append(entry)?;
            tracing::info!(%id, "saved workout");
            writeln!(out, "Saved workout [{}]", id.short())?;
        }

        self.draft = draft;
        Ok(())
    }

    fn log(&mut self, activity: Activity, now: NaiveDateTime, out: &mut impl Write) -> Result<()> {
        let entry = LogEntry::new(now.date(), LogTime::from_naive(now.time()), activity);
        let kind = entry.kind();
        let id = self.store.append(entry)?;
        tracing::info!(%id, %kind, "logged entry");
        writeln!(out, "Logged {kind} [{}]", id.short())?;
        Ok(())
    }

    fn export(&self, path: &Path, out: &mut impl Write) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        codec::write_file(path, self.store.entries())?;
        tracing::info!(path = %path.display(), count = self.store.len(), "exported snapshot");
        writeln!(
            out,
            "Exported {} to {}",
            plural(self.store.len(), "entry"),
            path.display()
        )?;
        Ok(())
    }

    /// Adds a snapshot's entries. Either every entry is added or none is.
    fn import(&mut self, path: &Path, out: &mut impl Write) -> Result<()> {
        let entries = codec::read_file(path)?;
        let count = entries.len();

        let mut store = self.store.clone();
        for (position, entry) in entries.into_iter().enumerate() {
            store
                .append(entry)
                .with_context(|| format!("entry {position} of {} rejected", path.display()))?;
        }
        self.store = store;

        tracing::info!(path = %path.display(), count, "imported snapshot");
        writeln!(out, "Imported {} from {}", plural(count, "entry"), path.display())?;
        Ok(())
    }
}
