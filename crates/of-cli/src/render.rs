//! Text rendering shared by the shell and the report commands.

use std::fmt::Write;

use of_core::{Activity, Exercise, ExerciseDraft, LogEntry, LogTime, Set, Workout, WorkoutDraft};

use crate::config::WeightUnit;

// ========== Numbers ==========

/// Formats a number with thousands separators and at most two decimals:
/// `1350.0` becomes "1,350", `102.5` becomes "102.5".
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * 100.0).round() as u64;

    let digits = format!("{whole:.0}");
    let mut output = String::new();
    if negative {
        output.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }
    if cents > 0 {
        let fraction = format!("{cents:02}");
        output.push('.');
        output.push_str(fraction.trim_end_matches('0'));
    }
    output
}

pub fn format_volume(volume: f64, unit: WeightUnit) -> String {
    format!("{} {unit}", format_number(volume))
}

/// 12-hour clock, e.g. "8:00 AM".
pub fn format_clock(time: LogTime) -> String {
    time.as_naive().format("%-I:%M %p").to_string()
}

/// "1 set", "2 sets", "3 entries".
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else if let Some(stem) = word.strip_suffix('y') {
        format!("{count} {stem}ies")
    } else {
        format!("{count} {word}s")
    }
}

// ========== Sets and exercises ==========

/// "5 reps × 135 lbs", with " @ RPE 8" when recorded.
pub fn format_set(set: &Set, unit: WeightUnit) -> String {
    let mut output = format!(
        "{} reps × {} {unit}",
        set.reps,
        format_number(set.weight)
    );
    if let Some(rpe) = set.rpe {
        write!(output, " @ RPE {}", format_number(rpe)).unwrap();
    }
    output
}

/// "Bench Press: 5x135, 5x135".
pub fn format_exercise_compact(exercise: &Exercise) -> String {
    let sets: Vec<String> = exercise
        .sets
        .iter()
        .map(|set| format!("{}x{}", set.reps, format_number(set.weight)))
        .collect();
    format!("{}: {}", exercise.name, sets.join(", "))
}

fn write_sets(output: &mut String, sets: &[Set], unit: WeightUnit, indent: &str) {
    for (idx, set) in sets.iter().enumerate() {
        writeln!(output, "{indent}Set {}: {}", idx + 1, format_set(set, unit)).unwrap();
    }
}

// ========== Entries ==========

fn workout_title(workout: &Workout) -> &str {
    workout.title.as_deref().unwrap_or("(untitled)")
}

/// Full workout card, as shown for a selected calendar day.
pub fn workout_card(entry: &LogEntry, workout: &Workout, unit: WeightUnit) -> String {
    let mut output = String::new();
    writeln!(output, "{}  [{}]", workout_title(workout), entry.id.short()).unwrap();
    writeln!(
        output,
        "  {} • Total volume: {}",
        format_clock(entry.time),
        format_volume(workout.volume(), unit)
    )
    .unwrap();
    for exercise in &workout.exercises {
        writeln!(output, "  {}", exercise.name).unwrap();
        write_sets(&mut output, &exercise.sets, unit, "    ");
    }
    if let Some(note) = &workout.note {
        writeln!(output, "  Note: {note}").unwrap();
    }
    output
}

/// Short summary of a workout for the home view.
pub fn workout_summary(entry: &LogEntry, workout: &Workout) -> String {
    let mut output = String::new();
    writeln!(output, "{}  [{}]", workout_title(workout), entry.id.short()).unwrap();
    writeln!(
        output,
        "  {} • {} • {}",
        entry.date.format("%b %-d, %Y"),
        format_clock(entry.time),
        plural(workout.exercises.len(), "exercise")
    )
    .unwrap();
    for exercise in &workout.exercises {
        writeln!(output, "  {}", format_exercise_compact(exercise)).unwrap();
    }
    output
}

/// One line per entry, for listings.
pub fn entry_line(entry: &LogEntry, unit: WeightUnit) -> String {
    let summary = match &entry.activity {
        Activity::Workout(workout) => format!(
            "{} ({}, {})",
            workout_title(workout),
            plural(workout.exercises.len(), "exercise"),
            format_volume(workout.volume(), unit)
        ),
        Activity::Mindset(mindset) => mindset.mood.clone(),
        Activity::Sleep(sleep) => format!(
            "{}h, quality {}",
            format_number(sleep.duration),
            format_number(sleep.quality)
        ),
        Activity::Nutrition(nutrition) => nutrition.meals.join(", "),
    };
    format!(
        "{:<6}  {} {}  {:<9}  {summary}",
        entry.id.short(),
        entry.date,
        entry.time,
        entry.kind().as_str()
    )
}

// ========== Drafts ==========

fn write_exercise_draft(output: &mut String, draft: &ExerciseDraft, unit: WeightUnit) {
    for (idx, set) in draft.sets().iter().enumerate() {
        writeln!(output, "    Set {}: {}", idx + 1, format_set(set, unit)).unwrap();
    }
}

/// The workout being composed.
pub fn draft_view(draft: &WorkoutDraft, unit: WeightUnit) -> String {
    let mut output = String::new();

    let title = if draft.title().is_empty() {
        "(none)"
    } else {
        draft.title()
    };
    let lock = if draft.is_title_locked() { " (locked)" } else { "" };
    writeln!(output, "Title: {title}{lock}").unwrap();
    if let Some(id) = draft.replaces() {
        writeln!(output, "Editing workout [{}]", id.short()).unwrap();
    }
    if !draft.notes().is_empty() {
        writeln!(output, "Notes: {}", draft.notes()).unwrap();
    }

    if draft.exercises().is_empty() {
        writeln!(output, "Exercises: none yet").unwrap();
    } else {
        writeln!(output, "Exercises:").unwrap();
        for (idx, exercise) in draft.exercises().iter().enumerate() {
            writeln!(output, "  {}. {}", idx + 1, format_exercise_compact(exercise)).unwrap();
        }
    }

    let current = draft.current();
    let name = if current.name().is_empty() {
        "(unnamed)"
    } else {
        current.name()
    };
    writeln!(output, "Current exercise: {name}").unwrap();
    write_exercise_draft(&mut output, current, unit);

    if let Some((index, edit)) = draft.edit_draft() {
        writeln!(output, "Editing exercise {}: {}", index + 1, edit.name()).unwrap();
        write_exercise_draft(&mut output, edit, unit);
    }

    output
}
