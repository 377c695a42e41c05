//! The interactive shell loop.
//!
//! Reads one command per line, applies it to the [`App`], and prints the
//! response. A failing command prints its error and the loop carries on.
//! Nothing is saved to disk unless `export` is run.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Args;

use of_store::LogStore;

use crate::app::{App, Flow};
use crate::commands::stats::load_store;
use crate::config::Config;

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Snapshot file to start from.
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Pin the clock used to stamp entries (YYYY-MM-DDTHH:MM).
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

const PROMPT: &str = "of> ";

const NOW_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    NOW_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got {s:?}"))
}

/// Runs commands from `input` until it ends or `quit` is read.
///
/// `clock` is asked for the current time once per line. `prompt` is
/// printed before each read when set.
pub fn session<R, W>(
    app: &mut App,
    input: R,
    out: &mut W,
    mut clock: impl FnMut() -> NaiveDateTime,
    prompt: Option<&str>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        match app.execute_line(&line, clock(), out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                tracing::debug!(%line, error = %err, "command failed");
                writeln!(out, "error: {err:#}")?;
            }
        }
    }

    Ok(())
}

// ========== Public Interface ==========

pub fn run(args: &ShellArgs, config: Config) -> Result<()> {
    let store = match &args.load {
        Some(path) => load_store(path)?,
        None => LogStore::new(),
    };
    tracing::debug!(entries = store.len(), "starting shell");

    let mut app = App::with_store(store, config);
    let pinned = args.now;
    let clock = move || pinned.unwrap_or_else(|| Local::now().naive_local());

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    if interactive {
        writeln!(stdout, "OmniaFortis. Type `help` for commands, `quit` to leave.")?;
    }

    session(
        &mut app,
        stdin.lock(),
        &mut stdout,
        clock,
        interactive.then_some(PROMPT),
    )?;

    if interactive && !app.draft().is_blank() {
        writeln!(stdout, "Unsaved draft discarded.")?;
    }
    Ok(())
}
