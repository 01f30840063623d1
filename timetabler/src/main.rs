/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use timetabler::config::{OddLabHours, Snapshot};
use timetabler::report::{GridView, HoursSummary, ViewFilter, ViewKind};
use timetabler::scheduler::{Timetable, TimetableScheduler};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Greedy weekly timetable scheduler.
///
/// Example:
///   timetabler --input snapshot.yaml --output entries.yaml \
///              --view batch --filter cs-a
#[derive(Debug, Parser)]
#[command(
    name = "timetabler",
    about = "Greedy weekly timetable scheduler",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML scheduling snapshot.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Write the generated entries and warnings to this YAML file.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Override the per-teacher, per-day workload cap.
    #[arg(long = "max-daily-hours", value_parser = clap::value_parser!(u32).range(1..))]
    max_daily_hours: Option<u32>,

    /// Override how odd lab hours are turned into two-period blocks.
    #[arg(long = "odd-lab-hours", value_enum)]
    odd_lab_hours: Option<OddLabHours>,

    /// Print the weekly grid for one batch, teacher or room.
    #[arg(long = "view", value_enum, requires = "filter")]
    view: Option<ViewKind>,

    /// Identifier of the batch, teacher or room given to --view.
    #[arg(long = "filter", requires = "view")]
    filter: Option<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        input           = %cli.input.display(),
        output          = ?cli.output,
        max_daily_hours = ?cli.max_daily_hours,
        odd_lab_hours   = ?cli.odd_lab_hours,
        view            = ?cli.view,
        "Configuration"
    );

    // ── Load snapshot ─────────────────────────────────────────────────────────
    let mut snapshot = match Snapshot::load_from_file(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load scheduling snapshot: {:#}", e);
            process::exit(1);
        }
    };

    if let Some(hours) = cli.max_daily_hours {
        snapshot.policy.max_daily_hours = hours;
    }
    if let Some(mode) = cli.odd_lab_hours {
        snapshot.policy.odd_lab_hours = mode;
    }

    let problems = snapshot.report_problems();
    if problems > 0 {
        warn!(problems, "Snapshot has validation problems, scheduling anyway");
    }

    // ── Schedule ──────────────────────────────────────────────────────────────
    let scheduler = TimetableScheduler::new(snapshot.policy.clone());
    info!(policy = ?scheduler.policy(), "Scheduler policy");
    let timetable = match scheduler.schedule(&snapshot.input) {
        Ok(t) => t,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    // ── Output ────────────────────────────────────────────────────────────────
    if let Some(path) = &cli.output {
        if let Err(e) = write_timetable(path, &timetable) {
            error!("{:#}", e);
            process::exit(1);
        }
    }

    let summary = HoursSummary::from_entries(&timetable.entries);
    print!("{}", summary.render(&snapshot.input));

    if let (Some(kind), Some(id)) = (cli.view, &cli.filter) {
        let filter = ViewFilter::new(kind, id.as_str());
        let view = GridView::build(&snapshot.input, &timetable.entries, &filter);
        if view.session_count() == 0 {
            warn!(view = ?kind, id = %id, "No sessions match the view filter");
        }
        println!();
        print!("{}", view);
    }

    if !timetable.is_complete() {
        warn!(
            warnings = timetable.warnings.len(),
            "Timetable generated with shortfalls"
        );
    }
}

fn write_timetable(path: &Path, timetable: &Timetable) -> Result<()> {
    let yaml = serde_yaml::to_string(timetable).context("Failed to serialise timetable")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Cannot write timetable to: {}", path.display()))?;
    info!(
        entries = timetable.entries.len(),
        "Timetable written to {}",
        path.display()
    );
    Ok(())
}
