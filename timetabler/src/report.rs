/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Read-only views over a finished timetable.
//!
//! * [`HoursSummary`]: achieved periods per `(batch, subject)`, set against
//!   the requested `hours_per_week`.
//! * [`GridView`]: the weekly grid for one batch, teacher or room, with time
//!   ranges as rows and days as columns.
//!
//! Both are pure functions of `(input, entries)` and render as plain text via
//! `Display`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{ClassGrid, Weekday};
use crate::model::{BatchId, ScheduleInput, SubjectId, TimetableEntry};

// ── HoursSummary ──────────────────────────────────────────────────────────────

/// Periods placed per `(batch, subject)`, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HoursSummary {
    hours: BTreeMap<(BatchId, SubjectId), u32>,
}

impl HoursSummary {
    pub fn from_entries(entries: &[TimetableEntry]) -> Self {
        let mut hours = BTreeMap::new();
        for e in entries {
            *hours
                .entry((e.batch_id.clone(), e.subject_id.clone()))
                .or_insert(0) += 1;
        }
        Self { hours }
    }

    /// Periods placed for `subject_id` in `batch_id`; `0` if none.
    pub fn hours(&self, batch_id: &str, subject_id: &str) -> u32 {
        self.hours
            .get(&(batch_id.to_string(), subject_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.hours
            .iter()
            .map(|((b, s), h)| (b.as_str(), s.as_str(), *h))
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// One line per batch and subject in `input`, including subjects that got
    /// nothing, as `batch  subject  achieved/requested`.
    pub fn render(&self, input: &ScheduleInput) -> String {
        let mut out = String::new();
        for batch in &input.batches {
            for subject in &input.subjects {
                let achieved = self.hours(&batch.id, &subject.id);
                let mark = if achieved >= subject.hours_per_week { ' ' } else { '!' };
                out.push_str(&format!(
                    "{mark} {:<12} {:<24} {:>2}/{:<2} {:?}\n",
                    batch.name, subject.name, achieved, subject.hours_per_week, subject.kind
                ));
            }
        }
        out
    }
}

// ── View filter ───────────────────────────────────────────────────────────────

/// Which entity a [`GridView`] is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Batch,
    Teacher,
    Room,
}

/// Selects the entries belonging to one batch, teacher or room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFilter {
    Batch(String),
    Teacher(String),
    Room(String),
}

impl ViewFilter {
    pub fn new(kind: ViewKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            ViewKind::Batch => ViewFilter::Batch(id),
            ViewKind::Teacher => ViewFilter::Teacher(id),
            ViewKind::Room => ViewFilter::Room(id),
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            ViewFilter::Batch(_) => ViewKind::Batch,
            ViewFilter::Teacher(_) => ViewKind::Teacher,
            ViewFilter::Room(_) => ViewKind::Room,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ViewFilter::Batch(id) | ViewFilter::Teacher(id) | ViewFilter::Room(id) => id,
        }
    }

    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        match self {
            ViewFilter::Batch(id) => entry.batch_id == *id,
            ViewFilter::Teacher(id) => entry.teacher_id == *id,
            ViewFilter::Room(id) => entry.room_id == *id,
        }
    }
}

// ── GridView ──────────────────────────────────────────────────────────────────

/// One cell of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The day has no slot with this time range.
    Missing,
    Free,
    Break,
    /// A placed session, labelled with the fields the filter does not fix.
    Session(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => f.write_str(""),
            Cell::Free => f.write_str("-"),
            Cell::Break => f.write_str("BREAK"),
            Cell::Session(label) => f.write_str(label),
        }
    }
}

/// The weekly grid for one [`ViewFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub title: String,
    /// Column headers, in week order.
    pub days: Vec<Weekday>,
    /// `(time range, one cell per day)`, in start-time order.
    pub rows: Vec<(String, Vec<Cell>)>,
}

impl GridView {
    pub fn build(input: &ScheduleInput, entries: &[TimetableEntry], filter: &ViewFilter) -> Self {
        let grid = ClassGrid::new(&input.timeslots);
        let days: Vec<Weekday> = grid.days().into_iter().cloned().collect();

        let teachers: HashMap<&str, &str> = input
            .teachers
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect();
        let rooms: HashMap<&str, &str> = input
            .rooms
            .iter()
            .map(|r| (r.id.as_str(), r.number.as_str()))
            .collect();
        let batches: HashMap<&str, &str> = input
            .batches
            .iter()
            .map(|b| (b.id.as_str(), b.name.as_str()))
            .collect();

        let mut by_slot: HashMap<&str, &TimetableEntry> = HashMap::new();
        for e in entries.iter().filter(|e| filter.matches(e)) {
            by_slot.entry(e.timeslot_id.as_str()).or_insert(e);
        }

        let ranges: BTreeMap<(&str, &str), String> = grid
            .ordered()
            .iter()
            .map(|t| ((t.start_time.as_str(), t.end_time.as_str()), t.time_range()))
            .collect();

        let rows: Vec<(String, Vec<Cell>)> = ranges
            .into_iter()
            .map(|((start, end), time)| {
                let cells: Vec<Cell> = days
                    .iter()
                    .map(|day| {
                        let slot = grid.ordered().iter().find(|t| {
                            t.day == *day && t.start_time == start && t.end_time == end
                        });
                        let Some(slot) = slot else {
                            return Cell::Missing;
                        };
                        if slot.is_break {
                            return Cell::Break;
                        }
                        let Some(e) = by_slot.get(slot.id.as_str()) else {
                            return Cell::Free;
                        };
                        let subject = input.subject(&e.subject_id).map_or(
                            e.subject_id.as_str(),
                            |s| {
                                if s.code.is_empty() {
                                    s.name.as_str()
                                } else {
                                    s.code.as_str()
                                }
                            },
                        );
                        let teacher = name_of(&teachers, &e.teacher_id);
                        let room = name_of(&rooms, &e.room_id);
                        let batch = name_of(&batches, &e.batch_id);
                        let label = match filter.kind() {
                            ViewKind::Batch => format!("{subject} {teacher} {room}"),
                            ViewKind::Teacher => format!("{subject} {batch} {room}"),
                            ViewKind::Room => format!("{subject} {batch} {teacher}"),
                        };
                        Cell::Session(label)
                    })
                    .collect();
                (time, cells)
            })
            .collect();

        let title = match filter {
            ViewFilter::Batch(id) => format!("Batch {}", name_of(&batches, id)),
            ViewFilter::Teacher(id) => format!("Teacher {}", name_of(&teachers, id)),
            ViewFilter::Room(id) => format!("Room {}", name_of(&rooms, id)),
        };

        Self { title, days, rows }
    }

    /// Number of session cells in the view.
    pub fn session_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|(_, cells)| cells)
            .filter(|c| matches!(c, Cell::Session(_)))
            .count()
    }
}

/// Display name for `id`, or the id itself when `names` does not know it.
fn name_of(names: &HashMap<&str, &str>, id: &str) -> String {
    names.get(id).map_or_else(|| id.to_string(), |n| n.to_string())
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time_width = self.rows.iter().map(|(t, _)| t.len()).max().unwrap_or(0).max(4);
        let mut widths: Vec<usize> = self.days.iter().map(|d| d.name().len()).collect();
        for (_, cells) in &self.rows {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.to_string().chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        write!(f, "{:<time_width$}", "Time")?;
        for (day, &w) in self.days.iter().zip(&widths) {
            write!(f, " | {:<w$}", day.name())?;
        }
        writeln!(f)?;

        for (time, cells) in &self.rows {
            write!(f, "{:<time_width$}", time)?;
            for (cell, &w) in cells.iter().zip(&widths) {
                write!(f, " | {:<w$}", cell.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
