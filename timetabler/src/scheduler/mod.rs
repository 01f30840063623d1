/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Weekly timetable scheduler.
//!
//! [`TimetableScheduler`] turns a read-only [`ScheduleInput`] snapshot into a
//! conflict-free list of [`TimetableEntry`]s, one per placed period.  The run
//! is a fixed pipeline over one shared [`OccupancyTracker`]:
//!
//! ```text
//! ClassGrid::new ──► Phase 1: lab blocks ──► Phase 2: theory sessions ──► collect
//!   (normalise)        (every batch × lab)      (every batch × lecture)     (fail if empty)
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `schedule()`; the tracker is built and dropped inside each call |
//! | Ordering | Batches, subjects, rooms and assignments are walked in input order; first match wins |
//! | Randomness | None; identical input gives an identical timetable |
//! | Partial results | Returned with structured [`ScheduleWarning`]s; only an empty result is an error |
//! | Invariants | Enforced by the tracker, re-checked by [`audit`] after every run |
//!
//! # Example
//! ```rust,ignore
//! let scheduler = TimetableScheduler::new(SchedulerPolicy::default());
//! let timetable = scheduler.schedule(&snapshot.input)?;
//! for w in &timetable.warnings { eprintln!("{w}"); }
//! ```

pub mod audit;
pub mod error;
pub mod lab;
pub mod occupancy;
pub mod theory;

pub use error::{ScheduleWarning, SchedulerError, ShortfallReason};
pub use theory::DistributionPass;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::SchedulerPolicy;
use crate::grid::ClassGrid;
use crate::model::{Batch, Room, RoomKind, ScheduleInput, Subject, SubjectKind, TimetableEntry};

use occupancy::OccupancyTracker;

// ── Output ────────────────────────────────────────────────────────────────────

/// The result of a successful run: at least one entry, plus every non-fatal
/// warning raised on the way.
///
/// Entries are in production order: all lab entries (batch by batch) before
/// all theory entries.  The caller is expected to replace any previously
/// stored timetable with this one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    pub entries: Vec<TimetableEntry>,
    pub warnings: Vec<ScheduleWarning>,
}

impl Timetable {
    /// Periods placed for `subject_id` in `batch_id`.
    pub fn achieved_hours(&self, batch_id: &str, subject_id: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.batch_id == batch_id && e.subject_id == subject_id)
            .count() as u32
    }

    /// `true` when every subject got all of its hours for every batch.
    ///
    /// A lab placed in an ordinary room still counts: `LabRoomFallback` says
    /// where the hours went, not that any are missing.
    pub fn is_complete(&self) -> bool {
        self.warnings
            .iter()
            .all(|w| matches!(w, ScheduleWarning::LabRoomFallback { .. }))
    }
}

// ── Per-subject job ───────────────────────────────────────────────────────────

/// Everything a phase needs to place one subject for one batch.
#[derive(Debug)]
pub struct SubjectJob<'a> {
    pub batch: &'a Batch,
    pub subject: &'a Subject,
    /// The first teacher assigned to the subject.
    pub teacher_id: &'a str,
    /// Rooms to try, in preference order.
    pub rooms: Vec<&'a Room>,
}

// ── TimetableScheduler ────────────────────────────────────────────────────────

/// The timetable scheduler.
///
/// Holds only the [`SchedulerPolicy`]; all per-run state is allocated inside
/// [`schedule`](Self::schedule), so one scheduler can serve any number of
/// runs and is `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    policy: SchedulerPolicy,
}

impl TimetableScheduler {
    pub fn new(policy: SchedulerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulerPolicy {
        &self.policy
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Build a weekly timetable for every batch in `input`.
    ///
    /// # Errors
    /// Returns [`SchedulerError::NoEntriesPlaced`] when neither phase could
    /// place a single period.  Anything short of that is a success, with the
    /// shortfalls listed in [`Timetable::warnings`].
    pub fn schedule(&self, input: &ScheduleInput) -> Result<Timetable, SchedulerError> {
        let grid = ClassGrid::new(&input.timeslots);
        let mut tracker = OccupancyTracker::new();
        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        info!(
            batches = input.batches.len(),
            subjects = input.subjects.len(),
            rooms = input.rooms.len(),
            class_slots = grid.class_slots().len(),
            assignments = input.assignments.len(),
            "=== TimetableScheduler::schedule() ==="
        );

        if grid.is_empty() {
            warn!("No class timeslots in the grid, nothing can be placed");
        }

        // ── Phase 1: labs ─────────────────────────────────────────────────────
        self.run_lab_phase(input, &grid, &mut tracker, &mut entries, &mut warnings);
        let lab_entries = entries.len();

        // ── Phase 2: theory ───────────────────────────────────────────────────
        self.run_theory_phase(input, &grid, &mut tracker, &mut entries, &mut warnings);

        // ── Post-schedule: invariant audit ────────────────────────────────────
        for v in audit::audit(&entries, input, self.policy.max_daily_hours) {
            warn!(violation = %v, "timetable invariant violated");
        }

        // ── Collect ───────────────────────────────────────────────────────────
        if entries.is_empty() {
            return Err(SchedulerError::NoEntriesPlaced {
                batches: input.batches.len(),
                subjects: input.subjects.len(),
                rooms: input.rooms.len(),
                class_slots: grid.class_slots().len(),
                assignments: input.assignments.len(),
            });
        }

        info!(
            total = entries.len(),
            lab = lab_entries,
            theory = entries.len() - lab_entries,
            warnings = warnings.len(),
            "=== Scheduling complete ==="
        );

        Ok(Timetable { entries, warnings })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase 1: lab blocks
    // ─────────────────────────────────────────────────────────────────────────

    fn run_lab_phase(
        &self,
        input: &ScheduleInput,
        grid: &ClassGrid<'_>,
        tracker: &mut OccupancyTracker,
        entries: &mut Vec<TimetableEntry>,
        warnings: &mut Vec<ScheduleWarning>,
    ) {
        info!("Phase 1: lab blocks");

        let lab_rooms: Vec<&Room> = input
            .rooms
            .iter()
            .filter(|r| r.kind == RoomKind::Lab)
            .collect();
        let rooms = if lab_rooms.is_empty() {
            input.rooms.iter().collect()
        } else {
            lab_rooms
        };
        let fallback = !input.rooms.iter().any(|r| r.kind == RoomKind::Lab);
        let mut fallback_reported: HashSet<&str> = HashSet::new();

        for batch in &input.batches {
            for subject in input.subjects.iter().filter(|s| s.is_lab()) {
                let Some(job) = Self::resolve_job(input, batch, subject, &rooms, warnings) else {
                    continue;
                };

                if fallback && fallback_reported.insert(subject.id.as_str()) {
                    Self::push_warning(
                        warnings,
                        ScheduleWarning::LabRoomFallback {
                            subject: subject.id.clone(),
                        },
                    );
                }

                let outcome = lab::schedule_lab_subject(&job, grid, &self.policy, tracker, entries);
                if !outcome.is_complete() {
                    Self::push_warning(
                        warnings,
                        ScheduleWarning::Shortfall {
                            batch: batch.id.clone(),
                            subject: subject.id.clone(),
                            kind: SubjectKind::Lab,
                            requested_hours: subject.hours_per_week,
                            achieved_hours: outcome.hours_scheduled(),
                            reason: ShortfallReason::LabBlocksExhausted,
                        },
                    );
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase 2: theory sessions
    // ─────────────────────────────────────────────────────────────────────────

    fn run_theory_phase(
        &self,
        input: &ScheduleInput,
        grid: &ClassGrid<'_>,
        tracker: &mut OccupancyTracker,
        entries: &mut Vec<TimetableEntry>,
        warnings: &mut Vec<ScheduleWarning>,
    ) {
        info!("Phase 2: theory sessions");

        let rooms: Vec<&Room> = input.rooms.iter().collect();

        for batch in &input.batches {
            for subject in input.subjects.iter().filter(|s| !s.is_lab()) {
                let Some(job) = Self::resolve_job(input, batch, subject, &rooms, warnings) else {
                    continue;
                };

                let outcome =
                    theory::schedule_theory_subject(&job, grid, &self.policy, tracker, entries);
                if !outcome.is_complete() {
                    Self::push_warning(
                        warnings,
                        ScheduleWarning::Shortfall {
                            batch: batch.id.clone(),
                            subject: subject.id.clone(),
                            kind: SubjectKind::Lecture,
                            requested_hours: outcome.hours_needed,
                            achieved_hours: outcome.hours_scheduled,
                            reason: ShortfallReason::TheorySlotsExhausted,
                        },
                    );
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shared helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Pick the teacher and room list for one batch/subject pair, or record
    /// why the pair is skipped.
    fn resolve_job<'a>(
        input: &'a ScheduleInput,
        batch: &'a Batch,
        subject: &'a Subject,
        rooms: &[&'a Room],
        warnings: &mut Vec<ScheduleWarning>,
    ) -> Option<SubjectJob<'a>> {
        let Some(teacher_id) = input.first_teacher_for(&subject.id) else {
            Self::push_warning(
                warnings,
                ScheduleWarning::NoEligibleTeacher {
                    batch: batch.id.clone(),
                    subject: subject.id.clone(),
                },
            );
            return None;
        };

        if rooms.is_empty() {
            Self::push_warning(
                warnings,
                ScheduleWarning::NoRooms {
                    batch: batch.id.clone(),
                    subject: subject.id.clone(),
                },
            );
            return None;
        }

        Some(SubjectJob {
            batch,
            subject,
            teacher_id,
            rooms: rooms.to_vec(),
        })
    }

    fn push_warning(warnings: &mut Vec<ScheduleWarning>, w: ScheduleWarning) {
        warn!(subject = %w.subject(), "⚠ {}", w);
        warnings.push(w);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
