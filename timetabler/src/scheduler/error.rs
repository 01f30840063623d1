/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Failure and warning types for the timetable scheduler.
//!
//! Two layers, matching the two failure classes of a run:
//!
//! * [`ScheduleWarning`]: a degraded but non-fatal outcome for one
//!   batch/subject pair (partial placement, missing teacher, room fallback).
//!   Collected into the returned [`Timetable`](super::Timetable); never aborts
//!   the run.
//! * [`SchedulerError`]: the run produced nothing usable at all.
//!
//! Every variant carries the identifiers needed to emit a fully-qualified
//! `tracing` event and to show the operator which record to fix.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::{BatchId, SubjectId, SubjectKind};

// ── Warnings ──────────────────────────────────────────────────────────────────

/// Why a subject ended up with fewer hours than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShortfallReason {
    /// The class-slot scan ended before every two-period block was placed.
    LabBlocksExhausted,

    /// All three distribution passes ended before every hour was placed.
    TheorySlotsExhausted,
}

impl fmt::Display for ShortfallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortfallReason::LabBlocksExhausted => {
                write!(f, "no further contiguous block was free")
            }
            ShortfallReason::TheorySlotsExhausted => {
                write!(f, "no further slot was free after all distribution passes")
            }
        }
    }
}

/// A non-fatal condition raised while scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScheduleWarning {
    /// No teacher-subject assignment names this subject; it was skipped.
    NoEligibleTeacher { batch: BatchId, subject: SubjectId },

    /// The room list is empty, so nothing could be placed for this subject.
    NoRooms { batch: BatchId, subject: SubjectId },

    /// The lab subject found no lab-kind room and was placed in any room.
    ///
    /// Raised once per subject, not once per batch.
    LabRoomFallback { subject: SubjectId },

    /// Fewer hours were placed than the subject asks for.
    Shortfall {
        batch: BatchId,
        subject: SubjectId,
        kind: SubjectKind,
        requested_hours: u32,
        achieved_hours: u32,
        reason: ShortfallReason,
    },
}

impl ScheduleWarning {
    /// The subject this warning concerns.
    pub fn subject(&self) -> &str {
        match self {
            ScheduleWarning::NoEligibleTeacher { subject, .. }
            | ScheduleWarning::NoRooms { subject, .. }
            | ScheduleWarning::LabRoomFallback { subject }
            | ScheduleWarning::Shortfall { subject, .. } => subject,
        }
    }
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::NoEligibleTeacher { batch, subject } => write!(
                f,
                "subject '{}' has no assigned teacher, skipped for batch '{}'",
                subject, batch
            ),

            ScheduleWarning::NoRooms { batch, subject } => write!(
                f,
                "no rooms available for subject '{}' in batch '{}'",
                subject, batch
            ),

            ScheduleWarning::LabRoomFallback { subject } => write!(
                f,
                "no lab rooms found for lab subject '{}', using any available room",
                subject
            ),

            ScheduleWarning::Shortfall {
                batch,
                subject,
                kind,
                requested_hours,
                achieved_hours,
                reason,
            } => write!(
                f,
                "could only schedule {}/{} hours of {:?} subject '{}' in batch '{}': {}",
                achieved_hours, requested_hours, kind, subject, batch, reason
            ),
        }
    }
}

// ── Fatal errors ──────────────────────────────────────────────────────────────

/// Top-level error returned by
/// [`TimetableScheduler::schedule()`](super::TimetableScheduler::schedule).
///
/// A run that places *some* entries is a success, however many warnings it
/// carries.  Only a run that places none at all is an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// Both phases finished without placing a single entry.
    ///
    /// Usually a configuration problem: no teacher-subject assignments, no
    /// rooms, no batches or no class timeslots.  The counts let the operator
    /// see at a glance which collection was empty.
    #[error(
        "could not generate any timetable entries \
         ({batches} batch(es), {subjects} subject(s), {rooms} room(s), \
         {class_slots} class slot(s), {assignments} assignment(s)); \
         check the input data and teacher-subject assignments"
    )]
    NoEntriesPlaced {
        batches: usize,
        subjects: usize,
        rooms: usize,
        class_slots: usize,
        assignments: usize,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_message_names_hours_and_reason() {
        let w = ScheduleWarning::Shortfall {
            batch: "b1".into(),
            subject: "phy-lab".into(),
            kind: SubjectKind::Lab,
            requested_hours: 4,
            achieved_hours: 2,
            reason: ShortfallReason::LabBlocksExhausted,
        };
        let msg = w.to_string();
        assert!(msg.contains("2/4 hours"), "{msg}");
        assert!(msg.contains("Lab subject 'phy-lab'"), "{msg}");
        assert!(msg.contains("contiguous block"), "{msg}");
        assert_eq!(w.subject(), "phy-lab");
    }

    #[test]
    fn no_entries_error_reports_input_sizes() {
        let err = SchedulerError::NoEntriesPlaced {
            batches: 2,
            subjects: 3,
            rooms: 0,
            class_slots: 10,
            assignments: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("0 room(s)"), "{msg}");
        assert!(msg.contains("10 class slot(s)"), "{msg}");
    }
}
