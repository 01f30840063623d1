/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for the timetable generator.
//!
//! Two sides of the scheduling pipeline:
//!
//! ```text
//! data-entry layer ──(snapshot)──►  ScheduleInput  ──(scheduler)──►  Vec<TimetableEntry>  ──►  persistence
//!                                    ↑ read-only                       ↑ produced fresh each run
//! ```
//!
//! # Ownership model
//! `ScheduleInput` is **borrowed** by the scheduler for the duration of one
//! run and never mutated.  All per-run bookkeeping lives in the occupancy
//! tracker, which is created and dropped inside
//! [`TimetableScheduler::schedule`](crate::scheduler::TimetableScheduler::schedule).

use serde::{Deserialize, Serialize};

use crate::grid::Weekday;

// ── Identifiers ───────────────────────────────────────────────────────────────

pub type TeacherId = String;
pub type SubjectId = String;
pub type RoomId = String;
pub type BatchId = String;
pub type TimeslotId = String;

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// How a subject is taught.
///
/// `Lab` subjects are placed in contiguous two-period blocks; everything else
/// is placed one period at a time.  Any `type` other than `Lab` (`Theory`,
/// `Tutorial`, ...) reads as `Lecture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubjectKind {
    #[serde(alias = "lab")]
    Lab,
    #[default]
    #[serde(other)]
    Lecture,
}

/// Room classification.  Lab-kind rooms are preferred for lab subjects; any
/// other `type` reads as `LectureHall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomKind {
    #[serde(alias = "lab")]
    Lab,
    #[default]
    #[serde(other)]
    LectureHall,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

/// A subject taught to every batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub code: String,
    /// Target instructional hours per batch per week.
    pub hours_per_week: u32,
    #[serde(rename = "type", default)]
    pub kind: SubjectKind,
}

impl Subject {
    pub fn is_lab(&self) -> bool {
        self.kind == SubjectKind::Lab
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Room number or label shown on the printed timetable.
    pub number: String,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
}

/// A student cohort sharing one weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
}

/// One period in the weekly grid.
///
/// Times are `"HH:MM"` strings.  Two slots are adjacent when the first one's
/// `end_time` equals the second one's `start_time` on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    /// Break periods are never assigned sessions.
    #[serde(default)]
    pub is_break: bool,
}

impl Timeslot {
    /// `"Monday 09:00-10:00"` – used in log lines and warnings.
    pub fn label(&self) -> String {
        format!("{} {}-{}", self.day, self.start_time, self.end_time)
    }

    /// `"09:00-10:00"` – the row key of the weekly grid view.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

/// Teacher/subject eligibility.  Many-to-many; only the first matching row
/// for a subject is ever used by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSubjectAssignment {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
}

// ── Output ────────────────────────────────────────────────────────────────────

/// One placed session.  Has no identity beyond the tuple itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub batch_id: BatchId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub timeslot_id: TimeslotId,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Read-only snapshot of everything the scheduler needs for one run.
///
/// Collection order matters: subjects are processed in input order, rooms
/// are tried in input order and the first assignment row for a subject wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
    #[serde(default)]
    pub assignments: Vec<TeacherSubjectAssignment>,
}

impl ScheduleInput {
    /// First teacher assigned to `subject_id`, in assignment input order.
    pub fn first_teacher_for(&self, subject_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.subject_id == subject_id)
            .map(|a| a.teacher_id.as_str())
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Pre-generation sanity check, mirroring what the data-entry layer
    /// verifies before it asks for a timetable.
    ///
    /// Returns one human-readable line per problem found.  An empty vector
    /// means the snapshot looks complete; a non-empty one does **not** stop
    /// the scheduler from running.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let sections = [
            ("teachers", self.teachers.is_empty()),
            ("subjects", self.subjects.is_empty()),
            ("rooms", self.rooms.is_empty()),
            ("batches", self.batches.is_empty()),
            ("timeslots", self.timeslots.is_empty()),
            ("teacher-subject assignments", self.assignments.is_empty()),
        ];
        for (name, empty) in sections {
            if empty {
                problems.push(format!("no {name} defined"));
            }
        }

        for a in &self.assignments {
            if !self.teachers.iter().any(|t| t.id == a.teacher_id) {
                problems.push(format!(
                    "assignment references unknown teacher '{}'",
                    a.teacher_id
                ));
            }
            if self.subject(&a.subject_id).is_none() {
                problems.push(format!(
                    "assignment references unknown subject '{}'",
                    a.subject_id
                ));
            }
        }

        for s in &self.subjects {
            if s.hours_per_week == 0 {
                problems.push(format!("subject '{}' has zero hours per week", s.name));
            }
        }

        for t in &self.timeslots {
            if !is_clock_time(&t.start_time) || !is_clock_time(&t.end_time) {
                problems.push(format!(
                    "timeslot '{}' has malformed times '{}'-'{}' (expected HH:MM)",
                    t.id, t.start_time, t.end_time
                ));
            } else if t.start_time >= t.end_time {
                problems.push(format!(
                    "timeslot '{}' ends before it starts ({})",
                    t.id,
                    t.label()
                ));
            }
        }

        problems
    }
}

/// `true` for zero-padded 24-hour `"HH:MM"` (seconds suffix `":SS"` allowed).
fn is_clock_time(s: &str) -> bool {
    let mut parts = s.split(':');
    let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
        return false;
    };
    let two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return false;
    }
    if let Some(sec) = parts.next() {
        if !two_digits(sec) || parts.next().is_some() {
            return false;
        }
    }
    h < "24" && m < "60"
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, day: Weekday, start: &str, end: &str) -> Timeslot {
        Timeslot {
            id: id.into(),
            day,
            start_time: start.into(),
            end_time: end.into(),
            is_break: false,
        }
    }

    fn complete_input() -> ScheduleInput {
        ScheduleInput {
            teachers: vec![Teacher {
                id: "t1".into(),
                name: "Ada".into(),
            }],
            subjects: vec![Subject {
                id: "s1".into(),
                name: "Maths".into(),
                code: "MA101".into(),
                hours_per_week: 3,
                kind: SubjectKind::Lecture,
            }],
            rooms: vec![Room {
                id: "r1".into(),
                number: "101".into(),
                kind: RoomKind::LectureHall,
            }],
            batches: vec![Batch {
                id: "b1".into(),
                name: "CS-A".into(),
            }],
            timeslots: vec![slot("ts1", Weekday::Monday, "09:00", "10:00")],
            assignments: vec![TeacherSubjectAssignment {
                teacher_id: "t1".into(),
                subject_id: "s1".into(),
            }],
        }
    }

    // ── first_teacher_for ─────────────────────────────────────────────────────

    #[test]
    fn first_teacher_for_uses_input_order() {
        let mut input = complete_input();
        input.assignments.push(TeacherSubjectAssignment {
            teacher_id: "t2".into(),
            subject_id: "s1".into(),
        });
        input.assignments.insert(
            0,
            TeacherSubjectAssignment {
                teacher_id: "t9".into(),
                subject_id: "other".into(),
            },
        );
        assert_eq!(input.first_teacher_for("s1"), Some("t1"));
        assert_eq!(input.first_teacher_for("missing"), None);
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn complete_input_has_no_problems() {
        assert!(complete_input().validate().is_empty());
    }

    #[test]
    fn empty_input_reports_every_missing_section() {
        let problems = ScheduleInput::default().validate();
        assert_eq!(problems.len(), 6);
        assert!(problems.iter().any(|p| p.contains("teacher-subject assignments")));
    }

    #[test]
    fn unknown_references_are_reported() {
        let mut input = complete_input();
        input.assignments.push(TeacherSubjectAssignment {
            teacher_id: "ghost".into(),
            subject_id: "nope".into(),
        });
        let problems = input.validate();
        assert!(problems.iter().any(|p| p.contains("unknown teacher 'ghost'")));
        assert!(problems.iter().any(|p| p.contains("unknown subject 'nope'")));
    }

    #[test]
    fn malformed_and_inverted_times_are_reported() {
        let mut input = complete_input();
        input.timeslots.push(slot("bad", Weekday::Monday, "9:00", "10:00"));
        input.timeslots.push(slot("inv", Weekday::Monday, "11:00", "10:00"));
        let problems = input.validate();
        assert!(problems.iter().any(|p| p.contains("'bad' has malformed")));
        assert!(problems.iter().any(|p| p.contains("'inv' ends before")));
    }

    #[test]
    fn clock_time_accepts_seconds_suffix() {
        assert!(is_clock_time("09:00"));
        assert!(is_clock_time("09:00:00"));
        assert!(!is_clock_time("24:00"));
        assert!(!is_clock_time("09:60"));
        assert!(!is_clock_time("0900"));
        assert!(!is_clock_time("09:00:00:00"));
    }

    // ── Timeslot ──────────────────────────────────────────────────────────────

    #[test]
    fn timeslot_label_and_range() {
        let ts = slot("ts1", Weekday::Tuesday, "10:00", "11:00");
        assert_eq!(ts.label(), "Tuesday 10:00-11:00");
        assert_eq!(ts.time_range(), "10:00-11:00");
    }

    // ── Kinds ─────────────────────────────────────────────────────────────────

    #[test]
    fn kinds_accept_data_entry_spellings() {
        let s: SubjectKind = serde_yaml::from_str("Theory").unwrap();
        assert_eq!(s, SubjectKind::Lecture);
        let r: RoomKind = serde_yaml::from_str("Classroom").unwrap();
        assert_eq!(r, RoomKind::LectureHall);
        let l: RoomKind = serde_yaml::from_str("Lab").unwrap();
        assert_eq!(l, RoomKind::Lab);
        let l: SubjectKind = serde_yaml::from_str("lab").unwrap();
        assert_eq!(l, SubjectKind::Lab);
    }

    #[test]
    fn unrecognised_kinds_are_not_labs() {
        let s: SubjectKind = serde_yaml::from_str("Tutorial").unwrap();
        assert_eq!(s, SubjectKind::Lecture);
        let r: RoomKind = serde_yaml::from_str("Seminar Room").unwrap();
        assert_eq!(r, RoomKind::LectureHall);
    }
}
