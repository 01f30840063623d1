/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Whole-timetable invariant audit.
//!
//! # Status: warning only
//!
//! The scheduling phases enforce every hard rule through the occupancy
//! tracker, so on a correct build the audit never finds anything.  It is run
//! after every schedule and **logged**; the timetable is returned either way.
//!
//! # Checks
//!
//! | Rule | Violation |
//! |---|---|
//! | one entry per teacher per slot | [`Violation::TeacherDoubleBooked`] |
//! | one entry per room per slot | [`Violation::RoomDoubleBooked`] |
//! | one entry per batch per slot | [`Violation::BatchDoubleBooked`] |
//! | entries reference known, non-break slots | [`Violation::UnknownTimeslot`], [`Violation::BreakSlotUsed`] |
//! | teacher periods per day ≤ `max_daily_hours` | [`Violation::DailyCapExceeded`] |

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::grid::Weekday;
use crate::model::{ScheduleInput, Timeslot, TimetableEntry};

/// One broken invariant in a finished timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    TeacherDoubleBooked { teacher: String, timeslot: String },
    RoomDoubleBooked { room: String, timeslot: String },
    BatchDoubleBooked { batch: String, timeslot: String },
    BreakSlotUsed { timeslot: String },
    UnknownTimeslot { timeslot: String },
    DailyCapExceeded {
        teacher: String,
        day: Weekday,
        hours: u32,
        cap: u32,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TeacherDoubleBooked { teacher, timeslot } => {
                write!(f, "teacher '{}' booked twice in slot '{}'", teacher, timeslot)
            }
            Violation::RoomDoubleBooked { room, timeslot } => {
                write!(f, "room '{}' booked twice in slot '{}'", room, timeslot)
            }
            Violation::BatchDoubleBooked { batch, timeslot } => {
                write!(f, "batch '{}' booked twice in slot '{}'", batch, timeslot)
            }
            Violation::BreakSlotUsed { timeslot } => {
                write!(f, "session placed in break slot '{}'", timeslot)
            }
            Violation::UnknownTimeslot { timeslot } => {
                write!(f, "session references unknown slot '{}'", timeslot)
            }
            Violation::DailyCapExceeded {
                teacher,
                day,
                hours,
                cap,
            } => write!(
                f,
                "teacher '{}' teaches {} periods on {} (cap {})",
                teacher, hours, day, cap
            ),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Check `entries` against every hard rule and return what is broken.
///
/// Violations come out in a stable order (by kind, then by identifiers) so
/// two audits of the same timetable compare equal.
pub fn audit(
    entries: &[TimetableEntry],
    input: &ScheduleInput,
    max_daily_hours: u32,
) -> Vec<Violation> {
    let slots: HashMap<&str, &Timeslot> = input
        .timeslots
        .iter()
        .map(|t| (t.id.as_str(), t))
        .collect();

    let mut teacher_use: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    let mut room_use: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    let mut batch_use: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    let mut daily: BTreeMap<(&str, &Weekday), u32> = BTreeMap::new();
    let mut slot_problems = Vec::new();

    for e in entries {
        let ts = e.timeslot_id.as_str();
        *teacher_use.entry((e.teacher_id.as_str(), ts)).or_insert(0) += 1;
        *room_use.entry((e.room_id.as_str(), ts)).or_insert(0) += 1;
        *batch_use.entry((e.batch_id.as_str(), ts)).or_insert(0) += 1;

        match slots.get(ts) {
            None => slot_problems.push(Violation::UnknownTimeslot {
                timeslot: ts.to_string(),
            }),
            Some(slot) => {
                if slot.is_break {
                    slot_problems.push(Violation::BreakSlotUsed {
                        timeslot: ts.to_string(),
                    });
                }
                *daily.entry((e.teacher_id.as_str(), &slot.day)).or_insert(0) += 1;
            }
        }
    }

    let mut violations: Vec<Violation> = Vec::new();
    violations.extend(
        doubled(&teacher_use)
            .into_iter()
            .map(|(teacher, timeslot)| Violation::TeacherDoubleBooked { teacher, timeslot }),
    );
    violations.extend(
        doubled(&room_use)
            .into_iter()
            .map(|(room, timeslot)| Violation::RoomDoubleBooked { room, timeslot }),
    );
    violations.extend(
        doubled(&batch_use)
            .into_iter()
            .map(|(batch, timeslot)| Violation::BatchDoubleBooked { batch, timeslot }),
    );
    slot_problems.dedup();
    violations.extend(slot_problems);
    violations.extend(
        daily
            .into_iter()
            .filter(|(_, hours)| *hours > max_daily_hours)
            .map(|((teacher, day), hours)| Violation::DailyCapExceeded {
                teacher: teacher.to_string(),
                day: day.clone(),
                hours,
                cap: max_daily_hours,
            }),
    );

    violations
}

/// `(entity, slot)` keys used more than once.
fn doubled(uses: &BTreeMap<(&str, &str), u32>) -> Vec<(String, String)> {
    uses.iter()
        .filter(|(_, n)| **n > 1)
        .map(|((who, ts), _)| (who.to_string(), ts.to_string()))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
