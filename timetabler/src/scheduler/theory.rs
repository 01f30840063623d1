/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Phase 2: single-period theory sessions.
//!
//! Each lecture subject gets up to three scans of the class sequence.  The
//! first allows one session per day, the second two, the third any number,
//! so hours spread across the week before they are allowed to pile up.  The
//! per-day counts carry over from one pass to the next.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::SchedulerPolicy;
use crate::grid::{ClassGrid, Weekday};
use crate::model::TimetableEntry;

use super::occupancy::OccupancyTracker;
use super::SubjectJob;

// ── Distribution passes ───────────────────────────────────────────────────────

/// One scan of the class sequence under a per-day session cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionPass {
    /// At most one session of the subject per day.
    OnePerDay,
    /// At most two sessions of the subject per day.
    TwoPerDay,
    /// No per-day cap.
    Unlimited,
}

impl DistributionPass {
    /// The passes in the order they run.
    pub const ALL: [DistributionPass; 3] = [
        DistributionPass::OnePerDay,
        DistributionPass::TwoPerDay,
        DistributionPass::Unlimited,
    ];

    /// Sessions of one subject allowed on one day, `None` when uncapped.
    pub fn daily_cap(self) -> Option<u32> {
        match self {
            DistributionPass::OnePerDay => Some(1),
            DistributionPass::TwoPerDay => Some(2),
            DistributionPass::Unlimited => None,
        }
    }

    /// `true` if another session fits on a day that already has `placed`.
    pub fn allows(self, placed: u32) -> bool {
        self.daily_cap().map_or(true, |cap| placed < cap)
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How far one theory subject got for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TheoryOutcome {
    pub hours_needed: u32,
    pub hours_scheduled: u32,
    /// The last pass that placed anything, `None` if nothing was placed.
    pub last_pass_used: Option<DistributionPass>,
}

impl TheoryOutcome {
    pub fn is_complete(&self) -> bool {
        self.hours_scheduled >= self.hours_needed
    }
}

// ── Scheduling ────────────────────────────────────────────────────────────────

/// Place the single-period sessions of `job`, appending one entry each.
pub fn schedule_theory_subject(
    job: &SubjectJob<'_>,
    grid: &ClassGrid<'_>,
    policy: &SchedulerPolicy,
    tracker: &mut OccupancyTracker,
    entries: &mut Vec<TimetableEntry>,
) -> TheoryOutcome {
    let slots = grid.class_slots();
    let teacher = job.teacher_id;
    let batch = job.batch.id.as_str();
    let subject = job.subject.id.as_str();
    let hours_needed = job.subject.hours_per_week;

    let mut per_day: HashMap<&Weekday, u32> = HashMap::new();
    let mut hours_scheduled = 0u32;
    let mut last_pass_used = None;

    debug!(
        subject = %job.subject.name,
        batch   = %job.batch.name,
        hours_needed,
        "scheduling theory sessions"
    );

    'passes: for pass in DistributionPass::ALL {
        if hours_scheduled >= hours_needed {
            break;
        }

        for (position, slot) in slots.iter().enumerate() {
            if hours_scheduled >= hours_needed {
                break 'passes;
            }
            let day = &slot.day;

            if !pass.allows(per_day.get(day).copied().unwrap_or(0)) {
                continue;
            }

            if tracker.last_subject_of_day(batch, day) == Some(subject) {
                debug!(subject, slot = %slot.label(), "skipped: would repeat the same subject");
                continue;
            }

            let hours_today = tracker.teacher_daily_hours(teacher, day);
            if policy.exceeds_daily_cap(hours_today, 1) {
                debug!(teacher, day = %day, hours_today, "skipped: daily workload cap");
                continue;
            }

            let run =
                tracker.teacher_run_before(teacher, slots, position, policy.max_consecutive_slots);
            if policy.needs_break(run) {
                debug!(teacher, slot = %slot.label(), run, "skipped: teacher needs a break");
                continue;
            }

            let Some(room) = job
                .rooms
                .iter()
                .find(|room| tracker.is_available(teacher, batch, &room.id, &slot.id))
            else {
                debug!(slot = %slot.label(), "skipped: no room free");
                continue;
            };

            entries.push(TimetableEntry {
                batch_id: job.batch.id.clone(),
                subject_id: job.subject.id.clone(),
                teacher_id: teacher.to_string(),
                room_id: room.id.clone(),
                timeslot_id: slot.id.clone(),
            });
            tracker.occupy(teacher, batch, &room.id, &slot.id, subject, day);
            *per_day.entry(day).or_insert(0) += 1;
            hours_scheduled += 1;
            last_pass_used = Some(pass);

            info!(
                subject = %job.subject.name,
                batch   = %job.batch.name,
                room    = %room.number,
                pass    = ?pass,
                hours_scheduled,
                hours_needed,
                "✓ session {}",
                slot.label()
            );
        }
    }

    TheoryOutcome {
        hours_needed,
        hours_scheduled,
        last_pass_used,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Batch, Room, RoomKind, Subject, SubjectKind, Timeslot};

    fn slot(id: &str, day: Weekday, start: &str, end: &str) -> Timeslot {
        Timeslot {
            id: id.into(),
            day,
            start_time: start.into(),
            end_time: end.into(),
            is_break: false,
        }
    }

    fn hourly(prefix: &str, day: Weekday, n: usize) -> Vec<Timeslot> {
        (0..n)
            .map(|i| {
                slot(
                    &format!("{prefix}{i}"),
                    day.clone(),
                    &format!("{:02}:00", 9 + i),
                    &format!("{:02}:00", 10 + i),
                )
            })
            .collect()
    }

    fn lecture(id: &str, hours: u32) -> Subject {
        Subject {
            id: id.into(),
            name: id.to_uppercase(),
            code: String::new(),
            hours_per_week: hours,
            kind: SubjectKind::Lecture,
        }
    }

    fn room(id: &str) -> Room {
        Room {
            id: id.into(),
            number: id.into(),
            kind: RoomKind::LectureHall,
        }
    }

    fn run(
        slots: &[Timeslot],
        subject: &Subject,
        teacher: &str,
        tracker: &mut OccupancyTracker,
    ) -> (TheoryOutcome, Vec<TimetableEntry>) {
        let b = Batch {
            id: "b1".into(),
            name: "CS-A".into(),
        };
        let rooms = [room("R1")];
        let grid = ClassGrid::new(slots);
        let job = SubjectJob {
            batch: &b,
            subject,
            teacher_id: teacher,
            rooms: rooms.iter().collect(),
        };
        let mut entries = Vec::new();
        let policy = SchedulerPolicy::default();
        let out = schedule_theory_subject(&job, &grid, &policy, tracker, &mut entries);
        (out, entries)
    }

    fn slot_ids(entries: &[TimetableEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.timeslot_id.as_str()).collect()
    }

    // ── DistributionPass ──────────────────────────────────────────────────────

    #[test]
    fn passes_relax_the_daily_cap() {
        assert_eq!(DistributionPass::OnePerDay.daily_cap(), Some(1));
        assert_eq!(DistributionPass::TwoPerDay.daily_cap(), Some(2));
        assert_eq!(DistributionPass::Unlimited.daily_cap(), None);

        assert!(DistributionPass::OnePerDay.allows(0));
        assert!(!DistributionPass::OnePerDay.allows(1));
        assert!(DistributionPass::TwoPerDay.allows(1));
        assert!(!DistributionPass::TwoPerDay.allows(2));
        assert!(DistributionPass::Unlimited.allows(100));
    }

    #[test]
    fn passes_run_strictest_first() {
        assert_eq!(
            DistributionPass::ALL,
            [
                DistributionPass::OnePerDay,
                DistributionPass::TwoPerDay,
                DistributionPass::Unlimited
            ]
        );
    }

    // ── schedule_theory_subject ───────────────────────────────────────────────

    #[test]
    fn three_hours_over_three_days_land_one_per_day() {
        let mut slots = hourly("mon", Weekday::Monday, 2);
        slots.extend(hourly("tue", Weekday::Tuesday, 2));
        slots.push(slot("wed0", Weekday::Wednesday, "09:00", "10:00"));

        let mut tr = OccupancyTracker::new();
        let (out, entries) = run(&slots, &lecture("maths", 3), "t1", &mut tr);

        assert!(out.is_complete());
        assert_eq!(out.last_pass_used, Some(DistributionPass::OnePerDay));
        assert_eq!(slot_ids(&entries), vec!["mon0", "tue0", "wed0"]);
    }

    #[test]
    fn same_subject_is_not_placed_twice_in_a_row() {
        // One day only: after the first session the subject is the last one
        // placed that day, so every later slot on that day is refused.
        let slots = hourly("mon", Weekday::Monday, 4);
        let mut tr = OccupancyTracker::new();
        let (out, entries) = run(&slots, &lecture("maths", 3), "t1", &mut tr);

        assert_eq!(out.hours_scheduled, 1);
        assert!(!out.is_complete());
        assert_eq!(slot_ids(&entries), vec!["mon0"]);
    }

    #[test]
    fn later_pass_fills_after_another_subject_intervenes() {
        let slots = hourly("mon", Weekday::Monday, 4);
        let mut tr = OccupancyTracker::new();

        // maths takes mon0, physics takes mon1 (last subject = physics).
        let (_, first) = run(&slots, &lecture("maths", 1), "t1", &mut tr);
        let (_, second) = run(&slots, &lecture("physics", 1), "t2", &mut tr);
        assert_eq!(slot_ids(&first), vec!["mon0"]);
        assert_eq!(slot_ids(&second), vec!["mon1"]);

        // A fresh chemistry subject: pass 0 takes mon2, then the repeat rule
        // blocks mon3.
        let (out, entries) = run(&slots, &lecture("chem", 2), "t3", &mut tr);
        assert_eq!(slot_ids(&entries), vec!["mon2"]);
        assert_eq!(out.hours_scheduled, 1);
    }

    #[test]
    fn daily_cap_stops_a_busy_teacher() {
        let mut slots = hourly("mon", Weekday::Monday, 2);
        slots.push(slot("tue0", Weekday::Tuesday, "09:00", "10:00"));

        let mut tr = OccupancyTracker::new();
        for i in 0..6 {
            tr.occupy("t1", "other", "X", &format!("x{i}"), "x", &Weekday::Monday);
        }

        let (out, entries) = run(&slots, &lecture("maths", 1), "t1", &mut tr);
        assert!(out.is_complete());
        assert_eq!(slot_ids(&entries), vec!["tue0"]);
    }

    #[test]
    fn break_requirement_skips_slot_after_three_periods() {
        let slots = hourly("mon", Weekday::Monday, 5);
        let mut tr = OccupancyTracker::new();
        for i in 0..3 {
            tr.occupy("t1", "other", "X", &format!("mon{i}"), "x", &Weekday::Monday);
        }

        let (_, entries) = run(&slots, &lecture("maths", 1), "t1", &mut tr);
        assert_eq!(slot_ids(&entries), vec!["mon4"]);
    }

    #[test]
    fn busy_room_and_batch_slots_are_skipped() {
        let mut slots = hourly("mon", Weekday::Monday, 1);
        slots.extend(hourly("tue", Weekday::Tuesday, 1));
        slots.extend(hourly("wed", Weekday::Wednesday, 1));

        let mut tr = OccupancyTracker::new();
        tr.occupy("t9", "b9", "R1", "mon0", "x", &Weekday::Monday);
        tr.occupy("t8", "b1", "R7", "tue0", "y", &Weekday::Tuesday);

        let (_, entries) = run(&slots, &lecture("maths", 1), "t1", &mut tr);
        assert_eq!(slot_ids(&entries), vec!["wed0"]);
    }

    #[test]
    fn zero_hours_places_nothing() {
        let slots = hourly("mon", Weekday::Monday, 3);
        let mut tr = OccupancyTracker::new();
        let (out, entries) = run(&slots, &lecture("maths", 0), "t1", &mut tr);
        assert!(out.is_complete());
        assert_eq!(out.last_pass_used, None);
        assert!(entries.is_empty());
    }
}
