/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-run booking state.
//!
//! [`OccupancyTracker`] is the only thing allowed to record a booking.  Both
//! scheduling phases ask it whether a `(teacher, batch, room, slot)` tuple is
//! free and tell it when they commit one, so the no-double-booking invariant
//! holds across the whole run, not just within a phase.
//!
//! A fresh tracker is built for every run and dropped at the end of it.

use std::collections::{HashMap, HashSet};

use crate::grid::Weekday;
use crate::model::Timeslot;

/// Occupied timeslot ids per entity.
type SlotSets = HashMap<String, HashSet<String>>;

#[derive(Debug, Default)]
pub struct OccupancyTracker {
    teacher_slots: SlotSets,
    room_slots: SlotSets,
    batch_slots: SlotSets,
    /// (teacher, day) → periods taught that day.
    teacher_hours: HashMap<(String, Weekday), u32>,
    /// (batch, day) → subjects placed that day, in placement order.
    batch_subjects: HashMap<(String, Weekday), Vec<String>>,
}

impl OccupancyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` only if none of teacher, batch or room already holds `timeslot_id`.
    pub fn is_available(
        &self,
        teacher_id: &str,
        batch_id: &str,
        room_id: &str,
        timeslot_id: &str,
    ) -> bool {
        !Self::holds(&self.teacher_slots, teacher_id, timeslot_id)
            && !Self::holds(&self.batch_slots, batch_id, timeslot_id)
            && !Self::holds(&self.room_slots, room_id, timeslot_id)
    }

    /// Book `timeslot_id` for all three entities and update the per-day
    /// counters.
    pub fn occupy(
        &mut self,
        teacher_id: &str,
        batch_id: &str,
        room_id: &str,
        timeslot_id: &str,
        subject_id: &str,
        day: &Weekday,
    ) {
        debug_assert!(
            self.is_available(teacher_id, batch_id, room_id, timeslot_id),
            "double booking of slot '{timeslot_id}'"
        );

        for (sets, id) in [
            (&mut self.teacher_slots, teacher_id),
            (&mut self.batch_slots, batch_id),
            (&mut self.room_slots, room_id),
        ] {
            sets.entry(id.to_string())
                .or_default()
                .insert(timeslot_id.to_string());
        }

        *self
            .teacher_hours
            .entry((teacher_id.to_string(), day.clone()))
            .or_insert(0) += 1;

        self.batch_subjects
            .entry((batch_id.to_string(), day.clone()))
            .or_default()
            .push(subject_id.to_string());
    }

    /// Periods already taught by `teacher_id` on `day`.
    pub fn teacher_daily_hours(&self, teacher_id: &str, day: &Weekday) -> u32 {
        self.teacher_hours
            .get(&(teacher_id.to_string(), day.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// The subject most recently placed for `batch_id` on `day`.
    pub fn last_subject_of_day(&self, batch_id: &str, day: &Weekday) -> Option<&str> {
        self.batch_subjects
            .get(&(batch_id.to_string(), day.clone()))
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Length of the run of teacher-occupied class slots ending just before
    /// `position`, looking back at most `window` slots.
    ///
    /// Used by the break requirement: a teacher who already holds `window`
    /// consecutive periods gets no further one straight after them.
    pub fn teacher_run_before(
        &self,
        teacher_id: &str,
        class_slots: &[&Timeslot],
        position: usize,
        window: usize,
    ) -> usize {
        let end = position.min(class_slots.len());
        class_slots[end.saturating_sub(window)..end]
            .iter()
            .rev()
            .take_while(|slot| Self::holds(&self.teacher_slots, teacher_id, &slot.id))
            .count()
    }

    fn holds(sets: &SlotSets, entity: &str, timeslot_id: &str) -> bool {
        sets.get(entity)
            .is_some_and(|s| s.contains(timeslot_id))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
