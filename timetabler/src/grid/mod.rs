/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Input normalisation: the ordered weekly grid.
//!
//! Timeslots arrive in whatever order the data-entry layer stored them.
//! [`ClassGrid::new`] sorts them by `(day, start_time)` and derives the
//! *class* sequence (break periods removed) that both scheduling phases scan.
//!
//! Start times are compared as strings.  This is correct for zero-padded
//! `"HH:MM"` values, which is all the data-entry layer produces.

pub mod weekday;

pub use weekday::Weekday;

use tracing::debug;

use crate::model::Timeslot;

/// The normalised weekly grid for one scheduling run.
///
/// Borrows the timeslots from the input snapshot; never outlives it.
#[derive(Debug, Clone)]
pub struct ClassGrid<'a> {
    ordered: Vec<&'a Timeslot>,
    class_slots: Vec<&'a Timeslot>,
}

impl<'a> ClassGrid<'a> {
    /// Sort `timeslots` into day-then-time order and split off the breaks.
    ///
    /// The sort is stable, so slots with identical day and start time keep
    /// their input order.
    pub fn new(timeslots: &'a [Timeslot]) -> Self {
        let mut ordered: Vec<&Timeslot> = timeslots.iter().collect();
        ordered.sort_by(|a, b| {
            a.day
                .cmp(&b.day)
                .then_with(|| a.start_time.cmp(&b.start_time))
        });

        let class_slots: Vec<&Timeslot> = ordered
            .iter()
            .copied()
            .filter(|t| !t.is_break)
            .collect();

        debug!(
            total = ordered.len(),
            classes = class_slots.len(),
            breaks = ordered.len() - class_slots.len(),
            "grid normalised"
        );

        Self {
            ordered,
            class_slots,
        }
    }

    /// Every slot, breaks included, in day/time order.
    pub fn ordered(&self) -> &[&'a Timeslot] {
        &self.ordered
    }

    /// Schedulable slots only, in day/time order.
    pub fn class_slots(&self) -> &[&'a Timeslot] {
        &self.class_slots
    }

    pub fn is_empty(&self) -> bool {
        self.class_slots.is_empty()
    }

    /// The distinct days present in the grid, in week order.
    pub fn days(&self) -> Vec<&'a Weekday> {
        let mut days: Vec<&Weekday> = self.ordered.iter().map(|t| &t.day).collect();
        days.dedup();
        days
    }

    /// Two class slots starting at `position` that form a lab block, if any.
    ///
    /// A block needs both slots on the same day with the first ending exactly
    /// when the second starts.  A break between two periods leaves a gap in
    /// the class sequence, so the pair on either side of it is rejected here.
    pub fn block_at(&self, position: usize) -> Option<[&'a Timeslot; 2]> {
        let first = *self.class_slots.get(position)?;
        let second = *self.class_slots.get(position + 1)?;
        is_contiguous(first, second).then_some([first, second])
    }
}

/// `true` if `second` immediately follows `first` on the same day.
pub fn is_contiguous(first: &Timeslot, second: &Timeslot) -> bool {
    first.day == second.day && first.end_time == second.start_time
}

// ── Tests ─────────────────────────────────────────────────────────────────────
