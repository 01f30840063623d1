/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Phase 1: contiguous two-period lab blocks.
//!
//! Labs run before theory so their blocks claim adjacent slot pairs while the
//! grid is still mostly empty.  The scan walks the class sequence left to
//! right; at every position it tries to form a block from that slot and the
//! next one, and commits the first block that passes every check.

use tracing::{debug, info};

use crate::config::{SchedulerPolicy, LAB_BLOCK_LEN};
use crate::grid::ClassGrid;
use crate::model::TimetableEntry;

use super::occupancy::OccupancyTracker;
use super::SubjectJob;

/// How far one lab subject got for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabOutcome {
    pub blocks_needed: u32,
    pub blocks_scheduled: u32,
}

impl LabOutcome {
    pub fn hours_scheduled(&self) -> u32 {
        self.blocks_scheduled * LAB_BLOCK_LEN
    }

    pub fn is_complete(&self) -> bool {
        self.blocks_scheduled >= self.blocks_needed
    }
}

/// Place the lab blocks of `job`, appending one entry per occupied slot.
pub fn schedule_lab_subject(
    job: &SubjectJob<'_>,
    grid: &ClassGrid<'_>,
    policy: &SchedulerPolicy,
    tracker: &mut OccupancyTracker,
    entries: &mut Vec<TimetableEntry>,
) -> LabOutcome {
    let slots = grid.class_slots();
    let teacher = job.teacher_id;
    let batch = job.batch.id.as_str();
    let blocks_needed = policy.lab_blocks_needed(job.subject.hours_per_week);
    let mut blocks_scheduled = 0u32;

    debug!(
        subject = %job.subject.name,
        batch   = %job.batch.name,
        blocks_needed,
        "scheduling lab blocks"
    );

    let mut position = 0usize;
    while position < slots.len() && blocks_scheduled < blocks_needed {
        let Some(block) = grid.block_at(position) else {
            position += 1;
            continue;
        };
        let day = &block[0].day;

        let hours_today = tracker.teacher_daily_hours(teacher, day);
        if policy.exceeds_daily_cap(hours_today, LAB_BLOCK_LEN) {
            debug!(
                teacher, day = %day, hours_today,
                cap = policy.max_daily_hours,
                "lab block skipped: daily workload cap"
            );
            position += 1;
            continue;
        }

        let run =
            tracker.teacher_run_before(teacher, slots, position, policy.max_consecutive_slots);
        if policy.needs_break(run) {
            debug!(
                teacher, slot = %block[0].label(), run,
                "lab block skipped: teacher needs a break"
            );
            position += 1;
            continue;
        }

        let room = job.rooms.iter().find(|room| {
            block
                .iter()
                .all(|slot| tracker.is_available(teacher, batch, &room.id, &slot.id))
        });
        let Some(room) = room else {
            debug!(slot = %block[0].label(), "lab block skipped: no room free for both periods");
            position += 1;
            continue;
        };

        for slot in block {
            entries.push(TimetableEntry {
                batch_id: job.batch.id.clone(),
                subject_id: job.subject.id.clone(),
                teacher_id: teacher.to_string(),
                room_id: room.id.clone(),
                timeslot_id: slot.id.clone(),
            });
            tracker.occupy(teacher, batch, &room.id, &slot.id, &job.subject.id, &slot.day);
        }
        blocks_scheduled += 1;

        info!(
            subject = %job.subject.name,
            batch   = %job.batch.name,
            room    = %room.number,
            blocks_scheduled,
            blocks_needed,
            "✓ lab block {} {}-{}",
            day, block[0].start_time, block[1].end_time
        );

        position += 2;
    }

    LabOutcome {
        blocks_needed,
        blocks_scheduled,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
