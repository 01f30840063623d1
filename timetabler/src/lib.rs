/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetabler – greedy weekly timetable scheduler
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── model          – snapshot entities and the output entry
//! ├── grid/          – weekday ordering, class-slot sequence, contiguity
//! ├── config/        – YAML snapshot loading and scheduler policy
//! ├── scheduler/     – occupancy tracker, lab and theory phases, audit
//! └── report         – achieved-hours summary and weekly grid views
//! ```

pub mod config;
pub mod grid;
pub mod model;
pub mod report;
pub mod scheduler;
