//! Snapshot loading and scheduler policy.
//!
//! The data-entry layer exports one YAML document per scheduling run:
//! ```yaml
//! teachers:
//!   - { id: t1, name: "Ada Lovelace" }
//! subjects:
//!   - { id: s1, name: "Mathematics", code: MA101, hours_per_week: 3, type: Lecture }
//!   - { id: s2, name: "Physics Lab", code: PH102, hours_per_week: 2, type: Lab }
//! rooms:
//!   - { id: r1, number: "101", type: LectureHall }
//!   - { id: r2, number: "L1", type: Lab }
//! batches:
//!   - { id: b1, name: "CS-A" }
//! timeslots:
//!   - { id: ts1, day: Monday, start_time: "09:00", end_time: "10:00" }
//!   - { id: ts2, day: Monday, start_time: "10:00", end_time: "10:15", is_break: true }
//! assignments:
//!   - { teacher_id: t1, subject_id: s1 }
//! policy:                 # optional, every field defaulted
//!   max_daily_hours: 6
//!   max_consecutive_slots: 3
//!   odd_lab_hours: round_up
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::ScheduleInput;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private – callers work with [`Snapshot`] instead.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(flatten)]
    input: ScheduleInput,
    #[serde(default)]
    policy: SchedulerPolicy,
}

// ── Scheduler policy ──────────────────────────────────────────────────────────

/// Default per-teacher, per-day workload cap in periods.
pub const DEFAULT_MAX_DAILY_HOURS: u32 = 6;

/// Default number of back-to-back periods after which a teacher needs a break.
pub const DEFAULT_MAX_CONSECUTIVE_SLOTS: usize = 3;

/// Periods per lab block.  Fixed: a lab block is always a contiguous pair.
pub const LAB_BLOCK_LEN: u32 = 2;

/// How a lab subject with an odd `hours_per_week` is turned into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum OddLabHours {
    /// `ceil(hours / 2)` blocks; the last block overshoots by one hour.
    #[default]
    RoundUp,
    /// `floor(hours / 2)` blocks; the odd hour is dropped.
    RoundDown,
}

/// Tunable limits applied by both scheduling phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerPolicy {
    /// A teacher never teaches more than this many periods on one day.
    pub max_daily_hours: u32,

    /// A teacher who holds this many consecutive class slots gets no further
    /// slot straight after them.  `0` disables the check.
    pub max_consecutive_slots: usize,

    pub odd_lab_hours: OddLabHours,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            max_daily_hours: DEFAULT_MAX_DAILY_HOURS,
            max_consecutive_slots: DEFAULT_MAX_CONSECUTIVE_SLOTS,
            odd_lab_hours: OddLabHours::default(),
        }
    }
}

impl SchedulerPolicy {
    /// Number of two-period blocks a lab subject asks for.
    pub fn lab_blocks_needed(&self, hours_per_week: u32) -> u32 {
        match self.odd_lab_hours {
            OddLabHours::RoundUp => hours_per_week.div_ceil(LAB_BLOCK_LEN),
            OddLabHours::RoundDown => hours_per_week / LAB_BLOCK_LEN,
        }
    }

    /// `true` if adding `adding` periods to a teacher's `current` daily total
    /// would break the workload cap.
    pub fn exceeds_daily_cap(&self, current: u32, adding: u32) -> bool {
        current + adding > self.max_daily_hours
    }

    /// `true` if a trailing run of `run` occupied slots forces a break.
    pub fn needs_break(&self, run: usize) -> bool {
        self.max_consecutive_slots > 0 && run >= self.max_consecutive_slots
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// A loaded scheduling snapshot: the input entities plus the policy.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub input: ScheduleInput,
    pub policy: SchedulerPolicy,
}

impl Snapshot {
    /// Parse `path` as a YAML snapshot.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or the policy sets `max_daily_hours` to zero.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading scheduling snapshot from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open snapshot file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))
    }

    /// Parse a YAML snapshot held in memory.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_yaml::from_str(content)?;

        if file.policy.max_daily_hours == 0 {
            bail!("policy.max_daily_hours must be at least 1");
        }

        let input = file.input;
        info!(
            teachers = input.teachers.len(),
            subjects = input.subjects.len(),
            rooms = input.rooms.len(),
            batches = input.batches.len(),
            timeslots = input.timeslots.len(),
            assignments = input.assignments.len(),
            "Snapshot loaded"
        );
        debug!(policy = ?file.policy, "Scheduler policy");

        Ok(Self {
            input,
            policy: file.policy,
        })
    }

    /// Run [`ScheduleInput::validate`] and log every problem as a warning.
    ///
    /// Returns the number of problems found.
    pub fn report_problems(&self) -> usize {
        let problems = self.input.validate();
        for p in &problems {
            warn!("snapshot: {}", p);
        }
        problems.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Weekday;
    use crate::model::{RoomKind, SubjectKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const EXAMPLE: &str = r#"
teachers:
  - { id: t1, name: "Ada Lovelace" }
subjects:
  - { id: s1, name: "Mathematics", code: MA101, hours_per_week: 3, type: Lecture }
  - { id: s2, name: "Physics Lab", code: PH102, hours_per_week: 2, type: Lab }
rooms:
  - { id: r1, number: "101", type: LectureHall }
  - { id: r2, number: "L1", type: Lab }
batches:
  - { id: b1, name: "CS-A" }
timeslots:
  - { id: ts1, day: Monday, start_time: "09:00", end_time: "10:00" }
  - { id: ts2, day: Monday, start_time: "10:00", end_time: "10:15", is_break: true }
assignments:
  - { teacher_id: t1, subject_id: s1 }
"#;

    // ── SchedulerPolicy ───────────────────────────────────────────────────────

    #[test]
    fn default_policy_has_expected_values() {
        let p = SchedulerPolicy::default();
        assert_eq!(p.max_daily_hours, 6);
        assert_eq!(p.max_consecutive_slots, 3);
        assert_eq!(p.odd_lab_hours, OddLabHours::RoundUp);
    }

    #[test]
    fn lab_blocks_needed_follows_odd_hours_policy() {
        let up = SchedulerPolicy::default();
        assert_eq!(up.lab_blocks_needed(2), 1);
        assert_eq!(up.lab_blocks_needed(3), 2);
        assert_eq!(up.lab_blocks_needed(0), 0);

        let down = SchedulerPolicy {
            odd_lab_hours: OddLabHours::RoundDown,
            ..Default::default()
        };
        assert_eq!(down.lab_blocks_needed(3), 1);
        assert_eq!(down.lab_blocks_needed(1), 0);
    }

    #[test]
    fn daily_cap_allows_reaching_but_not_passing_limit() {
        let p = SchedulerPolicy::default();
        assert!(!p.exceeds_daily_cap(4, 2));
        assert!(p.exceeds_daily_cap(5, 2));
        assert!(p.exceeds_daily_cap(6, 1));
    }

    #[test]
    fn zero_consecutive_limit_disables_break_check() {
        let p = SchedulerPolicy {
            max_consecutive_slots: 0,
            ..Default::default()
        };
        assert!(!p.needs_break(10));
        assert!(SchedulerPolicy::default().needs_break(3));
        assert!(!SchedulerPolicy::default().needs_break(2));
    }

    // ── Snapshot: load_from_file ──────────────────────────────────────────────

    #[test]
    fn load_example_yaml() {
        let f = yaml_tempfile(EXAMPLE);
        let snap = Snapshot::load_from_file(f.path()).unwrap();
        let input = &snap.input;

        assert_eq!(input.teachers.len(), 1);
        assert_eq!(input.subjects[1].kind, SubjectKind::Lab);
        assert_eq!(input.subjects[0].hours_per_week, 3);
        assert_eq!(input.rooms[1].kind, RoomKind::Lab);
        assert_eq!(input.timeslots[0].day, Weekday::Monday);
        assert!(!input.timeslots[0].is_break, "is_break defaults to false");
        assert!(input.timeslots[1].is_break);
        assert_eq!(input.assignments[0].teacher_id, "t1");
        assert_eq!(snap.policy, SchedulerPolicy::default());
    }

    #[test]
    fn partial_policy_keeps_other_defaults() {
        let yaml = "policy:\n  max_daily_hours: 4\n  odd_lab_hours: round_down\n";
        let snap = Snapshot::from_yaml_str(yaml).unwrap();
        assert_eq!(snap.policy.max_daily_hours, 4);
        assert_eq!(snap.policy.max_consecutive_slots, 3);
        assert_eq!(snap.policy.odd_lab_hours, OddLabHours::RoundDown);
        assert!(snap.input.batches.is_empty(), "missing sections default to empty");
    }

    #[test]
    fn zero_daily_hours_is_rejected() {
        let err = Snapshot::from_yaml_str("policy:\n  max_daily_hours: 0\n").unwrap_err();
        assert!(err.to_string().contains("max_daily_hours"));
    }

    #[test]
    fn missing_file_returns_error() {
        let result = Snapshot::load_from_file(Path::new("/nonexistent/path/snapshot.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(Snapshot::load_from_file(f.path()).is_err());
    }

    #[test]
    fn subject_without_hours_is_rejected() {
        let yaml = "subjects:\n  - { id: s1, name: Maths }\n";
        assert!(Snapshot::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn unknown_subject_type_loads_as_lecture() {
        let yaml = "subjects:\n  - { id: s1, name: Seminar, hours_per_week: 1, type: Tutorial }\n";
        let snap = Snapshot::from_yaml_str(yaml).unwrap();
        assert_eq!(snap.input.subjects[0].kind, SubjectKind::Lecture);
    }

    #[test]
    fn demo_snapshot_is_clean() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/school.yaml");
        let snap = Snapshot::load_from_file(&path).unwrap();
        assert_eq!(snap.report_problems(), 0);
        assert_eq!(snap.input.batches.len(), 2);
        assert_eq!(snap.input.timeslots.iter().filter(|t| t.is_break).count(), 3);
    }

    #[test]
    fn report_problems_counts_validation_findings() {
        let snap = Snapshot::from_yaml_str(EXAMPLE).unwrap();
        assert_eq!(snap.report_problems(), 0);
        assert_eq!(Snapshot::default().report_problems(), 6);
    }
}
