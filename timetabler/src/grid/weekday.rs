/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Weekday names and their ordering.
//!
//! Days arrive as free-form strings from the data-entry layer.  The seven
//! English weekday names rank Monday..Sunday; anything else is kept verbatim
//! in [`Weekday::Other`] and sorts after Sunday.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A day of the week as it appears on a timeslot.
///
/// The derived `Ord` follows declaration order, so `Monday < … < Sunday <
/// Other(_)`; two `Other` values compare by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Other(String),
}

impl Weekday {
    pub const WEEK: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Parse a weekday name.  Matching is exact (case-sensitive), as the
    /// data-entry layer only ever stores the capitalised English names.
    pub fn from_name(name: &str) -> Self {
        Self::WEEK
            .iter()
            .find(|d| d.name() == name)
            .cloned()
            .unwrap_or_else(|| Weekday::Other(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
            Weekday::Other(name) => name,
        }
    }
}

impl From<String> for Weekday {
    fn from(s: String) -> Self {
        Weekday::from_name(&s)
    }
}

impl From<Weekday> for String {
    fn from(d: Weekday) -> Self {
        d.name().to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
