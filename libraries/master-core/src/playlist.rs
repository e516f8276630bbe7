//! Playlist schedule document.
//!
//! A playlist describes when the node is on air (working hours), what music
//! it rotates through, which jingles and adverts it inserts and where time
//! announcements live. Every section is optional and independently edited;
//! absent sections are omitted from the JSON sent back to the server.

use crate::datetime::{check_range, StampKind, TomlDateTime};
use crate::validation::{Result, ValidationError};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of weekday entries in a working hours schedule.
pub const DAYS_PER_WEEK: usize = 7;

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root document for one named schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<Music>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertizement: Option<Advertizement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_announcement: Option<TimeAnnouncement>,
}

impl Playlist {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check every section. Stops at the first problem found.
    pub fn validate(&self) -> Result<()> {
        if let Some(working_hours) = &self.working_hours {
            working_hours.validate()?;
        }
        if let Some(music) = &self.music {
            music.validate()?;
        }
        if let Some(advertizement) = &self.advertizement {
            advertizement.validate()?;
        }
        Ok(())
    }
}

/// Opening and closing time for one day.
///
/// A day that never opens has equal open and close times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursRange(pub TomlDateTime, pub TomlDateTime);

impl WorkingHoursRange {
    pub fn new(open: impl Into<TomlDateTime>, close: impl Into<TomlDateTime>) -> Self {
        Self(open.into(), close.into())
    }

    /// Closed all day (`00:00:00` to `00:00:00`).
    pub fn closed() -> Self {
        Self(
            TomlDateTime::from_literal("00:00:00"),
            TomlDateTime::from_literal("00:00:00"),
        )
    }

    pub fn open(&self) -> &TomlDateTime {
        &self.0
    }

    pub fn close(&self) -> &TomlDateTime {
        &self.1
    }

    /// Whether the node is on air at all during this range.
    pub fn is_closed(&self) -> bool {
        match (self.0.value(), self.1.value()) {
            (Ok(open), Ok(close)) => open.compare(&close) == Some(Ordering::Equal),
            _ => self.0 == self.1,
        }
    }
}

impl Default for WorkingHoursRange {
    fn default() -> Self {
        Self::closed()
    }
}

/// Weekly opening hours plus per-date overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Monday first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: [WorkingHoursRange; DAYS_PER_WEEK],

    /// ISO date (`YYYY-MM-DD`) to override range.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exceptions: BTreeMap<String, WorkingHoursRange>,
}

impl WorkingHours {
    pub fn for_weekday(&self, weekday: Weekday) -> &WorkingHoursRange {
        &self.schedule[weekday.num_days_from_monday() as usize]
    }

    pub fn set_weekday(&mut self, weekday: Weekday, range: WorkingHoursRange) {
        self.schedule[weekday.num_days_from_monday() as usize] = range;
    }

    /// Hours in effect on `date`: an exception wins over the weekday entry.
    pub fn hours_for(&self, date: NaiveDate) -> &WorkingHoursRange {
        self.exceptions
            .iter()
            .find(|(key, _)| parse_exception_key(key) == Some(date))
            .map(|(_, range)| range)
            .unwrap_or_else(|| self.for_weekday(date.weekday()))
    }

    pub fn add_exception(&mut self, date: NaiveDate, range: WorkingHoursRange) {
        self.exceptions
            .insert(date.format("%Y-%m-%d").to_string(), range);
    }

    pub fn validate(&self) -> Result<()> {
        for (range, day) in self.schedule.iter().zip(WEEKDAY_NAMES) {
            check_range(
                &format!("working hours, {day}"),
                StampKind::Time,
                &range.0,
                &range.1,
            )?;
        }

        for (key, range) in &self.exceptions {
            if parse_exception_key(key).is_none() {
                return Err(ValidationError::InvalidExceptionDate { key: key.clone() });
            }
            check_range(
                &format!("working hours exception {key}"),
                StampKind::Time,
                &range.0,
                &range.1,
            )?;
        }

        Ok(())
    }
}

fn parse_exception_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// One rotation window: play from `dirs` between `start` and `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicWindow(pub TomlDateTime, pub TomlDateTime, pub Vec<String>);

impl MusicWindow {
    pub fn new(
        start: impl Into<TomlDateTime>,
        end: impl Into<TomlDateTime>,
        dirs: Vec<String>,
    ) -> Self {
        Self(start.into(), end.into(), dirs)
    }

    pub fn start(&self) -> &TomlDateTime {
        &self.0
    }

    pub fn end(&self) -> &TomlDateTime {
        &self.1
    }

    pub fn dirs(&self) -> &[String] {
        &self.2
    }
}

/// Music rotation section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    #[serde(default, deserialize_with = "null_as_default")]
    pub shuffle: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: Vec<MusicWindow>,
}

impl Music {
    pub fn validate(&self) -> Result<()> {
        for (index, window) in self.schedule.iter().enumerate() {
            check_range(
                &format!("music window {index}"),
                StampKind::Date,
                &window.0,
                &window.1,
            )?;
        }
        Ok(())
    }

    /// Index pairs of windows whose ranges intersect.
    ///
    /// Overlaps are allowed; the node decides what plays. Windows whose
    /// bounds cannot be interpreted are skipped.
    pub fn overlapping_windows(&self) -> Vec<(usize, usize)> {
        let bounds: Vec<_> = self
            .schedule
            .iter()
            .map(|w| w.0.value().ok().zip(w.1.value().ok()))
            .collect();

        let mut pairs = Vec::new();
        for (i, a) in bounds.iter().enumerate() {
            let Some((a_start, a_end)) = a else { continue };
            for (j, b) in bounds.iter().enumerate().skip(i + 1) {
                let Some((b_start, b_end)) = b else { continue };
                let a_before_b_ends = a_start.compare(b_end).is_some_and(Ordering::is_le);
                let b_before_a_ends = b_start.compare(a_end).is_some_and(Ordering::is_le);
                if a_before_b_ends && b_before_a_ends {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

/// Jingle and advert insertion section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertizement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_jingle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_jingle: Option<String>,

    /// Time of day to adverts played at that slot, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<BTreeMap<String, Vec<String>>>,
}

impl Advertizement {
    pub fn validate(&self) -> Result<()> {
        let is_set = |jingle: &Option<String>| jingle.as_deref().is_some_and(|s| !s.trim().is_empty());
        if is_set(&self.start_jingle) != is_set(&self.end_jingle) {
            return Err(ValidationError::IncompleteJingles);
        }

        for key in self.schedule.iter().flat_map(BTreeMap::keys) {
            let trimmed = key.trim();
            let valid = NaiveTime::parse_from_str(trimmed, "%H:%M:%S").is_ok()
                || NaiveTime::parse_from_str(trimmed, "%H:%M").is_ok();
            if !valid {
                return Err(ValidationError::InvalidAdSlot { key: key.clone() });
            }
        }

        Ok(())
    }
}

/// Spoken time announcements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAnnouncement {
    /// Media folder holding the announcement clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}
