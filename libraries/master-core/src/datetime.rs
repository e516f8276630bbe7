//! TOML date/time literal wrapper.
//!
//! Playlists are stored on the master node as TOML files and travel over the
//! API as JSON, where the TOML serializer marks every date/time value as
//! `{"$__toml_private_datetime": "<literal>"}`. [`TomlDateTime`] keeps that
//! literal text verbatim so that values the operator never touched are sent
//! back byte-for-byte. Only values built through the `from_*` constructors
//! are formatted by this crate.

use crate::validation::{Result, ValidationError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// JSON field name the TOML serializer uses for date/time values.
pub const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

const TIME_FORMAT: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A TOML date/time literal carried as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LiteralRepr")]
pub struct TomlDateTime {
    #[serde(rename = "$__toml_private_datetime")]
    literal: String,
}

/// Accepted wire shapes. The tagged object is what the server sends; a bare
/// string is tolerated for hand-written documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum LiteralRepr {
    Tagged {
        #[serde(rename = "$__toml_private_datetime")]
        literal: String,
    },
    Bare(String),
}

impl From<LiteralRepr> for TomlDateTime {
    fn from(repr: LiteralRepr) -> Self {
        match repr {
            LiteralRepr::Tagged { literal } | LiteralRepr::Bare(literal) => Self { literal },
        }
    }
}

impl TomlDateTime {
    /// Wrap an existing literal without interpreting it.
    pub fn from_literal(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// Build an edited time-of-day value (`HH:MM:SS`).
    pub fn from_time(time: NaiveTime) -> Self {
        Self::from_literal(time.format(TIME_FORMAT).to_string())
    }

    /// Build an edited calendar date value (`YYYY-MM-DD`).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_literal(date.format(DATE_FORMAT).to_string())
    }

    /// Build an edited local date-time value (`YYYY-MM-DDTHH:MM:SS`).
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::from_literal(datetime.format(DATETIME_FORMAT).to_string())
    }

    /// The literal exactly as received or built.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Interpret the literal using the TOML datetime grammar.
    pub fn value(&self) -> Result<Stamp> {
        let invalid = || ValidationError::InvalidDateTime {
            literal: self.literal.clone(),
        };

        let parsed: toml::value::Datetime = self.literal.trim().parse().map_err(|_| invalid())?;

        let date = match parsed.date {
            Some(d) => Some(
                NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
                    .ok_or_else(invalid)?,
            ),
            None => None,
        };
        let time = match parsed.time {
            Some(t) => Some(
                NaiveTime::from_hms_nano_opt(
                    u32::from(t.hour),
                    u32::from(t.minute),
                    u32::from(t.second),
                    t.nanosecond,
                )
                .ok_or_else(invalid)?,
            ),
            None => None,
        };

        match (date, time, parsed.offset.is_some()) {
            (Some(date), None, _) => Ok(Stamp::Date(date)),
            (None, Some(time), _) => Ok(Stamp::Time(time)),
            (Some(date), Some(time), false) => Ok(Stamp::LocalDateTime(date.and_time(time))),
            (Some(_), Some(_), true) => {
                // RFC 3339 requires the `T` separator, TOML also allows a space
                let normalized = self.literal.trim().replacen(' ', "T", 1);
                DateTime::parse_from_rfc3339(&normalized)
                    .map(Stamp::OffsetDateTime)
                    .map_err(|_| invalid())
            }
            (None, None, _) => Err(invalid()),
        }
    }
}

impl fmt::Display for TomlDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl From<NaiveTime> for TomlDateTime {
    fn from(time: NaiveTime) -> Self {
        Self::from_time(time)
    }
}

impl From<NaiveDate> for TomlDateTime {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// Interpreted value of a [`TomlDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    Date(NaiveDate),
    Time(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
}

/// Which of the four TOML date/time forms a literal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    Date,
    Time,
    LocalDateTime,
    OffsetDateTime,
}

impl fmt::Display for StampKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StampKind::Date => "date",
            StampKind::Time => "time of day",
            StampKind::LocalDateTime => "local date-time",
            StampKind::OffsetDateTime => "offset date-time",
        })
    }
}

impl Stamp {
    pub fn kind(&self) -> StampKind {
        match self {
            Stamp::Date(_) => StampKind::Date,
            Stamp::Time(_) => StampKind::Time,
            Stamp::LocalDateTime(_) => StampKind::LocalDateTime,
            Stamp::OffsetDateTime(_) => StampKind::OffsetDateTime,
        }
    }

    /// Order two stamps of the same kind; `None` when the kinds differ.
    pub fn compare(&self, other: &Stamp) -> Option<Ordering> {
        match (self, other) {
            (Stamp::Date(a), Stamp::Date(b)) => Some(a.cmp(b)),
            (Stamp::Time(a), Stamp::Time(b)) => Some(a.cmp(b)),
            (Stamp::LocalDateTime(a), Stamp::LocalDateTime(b)) => Some(a.cmp(b)),
            (Stamp::OffsetDateTime(a), Stamp::OffsetDateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Check that both bounds are `expected` literals and `start <= end`.
pub(crate) fn check_range(
    context: &str,
    expected: StampKind,
    start: &TomlDateTime,
    end: &TomlDateTime,
) -> Result<()> {
    let a = start.value_of(context, expected)?;
    let b = end.value_of(context, expected)?;
    if a.compare(&b) == Some(Ordering::Greater) {
        return Err(ValidationError::InvertedRange {
            context: context.to_string(),
            start: start.literal.clone(),
            end: end.literal.clone(),
        });
    }
    Ok(())
}

impl TomlDateTime {
    fn value_of(&self, context: &str, expected: StampKind) -> Result<Stamp> {
        let stamp = self.value()?;
        if stamp.kind() != expected {
            return Err(ValidationError::UnexpectedKind {
                context: context.to_string(),
                literal: self.literal.clone(),
                expected,
            });
        }
        Ok(stamp)
    }
}
