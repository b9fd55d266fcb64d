use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How strictly ISO-8601 timestamp strings are accepted
///
/// A schema instance uses exactly one strictness for both `createdAt` and
/// `updatedAt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStrictness {
    /// Any string a common date-time parser accepts
    #[default]
    Tolerant,
    /// Only the canonical `YYYY-MM-DDTHH:MM:SS.sssZ` rendering
    Strict,
}

/// Naive layouts accepted in tolerant mode, interpreted as UTC
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Render an instant in the canonical millisecond-precision UTC form
pub fn canonical(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_tolerant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_strict(raw: &str) -> Option<DateTime<Utc>> {
    let instant = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    (canonical(instant) == raw).then_some(instant)
}

/// An ISO-8601 timestamp as supplied by the caller, plus its parsed instant
///
/// The raw string is preserved exactly so that validating an already-valid
/// entity never rewrites its timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parse a timestamp string under the given strictness
    ///
    /// Returns `None` when the string is not an acceptable date-time.
    pub fn parse(raw: &str, strictness: TimestampStrictness) -> Option<Self> {
        let instant = match strictness {
            TimestampStrictness::Tolerant => parse_tolerant(raw)?,
            TimestampStrictness::Strict => parse_strict(raw)?,
        };
        Some(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    /// Build a timestamp in canonical form from an instant
    ///
    /// Sub-millisecond precision is dropped so that the stored instant is
    /// exactly what re-parsing the canonical string yields.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        let instant = instant.trunc_subsecs(3);
        Self {
            raw: canonical(instant),
            instant,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw, TimestampStrictness::Tolerant).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid ISO-8601 date-time: {:?}", raw))
        })
    }
}
