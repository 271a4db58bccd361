//! Date-time helpers shared by the domain and storage layers.
//!
//! All timestamps are UTC and kept at one-second granularity.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

/// Storage format for date-times (`2011-06-15 00:49:16`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format for daily times (`23:59:59`).
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Seconds in seven days, the default campaign run window.
pub const DEFAULT_CAMPAIGN_WINDOW_SECS: i64 = 86_400 * 7;

/// Current UTC time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    truncate_to_seconds(Utc::now().naive_utc())
}

/// Drop sub-second precision.
pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Convert epoch seconds (possibly fractional) to a UTC date-time.
///
/// Fractions are discarded. Returns `None` for values outside chrono's range.
#[allow(clippy::cast_possible_truncation)]
pub fn from_epoch_seconds(secs: f64) -> Option<NaiveDateTime> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.naive_utc())
}

/// Format a date-time for storage.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored date-time, tolerating an ISO `T` separator and fractions.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim().trim_end_matches(" UTC");
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Serde adapter writing date-times as `YYYY-MM-DD HH:MM:SS`.
pub mod serde_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid date-time: {raw}")))
    }
}

/// Optional variant of [`serde_datetime`].
pub mod serde_datetime_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_str(&super::format_datetime(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                super::parse_datetime(&raw)
                    .ok_or_else(|| D::Error::custom(format!("invalid date-time: {raw}")))
            })
            .transpose()
    }
}
