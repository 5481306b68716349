//! Wire formats shared by response bodies.

/// `yyyy-MM-dd HH:mm:ss`, local wall-clock time without offset.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter for `chrono::NaiveDateTime` fields in [`DATE_TIME_FORMAT`].
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Body {
///     #[serde(with = "axum_helpers::formats::date_time")]
///     timestamp: NaiveDateTime,
/// }
/// ```
pub mod date_time {
    use super::DATE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_TIME_FORMAT).map_err(D::Error::custom)
    }
}
