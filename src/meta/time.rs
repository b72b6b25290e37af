use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::Error;

/// Seconds between `0001-01-01T00:00:00Z` and the unix epoch.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// `0001-01-01T00:00:00Z`, checked at compile time.
const ZERO: DateTime<Utc> = match DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0) {
    Some(zero) => zero,
    None => panic!("zero time out of range"),
};

/// A timestamp with a distinguished zero value, `0001-01-01T00:00:00Z`.
///
/// Serializes as an RFC 3339 string with second precision; the zero value
/// serializes as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Utc>);

impl Time {
    #[must_use]
    pub fn new(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Builds a UTC time, `None` when the fields are out of range.
    #[must_use]
    pub fn date(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.timestamp() == ZERO_UNIX_SECONDS && self.0.timestamp_subsec_nanos() == 0
    }

    /// Parses the query parameter form: empty or `null` is the zero time,
    /// anything else must be RFC 3339.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `value` is neither empty, `null` nor RFC 3339.
    pub fn parse_query_parameter(value: &str) -> crate::Result<Self> {
        if value.is_empty() || value == "null" {
            return Ok(Self::default());
        }

        DateTime::parse_from_rfc3339(value)
            .map(|parsed| Self(parsed.with_timezone(&Utc)))
            .map_err(|e| Error::Parse {
                type_name: "Time",
                value: value.to_string(),
                reason: e.to_string(),
                field: None,
            })
    }

    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self(ZERO)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl serde::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.is_zero() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.to_rfc3339())
        }
    }
}

impl<'de> serde::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => Self::parse_query_parameter(&value).map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn default_is_zero() {
        // arrange
        let time = Time::default();

        // assert
        assert!(time.is_zero());
        assert_eq!("0001-01-01T00:00:00Z", time.to_rfc3339());
        assert!(!Time::date(1998, 5, 5, 5, 5, 5).unwrap().is_zero());
    }

    #[test]
    fn parse_query_parameter() {
        // act
        let time = Time::parse_query_parameter("1998-05-05T05:05:05Z").unwrap();
        let offset = Time::parse_query_parameter("1998-05-05T07:05:05+02:00").unwrap();

        // assert
        assert_eq!(Time::date(1998, 5, 5, 5, 5, 5).unwrap(), time);
        assert_eq!(time, offset);
        assert!(Time::parse_query_parameter("").unwrap().is_zero());
        assert!(Time::parse_query_parameter("null").unwrap().is_zero());
    }

    #[test]
    fn parse_query_parameter_rejects_garbage() {
        // act
        let error = Time::parse_query_parameter("yesterday").unwrap_err();

        // assert
        assert!(matches!(
            error,
            crate::Error::Parse {
                type_name: "Time",
                ..
            }
        ));
    }

    #[test]
    fn json() {
        // arrange
        let time = Time::date(2000, 6, 6, 6, 6, 6).unwrap();

        // act
        let json = serde_json::to_string(&time).unwrap();
        let zero = serde_json::to_string(&Time::default()).unwrap();

        // assert
        assert_eq!("\"2000-06-06T06:06:06Z\"", json);
        assert_eq!("null", zero);
        assert_eq!(time, serde_json::from_str::<Time>(&json).unwrap());
        assert!(serde_json::from_str::<Time>(&zero).unwrap().is_zero());
    }
}
