use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, time};
use time::{Date, PrimitiveDateTime};

use crate::ValidationError;

const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Timezone-naive timestamp with second precision.
///
/// Stored records carry no offset, so this wraps [`PrimitiveDateTime`]
/// rather than an offset-aware type. The wire format is
/// `yyyy-MM-dd HH:mm:ss` in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        PrimitiveDateTime::parse(input, DATETIME_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    /// Parse a `yyyy-MM-dd` calendar date as submitted by callers.
    pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
        Date::parse(input, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
            value: input.to_owned(),
        })
    }

    /// The inclusive lower bound a calendar date stands for: 00:00:00.
    #[must_use]
    pub fn start_of_day(date: Date) -> Self {
        Self(date.midnight())
    }

    /// The inclusive upper bound a calendar date stands for: 23:59:59.
    #[must_use]
    pub fn end_of_day(date: Date) -> Self {
        Self(date.with_time(time!(23:59:59)))
    }

    #[must_use]
    pub fn into_inner(self) -> PrimitiveDateTime {
        self.0
    }

    #[must_use]
    pub fn format(self) -> String {
        self.0
            .format(DATETIME_FORMAT)
            .expect("timestamp must be formattable")
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_round_trip() {
        let parsed = Timestamp::parse("2018-06-01 15:30:45").expect("must parse");
        assert_eq!(parsed.format(), "2018-06-01 15:30:45");
    }

    #[test]
    fn rejects_offset_suffix() {
        let err = Timestamp::parse("2018-06-01T15:30:45Z").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn calendar_date_expands_to_day_bounds() {
        let date = Timestamp::parse_date("2018-06-01").expect("must parse");
        assert_eq!(
            Timestamp::start_of_day(date).format(),
            "2018-06-01 00:00:00"
        );
        assert_eq!(Timestamp::end_of_day(date).format(), "2018-06-01 23:59:59");
    }

    #[test]
    fn rejects_malformed_date() {
        let err = Timestamp::parse_date("06/01/2018").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }
}
