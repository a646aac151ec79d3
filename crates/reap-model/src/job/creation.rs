use std::fmt;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{ModelError, ModelResult};

/// Parsed job creation instant.
///
/// The control plane emits `YYYY-MM-DD HH:MM:SS` with no offset; the value is always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CreationTime(OffsetDateTime);

impl CreationTime {
    /// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
    ///
    /// The value is split on the single space, the date on `-` and the clock on `:`.
    /// Each part must have exactly three purely numeric fields forming a valid calendar
    /// date and time of day.
    ///
    /// # Examples
    /// ```
    /// use reap_model::CreationTime;
    ///
    /// let t = CreationTime::parse("2020-01-29 20:48:36").unwrap();
    /// assert_eq!(t.instant().unix_timestamp(), 1_580_330_916);
    /// assert!(CreationTime::parse("2020-01-29T20:48:36").is_err());
    /// ```
    pub fn parse(raw: &str) -> ModelResult<Self> {
        let invalid = |reason: &str| ModelError::InvalidCreationTime {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut halves = raw.split(' ');
        let (Some(date), Some(clock), None) = (halves.next(), halves.next(), halves.next()) else {
            return Err(invalid("expected '<date> <time>'"));
        };

        let [year, month, day] =
            split_three(date, '-').ok_or_else(|| invalid("date must be YYYY-MM-DD"))?;
        let [hour, minute, second] =
            split_three(clock, ':').ok_or_else(|| invalid("time must be HH:MM:SS"))?;

        let year: i32 = number(year).ok_or_else(|| invalid("year is not a number"))?;
        let month: u8 = number(month).ok_or_else(|| invalid("month is not a number"))?;
        let day: u8 = number(day).ok_or_else(|| invalid("day is not a number"))?;
        let hour: u8 = number(hour).ok_or_else(|| invalid("hour is not a number"))?;
        let minute: u8 = number(minute).ok_or_else(|| invalid("minute is not a number"))?;
        let second: u8 = number(second).ok_or_else(|| invalid("second is not a number"))?;

        let month = Month::try_from(month).map_err(|e| invalid(&e.to_string()))?;
        let date = Date::from_calendar_date(year, month, day).map_err(|e| invalid(&e.to_string()))?;
        let time = Time::from_hms(hour, minute, second).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self(PrimitiveDateTime::new(date, time).assume_utc()))
    }

    /// Returns the creation instant.
    #[inline]
    pub fn instant(&self) -> OffsetDateTime {
        self.0
    }

    /// Whole minutes elapsed between creation and `now`, rounded down.
    ///
    /// Negative when `now` precedes the creation time.
    pub fn elapsed_minutes(&self, now: OffsetDateTime) -> i64 {
        (now - self.0).whole_seconds().div_euclid(60)
    }
}

impl From<OffsetDateTime> for CreationTime {
    fn from(t: OffsetDateTime) -> Self {
        Self(t)
    }
}

impl fmt::Display for CreationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            t.year(),
            u8::from(t.month()),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        )
    }
}

fn split_three(s: &str, sep: char) -> Option<[&str; 3]> {
    let mut it = s.split(sep);
    let out = [it.next()?, it.next()?, it.next()?];
    match it.next() {
        Some(_) => None,
        None => Some(out),
    }
}

fn number<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
