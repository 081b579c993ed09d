use std::fmt::{self, Display, Formatter};

use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// A `<weekday> <date> <time>` literal from a lease statement.
///
/// The literal is written in UTC. The local value is derived once, at
/// construction, by applying a fixed offset; there is no DST handling.
/// Only the weekday and local fields are serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeValue {
    weekday: u8,
    utc: NaiveDateTime,
    local: NaiveDateTime,
}

impl DateTimeValue {
    /// Build a value from a UTC timestamp, deriving local time from `offset`.
    ///
    /// Returns `None` if the weekday is outside `0..=6` or the shifted time
    /// leaves chrono's supported range.
    pub fn new(weekday: u8, utc: NaiveDateTime, offset: FixedOffset) -> Option<Self> {
        if weekday > 6 {
            return None;
        }
        let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
        let local = utc.checked_add_signed(shift)?;
        Some(Self {
            weekday,
            utc,
            local,
        })
    }

    /// Parse the three atoms of a date literal, e.g. `3`, `2015/01/02`, `10:00:00`.
    pub fn from_parts(
        weekday: &str,
        date: &str,
        time: &str,
        offset: FixedOffset,
    ) -> Option<Self> {
        let weekday = parse_weekday(weekday)?;
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        Self::new(weekday, NaiveDateTime::new(date, time), offset)
    }

    /// Day of week, 0 = Sunday.
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// The timestamp exactly as written in the lease file.
    pub fn utc(&self) -> NaiveDateTime {
        self.utc
    }

    /// Local date as `YYYY/MM/DD`.
    pub fn local_date(&self) -> String {
        self.local.format(DATE_FORMAT).to_string()
    }

    /// Local time as `HH:MM:SS`.
    pub fn local_time(&self) -> String {
        self.local.format(TIME_FORMAT).to_string()
    }

    /// `(local_date, local_time)`.
    pub fn local_pair(&self) -> (String, String) {
        (self.local_date(), self.local_time())
    }
}

impl Display for DateTimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.weekday,
            self.local.format(DATE_FORMAT),
            self.local.format(TIME_FORMAT)
        )
    }
}

impl Serialize for DateTimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DateTimeValue", 3)?;
        state.serialize_field("weekday", &self.weekday)?;
        state.serialize_field("local_date", &self.local_date())?;
        state.serialize_field("local_time", &self.local_time())?;
        state.end()
    }
}

fn parse_weekday(atom: &str) -> Option<u8> {
    match atom.as_bytes() {
        [digit @ b'0'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

fn parse_date(atom: &str) -> Option<NaiveDate> {
    let mut parts = atom.split('/');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || !is_digits(month, 2) || !is_digits(day, 2) {
        return None;
    }
    let year = if is_digits(year, 4) {
        year.parse().ok()?
    } else if is_digits(year, 2) {
        expand_short_year(year.parse().ok()?)
    } else {
        return None;
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// POSIX `%y`: 69-99 are 19xx, 00-68 are 20xx.
fn expand_short_year(yy: i32) -> i32 {
    if yy >= 69 {
        1900 + yy
    } else {
        2000 + yy
    }
}

fn parse_time(atom: &str) -> Option<NaiveTime> {
    let mut parts = atom.split(':');
    let (h, m, s) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || ![h, m, s].iter().all(|part| is_digits(part, 2)) {
        return None;
    }
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, s.parse().ok()?)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
