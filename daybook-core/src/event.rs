//! A single timed calendar event.
//!
//! Events carry their date and times in the same fixed-width text form used by
//! the events file (`MM/DD/YYYY`, `HH:MM`). Construction never validates; the
//! store validates at creation time so malformed values never get stored.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DaybookError, DaybookResult};

/// Date key format, e.g. `03/10/2024`.
pub const DATE_KEY_FORMAT: &str = "%m/%d/%Y";

/// A time of day encoded as `HH * 100 + MM`.
///
/// This is the digits of `HH:MM` read as one number, not minutes since
/// midnight. Ordering is only correct while minutes stay within 00-59,
/// which [`validate_time`] guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeValue(pub u32);

impl TimeValue {
    /// Parse an `HH:MM` string by dropping the separator.
    pub fn parse(s: &str) -> DaybookResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(DaybookError::format(s, "expected HH:MM"));
        }

        let mut value = 0u32;
        for &b in bytes[..2].iter().chain(&bytes[3..]) {
            if !b.is_ascii_digit() {
                return Err(DaybookError::format(s, "expected HH:MM"));
            }
            value = value * 10 + u32::from(b - b'0');
        }

        Ok(TimeValue(value))
    }

    pub fn hour(self) -> u32 {
        self.0 / 100
    }

    pub fn minute(self) -> u32 {
        self.0 % 100
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A calendar event (title, date, start and end time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    /// Date in `MM/DD/YYYY` form
    pub date: String,
    /// Start time in `HH:MM` form
    pub start_time: String,
    /// End time in `HH:MM` form
    pub end_time: String,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Event {
            title: title.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn start_value(&self) -> DaybookResult<TimeValue> {
        TimeValue::parse(&self.start_time)
    }

    pub fn end_value(&self) -> DaybookResult<TimeValue> {
        TimeValue::parse(&self.end_time)
    }

    /// The canonical single-line form, also the on-disk format.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_start_time(&mut self, start_time: impl Into<String>) {
        self.start_time = start_time.into();
    }

    pub fn set_end_time(&mut self, end_time: impl Into<String>) {
        self.end_time = end_time.into();
    }

    /// Check the title, the date, both times and that the event does not end
    /// before it starts.
    ///
    /// Returns the parsed `(start, end)` values on success.
    pub fn validate(&self) -> DaybookResult<(TimeValue, TimeValue)> {
        if self.title.contains(['\n', '\r']) {
            return Err(DaybookError::format(&self.title, "title must be a single line"));
        }
        validate_date_key(&self.date)?;
        let start = validate_time(&self.start_time)?;
        let end = validate_time(&self.end_time)?;

        if start > end {
            return Err(DaybookError::InvalidRange {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok((start, end))
    }

    /// Closed-interval overlap: touching endpoints count as overlapping.
    pub fn overlaps(&self, other: &Event) -> DaybookResult<bool> {
        let (start, end) = (self.start_value()?, self.end_value()?);
        let (other_start, other_end) = (other.start_value()?, other.end_value()?);
        Ok(start <= other_end && other_start <= end)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.date, self.start_time, self.end_time, self.title
        )
    }
}

/// Validate a 24-hour `HH:MM` time with minutes in 00-59.
pub fn validate_time(s: &str) -> DaybookResult<TimeValue> {
    let value = TimeValue::parse(s)?;

    if value.hour() > 23 {
        return Err(DaybookError::format(s, "hour must be 00-23"));
    }
    if value.minute() > 59 {
        return Err(DaybookError::format(s, "minute must be 00-59"));
    }

    Ok(value)
}

/// Validate an `MM/DD/YYYY` date key and return the calendar date it names.
pub fn validate_date_key(s: &str) -> DaybookResult<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());

    if !shape_ok {
        return Err(DaybookError::format(s, "expected MM/DD/YYYY"));
    }

    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
        .map_err(|_| DaybookError::format(s, "not a calendar date"))
}

/// Render a calendar date as a date key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Event {
        Event::new("Lunch", "03/10/2024", "12:00", "13:00")
    }

    #[test]
    fn time_value_drops_separator() {
        assert_eq!(TimeValue::parse("10:30").unwrap(), TimeValue(1030));
        assert_eq!(TimeValue::parse("00:00").unwrap(), TimeValue(0));
        assert_eq!(TimeValue::parse("23:59").unwrap(), TimeValue(2359));
    }

    #[test]
    fn time_value_is_not_minutes_since_midnight() {
        // 10:60 is not a valid time, but parses to 1060 rather than 660
        assert_eq!(TimeValue::parse("10:60").unwrap(), TimeValue(1060));
        assert!(TimeValue::parse("10:60").unwrap() < TimeValue::parse("11:00").unwrap());
    }

    #[test]
    fn time_value_rejects_bad_shapes() {
        for bad in ["1030", "1:30", "10:3", "10-30", "ab:cd", "10:30 ", "", "+1:30"] {
            assert!(
                matches!(TimeValue::parse(bad), Err(DaybookError::Format { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn validate_time_bounds() {
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("10:60").is_err());
    }

    #[test]
    fn validate_date_key_accepts_real_dates() {
        let date = validate_date_key("02/29/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn validate_date_key_rejects_bad_dates() {
        for bad in ["2/29/2024", "02/30/2024", "13/01/2024", "2024-03-10", "03/10/24", "03-10-2024"] {
            assert!(validate_date_key(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn render_matches_wire_format() {
        assert_eq!(lunch().render(), "03/10/2024 12:00 - 13:00 Lunch");
    }

    #[test]
    fn setters_replace_fields() {
        let mut event = lunch();
        event.set_title("Brunch");
        event.set_start_time("11:00");
        event.set_end_time("11:45");
        event.set_date("03/11/2024");
        assert_eq!(event.render(), "03/11/2024 11:00 - 11:45 Brunch");
    }

    #[test]
    fn validate_rejects_reversed_range() {
        let event = Event::new("Backwards", "03/10/2024", "14:00", "13:00");
        assert!(matches!(
            event.validate(),
            Err(DaybookError::InvalidRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_multi_line_titles() {
        for title in ["Lunch\nwith Sam", "Lunch\r", "\r\n"] {
            let event = Event::new(title, "03/10/2024", "12:00", "13:00");
            assert!(
                matches!(event.validate(), Err(DaybookError::Format { .. })),
                "{title:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_allows_zero_length_event() {
        let event = Event::new("Ping", "03/10/2024", "09:00", "09:00");
        assert_eq!(event.validate().unwrap(), (TimeValue(900), TimeValue(900)));
    }

    #[test]
    fn overlap_is_closed_interval() {
        let gym = Event::new("Gym", "03/10/2024", "13:00", "14:00");
        let tea = Event::new("Tea", "03/10/2024", "13:01", "14:00");
        let call = Event::new("Call", "03/10/2024", "11:00", "11:59");

        assert!(lunch().overlaps(&gym).unwrap());
        assert!(gym.overlaps(&lunch()).unwrap());
        assert!(!lunch().overlaps(&tea).unwrap());
        assert!(!lunch().overlaps(&call).unwrap());
    }
}
