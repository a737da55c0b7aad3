//! Read events from the fixed-width events file.
//!
//! Each line is `MM/DD/YYYY HH:MM - HH:MM Title`. Fields are cut at fixed
//! columns rather than split on whitespace:
//!
//! | field      | columns  |
//! |------------|----------|
//! | date       | [0, 10)  |
//! | start time | [11, 16) |
//! | end time   | [19, 24) |
//! | title      | [25, ..) |

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use super::{CreateOutcome, EventStore};
use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;

const MIN_LINE_LEN: usize = 25;

/// Counts from a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines stored as events
    pub loaded: usize,
    /// Well-formed lines dropped because they overlap an earlier event
    pub rejected: usize,
}

/// Slice one events-file line into an [`Event`].
///
/// Only the layout is checked here; date and time values are validated
/// when the event is created.
pub fn parse_line(line: &str) -> DaybookResult<Event> {
    if line.len() < MIN_LINE_LEN {
        return Err(DaybookError::format(
            line,
            format!("line is shorter than {MIN_LINE_LEN} characters"),
        ));
    }

    let column = |start: usize, end: usize| {
        line.get(start..end)
            .ok_or_else(|| DaybookError::format(line, format!("columns {start}-{end} are not text")))
    };

    let date = column(0, 10)?;
    let start_time = column(11, 16)?;
    let end_time = column(19, 24)?;

    if column(10, 11)? != " " || column(16, 19)? != " - " || column(24, 25)? != " " {
        return Err(DaybookError::format(
            line,
            "expected 'MM/DD/YYYY HH:MM - HH:MM Title'",
        ));
    }

    let title = line
        .get(MIN_LINE_LEN..)
        .ok_or_else(|| DaybookError::format(line, "title is not text"))?;

    Ok(Event::new(title, date, start_time, end_time))
}

impl EventStore {
    /// Load events from a file, see [`EventStore::load_from`].
    pub fn load(&mut self, path: &Path) -> DaybookResult<LoadReport> {
        let file = File::open(path)?;
        let report = self.load_from(BufReader::new(file))?;

        info!(
            path = %path.display(),
            loaded = report.loaded,
            rejected = report.rejected,
            "events loaded"
        );

        Ok(report)
    }

    /// Load events from line-oriented text.
    ///
    /// Every non-empty line is parsed and validated before anything is
    /// stored, so a malformed line leaves the store as it was. Lines that
    /// conflict with an earlier event are dropped, as `create` would.
    /// Observers are notified once after the events are committed.
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> DaybookResult<LoadReport> {
        let mut staged = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let event = parse_line(&line)
                .and_then(|event| event.validate().map(|_| event))
                .map_err(|source| DaybookError::Line {
                    line: index + 1,
                    source: Box::new(source),
                })?;
            staged.push(event);
        }

        let mut report = LoadReport::default();
        for event in staged {
            let date_key = event.date.clone();
            let rendered = event.render();

            match self.insert_checked(&date_key, event)? {
                CreateOutcome::Created => report.loaded += 1,
                CreateOutcome::Conflict => {
                    warn!(event = %rendered, "dropping conflicting event");
                    report.rejected += 1;
                }
            }
        }

        self.notify_all();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    #[test]
    fn parse_line_cuts_fixed_columns() {
        let event = parse_line("03/10/2024 12:00 - 13:00 Lunch").unwrap();
        assert_eq!(event, Event::new("Lunch", "03/10/2024", "12:00", "13:00"));
    }

    #[test]
    fn parse_line_keeps_title_spacing() {
        let event = parse_line("03/10/2024 12:00 - 13:00  Lunch with  Sam ").unwrap();
        assert_eq!(event.title, " Lunch with  Sam ");
    }

    #[test]
    fn parse_line_allows_empty_title() {
        let event = parse_line("03/10/2024 12:00 - 13:00 ").unwrap();
        assert_eq!(event.title, "");
    }

    #[test]
    fn parse_line_accepts_unicode_title() {
        let event = parse_line("03/10/2024 12:00 - 13:00 Café ☕").unwrap();
        assert_eq!(event.title, "Café ☕");
    }

    #[test]
    fn parse_line_rejects_short_lines() {
        assert!(matches!(
            parse_line("03/10/2024 12:00 - 13:00"),
            Err(DaybookError::Format { .. })
        ));
        assert!(parse_line("03/10/2024").is_err());
    }

    #[test]
    fn parse_line_rejects_shifted_columns() {
        assert!(parse_line("3/10/2024 12:00 - 13:00 Lunch").is_err());
        assert!(parse_line("03/10/2024 12:00-13:00   Lunch").is_err());
        assert!(parse_line("03/10/2024 12:00 - 13:00_Lunch").is_err());
    }

    #[test]
    fn load_from_creates_events_in_order() {
        let text = "\
03/10/2024 12:00 - 13:00 Lunch
03/10/2024 09:00 - 10:00 Standup

02/01/2024 18:00 - 19:00 Dinner
";
        let mut store = EventStore::new();
        let report = store.load_from(Cursor::new(text)).unwrap();

        assert_eq!(report, LoadReport { loaded: 3, rejected: 0 });
        assert_eq!(
            store.render_all(),
            vec![
                "02/01/2024 18:00 - 19:00 Dinner",
                "03/10/2024 12:00 - 13:00 Lunch",
                "03/10/2024 09:00 - 10:00 Standup",
            ]
        );
    }

    #[test]
    fn load_from_drops_conflicting_lines() {
        let text = "\
03/10/2024 12:00 - 13:00 Lunch
03/10/2024 13:00 - 14:00 Gym
";
        let mut store = EventStore::new();
        let report = store.load_from(Cursor::new(text)).unwrap();

        assert_eq!(report, LoadReport { loaded: 1, rejected: 1 });
        assert_eq!(store.events_on("03/10/2024").len(), 1);
    }

    #[test]
    fn load_from_is_all_or_nothing() {
        let text = "\
03/10/2024 12:00 - 13:00 Lunch
03/10/2024 1:00 - 2:00 Broken
";
        let mut store = EventStore::new();
        let err = store.load_from(Cursor::new(text)).unwrap_err();

        assert!(matches!(err, DaybookError::Line { line: 2, .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn load_from_rejects_invalid_times() {
        let mut store = EventStore::new();
        let err = store
            .load_from(Cursor::new("03/10/2024 12:75 - 13:00 Lunch\n"))
            .unwrap_err();
        assert!(matches!(err, DaybookError::Line { line: 1, .. }));
    }

    #[test]
    fn load_from_notifies_once() {
        let mut store = EventStore::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        store.attach(move || counter.set(counter.get() + 1));

        let text = "03/10/2024 12:00 - 13:00 Lunch\n03/11/2024 12:00 - 13:00 Lunch\n";
        store.load_from(Cursor::new(text)).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = EventStore::new();
        let err = store.load(&dir.path().join("events.txt")).unwrap_err();
        assert!(err.is_not_found());
    }
}
