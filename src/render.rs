//! Terminal rendering for days and months.

use std::collections::HashSet;
use std::fmt::Write;

use chrono::Datelike;
use daybook_core::cursor::WEEKDAY_LABELS;
use daybook_core::event::date_key;
use daybook_core::Calendar;
use owo_colors::OwoColorize;

/// The viewed day: a heading, then one line per event (or a placeholder).
pub fn agenda(calendar: &Calendar) -> String {
    let cursor = calendar.cursor();
    let key = cursor.date_key();
    let mut out = String::new();

    let heading = format!("{} {}", cursor.weekday_label(), key);
    let _ = writeln!(out, "{}", heading.bold());

    let events = calendar.events_on(&key);
    if events.is_empty() {
        let _ = writeln!(out, "  {}", "No events".dimmed());
    }
    for event in events {
        let time = format!("{} - {}", event.start_time, event.end_time);
        let _ = writeln!(out, "  {}  {}", time.cyan(), event.title);
    }

    out
}

/// Month grid for the viewed month. Days with events carry a `*`.
pub fn month_grid(calendar: &Calendar) -> String {
    let cursor = calendar.cursor();
    let busy_dates: HashSet<&str> = calendar.store().dates().collect();
    let mut out = String::new();

    let title = format!("{} {}", cursor.month_name(), cursor.year());
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", WEEKDAY_LABELS.join(" "));

    let mut column = cursor.starting_weekday();
    let mut line = "    ".repeat(column as usize);

    for day in 1..=cursor.days_in_month() {
        let busy = cursor
            .date()
            .with_day(day)
            .map(|date| busy_dates.contains(date_key(date).as_str()))
            .unwrap_or(false);
        let _ = write!(line, "{:>3}{}", day, if busy { '*' } else { ' ' });

        column += 1;
        if column == 7 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
            column = 0;
        }
    }

    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}
