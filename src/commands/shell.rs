//! Line-oriented calendar session.
//!
//! The agenda is redrawn whenever the calendar reports a change, and the
//! events file is saved when the session ends.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use daybook_core::{Calendar, Event};

use crate::render;

const HELP: &str = "\
Commands:
  next | prev              move one day forward or back
  day <N>                  jump to day N of the current month
  add <HH:MM> <HH:MM> <title>
                           create an event on the current day
  show                     show the current day
  month                    show the current month
  list                     list every event
  quit                     save and exit";

enum Step {
    Continue,
    Quit,
}

pub fn run<R: BufRead, W: Write>(mut calendar: Calendar, input: R, mut out: W) -> Result<()> {
    let changed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&changed);
    let subscription = calendar.attach(move || flag.set(true));

    write!(out, "{}", render::agenda(&calendar))?;

    for line in input.lines() {
        let line = line?;
        if let Step::Quit = execute(&mut calendar, line.trim(), &mut out)? {
            break;
        }
        if changed.replace(false) {
            write!(out, "{}", render::agenda(&calendar))?;
        }
    }

    calendar.detach(subscription);
    calendar
        .save()
        .with_context(|| format!("Failed to save {}", calendar.events_path().display()))?;
    writeln!(
        out,
        "Saved {} events to {}",
        calendar.store().len(),
        calendar.events_path().display()
    )?;

    Ok(())
}

fn execute<W: Write>(calendar: &mut Calendar, line: &str, out: &mut W) -> Result<Step> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "" => {}
        "next" => calendar.next_day(),
        "prev" => calendar.previous_day(),
        "day" => match rest.trim().parse::<u32>() {
            Ok(day) => {
                if let Err(e) = calendar.set_day(day) {
                    writeln!(out, "Error: {e}")?;
                }
            }
            Err(_) => writeln!(out, "Usage: day <N>")?,
        },
        "add" => {
            let mut parts = rest.trim().splitn(3, ' ');
            let (Some(start), Some(end)) = (parts.next(), parts.next()) else {
                writeln!(out, "Usage: add <HH:MM> <HH:MM> <title>")?;
                return Ok(Step::Continue);
            };
            let title = parts.next().unwrap_or("").trim();
            let event = Event::new(title, calendar.cursor().date_key(), start, end);
            let rendered = event.render();

            match calendar.add(event) {
                Ok(()) => writeln!(out, "Created: {rendered}")?,
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }
        "show" => write!(out, "{}", render::agenda(calendar))?,
        "month" => write!(out, "{}", render::month_grid(calendar))?,
        "list" => match calendar.event_list() {
            Some(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            None => writeln!(out, "No scheduled events")?,
        },
        "help" => writeln!(out, "{HELP}")?,
        "quit" | "exit" => return Ok(Step::Quit),
        other => writeln!(out, "Unknown command '{other}', try 'help'")?,
    }

    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daybook_core::Cursor;
    use std::io::Cursor as Input;

    fn session(dir: &std::path::Path, script: &str) -> String {
        let cursor = Cursor::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let calendar = Calendar::new(dir.join("events.txt")).with_cursor(cursor);
        let mut out = Vec::new();
        run(calendar, Input::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_then_quit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "add 12:00 13:00 Lunch with Sam\nquit\n");

        assert!(out.contains("Created: 03/10/2024 12:00 - 13:00 Lunch with Sam"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("events.txt")).unwrap(),
            "03/10/2024 12:00 - 13:00 Lunch with Sam\n"
        );
    }

    #[test]
    fn conflicting_add_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "add 12:00 13:00 Lunch\nadd 13:00 14:00 Gym\n");

        assert!(out.contains("conflicts with an existing event"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("events.txt")).unwrap(),
            "03/10/2024 12:00 - 13:00 Lunch\n"
        );
    }

    #[test]
    fn cursor_moves_redraw_agenda() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "next\nday 1\nprev\n");

        assert!(out.contains("03/11/2024"));
        assert!(out.contains("03/01/2024"));
        assert!(out.contains("02/29/2024"));
    }

    #[test]
    fn bad_day_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "day 32\nday x\n");

        assert!(out.contains("Error: Day 32 does not exist"));
        assert!(out.contains("Usage: day <N>"));
    }

    #[test]
    fn unknown_command_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "dance\n");
        assert!(out.contains("Unknown command 'dance'"));
    }
}
