pub mod add;
pub mod check;
pub mod config;
pub mod list;
pub mod month;
pub mod shell;
pub mod show;

use anyhow::Result;
use daybook_core::event::validate_date_key;
use daybook_core::Cursor;

/// Cursor on `date` (MM/DD/YYYY), or on today when no date is given.
pub fn cursor_for(date: Option<&str>) -> Result<Cursor> {
    match date {
        Some(d) => Ok(Cursor::new(validate_date_key(d)?)),
        None => Ok(Cursor::today()),
    }
}
