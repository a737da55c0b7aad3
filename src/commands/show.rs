use anyhow::Result;
use daybook_core::Calendar;

use crate::render;

pub fn run(mut calendar: Calendar, next: Option<u32>, prev: Option<u32>) -> Result<()> {
    for _ in 0..next.unwrap_or(0) {
        calendar.next_day();
    }
    for _ in 0..prev.unwrap_or(0) {
        calendar.previous_day();
    }

    print!("{}", render::agenda(&calendar));
    Ok(())
}
