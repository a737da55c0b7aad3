use anyhow::Result;
use daybook_core::Calendar;

use crate::render;

pub fn run(calendar: &Calendar) -> Result<()> {
    print!("{}", render::month_grid(calendar));
    Ok(())
}
