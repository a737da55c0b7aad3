use anyhow::Result;
use daybook_core::{Calendar, Event};
use owo_colors::OwoColorize;

pub fn run(calendar: &Calendar, json: bool) -> Result<()> {
    if json {
        let events: Vec<&Event> = calendar.store().iter().collect();
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    match calendar.event_list() {
        Some(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        None => println!("{}", "No scheduled events".dimmed()),
    }

    Ok(())
}
