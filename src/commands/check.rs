use anyhow::Result;
use daybook_core::{Calendar, Event};
use owo_colors::OwoColorize;

pub fn run(calendar: &Calendar, date_key: String, start: String, end: String) -> Result<()> {
    let candidate = Event::new("", date_key.clone(), start, end);
    candidate.validate()?;

    let conflicts = calendar.store().conflicts_with(&date_key, &candidate)?;
    if conflicts.is_empty() {
        println!(
            "{}",
            format!("Free: {} {} - {}", date_key, candidate.start_time, candidate.end_time).green()
        );
        return Ok(());
    }

    for existing in &conflicts {
        println!("  {}", existing.render());
    }
    anyhow::bail!(
        "{} - {} on {} conflicts with {} event(s)",
        candidate.start_time,
        candidate.end_time,
        date_key,
        conflicts.len()
    )
}
