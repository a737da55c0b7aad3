use anyhow::{Context, Result};
use daybook_core::{Calendar, Event};
use owo_colors::OwoColorize;

pub fn run(
    mut calendar: Calendar,
    title: String,
    date_key: String,
    start: String,
    end: String,
) -> Result<()> {
    let event = Event::new(title, date_key.clone(), start, end);
    event.validate()?;

    let conflicts = calendar.store().conflicts_with(&date_key, &event)?;
    if !conflicts.is_empty() {
        eprintln!("{}", "Cannot create overlapping event. Conflicts with:".red());
        for existing in conflicts {
            eprintln!("  {}", existing.render());
        }
        anyhow::bail!("{} - {} is already taken on {}", event.start_time, event.end_time, date_key);
    }

    let created = event.render();
    calendar.add(event)?;
    calendar
        .save()
        .with_context(|| format!("Failed to save {}", calendar.events_path().display()))?;

    println!("{}", format!("Created: {created}").green());
    Ok(())
}
