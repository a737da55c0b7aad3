//! A calendar session: the event store, its file, and the viewed date.

use std::path::{Path, PathBuf};

use crate::cursor::Cursor;
use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;
use crate::observer::SubscriptionId;
use crate::store::{CreateOutcome, EventStore, LoadReport};

pub struct Calendar {
    store: EventStore,
    cursor: Cursor,
    events_path: PathBuf,
}

impl Calendar {
    pub fn new(events_path: impl Into<PathBuf>) -> Self {
        Calendar {
            store: EventStore::new(),
            cursor: Cursor::today(),
            events_path: events_path.into(),
        }
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn events_path(&self) -> &Path {
        &self.events_path
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Load the events file. A file that does not exist yet is an empty calendar.
    pub fn load(&mut self) -> DaybookResult<LoadReport> {
        match self.store.load(&self.events_path) {
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %self.events_path.display(), "no events file yet");
                Ok(LoadReport::default())
            }
            other => other,
        }
    }

    pub fn save(&self) -> DaybookResult<()> {
        self.store.save(&self.events_path)
    }

    /// Add an event under its own date, reporting an overlap as an error.
    pub fn add(&mut self, event: Event) -> DaybookResult<()> {
        event.validate()?;
        let date_key = event.date.clone();

        if self.store.has_conflict(&date_key, &event)? {
            return Err(DaybookError::Conflict {
                date: date_key,
                start: event.start_time,
                end: event.end_time,
            });
        }

        self.store.create(&date_key, event)?;
        Ok(())
    }

    pub fn create(&mut self, date_key: &str, event: Event) -> DaybookResult<CreateOutcome> {
        self.store.create(date_key, event)
    }

    pub fn has_conflict(&self, date_key: &str, event: &Event) -> DaybookResult<bool> {
        self.store.has_conflict(date_key, event)
    }

    pub fn events_on(&self, date_key: &str) -> &[Event] {
        self.store.events_on(date_key)
    }

    pub fn render_all(&self) -> Vec<String> {
        self.store.render_all()
    }

    /// All rendered events, or `None` when nothing is scheduled.
    pub fn event_list(&self) -> Option<Vec<String>> {
        if self.store.is_empty() {
            None
        } else {
            Some(self.store.render_all())
        }
    }

    /// Events on the viewed date: the date key, then `HH:MM - HH:MM\tTitle` lines.
    pub fn day_agenda(&self) -> String {
        let date_key = self.cursor.date_key();
        let mut agenda = format!("{date_key}\n");
        for event in self.store.events_on(&date_key) {
            agenda.push_str(&format!(
                "{} - {}\t{}\n",
                event.start_time, event.end_time, event.title
            ));
        }
        agenda
    }

    pub fn attach(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.store.attach(listener)
    }

    pub fn detach(&mut self, id: SubscriptionId) -> bool {
        self.store.detach(id)
    }

    pub fn next_day(&mut self) {
        self.cursor.next_day();
        self.store.notify_all();
    }

    pub fn previous_day(&mut self) {
        self.cursor.previous_day();
        self.store.notify_all();
    }

    pub fn set_day(&mut self, day: u32) -> DaybookResult<()> {
        self.cursor.set_day(day)?;
        self.store.notify_all();
        Ok(())
    }
}
