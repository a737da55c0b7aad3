//! Date-keyed event storage.
//!
//! Events live in a map from `MM/DD/YYYY` date key to the events of that day,
//! kept in insertion order. Keys iterate in plain string order, so
//! `02/05/2024` lists before `12/01/2023`.

mod load;
mod save;

pub use load::{parse_line, LoadReport};

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::DaybookResult;
use crate::event::{validate_date_key, Event};
use crate::observer::{Observers, SubscriptionId};

/// Result of [`EventStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The event was appended to its day.
    Created,
    /// The event overlaps an existing one and was not stored.
    Conflict,
}

impl CreateOutcome {
    pub fn is_created(self) -> bool {
        self == CreateOutcome::Created
    }
}

/// The date-keyed collection of events.
///
/// Within a date no two events overlap (closed intervals), and a date key
/// is only present while it holds at least one event.
#[derive(Debug, Default)]
pub struct EventStore {
    events: BTreeMap<String, Vec<Event>>,
    observers: Observers,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event under `date_key` unless it overlaps an existing event.
    ///
    /// Invalid dates or times are an error and leave the store untouched.
    /// Otherwise observers are notified whether or not the event was stored.
    pub fn create(&mut self, date_key: &str, event: Event) -> DaybookResult<CreateOutcome> {
        let outcome = self.insert_checked(date_key, event)?;
        self.notify_all();
        Ok(outcome)
    }

    /// Validate and insert without notifying observers.
    pub(crate) fn insert_checked(
        &mut self,
        date_key: &str,
        event: Event,
    ) -> DaybookResult<CreateOutcome> {
        validate_date_key(date_key)?;
        event.validate()?;

        if self.has_conflict(date_key, &event)? {
            debug!(date = date_key, event = %event, "rejected conflicting event");
            return Ok(CreateOutcome::Conflict);
        }

        debug!(date = date_key, event = %event, "created event");
        self.events
            .entry(date_key.to_string())
            .or_default()
            .push(event);

        Ok(CreateOutcome::Created)
    }

    /// Whether `candidate` overlaps any event already stored under `date_key`.
    ///
    /// Touching endpoints count: 12:00-13:00 conflicts with 13:00-14:00.
    pub fn has_conflict(&self, date_key: &str, candidate: &Event) -> DaybookResult<bool> {
        for existing in self.events_on(date_key) {
            if candidate.overlaps(existing)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The stored events under `date_key` that overlap `candidate`.
    pub fn conflicts_with(&self, date_key: &str, candidate: &Event) -> DaybookResult<Vec<&Event>> {
        let mut conflicts = Vec::new();
        for existing in self.events_on(date_key) {
            if candidate.overlaps(existing)? {
                conflicts.push(existing);
            }
        }
        Ok(conflicts)
    }

    /// Events stored under `date_key`, in insertion order.
    pub fn events_on(&self, date_key: &str) -> &[Event] {
        self.events.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Date keys that hold events, in store order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Every event, by date key then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.values().flatten()
    }

    /// One rendered line per event, in the order they are saved.
    pub fn render_all(&self) -> Vec<String> {
        self.iter().map(Event::render).collect()
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn attach(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.observers.attach(listener)
    }

    pub fn detach(&mut self, id: SubscriptionId) -> bool {
        self.observers.detach(id)
    }

    pub fn notify_all(&mut self) {
        self.observers.notify_all();
    }
}
