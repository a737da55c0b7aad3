//! Core types for daybook.
//!
//! This crate provides the calendar engine used by the daybook CLI:
//! - `Event`, a timed event in the fixed-width text form it is stored in
//! - `EventStore`, the date-keyed store with conflict detection and file persistence
//! - `Calendar`, a session bundling a store, its events file and a date cursor

pub mod calendar;
pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod observer;
pub mod store;

pub use calendar::Calendar;
pub use cursor::Cursor;
pub use error::{DaybookError, DaybookResult};
pub use event::{Event, TimeValue};
pub use store::{CreateOutcome, EventStore, LoadReport};
