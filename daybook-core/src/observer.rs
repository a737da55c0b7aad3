//! Change notification for hosts that display the calendar.

use std::fmt;

/// Handle returned by [`Observers::attach`], used to detach the callback later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An owned list of "something changed" callbacks.
///
/// Callbacks carry no payload and run synchronously, in attach order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns false if it was not attached.
    pub fn detach(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify_all(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
