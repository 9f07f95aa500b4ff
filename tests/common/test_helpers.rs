//! Event collection utilities

use apkget_events::{AppEvent, EventReceiver};

/// Events drained from a receiver after an operation finished
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

impl EventLog {
    /// Take every event currently queued on `rx`
    pub fn drain(rx: &mut EventReceiver) -> Self {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        Self { events }
    }

    pub fn count(&self, predicate: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    pub fn any(&self, predicate: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
