use std::cell::RefCell;

use tidemark_types::CrossingEvent;

use crate::host::{NotificationSink, SinkError};

/// Sink that keeps every event in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<CrossingEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<CrossingEvent> {
        self.events.borrow().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<CrossingEvent> {
        self.events.take()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn dispatch(&self, event: &CrossingEvent) -> Result<(), SinkError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
