use chrono::{DateTime, Local};
use std::fmt::Debug;

/// Something that happened in the domain.
pub trait DomainEvent: Debug + Send + Sync {
    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Local>;

    fn event_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Base domain event stamped with the time it was created.
///
/// Concrete events usually embed an `Event` and delegate
/// [`DomainEvent::occurred_at`] to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    time: DateTime<Local>,
}

impl Event {
    /// Creates an event stamped with the current local time.
    pub fn new() -> Self {
        Event { time: Local::now() }
    }

    /// Creates an event stamped with the given time.
    pub fn at(time: DateTime<Local>) -> Self {
        Event { time }
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::new()
    }
}

impl DomainEvent for Event {
    fn occurred_at(&self) -> DateTime<Local> {
        self.time
    }
}
