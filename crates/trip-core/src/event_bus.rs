//! Event queue shared by the wizard and the itinerary session.
//!
//! Single-threaded; events are buffered until the host drains them after a turn.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use trip_types::event::PlannerEvent;

/// Shared event bus, cheap to clone.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<PlannerEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: PlannerEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every pending event in emission order.
    pub fn drain(&self) -> Vec<PlannerEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }

    /// Pending warning messages, without draining.
    pub fn warnings(&self) -> Vec<String> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|e| match e {
                PlannerEvent::Warning { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}
