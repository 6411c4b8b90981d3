//! Shared test helpers: contact builders and a hand-cranked scheduler.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rolodex_domain::{
    Contact, ContactCategory, ContactId, DisplayName, FilterSelection, Hint, PhotoRef,
    TransitionToken,
};

use crate::infrastructure::ports::{SchedulerPort, TimerHandle};

// =============================================================================
// Contacts
// =============================================================================

/// `count` quizzable family contacts, each with a photo.
pub fn family(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|i| {
            Contact::new(
                ContactId::new(),
                DisplayName::new(format!("Family {}", i)).expect("valid name"),
                ContactCategory::Family,
            )
            .with_photo(PhotoRef::new(format!("photos/family-{}.jpg", i)))
        })
        .collect()
}

/// A work contact known only by a hint.
pub fn coworker(name: &str) -> Contact {
    Contact::new(
        ContactId::new(),
        DisplayName::new(name).expect("valid name"),
        ContactCategory::Work,
    )
    .with_hint(Hint::new(format!("{} sits by the window", name)).expect("valid hint"))
}

pub fn family_filter() -> FilterSelection {
    FilterSelection::new([ContactCategory::Family], [])
}

// =============================================================================
// Manual Scheduler
// =============================================================================

/// One call to [`ManualScheduler::schedule`].
#[derive(Debug, Clone)]
pub struct ScheduledTimer {
    pub delay: Duration,
    pub token: TransitionToken,
    pub cancelled: Arc<Mutex<bool>>,
}

impl ScheduledTimer {
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock().expect("lock")
    }
}

/// Scheduler that records every request and never fires on its own.
///
/// Tests decide when time passes by feeding recorded tokens back into the
/// engine.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Arc<Mutex<Vec<ScheduledTimer>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every timer ever scheduled, cancelled ones included.
    pub fn scheduled(&self) -> Vec<ScheduledTimer> {
        self.timers.lock().expect("lock").clone()
    }

    /// Timers that have not been cancelled.
    pub fn active(&self) -> Vec<ScheduledTimer> {
        self.scheduled()
            .into_iter()
            .filter(|t| !t.is_cancelled())
            .collect()
    }

    /// The most recently scheduled timer.
    pub fn last(&self) -> Option<ScheduledTimer> {
        self.timers.lock().expect("lock").last().cloned()
    }
}

impl SchedulerPort for ManualScheduler {
    fn schedule(&self, delay: Duration, token: TransitionToken) -> Box<dyn TimerHandle> {
        let cancelled = Arc::new(Mutex::new(false));
        self.timers.lock().expect("lock").push(ScheduledTimer {
            delay,
            token,
            cancelled: Arc::clone(&cancelled),
        });
        Box::new(ManualTimerHandle { cancelled })
    }
}

struct ManualTimerHandle {
    cancelled: Arc<Mutex<bool>>,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&self) {
        *self.cancelled.lock().expect("lock") = true;
    }
}
