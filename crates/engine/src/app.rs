//! Application state and composition.

use std::sync::Arc;

use rolodex_domain::SessionSettings;

use crate::infrastructure::ports::{ClockPort, ContactSource, FilterStore, RandomPort};
use crate::use_cases::inputs::{InputUseCases, LoadFilter, RefreshContacts, UpdateFilter};
use crate::use_cases::quiz::{QuizHandle, QuizRuntime};

/// Main application state.
///
/// Owns the running quiz and the use cases that feed it.
pub struct App {
    pub quiz: QuizRuntime,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub inputs: InputUseCases,
}

impl App {
    /// Wire the quiz runtime to its collaborators.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        settings: SessionSettings,
        contacts: Arc<dyn ContactSource>,
        filters: Arc<dyn FilterStore>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let quiz = QuizRuntime::spawn(settings, random, clock);
        let handle = quiz.handle();

        let inputs = InputUseCases::new(
            Arc::new(RefreshContacts::new(contacts, handle.clone())),
            Arc::new(UpdateFilter::new(filters.clone(), handle.clone())),
            Arc::new(LoadFilter::new(filters, handle)),
        );

        Self {
            quiz,
            use_cases: UseCases { inputs },
        }
    }

    pub fn handle(&self) -> QuizHandle {
        self.quiz.handle()
    }

    pub async fn shutdown(self) {
        self.quiz.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_shared::QuizPhaseData;

    use crate::infrastructure::clock::{SeededRandom, SystemClock};
    use crate::infrastructure::filter_store::InMemoryFilterStore;
    use crate::infrastructure::ports::MockContactSource;
    use crate::test_fixtures::{family, family_filter};

    #[tokio::test]
    async fn startup_sequence_reaches_first_round() {
        let mut contacts = MockContactSource::new();
        contacts.expect_fetch_contacts().returning(|| Ok(family(8)));

        let app = App::new(
            SessionSettings::default(),
            Arc::new(contacts),
            Arc::new(InMemoryFilterStore::new(family_filter())),
            Arc::new(SeededRandom::new(5)),
            Arc::new(SystemClock::new()),
        );

        app.use_cases
            .inputs
            .refresh_contacts
            .execute()
            .await
            .expect("contacts");
        app.use_cases.inputs.load_filter.execute().await.expect("filter");

        let mut rx = app.handle().snapshots();
        let snapshot = rx
            .wait_for(|s| s.phase == QuizPhaseData::AwaitingAnswer)
            .await
            .expect("runtime alive")
            .clone();
        assert_eq!(snapshot.pool_size, 8);
        assert_eq!(snapshot.options.len(), 5);

        app.shutdown().await;
    }
}
