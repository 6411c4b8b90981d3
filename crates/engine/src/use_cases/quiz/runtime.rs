//! Quiz runtime - the engine behind a command queue.
//!
//! A single task owns the [`QuizEngine`] and applies commands one at a time,
//! so user input, input refreshes and timer firings are serialized without
//! locks. Timers are tokio tasks that post `TimerFired` back into the same
//! queue. Snapshots are published on a watch channel after every visible
//! change; completed sessions go out on a broadcast channel.

use std::sync::Arc;

use rolodex_domain::{Contact, ContactId, FilterSelection, SessionSettings, TransitionToken};
use rolodex_shared::{QuizSnapshot, SessionSummary};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use super::engine::QuizEngine;
use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::infrastructure::scheduler::TokioScheduler;

const SUMMARY_CAPACITY: usize = 16;

#[derive(Debug)]
pub enum QuizCommand {
    SetContacts(Vec<Contact>),
    SetFilter(FilterSelection),
    Submit(ContactId),
    Replay,
    TimerFired(TransitionToken),
    Teardown,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Quiz runtime has shut down")]
    Closed,
}

/// Cloneable front door to a running quiz.
#[derive(Clone)]
pub struct QuizHandle {
    commands: mpsc::UnboundedSender<QuizCommand>,
    snapshots: watch::Receiver<QuizSnapshot>,
    summaries: broadcast::Sender<SessionSummary>,
}

impl QuizHandle {
    pub fn submit(&self, answer: ContactId) -> Result<(), RuntimeError> {
        self.send(QuizCommand::Submit(answer))
    }

    pub fn replay(&self) -> Result<(), RuntimeError> {
        self.send(QuizCommand::Replay)
    }

    pub fn set_contacts(&self, contacts: Vec<Contact>) -> Result<(), RuntimeError> {
        self.send(QuizCommand::SetContacts(contacts))
    }

    pub fn set_filter(&self, filter: FilterSelection) -> Result<(), RuntimeError> {
        self.send(QuizCommand::SetFilter(filter))
    }

    /// Ask the runtime to tear the session down and stop.
    pub fn teardown(&self) -> Result<(), RuntimeError> {
        self.send(QuizCommand::Teardown)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every published snapshot.
    pub fn snapshots(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_summaries(&self) -> broadcast::Receiver<SessionSummary> {
        self.summaries.subscribe()
    }

    fn send(&self, command: QuizCommand) -> Result<(), RuntimeError> {
        self.commands.send(command).map_err(|_| RuntimeError::Closed)
    }
}

pub struct QuizRuntime {
    handle: QuizHandle,
    task: JoinHandle<()>,
}

impl QuizRuntime {
    /// Spawn the runtime on the current tokio runtime.
    pub fn spawn(
        settings: SessionSettings,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();

        // Timers must not keep the runtime alive once every handle is gone.
        let timer_tx = commands.downgrade();
        let scheduler = TokioScheduler::new(move |token| {
            if let Some(tx) = timer_tx.upgrade() {
                let _ = tx.send(QuizCommand::TimerFired(token));
            }
        });

        let engine = QuizEngine::new(settings, Arc::new(scheduler), random, clock);
        let (snapshot_tx, snapshots) = watch::channel(engine.snapshot());
        let (summaries, _) = broadcast::channel(SUMMARY_CAPACITY);

        let task = tokio::spawn(run(engine, inbox, snapshot_tx, summaries.clone()));
        tracing::debug!(total_rounds = settings.total_rounds(), "Quiz runtime started");

        Self {
            handle: QuizHandle {
                commands,
                snapshots,
                summaries,
            },
            task,
        }
    }

    pub fn handle(&self) -> QuizHandle {
        self.handle.clone()
    }

    /// Tear the session down and wait for the runtime task to finish.
    pub async fn shutdown(self) {
        // Already closed means the task is finishing on its own.
        let _ = self.handle.teardown();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Quiz runtime task failed");
        }
    }
}

async fn run(
    mut engine: QuizEngine,
    mut inbox: mpsc::UnboundedReceiver<QuizCommand>,
    snapshots: watch::Sender<QuizSnapshot>,
    summaries: broadcast::Sender<SessionSummary>,
) {
    while let Some(command) = inbox.recv().await {
        let stop = matches!(command, QuizCommand::Teardown);
        // A new pool can change pool_size without changing the session.
        let inputs_changed = matches!(
            command,
            QuizCommand::SetContacts(_) | QuizCommand::SetFilter(_)
        );
        let update = match command {
            QuizCommand::SetContacts(contacts) => engine.set_contacts(contacts),
            QuizCommand::SetFilter(filter) => engine.set_filter(filter),
            QuizCommand::Submit(answer) => engine.submit(answer),
            QuizCommand::Replay => engine.replay(),
            QuizCommand::TimerFired(token) => engine.timer_fired(token),
            QuizCommand::Teardown => engine.teardown(),
        };

        if inputs_changed || update.is_visible_change() {
            let snapshot = engine.snapshot();
            snapshots.send_if_modified(|current| {
                if *current == snapshot {
                    return false;
                }
                *current = snapshot;
                true
            });
        }

        if let Some(summary) = engine.take_summary() {
            // No subscribers is fine
            let _ = summaries.send(summary);
        }

        if stop {
            break;
        }
    }

    engine.teardown();
    tracing::debug!("Quiz runtime stopped");
}
