//! Quiz core - pool filtering, round generation, answer evaluation and the
//! session state machine.

mod evaluator;
mod pool;
mod round;
mod session;

/// Number of answer options in every round.
pub const OPTIONS_PER_ROUND: usize = 5;

pub use evaluator::{evaluate, AnswerEvaluation};
pub use pool::{compute_eligible_pool, EligiblePool, MIN_POOL_SIZE};
pub use round::{generate_round, Round};
pub use session::{
    PendingTransition, SessionPhase, SessionState, TransitionKind, TransitionToken,
};
