pub mod flow;
pub mod transcript;

pub use flow::*;
pub use transcript::*;

use serde::{Deserialize, Serialize};

/// One question as served by the interview agent. Transient: replaced
/// each round, never persisted client-side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuestionUnit {
    pub question: String,
    pub category: String, // technical, leadership, follow_up
}

/// A completed question/answer turn, as the interview agent expects it
/// in `previous_answers`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// Explicit state of the interview page, replacing the implicit
/// status/canAnswer flag soup. `Failed` is absorbing for the page load;
/// a fresh flow must be started to retry.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InterviewPhase {
    /// A next-question request is in flight or the session is bootstrapping.
    Loading,
    /// A question is displayed; answering unlocks once synthesis finishes.
    Ready {
        question: QuestionUnit,
        can_answer: bool,
    },
    /// The current transcript is being sent as the answer.
    Submitting { question: QuestionUnit },
    /// All questions answered; the score report can be resolved.
    Complete,
    Failed { message: String },
}
