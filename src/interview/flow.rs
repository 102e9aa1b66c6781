use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex as TokioMutex;

use super::{AnsweredQuestion, InterviewPhase, TranscriptBuffer, TranscriptSnapshot};
use crate::api::interview::NextTurn;
use crate::api::{api, ApiClient};
use crate::error::ApiError;
use crate::session::{require_role, Role};

lazy_static! {
    static ref FLOWS: TokioMutex<HashMap<String, InterviewFlow>> =
        TokioMutex::new(HashMap::new());
}

/// The interview agent keys sessions as `candidate_id:job_id`.
pub fn session_key(candidate_id: &str, job_id: &str) -> String {
    format!("{}:{}", candidate_id, job_id)
}

/// Seam between the flow controller and the interview agent, so the turn
/// loop can be driven by a scripted fake in tests.
#[async_trait]
pub trait InterviewService: Send + Sync {
    async fn next_question(&self, candidate_id: &str, job_id: &str) -> Result<NextTurn, ApiError>;
    async fn start_session(
        &self,
        candidate_id: &str,
        job_id: &str,
        previous_answers: &[AnsweredQuestion],
    ) -> Result<(), ApiError>;
    async fn submit_answer(
        &self,
        candidate_id: &str,
        job_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl InterviewService for ApiClient {
    async fn next_question(&self, candidate_id: &str, job_id: &str) -> Result<NextTurn, ApiError> {
        ApiClient::next_question(self, candidate_id, job_id).await
    }

    async fn start_session(
        &self,
        candidate_id: &str,
        job_id: &str,
        previous_answers: &[AnsweredQuestion],
    ) -> Result<(), ApiError> {
        self.start_interview_session(candidate_id, job_id, previous_answers)
            .await
            .map(|_| ())
    }

    async fn submit_answer(
        &self,
        candidate_id: &str,
        job_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<(), ApiError> {
        self.submit_interview_answer(candidate_id, job_id, question, answer)
            .await
            .map(|_| ())
    }
}

/// Drives one candidate through the question/answer loop until the
/// backend reports completion. Requests are strictly sequential: the flow
/// holds at most one in-flight operation, and overlapping submits are
/// rejected while `Submitting`.
pub struct InterviewFlow {
    candidate_id: String,
    job_id: String,
    phase: InterviewPhase,
    session_bootstrapped: bool,
    transcript: TranscriptBuffer,
}

/// What the interview page renders after every transition.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FlowView {
    pub phase: InterviewPhase,
    pub transcript: TranscriptSnapshot,
}

impl InterviewFlow {
    pub fn new(candidate_id: String, job_id: String) -> Self {
        Self {
            candidate_id,
            job_id,
            phase: InterviewPhase::Loading,
            session_bootstrapped: false,
            transcript: TranscriptBuffer::new(),
        }
    }

    pub fn phase(&self) -> &InterviewPhase {
        &self.phase
    }

    pub fn view(&self) -> FlowView {
        FlowView {
            phase: self.phase.clone(),
            transcript: self.transcript.snapshot(),
        }
    }

    pub fn transcript_mut(&mut self) -> &mut TranscriptBuffer {
        &mut self.transcript
    }

    /// Request the next question. A 404 on the first request means no
    /// session exists yet; initialize one (exactly once) and retry.
    pub async fn advance<S: InterviewService>(&mut self, service: &S) {
        self.phase = InterviewPhase::Loading;
        match service
            .next_question(&self.candidate_id, &self.job_id)
            .await
        {
            Ok(turn) => self.apply_turn(turn),
            Err(e) if e.is_not_found() && !self.session_bootstrapped => {
                self.session_bootstrapped = true;
                info!(
                    "No interview session for {} yet, initializing",
                    session_key(&self.candidate_id, &self.job_id)
                );
                if let Err(e) = service
                    .start_session(&self.candidate_id, &self.job_id, &[])
                    .await
                {
                    return self.fail(e);
                }
                match service
                    .next_question(&self.candidate_id, &self.job_id)
                    .await
                {
                    Ok(turn) => self.apply_turn(turn),
                    Err(e) => self.fail(e),
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Speech-synthesis-end callback: unlock the answer controls.
    pub fn mark_spoken(&mut self) {
        match &mut self.phase {
            InterviewPhase::Ready { can_answer, .. } => *can_answer = true,
            other => warn!("Synthesis finished outside ready phase: {:?}", other),
        }
    }

    /// Submit the accumulated transcript as the answer. A blank transcript
    /// is a no-op (`Ok(false)`, no network call). On success the transcript
    /// is cleared and the flow advances to the next question.
    pub async fn submit<S: InterviewService>(&mut self, service: &S) -> Result<bool, String> {
        let question = match &self.phase {
            InterviewPhase::Ready {
                question,
                can_answer: true,
            } => question.clone(),
            InterviewPhase::Ready {
                can_answer: false, ..
            } => return Err("Wait for the question to finish playing".to_string()),
            InterviewPhase::Submitting { .. } => {
                return Err("An answer is already being submitted".to_string())
            }
            InterviewPhase::Loading => return Err("No question to answer yet".to_string()),
            InterviewPhase::Complete => return Err("The interview is already complete".to_string()),
            InterviewPhase::Failed { message } => return Err(message.clone()),
        };

        if self.transcript.is_blank() {
            return Ok(false);
        }
        let answer = self.transcript.submission_text();

        self.phase = InterviewPhase::Submitting {
            question: question.clone(),
        };
        match service
            .submit_answer(&self.candidate_id, &self.job_id, &question.question, &answer)
            .await
        {
            Ok(()) => {
                self.transcript.clear();
                self.advance(service).await;
                Ok(true)
            }
            Err(e) => {
                self.fail(e);
                Ok(true)
            }
        }
    }

    fn apply_turn(&mut self, turn: NextTurn) {
        match turn {
            NextTurn::Question(question) => {
                info!("Next question ({}): {}", question.category, question.question);
                self.phase = InterviewPhase::Ready {
                    question,
                    can_answer: false,
                };
            }
            NextTurn::Complete => {
                info!(
                    "🏁 Interview complete for {}",
                    session_key(&self.candidate_id, &self.job_id)
                );
                self.phase = InterviewPhase::Complete;
            }
        }
    }

    fn fail(&mut self, error: ApiError) {
        warn!("Interview flow failed: {}", error);
        self.phase = InterviewPhase::Failed {
            message: error.to_string(),
        };
    }
}

fn emit_state(app: &AppHandle, view: &FlowView) {
    let _ = app.emit("interview-state", view);
}

/// Run a closure against the stored flow for the logged-in candidate and
/// the given job, emitting the resulting view to the page.
async fn with_flow<F, T>(app: &AppHandle, job_id: &str, op: F) -> Result<T, String>
where
    F: FnOnce(&mut InterviewFlow) -> Result<T, String>,
{
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, job_id);
    let mut flows = FLOWS.lock().await;
    let flow = flows
        .get_mut(&key)
        .ok_or_else(|| "No interview in progress for this job".to_string())?;
    let result = op(flow);
    emit_state(app, &flow.view());
    result
}

// Tauri commands for the interview page

#[tauri::command]
pub async fn start_interview(app: AppHandle, job_id: String) -> Result<FlowView, String> {
    let session = require_role(Role::Candidate)?;
    info!(
        "🎬 Starting interview for candidate {} on job {}",
        session.user_id, job_id
    );

    let key = session_key(&session.user_id, &job_id);
    let mut flows = FLOWS.lock().await;
    let flow = flows
        .entry(key)
        .and_modify(|f| *f = InterviewFlow::new(session.user_id.clone(), job_id.clone()))
        .or_insert_with(|| InterviewFlow::new(session.user_id.clone(), job_id.clone()));
    flow.advance(api()).await;

    let view = flow.view();
    emit_state(&app, &view);
    Ok(view)
}

#[tauri::command]
pub async fn interview_state(job_id: String) -> Result<FlowView, String> {
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, &job_id);
    let flows = FLOWS.lock().await;
    flows
        .get(&key)
        .map(|flow| flow.view())
        .ok_or_else(|| "No interview in progress for this job".to_string())
}

/// Synthesis-end callback from the page; unlocks the answer controls.
#[tauri::command]
pub async fn question_spoken(app: AppHandle, job_id: String) -> Result<FlowView, String> {
    with_flow(&app, &job_id, |flow| {
        flow.mark_spoken();
        Ok(flow.view())
    })
    .await
}

#[tauri::command]
pub async fn submit_answer(app: AppHandle, job_id: String) -> Result<FlowView, String> {
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, &job_id);
    let mut flows = FLOWS.lock().await;
    let flow = flows
        .get_mut(&key)
        .ok_or_else(|| "No interview in progress for this job".to_string())?;

    let submitted = flow.submit(api()).await?;
    if !submitted {
        warn!("Blank transcript, ignoring submit");
    }

    let view = flow.view();
    emit_state(&app, &view);
    Ok(view)
}

/// Teardown for the interview page: drop the flow and release the speech
/// lifecycle so nothing keeps running after the page is left.
#[tauri::command]
pub async fn abandon_interview(app: AppHandle, job_id: String) -> Result<(), String> {
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, &job_id);
    let removed = FLOWS.lock().await.remove(&key).is_some();
    if removed {
        info!("Abandoned interview {}", key);
    }
    crate::speech::release(&app);
    Ok(())
}

/// Feed one recognition segment into the flow's transcript.
pub(crate) async fn push_transcript_segment(
    candidate_id: &str,
    job_id: &str,
    text: &str,
    is_final: bool,
) -> Result<TranscriptSnapshot, String> {
    let key = session_key(candidate_id, job_id);
    let mut flows = FLOWS.lock().await;
    let flow = flows
        .get_mut(&key)
        .ok_or_else(|| "No interview in progress for this job".to_string())?;
    flow.transcript_mut().push_segment(text, is_final);
    Ok(flow.transcript_mut().snapshot())
}

/// Replace the flow's transcript with manually edited text.
pub(crate) async fn replace_transcript(
    candidate_id: &str,
    job_id: &str,
    text: &str,
) -> Result<TranscriptSnapshot, String> {
    let key = session_key(candidate_id, job_id);
    let mut flows = FLOWS.lock().await;
    let flow = flows
        .get_mut(&key)
        .ok_or_else(|| "No interview in progress for this job".to_string())?;
    flow.transcript_mut().set_text(text);
    Ok(flow.transcript_mut().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::QuestionUnit;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Scripted interview agent: pops one canned response per call and
    /// counts what was asked of it.
    #[derive(Default)]
    struct FakeAgent {
        next_responses: Mutex<VecDeque<Result<NextTurn, ApiError>>>,
        next_calls: Mutex<u32>,
        start_calls: Mutex<u32>,
        answers: Mutex<Vec<(String, String)>>,
        fail_submit: bool,
    }

    impl FakeAgent {
        fn scripted(responses: Vec<Result<NextTurn, ApiError>>) -> Self {
            Self {
                next_responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        fn question(text: &str) -> Result<NextTurn, ApiError> {
            Ok(NextTurn::Question(QuestionUnit {
                question: text.to_string(),
                category: "technical".to_string(),
            }))
        }

        fn not_found() -> Result<NextTurn, ApiError> {
            Err(ApiError::Status {
                status: 404,
                detail: "Session not initialized.".to_string(),
            })
        }
    }

    #[async_trait]
    impl InterviewService for FakeAgent {
        async fn next_question(&self, _: &str, _: &str) -> Result<NextTurn, ApiError> {
            *self.next_calls.lock() += 1;
            self.next_responses
                .lock()
                .pop_front()
                .unwrap_or(Ok(NextTurn::Complete))
        }

        async fn start_session(
            &self,
            _: &str,
            _: &str,
            _: &[AnsweredQuestion],
        ) -> Result<(), ApiError> {
            *self.start_calls.lock() += 1;
            Ok(())
        }

        async fn submit_answer(
            &self,
            _: &str,
            _: &str,
            question: &str,
            answer: &str,
        ) -> Result<(), ApiError> {
            if self.fail_submit {
                return Err(ApiError::Status {
                    status: 500,
                    detail: "boom".to_string(),
                });
            }
            self.answers
                .lock()
                .push((question.to_string(), answer.to_string()));
            Ok(())
        }
    }

    fn flow() -> InterviewFlow {
        InterviewFlow::new("c-1".to_string(), "j-1".to_string())
    }

    #[tokio::test]
    async fn one_question_at_a_time_until_complete() {
        let agent = FakeAgent::scripted(vec![
            FakeAgent::question("Q1"),
            FakeAgent::question("Q2"),
            Ok(NextTurn::Complete),
        ]);
        let mut flow = flow();

        flow.advance(&agent).await;
        assert!(matches!(
            flow.phase(),
            InterviewPhase::Ready { question, can_answer: false } if question.question == "Q1"
        ));

        flow.mark_spoken();
        flow.transcript_mut().push_segment("first answer", true);
        assert!(flow.submit(&agent).await.unwrap());
        assert!(matches!(
            flow.phase(),
            InterviewPhase::Ready { question, can_answer: false } if question.question == "Q2"
        ));
        // transcript was cleared between turns
        assert!(flow.transcript_mut().is_blank());

        flow.mark_spoken();
        flow.transcript_mut().push_segment("second answer", true);
        assert!(flow.submit(&agent).await.unwrap());
        assert_eq!(*flow.phase(), InterviewPhase::Complete);

        let answers = agent.answers.lock();
        assert_eq!(
            *answers,
            vec![
                ("Q1".to_string(), "first answer".to_string()),
                ("Q2".to_string(), "second answer".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn first_404_initializes_the_session_exactly_once() {
        let agent = FakeAgent::scripted(vec![FakeAgent::not_found(), FakeAgent::question("Q1")]);
        let mut flow = flow();

        flow.advance(&agent).await;
        assert_eq!(*agent.start_calls.lock(), 1);
        assert_eq!(*agent.next_calls.lock(), 2);
        assert!(matches!(flow.phase(), InterviewPhase::Ready { .. }));
    }

    #[tokio::test]
    async fn later_404_is_a_failure_not_a_reinit() {
        let agent = FakeAgent::scripted(vec![
            FakeAgent::not_found(),
            FakeAgent::question("Q1"),
            FakeAgent::not_found(),
        ]);
        let mut flow = flow();

        flow.advance(&agent).await;
        flow.mark_spoken();
        flow.transcript_mut().push_segment("answer", true);
        flow.submit(&agent).await.unwrap();

        assert!(matches!(flow.phase(), InterviewPhase::Failed { .. }));
        assert_eq!(*agent.start_calls.lock(), 1);
    }

    #[tokio::test]
    async fn blank_transcript_submit_is_a_no_op() {
        let agent = FakeAgent::scripted(vec![FakeAgent::question("Q1")]);
        let mut flow = flow();
        flow.advance(&agent).await;
        flow.mark_spoken();

        flow.transcript_mut().push_segment("   ", true);
        assert!(!flow.submit(&agent).await.unwrap());
        assert!(agent.answers.lock().is_empty());
        // still ready on the same question
        assert!(matches!(
            flow.phase(),
            InterviewPhase::Ready { question, can_answer: true } if question.question == "Q1"
        ));
    }

    #[tokio::test]
    async fn answering_is_locked_until_synthesis_finishes() {
        let agent = FakeAgent::scripted(vec![FakeAgent::question("Q1")]);
        let mut flow = flow();
        flow.advance(&agent).await;

        flow.transcript_mut().push_segment("eager answer", true);
        assert!(flow.submit(&agent).await.is_err());
        assert!(agent.answers.lock().is_empty());

        flow.mark_spoken();
        assert!(flow.submit(&agent).await.unwrap());
        assert_eq!(agent.answers.lock().len(), 1);
    }

    #[tokio::test]
    async fn submit_failure_is_absorbing() {
        let agent = FakeAgent {
            next_responses: Mutex::new(vec![FakeAgent::question("Q1")].into()),
            fail_submit: true,
            ..Default::default()
        };
        let mut flow = flow();
        flow.advance(&agent).await;
        flow.mark_spoken();
        flow.transcript_mut().push_segment("answer", true);

        flow.submit(&agent).await.unwrap();
        assert!(matches!(flow.phase(), InterviewPhase::Failed { .. }));
        // no automatic retry: a further submit is rejected
        assert!(flow.submit(&agent).await.is_err());
    }
}
