//! Calls to the interview agent service. A 404 from `/interview/next`
//! means no session exists for the candidate/job pair yet; the flow
//! controller reacts by initializing one via `/interview/question`.

use serde::Deserialize;
use serde_json::json;

use super::ApiClient;
use crate::error::ApiError;
use crate::interview::{AnsweredQuestion, QuestionUnit};

/// What the next-question endpoint resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum NextTurn {
    Question(QuestionUnit),
    Complete,
}

#[derive(Deserialize)]
struct NextResponse {
    #[serde(default)]
    interview_complete: bool,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SessionStarted {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub questions_total: u32,
    #[serde(default)]
    pub answered: u32,
}

#[derive(Deserialize, Debug)]
pub struct AnswerAccepted {
    #[serde(default)]
    pub success: bool,
}

impl ApiClient {
    pub async fn next_question(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<NextTurn, ApiError> {
        let url = format!("{}/interview/next", self.config().interview_url);
        let body = json!({ "candidate_id": candidate_id, "job_id": job_id });
        let response: NextResponse = self.post_json(url, &body).await?;
        next_turn(response)
    }

    /// Initialize an interview session. The agent generates the question
    /// set from the stored resume/job/company context.
    pub async fn start_interview_session(
        &self,
        candidate_id: &str,
        job_id: &str,
        previous_answers: &[AnsweredQuestion],
    ) -> Result<SessionStarted, ApiError> {
        let url = format!("{}/interview/question", self.config().interview_url);
        let body = json!({
            "candidate_id": candidate_id,
            "job_id": job_id,
            "previous_answers": previous_answers,
        });
        self.post_json(url, &body).await
    }

    pub async fn submit_interview_answer(
        &self,
        candidate_id: &str,
        job_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<AnswerAccepted, ApiError> {
        let url = format!("{}/interview/answer", self.config().interview_url);
        let body = json!({
            "candidate_id": candidate_id,
            "job_id": job_id,
            "question": question,
            "answer": answer,
        });
        self.post_json(url, &body).await
    }
}

fn next_turn(response: NextResponse) -> Result<NextTurn, ApiError> {
    if response.interview_complete {
        return Ok(NextTurn::Complete);
    }
    let question = response.question.ok_or(ApiError::MissingField("question"))?;
    Ok(NextTurn::Question(QuestionUnit {
        question,
        category: response.category.unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_turn_carries_question_and_category() {
        let response: NextResponse = serde_json::from_str(
            r#"{"category": "technical", "question": "Walk me through your API design.", "question_index": 0, "type": "technical", "interview_complete": false}"#,
        )
        .unwrap();
        match next_turn(response).unwrap() {
            NextTurn::Question(unit) => {
                assert_eq!(unit.question, "Walk me through your API design.");
                assert_eq!(unit.category, "technical");
            }
            NextTurn::Complete => panic!("expected a question"),
        }
    }

    #[test]
    fn complete_turn_ignores_missing_question() {
        let response: NextResponse = serde_json::from_str(
            r#"{"message": "Interview complete. All questions answered.", "interview_complete": true}"#,
        )
        .unwrap();
        assert_eq!(next_turn(response).unwrap(), NextTurn::Complete);
    }

    #[test]
    fn pending_turn_without_question_is_malformed() {
        let response: NextResponse =
            serde_json::from_str(r#"{"interview_complete": false}"#).unwrap();
        assert!(matches!(
            next_turn(response),
            Err(ApiError::MissingField("question"))
        ));
    }
}
