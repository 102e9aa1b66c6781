use async_trait::async_trait;
use log::info;

use crate::api::report::ScoreReport;
use crate::api::ApiClient;
use crate::error::ApiError;

/// Seam over the scoring service so resolution can be tested against a
/// counting fake.
#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn get_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<Option<ScoreReport>, ApiError>;
    async fn generate_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<ScoreReport, ApiError>;
}

#[async_trait]
impl ScoreService for ApiClient {
    async fn get_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<Option<ScoreReport>, ApiError> {
        ApiClient::get_score(self, candidate_id, job_id).await
    }

    async fn generate_score(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<ScoreReport, ApiError> {
        ApiClient::generate_score(self, candidate_id, job_id).await
    }
}

/// Fetch the score report for a candidate/job pair, generating it on demand
/// if the scoring service has not produced one yet. The GET is issued
/// exactly once; the generating POST only runs when the GET comes back
/// without a report.
pub async fn resolve_score<S: ScoreService>(
    service: &S,
    candidate_id: &str,
    job_id: &str,
) -> Result<ScoreReport, ApiError> {
    if let Some(report) = service.get_score(candidate_id, job_id).await? {
        return Ok(report);
    }
    info!(
        "No stored score for candidate {} / job {}, generating",
        candidate_id, job_id
    );
    service.generate_score(candidate_id, job_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct FakeScoring {
        stored: Option<ScoreReport>,
        get_calls: Mutex<u32>,
        generate_calls: Mutex<u32>,
    }

    impl FakeScoring {
        fn with_stored(stored: Option<ScoreReport>) -> Self {
            Self {
                stored,
                get_calls: Mutex::new(0),
                generate_calls: Mutex::new(0),
            }
        }

        fn report(verdict: &str) -> ScoreReport {
            ScoreReport {
                verdict: verdict.to_string(),
                ..ScoreReport::default()
            }
        }
    }

    #[async_trait]
    impl ScoreService for FakeScoring {
        async fn get_score(&self, _: &str, _: &str) -> Result<Option<ScoreReport>, ApiError> {
            *self.get_calls.lock() += 1;
            Ok(self.stored.clone())
        }

        async fn generate_score(&self, _: &str, _: &str) -> Result<ScoreReport, ApiError> {
            *self.generate_calls.lock() += 1;
            Ok(FakeScoring::report("generated"))
        }
    }

    #[tokio::test]
    async fn stored_score_skips_generation() {
        let scoring = FakeScoring::with_stored(Some(FakeScoring::report("stored")));
        let report = resolve_score(&scoring, "c-1", "j-1").await.unwrap();
        assert_eq!(report.verdict, "stored");
        assert_eq!(*scoring.get_calls.lock(), 1);
        assert_eq!(*scoring.generate_calls.lock(), 0);
    }

    #[tokio::test]
    async fn missing_score_generates_once() {
        let scoring = FakeScoring::with_stored(None);
        let report = resolve_score(&scoring, "c-1", "j-1").await.unwrap();
        assert_eq!(report.verdict, "generated");
        assert_eq!(*scoring.get_calls.lock(), 1);
        assert_eq!(*scoring.generate_calls.lock(), 1);
    }
}
