#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use log::info;
use tauri::Builder;

pub mod api;
pub mod candidate;
pub mod config;
pub mod error;
pub mod interview;
pub mod recruiter;
pub mod score;
pub mod session;
pub mod speech;

pub fn run() -> Result<()> {
    let config = config::service_config();
    info!("HireMind starting");
    info!("  document parser: {}", config.parser_url);
    info!("  user auth:       {}", config.auth_url);
    info!("  interview agent: {}", config.interview_url);
    info!("  scoring:         {}", config.scoring_url);
    info!("  reports:         {}", config.report_url);

    Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // auth + session
            session::login,
            session::signup,
            session::current_session,
            session::logout,
            // recruiter dashboard
            recruiter::recruiter_jobs,
            recruiter::upload_job_post,
            recruiter::upload_company_profile,
            recruiter::job_candidates,
            recruiter::candidate_score,
            recruiter::candidate_report,
            // candidate portal
            candidate::open_jobs,
            candidate::my_applications,
            candidate::apply_to_job,
            candidate::my_score,
            // interview flow
            interview::start_interview,
            interview::interview_state,
            interview::question_spoken,
            interview::submit_answer,
            interview::abandon_interview,
            // speech lifecycle
            speech::set_speech_support,
            speech::speech_support,
            speech::start_recognition,
            speech::stop_recognition,
            speech::cancel_synthesis,
            speech::push_speech_segment,
            speech::set_transcript,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
