use lazy_static::lazy_static;
use log::{info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tauri::{AppHandle, Emitter};

use crate::error::ApiError;
use crate::interview::{self, session_key, TranscriptSnapshot};
use crate::session::{require_role, Role};

/// What the webview reported about its Web Speech engines. The page owns
/// the actual engines; the core owns whether they may be used.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeechSupport {
    pub synthesis: bool,
    pub recognition: bool,
}

#[derive(Default)]
struct SpeechState {
    support: SpeechSupport,
    // session key currently accepting recognition segments, if any
    recording: Option<String>,
}

lazy_static! {
    static ref SPEECH: Arc<Mutex<SpeechState>> = Arc::new(Mutex::new(SpeechState::default()));
}

fn emit_engine(app: &AppHandle, event: &str, action: &str) {
    let _ = app.emit(event, serde_json::json!({ "action": action }));
}

fn emit_transcript(app: &AppHandle, snapshot: &TranscriptSnapshot) {
    let _ = app.emit("interview-transcript", snapshot);
}

/// Stop recording and tell the page to shut both engines down. Called on
/// interview teardown so nothing keeps listening after the page is left.
pub(crate) fn release(app: &AppHandle) {
    let was_recording = SPEECH.lock().recording.take().is_some();
    if was_recording {
        info!("🎤 Recognition released");
    }
    emit_engine(app, "speech-recognition", "stop");
    emit_engine(app, "speech-synthesis", "cancel");
}

/// Reported once by the page at startup.
#[tauri::command]
pub fn set_speech_support(synthesis: bool, recognition: bool) -> SpeechSupport {
    let support = SpeechSupport {
        synthesis,
        recognition,
    };
    info!(
        "🔊 Speech support: synthesis={} recognition={}",
        synthesis, recognition
    );
    SPEECH.lock().support = support;
    support
}

#[tauri::command]
pub fn speech_support() -> SpeechSupport {
    SPEECH.lock().support
}

/// Begin accepting recognition segments for one interview. Fails when the
/// page reported no recognition engine, instead of silently recording
/// nothing.
#[tauri::command]
pub async fn start_recognition(app: AppHandle, job_id: String) -> Result<(), String> {
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, &job_id);
    {
        let mut state = SPEECH.lock();
        if !state.support.recognition {
            return Err(ApiError::SpeechUnsupported("speech recognition").to_string());
        }
        if let Some(active) = &state.recording {
            if *active != key {
                warn!("Recognition moved from {} to {}", active, key);
            }
        }
        state.recording = Some(key.clone());
    }
    info!("🎤 Recognition started for {}", key);
    emit_engine(&app, "speech-recognition", "start");
    Ok(())
}

#[tauri::command]
pub async fn stop_recognition(app: AppHandle) -> Result<(), String> {
    if SPEECH.lock().recording.take().is_some() {
        info!("🎤 Recognition stopped");
    }
    emit_engine(&app, "speech-recognition", "stop");
    Ok(())
}

/// Cut synthesis short, e.g. when the candidate leaves mid-question.
#[tauri::command]
pub async fn cancel_synthesis(app: AppHandle) -> Result<(), String> {
    emit_engine(&app, "speech-synthesis", "cancel");
    Ok(())
}

/// One recognition result from the page. Segments are dropped unless
/// recognition is currently recording for this interview.
#[tauri::command]
pub async fn push_speech_segment(
    app: AppHandle,
    job_id: String,
    text: String,
    is_final: bool,
) -> Result<TranscriptSnapshot, String> {
    let session = require_role(Role::Candidate)?;
    let key = session_key(&session.user_id, &job_id);
    match &SPEECH.lock().recording {
        Some(active) if *active == key => {}
        _ => return Err("Recognition is not recording for this interview".to_string()),
    }

    let snapshot =
        interview::push_transcript_segment(&session.user_id, &job_id, &text, is_final).await?;
    emit_transcript(&app, &snapshot);
    Ok(snapshot)
}

/// Manual edit from the answer textarea; replaces the accumulated text.
#[tauri::command]
pub async fn set_transcript(
    app: AppHandle,
    job_id: String,
    text: String,
) -> Result<TranscriptSnapshot, String> {
    let session = require_role(Role::Candidate)?;
    let snapshot = interview::replace_transcript(&session.user_id, &job_id, &text).await?;
    emit_transcript(&app, &snapshot);
    Ok(snapshot)
}
