use serde::Serialize;

/// Accumulates the candidate's spoken answer for the current turn.
///
/// Finalized recognition segments append in order; only the latest
/// interim segment is kept and it is surfaced to the page rather than
/// discarded. Manual edits replace the accumulated text wholesale.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    finals: Vec<String>,
    interim: Option<String>,
}

/// What the interview page renders: the committed text plus the live
/// interim tail, if any.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TranscriptSnapshot {
    pub text: String,
    pub interim: Option<String>,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one recognition result. Interim segments overwrite each
    /// other; a final segment commits and drops the pending interim.
    pub fn push_segment(&mut self, text: &str, is_final: bool) {
        if is_final {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                self.finals.push(trimmed.to_string());
            }
            self.interim = None;
        } else {
            self.interim = Some(text.to_string());
        }
    }

    /// Replace the whole transcript with manually edited text.
    pub fn set_text(&mut self, text: &str) {
        self.finals.clear();
        if !text.trim().is_empty() {
            self.finals.push(text.trim().to_string());
        }
        self.interim = None;
    }

    pub fn clear(&mut self) {
        self.finals.clear();
        self.interim = None;
    }

    /// Committed text only; this is what gets submitted as the answer.
    pub fn submission_text(&self) -> String {
        self.finals.join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.submission_text().trim().is_empty()
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            text: self.submission_text(),
            interim: self.interim.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finals_accumulate_and_interim_is_replaced() {
        let mut buffer = TranscriptBuffer::new();

        buffer.push_segment("I designed", false);
        assert_eq!(buffer.snapshot().interim.as_deref(), Some("I designed"));
        assert_eq!(buffer.submission_text(), "");

        buffer.push_segment("I designed the onboarding flow", true);
        assert_eq!(buffer.submission_text(), "I designed the onboarding flow");
        assert_eq!(buffer.snapshot().interim, None);

        buffer.push_segment("then ran", false);
        buffer.push_segment("then ran usability tests", true);
        assert_eq!(
            buffer.submission_text(),
            "I designed the onboarding flow then ran usability tests"
        );
    }

    #[test]
    fn whitespace_only_finals_are_dropped() {
        let mut buffer = TranscriptBuffer::new();
        buffer.push_segment("   ", true);
        buffer.push_segment("\n", true);
        assert!(buffer.is_blank());
    }

    #[test]
    fn manual_edit_replaces_everything() {
        let mut buffer = TranscriptBuffer::new();
        buffer.push_segment("first answer", true);
        buffer.push_segment("half a tho", false);

        buffer.set_text("A typed replacement answer.");
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.text, "A typed replacement answer.");
        assert_eq!(snapshot.interim, None);

        buffer.set_text("   ");
        assert!(buffer.is_blank());
    }

    #[test]
    fn clear_resets_for_the_next_turn() {
        let mut buffer = TranscriptBuffer::new();
        buffer.push_segment("some answer", true);
        buffer.push_segment("trailing interim", false);
        buffer.clear();
        assert!(buffer.is_blank());
        assert_eq!(buffer.snapshot().interim, None);
    }
}
