//! Audio/haptic feedback sink
//!
//! Fire-and-forget: the core announces cues and vibration pulses and never
//! waits on the result. Synthesis and playback live in the collaborator.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Body flapped
    Jump,
    /// Gate cleared
    Score,
    /// Run ended
    Hit,
    /// Menu/button interaction
    Ui,
}

/// Receiver for feedback notifications
pub trait FeedbackSink {
    fn play(&mut self, cue: Cue);
    fn vibrate(&mut self, ms: u32);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play(&mut self, _cue: Cue) {}
    fn vibrate(&mut self, _ms: u32) {}
}

/// Logs every notification at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {:?}", cue);
    }

    fn vibrate(&mut self, ms: u32) {
        log::debug!("vibrate {}ms", ms);
    }
}

/// Feedback recorded by [`RecordingFeedback`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Play(Cue),
    Vibrate(u32),
}

/// Keeps every notification in a shared log (handy for headless drivers)
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    log: std::rc::Rc<std::cell::RefCell<Vec<Feedback>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<Feedback> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&mut self, cue: Cue) {
        self.log.borrow_mut().push(Feedback::Play(cue));
    }

    fn vibrate(&mut self, ms: u32) {
        self.log.borrow_mut().push(Feedback::Vibrate(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_shares_log_between_clones() {
        let recorder = RecordingFeedback::new();
        let mut sink = recorder.clone();
        sink.play(Cue::Jump);
        sink.vibrate(12);
        assert_eq!(
            recorder.entries(),
            vec![Feedback::Play(Cue::Jump), Feedback::Vibrate(12)]
        );
        recorder.clear();
        assert!(recorder.entries().is_empty());
    }
}
