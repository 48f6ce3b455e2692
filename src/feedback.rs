use crate::state::{Event, State};

/// Which sound to play for a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SoundCue {
    Type,
    WordComplete,
    StreakComplete,
    GameComplete,
    FailureSlow,
    FailureTypo,
}

impl SoundCue {
    pub fn is_failure(&self) -> bool {
        matches!(self, SoundCue::FailureSlow | SoundCue::FailureTypo)
    }
}

/// Side effects a transition asks for. Presentation decides how to render them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Feedback {
    pub event: Event,
    pub confetti: bool,
    pub sound: Option<SoundCue>,
    /// Pitch shift in cents; rises as the streak builds
    pub detune: f64,
}

/// Derive the feedback for the event recorded on `state`, honouring the SFX toggles.
pub fn feedback_for(state: &State) -> Option<Feedback> {
    let event = state.last_event?;

    let confetti = state.enable_sfx_confetti
        && matches!(
            event,
            Event::StreakComplete | Event::GameComplete | Event::EnableSfxConfetti
        );

    let cue = match event {
        Event::Type => Some(SoundCue::Type),
        Event::WordComplete => Some(SoundCue::WordComplete),
        Event::StreakComplete => Some(SoundCue::StreakComplete),
        Event::GameComplete => Some(SoundCue::GameComplete),
        Event::FailureSlow => Some(SoundCue::FailureSlow),
        Event::FailureTypo => Some(SoundCue::FailureTypo),
        _ => None,
    };
    let sound = cue.filter(|_| state.enable_sfx_sound);

    let detune = match sound {
        Some(SoundCue::WordComplete) if state.target_streak > 0 => {
            100.0 + 100.0 * (state.word.streak as f64 / state.target_streak as f64)
        }
        _ => 0.0,
    };

    if !confetti && sound.is_none() {
        return None;
    }

    Some(Feedback {
        event,
        confetti,
        sound,
        detune,
    })
}

/// Watches successive states and reports each new transition outcome once.
#[derive(Debug, Default)]
pub struct FeedbackObserver {
    last_seen: Option<(Event, i64, u64)>,
}

impl FeedbackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the current event without reacting to it, e.g. right after loading.
    pub fn prime(&mut self, state: &State) {
        self.last_seen = Self::tag(state);
    }

    pub fn observe(&mut self, state: &State) -> Option<Feedback> {
        let tag = Self::tag(state);
        if tag.is_none() || tag == self.last_seen {
            return None;
        }
        self.last_seen = tag;
        feedback_for(state)
    }

    fn tag(state: &State) -> Option<(Event, i64, u64)> {
        Some((state.last_event?, state.last_event_time?, state.event_serial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_event(event: Event, at: i64) -> State {
        let mut state = State::default();
        state.capture_event(event, at);
        state
    }

    #[test]
    fn streak_complete_fires_confetti_and_sound() {
        let feedback = feedback_for(&with_event(Event::StreakComplete, 1)).unwrap();
        assert!(feedback.confetti);
        assert_eq!(feedback.sound, Some(SoundCue::StreakComplete));
    }

    #[test]
    fn word_complete_detune_rises_with_streak() {
        let mut state = with_event(Event::WordComplete, 1);
        state.word.streak = 2;
        state.target_streak = 4;

        let feedback = feedback_for(&state).unwrap();
        assert!(!feedback.confetti);
        assert_eq!(feedback.detune, 150.0);
    }

    #[test]
    fn toggles_silence_effects() {
        let mut state = with_event(Event::StreakComplete, 1);
        state.enable_sfx_confetti = false;
        state.enable_sfx_sound = false;
        assert_eq!(feedback_for(&state), None);

        let mut state = with_event(Event::FailureTypo, 1);
        state.enable_sfx_confetti = false;
        assert_eq!(feedback_for(&state).unwrap().sound, Some(SoundCue::FailureTypo));
    }

    #[test]
    fn enabling_confetti_previews_it_without_sound() {
        let feedback = feedback_for(&with_event(Event::EnableSfxConfetti, 1)).unwrap();
        assert!(feedback.confetti);
        assert_eq!(feedback.sound, None);
    }

    #[test]
    fn load_state_is_silent() {
        assert_eq!(feedback_for(&with_event(Event::LoadState, 1)), None);
    }

    #[test]
    fn observer_reports_each_event_once() {
        let mut observer = FeedbackObserver::new();
        let state = with_event(Event::Type, 10);

        assert!(observer.observe(&state).is_some());
        assert!(observer.observe(&state).is_none());

        let state = with_event(Event::Type, 11);
        assert!(observer.observe(&state).is_some());
    }

    #[test]
    fn observer_reports_repeats_within_one_millisecond() {
        let mut observer = FeedbackObserver::new();
        let mut state = with_event(Event::Type, 10);
        assert!(observer.observe(&state).is_some());

        state.buffer.push('t');
        state.capture_event(Event::Type, 10);
        assert!(observer.observe(&state).is_some());
        assert!(observer.observe(&state).is_none());
    }

    #[test]
    fn primed_observer_ignores_the_loaded_event() {
        let mut observer = FeedbackObserver::new();
        let state = with_event(Event::StreakComplete, 10);

        observer.prime(&state);
        assert!(observer.observe(&state).is_none());
    }

    #[test]
    fn failure_cues() {
        assert!(SoundCue::FailureSlow.is_failure());
        assert!(!SoundCue::WordComplete.is_failure());
        assert_eq!(SoundCue::FailureTypo.to_string(), "failure-typo");
    }
}
