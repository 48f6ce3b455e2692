//! The session transition function.
//!
//! Every action produces a new [`State`] value from the previous one; nothing
//! here performs I/O. Time comes from the injected [`Clock`] so transitions are
//! reproducible under test.

mod navigation;
mod set_buffer;

use crate::action::Action;
use crate::clock::{Clock, Timestamp};
use crate::state::{Event, State};
use crate::word::{create_word, Word};

/// Applies actions to session state
#[derive(Clone, Debug, Default)]
pub struct Reducer<C: Clock> {
    clock: C,
}

impl<C: Clock> Reducer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn reduce(&self, state: State, action: Action) -> State {
        let now = self.clock.now_ms();

        match action {
            Action::SetBuffer(buffer) => set_buffer::set_buffer(state, buffer, now),
            Action::HandleCancel => handle_cancel(state, now),
            Action::JumpForwards => navigation::jump_forwards(state, now),
            Action::JumpBackwards => navigation::jump_backwards(state, now),
            Action::JumpStart => navigation::jump_start(state, now),
            Action::JumpEnd => navigation::jump_end(state, now),
            Action::SetTargetWpm(target_wpm) => State {
                target_wpm,
                last_save: Some(now),
                ..state
            },
            Action::SetTargetStreak(target_streak) => State {
                target_streak,
                last_save: Some(now),
                ..state
            },
            Action::SetWordlist(list) => set_wordlist(state, list, now),
            Action::SaveState => State {
                last_save: Some(now),
                ..state
            },
            Action::LoadState(payload) => *payload,
            Action::ResetState => State {
                last_save: Some(now),
                event_serial: state.event_serial,
                ..State::default()
            },
            Action::ToggleInstructions => State {
                show_instructions: !state.show_instructions,
                ..state
            },
            Action::ToggleDarkMode => State {
                dark_mode: !state.dark_mode,
                last_save: Some(now),
                ..state
            },
            Action::ToggleCredits => State {
                show_credits: !state.show_credits,
                ..state
            },
            Action::SetSfxConfetti(enabled) => {
                let mut next = State {
                    enable_sfx_confetti: enabled,
                    last_save: Some(now),
                    ..state
                };
                let event = if enabled {
                    Event::EnableSfxConfetti
                } else {
                    Event::DisableSfxConfetti
                };
                next.capture_event(event, now);
                next
            }
            Action::SetSfxSound(enabled) => {
                let mut next = State {
                    enable_sfx_sound: enabled,
                    last_save: Some(now),
                    ..state
                };
                let event = if enabled {
                    Event::EnableSfxSound
                } else {
                    Event::DisableSfxSound
                };
                next.capture_event(event, now);
                next
            }
            Action::SetFocus(focused) => State { focused, ..state },
            Action::Unknown => state,
        }
    }
}

/// Abandon the current attempt. Only honoured while the session has focus.
fn handle_cancel(mut state: State, now: Timestamp) -> State {
    if !state.focused {
        return state;
    }

    state.word = Word {
        characters: state.word.all_incorrect(),
        end_time: Some(now),
        wpm: Some(0),
        is_match: false,
        hit_target_wpm: false,
        streak: 0,
        ..state.word
    };
    state.buffer.clear();
    state.capture_event(Event::FailureTypo, now);
    state
}

/// Switch to a new list: progress resets, targets and theme survive.
fn set_wordlist(state: State, list: Vec<String>, now: Timestamp) -> State {
    if list.is_empty() {
        log::warn!("ignoring empty word list");
        return state;
    }

    log::info!("switching to a custom word list of {} words", list.len());

    State {
        level: 0,
        highest_level: 0,
        word: create_word(&list, 0),
        target_wpm: state.target_wpm,
        target_streak: state.target_streak,
        dark_mode: state.dark_mode,
        custom_wordlist: Some(list),
        last_save: Some(now),
        show_instructions: false,
        event_serial: state.event_serial,
        ..State::default()
    }
}
