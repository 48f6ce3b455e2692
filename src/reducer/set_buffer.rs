use crate::clock::Timestamp;
use crate::state::{Event, State};
use crate::util::wpm;
use crate::word::{create_word, Word};

/// Score a new buffer against the current word.
///
/// Called with the whole buffer on every keystroke. A mismatch at any position
/// fails the attempt; reaching full length completes it.
pub(super) fn set_buffer(mut state: State, buffer: String, now: Timestamp) -> State {
    if state.show_instructions || state.finished || state.streak_satisfied() {
        return state;
    }

    let typed = buffer.chars().count();
    let is_match = state.word.matches_prefix(&buffer);
    let wpm = wpm(typed, now - state.word.start_time.unwrap_or(0));
    let hit_target_wpm = wpm >= state.target_wpm;
    state.caps_detected = buffer != buffer.to_lowercase();

    if !is_match {
        state.word = Word {
            characters: state.word.marked(&buffer),
            end_time: Some(now),
            wpm: Some(0),
            is_match: false,
            hit_target_wpm: false,
            streak: 0,
            ..state.word
        };
        state.buffer.clear();
        state.capture_event(Event::FailureTypo, now);
        return state;
    }

    if !state.word.has_ended() && typed >= state.word.len() {
        return complete_attempt(state, &buffer, wpm, hit_target_wpm, now);
    }

    if !state.word.has_ended() {
        state.word.start_time.get_or_insert(now);
        state.word.characters = state.word.marked(&buffer);
        state.buffer = buffer;
        state.capture_event(Event::Type, now);
        return state;
    }

    // The previous attempt ended and the streak is still short: start the
    // same word over, seeded with this keystroke.
    let mut retry = create_word(state.wordlist(), state.level);
    retry.start_time = Some(now);
    retry.characters = retry.marked(&buffer);
    retry.streak = state.word.streak;

    state.word = retry;
    state.buffer = buffer;
    state.capture_event(Event::Type, now);
    state
}

fn complete_attempt(
    mut state: State,
    buffer: &str,
    wpm: u32,
    hit_target_wpm: bool,
    now: Timestamp,
) -> State {
    let streak = if hit_target_wpm {
        state.word.streak + 1
    } else {
        0
    };

    state.word.characters = state.word.marked(buffer);
    state.word.end_time = Some(now);
    state.word.wpm = Some(wpm);
    state.word.is_match = true;
    state.word.hit_target_wpm = hit_target_wpm;
    state.word.streak = streak;
    state.buffer.clear();
    state.last_wpm = Some(wpm);

    if streak < state.target_streak {
        let event = if hit_target_wpm {
            Event::WordComplete
        } else {
            Event::FailureSlow
        };
        state.capture_event(event, now);
        return state;
    }

    if state.level >= state.last_index() {
        log::info!("final word `{}` mastered at {wpm} wpm", state.word.text());
        state.finished = true;
        state.last_save = Some(now);
        state.capture_event(Event::GameComplete, now);
        return state;
    }

    let next = state.level + 1;
    log::info!("streak complete on `{}`, advancing to level {next}", state.word.text());

    state.word = create_word(state.wordlist(), next);
    state.level = next;
    state.highest_level = state.highest_level.max(next);
    state.last_save = Some(now);
    state.capture_event(Event::StreakComplete, now);
    state
}
