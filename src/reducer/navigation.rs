use crate::clock::Timestamp;
use crate::state::State;
use crate::word::create_word;

/// Move to `target`, clamped into the unlocked range. Never raises `highest_level`.
fn jump(mut state: State, target: usize, now: Timestamp) -> State {
    if state.show_instructions {
        return state;
    }

    let highest = state.highest_level.min(state.last_index());
    let level = target.min(highest);

    state.word = create_word(state.wordlist(), level);
    state.level = level;
    state.buffer.clear();
    state.focused = true;
    state.finished = false;
    state.last_save = Some(now);
    state
}

pub(super) fn jump_forwards(state: State, now: Timestamp) -> State {
    let target = state.level + 1;
    jump(state, target, now)
}

pub(super) fn jump_backwards(state: State, now: Timestamp) -> State {
    let target = state.level.saturating_sub(1);
    jump(state, target, now)
}

pub(super) fn jump_start(state: State, now: Timestamp) -> State {
    jump(state, 0, now)
}

pub(super) fn jump_end(state: State, now: Timestamp) -> State {
    let target = state.highest_level;
    jump(state, target, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(level: usize, highest_level: usize) -> State {
        let list: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|w| w.to_string()).collect();
        State {
            word: create_word(&list, level),
            level,
            highest_level,
            custom_wordlist: Some(list),
            show_instructions: false,
            ..State::default()
        }
    }

    #[test]
    fn forwards_stops_at_highest_level() {
        let state = jump_forwards(at(1, 2), 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.word.text(), "c");

        let state = jump_forwards(state, 20);
        assert_eq!(state.level, 2);
        assert_eq!(state.highest_level, 2);
    }

    #[test]
    fn backwards_stops_at_zero() {
        let state = jump_backwards(at(1, 3), 10);
        assert_eq!(state.level, 0);

        let state = jump_backwards(state, 20);
        assert_eq!(state.level, 0);
        assert_eq!(state.highest_level, 3);
    }

    #[test]
    fn start_and_end() {
        let state = jump_end(at(0, 3), 10);
        assert_eq!(state.level, 3);
        assert_eq!(state.word.text(), "d");

        let state = jump_start(state, 20);
        assert_eq!(state.level, 0);
        assert_eq!(state.word.text(), "a");
    }

    #[test]
    fn jumping_resets_the_attempt() {
        let mut state = at(2, 4);
        state.buffer = "c".into();
        state.word.streak = 3;
        state.finished = true;
        state.focused = false;

        let state = jump_backwards(state, 99);

        assert_eq!(state.buffer, "");
        assert_eq!(state.word.streak, 0);
        assert!(!state.finished);
        assert!(state.focused);
        assert_eq!(state.last_save, Some(99));
    }

    #[test]
    fn ignored_while_instructions_are_shown() {
        let mut state = at(2, 4);
        state.show_instructions = true;
        assert_eq!(jump_start(state.clone(), 1), state);
    }

    #[test]
    fn highest_level_beyond_the_list_is_clamped() {
        let state = jump_end(at(0, 40), 1);
        assert_eq!(state.level, 4);
    }
}
