use burst::action::Action;
use burst::clock::{Clock, ManualClock};
use burst::persist::{reconcile, PartialState};
use burst::reducer::Reducer;
use burst::state::{Event, State};
use burst::word::create_word;

const T0: i64 = 1_700_000_000_000;

struct Game {
    reducer: Reducer<ManualClock>,
    clock: ManualClock,
    state: State,
}

impl Game {
    fn new(state: State) -> Self {
        let clock = ManualClock::new(T0);
        Self {
            reducer: Reducer::new(clock.clone()),
            clock,
            state,
        }
    }

    fn playing() -> Self {
        Self::new(State {
            show_instructions: false,
            ..State::default()
        })
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(state, action);
    }

    /// One keystroke every `step_ms`, sending the whole buffer each time
    fn type_text(&mut self, text: &str, step_ms: i64) {
        for c in text.chars() {
            self.clock.advance(step_ms);
            let mut buffer = self.state.buffer.clone();
            buffer.push(c);
            self.dispatch(Action::SetBuffer(buffer));
        }
    }
}

#[test]
fn five_fast_attempts_advance_to_the_next_word() {
    let mut game = Game::playing();
    assert_eq!(game.state.target_wpm, 90);
    assert_eq!(game.state.target_streak, 5);

    for attempt in 1..=5 {
        game.type_text("the ", 100);
        if attempt < 5 {
            assert_eq!(game.state.word.streak, attempt);
            assert_eq!(game.state.last_event, Some(Event::WordComplete));
        }
    }

    assert_eq!(game.state.level, 1);
    assert_eq!(game.state.highest_level, 1);
    assert_eq!(game.state.word.text(), "be");
    assert_eq!(game.state.word.streak, 0);
    assert_eq!(game.state.last_event, Some(Event::StreakComplete));
}

#[test]
fn a_typo_mid_streak_starts_the_streak_over() {
    let mut game = Game::playing();
    game.type_text("the ", 100);
    game.type_text("the ", 100);
    assert_eq!(game.state.word.streak, 2);

    game.type_text("teh ", 100);

    assert_eq!(game.state.word.streak, 0);
    assert_eq!(game.state.buffer, "");
    assert!(!game.state.word.is_match);
    assert_eq!(game.state.level, 0);
}

#[test]
fn a_typo_is_tagged_at_the_offending_keystroke() {
    let mut game = Game::playing();
    game.type_text("te", 100);

    assert_eq!(game.state.last_event, Some(Event::FailureTypo));
    assert_eq!(game.state.last_event_time, Some(game.clock.now_ms()));
}

#[test]
fn slow_attempts_never_build_a_streak() {
    let mut game = Game::playing();
    for _ in 0..6 {
        game.type_text("the ", 2_000);
        assert_eq!(game.state.last_event, Some(Event::FailureSlow));
    }
    assert_eq!(game.state.level, 0);
    assert_eq!(game.state.word.streak, 0);
}

#[test]
fn switching_word_lists_restarts_progress_but_keeps_settings() {
    let mut game = Game::new(State {
        level: 7,
        highest_level: 12,
        target_wpm: 120,
        target_streak: 3,
        dark_mode: false,
        buffer: "ab".into(),
        finished: true,
        ..State::default()
    });

    game.dispatch(Action::SetWordlist(vec!["cat".into(), "dog".into()]));

    let state = &game.state;
    assert_eq!(state.level, 0);
    assert_eq!(state.highest_level, 0);
    assert_eq!(state.word, create_word(&["cat".to_string()], 0));
    assert_eq!(state.target_wpm, 120);
    assert_eq!(state.target_streak, 3);
    assert!(!state.dark_mode);
    assert_eq!(state.buffer, "");
    assert!(!state.finished);
}

#[test]
fn mastering_a_custom_list_finishes_and_home_restarts() {
    let mut game = Game::playing();
    game.dispatch(Action::SetWordlist(vec!["cat".into(), "dog".into()]));
    game.dispatch(Action::SetTargetStreak(1));

    game.type_text("cat ", 100);
    assert_eq!(game.state.level, 1);
    game.type_text("dog ", 100);

    assert!(game.state.finished);
    assert_eq!(game.state.last_event, Some(Event::GameComplete));

    game.dispatch(Action::JumpStart);
    assert!(!game.state.finished);
    assert_eq!(game.state.level, 0);
    assert_eq!(game.state.highest_level, 1);
}

#[test]
fn navigation_stays_within_unlocked_levels() {
    let mut game = Game::new(State {
        level: 2,
        highest_level: 3,
        show_instructions: false,
        ..State::default()
    });

    for _ in 0..5 {
        game.dispatch(Action::JumpForwards);
    }
    assert_eq!(game.state.level, 3);

    for _ in 0..5 {
        game.dispatch(Action::JumpBackwards);
    }
    assert_eq!(game.state.level, 0);

    game.dispatch(Action::JumpEnd);
    assert_eq!(game.state.level, 3);
    assert_eq!(game.state.highest_level, 3);
}

#[test]
fn reset_always_returns_to_the_start() {
    let mut game = Game::new(State {
        level: 4,
        highest_level: 9,
        buffer: "x".into(),
        finished: true,
        ..State::default()
    });

    game.dispatch(Action::ResetState);

    assert_eq!(game.state.level, 0);
    assert_eq!(game.state.highest_level, 0);
    assert_eq!(game.state.buffer, "");
    assert!(!game.state.finished);
    assert_eq!(game.state.last_save, Some(T0));
}

#[test]
fn saved_state_reloads_equivalently() {
    let mut game = Game::playing();
    game.type_text("the ", 100);
    game.type_text("th", 100);
    game.dispatch(Action::SaveState);

    let document = serde_json::to_string(&game.state).unwrap();
    game.clock.advance(60_000);
    let reloaded = reconcile(PartialState::parse(&document).unwrap(), game.clock.now_ms());

    let normalize = |s: &State| State {
        last_save: None,
        last_event: None,
        last_event_time: None,
        event_serial: 0,
        ..s.clone()
    };
    assert_eq!(normalize(&reloaded), normalize(&game.state));
    assert_eq!(reloaded.last_event, Some(Event::LoadState));

    game.dispatch(Action::LoadState(Box::new(reloaded.clone())));
    assert_eq!(game.state, reloaded);
}

#[test]
fn unknown_actions_from_newer_saves_are_ignored() {
    let mut game = Game::playing();
    let before = game.state.clone();

    let action: Action = serde_json::from_str(r#"{"type":"SET_THEME","payload":"neon"}"#).unwrap();
    game.dispatch(action);

    assert_eq!(game.state, before);
}
