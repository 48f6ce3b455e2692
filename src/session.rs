use crate::action::Action;
use crate::clock::Clock;
use crate::error::PersistError;
use crate::feedback::{Feedback, FeedbackObserver};
use crate::persist::{LoadOutcome, Persistence, StateStore};
use crate::reducer::Reducer;
use crate::state::State;

/// A running game: the current state plus the effects that follow each change.
#[derive(Debug)]
pub struct Session<C: Clock, S: StateStore> {
    state: State,
    reducer: Reducer<C>,
    persistence: Persistence<S>,
    observer: FeedbackObserver,
}

/// What starting a session produced
#[derive(Debug)]
pub enum Startup<C: Clock, S: StateStore> {
    Ready(Session<C, S>),
    /// This install is retired; send the player to the link instead
    Redirect(String),
}

impl<C: Clock, S: StateStore> Session<C, S> {
    /// Load the saved game (or fresh defaults) and apply it with `LOAD_STATE`.
    pub fn start(clock: C, persistence: Persistence<S>) -> Result<Startup<C, S>, PersistError> {
        let reducer = Reducer::new(clock);
        let loaded = match persistence.load(reducer.clock().now_ms())? {
            LoadOutcome::Redirect(link) => return Ok(Startup::Redirect(link)),
            LoadOutcome::Loaded(state) => state,
        };

        let mut session = Self {
            state: State::default(),
            reducer,
            persistence,
            observer: FeedbackObserver::new(),
        };
        session.dispatch(Action::LoadState(loaded))?;
        session.observer.prime(&session.state);
        Ok(Startup::Ready(session))
    }

    /// Apply `action`, save if anything changed, and report any feedback the
    /// transition calls for.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Feedback>, PersistError> {
        let kind: &'static str = (&action).into();
        let next = self.reducer.reduce(self.state.clone(), action);

        if next == self.state {
            log::debug!("{kind}: no change");
            return Ok(None);
        }

        log::debug!(
            "{kind}: level {} streak {} buffer {:?}",
            next.level,
            next.word.streak,
            next.buffer
        );
        self.state = next;
        self.persistence.save(&self.state)?;
        Ok(self.observer.observe(&self.state))
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn clock(&self) -> &C {
        self.reducer.clock()
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::feedback::SoundCue;
    use crate::persist::MemoryStateStore;
    use crate::state::Event;
    use assert_matches::assert_matches;

    const T0: i64 = 1_700_000_000_000;

    fn ready(store: MemoryStateStore) -> (Session<ManualClock, MemoryStateStore>, ManualClock) {
        let clock = ManualClock::new(T0);
        match Session::start(clock.clone(), Persistence::new(store)).unwrap() {
            Startup::Ready(session) => (session, clock),
            Startup::Redirect(link) => panic!("unexpected redirect to {link}"),
        }
    }

    #[test]
    fn fresh_start_saves_defaults() {
        let store = MemoryStateStore::new();
        let (session, _) = ready(store.clone());

        assert_eq!(session.state().level, 0);
        assert!(session.state().show_instructions);
        assert_eq!(session.state().last_save, Some(T0));
        assert!(store.document().is_some());
    }

    #[test]
    fn dispatch_saves_and_reports_feedback() {
        let store = MemoryStateStore::new();
        let (mut session, clock) = ready(store.clone());
        session.dispatch(Action::ToggleInstructions).unwrap();

        clock.advance(100);
        let feedback = session.dispatch(Action::SetBuffer("t".into())).unwrap();

        assert_matches!(feedback, Some(Feedback { sound: Some(SoundCue::Type), .. }));
        let saved = store.document().unwrap();
        assert!(saved.contains(r#""buffer":"t""#));
    }

    #[test]
    fn keystrokes_in_the_same_millisecond_each_report_feedback() {
        let (mut session, _) = ready(MemoryStateStore::new());
        session.dispatch(Action::ToggleInstructions).unwrap();

        let first = session.dispatch(Action::SetBuffer("t".into())).unwrap();
        let second = session.dispatch(Action::SetBuffer("th".into())).unwrap();

        assert_matches!(first, Some(Feedback { sound: Some(SoundCue::Type), .. }));
        assert_matches!(second, Some(Feedback { sound: Some(SoundCue::Type), .. }));
    }

    #[test]
    fn unchanged_state_is_not_saved_again() {
        let store = MemoryStateStore::new();
        let (mut session, _) = ready(store.clone());
        store.remove().unwrap();

        // buffer input is ignored while the instructions are up
        let feedback = session.dispatch(Action::SetBuffer("t".into())).unwrap();

        assert_eq!(feedback, None);
        assert_eq!(store.document(), None);
    }

    #[test]
    fn resumes_a_saved_game_quietly() {
        let store = MemoryStateStore::with_document(
            r#"{"level": 2, "highestLevel": 4, "lastEvent": "streakComplete", "lastEventTime": 5}"#,
        );
        let (mut session, _) = ready(store);

        assert_eq!(session.state().level, 2);
        assert_eq!(session.state().last_event, Some(Event::LoadState));
        assert_eq!(session.dispatch(Action::SaveState).unwrap(), None);
    }

    #[test]
    fn retired_install_redirects() {
        let store = MemoryStateStore::with_document(r#"{"level": 2}"#);
        let persistence = Persistence::new(store.clone()).with_successor("https://example.test");

        let startup = Session::start(ManualClock::new(T0), persistence).unwrap();

        assert_matches!(startup, Startup::Redirect(link) if link.contains("/migrate?s="));
        assert_eq!(store.document(), None);
    }
}
