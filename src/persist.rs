//! Durable save of the session and recovery of older or partial saves.
//!
//! The save is the JSON form of [`State`]. Loading treats every field as
//! optional and reconciles the result against the defaults, so saves written
//! before a field existed still load.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;

use crate::app_dirs::AppDirs;
use crate::clock::Timestamp;
use crate::error::PersistError;
use crate::migrate::MigrationPayload;
use crate::state::{Event, State, DEFAULT_LEVEL};
use crate::word::{create_word, Word};

/// A save document with every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialState {
    pub focused: Option<bool>,
    pub word: Option<Word>,
    pub level: Option<usize>,
    pub highest_level: Option<usize>,
    pub buffer: Option<String>,
    #[serde(rename = "targetWPM")]
    pub target_wpm: Option<u32>,
    pub target_streak: Option<u32>,
    pub finished: Option<bool>,
    pub last_save: Option<Timestamp>,
    pub show_instructions: Option<bool>,
    pub show_credits: Option<bool>,
    #[serde(rename = "lastWPM")]
    pub last_wpm: Option<u32>,
    pub dark_mode: Option<bool>,
    pub custom_wordlist: Option<Vec<String>>,
    pub caps_detected: Option<bool>,
    #[serde(rename = "enableSFXConfetti")]
    pub enable_sfx_confetti: Option<bool>,
    #[serde(rename = "enableSFXSound")]
    pub enable_sfx_sound: Option<bool>,
}

impl PartialState {
    pub fn parse(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}

/// Merge a partial save over the defaults and repair anything inconsistent.
///
/// * `highestLevel` falls back to `level` (saves predating it)
/// * `showInstructions` falls back to `true` (saves predating it)
/// * levels are clamped into the active list
/// * a stored word that is not the word at `level` is regenerated
/// * a buffer that is not a prefix of the word is dropped, and an unfinished
///   word is re-marked against what remains
pub fn reconcile(partial: PartialState, now: Timestamp) -> State {
    let defaults = State::default();

    let level = partial.level.unwrap_or(DEFAULT_LEVEL);
    let highest_level = partial.highest_level.or(partial.level).unwrap_or(DEFAULT_LEVEL);

    let mut state = State {
        focused: partial.focused.unwrap_or(defaults.focused),
        level,
        highest_level,
        buffer: partial.buffer.unwrap_or_default(),
        target_wpm: partial.target_wpm.unwrap_or(defaults.target_wpm),
        target_streak: partial
            .target_streak
            .filter(|streak| *streak > 0)
            .unwrap_or(defaults.target_streak),
        finished: partial.finished.unwrap_or(defaults.finished),
        last_save: Some(now),
        show_instructions: partial.show_instructions.unwrap_or(true),
        show_credits: partial.show_credits.unwrap_or(defaults.show_credits),
        last_wpm: partial.last_wpm,
        dark_mode: partial.dark_mode.unwrap_or(defaults.dark_mode),
        custom_wordlist: partial.custom_wordlist.filter(|list| !list.is_empty()),
        last_event: Some(Event::LoadState),
        last_event_time: Some(now),
        caps_detected: partial.caps_detected.unwrap_or(defaults.caps_detected),
        enable_sfx_confetti: partial
            .enable_sfx_confetti
            .unwrap_or(defaults.enable_sfx_confetti),
        enable_sfx_sound: partial.enable_sfx_sound.unwrap_or(defaults.enable_sfx_sound),
        word: defaults.word,
        event_serial: defaults.event_serial,
    };

    let last = state.last_index();
    state.level = state.level.min(last);
    state.highest_level = state.highest_level.clamp(state.level, last);

    let expected = state.wordlist()[state.level].to_lowercase();
    state.word = match partial.word {
        Some(word) if word.text() == expected => word,
        _ => create_word(state.wordlist(), state.level),
    };

    if !state.word.matches_prefix(&state.buffer) {
        state.buffer.clear();
    }
    if !state.word.has_ended() {
        state.word.characters = state.word.marked(&state.buffer);
    }

    state
}

/// Where the save document lives
pub trait StateStore {
    fn read(&self) -> Result<Option<String>, PersistError>;
    fn write(&self, document: &str) -> Result<(), PersistError>;
    fn remove(&self) -> Result<(), PersistError>;
}

/// Save document on disk
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::state_path().unwrap_or_else(|| PathBuf::from("burst_state.json")),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for FileStateStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, document: &str) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // write-then-rename so a crash never leaves half a document behind
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory store; clones share the same document
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    document: Rc<RefCell<Option<String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: &str) -> Self {
        Self {
            document: Rc::new(RefCell::new(Some(document.to_string()))),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.document())
    }

    fn write(&self, document: &str) -> Result<(), PersistError> {
        *self.document.borrow_mut() = Some(document.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistError> {
        *self.document.borrow_mut() = None;
        Ok(())
    }
}

/// Result of loading at session start
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Dispatch this as `LOAD_STATE`
    Loaded(Box<State>),
    /// This install is retired; progress was moved out and the player should go here
    Redirect(String),
}

/// Loads and saves session state through a [`StateStore`]
#[derive(Debug, Clone)]
pub struct Persistence<S: StateStore> {
    store: S,
    successor: Option<String>,
}

impl<S: StateStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            successor: None,
        }
    }

    /// Mark this install as retired in favour of `origin`. Loading then hands
    /// progress over to `origin` instead of resuming it here.
    pub fn with_successor(mut self, origin: impl Into<String>) -> Self {
        self.successor = Some(origin.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the save (if any) and reconcile it. A corrupt document is logged
    /// and replaced by fresh defaults.
    pub fn load(&self, now: Timestamp) -> Result<LoadOutcome, PersistError> {
        let recovered = match self.store.read()? {
            None => None,
            Some(document) => match PartialState::parse(&document) {
                Ok(partial) => Some(reconcile(partial, now)),
                Err(e) => {
                    log::warn!("discarding unreadable save: {e}");
                    None
                }
            },
        };

        match (&self.successor, recovered) {
            (Some(origin), Some(state)) => {
                let link = MigrationPayload::from(&state).link(origin)?;
                self.store.remove()?;
                log::info!("progress handed over to {origin}");
                Ok(LoadOutcome::Redirect(link))
            }
            (Some(origin), None) => Ok(LoadOutcome::Redirect(format!(
                "{}/",
                origin.trim_end_matches('/')
            ))),
            (None, Some(state)) => Ok(LoadOutcome::Loaded(Box::new(state))),
            (None, None) => Ok(LoadOutcome::Loaded(Box::new(State {
                last_save: Some(now),
                ..State::default()
            }))),
        }
    }

    pub fn save(&self, state: &State) -> Result<(), PersistError> {
        let document = serde_json::to_string(state)?;
        self.store.write(&document)
    }
}
