use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::word::{create_word, Word};
use crate::wordlist::default_words;

pub const DEFAULT_LEVEL: usize = 0;
pub const DEFAULT_TARGET_WPM: u32 = 90;
pub const DEFAULT_TARGET_STREAK: u32 = 5;

pub const WPM_OPTIONS: [u32; 5] = [30, 60, 90, 120, 200];
pub const STREAK_OPTIONS: [u32; 5] = [1, 3, 5, 10, 25];

/// Outcome of the last transition worth reacting to (sound, confetti, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Event {
    #[serde(rename = "disableSFXConfetti")]
    DisableSfxConfetti,
    #[serde(rename = "disableSFXSound")]
    DisableSfxSound,
    #[serde(rename = "enableSFXConfetti")]
    EnableSfxConfetti,
    #[serde(rename = "enableSFXSound")]
    EnableSfxSound,
    #[serde(rename = "failureSlow")]
    FailureSlow,
    #[serde(rename = "failureTypo")]
    FailureTypo,
    #[serde(rename = "gameComplete")]
    GameComplete,
    #[serde(rename = "loadState")]
    LoadState,
    #[serde(rename = "streakComplete")]
    StreakComplete,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "wordComplete")]
    WordComplete,
}

/// One player's session. Serialized as-is for the local save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub focused: bool,
    pub word: Word,
    pub level: usize,
    pub highest_level: usize,
    pub buffer: String,
    #[serde(rename = "targetWPM")]
    pub target_wpm: u32,
    pub target_streak: u32,
    pub finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_save: Option<Timestamp>,
    pub show_instructions: bool,
    pub show_credits: bool,
    #[serde(default, rename = "lastWPM", skip_serializing_if = "Option::is_none")]
    pub last_wpm: Option<u32>,
    pub dark_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_wordlist: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event_time: Option<Timestamp>,
    pub caps_detected: bool,
    #[serde(rename = "enableSFXConfetti")]
    pub enable_sfx_confetti: bool,
    #[serde(rename = "enableSFXSound")]
    pub enable_sfx_sound: bool,
    /// Events captured by this process. Tells apart two identical events
    /// stamped in the same millisecond; never saved.
    #[serde(skip)]
    pub event_serial: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            focused: true,
            word: create_word(default_words(), DEFAULT_LEVEL),
            level: DEFAULT_LEVEL,
            highest_level: DEFAULT_LEVEL,
            buffer: String::new(),
            target_wpm: DEFAULT_TARGET_WPM,
            target_streak: DEFAULT_TARGET_STREAK,
            finished: false,
            last_save: None,
            show_instructions: true,
            show_credits: false,
            last_wpm: None,
            dark_mode: true,
            custom_wordlist: None,
            last_event: None,
            last_event_time: None,
            caps_detected: false,
            enable_sfx_confetti: true,
            enable_sfx_sound: true,
            event_serial: 0,
        }
    }
}

impl State {
    /// The custom list if one is set, else the bundled default.
    pub fn wordlist(&self) -> &[String] {
        match &self.custom_wordlist {
            Some(list) if !list.is_empty() => list,
            _ => default_words(),
        }
    }

    pub fn last_index(&self) -> usize {
        self.wordlist().len().saturating_sub(1)
    }

    pub fn capture_event(&mut self, event: Event, now: Timestamp) {
        self.last_event = Some(event);
        self.last_event_time = Some(now);
        self.event_serial += 1;
    }

    pub fn streak_satisfied(&self) -> bool {
        self.word.streak >= self.target_streak
    }
}
