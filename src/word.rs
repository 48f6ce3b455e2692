use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// One expected character of the current word and how the buffer scored it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub character: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl Character {
    pub fn new(character: char) -> Self {
        Self {
            character,
            correct: None,
        }
    }
}

/// A single attempt cycle on a target word (word text plus trailing space)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub characters: Vec<Character>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpm: Option<u32>,
    #[serde(default, rename = "hitTargetWPM")]
    pub hit_target_wpm: bool,
    #[serde(default, rename = "match")]
    pub is_match: bool,
    #[serde(default)]
    pub streak: u32,
}

/// Where an attempt is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordPhase {
    Ready,
    Recording,
    Success,
    FailedTypo,
    FailedSlow,
}

/// Build a fresh word for `list[index]`.
///
/// The trailing space is part of the word so that typing it completes the
/// attempt. Panics if `index` is out of bounds.
pub fn create_word(list: &[String], index: usize) -> Word {
    let characters = format!("{} ", list[index])
        .to_lowercase()
        .chars()
        .map(Character::new)
        .collect();

    Word {
        characters,
        start_time: None,
        end_time: None,
        wpm: None,
        hit_target_wpm: false,
        is_match: false,
        streak: 0,
    }
}

impl Word {
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The word without its trailing space
    pub fn text(&self) -> String {
        let mut text: String = self.characters.iter().map(|c| c.character).collect();
        if text.ends_with(' ') {
            text.pop();
        }
        text
    }

    pub fn has_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// True when every character of `buffer` equals the expected character at
    /// the same position. A buffer longer than the word never matches.
    pub fn matches_prefix(&self, buffer: &str) -> bool {
        buffer.chars().count() <= self.characters.len()
            && buffer
                .chars()
                .zip(self.characters.iter())
                .all(|(typed, expected)| typed == expected.character)
    }

    /// Characters re-scored against `buffer`; positions past the buffer are unknown.
    pub fn marked(&self, buffer: &str) -> Vec<Character> {
        let mut typed = buffer.chars();
        self.characters
            .iter()
            .map(|expected| Character {
                character: expected.character,
                correct: typed.next().map(|c| c == expected.character),
            })
            .collect()
    }

    /// Characters all marked incorrect, used for an abandoned attempt.
    pub fn all_incorrect(&self) -> Vec<Character> {
        self.characters
            .iter()
            .map(|expected| Character {
                character: expected.character,
                correct: Some(false),
            })
            .collect()
    }

    pub fn phase(&self) -> WordPhase {
        match (self.start_time, self.end_time) {
            (None, None) => WordPhase::Ready,
            (_, None) => WordPhase::Recording,
            (_, Some(_)) if self.is_match && self.hit_target_wpm => WordPhase::Success,
            (_, Some(_)) if !self.is_match => WordPhase::FailedTypo,
            (_, Some(_)) => WordPhase::FailedSlow,
        }
    }
}
