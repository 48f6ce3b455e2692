use std::sync::OnceLock;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;

use crate::error::WordlistError;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A bundled word list
#[derive(Deserialize, Clone, Debug)]
pub struct Wordlist {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

/// Word lists shipped with the binary
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    /// most frequent english words, in frequency order
    Common,
    /// words with doubled letters
    Double,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Common, Preset::Double];

    pub fn wordlist(&self) -> Result<Wordlist, WordlistError> {
        Wordlist::bundled(&self.to_string())
    }
}

impl Wordlist {
    pub fn bundled(name: &str) -> Result<Self, WordlistError> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| WordlistError::UnknownPreset(name.to_string()))?;

        let text = file
            .contents_utf8()
            .ok_or_else(|| WordlistError::UnknownPreset(name.to_string()))?;

        serde_json::from_str(text).map_err(|_| WordlistError::UnknownPreset(name.to_string()))
    }
}

/// The list used when no custom list is set.
pub fn default_words() -> &'static [String] {
    static DEFAULT: OnceLock<Vec<String>> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        Preset::Common
            .wordlist()
            .map(|list| list.words)
            // the bundled list is compiled in; this only guards a broken build
            .unwrap_or_else(|_| vec!["the".to_string()])
    })
}

/// Parse a user-supplied list: tokens split on whitespace or commas, letters
/// only, lower-cased, duplicates dropped keeping the first occurrence.
pub fn parse_custom(text: &str) -> Result<Vec<String>, WordlistError> {
    let words = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(token.to_ascii_lowercase())
            } else {
                Err(WordlistError::InvalidWord {
                    word: token.to_string(),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let words: Vec<String> = words.into_iter().unique().collect();

    if words.is_empty() {
        return Err(WordlistError::Empty);
    }

    Ok(words)
}
