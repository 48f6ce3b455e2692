//! Moving progress between installs.
//!
//! Only the essentials travel: level, highest level and the two targets. They
//! are packed as base64 JSON into a `/migrate?s=<blob>` link; the receiving
//! side merges them over fresh defaults.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::error::MigrationError;
use crate::persist::{reconcile, PartialState, StateStore};
use crate::state::State;

/// The subset of progress carried across installs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPayload {
    pub level: usize,
    pub highest_level: usize,
    #[serde(rename = "targetWPM")]
    pub target_wpm: u32,
    pub target_streak: u32,
}

impl From<&State> for MigrationPayload {
    fn from(state: &State) -> Self {
        Self {
            level: state.level,
            highest_level: state.highest_level,
            target_wpm: state.target_wpm,
            target_streak: state.target_streak,
        }
    }
}

impl MigrationPayload {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(STANDARD.encode(serde_json::to_vec(self)?))
    }

    /// `<origin>/migrate?s=<blob>`, with the blob made safe for a query string
    pub fn link(&self, origin: &str) -> Result<String, serde_json::Error> {
        let blob = self
            .encode()?
            .replace('+', "%2B")
            .replace('/', "%2F")
            .replace('=', "%3D");
        Ok(format!("{}/migrate?s={blob}", origin.trim_end_matches('/')))
    }
}

/// Pull the blob out of a migration link. Anything without an `s=` parameter
/// is taken to be the bare blob.
pub fn blob_from_link(link: &str) -> Result<String, MigrationError> {
    let link = link.trim();

    let raw = match link.split_once('?') {
        Some((_, query)) => query
            .split('&')
            .find_map(|pair| pair.strip_prefix("s="))
            .ok_or(MigrationError::MissingBlob)?,
        None => link,
    };

    if raw.is_empty() {
        return Err(MigrationError::MissingBlob);
    }

    // a raw `+` in a query string arrives as a space
    Ok(raw
        .replace("%2B", "+")
        .replace("%2F", "/")
        .replace("%3D", "=")
        .replace(' ', "+"))
}

/// Decode a blob into a partial save. Missing fields stay unset.
pub fn decode(blob: &str) -> Result<PartialState, MigrationError> {
    let bytes = STANDARD.decode(blob.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Result of receiving a migration
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The store already had progress, which wins
    Skipped,
    Imported(Box<State>),
}

/// Receive migrated progress into `store` unless it already holds a save.
pub fn import<S: StateStore>(
    store: &S,
    link: &str,
    now: Timestamp,
) -> Result<ImportOutcome, MigrationError> {
    if store.read()?.is_some() {
        log::info!("existing save found, skipping migration");
        return Ok(ImportOutcome::Skipped);
    }

    let partial = decode(&blob_from_link(link)?)?;
    let state = reconcile(partial, now);
    store.write(&serde_json::to_string(&state)?)?;

    log::info!(
        "migrated progress: level {} of {} unlocked",
        state.level,
        state.highest_level
    );
    Ok(ImportOutcome::Imported(Box::new(state)))
}
