use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::State;

/// Everything that can happen to a session.
///
/// Serialized as `{"type": "SET_BUFFER", "payload": "th"}`. Tags this build
/// does not know deserialize to [`Action::Unknown`] whatever their payload,
/// and the reducer ignores them.
#[derive(Clone, Debug, PartialEq, Serialize, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetBuffer(String),
    HandleCancel,
    JumpForwards,
    JumpBackwards,
    JumpStart,
    JumpEnd,
    #[serde(rename = "SET_TARGET_WPM")]
    SetTargetWpm(u32),
    SetTargetStreak(u32),
    SetWordlist(Vec<String>),
    SaveState,
    LoadState(Box<State>),
    ResetState,
    ToggleInstructions,
    ToggleDarkMode,
    ToggleCredits,
    #[serde(rename = "SET_SFX_CONFETTI")]
    SetSfxConfetti(bool),
    #[serde(rename = "SET_SFX_SOUND")]
    SetSfxSound(bool),
    SetFocus(bool),
    Unknown,
}

/// The wire envelope before the payload is interpreted
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

fn payload<T: DeserializeOwned, E: de::Error>(kind: &str, payload: Value) -> Result<T, E> {
    serde_json::from_value(payload).map_err(|e| E::custom(format!("bad {kind} payload: {e}")))
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawAction { kind, payload: body } = RawAction::deserialize(deserializer)?;

        let action = match kind.as_str() {
            "SET_BUFFER" => Action::SetBuffer(payload(&kind, body)?),
            "HANDLE_CANCEL" => Action::HandleCancel,
            "JUMP_FORWARDS" => Action::JumpForwards,
            "JUMP_BACKWARDS" => Action::JumpBackwards,
            "JUMP_START" => Action::JumpStart,
            "JUMP_END" => Action::JumpEnd,
            "SET_TARGET_WPM" => Action::SetTargetWpm(payload(&kind, body)?),
            "SET_TARGET_STREAK" => Action::SetTargetStreak(payload(&kind, body)?),
            "SET_WORDLIST" => Action::SetWordlist(payload(&kind, body)?),
            "SAVE_STATE" => Action::SaveState,
            "LOAD_STATE" => Action::LoadState(payload(&kind, body)?),
            "RESET_STATE" => Action::ResetState,
            "TOGGLE_INSTRUCTIONS" => Action::ToggleInstructions,
            "TOGGLE_DARK_MODE" => Action::ToggleDarkMode,
            "TOGGLE_CREDITS" => Action::ToggleCredits,
            "SET_SFX_CONFETTI" => Action::SetSfxConfetti(payload(&kind, body)?),
            "SET_SFX_SOUND" => Action::SetSfxSound(payload(&kind, body)?),
            "SET_FOCUS" => Action::SetFocus(payload(&kind, body)?),
            other => {
                log::debug!("ignoring unknown action {other}");
                Action::Unknown
            }
        };
        Ok(action)
    }
}
