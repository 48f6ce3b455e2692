//! Keyboard and focus input translated into session actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::state::{State, STREAK_OPTIONS, WPM_OPTIONS};

/// Esc and Ctrl+C leave the program; they never reach the reducer.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

/// Map a key press to the action it stands for, given the current state.
pub fn action_for(key: &KeyEvent, state: &State) -> Option<Action> {
    if key.kind == KeyEventKind::Release || is_quit(key) {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') if state.show_instructions => {
            Some(Action::ToggleInstructions)
        }
        KeyCode::Char(c) if c.is_ascii_alphabetic() || c == ' ' => {
            let mut buffer = state.buffer.clone();
            buffer.push(c);
            Some(Action::SetBuffer(buffer))
        }
        KeyCode::Backspace if !state.buffer.is_empty() => {
            let mut buffer = state.buffer.clone();
            buffer.pop();
            Some(Action::SetBuffer(buffer))
        }
        KeyCode::Tab | KeyCode::Enter => Some(Action::HandleCancel),
        KeyCode::Left | KeyCode::Down => Some(Action::JumpBackwards),
        KeyCode::Right | KeyCode::Up => Some(Action::JumpForwards),
        KeyCode::Home => Some(Action::JumpStart),
        KeyCode::End => Some(Action::JumpEnd),
        KeyCode::F(1) => Some(Action::ToggleInstructions),
        KeyCode::F(2) => Some(Action::ToggleCredits),
        KeyCode::F(3) => Some(Action::ToggleDarkMode),
        KeyCode::F(4) => Some(Action::SetTargetWpm(cycle(&WPM_OPTIONS, state.target_wpm))),
        KeyCode::F(5) => Some(Action::SetTargetStreak(cycle(
            &STREAK_OPTIONS,
            state.target_streak,
        ))),
        KeyCode::F(6) => Some(Action::SetSfxConfetti(!state.enable_sfx_confetti)),
        KeyCode::F(7) => Some(Action::SetSfxSound(!state.enable_sfx_sound)),
        KeyCode::F(9) => Some(Action::SaveState),
        _ => None,
    }
}

/// Terminal focus changes
pub fn action_for_focus(gained: bool) -> Action {
    Action::SetFocus(gained)
}

/// The option after `current`, wrapping around. A value not in the list moves
/// to the next larger option.
fn cycle(options: &[u32], current: u32) -> u32 {
    options
        .iter()
        .copied()
        .find(|&option| option > current)
        .or_else(|| options.first().copied())
        .unwrap_or(current)
}
