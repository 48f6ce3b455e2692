use time_humanize::{Accuracy, HumanTime, Tense};

use crate::clock::Timestamp;

/// Standard typing speed: five characters make a word.
///
/// Elapsed time below one millisecond is treated as one millisecond so the
/// result stays finite; it saturates at `u32::MAX`.
pub fn wpm(chars_typed: usize, elapsed_ms: i64) -> u32 {
    let minutes = elapsed_ms.max(1) as f64 / 60_000.0;
    let wpm = (chars_typed as f64 / 5.0 / minutes).round();
    if wpm >= u32::MAX as f64 {
        u32::MAX
    } else {
        wpm as u32
    }
}

/// "3 minutes ago" style description of a save time, "never" when unsaved.
pub fn format_last_saved(last_save: Option<Timestamp>, now: Timestamp) -> String {
    match last_save {
        None => "never".to_string(),
        Some(saved) => {
            let secs = ((now - saved) / 1000).max(0);
            HumanTime::from_seconds(secs).to_text_en(Accuracy::Rough, Tense::Past)
        }
    }
}
