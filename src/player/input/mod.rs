//! Input handling for the native player.

mod keyboard;

pub use keyboard::handle_key_event;

use crossterm::event::Event;

use crate::player::state::{InputResult, PlaybackState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// `last_tick` is the final tick of a finite playlist and bounds stepping.
pub fn handle_event(event: Event, state: &mut PlaybackState, last_tick: Option<usize>) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, last_tick),
        Event::Resize(new_cols, new_rows) => {
            state.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore mouse, focus, paste
    }
}
