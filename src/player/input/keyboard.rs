//! Keyboard input handling for the native player.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::{InputResult, PlaybackState};

/// Handle a keyboard event.
pub fn handle_key_event(
    key: KeyEvent,
    state: &mut PlaybackState,
    last_tick: Option<usize>,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // Ctrl-C always quits, even over the help overlay
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    // If help is showing, any key closes it
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,

        // === Mode toggles ===
        KeyCode::Char('?') => {
            state.toggle_help();
            InputResult::Continue
        }

        // === Playback controls ===
        KeyCode::Char(' ') => {
            state.toggle_pause();
            InputResult::Continue
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.speed_up();
            InputResult::Continue
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.speed_down();
            InputResult::Continue
        }
        KeyCode::Home => {
            state.restart();
            InputResult::Continue
        }

        // === Frame stepping (paused only) ===
        KeyCode::Left => {
            state.step_back();
            InputResult::Continue
        }
        KeyCode::Right => {
            state.step_forward(last_tick);
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
