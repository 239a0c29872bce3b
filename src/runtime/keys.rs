use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::library::TrackId;
use crate::player::Command;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Command(Command),
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
}

/// Facts about the player a key binding may depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    /// Track under the cursor.
    pub selected: Option<TrackId>,
    /// Track that is audibly playing, if any.
    pub playing: Option<TrackId>,
    pub playlist_empty: bool,
}

/// Key bindings, including the two-key `gg` prefix.
#[derive(Debug, Default)]
pub struct KeyMap {
    pending_gg: bool,
}

impl KeyMap {
    pub fn map(&mut self, key: KeyEvent, ctx: KeyContext) -> Option<KeyAction> {
        if key.code == KeyCode::Char('g') && key.modifiers.is_empty() {
            if self.pending_gg {
                self.pending_gg = false;
                return Some(KeyAction::CursorTop);
            }
            self.pending_gg = true;
            return None;
        }
        // g pending should clear on any other key
        self.pending_gg = false;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyAction::Quit)
            }
            KeyCode::Char('q') => Some(KeyAction::Quit),
            KeyCode::Char('G') => Some(KeyAction::CursorBottom),
            KeyCode::Char('j') | KeyCode::Down => Some(KeyAction::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(KeyAction::CursorUp),
            KeyCode::Enter => {
                // Enter on the song that is already playing does not restart it.
                let id = ctx.selected?;
                (ctx.playing != Some(id)).then_some(KeyAction::Command(Command::Play(id)))
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(KeyAction::Command(Command::PlayPause)),
            KeyCode::Char('l') => Some(KeyAction::Command(Command::Next)),
            KeyCode::Char('h') => Some(KeyAction::Command(Command::Previous)),
            KeyCode::Char('s') => Some(KeyAction::Command(Command::Shuffle)),
            KeyCode::Char('o') => Some(KeyAction::Command(Command::Sort)),
            KeyCode::Char('d') => ctx.selected.map(|id| KeyAction::Command(Command::Delete(id))),
            KeyCode::Char('r') if ctx.playlist_empty => Some(KeyAction::Command(Command::Reset)),
            _ => None,
        }
    }
}
