use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// Key presses the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    CtrlC,
}

/// A discrete input event, already stripped of terminal specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Click { column: u16, row: u16 },
    Resize,
}

impl InputEvent {
    /// Maps a crossterm event, dropping the ones the dashboard ignores.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let mapped = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Key::CtrlC
                    }
                    KeyCode::Char(c) => Key::Char(c),
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Backspace => Key::Backspace,
                    KeyCode::Esc => Key::Esc,
                    _ => return None,
                };
                Some(InputEvent::Key(mapped))
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(InputEvent::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            Event::Resize(_, _) => Some(InputEvent::Resize),
            _ => None,
        }
    }
}
