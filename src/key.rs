//! Keystrokes as seen by the line editors.

pub use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::event::KeyEvent;

/// A single keystroke: the key that was pressed plus the modifiers held.
///
/// For character keys the code carries the produced character, so `'X'`
/// already implies SHIFT and the SHIFT bit is never set for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    const MODIFIER_MASK: KeyModifiers = KeyModifiers::SHIFT
        .union(KeyModifiers::CONTROL)
        .union(KeyModifiers::ALT);

    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// The character this keystroke types into a buffer, if any.
    /// Keystrokes with CONTROL or ALT held never type anything.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl() || self.alt() {
            return None;
        }
        self.char().filter(|c| !c.is_control())
    }

    /// The raw character a terminal would send for this keystroke,
    /// used for literal insertion (`Ctrl-V <key>`).
    pub fn literal(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.ctrl() => {
                let upper = c.to_ascii_uppercase();
                match upper {
                    '@'..='_' => Some(char::from(upper as u8 & 0x1f)),
                    '?' => Some('\x7f'),
                    _ => None,
                }
            }
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\r'),
            KeyCode::Tab => Some('\t'),
            KeyCode::Esc => Some('\x1b'),
            KeyCode::Backspace => Some('\x7f'),
            _ => None,
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = event.modifiers & Self::MODIFIER_MASK;
        let code = match event.code {
            KeyCode::Char(c) => {
                modifiers.remove(KeyModifiers::SHIFT);
                if modifiers.contains(KeyModifiers::CONTROL) {
                    // Terminals report Ctrl-\ ] ^ _ as Ctrl-4..7
                    KeyCode::Char(match c {
                        '4' => '\\',
                        '5' => ']',
                        '6' => '^',
                        '7' => '_',
                        c => c.to_ascii_lowercase(),
                    })
                } else {
                    KeyCode::Char(c)
                }
            }
            code => code,
        };
        Self { code, modifiers }
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ctrl() {
            write!(f, "Ctrl-")?;
        }
        if self.alt() {
            write!(f, "Alt-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            code => write!(f, "{code:?}"),
        }
    }
}
