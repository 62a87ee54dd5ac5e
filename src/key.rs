use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of a pair of duplicated modifier keys was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Key codes representing physical key positions.
///
/// Codes follow the W3C `KeyboardEvent.code` naming so hosts can pass their
/// native values straight through. Keys that matter to editing or modifier
/// tracking get their own variant; everything else lands in [`KeyCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyCode {
    Backspace,
    Delete,
    Tab,
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    /// Row navigation is not implemented; the engine ignores it.
    ArrowUp,
    ArrowDown,
    Shift(Side),
    Alt(Side),
    Control(Side),
    Meta(Side),
    CapsLock,
    /// Any other code, e.g. `KeyA`, `Digit1`, `Backquote`, `F5`.
    Other(String),
}

impl KeyCode {
    /// Parses a W3C code string. Never fails: unknown codes become `Other`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Tab" => KeyCode::Tab,
            "Enter" => KeyCode::Enter,
            "Space" => KeyCode::Space,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ShiftLeft" => KeyCode::Shift(Side::Left),
            "ShiftRight" => KeyCode::Shift(Side::Right),
            "AltLeft" => KeyCode::Alt(Side::Left),
            "AltRight" => KeyCode::Alt(Side::Right),
            "ControlLeft" => KeyCode::Control(Side::Left),
            "ControlRight" => KeyCode::Control(Side::Right),
            "MetaLeft" => KeyCode::Meta(Side::Left),
            "MetaRight" => KeyCode::Meta(Side::Right),
            "CapsLock" => KeyCode::CapsLock,
            other => KeyCode::Other(other.to_string()),
        }
    }

    /// The W3C code string for this key.
    pub fn as_str(&self) -> &str {
        match self {
            KeyCode::Backspace => "Backspace",
            KeyCode::Delete => "Delete",
            KeyCode::Tab => "Tab",
            KeyCode::Enter => "Enter",
            KeyCode::Space => "Space",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::Shift(Side::Left) => "ShiftLeft",
            KeyCode::Shift(Side::Right) => "ShiftRight",
            KeyCode::Alt(Side::Left) => "AltLeft",
            KeyCode::Alt(Side::Right) => "AltRight",
            KeyCode::Control(Side::Left) => "ControlLeft",
            KeyCode::Control(Side::Right) => "ControlRight",
            KeyCode::Meta(Side::Left) => "MetaLeft",
            KeyCode::Meta(Side::Right) => "MetaRight",
            KeyCode::CapsLock => "CapsLock",
            KeyCode::Other(code) => code,
        }
    }

    /// The modifier this key drives, if it is a modifier key.
    pub fn modifier(&self) -> Option<Modifier> {
        match self {
            KeyCode::Shift(_) => Some(Modifier::Shift),
            KeyCode::Alt(_) => Some(Modifier::Alt),
            KeyCode::Control(_) => Some(Modifier::Ctrl),
            KeyCode::Meta(_) => Some(Modifier::Meta),
            KeyCode::CapsLock => Some(Modifier::CapsLock),
            _ => None,
        }
    }

    pub fn is_modifier(&self) -> bool {
        self.modifier().is_some()
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        KeyCode::from_code(code)
    }
}

impl From<String> for KeyCode {
    fn from(code: String) -> Self {
        match KeyCode::from_code(&code) {
            // Reuse the allocation for the catch-all case.
            KeyCode::Other(_) => KeyCode::Other(code),
            named => named,
        }
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Other(code) => code,
            named => named.as_str().to_string(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The modifiers tracked by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Alt,
    Ctrl,
    Meta,
    /// Sticky: flips on toggle instead of following press/release.
    CapsLock,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Shift,
        Modifier::Alt,
        Modifier::Ctrl,
        Modifier::Meta,
        Modifier::CapsLock,
    ];

    pub fn flag(self) -> Modifiers {
        match self {
            Modifier::Shift => Modifiers::SHIFT,
            Modifier::Alt => Modifiers::ALT,
            Modifier::Ctrl => Modifiers::CTRL,
            Modifier::Meta => Modifiers::META,
            Modifier::CapsLock => Modifiers::CAPS_LOCK,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    /// `CAPS_LOCK` is only ever set on a modifier state, never on an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT     = 0b0_0001;
        const CTRL      = 0b0_0010;
        const ALT       = 0b0_0100;
        const META      = 0b0_1000;
        const CAPS_LOCK = 0b1_0000;
    }
}

impl Modifiers {
    /// The momentary modifiers carried by key events.
    pub const HELD: Modifiers = Modifiers::SHIFT
        .union(Modifiers::CTRL)
        .union(Modifiers::ALT)
        .union(Modifiers::META);

    /// Ctrl, Alt or Meta: the combinations reserved for shortcuts.
    pub fn has_shortcut_modifier(self) -> bool {
        self.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
    }
}

/// A logical key event.
///
/// Both physical key presses and clicks on on-screen keys normalize into this
/// shape before they reach the text engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Momentary modifiers active when the event was produced.
    pub mods: Modifiers,
    /// Caption the key resolved to at the time of the event. Printable keys
    /// insert this text.
    pub text: Option<String>,
    /// Whether the event came from a genuine user action rather than an echo
    /// synthesized from the other input path.
    pub trusted: bool,
}

impl KeyEvent {
    pub fn new(code: impl Into<KeyCode>) -> Self {
        Self {
            code: code.into(),
            mods: Modifiers::empty(),
            text: None,
            trusted: true,
        }
    }

    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods & Modifiers::HELD;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn untrusted(mut self) -> Self {
        self.trusted = false;
        self
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(Modifiers::SHIFT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A key event as reported by the host's physical keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalKeyEvent {
    pub code: KeyCode,
    pub phase: KeyPhase,
    /// Modifier flags the host reported alongside the key.
    pub mods: Modifiers,
    /// Set by the host on auto-repeated key downs.
    pub repeat: bool,
}

impl PhysicalKeyEvent {
    pub fn down(code: impl Into<KeyCode>, mods: Modifiers) -> Self {
        Self {
            code: code.into(),
            phase: KeyPhase::Down,
            mods,
            repeat: false,
        }
    }

    pub fn up(code: impl Into<KeyCode>, mods: Modifiers) -> Self {
        Self {
            code: code.into(),
            phase: KeyPhase::Up,
            mods,
            repeat: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}
