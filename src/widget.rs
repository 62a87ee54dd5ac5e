use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::layout::LayoutEntry;
use crate::modifiers::ModifierState;

/// Picks the caption for `entry` under `mods`.
///
/// Shift wins over caps lock, and a missing variant falls back toward the
/// base caption. Shift alone also accepts the caps variant, so letters
/// without an explicit shift caption still capitalize.
pub fn resolve_caption(entry: &LayoutEntry, mods: Modifiers) -> &str {
    let shift = entry.shift_variant.as_deref();
    let caps = entry.caps_variant.as_deref();
    let base = entry.base.as_str();

    match (
        mods.contains(Modifiers::SHIFT),
        mods.contains(Modifiers::CAPS_LOCK),
    ) {
        (true, true) => shift.unwrap_or(base),
        (true, false) => shift.or(caps).unwrap_or(base),
        (false, true) => caps.unwrap_or(base),
        (false, false) => base,
    }
}

/// One on-screen key.
#[derive(Debug, Clone)]
pub struct KeyWidget {
    entry: LayoutEntry,
    caption: String,
    pressed: bool,
}

impl KeyWidget {
    pub fn new(entry: LayoutEntry, state: &ModifierState) -> Self {
        let caption = resolve_caption(&entry, state.flags()).to_string();
        Self {
            entry,
            caption,
            pressed: false,
        }
    }

    pub fn code(&self) -> &KeyCode {
        &self.entry.code
    }

    pub fn entry(&self) -> &LayoutEntry {
        &self.entry
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Recomputes the caption. Returns whether it changed.
    pub fn refresh(&mut self, state: &ModifierState) -> bool {
        let caption = resolve_caption(&self.entry, state.flags());
        if caption == self.caption {
            return false;
        }
        self.caption = caption.to_string();
        true
    }

    /// Swaps in new caption data for the same key position.
    pub fn replace_entry(&mut self, entry: LayoutEntry, state: &ModifierState) {
        self.entry = entry;
        self.refresh(state);
    }

    /// Lights the key and produces its logical event.
    ///
    /// `trusted` marks a genuine user action on this key; echoes of physical
    /// presses pass `false` so the caller does not replay them as hardware.
    pub fn press(&mut self, state: &ModifierState, trusted: bool) -> KeyEvent {
        self.pressed = true;
        KeyEvent {
            code: self.entry.code.clone(),
            mods: state.held(),
            text: Some(self.caption.clone()),
            trusted,
        }
    }

    /// Unlights the key. Caps lock stays lit while it is on.
    pub fn release(&mut self, state: &ModifierState) {
        self.pressed = self.entry.code == KeyCode::CapsLock && state.caps_lock();
    }
}
