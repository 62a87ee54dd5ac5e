use std::fmt;

use crate::key::{Modifier, Modifiers};

/// Notification sent to modifier subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierEvent {
    Changed { modifier: Modifier, value: bool },
    /// Shift and Alt just became held together.
    LanguageToggleRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ModifierEvent)>;

/// The shared shift/alt/ctrl/meta/caps-lock flags.
///
/// Writes that do not change a flag are dropped silently, so repeated
/// writes of the same value never reach subscribers.
#[derive(Default)]
pub struct ModifierState {
    flags: Modifiers,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    toggle_requested: bool,
}

impl fmt::Debug for ModifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierState")
            .field("flags", &self.flags)
            .field("subscribers", &self.subscribers.len())
            .field("toggle_requested", &self.toggle_requested)
            .finish()
    }
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, modifier: Modifier) -> bool {
        self.flags.contains(modifier.flag())
    }

    /// All flags, caps lock included.
    pub fn flags(&self) -> Modifiers {
        self.flags
    }

    /// The momentary flags, as copied into key events.
    pub fn held(&self) -> Modifiers {
        self.flags & Modifiers::HELD
    }

    pub fn shift(&self) -> bool {
        self.get(Modifier::Shift)
    }

    pub fn caps_lock(&self) -> bool {
        self.get(Modifier::CapsLock)
    }

    /// Sets `modifier` to `value`. Returns whether anything changed.
    pub fn set(&mut self, modifier: Modifier, value: bool) -> bool {
        if self.get(modifier) == value {
            return false;
        }
        let combo_before = self.language_combo();
        self.flags.set(modifier.flag(), value);
        tracing::debug!(?modifier, value, "modifier changed");
        self.notify(ModifierEvent::Changed { modifier, value });

        if !combo_before && self.language_combo() {
            tracing::debug!("language toggle requested");
            self.toggle_requested = true;
            self.notify(ModifierEvent::LanguageToggleRequested);
        }
        true
    }

    /// Flips caps lock and returns its new value.
    pub fn toggle_caps_lock(&mut self) -> bool {
        let value = !self.caps_lock();
        self.set(Modifier::CapsLock, value);
        value
    }

    /// Returns and clears the pending language-toggle signal.
    pub fn take_language_toggle(&mut self) -> bool {
        std::mem::take(&mut self.toggle_requested)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ModifierEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let subscriber: Subscriber = Box::new(subscriber);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn language_combo(&self) -> bool {
        self.flags.contains(Modifiers::SHIFT | Modifiers::ALT)
    }

    fn notify(&mut self, event: ModifierEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
    }
}
