pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod keyboard;
pub mod layout;
pub mod modifiers;
pub mod prefs;
mod text;
pub mod traits;
pub mod types;
pub mod widget;

pub use crate::config::KeyboardConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{KeyboardError, LayoutError, PreferenceError};
pub use crate::key::{KeyCode, KeyEvent, KeyPhase, Modifier, Modifiers, PhysicalKeyEvent, Side};
pub use crate::keyboard::{Keyboard, LayoutRequest, Response};
pub use crate::layout::{Caption, KeySheet, KeySpec, Layout, LayoutEntry};
pub use crate::modifiers::{ModifierEvent, ModifierState, SubscriptionId};
pub use crate::prefs::{JsonFileStore, MemoryStore};
pub use crate::traits::{LayoutSource, PreferenceStore, TextBuffer};
pub use crate::types::{Direction, Selection};
pub use crate::widget::{KeyWidget, resolve_caption};
