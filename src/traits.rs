use std::ops::Range;

use crate::error::{LayoutError, PreferenceError};
use crate::layout::Layout;

/// Text storage the engine edits.
///
/// All offsets are grapheme-cluster indices.
pub trait TextBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the graphemes in `range` with `text`. Implementations may
    /// assume `range.start <= range.end <= self.len()`.
    fn replace_range(&mut self, range: Range<usize>, text: &str);

    fn text(&self) -> String;
}

/// Supplies per-language layouts.
pub trait LayoutSource {
    fn load(&self, language: &str) -> Result<Layout, LayoutError>;
}

/// Durable key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}
