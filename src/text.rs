use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextBuffer;

/// Byte index of the grapheme at `offset`, or `s.len()` past the end.
fn byte_index(s: &str, offset: usize) -> usize {
    s.grapheme_indices(true)
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl TextBuffer for String {
    fn len(&self) -> usize {
        self.graphemes(true).count()
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let start = byte_index(self, range.start);
        let end = byte_index(self, range.end).max(start);
        String::replace_range(self, start..end, text);
    }

    fn text(&self) -> String {
        self.clone()
    }
}
