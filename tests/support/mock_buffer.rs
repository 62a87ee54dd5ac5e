use std::ops::Range;

use keycap_sync::traits::TextBuffer;
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Rope-backed buffer that counts the edits it receives.
pub struct MockBuffer {
    rope: Rope,
    pub edits: usize,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            edits: 0,
        }
    }

    // Grapheme offset to rope char index.
    fn char_index(&self, offset: usize) -> usize {
        self.rope
            .to_string()
            .graphemes(true)
            .take(offset)
            .map(|g| g.chars().count())
            .sum()
    }
}

impl TextBuffer for MockBuffer {
    fn len(&self) -> usize {
        self.rope.to_string().graphemes(true).count()
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.edits += 1;
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }
}
