/// Which end of a selection moves under shift+arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The focus is at `end`.
    Forward,
    /// The focus is at `start`.
    Backward,
    /// Plain caret, nothing selected.
    #[default]
    None,
}

/// A caret or highlighted range in the text buffer.
///
/// Offsets are counted in grapheme clusters. The anchor is the fixed end and
/// the focus the end that moves; `direction` records which of `start`/`end`
/// is the focus. A collapsed selection always has `Direction::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// The fixed end of the selection.
    pub anchor: usize,
    /// The moving end of the selection.
    pub focus: usize,
    pub direction: Direction,
}

impl Selection {
    /// A collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            focus: offset,
            direction: Direction::None,
        }
    }

    /// Builds a selection from its bounds. The bounds may be given in either
    /// order; `direction` is dropped when they are equal.
    pub fn new(start: usize, end: usize, direction: Direction) -> Self {
        let (start, end) = (start.min(end), start.max(end));
        if start == end {
            return Self::caret(start);
        }
        match direction {
            Direction::Backward => Self {
                anchor: end,
                focus: start,
                direction,
            },
            Direction::Forward | Direction::None => Self {
                anchor: start,
                focus: end,
                direction,
            },
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Clamps both ends into `[0, len]`.
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start().min(len), self.end().min(len), self.direction)
    }
}
