use crate::key::{KeyCode, KeyEvent};
use crate::traits::TextBuffer;
use crate::types::{Direction, Selection};

/// Selection-aware text editing driven by logical key events.
///
/// The engine owns the buffer and the selection; every mutation goes through
/// [`Engine::apply`]. Offsets never leave `[0, len]`.
#[derive(Debug, Clone)]
pub struct Engine<B = String> {
    buffer: B,
    selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub text: String,
    pub selection: Selection,
}

pub struct EngineBuilder<B> {
    buffer: B,
    selection: Option<Selection>,
}

impl<B: TextBuffer> EngineBuilder<B> {
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            selection: None,
        }
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn caret(self, offset: usize) -> Self {
        self.selection(Selection::caret(offset))
    }

    /// Builds the engine. Without an explicit selection the caret sits at the
    /// end of the text.
    pub fn build(self) -> Engine<B> {
        let len = self.buffer.len();
        let selection = self
            .selection
            .unwrap_or(Selection::caret(len))
            .clamp(len);
        Engine {
            buffer: self.buffer,
            selection,
        }
    }
}

impl Default for Engine<String> {
    fn default() -> Self {
        EngineBuilder::new(String::new()).build()
    }
}

impl<B: TextBuffer> Engine<B> {
    pub fn new(buffer: B) -> Self {
        EngineBuilder::new(buffer).build()
    }

    pub fn builder(buffer: B) -> EngineBuilder<B> {
        EngineBuilder::new(buffer)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            text: self.buffer.text(),
            selection: self.selection,
        }
    }

    /// Host-driven caret placement, e.g. a mouse click in the text surface.
    pub fn set_selection(&mut self, selection: Selection) -> Selection {
        self.selection = selection.clamp(self.buffer.len());
        self.selection
    }

    /// Replaces the whole text, keeping the selection where it still fits.
    pub fn set_text(&mut self, text: &str) -> Selection {
        let len = self.buffer.len();
        self.buffer.replace_range(0..len, text);
        self.set_selection(self.selection)
    }

    /// Applies one key event and returns the resulting selection.
    pub fn apply(&mut self, event: &KeyEvent) -> Selection {
        let len = self.buffer.len();
        let current = self.selection.clamp(len);
        let (start, end) = (current.start(), current.end());
        let collapsed = start == end;

        let next = match &event.code {
            KeyCode::Backspace => {
                let from = if collapsed { start.saturating_sub(1) } else { start };
                self.buffer.replace_range(from..end, "");
                Selection::caret(from)
            }
            KeyCode::Delete => {
                let to = if collapsed { (end + 1).min(len) } else { end };
                self.buffer.replace_range(start..to, "");
                Selection::caret(start)
            }
            KeyCode::Tab => self.insert(start, end, "\t"),
            KeyCode::Enter => self.insert(start, end, "\n"),
            KeyCode::Space => self.insert(start, end, " "),

            KeyCode::ArrowLeft if event.shift() => {
                if current.direction == Direction::Forward && !collapsed {
                    Selection::new(start, end - 1, Direction::Forward)
                } else {
                    Selection::new(start.saturating_sub(1), end, Direction::Backward)
                }
            }
            KeyCode::ArrowLeft if collapsed => Selection::caret(start.saturating_sub(1)),
            KeyCode::ArrowLeft => Selection::caret(start),

            KeyCode::ArrowRight if event.shift() => {
                if current.direction == Direction::Backward && !collapsed {
                    Selection::new(start + 1, end, Direction::Backward)
                } else {
                    Selection::new(start, (end + 1).min(len), Direction::Forward)
                }
            }
            KeyCode::ArrowRight if collapsed => Selection::caret((end + 1).min(len)),
            KeyCode::ArrowRight => Selection::caret(end),

            // Row navigation is not supported.
            KeyCode::ArrowUp | KeyCode::ArrowDown => current,

            KeyCode::Shift(_)
            | KeyCode::Alt(_)
            | KeyCode::Control(_)
            | KeyCode::Meta(_)
            | KeyCode::CapsLock => current,

            KeyCode::Other(_) => {
                if event.mods.has_shortcut_modifier() {
                    current
                } else {
                    match event.text.as_deref() {
                        Some(text) if !text.is_empty() => self.insert(start, end, text),
                        _ => current,
                    }
                }
            }
        };

        self.selection = next.clamp(self.buffer.len());
        tracing::trace!(
            code = %event.code,
            start = self.selection.start(),
            end = self.selection.end(),
            "applied key"
        );
        self.selection
    }

    /// The caret lands before whatever followed `end`. Inserted text can merge
    /// with its neighbours (combining marks, ZWJ), so it is measured from the
    /// tail rather than by counting `text` alone.
    fn insert(&mut self, start: usize, end: usize, text: &str) -> Selection {
        let tail = self.buffer.len() - end;
        self.buffer.replace_range(start..end, text);
        Selection::caret(self.buffer.len().saturating_sub(tail))
    }
}
