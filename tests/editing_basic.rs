use keycap_sync::{Direction, Engine, KeyCode, KeyEvent, Modifiers, Selection, Side};

mod support;
use support::mock_buffer::MockBuffer;

fn key(code: &str) -> KeyEvent {
    KeyEvent::new(code)
}

fn typed(code: &str, text: &str) -> KeyEvent {
    KeyEvent::new(code).with_text(text)
}

fn engine(text: &str, selection: Selection) -> Engine<MockBuffer> {
    Engine::builder(MockBuffer::new(text))
        .selection(selection)
        .build()
}

#[test]
fn backspace_at_end_removes_last_char() {
    let mut eng = engine("cat", Selection::caret(3));
    let sel = eng.apply(&key("Backspace"));
    assert_eq!(eng.text(), "ca");
    assert_eq!(sel, Selection::caret(2));
}

#[test]
fn backspace_at_start_is_noop() {
    let mut eng = engine("cat", Selection::caret(0));
    let sel = eng.apply(&key("Backspace"));
    assert_eq!(eng.text(), "cat");
    assert_eq!(sel, Selection::caret(0));
}

#[test]
fn backspace_removes_selection_only() {
    let mut eng = engine("catalog", Selection::new(1, 4, Direction::Backward));
    let sel = eng.apply(&key("Backspace"));
    assert_eq!(eng.text(), "clog");
    assert_eq!(sel, Selection::caret(1));
}

#[test]
fn delete_with_selection_replaces_selection() {
    let mut eng = engine("cat", Selection::new(1, 3, Direction::Forward));
    let sel = eng.apply(&key("Delete"));
    assert_eq!(eng.text(), "c");
    assert_eq!(sel, Selection::caret(1));
}

#[test]
fn delete_removes_char_after_caret() {
    let mut eng = engine("cat", Selection::caret(1));
    let sel = eng.apply(&key("Delete"));
    assert_eq!(eng.text(), "ct");
    assert_eq!(sel, Selection::caret(1));

    let mut eng = engine("cat", Selection::caret(3));
    let sel = eng.apply(&key("Delete"));
    assert_eq!(eng.text(), "cat");
    assert_eq!(sel, Selection::caret(3));
}

#[test]
fn whitespace_keys_insert_their_characters() {
    let mut eng = engine("ab", Selection::caret(1));
    eng.apply(&key("Tab"));
    eng.apply(&key("Enter"));
    let sel = eng.apply(&key("Space"));
    assert_eq!(eng.text(), "a\t\n b");
    assert_eq!(sel, Selection::caret(4));
}

#[test]
fn whitespace_keys_ignore_their_caption() {
    let mut eng = engine("", Selection::caret(0));
    eng.apply(&typed("Tab", "Tab"));
    eng.apply(&typed("Enter", "Enter"));
    assert_eq!(eng.text(), "\t\n");
}

#[test]
fn typing_replaces_selection() {
    let mut eng = engine("hello world", Selection::new(6, 11, Direction::Forward));
    let sel = eng.apply(&typed("KeyX", "x"));
    assert_eq!(eng.text(), "hello x");
    assert_eq!(sel, Selection::caret(7));
    assert_eq!(sel.direction, Direction::None);
}

#[test]
fn enter_replaces_selection() {
    let mut eng = engine("one two", Selection::new(3, 4, Direction::Backward));
    let sel = eng.apply(&key("Enter"));
    assert_eq!(eng.text(), "one\ntwo");
    assert_eq!(sel, Selection::caret(4));
}

#[test]
fn shortcut_modifiers_suppress_typing() {
    for mods in [Modifiers::CTRL, Modifiers::ALT, Modifiers::META] {
        let mut eng = engine("abc", Selection::caret(3));
        let sel = eng.apply(&typed("KeyC", "c").with_mods(mods));
        assert_eq!(eng.text(), "abc");
        assert_eq!(sel, Selection::caret(3));
    }
}

#[test]
fn shift_does_not_suppress_typing() {
    let mut eng = engine("", Selection::caret(0));
    eng.apply(&typed("KeyA", "A").with_mods(Modifiers::SHIFT));
    assert_eq!(eng.text(), "A");
}

#[test]
fn modifier_keys_never_insert() {
    let codes = [
        KeyCode::Shift(Side::Left),
        KeyCode::Shift(Side::Right),
        KeyCode::Alt(Side::Left),
        KeyCode::Control(Side::Right),
        KeyCode::Meta(Side::Left),
        KeyCode::CapsLock,
    ];
    let mut eng = engine("abc", Selection::new(0, 2, Direction::Forward));
    for code in codes {
        let caption = code.as_str().to_string();
        let sel = eng.apply(&KeyEvent::new(code).with_text(caption));
        assert_eq!(sel, Selection::new(0, 2, Direction::Forward));
    }
    assert_eq!(eng.text(), "abc");
    assert_eq!(eng.buffer().edits, 0);
}

#[test]
fn row_navigation_is_ignored() {
    let mut eng = engine("ab\ncd", Selection::caret(4));
    assert_eq!(eng.apply(&typed("ArrowUp", "▲")), Selection::caret(4));
    assert_eq!(eng.apply(&typed("ArrowDown", "▼")), Selection::caret(4));
    assert_eq!(eng.text(), "ab\ncd");
}

#[test]
fn unmapped_keys_without_caption_are_noops() {
    let mut eng = engine("abc", Selection::caret(1));
    assert_eq!(eng.apply(&key("F13")), Selection::caret(1));
    assert_eq!(eng.apply(&typed("F1", "")), Selection::caret(1));
    assert_eq!(eng.text(), "abc");
}

#[test]
fn backspace_removes_whole_grapheme() {
    let mut eng = Engine::new("hi👍🏽".to_string());
    assert_eq!(eng.selection(), Selection::caret(3));
    let sel = eng.apply(&key("Backspace"));
    assert_eq!(eng.text(), "hi");
    assert_eq!(sel, Selection::caret(2));
}

#[test]
fn inserting_multi_char_caption_moves_past_it() {
    let mut eng = Engine::new(String::from("x"));
    let sel = eng.apply(&typed("KeyE", "é!"));
    assert_eq!(eng.text(), "xé!");
    assert_eq!(sel, Selection::caret(3));
}

#[test]
fn combining_mark_keeps_caret_before_next_char() {
    let mut eng = Engine::builder(String::from("ab")).caret(1).build();
    let sel = eng.apply(&typed("KeyE", "\u{301}"));
    assert_eq!(eng.text(), "a\u{301}b");
    assert_eq!(sel, Selection::caret(1));

    eng.apply(&typed("KeyX", "x"));
    assert_eq!(eng.text(), "a\u{301}xb");
    assert_eq!(eng.selection(), Selection::caret(2));
}

#[test]
fn zwj_joins_emoji_and_caret_follows_sequence() {
    let mut eng = engine("👩z", Selection::caret(1));
    eng.apply(&typed("KeyJ", "\u{200d}"));
    let sel = eng.apply(&typed("KeyK", "💻"));
    assert_eq!(eng.text(), "👩\u{200d}💻z");
    assert_eq!(sel, Selection::caret(1));
}

#[test]
fn into_buffer_returns_edited_buffer() {
    let mut eng = engine("ab", Selection::caret(2));
    eng.apply(&typed("KeyC", "c"));
    let buffer = eng.into_buffer();
    assert_eq!(buffer.edits, 1);
}

#[test]
fn out_of_range_selection_is_clamped() {
    let mut eng = engine("abc", Selection::caret(0));
    let sel = eng.set_selection(Selection::new(2, 40, Direction::Forward));
    assert_eq!(sel, Selection::new(2, 3, Direction::Forward));
    let sel = eng.apply(&key("Backspace"));
    assert_eq!(eng.text(), "ab");
    assert_eq!(sel, Selection::caret(2));
}

#[test]
fn set_text_keeps_selection_in_bounds() {
    let mut eng = Engine::new(String::from("a long line"));
    eng.set_text("ab");
    assert_eq!(eng.selection(), Selection::caret(2));
    assert_eq!(eng.snapshot().text, "ab");
}

#[test]
fn builder_defaults_caret_to_end() {
    let eng = Engine::builder(String::from("abcd")).build();
    assert_eq!(eng.selection(), Selection::caret(4));
    let eng = Engine::builder(String::from("abcd")).caret(9).build();
    assert_eq!(eng.selection(), Selection::caret(4));
}
