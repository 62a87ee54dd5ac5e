use std::cell::RefCell;
use std::collections::HashSet;

use keycap_sync::{KeySheet, Layout, LayoutError, LayoutSource};

pub const KEYS_JSON: &str = include_str!("../fixtures/keys.json");

pub fn sheet() -> KeySheet {
    KeySheet::from_json_str(KEYS_JSON).expect("fixture parses")
}

/// Layout source over the fixture sheet that records what was asked for and
/// can be told to fail for chosen languages.
pub struct RecordingSource {
    sheet: KeySheet,
    failing: RefCell<HashSet<String>>,
    pub loads: RefCell<Vec<String>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self {
            sheet: sheet(),
            failing: RefCell::new(HashSet::new()),
            loads: RefCell::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, language: &str) {
        self.failing.borrow_mut().insert(language.to_string());
    }

    pub fn recover(&self, language: &str) {
        self.failing.borrow_mut().remove(language);
    }
}

impl LayoutSource for RecordingSource {
    fn load(&self, language: &str) -> Result<Layout, LayoutError> {
        self.loads.borrow_mut().push(language.to_string());
        if self.failing.borrow().contains(language) {
            return Err(LayoutError::UnknownLanguage(language.to_string()));
        }
        self.sheet.layout(language)
    }
}
