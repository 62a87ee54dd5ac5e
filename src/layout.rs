//! Layout data: the multi-language key sheet and the per-language layouts
//! resolved from it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::key::KeyCode;
use crate::traits::LayoutSource;

/// A caption in the key sheet: either the same text for every language or
/// one text per language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Caption {
    Plain(String),
    PerLanguage(BTreeMap<String, String>),
}

impl Caption {
    pub fn for_language(&self, language: &str) -> Option<&str> {
        match self {
            Caption::Plain(text) => Some(text),
            Caption::PerLanguage(map) => map.get(language).map(String::as_str),
        }
    }
}

/// One key as described in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySpec {
    pub code: KeyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<Caption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_cap: Option<Caption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caps_cap: Option<Caption>,
}

impl KeySpec {
    fn captions(&self) -> impl Iterator<Item = &Caption> {
        [&self.cap, &self.shift_cap, &self.caps_cap]
            .into_iter()
            .flatten()
    }
}

/// Key sheet covering every language: rows of keys, each caption either plain
/// or keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySheet {
    rows: Vec<Vec<KeySpec>>,
}

impl KeySheet {
    pub fn new(rows: Vec<Vec<KeySpec>>) -> Self {
        Self { rows }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn rows(&self) -> &[Vec<KeySpec>] {
        &self.rows
    }

    /// Every language code mentioned by a per-language caption.
    pub fn languages(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .flatten()
            .flat_map(KeySpec::captions)
            .filter_map(|caption| match caption {
                Caption::PerLanguage(map) => Some(map.keys().cloned()),
                Caption::Plain(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Resolves the captions of every key for `language`.
    pub fn layout(&self, language: &str) -> Result<Layout, LayoutError> {
        if self.rows.iter().all(Vec::is_empty) {
            return Err(LayoutError::Empty);
        }
        let languages = self.languages();
        if !languages.is_empty() && !languages.contains(language) {
            return Err(LayoutError::UnknownLanguage(language.to_string()));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|spec| resolve_entry(spec, language)).collect())
            .collect();
        Ok(Layout {
            language: language.to_string(),
            rows,
        })
    }
}

impl LayoutSource for KeySheet {
    fn load(&self, language: &str) -> Result<Layout, LayoutError> {
        self.layout(language)
    }
}

fn resolve_entry(spec: &KeySpec, language: &str) -> LayoutEntry {
    let pick = |caption: &Option<Caption>| {
        caption
            .as_ref()
            .and_then(|c| c.for_language(language))
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    let base = pick(&spec.cap).unwrap_or_else(|| {
        tracing::warn!(code = %spec.code, language, "layout entry has no base caption");
        String::new()
    });
    LayoutEntry {
        code: spec.code.clone(),
        base,
        shift_variant: pick(&spec.shift_cap),
        caps_variant: pick(&spec.caps_cap),
    }
}

/// Caption data for one key position in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub code: KeyCode,
    pub base: String,
    pub shift_variant: Option<String>,
    pub caps_variant: Option<String>,
}

impl LayoutEntry {
    pub fn new(code: impl Into<KeyCode>, base: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            base: base.into(),
            shift_variant: None,
            caps_variant: None,
        }
    }

    pub fn with_shift(mut self, text: impl Into<String>) -> Self {
        self.shift_variant = Some(text.into());
        self
    }

    pub fn with_caps(mut self, text: impl Into<String>) -> Self {
        self.caps_variant = Some(text.into());
        self
    }
}

/// All key captions for one language, in display rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub language: String,
    pub rows: Vec<Vec<LayoutEntry>>,
}

impl Layout {
    pub fn new(language: impl Into<String>, rows: Vec<Vec<LayoutEntry>>) -> Self {
        Self {
            language: language.into(),
            rows,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.rows.iter().flatten()
    }

    pub fn entry(&self, code: &KeyCode) -> Option<&LayoutEntry> {
        self.entries().find(|e| &e.code == code)
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
