use std::collections::{HashMap, HashSet};

use crate::config::KeyboardConfig;
use crate::engine::Engine;
use crate::error::{KeyboardError, LayoutError, Result};
use crate::key::{KeyCode, KeyEvent, KeyPhase, Modifier, Modifiers, PhysicalKeyEvent};
use crate::layout::{Layout, LayoutEntry};
use crate::modifiers::{ModifierEvent, ModifierState, SubscriptionId};
use crate::traits::{LayoutSource, PreferenceStore, TextBuffer};
use crate::types::Selection;
use crate::widget::KeyWidget;

/// A pending layout load. Hand it back to [`Keyboard::complete_layout`] with
/// the load result; only the most recent request is ever applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRequest {
    pub generation: u64,
    pub language: String,
}

/// What the host has to act on after feeding an event in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// New selection if the event reached the text engine.
    pub selection: Option<Selection>,
    /// Set when shift+alt asked for the other language.
    pub layout_request: Option<LayoutRequest>,
}

/// The on-screen keyboard: modifier state, key widgets and the text engine
/// they drive.
///
/// Physical key events and clicks on widgets both update the same
/// [`ModifierState`]; a modifier is held while either path holds it.
pub struct Keyboard<B = String> {
    config: KeyboardConfig,
    modifiers: ModifierState,
    widgets: Vec<KeyWidget>,
    rows: Vec<Vec<usize>>,
    index: HashMap<KeyCode, usize>,
    language: String,
    requested_language: String,
    generation: u64,
    physical_held: Modifiers,
    virtual_held: Modifiers,
    engine: Engine<B>,
    prefs: Box<dyn PreferenceStore>,
}

impl<B: TextBuffer> Keyboard<B> {
    /// Loads the stored (or default) language and builds every key widget.
    ///
    /// Fails only when that first layout cannot be loaded.
    pub fn new(
        config: KeyboardConfig,
        source: &dyn LayoutSource,
        prefs: Box<dyn PreferenceStore>,
        engine: Engine<B>,
    ) -> Result<Self> {
        config.validate()?;
        let language = match prefs.get(&config.preference_key) {
            Some(stored) if config.supports(&stored) => stored,
            Some(stored) => {
                tracing::warn!(
                    stored = %stored,
                    fallback = %config.default_language,
                    "stored keyboard language is not configured"
                );
                config.default_language.clone()
            }
            None => config.default_language.clone(),
        };

        let layout = source
            .load(&language)
            .and_then(|layout| {
                if layout.key_count() == 0 {
                    Err(LayoutError::Empty)
                } else {
                    Ok(layout)
                }
            })
            .map_err(|source| KeyboardError::Init {
                language: language.clone(),
                source,
            })?;

        let mut keyboard = Self {
            config,
            modifiers: ModifierState::new(),
            widgets: Vec::new(),
            rows: Vec::new(),
            index: HashMap::new(),
            requested_language: language.clone(),
            language,
            generation: 0,
            physical_held: Modifiers::empty(),
            virtual_held: Modifiers::empty(),
            engine,
            prefs,
        };
        keyboard.build_widgets(layout);
        tracing::info!(
            language = %keyboard.language,
            keys = keyboard.widgets.len(),
            "keyboard ready"
        );
        Ok(keyboard)
    }

    fn build_widgets(&mut self, layout: Layout) {
        for row in layout.rows {
            let mut indices = Vec::with_capacity(row.len());
            for entry in row {
                if self.index.contains_key(&entry.code) {
                    tracing::warn!(code = %entry.code, "duplicate key in layout, ignoring");
                    continue;
                }
                let i = self.widgets.len();
                self.index.insert(entry.code.clone(), i);
                self.widgets.push(KeyWidget::new(entry, &self.modifiers));
                indices.push(i);
            }
            self.rows.push(indices);
        }
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Language of the layout currently shown.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ModifierEvent) + 'static) -> SubscriptionId {
        self.modifiers.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.modifiers.unsubscribe(id)
    }

    pub fn widget(&self, code: &KeyCode) -> Option<&KeyWidget> {
        self.index.get(code).map(|&i| &self.widgets[i])
    }

    pub fn widgets(&self) -> &[KeyWidget] {
        &self.widgets
    }

    /// Widgets in display rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&KeyWidget>> + '_ {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&i| &self.widgets[i]).collect())
    }

    pub fn engine(&self) -> &Engine<B> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<B> {
        &mut self.engine
    }

    pub fn text(&self) -> String {
        self.engine.text()
    }

    pub fn selection(&self) -> Selection {
        self.engine.selection()
    }

    /// Feeds a key event from the host's physical keyboard.
    pub fn handle_physical(&mut self, event: PhysicalKeyEvent) -> Response {
        let down = event.phase == KeyPhase::Down;
        if !event.repeat {
            let mut held = event.mods & Modifiers::HELD;
            if let Some(modifier) = event.code.modifier()
                && modifier != Modifier::CapsLock
            {
                held.set(modifier.flag(), down);
            }
            self.physical_held = held;
            self.sync_held();
        }

        let mut response = Response::default();
        if down {
            let key_event = match self.index.get(&event.code) {
                // Light the widget; the echo is not a user action on it.
                Some(&i) => self.widgets[i].press(&self.modifiers, false),
                None => KeyEvent::new(event.code.clone())
                    .with_mods(self.modifiers.held())
                    .untrusted(),
            };
            response.selection = self.forward(&key_event);
        } else {
            if event.code == KeyCode::CapsLock {
                self.toggle_caps_lock();
            }
            if let Some(&i) = self.index.get(&event.code) {
                self.widgets[i].release(&self.modifiers);
            }
        }
        response.layout_request = self.poll_language_toggle();
        response
    }

    /// Pointer-down on an on-screen key.
    pub fn press_key(&mut self, code: &KeyCode) -> Response {
        let Some(&i) = self.index.get(code) else {
            tracing::debug!(%code, "press on unknown key");
            return Response::default();
        };
        let mut event = self.widgets[i].press(&self.modifiers, true);
        self.simulate_hardware(&event.code, KeyPhase::Down);
        event.mods = self.modifiers.held();
        Response {
            selection: self.forward(&event),
            layout_request: self.poll_language_toggle(),
        }
    }

    /// Pointer-up on an on-screen key.
    pub fn release_key(&mut self, code: &KeyCode) -> Response {
        let Some(&i) = self.index.get(code) else {
            return Response::default();
        };
        self.simulate_hardware(code, KeyPhase::Up);
        self.widgets[i].release(&self.modifiers);
        Response {
            selection: None,
            layout_request: self.poll_language_toggle(),
        }
    }

    /// Pointer left an on-screen key. Releases it if it was held down.
    pub fn pointer_leave(&mut self, code: &KeyCode) -> Response {
        if self.widget(code).is_some_and(KeyWidget::is_pressed) {
            self.release_key(code)
        } else {
            Response::default()
        }
    }

    /// Starts a switch to the other language. The target is computed from
    /// the latest request, so two quick toggles land back where they began.
    pub fn request_language_switch(&mut self) -> LayoutRequest {
        self.generation += 1;
        let language = self
            .config
            .other_language(&self.requested_language)
            .to_string();
        self.requested_language = language.clone();
        tracing::info!(generation = self.generation, %language, "layout requested");
        LayoutRequest {
            generation: self.generation,
            language,
        }
    }

    /// Applies the outcome of a layout load.
    ///
    /// Returns `Ok(false)` when a newer request superseded this one. On
    /// failure the current layout stays in place.
    pub fn complete_layout(
        &mut self,
        request: &LayoutRequest,
        result: std::result::Result<Layout, LayoutError>,
    ) -> Result<bool> {
        if request.generation != self.generation {
            tracing::debug!(
                generation = request.generation,
                latest = self.generation,
                language = %request.language,
                "discarding stale layout"
            );
            return Ok(false);
        }

        let layout = match result {
            Ok(layout) if layout.key_count() > 0 => layout,
            Ok(_) => return Err(self.fail_switch(request, LayoutError::Empty)),
            Err(e) => return Err(self.fail_switch(request, e)),
        };

        self.replace_layout(layout);
        self.language = request.language.clone();
        tracing::info!(language = %self.language, "layout switched");

        if let Err(e) = self.save_language() {
            tracing::warn!(error = %e, "failed to persist keyboard language");
        }
        Ok(true)
    }

    /// Stores the shown language under the configured preference key.
    pub fn save_language(&mut self) -> Result<()> {
        self.prefs.set(&self.config.preference_key, &self.language)?;
        Ok(())
    }

    /// Requests the other language and loads it from `source` right away.
    pub fn switch_language(&mut self, source: &dyn LayoutSource) -> Result<bool> {
        let request = self.request_language_switch();
        let result = source.load(&request.language);
        self.complete_layout(&request, result)
    }

    fn fail_switch(&mut self, request: &LayoutRequest, error: LayoutError) -> KeyboardError {
        tracing::warn!(
            language = %request.language,
            error = %error,
            "layout load failed, keeping current layout"
        );
        self.requested_language = self.language.clone();
        KeyboardError::Layout(error)
    }

    /// Re-captions the existing widgets in place.
    fn replace_layout(&mut self, layout: Layout) {
        let mut seen = HashSet::new();
        for entry in layout.rows.into_iter().flatten() {
            match self.index.get(&entry.code) {
                Some(&i) => {
                    seen.insert(i);
                    self.widgets[i].replace_entry(entry, &self.modifiers);
                }
                None => {
                    tracing::warn!(code = %entry.code, "layout key has no widget, ignoring");
                }
            }
        }
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            if !seen.contains(&i) {
                tracing::warn!(code = %widget.code(), "key missing from new layout");
                let blank = LayoutEntry::new(widget.code().clone(), "");
                widget.replace_entry(blank, &self.modifiers);
            }
        }
    }

    /// Replays a widget press/release as the matching hardware transition.
    fn simulate_hardware(&mut self, code: &KeyCode, phase: KeyPhase) {
        match code.modifier() {
            Some(Modifier::CapsLock) => {
                if phase == KeyPhase::Down {
                    self.toggle_caps_lock();
                }
            }
            Some(modifier) => {
                self.virtual_held
                    .set(modifier.flag(), phase == KeyPhase::Down);
                self.sync_held();
            }
            None => {}
        }
    }

    fn sync_held(&mut self) {
        let held = self.physical_held | self.virtual_held;
        let mut changed = false;
        for modifier in Modifier::ALL {
            if modifier == Modifier::CapsLock {
                continue;
            }
            changed |= self.modifiers.set(modifier, held.contains(modifier.flag()));
        }
        if changed {
            self.refresh_captions();
        }
    }

    fn toggle_caps_lock(&mut self) {
        self.modifiers.toggle_caps_lock();
        self.refresh_captions();
    }

    fn refresh_captions(&mut self) {
        for widget in &mut self.widgets {
            widget.refresh(&self.modifiers);
        }
    }

    fn poll_language_toggle(&mut self) -> Option<LayoutRequest> {
        self.modifiers
            .take_language_toggle()
            .then(|| self.request_language_switch())
    }

    fn forward(&mut self, event: &KeyEvent) -> Option<Selection> {
        if event.code.is_modifier() {
            return None;
        }
        tracing::debug!(code = %event.code, trusted = event.trusted, "forwarding key");
        Some(self.engine.apply(event))
    }
}
