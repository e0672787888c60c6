// SPDX-License-Identifier: MPL-2.0
//! Editing session: the explicit owner of one image's edit state.
//!
//! A [`Session`] moves between two phases. In [`EditorPhase::NoImage`] every
//! edit or export is a caller error ([`Error::NoImageLoaded`]). Loading an
//! image seeds the history with the configured default state and renders the
//! first display raster; every later state change re-renders it.
//!
//! The `dirty` flag is set by `update` and `reset` and cleared by `load`,
//! `clear` and a successful export. Undo and redo leave it alone, even when
//! they land back on the initial state.

use crate::config::EditorConfig;
use crate::diagnostics::{ActivityKind, ActivityLog};
use crate::editor::shortcuts::{KeyChord, Shortcut};
use crate::editor::{HistoryStack, TransformPatch, TransformState};
use crate::error::{Error, Result};
use crate::media::compositor::{self, OutputRaster, RenderOptions};
use crate::media::{ExportRequest, ExportedImage, Exporter, SaveSink, SourceImage};
use std::fmt;
use std::path::Path;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    NoImage,
    ImageLoaded { dirty: bool },
}

/// Which operation produced a [`SessionEvent::StateChanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Update,
    Reset,
    Undo,
    Redo,
}

/// Notifications delivered to subscribed observers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Loaded { width: u32, height: u32 },
    StateChanged {
        state: TransformState,
        cause: ChangeCause,
    },
    Exported { filename: String, bytes: usize },
    Cleared,
}

/// Receives [`SessionEvent`]s. Closures taking `&SessionEvent` implement it.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event);
    }
}

/// Everything that only exists while an image is loaded.
#[derive(Debug)]
struct LoadedImage {
    source: SourceImage,
    state: TransformState,
    history: HistoryStack,
    display: OutputRaster,
    dirty: bool,
}

/// Caller-owned editor state for one image at a time.
pub struct Session<S: SaveSink> {
    config: EditorConfig,
    render_options: RenderOptions,
    exporter: Exporter,
    sink: S,
    image: Option<LoadedImage>,
    observers: Vec<Box<dyn SessionObserver>>,
    activity: ActivityLog,
}

impl<S: SaveSink + fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("sink", &self.sink)
            .field("phase", &self.phase())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: SaveSink> Session<S> {
    /// Creates an empty session delivering exports to `sink`.
    #[must_use]
    pub fn new(config: EditorConfig, sink: S) -> Self {
        Self {
            render_options: config.render_options(),
            exporter: Exporter::new(config.export.filename_prefix.clone()),
            activity: ActivityLog::new(config.log_capacity()),
            config,
            sink,
            image: None,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for all future events.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Makes `source` the current image, replacing any previous one.
    ///
    /// The history is seeded with the configured default state and the
    /// session is clean afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the first display raster cannot be
    /// produced; the previous image (if any) is kept in that case.
    pub fn load(&mut self, source: SourceImage) -> Result<()> {
        let state = self.config.defaults;
        let display = match compositor::render(&source, &state, &self.render_options) {
            Ok(display) => display,
            Err(err) => return self.fail("load", err),
        };

        let mut history = HistoryStack::new(self.config.history_capacity())
            .with_deduplication(self.config.history.deduplicate);
        history.push(state);

        let (width, height) = source.dimensions();
        self.image = Some(LoadedImage {
            source,
            state,
            history,
            display,
            dirty: false,
        });

        tracing::info!(width, height, "image loaded");
        self.activity.record(ActivityKind::Loaded { width, height });
        self.emit(&SessionEvent::Loaded { width, height });
        Ok(())
    }

    /// Opens an image file and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Load`] if the file cannot be read or
    /// decoded, otherwise as [`Session::load`].
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        match SourceImage::open(path.as_ref()) {
            Ok(source) => self.load(source),
            Err(err) => self.fail("load", err),
        }
    }

    /// Discards the image, its state and its history. No-op without an image.
    pub fn clear(&mut self) {
        if self.image.take().is_none() {
            return;
        }
        tracing::info!("image cleared");
        self.activity.record(ActivityKind::Cleared);
        self.emit(&SessionEvent::Cleared);
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Merges `patch` into the current state (clamping every field), records
    /// the result in history and marks the session dirty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImageLoaded`] without an image, or
    /// [`Error::Render`] if the display cannot be refreshed (nothing changes
    /// in that case).
    pub fn update(&mut self, patch: &TransformPatch) -> Result<TransformState> {
        let result = self.commit(|state| state.apply(patch), ChangeCause::Update);
        self.track("update", result)
    }

    /// Restores the configured default state as a new history entry and marks
    /// the session dirty.
    ///
    /// # Errors
    ///
    /// As [`Session::update`].
    pub fn reset(&mut self) -> Result<TransformState> {
        let defaults = self.config.defaults;
        let result = self.commit(|_| defaults, ChangeCause::Reset);
        self.track("reset", result)
    }

    /// Steps back in history. `Ok(None)` at the oldest entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImageLoaded`] without an image, or
    /// [`Error::Render`] if the display cannot be refreshed.
    pub fn undo(&mut self) -> Result<Option<TransformState>> {
        let result = self.step(ChangeCause::Undo);
        self.track("undo", result)
    }

    /// Steps forward in history. `Ok(None)` at the newest entry.
    ///
    /// # Errors
    ///
    /// As [`Session::undo`].
    pub fn redo(&mut self) -> Result<Option<TransformState>> {
        let result = self.step(ChangeCause::Redo);
        self.track("redo", result)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Re-renders the current state at full resolution, encodes it and hands
    /// it to the sink. Clears the dirty flag on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImageLoaded`] without an image, or the render,
    /// encode or sink error.
    pub fn export(&mut self, request: &ExportRequest) -> Result<ExportedImage> {
        let result = self.export_inner(request);
        self.track("export", result)
    }

    /// Exports with the configured format, quality and a generated filename.
    ///
    /// # Errors
    ///
    /// As [`Session::export`].
    pub fn export_with_defaults(&mut self) -> Result<ExportedImage> {
        let request = self.config.export_request();
        self.export(&request)
    }

    fn export_inner(&mut self, request: &ExportRequest) -> Result<ExportedImage> {
        let image = self.image.as_mut().ok_or(Error::NoImageLoaded)?;
        let exported = self
            .exporter
            .export(&image.source, &image.state, request, &mut self.sink)?;
        image.dirty = false;

        self.activity.record(ActivityKind::Exported {
            filename: exported.filename.clone(),
            format: exported.format,
            bytes: exported.bytes.len(),
        });
        self.emit(&SessionEvent::Exported {
            filename: exported.filename.clone(),
            bytes: exported.bytes.len(),
        });
        Ok(exported)
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Runs the action bound to `chord`, if any.
    ///
    /// Returns the matched shortcut, or `Ok(None)` for unbound chords (which
    /// are ignored even without an image).
    ///
    /// # Errors
    ///
    /// Propagates the error of the bound operation.
    pub fn dispatch_shortcut(&mut self, chord: &KeyChord) -> Result<Option<Shortcut>> {
        let Some(shortcut) = Shortcut::from_chord(chord) else {
            return Ok(None);
        };
        tracing::debug!(?shortcut, "keyboard shortcut");
        match shortcut {
            Shortcut::Undo => {
                self.undo()?;
            }
            Shortcut::Redo => {
                self.redo()?;
            }
            Shortcut::Export => {
                self.export_with_defaults()?;
            }
            Shortcut::Reset => {
                self.reset()?;
            }
        }
        Ok(Some(shortcut))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> EditorPhase {
        match &self.image {
            None => EditorPhase::NoImage,
            Some(image) => EditorPhase::ImageLoaded { dirty: image.dirty },
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.image.as_ref().is_some_and(|image| image.dirty)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.image
            .as_ref()
            .is_some_and(|image| image.history.can_undo())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.image
            .as_ref()
            .is_some_and(|image| image.history.can_redo())
    }

    #[must_use]
    pub fn current_state(&self) -> Option<TransformState> {
        self.image.as_ref().map(|image| image.state)
    }

    /// The display raster for the current state (grid included if enabled).
    #[must_use]
    pub fn current_raster(&self) -> Option<&OutputRaster> {
        self.image.as_ref().map(|image| &image.display)
    }

    #[must_use]
    pub fn history(&self) -> Option<&HistoryStack> {
        self.image.as_ref().map(|image| &image.history)
    }

    #[must_use]
    pub fn source(&self) -> Option<&SourceImage> {
        self.image.as_ref().map(|image| &image.source)
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Renders the next state first so a failed render leaves the session
    /// untouched, then records it.
    fn commit(
        &mut self,
        next: impl FnOnce(&TransformState) -> TransformState,
        cause: ChangeCause,
    ) -> Result<TransformState> {
        let image = self.image.as_mut().ok_or(Error::NoImageLoaded)?;
        let state = next(&image.state);
        image.display = compositor::render(&image.source, &state, &self.render_options)?;
        image.state = state;
        if !image.history.push(state) {
            tracing::trace!(?cause, "state unchanged, nothing recorded");
            return Ok(state);
        }
        image.dirty = true;

        tracing::debug!(?cause, ?state, "state changed");
        self.activity.record(match cause {
            ChangeCause::Reset => ActivityKind::Reset,
            _ => ActivityKind::Updated { state },
        });
        self.emit(&SessionEvent::StateChanged { state, cause });
        Ok(state)
    }

    fn step(&mut self, cause: ChangeCause) -> Result<Option<TransformState>> {
        let image = self.image.as_mut().ok_or(Error::NoImageLoaded)?;
        let undo = cause == ChangeCause::Undo;
        let moved = if undo {
            image.history.undo()
        } else {
            image.history.redo()
        };

        let Some(state) = moved else {
            self.activity.record(if undo {
                ActivityKind::Undo { applied: false }
            } else {
                ActivityKind::Redo { applied: false }
            });
            return Ok(None);
        };

        match compositor::render(&image.source, &state, &self.render_options) {
            Ok(display) => image.display = display,
            Err(err) => {
                // Put the cursor back where it was
                if undo {
                    image.history.redo();
                } else {
                    image.history.undo();
                }
                return Err(err);
            }
        }
        image.state = state;

        tracing::debug!(?cause, ?state, "history step");
        self.activity.record(if undo {
            ActivityKind::Undo { applied: true }
        } else {
            ActivityKind::Redo { applied: true }
        });
        self.emit(&SessionEvent::StateChanged { state, cause });
        Ok(Some(state))
    }

    fn emit(&mut self, event: &SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    /// Logs and records a failed operation, passing the result through.
    fn track<T>(&mut self, operation: &str, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => self.fail(operation, err),
        }
    }

    fn fail<T>(&mut self, operation: &str, err: Error) -> Result<T> {
        tracing::warn!(operation, error = %err, "session operation failed");
        self.activity.record(ActivityKind::Failed {
            operation: operation.to_string(),
            error: err.kind().to_string(),
        });
        Err(err)
    }
}
