// SPDX-License-Identifier: MPL-2.0
//! Edit state, undo history and the session that orchestrates them.
//!
//! - [`TransformState`] / [`TransformPatch`]: the edit parameters and partial
//!   updates to them
//! - [`HistoryStack`]: bounded linear undo/redo
//! - [`Session`]: the `NoImage -> ImageLoaded` state machine tying state,
//!   history, compositor and exporter together
//! - [`Shortcut`]: the keyboard table

mod history;
mod session;
mod shortcuts;
mod transform_state;

pub use history::{HistoryEntry, HistoryStack};
pub use session::{ChangeCause, EditorPhase, Session, SessionEvent, SessionObserver};
pub use shortcuts::{KeyChord, Shortcut};
pub use transform_state::{TransformPatch, TransformState};
