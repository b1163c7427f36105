//! Headless view-state driven by the rendering layer.
//!
//! # Responsibility
//! - Keep zoom, pan, drag and edit-dialog state in explicit owned values.
//! - Translate pointer and form input into item changes and lane re-packing.
//!
//! # Invariants
//! - No process-wide mutable state; every timeline owns its own state object.
//! - Pixel rendering stays with the caller; this layer only computes offsets.

pub mod drag;
pub mod editor;
pub mod timeline;
pub mod viewport;
