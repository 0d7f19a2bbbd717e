//! Interactive piecewise-linear curve editor.
//!
//! A [`CurveEditor`] owns a sorted list of [`Point`]s in data space, maps them
//! onto a fixed-size [`Surface`] and appends a vertex for every primary
//! pointer press. Drawn curves are plain data, so they can be handed to
//! [`crate::dsp::breakpoint::BreakpointCurve::from_points`] and played back as
//! envelopes.

/// Hex colors used for styling.
pub mod color;
/// Editor configuration and partial updates.
pub mod config;
/// The editor itself.
pub mod curve;
/// Error type for rejected configuration.
pub mod error;
/// Pointer events delivered by the host.
pub mod input;
/// Data-space vertices.
pub mod point;
/// Rendering targets.
pub mod surface;
/// Data ↔ pixel coordinate mapping.
pub mod viewport;

pub use color::Color;
pub use config::{ConfigUpdate, EditorConfig};
pub use curve::CurveEditor;
pub use error::{Axis, EditorError};
pub use input::{PointerButton, PointerPress, SurfaceRect};
pub use point::Point;
pub use surface::{DisplayList, DrawCommand, Surface};
pub use viewport::Viewport;
