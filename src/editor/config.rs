#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::editor::{
    color::Color,
    error::{Axis, EditorError},
    viewport::check_bounds,
};

/// Smallest derived vertex radius, in pixels.
pub const MIN_VERTEX_RADIUS: f64 = 2.0;
/// Derived radius as a fraction of the surface's shorter side.
pub const VERTEX_RADIUS_SCALE: f64 = 0.01;

/// Bounds and style of a [`CurveEditor`](crate::editor::CurveEditor).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub vertex_color: Color,
    pub line_color: Color,
    pub background_color: Color,
    /// Fixed marker radius in pixels. `None` derives it from the surface size.
    pub vertex_radius: Option<f64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 100.0,
            vertex_color: Color::BLACK,
            line_color: Color::BLACK,
            background_color: Color::WHITE,
            vertex_radius: None,
        }
    }
}

impl EditorConfig {
    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_x = min;
        self.max_x = max;
        self
    }

    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_y = min;
        self.max_y = max;
        self
    }

    pub fn vertex_color(mut self, color: Color) -> Self {
        self.vertex_color = color;
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn vertex_radius(mut self, radius: f64) -> Self {
        self.vertex_radius = Some(radius);
        self
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        check_bounds(Axis::X, self.min_x, self.max_x)?;
        check_bounds(Axis::Y, self.min_y, self.max_y)?;

        if let Some(radius) = self.vertex_radius {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(EditorError::InvalidRadius(radius));
            }
        }

        Ok(())
    }

    /// Marker radius for a surface of the given size.
    pub fn effective_radius(&self, width: f64, height: f64) -> f64 {
        self.vertex_radius
            .unwrap_or_else(|| (width.min(height) * VERTEX_RADIUS_SCALE).max(MIN_VERTEX_RADIUS))
    }

    /// Apply a partial update, producing a new config. `self` is untouched.
    pub fn merged(&self, update: &ConfigUpdate) -> Self {
        Self {
            min_x: update.min_x.unwrap_or(self.min_x),
            max_x: update.max_x.unwrap_or(self.max_x),
            min_y: update.min_y.unwrap_or(self.min_y),
            max_y: update.max_y.unwrap_or(self.max_y),
            vertex_color: update.vertex_color.unwrap_or(self.vertex_color),
            line_color: update.line_color.unwrap_or(self.line_color),
            background_color: update.background_color.unwrap_or(self.background_color),
            vertex_radius: update.vertex_radius.or(self.vertex_radius),
        }
    }
}

/// Partial configuration; every `Some` field replaces the current value.
///
/// A `None` radius keeps the current one. An explicit radius is dropped with
/// [`CurveEditor::reset_vertex_radius`](crate::editor::CurveEditor::reset_vertex_radius).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub vertex_color: Option<Color>,
    pub line_color: Option<Color>,
    pub background_color: Option<Color>,
    pub vertex_radius: Option<f64>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_x = Some(min);
        self.max_x = Some(max);
        self
    }

    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_y = Some(min);
        self.max_y = Some(max);
        self
    }

    pub fn vertex_color(mut self, color: Color) -> Self {
        self.vertex_color = Some(color);
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn vertex_radius(mut self, radius: f64) -> Self {
        self.vertex_radius = Some(radius);
        self
    }
}
