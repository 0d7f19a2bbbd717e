use crate::editor::{
    error::{Axis, EditorError},
    point::Point,
};

/*
Coordinate Mapping
==================

Data space is the curve's own coordinate system: x runs over the domain
[min_x, max_x], y over the range [min_y, max_y], origin at the bottom left.

Pixel space is the surface: origin at the top left, y growing downward.

           data space                          pixel space
    max_y ┌───────────────┐             (0,0) ┌───────────────┐
          │               │                   │               │
          │       •       │     ───→          │       •       │
          │               │                   │               │
    min_y └───────────────┘                   └───────────────┘ (w,h)
        min_x           max_x

    px = (x - min_x) / domain * width
    py = height - (y - min_y) / range * height

and the inverses

    x = px / width * domain + min_x
    y = (height - py) / height * range + min_y

The two directions are exact inverses up to floating point rounding, and
the vertical flip is undone on the way back. Nothing is clamped: values
outside the bounds map outside the surface and back again.
*/

/// Data bounds paired with surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting bounds or dimensions that would make the
    /// mapping divide by zero.
    pub fn new(
        (min_x, max_x): (f64, f64),
        (min_y, max_y): (f64, f64),
        (width, height): (f64, f64),
    ) -> Result<Self, EditorError> {
        let viewport = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width,
            height,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        check_bounds(Axis::X, self.min_x, self.max_x)?;
        check_bounds(Axis::Y, self.min_y, self.max_y)?;

        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return Err(EditorError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Horizontal span of data space.
    pub fn domain(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical span of data space.
    pub fn range(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn data_to_pixel_x(&self, x: f64) -> f64 {
        ((x - self.min_x) / self.domain()) * self.width
    }

    pub fn data_to_pixel_y(&self, y: f64) -> f64 {
        self.height - ((y - self.min_y) / self.range()) * self.height
    }

    pub fn pixel_to_data_x(&self, px: f64) -> f64 {
        (px / self.width) * self.domain() + self.min_x
    }

    pub fn pixel_to_data_y(&self, py: f64) -> f64 {
        ((self.height - py) / self.height) * self.range() + self.min_y
    }

    pub fn data_to_pixel(&self, point: Point) -> (f64, f64) {
        (self.data_to_pixel_x(point.x), self.data_to_pixel_y(point.y))
    }

    pub fn pixel_to_data(&self, px: f64, py: f64) -> Point {
        Point::new(self.pixel_to_data_x(px), self.pixel_to_data_y(py))
    }
}

pub(crate) fn check_bounds(axis: Axis, min: f64, max: f64) -> Result<(), EditorError> {
    if min.is_finite() && max.is_finite() && max > min {
        Ok(())
    } else {
        Err(EditorError::InvalidBounds { axis, min, max })
    }
}
