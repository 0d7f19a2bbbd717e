use thiserror::Error;

/// Which data-space axis a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    /// `max <= min`, or a bound is NaN/infinite. Mapping through such bounds
    /// divides by zero.
    #[error("invalid {axis} bounds: min {min} must be finite and below max {max}")]
    InvalidBounds { axis: Axis, min: f64, max: f64 },

    #[error("surface has no area ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },

    #[error("vertex radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),
}
