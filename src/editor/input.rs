/// Pointer button that produced a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Origin of the surface's bounding rectangle in the host's client
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
}

/// A pointer press, in client coordinates, aimed at a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub client_x: f64,
    pub client_y: f64,
    pub button: PointerButton,
    pub target: SurfaceRect,
}

impl PointerPress {
    pub fn primary(client_x: f64, client_y: f64, target: SurfaceRect) -> Self {
        Self {
            client_x,
            client_y,
            button: PointerButton::Primary,
            target,
        }
    }

    /// Press position relative to the surface origin.
    pub fn local_position(&self) -> (f64, f64) {
        (
            self.client_x - self.target.left,
            self.client_y - self.target.top,
        )
    }
}
