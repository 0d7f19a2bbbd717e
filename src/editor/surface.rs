use crate::editor::color::Color;

/// A 2D raster target with fixed pixel dimensions.
///
/// Coordinates are in pixels, origin top left, y growing downward. The
/// editor issues only these three primitives.
pub trait Surface {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> f64 {
        (**self).width()
    }

    fn height(&self) -> f64 {
        (**self).height()
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        (**self).fill_rect(x, y, width, height, color)
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        (**self).fill_circle(cx, cy, radius, color)
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        (**self).stroke_line(x1, y1, x2, y2, color)
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
}

/// In-memory surface that records every draw call in order.
///
/// Useful for headless hosts that replay the commands onto their own
/// canvas, and for checking exactly what a render produced.
#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands issued since the most recent full-surface fill, including it.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| self.is_full_fill(cmd))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Number of full repaints recorded, counted by full-surface fills.
    pub fn repaint_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| self.is_full_fill(cmd))
            .count()
    }

    fn is_full_fill(&self, cmd: &DrawCommand) -> bool {
        matches!(
            *cmd,
            DrawCommand::FillRect { x, y, width, height, .. }
                if x <= 0.0 && y <= 0.0 && width >= self.width && height >= self.height
        )
    }
}

impl Surface for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}
