//! Envelope editor panel - a curve editor drawn on a braille canvas

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::debug;
use ratatui::{
    layout::Rect,
    style::{Color as TuiColor, Style},
    symbols,
    widgets::{
        canvas::{Canvas, Line, Points, Rectangle},
        Block, Borders,
    },
    Frame,
};

use additive_synth::{
    dsp::breakpoint::BreakpointCurve,
    editor::{
        Color, CurveEditor, DisplayList, DrawCommand, EditorConfig, EditorError, PointerButton,
        PointerPress, Surface, SurfaceRect,
    },
};

/// Spacing, in cells, of the dots that fill a vertex marker
const DOT_STEP: f64 = 0.25;

/// Surface measured in terminal cells. Keeps only the latest frame.
pub struct TerminalSurface {
    frame: DisplayList,
}

impl TerminalSurface {
    fn new(area: Rect) -> Self {
        Self {
            frame: DisplayList::new(area.width as f64, area.height as f64),
        }
    }

    fn commands(&self) -> &[DrawCommand] {
        self.frame.commands()
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> f64 {
        self.frame.width()
    }

    fn height(&self) -> f64 {
        self.frame.height()
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        // A full fill starts a new frame
        if x <= 0.0 && y <= 0.0 && width >= self.width() && height >= self.height() {
            self.frame.clear();
        }
        self.frame.fill_rect(x, y, width, height, color);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.frame.fill_circle(cx, cy, radius, color);
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.frame.stroke_line(x1, y1, x2, y2, color);
    }
}

fn tui_color(color: Color) -> TuiColor {
    TuiColor::Rgb(color.r, color.g, color.b)
}

/// One titled envelope editor bound to a screen area.
pub struct EnvelopePanel {
    title: &'static str,
    config: EditorConfig,
    area: Rect,
    editor: CurveEditor<TerminalSurface>,
}

impl EnvelopePanel {
    pub fn new(title: &'static str, config: EditorConfig) -> Result<Self, EditorError> {
        // Real size is known at first draw
        let area = Rect::new(0, 0, 1, 1);
        let editor = CurveEditor::new(TerminalSurface::new(area), config.clone())?;
        Ok(Self {
            title,
            config,
            area,
            editor,
        })
    }

    /// Rebind the editor when the panel's inner area changes size.
    ///
    /// The surface size is fixed per editor, so a resize builds a fresh
    /// editor and carries the points over.
    fn fit(&mut self, inner: Rect) {
        if inner == self.area {
            return;
        }
        match CurveEditor::new(TerminalSurface::new(inner), self.config.clone()) {
            Ok(mut editor) => {
                editor.set_points(self.editor.points().to_vec());
                self.editor = editor;
                self.area = inner;
            }
            Err(err) => debug!("{} panel not resized: {err}", self.title),
        }
    }

    /// Handle a mouse press. Returns true if a vertex was added.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let MouseEventKind::Down(button) = event.kind else {
            return false;
        };
        if !self.area.contains((event.column, event.row).into()) {
            return false;
        }

        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
        };
        let target = SurfaceRect {
            left: self.area.x as f64,
            top: self.area.y as f64,
        };
        // Aim at the centre of the clicked cell
        let press = PointerPress {
            client_x: event.column as f64 + 0.5,
            client_y: event.row as f64 + 0.5,
            button,
            target,
        };

        self.editor.handle_press(press).is_some()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains((column, row).into())
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    /// Drawn curve as an envelope, or `fallback` while nothing is drawn.
    pub fn curve_or(&self, fallback: BreakpointCurve) -> BreakpointCurve {
        if self.editor.points().is_empty() {
            fallback
        } else {
            BreakpointCurve::from_points(self.editor.points())
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            TuiColor::Yellow
        } else {
            TuiColor::DarkGray
        };
        let x_max = self.config.max_x;
        let block = Block::default()
            .title(format!(" {} (0-{x_max:.1}s) ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.fit(inner);

        let surface = self.editor.surface();
        let (width, height) = (surface.width(), surface.height());
        let commands = surface.commands();

        let background = commands.iter().find_map(|cmd| match *cmd {
            DrawCommand::FillRect { color, .. } => Some(tui_color(color)),
            _ => None,
        });

        // Canvas y grows upward; surface y grows downward
        let flip = |y: f64| height - y;

        let canvas = Canvas::default()
            .marker(symbols::Marker::Braille)
            .background_color(background.unwrap_or(TuiColor::Reset))
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for cmd in commands.iter().skip(1) {
                    match *cmd {
                        DrawCommand::FillRect {
                            x,
                            y,
                            width,
                            height,
                            color,
                        } => ctx.draw(&Rectangle {
                            x,
                            y: flip(y + height),
                            width,
                            height,
                            color: tui_color(color),
                        }),
                        DrawCommand::Line {
                            x1,
                            y1,
                            x2,
                            y2,
                            color,
                        } => ctx.draw(&Line {
                            x1,
                            y1: flip(y1),
                            x2,
                            y2: flip(y2),
                            color: tui_color(color),
                        }),
                        DrawCommand::FillCircle {
                            cx,
                            cy,
                            radius,
                            color,
                        } => {
                            let coords = disc(cx, flip(cy), radius);
                            ctx.draw(&Points {
                                coords: &coords,
                                color: tui_color(color),
                            });
                        }
                    }
                }
            });

        frame.render_widget(canvas, inner);
    }
}

/// Sample points covering a filled disc.
fn disc(cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    let steps = (radius / DOT_STEP).ceil() as i32;
    let mut coords = vec![(cx, cy)];
    for i in -steps..=steps {
        for j in -steps..=steps {
            let (dx, dy) = (i as f64 * DOT_STEP, j as f64 * DOT_STEP);
            if dx * dx + dy * dy <= radius * radius {
                coords.push((cx + dx, cy + dy));
            }
        }
    }
    coords
}
