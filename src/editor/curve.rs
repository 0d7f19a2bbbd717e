use log::{debug, trace, warn};

use crate::editor::{
    color::Color,
    config::{ConfigUpdate, EditorConfig},
    error::{Axis, EditorError},
    input::{PointerButton, PointerPress},
    point::{sort_by_x, Point},
    surface::Surface,
    viewport::{check_bounds, Viewport},
};

/*
Curve Editor
============

The editor keeps a piecewise-linear curve as a list of vertices sorted by x
and paints it onto a surface whose size is fixed when the editor is built.

  y
  ▲      ●───●
  │     ╱     ╲
  │    ●       ╲
  │   ╱         ●─────●
  │  ●
  └──────────────────────▶ x

Every repaint is total: background fill, then one segment per adjacent pair
and one filled marker per vertex, left to right. Each marker is drawn after
both segments that meet it, so markers sit on top of the lines.

Repaint triggers
----------------

  set_points, style setters, update_config   repaint immediately
  add_point                                   no repaint (callers decide)
  handle_press                                add_point + repaint
  set_min_x, set_min_y                        NO repaint

The last row mirrors the widget this editor replaces, where moving the lower
bounds left the old drawing on screen until something else repainted.
update_config is the consistent path and always repaints.
*/

pub struct CurveEditor<S: Surface> {
    surface: S,
    config: EditorConfig,
    points: Vec<Point>,
}

impl<S: Surface> CurveEditor<S> {
    /// Bind an editor to `surface` and paint the empty curve.
    pub fn new(surface: S, config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;

        let mut editor = Self {
            surface,
            config,
            points: Vec::new(),
        };
        // Surface dimensions are checked through the viewport.
        editor.viewport().validate()?;

        debug!(
            "curve editor bound to {}x{} surface",
            editor.surface.width(),
            editor.surface.height()
        );
        editor.render();
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            min_x: self.config.min_x,
            max_x: self.config.max_x,
            min_y: self.config.min_y,
            max_y: self.config.max_y,
            width: self.surface.width(),
            height: self.surface.height(),
        }
    }

    pub fn domain(&self) -> f64 {
        self.viewport().domain()
    }

    pub fn range(&self) -> f64 {
        self.viewport().range()
    }

    /// Marker radius currently in use.
    pub fn vertex_radius(&self) -> f64 {
        self.config
            .effective_radius(self.surface.width(), self.surface.height())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Append a vertex and restore x order. Out-of-bounds vertices are kept.
    pub fn add_point(&mut self, x: f64, y: f64) {
        trace!("add point ({x}, {y})");
        self.points.push(Point::new(x, y));
        sort_by_x(&mut self.points);
    }

    /// Replace every vertex and repaint.
    pub fn set_points(&mut self, points: impl Into<Vec<Point>>) {
        self.points = points.into();
        sort_by_x(&mut self.points);
        self.render();
    }

    pub fn clear(&mut self) {
        self.set_points(Vec::new());
    }

    pub fn set_vertex_color(&mut self, color: Color) {
        self.config.vertex_color = color;
        self.render();
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.config.line_color = color;
        self.render();
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color;
        self.render();
    }

    pub fn set_vertex_radius(&mut self, radius: f64) -> Result<(), EditorError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EditorError::InvalidRadius(radius));
        }
        self.config.vertex_radius = Some(radius);
        self.render();
        Ok(())
    }

    /// Drop an explicit radius and go back to the size-derived one, then
    /// repaint.
    pub fn reset_vertex_radius(&mut self) {
        self.config.vertex_radius = None;
        self.render();
    }

    /// Move the lower x bound. Does not repaint.
    pub fn set_min_x(&mut self, min_x: f64) -> Result<(), EditorError> {
        check_bounds(Axis::X, min_x, self.config.max_x)?;
        self.config.min_x = min_x;
        Ok(())
    }

    /// Move the lower y bound. Does not repaint.
    pub fn set_min_y(&mut self, min_y: f64) -> Result<(), EditorError> {
        check_bounds(Axis::Y, min_y, self.config.max_y)?;
        self.config.min_y = min_y;
        Ok(())
    }

    /// Apply a partial configuration and repaint.
    ///
    /// The update is validated as a whole; on error nothing changes and
    /// nothing is drawn.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<(), EditorError> {
        let next = self.config.merged(&update);
        if let Err(err) = next.validate() {
            warn!("rejected editor config update: {err}");
            return Err(err);
        }

        debug!("editor config updated: {update:?}");
        self.config = next;
        self.render();
        Ok(())
    }

    /// Turn a pointer press into a new vertex.
    ///
    /// Only the primary button adds a point. Returns the vertex that was
    /// added, in data space.
    pub fn handle_press(&mut self, press: PointerPress) -> Option<Point> {
        if press.button != PointerButton::Primary {
            return None;
        }

        let (px, py) = press.local_position();
        let point = self.viewport().pixel_to_data(px, py);

        self.add_point(point.x, point.y);
        self.render();
        Some(point)
    }

    /// Repaint the whole surface.
    pub fn render(&mut self) {
        let viewport = self.viewport();
        let radius = self.vertex_radius();
        debug!("render {} points, radius {radius}", self.points.len());
        let EditorConfig {
            vertex_color,
            line_color,
            background_color,
            ..
        } = self.config;

        self.surface
            .fill_rect(0.0, 0.0, viewport.width, viewport.height, background_color);

        for pair in self.points.windows(2) {
            let (x1, y1) = viewport.data_to_pixel(pair[0]);
            let (x2, y2) = viewport.data_to_pixel(pair[1]);
            self.surface.stroke_line(x1, y1, x2, y2, line_color);
            self.surface.fill_circle(x1, y1, radius, vertex_color);
        }

        if let Some(&last) = self.points.last() {
            let (x, y) = viewport.data_to_pixel(last);
            self.surface.fill_circle(x, y, radius, vertex_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{
        input::SurfaceRect,
        surface::{DisplayList, DrawCommand},
    };

    fn editor() -> CurveEditor<DisplayList> {
        CurveEditor::new(DisplayList::new(200.0, 200.0), EditorConfig::default()).unwrap()
    }

    fn circles(list: &DisplayList) -> Vec<(f64, f64)> {
        list.last_frame()
            .iter()
            .filter_map(|cmd| match *cmd {
                DrawCommand::FillCircle { cx, cy, .. } => Some((cx, cy)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn construction_paints_background() {
        let editor = editor();
        assert_eq!(
            editor.surface().commands(),
            &[DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 200.0,
                color: Color::WHITE,
            }]
        );
    }

    #[test]
    fn construction_rejects_inverted_domain() {
        let config = EditorConfig::default().x_bounds(10.0, 0.0);
        let result = CurveEditor::new(DisplayList::new(10.0, 10.0), config);
        assert!(matches!(
            result,
            Err(EditorError::InvalidBounds { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn construction_rejects_empty_surface() {
        let result = CurveEditor::new(DisplayList::new(0.0, 50.0), EditorConfig::default());
        assert!(matches!(result, Err(EditorError::EmptySurface { .. })));
    }

    #[test]
    fn marker_lands_on_mapped_pixel() {
        let mut editor = editor();
        editor.add_point(50.0, 50.0);
        editor.render();
        assert_eq!(circles(editor.surface()), vec![(100.0, 100.0)]);
    }

    #[test]
    fn polyline_is_drawn_left_to_right() {
        let mut editor = editor();
        editor.set_points(vec![
            Point::new(100.0, 100.0),
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
        ]);

        let lines: Vec<_> = editor
            .surface()
            .last_frame()
            .iter()
            .filter_map(|cmd| match *cmd {
                DrawCommand::Line { x1, y1, x2, y2, .. } => Some((x1, y1, x2, y2)),
                _ => None,
            })
            .collect();

        assert_eq!(
            lines,
            vec![(0.0, 200.0, 100.0, 100.0), (100.0, 100.0, 200.0, 0.0)]
        );
        assert_eq!(
            circles(editor.surface()),
            vec![(0.0, 200.0), (100.0, 100.0), (200.0, 0.0)]
        );
    }

    #[test]
    fn secondary_press_is_ignored() {
        let mut editor = editor();
        let press = PointerPress {
            client_x: 10.0,
            client_y: 10.0,
            button: PointerButton::Secondary,
            target: SurfaceRect::default(),
        };

        assert_eq!(editor.handle_press(press), None);
        assert!(editor.points().is_empty());
        assert_eq!(editor.surface().repaint_count(), 1);
    }

    #[test]
    fn press_is_relative_to_target_rect() {
        let mut editor = editor();
        let target = SurfaceRect {
            left: 30.0,
            top: 40.0,
        };

        let added = editor.handle_press(PointerPress::primary(130.0, 140.0, target));

        assert_eq!(added, Some(Point::new(50.0, 50.0)));
        assert_eq!(editor.points(), &[Point::new(50.0, 50.0)]);
        assert_eq!(editor.surface().repaint_count(), 2);
    }

    #[test]
    fn rejected_update_changes_nothing() {
        let mut editor = editor();
        let before = editor.config().clone();

        let result = editor.update_config(
            ConfigUpdate::new()
                .background_color(Color::BLACK)
                .y_bounds(1.0, 1.0),
        );

        assert!(matches!(
            result,
            Err(EditorError::InvalidBounds { axis: Axis::Y, .. })
        ));
        assert_eq!(editor.config(), &before);
        assert_eq!(editor.surface().repaint_count(), 1);
    }

    #[test]
    fn set_min_x_validates_against_max() {
        let mut editor = editor();
        assert!(editor.set_min_x(100.0).is_err());
        assert_eq!(editor.config().min_x, 0.0);
        assert!(editor.set_min_y(-10.0).is_ok());
        assert_eq!(editor.config().min_y, -10.0);
    }
}
