use tiny_skia as sk;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, Fill, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, Renderer,
    Stroke,
};

/// Counts from the most recent `Renderer::render` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub lines_drawn: usize,
    /// Text needs a font backend; the raster only counts it.
    pub texts_skipped: usize,
}

/// In-memory RGBA8 surface backed by a `tiny_skia::Pixmap`, painted with
/// anti-aliasing disabled.
///
/// Hard edges mean two shapes sharing a boundary never blend into each
/// other, which is what makes the surface usable as a colour-indexed
/// picking buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    pixmap: sk::Pixmap,
    last_stats: RasterStats,
}

impl RasterSurface {
    pub fn new(viewport: Viewport) -> ChartResult<Self> {
        Ok(Self {
            pixmap: allocate(viewport)?,
            last_stats: RasterStats::default(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Reallocates the pixmap when the size changes. Contents are cleared.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if viewport == self.viewport() {
            return Ok(());
        }
        self.pixmap = allocate(viewport)?;
        Ok(())
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(sk_color(color));
    }

    /// Raw premultiplied RGBA bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    #[must_use]
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }

    /// Straight-alpha RGBA of one pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Reads the pixel containing the fractional position `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> Option<[u8; 4]> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixel(x.floor() as u32, y.floor() as u32)
    }

    pub fn fill_rect(&mut self, rect: &RectPrimitive) {
        if rect.fill_color.alpha > 0.0 {
            if let Some(bounds) = sk::Rect::from_xywh(
                rect.x as f32,
                rect.y as f32,
                rect.width as f32,
                rect.height as f32,
            ) {
                self.pixmap.fill_rect(
                    bounds,
                    &solid_paint(rect.fill_color),
                    sk::Transform::identity(),
                    None,
                );
            }
        }
        if rect.border_width > 0.0 {
            let (left, top) = (rect.x, rect.y);
            let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
            self.stroke_polyline(
                &[
                    (left, top),
                    (right, top),
                    (right, bottom),
                    (left, bottom),
                    (left, top),
                ],
                Stroke::new(rect.border_width, rect.border_color),
            );
        }
    }

    /// Fills the implicitly closed polygon with the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], fill: Fill) {
        if points.len() < 3 {
            return;
        }
        let Some(path) = build_path(points, true) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &fill_paint(fill),
            sk::FillRule::EvenOdd,
            sk::Transform::identity(),
            None,
        );
    }

    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: Stroke) {
        let Some(path) = build_path(points, false) else {
            return;
        };
        // Square caps so segment joints and ends fully cover the stroke width.
        let style = sk::Stroke {
            width: stroke.width as f32,
            line_cap: sk::LineCap::Square,
            ..sk::Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(stroke.color),
            &style,
            sk::Transform::identity(),
            None,
        );
    }

    fn stroke_line(&mut self, line: &LinePrimitive) {
        self.stroke_polyline(
            &[(line.x1, line.y1), (line.x2, line.y2)],
            Stroke::new(line.stroke_width, line.color),
        );
    }

    fn draw_path(&mut self, path: &PathPrimitive) {
        if let Some(fill) = path.fill {
            self.fill_polygon(&path.points, fill);
        }
        if let Some(stroke) = path.stroke {
            self.stroke_polyline(&path.points, stroke);
        }
    }
}

impl Renderer for RasterSurface {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.resize(frame.viewport)?;
        self.clear(frame.background);

        let mut stats = RasterStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::Rect(rect) => {
                    self.fill_rect(rect);
                    stats.rects_drawn += 1;
                }
                DrawCommand::Path(path) => {
                    self.draw_path(path);
                    stats.paths_drawn += 1;
                }
                DrawCommand::Line(line) => {
                    self.stroke_line(line);
                    stats.lines_drawn += 1;
                }
                DrawCommand::Text(_) => stats.texts_skipped += 1,
            }
        }
        self.last_stats = stats;
        Ok(())
    }
}

fn allocate(viewport: Viewport) -> ChartResult<sk::Pixmap> {
    let viewport = viewport.validate()?;
    sk::Pixmap::new(viewport.width, viewport.height).ok_or(ChartError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    })
}

fn sk_color(color: Color) -> sk::Color {
    let [red, green, blue, alpha] = color.to_rgba8();
    sk::Color::from_rgba8(red, green, blue, alpha)
}

fn solid_paint(color: Color) -> sk::Paint<'static> {
    let mut paint = sk::Paint {
        anti_alias: false,
        ..sk::Paint::default()
    };
    paint.set_color(sk_color(color));
    paint
}

fn fill_paint(fill: Fill) -> sk::Paint<'static> {
    let Fill::VerticalGradient {
        top,
        bottom,
        y_top,
        y_bottom,
    } = fill
    else {
        return solid_paint(fill.color_at(0.0));
    };
    let shader = sk::LinearGradient::new(
        sk::Point::from_xy(0.0, y_top as f32),
        sk::Point::from_xy(0.0, y_bottom as f32),
        vec![
            sk::GradientStop::new(0.0, sk_color(top)),
            sk::GradientStop::new(1.0, sk_color(bottom)),
        ],
        sk::SpreadMode::Pad,
        sk::Transform::identity(),
    );
    match shader {
        Some(shader) => sk::Paint {
            shader,
            anti_alias: false,
            ..sk::Paint::default()
        },
        // Degenerate gradient (zero height): paint the top stop.
        None => solid_paint(fill.color_at(y_top)),
    }
}

fn build_path(points: &[(f64, f64)], close: bool) -> Option<sk::Path> {
    let (&(first_x, first_y), rest) = points.split_first()?;
    let mut builder = sk::PathBuilder::with_capacity(points.len() + 1, points.len() + 1);
    builder.move_to(first_x as f32, first_y as f32);
    for &(x, y) in rest {
        builder.line_to(x as f32, y as f32);
    }
    if close {
        builder.close();
    }
    builder.finish()
}
