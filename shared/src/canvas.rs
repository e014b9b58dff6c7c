//! Freehand drawing surface and its PNG export.

use crate::config::{CanvasConfig, EmptyDrawingPolicy};
use crate::error::CaptureError;
use crate::payload::{ImagePayload, PNG_CONTENT_TYPE};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DEFAULT_BRUSH: [u8; 3] = [0, 0, 255];
// Distance between brush stamps along a segment, in pixels.
const STAMP_SPACING: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One continuous pointer drag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(start: Point) -> Self {
        Self { points: vec![start] }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered, append-only list of committed strokes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawingSurface {
    strokes: Vec<Stroke>,
}

impl DrawingSurface {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CanvasCapture {
    surface: DrawingSurface,
    pending: Option<Stroke>,
    width: u32,
    height: u32,
    brush_radius: f32,
    brush_color: [u8; 3],
    file_name: String,
    empty_policy: EmptyDrawingPolicy,
}

impl CanvasCapture {
    pub fn new(config: &CanvasConfig, empty_policy: EmptyDrawingPolicy) -> Self {
        Self {
            surface: DrawingSurface::default(),
            pending: None,
            width: config.width,
            height: config.height,
            brush_radius: config.brush_radius,
            brush_color: config.brush_rgb().unwrap_or(DEFAULT_BRUSH),
            file_name: config.file_name.clone(),
            empty_policy,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    /// The stroke currently being dragged, if any.
    pub fn pending(&self) -> Option<&Stroke> {
        self.pending.as_ref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn brush_radius(&self) -> f32 {
        self.brush_radius
    }

    pub fn brush_color(&self) -> [u8; 3] {
        self.brush_color
    }

    pub fn begin_stroke(&mut self, point: Point) {
        self.pending = Some(Stroke::new(point));
    }

    /// Returns false when no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        match self.pending.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Commits the in-progress stroke. Returns false when there was none.
    pub fn end_stroke(&mut self) -> bool {
        match self.pending.take() {
            Some(stroke) if !stroke.is_empty() => {
                self.add_stroke(stroke);
                true
            }
            _ => false,
        }
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        if stroke.is_empty() {
            return;
        }
        self.surface.strokes.push(stroke);
    }

    /// No-op on an empty surface.
    pub fn undo_last_stroke(&mut self) -> Option<Stroke> {
        self.surface.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.surface.strokes.clear();
        self.pending = None;
    }

    /// Rasterizes the committed strokes to PNG. The same surface always
    /// yields the same bytes.
    pub fn export(&self) -> Result<ImagePayload, CaptureError> {
        if self.surface.is_empty() && self.empty_policy == EmptyDrawingPolicy::Block {
            return Err(CaptureError::EmptySurface);
        }

        let image = self.rasterize();
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(image.as_raw(), self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        log::debug!(
            "Exported drawing with {} strokes ({} bytes)",
            self.surface.len(),
            bytes.len()
        );
        Ok(ImagePayload::new(bytes, self.file_name.clone(), PNG_CONTENT_TYPE))
    }

    pub fn rasterize(&self) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);
        let [r, g, b] = self.brush_color;
        let color = Rgba([r, g, b, 255]);

        for stroke in self.surface.strokes() {
            match stroke.points() {
                [] => {}
                [only] => stamp(&mut image, *only, self.brush_radius, color),
                points => {
                    for segment in points.windows(2) {
                        draw_segment(&mut image, segment[0], segment[1], self.brush_radius, color);
                    }
                }
            }
        }
        image
    }
}

fn draw_segment(image: &mut RgbaImage, from: Point, to: Point, radius: f32, color: Rgba<u8>) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = (dx * dx + dy * dy).sqrt();
    let steps = (length / STAMP_SPACING).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp(image, Point::new(from.x + dx * t, from.y + dy * t), radius, color);
    }
}

fn stamp(image: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let x0 = (center.x - radius).floor().max(0.0) as u32;
    let y0 = (center.y - radius).floor().max(0.0) as u32;
    let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(width - 1);
    let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(height - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let px = x as f32 + 0.5 - center.x;
            let py = y as f32 + 0.5 - center.y;
            if px * px + py * py <= radius * radius {
                image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasCapture {
        CanvasCapture::new(&CanvasConfig::default(), EmptyDrawingPolicy::Block)
    }

    fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Stroke {
        Stroke::from_points(vec![Point::new(x0, y0), Point::new(x1, y1)])
    }

    #[test]
    fn empty_surface_blocks_export() {
        assert_eq!(canvas().export(), Err(CaptureError::EmptySurface));
    }

    #[test]
    fn blank_export_when_allowed() {
        let canvas = CanvasCapture::new(&CanvasConfig::default(), EmptyDrawingPolicy::AllowBlank);
        let payload = canvas.export().unwrap();
        assert!(!payload.is_empty());

        let decoded = image::load_from_memory(&payload.bytes).unwrap().to_rgba8();
        assert!(decoded.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn export_is_png_with_configured_size() {
        let mut canvas = canvas();
        canvas.add_stroke(line(10.0, 10.0, 100.0, 10.0));
        let payload = canvas.export().unwrap();

        assert_eq!(payload.content_type, "image/png");
        assert_eq!(payload.file_name, "drawing.png");
        let decoded = image::load_from_memory(&payload.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (500, 400));
        assert_eq!(*decoded.get_pixel(50, 10), Rgba([0, 0, 255, 255]));
        assert_eq!(*decoded.get_pixel(50, 200), BACKGROUND);
    }

    #[test]
    fn export_is_idempotent() {
        let mut canvas = canvas();
        canvas.add_stroke(line(5.0, 5.0, 60.0, 80.0));
        assert_eq!(canvas.export().unwrap(), canvas.export().unwrap());
    }

    #[test]
    fn undo_on_empty_surface_is_noop() {
        let mut canvas = canvas();
        assert_eq!(canvas.undo_last_stroke(), None);
        assert!(canvas.surface().is_empty());
    }

    #[test]
    fn undo_removes_most_recent_stroke() {
        let mut canvas = canvas();
        canvas.add_stroke(line(10.0, 10.0, 50.0, 10.0));
        canvas.add_stroke(line(10.0, 100.0, 50.0, 100.0));
        canvas.add_stroke(line(10.0, 200.0, 50.0, 200.0));
        let three = canvas.export().unwrap();

        let removed = canvas.undo_last_stroke().unwrap();
        assert_eq!(removed.points()[0], Point::new(10.0, 200.0));
        let two = canvas.export().unwrap();

        assert!(!two.is_empty());
        assert_ne!(two.bytes, three.bytes);
        let decoded = image::load_from_memory(&two.bytes).unwrap().to_rgba8();
        assert_eq!(*decoded.get_pixel(30, 200), BACKGROUND);
        assert_ne!(*decoded.get_pixel(30, 100), BACKGROUND);
    }

    #[test]
    fn interactive_stroke_commits_on_end() {
        let mut canvas = canvas();
        assert!(!canvas.extend_stroke(Point::new(1.0, 1.0)));

        canvas.begin_stroke(Point::new(20.0, 20.0));
        assert!(canvas.extend_stroke(Point::new(40.0, 40.0)));
        assert!(canvas.surface().is_empty());
        assert_eq!(canvas.export(), Err(CaptureError::EmptySurface));

        assert!(canvas.end_stroke());
        assert_eq!(canvas.surface().len(), 1);
        assert_eq!(canvas.surface().strokes()[0].points().len(), 2);
        assert!(!canvas.end_stroke());
    }

    #[test]
    fn single_point_stroke_leaves_a_dot() {
        let mut canvas = canvas();
        canvas.begin_stroke(Point::new(250.0, 200.0));
        canvas.end_stroke();
        let image = canvas.rasterize();
        assert_ne!(*image.get_pixel(250, 200), BACKGROUND);
    }

    #[test]
    fn clear_drops_strokes_and_pending() {
        let mut canvas = canvas();
        canvas.add_stroke(line(0.0, 0.0, 10.0, 10.0));
        canvas.begin_stroke(Point::new(3.0, 3.0));
        canvas.clear();
        assert!(canvas.surface().is_empty());
        assert!(canvas.pending().is_none());
    }

    #[test]
    fn strokes_outside_canvas_are_clipped() {
        let mut canvas = canvas();
        canvas.add_stroke(line(-50.0, -50.0, 550.0, 550.0));
        let image = canvas.rasterize();
        assert_eq!(image.dimensions(), (500, 400));
        assert_ne!(*image.get_pixel(0, 0), BACKGROUND);
    }
}
