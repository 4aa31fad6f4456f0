use graph_theme::Color;

/// A point in canvas pixels (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left:   f32,
    pub top:    f32,
    pub right:  f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Short dashes (2 on, 3 off) instead of a solid line.
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dashed: false }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self { color, width, dashed: true }
    }
}

/// Which point of the text box sits on the label's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Right edge, vertically centred.
    East,
    /// Left edge, vertically centred.
    West,
    /// Top edge, horizontally centred.
    North,
    /// Bottom edge, horizontally centred.
    South,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub content:  String,
    pub position: Point,
    pub color:    Color,
    /// Font size in pixels.
    pub size:     f32,
    pub anchor:   Anchor,
    pub bold:     bool,
}

/// A canvas-like drawing target.
pub trait Surface {
    /// Rectangle with optional outline and optional fill.
    fn rectangle(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Option<Color>);
    /// Open connected line through `points`.
    fn polyline(&mut self, points: &[Point], stroke: Stroke);
    /// Closed filled polygon.
    fn polygon(&mut self, points: &[Point], fill: Color);
    fn text(&mut self, label: Label);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rectangle {
        rect:   Rect,
        stroke: Option<Stroke>,
        fill:   Option<Color>,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill:   Color,
    },
    Text(Label),
}

/// A [`Surface`] that records every call; useful for inspecting output.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub primitives: Vec<Primitive>,
}

impl Recorder {
    pub fn polylines(&self) -> impl Iterator<Item = (&[Point], &Stroke)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polyline { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Point], &Color)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polygon { points, fill } => Some((points.as_slice(), fill)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(label) => Some(label),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn rectangle(&mut self, rect: Rect, stroke: Option<Stroke>, fill: Option<Color>) {
        self.primitives.push(Primitive::Rectangle { rect, stroke, fill });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.primitives.push(Primitive::Polyline { points: points.to_vec(), stroke });
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        self.primitives.push(Primitive::Polygon { points: points.to_vec(), fill });
    }

    fn text(&mut self, label: Label) {
        self.primitives.push(Primitive::Text(label));
    }
}
