//! Typed drawing primitives handed to a renderer.

use kurbo::{Affine, Point};
use peniko::Color;

/// Stroke and fill for a primitive.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveStyle {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub stroke_width: f64,
    pub dashed: bool,
}

impl PrimitiveStyle {
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(color),
            fill: None,
            stroke_width: width,
            dashed: false,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            stroke: None,
            fill: Some(color),
            stroke_width: 0.0,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

/// Horizontal anchoring of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// One drawing command in screen coordinates.
#[derive(Debug, Clone)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        style: PrimitiveStyle,
    },
    /// Circular arc in SVG endpoint form.
    Arc {
        from: Point,
        to: Point,
        radius: f64,
        large_arc: bool,
        /// SVG sweep-flag on a y-down surface: `true` is clockwise.
        sweep: bool,
        style: PrimitiveStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        style: PrimitiveStyle,
    },
    Polyline {
        points: Vec<Point>,
        style: PrimitiveStyle,
    },
    Text {
        position: Point,
        text: String,
        size: f64,
        color: Color,
        anchor: TextAnchor,
    },
}

impl Primitive {
    /// Apply a uniform-scale transform; radii and stroke widths keep their
    /// screen size so zooming does not fatten lines.
    pub fn transformed(&self, affine: Affine, zoom: f64) -> Primitive {
        match self {
            Primitive::Line { from, to, style } => Primitive::Line {
                from: affine * *from,
                to: affine * *to,
                style: *style,
            },
            Primitive::Arc {
                from,
                to,
                radius,
                large_arc,
                sweep,
                style,
            } => Primitive::Arc {
                from: affine * *from,
                to: affine * *to,
                radius: radius * zoom,
                large_arc: *large_arc,
                sweep: *sweep,
                style: *style,
            },
            Primitive::Circle {
                center,
                radius,
                style,
            } => Primitive::Circle {
                center: affine * *center,
                // Filled dots are markers and keep their pixel size.
                radius: if style.fill.is_some() && style.stroke.is_none() {
                    *radius
                } else {
                    radius * zoom
                },
                style: *style,
            },
            Primitive::Polyline { points, style } => Primitive::Polyline {
                points: points.iter().map(|p| affine * *p).collect(),
                style: *style,
            },
            Primitive::Text {
                position,
                text,
                size,
                color,
                anchor,
            } => Primitive::Text {
                position: affine * *position,
                text: text.clone(),
                size: *size,
                color: *color,
                anchor: *anchor,
            },
        }
    }

    /// Short name used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Line { .. } => "line",
            Primitive::Arc { .. } => "arc",
            Primitive::Circle { .. } => "circle",
            Primitive::Polyline { .. } => "polyline",
            Primitive::Text { .. } => "text",
        }
    }
}

/// Colors used by the scene builders.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub axis: Color,
    pub grid: Color,
    pub circle: Color,
    pub sigma: Color,
    pub tau: Color,
    pub rotation: Color,
    pub principal: Color,
    pub reference: Color,
    pub hover: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(250, 250, 250, 255),
            axis: Color::from_rgba8(55, 65, 81, 255),
            grid: Color::from_rgba8(209, 213, 219, 255),
            circle: Color::from_rgba8(59, 130, 246, 255),
            sigma: Color::from_rgba8(37, 99, 235, 255),
            tau: Color::from_rgba8(220, 38, 38, 255),
            rotation: Color::from_rgba8(234, 88, 12, 255),
            principal: Color::from_rgba8(22, 163, 74, 255),
            reference: Color::from_rgba8(107, 114, 128, 255),
            hover: Color::from_rgba8(147, 51, 234, 255),
            text: Color::from_rgba8(17, 24, 39, 255),
        }
    }
}
