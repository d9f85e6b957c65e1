//! Drawing surface abstraction
//!
//! The track never rasterizes anything itself; it hands resolved primitives
//! to a [`DrawingSurface`].

use crate::config::LineStyle;
use crate::render::color::{Paint, ScoreColormap};
use crate::render::geometry::Point;
use std::fmt::Write as _;

/// Stroke attributes shared by every primitive of a link
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub alpha: f64,
}

/// Receiver of link drawing primitives
pub trait DrawingSurface {
    /// Upper half of an ellipse centered on `(center, 0)`
    fn draw_arc(&mut self, center: f64, width: f64, height: f64, stroke: &Stroke);

    /// Polyline through `vertices`, closed back to the first vertex if `closed`
    fn draw_polygon(&mut self, vertices: &[Point], closed: bool, stroke: &Stroke);

    /// Set the visible y range; `bottom > top` draws the axis upside down
    fn set_y_limits(&mut self, bottom: f64, top: f64);

    /// Legend for score-colored tracks
    fn draw_colorbar(&mut self, _colormap: &ScoreColormap) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Arc {
        center: f64,
        width: f64,
        height: f64,
        stroke: Stroke,
    },
    Polygon {
        vertices: Vec<Point>,
        closed: bool,
        stroke: Stroke,
    },
    Colorbar {
        colormap: String,
        vmin: f64,
        vmax: f64,
    },
}

/// Surface that stores every primitive it receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub primitives: Vec<Primitive>,
    pub y_limits: Option<(f64, f64)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-separated dump, one primitive per line
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        if let Some((bottom, top)) = self.y_limits {
            let _ = writeln!(out, "ylim\t{}\t{}", bottom, top);
        }
        for primitive in &self.primitives {
            match primitive {
                Primitive::Arc {
                    center,
                    width,
                    height,
                    stroke,
                } => {
                    let _ = writeln!(
                        out,
                        "arc\t{}\t{}\t{}\t{}",
                        center,
                        width,
                        height,
                        stroke_fields(stroke)
                    );
                }
                Primitive::Polygon {
                    vertices,
                    closed,
                    stroke,
                } => {
                    let coords: Vec<String> = vertices
                        .iter()
                        .map(|p| format!("{},{}", p.x, p.y))
                        .collect();
                    let kind = if *closed { "polygon" } else { "polyline" };
                    let _ = writeln!(
                        out,
                        "{}\t{}\t{}",
                        kind,
                        coords.join(";"),
                        stroke_fields(stroke)
                    );
                }
                Primitive::Colorbar {
                    colormap,
                    vmin,
                    vmax,
                } => {
                    let _ = writeln!(out, "colorbar\t{}\t{}\t{}", colormap, vmin, vmax);
                }
            }
        }
        out
    }
}

fn stroke_fields(stroke: &Stroke) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        stroke.paint, stroke.line_width, stroke.line_style, stroke.alpha
    )
}

impl DrawingSurface for RecordingSurface {
    fn draw_arc(&mut self, center: f64, width: f64, height: f64, stroke: &Stroke) {
        self.primitives.push(Primitive::Arc {
            center,
            width,
            height,
            stroke: stroke.clone(),
        });
    }

    fn draw_polygon(&mut self, vertices: &[Point], closed: bool, stroke: &Stroke) {
        self.primitives.push(Primitive::Polygon {
            vertices: vertices.to_vec(),
            closed,
            stroke: stroke.clone(),
        });
    }

    fn set_y_limits(&mut self, bottom: f64, top: f64) {
        self.y_limits = Some((bottom, top));
    }

    fn draw_colorbar(&mut self, colormap: &ScoreColormap) {
        self.primitives.push(Primitive::Colorbar {
            colormap: colormap.colormap.name().to_string(),
            vmin: colormap.norm.vmin,
            vmax: colormap.norm.vmax,
        });
    }
}
