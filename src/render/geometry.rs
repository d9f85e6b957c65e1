//! Link shapes
//!
//! Converts indexed links into arcs, triangles or loop quadrilaterals in
//! genome coordinates: x in bp, y in bp of span (or its compacted form).

use crate::config::{CompactLevel, LinksType};
use crate::core::{IndexedInterval, LinkPayload};

/// Height of every arc and triangle under compaction level 2
pub const CONSTANT_HEIGHT: f64 = 1000.0;

/// Extra room above the tallest shape
pub const HEIGHT_MARGIN: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of one link
#[derive(Debug, Clone, PartialEq)]
pub enum LinkShape {
    /// Upper half of an ellipse standing on the baseline
    Arc {
        center: f64,
        width: f64,
        /// Vertical radius
        height: f64,
    },
    /// Open polyline: baseline, apex, baseline
    Triangle { vertices: [Point; 3] },
    /// Closed quadrilateral over the contact block of the two loci
    Loop { vertices: [Point; 4] },
}

impl LinkShape {
    /// Highest y reached by the shape
    pub fn height(&self) -> f64 {
        match self {
            LinkShape::Arc { height, .. } => *height,
            LinkShape::Triangle { vertices } => vertices[1].y,
            LinkShape::Loop { vertices } => vertices[2].y,
        }
    }
}

/// Height of an arc or triangle spanning `width` bp
pub fn compact_height(width: f64, level: CompactLevel) -> f64 {
    match level {
        CompactLevel::Proportional => width,
        CompactLevel::SquareRoot => width.sqrt(),
        CompactLevel::Constant => CONSTANT_HEIGHT,
    }
}

/// Half ellipse over the index key
pub fn arc_shape(interval: &IndexedInterval, level: CompactLevel) -> LinkShape {
    let width = interval.key_width();
    LinkShape::Arc {
        center: interval.key_begin() + width / 2.0,
        width,
        height: compact_height(width, level),
    }
}

/// Triangle with its apex above the middle of the index key
pub fn triangle_shape(interval: &IndexedInterval, level: CompactLevel) -> LinkShape {
    let begin = interval.key_begin();
    let width = interval.key_width();
    LinkShape::Triangle {
        vertices: [
            Point::new(begin, 0.0),
            Point::new(begin + width / 2.0, compact_height(width, level)),
            Point::new(interval.key_end(), 0.0),
        ],
    }
}

/// Diamond outlining the contact block of the two loci
///
/// Uses the raw loci, not the index key, and ignores the compaction level.
///
/// ```text
///       2
///    3     1
///       0
/// ```
pub fn loop_shape(interval: &IndexedInterval, _level: CompactLevel) -> LinkShape {
    LinkShape::Loop {
        vertices: loop_vertices(&interval.payload),
    }
}

fn loop_vertices(link: &LinkPayload) -> [Point; 4] {
    let (start1, end1) = (link.start1 as f64, link.end1 as f64);
    let (start2, end2) = (link.start2 as f64, link.end2 as f64);
    let width1 = end1 - start1;
    let width2 = end2 - start2;

    let x0 = (end1 + start2) / 2.0;
    let y0 = start2 - end1;
    [
        Point::new(x0, y0),
        Point::new(x0 + width2 / 2.0, y0 + width2),
        Point::new((start1 + end2) / 2.0, end2 - start1),
        Point::new(x0 - width1 / 2.0, y0 + width1),
    ]
}

/// Shape builder for one links type
pub type ShapeFn = fn(&IndexedInterval, CompactLevel) -> LinkShape;

impl LinksType {
    /// Shape builder, chosen once per render pass
    pub fn shape_fn(&self) -> ShapeFn {
        match self {
            LinksType::Arcs => arc_shape,
            LinksType::Triangles => triangle_shape,
            LinksType::Loops => loop_shape,
        }
    }
}

/// Running maximum of shape heights within one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeightAccumulator {
    max_height: f64,
}

impl HeightAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, shape: &LinkShape) {
        let height = shape.height();
        if height > self.max_height {
            self.max_height = height;
        }
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Tallest height plus the margin that keeps arcs from being clipped
    pub fn finish(self) -> f64 {
        self.max_height * HEIGHT_MARGIN
    }
}
