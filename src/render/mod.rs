//! Link rendering
//!
//! Shape geometry, colors, the drawing surface abstraction and the track
//! that drives a render pass.

pub mod color;
pub mod geometry;
pub mod surface;
mod track;

pub use color::{is_colormap, ColorMapper, Colormap, Normalize, Paint, Rgb, ScoreColormap};
pub use geometry::{
    arc_shape, compact_height, loop_shape, triangle_shape, HeightAccumulator, LinkShape, Point,
    ShapeFn, CONSTANT_HEIGHT, HEIGHT_MARGIN,
};
pub use surface::{DrawingSurface, Primitive, RecordingSurface, Stroke};
pub use track::{LineWidth, LinksTrack, RenderSummary, DEFAULT_LINE_WIDTH, Y_AXIS_FLOOR};
