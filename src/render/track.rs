//! Links track
//!
//! Ties the parsed index, the color mapper and the geometry together. A
//! track is set up once from a link file and can then render any number of
//! windows; each render pass owns its own height accumulator.

use crate::config::{CompactLevel, Orientation, TrackConfig};
use crate::core::{links_in_region, resolve_chrom, warn_missing_chrom, LinkIndex, Region, Result};
use crate::formats::{parse_link_file, parse_link_reader, LinkFile, ParseOptions, ParseStats, ScoreRange};
use crate::render::color::ColorMapper;
use crate::render::geometry::{HeightAccumulator, LinkShape};
use crate::render::surface::{DrawingSurface, Stroke};
use std::io::BufRead;
use std::path::Path;

/// Stroke width used when neither a width nor scores are available
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;

/// Lower end of the y axis
pub const Y_AXIS_FLOOR: f64 = -1.0;

/// How the stroke width of each link is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineWidth {
    Fixed(f64),
    /// `0.5 * sqrt(score)`
    FromScore,
}

impl LineWidth {
    pub fn for_score(&self, score: Option<f64>) -> f64 {
        match self {
            LineWidth::Fixed(width) => *width,
            LineWidth::FromScore => score
                .filter(|s| !s.is_nan())
                .map(|s| 0.5 * s.sqrt())
                .unwrap_or(DEFAULT_LINE_WIDTH),
        }
    }
}

/// Outcome of one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderSummary {
    /// Links handed to the surface
    pub links_drawn: usize,
    /// Tallest shape, before the margin
    pub max_height: f64,
    /// Y limits as set on the surface: `(bottom, top)`; `None` when the
    /// chromosome is unknown and the surface was left untouched
    pub y_limits: Option<(f64, f64)>,
}

/// A fully set-up links track
#[derive(Debug)]
pub struct LinksTrack {
    config: TrackConfig,
    index: LinkIndex,
    scores: ScoreRange,
    stats: ParseStats,
    colors: ColorMapper,
    line_width: LineWidth,
    ylim: Option<f64>,
}

impl LinksTrack {
    /// Set up a track from a link file
    ///
    /// With `regions`, only links on the regions' chromosomes are loaded.
    pub fn from_path(path: &Path, config: TrackConfig, regions: Option<&[Region]>) -> Result<Self> {
        config.validate()?;
        let options = parse_options(&config, regions);
        let file = parse_link_file(path, &options)?;
        Ok(Self::from_link_file(file, config))
    }

    /// Set up a track from an already opened reader
    pub fn from_reader<R: BufRead>(
        reader: R,
        config: TrackConfig,
        regions: Option<&[Region]>,
    ) -> Result<Self> {
        config.validate()?;
        let options = parse_options(&config, regions);
        let file = parse_link_reader(reader, &options)?;
        Ok(Self::from_link_file(file, config))
    }

    /// Resolve the per-track settings that depend on the parsed data
    pub fn from_link_file(file: LinkFile, config: TrackConfig) -> Self {
        let LinkFile {
            index,
            scores,
            stats,
        } = file;

        let line_width = match config.line_width {
            Some(width) => LineWidth::Fixed(width),
            None if scores.has_score => LineWidth::FromScore,
            None => {
                log::warn!(
                    "No line_width has been set but some lines do not have scores. \
                     line_width has been set to {}",
                    DEFAULT_LINE_WIDTH
                );
                LineWidth::Fixed(DEFAULT_LINE_WIDTH)
            }
        };

        let colors = ColorMapper::new(&config.color, &scores, config.min_value, config.max_value);

        let ylim = match (config.ylim, config.compact_arcs_level) {
            (Some(_), CompactLevel::Constant) => {
                log::warn!(
                    "A ylim was set but compact_arcs_level was set to 2. ylim will be ignored"
                );
                None
            }
            (ylim, _) => ylim,
        };

        Self {
            config,
            index,
            scores,
            stats,
            colors,
            line_width,
            ylim,
        }
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn index(&self) -> &LinkIndex {
        &self.index
    }

    pub fn scores(&self) -> &ScoreRange {
        &self.scores
    }

    pub fn parse_stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn colors(&self) -> &ColorMapper {
        &self.colors
    }

    pub fn line_width(&self) -> LineWidth {
        self.line_width
    }

    /// Effective ylim after dropping it for compaction level 2
    pub fn ylim(&self) -> Option<f64> {
        self.ylim
    }

    /// Draw the links of `[start, end)` on `chrom`
    pub fn plot<S: DrawingSurface>(
        &self,
        surface: &mut S,
        chrom: &str,
        start: u64,
        end: u64,
    ) -> RenderSummary {
        let Some(chrom) = resolve_chrom(&self.index, chrom) else {
            warn_missing_chrom(chrom);
            return RenderSummary::default();
        };

        let shape_fn = self.config.links_type.shape_fn();
        let level = self.config.compact_arcs_level;
        let mut heights = HeightAccumulator::new();
        let mut links_drawn = 0;

        for interval in links_in_region(&self.index, chrom, start, end) {
            let score = interval.payload.score;
            let stroke = Stroke {
                paint: self.colors.resolve(score),
                line_width: self.line_width.for_score(score),
                line_style: self.config.line_style,
                alpha: self.config.alpha,
            };

            let shape = shape_fn(interval, level);
            draw_shape(surface, &shape, &stroke);
            heights.observe(&shape);
            links_drawn += 1;
        }

        let max_height = heights.max_height();
        let top = self.y_axis_top(heights.finish());
        let y_limits = match self.config.orientation {
            Orientation::Inverted => (top, Y_AXIS_FLOOR),
            Orientation::Normal => (Y_AXIS_FLOOR, top),
        };
        surface.set_y_limits(y_limits.0, y_limits.1);
        log::debug!("{} links plotted", links_drawn);

        RenderSummary {
            links_drawn,
            max_height,
            y_limits: Some(y_limits),
        }
    }

    /// Draw the links of a region
    pub fn plot_region<S: DrawingSurface>(&self, surface: &mut S, region: &Region) -> RenderSummary {
        self.plot(surface, &region.chrom, region.start, region.end)
    }

    /// Draw the colorbar of a score-colored track; no-op otherwise
    pub fn plot_colorbar<S: DrawingSurface>(&self, surface: &mut S) {
        if let Some(colormap) = self.colors.colormap() {
            surface.draw_colorbar(colormap);
        }
    }

    fn y_axis_top(&self, max_height: f64) -> f64 {
        match self.ylim {
            None => max_height,
            Some(ylim) if self.config.compact_arcs_level == CompactLevel::SquareRoot => ylim.sqrt(),
            Some(ylim) => ylim,
        }
    }
}

fn parse_options(config: &TrackConfig, regions: Option<&[Region]>) -> ParseOptions {
    let options = ParseOptions::new(config.key_mode());
    match regions {
        Some(regions) => options.with_regions(regions),
        None => options,
    }
}

fn draw_shape<S: DrawingSurface>(surface: &mut S, shape: &LinkShape, stroke: &Stroke) {
    match shape {
        LinkShape::Arc {
            center,
            width,
            height,
        } => surface.draw_arc(*center, *width, *height, stroke),
        LinkShape::Triangle { vertices } => surface.draw_polygon(vertices, false, stroke),
        LinkShape::Loop { vertices } => surface.draw_polygon(vertices, true, stroke),
    }
}
