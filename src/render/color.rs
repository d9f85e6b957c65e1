//! Link colors
//!
//! A track either paints every link with one color or maps the link score
//! through a continuous colormap.

use crate::config::DEFAULT_LINKS_COLOR;
use crate::formats::ScoreRange;
use std::fmt;

/// An RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    fn from_stop(stop: [u8; 3]) -> Self {
        Self::from_u8(stop[0], stop[1], stop[2])
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        Rgb {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
        }
    }

    /// `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Color handed to the drawing surface
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Color name or notation understood by the drawing surface
    Named(String),
    Rgb(Rgb),
    /// Nothing is painted; used for scores that cannot be normalized (NaN)
    Transparent,
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Named(name) => f.write_str(name),
            Paint::Rgb(rgb) => f.write_str(&rgb.to_hex()),
            Paint::Transparent => f.write_str("none"),
        }
    }
}

const VIRIDIS: &[[u8; 3]] = &[
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x4a, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6d, 0xcd, 0x59],
    [0xb4, 0xde, 0x2c],
    [0xfd, 0xe7, 0x25],
];

const RD_YL_GN: &[[u8; 3]] = &[
    [0xa5, 0x00, 0x26],
    [0xd7, 0x30, 0x27],
    [0xf4, 0x6d, 0x43],
    [0xfd, 0xae, 0x61],
    [0xfe, 0xe0, 0x8b],
    [0xff, 0xff, 0xbf],
    [0xd9, 0xef, 0x8b],
    [0xa6, 0xd9, 0x6a],
    [0x66, 0xbd, 0x63],
    [0x1a, 0x98, 0x50],
    [0x00, 0x68, 0x37],
];

const RD_BU: &[[u8; 3]] = &[
    [0x67, 0x00, 0x1f],
    [0xb2, 0x18, 0x2b],
    [0xd6, 0x60, 0x4d],
    [0xf4, 0xa5, 0x82],
    [0xfd, 0xdb, 0xc7],
    [0xf7, 0xf7, 0xf7],
    [0xd1, 0xe5, 0xf0],
    [0x92, 0xc5, 0xde],
    [0x43, 0x93, 0xc3],
    [0x21, 0x66, 0xac],
    [0x05, 0x30, 0x61],
];

const REDS: &[[u8; 3]] = &[
    [0xff, 0xf5, 0xf0],
    [0xfe, 0xe0, 0xd2],
    [0xfc, 0xbb, 0xa1],
    [0xfc, 0x92, 0x72],
    [0xfb, 0x6a, 0x4a],
    [0xef, 0x3b, 0x2c],
    [0xcb, 0x18, 0x1d],
    [0xa5, 0x0f, 0x15],
    [0x67, 0x00, 0x0d],
];

const BLUES: &[[u8; 3]] = &[
    [0xf7, 0xfb, 0xff],
    [0xde, 0xeb, 0xf7],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];

const YL_OR_RD: &[[u8; 3]] = &[
    [0xff, 0xff, 0xcc],
    [0xff, 0xed, 0xa0],
    [0xfe, 0xd9, 0x76],
    [0xfe, 0xb2, 0x4c],
    [0xfd, 0x8d, 0x3c],
    [0xfc, 0x4e, 0x2a],
    [0xe3, 0x1a, 0x1c],
    [0xbd, 0x00, 0x26],
    [0x80, 0x00, 0x26],
];

const COOLWARM: &[[u8; 3]] = &[
    [0x3b, 0x4c, 0xc0],
    [0x7b, 0x9f, 0xf9],
    [0xc0, 0xd4, 0xf5],
    [0xdd, 0xdc, 0xdc],
    [0xf2, 0xcb, 0xb7],
    [0xee, 0x84, 0x68],
    [0xb4, 0x04, 0x26],
];

const BWR: &[[u8; 3]] = &[
    [0x00, 0x00, 0xff],
    [0xff, 0xff, 0xff],
    [0xff, 0x00, 0x00],
];

const COLORMAPS: &[(&str, &[[u8; 3]])] = &[
    ("viridis", VIRIDIS),
    ("RdYlGn", RD_YL_GN),
    ("RdBu", RD_BU),
    ("Reds", REDS),
    ("Blues", BLUES),
    ("YlOrRd", YL_OR_RD),
    ("coolwarm", COOLWARM),
    ("bwr", BWR),
];

/// A continuous colormap sampled by linear interpolation between stops
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: &'static [[u8; 3]],
    reversed: bool,
}

impl Colormap {
    /// Look up a colormap by name; a `_r` suffix reverses it
    pub fn by_name(name: &str) -> Option<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        COLORMAPS
            .iter()
            .find(|(n, _)| *n == base)
            .map(|&(_, stops)| Self {
                name: name.to_string(),
                stops,
                reversed,
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at position `t`; values outside [0, 1] take the end colors
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let last = self.stops.len() - 1;
        let pos = t * last as f64;
        let i = (pos.floor() as usize).min(last);
        if i == last {
            return Rgb::from_stop(self.stops[last]);
        }
        Rgb::lerp(
            Rgb::from_stop(self.stops[i]),
            Rgb::from_stop(self.stops[i + 1]),
            pos - i as f64,
        )
    }
}

/// Check whether a color option names a colormap
pub fn is_colormap(color: &str) -> bool {
    Colormap::by_name(color).is_some()
}

/// Linear normalization of scores into [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Equal bounds map every value to 0
    pub fn apply(&self, value: f64) -> f64 {
        if self.vmax == self.vmin {
            0.0
        } else {
            (value - self.vmin) / (self.vmax - self.vmin)
        }
    }
}

/// Colormap together with its score normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreColormap {
    pub colormap: Colormap,
    pub norm: Normalize,
}

impl ScoreColormap {
    pub fn color(&self, score: f64) -> Rgb {
        self.colormap.sample(self.norm.apply(score))
    }
}

/// Resolves the color of every link of a track
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMapper {
    Fixed(String),
    Scored(ScoreColormap),
}

impl ColorMapper {
    /// Decide the color mode of a track
    ///
    /// A colormap needs scores on every link and score bounds, either
    /// observed or given through `min_value` / `max_value`; otherwise the
    /// track falls back to the default color with a warning.
    pub fn new(
        color: &str,
        scores: &ScoreRange,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Self {
        let Some(colormap) = Colormap::by_name(color) else {
            return ColorMapper::Fixed(color.to_string());
        };

        if !scores.has_score {
            log::warn!(
                "A colormap was chosen but some lines do not have scores. \
                 Color has been set to {}",
                DEFAULT_LINKS_COLOR
            );
            return ColorMapper::Fixed(DEFAULT_LINKS_COLOR.to_string());
        }

        let vmin = min_value.or(scores.min_score());
        let vmax = max_value.or(scores.max_score());
        match (vmin, vmax) {
            (Some(vmin), Some(vmax)) if vmin > vmax => {
                log::warn!(
                    "The colormap range is inverted (min_value {} > max_value {}). \
                     Color has been set to {}",
                    vmin,
                    vmax,
                    DEFAULT_LINKS_COLOR
                );
                ColorMapper::Fixed(DEFAULT_LINKS_COLOR.to_string())
            }
            (Some(vmin), Some(vmax)) => ColorMapper::Scored(ScoreColormap {
                colormap,
                norm: Normalize::new(vmin, vmax),
            }),
            _ => {
                log::warn!(
                    "A colormap was chosen but no score range is available. \
                     Color has been set to {}",
                    DEFAULT_LINKS_COLOR
                );
                ColorMapper::Fixed(DEFAULT_LINKS_COLOR.to_string())
            }
        }
    }

    /// Color of a link with the given score
    pub fn resolve(&self, score: Option<f64>) -> Paint {
        match self {
            ColorMapper::Fixed(name) => Paint::Named(name.clone()),
            ColorMapper::Scored(map) => match score {
                Some(score) if score.is_nan() => Paint::Transparent,
                Some(score) => Paint::Rgb(map.color(score)),
                None => Paint::Named(DEFAULT_LINKS_COLOR.to_string()),
            },
        }
    }

    pub fn colormap(&self) -> Option<&ScoreColormap> {
        match self {
            ColorMapper::Scored(map) => Some(map),
            ColorMapper::Fixed(_) => None,
        }
    }
}
