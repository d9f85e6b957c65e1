//! Track options
//!
//! Every option of a links track with its default, plus the textual
//! `key = value` form used in track configuration files.

use crate::core::{ConfigError, ConfigResult, KeyMode};
use std::fmt;
use std::str::FromStr;

/// Default link color
pub const DEFAULT_LINKS_COLOR: &str = "blue";

/// Default opacity
pub const DEFAULT_ALPHA: f64 = 0.8;

/// Shape drawn for every link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinksType {
    #[default]
    Arcs,
    Triangles,
    Loops,
}

impl LinksType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinksType::Arcs => "arcs",
            LinksType::Triangles => "triangles",
            LinksType::Loops => "loops",
        }
    }
}

impl FromStr for LinksType {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "arcs" => Ok(LinksType::Arcs),
            "triangles" => Ok(LinksType::Triangles),
            "loops" => Ok(LinksType::Loops),
            _ => Err(invalid_choice("links_type", s, "arcs, triangles, loops")),
        }
    }
}

/// Stroke style of the link outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::DashDot => "dashdot",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "solid" => Ok(LineStyle::Solid),
            "dashed" => Ok(LineStyle::Dashed),
            "dotted" => Ok(LineStyle::Dotted),
            "dashdot" => Ok(LineStyle::DashDot),
            _ => Err(invalid_choice(
                "line_style",
                s,
                "solid, dashed, dotted, dashdot",
            )),
        }
    }
}

/// How arc and triangle heights scale with the link span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompactLevel {
    /// Level 0: height equals the span
    #[default]
    Proportional,
    /// Level 1: height is the square root of the span
    SquareRoot,
    /// Level 2: every link has the same height
    Constant,
}

impl FromStr for CompactLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "0" => Ok(CompactLevel::Proportional),
            "1" => Ok(CompactLevel::SquareRoot),
            "2" => Ok(CompactLevel::Constant),
            _ => Err(invalid_choice("compact_arcs_level", s, "0, 1, 2")),
        }
    }
}

/// Which end of the y axis is the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Inverted,
}

impl FromStr for Orientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "normal" | "none" | "None" => Ok(Orientation::Normal),
            "inverted" => Ok(Orientation::Inverted),
            _ => Err(invalid_choice("orientation", s, "normal, inverted")),
        }
    }
}

fn invalid_choice(option: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidChoice {
        option: option.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn parse_float(option: &str, value: &str) -> ConfigResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Parse a float option where `auto` means "derive from the data"
pub fn parse_auto_float(option: &str, value: &str) -> ConfigResult<Option<f64>> {
    if value.trim() == "auto" {
        Ok(None)
    } else {
        parse_float(option, value).map(Some)
    }
}

fn parse_bool(option: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            message: "expected true or false".to_string(),
        }),
    }
}

fn check_range(option: &str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if value.is_nan() || value < min || value > max {
        return Err(ConfigError::OutOfRange {
            option: option.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Options of one links track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    pub links_type: LinksType,
    /// Fixed stroke width; derived from the score when unset
    pub line_width: Option<f64>,
    pub line_style: LineStyle,
    /// Color name, or a colormap name to color by score
    pub color: String,
    pub alpha: f64,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub ylim: Option<f64>,
    pub compact_arcs_level: CompactLevel,
    pub use_middle: bool,
    pub orientation: Orientation,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            links_type: LinksType::Arcs,
            line_width: None,
            line_style: LineStyle::Solid,
            color: DEFAULT_LINKS_COLOR.to_string(),
            alpha: DEFAULT_ALPHA,
            min_value: None,
            max_value: None,
            ylim: None,
            compact_arcs_level: CompactLevel::Proportional,
            use_middle: false,
            orientation: Orientation::Normal,
        }
    }
}

impl TrackConfig {
    /// Build a configuration from `key = value` pairs on top of the defaults
    pub fn from_pairs<'a, I>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.set(key, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply a single textual option
    pub fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        match key.trim() {
            "links_type" => self.links_type = value.parse()?,
            "line_width" => self.line_width = Some(parse_float("line_width", value)?),
            "line_style" => self.line_style = value.parse()?,
            "color" => self.color = value.to_string(),
            "alpha" => self.alpha = parse_float("alpha", value)?,
            "min_value" => self.min_value = parse_auto_float("min_value", value)?,
            "max_value" => self.max_value = parse_auto_float("max_value", value)?,
            "ylim" => self.ylim = parse_auto_float("ylim", value)?,
            "compact_arcs_level" => self.compact_arcs_level = value.parse()?,
            "use_middle" => self.use_middle = parse_bool("use_middle", value)?,
            "orientation" => self.orientation = value.parse()?,
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Check numeric options against their accepted ranges
    pub fn validate(&self) -> ConfigResult<()> {
        check_range("alpha", self.alpha, 0.0, 1.0)?;
        if let Some(width) = self.line_width {
            check_range("line_width", width, 0.0, f64::INFINITY)?;
        }
        if let Some(ylim) = self.ylim {
            check_range("ylim", ylim, 0.0, f64::INFINITY)?;
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(ConfigError::InvalidValue {
                    option: "min_value".to_string(),
                    value: min.to_string(),
                    message: format!("min_value must not exceed max_value ({})", max),
                });
            }
        }
        if self.color.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                option: "color".to_string(),
                value: self.color.clone(),
                message: "color must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn key_mode(&self) -> KeyMode {
        KeyMode::from_use_middle(self.use_middle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackConfig::default();
        assert_eq!(config.links_type, LinksType::Arcs);
        assert_eq!(config.color, "blue");
        assert_eq!(config.alpha, 0.8);
        assert_eq!(config.line_width, None);
        assert_eq!(config.compact_arcs_level, CompactLevel::Proportional);
        assert_eq!(config.key_mode(), KeyMode::Span);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_pairs() {
        let config = TrackConfig::from_pairs([
            ("links_type", "loops"),
            ("line_style", "dashdot"),
            ("color", "RdYlGn"),
            ("min_value", "0"),
            ("max_value", "auto"),
            ("compact_arcs_level", "1"),
            ("use_middle", "true"),
            ("orientation", "inverted"),
            ("ylim", "100000"),
        ])
        .unwrap();
        assert_eq!(config.links_type, LinksType::Loops);
        assert_eq!(config.line_style, LineStyle::DashDot);
        assert_eq!(config.min_value, Some(0.0));
        assert_eq!(config.max_value, None);
        assert_eq!(config.compact_arcs_level, CompactLevel::SquareRoot);
        assert_eq!(config.key_mode(), KeyMode::Middle);
        assert_eq!(config.orientation, Orientation::Inverted);
        assert_eq!(config.ylim, Some(100000.0));
    }

    #[test]
    fn test_invalid_choices() {
        assert!("circles".parse::<LinksType>().is_err());
        assert!("3".parse::<CompactLevel>().is_err());
        assert!("wavy".parse::<LineStyle>().is_err());

        let mut config = TrackConfig::default();
        assert_eq!(
            config.set("bogus", "1"),
            Err(ConfigError::UnknownOption("bogus".to_string()))
        );
        assert!(config.set("use_middle", "maybe").is_err());
        assert!(config.set("line_width", "thick").is_err());
    }

    #[test]
    fn test_ranges() {
        assert!(TrackConfig::from_pairs([("alpha", "1.5")]).is_err());
        assert!(TrackConfig::from_pairs([("line_width", "-1")]).is_err());
        assert!(TrackConfig::from_pairs([("ylim", "-5")]).is_err());
        assert!(TrackConfig::from_pairs([("alpha", "0")]).is_ok());
    }

    #[test]
    fn test_inverted_value_range() {
        let err = TrackConfig::from_pairs([("min_value", "10"), ("max_value", "2")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref option, .. } if option == "min_value"));
        assert!(TrackConfig::from_pairs([("min_value", "2"), ("max_value", "2")]).is_ok());
        assert!(TrackConfig::from_pairs([("min_value", "10"), ("max_value", "auto")]).is_ok());
    }
}
