//! Resolution rules for the optional post-download prune.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

/// Width and height in pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("Invalid resolution: {}. Use format like '1920x1080'", s))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid width: {}", w))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid height: {}", h))?;

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Aspect ratio, written `W:H`. Compared exactly by cross-multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        u64::from(width) * u64::from(self.height) == u64::from(height) * u64::from(self.width)
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("Invalid aspect ratio: {}. Use format like '16:9'", s))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid aspect width: {}", w))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid aspect height: {}", h))?;

        if width == 0 || height == 0 {
            return Err(format!("Aspect ratio must be non-zero: {}", s));
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    pub enabled: bool,
    pub min_width: u32,
    pub min_height: u32,
    /// `"any"` or `""` disables the aspect check.
    #[serde(deserialize_with = "deserialize_aspect")]
    pub aspect: Option<AspectRatio>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_width: 1920,
            min_height: 1080,
            aspect: Some(AspectRatio::new(16, 9)),
        }
    }
}

fn deserialize_aspect<'de, D>(deserializer: D) -> Result<Option<AspectRatio>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim() {
        "" | "any" => Ok(None),
        other => other.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(
            "1920x1080".parse::<Resolution>().unwrap(),
            Resolution { width: 1920, height: 1080 }
        );
        assert_eq!("800X600".parse::<Resolution>().unwrap().height, 600);
        assert!("1920".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_parse_aspect() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::new(16, 9));
        assert!("16/9".parse::<AspectRatio>().is_err());
        assert!("0:9".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_aspect_matches_exactly() {
        let wide = AspectRatio::new(16, 9);
        assert!(wide.matches(1920, 1080));
        assert!(wide.matches(3840, 2160));
        assert!(!wide.matches(1920, 1200));
        assert!(!wide.matches(1080, 1920));
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(AspectRatio::new(21, 9).to_string(), "21:9");
        assert_eq!(
            Resolution { width: 2560, height: 1440 }.to_string(),
            "2560x1440"
        );
    }

    #[test]
    fn test_aspect_any_disables_check() {
        let config: ResolutionConfig = toml::from_str(r#"aspect = "any""#).unwrap();
        assert_eq!(config.aspect, None);
        assert_eq!(config.min_width, 1920);
    }

    #[test]
    fn test_invalid_aspect_rejected() {
        let result: Result<ResolutionConfig, _> = toml::from_str(r#"aspect = "wide""#);
        assert!(result.is_err());
    }
}
