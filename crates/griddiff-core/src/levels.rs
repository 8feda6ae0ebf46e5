//! Severity-band configuration ("levels data").
//!
//! Supplied per rendering request as a small JSON document:
//! `{"levels": [{"id": 1, "i": 0.1, "v": 0.1, "c": "red"}, ...]}` where
//! `i` is the current threshold, `v` the voltage threshold and `c` the
//! highlight color. Invalid or absent input falls back to a single
//! documented default band instead of failing the request.

use serde::Deserialize;

use crate::error::{Error, Result};

/// The fallback configuration: one band, threshold 0.1, red.
pub const DEFAULT_LEVELS_JSON: &str = r#"{"levels": [{"id": 1, "i": 0.1, "v": 0.1, "c": "red"}]}"#;

#[derive(Debug, Clone, Deserialize)]
pub struct LevelBand {
    pub id: u32,
    #[serde(rename = "i")]
    pub current_threshold: f64,
    #[serde(rename = "v")]
    pub voltage_threshold: f64,
    #[serde(rename = "c")]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelsData {
    pub levels: Vec<LevelBand>,
}

impl LevelsData {
    pub fn parse(json: &str) -> Result<Self> {
        let data: LevelsData = serde_json::from_str(json).map_err(|e| Error::MalformedLevels {
            message: e.to_string(),
        })?;
        if data.levels.is_empty() {
            return Err(Error::MalformedLevels {
                message: "empty levels list".to_string(),
            });
        }
        Ok(data)
    }

    /// Parses the given document, falling back to [`Self::default`] when it
    /// is absent or invalid. Never fails.
    pub fn parse_or_default(json: Option<&str>) -> Self {
        match json {
            Some(text) => match Self::parse(text) {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!(%err, "invalid levels configuration, using default band");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

impl Default for LevelsData {
    fn default() -> Self {
        LevelsData {
            levels: vec![LevelBand {
                id: 1,
                current_threshold: 0.1,
                voltage_threshold: 0.1,
                color: "red".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bands_with_wire_field_names() {
        let data =
            LevelsData::parse(r#"{"levels": [{"id": 2, "i": 0.5, "v": 1.0, "c": "orange"}]}"#)
                .unwrap();
        assert_eq!(data.levels.len(), 1);
        assert_eq!(data.levels[0].id, 2);
        assert_eq!(data.levels[0].current_threshold, 0.5);
        assert_eq!(data.levels[0].voltage_threshold, 1.0);
        assert_eq!(data.levels[0].color, "orange");
    }

    #[test]
    fn empty_levels_list_is_rejected() {
        let err = LevelsData::parse(r#"{"levels": []}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedLevels { .. }));
    }

    #[test]
    fn fallback_is_the_documented_default_band() {
        for input in [None, Some("not json"), Some(r#"{"levels": []}"#)] {
            let data = LevelsData::parse_or_default(input);
            assert_eq!(data.levels.len(), 1);
            assert_eq!(data.levels[0].id, 1);
            assert_eq!(data.levels[0].current_threshold, 0.1);
            assert_eq!(data.levels[0].color, "red");
        }
    }

    #[test]
    fn default_json_round_trips_through_parse() {
        let data = LevelsData::parse(DEFAULT_LEVELS_JSON).unwrap();
        assert_eq!(data.levels[0].id, 1);
        assert_eq!(data.levels[0].color, "red");
    }
}
