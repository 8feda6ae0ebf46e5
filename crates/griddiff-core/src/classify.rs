//! Delta classification into severity-level style suffixes, plus the
//! generated per-level stylesheet.

use std::fmt::Write as _;

use crate::levels::{LevelBand, LevelsData};

/// Base style class the external renderer assigns to color-neutral
/// diagram primitives; the overlay replaces it with a leveled variant.
pub const CONSTANT_COLOR_CLASS: &str = "constant-color";
/// Base style class of active-power flow arrows.
pub const ARROW_ACTIVE_CLASS: &str = "arrow-active";
/// Base style class of reactive-power flow arrows.
pub const ARROW_REACTIVE_CLASS: &str = "arrow-reactive";

pub const LEVEL_PREFIX: &str = "-level-";
/// Suffix of the implicit "unchanged" level.
pub const LEVEL_0_SUFFIX: &str = "-level-0";

/// Selects which delta form is classified. Band thresholds are interpreted
/// in the unit of the active mode (absolute units or percent of baseline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Absolute,
    Percentage,
}

/// Matches numeric deltas against configured severity bands.
///
/// Bands are kept sorted by descending current threshold so the most
/// severe band is checked first, whatever order the configuration listed
/// them in.
#[derive(Debug, Clone)]
pub struct LevelClassifier {
    bands: Vec<LevelBand>,
    mode: DeltaMode,
}

impl LevelClassifier {
    pub fn new(levels: LevelsData, mode: DeltaMode) -> Self {
        let mut bands = levels.levels;
        bands.sort_by(|a, b| b.current_threshold.total_cmp(&a.current_threshold));
        LevelClassifier { bands, mode }
    }

    pub fn mode(&self) -> DeltaMode {
        self.mode
    }

    /// Returns the style suffix of the first band whose threshold the
    /// delta strictly exceeds, or the level-0 suffix. NaN deltas never
    /// exceed a threshold and classify as level 0.
    pub fn classify(&self, delta: f64) -> String {
        for band in &self.bands {
            if delta > band.current_threshold {
                return level_suffix(band.id);
            }
        }
        LEVEL_0_SUFFIX.to_string()
    }

    /// Suffix of the highest-threshold band. Switch state flips are
    /// binary facts without a magnitude and always map to this band.
    pub fn top_suffix(&self) -> String {
        match self.bands.first() {
            Some(band) => level_suffix(band.id),
            None => LEVEL_0_SUFFIX.to_string(),
        }
    }

    /// Generates one CSS rule per (visual selector, level) pair. Level 0
    /// renders black; configured bands render their own color. Output is
    /// deterministic: level 0 first, then bands by ascending threshold.
    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        push_level_css(&mut out, LEVEL_0_SUFFIX, "black");
        for band in self.bands.iter().rev() {
            push_level_css(&mut out, &level_suffix(band.id), &band.color);
        }
        out
    }
}

fn level_suffix(id: u32) -> String {
    format!("{LEVEL_PREFIX}{id}")
}

/// Sub-element classes styled through their stroke color.
const STROKED_CLASSES: [&str; 9] = [
    "wire",
    "line",
    "busbreaker-connection",
    "busbar-section",
    "disconnector",
    "load",
    "load-break-switch",
    "generator",
    "breaker",
];

fn push_level_css(out: &mut String, suffix: &str, color: &str) {
    let _ = writeln!(
        out,
        ".{CONSTANT_COLOR_CLASS}{suffix} {{stroke: {color}; fill: none}}"
    );
    for class in STROKED_CLASSES {
        let _ = writeln!(
            out,
            ".{class}.{CONSTANT_COLOR_CLASS}{suffix} {{stroke: {color}}}"
        );
    }
    let _ = writeln!(
        out,
        ".node.{CONSTANT_COLOR_CLASS}{suffix} {{stroke: none; fill: {color}}}"
    );
    let _ = writeln!(
        out,
        ".two-wt.{CONSTANT_COLOR_CLASS}{suffix} {{stroke: {color}}}"
    );
    let _ = writeln!(out, ".{ARROW_ACTIVE_CLASS}{suffix} {{fill: {color}}}");
    let _ = writeln!(out, ".{ARROW_REACTIVE_CLASS}{suffix} {{fill: {color}}}");
}
