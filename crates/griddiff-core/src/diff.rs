//! Typed view over the network differ's result.
//!
//! The differ compares two snapshots of the same network and emits a JSON
//! document with one entry per voltage level (changed-switch ids) and one
//! entry per branch (per-terminal deltas). This module flattens that
//! document into lookup structures keyed the way the diagram model refers
//! to elements.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Measurement side of a two-ended branch (line or two-winding transformer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchSide {
    One,
    Two,
}

impl BranchSide {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchSide::One => "ONE",
            BranchSide::Two => "TWO",
        }
    }
}

/// Per-terminal deltas between the two snapshots, in absolute and
/// percentage form. A terminal that exists in only one snapshot has no
/// defined delta; the differ serializes those as string placeholders and
/// they are normalized to NaN here.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDelta {
    pub active: f64,
    pub reactive: f64,
    pub current: f64,
    pub active_pct: f64,
    pub reactive_pct: f64,
    pub current_pct: f64,
}

impl TerminalDelta {
    pub fn active_for(&self, mode: crate::classify::DeltaMode) -> f64 {
        match mode {
            crate::classify::DeltaMode::Absolute => self.active,
            crate::classify::DeltaMode::Percentage => self.active_pct,
        }
    }

    pub fn reactive_for(&self, mode: crate::classify::DeltaMode) -> f64 {
        match mode {
            crate::classify::DeltaMode::Absolute => self.reactive,
            crate::classify::DeltaMode::Percentage => self.reactive_pct,
        }
    }

    pub fn current_for(&self, mode: crate::classify::DeltaMode) -> f64 {
        match mode {
            crate::classify::DeltaMode::Absolute => self.current,
            crate::classify::DeltaMode::Percentage => self.current_pct,
        }
    }
}

/// The differ emits `"Nan"` (and similar placeholders) where a terminal has
/// no defined delta, because NaN is not valid JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDelta {
    Number(f64),
    Placeholder(String),
}

impl RawDelta {
    fn as_f64(&self) -> f64 {
        match self {
            RawDelta::Number(v) => *v,
            RawDelta::Placeholder(_) => f64::NAN,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawVoltageLevelDiff {
    #[serde(rename = "vl.switchesStatus-delta")]
    switches_status_delta: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawBranchDiff {
    #[serde(rename = "branch.branchId1")]
    branch_id: String,
    #[serde(rename = "branch.terminal1.p-delta")]
    terminal1_p_delta: RawDelta,
    #[serde(rename = "branch.terminal1.q-delta")]
    terminal1_q_delta: RawDelta,
    #[serde(rename = "branch.terminal1.i-delta")]
    terminal1_i_delta: RawDelta,
    #[serde(rename = "branch.terminal1.p-delta-percent")]
    terminal1_p_delta_percent: RawDelta,
    #[serde(rename = "branch.terminal1.q-delta-percent")]
    terminal1_q_delta_percent: RawDelta,
    #[serde(rename = "branch.terminal1.i-delta-percent")]
    terminal1_i_delta_percent: RawDelta,
    #[serde(rename = "branch.terminal2.p-delta")]
    terminal2_p_delta: RawDelta,
    #[serde(rename = "branch.terminal2.q-delta")]
    terminal2_q_delta: RawDelta,
    #[serde(rename = "branch.terminal2.i-delta")]
    terminal2_i_delta: RawDelta,
    #[serde(rename = "branch.terminal2.p-delta-percent")]
    terminal2_p_delta_percent: RawDelta,
    #[serde(rename = "branch.terminal2.q-delta-percent")]
    terminal2_q_delta_percent: RawDelta,
    #[serde(rename = "branch.terminal2.i-delta-percent")]
    terminal2_i_delta_percent: RawDelta,
}

impl RawBranchDiff {
    fn side_one(&self) -> TerminalDelta {
        TerminalDelta {
            active: self.terminal1_p_delta.as_f64(),
            reactive: self.terminal1_q_delta.as_f64(),
            current: self.terminal1_i_delta.as_f64(),
            active_pct: self.terminal1_p_delta_percent.as_f64(),
            reactive_pct: self.terminal1_q_delta_percent.as_f64(),
            current_pct: self.terminal1_i_delta_percent.as_f64(),
        }
    }

    fn side_two(&self) -> TerminalDelta {
        TerminalDelta {
            active: self.terminal2_p_delta.as_f64(),
            reactive: self.terminal2_q_delta.as_f64(),
            current: self.terminal2_i_delta.as_f64(),
            active_pct: self.terminal2_p_delta_percent.as_f64(),
            reactive_pct: self.terminal2_q_delta_percent.as_f64(),
            current_pct: self.terminal2_i_delta_percent.as_f64(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDiffResult {
    #[serde(rename = "diff.VoltageLevels")]
    voltage_levels: Vec<RawVoltageLevelDiff>,
    #[serde(rename = "diff.Branches")]
    branches: Vec<RawBranchDiff>,
}

/// Immutable view over one differ result, built once per rendering request.
///
/// Branch deltas are keyed by `"{branchId}_{SIDE}"`, matching the ids the
/// diagram model assigns to feeder nodes, so overlay lookups are a single
/// map access.
#[derive(Debug, Clone, Default)]
pub struct DiffData {
    switches: FxHashSet<String>,
    branch_sides: IndexMap<String, TerminalDelta>,
}

impl DiffData {
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawDiffResult =
            serde_json::from_str(json).map_err(|e| Error::MalformedDiff {
                message: e.to_string(),
            })?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let raw: RawDiffResult =
            serde_json::from_value(value.clone()).map_err(|e| Error::MalformedDiff {
                message: e.to_string(),
            })?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDiffResult) -> Self {
        let switches: FxHashSet<String> = raw
            .voltage_levels
            .into_iter()
            .flat_map(|vl| vl.switches_status_delta)
            .collect();

        let mut branch_sides = IndexMap::with_capacity(raw.branches.len() * 2);
        for branch in &raw.branches {
            branch_sides.insert(
                composite_key(&branch.branch_id, BranchSide::One),
                branch.side_one(),
            );
            branch_sides.insert(
                composite_key(&branch.branch_id, BranchSide::Two),
                branch.side_two(),
            );
        }

        tracing::debug!(
            switches = switches.len(),
            branch_sides = branch_sides.len(),
            "parsed network diff result"
        );

        DiffData {
            switches,
            branch_sides,
        }
    }

    /// Ids of the switches whose open/closed state differs between the
    /// two snapshots.
    pub fn switches_changed(&self) -> &FxHashSet<String> {
        &self.switches
    }

    pub fn switch_changed(&self, id: &str) -> bool {
        self.switches.contains(id)
    }

    pub fn delta_for(&self, element_id: &str, side: BranchSide) -> Option<&TerminalDelta> {
        self.branch_sides.get(&composite_key(element_id, side))
    }

    /// Lookup by an id that already carries the side suffix (feeder node
    /// ids are of the form `"{branchId}_{SIDE}"`).
    pub fn delta_for_terminal(&self, terminal_id: &str) -> Option<&TerminalDelta> {
        self.branch_sides.get(terminal_id)
    }

    pub fn has_terminal(&self, terminal_id: &str) -> bool {
        self.branch_sides.contains_key(terminal_id)
    }
}

fn composite_key(element_id: &str, side: BranchSide) -> String {
    format!("{}_{}", element_id, side.as_str())
}
