//! The style overlay engine: decides, per diagram primitive, which
//! severity-level suffix its style classes carry.
//!
//! Every decision is a pure function of the element's identity, its
//! topology adjacency, the parsed diff data and the classifier. Instances
//! are built fresh per rendering request and hold no mutable state.

use griddiff_core::classify::{
    ARROW_ACTIVE_CLASS, ARROW_REACTIVE_CLASS, CONSTANT_COLOR_CLASS, LEVEL_0_SUFFIX,
};
use griddiff_core::{DiffData, LevelClassifier};

use crate::model::{DiagramEdge, DiagramNode, NodeKind};

#[derive(Debug)]
pub struct StyleOverlay<'a> {
    diff: &'a DiffData,
    classifier: &'a LevelClassifier,
}

impl<'a> StyleOverlay<'a> {
    pub fn new(diff: &'a DiffData, classifier: &'a LevelClassifier) -> Self {
        StyleOverlay { diff, classifier }
    }

    /// Severity suffix for a diagram node.
    ///
    /// A switch present in the changed-switch set always maps to the top
    /// band: a state flip is a binary fact with no magnitude to grade.
    /// Two-winding transformers aggregate the current deltas of their
    /// terminals; every other node is level 0.
    pub fn node_suffix(&self, node: &DiagramNode) -> String {
        match node.kind {
            NodeKind::Switch if self.diff.switch_changed(&node.id) => self.classifier.top_suffix(),
            NodeKind::TwoWindingTransformer => self.transformer_suffix(node),
            _ => LEVEL_0_SUFFIX.to_string(),
        }
    }

    fn transformer_suffix(&self, node: &DiagramNode) -> String {
        let adjacent: Vec<&str> = node
            .adjacent_ids
            .iter()
            .map(String::as_str)
            .filter(|id| *id != node.id)
            .collect();

        let own = self.diff.delta_for_terminal(&node.id);
        let all_adjacent_diffed = adjacent.iter().all(|id| self.diff.has_terminal(id));
        if own.is_none() && !all_adjacent_diffed {
            return LEVEL_0_SUFFIX.to_string();
        }

        let mode = self.classifier.mode();
        let i_delta = match own {
            Some(delta) => delta.current_for(mode),
            // All adjacent ids have a record here; undefined (NaN) deltas
            // cannot win the max and are skipped.
            None => adjacent
                .iter()
                .filter_map(|id| self.diff.delta_for_terminal(id))
                .map(|delta| delta.current_for(mode))
                .filter(|value| !value.is_nan())
                .reduce(f64::max)
                .unwrap_or(0.0),
        };
        self.classifier.classify(i_delta)
    }

    /// Severity suffix for a wire. Node 1's delta record wins when both
    /// endpoints have one; an edge with neither endpoint diffed is level 0.
    pub fn wire_suffix(&self, edge: &DiagramEdge) -> String {
        let delta = self
            .diff
            .delta_for_terminal(&edge.node1_id)
            .or_else(|| self.diff.delta_for_terminal(&edge.node2_id));
        match delta {
            Some(delta) => self
                .classifier
                .classify(delta.current_for(self.classifier.mode())),
            None => LEVEL_0_SUFFIX.to_string(),
        }
    }

    /// Style class of the active-power flow arrow of the given feeder.
    pub fn active_arrow_class(&self, feeder_id: &str) -> String {
        let suffix = match self.diff.delta_for_terminal(feeder_id) {
            Some(delta) => self
                .classifier
                .classify(delta.active_for(self.classifier.mode())),
            None => LEVEL_0_SUFFIX.to_string(),
        };
        format!("{ARROW_ACTIVE_CLASS}{suffix}")
    }

    /// Style class of the reactive-power flow arrow of the given feeder.
    pub fn reactive_arrow_class(&self, feeder_id: &str) -> String {
        let suffix = match self.diff.delta_for_terminal(feeder_id) {
            Some(delta) => self
                .classifier
                .classify(delta.reactive_for(self.classifier.mode())),
            None => LEVEL_0_SUFFIX.to_string(),
        };
        format!("{ARROW_REACTIVE_CLASS}{suffix}")
    }

    /// Returns the node's style classes with the `constant-color` token
    /// replaced by its leveled variant. Other classes and their order are
    /// untouched.
    pub fn node_classes(&self, node: &DiagramNode, classes: &[String]) -> Vec<String> {
        let suffix = self.node_suffix(node);
        replace_exact_class(
            classes,
            CONSTANT_COLOR_CLASS,
            &format!("{CONSTANT_COLOR_CLASS}{suffix}"),
        )
    }

    /// Wire counterpart of [`Self::node_classes`].
    pub fn wire_classes(&self, edge: &DiagramEdge, classes: &[String]) -> Vec<String> {
        let suffix = self.wire_suffix(edge);
        replace_exact_class(
            classes,
            CONSTANT_COLOR_CLASS,
            &format!("{CONSTANT_COLOR_CLASS}{suffix}"),
        )
    }

    /// Stylesheet for the configured levels, suitable for embedding next
    /// to (or inside) the rendered diagram.
    pub fn stylesheet(&self) -> String {
        self.classifier.stylesheet()
    }
}

/// Replaces whole-token occurrences of `from` in a class list, returning a
/// new list. Substring matches (e.g. `constant-colorized`) are not touched.
pub fn replace_exact_class(classes: &[String], from: &str, to: &str) -> Vec<String> {
    classes
        .iter()
        .map(|class| {
            if class == from {
                to.to_string()
            } else {
                class.clone()
            }
        })
        .collect()
}
