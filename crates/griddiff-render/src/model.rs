//! The slice of the external diagram renderer's graph model the overlay
//! needs: element identity, a closed set of node kinds, and topology
//! adjacency. The renderer owns layout and drawing; only these facts
//! cross the boundary.

/// Node kinds the overlay distinguishes. Everything that is neither a
/// switch nor a two-winding transformer classifies through the generic
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Switch,
    TwoWindingTransformer,
    Other,
}

#[derive(Debug, Clone)]
pub struct DiagramNode {
    pub id: String,
    pub kind: NodeKind,
    /// Ids of the nodes adjacent via topology edges, the node itself
    /// excluded.
    pub adjacent_ids: Vec<String>,
}

impl DiagramNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        DiagramNode {
            id: id.into(),
            kind,
            adjacent_ids: Vec::new(),
        }
    }

    pub fn with_adjacent(mut self, adjacent_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.adjacent_ids = adjacent_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// A wire between two laid-out diagram nodes.
#[derive(Debug, Clone)]
pub struct DiagramEdge {
    pub node1_id: String,
    pub node2_id: String,
}

impl DiagramEdge {
    pub fn new(node1_id: impl Into<String>, node2_id: impl Into<String>) -> Self {
        DiagramEdge {
            node1_id: node1_id.into(),
            node2_id: node2_id.into(),
        }
    }
}
