use crate::graph::FlowGraph;
use serde::{Deserialize, Serialize};

/// Which element a pointer event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementRef {
    Node { stage: usize, id: String },
    /// A link, addressed by its position in the caller-supplied link list.
    Link { transition: usize, index: usize },
}

impl ElementRef {
    /// The node id hovering this element focuses.
    ///
    /// A node focuses itself; a link focuses its source node. Returns `None` for
    /// a link reference that does not exist in `graph`.
    pub fn focus_id<'g>(&'g self, graph: &'g FlowGraph) -> Option<&'g str> {
        match self {
            ElementRef::Node { id, .. } => Some(id.as_str()),
            ElementRef::Link { transition, index } => graph
                .links(*transition)
                .get(*index)
                .map(|link| link.source.as_str()),
        }
    }
}

/// Interaction state: nothing focused, or one node id focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Idle,
    Focused(String),
}

impl FocusState {
    pub fn id(&self) -> Option<&str> {
        match self {
            FocusState::Idle => None,
            FocusState::Focused(id) => Some(id),
        }
    }

    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(id) => FocusState::Focused(id.to_string()),
            None => FocusState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FocusState::Idle)
    }
}
