use crate::error::GraphError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// One category within a stage, carrying an aggregate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Opaque color token, passed through to the renderer unchanged.
    pub color: String,
    /// Index of the stage this node belongs to. Assigned by `FlowGraph::new`.
    #[serde(default)]
    pub stage: usize,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        value: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            color: color.into(),
            stage: 0,
        }
    }
}

/// A weighted, directed edge from a node in stage `k` to a node in stage `k + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(alias = "sourceId")]
    pub source: String,
    #[serde(alias = "targetId")]
    pub target: String,
    pub value: f64,
    pub color: String,
}

impl Link {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        value: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            color: color.into(),
        }
    }
}

/// One ordered column of nodes. Node order is part of the visual contract and is
/// never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub nodes: Vec<Node>,
}

impl Stage {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// The complete, validated flow graph: ordered stages plus, for every adjacent
/// pair of stages, the ordered list of links between them.
///
/// A `FlowGraph` is immutable once built. Layout artifacts are derived from it
/// and never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    stages: Vec<Stage>,
    transitions: Vec<Vec<Link>>,
}

impl FlowGraph {
    /// Validates and assembles a flow graph.
    ///
    /// `transitions[k]` holds the links from stage `k` to stage `k + 1`. Passing
    /// fewer transitions than adjacent stage pairs is allowed; the missing ones
    /// are treated as empty. Link endpoints are not resolved here: a dangling
    /// reference only drops that link at routing time.
    pub fn new(mut stages: Vec<Stage>, mut transitions: Vec<Vec<Link>>) -> Result<Self, GraphError> {
        if stages.is_empty() {
            return Err(GraphError::NoStages);
        }

        let pairs = stages.len() - 1;
        if transitions.len() > pairs {
            return Err(GraphError::TooManyTransitions {
                stages: stages.len(),
                transitions: transitions.len(),
            });
        }
        transitions.resize_with(pairs, Vec::new);

        for (stage_index, stage) in stages.iter_mut().enumerate() {
            if stage.nodes.is_empty() {
                return Err(GraphError::EmptyStage {
                    stage: stage_index,
                    name: stage.name.clone(),
                });
            }

            let mut seen = AHashSet::with_capacity(stage.nodes.len());
            for node in &mut stage.nodes {
                if !seen.insert(node.id.clone()) {
                    return Err(GraphError::DuplicateNodeId {
                        stage: stage_index,
                        id: node.id.clone(),
                    });
                }
                if !node.value.is_finite() {
                    return Err(GraphError::NonFiniteNodeValue {
                        stage: stage_index,
                        id: node.id.clone(),
                        value: node.value,
                    });
                }
                node.stage = stage_index;
            }
        }

        for (transition, links) in transitions.iter().enumerate() {
            for (index, link) in links.iter().enumerate() {
                if !link.value.is_finite() || link.value < 0.0 {
                    return Err(GraphError::InvalidLinkValue {
                        transition,
                        index,
                        source_id: link.source.clone(),
                        target_id: link.target.clone(),
                        value: link.value,
                    });
                }
            }
        }

        Ok(Self {
            stages,
            transitions,
        })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// All link lists, one per adjacent stage pair.
    pub fn transitions(&self) -> &[Vec<Link>] {
        &self.transitions
    }

    /// Links from stage `index` to stage `index + 1`.
    pub fn links(&self, index: usize) -> &[Link] {
        self.transitions.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn node_count(&self) -> usize {
        self.stages.iter().map(|s| s.nodes.len()).sum()
    }

    pub fn link_count(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    /// Iterates all nodes in stage order, then in their order within the stage.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.stages.iter().flat_map(|s| s.nodes.iter())
    }
}
