use crate::error::{DocumentError, GraphError};
use crate::graph::{FlowGraph, IntoFlowGraph, Link, Stage};
use crate::highlight::HighlightStyle;
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// The JSON input format: prepared stages and links plus optional layout and
/// highlight settings.
///
/// `links[k]` holds the links from `stages[k]` to `stages[k + 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub links: Vec<Vec<Link>>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub highlight: HighlightStyle,
}

impl FlowDocument {
    /// Load a flow document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the stages and links into a `FlowGraph` without consuming the
    /// document.
    pub fn graph(&self) -> Result<FlowGraph, GraphError> {
        FlowGraph::new(self.stages.clone(), self.links.clone())
    }
}

impl IntoFlowGraph for FlowDocument {
    fn into_flow_graph(self) -> Result<FlowGraph, DocumentError> {
        Ok(FlowGraph::new(self.stages, self.links)?)
    }
}
