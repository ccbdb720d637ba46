use std::fmt;
use thiserror::Error;

/// Structural errors found while assembling a `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("A flow graph needs at least one stage")]
    NoStages,

    #[error("Stage {stage} ('{name}') does not contain any nodes")]
    EmptyStage { stage: usize, name: String },

    #[error("Node id '{id}' appears more than once in stage {stage}")]
    DuplicateNodeId { stage: usize, id: String },

    #[error("Node '{id}' in stage {stage} has a non-finite value: {value}")]
    NonFiniteNodeValue { stage: usize, id: String, value: f64 },

    #[error(
        "Link #{index} of transition {transition} ('{source_id}' -> '{target_id}') has an invalid value: {value}"
    )]
    InvalidLinkValue {
        transition: usize,
        index: usize,
        source_id: String,
        target_id: String,
        value: f64,
    },

    #[error("Graph declares {transitions} link transitions, but only {stages} stage(s) exist")]
    TooManyTransitions { stages: usize, transitions: usize },
}

/// Errors that can occur while reading an input document or converting a custom
/// format into a `FlowGraph`.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse flow document JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors raised while painting a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write SVG output: {0}")]
    Format(#[from] fmt::Error),

    #[error("Failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while fingerprinting layout inputs for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to fingerprint layout inputs: {0}")]
    Fingerprint(#[from] bincode::error::EncodeError),
}

/// Which end of a link failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSide {
    Source,
    Target,
}

impl fmt::Display for LinkSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkSide::Source => write!(f, "source"),
            LinkSide::Target => write!(f, "target"),
        }
    }
}

/// Soft problems found during layout and routing.
///
/// None of these abort a layout pass. The offending element is either dropped
/// (unresolved links) or laid out with a fallback rule, and the diagnostic is
/// handed back to the caller next to the result.
#[derive(Error, Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error(
        "Dropped link #{index} of transition {transition}: {side} '{id}' does not exist in stage {stage}"
    )]
    UnresolvedLink {
        transition: usize,
        index: usize,
        side: LinkSide,
        id: String,
        stage: usize,
    },

    #[error("Node '{id}' in stage {stage} has a non-positive value ({value})")]
    NonPositiveNodeValue { stage: usize, id: String, value: f64 },

    #[error("Stage {stage} has no positive total value; nodes share the column equally")]
    DegenerateColumn { stage: usize },

    #[error(
        "Stage {stage} needs {required:.1}px but only {budget:.1}px are available; the column overflows"
    )]
    ColumnOverflow {
        stage: usize,
        required: f64,
        budget: f64,
    },

    #[error(
        "Node '{id}' in stage {stage} declares {declared} but its {direction} links sum to {linked}"
    )]
    ConservationMismatch {
        stage: usize,
        id: String,
        direction: FlowDirection,
        declared: f64,
        linked: f64,
    },
}

/// Direction of the links compared against a node's declared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Incoming,
    Outgoing,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowDirection::Incoming => write!(f, "incoming"),
            FlowDirection::Outgoing => write!(f, "outgoing"),
        }
    }
}
