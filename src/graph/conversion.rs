use super::definition::FlowGraph;
use crate::error::DocumentError;

/// A trait for custom data models that can be converted into a `FlowGraph`.
///
/// This keeps the engine format-agnostic. Whatever shape your prepared data has
/// (a CSV export, a hand-written table of splits, a database query), implement
/// this trait on it and the layout engine can consume it.
///
/// # Example
///
/// ```rust,no_run
/// use flowstack::prelude::*;
/// use flowstack::error::DocumentError;
///
/// struct Split { from: String, to: String, share: f64 }
/// struct VisitorTable { origins: Vec<(String, f64)>, cities: Vec<(String, f64)>, splits: Vec<Split> }
///
/// impl IntoFlowGraph for VisitorTable {
///     fn into_flow_graph(self) -> std::result::Result<FlowGraph, DocumentError> {
///         if self.splits.is_empty() {
///             return Err(DocumentError::ValidationError("table has no splits".into()));
///         }
///         let origins = self.origins.iter()
///             .map(|(name, value)| Node::new(name.clone(), name.clone(), *value, "#4e79a7"))
///             .collect();
///         let cities = self.cities.iter()
///             .map(|(name, value)| Node::new(name.clone(), name.clone(), *value, "#f28e2b"))
///             .collect();
///         let links = self.splits.into_iter()
///             .map(|s| Link::new(s.from, s.to, s.share, "#4e79a7"))
///             .collect();
///
///         Ok(FlowGraph::new(
///             vec![Stage::new("Origin", origins), Stage::new("City", cities)],
///             vec![links],
///         )?)
///     }
/// }
/// ```
pub trait IntoFlowGraph {
    /// Consumes the object and converts it into a validated flow graph.
    fn into_flow_graph(self) -> Result<FlowGraph, DocumentError>;
}

impl IntoFlowGraph for FlowGraph {
    fn into_flow_graph(self) -> Result<FlowGraph, DocumentError> {
        Ok(self)
    }
}
