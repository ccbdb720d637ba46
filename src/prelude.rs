//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowstack crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowstack::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = FlowDocument::from_file("path/to/flows.json")?;
//! let engine = LayoutEngine::new(document.layout.clone());
//! let diagram = Diagram::new(document.into_flow_graph()?, engine);
//!
//! for diagnostic in diagram.diagnostics() {
//!     println!("warning: {}", diagnostic);
//! }
//! std::fs::write("flows.svg", diagram.render_svg(&SvgRenderer::default())?)?;
//! # Ok(())
//! # }
//! ```

// Graph model and input
pub use crate::data::FlowDocument;
pub use crate::graph::{ConservationPolicy, FlowGraph, IntoFlowGraph, Link, Node, Stage};

// Layout
pub use crate::layout::{
    DiagramLayout, LayoutCache, LayoutConfig, LayoutEngine, RibbonPath, RoutedLink,
    layout_column, route_links,
};

// Interaction
pub use crate::diagram::Diagram;
pub use crate::highlight::{ElementRef, FocusState, HighlightStyle, WeightMap, compute_weights};

// Rendering
pub use crate::render::{Scene, SvgRenderer};

// Error types
pub use crate::error::{CacheError, Diagnostic, DocumentError, GraphError, RenderError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
