//! # Flowstack - Multi-Stage Proportional Flow Diagrams
//!
//! **Flowstack** turns prepared, already-aggregated flow data into the geometry of a
//! multi-stage Sankey-style diagram. Every stage becomes a vertical column of nodes
//! whose heights are proportional to their values, and every link between adjacent
//! stages becomes a curved ribbon whose thickness is proportional to the flow it carries.
//!
//! ## Core Workflow
//!
//! The engine does not aggregate raw records. It operates on a canonical model of a
//! "flow graph": ordered stages of nodes plus one link list per adjacent stage pair.
//! The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse a `FlowDocument` from JSON, or implement `IntoFlowGraph` for your own structs.
//! 2.  **Lay Out**: Use `LayoutEngine::builder` to configure the pixel budget, then call `layout` to place nodes and route ribbons.
//! 3.  **Interact**: Wrap the graph in a `Diagram` and call `set_focus` (or the pointer adapters) to recompute highlight weights without touching geometry.
//! 4.  **Render**: Build a `Scene` and hand it to `SvgRenderer`, or serialize it as JSON for another drawing surface.
//!
//! Data problems that do not prevent drawing (an unresolved link, a stage summing to
//! zero, conservation mismatches) are reported as `Diagnostic` values on the layout.
//! Hard failures such as a missing stage or a negative link value are errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowstack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = FlowGraph::new(
//!         vec![
//!             Stage::new("Origin", vec![
//!                 Node::new("de", "Germany", 70.0, "#4e79a7"),
//!                 Node::new("us", "United States", 30.0, "#e15759"),
//!             ]),
//!             Stage::new("City", vec![Node::new("vie", "Vienna", 100.0, "#f28e2b")]),
//!         ],
//!         vec![vec![
//!             Link::new("de", "vie", 70.0, "#4e79a7"),
//!             Link::new("us", "vie", 30.0, "#e15759"),
//!         ]],
//!     )?;
//!
//!     let engine = LayoutEngine::builder().with_size(800.0, 400.0).build();
//!     let mut diagram = Diagram::new(graph, engine);
//!     assert!(diagram.diagnostics().is_empty());
//!
//!     // Hovering Germany dims the United States ribbon.
//!     diagram.set_focus(Some("de"));
//!     assert_eq!(diagram.weights().links, vec![1.0, 0.1]);
//!
//!     let svg = diagram.render_svg(&SvgRenderer::default())?;
//!     assert!(svg.starts_with("<?xml"));
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod diagram;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod layout;
pub mod prelude;
pub mod render;
