use crate::error::{Diagnostic, RenderError};
use crate::graph::FlowGraph;
use crate::highlight::{ElementRef, FocusState, HighlightStyle, WeightMap};
use crate::layout::{DiagramLayout, LayoutConfig, LayoutEngine};
use crate::render::{Scene, SvgRenderer};

/// One interactive diagram instance.
///
/// A `Diagram` owns its graph, lays it out once, and afterwards only
/// recomputes highlight weights when the focus changes. A new layout pass only
/// happens through [`Diagram::resize`] or [`Diagram::relayout`].
///
/// ```rust
/// use flowstack::prelude::*;
///
/// # fn main() -> Result<()> {
/// let graph = FlowGraph::new(
///     vec![
///         Stage::new("Origin", vec![Node::new("de", "Germany", 60.0, "#4e79a7")]),
///         Stage::new("City", vec![Node::new("vie", "Vienna", 60.0, "#f28e2b")]),
///     ],
///     vec![vec![Link::new("de", "vie", 60.0, "#4e79a7")]],
/// )?;
///
/// let mut diagram = Diagram::new(graph, LayoutEngine::default());
/// diagram.set_focus(Some("de"));
/// assert_eq!(diagram.weights().links, vec![1.0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    graph: FlowGraph,
    engine: LayoutEngine,
    style: HighlightStyle,
    layout: DiagramLayout,
    focus: FocusState,
    weights: WeightMap,
}

impl Diagram {
    pub fn new(graph: FlowGraph, engine: LayoutEngine) -> Self {
        let style = HighlightStyle::default();
        let layout = engine.layout(&graph);
        let weights = WeightMap::for_layout(None, &layout, &style);
        Self {
            graph,
            engine,
            style,
            layout,
            focus: FocusState::Idle,
            weights,
        }
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self.reweight();
        self
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn layout(&self) -> &DiagramLayout {
        &self.layout
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.layout.diagnostics
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Current weights, index-aligned with `layout().nodes` and `layout().links`.
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// Sets or clears the focused node id. Returns `true` if the focus changed.
    ///
    /// Only the weights are recomputed; geometry is untouched.
    pub fn set_focus(&mut self, id: Option<&str>) -> bool {
        let next = FocusState::from_id(id);
        if next == self.focus {
            return false;
        }
        log::debug!("Focus {:?} -> {:?}", self.focus, next);
        self.focus = next;
        self.reweight();
        true
    }

    /// Pointer entered a node or link element.
    pub fn pointer_enter(&mut self, element: &ElementRef) -> bool {
        let Some(id) = element.focus_id(&self.graph).map(str::to_string) else {
            log::debug!("Ignoring pointer over unknown element {:?}", element);
            return false;
        };
        self.set_focus(Some(&id))
    }

    /// Pointer left whatever element it was over.
    pub fn pointer_leave(&mut self) -> bool {
        self.set_focus(None)
    }

    /// Re-runs layout for a new canvas size. Focus is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        let config = LayoutConfig {
            width,
            height,
            ..self.engine.config().clone()
        };
        self.engine = LayoutEngine::new(config);
        self.relayout();
    }

    /// Re-runs layout and weighting from scratch.
    pub fn relayout(&mut self) {
        self.layout = self.engine.layout(&self.graph);
        self.reweight();
    }

    /// Renderer-agnostic primitives for the current state.
    pub fn scene(&self) -> Scene {
        Scene::build(&self.graph, &self.layout, &self.weights)
    }

    pub fn render_svg(&self, renderer: &SvgRenderer) -> Result<String, RenderError> {
        renderer.render(&self.scene())
    }

    fn reweight(&mut self) {
        self.weights = WeightMap::for_layout(self.focus.id(), &self.layout, &self.style);
    }
}
