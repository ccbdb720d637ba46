use crate::error::Diagnostic;
use crate::graph::{ConservationPolicy, FlowGraph, check_conservation};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod cache;
pub mod column;
pub mod path;
pub mod router;

pub use cache::{CacheStats, LayoutCache};
pub use column::{ColumnLayout, NodeLayout, layout_column};
pub use path::{PathCommand, Point, RibbonPath};
pub use router::{CursorState, MIN_LINK_THICKNESS, RouteOutcome, RoutedLink, Router, route_links};

/// Slack allowed before a column is reported as overflowing its budget.
const OVERFLOW_EPSILON: f64 = 1e-9;

/// The pixel budget and tuning knobs for one diagram.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Vertical gap between sibling nodes.
    pub gap: f64,
    pub node_width: f64,
    /// Floor for node heights, keeps tiny nodes visible and hoverable.
    pub min_node_height: f64,
    /// Floor for ribbon thickness.
    pub min_link_thickness: f64,
    /// Outer margin on every side.
    pub padding: f64,
    /// Horizontal room reserved left of the first and right of the last column
    /// for node labels.
    pub label_gutter: f64,
    /// Room above the columns for stage titles.
    pub header_height: f64,
    pub conservation: ConservationPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 480.0,
            gap: 4.0,
            node_width: 16.0,
            min_node_height: 2.0,
            min_link_thickness: MIN_LINK_THICKNESS,
            padding: 12.0,
            label_gutter: 140.0,
            header_height: 24.0,
            conservation: ConservationPolicy::Warn,
        }
    }
}

impl LayoutConfig {
    /// Vertical budget shared by every column.
    pub fn column_height(&self) -> f64 {
        self.height - 2.0 * self.padding - self.header_height
    }

    /// Top edge of every column.
    pub fn column_top(&self) -> f64 {
        self.padding + self.header_height
    }

    /// Left edge of each of `stage_count` columns, spread evenly across the
    /// width that remains after padding and label gutters.
    pub fn column_xs(&self, stage_count: usize) -> Vec<f64> {
        let left = self.padding + self.label_gutter;
        let right = self.width - self.padding - self.label_gutter - self.node_width;
        match stage_count {
            0 => Vec::new(),
            1 => vec![left],
            n => {
                let step = (right - left) / (n - 1) as f64;
                (0..n).map(|i| left + step * i as f64).collect()
            }
        }
    }
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub stage: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One laid-out stage in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageColumn {
    pub stage: usize,
    pub name: String,
    pub x: f64,
    pub width: f64,
    pub layout: ColumnLayout,
}

/// The full geometric result of a layout pass.
///
/// Nodes are listed stage by stage in input order, links transition by
/// transition in input order (minus dropped links). This ordering is what
/// weight maps are aligned with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramLayout {
    pub width: f64,
    pub height: f64,
    pub columns: Vec<StageColumn>,
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<RoutedLink>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagramLayout {
    pub fn node(&self, stage: usize, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.stage == stage && n.id == id)
    }

    pub fn links_for(&self, transition: usize) -> impl Iterator<Item = &RoutedLink> {
        self.links.iter().filter(move |l| l.transition == transition)
    }
}

/// Turns a `FlowGraph` into a `DiagramLayout`.
///
/// The engine is stateless apart from its config; calling `layout` twice with
/// the same graph gives identical results.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

pub struct LayoutEngineBuilder {
    config: LayoutConfig,
}

impl LayoutEngineBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.config.gap = gap;
        self
    }
    pub fn with_node_width(mut self, node_width: f64) -> Self {
        self.config.node_width = node_width;
        self
    }
    pub fn with_min_node_height(mut self, min_node_height: f64) -> Self {
        self.config.min_node_height = min_node_height;
        self
    }
    pub fn with_min_link_thickness(mut self, min_link_thickness: f64) -> Self {
        self.config.min_link_thickness = min_link_thickness;
        self
    }
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.config.padding = padding;
        self
    }
    pub fn with_label_gutter(mut self, label_gutter: f64) -> Self {
        self.config.label_gutter = label_gutter;
        self
    }
    pub fn with_header_height(mut self, header_height: f64) -> Self {
        self.config.header_height = header_height;
        self
    }
    pub fn with_conservation(mut self, policy: ConservationPolicy) -> Self {
        self.config.conservation = policy;
        self
    }
    pub fn build(self) -> LayoutEngine {
        LayoutEngine {
            config: self.config,
        }
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> LayoutEngineBuilder {
        LayoutEngineBuilder::new(LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out every stage, then routes every adjacent stage pair.
    pub fn layout(&self, graph: &FlowGraph) -> DiagramLayout {
        let config = &self.config;
        let column_height = config.column_height();
        let top = config.column_top();
        let xs = config.column_xs(graph.stage_count());

        log::debug!(
            "Laying out {} stage(s), {} node(s), {} link(s) in {}x{}",
            graph.stage_count(),
            graph.node_count(),
            graph.link_count(),
            config.width,
            config.height
        );

        let mut diagnostics = check_conservation(graph, config.conservation);
        let mut columns = Vec::with_capacity(graph.stage_count());
        let mut nodes = Vec::with_capacity(graph.node_count());

        for ((stage_index, stage), &x) in graph.stages().iter().enumerate().zip(&xs) {
            for node in stage.nodes.iter().filter(|n| n.value <= 0.0) {
                log::warn!(
                    "Node '{}' in stage {} has non-positive value {}",
                    node.id,
                    stage_index,
                    node.value
                );
                diagnostics.push(Diagnostic::NonPositiveNodeValue {
                    stage: stage_index,
                    id: node.id.clone(),
                    value: node.value,
                });
            }

            let local = layout_column(
                &stage.nodes,
                column_height,
                config.gap,
                config.min_node_height,
            );

            if local.is_degenerate() {
                log::warn!("Stage {} has no positive total, using equal shares", stage_index);
                diagnostics.push(Diagnostic::DegenerateColumn { stage: stage_index });
            }
            let extent = local.extent();
            if extent > column_height + OVERFLOW_EPSILON {
                log::warn!(
                    "Stage {} needs {:.1} but the budget is {:.1}",
                    stage_index,
                    extent,
                    column_height
                );
                diagnostics.push(Diagnostic::ColumnOverflow {
                    stage: stage_index,
                    required: extent,
                    budget: column_height,
                });
            }

            let layout = local.translated(top);
            nodes.extend(layout.nodes.iter().map(|n| PlacedNode {
                stage: stage_index,
                id: n.id.clone(),
                x,
                y: n.y,
                width: config.node_width,
                height: n.height,
            }));
            columns.push(StageColumn {
                stage: stage_index,
                name: stage.name.clone(),
                x,
                width: config.node_width,
                layout,
            });
        }

        let mut links = Vec::with_capacity(graph.link_count());
        for (transition, (source, target)) in columns.iter().tuple_windows().enumerate() {
            let outcome = Router::new(transition)
                .with_min_thickness(config.min_link_thickness)
                .route(
                    graph.links(transition),
                    &source.layout,
                    &target.layout,
                    source.layout.total,
                    source.x + config.node_width,
                    target.x,
                );
            links.extend(outcome.links);
            diagnostics.extend(outcome.diagnostics);
        }

        DiagramLayout {
            width: config.width,
            height: config.height,
            columns,
            nodes,
            links,
            diagnostics,
        }
    }
}
