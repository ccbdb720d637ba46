use crate::error::RenderError;
use crate::graph::FlowGraph;
use crate::highlight::WeightMap;
use crate::layout::{DiagramLayout, RibbonPath};
use serde::Serialize;

/// Horizontal distance between a node and its label.
const LABEL_OFFSET: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRect {
    pub stage: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ribbon {
    pub transition: usize,
    pub index: usize,
    pub source: String,
    pub target: String,
    pub path: RibbonPath,
    pub color: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub weight: f64,
}

/// Everything a drawing surface needs, already positioned and weighted.
///
/// A renderer consumes these primitives as they are; it never computes
/// geometry of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub stage_titles: Vec<Label>,
    pub ribbons: Vec<Ribbon>,
    pub nodes: Vec<NodeRect>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Combines geometry, the caller's colors and the current weights.
    ///
    /// `weights` must have been computed for `layout`.
    pub fn build(graph: &FlowGraph, layout: &DiagramLayout, weights: &WeightMap) -> Self {
        let last_stage = graph.stage_count().saturating_sub(1);
        let header_y = layout
            .columns
            .first()
            .and_then(|c| c.layout.nodes.first())
            .map_or(0.0, |n| n.y / 2.0);

        let stage_titles = layout
            .columns
            .iter()
            .map(|column| Label {
                text: column.name.clone(),
                x: column.x + column.width / 2.0,
                y: header_y,
                anchor: TextAnchor::Middle,
                weight: 1.0,
            })
            .collect();

        let ribbons = layout
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| Ribbon {
                transition: link.transition,
                index: link.index,
                source: link.source.clone(),
                target: link.target.clone(),
                path: link.path.clone(),
                color: graph
                    .links(link.transition)
                    .get(link.index)
                    .map(|l| l.color.clone())
                    .unwrap_or_default(),
                weight: weights.link(i).unwrap_or(1.0),
            })
            .collect();

        let mut nodes = Vec::with_capacity(layout.nodes.len());
        let mut labels = Vec::with_capacity(layout.nodes.len());
        for (i, placed) in layout.nodes.iter().enumerate() {
            let node = graph.stage(placed.stage).and_then(|s| s.node(&placed.id));
            let weight = weights.node(i).unwrap_or(1.0);

            nodes.push(NodeRect {
                stage: placed.stage,
                id: placed.id.clone(),
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                color: node.map(|n| n.color.clone()).unwrap_or_default(),
                weight,
            });

            let (x, anchor) = if placed.stage == 0 && last_stage > 0 {
                (placed.x - LABEL_OFFSET, TextAnchor::End)
            } else {
                (placed.x + placed.width + LABEL_OFFSET, TextAnchor::Start)
            };
            labels.push(Label {
                text: node.map_or_else(|| placed.id.clone(), |n| {
                    format!("{} ({})", n.label, format_value(n.value))
                }),
                x,
                y: placed.y + placed.height / 2.0,
                anchor,
                weight,
            });
        }

        Self {
            width: layout.width,
            height: layout.height,
            title: None,
            stage_titles,
            ribbons,
            nodes,
            labels,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Pretty JSON, for drawing surfaces other than SVG.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Formats a value for display: integers without decimals, otherwise up to
/// one decimal.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.1}", value);
        text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
    }
}
