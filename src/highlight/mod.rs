use crate::layout::{DiagramLayout, RoutedLink};
use serde::{Deserialize, Serialize};

mod focus;

pub use focus::{ElementRef, FocusState};

/// Opacity-like weights used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// Weight of focused elements, and of everything while nothing is focused.
    pub full: f64,
    /// Weight of elements unrelated to the focus. Kept above zero so they stay
    /// faintly legible.
    pub suppressed: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            full: 1.0,
            suppressed: 0.1,
        }
    }
}

/// Per-element weights, index-aligned with `DiagramLayout::nodes` and
/// `DiagramLayout::links`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightMap {
    pub focus: Option<String>,
    pub nodes: Vec<f64>,
    pub links: Vec<f64>,
}

impl WeightMap {
    /// Weights for a laid-out diagram.
    pub fn for_layout(focus: Option<&str>, layout: &DiagramLayout, style: &HighlightStyle) -> Self {
        compute_weights(
            focus,
            layout.nodes.iter().map(|n| n.id.as_str()),
            &layout.links,
            style,
        )
    }

    pub fn node(&self, index: usize) -> Option<f64> {
        self.nodes.get(index).copied()
    }

    pub fn link(&self, index: usize) -> Option<f64> {
        self.links.get(index).copied()
    }
}

/// Computes highlight weights for the current focus.
///
/// With no focus every element gets `style.full`. With a focus id, a node is
/// full iff its id equals the focus, a link is full iff either endpoint id
/// equals the focus, and everything else gets `style.suppressed`.
pub fn compute_weights<'a>(
    focus: Option<&str>,
    node_ids: impl IntoIterator<Item = &'a str>,
    links: &[RoutedLink],
    style: &HighlightStyle,
) -> WeightMap {
    let pick = |hit: bool| if hit { style.full } else { style.suppressed };

    match focus {
        None => WeightMap {
            focus: None,
            nodes: node_ids.into_iter().map(|_| style.full).collect(),
            links: vec![style.full; links.len()],
        },
        Some(focus) => WeightMap {
            focus: Some(focus.to_string()),
            nodes: node_ids.into_iter().map(|id| pick(id == focus)).collect(),
            links: links
                .iter()
                .map(|l| pick(l.source == focus || l.target == focus))
                .collect(),
        },
    }
}
