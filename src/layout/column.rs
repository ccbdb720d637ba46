use crate::graph::Node;
use serde::Serialize;

/// Vertical placement of one node inside its column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub y: f64,
    pub height: f64,
}

impl NodeLayout {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The computed layout of one stage.
///
/// Besides the per-node rectangles this keeps the basis the column was sized
/// against, so links leaving the column can be normalized the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLayout {
    pub nodes: Vec<NodeLayout>,
    /// Sum of the node values the column was sized from.
    pub total: f64,
    /// `total_height` minus all sibling gaps. May be negative for a budget that
    /// is too small.
    pub available_height: f64,
    pub gap: f64,
}

impl ColumnLayout {
    pub fn get(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Vertical space actually consumed: heights plus gaps. Can exceed the
    /// budget when many nodes hit the minimum height.
    pub fn extent(&self) -> f64 {
        let heights: f64 = self.nodes.iter().map(|n| n.height).sum();
        heights + self.gap * self.nodes.len().saturating_sub(1) as f64
    }

    /// The same column moved down by `dy`.
    pub fn translated(&self, dy: f64) -> Self {
        Self {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeLayout {
                    id: n.id.clone(),
                    y: n.y + dy,
                    height: n.height,
                })
                .collect(),
            ..*self
        }
    }

    /// True when every node was sized by the equal-share fallback.
    pub fn is_degenerate(&self) -> bool {
        self.total <= 0.0
    }
}

/// Lays out one stage top to bottom.
///
/// Each node gets a height proportional to its share of the stage total, floored
/// at `min_height`, separated by `gap`. The input order is kept as is. When the
/// stage total is not positive every node receives an equal share of the
/// available height instead.
pub fn layout_column(nodes: &[Node], total_height: f64, gap: f64, min_height: f64) -> ColumnLayout {
    let total: f64 = nodes.iter().map(|n| n.value).sum();
    let gaps = gap * nodes.len().saturating_sub(1) as f64;
    let available_height = total_height - gaps;
    let equal_share = if nodes.is_empty() {
        0.0
    } else {
        available_height / nodes.len() as f64
    };

    let mut y = 0.0;
    let mut placed = Vec::with_capacity(nodes.len());
    for node in nodes {
        let share = if total > 0.0 {
            node.value / total * available_height
        } else {
            equal_share
        };
        let height = share.max(min_height);
        placed.push(NodeLayout {
            id: node.id.clone(),
            y,
            height,
        });
        y += height + gap;
    }

    ColumnLayout {
        nodes: placed,
        total,
        available_height,
        gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(values: &[(&str, f64)]) -> Vec<Node> {
        values
            .iter()
            .map(|(id, v)| Node::new(*id, *id, *v, "#000"))
            .collect()
    }

    #[test]
    fn extent_counts_gaps_between_nodes_only() {
        let column = layout_column(&nodes(&[("a", 1.0), ("b", 1.0)]), 100.0, 10.0, 1.0);
        assert_eq!(column.extent(), 100.0);
    }

    #[test]
    fn negative_budget_still_yields_visible_nodes() {
        let column = layout_column(&nodes(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]), 4.0, 4.0, 2.0);
        assert!(column.available_height < 0.0);
        assert!(column.nodes.iter().all(|n| n.height == 2.0));
        assert!(column.extent() > 4.0);
    }
}
