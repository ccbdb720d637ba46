//! Column layout tests
//!
//! Verify node sizing, stacking order and the soft diagnostics of a layout pass.
mod common;
use common::*;
use flowstack::prelude::*;

fn compact_engine() -> LayoutEngine {
    LayoutEngine::builder()
        .with_size(300.0, 200.0)
        .with_padding(0.0)
        .with_header_height(0.0)
        .with_label_gutter(0.0)
        .with_node_width(20.0)
        .with_gap(4.0)
        .build()
}

#[cfg(test)]
mod column_tests {
    use super::*;

    #[test]
    fn test_heights_are_proportional_to_values() {
        let stage = stage("Origin", &[("a", 100.0), ("b", 50.0), ("c", 50.0)]);
        let column = layout_column(&stage.nodes, 200.0, 4.0, 0.0);

        let heights: Vec<f64> = column.nodes.iter().map(|n| n.height).collect();
        let ys: Vec<f64> = column.nodes.iter().map(|n| n.y).collect();
        assert_eq!(heights, vec![96.0, 48.0, 48.0]);
        assert_eq!(ys, vec![0.0, 100.0, 152.0]);
        assert_eq!(column.available_height, 192.0);
        assert_eq!(column.total, 200.0);
    }

    #[test]
    fn test_input_order_is_kept() {
        let stage = stage("City", &[("small", 1.0), ("large", 99.0), ("mid", 10.0)]);
        let column = layout_column(&stage.nodes, 100.0, 2.0, 0.0);

        let ids: Vec<&str> = column.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["small", "large", "mid"]);
    }

    #[test]
    fn test_siblings_never_overlap() {
        let stage = stage("City", &[("a", 3.0), ("b", 0.001), ("c", 7.0), ("d", 0.0)]);
        let column = layout_column(&stage.nodes, 120.0, 5.0, 2.0);

        for pair in column.nodes.windows(2) {
            assert!(
                pair[0].bottom() + column.gap <= pair[1].y + 1e-9,
                "'{}' overlaps '{}'",
                pair[0].id,
                pair[1].id
            );
        }
    }

    #[test]
    fn test_zero_total_splits_height_equally() {
        let stage = stage("Empty", &[("a", 0.0), ("b", 0.0), ("c", 0.0), ("d", 0.0)]);
        let column = layout_column(&stage.nodes, 112.0, 4.0, 0.0);

        assert!(column.is_degenerate());
        for node in &column.nodes {
            assert_close(node.height, 25.0);
            assert!(node.height.is_finite());
        }
    }

    #[test]
    fn test_min_height_floor_applies() {
        let stage = stage("Origin", &[("big", 1000.0), ("tiny", 0.01)]);
        let column = layout_column(&stage.nodes, 100.0, 0.0, 3.0);

        assert_eq!(column.get("tiny").map(|n| n.height), Some(3.0));
    }

    #[test]
    fn test_single_node_fills_the_column() {
        let stage = stage("Only", &[("a", 42.0)]);
        let column = layout_column(&stage.nodes, 80.0, 10.0, 0.0);

        assert_eq!(column.nodes[0].y, 0.0);
        assert_eq!(column.nodes[0].height, 80.0);
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn test_columns_are_spread_across_the_width() {
        let layout = compact_engine().layout(&tourist_graph());

        let xs: Vec<f64> = layout.columns.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 140.0, 280.0]);
        assert_eq!(layout.nodes.len(), 6);
        assert_eq!(layout.links.len(), 8);
    }

    #[test]
    fn test_placed_nodes_match_column_layout() {
        let layout = compact_engine().layout(&tourist_graph());

        let de = layout.node(0, "de").expect("de is placed");
        let us = layout.node(0, "us").expect("us is placed");
        assert_close(de.y, 0.0);
        assert_close(de.height, 117.6);
        assert_close(us.y, 121.6);
        assert_close(us.height, 78.4);
        assert_eq!(de.width, 20.0);
    }

    #[test]
    fn test_conserved_graph_has_no_diagnostics() {
        let layout = LayoutEngine::default().layout(&tourist_graph());
        assert!(layout.diagnostics.is_empty(), "{:?}", layout.diagnostics);
    }

    #[test]
    fn test_columns_start_below_the_header() {
        let engine = LayoutEngine::builder()
            .with_padding(10.0)
            .with_header_height(30.0)
            .build();
        let layout = engine.layout(&tourist_graph());

        for column in &layout.columns {
            assert_close(column.layout.nodes[0].y, 40.0);
        }
    }

    #[test]
    fn test_zero_stage_is_reported_as_degenerate() {
        let graph = FlowGraph::new(
            vec![
                stage("Origin", &[("a", 10.0)]),
                stage("Empty", &[("x", 0.0), ("y", 0.0)]),
            ],
            vec![vec![]],
        )
        .unwrap();

        let layout = compact_engine().layout(&graph);

        assert!(layout.diagnostics.contains(&Diagnostic::DegenerateColumn { stage: 1 }));
        assert!(layout.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::NonPositiveNodeValue { stage: 1, id, .. } if id == "x"
        )));
    }

    #[test]
    fn test_crowded_column_reports_overflow() {
        let values: Vec<(String, f64)> = (0..30).map(|i| (format!("n{}", i), 1.0)).collect();
        let pairs: Vec<(&str, f64)> = values.iter().map(|(id, v)| (id.as_str(), *v)).collect();
        let graph = FlowGraph::new(vec![stage("Crowded", &pairs)], vec![]).unwrap();

        let engine = LayoutEngine::builder()
            .with_size(300.0, 60.0)
            .with_padding(0.0)
            .with_header_height(0.0)
            .with_gap(2.0)
            .with_min_node_height(2.0)
            .build();
        let layout = engine.layout(&graph);

        assert!(layout
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::ColumnOverflow { stage: 0, .. })));
    }

    #[test]
    fn test_conservation_mismatch_is_a_warning_not_an_error() {
        let graph = FlowGraph::new(
            vec![stage("Origin", &[("a", 100.0)]), stage("City", &[("x", 100.0)])],
            vec![vec![link("a", "x", 80.0)]],
        )
        .unwrap();

        let warned = compact_engine().layout(&graph);
        assert_eq!(warned.links.len(), 1);
        assert_eq!(
            warned
                .diagnostics
                .iter()
                .filter(|d| matches!(d, Diagnostic::ConservationMismatch { .. }))
                .count(),
            2
        );

        let engine = LayoutEngine::builder()
            .with_conservation(ConservationPolicy::Ignore)
            .build();
        assert!(engine.layout(&graph).diagnostics.is_empty());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let engine = LayoutEngine::default();
        let graph = tourist_graph();
        assert_eq!(engine.layout(&graph), engine.layout(&graph));
    }
}
