//! Property tests for layout, routing and highlighting.
mod common;
use common::*;
use flowstack::prelude::*;
use proptest::prelude::*;

const MIN_THICKNESS: f64 = flowstack::layout::MIN_LINK_THICKNESS;

fn node_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1f64..1000.0, 1..12)
}

/// Two stages plus links given as `(source index, target index, value)`.
fn two_stage_graph() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<(usize, usize, f64)>)> {
    (node_values(), node_values()).prop_flat_map(|(sources, targets)| {
        let (s, t) = (sources.len(), targets.len());
        let links = prop::collection::vec((0..s, 0..t, 0.0f64..500.0), 0..20);
        (Just(sources), Just(targets), links)
    })
}

fn build(sources: &[f64], targets: &[f64], links: &[(usize, usize, f64)]) -> FlowGraph {
    let ids = |prefix: &str, values: &[f64]| -> Vec<(String, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("{}{}", prefix, i), *v))
            .collect()
    };
    let to_stage = |name: &str, pairs: &[(String, f64)]| {
        let borrowed: Vec<(&str, f64)> = pairs.iter().map(|(id, v)| (id.as_str(), *v)).collect();
        stage(name, &borrowed)
    };

    FlowGraph::new(
        vec![
            to_stage("from", &ids("s", sources)),
            to_stage("to", &ids("t", targets)),
        ],
        vec![
            links
                .iter()
                .map(|(s, t, v)| link(&format!("s{}", s), &format!("t{}", t), *v))
                .collect(),
        ],
    )
    .expect("generated graph is valid")
}

proptest! {
    #[test]
    fn heights_are_proportional(values in node_values(), gap in 0.0f64..10.0) {
        let nodes: Vec<Node> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Node::new(format!("n{}", i), "n", *v, "#000"))
            .collect();
        let column = layout_column(&nodes, 2000.0, gap, 0.0);
        let total: f64 = values.iter().sum();

        for (node, value) in column.nodes.iter().zip(&values) {
            let expected = value / total * column.available_height;
            prop_assert!((node.height - expected).abs() < 1e-6);
        }
        let heights: f64 = column.nodes.iter().map(|n| n.height).sum();
        prop_assert!((heights - column.available_height).abs() < 1e-6);
    }

    #[test]
    fn siblings_never_overlap(values in node_values(), gap in 0.0f64..10.0, min in 0.0f64..5.0) {
        let nodes: Vec<Node> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Node::new(format!("n{}", i), "n", *v, "#000"))
            .collect();
        let column = layout_column(&nodes, 300.0, gap, min);

        for pair in column.nodes.windows(2) {
            prop_assert!(pair[0].bottom() + gap <= pair[1].y + 1e-9);
        }
        prop_assert!(column.nodes.iter().all(|n| n.height >= min));
    }

    #[test]
    fn bands_stack_contiguously((sources, targets, links) in two_stage_graph()) {
        let graph = build(&sources, &targets, &links);
        let layout = LayoutEngine::default().layout(&graph);
        prop_assert_eq!(layout.links.len(), links.len());

        let mut next_source: Vec<Option<f64>> = vec![None; sources.len()];
        let mut next_target: Vec<Option<f64>> = vec![None; targets.len()];
        for (routed, (s, t, _)) in layout.links.iter().zip(&links) {
            let source_top = layout.node(0, &routed.source).map(|n| n.y);
            let target_top = layout.node(1, &routed.target).map(|n| n.y);
            let expected_source = next_source[*s].or(source_top).unwrap_or_default();
            let expected_target = next_target[*t].or(target_top).unwrap_or_default();

            prop_assert!((routed.source_y - expected_source).abs() < 1e-6);
            prop_assert!((routed.target_y - expected_target).abs() < 1e-6);
            prop_assert!(routed.thickness >= MIN_THICKNESS);

            next_source[*s] = Some(routed.source_y + routed.thickness);
            next_target[*t] = Some(routed.target_y + routed.thickness);
        }
    }

    #[test]
    fn weights_follow_the_focus(
        (sources, targets, links) in two_stage_graph(),
        pick in prop::option::of(0usize..24),
    ) {
        let graph = build(&sources, &targets, &links);
        let ids: Vec<String> = graph.nodes().map(|n| n.id.clone()).collect();
        let focus = pick.and_then(|i| ids.get(i).cloned());

        let mut diagram = Diagram::new(graph, LayoutEngine::default());
        let before = diagram.layout().clone();
        diagram.set_focus(focus.as_deref());
        let weights = diagram.weights();

        for (node, weight) in diagram.layout().nodes.iter().zip(&weights.nodes) {
            let hit = focus.as_deref().is_none_or(|f| f == node.id);
            prop_assert_eq!(*weight, if hit { 1.0 } else { 0.1 });
        }
        for (link, weight) in diagram.layout().links.iter().zip(&weights.links) {
            let hit = focus
                .as_deref()
                .is_none_or(|f| f == link.source || f == link.target);
            prop_assert_eq!(*weight, if hit { 1.0 } else { 0.1 });
        }
        prop_assert_eq!(diagram.layout(), &before);
    }
}
