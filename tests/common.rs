//! Common test utilities for building flow graphs and documents.
use flowstack::prelude::*;

/// A conserved three-stage tourist flow.
///
/// Origin (de 60, us 40) -> City (vie 70, sbg 30) -> Activity (museum 50, ski 50)
#[allow(dead_code)]
pub fn tourist_graph() -> FlowGraph {
    FlowGraph::new(
        vec![
            Stage::new(
                "Origin",
                vec![
                    Node::new("de", "Germany", 60.0, "#4e79a7"),
                    Node::new("us", "United States", 40.0, "#e15759"),
                ],
            ),
            Stage::new(
                "City",
                vec![
                    Node::new("vie", "Vienna", 70.0, "#f28e2b"),
                    Node::new("sbg", "Salzburg", 30.0, "#76b7b2"),
                ],
            ),
            Stage::new(
                "Activity",
                vec![
                    Node::new("museum", "Museums", 50.0, "#59a14f"),
                    Node::new("ski", "Alpine Skiing", 50.0, "#edc948"),
                ],
            ),
        ],
        vec![
            vec![
                Link::new("de", "vie", 40.0, "#4e79a7"),
                Link::new("de", "sbg", 20.0, "#4e79a7"),
                Link::new("us", "vie", 30.0, "#e15759"),
                Link::new("us", "sbg", 10.0, "#e15759"),
            ],
            vec![
                Link::new("vie", "museum", 40.0, "#f28e2b"),
                Link::new("vie", "ski", 30.0, "#f28e2b"),
                Link::new("sbg", "museum", 10.0, "#76b7b2"),
                Link::new("sbg", "ski", 20.0, "#76b7b2"),
            ],
        ],
    )
    .expect("tourist fixture is a valid graph")
}

/// Builds a stage from `(id, value)` pairs with a neutral color.
#[allow(dead_code)]
pub fn stage(name: &str, values: &[(&str, f64)]) -> Stage {
    Stage::new(
        name,
        values
            .iter()
            .map(|(id, value)| Node::new(*id, id.to_uppercase(), *value, "#888888"))
            .collect(),
    )
}

/// Builds a link with a neutral color.
#[allow(dead_code)]
pub fn link(source: &str, target: &str, value: f64) -> Link {
    Link::new(source, target, value, "#888888")
}

/// The tourist fixture as a JSON document, with a title and a partial layout section.
#[allow(dead_code)]
pub const TOURIST_DOCUMENT_JSON: &str = r##"{
    "title": "Visitors to Austria",
    "stages": [
        { "name": "Origin", "nodes": [
            { "id": "de", "label": "Germany", "value": 60, "color": "#4e79a7" },
            { "id": "us", "label": "United States", "value": 40, "color": "#e15759" }
        ]},
        { "name": "City", "nodes": [
            { "id": "vie", "label": "Vienna", "value": 70, "color": "#f28e2b" },
            { "id": "sbg", "label": "Salzburg", "value": 30, "color": "#76b7b2" }
        ]}
    ],
    "links": [[
        { "source": "de", "target": "vie", "value": 40, "color": "#4e79a7" },
        { "source": "de", "target": "sbg", "value": 20, "color": "#4e79a7" },
        { "sourceId": "us", "targetId": "vie", "value": 30, "color": "#e15759" },
        { "sourceId": "us", "targetId": "sbg", "value": 10, "color": "#e15759" }
    ]],
    "layout": { "width": 640, "height": 320 },
    "highlight": { "suppressed": 0.2 }
}"##;

/// Asserts two floats are equal within a small absolute tolerance.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
