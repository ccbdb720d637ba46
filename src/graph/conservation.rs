use super::definition::{FlowGraph, Link};
use crate::error::{Diagnostic, FlowDirection};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Relative difference between a declared node value and its link sum that is
/// still treated as equal.
pub const CONSERVATION_TOLERANCE: f64 = 1e-6;

/// What to do when a node's declared value disagrees with its links.
///
/// Node values and link values are both authoritative inputs; the engine never
/// rescales or clips either of them. The policy only decides whether the
/// disagreement is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConservationPolicy {
    /// Skip the check entirely.
    Ignore,
    /// Report every mismatch as a `Diagnostic::ConservationMismatch`.
    #[default]
    Warn,
}

/// Compares every node's declared value with the sum of its outgoing links and
/// the sum of its incoming links.
///
/// A direction is only checked when the node actually has a transition on that
/// side (the first stage has no incoming links, the last no outgoing ones) and
/// that transition carries at least one link.
pub fn check_conservation(graph: &FlowGraph, policy: ConservationPolicy) -> Vec<Diagnostic> {
    if policy == ConservationPolicy::Ignore {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();

    for (stage_index, stage) in graph.stages().iter().enumerate() {
        let outgoing = if stage_index + 1 < graph.stage_count() {
            sums_by(graph.links(stage_index), |l| &l.source)
        } else {
            None
        };
        let incoming = if stage_index > 0 {
            sums_by(graph.links(stage_index - 1), |l| &l.target)
        } else {
            None
        };

        for node in &stage.nodes {
            for (direction, sums) in [
                (FlowDirection::Outgoing, &outgoing),
                (FlowDirection::Incoming, &incoming),
            ] {
                let Some(sums) = sums else { continue };
                let linked = sums.get(node.id.as_str()).copied().unwrap_or(0.0);
                if !approx_equal(node.value, linked) {
                    log::warn!(
                        "Node '{}' (stage {}) declares {} but {} links sum to {}",
                        node.id,
                        stage_index,
                        node.value,
                        direction,
                        linked
                    );
                    diagnostics.push(Diagnostic::ConservationMismatch {
                        stage: stage_index,
                        id: node.id.clone(),
                        direction,
                        declared: node.value,
                        linked,
                    });
                }
            }
        }
    }

    diagnostics
}

fn sums_by<'a>(
    links: &'a [Link],
    key: impl Fn(&'a Link) -> &'a String,
) -> Option<AHashMap<&'a str, f64>> {
    if links.is_empty() {
        return None;
    }
    let mut sums: AHashMap<&str, f64> = AHashMap::new();
    for link in links {
        *sums.entry(key(link).as_str()).or_insert(0.0) += link.value;
    }
    Some(sums)
}

fn approx_equal(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    (a - b).abs() <= CONSERVATION_TOLERANCE * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, Stage};

    fn graph(links: Vec<Link>) -> FlowGraph {
        FlowGraph::new(
            vec![
                Stage::new("from", vec![Node::new("a", "A", 100.0, "#000")]),
                Stage::new(
                    "to",
                    vec![
                        Node::new("x", "X", 30.0, "#111"),
                        Node::new("y", "Y", 70.0, "#222"),
                    ],
                ),
            ],
            vec![links],
        )
        .unwrap()
    }

    #[test]
    fn balanced_graph_reports_nothing() {
        let g = graph(vec![
            Link::new("a", "x", 30.0, "#000"),
            Link::new("a", "y", 70.0, "#000"),
        ]);
        assert!(check_conservation(&g, ConservationPolicy::Warn).is_empty());
    }

    #[test]
    fn mismatch_is_reported_per_direction() {
        let g = graph(vec![
            Link::new("a", "x", 30.0, "#000"),
            Link::new("a", "y", 50.0, "#000"),
        ]);
        let diagnostics = check_conservation(&g, ConservationPolicy::Warn);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::ConservationMismatch { id, direction: FlowDirection::Outgoing, linked, .. }
                if id == "a" && *linked == 80.0
        )));
        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::ConservationMismatch { id, direction: FlowDirection::Incoming, .. }
                if id == "y"
        )));
    }

    #[test]
    fn ignore_policy_skips_the_check() {
        let g = graph(vec![Link::new("a", "x", 1.0, "#000")]);
        assert!(check_conservation(&g, ConservationPolicy::Ignore).is_empty());
    }

    #[test]
    fn empty_transition_is_not_checked() {
        let g = graph(vec![]);
        assert!(check_conservation(&g, ConservationPolicy::Warn).is_empty());
    }
}
