use super::column::ColumnLayout;
use super::path::RibbonPath;
use crate::error::{Diagnostic, LinkSide};
use crate::graph::Link;
use ahash::AHashMap;
use serde::Serialize;

/// Thinnest ribbon the router will emit, in layout units.
pub const MIN_LINK_THICKNESS: f64 = 1.0;

/// A link that has been assigned its stacked bands at both ends.
///
/// Color and opacity are deliberately absent: they are looked up by the
/// renderer, so routing stays a function of geometry inputs only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedLink {
    /// Index of the stage pair this link belongs to (`0` = stage 0 -> stage 1).
    pub transition: usize,
    /// Position of the link in the caller-supplied list.
    pub index: usize,
    pub source: String,
    pub target: String,
    pub value: f64,
    pub thickness: f64,
    pub x1: f64,
    pub x2: f64,
    /// Top of the band at the source column.
    pub source_y: f64,
    /// Top of the band at the target column.
    pub target_y: f64,
    pub path: RibbonPath,
}

/// Per-node running offsets after a routing pass.
///
/// Each entry is the y where the next link touching that node would start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorState {
    pub source: AHashMap<String, f64>,
    pub target: AHashMap<String, f64>,
}

impl CursorState {
    fn seed(source: &ColumnLayout, target: &ColumnLayout) -> Self {
        Self {
            source: source.nodes.iter().map(|n| (n.id.clone(), n.y)).collect(),
            target: target.nodes.iter().map(|n| (n.id.clone(), n.y)).collect(),
        }
    }
}

/// Everything one routing pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub links: Vec<RoutedLink>,
    pub cursors: CursorState,
    pub diagnostics: Vec<Diagnostic>,
}

/// Routes the links of one stage pair.
#[derive(Debug, Clone, Copy)]
pub struct Router {
    transition: usize,
    min_thickness: f64,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Router {
    pub fn new(transition: usize) -> Self {
        Self {
            transition,
            min_thickness: MIN_LINK_THICKNESS,
        }
    }

    pub fn with_min_thickness(mut self, min_thickness: f64) -> Self {
        self.min_thickness = min_thickness;
        self
    }

    /// Stacks every link onto its source and target nodes and builds its ribbon.
    ///
    /// Links are processed strictly in the given order; a link's band starts where
    /// the previous link touching the same node ended. Thickness is the link's
    /// share of `source_total` scaled to the source column's available height, so
    /// ribbons are comparable across consecutive stage pairs. Links whose source
    /// or target id is not in the respective column are dropped and reported.
    pub fn route(
        &self,
        links: &[Link],
        source: &ColumnLayout,
        target: &ColumnLayout,
        source_total: f64,
        x1: f64,
        x2: f64,
    ) -> RouteOutcome {
        let mut cursors = CursorState::seed(source, target);
        let mut routed = Vec::with_capacity(links.len());
        let mut diagnostics = Vec::new();

        for (index, link) in links.iter().enumerate() {
            let Some(&sy) = cursors.source.get(&link.source) else {
                diagnostics.push(self.unresolved(index, LinkSide::Source, &link.source));
                continue;
            };
            let Some(&ty) = cursors.target.get(&link.target) else {
                diagnostics.push(self.unresolved(index, LinkSide::Target, &link.target));
                continue;
            };

            let thickness = self.thickness(link.value, source_total, source.available_height);

            if let Some(cursor) = cursors.source.get_mut(&link.source) {
                *cursor += thickness;
            }
            if let Some(cursor) = cursors.target.get_mut(&link.target) {
                *cursor += thickness;
            }

            routed.push(RoutedLink {
                transition: self.transition,
                index,
                source: link.source.clone(),
                target: link.target.clone(),
                value: link.value,
                thickness,
                x1,
                x2,
                source_y: sy,
                target_y: ty,
                path: RibbonPath::between(x1, (sy, sy + thickness), x2, (ty, ty + thickness)),
            });
        }

        RouteOutcome {
            links: routed,
            cursors,
            diagnostics,
        }
    }

    fn thickness(&self, value: f64, source_total: f64, available_height: f64) -> f64 {
        let share = if source_total > 0.0 {
            value / source_total * available_height
        } else {
            0.0
        };
        share.max(self.min_thickness)
    }

    fn unresolved(&self, index: usize, side: LinkSide, id: &str) -> Diagnostic {
        let stage = match side {
            LinkSide::Source => self.transition,
            LinkSide::Target => self.transition + 1,
        };
        log::warn!(
            "Dropping link #{} of transition {}: {} '{}' not found in stage {}",
            index,
            self.transition,
            side,
            id,
            stage
        );
        Diagnostic::UnresolvedLink {
            transition: self.transition,
            index,
            side,
            id: id.to_string(),
            stage,
        }
    }
}

/// Routes one stage pair with the default minimum thickness.
///
/// See [`Router::route`].
pub fn route_links(
    links: &[Link],
    source: &ColumnLayout,
    target: &ColumnLayout,
    source_total: f64,
    x1: f64,
    x2: f64,
) -> RouteOutcome {
    Router::default().route(links, source, target, source_total, x1, x2)
}
