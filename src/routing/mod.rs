//! Orthogonal connector routing between decisions and their targets.
//!
//! Every connector is a vertical-horizontal-vertical elbow. The horizontal run
//! starts a little below the source (further for the negative branch so sibling
//! connectors do not overlap) and is pushed below any node body it would cut
//! through. Routing never fails: when no clear height is found within the attempt
//! budget the last candidate is returned and flagged as not clear.

mod geometry;

pub use geometry::{Point, Rect};

use crate::graph::{Branch, Graph, Node, NodeId, Position};
use crate::layout::LayoutConfig;
use std::collections::BTreeMap;

/// Extra attempts on top of one per node.
const EXTRA_ATTEMPTS: usize = 2;

/// Horizontal gap between a connector and its branch label.
const LABEL_GAP: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLabel {
    pub text: &'static str,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalPath {
    /// Source anchor, both bends and target anchor, in drawing order.
    pub points: Vec<Point>,
    pub label: Option<ConnectorLabel>,
    /// `false` when the horizontal run still crosses a node body.
    pub clear: bool,
}

impl OrthogonalPath {
    /// Height of the horizontal run.
    pub fn bend_y(&self) -> f64 {
        self.points.get(1).map_or(0.0, |p| p.y)
    }
}

/// A routed edge of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub source: NodeId,
    pub target: NodeId,
    pub branch: Branch,
    pub path: OrthogonalPath,
}

/// Routes a single connector from `source_id` (at `from`) to `target_id` (at `to`).
///
/// `nodes` is the full node set; everything except the two endpoints is an obstacle.
pub fn route(
    from: Position,
    to: Position,
    source_id: &str,
    target_id: &str,
    nodes: &BTreeMap<NodeId, Node>,
    branch: Branch,
    config: &LayoutConfig,
) -> OrthogonalPath {
    let half_width = config.node_width / 2.0;
    let source_height = nodes
        .get(source_id)
        .map_or(config.decision_height, |node| config.node_height(&node.kind));

    let start = Point::new(from.x + half_width, from.y + source_height);
    let end = Point::new(to.x + half_width, to.y);

    let obstacles: Vec<Rect> = nodes
        .iter()
        .filter(|(id, _)| id.as_str() != source_id && id.as_str() != target_id)
        .map(|(_, node)| Rect::of_node(node, config))
        .collect();

    let offset = match branch {
        Branch::Positive => config.positive_branch_offset,
        Branch::Negative => config.negative_branch_offset,
    };
    let mut bend_y = start.y + offset;

    let max_attempts = nodes.len() + EXTRA_ATTEMPTS;
    let mut clear = false;
    for _ in 0..max_attempts {
        match lowest_collision(&obstacles, start.x, end.x, bend_y) {
            None => {
                clear = true;
                break;
            }
            Some(bottom) => {
                log::debug!(
                    "Connector '{}' -> '{}' blocked at y={}; retrying below {}",
                    source_id,
                    target_id,
                    bend_y,
                    bottom
                );
                bend_y = bottom + config.clearance;
            }
        }
    }
    if !clear {
        clear = lowest_collision(&obstacles, start.x, end.x, bend_y).is_none();
    }
    if !clear {
        log::warn!(
            "Connector '{}' -> '{}' still crosses a node after {} attempts",
            source_id,
            target_id,
            max_attempts
        );
    }

    let label = config.branch_labels.then(|| ConnectorLabel {
        text: branch.label(),
        position: Point::new(start.x + LABEL_GAP, start.y + offset / 2.0),
    });

    OrthogonalPath {
        points: vec![
            start,
            Point::new(start.x, bend_y),
            Point::new(end.x, bend_y),
            end,
        ],
        label,
        clear,
    }
}

/// Bottom edge of the lowest obstacle the horizontal run at `y` would cut through.
fn lowest_collision(obstacles: &[Rect], x1: f64, x2: f64, y: f64) -> Option<f64> {
    obstacles
        .iter()
        .filter(|rect| rect.crosses_horizontal(x1, x2, y))
        .map(Rect::bottom)
        .max_by(f64::total_cmp)
}

/// Routes every decision edge whose target exists, in [`Graph::edges`] order.
pub fn route_all(graph: &Graph, config: &LayoutConfig) -> Vec<Connector> {
    graph
        .edges()
        .filter_map(|edge| {
            let source = graph.node(edge.source)?;
            let target = graph.node(edge.target)?;
            let path = route(
                source.position,
                target.position,
                edge.source,
                edge.target,
                graph.nodes(),
                edge.branch,
                config,
            );
            Some(Connector {
                source: edge.source.to_string(),
                target: edge.target.to_string(),
                branch: edge.branch,
                path,
            })
        })
        .collect()
}
