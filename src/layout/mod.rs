//! Automatic placement of flowchart nodes.
//!
//! Layout runs in two stages. [`assign_levels`] gives every node a longest-path
//! depth from the start node and rejects cycles. The position solver then turns
//! levels into rows, places terminators on the bottom row of their block, centres
//! decisions above their children and pushes overlapping nodes apart.

mod config;
mod levels;
mod position;

pub use config::LayoutConfig;
pub use levels::{Levels, assign_levels};
pub use position::{assign_rows, resolve_overlaps};

use crate::error::CycleError;
use crate::graph::Graph;

/// Lays out `graph` with the default [`LayoutConfig`].
pub fn layout(graph: &Graph) -> Result<Graph, CycleError> {
    layout_with(graph, &LayoutConfig::default())
}

/// Returns a copy of `graph` whose node positions have been recomputed.
pub fn layout_with(graph: &Graph, config: &LayoutConfig) -> Result<Graph, CycleError> {
    position::solve(graph, config)
}
