use super::config::LayoutConfig;
use super::levels::{Levels, assign_levels};
use crate::error::CycleError;
use crate::graph::{Graph, Node, Position};
use ahash::AHashMap;
use itertools::{Itertools, MinMaxResult};
use std::collections::BTreeMap;

/// Returns a copy of `graph` with every node position recomputed.
///
/// The input graph is never modified. The only failure is a cycle reported by
/// the level assignment.
pub fn solve(graph: &Graph, config: &LayoutConfig) -> Result<Graph, CycleError> {
    let levels = assign_levels(graph)?;
    let rows = assign_rows(graph, &levels);
    let xs = solve_columns(graph, &rows, config);

    let shift = match xs.values().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(min) | MinMaxResult::MinMax(min, _) => config.margin - min,
    };
    let row_of: AHashMap<&str, usize> = rows
        .iter()
        .flat_map(|(row, ids)| ids.iter().map(move |id| (*id, *row)))
        .collect();

    let mut laid_out = graph.clone();
    for (id, node) in laid_out.nodes_mut() {
        let x = xs.get(id.as_str()).copied().unwrap_or(0.0) + shift;
        let row = row_of.get(id.as_str()).copied().unwrap_or(0);
        node.position = Position::new(x, config.margin + row as f64 * config.level_spacing);
    }

    log::debug!(
        "Laid out {} nodes over {} rows",
        laid_out.len(),
        rows.len()
    );
    Ok(laid_out)
}

/// Maps levels to visual rows, each row listing its node IDs in ID order.
///
/// The main flow comes first: decisions on their level, terminators on the row
/// below the deepest decision. Unreachable nodes follow as a second block laid
/// out the same way.
pub fn assign_rows<'g>(graph: &'g Graph, levels: &Levels) -> BTreeMap<usize, Vec<&'g str>> {
    let mut rows: BTreeMap<usize, Vec<&'g str>> = BTreeMap::new();

    let (main, orphans): (Vec<_>, Vec<_>) = graph
        .nodes()
        .iter()
        .partition(|(id, _)| levels.is_reachable(id));

    let next = place_block(&main, levels, 0, &mut rows);
    place_block(&orphans, levels, next, &mut rows);
    rows
}

/// Places one block of nodes starting at row `offset`; returns the first free row.
fn place_block<'g>(
    block: &[(&'g String, &'g Node)],
    levels: &Levels,
    offset: usize,
    rows: &mut BTreeMap<usize, Vec<&'g str>>,
) -> usize {
    if block.is_empty() {
        return offset;
    }
    let deepest_decision = block
        .iter()
        .filter(|(_, node)| node.is_decision())
        .filter_map(|(id, _)| levels.get(id))
        .max();
    let terminator_row = offset + deepest_decision.map_or(0, |level| level + 1);

    let mut last_row = offset;
    for (id, node) in block {
        let row = if node.is_decision() {
            offset + levels.get(id).unwrap_or(0)
        } else {
            terminator_row
        };
        last_row = last_row.max(row);
        rows.entry(row).or_default().push(id.as_str());
    }
    last_row + 1
}

/// Computes the horizontal centre of every node, bottom row first.
///
/// Terminators are spread evenly in ID order. A decision sits above the mean of
/// its already placed children, or on its slot in the row when it has none.
/// Every row is then de-overlapped and centred on x = 0.
fn solve_columns<'g>(
    graph: &'g Graph,
    rows: &BTreeMap<usize, Vec<&'g str>>,
    config: &LayoutConfig,
) -> AHashMap<&'g str, f64> {
    let spacing = config.min_spacing();
    let mut xs: AHashMap<&'g str, f64> = AHashMap::new();

    for (row, ids) in rows.iter().rev() {
        let mut placed: Vec<(&'g str, f64)> = ids
            .iter()
            .enumerate()
            .map(|(slot, id)| {
                let fallback = slot as f64 * spacing;
                let x = graph
                    .node(id)
                    .map(|node| mean_child_x(node, &xs).unwrap_or(fallback))
                    .unwrap_or(fallback);
                (*id, x)
            })
            .collect();

        resolve_overlaps(&mut placed, spacing);
        recenter(&mut placed);

        log::debug!("Row {} placed with {} node(s)", row, placed.len());
        xs.extend(placed);
    }
    xs
}

fn mean_child_x(node: &Node, xs: &AHashMap<&str, f64>) -> Option<f64> {
    let children: Vec<f64> = node
        .targets()
        .into_iter()
        .filter_map(|(_, target)| xs.get(target).copied())
        .collect();
    if children.is_empty() {
        None
    } else {
        Some(children.iter().sum::<f64>() / children.len() as f64)
    }
}

/// Pushes neighbours apart until every pair in the row keeps `spacing`.
///
/// Each offending pair is moved apart symmetrically by half the deficit. The
/// passes are bounded; a closing left-to-right sweep then enforces the spacing
/// exactly for whatever the passes left short.
pub fn resolve_overlaps(row: &mut [(&str, f64)], spacing: f64) {
    row.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let max_passes = row.len() * row.len() + 1;
    let mut settled = false;
    for _ in 0..max_passes {
        let mut pushed = false;
        for i in 1..row.len() {
            let gap = row[i].1 - row[i - 1].1;
            if gap < spacing {
                let half = (spacing - gap) / 2.0;
                row[i - 1].1 -= half;
                row[i].1 += half;
                pushed = true;
            }
        }
        if !pushed {
            settled = true;
            break;
        }
    }
    if !settled {
        log::debug!("Overlap passes exhausted; sweeping {} node(s)", row.len());
    }

    for i in 1..row.len() {
        let min_x = row[i - 1].1 + spacing;
        if row[i].1 - row[i - 1].1 < spacing {
            row[i].1 = min_x;
        }
    }
}

fn recenter(row: &mut [(&str, f64)]) {
    let mid = match row.iter().map(|(_, x)| *x).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return,
        MinMaxResult::OneElement(x) => x,
        MinMaxResult::MinMax(min, max) => (min + max) / 2.0,
    };
    for (_, x) in row.iter_mut() {
        *x -= mid;
    }
}
