use crate::error::CycleError;
use crate::graph::{Graph, NodeId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Longest-path depth of every node, plus which nodes the start node cannot reach.
///
/// Reachable nodes are levelled from the start node. Unreachable nodes are levelled
/// among themselves, starting at 0, so they can be drawn as a separate block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Levels {
    levels: BTreeMap<NodeId, usize>,
    unreachable: BTreeSet<NodeId>,
}

impl Levels {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    pub fn is_reachable(&self, id: &str) -> bool {
        self.levels.contains_key(id) && !self.unreachable.contains(id)
    }

    pub fn unreachable(&self) -> &BTreeSet<NodeId> {
        &self.unreachable
    }

    /// Node IDs with their level, in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.levels.iter().map(|(id, level)| (id.as_str(), *level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Assigns every node a level such that each resolved decision edge points to a
/// strictly greater level.
///
/// Levels are seeded breadth-first from the start node and then relaxed until no
/// edge points sideways or upwards. A graph without cycles converges within one
/// pass per node; if it has not converged after that, the graph contains a cycle.
pub fn assign_levels(graph: &Graph) -> Result<Levels, CycleError> {
    let mut levels = seed_from_start(graph);
    let reachable: BTreeSet<NodeId> = levels.keys().cloned().collect();

    let unreachable: BTreeSet<NodeId> = graph
        .nodes()
        .keys()
        .filter(|id| !reachable.contains(*id))
        .cloned()
        .collect();
    for id in &unreachable {
        levels.insert(id.clone(), 0);
    }

    relax(graph, &mut levels, &reachable)?;

    log::debug!(
        "Assigned levels to {} nodes ({} unreachable from '{}')",
        levels.len(),
        unreachable.len(),
        graph.start_node()
    );
    Ok(Levels {
        levels,
        unreachable,
    })
}

/// Breadth-first depth of every node reachable from the start node.
fn seed_from_start(graph: &Graph) -> BTreeMap<NodeId, usize> {
    let mut levels = BTreeMap::new();
    if !graph.contains(graph.start_node()) {
        return levels;
    }

    let mut queue = VecDeque::new();
    levels.insert(graph.start_node().to_string(), 0);
    queue.push_back((graph.start_node(), 0));

    while let Some((id, depth)) = queue.pop_front() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        for (_, target) in node.targets() {
            if graph.contains(target) && !levels.contains_key(target) {
                levels.insert(target.to_string(), depth + 1);
                queue.push_back((target, depth + 1));
            }
        }
    }
    levels
}

/// Raises edge targets until every edge points downwards.
///
/// Edges leaving an unreachable node towards the main flow are ignored so orphans
/// cannot push the main flow down. Any cycle lies entirely on one side of that
/// split, so ignoring those edges never hides one.
fn relax(
    graph: &Graph,
    levels: &mut BTreeMap<NodeId, usize>,
    reachable: &BTreeSet<NodeId>,
) -> Result<(), CycleError> {
    let max_passes = graph.len() + 1;
    let mut last_changed: Option<NodeId> = None;

    for pass in 0..max_passes {
        let mut changed = 0usize;
        for edge in graph.edges() {
            if !graph.contains(edge.target) {
                continue;
            }
            if !reachable.contains(edge.source) && reachable.contains(edge.target) {
                continue;
            }
            let source_level = levels.get(edge.source).copied().unwrap_or(0);
            let target_level = levels.get(edge.target).copied().unwrap_or(0);
            if source_level >= target_level {
                levels.insert(edge.target.to_string(), source_level + 1);
                last_changed = Some(edge.target.to_string());
                changed += 1;
            }
        }
        if changed == 0 {
            log::debug!("Level relaxation converged after {} pass(es)", pass + 1);
            return Ok(());
        }
    }

    let node_id = last_changed.unwrap_or_else(|| graph.start_node().to_string());
    log::debug!("Level relaxation did not converge; cycle through '{}'", node_id);
    Err(CycleError { node_id })
}
