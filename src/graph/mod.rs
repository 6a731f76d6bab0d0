//! The in-memory flowchart: nodes keyed by ID, a start node and input declarations.
//!
//! Edges are implicit. A decision's `positive_path`/`negative_path` name the node to
//! follow; an empty reference is unresolved and legal. All edit operations validate
//! before they mutate, so a rejected edit leaves the graph exactly as it was.

use crate::error::{ReferenceError, ValidationError};
use std::collections::BTreeMap;

mod input;
mod node;

pub use input::{InputDeclaration, InputType};
pub use node::{Branch, Decision, Node, NodeId, NodeKind, Payload, Position, Terminator};

/// Prefix used for generated node IDs (`node_1`, `node_2`, ...).
const GENERATED_ID_PREFIX: &str = "node_";

/// A decision edge as stored on its source node. `target` may be dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub branch: Branch,
    pub target: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    start_node: NodeId,
    nodes: BTreeMap<NodeId, Node>,
    inputs: Vec<InputDeclaration>,
}

impl Graph {
    /// Creates a graph holding only its start node.
    pub fn new(start_id: impl Into<String>, start_node: Node) -> Result<Self, ValidationError> {
        let start_id = start_id.into();
        if start_id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        let mut nodes = BTreeMap::new();
        nodes.insert(start_id.clone(), start_node);
        Ok(Self {
            start_node: start_id,
            nodes,
            inputs: Vec::new(),
        })
    }

    /// Assembles a graph without checking that the start node exists.
    ///
    /// Used by the decoder; callers are expected to run [`Graph::check_start`].
    pub fn from_parts(
        start_node: impl Into<String>,
        nodes: BTreeMap<NodeId, Node>,
        inputs: Vec<InputDeclaration>,
    ) -> Self {
        Self {
            start_node: start_node.into(),
            nodes,
            inputs,
        }
    }

    pub fn check_start(&self) -> Result<(), ReferenceError> {
        if self.nodes.contains_key(&self.start_node) {
            Ok(())
        } else {
            Err(ReferenceError::StartNodeNotFound(self.start_node.clone()))
        }
    }

    pub fn start_node(&self) -> &str {
        &self.start_node
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn inputs(&self) -> &[InputDeclaration] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Every decision reference, in node-ID order, positive branch first.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.nodes.iter().flat_map(|(source, node)| {
            node.targets()
                .into_iter()
                .map(move |(branch, target)| Edge {
                    source: source.as_str(),
                    branch,
                    target,
                })
        })
    }

    /// Equality over everything except the derived node positions.
    pub fn same_content(&self, other: &Graph) -> bool {
        self.start_node == other.start_node
            && self.inputs == other.inputs
            && self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(other.nodes.iter())
                .all(|((a_id, a), (b_id, b))| a_id == b_id && a.kind == b.kind)
    }

    // --- Node creation ---

    /// Adds an empty decision under a fresh ID and returns that ID.
    pub fn add_decision(&mut self) -> NodeId {
        self.add_generated(Node::decision("", "", ""))
    }

    /// Adds a terminator with an empty output under a fresh ID and returns that ID.
    pub fn add_terminator(&mut self) -> NodeId {
        self.add_generated(Node::terminator(Payload::new()))
    }

    /// Inserts a node under a caller-chosen ID.
    pub fn insert_node(&mut self, id: impl Into<String>, node: Node) -> Result<(), ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.nodes.contains_key(&id) {
            return Err(ValidationError::DuplicateId(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    fn add_generated(&mut self, node: Node) -> NodeId {
        let id = self.fresh_id();
        log::debug!("Created node '{}'", id);
        self.nodes.insert(id.clone(), node);
        id
    }

    fn fresh_id(&self) -> NodeId {
        (1..)
            .map(|n: usize| format!("{}{}", GENERATED_ID_PREFIX, n))
            .find(|candidate| !self.nodes.contains_key(candidate))
            .unwrap_or_default()
    }

    // --- Structural edits ---

    /// Renames a node and rewrites every reference to it, including the start node.
    pub fn rename_node(&mut self, old_id: &str, new_id: &str) -> Result<(), ValidationError> {
        if new_id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if !self.nodes.contains_key(old_id) {
            return Err(ValidationError::NodeNotFound(old_id.to_string()));
        }
        if old_id == new_id {
            return Ok(());
        }
        if self.nodes.contains_key(new_id) {
            return Err(ValidationError::DuplicateId(new_id.to_string()));
        }

        if let Some(node) = self.nodes.remove(old_id) {
            self.nodes.insert(new_id.to_string(), node);
        }
        self.rewrite_references(old_id, new_id);
        if self.start_node == old_id {
            self.start_node = new_id.to_string();
        }
        log::debug!("Renamed node '{}' to '{}'", old_id, new_id);
        Ok(())
    }

    /// Removes a node and clears every reference that pointed at it.
    pub fn delete_node(&mut self, id: &str) -> Result<Node, ValidationError> {
        if id == self.start_node {
            return Err(ValidationError::DeleteStartNode(id.to_string()));
        }
        let removed = self
            .nodes
            .remove(id)
            .ok_or_else(|| ValidationError::NodeNotFound(id.to_string()))?;
        self.rewrite_references(id, "");
        log::debug!("Deleted node '{}'", id);
        Ok(removed)
    }

    fn rewrite_references(&mut self, from: &str, to: &str) {
        for decision in self.nodes.values_mut().filter_map(Node::as_decision_mut) {
            for branch in [Branch::Positive, Branch::Negative] {
                let path = decision.path_mut(branch);
                if *path == from {
                    *path = to.to_string();
                }
            }
        }
    }

    pub fn set_start(&mut self, id: &str) -> Result<(), ValidationError> {
        if !self.nodes.contains_key(id) {
            return Err(ValidationError::NodeNotFound(id.to_string()));
        }
        self.start_node = id.to_string();
        Ok(())
    }

    // --- Content edits ---

    pub fn set_condition(
        &mut self,
        id: &str,
        condition: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.decision_mut(id)?.condition = condition.into();
        Ok(())
    }

    /// Points a branch of a decision at `target`. An empty target unresolves it.
    pub fn set_path(
        &mut self,
        id: &str,
        branch: Branch,
        target: impl Into<String>,
    ) -> Result<(), ValidationError> {
        *self.decision_mut(id)?.path_mut(branch) = target.into();
        Ok(())
    }

    pub fn set_output(&mut self, id: &str, output: Payload) -> Result<(), ValidationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ValidationError::NodeNotFound(id.to_string()))?;
        match &mut node.kind {
            NodeKind::Terminator(terminator) => {
                terminator.output = output;
                Ok(())
            }
            NodeKind::Decision(_) => Err(ValidationError::NotATerminator(id.to_string())),
        }
    }

    /// Moves a single node, e.g. after a manual drag. Layout overwrites it wholesale.
    pub fn set_position(&mut self, id: &str, position: Position) -> Result<(), ValidationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ValidationError::NodeNotFound(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    fn decision_mut(&mut self, id: &str) -> Result<&mut Decision, ValidationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ValidationError::NodeNotFound(id.to_string()))?;
        node.as_decision_mut()
            .ok_or_else(|| ValidationError::NotADecision(id.to_string()))
    }

    // --- Inputs ---

    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        input_type: InputType,
    ) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.inputs.iter().any(|input| input.name == name) {
            return Err(ValidationError::DuplicateInput(name));
        }
        self.inputs.push(InputDeclaration::new(name, input_type));
        Ok(())
    }

    /// Removes an input declaration, returning whether it existed.
    pub fn remove_input(&mut self, name: &str) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|input| input.name != name);
        self.inputs.len() != before
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = (&NodeId, &mut Node)> {
        self.nodes.iter_mut()
    }
}
