use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifiers are plain strings chosen by the user.
pub type NodeId = String;

/// Caller-defined key/value data carried by terminators. Key order is preserved.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Top-left corner of a node on the canvas. Derived by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The sentinel every node is reset to after decoding.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which outgoing reference of a decision is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Positive,
    Negative,
}

impl Branch {
    /// Text drawn next to the connector of this branch.
    pub fn label(self) -> &'static str {
        match self {
            Branch::Positive => "True",
            Branch::Negative => "False",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Positive => write!(f, "positive"),
            Branch::Negative => write!(f, "negative"),
        }
    }
}

/// A branching node. Empty paths are unresolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decision {
    pub condition: String,
    pub positive_path: NodeId,
    pub negative_path: NodeId,
}

impl Decision {
    pub fn path(&self, branch: Branch) -> &str {
        match branch {
            Branch::Positive => &self.positive_path,
            Branch::Negative => &self.negative_path,
        }
    }

    pub fn path_mut(&mut self, branch: Branch) -> &mut NodeId {
        match branch {
            Branch::Positive => &mut self.positive_path,
            Branch::Negative => &mut self.negative_path,
        }
    }

    /// Non-empty path references, positive branch first.
    pub fn targets(&self) -> impl Iterator<Item = (Branch, &str)> {
        [Branch::Positive, Branch::Negative]
            .into_iter()
            .map(move |branch| (branch, self.path(branch)))
            .filter(|(_, target)| !target.is_empty())
    }
}

/// A sink node carrying an opaque output payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Terminator {
    pub output: Payload,
}

/// The two node variants of a flowchart.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Decision(Decision),
    Terminator(Terminator),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
}

impl Node {
    pub fn decision(
        condition: impl Into<String>,
        positive_path: impl Into<String>,
        negative_path: impl Into<String>,
    ) -> Self {
        Self::from_kind(NodeKind::Decision(Decision {
            condition: condition.into(),
            positive_path: positive_path.into(),
            negative_path: negative_path.into(),
        }))
    }

    pub fn terminator(output: Payload) -> Self {
        Self::from_kind(NodeKind::Terminator(Terminator { output }))
    }

    pub fn from_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            position: Position::ORIGIN,
        }
    }

    pub fn as_decision(&self) -> Option<&Decision> {
        match &self.kind {
            NodeKind::Decision(decision) => Some(decision),
            NodeKind::Terminator(_) => None,
        }
    }

    pub fn as_decision_mut(&mut self) -> Option<&mut Decision> {
        match &mut self.kind {
            NodeKind::Decision(decision) => Some(decision),
            NodeKind::Terminator(_) => None,
        }
    }

    pub fn as_terminator(&self) -> Option<&Terminator> {
        match &self.kind {
            NodeKind::Terminator(terminator) => Some(terminator),
            NodeKind::Decision(_) => None,
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(self.kind, NodeKind::Decision(_))
    }

    /// Outgoing references; terminators have none.
    pub fn targets(&self) -> Vec<(Branch, &str)> {
        self.as_decision()
            .map(|decision| decision.targets().collect())
            .unwrap_or_default()
    }
}
