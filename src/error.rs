use thiserror::Error;

/// Errors raised while decoding (or encoding) the canonical text format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Failed to parse flowchart YAML: {0}")]
    Syntax(String),

    #[error("The document root must be a mapping")]
    RootNotMapping,

    #[error("'startNode' must be present and a non-empty string")]
    MissingStartNode,

    #[error("'nodes' must be present and a mapping")]
    InvalidNodes,

    #[error("Node IDs must be non-empty strings, found '{0}'")]
    InvalidNodeId(String),

    #[error("unknown node type for node ID \"{node_id}\"")]
    UnknownNodeType { node_id: String },

    #[error("Field '{field}' of node '{node_id}' is invalid: {message}")]
    InvalidField {
        node_id: String,
        field: String,
        message: String,
    },

    #[error("Input declaration #{index} is invalid: {message}")]
    InvalidInput { index: usize, message: String },

    #[error("Failed to serialize flowchart: {0}")]
    Serialize(String),
}

/// A decoded graph whose references do not resolve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("Start node '{0}' does not exist in the graph")]
    StartNodeNotFound(String),
}

/// The decision graph contains a cycle and cannot be levelled.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("The graph is not a DAG: cycle detected through node '{node_id}'")]
pub struct CycleError {
    pub node_id: String,
}

/// User-facing rejections of graph edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Node IDs must not be empty")]
    EmptyId,

    #[error("A node with ID '{0}' already exists")]
    DuplicateId(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Node '{0}' is the start node and cannot be deleted")]
    DeleteStartNode(String),

    #[error("Node '{0}' is not a decision node")]
    NotADecision(String),

    #[error("Node '{0}' is not a terminator node")]
    NotATerminator(String),

    #[error("An input named '{0}' is already declared")]
    DuplicateInput(String),
}

/// Everything that can stop an import from replacing the live graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Cycle(#[from] CycleError),
}

/// Failures reported by an external advisory validator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    #[error("Advisory validator is unavailable: {0}")]
    Unavailable(String),

    #[error("Advisory validator rejected the request: {0}")]
    Rejected(String),

    #[error("Could not serialize the graph snapshot: {0}")]
    Snapshot(#[from] FormatError),
}

/// Errors loading a layout configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read layout config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layout config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
