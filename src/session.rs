use crate::codec::{self, YAML_MIME};
use crate::error::{AdvisoryError, CycleError, FormatError, ImportError, ValidationError};
use crate::graph::{Graph, Node, NodeId};
use crate::layout::{self, LayoutConfig};
use crate::routing::{self, Connector};

/// Default file name offered when exporting.
pub const EXPORT_FILE_NAME: &str = "flowchart.yaml";

/// ID of the decision every new session starts with.
pub const DEFAULT_START_ID: &str = "start";

/// An external reviewer of flowcharts.
///
/// It receives the canonical text of the current graph and answers with free-form
/// advice. Its answer is informational only and never applied to the graph.
pub trait AdvisoryValidator {
    fn review(&self, document: &str) -> Result<String, AdvisoryError>;
}

impl<F> AdvisoryValidator for F
where
    F: Fn(&str) -> Result<String, AdvisoryError>,
{
    fn review(&self, document: &str) -> Result<String, AdvisoryError> {
        self(document)
    }
}

/// A downloadable snapshot of the live graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

/// One editing session and the single live graph it owns.
///
/// Operations that can fail build their result off to the side and only then
/// replace the live graph, so a failure never leaves it half-updated.
#[derive(Debug, Clone)]
pub struct Session {
    graph: Graph,
    config: LayoutConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a session holding a single empty decision.
    pub fn new() -> Self {
        let graph = Graph::from_parts(
            DEFAULT_START_ID,
            [(DEFAULT_START_ID.to_string(), Node::decision("", "", ""))]
                .into_iter()
                .collect(),
            Vec::new(),
        );
        Self {
            graph,
            config: LayoutConfig::default(),
        }
    }

    /// Wraps an existing graph. The graph is taken as-is; call [`Session::relayout`] to place it.
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            graph,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Applies an edit, possibly made of several steps, to a copy of the live graph.
    ///
    /// The copy replaces the live graph only when the whole closure succeeds.
    pub fn edit<T>(
        &mut self,
        f: impl FnOnce(&mut Graph) -> Result<T, ValidationError>,
    ) -> Result<T, ValidationError> {
        let mut draft = self.graph.clone();
        let value = f(&mut draft)?;
        self.graph = draft;
        Ok(value)
    }

    pub fn rename_node(&mut self, old_id: &str, new_id: &str) -> Result<(), ValidationError> {
        self.graph.rename_node(old_id, new_id)
    }

    pub fn delete_node(&mut self, id: &str) -> Result<Node, ValidationError> {
        self.graph.delete_node(id)
    }

    pub fn add_decision(&mut self) -> NodeId {
        self.graph.add_decision()
    }

    pub fn add_terminator(&mut self) -> NodeId {
        self.graph.add_terminator()
    }

    /// Recomputes every node position. On a cycle the live graph keeps its old positions.
    pub fn relayout(&mut self) -> Result<(), CycleError> {
        self.graph = layout::layout_with(&self.graph, &self.config)?;
        Ok(())
    }

    /// Routes every resolved connector of the live graph.
    pub fn connectors(&self) -> Vec<Connector> {
        routing::route_all(&self.graph, &self.config)
    }

    /// Decodes `text`, checks its start node, lays it out and makes it the live graph.
    pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
        let decoded = codec::decode(text)?;
        decoded.check_start()?;
        let laid_out = layout::layout_with(&decoded, &self.config)?;

        log::info!(
            "Imported flowchart with {} nodes (start '{}')",
            laid_out.len(),
            laid_out.start_node()
        );
        self.graph = laid_out;
        Ok(())
    }

    /// Serializes the live graph for download. The session is not changed.
    pub fn export(&self) -> Result<Export, FormatError> {
        let contents = codec::encode(&self.graph)?;
        log::info!("Exported flowchart ({} bytes)", contents.len());
        Ok(Export {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime: YAML_MIME,
            contents,
        })
    }

    /// Hands a snapshot of the live graph to an advisory validator and returns its report.
    pub fn advise(&self, validator: &dyn AdvisoryValidator) -> Result<String, AdvisoryError> {
        let snapshot = codec::encode(&self.graph)?;
        validator.review(&snapshot).inspect_err(|e| {
            log::warn!("Advisory validation failed: {}", e);
        })
    }
}
