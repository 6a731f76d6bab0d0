//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the nagare crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/flowchart.yaml")?;
//!
//! let mut session = Session::new();
//! session.import(&text)?;
//!
//! let export = session.export()?;
//! std::fs::write(&export.file_name, export.contents)?;
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    Branch, Decision, Graph, InputDeclaration, InputType, Node, NodeId, NodeKind, Payload,
    Position, Terminator,
};

// Layout and routing
pub use crate::layout::{LayoutConfig, Levels, assign_levels, layout, layout_with};
pub use crate::routing::{Connector, OrthogonalPath, route, route_all};

// Format
pub use crate::codec::{decode, encode};

// Editing session
pub use crate::session::{AdvisoryValidator, Export, Session};

// Error types
pub use crate::error::{
    AdvisoryError, CycleError, FormatError, ImportError, ReferenceError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
