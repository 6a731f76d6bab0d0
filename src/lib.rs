//! # Nagare - Decision Flowchart Layout and Format Engine
//!
//! **Nagare** keeps a directed decision graph (a "flowchart") in memory, lays it out
//! automatically and round-trips it through a human-editable YAML format.
//!
//! ## Core Workflow
//!
//! 1.  **Build or Load**: Edit a [`graph::Graph`] directly, or decode one with [`codec::decode`].
//! 2.  **Check**: Decoding does not verify the start node; call [`graph::Graph::check_start`].
//! 3.  **Lay Out**: [`layout::layout`] assigns longest-path levels, rejects cycles and
//!     computes a position for every node.
//! 4.  **Route**: [`routing::route_all`] draws elbow connectors that step around node bodies.
//! 5.  **Save**: [`codec::encode`] writes the canonical text, sorted by node ID.
//!
//! [`session::Session`] bundles these steps behind the import/export boundary of an editor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = r#"
//! inputs:
//! - name: temperature
//!   type: Double
//! startNode: check
//! nodes:
//!   check: !Decision
//!     condition: temperature > 25
//!     negativePath: normal
//!     positivePath: hot
//!   hot: !Terminator
//!     output:
//!       quality: Hot
//!   normal: !Terminator
//!     output:
//!       quality: Normal
//! "#;
//!
//!     let graph = decode(text)?;
//!     graph.check_start()?;
//!     let graph = layout(&graph)?;
//!
//!     for (id, node) in graph.nodes() {
//!         println!("{id}: ({}, {})", node.position.x, node.position.y);
//!     }
//!     for connector in route_all(&graph, &LayoutConfig::default()) {
//!         println!("{} -> {} ({})", connector.source, connector.target, connector.branch);
//!     }
//!
//!     println!("{}", encode(&graph)?);
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod routing;
pub mod session;
