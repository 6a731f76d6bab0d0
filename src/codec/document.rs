use crate::graph::{Graph, InputDeclaration, NodeKind, Payload};
use serde::Serialize;
use std::collections::BTreeMap;

/// Borrowed, canonically ordered view of a graph as written to disk.
///
/// Field order here is the key order in the output. `nodes` is a `BTreeMap` so
/// node IDs come out sorted, and an empty map is still written as `{}`.
#[derive(Serialize)]
pub(super) struct Document<'a> {
    inputs: &'a [InputDeclaration],
    #[serde(rename = "startNode")]
    start_node: &'a str,
    nodes: BTreeMap<&'a str, NodeDocument<'a>>,
}

/// Externally tagged, so each payload is written as `!Decision` or `!Terminator`.
#[derive(Serialize)]
pub(super) enum NodeDocument<'a> {
    Decision {
        condition: &'a str,
        #[serde(rename = "negativePath", skip_serializing_if = "is_unresolved")]
        negative_path: &'a str,
        #[serde(rename = "positivePath", skip_serializing_if = "is_unresolved")]
        positive_path: &'a str,
    },
    Terminator {
        output: &'a Payload,
    },
}

fn is_unresolved(path: &&str) -> bool {
    path.is_empty()
}

impl<'a> Document<'a> {
    pub(super) fn from_graph(graph: &'a Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|(id, node)| {
                let payload = match &node.kind {
                    NodeKind::Decision(decision) => NodeDocument::Decision {
                        condition: &decision.condition,
                        negative_path: &decision.negative_path,
                        positive_path: &decision.positive_path,
                    },
                    NodeKind::Terminator(terminator) => NodeDocument::Terminator {
                        output: &terminator.output,
                    },
                };
                (id.as_str(), payload)
            })
            .collect();

        Self {
            inputs: graph.inputs(),
            start_node: graph.start_node(),
            nodes,
        }
    }
}
