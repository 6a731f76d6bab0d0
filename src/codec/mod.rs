//! The canonical YAML format for flowcharts.
//!
//! A document has three top-level keys: `inputs`, `startNode` and `nodes`. Each
//! entry of `nodes` is tagged `!Decision` or `!Terminator`. Untagged entries are
//! still accepted when their fields make the variant obvious (`condition` for a
//! decision, `output` for a terminator).
//!
//! Terminator outputs may nest mappings and lists freely. Scalar keys such as
//! `200:` are read as text (`"200"`) and written back quoted. Non-finite numbers
//! (`.nan`, `.inf`) and tagged values inside an output are rejected.
//!
//! Positions are not part of the format. Decoded nodes sit at the origin until
//! the graph is laid out.

use crate::error::FormatError;
use crate::graph::{
    Decision, Graph, InputDeclaration, InputType, Node, NodeId, NodeKind, Payload, Terminator,
};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

mod document;

use document::Document;

/// File extensions recognised as flowchart documents.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// MIME type used when exporting a flowchart.
pub const YAML_MIME: &str = "text/yaml";

const DECISION_TAG: &str = "Decision";
const TERMINATOR_TAG: &str = "Terminator";

/// Serializes a graph to its canonical text. Identical graphs give identical bytes.
pub fn encode(graph: &Graph) -> Result<String, FormatError> {
    serde_yaml::to_string(&Document::from_graph(graph))
        .map_err(|e| FormatError::Serialize(e.to_string()))
}

/// Parses canonical text back into a graph.
///
/// The start node is not checked against `nodes`; use [`Graph::check_start`].
pub fn decode(text: &str) -> Result<Graph, FormatError> {
    let root: Value =
        serde_yaml::from_str(text).map_err(|e| FormatError::Syntax(e.to_string()))?;
    let Value::Mapping(root) = root else {
        return Err(FormatError::RootNotMapping);
    };

    let start_node = match root.get("startNode") {
        Some(Value::String(start)) if !start.is_empty() => start.clone(),
        _ => return Err(FormatError::MissingStartNode),
    };

    let nodes = match root.get("nodes") {
        Some(Value::Mapping(nodes)) => decode_nodes(nodes)?,
        _ => return Err(FormatError::InvalidNodes),
    };

    let inputs = match root.get("inputs") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => decode_inputs(items)?,
        Some(_) => {
            return Err(FormatError::InvalidInput {
                index: 0,
                message: "'inputs' must be a list".to_string(),
            });
        }
    };

    log::debug!(
        "Decoded {} nodes and {} inputs (start '{}')",
        nodes.len(),
        inputs.len(),
        start_node
    );
    Ok(Graph::from_parts(start_node, nodes, inputs))
}

fn decode_nodes(entries: &Mapping) -> Result<BTreeMap<NodeId, Node>, FormatError> {
    let mut nodes = BTreeMap::new();
    for (key, payload) in entries {
        let id = scalar_to_string(key)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FormatError::InvalidNodeId(format!("{:?}", key)))?;
        let kind = decode_node(&id, payload)?;
        nodes.insert(id, Node::from_kind(kind));
    }
    Ok(nodes)
}

/// Resolves the variant from the tag, or from the fields when the tag is missing.
fn decode_node(id: &str, payload: &Value) -> Result<NodeKind, FormatError> {
    let unknown = || FormatError::UnknownNodeType {
        node_id: id.to_string(),
    };

    match payload {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            match tag.trim_start_matches('!') {
                DECISION_TAG => decode_decision(id, &tagged.value),
                TERMINATOR_TAG => decode_terminator(id, &tagged.value),
                _ => Err(unknown()),
            }
        }
        Value::Mapping(fields) => {
            let has_condition = fields.contains_key("condition");
            let has_output = fields.contains_key("output");
            match (has_condition, has_output) {
                (true, false) => decode_decision(id, payload),
                (false, true) => decode_terminator(id, payload),
                _ => Err(unknown()),
            }
        }
        _ => Err(unknown()),
    }
}

fn decode_decision(id: &str, payload: &Value) -> Result<NodeKind, FormatError> {
    let fields = payload_fields(id, payload)?;
    Ok(NodeKind::Decision(Decision {
        condition: string_field(id, fields, "condition")?,
        positive_path: string_field(id, fields, "positivePath")?,
        negative_path: string_field(id, fields, "negativePath")?,
    }))
}

fn decode_terminator(id: &str, payload: &Value) -> Result<NodeKind, FormatError> {
    let fields = payload_fields(id, payload)?;
    let output = match fields.and_then(|fields| fields.get("output")) {
        None | Some(Value::Null) => Payload::new(),
        Some(Value::Mapping(output)) => {
            payload_from_yaml(output).map_err(|message| invalid_field(id, "output", message))?
        }
        Some(_) => return Err(invalid_field(id, "output", "expected a mapping")),
    };
    Ok(NodeKind::Terminator(Terminator { output }))
}

/// Converts an output mapping. Scalar keys are read as their text, like node IDs.
fn payload_from_yaml(mapping: &Mapping) -> Result<Payload, String> {
    mapping
        .iter()
        .map(|(key, value)| {
            let key = scalar_to_string(key)
                .ok_or_else(|| format!("keys must be scalars, found {:?}", key))?;
            Ok((key, json_from_yaml(value)?))
        })
        .collect()
}

fn json_from_yaml(value: &Value) -> Result<serde_json::Value, String> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.into()
            } else if let Some(i) = n.as_i64() {
                i.into()
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| format!("non-finite number {} is not supported", n))?
            }
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(
            items.iter().map(json_from_yaml).collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => serde_json::Value::Object(payload_from_yaml(mapping)?),
        Value::Tagged(tagged) => {
            return Err(format!("tagged value '{}' is not supported", tagged.tag));
        }
    })
}

/// A tagged payload may be empty (`!Decision` on its own), which reads as no fields.
fn payload_fields<'v>(id: &str, payload: &'v Value) -> Result<Option<&'v Mapping>, FormatError> {
    match payload {
        Value::Mapping(fields) => Ok(Some(fields)),
        Value::Null => Ok(None),
        _ => Err(FormatError::UnknownNodeType {
            node_id: id.to_string(),
        }),
    }
}

/// Missing and null fields read as the empty string.
fn string_field(id: &str, fields: Option<&Mapping>, name: &str) -> Result<String, FormatError> {
    match fields.and_then(|fields| fields.get(name)) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => {
            scalar_to_string(value).ok_or_else(|| invalid_field(id, name, "expected a scalar"))
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn invalid_field(id: &str, field: &str, message: impl Into<String>) -> FormatError {
    FormatError::InvalidField {
        node_id: id.to_string(),
        field: field.to_string(),
        message: message.into(),
    }
}

fn decode_inputs(items: &[Value]) -> Result<Vec<InputDeclaration>, FormatError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let invalid = |message: String| FormatError::InvalidInput { index, message };
            let Value::Mapping(fields) = item else {
                return Err(invalid("expected a mapping with 'name' and 'type'".to_string()));
            };
            let name = fields
                .get("name")
                .and_then(scalar_to_string)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| invalid("'name' must be a non-empty string".to_string()))?;
            let input_type = fields
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("'type' must be a string".to_string()))?
                .parse::<InputType>()
                .map_err(invalid)?;
            Ok(InputDeclaration { name, input_type })
        })
        .collect()
}
