//! Tests for the canonical YAML encoder and decoder.
mod common;
use common::*;
use nagare::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
#[case::simple(create_simple_graph())]
#[case::nested(create_nested_graph())]
#[case::wide(create_wide_graph())]
fn test_round_trip_preserves_content(#[case] graph: Graph) {
    let text = encode(&graph).unwrap();
    let decoded = decode(&text).unwrap();
    assert!(decoded.same_content(&graph), "round trip changed:\n{}", text);
}

#[test]
fn test_round_trip_resets_positions() {
    let laid_out = layout(&create_nested_graph()).unwrap();
    let decoded = decode(&encode(&laid_out).unwrap()).unwrap();

    assert!(decoded.same_content(&laid_out));
    assert!(
        decoded
            .nodes()
            .values()
            .all(|node| node.position == Position::ORIGIN)
    );
}

#[test]
fn test_encode_is_deterministic() {
    let graph = create_wide_graph();
    assert_eq!(encode(&graph).unwrap(), encode(&graph).unwrap());
    assert_eq!(
        encode(&graph).unwrap(),
        encode(&layout(&graph).unwrap()).unwrap()
    );
}

#[test]
fn test_encode_layout() {
    let graph = create_nested_graph();
    let text = encode(&graph).unwrap();

    let inputs = text.find("inputs:").unwrap();
    let start = text.find("startNode: root").unwrap();
    let nodes = text.find("nodes:").unwrap();
    assert!(inputs < start && start < nodes);

    assert!(text.contains("!Decision"));
    assert!(text.contains("!Terminator"));
    assert!(text.contains("type: Double"));
    assert!(text.contains("type: Boolean"));
}

#[test]
fn test_encode_sorts_nodes_by_id() {
    let mut graph = Graph::new("zeta", Node::decision("x", "alpha", "mid")).unwrap();
    graph.insert_node("mid", Node::terminator(Payload::new())).unwrap();
    graph.insert_node("alpha", Node::terminator(Payload::new())).unwrap();
    let text = encode(&graph).unwrap();

    let alpha = text.find("alpha: !Terminator").unwrap();
    let mid = text.find("mid: !Terminator").unwrap();
    let zeta = text.find("zeta: !Decision").unwrap();
    assert!(alpha < mid && mid < zeta);
}

#[test]
fn test_decision_field_order_and_omitted_paths() {
    let mut graph = Graph::new("d", Node::decision("x > 1", "pass", "fail")).unwrap();
    graph.insert_node("pass", Node::terminator(Payload::new())).unwrap();
    graph.insert_node("fail", Node::terminator(Payload::new())).unwrap();
    graph.insert_node("open", Node::decision("y", "", "")).unwrap();
    let text = encode(&graph).unwrap();

    let condition = text.find("condition: x > 1").unwrap();
    let negative = text.find("negativePath: fail").unwrap();
    let positive = text.find("positivePath: pass").unwrap();
    assert!(condition < negative && negative < positive);
    // Only `d` has resolved paths.
    assert_eq!(text.matches("positivePath").count(), 1);
    assert_eq!(text.matches("negativePath").count(), 1);

    let decoded = decode(&text).unwrap();
    let open = decoded.node("open").unwrap().as_decision().unwrap();
    assert_eq!(open.positive_path, "");
    assert_eq!(open.negative_path, "");
}

#[test]
fn test_empty_nodes_are_written_as_a_mapping() {
    let graph = Graph::from_parts("start", BTreeMap::new(), Vec::new());
    let text = encode(&graph).unwrap();
    assert!(text.contains("nodes: {}"), "got:\n{}", text);

    let decoded = decode(&text).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.start_node(), "start");
}

#[test]
fn test_output_payload_is_lossless_and_ordered() {
    let text = r#"
startNode: t
nodes:
  t: !Terminator
    output:
      zebra: 1
      apple: [1, 2.5, "three"]
      nested:
        flag: true
        none: null
"#;
    let graph = decode(text).unwrap();
    let output = &graph.node("t").unwrap().as_terminator().unwrap().output;
    let keys: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zebra", "apple", "nested"]);
    assert_eq!(output["apple"], serde_json::json!([1, 2.5, "three"]));
    assert_eq!(output["nested"]["flag"], serde_json::json!(true));

    let again = decode(&encode(&graph).unwrap()).unwrap();
    assert!(again.same_content(&graph));
}

#[test]
fn test_decode_untagged_nodes_by_fields() {
    let text = r#"
inputs:
  - name: temperature
    type: Double
startNode: check
nodes:
  check:
    condition: temperature > 25
    positivePath: hot
  hot:
    output:
      quality: Hot
"#;
    let graph = decode(text).unwrap();
    let check = graph.node("check").unwrap().as_decision().unwrap();
    assert_eq!(check.condition, "temperature > 25");
    assert_eq!(check.positive_path, "hot");
    assert_eq!(check.negative_path, "");
    assert!(graph.node("hot").unwrap().as_terminator().is_some());
    assert_eq!(
        graph.inputs(),
        &[InputDeclaration::new("temperature", InputType::Double)]
    );
}

#[test]
fn test_decode_rejects_node_without_variant_fields() {
    let text = r#"
startNode: a
nodes:
  a:
    positivePath: b
"#;
    assert_eq!(
        decode(text).unwrap_err(),
        FormatError::UnknownNodeType {
            node_id: "a".to_string()
        }
    );
    assert!(
        decode(text)
            .unwrap_err()
            .to_string()
            .contains("unknown node type for node ID \"a\"")
    );
}

#[rstest]
#[case::both_fields("startNode: a\nnodes:\n  a:\n    condition: x\n    output: {}\n")]
#[case::unknown_tag("startNode: a\nnodes:\n  a: !Loop\n    condition: x\n")]
#[case::scalar_payload("startNode: a\nnodes:\n  a: 5\n")]
fn test_decode_rejects_ambiguous_nodes(#[case] text: &str) {
    assert!(matches!(
        decode(text),
        Err(FormatError::UnknownNodeType { node_id }) if node_id == "a"
    ));
}

#[rstest]
#[case::not_yaml("startNode: [unclosed", "Syntax")]
#[case::root_list("- a\n- b\n", "RootNotMapping")]
#[case::missing_start("nodes: {}\n", "MissingStartNode")]
#[case::empty_start("startNode: ''\nnodes: {}\n", "MissingStartNode")]
#[case::missing_nodes("startNode: a\n", "InvalidNodes")]
#[case::null_nodes("startNode: a\nnodes:\n", "InvalidNodes")]
#[case::list_nodes("startNode: a\nnodes: [a]\n", "InvalidNodes")]
fn test_decode_structural_errors(#[case] text: &str, #[case] expected: &str) {
    let err = decode(text).unwrap_err();
    let matched = match &err {
        FormatError::Syntax(_) => "Syntax",
        FormatError::RootNotMapping => "RootNotMapping",
        FormatError::MissingStartNode => "MissingStartNode",
        FormatError::InvalidNodes => "InvalidNodes",
        _ => "other",
    };
    assert_eq!(matched, expected, "unexpected error: {}", err);
}

#[test]
fn test_decode_does_not_check_start_reference() {
    let text = "startNode: ghost\nnodes:\n  a: !Terminator\n    output: {}\n";
    let graph = decode(text).unwrap();
    assert_eq!(graph.start_node(), "ghost");
    assert!(graph.check_start().is_err());
}

#[test]
fn test_decode_rejects_invalid_inputs() {
    let text = r#"
inputs:
  - name: ok
    type: Boolean
  - name: bad
    type: Integer
startNode: a
nodes:
  a: !Terminator
    output: {}
"#;
    assert!(matches!(
        decode(text),
        Err(FormatError::InvalidInput { index: 1, .. })
    ));
}

#[test]
fn test_decode_rejects_non_mapping_output() {
    let text = "startNode: a\nnodes:\n  a: !Terminator\n    output: 3\n";
    assert!(matches!(
        decode(text),
        Err(FormatError::InvalidField { node_id, field, .. }) if node_id == "a" && field == "output"
    ));
}

#[test]
fn test_output_scalar_keys_are_read_as_text() {
    let text = "startNode: t\nnodes:\n  t: !Terminator\n    output:\n      200: ok\n      true: yes\n      nested:\n        7: seven\n";
    let graph = decode(text).unwrap();
    let output = &graph.node("t").unwrap().as_terminator().unwrap().output;

    assert_eq!(output["200"], serde_json::json!("ok"));
    assert!(output.contains_key("true"));
    assert_eq!(output["nested"]["7"], serde_json::json!("seven"));

    let again = decode(&encode(&graph).unwrap()).unwrap();
    assert!(again.same_content(&graph));
}

#[rstest]
#[case::nan("startNode: t\nnodes:\n  t: !Terminator\n    output:\n      score: .nan\n")]
#[case::infinity("startNode: t\nnodes:\n  t: !Terminator\n    output:\n      score: [1, .inf]\n")]
#[case::tagged("startNode: t\nnodes:\n  t: !Terminator\n    output:\n      score: !Weird 3\n")]
fn test_decode_rejects_unrepresentable_output(#[case] text: &str) {
    assert!(matches!(
        decode(text),
        Err(FormatError::InvalidField { node_id, field, .. }) if node_id == "t" && field == "output"
    ));
}
