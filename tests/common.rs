//! Common test utilities for building flowchart graphs.
use nagare::prelude::*;

/// Builds a terminator output payload from key/value pairs.
#[allow(dead_code)]
pub fn output(entries: &[(&str, serde_json::Value)]) -> Payload {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// The smallest complete flowchart.
///
/// Logic: `check` -> `yes` when true, `no` when false.
#[allow(dead_code)]
pub fn create_simple_graph() -> Graph {
    let mut graph = Graph::new("check", Node::decision("temperature > 25", "yes", "no"))
        .expect("valid start node");
    graph
        .insert_node("yes", Node::terminator(output(&[("r", serde_json::json!(1))])))
        .unwrap();
    graph
        .insert_node("no", Node::terminator(output(&[("r", serde_json::json!(0))])))
        .unwrap();
    graph
}

/// A three-level flow where one terminator is reachable by both a short and a long path.
///
/// `root` -> (`inner`, `done`), `inner` -> (`done`, `fail`).
#[allow(dead_code)]
pub fn create_nested_graph() -> Graph {
    let mut graph =
        Graph::new("root", Node::decision("a > 1", "inner", "done")).expect("valid start node");
    graph
        .insert_node("inner", Node::decision("b == true", "done", "fail"))
        .unwrap();
    graph
        .insert_node(
            "done",
            Node::terminator(output(&[("quality", serde_json::json!("Good"))])),
        )
        .unwrap();
    graph
        .insert_node(
            "fail",
            Node::terminator(output(&[("quality", serde_json::json!("Bad"))])),
        )
        .unwrap();
    graph.add_input("a", InputType::Double).unwrap();
    graph.add_input("b", InputType::Boolean).unwrap();
    graph
}

/// A wide flow with a long edge that skips a level: `s` reaches `a`, `b` and `late`.
///
/// `s` -> (`a`, `b`), `a` -> (`late`, `t1`), `b` -> (`t2`, `t3`), `late` -> (`t1`, `t4`).
#[allow(dead_code)]
pub fn create_wide_graph() -> Graph {
    let mut graph = Graph::new("s", Node::decision("x > 1", "a", "b")).expect("valid start node");
    graph.insert_node("a", Node::decision("y > 2", "late", "t1")).unwrap();
    graph.insert_node("b", Node::decision("z > 3", "t2", "t3")).unwrap();
    graph.insert_node("late", Node::decision("w > 4", "t1", "t4")).unwrap();
    for id in ["t1", "t2", "t3", "t4"] {
        graph
            .insert_node(id, Node::terminator(output(&[("id", serde_json::json!(id))])))
            .unwrap();
    }
    graph
}

/// Asserts that every resolved decision edge points strictly downwards.
#[allow(dead_code)]
pub fn assert_edges_point_down(graph: &Graph) {
    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.node(edge.source), graph.node(edge.target))
        else {
            continue;
        };
        assert!(
            target.position.y > source.position.y,
            "edge {} -> {} does not point down ({} vs {})",
            edge.source,
            edge.target,
            source.position.y,
            target.position.y
        );
    }
}

/// Asserts that nodes sharing a row keep at least `spacing` between their x coordinates.
///
/// Only the rounding of the final translation (a few ULPs) is tolerated.
#[allow(dead_code)]
pub fn assert_no_overlap(graph: &Graph, spacing: f64) {
    let nodes: Vec<_> = graph.nodes().iter().collect();
    for (i, (a_id, a)) in nodes.iter().enumerate() {
        for (b_id, b) in nodes.iter().skip(i + 1) {
            if (a.position.y - b.position.y).abs() < 1e-9 {
                assert!(
                    (a.position.x - b.position.x).abs() >= spacing - 1e-9,
                    "nodes {} and {} overlap ({} vs {})",
                    a_id,
                    b_id,
                    a.position.x,
                    b.position.x
                );
            }
        }
    }
}
