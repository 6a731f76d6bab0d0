//! Integration tests for Nagare
//!
//! End-to-end tests of the editing session: import, edit, lay out, route, export
//! and the advisory validator hand-off.
//!
mod common;
use common::*;
use nagare::codec::{YAML_EXTENSIONS, YAML_MIME};
use nagare::prelude::*;
use std::cell::RefCell;

const FLOWCHART_YAML: &str = r#"
inputs:
  - name: temperature
    type: Double
  - name: sealed
    type: Boolean
startNode: check
nodes:
  check: !Decision
    condition: temperature > 25
    negativePath: sealed_check
    positivePath: hot
  sealed_check: !Decision
    condition: sealed == true
    negativePath: reject
    positivePath: normal
  hot: !Terminator
    output:
      quality: Hot
      priority: 1
  normal: !Terminator
    output:
      quality: Normal
      priority: 2
  reject: !Terminator
    output:
      quality: Reject
      priority: 3
"#;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_import_lays_out_and_replaces_graph() {
        let mut session = Session::new();
        session.import(FLOWCHART_YAML).expect("import should succeed");

        let graph = session.graph();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.start_node(), "check");
        assert_eq!(graph.inputs().len(), 2);
        assert_edges_point_down(graph);
        assert_no_overlap(graph, session.config().min_spacing());

        let check = graph.node("check").unwrap().position;
        let sealed = graph.node("sealed_check").unwrap().position;
        assert!(sealed.y > check.y);
    }

    #[test]
    fn test_failed_import_leaves_graph_untouched() {
        let mut session = Session::with_graph(create_simple_graph());
        session.relayout().unwrap();
        let before = session.graph().clone();

        let missing_start = "startNode: ghost\nnodes:\n  a: !Terminator\n    output: {}\n";
        assert!(matches!(
            session.import(missing_start),
            Err(ImportError::Reference(ReferenceError::StartNodeNotFound(id))) if id == "ghost"
        ));

        let cyclic = "startNode: a\nnodes:\n  a: !Decision\n    condition: x\n    positivePath: a\n";
        assert!(matches!(session.import(cyclic), Err(ImportError::Cycle(_))));

        let malformed = "startNode: a\nnodes:\n  a:\n    note: nothing\n";
        assert!(matches!(
            session.import(malformed),
            Err(ImportError::Format(FormatError::UnknownNodeType { .. }))
        ));

        assert_eq!(session.graph(), &before);
    }

    #[test]
    fn test_export_round_trips_through_import() {
        let mut session = Session::new();
        session.import(FLOWCHART_YAML).unwrap();

        let export = session.export().unwrap();
        assert_eq!(export.mime, YAML_MIME);
        assert!(
            YAML_EXTENSIONS
                .iter()
                .any(|ext| export.file_name.ends_with(&format!(".{}", ext)))
        );

        let mut reloaded = Session::new();
        reloaded.import(&export.contents).unwrap();
        assert_eq!(reloaded.graph(), session.graph());
        assert_eq!(reloaded.export().unwrap(), export);
    }

    #[test]
    fn test_edit_then_relayout() {
        let mut session = Session::new();
        session.import(FLOWCHART_YAML).unwrap();

        session.rename_node("hot", "too_hot").unwrap();
        let id = session.add_terminator();
        session
            .edit(|graph| graph.set_path("sealed_check", Branch::Negative, id.clone()))
            .unwrap();
        session.delete_node("reject").unwrap();
        session.relayout().unwrap();

        let graph = session.graph();
        let check = graph.node("check").unwrap().as_decision().unwrap();
        assert_eq!(check.positive_path, "too_hot");
        assert_eq!(
            graph.node("sealed_check").unwrap().as_decision().unwrap().negative_path,
            id
        );
        assert_edges_point_down(graph);
        assert_eq!(session.connectors().len(), 4);
    }

    #[test]
    fn test_failed_multi_step_edit_is_rolled_back() {
        let mut session = Session::with_graph(create_simple_graph());
        let before = session.graph().clone();

        let result = session.edit(|graph| {
            graph.set_path("check", Branch::Positive, "")?;
            graph.rename_node("yes", "")
        });

        assert_eq!(result, Err(ValidationError::EmptyId));
        assert_eq!(session.graph(), &before);
        assert_eq!(
            session.graph().node("check").unwrap().as_decision().unwrap().positive_path,
            "yes"
        );

        session
            .edit(|graph| {
                graph.set_path("check", Branch::Positive, "")?;
                graph.rename_node("yes", "accepted")
            })
            .unwrap();
        assert!(session.graph().contains("accepted"));
        let check = session.graph().node("check").unwrap().as_decision().unwrap();
        assert!(check.positive_path.is_empty());
    }

    #[test]
    fn test_relayout_rejects_cycle_without_changing_positions() {
        let mut session = Session::with_graph(create_nested_graph());
        session.relayout().unwrap();
        session
            .edit(|graph| graph.set_path("inner", Branch::Positive, "root"))
            .unwrap();
        let before = session.graph().clone();

        assert!(session.relayout().is_err());
        assert_eq!(session.graph(), &before);
    }

    #[test]
    fn test_delete_start_node_through_session_is_refused() {
        let mut session = Session::new();
        assert_eq!(
            session.delete_node("start"),
            Err(ValidationError::DeleteStartNode("start".to_string()))
        );
        assert!(session.graph().contains("start"));
    }

    #[test]
    fn test_advisory_validator_receives_snapshot() {
        let mut session = Session::new();
        session.import(FLOWCHART_YAML).unwrap();
        let before = session.graph().clone();

        let seen = RefCell::new(String::new());
        let validator = |document: &str| -> std::result::Result<String, AdvisoryError> {
            *seen.borrow_mut() = document.to_string();
            Ok("Looks consistent.".to_string())
        };
        let report = session.advise(&validator).unwrap();

        assert_eq!(report, "Looks consistent.");
        assert_eq!(*seen.borrow(), session.export().unwrap().contents);
        assert_eq!(session.graph(), &before);
    }

    #[test]
    fn test_advisory_failure_is_reported_and_harmless() {
        let mut session = Session::new();
        session.import(FLOWCHART_YAML).unwrap();
        let before = session.graph().clone();

        let offline = |_: &str| -> std::result::Result<String, AdvisoryError> {
            Err(AdvisoryError::Unavailable("timeout".to_string()))
        };
        let err = session.advise(&offline).unwrap_err();

        assert!(err.to_string().contains("timeout"));
        assert_eq!(session.graph(), &before);
    }
}
