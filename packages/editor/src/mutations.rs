//! # Diagram Commands
//!
//! Reversible, user-intent-level mutations of a [`GraphDocument`].
//!
//! Each command carries the exact before/after payload it needs, so the
//! same value drives both directions through [`Command::apply`]:
//!
//! | command            | forward                       | backward                          |
//! |--------------------|-------------------------------|-----------------------------------|
//! | `AddNode`          | append node                   | remove node by id                 |
//! | `Connect`          | append edge                   | remove edge by id                 |
//! | `UpdateNodeData`   | set data to `after`           | set data to `before`              |
//! | `DeleteEdge`       | remove edge                   | re-insert at its former index     |
//! | `MoveNodes`        | set positions to `to`         | set positions to `from`           |
//! | `DeleteElements`   | remove edges, then nodes      | re-insert nodes, then edges       |
//! | `Unchanged`        | nothing                       | nothing                           |
//!
//! Commands never fail. A target that vanished through an unrecorded change
//! batch is skipped.

use crate::document::GraphDocument;
use crate::types::{Edge, EdgeId, Node, NodeData, NodeId, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One node's displacement over a whole drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMove {
    pub node_id: NodeId,
    pub from: Position,
    pub to: Position,
}

/// An element removed from a collection together with its former index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Removed<T> {
    pub index: usize,
    pub item: T,
}

/// Reversible discrete mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    AddNode {
        node: Node,
    },

    Connect {
        edge: Edge,
    },

    UpdateNodeData {
        node_id: NodeId,
        before: NodeData,
        after: NodeData,
    },

    DeleteEdge {
        index: usize,
        edge: Edge,
    },

    MoveNodes {
        moves: Vec<NodeMove>,
    },

    /// Indices are ascending and refer to the collections before removal
    DeleteElements {
        nodes: Vec<Removed<Node>>,
        edges: Vec<Removed<Edge>>,
    },

    /// Action that matched existing state (duplicate node id, identical
    /// connection); holds its place in the history without touching the document
    Unchanged {
        action: String,
    },
}

impl Command {
    pub fn apply(&self, doc: &mut GraphDocument, direction: Direction) {
        match (self, direction) {
            (Command::AddNode { node }, Direction::Forward) => doc.append_node(node.clone()),
            (Command::AddNode { node }, Direction::Backward) => {
                Self::remove_node(doc, &node.id);
            }

            (Command::Connect { edge }, Direction::Forward) => doc.append_edge(edge.clone()),
            (Command::Connect { edge }, Direction::Backward) => {
                Self::remove_edge(doc, &edge.id);
            }

            (Command::UpdateNodeData { node_id, after, .. }, Direction::Forward) => {
                Self::set_data(doc, node_id, after);
            }
            (Command::UpdateNodeData { node_id, before, .. }, Direction::Backward) => {
                Self::set_data(doc, node_id, before);
            }

            (Command::DeleteEdge { edge, .. }, Direction::Forward) => {
                Self::remove_edge(doc, &edge.id);
            }
            (Command::DeleteEdge { index, edge }, Direction::Backward) => {
                doc.insert_edge(*index, edge.clone());
            }

            (Command::MoveNodes { moves }, direction) => {
                for node_move in moves {
                    let position = match direction {
                        Direction::Forward => node_move.to,
                        Direction::Backward => node_move.from,
                    };
                    if !doc.set_node_position(&node_move.node_id, position) {
                        debug!(node_id = %node_move.node_id, "Move target no longer exists");
                    }
                }
            }

            (Command::DeleteElements { nodes, edges }, Direction::Forward) => {
                for removed in edges {
                    Self::remove_edge(doc, &removed.item.id);
                }
                for removed in nodes {
                    Self::remove_node(doc, &removed.item.id);
                }
            }
            (Command::DeleteElements { nodes, edges }, Direction::Backward) => {
                // Ascending re-insertion restores the original order
                for removed in nodes {
                    doc.insert_node(removed.index, removed.item.clone());
                }
                for removed in edges {
                    doc.insert_edge(removed.index, removed.item.clone());
                }
            }

            (Command::Unchanged { .. }, _) => {}
        }
    }

    /// Short name for logs and history descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddNode { .. } => "add node",
            Command::Connect { .. } => "connect",
            Command::UpdateNodeData { .. } => "update node data",
            Command::DeleteEdge { .. } => "delete edge",
            Command::MoveNodes { .. } => "move nodes",
            Command::DeleteElements { .. } => "delete elements",
            Command::Unchanged { .. } => "unchanged",
        }
    }

    /// Id of the edge this command creates or deletes, if any
    pub fn edge_id(&self) -> Option<&EdgeId> {
        match self {
            Command::Connect { edge } | Command::DeleteEdge { edge, .. } => Some(&edge.id),
            _ => None,
        }
    }

    fn remove_node(doc: &mut GraphDocument, id: &str) {
        if doc.remove_node(id).is_none() {
            debug!(node_id = %id, "Node already absent");
        }
    }

    fn remove_edge(doc: &mut GraphDocument, id: &str) {
        if doc.remove_edge(id).is_none() {
            debug!(edge_id = %id, "Edge already absent");
        }
    }

    fn set_data(doc: &mut GraphDocument, id: &str, data: &NodeData) {
        if !doc.set_node_data(id, data.clone()) {
            debug!(node_id = %id, "Data target no longer exists");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn node(id: &str) -> Node {
        Node::new(id, Position::default(), NodeData::new(id, ShapeKind::Rectangle))
    }

    fn round_trip(command: &Command, doc: &mut GraphDocument) {
        let before = doc.clone();
        command.apply(doc, Direction::Forward);
        assert_ne!(*doc, before, "{} had no effect", command.name());
        command.apply(doc, Direction::Backward);
        assert_eq!(*doc, before, "{} did not reverse", command.name());
    }

    #[test]
    fn test_add_node_reverses() {
        let mut doc = GraphDocument::new(vec![node("1")], vec![]);
        round_trip(&Command::AddNode { node: node("2") }, &mut doc);
    }

    #[test]
    fn test_update_data_reverses() {
        let mut doc = GraphDocument::new(vec![node("1")], vec![]);
        let before = node("1").data;
        let after = NodeData {
            fill: Some("blue".to_string()),
            ..before.clone()
        };
        round_trip(
            &Command::UpdateNodeData {
                node_id: "1".to_string(),
                before,
                after,
            },
            &mut doc,
        );
    }

    #[test]
    fn test_delete_edge_restores_position() {
        let mut doc = GraphDocument::new(
            vec![],
            vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c"), Edge::new("e3", "c", "a")],
        );
        let command = Command::DeleteEdge {
            index: 1,
            edge: Edge::new("e2", "b", "c"),
        };
        round_trip(&command, &mut doc);
        assert_eq!(doc.edge_index("e2"), Some(1));
        assert_eq!(command.edge_id().map(String::as_str), Some("e2"));
    }

    #[test]
    fn test_delete_elements_restores_interleaved_order() {
        let mut doc = GraphDocument::new(
            vec![node("a"), node("b"), node("c"), node("d")],
            vec![Edge::new("ab", "a", "b"), Edge::new("cd", "c", "d"), Edge::new("bc", "b", "c")],
        );
        let command = Command::DeleteElements {
            nodes: vec![
                Removed { index: 1, item: node("b") },
                Removed { index: 3, item: node("d") },
            ],
            edges: vec![
                Removed { index: 0, item: Edge::new("ab", "a", "b") },
                Removed { index: 1, item: Edge::new("cd", "c", "d") },
                Removed { index: 2, item: Edge::new("bc", "b", "c") },
            ],
        };

        round_trip(&command, &mut doc);
    }

    #[test]
    fn test_move_nodes_both_directions() {
        let mut doc = GraphDocument::new(vec![node("1")], vec![]);
        let command = Command::MoveNodes {
            moves: vec![NodeMove {
                node_id: "1".to_string(),
                from: Position::default(),
                to: Position::new(80.0, 20.0),
            }],
        };

        command.apply(&mut doc, Direction::Forward);
        assert_eq!(doc.node("1").unwrap().position, Position::new(80.0, 20.0));
        command.apply(&mut doc, Direction::Backward);
        assert_eq!(doc.node("1").unwrap().position, Position::default());
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let mut doc = GraphDocument::default();
        Command::UpdateNodeData {
            node_id: "gone".to_string(),
            before: NodeData::default(),
            after: NodeData::default(),
        }
        .apply(&mut doc, Direction::Forward);
        Command::Connect {
            edge: Edge::new("e1", "a", "b"),
        }
        .apply(&mut doc, Direction::Backward);

        assert!(doc.is_empty());
    }

    #[test]
    fn test_unchanged_leaves_document_alone() {
        let mut doc = GraphDocument::new(vec![], vec![Edge::new("e1", "a", "b")]);
        let before = doc.clone();
        let command = Command::Unchanged {
            action: "connect".to_string(),
        };

        command.apply(&mut doc, Direction::Forward);
        command.apply(&mut doc, Direction::Backward);

        assert_eq!(doc, before);
        assert_eq!(
            serde_json::to_string(&command).unwrap(),
            r#"{"kind":"unchanged","action":"connect"}"#
        );
    }

    #[test]
    fn test_command_serialization() {
        let command = Command::Connect {
            edge: Edge::new("e1", "a", "b"),
        };

        let json = serde_json::to_string(&command).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();

        assert_eq!(command, deserialized);
        assert!(json.contains("\"kind\":\"connect\""));
    }
}
