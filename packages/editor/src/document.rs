//! # Graph Document
//!
//! Canonical node and edge collections of one diagram.
//!
//! Collections are reference counted and copied on write: cloning a
//! document yields a cheap snapshot, and mutating the live document never
//! alters a snapshot taken earlier.
//!
//! Ids are expected to be unique within each collection. The document does
//! not validate this; the store and the importer do.

use crate::types::{Edge, Node, NodeData, Position};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Editable diagram (aggregate root)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    nodes: Arc<Vec<Node>>,
    edges: Arc<Vec<Edge>>,
}

impl GraphDocument {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: Arc::new(nodes),
            edges: Arc::new(edges),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn edge_index(&self, id: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge(id).is_some()
    }

    /// Replace the whole node collection
    pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = Arc::new(nodes);
    }

    /// Replace the whole edge collection
    pub fn replace_edges(&mut self, edges: Vec<Edge>) {
        self.edges = Arc::new(edges);
    }

    pub fn append_node(&mut self, node: Node) {
        Arc::make_mut(&mut self.nodes).push(node);
    }

    pub fn append_edge(&mut self, edge: Edge) {
        Arc::make_mut(&mut self.edges).push(edge);
    }

    /// Insert at `index`, clamped to the collection length
    pub fn insert_node(&mut self, index: usize, node: Node) {
        let nodes = Arc::make_mut(&mut self.nodes);
        let index = index.min(nodes.len());
        nodes.insert(index, node);
    }

    /// Insert at `index`, clamped to the collection length
    pub fn insert_edge(&mut self, index: usize, edge: Edge) {
        let edges = Arc::make_mut(&mut self.edges);
        let index = index.min(edges.len());
        edges.insert(index, edge);
    }

    /// Remove a node, returning its former index and value
    pub fn remove_node(&mut self, id: &str) -> Option<(usize, Node)> {
        let index = self.node_index(id)?;
        Some((index, Arc::make_mut(&mut self.nodes).remove(index)))
    }

    /// Remove an edge, returning its former index and value
    pub fn remove_edge(&mut self, id: &str) -> Option<(usize, Edge)> {
        let index = self.edge_index(id)?;
        Some((index, Arc::make_mut(&mut self.edges).remove(index)))
    }

    /// Replace the data of one node; other nodes are left untouched
    pub fn set_node_data(&mut self, id: &str, data: NodeData) -> bool {
        let Some(index) = self.node_index(id) else {
            return false;
        };
        Arc::make_mut(&mut self.nodes)[index].data = data;
        true
    }

    pub fn set_node_position(&mut self, id: &str, position: Position) -> bool {
        let Some(index) = self.node_index(id) else {
            return false;
        };
        Arc::make_mut(&mut self.nodes)[index].position = position;
        true
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.selected)
    }

    pub fn selected_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.selected)
    }

    /// Edges whose source or target names no node in this document
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn node(id: &str) -> Node {
        Node::new(id, Position::default(), NodeData::new(id, ShapeKind::Rectangle))
    }

    #[test]
    fn test_empty_document() {
        let doc = GraphDocument::default();
        assert!(doc.is_empty());
        assert!(doc.node("1").is_none());
        assert!(doc.dangling_edges().is_empty());
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let mut doc = GraphDocument::new(vec![node("1")], vec![]);
        let snapshot = doc.clone();

        doc.append_node(node("2"));
        doc.set_node_position("1", Position::new(50.0, 50.0));

        assert_eq!(snapshot.nodes().len(), 1);
        assert_eq!(snapshot.nodes()[0].position, Position::default());
        assert_eq!(doc.nodes().len(), 2);
    }

    #[test]
    fn test_remove_and_reinsert_edge_keeps_order() {
        let mut doc = GraphDocument::new(
            vec![],
            vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c"), Edge::new("e3", "c", "a")],
        );
        let before = doc.clone();

        let (index, edge) = doc.remove_edge("e2").unwrap();
        assert_eq!(index, 1);
        assert_eq!(doc.edges().len(), 2);

        doc.insert_edge(index, edge);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut doc = GraphDocument::default();
        doc.insert_node(10, node("1"));
        assert_eq!(doc.node_index("1"), Some(0));
    }

    #[test]
    fn test_set_node_data_only_touches_target() {
        let mut doc = GraphDocument::new(vec![node("1"), node("2")], vec![]);

        assert!(doc.set_node_data("1", NodeData::new("changed", ShapeKind::Circle)));
        assert!(!doc.set_node_data("missing", NodeData::default()));

        assert_eq!(doc.node("1").unwrap().data.label, "changed");
        assert_eq!(doc.node("2").unwrap(), &node("2"));
    }

    #[test]
    fn test_dangling_edges() {
        let doc = GraphDocument::new(
            vec![node("a"), node("b")],
            vec![Edge::new("ok", "a", "b"), Edge::new("dangling", "a", "gone")],
        );

        let dangling: Vec<&str> = doc.dangling_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(dangling, vec!["dangling"]);
    }
}
