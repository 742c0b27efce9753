//! # Diagram Store
//!
//! Owns one diagram's document and history and exposes the action surface
//! the canvas layer calls into.
//!
//! Two paths mutate the document:
//!
//! ```text
//! discrete action ──> Command ──> CommandHistory::record ──> GraphDocument
//! change batch ─────> changes::apply_* ─────────────────────> GraphDocument
//! ```
//!
//! Change batches bypass the history, with one exception: a completed drag
//! is recorded as a single `MoveNodes` command (origin to final position),
//! so intermediate frames never reach the undo stack.
//!
//! Actions naming a missing node or edge, and connections with a missing
//! endpoint, are ignored: no mutation, no history entry.

use crate::changes::{apply_edge_changes, apply_node_changes, Change, EdgeChange, NodeChange};
use crate::document::GraphDocument;
use crate::errors::{EditorError, SerializeError};
use crate::id_generator::IdGenerator;
use crate::mutations::{Command, NodeMove, Removed};
use crate::serializer::{self, DEFAULT_JSON_FILE_NAME, DEFAULT_XML_FILE_NAME};
use crate::types::{Connection, Edge, EdgeId, Node, NodeDataPatch, NodeId, Position};
use crate::undo_stack::CommandHistory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Offset applied to every pasted copy, in canvas units
pub const PASTE_OFFSET: f64 = 20.0;

/// Store construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Maximum undo steps kept (0 = unlimited)
    pub history_limit: usize,

    /// Name the generated ids are seeded from
    pub id_seed: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_limit: 0,
            id_seed: "diagram".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Clipboard {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Diagram editing context: document, history and transient interaction state
#[derive(Debug)]
pub struct DiagramStore {
    document: GraphDocument,
    history: CommandHistory,
    ids: IdGenerator,

    /// Drag origin of every node currently being dragged (first-seen order)
    drag_origins: Vec<(NodeId, Position)>,

    clipboard: Clipboard,
}

impl DiagramStore {
    /// Empty document, empty history
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self::from_document(GraphDocument::default(), options)
    }

    /// Start editing an existing document with an empty history
    pub fn from_document(document: GraphDocument, options: EditorOptions) -> Self {
        Self {
            document,
            history: CommandHistory::with_max_levels(options.history_limit),
            ids: IdGenerator::new(&options.id_seed),
            drag_origins: Vec::new(),
            clipboard: Clipboard::default(),
        }
    }

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> GraphDocument {
        self.document.clone()
    }

    pub fn nodes(&self) -> &[Node] {
        self.document.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.document.edges()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Append a node; returns false if a node with the same id exists
    ///
    /// A duplicate still takes one history entry that changes nothing.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.document.contains_node(&node.id) {
            warn!(node_id = %node.id, "Ignoring node with duplicate id");
            self.record_unchanged("add node");
            return false;
        }

        self.history.record(Command::AddNode { node }, &mut self.document);
        true
    }

    /// Shallow-merge `patch` into the node's data
    pub fn update_node_data(&mut self, id: &str, patch: &NodeDataPatch) -> bool {
        let Some(node) = self.document.node(id) else {
            debug!(node_id = %id, "Ignoring data update for missing node");
            return false;
        };

        let before = node.data.clone();
        let after = patch.merge_into(&before);

        self.history.record(
            Command::UpdateNodeData {
                node_id: id.to_string(),
                before,
                after,
            },
            &mut self.document,
        );
        true
    }

    /// Create an edge for `connection`, returning its id
    ///
    /// Ignored when an endpoint is missing or empty. An identical connection
    /// creates no edge and returns `None`, but still takes a history entry.
    pub fn on_connect(&mut self, connection: &Connection) -> Option<EdgeId> {
        let Some((source, target)) = connection.endpoints() else {
            debug!("Ignoring connection without both endpoints");
            return None;
        };

        if self.document.edges().iter().any(|e| e.matches(connection)) {
            debug!(source = %source, target = %target, "Connection already exists");
            self.record_unchanged("connect");
            return None;
        }

        let id = self.fresh_edge_id();
        let edge = Edge::new(id.clone(), source, target).with_handles(
            connection.source_handle.clone(),
            connection.target_handle.clone(),
        );

        self.history.record(Command::Connect { edge }, &mut self.document);
        Some(id)
    }

    pub fn delete_edge(&mut self, id: &str) -> bool {
        let Some(index) = self.document.edge_index(id) else {
            debug!(edge_id = %id, "Ignoring delete of missing edge");
            return false;
        };

        let edge = self.document.edges()[index].clone();
        self.history
            .record(Command::DeleteEdge { index, edge }, &mut self.document);
        true
    }

    /// Apply a node change batch outside the history
    ///
    /// Drag frames (`Move` with `dragging: true`) remember each node's
    /// origin; the closing frame (`dragging: false`) records the whole drag
    /// as one undo step.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        self.track_drag_origins(changes);

        let nodes = apply_node_changes(changes, self.document.nodes());
        self.document.replace_nodes(nodes);

        self.commit_finished_drags(changes);
    }

    /// Apply an edge change batch outside the history
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        let edges = apply_edge_changes(changes, self.document.edges());
        self.document.replace_edges(edges);
    }

    pub fn undo(&mut self) -> bool {
        self.drag_origins.clear();
        self.history.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> bool {
        self.drag_origins.clear();
        self.history.redo(&mut self.document)
    }

    /// Delete selected nodes, their edges and selected edges as one undo step
    pub fn delete_selection(&mut self) -> bool {
        let nodes: Vec<Removed<Node>> = self
            .document
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.selected)
            .map(|(index, node)| Removed {
                index,
                item: node.clone(),
            })
            .collect();

        let edges: Vec<Removed<Edge>> = self
            .document
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, edge)| {
                edge.selected || nodes.iter().any(|removed| edge.touches(&removed.item.id))
            })
            .map(|(index, edge)| Removed {
                index,
                item: edge.clone(),
            })
            .collect();

        if nodes.is_empty() && edges.is_empty() {
            return false;
        }

        debug!(nodes = nodes.len(), edges = edges.len(), "Deleting selection");
        self.history
            .record(Command::DeleteElements { nodes, edges }, &mut self.document);
        true
    }

    /// Copy selected nodes and the edges between them; returns the node count
    pub fn copy_selection(&mut self) -> usize {
        let nodes: Vec<Node> = self.document.selected_nodes().cloned().collect();
        let edges = self
            .document
            .edges()
            .iter()
            .filter(|edge| {
                nodes.iter().any(|n| n.id == edge.source) && nodes.iter().any(|n| n.id == edge.target)
            })
            .cloned()
            .collect();

        let count = nodes.len();
        self.clipboard = Clipboard { nodes, edges };
        count
    }

    /// Insert offset copies of the clipboard with fresh ids, as one undo step
    pub fn paste_selection(&mut self) -> Vec<NodeId> {
        if self.clipboard.nodes.is_empty() {
            return Vec::new();
        }

        let mut id_map: HashMap<NodeId, NodeId> = HashMap::new();
        let mut pasted = Vec::new();

        self.history.begin_batch();
        self.history.set_batch_description("Paste");

        for original in &mut self.clipboard.nodes {
            original.position = original.position.offset(PASTE_OFFSET, PASTE_OFFSET);

            let mut node = original.clone();
            node.id = fresh_id(&mut self.ids, "node", |id| self.document.contains_node(id));
            node.selected = false;

            id_map.insert(original.id.clone(), node.id.clone());
            pasted.push(node.id.clone());
            self.history.record(Command::AddNode { node }, &mut self.document);
        }

        for original in &self.clipboard.edges {
            let (Some(source), Some(target)) = (id_map.get(&original.source), id_map.get(&original.target))
            else {
                continue;
            };

            let mut edge = original.clone();
            edge.id = fresh_id(&mut self.ids, "edge", |id| self.document.contains_edge(id));
            edge.source = source.clone();
            edge.target = target.clone();
            edge.selected = false;
            self.history.record(Command::Connect { edge }, &mut self.document);
        }

        self.history.end_batch();
        pasted
    }

    pub fn export_json(&self) -> Result<String, SerializeError> {
        serializer::to_json(&self.document)
    }

    pub fn export_xml(&self) -> String {
        serializer::to_xml(&self.document)
    }

    /// Write the JSON export into `dir` (default name `diagram.json`)
    pub fn export_json_to(&self, dir: &Path, file_name: Option<&str>) -> Result<PathBuf, EditorError> {
        let path = dir.join(file_name.unwrap_or(DEFAULT_JSON_FILE_NAME));
        std::fs::write(&path, self.export_json()?)?;
        info!(path = %path.display(), "Exported JSON");
        Ok(path)
    }

    /// Write the XML export into `dir` (default name `diagram.xml`)
    pub fn export_xml_to(&self, dir: &Path, file_name: Option<&str>) -> Result<PathBuf, EditorError> {
        let path = dir.join(file_name.unwrap_or(DEFAULT_XML_FILE_NAME));
        std::fs::write(&path, self.export_xml())?;
        info!(path = %path.display(), "Exported XML");
        Ok(path)
    }

    fn record_unchanged(&mut self, action: &str) {
        self.history.record(
            Command::Unchanged {
                action: action.to_string(),
            },
            &mut self.document,
        );
    }

    fn fresh_edge_id(&mut self) -> EdgeId {
        let document = &self.document;
        fresh_id(&mut self.ids, "edge", |id| document.contains_edge(id))
    }

    fn track_drag_origins(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                Change::Move {
                    id, dragging: true, ..
                } => {
                    if self.drag_origins.iter().any(|(origin_id, _)| origin_id == id) {
                        continue;
                    }
                    if let Some(node) = self.document.node(id) {
                        self.drag_origins.push((id.clone(), node.position));
                    }
                }
                Change::Remove { id } => self.drag_origins.retain(|(origin_id, _)| origin_id != id),
                Change::Reset { .. } => self.drag_origins.clear(),
                _ => {}
            }
        }
    }

    fn commit_finished_drags(&mut self, changes: &[NodeChange]) {
        let finished: Vec<&str> = changes
            .iter()
            .filter_map(|change| match change {
                Change::Move {
                    id, dragging: false, ..
                } => Some(id.as_str()),
                _ => None,
            })
            .collect();

        if finished.is_empty() {
            return;
        }

        let mut moves = Vec::new();
        let document = &self.document;
        self.drag_origins.retain(|(id, from)| {
            if !finished.contains(&id.as_str()) {
                return true;
            }
            if let Some(node) = document.node(id) {
                if node.position != *from {
                    moves.push(NodeMove {
                        node_id: id.clone(),
                        from: *from,
                        to: node.position,
                    });
                }
            }
            false
        });

        if !moves.is_empty() {
            debug!(nodes = moves.len(), "Recording finished drag");
            self.history
                .record(Command::MoveNodes { moves }, &mut self.document);
        }
    }
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_id(ids: &mut IdGenerator, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.new_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}
