//! # Change Batches
//!
//! Folds batches of low-level deltas coming from continuous canvas
//! interaction (drag, resize, selection, removal) into a node or edge
//! collection.
//!
//! A batch is applied left to right in one pass and always produces a new
//! collection; the input slice is never modified. Deltas naming an unknown
//! id are ignored. Removing a node does not remove edges that reference it.
//!
//! Nothing applied here is recorded in the undo history.

use crate::types::{Dimensions, Edge, Node, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Element of a collection a change batch can target
pub trait Element: Clone {
    fn id(&self) -> &str;

    fn set_selected(&mut self, selected: bool);

    /// No-op for elements without a position
    fn set_position(&mut self, _position: Position) {}

    /// No-op for elements without a size
    fn set_dimensions(&mut self, _dimensions: Dimensions) {}
}

impl Element for Node {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.size = Some(dimensions);
    }
}

impl Element for Edge {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// One delta of a change batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Change<T> {
    /// New position; `dragging` is true for every frame of a drag but the last
    Move {
        id: String,
        position: Position,
        #[serde(default)]
        dragging: bool,
    },

    Resize {
        id: String,
        dimensions: Dimensions,
    },

    Select {
        id: String,
        selected: bool,
    },

    Remove {
        id: String,
    },

    /// Append; ignored when the id is already present
    Add {
        item: T,
    },

    /// Replace the whole collection
    Reset {
        items: Vec<T>,
    },
}

pub type NodeChange = Change<Node>;
pub type EdgeChange = Change<Edge>;

impl<T: Element> Change<T> {
    /// Id of the element this delta targets (`None` for `Reset`)
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Change::Move { id, .. }
            | Change::Resize { id, .. }
            | Change::Select { id, .. }
            | Change::Remove { id } => Some(id),
            Change::Add { item } => Some(item.id()),
            Change::Reset { .. } => None,
        }
    }
}

/// Apply a batch to `elements`, returning the resulting collection
pub fn apply_changes<T: Element>(changes: &[Change<T>], elements: &[T]) -> Vec<T> {
    let mut result = elements.to_vec();

    for change in changes {
        match change {
            Change::Move { id, position, .. } => {
                if let Some(element) = find_mut(&mut result, id) {
                    element.set_position(*position);
                }
            }
            Change::Resize { id, dimensions } => {
                if let Some(element) = find_mut(&mut result, id) {
                    element.set_dimensions(*dimensions);
                }
            }
            Change::Select { id, selected } => {
                if let Some(element) = find_mut(&mut result, id) {
                    element.set_selected(*selected);
                }
            }
            Change::Remove { id } => {
                result.retain(|element| element.id() != id);
            }
            Change::Add { item } => {
                if result.iter().any(|element| element.id() == item.id()) {
                    debug!(id = %item.id(), "Ignoring add of duplicate id");
                } else {
                    result.push(item.clone());
                }
            }
            Change::Reset { items } => {
                result = items.clone();
            }
        }
    }

    result
}

pub fn apply_node_changes(changes: &[NodeChange], nodes: &[Node]) -> Vec<Node> {
    apply_changes(changes, nodes)
}

pub fn apply_edge_changes(changes: &[EdgeChange], edges: &[Edge]) -> Vec<Edge> {
    apply_changes(changes, edges)
}

fn find_mut<'a, T: Element>(elements: &'a mut [T], id: &str) -> Option<&'a mut T> {
    elements.iter_mut().find(|element| element.id() == id)
}
