//! Serializable form of the action surface, used to replay recorded
//! editing sessions.

use crate::changes::{EdgeChange, NodeChange};
use crate::store::DiagramStore;
use crate::types::{Connection, EdgeId, Node, NodeDataPatch, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    AddNode {
        node: Node,
    },

    UpdateNodeData {
        id: NodeId,
        patch: NodeDataPatch,
    },

    #[serde(alias = "onConnect")]
    Connect {
        connection: Connection,
    },

    DeleteEdge {
        id: EdgeId,
    },

    ApplyNodeChanges {
        changes: Vec<NodeChange>,
    },

    ApplyEdgeChanges {
        changes: Vec<EdgeChange>,
    },

    Undo,
    Redo,
    DeleteSelection,
    CopySelection,
    PasteSelection,
}

impl DiagramStore {
    /// Run one action; returns whether it had an effect
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::AddNode { node } => self.add_node(node),
            Action::UpdateNodeData { id, patch } => self.update_node_data(&id, &patch),
            Action::Connect { connection } => self.on_connect(&connection).is_some(),
            Action::DeleteEdge { id } => self.delete_edge(&id),
            Action::ApplyNodeChanges { changes } => {
                self.apply_node_changes(&changes);
                !changes.is_empty()
            }
            Action::ApplyEdgeChanges { changes } => {
                self.apply_edge_changes(&changes);
                !changes.is_empty()
            }
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::DeleteSelection => self.delete_selection(),
            Action::CopySelection => self.copy_selection() > 0,
            Action::PasteSelection => !self.paste_selection().is_empty(),
        }
    }
}
