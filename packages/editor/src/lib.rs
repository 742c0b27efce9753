//! # FlowMaster Editor
//!
//! Document state engine for the FlowMaster diagram editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas: rendering, drag sources, panels     │
//! └─────────────────────────────────────────────┘
//!                     ↓ actions / change batches
//! ┌─────────────────────────────────────────────┐
//! │ editor: DiagramStore                        │
//! │  - Discrete actions become Commands         │
//! │  - CommandHistory undo/redo                 │
//! │  - Change batches fold into the document    │
//! │  - JSON / XML export of snapshots           │
//! └─────────────────────────────────────────────┘
//!                     ↓ snapshots
//! ┌─────────────────────────────────────────────┐
//! │ GraphDocument: nodes + edges                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Store owns the document**: callers read snapshots, mutate via actions
//! 2. **Every discrete action is reversible**: recorded as a `Command`
//! 3. **High-frequency input stays out of history**: drags are recorded once, on release
//! 4. **Ignored, not failed**: actions on missing ids change nothing
//!
//! ## Usage
//!
//! ```rust
//! use flowmaster_editor::{Connection, DiagramStore, Node, NodeData, NodeDataPatch, Position, ShapeKind};
//!
//! let mut store = DiagramStore::new();
//! store.add_node(Node::new("1", Position::new(0.0, 0.0), NodeData::new("Start", ShapeKind::Circle)));
//! store.add_node(Node::new("2", Position::new(200.0, 0.0), NodeData::new("End", ShapeKind::Circle)));
//! store.on_connect(&Connection::new("1", "2"));
//! store.update_node_data("1", &NodeDataPatch::fill("blue"));
//!
//! store.undo();
//! assert_eq!(store.document().node("1").unwrap().data.fill, None);
//!
//! let xml = store.export_xml();
//! assert!(xml.contains("<edge "));
//! ```

mod actions;
mod changes;
mod document;
mod errors;
mod id_generator;
mod mutations;
mod serializer;
mod shape;
mod store;
mod types;
mod undo_stack;

pub use actions::Action;
pub use changes::{apply_changes, apply_edge_changes, apply_node_changes, Change, EdgeChange, Element, NodeChange};
pub use document::GraphDocument;
pub use errors::{EditorError, SerializeError};
pub use id_generator::{get_diagram_seed, IdGenerator};
pub use mutations::{Command, Direction, NodeMove, Removed};
pub use serializer::{from_json, to_json, to_xml, DEFAULT_JSON_FILE_NAME, DEFAULT_XML_FILE_NAME};
pub use shape::{Outline, ShapeKind, UnknownShapeKind};
pub use store::{DiagramStore, EditorOptions, PASTE_OFFSET};
pub use types::{
    Connection, Dimensions, Edge, EdgeId, EdgeMarker, EdgeStyle, HandleId, MarkerType, Node, NodeData,
    NodeDataPatch, NodeId, Position, TextAlign,
};
pub use undo_stack::{CommandHistory, HistoryEntry};
