//! Tests for long undo/redo sequences
//!
//! This tests:
//! - Undo of a whole session restoring the starting snapshot
//! - Redo reproducing the state before each undo
//! - Branching after undo discarding the redo stack
//! - Drags and change batches interleaved with discrete actions

use flowmaster_editor::{
    Connection, DiagramStore, EditorOptions, Edge, GraphDocument, Node, NodeChange, NodeData, NodeDataPatch,
    Position, ShapeKind,
};
use proptest::prelude::*;

const COLORS: [&str; 4] = ["red", "green", "blue", "#ffcc00"];

fn node(id: &str) -> Node {
    Node::new(id, Position::default(), NodeData::new(id, ShapeKind::Rectangle))
}

/// Store over a small imported diagram with one selected node
fn seeded_store() -> DiagramStore {
    let doc = GraphDocument::new(
        vec![node("n0").with_selected(true), node("n1")],
        vec![Edge::new("seed-edge", "n0", "n1")],
    );
    DiagramStore::from_document(doc, EditorOptions::default())
}

#[derive(Debug, Clone)]
enum Op {
    AddNode(u8),
    UpdateFill(u8, usize),
    UpdateOpacity(u8, f64),
    Connect(u8, u8),
    DeleteEdge(usize),
    DeleteSelection,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::AddNode),
        (0u8..6, 0usize..COLORS.len()).prop_map(|(n, c)| Op::UpdateFill(n, c)),
        (0u8..6, -0.5f64..1.5).prop_map(|(n, o)| Op::UpdateOpacity(n, o)),
        (0u8..6, 0u8..6).prop_map(|(s, t)| Op::Connect(s, t)),
        (0usize..6).prop_map(Op::DeleteEdge),
        Just(Op::DeleteSelection),
    ]
}

/// Run one action; returns whether it must take a history entry
///
/// Only actions without a target (unknown node, empty selection) are
/// allowed to leave the history alone.
fn run(store: &mut DiagramStore, op: &Op) -> bool {
    match op {
        Op::AddNode(n) => {
            store.add_node(node(&format!("n{}", n)));
            true
        }
        Op::UpdateFill(n, c) => {
            let id = format!("n{}", n);
            let exists = store.document().contains_node(&id);
            store.update_node_data(&id, &NodeDataPatch::fill(COLORS[*c]));
            exists
        }
        Op::UpdateOpacity(n, o) => {
            let id = format!("n{}", n);
            let exists = store.document().contains_node(&id);
            store.update_node_data(&id, &NodeDataPatch::opacity(*o));
            exists
        }
        Op::Connect(s, t) => {
            store.on_connect(&Connection::new(format!("n{}", s), format!("n{}", t)));
            true
        }
        Op::DeleteEdge(index) => match store.edges().get(*index).map(|e| e.id.clone()) {
            Some(id) => store.delete_edge(&id),
            None => false,
        },
        Op::DeleteSelection => {
            let doc = store.document();
            let has_selection = doc.selected_nodes().next().is_some() || doc.selected_edges().next().is_some();
            store.delete_selection();
            has_selection
        }
    }
}

proptest! {
    #[test]
    fn undo_all_restores_initial_snapshot(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = seeded_store();
        // Earlier entry that one undo too many would reverse
        store.add_node(node("sentinel"));
        let initial = store.snapshot();

        let recorded = ops.iter().filter(|op| run(&mut store, op)).count();
        prop_assert_eq!(store.history().undo_levels(), recorded + 1);

        for _ in 0..recorded {
            prop_assert!(store.undo());
        }

        prop_assert_eq!(store.snapshot(), initial);
        prop_assert_eq!(store.history().undo_levels(), 1);
    }

    #[test]
    fn redo_reproduces_state_before_undo(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = seeded_store();
        for op in &ops {
            run(&mut store, op);
        }

        while store.can_undo() {
            let before = store.snapshot();
            prop_assert!(store.undo());
            prop_assert!(store.redo());
            prop_assert_eq!(store.snapshot(), before);
            store.undo();
        }
    }

    #[test]
    fn opacity_stays_in_unit_range(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = seeded_store();
        for op in &ops {
            run(&mut store, op);
        }

        for node in store.nodes() {
            let opacity = node.data.opacity_or_default();
            prop_assert!((0.0..=1.0).contains(&opacity));
        }
    }
}

#[test]
fn test_repeated_actions_undo_one_at_a_time() {
    let mut store = DiagramStore::new();
    store.add_node(node("a"));
    store.add_node(node("b"));
    store.on_connect(&Connection::new("a", "b"));
    let connected = store.snapshot();

    // Each repeat matches existing state but still counts as an action
    store.add_node(node("a"));
    store.on_connect(&Connection::new("a", "b"));
    store.update_node_data("a", &NodeDataPatch::label("a"));
    assert_eq!(store.snapshot(), connected);

    for _ in 0..3 {
        assert!(store.undo());
        assert_eq!(store.snapshot(), connected);
    }

    assert!(store.undo());
    assert!(store.edges().is_empty());
}

#[test]
fn test_branch_after_undo_discards_redo() {
    let mut store = DiagramStore::new();
    store.add_node(node("1"));

    for color in COLORS {
        store.update_node_data("1", &NodeDataPatch::fill(color));
    }
    assert_eq!(store.history().undo_levels(), 5);

    // Undo all, redo all
    for _ in 0..5 {
        assert!(store.undo());
    }
    assert!(store.nodes().is_empty());
    for _ in 0..5 {
        assert!(store.redo());
    }
    assert_eq!(store.document().node("1").unwrap().data.fill.as_deref(), Some("#ffcc00"));

    // Undo 3, apply new (clears redo)
    for _ in 0..3 {
        store.undo();
    }
    assert_eq!(store.history().redo_levels(), 3);

    store.update_node_data("1", &NodeDataPatch::label("new branch"));
    assert_eq!(store.history().redo_levels(), 0);
    assert!(!store.redo());
    assert_eq!(store.document().node("1").unwrap().data.fill.as_deref(), Some("green"));
}

#[test]
fn test_drag_interleaved_with_edits() {
    let mut store = DiagramStore::new();
    store.add_node(node("1"));
    store.add_node(node("2"));
    let start = store.snapshot();

    // Drag node 1 across several frames
    for x in [10.0, 20.0, 30.0] {
        store.apply_node_changes(&[NodeChange::Move {
            id: "1".to_string(),
            position: Position::new(x, 0.0),
            dragging: true,
        }]);
    }
    store.apply_node_changes(&[NodeChange::Move {
        id: "1".to_string(),
        position: Position::new(40.0, 0.0),
        dragging: false,
    }]);

    store.update_node_data("1", &NodeDataPatch::fill("blue"));
    store.on_connect(&Connection::new("1", "2"));

    assert_eq!(store.history().undo_levels(), 5);

    for _ in 0..3 {
        store.undo();
    }
    assert_eq!(store.snapshot(), start);
}

#[test]
fn test_undo_after_batch_removal_skips_missing_node() {
    let mut store = DiagramStore::new();
    store.add_node(node("1"));
    store.update_node_data("1", &NodeDataPatch::fill("red"));

    // Removal through a change batch is not recorded
    store.apply_node_changes(&[NodeChange::Remove { id: "1".to_string() }]);

    assert!(store.undo());
    assert!(store.nodes().is_empty());
    assert!(store.undo());
    assert!(store.nodes().is_empty());

    assert!(store.redo());
    assert_eq!(store.nodes().len(), 1);
}
