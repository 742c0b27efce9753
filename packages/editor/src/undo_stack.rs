//! # Undo/Redo History
//!
//! Tracks recorded commands and moves the document backward and forward.
//!
//! ## Design
//!
//! - Recording a command applies it once, then archives it
//! - Undo applies it backward and moves it to the redo stack
//! - Redo applies it forward again
//! - Recording after an undo clears the redo stack (no branching)
//! - Supports batches (group several commands as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = CommandHistory::new();
//! let mut doc = GraphDocument::default();
//!
//! history.record(Command::AddNode { node }, &mut doc);
//! history.undo(&mut doc);
//! history.redo(&mut doc);
//! ```

use crate::document::GraphDocument;
use crate::mutations::{Command, Direction};
use tracing::debug;

/// Commands that are undone/redone together
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The commands in this entry (in application order)
    pub commands: Vec<Command>,

    /// Optional description of this entry
    pub description: Option<String>,
}

impl HistoryEntry {
    pub fn single(command: Command) -> Self {
        Self {
            commands: vec![command],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn undo(&self, doc: &mut GraphDocument) {
        for command in self.commands.iter().rev() {
            command.apply(doc, Direction::Backward);
        }
    }

    fn redo(&self, doc: &mut GraphDocument) {
        for command in &self.commands {
            command.apply(doc, Direction::Forward);
        }
    }
}

/// Undo/redo stacks for one diagram
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Recorded entries (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone entries (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<HistoryEntry>,
}

impl CommandHistory {
    /// Create a history without a depth limit
    pub fn new() -> Self {
        Self::with_max_levels(0)
    }

    /// Create a history keeping at most `max_levels` undo steps (0 = unlimited)
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply `command` to `doc` and record it for undo
    pub fn record(&mut self, command: Command, doc: &mut GraphDocument) {
        command.apply(doc, Direction::Forward);
        debug!(command = command.name(), "Recorded command");

        if let Some(batch) = &mut self.current_batch {
            batch.commands.push(command);
            self.redo_stack.clear();
        } else {
            self.push_entry(HistoryEntry::single(command));
        }
    }

    /// Start a batch of commands (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.current_batch = Some(HistoryEntry {
            commands: Vec::new(),
            description: None,
        });
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.commands.is_empty() {
                self.push_entry(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the undone future
        self.redo_stack.clear();
    }

    /// Undo the most recent entry; returns false if there was nothing to undo
    pub fn undo(&mut self, doc: &mut GraphDocument) -> bool {
        self.end_batch();

        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };
        entry.undo(doc);
        debug!(commands = entry.commands.len(), "Undid history entry");
        self.redo_stack.push(entry);
        true
    }

    /// Redo the most recently undone entry; returns false if there was nothing to redo
    pub fn redo(&mut self, doc: &mut GraphDocument) -> bool {
        self.end_batch();

        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        entry.redo(doc);
        debug!(commands = entry.commands.len(), "Redid history entry");
        self.undo_stack.push(entry);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Description of the next undo step
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Description of the next redo step
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;
    use crate::types::{Node, NodeData, Position};

    fn add(id: &str) -> Command {
        Command::AddNode {
            node: Node::new(id, Position::default(), NodeData::new(id, ShapeKind::Rectangle)),
        }
    }

    #[test]
    fn test_history_creation() {
        let history = CommandHistory::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.max_levels(), 0);
    }

    #[test]
    fn test_record_undo_redo() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        history.record(add("1"), &mut doc);
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(history.undo_levels(), 1);

        assert!(history.undo(&mut doc));
        assert!(doc.nodes().is_empty());
        assert_eq!(history.redo_levels(), 1);

        assert!(history.redo(&mut doc));
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        assert!(!history.undo(&mut doc));
        assert!(!history.redo(&mut doc));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_batch_undoes_together() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        history.begin_batch();
        history.set_batch_description("Paste");
        history.record(add("1"), &mut doc);
        history.record(add("2"), &mut doc);
        history.end_batch();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Paste"));

        history.undo(&mut doc);
        assert!(doc.is_empty());
        assert_eq!(history.redo_description(), Some("Paste"));
    }

    #[test]
    fn test_empty_batch_not_recorded() {
        let mut history = CommandHistory::new();
        history.begin_batch();
        history.end_batch();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_closes_open_batch() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        history.begin_batch();
        history.record(add("1"), &mut doc);
        assert!(history.undo(&mut doc));

        assert!(!history.is_batching());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        history.record(add("1"), &mut doc);
        history.undo(&mut doc);
        assert_eq!(history.redo_levels(), 1);

        history.record(add("2"), &mut doc);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.redo(&mut doc));
    }

    #[test]
    fn test_batched_record_clears_redo_before_end() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();

        history.record(add("1"), &mut doc);
        history.undo(&mut doc);

        history.begin_batch();
        history.record(add("2"), &mut doc);
        assert!(history.is_batching());
        assert!(!history.can_redo());

        history.end_batch();
        assert!(!history.redo(&mut doc));
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::with_max_levels(2);

        for i in 0..3 {
            history.record(add(&i.to_string()), &mut doc);
        }

        assert_eq!(history.undo_levels(), 2);
        assert_eq!(doc.nodes().len(), 3);

        // Oldest entry dropped: node "0" survives undoing everything
        while history.undo(&mut doc) {}
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(doc.nodes()[0].id, "0");
    }

    #[test]
    fn test_clear() {
        let mut doc = GraphDocument::default();
        let mut history = CommandHistory::new();
        history.record(add("1"), &mut doc);
        history.clear();
        assert!(!history.can_undo());
        assert_eq!(history.entries().len(), 0);
    }
}
