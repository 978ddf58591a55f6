//! Bounded linear undo/redo history.

use super::Command;
use crate::scene::Scene;
use std::collections::VecDeque;

/// Maximum number of undoable commands kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Undo and redo stacks for one scene.
///
/// Executing a new command clears the redo stack. The oldest undo entry is
/// discarded once the capacity is exceeded.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history keeping at most `capacity` undoable commands.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Execute a command and record it.
    pub fn execute(&mut self, mut command: Box<dyn Command>, scene: &mut Scene) {
        command.execute(scene);
        log::debug!("Executed: {}", command.description());
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Undo the most recent command.
    /// Returns its description, or `None` if there was nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> Option<String> {
        let mut command = self.undo_stack.pop_back()?;
        command.undo(scene);
        let description = command.description();
        log::debug!("Undid: {description}");
        self.redo_stack.push(command);
        Some(description)
    }

    /// Redo the most recently undone command.
    /// Returns its description, or `None` if there was nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> Option<String> {
        let mut command = self.redo_stack.pop()?;
        command.execute(scene);
        let description = command.description();
        log::debug!("Redid: {description}");
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        Some(description)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the command `undo` would reverse.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Description of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Number of undoable commands.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable commands.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
