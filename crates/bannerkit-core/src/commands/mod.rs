//! Reversible scene mutations and the bounded undo/redo history.

mod element;
mod history;
mod scene;

pub use element::{
    AddCommand, AddIconCommand, AddImageCommand, AddTextCommand, DuplicateCommand,
    RemoveCommand, RemoveIconCommand, RemoveImageCommand, RemoveTextCommand, ReorderCommand,
    UpdateCommand, UpdateIconCommand, UpdateImageCommand, UpdateTextCommand,
};
pub use history::{DEFAULT_HISTORY_CAPACITY, History};
pub use scene::{
    ChangeBackgroundCommand, ChangeSizeCommand, ClearCommand, LoadSceneCommand, RandomizeCommand,
};

use crate::scene::Scene;
use std::fmt::Debug;

/// A reversible unit of scene mutation.
///
/// `undo` reverses exactly what the paired `execute` did and nothing else.
/// `execute` may be called again after `undo` (redo) and must reproduce the
/// same result, reusing any ids it captured the first time.
pub trait Command: Debug {
    /// Apply the mutation.
    fn execute(&mut self, scene: &mut Scene);

    /// Reverse the last `execute`.
    fn undo(&mut self, scene: &mut Scene);

    /// Human-readable description.
    fn description(&self) -> String;
}
