//! Commands over a single element collection.

use super::Command;
use crate::bounds;
use crate::factory;
use crate::scene::{
    ElementId, IconElement, ImageElement, Patch, Scene, SceneElement, TextElement, ZOrder,
};
use kurbo::Vec2;

/// Add a new element created by the factory.
///
/// The first `execute` mints the id; later executions (redo) re-insert the same element.
#[derive(Debug)]
pub struct AddCommand<E: SceneElement> {
    seed: E::Patch,
    added: Option<E>,
}

pub type AddTextCommand = AddCommand<TextElement>;
pub type AddImageCommand = AddCommand<ImageElement>;
pub type AddIconCommand = AddCommand<IconElement>;

impl<E: SceneElement> AddCommand<E> {
    /// `seed` provides the initial content (text, src or icon type) and any style overrides.
    pub fn new(seed: E::Patch) -> Self {
        Self { seed, added: None }
    }

    /// Id of the added element, once executed.
    pub fn added_id(&self) -> Option<&str> {
        self.added.as_ref().map(|e| e.id())
    }
}

impl<E: SceneElement> Command for AddCommand<E> {
    fn execute(&mut self, scene: &mut Scene) {
        let element = match self.added.take() {
            Some(element) => element,
            None => {
                let mut element = E::spawn(&self.seed, scene.size());
                bounds::validate_element_bounds(&mut element, scene.size());
                element
            }
        };
        self.added = Some(element.clone());
        scene.push(element);
    }

    fn undo(&mut self, scene: &mut Scene) {
        let Some(id) = self.added.as_ref().map(|e| e.id().to_string()) else {
            return;
        };
        if let Some((_, element)) = scene.remove::<E>(&id) {
            self.added = Some(element);
        }
    }

    fn description(&self) -> String {
        E::add_description(&self.seed)
    }
}

/// Apply a partial update to one element, remembering the prior values of the touched keys.
#[derive(Debug)]
pub struct UpdateCommand<E: SceneElement> {
    id: ElementId,
    patch: E::Patch,
    inverse: Option<E::Patch>,
}

pub type UpdateTextCommand = UpdateCommand<TextElement>;
pub type UpdateImageCommand = UpdateCommand<ImageElement>;
pub type UpdateIconCommand = UpdateCommand<IconElement>;

impl<E: SceneElement> UpdateCommand<E> {
    pub fn new(id: impl Into<ElementId>, patch: E::Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            inverse: None,
        }
    }
}

impl<E: SceneElement> Command for UpdateCommand<E> {
    fn execute(&mut self, scene: &mut Scene) {
        self.inverse = scene.update::<E>(&self.id, &self.patch);
        if self.inverse.is_none() {
            log::warn!("Update skipped: no {} with id {}", E::KIND.label(), self.id);
        }
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(inverse) = self.inverse.take() {
            scene.update::<E>(&self.id, &inverse);
        }
    }

    fn description(&self) -> String {
        E::update_description(&self.patch)
    }
}

/// Remove an element, keeping a full snapshot for undo.
#[derive(Debug)]
pub struct RemoveCommand<E: SceneElement> {
    id: ElementId,
    removed: Option<(usize, E)>,
}

pub type RemoveTextCommand = RemoveCommand<TextElement>;
pub type RemoveImageCommand = RemoveCommand<ImageElement>;
pub type RemoveIconCommand = RemoveCommand<IconElement>;

impl<E: SceneElement> RemoveCommand<E> {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            removed: None,
        }
    }
}

impl<E: SceneElement> Command for RemoveCommand<E> {
    fn execute(&mut self, scene: &mut Scene) {
        if let Some(removed) = scene.remove::<E>(&self.id) {
            self.removed = Some(removed);
        }
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some((index, element)) = self.removed.clone() {
            E::restore(scene, index, element);
        }
    }

    fn description(&self) -> String {
        match &self.removed {
            Some((_, element)) => element.remove_description(),
            None => format!("Remove {}", E::KIND.label()),
        }
    }
}

/// Copy an element with a new id, shifted by an offset.
#[derive(Debug)]
pub struct DuplicateCommand<E: SceneElement> {
    source_id: ElementId,
    offset: Vec2,
    copy: Option<E>,
}

impl<E: SceneElement> DuplicateCommand<E> {
    pub fn new(source_id: impl Into<ElementId>, offset: Vec2) -> Self {
        Self {
            source_id: source_id.into(),
            offset,
            copy: None,
        }
    }

    /// Id of the copy, once executed.
    pub fn copy_id(&self) -> Option<&str> {
        self.copy.as_ref().map(|e| e.id())
    }
}

impl<E: SceneElement> Command for DuplicateCommand<E> {
    fn execute(&mut self, scene: &mut Scene) {
        let copy = match self.copy.take() {
            Some(copy) => copy,
            None => {
                let Some(source) = scene.find::<E>(&self.source_id) else {
                    log::warn!("Duplicate skipped: no {} with id {}", E::KIND.label(), self.source_id);
                    return;
                };
                let mut copy = factory::clone_element(source, self.offset);
                bounds::validate_element_bounds(&mut copy, scene.size());
                copy
            }
        };
        self.copy = Some(copy.clone());
        scene.push(copy);
    }

    fn undo(&mut self, scene: &mut Scene) {
        let Some(id) = self.copy.as_ref().map(|e| e.id().to_string()) else {
            return;
        };
        if let Some((_, copy)) = scene.remove::<E>(&id) {
            self.copy = Some(copy);
        }
    }

    fn description(&self) -> String {
        format!("Duplicate {}", E::KIND.label())
    }
}

/// Move an element within its collection's paint order.
#[derive(Debug)]
pub struct ReorderCommand<E: SceneElement> {
    id: ElementId,
    order: ZOrder,
    previous_index: Option<usize>,
    _kind: std::marker::PhantomData<E>,
}

impl<E: SceneElement> ReorderCommand<E> {
    pub fn new(id: impl Into<ElementId>, order: ZOrder) -> Self {
        Self {
            id: id.into(),
            order,
            previous_index: None,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<E: SceneElement> Command for ReorderCommand<E> {
    fn execute(&mut self, scene: &mut Scene) {
        self.previous_index = scene.reorder::<E>(&self.id, self.order);
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(index) = self.previous_index.take() {
            scene.move_to::<E>(&self.id, index);
        }
    }

    fn description(&self) -> String {
        format!("Move {} to {}", E::KIND.label(), self.order.label())
    }
}
