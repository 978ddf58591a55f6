//! Editing session: one scene, its history, and the shared catalogs.
//!
//! Every mutation goes through a [`Command`] so it can be undone. The editor
//! raises a dirty flag on each change; the host drains it with
//! [`Editor::take_dirty`] and renders when it was set.

use crate::catalog::{CUSTOM_SIZE_ID, Catalogs};
use crate::commands::{
    AddCommand, ChangeBackgroundCommand, ChangeSizeCommand, ClearCommand, Command,
    DuplicateCommand, History, LoadSceneCommand, RandomizeCommand, RemoveCommand,
    ReorderCommand, UpdateCommand,
};
use crate::config::EditorConfig;
use crate::factory;
use crate::scene::{
    BackgroundKind, BackgroundOption, BannerSize, ColorType, ElementId, ElementRef,
    FontSize, IconPatch, ImagePatch, Scene, SceneElement, Shadow, TextAlign, TextPatch,
    ZOrder,
};
use kurbo::{Point, Vec2};
use std::sync::Arc;

/// An editing session.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    history: History,
    catalogs: Arc<Catalogs>,
    config: EditorConfig,
    dirty: bool,
}

impl Editor {
    /// Start a session on the configured default size and background, with one
    /// placeholder text element.
    pub fn new(config: EditorConfig, catalogs: Arc<Catalogs>) -> Self {
        let size = catalogs
            .size(&config.default_size_id)
            .or_else(|| catalogs.sizes.first())
            .cloned()
            .unwrap_or_else(|| BannerSize::new("twitter-header", "Twitter Header", 1500, 500, "Social Media"));
        let background = catalogs
            .background(&config.default_background_id)
            .or_else(|| catalogs.backgrounds.first())
            .cloned()
            .unwrap_or_else(|| BackgroundOption::solid("solid-white", "White", "#FFFFFF"));
        if size.id != config.default_size_id {
            log::warn!("Unknown default size {:?}, using {}", config.default_size_id, size.id);
        }

        let mut scene = Scene::new(size, background);
        scene.push(default_text(&config.placeholder_text, scene.size()));

        Self {
            scene,
            history: History::with_capacity(config.history_capacity),
            catalogs,
            config,
            dirty: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True if the scene changed since the last [`Editor::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and reset it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Execute and record an arbitrary command.
    pub fn execute(&mut self, command: Box<dyn Command>) {
        self.history.execute(command, &mut self.scene);
        self.dirty = true;
    }

    /// Undo the last command. Returns its description.
    pub fn undo(&mut self) -> Option<String> {
        let description = self.history.undo(&mut self.scene)?;
        self.dirty = true;
        Some(description)
    }

    /// Redo the last undone command. Returns its description.
    pub fn redo(&mut self) -> Option<String> {
        let description = self.history.redo(&mut self.scene)?;
        self.dirty = true;
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drop all undo and redo entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Add an element built from `seed` and return its id.
    pub fn add<E: SceneElement>(&mut self, seed: E::Patch) -> Option<ElementId> {
        self.execute(Box::new(AddCommand::<E>::new(seed)));
        E::collection(&self.scene).last().map(|e| e.id().to_string())
    }

    pub fn add_text(&mut self, text: &str) -> Option<ElementId> {
        self.add::<crate::scene::TextElement>(TextPatch::text(text))
    }

    pub fn add_image(&mut self, src: &str) -> Option<ElementId> {
        self.add::<crate::scene::ImageElement>(ImagePatch::src(src))
    }

    pub fn add_icon(&mut self, icon_type: &str) -> Option<ElementId> {
        self.add::<crate::scene::IconElement>(IconPatch::icon_type(icon_type))
    }

    /// Apply a partial update. Returns false if no element has this id.
    pub fn update<E: SceneElement>(&mut self, id: &str, patch: E::Patch) -> bool {
        if self.scene.find::<E>(id).is_none() {
            return false;
        }
        self.execute(Box::new(UpdateCommand::<E>::new(id, patch)));
        true
    }

    /// Remove an element. Returns false if no element has this id.
    pub fn remove<E: SceneElement>(&mut self, id: &str) -> bool {
        if self.scene.find::<E>(id).is_none() {
            return false;
        }
        self.execute(Box::new(RemoveCommand::<E>::new(id)));
        true
    }

    /// Copy an element, offset by the configured duplicate offset. Returns the copy's id.
    pub fn duplicate<E: SceneElement>(&mut self, id: &str) -> Option<ElementId> {
        self.scene.find::<E>(id)?;
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        self.execute(Box::new(DuplicateCommand::<E>::new(id, offset)));
        E::collection(&self.scene).last().map(|e| e.id().to_string())
    }

    /// Move an element within its collection's paint order.
    pub fn reorder<E: SceneElement>(&mut self, id: &str, order: ZOrder) -> bool {
        if self.scene.find::<E>(id).is_none() {
            return false;
        }
        self.execute(Box::new(ReorderCommand::<E>::new(id, order)));
        true
    }

    pub fn set_background(&mut self, background: BackgroundOption) {
        self.execute(Box::new(ChangeBackgroundCommand::new(background)));
    }

    /// Select a catalog background by id.
    pub fn select_background(&mut self, id: &str) -> bool {
        match self.catalogs.background(id).cloned() {
            Some(background) => {
                self.set_background(background);
                true
            }
            None => {
                log::warn!("Unknown background {id:?}");
                false
            }
        }
    }

    /// Change the crop anchor and zoom of the current image background.
    ///
    /// Crop values clamp to `[0, 100]` and the scale to at least 1.
    pub fn update_background_crop(&mut self, crop_x: f64, crop_y: f64, scale: f64) -> bool {
        let mut background = self.scene.background().clone();
        let BackgroundKind::Image { crop_x: cx, crop_y: cy, scale: s, .. } = &mut background.kind else {
            return false;
        };
        *cx = crop_x.clamp(0.0, 100.0);
        *cy = crop_y.clamp(0.0, 100.0);
        *s = scale.max(1.0);
        self.set_background(background);
        true
    }

    /// Replace the colors of the current pattern background.
    pub fn update_pattern_colors(&mut self, colors: Vec<String>) -> bool {
        let mut background = self.scene.background().clone();
        let BackgroundKind::Fancy { pattern_colors, .. } = &mut background.kind else {
            return false;
        };
        *pattern_colors = colors;
        self.set_background(background);
        true
    }

    /// Change the canvas size, rescaling elements.
    pub fn set_size(&mut self, size: BannerSize) {
        self.execute(Box::new(ChangeSizeCommand::new(size)));
    }

    /// Select a catalog size by id.
    pub fn select_size(&mut self, id: &str) -> bool {
        match self.catalogs.size(id).cloned() {
            Some(size) => {
                self.set_size(size);
                true
            }
            None => {
                log::warn!("Unknown size {id:?}");
                false
            }
        }
    }

    /// Update the custom size slot; reselect it if it is the current size.
    pub fn set_custom_dimensions(&mut self, width: u32, height: u32) -> BannerSize {
        let custom = Arc::make_mut(&mut self.catalogs).set_custom_dimensions(width, height);
        if self.scene.size().id == CUSTOM_SIZE_ID {
            self.set_size(custom.clone());
        }
        custom
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.execute(Box::new(ClearCommand::new()));
    }

    /// Generate a new design from `seed`, keeping user-authored content.
    pub fn randomize(&mut self, seed: u64) {
        let command = RandomizeCommand::new(
            Arc::clone(&self.catalogs),
            self.config.placeholder_text.clone(),
            seed,
        );
        self.execute(Box::new(command));
    }

    /// Replace the whole scene.
    pub fn load_scene(&mut self, scene: Scene) {
        self.execute(Box::new(LoadSceneCommand::new(scene)));
    }

    /// Elements under `point`, topmost first.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementRef<'_>> {
        self.scene.elements_at_point(point)
    }
}

/// The placeholder text a new session starts with, roughly centered.
fn default_text(placeholder: &str, size: &BannerSize) -> crate::scene::TextElement {
    let mut text = factory::create_text_element(placeholder, size);
    text.x = (size.width_f64() / 2.0 - 100.0).max(0.0);
    text.y = (size.height_f64() / 2.0 - 25.0).max(0.0);
    text.font_size = FontSize::Large;
    text.font_weight = "bold".to_string();
    text.text_align = TextAlign::Center;
    text.color_type = ColorType::Solid;
    text.gradient_colors = vec!["#FFFFFF".to_string(), "#F3F4F6".to_string()];
    text.shadow = Shadow {
        enabled: true,
        color: "rgba(0, 0, 0, 0.5)".to_string(),
        ..Shadow::default()
    };
    crate::bounds::validate_element_bounds(&mut text, size);
    text
}
