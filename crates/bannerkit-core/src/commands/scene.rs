//! Commands that touch the whole scene.

use super::Command;
use crate::catalog::Catalogs;
use crate::randomize;
use crate::scene::{BackgroundOption, BannerSize, ElementSet, Scene};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Replace the background.
#[derive(Debug)]
pub struct ChangeBackgroundCommand {
    background: BackgroundOption,
    previous: Option<BackgroundOption>,
}

impl ChangeBackgroundCommand {
    pub fn new(background: BackgroundOption) -> Self {
        Self {
            background,
            previous: None,
        }
    }
}

impl Command for ChangeBackgroundCommand {
    fn execute(&mut self, scene: &mut Scene) {
        self.previous = Some(scene.set_background(self.background.clone()));
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(previous) = self.previous.take() {
            scene.set_background(previous);
        }
    }

    fn description(&self) -> String {
        format!("Change background to: {}", self.background.name)
    }
}

/// Change the canvas size, rescaling elements.
///
/// Undo restores the previous geometry exactly instead of scaling back.
#[derive(Debug)]
pub struct ChangeSizeCommand {
    size: BannerSize,
    previous: Option<(BannerSize, ElementSet)>,
}

impl ChangeSizeCommand {
    pub fn new(size: BannerSize) -> Self {
        Self { size, previous: None }
    }
}

impl Command for ChangeSizeCommand {
    fn execute(&mut self, scene: &mut Scene) {
        let elements = scene.snapshot_elements();
        let old = scene.set_size(self.size.clone());
        self.previous = Some((old, elements));
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some((size, elements)) = self.previous.take() {
            scene.restore_layout(size, elements);
        }
    }

    fn description(&self) -> String {
        format!("Change size to: {}", self.size.name)
    }
}

/// Remove every element.
#[derive(Debug, Default)]
pub struct ClearCommand {
    removed: Option<ElementSet>,
}

impl ClearCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for ClearCommand {
    fn execute(&mut self, scene: &mut Scene) {
        self.removed = Some(scene.clear_elements());
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(elements) = self.removed.take() {
            scene.restore_elements(elements);
        }
    }

    fn description(&self) -> String {
        "Clear all elements".to_string()
    }
}

/// Replace the whole scene, for example with a template.
#[derive(Debug)]
pub struct LoadSceneCommand {
    scene: Scene,
    previous: Option<Scene>,
}

impl LoadSceneCommand {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            previous: None,
        }
    }
}

impl Command for LoadSceneCommand {
    fn execute(&mut self, scene: &mut Scene) {
        self.previous = Some(std::mem::replace(scene, self.scene.clone()));
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(previous) = self.previous.take() {
            *scene = previous;
        }
    }

    fn description(&self) -> String {
        "Load design".to_string()
    }
}

/// Generate a new design with the layout engine.
///
/// The first `execute` runs the randomizer from `seed`; redo restores that
/// result instead of rolling again, so later commands keep valid ids.
#[derive(Debug)]
pub struct RandomizeCommand {
    catalogs: Arc<Catalogs>,
    placeholder: String,
    seed: u64,
    before: Option<Scene>,
    after: Option<Scene>,
}

impl RandomizeCommand {
    pub fn new(catalogs: Arc<Catalogs>, placeholder: impl Into<String>, seed: u64) -> Self {
        Self {
            catalogs,
            placeholder: placeholder.into(),
            seed,
            before: None,
            after: None,
        }
    }
}

impl Command for RandomizeCommand {
    fn execute(&mut self, scene: &mut Scene) {
        self.before = Some(scene.clone());
        match &self.after {
            Some(after) => *scene = after.clone(),
            None => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                let report = randomize::randomize(scene, &self.catalogs, &self.placeholder, &mut rng);
                log::debug!("Randomized design: {report:?}");
                self.after = Some(scene.clone());
            }
        }
    }

    fn undo(&mut self, scene: &mut Scene) {
        if let Some(before) = self.before.take() {
            *scene = before;
        }
    }

    fn description(&self) -> String {
        "Randomize design".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddIconCommand, AddTextCommand, History};
    use crate::scene::{IconPatch, TextPatch};

    fn scene() -> Scene {
        Scene::new(
            BannerSize::new("test", "Test", 800, 400, "Test"),
            BackgroundOption::solid("white", "White", "#FFFFFF"),
        )
    }

    #[test]
    fn test_change_size_undo_is_exact() {
        let mut scene = scene();
        let mut history = History::new();
        history.execute(Box::new(AddIconCommand::new(IconPatch::icon_type("star"))), &mut scene);
        let before = scene.clone();

        history.execute(
            Box::new(ChangeSizeCommand::new(BannerSize::new("odd", "Odd", 333, 777, "Test"))),
            &mut scene,
        );
        assert_eq!(scene.size().width, 333);
        assert_ne!(scene.icons()[0].x, before.icons()[0].x);

        history.undo(&mut scene);
        assert_eq!(scene, before);
        assert_eq!(history.redo_description().as_deref(), Some("Change size to: Odd"));
    }

    #[test]
    fn test_clear_and_undo() {
        let mut scene = scene();
        let mut history = History::new();
        history.execute(Box::new(AddTextCommand::new(TextPatch::text("A"))), &mut scene);
        history.execute(Box::new(AddIconCommand::new(IconPatch::icon_type("star"))), &mut scene);
        let before = scene.clone();

        history.execute(Box::new(ClearCommand::new()), &mut scene);
        assert!(scene.is_empty());
        history.undo(&mut scene);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_load_scene_and_undo() {
        let mut scene = scene();
        let mut replacement = Scene::new(
            BannerSize::new("sq", "Square", 500, 500, "Test"),
            BackgroundOption::solid("black", "Black", "#000000"),
        );
        replacement.add_icon("heart");
        let original = scene.clone();

        let mut command = LoadSceneCommand::new(replacement.clone());
        command.execute(&mut scene);
        assert_eq!(scene, replacement);
        command.undo(&mut scene);
        assert_eq!(scene, original);
    }

    #[test]
    fn test_randomize_redo_restores_same_result() {
        let mut scene = scene();
        let catalogs = Arc::new(Catalogs::builtin());
        let original = scene.clone();
        let mut history = History::new();
        history.execute(
            Box::new(RandomizeCommand::new(catalogs, "Your text here", 42)),
            &mut scene,
        );
        let randomized = scene.clone();
        assert!(!scene.text_elements().is_empty());

        history.undo(&mut scene);
        assert_eq!(scene, original);
        history.redo(&mut scene);
        assert_eq!(scene, randomized);
    }
}
