//! BannerKit Core Library
//!
//! Platform-agnostic data model and editing logic for the banner editor:
//! color math, the scene model, element bounds, reversible commands and the
//! procedural layout engine.

pub mod bounds;
pub mod catalog;
pub mod color;
pub mod commands;
pub mod config;
pub mod editor;
pub mod export;
pub mod factory;
pub mod randomize;
pub mod scene;

pub use bounds::{Extent, HasExtent, HasPosition};
pub use catalog::{Catalogs, IconDefinition};
pub use commands::{Command, History};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use export::{ExportFormat, ExportOptions};
pub use randomize::{LayoutTemplate, RandomizeReport};
pub use scene::{
    BackgroundKind, BackgroundOption, BannerSize, ElementId, ElementKind, ElementRef,
    IconElement, ImageElement, PatternKind, Scene, SceneError, TextElement,
};
