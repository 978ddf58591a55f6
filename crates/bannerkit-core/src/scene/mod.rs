//! Scene data model: banner size, background and ordered element collections.

mod elements;
mod patch;

pub use elements::{
    ColorType, FontSize, IconElement, ImageElement, Shadow, Stroke, TextAlign, TextElement,
};
pub use patch::{IconPatch, ImagePatch, Patch, TextPatch};

use crate::bounds::{self, HasExtent};
use crate::factory;
use kurbo::Point;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Element identifier, unique within an editing session.
pub type ElementId = String;

/// Scene serialization errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Parse an angle written either as a number or as a CSS string such as `"45deg"`.
pub fn parse_angle(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("deg").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn deserialize_angle<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAngle {
        Number(f64),
        Text(String),
    }

    match RawAngle::deserialize(deserializer)? {
        RawAngle::Number(v) => Ok(v),
        RawAngle::Text(s) => {
            parse_angle(&s).ok_or_else(|| D::Error::custom(format!("invalid angle: {s}")))
        }
    }
}

/// A canvas size preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerSize {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub category: String,
}

impl BannerSize {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        width: u32,
        height: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width: width.max(1),
            height: height.max(1),
            category: category.into(),
        }
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }
}

/// Procedural pattern kinds for fancy backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Dots,
    Grid,
    Diagonal,
    Hexagon,
    Waves,
    Triangles,
    Circles,
    Chevron,
    Stars,
    Noise,
    Bubbles,
    Circuit,
    /// Fallback for unknown kinds.
    #[serde(other)]
    Checkerboard,
}

fn default_crop() -> f64 {
    50.0
}

fn default_scale() -> f64 {
    1.0
}

fn default_direction() -> f64 {
    45.0
}

/// Background payload, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackgroundKind {
    #[serde(rename = "solid")]
    Solid { value: String },
    #[serde(rename = "gradient", rename_all = "camelCase")]
    Gradient {
        gradient_colors: Vec<String>,
        #[serde(default = "default_direction", deserialize_with = "deserialize_angle")]
        gradient_direction: f64,
    },
    #[serde(rename = "fancy", alias = "pattern", rename_all = "camelCase")]
    Fancy {
        pattern_type: PatternKind,
        #[serde(default)]
        pattern_colors: Vec<String>,
    },
    #[serde(rename = "image", rename_all = "camelCase")]
    Image {
        value: String,
        #[serde(default = "default_crop")]
        crop_x: f64,
        #[serde(default = "default_crop")]
        crop_y: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
}

impl BackgroundKind {
    /// Discriminant name as used in scene files.
    pub fn type_name(&self) -> &'static str {
        match self {
            BackgroundKind::Solid { .. } => "solid",
            BackgroundKind::Gradient { .. } => "gradient",
            BackgroundKind::Fancy { .. } => "fancy",
            BackgroundKind::Image { .. } => "image",
        }
    }
}

/// A named background preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundOption {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: BackgroundKind,
}

impl BackgroundOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: BackgroundKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn solid(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(id, name, BackgroundKind::Solid { value: color.into() })
    }

    /// Image background with a centered crop and no zoom.
    pub fn image(src: impl Into<String>) -> Self {
        Self::new(
            "custom-image",
            "Custom Image",
            BackgroundKind::Image {
                value: src.into(),
                crop_x: 50.0,
                crop_y: 50.0,
                scale: 1.0,
            },
        )
    }
}

/// The three element collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Icon,
}

impl ElementKind {
    /// Lowercase label used in command descriptions.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Icon => "icon",
        }
    }

    /// Prefix for generated ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "img",
            ElementKind::Icon => "icon",
        }
    }
}

/// Common behavior of the element variants stored in a [`Scene`].
pub trait SceneElement: Clone + Debug + PartialEq + HasExtent + 'static {
    /// Partial update type for this element.
    type Patch: Patch<Self> + 'static;

    const KIND: ElementKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: ElementId);

    /// The collection holding this element type.
    fn collection(scene: &Scene) -> &Vec<Self>;

    fn collection_mut(scene: &mut Scene) -> &mut Vec<Self>;

    /// Create a new element through the factory, seeded from a patch.
    fn spawn(seed: &Self::Patch, size: &BannerSize) -> Self;

    /// Re-insert a removed element at `index`, keeping its id.
    fn restore(scene: &mut Scene, index: usize, element: Self) {
        scene.insert_at(index, element);
    }

    fn add_description(_seed: &Self::Patch) -> String {
        format!("Add {}", Self::KIND.label())
    }

    fn update_description(_patch: &Self::Patch) -> String {
        format!("Update {} properties", Self::KIND.label())
    }

    fn remove_description(&self) -> String {
        format!("Remove {}", Self::KIND.label())
    }
}

impl SceneElement for TextElement {
    type Patch = TextPatch;
    const KIND: ElementKind = ElementKind::Text;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn collection(scene: &Scene) -> &Vec<Self> {
        &scene.text_elements
    }

    fn collection_mut(scene: &mut Scene) -> &mut Vec<Self> {
        &mut scene.text_elements
    }

    fn spawn(seed: &TextPatch, size: &BannerSize) -> Self {
        let mut text = factory::create_text_element(seed.text.as_deref().unwrap_or_default(), size);
        seed.apply_to(&mut text);
        text
    }

    fn add_description(seed: &TextPatch) -> String {
        format!("Add text: \"{}\"", seed.text.as_deref().unwrap_or_default())
    }

    fn update_description(patch: &TextPatch) -> String {
        format!("Update text properties: {}", patch.touched_fields().join(", "))
    }

    fn remove_description(&self) -> String {
        format!("Remove text: \"{}\"", self.text)
    }
}

impl SceneElement for ImageElement {
    type Patch = ImagePatch;
    const KIND: ElementKind = ElementKind::Image;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn collection(scene: &Scene) -> &Vec<Self> {
        &scene.images
    }

    fn collection_mut(scene: &mut Scene) -> &mut Vec<Self> {
        &mut scene.images
    }

    fn spawn(seed: &ImagePatch, size: &BannerSize) -> Self {
        let mut image = factory::create_image_element(seed.src.as_deref().unwrap_or_default(), size);
        seed.apply_to(&mut image);
        image
    }
}

impl SceneElement for IconElement {
    type Patch = IconPatch;
    const KIND: ElementKind = ElementKind::Icon;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn collection(scene: &Scene) -> &Vec<Self> {
        &scene.icons
    }

    fn collection_mut(scene: &mut Scene) -> &mut Vec<Self> {
        &mut scene.icons
    }

    fn spawn(seed: &IconPatch, size: &BannerSize) -> Self {
        let mut icon =
            factory::create_icon_element(seed.icon_type.as_deref().unwrap_or_default(), size);
        seed.apply_to(&mut icon);
        icon
    }

    /// Icons are rebuilt in two steps: add by type, then overwrite every field
    /// (id included) from the snapshot.
    fn restore(scene: &mut Scene, index: usize, element: Self) {
        let temp_id = scene.add_icon(&element.icon_type);
        let id = element.id.clone();
        scene.replace(&temp_id, element);
        scene.move_to::<IconElement>(&id, index);
    }

    fn add_description(seed: &IconPatch) -> String {
        format!("Add icon: {}", seed.icon_type.as_deref().unwrap_or_default())
    }

    fn remove_description(&self) -> String {
        format!("Remove icon: {}", self.icon_type)
    }
}

/// A borrowed element of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementRef<'a> {
    Text(&'a TextElement),
    Image(&'a ImageElement),
    Icon(&'a IconElement),
}

impl ElementRef<'_> {
    pub fn id(&self) -> &str {
        match self {
            ElementRef::Text(e) => &e.id,
            ElementRef::Image(e) => &e.id,
            ElementRef::Icon(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Text(_) => ElementKind::Text,
            ElementRef::Image(_) => ElementKind::Image,
            ElementRef::Icon(_) => ElementKind::Icon,
        }
    }

    pub fn bounds(&self) -> kurbo::Rect {
        match self {
            ElementRef::Text(e) => bounds::element_bounds(*e),
            ElementRef::Image(e) => bounds::element_bounds(*e),
            ElementRef::Icon(e) => bounds::element_bounds(*e),
        }
    }
}

/// Owned copies of all three element collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSet {
    pub text_elements: Vec<TextElement>,
    pub images: Vec<ImageElement>,
    pub icons: Vec<IconElement>,
}

impl ElementSet {
    pub fn is_empty(&self) -> bool {
        self.text_elements.is_empty() && self.images.is_empty() && self.icons.is_empty()
    }
}

/// Position of an element within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Front,
    Back,
    Forward,
    Backward,
}

impl ZOrder {
    fn target_index(self, current: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            ZOrder::Front => last,
            ZOrder::Back => 0,
            ZOrder::Forward => (current + 1).min(last),
            ZOrder::Backward => current.saturating_sub(1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZOrder::Front => "front",
            ZOrder::Back => "back",
            ZOrder::Forward => "forward",
            ZOrder::Backward => "backward",
        }
    }
}

/// The complete declarative description of one banner.
///
/// Paint order is background, images, icons, then text. Within a collection,
/// later elements are painted on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    size: BannerSize,
    background: BackgroundOption,
    #[serde(default)]
    text_elements: Vec<TextElement>,
    #[serde(default)]
    images: Vec<ImageElement>,
    #[serde(default)]
    icons: Vec<IconElement>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(size: BannerSize, background: BackgroundOption) -> Self {
        Self {
            size,
            background,
            text_elements: Vec::new(),
            images: Vec::new(),
            icons: Vec::new(),
        }
    }

    pub fn size(&self) -> &BannerSize {
        &self.size
    }

    pub fn background(&self) -> &BackgroundOption {
        &self.background
    }

    pub fn text_elements(&self) -> &[TextElement] {
        &self.text_elements
    }

    pub fn images(&self) -> &[ImageElement] {
        &self.images
    }

    pub fn icons(&self) -> &[IconElement] {
        &self.icons
    }

    /// Check if the scene has no elements.
    pub fn is_empty(&self) -> bool {
        self.text_elements.is_empty() && self.images.is_empty() && self.icons.is_empty()
    }

    /// Total number of elements across all collections.
    pub fn element_count(&self) -> usize {
        self.text_elements.len() + self.images.len() + self.icons.len()
    }

    /// Look up an element by id.
    pub fn find<E: SceneElement>(&self, id: &str) -> Option<&E> {
        E::collection(self).iter().find(|e| e.id() == id)
    }

    /// Index of an element within its collection.
    pub fn index_of<E: SceneElement>(&self, id: &str) -> Option<usize> {
        E::collection(self).iter().position(|e| e.id() == id)
    }

    /// Append an element on top of its collection.
    pub fn push<E: SceneElement>(&mut self, element: E) {
        E::collection_mut(self).push(element);
    }

    /// Insert an element at `index` (clamped to the collection length).
    pub fn insert_at<E: SceneElement>(&mut self, index: usize, element: E) {
        let collection = E::collection_mut(self);
        let index = index.min(collection.len());
        collection.insert(index, element);
    }

    /// Create an icon of `icon_type` with factory defaults and return its id.
    pub fn add_icon(&mut self, icon_type: &str) -> ElementId {
        let icon = factory::create_icon_element(icon_type, &self.size);
        let id = icon.id.clone();
        self.icons.push(icon);
        id
    }

    /// Apply a patch, then clamp the element to the canvas.
    ///
    /// Returns the inverse patch, or `None` if no element has this id.
    pub fn update<E: SceneElement>(&mut self, id: &str, patch: &E::Patch) -> Option<E::Patch> {
        let size = self.size.clone();
        let element = E::collection_mut(self).iter_mut().find(|e| e.id() == id)?;
        let before = element.clone();
        patch.apply_to(element);
        bounds::validate_element_bounds(element, &size);
        Some(patch.inverse(&before, element))
    }

    /// Overwrite every field of the element with this id, including the id itself.
    pub fn replace<E: SceneElement>(&mut self, id: &str, element: E) -> bool {
        match E::collection_mut(self).iter_mut().find(|e| e.id() == id) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Remove an element, returning its former index and value.
    pub fn remove<E: SceneElement>(&mut self, id: &str) -> Option<(usize, E)> {
        let collection = E::collection_mut(self);
        let index = collection.iter().position(|e| e.id() == id)?;
        Some((index, collection.remove(index)))
    }

    /// Move an element to `index` within its collection. Returns the previous index.
    pub fn move_to<E: SceneElement>(&mut self, id: &str, index: usize) -> Option<usize> {
        let collection = E::collection_mut(self);
        let from = collection.iter().position(|e| e.id() == id)?;
        let element = collection.remove(from);
        let to = index.min(collection.len());
        collection.insert(to, element);
        Some(from)
    }

    /// Reorder an element within its collection. Returns the previous index.
    pub fn reorder<E: SceneElement>(&mut self, id: &str, order: ZOrder) -> Option<usize> {
        let collection = E::collection(self);
        let current = collection.iter().position(|e| e.id() == id)?;
        let target = order.target_index(current, collection.len());
        self.move_to::<E>(id, target)
    }

    /// Replace the background, returning the previous one.
    pub fn set_background(&mut self, background: BackgroundOption) -> BackgroundOption {
        std::mem::replace(&mut self.background, background)
    }

    /// Change the canvas size, rescaling every element to the new dimensions.
    pub fn set_size(&mut self, size: BannerSize) -> BannerSize {
        let old = std::mem::replace(&mut self.size, size);
        bounds::adjust_elements_to_new_size(self, &old);
        old
    }

    /// Restore a size and element set captured earlier, without rescaling.
    pub fn restore_layout(&mut self, size: BannerSize, elements: ElementSet) {
        self.size = size;
        self.restore_elements(elements);
    }

    /// Copy all element collections.
    pub fn snapshot_elements(&self) -> ElementSet {
        ElementSet {
            text_elements: self.text_elements.clone(),
            images: self.images.clone(),
            icons: self.icons.clone(),
        }
    }

    /// Remove every element, returning them.
    pub fn clear_elements(&mut self) -> ElementSet {
        ElementSet {
            text_elements: std::mem::take(&mut self.text_elements),
            images: std::mem::take(&mut self.images),
            icons: std::mem::take(&mut self.icons),
        }
    }

    /// Replace all element collections.
    pub fn restore_elements(&mut self, elements: ElementSet) {
        self.text_elements = elements.text_elements;
        self.images = elements.images;
        self.icons = elements.icons;
    }

    pub(crate) fn text_elements_mut(&mut self) -> &mut Vec<TextElement> {
        &mut self.text_elements
    }

    pub(crate) fn images_mut(&mut self) -> &mut Vec<ImageElement> {
        &mut self.images
    }

    pub(crate) fn icons_mut(&mut self) -> &mut Vec<IconElement> {
        &mut self.icons
    }

    /// Elements whose bounding box contains `point`, topmost first.
    ///
    /// Rotation is ignored: hit testing uses the unrotated box.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementRef<'_>> {
        let text = self
            .text_elements
            .iter()
            .rev()
            .filter(|e| bounds::is_point_in_element(*e, point))
            .map(ElementRef::Text);
        let icons = self
            .icons
            .iter()
            .rev()
            .filter(|e| bounds::is_point_in_element(*e, point))
            .map(ElementRef::Icon);
        let images = self
            .images
            .iter()
            .rev()
            .filter(|e| bounds::is_point_in_element(*e, point))
            .map(ElementRef::Image);
        text.chain(icons).chain(images).collect()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(
            BannerSize::new("test", "Test", 800, 400, "Test"),
            BackgroundOption::solid("white", "White", "#FFFFFF"),
        )
    }

    #[test]
    fn test_scene_creation() {
        let scene = scene();
        assert!(scene.is_empty());
        assert_eq!(scene.size().width, 800);
    }

    #[test]
    fn test_update_clamps_and_returns_inverse() {
        let mut scene = scene();
        let text = factory::create_text_element("Hi", scene.size());
        let id = text.id.clone();
        scene.push(text);

        let inverse = scene
            .update::<TextElement>(&id, &TextPatch::position(5000.0, 10.0))
            .unwrap();
        let moved = scene.find::<TextElement>(&id).unwrap();
        assert_eq!(moved.x, 750.0);
        assert_eq!(moved.y, 10.0);

        scene.update::<TextElement>(&id, &inverse);
        let restored = scene.find::<TextElement>(&id).unwrap();
        assert_eq!(restored.x, 80.0);
        assert_eq!(restored.y, 40.0);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut scene = scene();
        assert!(scene.update::<TextElement>("missing", &TextPatch::text("x")).is_none());
    }

    #[test]
    fn test_remove_and_insert_keeps_id() {
        let mut scene = scene();
        let a = factory::create_image_element("a.png", scene.size());
        let b = factory::create_image_element("b.png", scene.size());
        let a_id = a.id.clone();
        scene.push(a);
        scene.push(b);

        let (index, removed) = scene.remove::<ImageElement>(&a_id).unwrap();
        assert_eq!(index, 0);
        assert_eq!(scene.images().len(), 1);

        scene.insert_at(index, removed);
        assert_eq!(scene.images()[0].id, a_id);
    }

    #[test]
    fn test_icon_restore_two_step() {
        let mut scene = scene();
        scene.add_icon("circle");
        let mut icon = factory::create_icon_element("star", scene.size());
        icon.color = "#FF0000".into();
        icon.flip_x = true;
        let snapshot = icon.clone();
        scene.insert_at(0, icon);

        let (index, removed) = scene.remove::<IconElement>(&snapshot.id).unwrap();
        IconElement::restore(&mut scene, index, removed);
        assert_eq!(scene.icons()[0], snapshot);
        assert_eq!(scene.icons().len(), 2);
    }

    #[test]
    fn test_reorder() {
        let mut scene = scene();
        let ids: Vec<ElementId> = (0..3).map(|_| scene.add_icon("circle")).collect();
        assert_eq!(scene.reorder::<IconElement>(&ids[0], ZOrder::Front), Some(0));
        assert_eq!(scene.icons()[2].id, ids[0]);
        assert_eq!(scene.reorder::<IconElement>(&ids[0], ZOrder::Backward), Some(2));
        assert_eq!(scene.icons()[1].id, ids[0]);
        scene.reorder::<IconElement>(&ids[0], ZOrder::Back);
        assert_eq!(scene.icons()[0].id, ids[0]);
    }

    #[test]
    fn test_elements_at_point_topmost_first() {
        let mut scene = scene();
        let image = factory::create_image_element("a.png", scene.size());
        let image_id = image.id.clone();
        scene.push(image);
        let text = factory::create_text_element("Hi", scene.size());
        let text_id = text.id.clone();
        scene.push(text);

        let hits = scene.elements_at_point(Point::new(100.0, 50.0));
        let ids: Vec<&str> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec![text_id.as_str(), image_id.as_str()]);
        assert!(scene.elements_at_point(Point::new(799.0, 399.0)).is_empty());
    }

    #[test]
    fn test_background_json_forms() {
        let gradient: BackgroundOption = serde_json::from_str(
            r##"{"id":"g","name":"G","type":"gradient","gradientColors":["#000","#fff"],"gradientDirection":"135deg"}"##,
        )
        .unwrap();
        assert_eq!(
            gradient.kind,
            BackgroundKind::Gradient {
                gradient_colors: vec!["#000".into(), "#fff".into()],
                gradient_direction: 135.0,
            }
        );

        let pattern: BackgroundOption = serde_json::from_str(
            r##"{"id":"p","name":"P","type":"pattern","patternType":"zigzag","patternColors":["#111"]}"##,
        )
        .unwrap();
        assert!(matches!(
            pattern.kind,
            BackgroundKind::Fancy { pattern_type: PatternKind::Checkerboard, .. }
        ));

        let image: BackgroundOption =
            serde_json::from_str(r##"{"id":"i","name":"I","type":"image","value":"a.jpg"}"##).unwrap();
        assert_eq!(
            image.kind,
            BackgroundKind::Image { value: "a.jpg".into(), crop_x: 50.0, crop_y: 50.0, scale: 1.0 }
        );
    }

    #[test]
    fn test_scene_json_round_trip() {
        let mut scene = scene();
        scene.push(factory::create_text_element("Hi", scene.size()));
        scene.add_icon("heart");
        let json = scene.to_json().unwrap();
        let back = Scene::from_json(&json).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_parse_angle() {
        assert_eq!(parse_angle("45deg"), Some(45.0));
        assert_eq!(parse_angle(" 90 "), Some(90.0));
        assert_eq!(parse_angle("north"), None);
    }
}
