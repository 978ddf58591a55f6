//! Element factory: the only place new element ids are minted.

use crate::bounds::HasPosition;
use crate::scene::{
    BannerSize, ColorType, ElementId, ElementKind, FontSize, IconElement, ImageElement,
    SceneElement, Shadow, Stroke, TextAlign, TextElement,
};
use kurbo::Vec2;
use uuid::Uuid;

/// Default image box edge.
pub const DEFAULT_IMAGE_SIZE: f64 = 300.0;

/// Default icon edge.
pub const DEFAULT_ICON_SIZE: f64 = 64.0;

/// Offset applied to duplicated elements.
pub const DEFAULT_DUPLICATE_OFFSET: f64 = 20.0;

/// Generate a session-unique element id with a kind prefix.
pub fn generate_id(kind: ElementKind) -> ElementId {
    format!("{}-{}", kind.id_prefix(), Uuid::new_v4().simple())
}

/// Anchor at 10% of the banner width and height.
fn default_anchor(size: &BannerSize) -> (f64, f64) {
    (size.width_f64() * 0.1, size.height_f64() * 0.1)
}

/// Create a text element with default styling.
pub fn create_text_element(text: &str, size: &BannerSize) -> TextElement {
    let (x, y) = default_anchor(size);
    TextElement {
        id: generate_id(ElementKind::Text),
        text: text.to_string(),
        x,
        y,
        font_size: FontSize::Medium,
        font_family: "Inter".to_string(),
        font_weight: "600".to_string(),
        color: "#FFFFFF".to_string(),
        color_type: ColorType::Solid,
        gradient_colors: vec!["#3B82F6".to_string(), "#1E40AF".to_string()],
        gradient_direction: 45.0,
        text_align: TextAlign::Left,
        letter_spacing: 0.0,
        line_height: 1.2,
        rotation: 0.0,
        opacity: 1.0,
        shadow: Shadow::default(),
        stroke: Stroke::default(),
    }
}

/// Create a 300x300 image element.
pub fn create_image_element(src: &str, size: &BannerSize) -> ImageElement {
    let (x, y) = default_anchor(size);
    ImageElement {
        id: generate_id(ElementKind::Image),
        src: src.to_string(),
        x,
        y,
        width: DEFAULT_IMAGE_SIZE,
        height: DEFAULT_IMAGE_SIZE,
        border_radius: 0.0,
        rotation: 0.0,
        opacity: 1.0,
    }
}

/// Create a 64px icon element.
pub fn create_icon_element(icon_type: &str, size: &BannerSize) -> IconElement {
    let (x, y) = default_anchor(size);
    IconElement {
        id: generate_id(ElementKind::Icon),
        icon_type: icon_type.to_string(),
        x,
        y,
        size: DEFAULT_ICON_SIZE,
        rotation: 0.0,
        opacity: 1.0,
        color: "#FFFFFF".to_string(),
        color_type: ColorType::Solid,
        gradient_colors: vec!["#3B82F6".to_string(), "#1E40AF".to_string()],
        gradient_direction: 45.0,
        shadow: Shadow::default(),
        flip_x: false,
        flip_y: false,
    }
}

/// Copy an element with a fresh id, shifted by `offset`.
pub fn clone_element<E: SceneElement>(element: &E, offset: Vec2) -> E {
    let mut copy = element.clone();
    copy.set_id(generate_id(E::KIND));
    copy.set_position(element.position() + offset);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn size() -> BannerSize {
        BannerSize::new("test", "Test", 1500, 500, "Test")
    }

    #[test]
    fn test_text_defaults() {
        let text = create_text_element("Hello", &size());
        assert_eq!((text.x, text.y), (150.0, 50.0));
        assert_eq!(text.font_size, FontSize::Medium);
        assert_eq!(text.color, "#FFFFFF");
        assert_eq!(text.text_align, TextAlign::Left);
        assert!(!text.shadow.enabled);
        assert!(!text.stroke.enabled);
        assert!(text.id.starts_with("text-"));
    }

    #[test]
    fn test_image_and_icon_defaults() {
        let image = create_image_element("a.png", &size());
        assert_eq!((image.width, image.height), (300.0, 300.0));
        assert_eq!(image.border_radius, 0.0);

        let icon = create_icon_element("star", &size());
        assert_eq!(icon.size, 64.0);
        assert_eq!(icon.color_type, ColorType::Solid);
        assert!(!icon.flip_x && !icon.flip_y);
        assert!(!icon.shadow.enabled);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<ElementId> = (0..1000).map(|_| generate_id(ElementKind::Icon)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_clone_element() {
        let icon = create_icon_element("star", &size());
        let copy = clone_element(&icon, Vec2::new(20.0, 20.0));
        assert_ne!(copy.id, icon.id);
        assert_eq!(copy.x, icon.x + 20.0);
        assert_eq!(copy.y, icon.y + 20.0);
        assert_eq!(copy.icon_type, icon.icon_type);
    }
}
