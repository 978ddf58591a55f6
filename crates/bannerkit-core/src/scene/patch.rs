//! Partial updates for elements.
//!
//! A patch names a subset of an element's fields. Unset fields are left
//! unchanged when the patch is applied.

use super::elements::{
    ColorType, FontSize, IconElement, ImageElement, Shadow, Stroke, TextAlign, TextElement,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A named-field partial update for an element type `T`.
pub trait Patch<T>: Clone + Debug + Default {
    /// Overwrite the fields set in this patch.
    fn apply_to(&self, target: &mut T);

    /// Patch that restores `before`.
    ///
    /// Covers every field this patch touches plus any field that differs between
    /// `before` and `after` (fields changed as a side effect, such as bounds clamping).
    fn inverse(&self, before: &T, after: &T) -> Self;

    /// Names of the fields set in this patch.
    fn touched_fields(&self) -> Vec<&'static str>;

    /// True if no field is set.
    fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }
}

macro_rules! element_patch {
    (
        $(#[$meta:meta])*
        $name:ident for $target:ty { $($field:ident : $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl Patch<$target> for $name {
            fn apply_to(&self, target: &mut $target) {
                $(
                    if let Some(value) = &self.$field {
                        target.$field = value.clone();
                    }
                )*
            }

            fn inverse(&self, before: &$target, after: &$target) -> Self {
                Self {
                    $(
                        $field: (self.$field.is_some() || before.$field != after.$field)
                            .then(|| before.$field.clone()),
                    )*
                }
            }

            fn touched_fields(&self) -> Vec<&'static str> {
                let mut fields = Vec::new();
                $(
                    if self.$field.is_some() {
                        fields.push(stringify!($field));
                    }
                )*
                fields
            }
        }
    };
}

element_patch! {
    /// Partial update for a [`TextElement`].
    TextPatch for TextElement {
        text: String,
        x: f64,
        y: f64,
        font_size: FontSize,
        font_family: String,
        font_weight: String,
        color: String,
        color_type: ColorType,
        gradient_colors: Vec<String>,
        gradient_direction: f64,
        text_align: TextAlign,
        letter_spacing: f64,
        line_height: f64,
        rotation: f64,
        opacity: f64,
        shadow: Shadow,
        stroke: Stroke,
    }
}

element_patch! {
    /// Partial update for an [`ImageElement`].
    ImagePatch for ImageElement {
        src: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        border_radius: f64,
        rotation: f64,
        opacity: f64,
    }
}

element_patch! {
    /// Partial update for an [`IconElement`].
    IconPatch for IconElement {
        icon_type: String,
        x: f64,
        y: f64,
        size: f64,
        rotation: f64,
        opacity: f64,
        color: String,
        color_type: ColorType,
        gradient_colors: Vec<String>,
        gradient_direction: f64,
        shadow: Shadow,
        flip_x: bool,
        flip_y: bool,
    }
}

impl TextPatch {
    /// Patch that only sets the text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Patch that only moves the anchor.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }
}

impl ImagePatch {
    /// Patch that only sets the source.
    pub fn src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }
}

impl IconPatch {
    /// Patch that only sets the catalog key.
    pub fn icon_type(icon_type: impl Into<String>) -> Self {
        Self {
            icon_type: Some(icon_type.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_text_element;
    use crate::scene::BannerSize;

    fn sample() -> TextElement {
        create_text_element("Hello", &BannerSize::new("s", "S", 800, 400, "Test"))
    }

    #[test]
    fn test_apply_leaves_unset_fields() {
        let mut text = sample();
        let before = text.clone();
        let patch = TextPatch {
            color: Some("#123456".into()),
            font_size: Some(FontSize::Huge),
            ..Default::default()
        };
        patch.apply_to(&mut text);
        assert_eq!(text.color, "#123456");
        assert_eq!(text.font_size, FontSize::Huge);
        assert_eq!(text.text, before.text);
        assert_eq!(text.x, before.x);
    }

    #[test]
    fn test_inverse_captures_touched_and_side_effects() {
        let mut text = sample();
        let before = text.clone();
        let patch = TextPatch::text("Changed");
        patch.apply_to(&mut text);
        text.x = 0.0;

        let inverse = patch.inverse(&before, &text);
        assert_eq!(inverse.text.as_deref(), Some("Hello"));
        assert_eq!(inverse.x, Some(before.x));
        assert!(inverse.y.is_none());
        assert!(inverse.color.is_none());

        inverse.apply_to(&mut text);
        assert_eq!(text, before);
    }

    #[test]
    fn test_touched_fields() {
        let patch = TextPatch {
            color: Some("#fff".into()),
            rotation: Some(10.0),
            ..Default::default()
        };
        assert_eq!(patch.touched_fields(), vec!["color", "rotation"]);
        assert!(TextPatch::default().is_empty());
    }
}
