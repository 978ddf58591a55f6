//! Procedural layout engine.
//!
//! Builds a plausible design for the current size: a harmonious palette, a
//! background synthesized from it, a layout template and text/icon placement.
//! User-authored text and images are restyled or kept rather than replaced.

use crate::bounds;
use crate::catalog::Catalogs;
use crate::color::{
    are_colors_similar, generate_contrasting_text_colors, generate_harmonious_colors,
    hsl_string_to_hex,
};
use crate::factory;
use crate::scene::{
    BackgroundKind, BackgroundOption, ColorType, FontSize, IconElement, Scene, Shadow, Stroke,
    TextAlign, TextElement, TextPatch,
};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Phrases used when no user text is preserved.
pub const PLACEHOLDER_PHRASES: [&str; 5] = [
    "Your Brand Here",
    "Create Amazing",
    "Get Started Today",
    "Join Us Now",
    "Limited Time",
];

const FONT_WEIGHTS: [&str; 4] = ["500", "600", "700", "800"];

/// Tiers used when restyling preserved text.
const RESTYLE_SIZES: [FontSize; 4] = [
    FontSize::Large,
    FontSize::Xlarge,
    FontSize::Xxlarge,
    FontSize::Huge,
];

/// Smallest tier the randomizer ever assigns.
pub const MIN_FONT_SIZE: FontSize = FontSize::Large;

/// Layout templates deciding where text and icons go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTemplate {
    Minimal,
    Balanced,
    Dynamic,
    Centered,
    CornerFocused,
}

impl LayoutTemplate {
    pub const ALL: [LayoutTemplate; 5] = [
        LayoutTemplate::Minimal,
        LayoutTemplate::Balanced,
        LayoutTemplate::Dynamic,
        LayoutTemplate::Centered,
        LayoutTemplate::CornerFocused,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutTemplate::Minimal => "minimal",
            LayoutTemplate::Balanced => "balanced",
            LayoutTemplate::Dynamic => "dynamic",
            LayoutTemplate::Centered => "centered",
            LayoutTemplate::CornerFocused => "corner-focused",
        }
    }

    /// Text anchor and alignment for a `width x height` banner.
    fn text_anchor<R: Rng + ?Sized>(self, width: f64, height: f64, rng: &mut R) -> (f64, f64, TextAlign) {
        match self {
            LayoutTemplate::Centered => (width / 2.0, height / 2.0 - 30.0, TextAlign::Center),
            LayoutTemplate::CornerFocused => (60.0, 60.0, TextAlign::Left),
            LayoutTemplate::Minimal => (width * 0.1, height * 0.3, TextAlign::Left),
            LayoutTemplate::Dynamic => {
                let jitter = rng.random_range(-50.0..50.0);
                let align = if rng.random_bool(0.5) { TextAlign::Left } else { TextAlign::Center };
                (width * 0.2, height * 0.4 + jitter, align)
            }
            LayoutTemplate::Balanced => (width * 0.15, height * 0.35, TextAlign::Left),
        }
    }

    /// Candidate icon positions.
    fn icon_slots(self, width: f64, height: f64) -> Vec<(f64, f64)> {
        match self {
            LayoutTemplate::CornerFocused => vec![
                (width - 120.0, 50.0),
                (width - 120.0, height - 120.0),
                (50.0, height - 120.0),
            ],
            LayoutTemplate::Centered => vec![
                (width * 0.15, height * 0.15),
                (width * 0.75, height * 0.15),
                (width * 0.75, height * 0.75),
            ],
            LayoutTemplate::Minimal => vec![(width * 0.8, height * 0.2)],
            LayoutTemplate::Balanced | LayoutTemplate::Dynamic => vec![
                (50.0, 50.0),
                (width - 120.0, 50.0),
                (width - 120.0, height - 120.0),
                (width / 2.0 - 50.0, height * 0.8),
            ],
        }
    }

    fn max_icons(self) -> usize {
        match self {
            LayoutTemplate::Minimal => 1,
            _ => 2,
        }
    }
}

/// What a randomize pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomizeReport {
    pub template: LayoutTemplate,
    pub background_type: &'static str,
    pub preserved_text: bool,
    pub preserved_images: bool,
    pub text_count: usize,
    pub icon_count: usize,
    pub decorative_image: bool,
}

/// True if any text element looks authored by the user.
pub fn has_user_text(scene: &Scene, placeholder: &str) -> bool {
    let texts = scene.text_elements();
    texts.len() > 1
        || texts
            .iter()
            .any(|t| !t.text.trim().is_empty() && t.text != placeholder)
}

/// True if any image element is not a stock photo.
pub fn has_user_images(scene: &Scene, catalogs: &Catalogs) -> bool {
    scene
        .images()
        .iter()
        .any(|image| !catalogs.is_stock_image(&image.src))
}

/// Font tiers for new text, by `min(width / 800, height / 400)`.
pub fn font_sizes_for_scale(scale: f64) -> &'static [FontSize] {
    if scale > 2.0 {
        &[FontSize::Huge, FontSize::Massive, FontSize::Giant]
    } else if scale > 1.5 {
        &[FontSize::Xlarge, FontSize::Xxlarge, FontSize::Huge, FontSize::Massive]
    } else if scale > 1.0 {
        &[FontSize::Large, FontSize::Xlarge, FontSize::Xxlarge]
    } else {
        &[FontSize::Large, FontSize::Xlarge]
    }
}

fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], fallback: &'a T, rng: &mut R) -> &'a T {
    items.choose(rng).unwrap_or(fallback)
}

fn pick_string<R: Rng + ?Sized>(items: &[String], fallback: &str, rng: &mut R) -> String {
    items
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// Replace the scene's design, keeping user-authored content.
pub fn randomize<R: Rng + ?Sized>(
    scene: &mut Scene,
    catalogs: &Catalogs,
    placeholder: &str,
    rng: &mut R,
) -> RandomizeReport {
    let preserve_text = has_user_text(scene, placeholder);
    let preserve_images = has_user_images(scene, catalogs);

    let palette: Vec<String> = generate_harmonious_colors(rng)
        .iter()
        .map(|hsl| hsl_string_to_hex(hsl))
        .collect();
    let text_colors = generate_contrasting_text_colors(&palette, rng);

    let background = synthesize_background(&palette, catalogs, rng);
    let background_type = background.kind.type_name();
    scene.set_background(background);

    let template = *pick(&LayoutTemplate::ALL, &LayoutTemplate::Balanced, rng);
    let width = scene.size().width_f64();
    let height = scene.size().height_f64();
    let scale = (width / 800.0).min(height / 400.0);
    let (anchor_x, anchor_y, align) = template.text_anchor(width, height, rng);

    let fonts = &catalogs.fonts;
    let text_count = if preserve_text {
        let ids: Vec<String> = scene.text_elements().iter().map(|t| t.id.clone()).collect();
        for (i, id) in ids.iter().enumerate() {
            let offset = i as f64 * 80.0;
            let patch = TextPatch {
                color: Some(pick_string(&text_colors, "#FFFFFF", rng)),
                color_type: Some(ColorType::Solid),
                font_size: Some(*pick(&RESTYLE_SIZES, &MIN_FONT_SIZE, rng)),
                font_family: Some(pick_string(fonts, "Inter", rng)),
                font_weight: Some(pick(&FONT_WEIGHTS, &"600", rng).to_string()),
                text_align: Some(align),
                x: Some(clamp_text_x(anchor_x + rng.random_range(-20.0..20.0), width)),
                y: Some(clamp_text_y(anchor_y + offset, height)),
                ..Default::default()
            };
            scene.update::<TextElement>(id, &patch);
        }
        ids.len()
    } else {
        scene.text_elements_mut().clear();
        let count = rng.random_range(1..=3);
        let sizes = font_sizes_for_scale(scale);
        let phrases: Vec<&str> = PLACEHOLDER_PHRASES.choose_multiple(rng, count).copied().collect();
        let mut y = anchor_y;
        for phrase in phrases {
            let text = synthesize_text(
                scene, phrase, sizes, &text_colors, fonts, template, (anchor_x, y, align), rng,
            );
            y += text.font_size.px() * 1.3;
            scene.push(text);
        }
        count
    };

    if !preserve_images {
        scene.images_mut().clear();
    }

    scene.icons_mut().clear();
    let icon_count = rng.random_range(0..=template.max_icons());
    let slots = template.icon_slots(width, height);
    let chosen: Vec<(f64, f64)> = slots.choose_multiple(rng, icon_count).copied().collect();
    for (x, y) in &chosen {
        let icon = synthesize_icon(scene, catalogs, &text_colors, template, (*x, *y), scale, rng);
        scene.push(icon);
    }

    let mut decorative_image = false;
    if template == LayoutTemplate::Dynamic && rng.random_bool(0.3) {
        if let Some(src) = catalogs.decorative_images.choose(rng) {
            let mut image = factory::create_image_element(src, scene.size());
            let edge = (rng.random_range(60.0..140.0) * scale).round();
            image.width = edge;
            image.height = edge;
            image.x = rng.random_range(0.0..width.max(1.0));
            image.y = rng.random_range(0.0..height.max(1.0));
            image.border_radius = rng.random_range(0.0..50.0_f64).round();
            image.opacity = rng.random_range(0.7..1.0);
            bounds::validate_element_bounds(&mut image, scene.size());
            scene.push(image);
            decorative_image = true;
        }
    }

    RandomizeReport {
        template,
        background_type,
        preserved_text: preserve_text,
        preserved_images: preserve_images,
        text_count,
        icon_count: chosen.len(),
        decorative_image,
    }
}

fn clamp_text_x(x: f64, width: f64) -> f64 {
    40.0_f64.max(x.min(width - 300.0))
}

fn clamp_text_y(y: f64, height: f64) -> f64 {
    40.0_f64.max(y.min(height - 80.0))
}

fn synthesize_background<R: Rng + ?Sized>(
    palette: &[String],
    catalogs: &Catalogs,
    rng: &mut R,
) -> BackgroundOption {
    let first = palette.first().cloned().unwrap_or_else(|| "#3B82F6".to_string());
    match rng.random_range(0..4) {
        0 => BackgroundOption::solid("random-solid", "Random Solid", first),
        1 => random_gradient(palette, rng),
        2 => {
            let presets: Vec<&BackgroundOption> = catalogs.fancy_backgrounds().collect();
            match presets.choose(rng) {
                Some(preset) => {
                    let mut background = (*preset).clone();
                    if let BackgroundKind::Fancy { pattern_colors, .. } = &mut background.kind {
                        let count = pattern_colors.len().clamp(2, palette.len().max(2));
                        *pattern_colors = palette.iter().take(count).cloned().collect();
                    }
                    background.id = format!("random-{}", background.id);
                    background
                }
                None => random_gradient(palette, rng),
            }
        }
        _ => match catalogs.stock_images.choose(rng) {
            Some(src) => BackgroundOption::new(
                "random-image",
                "Random Image",
                BackgroundKind::Image {
                    value: src.clone(),
                    crop_x: 50.0,
                    crop_y: rng.random_range(20..=80) as f64,
                    scale: 1.0,
                },
            ),
            None => BackgroundOption::solid("random-solid", "Random Solid", first),
        },
    }
}

fn random_gradient<R: Rng + ?Sized>(palette: &[String], rng: &mut R) -> BackgroundOption {
    let count = rng.random_range(2..=3).min(palette.len());
    let mut colors: Vec<String> = palette.iter().take(count).cloned().collect();
    while colors.len() < 2 {
        colors.push("#1E40AF".to_string());
    }
    BackgroundOption::new(
        "random-gradient",
        "Random Gradient",
        BackgroundKind::Gradient {
            gradient_colors: colors,
            gradient_direction: 45.0 * rng.random_range(0..8) as f64,
        },
    )
}

#[allow(clippy::too_many_arguments)]
fn synthesize_text<R: Rng + ?Sized>(
    scene: &Scene,
    phrase: &str,
    sizes: &[FontSize],
    text_colors: &[String],
    fonts: &[String],
    template: LayoutTemplate,
    (x, y, align): (f64, f64, TextAlign),
    rng: &mut R,
) -> TextElement {
    let size = scene.size();
    let mut text = factory::create_text_element(phrase, size);
    let primary = pick_string(text_colors, "#FFFFFF", rng);
    let mut secondary = pick_string(text_colors, "#000000", rng);
    if are_colors_similar(&primary, &secondary, 30.0) {
        if let Some(other) = text_colors
            .iter()
            .find(|c| !are_colors_similar(c, &primary, 30.0))
        {
            secondary = other.clone();
        }
    }

    text.font_size = (*pick(sizes, &MIN_FONT_SIZE, rng)).max(MIN_FONT_SIZE);
    text.x = clamp_text_x(x, size.width_f64());
    text.y = clamp_text_y(y, size.height_f64());
    text.text_align = align;
    text.color = primary.clone();
    if rng.random_bool(0.7) {
        text.color_type = ColorType::Gradient;
        text.gradient_colors = vec![primary, secondary];
    }
    text.gradient_direction = rng.random_range(0.0..360.0);
    text.font_family = pick_string(fonts, "Inter", rng);
    text.font_weight = pick(&FONT_WEIGHTS, &"600", rng).to_string();
    text.letter_spacing = if rng.random_bool(0.3) { rng.random_range(0.0..2.0) } else { 0.0 };
    text.line_height = rng.random_range(1.1..1.4);
    text.rotation = if template == LayoutTemplate::Dynamic && rng.random_bool(0.2) {
        rng.random_range(-7.5..7.5)
    } else {
        0.0
    };
    text.opacity = rng.random_range(0.95..=1.0);
    text.shadow = Shadow {
        enabled: rng.random_bool(0.6),
        color: "rgba(0, 0, 0, 0.4)".to_string(),
        blur: rng.random_range(4.0..12.0_f64).round(),
        offset_x: rng.random_range(1.0..4.0_f64).round(),
        offset_y: rng.random_range(2.0..6.0_f64).round(),
    };
    if rng.random_bool(0.15) {
        text.stroke = Stroke {
            enabled: true,
            color: outline_color(&text.color).to_string(),
            width: (rng.random_range(1.0..2.5_f64) * 10.0).round() / 10.0,
        };
    }
    bounds::validate_element_bounds(&mut text, size);
    text
}

/// Stroke color for text filled with `fill`: black around white, white otherwise.
fn outline_color(fill: &str) -> &'static str {
    if fill.eq_ignore_ascii_case("#FFFFFF") { "#000000" } else { "#FFFFFF" }
}

fn synthesize_icon<R: Rng + ?Sized>(
    scene: &Scene,
    catalogs: &Catalogs,
    text_colors: &[String],
    template: LayoutTemplate,
    (x, y): (f64, f64),
    scale: f64,
    rng: &mut R,
) -> IconElement {
    let icon_type = catalogs
        .icons
        .choose(rng)
        .map(|def| def.id.as_str())
        .unwrap_or("star");
    let mut icon = factory::create_icon_element(icon_type, scene.size());
    let base = 60.0_f64.max(80.0 * scale);
    icon.size = 60.0_f64.max(base + rng.random_range(-10.0..20.0)).round();
    icon.x = x.round();
    icon.y = y.round();
    let primary = pick_string(text_colors, "#FFFFFF", rng);
    let secondary = pick_string(text_colors, "#000000", rng);
    icon.color = primary.clone();
    if rng.random_bool(0.6) {
        icon.color_type = ColorType::Gradient;
        icon.gradient_colors = vec![primary, secondary];
    }
    icon.gradient_direction = rng.random_range(0.0..360.0_f64).round();
    icon.rotation = if template == LayoutTemplate::Dynamic && rng.random_bool(0.3) {
        rng.random_range(0.0..360.0_f64).round()
    } else {
        0.0
    };
    icon.opacity = rng.random_range(0.8..=1.0);
    icon.shadow = Shadow {
        enabled: rng.random_bool(0.5),
        color: "rgba(0, 0, 0, 0.2)".to_string(),
        blur: rng.random_range(3.0..8.0_f64).round(),
        offset_x: rng.random_range(-1.5..1.5_f64).round(),
        offset_y: rng.random_range(-1.5..1.5_f64).round(),
    };
    icon.flip_x = rng.random_bool(0.08);
    icon.flip_y = rng.random_bool(0.08);
    bounds::validate_element_bounds(&mut icon, scene.size());
    icon
}
