//! Read-only reference data: sizes, background presets, icons, fonts and stock images.
//!
//! The only entry ever mutated is the custom size slot.

use crate::scene::{BackgroundKind, BackgroundOption, BannerSize, PatternKind};
use serde::{Deserialize, Serialize};

/// Id of the mutable custom size slot.
pub const CUSTOM_SIZE_ID: &str = "custom-size";

/// An icon catalog entry.
///
/// `glyph` is either a vector shape keyword (such as `"circle"` or `"arrow-right"`)
/// or a symbol drawn as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub glyph: String,
}

/// All catalogs consumed by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogs {
    pub sizes: Vec<BannerSize>,
    pub backgrounds: Vec<BackgroundOption>,
    pub icons: Vec<IconDefinition>,
    pub fonts: Vec<String>,
    /// Background photos offered by the randomizer.
    pub stock_images: Vec<String>,
    /// Small photos used as decorative image elements.
    pub decorative_images: Vec<String>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalogs {
    /// The catalogs shipped with the editor.
    pub fn builtin() -> Self {
        Self {
            sizes: builtin_sizes(),
            backgrounds: builtin_backgrounds(),
            icons: builtin_icons(),
            fonts: BUILTIN_FONTS.iter().map(|f| f.to_string()).collect(),
            stock_images: STOCK_PHOTOS
                .iter()
                .map(|id| format!("{UNSPLASH_BASE}{id}?w=1200&h=800&fit=crop"))
                .collect(),
            decorative_images: DECORATIVE_PHOTOS
                .iter()
                .map(|id| format!("{UNSPLASH_BASE}{id}?w=150&h=150&fit=crop"))
                .collect(),
        }
    }

    /// Load catalogs from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn size(&self, id: &str) -> Option<&BannerSize> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundOption> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    pub fn icon(&self, id: &str) -> Option<&IconDefinition> {
        self.icons.iter().find(|i| i.id == id)
    }

    /// Background presets of the fancy kind.
    pub fn fancy_backgrounds(&self) -> impl Iterator<Item = &BackgroundOption> {
        self.backgrounds
            .iter()
            .filter(|b| matches!(b.kind, BackgroundKind::Fancy { .. }))
    }

    /// Update the custom size slot in place and return the new entry.
    ///
    /// The slot is created if the catalog has none.
    pub fn set_custom_dimensions(&mut self, width: u32, height: u32) -> BannerSize {
        let custom = BannerSize::new(
            CUSTOM_SIZE_ID,
            format!("Custom ({}×{})", width.max(1), height.max(1)),
            width,
            height,
            "Custom",
        );
        match self.sizes.iter_mut().find(|s| s.id == CUSTOM_SIZE_ID) {
            Some(slot) => *slot = custom.clone(),
            None => self.sizes.push(custom.clone()),
        }
        custom
    }

    /// True if `src` is one of the stock photos, ignoring query parameters.
    pub fn is_stock_image(&self, src: &str) -> bool {
        let base = strip_query(src);
        self.stock_images
            .iter()
            .chain(self.decorative_images.iter())
            .any(|stock| strip_query(stock) == base)
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

const UNSPLASH_BASE: &str = "https://images.unsplash.com/";

const STOCK_PHOTOS: [&str; 10] = [
    "photo-1549692520-acc6669e2f0c",
    "photo-1493612276216-ee3925520721",
    "photo-1522202176988-66273c2fd55f",
    "photo-1579546929518-9e396f3cc809",
    "photo-1517077304055-6e89abbf09b0",
    "photo-1551698618-1dfe5d97d256",
    "photo-1516321318423-f06f85e504b3",
    "photo-1586953208448-b95a79798f07",
    "photo-1506905925346-21bda4d32df4",
    "photo-1528543606781-2f6e6857f318",
];

const DECORATIVE_PHOTOS: [&str; 3] = [
    "photo-1506905925346-21bda4d32df4",
    "photo-1517077304055-6e89abbf09b0",
    "photo-1579546929518-9e396f3cc809",
];

const BUILTIN_FONTS: [&str; 12] = [
    "Inter",
    "Space Grotesk",
    "system-ui",
    "Roboto",
    "Open Sans",
    "Montserrat",
    "Poppins",
    "Lato",
    "Playfair Display",
    "Merriweather",
    "Oswald",
    "Raleway",
];

fn builtin_sizes() -> Vec<BannerSize> {
    [
        ("twitter-header", "Twitter Header", 1500, 500, "Social Media"),
        ("facebook-cover", "Facebook Cover", 1640, 859, "Social Media"),
        ("linkedin-banner", "LinkedIn Banner", 1584, 396, "Social Media"),
        ("youtube-channel", "YouTube Channel Art", 2560, 1440, "Social Media"),
        ("instagram-post", "Instagram Post", 1080, 1080, "Social Media"),
        ("instagram-story", "Instagram Story", 1080, 1920, "Social Media"),
        ("web-banner", "Web Banner", 1200, 300, "Web & Digital"),
        ("email-header", "Email Header", 600, 200, "Web & Digital"),
        ("blog-header", "Blog Header", 1200, 400, "Web & Digital"),
        ("flyer-horizontal", "Flyer (Horizontal)", 1920, 1080, "Print"),
        ("poster-vertical", "Poster (Vertical)", 1080, 1920, "Print"),
        ("square-large", "Square Large", 1200, 1200, "Custom"),
        ("wide-banner", "Wide Banner", 1920, 600, "Custom"),
        (CUSTOM_SIZE_ID, "Custom Size", 1200, 600, "Custom"),
    ]
    .into_iter()
    .map(|(id, name, w, h, category)| BannerSize::new(id, name, w, h, category))
    .collect()
}

fn colors(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

fn gradient(id: &str, name: &str, direction: f64, stops: &[&str]) -> BackgroundOption {
    BackgroundOption::new(
        id,
        name,
        BackgroundKind::Gradient {
            gradient_colors: colors(stops),
            gradient_direction: direction,
        },
    )
}

fn fancy(id: &str, name: &str, pattern: PatternKind, stops: &[&str]) -> BackgroundOption {
    BackgroundOption::new(
        id,
        name,
        BackgroundKind::Fancy {
            pattern_type: pattern,
            pattern_colors: colors(stops),
        },
    )
}

fn builtin_backgrounds() -> Vec<BackgroundOption> {
    vec![
        BackgroundOption::solid("solid-white", "Pure White", "#FFFFFF"),
        BackgroundOption::solid("solid-black", "Deep Black", "#000000"),
        BackgroundOption::solid("solid-blue", "Professional Blue", "#3B82F6"),
        BackgroundOption::solid("solid-purple", "Royal Purple", "#8B5CF6"),
        BackgroundOption::solid("solid-green", "Fresh Green", "#10B981"),
        BackgroundOption::solid("solid-orange", "Vibrant Orange", "#F59E0B"),
        BackgroundOption::solid("solid-pink", "Modern Pink", "#EC4899"),
        BackgroundOption::solid("solid-gray", "Elegant Gray", "#6B7280"),
        gradient("gradient-blue", "Ocean Blue", 45.0, &["#3B82F6", "#1E40AF"]),
        gradient("gradient-purple", "Purple Dream", 135.0, &["#8B5CF6", "#5B21B6"]),
        gradient("gradient-sunset", "Sunset Glow", 90.0, &["#F59E0B", "#EF4444", "#EC4899"]),
        gradient("gradient-green", "Forest Fresh", 180.0, &["#10B981", "#059669"]),
        gradient("gradient-cosmic", "Cosmic Space", 45.0, &["#1E1B4B", "#7C3AED", "#EC4899"]),
        gradient("gradient-dawn", "Early Dawn", 0.0, &["#FEF3C7", "#F59E0B", "#D97706"]),
        gradient("gradient-ocean", "Deep Ocean", 135.0, &["#0EA5E9", "#0284C7", "#0369A1"]),
        gradient("gradient-neon", "Neon Lights", 90.0, &["#06B6D4", "#8B5CF6", "#EC4899"]),
        fancy("fancy-dots", "Polka Dots", PatternKind::Dots, &["#3B82F6", "#FFFFFF"]),
        fancy("fancy-grid", "Grid Lines", PatternKind::Grid, &["#F3F4F6", "#6B7280"]),
        fancy("fancy-diagonal", "Diagonal Stripes", PatternKind::Diagonal, &["#8B5CF6", "#A78BFA"]),
        fancy("fancy-hexagon", "Hexagon Pattern", PatternKind::Hexagon, &["#10B981", "#34D399"]),
        fancy("fancy-waves", "Wave Pattern", PatternKind::Waves, &["#0EA5E9", "#38BDF8"]),
        fancy(
            "fancy-triangles",
            "Triangle Mosaic",
            PatternKind::Triangles,
            &["#F59E0B", "#FBBF24", "#FDE047"],
        ),
        fancy("fancy-circles", "Overlapping Circles", PatternKind::Circles, &["#EC4899", "#F472B6"]),
        fancy("fancy-chevron", "Chevron Pattern", PatternKind::Chevron, &["#7C3AED", "#A855F7"]),
        fancy("fancy-stars", "Starfield", PatternKind::Stars, &["#1E1B4B", "#FBBF24"]),
        fancy(
            "fancy-noise",
            "Digital Noise",
            PatternKind::Noise,
            &["#374151", "#6B7280", "#9CA3AF"],
        ),
        fancy(
            "fancy-bubbles",
            "Bubble Pattern",
            PatternKind::Bubbles,
            &["#06B6D4", "#67E8F9", "#CFFAFE"],
        ),
        fancy("fancy-circuit", "Circuit Board", PatternKind::Circuit, &["#065F46", "#10B981"]),
    ]
}

fn builtin_icons() -> Vec<IconDefinition> {
    const ICONS: &[(&str, &str, &str, &str)] = &[
        ("circle", "Circle", "Basic Shapes", "circle"),
        ("square", "Square", "Basic Shapes", "square"),
        ("triangle", "Triangle", "Basic Shapes", "triangle"),
        ("diamond", "Diamond", "Basic Shapes", "diamond"),
        ("hexagon", "Hexagon", "Basic Shapes", "hexagon"),
        ("pentagon", "Pentagon", "Basic Shapes", "pentagon"),
        ("star", "Star", "Basic Shapes", "star"),
        ("heart", "Heart", "Basic Shapes", "heart"),
        ("arrow-right", "Arrow Right", "Arrows", "arrow-right"),
        ("arrow-left", "Arrow Left", "Arrows", "arrow-left"),
        ("arrow-up", "Arrow Up", "Arrows", "arrow-up"),
        ("arrow-down", "Arrow Down", "Arrows", "arrow-down"),
        ("arrow-up-right", "Arrow Up Right", "Arrows", "↗"),
        ("arrow-down-right", "Arrow Down Right", "Arrows", "↘"),
        ("arrow-down-left", "Arrow Down Left", "Arrows", "↙"),
        ("arrow-up-left", "Arrow Up Left", "Arrows", "↖"),
        ("plus", "Plus", "Symbols", "plus"),
        ("cross", "Cross", "Symbols", "cross"),
        ("check", "Check", "Symbols", "check"),
        ("minus", "Minus", "Symbols", "−"),
        ("equals", "Equals", "Symbols", "="),
        ("question", "Question", "Symbols", "?"),
        ("exclamation", "Exclamation", "Symbols", "!"),
        ("info", "Info", "Symbols", "ℹ"),
        ("warning", "Warning", "Symbols", "⚠"),
        ("number-1", "Number 1", "Numbers", "1"),
        ("number-2", "Number 2", "Numbers", "2"),
        ("number-3", "Number 3", "Numbers", "3"),
        ("letter-a", "Letter A", "Letters", "A"),
        ("letter-b", "Letter B", "Letters", "B"),
        ("twitter", "Twitter", "Social", "🐦"),
        ("instagram", "Instagram", "Social", "📷"),
        ("youtube", "YouTube", "Social", "📺"),
        ("computer", "Computer", "Technology", "💻"),
        ("mobile", "Mobile", "Technology", "📱"),
        ("headphones", "Headphones", "Technology", "🎧"),
        ("money-bag", "Money Bag", "Business", "💰"),
        ("chart-up", "Chart Up", "Business", "📈"),
        ("trophy", "Trophy", "Business", "🏆"),
        ("target", "Target", "Business", "🎯"),
        ("key", "Key", "Business", "🔑"),
        ("lock", "Lock", "Business", "🔒"),
        ("sun", "Sun", "Nature", "☀"),
        ("moon", "Moon", "Nature", "☾"),
        ("sparkle", "Sparkle", "Decorative", "✦"),
        ("music", "Music", "Decorative", "♪"),
    ];

    ICONS
        .iter()
        .map(|(id, name, category, glyph)| IconDefinition {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            glyph: glyph.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let catalogs = Catalogs::builtin();
        assert_eq!(catalogs.sizes.len(), 14);
        let twitter = catalogs.size("twitter-header").unwrap();
        assert_eq!((twitter.width, twitter.height), (1500, 500));
        let custom = catalogs.size(CUSTOM_SIZE_ID).unwrap();
        assert_eq!((custom.width, custom.height), (1200, 600));
    }

    #[test]
    fn test_set_custom_dimensions_updates_in_place() {
        let mut catalogs = Catalogs::builtin();
        let custom = catalogs.set_custom_dimensions(640, 320);
        assert_eq!(custom.name, "Custom (640×320)");
        assert_eq!(catalogs.sizes.len(), 14);
        assert_eq!(catalogs.size(CUSTOM_SIZE_ID), Some(&custom));
        assert_eq!(catalogs.sizes.last(), Some(&custom));
    }

    #[test]
    fn test_background_presets() {
        let catalogs = Catalogs::builtin();
        assert_eq!(catalogs.fancy_backgrounds().count(), 12);
        let sunset = catalogs.background("gradient-sunset").unwrap();
        assert!(matches!(
            &sunset.kind,
            BackgroundKind::Gradient { gradient_colors, gradient_direction }
                if gradient_colors.len() == 3 && *gradient_direction == 90.0
        ));
    }

    #[test]
    fn test_stock_image_detection_ignores_query() {
        let catalogs = Catalogs::builtin();
        assert!(catalogs.is_stock_image(
            "https://images.unsplash.com/photo-1549692520-acc6669e2f0c?w=300"
        ));
        assert!(!catalogs.is_stock_image("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalogs = Catalogs::builtin();
        let json = serde_json::to_string(&catalogs).unwrap();
        assert_eq!(Catalogs::from_json(&json).unwrap(), catalogs);
    }
}
