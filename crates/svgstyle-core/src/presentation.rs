use rustc_hash::FxHashSet;
use std::sync::{Arc, OnceLock};

/// SVG presentation attributes: properties that may be written either in `style` or as
/// attributes with the same name.
pub const SVG_PRESENTATION_ATTRIBUTES: &[&str] = &[
    "alignment-baseline",
    "baseline-shift",
    "buffered-rendering",
    "clip",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "display",
    "dominant-baseline",
    "enable-background",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "kerning",
    "letter-spacing",
    "lighting-color",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "opacity",
    "overflow",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "solid-color",
    "solid-opacity",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-overflow",
    "text-rendering",
    "unicode-bidi",
    "vector-effect",
    "viewport-fill",
    "viewport-fill-opacity",
    "visibility",
    "white-space",
    "word-spacing",
    "writing-mode",
];

/// Immutable set of property names eligible for promotion. Keys are lower-case and lookups
/// are case-sensitive; callers lower-case property names first.
///
/// Cloning is cheap (the table is shared).
#[derive(Debug, Clone)]
pub struct PresentationAttributeSet {
    names: Arc<FxHashSet<Box<str>>>,
}

impl PresentationAttributeSet {
    /// The default SVG table.
    pub fn svg() -> &'static Self {
        static SVG: OnceLock<PresentationAttributeSet> = OnceLock::new();
        SVG.get_or_init(|| Self::from_names(SVG_PRESENTATION_ATTRIBUTES.iter().copied()))
    }

    /// Builds a custom table. Names are lower-cased on the way in.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().to_ascii_lowercase().into_boxed_str())
            .collect();
        Self {
            names: Arc::new(names),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
