#![forbid(unsafe_code)]

//! Inline style grammar + style-to-attribute promotion (headless).
//!
//! Design goals:
//! - split `style="..."` declaration blocks the way a browser would, honoring escapes, quoted
//!   strings and `url(...)`-style groups that carry `:`/`;`
//! - never fail on malformed input (best-effort cleanup, not validation)
//! - no document tree: elements are reached through [`StyledElement`]

pub mod comments;
pub mod declarations;
pub mod element;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod options;
pub mod presentation;
pub mod promote;
pub mod serialize;

#[cfg(test)]
mod tests;

pub use declarations::{Declaration, Declarations, parse_declarations};
pub use element::{AttributeRecord, StyledElement};
pub use error::{Error, Result};
pub use options::Options;
pub use presentation::PresentationAttributeSet;
pub use promote::{Promotion, promote};

use indexmap::IndexMap;
use std::borrow::Cow;

/// Result of converting one style string, independent of any element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConversion {
    /// Declarations promoted to attributes, keyed by (lower-case) attribute name.
    pub attributes: IndexMap<String, AttributeRecord>,
    /// What should happen to the style attribute itself.
    pub style: StyleUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleUpdate {
    /// Nothing was tokenized; leave the style attribute as it is.
    Keep,
    /// Replace the style value with the reserialized leftovers.
    Set(String),
    /// Every declaration was promoted or dropped.
    Remove,
    /// Reserialization failed; the style value must stay untouched.
    Failed(Error),
}

/// Converts a raw style value into promoted attributes and leftover style text.
pub fn convert_style(
    style: &str,
    presentation: &PresentationAttributeSet,
    options: &Options,
) -> StyleConversion {
    let stripped: Cow<'_, str> = comments::strip_comments(style);
    let declarations = parse_declarations(&stripped);
    if declarations.is_empty() {
        return StyleConversion {
            attributes: IndexMap::new(),
            style: StyleUpdate::Keep,
        };
    }

    let Promotion {
        attributes,
        retained,
    } = promote(declarations, presentation, options);

    let style = match serialize::serialize(&retained, options.precision()) {
        Ok(Some(s)) => StyleUpdate::Set(s),
        Ok(None) => StyleUpdate::Remove,
        Err(err) => StyleUpdate::Failed(err),
    };

    StyleConversion { attributes, style }
}

/// What [`ConvertStyleToAttrs::apply`] did to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No style attribute, nothing parseable in it, or nothing to change.
    Untouched,
    /// The style attribute was rewritten with the non-promoted declarations.
    Rewritten { promoted: usize },
    /// The style attribute was removed.
    Removed { promoted: usize },
    /// Promotion happened but the leftovers could not be reserialized; style kept as-is.
    KeptOnError { promoted: usize },
}

impl Outcome {
    pub fn promoted(&self) -> usize {
        match *self {
            Outcome::Untouched => 0,
            Outcome::Rewritten { promoted }
            | Outcome::Removed { promoted }
            | Outcome::KeptOnError { promoted } => promoted,
        }
    }
}

/// The per-element pass: converts `style` declarations into presentation attributes.
///
/// Cleans up comments and illegal declarations (without a colon) as a side effect.
#[derive(Debug, Clone)]
pub struct ConvertStyleToAttrs {
    presentation: PresentationAttributeSet,
    options: Options,
}

impl Default for ConvertStyleToAttrs {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl ConvertStyleToAttrs {
    pub const NAME: &'static str = "convertStyleToAttrs";
    pub const DESCRIPTION: &'static str = "converts style to attributes";

    pub fn new(options: Options) -> Self {
        Self {
            presentation: PresentationAttributeSet::svg().clone(),
            options,
        }
    }

    /// Uses a custom presentation attribute table instead of the default SVG one.
    pub fn with_presentation(mut self, presentation: PresentationAttributeSet) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn presentation(&self) -> &PresentationAttributeSet {
        &self.presentation
    }

    /// Applies the pass to a single element.
    ///
    /// This never fails: a style value that cannot be reserialized is left untouched and the
    /// problem is reported through `tracing`.
    pub fn apply<E: StyledElement + ?Sized>(&self, element: &mut E) -> Outcome {
        let Some(style) = element.style() else {
            return Outcome::Untouched;
        };

        let StyleConversion { attributes, style } =
            convert_style(style, &self.presentation, &self.options);
        let promoted = attributes.len();

        let outcome = match style {
            StyleUpdate::Keep => return Outcome::Untouched,
            StyleUpdate::Set(value) if promoted == 0 && element.style() == Some(value.as_str()) => {
                return Outcome::Untouched;
            }
            StyleUpdate::Set(value) => {
                element.merge_attributes(attributes);
                element.set_style(value);
                Outcome::Rewritten { promoted }
            }
            StyleUpdate::Remove => {
                element.merge_attributes(attributes);
                element.remove_style();
                Outcome::Removed { promoted }
            }
            StyleUpdate::Failed(err) => {
                element.merge_attributes(attributes);
                tracing::warn!(error = %err, "failed to reserialize style; keeping original value");
                Outcome::KeptOnError { promoted }
            }
        };

        tracing::debug!(?outcome, "convertStyleToAttrs");
        outcome
    }
}
