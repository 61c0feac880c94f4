use crate::declarations::Declaration;
use crate::element::AttributeRecord;
use crate::normalize::unquote;
use crate::options::Options;
use crate::presentation::PresentationAttributeSet;
use indexmap::IndexMap;

/// Declarations split into promoted attributes and leftovers for the style string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Promotion {
    /// Keyed by lower-case property name; a later declaration of the same property wins.
    pub attributes: IndexMap<String, AttributeRecord>,
    /// Declarations that stay in `style`, in source order and in source form.
    pub retained: Vec<Declaration>,
}

/// Decides, per declaration, whether it becomes an attribute, is dropped, or stays in `style`.
pub fn promote<I>(
    declarations: I,
    presentation: &PresentationAttributeSet,
    options: &Options,
) -> Promotion
where
    I: IntoIterator<Item = Declaration>,
{
    let mut out = Promotion::default();

    for declaration in declarations {
        if declaration.property.is_empty() {
            continue;
        }
        let property = declaration.property.to_ascii_lowercase();
        if options.is_excluded(&property) {
            continue;
        }
        if presentation.contains(&property) {
            let value = unquote(&declaration.value).to_string();
            out.attributes
                .insert(property.clone(), AttributeRecord::new(property, value));
            continue;
        }
        out.retained.push(declaration);
    }

    out
}
