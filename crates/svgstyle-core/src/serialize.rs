use crate::declarations::Declaration;
use crate::error::Result;
use crate::normalize::shorten_units;

/// Rebuilds a style value from the retained declarations.
///
/// Returns `Ok(None)` when nothing is left, meaning the style attribute should be removed.
/// Values get their `<number><unit>` tokens shortened; properties are written as found.
pub fn serialize(retained: &[Declaration], precision: u32) -> Result<Option<String>> {
    if retained.is_empty() {
        return Ok(None);
    }
    let mut out = String::new();
    for (i, d) in retained.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&d.property);
        out.push(':');
        out.push_str(&shorten_units(&d.value, precision)?);
    }
    Ok(Some(out))
}
