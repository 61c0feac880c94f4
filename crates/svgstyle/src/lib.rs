#![forbid(unsafe_code)]

//! Moves inline `style` declarations of SVG elements into presentation attributes.
//!
//! `svgstyle` wires the headless pass from `svgstyle-core` to a small owned XML tree:
//!
//! ```
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="fill:red;-x-foo:1"/></svg>"#;
//! let (out, report) = svgstyle::optimize(svg, &svgstyle::ConvertStyleToAttrs::default()).unwrap();
//! assert_eq!(out, r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="-x-foo:1" fill="red"/></svg>"#);
//! assert_eq!(report.promoted, 1);
//! ```

pub mod convert;
pub mod dom;
pub mod error;

pub use convert::{Report, convert_style_to_attrs};
pub use dom::{Document, Element, ElementContext, Node, QName};
pub use error::{Error, Result};
pub use svgstyle_core::{
    AttributeRecord, ConvertStyleToAttrs, Options, Outcome, PresentationAttributeSet,
    StyledElement,
};

/// Parses `svg`, runs the pass over every element and serializes the result.
pub fn optimize(svg: &str, pass: &ConvertStyleToAttrs) -> Result<(String, Report)> {
    let mut doc = Document::parse(svg)?;
    let report = convert_style_to_attrs(&mut doc, pass);
    Ok((doc.to_xml_string(), report))
}
