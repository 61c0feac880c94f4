use crate::dom::Document;
use svgstyle_core::{ConvertStyleToAttrs, Outcome};

/// Per-document summary of what the style pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Elements visited.
    pub elements: usize,
    /// Elements whose style was rewritten with leftover declarations.
    pub rewritten: usize,
    /// Elements whose style attribute was removed.
    pub removed: usize,
    /// Elements whose style was kept because reserialization failed.
    pub failed: usize,
    /// Attributes created or overwritten from style declarations.
    pub promoted: usize,
}

impl Report {
    fn record(&mut self, outcome: Outcome) {
        self.elements += 1;
        self.promoted += outcome.promoted();
        match outcome {
            Outcome::Untouched => {}
            Outcome::Rewritten { .. } => self.rewritten += 1,
            Outcome::Removed { .. } => self.removed += 1,
            Outcome::KeptOnError { .. } => self.failed += 1,
        }
    }

    pub fn changed(&self) -> bool {
        self.rewritten + self.removed + self.promoted > 0
    }
}

/// Runs the style-to-attributes pass over every element of the document.
pub fn convert_style_to_attrs(doc: &mut Document, pass: &ConvertStyleToAttrs) -> Report {
    let mut report = Report::default();
    doc.walk_elements_mut(|el, ctx| {
        let _span = tracing::debug_span!(
            "element",
            name = %el.name.qualified(),
            depth = ctx.depth
        )
        .entered();
        report.record(pass.apply(el));
    });
    tracing::debug!(?report, "{}", ConvertStyleToAttrs::NAME);
    report
}
