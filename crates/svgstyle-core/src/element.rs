use indexmap::IndexMap;

/// An attribute in the shape expected by the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    /// Qualified name (`prefix:local`, or just `local` without a prefix).
    pub name: String,
    pub value: String,
    pub local: String,
    pub prefix: String,
}

impl AttributeRecord {
    /// An attribute without a namespace prefix.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local: name.clone(),
            name,
            value: value.into(),
            prefix: String::new(),
        }
    }
}

/// The element operations the style pass needs from a document tree.
pub trait StyledElement {
    /// Value of the `style` attribute, if the element has one.
    fn style(&self) -> Option<&str>;

    fn has_style(&self) -> bool {
        self.style().is_some()
    }

    fn set_style(&mut self, value: String);

    fn remove_style(&mut self);

    fn attribute(&self, name: &str) -> Option<&AttributeRecord>;

    /// Adds `attributes`, overwriting same-named attributes already on the element.
    fn merge_attributes(&mut self, attributes: IndexMap<String, AttributeRecord>);
}
