
use crate::{AttributeRecord, StyledElement};
use indexmap::IndexMap;

/// Minimal element used by the scenario tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TestElement {
    pub style: Option<String>,
    pub attrs: IndexMap<String, AttributeRecord>,
}

impl TestElement {
    pub fn with_style(style: &str) -> Self {
        Self {
            style: Some(style.to_string()),
            attrs: IndexMap::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .insert(name.to_string(), AttributeRecord::new(name, value));
        self
    }

    pub fn attr_values(&self) -> Vec<(&str, &str)> {
        self.attrs
            .iter()
            .map(|(k, a)| (k.as_str(), a.value.as_str()))
            .collect()
    }
}

impl StyledElement for TestElement {
    fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    fn set_style(&mut self, value: String) {
        self.style = Some(value);
    }

    fn remove_style(&mut self) {
        self.style = None;
    }

    fn attribute(&self, name: &str) -> Option<&AttributeRecord> {
        self.attrs.get(name)
    }

    fn merge_attributes(&mut self, attributes: IndexMap<String, AttributeRecord>) {
        self.attrs.extend(attributes);
    }
}
