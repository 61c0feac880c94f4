//! A small owned SVG/XML tree.
//!
//! `roxmltree` does the parsing; the tree is then copied into owned nodes so passes can edit
//! attributes in place and write the document back out. Attribute order, namespace
//! declarations and the element names as written in the source are kept.

use crate::error::Result;
use indexmap::IndexMap;
use svgstyle_core::{AttributeRecord, StyledElement};

const STYLE: &str = "style";
const XMLNS_PREFIX_XML: &str = "xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub prefix: String,
    pub local: String,
}

impl QName {
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: prefix.to_string(),
                local: local.to_string(),
            },
            None => Self {
                prefix: String::new(),
                local: name.to_string(),
            },
        }
    }

    pub fn qualified(&self) -> String {
        if self.prefix.is_empty() {
            self.local.clone()
        } else {
            format!("{}:{}", self.prefix, self.local)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// `None` for the default namespace (`xmlns="..."`).
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, value: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    /// Namespace declarations made on this element (not inherited ones).
    pub namespaces: Vec<NamespaceDecl>,
    /// Attributes keyed by qualified name, in document order.
    pub attrs: IndexMap<String, AttributeRecord>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: QName::parse(name),
            namespaces: Vec::new(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Tests the element name, ignoring its prefix.
    pub fn is_element(&self, local: &str) -> bool {
        self.name.local == local
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|a| a.value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        match self.attrs.get_mut(name) {
            Some(attr) => attr.value = value.into(),
            None => {
                let q = QName::parse(name);
                self.attrs.insert(
                    name.to_string(),
                    AttributeRecord {
                        name: name.to_string(),
                        value: value.into(),
                        local: q.local,
                        prefix: q.prefix,
                    },
                );
            }
        }
    }

    /// Removes an attribute, keeping the order of the others.
    pub fn remove_attr(&mut self, name: &str) -> Option<AttributeRecord> {
        self.attrs.shift_remove(name)
    }
}

impl StyledElement for Element {
    fn style(&self) -> Option<&str> {
        self.attr(STYLE)
    }

    fn set_style(&mut self, value: String) {
        self.set_attr(STYLE, value);
    }

    fn remove_style(&mut self) {
        self.remove_attr(STYLE);
    }

    fn attribute(&self, name: &str) -> Option<&AttributeRecord> {
        self.attrs.get(name)
    }

    fn merge_attributes(&mut self, attributes: IndexMap<String, AttributeRecord>) {
        self.attrs.extend(attributes);
    }
}

/// Where an element sits in the tree, passed to [`Document::walk_elements_mut`] callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementContext<'a> {
    /// 0 for the root element.
    pub depth: usize,
    /// Qualified name of the parent element.
    pub parent: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The `<?xml ...?>` declaration as written, if any.
    pub declaration: Option<String>,
    /// Comments and processing instructions before the root element.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root element.
    pub epilog: Vec<Node>,
}

impl Document {
    /// Parses an SVG/XML document. DTDs are accepted but not kept.
    ///
    /// Both `roxmltree` and the tree construction here recurse once per nesting level, so very
    /// deep documents (a few hundred levels on a 2 MiB thread stack) need a larger stack.
    pub fn parse(text: &str) -> Result<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, opts)?;

        let declaration = text
            .trim_start_matches('\u{FEFF}')
            .trim_start()
            .strip_prefix("<?xml")
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_whitespace()))
            .and_then(|rest| rest.find("?>").map(|end| format!("<?xml{}?>", &rest[..end])));

        let root_el = doc.root_element();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut seen_root = false;
        for child in doc.root().children() {
            if child == root_el {
                seen_root = true;
                continue;
            }
            let Some(node) = build_misc(child) else {
                continue;
            };
            if seen_root {
                epilog.push(node);
            } else {
                prolog.push(node);
            }
        }

        Ok(Self {
            declaration,
            prolog,
            root: build_element(text, root_el),
            epilog,
        })
    }

    /// Visits every element in document order (pre-order), root first.
    ///
    /// Per-walk state belongs in the closure; the callback only gets positional context.
    pub fn walk_elements_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element, &ElementContext<'_>),
    {
        let root = &mut self.root;
        f(
            root,
            &ElementContext {
                depth: 0,
                parent: None,
            },
        );
        let root_name = root.name.qualified();
        let mut stack = vec![(root_name, root.children.iter_mut())];

        loop {
            let depth = stack.len();
            let Some((parent, iter)) = stack.last_mut() else {
                break;
            };
            let Some(node) = iter.next() else {
                stack.pop();
                continue;
            };
            let Node::Element(el) = node else {
                continue;
            };
            let ctx = ElementContext {
                depth,
                parent: Some(parent.as_str()),
            };
            f(el, &ctx);
            let name = el.name.qualified();
            stack.push((name, el.children.iter_mut()));
        }
    }

    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        if let Some(decl) = &self.declaration {
            out.push_str(decl);
        }
        for node in &self.prolog {
            write_node(&mut out, node);
        }
        write_element(&mut out, &self.root);
        for node in &self.epilog {
            write_node(&mut out, node);
        }
        out
    }
}

fn build_misc(node: roxmltree::Node<'_, '_>) -> Option<Node> {
    match node.node_type() {
        roxmltree::NodeType::Comment => {
            Some(Node::Comment(node.text().unwrap_or_default().to_string()))
        }
        roxmltree::NodeType::PI => node.pi().map(|pi| Node::ProcessingInstruction {
            target: pi.target.to_string(),
            value: pi.value.map(str::to_string),
        }),
        _ => None,
    }
}

/// The element name as written in the source (`svg`, `svg:rect`, ...).
fn source_tag_name<'a>(text: &'a str, node: roxmltree::Node<'_, '_>) -> Option<&'a str> {
    let rest = text.get(node.range().start..)?.strip_prefix('<')?;
    let end = rest
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    Some(&rest[..end]).filter(|s| !s.is_empty())
}

fn build_element(text: &str, node: roxmltree::Node<'_, '_>) -> Element {
    let name = match source_tag_name(text, node) {
        Some(name) => QName::parse(name),
        None => QName {
            prefix: String::new(),
            local: node.tag_name().name().to_string(),
        },
    };

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    let namespaces = node
        .namespaces()
        .filter(|ns| ns.name() != Some(XMLNS_PREFIX_XML))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| NamespaceDecl {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect();

    let mut attrs = IndexMap::new();
    for a in node.attributes() {
        let local = a.name();
        // A URI can be bound to several prefixes (or also be the default namespace), so the
        // prefix is taken from the source when possible.
        let prefix = match text.get(a.range_qname()) {
            Some(qname) => QName::parse(qname).prefix,
            None => a
                .namespace()
                .and_then(|uri| node.lookup_prefix(uri))
                .unwrap_or_default()
                .to_string(),
        };
        let qualified = if prefix.is_empty() {
            local.to_string()
        } else {
            format!("{prefix}:{local}")
        };
        attrs.insert(
            qualified.clone(),
            AttributeRecord {
                name: qualified,
                value: a.value().to_string(),
                local: local.to_string(),
                prefix,
            },
        );
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            roxmltree::NodeType::Element => {
                children.push(Node::Element(build_element(text, child)));
            }
            roxmltree::NodeType::Text => {
                children.push(Node::Text(child.text().unwrap_or_default().to_string()));
            }
            _ => children.extend(build_misc(child)),
        }
    }

    Element {
        name,
        namespaces,
        attrs,
        children,
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(text) => escape_into(out, text, false),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::ProcessingInstruction { target, value } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(value) = value {
                out.push(' ');
                out.push_str(value);
            }
            out.push_str("?>");
        }
    }
}

fn write_element(out: &mut String, el: &Element) {
    let name = el.name.qualified();
    out.push('<');
    out.push_str(&name);
    for ns in &el.namespaces {
        match &ns.prefix {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        escape_into(out, &ns.uri, true);
        out.push('"');
    }
    for attr in el.attrs.values() {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_into(out, &attr.value, true);
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\r' if attribute => out.push_str("&#13;"),
            '\t' if attribute => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
}
