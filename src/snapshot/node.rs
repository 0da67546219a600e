use crate::{
    foundation::core::Canvas,
    foundation::error::{FukuwaraiError, FukuwaraiResult},
    snapshot::style::StyleSheet,
};

/// SVG namespace declared on serialized roots.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Owned SVG element with ordered attributes.
///
/// A node with no children may carry raw text content (e.g. `<title>`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgNode {
    /// Element name.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<SvgNode>,
    /// Raw text content of a leaf.
    pub text: Option<String>,
}

impl SvgNode {
    /// Empty element named `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`SvgNode::set_attr`].
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form appending a child.
    pub fn with_child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder form setting leaf text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping its original position when replaced.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Whitespace-separated `class` tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Copy of this element with attributes only: no children, no text.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SvgNode::node_count).sum::<usize>()
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&SvgNode> {
        if self.classes().any(|c| c == class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }
}

/// A scene graph plus the stylesheet its classes resolve against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgDocument {
    /// The `<svg>` root element.
    pub root: SvgNode,
    /// Author rules applied during style resolution.
    pub stylesheet: StyleSheet,
}

impl SvgDocument {
    /// Intrinsic pixel size from the root `width`/`height` attributes.
    pub fn intrinsic_size(&self) -> FukuwaraiResult<Canvas> {
        fn dim(root: &SvgNode, key: &str) -> FukuwaraiResult<u32> {
            let raw = root
                .attr(key)
                .ok_or_else(|| FukuwaraiError::validation(format!("svg root has no {key}")))?;
            let v: f64 = raw.trim().trim_end_matches("px").parse().map_err(|_| {
                FukuwaraiError::validation(format!("svg {key} \"{raw}\" is not a length"))
            })?;
            if !v.is_finite() || v <= 0.0 {
                return Err(FukuwaraiError::validation(format!(
                    "svg {key} must be positive"
                )));
            }
            Ok(v.ceil() as u32)
        }

        Canvas::new(dim(&self.root, "width")?, dim(&self.root, "height")?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/node.rs"]
mod tests;
