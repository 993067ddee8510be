//! Presentation sinks.
//!
//! The theme applier never touches a global document. It writes through a
//! `PresentationSink`, which in the browser is the document root and in this
//! service is an in-memory attribute map returned to the caller.

use std::collections::BTreeMap;

/// Attribute carrying the layout variant.
pub const ATTR_LAYOUT: &str = "data-layout";
/// Attribute carrying the color mode.
pub const ATTR_THEME_MODE: &str = "data-theme-mode";
/// Attribute carrying the accent color.
pub const ATTR_ACCENT_COLOR: &str = "data-accent-color";

/// Every attribute the applier owns.
pub const THEME_ATTRIBUTES: [&str; 3] = [ATTR_LAYOUT, ATTR_THEME_MODE, ATTR_ACCENT_COLOR];

/// Target for document-level presentation attributes.
pub trait PresentationSink {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn clear_attribute(&mut self, name: &str);
}

/// Sorted in-memory attribute set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attributes: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.attributes
    }
}

impl PresentationSink for AttributeMap {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn clear_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn set_attribute(&mut self, name: &str, value: &str) {
        (**self).set_attribute(name, value);
    }

    fn clear_attribute(&mut self, name: &str) {
        (**self).clear_attribute(name);
    }
}
