//! The ordered list of committed elements.

use crate::shapes::{Element, ElementId, ElementTrait};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Committed elements in insertion order, which is also z-order (back to front).
///
/// A scene is treated as an immutable value: committing produces a new scene
/// with the element appended, and undo/redo swap whole scenes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from elements already in z-order.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Return a copy of this scene with `element` placed on top.
    pub fn with_appended(&self, element: Element) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(element);
        Self { elements }
    }

    /// Elements back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Union of all element bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(|e| e.bounds())
            .reduce(|acc, r| acc.union(r))
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
