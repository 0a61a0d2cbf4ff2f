//! Element registry standing in for attribute and class queries
//!
//! The host declares every element the page behavior may care about once, at
//! construction time. Components select their targets from the registry the
//! way a script would with `querySelectorAll`.

use std::collections::BTreeMap;

use crate::surface::ElementId;

/// Static description of one element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDecl {
    pub id: ElementId,
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Initial text content
    pub text: Option<String>,
    pub parent: Option<ElementId>,
}

impl ElementDecl {
    pub fn new(id: ElementId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: None,
            parent: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// The `id` attribute, if present and non-empty
    pub fn dom_id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }
}

/// All declared elements, in document order
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<ElementDecl>,
    index: BTreeMap<ElementId, usize>,
}

impl Document {
    pub fn new(elements: Vec<ElementDecl>) -> Self {
        let mut doc = Self::default();
        for element in elements {
            doc.push(element);
        }
        doc
    }

    /// Append an element; a repeated id replaces the earlier declaration
    pub fn push(&mut self, element: ElementDecl) {
        if let Some(&pos) = self.index.get(&element.id) {
            self.elements[pos] = element;
        } else {
            self.index.insert(element.id, self.elements.len());
            self.elements.push(element);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementDecl> {
        self.index.get(&id).map(|&pos| &self.elements[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementDecl> {
        self.elements.iter()
    }

    pub fn with_attr<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ElementDecl> + 'a {
        self.elements.iter().filter(move |e| e.has_attr(name))
    }

    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a ElementDecl> + 'a {
        self.elements.iter().filter(move |e| e.has_class(class))
    }

    pub fn first_with_class(&self, class: &str) -> Option<ElementId> {
        self.with_class(class).next().map(|e| e.id)
    }

    /// Look an element up by its `id` attribute
    pub fn by_dom_id(&self, dom_id: &str) -> Option<&ElementDecl> {
        self.elements.iter().find(|e| e.dom_id() == Some(dom_id))
    }

    /// Walk from `element` up through its ancestors, returning the first match
    pub fn closest<F>(&self, element: ElementId, mut matches: F) -> Option<ElementId>
    where
        F: FnMut(&ElementDecl) -> bool,
    {
        let mut current = self.get(element);
        // Bounded by the element count so a malformed parent cycle terminates
        for _ in 0..=self.elements.len() {
            let decl = current?;
            if matches(decl) {
                return Some(decl.id);
            }
            current = decl.parent.and_then(|p| self.get(p));
        }
        None
    }

    /// Elements nested (at any depth) under `ancestor`
    pub fn descendants_of(&self, ancestor: ElementId) -> Vec<&ElementDecl> {
        self.elements
            .iter()
            .filter(|e| {
                e.id != ancestor
                    && e.parent.is_some()
                    && self.closest(e.id, |d| d.id == ancestor).is_some()
            })
            .collect()
    }
}
