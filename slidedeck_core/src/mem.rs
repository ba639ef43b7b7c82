// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference surface.
//!
//! [`MemSurface`] is a minimal element tree implementing [`Surface`]: enough
//! structure for the deck to drive — classes, attributes, visual flags,
//! intrinsic heights, declared transitions, and image load state — without any
//! real presentation layer behind it. The tests and demos run against it, and
//! it documents by example what a production host needs to provide.
//!
//! Selector support is deliberately tiny: `.class`, `#id`, and bare tag names.
//! Document order for [`MemSurface::resolve`] is node creation order.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::surface::{SlideVisual, Surface};

/// Handle to a node in a [`MemSurface`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemNode(usize);

#[derive(Debug)]
struct NodeData {
    tag: String,
    element: bool,
    id: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    transitions: Vec<(String, String)>,
    intrinsic_height: f64,
    fixed_height: Option<f64>,
    visual: SlideVisual,
    box_normalized: bool,
    draggable: bool,
    image_complete: bool,
}

impl NodeData {
    fn new(tag: &str, element: bool) -> Self {
        Self {
            tag: tag.to_string(),
            element,
            id: None,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: HashMap::new(),
            transitions: Vec::new(),
            intrinsic_height: 0.0,
            fixed_height: None,
            visual: SlideVisual::empty(),
            box_normalized: false,
            draggable: true,
            image_complete: true,
        }
    }
}

/// An in-memory element tree.
///
/// ```
/// use slidedeck_core::mem::MemSurface;
/// use slidedeck_core::surface::Surface;
///
/// let mut surface = MemSurface::new();
/// let container = surface.element("div");
/// let slide = surface.element("div");
/// surface.add_class(slide, "js-slidedeck");
/// surface.append(container, slide);
///
/// assert_eq!(surface.matching_children(container, ".js-slidedeck"), vec![slide]);
/// ```
#[derive(Debug, Default)]
pub struct MemSurface {
    nodes: Vec<NodeData>,
}

impl MemSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element node.
    pub fn element(&mut self, tag: &str) -> MemNode {
        self.nodes.push(NodeData::new(tag, true));
        MemNode(self.nodes.len() - 1)
    }

    /// Create a detached non-element node (text, say). It never matches a
    /// selector and is invalid as a deck container.
    pub fn text_node(&mut self) -> MemNode {
        self.nodes.push(NodeData::new("#text", false));
        MemNode(self.nodes.len() - 1)
    }

    /// Give a node an id, matchable as `#id`.
    pub fn set_id(&mut self, node: MemNode, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append(&mut self, parent: MemNode, child: MemNode) {
        self.detach(child);
        self.nodes[parent.0].children.push(child.0);
        self.nodes[child.0].parent = Some(parent.0);
    }

    /// Set a node's natural height.
    pub fn set_intrinsic_height(&mut self, node: MemNode, height: f64) {
        self.nodes[node.0].intrinsic_height = height;
    }

    /// Declare a transition duration for a property, as a CSS time string.
    pub fn declare_transition(&mut self, node: MemNode, property: &str, duration: &str) {
        self.nodes[node.0]
            .transitions
            .push((property.to_string(), duration.to_string()));
    }

    /// Mark an image node's asset as loaded or still in flight.
    pub fn set_image_complete(&mut self, node: MemNode, complete: bool) {
        self.nodes[node.0].image_complete = complete;
    }

    /// The visual treatment last applied to a node.
    pub fn visual(&self, node: MemNode) -> SlideVisual {
        self.nodes[node.0].visual
    }

    /// The fixed height currently forced on a node, if any.
    pub fn fixed_height(&self, node: MemNode) -> Option<f64> {
        self.nodes[node.0].fixed_height
    }

    /// Whether the deck has normalized this node's box.
    pub fn is_box_normalized(&self, node: MemNode) -> bool {
        self.nodes[node.0].box_normalized
    }

    /// Whether native drag initiation is enabled on this node.
    pub fn is_draggable(&self, node: MemNode) -> bool {
        self.nodes[node.0].draggable
    }

    /// Direct children of a node, in order.
    pub fn children(&self, node: MemNode) -> Vec<MemNode> {
        self.nodes[node.0].children.iter().map(|&i| MemNode(i)).collect()
    }

    fn detach(&mut self, node: MemNode) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent].children.retain(|&c| c != node.0);
        }
    }

    fn matches(&self, idx: usize, selector: &str) -> bool {
        let data = &self.nodes[idx];
        if !data.element {
            return false;
        }
        if let Some(class) = selector.strip_prefix('.') {
            data.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            data.id.as_deref() == Some(id)
        } else {
            data.tag == selector
        }
    }

    /// Preorder indices of the subtree below `root`, excluding `root` itself.
    fn descendants(&self, root: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            for &child in self.nodes[idx].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

impl Surface for MemSurface {
    type NodeId = MemNode;

    fn resolve(&self, selector: &str) -> Option<MemNode> {
        (0..self.nodes.len()).find(|&i| self.matches(i, selector)).map(MemNode)
    }

    fn is_element(&self, node: MemNode) -> bool {
        self.nodes[node.0].element
    }

    fn matching_children(&self, parent: MemNode, selector: &str) -> Vec<MemNode> {
        self.nodes[parent.0]
            .children
            .iter()
            .filter(|&&c| self.matches(c, selector))
            .map(|&c| MemNode(c))
            .collect()
    }

    fn insert_before(&mut self, parent: MemNode, node: MemNode, reference: Option<MemNode>) {
        self.detach(node);
        let children = &self.nodes[parent.0].children;
        let position = reference
            .and_then(|r| children.iter().position(|&c| c == r.0))
            .unwrap_or(children.len());
        self.nodes[parent.0].children.insert(position, node.0);
        self.nodes[node.0].parent = Some(parent.0);
    }

    fn remove_child(&mut self, parent: MemNode, node: MemNode) {
        if self.nodes[node.0].parent == Some(parent.0) {
            self.detach(node);
        }
    }

    fn add_class(&mut self, node: MemNode, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: MemNode, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn has_class(&self, node: MemNode, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn set_attr(&mut self, node: MemNode, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&mut self, node: MemNode, name: &str) {
        self.nodes[node.0].attrs.remove(name);
    }

    fn attr(&self, node: MemNode, name: &str) -> Option<String> {
        self.nodes[node.0].attrs.get(name).cloned()
    }

    fn normalize_slide_box(&mut self, node: MemNode) {
        self.nodes[node.0].box_normalized = true;
    }

    fn apply_visual(&mut self, node: MemNode, visual: SlideVisual) {
        self.nodes[node.0].visual = visual;
    }

    fn intrinsic_height(&self, node: MemNode) -> f64 {
        self.nodes[node.0].intrinsic_height
    }

    fn set_fixed_height(&mut self, node: MemNode, height: Option<f64>) {
        self.nodes[node.0].fixed_height = height;
    }

    fn transition_durations(&self, node: MemNode) -> Vec<(String, String)> {
        self.nodes[node.0].transitions.clone()
    }

    fn matching_descendant(&self, node: MemNode, selector: &str) -> Option<MemNode> {
        self.descendants(node.0)
            .into_iter()
            .find(|&i| self.matches(i, selector))
            .map(MemNode)
    }

    fn image_descendants(&self, node: MemNode) -> Vec<MemNode> {
        self.descendants(node.0)
            .into_iter()
            .filter(|&i| self.nodes[i].element && self.nodes[i].tag == "img")
            .map(MemNode)
            .collect()
    }

    fn is_image_complete(&self, node: MemNode) -> bool {
        self.nodes[node.0].image_complete
    }

    fn set_drag_enabled(&mut self, node: MemNode, enabled: bool) {
        self.nodes[node.0].draggable = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn resolve_understands_class_id_and_tag() {
        let mut surface = MemSurface::new();
        let a = surface.element("div");
        surface.add_class(a, "hero");
        let b = surface.element("img");
        surface.set_id(b, "portrait");

        assert_eq!(surface.resolve(".hero"), Some(a));
        assert_eq!(surface.resolve("#portrait"), Some(b));
        assert_eq!(surface.resolve("img"), Some(b));
        assert_eq!(surface.resolve(".missing"), None);
    }

    #[test]
    fn text_nodes_never_match() {
        let mut surface = MemSurface::new();
        let text = surface.text_node();

        assert!(!surface.is_element(text));
        assert_eq!(surface.resolve("#text"), None);
    }

    #[test]
    fn matching_children_preserves_order_and_skips_non_matches() {
        let mut surface = MemSurface::new();
        let parent = surface.element("div");
        let a = surface.element("div");
        let stray = surface.element("div");
        let b = surface.element("div");
        for node in [a, stray, b] {
            surface.append(parent, node);
        }
        surface.add_class(a, "slide");
        surface.add_class(b, "slide");

        assert_eq!(surface.matching_children(parent, ".slide"), vec![a, b]);
    }

    #[test]
    fn insert_before_places_and_reparents() {
        let mut surface = MemSurface::new();
        let parent = surface.element("div");
        let a = surface.element("div");
        let b = surface.element("div");
        surface.append(parent, a);
        surface.append(parent, b);

        let c = surface.element("div");
        surface.insert_before(parent, c, Some(b));
        assert_eq!(surface.children(parent), vec![a, c, b]);

        let d = surface.element("div");
        surface.insert_before(parent, d, None);
        assert_eq!(surface.children(parent), vec![a, c, b, d]);

        // Reinserting an attached node moves it.
        surface.insert_before(parent, d, Some(a));
        assert_eq!(surface.children(parent), vec![d, a, c, b]);
    }

    #[test]
    fn descendant_queries_walk_in_preorder() {
        let mut surface = MemSurface::new();
        let root = surface.element("div");
        let figure = surface.element("figure");
        let early = surface.element("img");
        let late = surface.element("img");
        surface.append(root, figure);
        surface.append(figure, early);
        surface.append(root, late);
        surface.add_class(late, "hero-image");

        assert_eq!(surface.image_descendants(root), vec![early, late]);
        assert_eq!(surface.matching_descendant(root, ".hero-image"), Some(late));
        assert_eq!(surface.matching_descendant(root, "img"), Some(early));
    }
}
