// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-surface abstraction the deck drives.
//!
//! The deck does not touch a real DOM, scene graph, or terminal. It mutates a
//! [`Surface`]: a tree of presentable nodes with classes, attributes, a small
//! set of visual properties expressed as [`SlideVisual`] flags, measurable
//! intrinsic heights, and declared transition durations. Hosts implement this
//! trait over their own tree; [`MemSurface`](crate::mem::MemSurface) is the
//! in-memory reference implementation used by the tests and demos.
//!
//! Node identifiers are small copyable handles owned by the host. The deck
//! never fabricates ids; every id it holds came from the surface itself.

use alloc::string::String;
use alloc::vec::Vec;

/// Attribute marking a container as owned by a deck. Guards double-binding.
pub const ATTR_INITIALIZED: &str = "data-slidedeck-initialized";

/// Attribute on the container reflecting the current slide index.
pub const ATTR_CURRENT: &str = "data-slidedeck-current";

/// Attribute on each slide recording its positional index.
pub const ATTR_INDEX: &str = "data-slidedeck-index";

bitflags::bitflags! {
    /// Visual state applied to a slide as one bundle.
    ///
    /// The flags map onto whatever the host's presentation layer uses for
    /// positioning, opacity, stacking, hit testing, and assistive-technology
    /// visibility. The deck only ever applies the three treatments exposed as
    /// constructors below.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SlideVisual: u8 {
        /// Slide participates in normal flow layout (vs. pulled out of flow
        /// for measurement or stacking).
        const IN_FLOW = 0b0000_0001;
        /// Full opacity (vs. fully transparent).
        const VISIBLE = 0b0000_0010;
        /// Receives pointer interaction.
        const INTERACTIVE = 0b0000_0100;
        /// Raised stacking order relative to its siblings.
        const RAISED = 0b0000_1000;
        /// Reachable by keyboard focus.
        const FOCUSABLE = 0b0001_0000;
        /// Hidden from assistive technology.
        const ASSISTIVE_HIDDEN = 0b0010_0000;
    }
}

impl SlideVisual {
    /// Treatment for the slide entering view: visible, interactive, raised,
    /// and focusable, but still out of flow while its height is measured.
    pub const fn incoming() -> Self {
        Self::VISIBLE
            .union(Self::INTERACTIVE)
            .union(Self::RAISED)
            .union(Self::FOCUSABLE)
    }

    /// Treatment for the current slide once its transition has settled:
    /// the incoming treatment, back in normal flow.
    pub const fn settled() -> Self {
        Self::incoming().union(Self::IN_FLOW)
    }

    /// Treatment for every non-current slide: out of flow, transparent,
    /// inert, unfocusable, and hidden from assistive technology.
    pub const fn outgoing() -> Self {
        Self::ASSISTIVE_HIDDEN
    }
}

/// A reference to a surface node: either a resolved id or a selector to
/// resolve against the whole tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef<K> {
    /// An already-resolved node id.
    Node(K),
    /// A selector string, resolved via [`Surface::resolve`].
    Selector(String),
}

/// The rendering surface the deck mutates.
///
/// Selector syntax is owned by the host; the deck passes the configured
/// selector strings through verbatim. Implementations must keep child order
/// stable: [`Surface::matching_children`] defines the slide ordering contract.
pub trait Surface {
    /// Copyable node handle.
    type NodeId: Copy + Eq + core::fmt::Debug;

    /// Resolve a selector against the whole tree. `None` when nothing matches.
    fn resolve(&self, selector: &str) -> Option<Self::NodeId>;

    /// Whether this node is a presentable element (vs. text or other
    /// non-element content).
    fn is_element(&self, node: Self::NodeId) -> bool;

    /// Direct children of `parent` matching `selector`, in tree order.
    fn matching_children(&self, parent: Self::NodeId, selector: &str) -> Vec<Self::NodeId>;

    /// Insert `node` as a child of `parent`, immediately before `reference`.
    /// Appends when `reference` is `None`.
    fn insert_before(
        &mut self,
        parent: Self::NodeId,
        node: Self::NodeId,
        reference: Option<Self::NodeId>,
    );

    /// Detach `node` from `parent`.
    fn remove_child(&mut self, parent: Self::NodeId, node: Self::NodeId);

    /// Add a class to a node. Adding a present class is a no-op.
    fn add_class(&mut self, node: Self::NodeId, class: &str);

    /// Remove a class from a node. Removing an absent class is a no-op.
    fn remove_class(&mut self, node: Self::NodeId, class: &str);

    /// Whether a node carries a class.
    fn has_class(&self, node: Self::NodeId, class: &str) -> bool;

    /// Set an attribute, replacing any existing value.
    fn set_attr(&mut self, node: Self::NodeId, name: &str, value: &str);

    /// Remove an attribute. Removing an absent attribute is a no-op.
    fn remove_attr(&mut self, node: Self::NodeId, name: &str);

    /// Read an attribute value.
    fn attr(&self, node: Self::NodeId, name: &str) -> Option<String>;

    /// Normalize a slide's box: fill the container's width, intrinsic height,
    /// clipped overflow, anchored to the container's top-left.
    fn normalize_slide_box(&mut self, node: Self::NodeId);

    /// Apply a visual treatment to a slide as one bundle.
    fn apply_visual(&mut self, node: Self::NodeId, visual: SlideVisual);

    /// Current natural height of a node, in the host's units.
    fn intrinsic_height(&self, node: Self::NodeId) -> f64;

    /// Force a node's height to a fixed value, or release it back to
    /// intrinsic with `None`.
    fn set_fixed_height(&mut self, node: Self::NodeId, height: Option<f64>);

    /// Declared transition `(property, duration)` pairs for a node, duration
    /// as an unparsed CSS time string.
    fn transition_durations(&self, node: Self::NodeId) -> Vec<(String, String)>;

    /// First descendant of `node` matching `selector`, in tree order.
    fn matching_descendant(&self, node: Self::NodeId, selector: &str) -> Option<Self::NodeId>;

    /// All image descendants of `node`, in tree order.
    fn image_descendants(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    /// Whether an image node's asset has finished loading.
    fn is_image_complete(&self, node: Self::NodeId) -> bool;

    /// Enable or suppress native drag initiation on a node.
    fn set_drag_enabled(&mut self, node: Self::NodeId, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treatments_compose_as_documented() {
        assert!(SlideVisual::incoming().contains(SlideVisual::VISIBLE));
        assert!(!SlideVisual::incoming().contains(SlideVisual::IN_FLOW));
        assert_eq!(
            SlideVisual::settled(),
            SlideVisual::incoming() | SlideVisual::IN_FLOW
        );
        assert!(!SlideVisual::outgoing().intersects(SlideVisual::incoming()));
    }
}
