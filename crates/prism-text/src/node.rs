// SPDX-License-Identifier: MIT
//
// The styled text tree.
//
// `TextNode` is immutable once built: a payload string, a `Style`, and
// children behind `Arc` so subtrees can be shared between parents (or reused
// several times in one parent) without copying. Traversal goes through the
// `StyledNode` trait, so the flattener and renderer also work over node
// graphs that are not `TextNode`s.

use std::fmt;
use std::sync::Arc;

use crate::style::Style;

// ─── StyledNode ──────────────────────────────────────────────────────────────

/// Read access to a node of a styled text graph.
///
/// Implementations need not guarantee acyclicity; traversal checks the
/// ancestor path by address.
pub trait StyledNode {
    /// Text payload. Empty for pure containers.
    fn content(&self) -> &str;

    /// The node's explicit style, before inheritance.
    fn style(&self) -> &Style;

    fn child_count(&self) -> usize;

    /// The child at `index`, or `None` past the end.
    fn child_at(&self, index: usize) -> Option<&Self>;
}

// ─── TextNode ────────────────────────────────────────────────────────────────

/// A node of styled text.
///
/// ```
/// use prism_text::node::TextNode;
/// use prism_text::style::Style;
///
/// let tree = TextNode::styled("Hello, ", Style::new().bold())
///     .child(TextNode::text("world"))
///     .child("!");
///
/// assert_eq!(tree.children().len(), 2);
/// assert_eq!(tree.children()[1].content(), "!");
/// ```
#[derive(Clone, Default)]
pub struct TextNode {
    content: String,
    style: Style,
    children: Vec<Arc<TextNode>>,
}

impl TextNode {
    /// An empty, unstyled container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            style: Style::EMPTY,
            children: Vec::new(),
        }
    }

    /// Unstyled text.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::styled(content, Style::EMPTY)
    }

    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
            children: Vec::new(),
        }
    }

    /// A content-less container with a style its children inherit.
    #[must_use]
    pub const fn container(style: Style) -> Self {
        Self {
            content: String::new(),
            style,
            children: Vec::new(),
        }
    }

    // ─── Builders ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Append a child. Strings become unstyled text nodes.
    #[must_use]
    pub fn child(mut self, child: impl Into<Self>) -> Self {
        self.children.push(Arc::new(child.into()));
        self
    }

    /// Append a subtree that other parents may hold too.
    #[must_use]
    pub fn shared_child(mut self, child: Arc<Self>) -> Self {
        self.children.push(child);
        self
    }

    /// In-place form of [`shared_child`](Self::shared_child), for code that
    /// assembles a tree incrementally.
    pub fn push_child(&mut self, child: Arc<Self>) {
        self.children.push(child);
    }

    #[must_use]
    pub fn children_from<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        self.children
            .extend(children.into_iter().map(|c| Arc::new(c.into())));
        self
    }

    // ─── Accessors ────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Whether this node has neither content nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.children.is_empty()
    }

    /// Total number of nodes in this subtree, counting shared subtrees once
    /// per appearance.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter().map(AsRef::as_ref));
        }
        count
    }
}

impl StyledNode for TextNode {
    #[inline]
    fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    fn child_at(&self, index: usize) -> Option<&Self> {
        self.children.get(index).map(AsRef::as_ref)
    }
}

// Dropping a deeply nested tree recursively would overflow the stack, so
// uniquely owned descendants are unlinked onto a worklist first.
impl Drop for TextNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(child) {
                pending.append(&mut node.children);
            }
        }
    }
}

// Structural equality, compared with an explicit stack of node pairs so
// deep trees don't recurse. Shared subtrees compare equal by address.
impl PartialEq for TextNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.content != b.content
                || a.style != b.style
                || a.children.len() != b.children.len()
            {
                return false;
            }
            for (x, y) in a.children.iter().zip(&b.children) {
                if !Arc::ptr_eq(x, y) {
                    pairs.push((x.as_ref(), y.as_ref()));
                }
            }
        }
        true
    }
}

impl Eq for TextNode {}

// Shallow: children are summarized, not printed, so deep trees format in
// constant stack.
impl fmt::Debug for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNode")
            .field("content", &self.content)
            .field("style", &self.style)
            .field("children", &self.children.len())
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl From<&str> for TextNode {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for TextNode {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Decorations;
    use crate::testing::chain;

    #[test]
    fn new_is_empty() {
        let node = TextNode::new();
        assert!(node.is_empty());
        assert!(node.style().is_empty());
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn builders_compose() {
        let node = TextNode::container(Style::new().italic())
            .child(TextNode::text("a"))
            .child("b")
            .with_content("root");
        assert_eq!(node.content(), "root");
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.style().decoration(Decorations::ITALIC), Some(true));
    }

    #[test]
    fn shared_subtree_counts_per_appearance() {
        let shared = Arc::new(TextNode::text("s").child("t"));
        let root = TextNode::new()
            .shared_child(Arc::clone(&shared))
            .shared_child(Arc::clone(&shared));
        assert_eq!(root.node_count(), 5);
        assert!(Arc::ptr_eq(&root.children()[0], &root.children()[1]));
    }

    #[test]
    fn children_from_iterator() {
        let root = TextNode::new().children_from(["x", "y", "z"]);
        let contents: Vec<_> = root.children().iter().map(|c| c.content()).collect();
        assert_eq!(contents, ["x", "y", "z"]);
    }

    // ── Equality ──

    #[test]
    fn equality_is_structural() {
        let a = TextNode::styled("r", Style::new().bold()).child("c").child("d");
        let b = TextNode::styled("r", Style::new().bold()).child("c").child("d");
        assert_eq!(a, b);
        assert_ne!(a, TextNode::styled("r", Style::new().bold()).child("c"));
        assert_ne!(a, TextNode::styled("r", Style::new()).child("c").child("d"));
        assert_ne!(a, TextNode::styled("r", Style::new().bold()).child("c").child("e"));
    }

    #[test]
    fn deep_trees_compare_without_recursion() {
        assert_eq!(chain(200_000), chain(200_000));

        let mut leaf = TextNode::text("y");
        for _ in 1..200_000 {
            leaf = TextNode::text("x").child(leaf);
        }
        assert_ne!(chain(200_000), leaf);
    }

    #[test]
    fn debug_summarizes_children() {
        let text = format!("{:?}", chain(100_000));
        assert!(text.contains("children: 1"));
        assert!(text.contains("nodes: 100000"));
    }

    #[test]
    fn styled_node_trait_matches_accessors() {
        let root = TextNode::styled("r", Style::new().bold()).child("c");
        assert_eq!(StyledNode::content(&root), "r");
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.child_at(0).map(TextNode::content), Some("c"));
        assert!(root.child_at(1).is_none());
    }
}
