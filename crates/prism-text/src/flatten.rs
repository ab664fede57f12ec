// SPDX-License-Identifier: MIT
//
// Tree flattening.
//
// `Segments` walks a styled tree depth-first, pre-order, children in listed
// order, and yields each node's content with its effective style. The walk
// is iterative: an explicit stack of frames, one per node on the current
// path, each holding the node, its effective style, and the index of the
// next child to visit. Leaving a node pops its frame, which restores the
// parent's style for free.
//
// The path also bounds the depth, and a set of the addresses on it is the
// cycle check: a child already on the path is its own ancestor.

use std::collections::HashSet;
use std::ptr;

use prism_term::profile::DEFAULT_MAX_DEPTH;
use unicode_width::UnicodeWidthStr;

use crate::error::{MalformedKind, MalformedTree};
use crate::node::StyledNode;
use crate::style::Style;

// ─── Segment ─────────────────────────────────────────────────────────────────

/// One node's content with its effective style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: Style,
    /// Nesting depth; the root is 0.
    pub depth: usize,
}

// ─── Segments ────────────────────────────────────────────────────────────────

struct Frame<'a, N> {
    node: &'a N,
    style: Style,
    next_child: usize,
}

/// Pre-order iterator over a tree's segments.
///
/// Yields one segment per node, empty content included. On a cycle or a
/// path deeper than `max_depth`, yields a single error and then ends.
pub struct Segments<'a, N> {
    pending_root: Option<&'a N>,
    stack: Vec<Frame<'a, N>>,
    /// Addresses of the nodes in `stack`.
    on_path: HashSet<*const N>,
    max_depth: usize,
}

impl<'a, N: StyledNode> Segments<'a, N> {
    #[must_use]
    pub fn new(root: &'a N, max_depth: usize) -> Self {
        Self {
            pending_root: Some(root),
            stack: Vec::new(),
            on_path: HashSet::new(),
            max_depth,
        }
    }

    fn enter(&mut self, node: &'a N, style: Style) {
        self.on_path.insert(ptr::from_ref(node));
        self.stack.push(Frame {
            node,
            style,
            next_child: 0,
        });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.on_path.remove(&ptr::from_ref(frame.node));
        }
    }

    fn fail(&mut self, kind: MalformedKind, depth: usize) -> MalformedTree {
        self.stack.clear();
        self.on_path.clear();
        MalformedTree { kind, depth }
    }
}

impl<'a, N: StyledNode> Iterator for Segments<'a, N> {
    type Item = Result<Segment<'a>, MalformedTree>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.pending_root.take() {
            let style = root.style().merge_over(&Style::EMPTY);
            self.enter(root, style);
            return Some(Ok(Segment {
                text: root.content(),
                style,
                depth: 0,
            }));
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(child) = frame.node.child_at(frame.next_child) else {
                self.leave();
                continue;
            };
            frame.next_child += 1;
            let parent_style = frame.style;
            let depth = self.stack.len();

            if depth > self.max_depth {
                let max_depth = self.max_depth;
                return Some(Err(self.fail(MalformedKind::TooDeep { max_depth }, depth)));
            }
            if self.on_path.contains(&ptr::from_ref(child)) {
                return Some(Err(self.fail(MalformedKind::Cycle, depth)));
            }

            let style = child.style().merge_over(&parent_style);
            self.enter(child, style);
            return Some(Ok(Segment {
                text: child.content(),
                style,
                depth,
            }));
        }
    }
}

/// Segments of `root`, bounded by `max_depth`.
pub fn segments<N: StyledNode>(root: &N, max_depth: usize) -> Segments<'_, N> {
    Segments::new(root, max_depth)
}

// ─── Text ────────────────────────────────────────────────────────────────────

/// The visible text of a tree: every node's content in document order.
///
/// # Errors
///
/// Returns [`MalformedTree`] on a cycle or nesting beyond the default depth.
pub fn plain_text<N: StyledNode>(root: &N) -> Result<String, MalformedTree> {
    let mut out = String::new();
    for segment in segments(root, DEFAULT_MAX_DEPTH) {
        out.push_str(segment?.text);
    }
    Ok(out)
}

/// Terminal columns the tree's visible text occupies.
///
/// # Errors
///
/// Returns [`MalformedTree`] on a cycle or nesting beyond the default depth.
pub fn display_width<N: StyledNode>(root: &N) -> Result<usize, MalformedTree> {
    segments(root, DEFAULT_MAX_DEPTH).try_fold(0, |width, segment| {
        Ok(width + segment?.text.width())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use prism_term::NamedColor;

    use super::*;
    use crate::node::TextNode;
    use crate::style::{Decorations, TextColor};
    use crate::testing::{chain, LoopNode};

    fn texts(root: &TextNode) -> Vec<(&str, usize)> {
        segments(root, DEFAULT_MAX_DEPTH)
            .map(|s| s.map(|s| (s.text, s.depth)))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    // ── Order ───────────────────────────────────────────────────────────

    #[test]
    fn pre_order_document_order() {
        let root = TextNode::text("a")
            .child(TextNode::text("b").child("c").child("d"))
            .child("e");
        assert_eq!(
            texts(&root),
            [("a", 0), ("b", 1), ("c", 2), ("d", 2), ("e", 1)]
        );
        assert_eq!(plain_text(&root).unwrap(), "abcde");
    }

    #[test]
    fn empty_containers_still_yield_segments() {
        let root = TextNode::new().child(TextNode::new()).child("x");
        assert_eq!(texts(&root), [("", 0), ("", 1), ("x", 1)]);
    }

    // ── Inheritance ─────────────────────────────────────────────────────

    #[test]
    fn styles_inherit_and_restore() {
        let root = TextNode::styled("r", Style::new().color(NamedColor::Red))
            .child(TextNode::styled("b", Style::new().color(NamedColor::Blue)).child("i"))
            .child("after");
        let styles: Vec<_> = segments(&root, DEFAULT_MAX_DEPTH)
            .map(|s| s.unwrap().style.color)
            .collect();
        let red = Some(TextColor::Named(NamedColor::Red));
        let blue = Some(TextColor::Named(NamedColor::Blue));
        assert_eq!(styles, [red, blue, blue, red]);
    }

    #[test]
    fn explicit_off_propagates_to_grandchildren() {
        let root = TextNode::styled("", Style::new().bold())
            .child(TextNode::container(Style::new().without(Decorations::BOLD)).child("x"));
        let last = segments(&root, DEFAULT_MAX_DEPTH).last().unwrap().unwrap();
        assert_eq!(last.style.decoration(Decorations::BOLD), Some(false));
    }

    // ── Sharing ─────────────────────────────────────────────────────────

    #[test]
    fn shared_subtree_is_not_a_cycle() {
        let shared = Arc::new(TextNode::text("s"));
        let root = TextNode::new()
            .shared_child(Arc::clone(&shared))
            .child(TextNode::new().shared_child(Arc::clone(&shared)))
            .shared_child(shared);
        assert_eq!(plain_text(&root).unwrap(), "sss");
    }

    // ── Malformed ───────────────────────────────────────────────────────

    #[test]
    fn cycle_is_detected() {
        let root = LoopNode::cycle(&["a", "b", "c"]);
        let result: Result<Vec<_>, _> = segments(root, DEFAULT_MAX_DEPTH).collect();
        assert_eq!(
            result.unwrap_err(),
            MalformedTree {
                kind: MalformedKind::Cycle,
                depth: 3,
            }
        );
    }

    #[test]
    fn self_loop_is_detected() {
        let root = LoopNode::cycle(&["only"]);
        assert_eq!(plain_text(root).unwrap_err().kind, MalformedKind::Cycle);
    }

    #[test]
    fn iteration_ends_after_error() {
        let root = LoopNode::cycle(&["a"]);
        let mut iter = segments(root, DEFAULT_MAX_DEPTH);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let root = chain(5);
        assert!(segments(&root, 4).collect::<Result<Vec<_>, _>>().is_ok());
        let err = segments(&root, 3)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.kind, MalformedKind::TooDeep { max_depth: 3 });
        assert_eq!(err.depth, 4);
    }

    #[test]
    fn deep_tree_does_not_overflow_the_stack() {
        let root = chain(100_000);
        let count = segments(&root, usize::MAX).count();
        assert_eq!(count, 100_000);
    }

    #[test]
    fn path_set_tracks_the_stack() {
        let root = TextNode::text("a")
            .child(TextNode::text("b").child(TextNode::text("c").child("d")))
            .child(TextNode::text("e").child("f"))
            .child(chain(50));
        let mut iter = segments(&root, DEFAULT_MAX_DEPTH);
        while let Some(segment) = iter.next() {
            assert!(segment.is_ok());
            assert_eq!(iter.on_path.len(), iter.stack.len());
        }
        assert!(iter.on_path.is_empty());
    }

    #[test]
    fn cycle_deep_in_a_long_path() {
        let names: Vec<&'static str> = vec!["n"; 2_000];
        let root = LoopNode::cycle(&names);
        let err = segments(root, usize::MAX).collect::<Result<Vec<_>, _>>().unwrap_err();
        assert_eq!(err, MalformedTree { kind: MalformedKind::Cycle, depth: 2_000 });
    }

    // ── Width ───────────────────────────────────────────────────────────

    #[test]
    fn display_width_counts_columns() {
        let root = TextNode::text("ab").child("中文").child("🔥");
        assert_eq!(display_width(&root).unwrap(), 2 + 4 + 2);
    }
}
