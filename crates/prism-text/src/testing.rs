// SPDX-License-Identifier: MIT
//
// Test-only node graphs.

use std::sync::OnceLock;

use crate::node::{StyledNode, TextNode};
use crate::style::Style;

/// A linear tree of `len` nodes, each with content `"x"`.
pub(crate) fn chain(len: usize) -> TextNode {
    let mut node = TextNode::text("x");
    for _ in 1..len {
        node = TextNode::text("x").child(node);
    }
    node
}

/// A node graph that `TextNode` cannot express: each node's single child
/// is the next node, and the last links back to the first.
pub(crate) struct LoopNode {
    content: &'static str,
    style: Style,
    next: OnceLock<&'static LoopNode>,
}

impl LoopNode {
    pub(crate) fn cycle(contents: &[&'static str]) -> &'static Self {
        Self::cycle_with_style(contents, Style::EMPTY)
    }

    pub(crate) fn cycle_with_style(contents: &[&'static str], style: Style) -> &'static Self {
        let nodes: Vec<&'static Self> = contents
            .iter()
            .map(|&content| {
                &*Box::leak(Box::new(Self {
                    content,
                    style,
                    next: OnceLock::new(),
                }))
            })
            .collect();
        for (i, node) in nodes.iter().enumerate() {
            let _ = node.next.set(nodes[(i + 1) % nodes.len()]);
        }
        nodes[0]
    }
}

impl StyledNode for LoopNode {
    fn content(&self) -> &str {
        self.content
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn child_count(&self) -> usize {
        usize::from(self.next.get().is_some())
    }

    fn child_at(&self, index: usize) -> Option<&Self> {
        if index == 0 {
            self.next.get().copied()
        } else {
            None
        }
    }
}
