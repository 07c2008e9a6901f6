//! NodeArena creation methods.

use super::base::NodeIndex;
use super::node::{IdentData, LiteralData, Node, NodeArena, NodeData};
use crate::syntax::walk::map_children;
use sigchan_scanner::SyntaxKind;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge inputs.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(Self::MAX_NODE_PREALLOC)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Append a node and return its index.
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node { pos, end, data });
        index
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, name: impl Into<String>) -> NodeIndex {
        self.add(pos, end, NodeData::Ident(IdentData { name: name.into() }))
    }

    pub fn add_literal(
        &mut self,
        pos: u32,
        end: u32,
        kind: SyntaxKind,
        value: impl Into<String>,
    ) -> NodeIndex {
        self.add(
            pos,
            end,
            NodeData::BasicLit(LiteralData {
                kind,
                value: value.into(),
            }),
        )
    }

    pub fn add_bad(&mut self, pos: u32, end: u32) -> NodeIndex {
        self.add(pos, end, NodeData::Bad)
    }

    /// Mutable access for building detached copies. Parsed trees are never
    /// edited through this.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get_mut(index.0 as usize)
    }

    /// Deep-copy the subtree rooted at `root` into a fresh arena.
    ///
    /// The copy keeps the original source positions, so it can be rendered
    /// or compared against the original, but it shares no storage with
    /// `self`: editing the copy leaves this arena untouched.
    pub fn detach(&self, root: NodeIndex) -> Option<(NodeArena, NodeIndex)> {
        self.get(root)?;
        let mut target = NodeArena::new();
        let copied = self.copy_into(root, &mut target);
        Some((target, copied))
    }

    fn copy_into(&self, index: NodeIndex, target: &mut NodeArena) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        let data = map_children(&node.data, &mut |child| self.copy_into(child, target));
        target.add(node.pos, node.end, data)
    }
}
