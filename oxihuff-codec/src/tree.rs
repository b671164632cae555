//! Huffman tree construction.
//!
//! Nodes live in an arena owned by [`HuffmanTree`] and refer to each other
//! by [`NodeId`], so building, walking and dropping a tree never recurses.
//!
//! # Degenerate alphabets
//!
//! - No symbols: the root is an internal node with no children.
//! - One symbol: the root is an internal node whose left child is the only
//!   leaf and whose right child is absent.

use crate::frequency::FrequencyTable;
use crate::heap::{MinHeap, Weighted};
use log::trace;
use oxihuff_core::error::{OxiHuffError, Result};

/// Index of a node inside a [`HuffmanTree`].
pub type NodeId = usize;

/// What a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf carrying a byte value.
    Leaf {
        /// The byte value.
        symbol: u8,
    },
    /// An internal node; `left` is bit 0, `right` is bit 1.
    Internal {
        /// Child reached by a 0 bit.
        left: Option<NodeId>,
        /// Child reached by a 1 bit.
        right: Option<NodeId>,
    },
}

/// A tree node with the summed weight of its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Sum of the leaf counts below this node.
    pub weight: u64,
    /// Leaf or internal.
    pub kind: NodeKind,
}

impl Node {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Symbol of a leaf.
    pub fn symbol(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Child for the given bit (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { left, right } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            NodeKind::Leaf { .. } => None,
        }
    }
}

/// Heap entry: a node id ordered by its weight.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: u64,
    id: NodeId,
}

impl Weighted for Pending {
    fn weight(&self) -> u64 {
        self.weight
    }
}

/// An immutable Huffman code tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// # Algorithm
    ///
    /// 1. Insert a leaf for every symbol with a non-zero count into a min-heap
    /// 2. With 0 or 1 entries, hang the lone leaf (if any) left of a synthetic root
    /// 3. Otherwise extract the two lightest nodes, join them under a new
    ///    internal node (first extracted on the left) and insert it back
    /// 4. Repeat until a single node remains; it is the root
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut nodes = Vec::with_capacity(2 * frequencies.distinct() + 1);
        let mut heap = MinHeap::new();

        for (symbol, count) in frequencies.iter() {
            let id = nodes.len();
            nodes.push(Node {
                weight: count as u64,
                kind: NodeKind::Leaf { symbol },
            });
            heap.insert(Pending {
                weight: count as u64,
                id,
            })?;
        }

        if heap.len() <= 1 {
            let only = heap.extract_min();
            let root = nodes.len();
            nodes.push(Node {
                weight: only.map_or(0, |p| p.weight),
                kind: NodeKind::Internal {
                    left: only.map(|p| p.id),
                    right: None,
                },
            });
            trace!("degenerate tree with {} leaf", nodes.len() - 1);
            return Ok(Self { nodes, root });
        }

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.extract_min(), heap.extract_min()) else {
                return Err(OxiHuffError::invalid_tree("heap drained during merge"));
            };
            let id = nodes.len();
            let weight = first.weight + second.weight;
            nodes.push(Node {
                weight,
                kind: NodeKind::Internal {
                    left: Some(first.id),
                    right: Some(second.id),
                },
            });
            trace!(
                "merge #{} ({}) + #{} ({}) -> #{}",
                first.id, first.weight, second.id, second.weight, id
            );
            heap.insert(Pending { weight, id })?;
        }

        let root = heap
            .extract_min()
            .ok_or_else(|| OxiHuffError::invalid_tree("no root after merge"))?
            .id;
        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes, in creation order (leaves first).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total weight at the root (the original input size).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Whether the tree has no leaves at all.
    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    /// The symbol of a one-leaf tree.
    pub fn single_symbol(&self) -> Option<u8> {
        match self.nodes[self.root].kind {
            NodeKind::Internal {
                left: Some(left),
                right: None,
            } => self.nodes[left].symbol(),
            _ => None,
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            if let NodeKind::Internal { left, right } = self.nodes[id].kind {
                stack.extend(left.into_iter().chain(right).map(|c| (c, depth + 1)));
            }
        }
        max
    }
}
