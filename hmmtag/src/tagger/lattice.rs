use std::num::NonZeroU32;

use crate::errors::{Result, TaggerError};
use crate::model::Model;
use crate::phrase::PhraseTag;

/// Handle of a node in the lattice. Slot 0 of the arena is never handed out.
pub(crate) type NodeIdx = NonZeroU32;

/// Ceilings on the size of a lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacity {
    /// Maximum number of token positions, including the synthetic end position.
    pub max_positions: usize,

    /// Maximum number of nodes, including the synthetic end node.
    pub max_nodes: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            max_positions: crate::common::DEFAULT_MAX_POSITIONS,
            max_nodes: crate::common::DEFAULT_MAX_NODES,
        }
    }
}

/// A candidate reading placed in the lattice.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// Index of the reading among the candidates of its token.
    pub candidate: u32,
    pub phrase: PhraseTag,
    pub emission: f64,
    /// Best score of a path ending here; `NEG_INFINITY` until relaxed.
    pub accumulated: f64,
    pub backptr: Option<NodeIdx>,
    pub sibling: Option<NodeIdx>,
}

impl Node {
    const SENTINEL: Self = Self {
        candidate: u32::MAX,
        phrase: PhraseTag::EOS,
        emission: 0.0,
        accumulated: f64::NEG_INFINITY,
        backptr: None,
        sibling: None,
    };
}

#[derive(Debug, Clone, Copy, Default)]
struct Head {
    first: Option<NodeIdx>,
    last: Option<NodeIdx>,
}

/// Trellis of one sentence: a column of sibling nodes per token position.
#[derive(Debug)]
pub struct Lattice {
    heads: Vec<Head>,
    nodes: Vec<Node>,
    capacity: Capacity,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}

impl Lattice {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            heads: vec![],
            nodes: vec![Node::SENTINEL],
            capacity,
        }
    }

    #[inline(always)]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.capacity = capacity;
    }

    /// Clears the arenas, keeping their allocations.
    pub fn reset(&mut self) {
        self.heads.clear();
        self.nodes.truncate(1);
    }

    /// Fails unless a sentence of the given size, synthetic end included, fits.
    pub fn reserve(&mut self, num_positions: usize, num_nodes: usize) -> Result<()> {
        if num_positions > self.capacity.max_positions {
            return Err(TaggerError::capacity_exceeded(
                "positions",
                self.capacity.max_positions,
                num_positions,
            ));
        }
        if num_nodes > self.capacity.max_nodes {
            return Err(TaggerError::capacity_exceeded(
                "nodes",
                self.capacity.max_nodes,
                num_nodes,
            ));
        }
        self.heads.reserve(num_positions);
        self.nodes.reserve(num_nodes);
        Ok(())
    }

    /// Opens a new token position.
    pub fn push_position(&mut self) -> Result<()> {
        if self.heads.len() >= self.capacity.max_positions {
            return Err(TaggerError::capacity_exceeded(
                "positions",
                self.capacity.max_positions,
                self.heads.len() + 1,
            ));
        }
        self.heads.push(Head::default());
        Ok(())
    }

    /// Appends a node to the last token position, after its siblings.
    pub fn push_node(&mut self, candidate: u32, phrase: PhraseTag, emission: f64) -> Result<()> {
        let num_nodes = self.num_nodes();
        let idx = u32::try_from(self.nodes.len())
            .ok()
            .and_then(NodeIdx::new)
            .filter(|_| num_nodes < self.capacity.max_nodes)
            .ok_or_else(|| {
                TaggerError::capacity_exceeded("nodes", self.capacity.max_nodes, num_nodes + 1)
            })?;
        let position = self.heads.len().checked_sub(1).ok_or_else(|| {
            TaggerError::invalid_state("a node needs a token position", "no position is open")
        })?;
        self.nodes.push(Node {
            candidate,
            phrase,
            emission,
            accumulated: f64::NEG_INFINITY,
            backptr: None,
            sibling: None,
        });
        let head = &mut self.heads[position];
        match head.last {
            Some(last) => self.nodes[last.get() as usize].sibling = Some(idx),
            None => head.first = Some(idx),
        }
        head.last = Some(idx);
        Ok(())
    }

    /// Appends the synthetic end position.
    pub fn insert_eos(&mut self) -> Result<()> {
        self.push_position()?;
        self.push_node(0, PhraseTag::EOS, 0.0)
    }

    /// Gets the number of token positions, including the synthetic end.
    #[inline(always)]
    pub fn num_positions(&self) -> usize {
        self.heads.len()
    }

    /// Gets the number of nodes, excluding the sentinel.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    #[inline(always)]
    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.get() as usize]
    }

    /// Creates an iterator of the nodes at a token position, in candidate order.
    #[cfg(test)]
    pub fn siblings(&self, position: usize) -> Siblings<'_> {
        Siblings {
            lattice: self,
            next: self.heads.get(position).and_then(|h| h.first),
        }
    }

    /// Relaxes every pair of nodes at adjacent token positions, left to right.
    pub fn relax(&mut self, model: &Model) {
        for i in 1..self.heads.len() {
            let mut from = self.heads[i - 1].first;
            while let Some(j) = from {
                let mut to = self.heads[i].first;
                while let Some(k) = to {
                    self.update(j, k, model);
                    to = self.node(k).sibling;
                }
                from = self.node(j).sibling;
            }
        }
    }

    fn update(&mut self, from: NodeIdx, to: NodeIdx, model: &Model) {
        let ptt = model.transition(self.node(from).phrase, self.node(to).phrase);

        let left = &mut self.nodes[from.get() as usize];
        if left.backptr.is_none() {
            left.accumulated = left.emission;
        }
        let left_score = left.accumulated;

        let right = &mut self.nodes[to.get() as usize];
        let score = left_score + ptt + right.emission;
        // Strict comparison keeps the earliest relaxed predecessor on ties.
        if right.backptr.is_none() || score > right.accumulated {
            right.backptr = Some(from);
            right.accumulated = score;
        }
    }

    /// Follows back-pointers from the synthetic end node, storing the path
    /// of real nodes in token order.
    pub fn backtrace(&self, path: &mut Vec<NodeIdx>) {
        path.clear();
        let mut cur = self
            .heads
            .last()
            .and_then(|h| h.first)
            .and_then(|eos| self.node(eos).backptr);
        while let Some(idx) = cur {
            path.push(idx);
            cur = self.node(idx).backptr;
        }
        path.reverse();
    }
}

/// Iterator of the nodes at one token position.
#[cfg(test)]
pub struct Siblings<'a> {
    lattice: &'a Lattice,
    next: Option<NodeIdx>,
}

#[cfg(test)]
impl<'a> Iterator for Siblings<'a> {
    type Item = (NodeIdx, &'a Node);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.lattice.node(idx);
        self.next = node.sibling;
        Some((idx, node))
    }
}
