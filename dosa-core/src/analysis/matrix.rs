//! Region-pair flow counts.
//!
//! Axis layout for capacity `N`: indices `0..N` are region slots, `N..2N` are the per-slot
//! background pseudo-regions ("touches region i and no other active region").

use std::fmt;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// One axis of the matrix: a region slot or that slot's background counterpart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind", content = "slot")]
pub enum Node {
    Region(usize),
    Background(usize),
}

impl Node {
    pub fn slot(&self) -> usize {
        match *self {
            Node::Region(slot) | Node::Background(slot) => slot,
        }
    }

    pub fn is_background(&self) -> bool {
        matches!(self, Node::Background(_))
    }

    /// Row/column of this node in a matrix over `capacity` slots.
    pub fn index(&self, capacity: usize) -> usize {
        match *self {
            Node::Region(slot) => slot,
            Node::Background(slot) => capacity + slot,
        }
    }

    pub fn from_index(idx: usize, capacity: usize) -> Option<Node> {
        if idx < capacity {
            Some(Node::Region(idx))
        } else if idx < 2 * capacity {
            Some(Node::Background(idx - capacity))
        } else {
            None
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Region(slot) => write!(f, "R{}", slot),
            Node::Background(slot) => write!(f, "B{}", slot),
        }
    }
}

/// Matrix cell an edge is counted in: flow from `source` to `destination`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub struct Attribution {
    pub source: Node,
    pub destination: Node,
}

impl Attribution {
    pub fn new(source: Node, destination: Node) -> Self {
        Attribution { source, destination }
    }

    pub fn within(slot: usize) -> Self {
        Self::new(Node::Region(slot), Node::Region(slot))
    }

    pub fn between(from: usize, to: usize) -> Self {
        Self::new(Node::Region(from), Node::Region(to))
    }

    pub fn outbound(slot: usize) -> Self {
        Self::new(Node::Region(slot), Node::Background(slot))
    }

    pub fn inbound(slot: usize) -> Self {
        Self::new(Node::Background(slot), Node::Region(slot))
    }

    pub fn is_within(&self) -> bool {
        self.source == self.destination
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.destination)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct AggregateMatrix {
    /// Number of region slots `N`; the matrix is `2N × 2N`.
    pub capacity: usize,
    pub counts: Vec<Vec<u64>>,
}

impl AggregateMatrix {
    pub fn new(capacity: usize) -> Self {
        let size = 2 * capacity;
        AggregateMatrix { capacity, counts: vec![vec![0; size]; size] }
    }

    pub fn size(&self) -> usize {
        2 * self.capacity
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|row| row.fill(0));
    }

    pub fn increment(&mut self, row: usize, col: usize) {
        self.counts[row][col] += 1;
    }

    pub fn record(&mut self, attribution: &Attribution) {
        let n = self.capacity;
        self.increment(attribution.source.index(n), attribution.destination.index(n));
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }

    pub fn count(&self, attribution: &Attribution) -> u64 {
        let n = self.capacity;
        self.get(attribution.source.index(n), attribution.destination.index(n))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn row_sum(&self, row: usize) -> u64 {
        self.counts[row].iter().sum()
    }

    pub fn col_sum(&self, col: usize) -> u64 {
        self.counts.iter().map(|row| row[col]).sum()
    }

    /// Non-zero cells in row-major order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Attribution, u64)> + '_ {
        let n = self.capacity;
        self.counts.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().filter(|(_, count)| **count > 0).filter_map(move |(c, &count)| {
                let source = Node::from_index(r, n)?;
                let destination = Node::from_index(c, n)?;
                Some((Attribution { source, destination }, count))
            })
        })
    }

    /// Sum of all cells in `slot`'s rows and columns (region and background); zero after the slot
    /// has been freed and a pass has run.
    pub fn slot_total(&self, slot: usize) -> u64 {
        let n = self.capacity;
        let idxs = [slot, n + slot];
        let rows: u64 = idxs.iter().map(|&i| self.row_sum(i)).sum();
        let cols: u64 = idxs.iter().map(|&i| self.col_sum(i)).sum();
        let overlap: u64 = idxs.iter().flat_map(|&r| idxs.iter().map(move |&c| (r, c))).map(|(r, c)| self.get(r, c)).sum();
        rows + cols - overlap
    }
}
