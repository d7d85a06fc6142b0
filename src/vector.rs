use fnv::{FnvHashMap, FnvHashSet};

use crate::chains::ChainDecomposition;
use crate::error::Error;

/// Per-zigzag triangle counts, each open chain closed off by a 0
/// separator, with a trailing negative lone-vertex sentinel. A run of
/// positive entries without a separator is a closed chain.
pub type ChainVector = Vec<i64>;

/// One entry per chord edge: the absolute distance between the
/// position indices of its endpoints.
pub type ChordVector = Vec<u64>;

/// The canonical encoding of a pseudo-descendant, used as its
/// deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorRepr {
    pub chains: ChainVector,
    pub chords: ChordVector,
}

impl VectorRepr {
    pub fn new(chains: ChainVector, chords: ChordVector) -> Self {
        VectorRepr { chains, chords }
    }
}

/// Assemble the chain vector of a decomposition: each chain's lengths
/// followed by a 0 separator when the chain is open, nothing when it
/// wraps onto itself; lone vertices appear as one negative count at
/// the end. The separator is what keeps an open chain apart from a
/// closed one of the same lengths, so it is never elided.
pub fn chain_vector(d: &ChainDecomposition) -> ChainVector {
    let mut cv = Vec::new();
    for chain in d.chains.iter() {
        cv.extend(chain.lengths());
        if !chain.is_closed() {
            cv.push(0);
        }
    }
    let lone = d.lone_vertices.len() as i64;
    if lone > 0 {
        cv.push(-lone);
    }
    cv
}

/// Position indices of the attachment points of a decomposition, the
/// coordinate system chord lengths are measured in.
///
/// Walking the chains in canonical label order, every vertex with two
/// free chord slots (a chain end) takes a position of its own, every
/// vertex with one free slot (a degree-3 interior vertex) takes a
/// position of its own except in 4-vertex zigzags, where the two such
/// vertices share one position as consecutive sub-slots. Saturated
/// vertices (junctions and zigzag middles) take no position. Each lone
/// vertex takes one position with four slots.
#[derive(Debug, Clone)]
pub struct PositionMap {
    positions: Vec<Vec<u64>>,
    capacity: Vec<Vec<usize>>,
    by_vertex: FnvHashMap<u64, usize>,
}

impl PositionMap {
    /// Build the map over a decomposition; `free_slots` gives the
    /// number of chords each chain vertex still accepts (its degree in
    /// the chord graph, or equivalently 4 minus its skeleton degree).
    pub fn build(d: &ChainDecomposition, free_slots: impl Fn(u64) -> usize) -> PositionMap {
        let mut map = PositionMap {
            positions: Vec::new(),
            capacity: Vec::new(),
            by_vertex: FnvHashMap::default(),
        };
        let mut seen: FnvHashSet<u64> = FnvHashSet::default();

        for chain in d.chains.iter() {
            for z in chain.zigzags.iter() {
                // Canonical labels grow along the chain walk, so the
                // sorted list recovers path order and drops nothing.
                let mut vs = z.vertices.clone();
                vs.sort_unstable();

                let mut pending = false;
                for v in vs {
                    if !seen.insert(v) {
                        continue;
                    }
                    match free_slots(v) {
                        2 => map.push_position(v, 2),
                        1 if z.vertices.len() == 4 => {
                            if pending {
                                let last = map.positions.len() - 1;
                                map.positions[last].push(v);
                                map.capacity[last].push(1);
                                map.by_vertex.insert(v, last);
                                pending = false;
                            } else {
                                map.push_position(v, 1);
                                pending = true;
                            }
                        }
                        1 => map.push_position(v, 1),
                        _ => {}
                    }
                }
            }
        }

        for &v in d.lone_vertices.iter() {
            map.push_position(v, 4);
        }

        map
    }

    fn push_position(&mut self, v: u64, slots: usize) {
        self.by_vertex.insert(v, self.positions.len());
        self.positions.push(vec![v]);
        self.capacity.push(vec![slots]);
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The position index of a vertex. Every attachment point maps to
    /// exactly one position; a miss means the decomposition and the
    /// chord set disagree.
    pub fn position_of(&self, v: u64) -> Result<usize, Error> {
        self.by_vertex
            .get(&v)
            .copied()
            .ok_or(Error::AmbiguousPosition { vertex: v })
    }

    /// Claim one free slot at the given position, returning its
    /// vertex, or `None` when the position is saturated or out of
    /// range.
    pub(crate) fn claim(&mut self, pos: usize) -> Option<u64> {
        let caps = self.capacity.get_mut(pos)?;
        for (sub, cap) in caps.iter_mut().enumerate() {
            if *cap > 0 {
                *cap -= 1;
                return Some(self.positions[pos][sub]);
            }
        }
        None
    }
}
