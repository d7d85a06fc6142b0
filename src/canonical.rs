use fnv::FnvHashMap;

use crate::chains::{Chain, ChainDecomposition};
use crate::multigraph::Multigraph;

/// The canonical key of a chain: the lexicographic maximum over the
/// readings its symmetries allow. A closed chain may start at any
/// zigzag, so every cyclic rotation and every reversed rotation is a
/// candidate; an open chain has fixed ends and only its reversal.
pub fn chain_key(lengths: &[i64], closed: bool) -> Vec<i64> {
    let n = lengths.len();
    let rotations = if closed { n } else { 1 };
    let mut best = lengths.to_vec();
    for r in 0..rotations {
        let mut rotated: Vec<i64> = (0..n).map(|i| lengths[(r + i) % n]).collect();
        if rotated > best {
            best = rotated.clone();
        }
        rotated.reverse();
        if rotated > best {
            best = rotated;
        }
    }
    best
}

/// Rewrite one chain into the variant realizing its canonical key.
/// Rotations apply to closed chains only; an open chain rotated away
/// from its ends would no longer glue. When the winning reading is
/// reversed, the zigzag sequence and every vertex list are reversed
/// together so that consecutive zigzags still share their boundary
/// vertex.
fn canonical_chain(chain: &Chain) -> Chain {
    let lengths = chain.lengths();
    let n = lengths.len();
    let rotations = if chain.is_closed() { n } else { 1 };

    let mut best_key = lengths.clone();
    let mut best_rot = 0;
    let mut best_rev = false;

    for r in 0..rotations {
        let mut rotated: Vec<i64> = (0..n).map(|i| lengths[(r + i) % n]).collect();
        if rotated > best_key {
            best_key = rotated.clone();
            best_rot = r;
            best_rev = false;
        }
        rotated.reverse();
        if rotated > best_key {
            best_key = rotated;
            best_rot = r;
            best_rev = true;
        }
    }

    let mut zigzags: Vec<_> = (0..n)
        .map(|i| chain.zigzags[(best_rot + i) % n].clone())
        .collect();
    if best_rev {
        zigzags.reverse();
        for z in zigzags.iter_mut() {
            z.reverse();
        }
    }
    Chain::new(zigzags)
}

/// Reorder and reorient a decomposition into canonical form: each
/// chain is rewritten to its maximal variant, then the chains are
/// stable-sorted, open chains before closed ones and by descending
/// key within each group. Closed chains come last because the chain
/// vector marks them by the absence of a trailing separator, which is
/// only unambiguous at the end of the vector. Equal keys keep their
/// input order, which is the labeling-dependent tie-break the
/// encoding is known to carry.
pub fn canonicalize(d: ChainDecomposition) -> ChainDecomposition {
    let mut keyed: Vec<(bool, Vec<i64>, Chain)> = d
        .chains
        .iter()
        .map(|c| {
            let canonical = canonical_chain(c);
            (canonical.is_closed(), canonical.lengths(), canonical)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));

    ChainDecomposition {
        chains: keyed.into_iter().map(|(_, _, c)| c).collect(),
        lone_vertices: d.lone_vertices,
    }
}

/// The relabeling induced by a canonical decomposition: vertices are
/// numbered in first-seen order along the chain traversal, with lone
/// vertices last. Returned as a map; the graph itself is not touched.
pub fn canonical_labeling(d: &ChainDecomposition) -> FnvHashMap<u64, u64> {
    let mut label: FnvHashMap<u64, u64> = FnvHashMap::default();
    let mut next = 0;

    for chain in d.chains.iter() {
        for z in chain.zigzags.iter() {
            for &v in z.vertices.iter() {
                label.entry(v).or_insert_with(|| {
                    let id = next;
                    next += 1;
                    id
                });
            }
        }
    }
    for &v in d.lone_vertices.iter() {
        label.entry(v).or_insert_with(|| {
            let id = next;
            next += 1;
            id
        });
    }

    label
}

/// Build a fresh graph with every vertex renamed through the map.
/// Vertices absent from the map keep their id.
pub fn relabel(g: &Multigraph, label: &FnvHashMap<u64, u64>) -> Multigraph {
    let mut out = Multigraph::new();
    for v in g.vertices() {
        out.add_vertex(label.get(&v).copied().unwrap_or(v));
    }
    for (a, b, m) in g.graph.all_edges() {
        let a = label.get(&a).copied().unwrap_or(a);
        let b = label.get(&b).copied().unwrap_or(b);
        for _ in 0..*m {
            out.add_edge(a, b);
        }
    }
    out
}

/// Map every vertex list of a decomposition through the label map.
pub fn relabel_decomposition(
    d: &ChainDecomposition,
    label: &FnvHashMap<u64, u64>,
) -> ChainDecomposition {
    let map = |v: &u64| label.get(v).copied().unwrap_or(*v);
    ChainDecomposition {
        chains: d
            .chains
            .iter()
            .map(|c| {
                Chain::new(
                    c.zigzags
                        .iter()
                        .map(|z| crate::chains::Zigzag::new(z.vertices.iter().map(map).collect()))
                        .collect(),
                )
            })
            .collect(),
        lone_vertices: d.lone_vertices.iter().map(map).collect(),
    }
}
