use log::debug;

use rayon::prelude::*;

use crate::canonical::{canonical_labeling, canonicalize, relabel, relabel_decomposition};
use crate::chains::decompose;
use crate::error::Error;
use crate::multigraph::{complete, is_one_zigzag, Multigraph};
use crate::vector::{chain_vector, PositionMap, VectorRepr};

#[cfg(feature = "progress_bars")]
use indicatif::ParallelProgressIterator;

#[cfg(feature = "progress_bars")]
fn progress_bar(len: usize) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};
    let len = len as u64;
    let p_bar = ProgressBar::new(len);
    p_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:80} {pos:>7}/{len:7}")
            .progress_chars("##-"),
    );
    p_bar.enable_steady_tick(1000);
    p_bar
}

/// The canonical vector representation of a pseudo-descendant: its
/// chain vector paired with its chord-length vector.
///
/// K5 and the closed 1-zigzags have no chords and are encoded
/// directly. Every other graph is decomposed, canonicalized and
/// relabeled into canonical traversal order, so that the chord
/// iteration below is deterministic for a given graph.
pub fn vector_form(g: &Multigraph) -> Result<VectorRepr, Error> {
    if g.is_isomorphic(&complete(5)) {
        return Ok(VectorRepr::new(vec![3], Vec::new()));
    }
    if is_one_zigzag(g) {
        return Ok(VectorRepr::new(vec![g.order() as i64 - 2], Vec::new()));
    }

    let d = canonicalize(decompose(g, true)?);
    let label = canonical_labeling(&d);
    let k = relabel(g, &label);
    let d = relabel_decomposition(&d, &label);

    // Chords are the edges left over once every zigzag's induced
    // subgraph is subtracted.
    let mut chords = k.clone();
    for chain in d.chains.iter() {
        for z in chain.zigzags.iter() {
            let mut vs = z.vertices.clone();
            vs.sort_unstable();
            vs.dedup();
            let sub = k.induced_subgraph(&vs);
            for (a, b, &m) in sub.graph.all_edges() {
                for _ in 0..m {
                    chords.delete_edge(a, b);
                }
            }
        }
    }

    let positions = PositionMap::build(&d, |v| chords.degree(v));

    let mut chord_edges: Vec<(u64, u64)> = Vec::new();
    for (a, b, &m) in chords.graph.all_edges() {
        let pair = (a.min(b), a.max(b));
        for _ in 0..m {
            chord_edges.push(pair);
        }
    }
    chord_edges.sort_unstable();

    let mut lengths = Vec::with_capacity(chord_edges.len());
    for (a, b) in chord_edges {
        let pa = positions.position_of(a)? as i64;
        let pb = positions.position_of(b)? as i64;
        lengths.push((pa - pb).abs() as u64);
    }

    debug!(
        "encoded {} vertices into {} chain entries and {} chords",
        g.order(),
        chain_vector(&d).len(),
        lengths.len()
    );

    Ok(VectorRepr::new(chain_vector(&d), lengths))
}

/// Encode a batch of independent graphs in parallel.
pub fn vector_forms(graphs: &[Multigraph]) -> Result<Vec<VectorRepr>, Error> {
    let iter;

    #[cfg(feature = "progress_bars")]
    {
        iter = graphs.par_iter().progress_with(progress_bar(graphs.len()));
    }
    #[cfg(not(feature = "progress_bars"))]
    {
        iter = graphs.par_iter();
    }

    iter.map(|g| vector_form(g)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::{complete, one_zigzag, zigzag, Multigraph};

    #[test]
    fn k5_encodes_to_its_sentinel() {
        let v = vector_form(&complete(5)).unwrap();
        assert_eq!(v, VectorRepr::new(vec![3], vec![]));
    }

    #[test]
    fn one_zigzags_encode_without_chords() {
        let v = vector_form(&one_zigzag(4)).unwrap();
        assert_eq!(v, VectorRepr::new(vec![4], vec![]));

        let v = vector_form(&one_zigzag(7)).unwrap();
        assert_eq!(v, VectorRepr::new(vec![7], vec![]));
    }

    /// A 4-triangle zigzag plus one lone vertex, chorded to the two
    /// degree-3 attachment points. Not 4-regular, but a well-formed
    /// pseudo-descendant structure with a nonempty chord vector.
    fn chorded_chain() -> Multigraph {
        let mut g = zigzag(4);
        g.add_vertex(6);
        g.add_edges(vec![(1, 6), (4, 6)]);
        g
    }

    #[test]
    fn open_chain_with_lone_vertex() {
        let v = vector_form(&chorded_chain()).unwrap();
        assert_eq!(v.chains, vec![4, 0, -1]);
        // The chorded vertices sit at positions 0 and 1, the lone
        // vertex at position 2.
        assert_eq!(v.chords, vec![2, 1]);
    }

    #[test]
    fn encoding_is_stable_under_relabeling() {
        let g = chorded_chain();

        // An arbitrary permutation of the vertex ids.
        let perm = |v: u64| [3u64, 0, 6, 2, 1, 5, 4][v as usize];
        let mut h = Multigraph::new();
        for (a, b, &m) in g.graph.all_edges() {
            for _ in 0..m {
                h.add_edge(perm(a), perm(b));
            }
        }

        assert_eq!(vector_form(&g).unwrap(), vector_form(&h).unwrap());
    }

    #[test]
    fn batch_encoding_matches_single_calls() {
        let graphs = vec![complete(5), one_zigzag(4), one_zigzag(6)];
        let batch = vector_forms(&graphs).unwrap();
        for (g, v) in graphs.iter().zip(batch.iter()) {
            assert_eq!(vector_form(g).unwrap(), *v);
        }
    }
}
