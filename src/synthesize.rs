use log::debug;

use crate::chains::decompose;
use crate::error::Error;
use crate::multigraph::{one_zigzag, Multigraph};
use crate::vector::PositionMap;

/// The attachment vertices of a skeleton, grouped by how many chord
/// ends each still accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkeletonSlots {
    pub one: Vec<u64>,
    pub two: Vec<u64>,
    pub four: Vec<u64>,
}

/// Build the chord-free skeleton of an expanded chain vector (lone
/// vertices already split into unit `-1` entries).
///
/// Each positive entry lays down a fresh zigzag block, and consecutive
/// positive entries share their boundary vertex. A run of positive
/// entries followed by a 0 is an open chain; a run with no 0 after it,
/// ended by a `-1` or by the end of the vector, is a closed chain, and
/// its first and last vertices are identified. A `-1` entry allocates
/// an isolated vertex.
pub fn skeleton(expanded: &[i64]) -> Result<(Multigraph, SkeletonSlots), Error> {
    if expanded.iter().any(|&e| e < -1) {
        return Err(Error::malformed(
            "skeleton entries must be positive, 0 or -1",
        ));
    }

    let mut g = Multigraph::new();
    let mut ind: u64 = 0;
    let mut i = 0;

    while i < expanded.len() {
        let e = expanded[i];
        if e > 0 {
            let run_start = ind;
            while i < expanded.len() && expanded[i] > 0 {
                let e = expanded[i] as u64;
                for j in ind..ind + e + 1 {
                    g.add_edge(j, j + 1);
                }
                for j in ind..ind + e {
                    g.add_edge(j, j + 2);
                }
                ind += e + 1;
                i += 1;
            }
            if matches!(expanded.get(i), Some(0)) {
                // Open chain: its last vertex stands on its own.
                ind += 1;
            } else {
                merge_vertices(&mut g, run_start, ind);
            }
        } else if e == -1 {
            g.add_vertex(ind);
            ind += 1;
            i += 1;
        } else {
            i += 1;
        }
    }

    let mut slots = SkeletonSlots::default();
    for v in g.vertices() {
        match 4usize.saturating_sub(g.degree(v)) {
            4 => slots.four.push(v),
            2 => slots.two.push(v),
            1 => slots.one.push(v),
            _ => {}
        }
    }

    Ok((g, slots))
}

fn merge_vertices(g: &mut Multigraph, keep: u64, drop: u64) {
    if keep == drop || !g.has_vertex(drop) {
        return;
    }
    let ns: Vec<(u64, usize)> = g
        .neighbors(drop)
        .into_iter()
        .map(|n| (n, g.edge_multiplicity(drop, n)))
        .collect();
    g.delete_vertex(drop);
    for (n, m) in ns {
        for _ in 0..m {
            g.add_edge(keep, n);
        }
    }
}

/// Rebuild a graph from its chain vector and chord-length vector, the
/// inverse of encoding.
///
/// A single positive entry is a closed 1-zigzag and is built directly.
/// Otherwise the skeleton is laid down, re-decomposed so that
/// positions come from actual adjacency, and the chords are placed by
/// a forward cursor walk: each chord claims the next free slot at or
/// after the cursor and the next free slot at or after the position
/// the chord length points to. A chord that runs past the last
/// position is malformed. An underfull chord vector is left as it is;
/// degree deficits are never patched up.
pub fn synthesize(chains: &[i64], chords: &[u64]) -> Result<Multigraph, Error> {
    if chains.is_empty() {
        return Err(Error::malformed("empty chain vector"));
    }

    if chains.len() == 1 && chains[0] > 0 {
        if !chords.is_empty() {
            return Err(Error::malformed("a single closed chain carries no chords"));
        }
        return Ok(one_zigzag(chains[0] as u64));
    }

    let (body, lone) = match chains.split_last() {
        Some((&last, body)) if last < 0 => (body, (-last) as usize),
        _ => (chains, 0),
    };
    if body.iter().any(|&e| e < 0) {
        return Err(Error::malformed(
            "lone-vertex sentinel before the end of the chain vector",
        ));
    }

    let mut expanded = body.to_vec();
    expanded.extend(std::iter::repeat(-1).take(lone));

    let (mut g, _) = skeleton(&expanded)?;
    let d = decompose(&g, true)?;
    let mut positions = PositionMap::build(&d, |v| 4usize.saturating_sub(g.degree(v)));

    let mut cursor = 0;
    for &len in chords {
        let (u, upos) = loop {
            match positions.claim(cursor) {
                Some(u) => break (u, cursor),
                None if cursor + 1 < positions.len() => cursor += 1,
                None => {
                    return Err(Error::malformed("chord vector exceeds the free slots"));
                }
            }
        };

        let mut vpos = upos + len as usize;
        let v = loop {
            match positions.claim(vpos) {
                Some(v) => break v,
                None if vpos + 1 < positions.len() => vpos += 1,
                None => {
                    return Err(Error::malformed(format!(
                        "chord of length {} runs past the last position",
                        len
                    )));
                }
            }
        };

        g.add_edge(u, v);
    }

    debug!(
        "synthesized {} vertices from {} chain entries and {} chords",
        g.order(),
        chains.len(),
        chords.len()
    );

    Ok(g)
}
