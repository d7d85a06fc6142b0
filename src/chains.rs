use log::debug;

use crate::error::Error;
use crate::multigraph::Multigraph;
use crate::zigzag::find_zigzag;

/// One maximal zigzag, in standard order. A closed zigzag carries its
/// starting vertex at both ends of the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zigzag {
    pub vertices: Vec<u64>,
}

impl Zigzag {
    pub fn new(vertices: Vec<u64>) -> Self {
        Zigzag { vertices }
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }

    /// Number of triangles this zigzag contributes to its chain. An
    /// open zigzag on k vertices has k - 2 triangles; a closed one has
    /// as many triangles as vertices, which with the repeated end
    /// vertex is the list length minus one.
    pub fn triangle_span(&self) -> i64 {
        if self.is_closed() {
            self.vertices.len() as i64 - 1
        } else {
            self.vertices.len() as i64 - 2
        }
    }

    pub fn first(&self) -> u64 {
        self.vertices[0]
    }

    pub fn last(&self) -> u64 {
        self.vertices[self.vertices.len() - 1]
    }

    /// Interior vertices, everything but the two ends.
    pub fn interior(&self) -> &[u64] {
        &self.vertices[1..self.vertices.len() - 1]
    }

    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

/// A maximal run of zigzags glued end to end: the last vertex of each
/// zigzag is the first vertex of the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    pub zigzags: Vec<Zigzag>,
}

impl Chain {
    pub fn new(zigzags: Vec<Zigzag>) -> Self {
        Chain { zigzags }
    }

    /// The per-zigzag triangle counts, the raw material of the chain
    /// vector.
    pub fn lengths(&self) -> Vec<i64> {
        self.zigzags.iter().map(|z| z.triangle_span()).collect()
    }

    /// A chain is closed when it wraps around onto itself: the first
    /// vertex of its first zigzag is also the last vertex of its last
    /// zigzag.
    pub fn is_closed(&self) -> bool {
        match (self.zigzags.first(), self.zigzags.last()) {
            (Some(a), Some(b)) => a.first() == b.last(),
            _ => false,
        }
    }
}

/// The full decomposition of a pseudo-descendant: its chains plus the
/// vertices lying in no triangle at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainDecomposition {
    pub chains: Vec<Chain>,
    pub lone_vertices: Vec<u64>,
}

/// Vertices of the graph that belong to no triangle, in ascending id
/// order.
pub fn lone_vertices(g: &Multigraph) -> Vec<u64> {
    g.vertices()
        .into_iter()
        .filter(|&v| g.vertex_triangles(v) == 0)
        .collect()
}

/// Partition the triangle-bearing vertices of `g` into chains of
/// zigzags. Lone vertices are collected from the input graph when
/// `include_lone` is set.
///
/// Zigzags are consumed from a working copy: after a zigzag is
/// recorded its interior is deleted, while its endpoints survive
/// because they may belong to a neighboring zigzag. Each chain grows
/// rightward from its last vertex until no further zigzag exists
/// there, then leftward from its first vertex, before a fresh chain is
/// started. Every consumed zigzag removes at least one triangle, so
/// the loop ends within `triangles_count()` rounds.
pub fn decompose(g: &Multigraph, include_lone: bool) -> Result<ChainDecomposition, Error> {
    let mut h = g.clone();
    let mut chains: Vec<Chain> = Vec::new();

    let mut start_new_chain = true;
    let mut reverse_direction = false;

    while h.triangles_count() > 0 {
        if start_new_chain {
            let z = match find_zigzag(&h, None)? {
                Some(z) => Zigzag::new(z),
                // Positive triangle count guarantees a zigzag.
                None => return Err(Error::NotAZigzag(h.vertices())),
            };
            h.delete_vertices(z.interior());
            debug!(
                "new chain from zigzag of {} triangles ({} left)",
                z.triangle_span(),
                h.triangles_count()
            );
            chains.push(Chain::new(vec![z]));
            start_new_chain = false;
        } else if reverse_direction {
            let chain = chains.last_mut().unwrap();
            let glue = chain.zigzags[0].first();
            match find_zigzag(&h, Some(glue))? {
                None => {
                    // The left end belongs to no further zigzag.
                    h.delete_vertex(glue);
                    start_new_chain = true;
                    reverse_direction = false;
                }
                Some(mut z) => {
                    if z[0] == glue {
                        z.reverse();
                    }
                    let z = Zigzag::new(z);
                    h.delete_vertices(z.interior());
                    chain.zigzags.insert(0, z);
                }
            }
        } else {
            let chain = chains.last_mut().unwrap();
            let glue = chain.zigzags.last().unwrap().last();
            match find_zigzag(&h, Some(glue))? {
                None => {
                    h.delete_vertex(glue);
                    reverse_direction = true;
                }
                Some(mut z) => {
                    if z[z.len() - 1] == glue {
                        z.reverse();
                    }
                    let z = Zigzag::new(z);
                    h.delete_vertices(z.interior());
                    chain.zigzags.push(z);
                }
            }
        }
    }

    let lone = if include_lone {
        lone_vertices(g)
    } else {
        Vec::new()
    };

    debug!(
        "decomposed into {} chains and {} lone vertices",
        chains.len(),
        lone.len()
    );

    Ok(ChainDecomposition {
        chains,
        lone_vertices: lone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::{one_zigzag, zigzag, Multigraph};

    #[test]
    fn double_triangle_is_one_chain_of_two() {
        // Two triangles sharing the edge (1, 2).
        let g = Multigraph::from_edges(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
        let d = decompose(&g, true).unwrap();
        assert_eq!(d.chains.len(), 1);
        assert_eq!(d.chains[0].lengths(), vec![2]);
        assert!(d.lone_vertices.is_empty());
    }

    #[test]
    fn open_zigzag_is_one_chain() {
        let d = decompose(&zigzag(4), false).unwrap();
        assert_eq!(d.chains.len(), 1);
        assert_eq!(d.chains[0].lengths(), vec![4]);
        assert_eq!(d.chains[0].zigzags[0].vertices.len(), 6);
    }

    #[test]
    fn closed_zigzag_spans_as_many_triangles_as_vertices() {
        let g = one_zigzag(6);
        let d = decompose(&g, false).unwrap();
        assert_eq!(d.chains.len(), 1);
        let z = &d.chains[0].zigzags[0];
        assert!(z.is_closed());
        assert!(d.chains[0].is_closed());
        assert_eq!(z.triangle_span() as usize, g.order());
        assert_eq!(z.triangle_span() as usize, g.triangles_count());
    }

    #[test]
    fn glued_zigzags_share_their_boundary_vertex() {
        // Two 2-triangle zigzags sharing only the vertex 3: the
        // triangles {0,1,2}, {1,2,3} and the triangles {3,4,5},
        // {4,5,6}.
        let g = Multigraph::from_edges(vec![
            (0, 1),
            (0, 2),
            (1, 2),
            (1, 3),
            (2, 3),
            (3, 4),
            (3, 5),
            (4, 5),
            (4, 6),
            (5, 6),
        ]);
        let d = decompose(&g, false).unwrap();
        assert_eq!(d.chains.len(), 1);
        assert_eq!(d.chains[0].lengths(), vec![2, 2]);
        let left = &d.chains[0].zigzags[0];
        let right = &d.chains[0].zigzags[1];
        assert_eq!(left.last(), right.first());
        assert!(!d.chains[0].is_closed());
    }

    #[test]
    fn lone_vertices_are_collected_from_the_input() {
        let mut g = zigzag(2);
        g.add_vertex(9);
        let d = decompose(&g, true).unwrap();
        assert_eq!(d.chains.len(), 1);
        assert_eq!(d.lone_vertices, vec![9]);

        let d = decompose(&g, false).unwrap();
        assert!(d.lone_vertices.is_empty());
    }

    #[test]
    fn triangle_free_graph_decomposes_to_nothing() {
        let g = Multigraph::from_edges((0..6).map(|i| (i, (i + 1) % 6)));
        let d = decompose(&g, true).unwrap();
        assert!(d.chains.is_empty());
        assert_eq!(d.lone_vertices.len(), 6);
    }
}
