use petgraph::prelude::*;

use fnv::{FnvHashMap, FnvHashSet};

/// An undirected multigraph with `u64` vertex ids, the shared substrate
/// for every decomposition in this crate.
///
/// This is a wrapper over petgraph's `UnGraphMap`, which does not support
/// multiple edges between the same pair of nodes; the edge weight is used
/// as the edge multiplicity instead. Double-triangle reductions of
/// 4-regular graphs routinely produce doubled edges, so multiplicities
/// show up even when the input graph is simple.
#[derive(Debug, Default, Clone)]
pub struct Multigraph {
    pub(crate) graph: UnGraphMap<u64, usize>,
    next_id: u64,
}

impl Multigraph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a graph from an edge list. Vertices are created as needed,
    /// and repeated pairs accumulate multiplicity.
    pub fn from_edges(edges: impl IntoIterator<Item = (u64, u64)>) -> Self {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Add the vertex with the given id. Keeps the fresh-id counter ahead
    /// of every id ever inserted.
    pub fn add_vertex(&mut self, id: u64) -> u64 {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        self.graph.add_node(id)
    }

    /// Allocate a vertex id that has never been used in this graph. Ids
    /// are handed out by a monotonic counter, so a fresh id stays fresh
    /// even after deletions.
    pub fn fresh_vertex(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.graph.add_node(id)
    }

    /// Remove a vertex and all its incident edges.
    pub fn delete_vertex(&mut self, id: u64) -> bool {
        self.graph.remove_node(id)
    }

    pub fn delete_vertices<'a>(&mut self, ids: impl IntoIterator<Item = &'a u64>) {
        for &id in ids {
            self.graph.remove_node(id);
        }
    }

    pub fn has_vertex(&self, id: u64) -> bool {
        self.graph.contains_node(id)
    }

    pub fn has_edge(&self, a: u64, b: u64) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Add one copy of the edge (a, b), creating the endpoints if needed.
    pub fn add_edge(&mut self, a: u64, b: u64) {
        self.add_vertex(a);
        self.add_vertex(b);
        let mult = self.graph.edge_weight(a, b).copied().unwrap_or(0);
        self.graph.add_edge(a, b, mult + 1);
    }

    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (u64, u64)>) {
        for (a, b) in edges {
            self.add_edge(a, b);
        }
    }

    /// Remove one copy of the edge (a, b). Returns false if no such edge
    /// existed.
    pub fn delete_edge(&mut self, a: u64, b: u64) -> bool {
        match self.graph.edge_weight_mut(a, b) {
            None => false,
            Some(mult) if *mult > 1 => {
                *mult -= 1;
                true
            }
            Some(_) => {
                self.graph.remove_edge(a, b);
                true
            }
        }
    }

    pub fn delete_edges(&mut self, edges: impl IntoIterator<Item = (u64, u64)>) {
        for (a, b) in edges {
            self.delete_edge(a, b);
        }
    }

    pub fn edge_multiplicity(&self, a: u64, b: u64) -> usize {
        self.graph.edge_weight(a, b).copied().unwrap_or(0)
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, counted with multiplicity.
    pub fn size(&self) -> usize {
        self.graph.all_edges().map(|(_, _, m)| *m).sum()
    }

    /// The vertex set in ascending id order. Sorting here keeps every
    /// traversal in the crate independent of insertion order.
    pub fn vertices(&self) -> Vec<u64> {
        let mut vs: Vec<u64> = self.graph.nodes().collect();
        vs.sort_unstable();
        vs
    }

    /// Distinct neighbors of a vertex, in ascending id order.
    pub fn neighbors(&self, v: u64) -> Vec<u64> {
        let mut ns: Vec<u64> = self.graph.neighbors(v).collect();
        ns.sort_unstable();
        ns
    }

    /// Vertices adjacent to both a and b, in ascending id order.
    pub fn common_neighbors(&self, a: u64, b: u64) -> Vec<u64> {
        let mut cs: Vec<u64> = self
            .graph
            .neighbors(a)
            .filter(|&n| self.graph.contains_edge(n, b))
            .collect();
        cs.sort_unstable();
        cs
    }

    /// Degree counted with edge multiplicity.
    pub fn degree(&self, v: u64) -> usize {
        self.graph.edges(v).map(|(_, _, m)| *m).sum()
    }

    pub fn is_regular(&self, k: usize) -> bool {
        self.graph.nodes().all(|v| self.degree(v) == k)
    }

    /// The subgraph induced on the given vertex set, with edge
    /// multiplicities preserved.
    pub fn induced_subgraph<'a>(&self, vs: impl IntoIterator<Item = &'a u64>) -> Multigraph {
        let mut sub = Multigraph::new();
        let vs: Vec<u64> = vs.into_iter().copied().collect();
        for &v in vs.iter() {
            if self.has_vertex(v) {
                sub.add_vertex(v);
            }
        }
        for (i, &a) in vs.iter().enumerate() {
            for &b in vs[i + 1..].iter() {
                for _ in 0..self.edge_multiplicity(a, b) {
                    sub.add_edge(a, b);
                }
            }
        }
        sub
    }

    /// Total triangle count, with a triple {u, v, w} counted once per
    /// choice of parallel edges: m(u,v) * m(v,w) * m(u,w).
    pub fn triangles_count(&self) -> usize {
        let vs = self.vertices();
        let mut count = 0;
        for &u in vs.iter() {
            let ns = self.neighbors(u);
            for (i, &v) in ns.iter().enumerate() {
                if v <= u {
                    continue;
                }
                for &w in ns[i + 1..].iter() {
                    count += self.edge_multiplicity(u, v)
                        * self.edge_multiplicity(u, w)
                        * self.edge_multiplicity(v, w);
                }
            }
        }
        count
    }

    /// Number of triangles containing the given vertex, counted with
    /// multiplicity like `triangles_count`.
    pub fn vertex_triangles(&self, v: u64) -> usize {
        let ns = self.neighbors(v);
        let mut count = 0;
        for (i, &a) in ns.iter().enumerate() {
            for &b in ns[i + 1..].iter() {
                count += self.edge_multiplicity(v, a)
                    * self.edge_multiplicity(v, b)
                    * self.edge_multiplicity(a, b);
            }
        }
        count
    }

    pub fn is_connected(&self) -> bool {
        let vs = self.vertices();
        let start = match vs.first() {
            Some(&v) => v,
            None => return true,
        };

        let mut visited: FnvHashSet<u64> = FnvHashSet::default();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if visited.insert(current) {
                for n in self.graph.neighbors(current) {
                    if !visited.contains(&n) {
                        stack.push(n);
                    }
                }
            }
        }

        visited.len() == vs.len()
    }

    /// Isomorphism test, delegated to petgraph's VF2 implementation on a
    /// converted `Graph` with edge multiplicities as matched weights.
    pub fn is_isomorphic(&self, other: &Multigraph) -> bool {
        if self.order() != other.order() || self.size() != other.size() {
            return false;
        }
        let a = self.to_petgraph();
        let b = other.to_petgraph();
        petgraph::algo::is_isomorphic_matching(&a, &b, |_, _| true, |m1, m2| m1 == m2)
    }

    fn to_petgraph(&self) -> Graph<(), usize, petgraph::Undirected> {
        let mut g = Graph::with_capacity(self.order(), self.graph.edge_count());
        let mut index: FnvHashMap<u64, petgraph::graph::NodeIndex> = FnvHashMap::default();
        for v in self.vertices() {
            index.insert(v, g.add_node(()));
        }
        let mut edges: Vec<(u64, u64, usize)> =
            self.graph.all_edges().map(|(a, b, m)| (a, b, *m)).collect();
        edges.sort_unstable();
        for (a, b, m) in edges {
            g.add_edge(index[&a], index[&b], m);
        }
        g
    }
}

/// The complete graph on n vertices.
pub fn complete(n: u64) -> Multigraph {
    let mut g = Multigraph::new();
    for v in 0..n {
        g.add_vertex(v);
    }
    for a in 0..n {
        for b in (a + 1)..n {
            g.add_edge(a, b);
        }
    }
    g
}

/// A single triangle.
pub fn triangle() -> Multigraph {
    Multigraph::from_edges(vec![(0, 1), (0, 2), (1, 2)])
}

/// The open zigzag skeleton Z*n with n triangles on n+2 vertices: the
/// path 0..n+1 with every skip-one pair joined as well. Not 4-regular;
/// this is the shape a chord-free chain block takes.
pub fn zigzag(n: u64) -> Multigraph {
    let mut g = Multigraph::new();
    for v in 0..n + 2 {
        g.add_vertex(v);
    }
    for i in 0..n + 1 {
        g.add_edge(i, i + 1);
    }
    for i in 0..n {
        g.add_edge(i, i + 2);
    }
    g
}

/// The closed 1-zigzag Zn on n+2 vertices: the circulant with
/// connections 1 and 2, i.e. i ~ i+1 and i ~ i+2 mod n+2. 4-regular for
/// every n >= 1 (the n = 1, 2 cases through doubled edges), and
/// `one_zigzag(3)` is K5.
pub fn one_zigzag(n: u64) -> Multigraph {
    let m = n + 2;
    let mut g = Multigraph::new();
    for v in 0..m {
        g.add_vertex(v);
    }
    for i in 0..m {
        g.add_edge(i, (i + 1) % m);
    }
    for i in 0..m {
        g.add_edge(i, (i + 2) % m);
    }
    g
}

/// Whether the graph is a closed 1-zigzag of any order.
pub fn is_one_zigzag(g: &Multigraph) -> bool {
    let n = g.order() as u64;
    n >= 3 && g.is_regular(4) && g.is_isomorphic(&one_zigzag(n - 2))
}

/// Whether the graph is an open zigzag skeleton of any order.
pub fn is_open_zigzag(g: &Multigraph) -> bool {
    let n = g.order() as u64;
    n >= 3 && g.is_isomorphic(&zigzag(n - 2))
}

/// Graph triangle count of the 1-zigzag Zn. The generic count is n+2
/// (one triangle per consecutive vertex triple), but the first few orders
/// pick up extra triangles through doubled edges and the density of the
/// circulant: Z3 is K5 with 10, and Z1, Z2, Z4 each have 8.
pub fn one_zigzag_triangle_count(n: u64) -> usize {
    match n {
        0 => 0,
        1 | 2 => 8,
        3 => 10,
        4 => 8,
        _ => n as usize + 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicity_bookkeeping() {
        let mut g = Multigraph::new();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        assert_eq!(g.edge_multiplicity(0, 1), 2);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.size(), 2);

        assert!(g.delete_edge(0, 1));
        assert_eq!(g.edge_multiplicity(0, 1), 1);
        assert!(g.has_edge(0, 1));

        assert!(g.delete_edge(0, 1));
        assert!(!g.has_edge(0, 1));
        assert!(!g.delete_edge(0, 1));
    }

    #[test]
    fn fresh_vertices_never_reused() {
        let mut g = Multigraph::new();
        g.add_vertex(7);
        let v = g.fresh_vertex();
        assert_eq!(v, 8);
        g.delete_vertex(8);
        assert_eq!(g.fresh_vertex(), 9);
    }

    #[test]
    fn k5_counts() {
        let g = complete(5);
        assert_eq!(g.order(), 5);
        assert_eq!(g.size(), 10);
        assert!(g.is_regular(4));
        assert_eq!(g.triangles_count(), 10);
        assert_eq!(g.vertex_triangles(0), 6);
    }

    #[test]
    fn one_zigzag_is_4_regular() {
        for n in 1..8 {
            let g = one_zigzag(n);
            assert_eq!(g.order() as u64, n + 2);
            assert!(g.is_regular(4), "Z{} is not 4-regular", n);
        }
    }

    #[test]
    fn one_zigzag_triangle_counts_match_closed_form() {
        for n in 1..10 {
            let g = one_zigzag(n);
            assert_eq!(
                g.triangles_count(),
                one_zigzag_triangle_count(n),
                "triangle count mismatch for Z{}",
                n
            );
        }
    }

    #[test]
    fn z3_is_k5() {
        assert!(one_zigzag(3).is_isomorphic(&complete(5)));
        assert!(is_one_zigzag(&complete(5)));
    }

    #[test]
    fn open_zigzag_degrees() {
        let g = zigzag(3);
        assert_eq!(g.order(), 5);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(1), 3);
        assert_eq!(g.degree(2), 4);
        assert_eq!(g.degree(3), 3);
        assert_eq!(g.degree(4), 2);
        assert_eq!(g.triangles_count(), 3);

        assert!(is_open_zigzag(&g));
        assert!(!is_open_zigzag(&one_zigzag(3)));
        assert!(!is_one_zigzag(&g));
    }

    #[test]
    fn induced_subgraph_keeps_multiplicities() {
        let g = one_zigzag(1);
        let sub = g.induced_subgraph(&[0, 1]);
        assert_eq!(sub.order(), 2);
        assert_eq!(sub.edge_multiplicity(0, 1), 2);
    }

    #[test]
    fn isomorphism_sees_multiplicities() {
        // Z2 and the doubled 4-cycle are both 4-regular on 4 vertices
        // with 8 edges, but differ in where the parallel edges sit.
        let z2 = one_zigzag(2);
        let mut doubled_cycle = Multigraph::new();
        for i in 0..4u64 {
            doubled_cycle.add_edge(i, (i + 1) % 4);
            doubled_cycle.add_edge(i, (i + 1) % 4);
        }
        assert!(doubled_cycle.is_regular(4));
        assert!(!z2.is_isomorphic(&doubled_cycle));
        assert!(z2.is_isomorphic(&one_zigzag(2)));
    }

    #[test]
    fn connectivity() {
        let mut g = complete(4);
        assert!(g.is_connected());
        g.add_vertex(10);
        assert!(!g.is_connected());
    }
}
