//! Double-triangle expansion and reduction, the moves that generate
//! the descendants of K5 and walk them back.

use log::debug;

use crate::error::Error;
use crate::multigraph::{complete, Multigraph};

/// True when the three vertices are distinct and pairwise adjacent.
pub fn is_triangle(g: &Multigraph, tri: &[u64; 3]) -> bool {
    let [a, b, c] = *tri;
    a != b
        && a != c
        && b != c
        && g.has_edge(a, b)
        && g.has_edge(b, c)
        && g.has_edge(a, c)
}

/// True when `[v1, v2, v3, v4]` spells two triangles sharing the edge
/// `(v2, v3)`.
pub fn is_double_triangle(g: &Multigraph, dt: &[u64; 4]) -> bool {
    let [v1, v2, v3, v4] = *dt;
    v1 != v4 && is_triangle(g, &[v1, v2, v3]) && is_triangle(g, &[v2, v3, v4])
}

/// A double triangle is proper when its outer vertices are not
/// adjacent and the shared edge completes no third triangle. Only
/// proper double triangles can be reduced without collapsing
/// structure elsewhere.
pub fn is_proper_double_triangle(g: &Multigraph, dt: &[u64; 4]) -> bool {
    let [v1, v2, v3, v4] = *dt;
    if !is_double_triangle(g, dt) || g.has_edge(v1, v4) {
        return false;
    }
    g.common_neighbors(v2, v3)
        .into_iter()
        .all(|n| n == v1 || n == v4)
}

/// The first proper double triangle of the graph in sorted edge order,
/// as `[v1, v2, v3, v4]` with `(v2, v3)` the shared edge.
pub fn find_double_triangle(g: &Multigraph) -> Option<[u64; 4]> {
    let mut edges: Vec<(u64, u64)> = g
        .graph
        .all_edges()
        .map(|(a, b, _)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();

    for (a, b) in edges {
        let cs = g.common_neighbors(a, b);
        for (i, &x) in cs.iter().enumerate() {
            for &y in cs[i + 1..].iter() {
                let dt = [x, a, b, y];
                if is_proper_double_triangle(g, &dt) {
                    return Some(dt);
                }
            }
        }
    }
    None
}

/// Expand a triangle into a double triangle by splitting its middle
/// vertex.
///
/// The triangle is ordered: `tri[1]` is the middle. With `N` the
/// sorted neighbors of the middle outside the triangle, the edges
/// `(tri[0], tri[2])` and `(tri[1], N[choice])` are deleted and a
/// fresh vertex is joined to all of `tri[0]`, `tri[1]`, `tri[2]` and
/// `N[choice]`. On a 4-regular graph the result is again 4-regular.
pub fn double_triangle_expansion(
    g: &Multigraph,
    tri: &[u64; 3],
    choice: usize,
) -> Result<Multigraph, Error> {
    if !is_triangle(g, tri) {
        return Err(Error::NotATriangle(tri.to_vec()));
    }
    let [t0, t1, t2] = *tri;

    let mut k = g.clone();
    k.delete_edge(t0, t1);
    k.delete_edge(t1, t2);
    let w = k
        .neighbors(t1)
        .get(choice)
        .copied()
        .ok_or_else(|| Error::NotATriangle(tri.to_vec()))?;

    let mut h = g.clone();
    h.delete_edge(t0, t2);
    h.delete_edge(t1, w);
    let vn = h.fresh_vertex();
    h.add_edges(vec![(vn, t0), (vn, t1), (vn, t2), (vn, w)]);

    debug!("expanded triangle {:?} through {} into vertex {}", tri, w, vn);
    Ok(h)
}

/// Contract a proper double triangle `[v1, v2, v3, v4]` back into a
/// single triangle, the inverse of expansion: `v3` is dissolved, its
/// leftover edges move to `v2`, and the outer vertices are joined.
pub fn double_triangle_reduction(g: &Multigraph, dt: &[u64; 4]) -> Result<Multigraph, Error> {
    if !is_proper_double_triangle(g, dt) {
        return Err(Error::NotADoubleTriangle(dt.to_vec()));
    }
    let [v1, v2, v3, v4] = *dt;

    let mut h = g.clone();
    h.delete_edge(v1, v3);
    h.delete_edge(v2, v3);
    h.delete_edge(v3, v4);
    for n in h.neighbors(v3) {
        for _ in 0..h.edge_multiplicity(v3, n) {
            h.add_edge(v2, n);
        }
    }
    h.delete_vertex(v3);
    h.add_edge(v1, v4);

    Ok(h)
}

/// Reduce proper double triangles until none is left. Descendants of
/// K5 come back to K5; other graphs stop at whatever reduction-free
/// graph they reach first.
pub fn double_triangle_ancestor(g: &Multigraph) -> Result<Multigraph, Error> {
    let mut h = g.clone();
    while let Some(dt) = find_double_triangle(&h) {
        h = double_triangle_reduction(&h, &dt)?;
    }
    debug!("ancestor reached order {}", h.order());
    Ok(h)
}

/// True when the graph is a connected 4-regular graph whose
/// double-triangle ancestor is K5.
pub fn is_k5_descendant(g: &Multigraph) -> Result<bool, Error> {
    if !g.is_regular(4) || !g.is_connected() {
        return Ok(false);
    }
    Ok(double_triangle_ancestor(g)?.is_isomorphic(&complete(5)))
}
