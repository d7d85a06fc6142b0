use std::collections::VecDeque;

use fnv::FnvHashSet;

use crate::error::Error;
use crate::multigraph::Multigraph;

/// Find one triangle as a vertex triple. When a seed vertex is given
/// and present in the graph, only triangles through the seed are
/// considered and the seed is the first entry of the result; otherwise
/// every vertex is scanned in ascending id order.
pub fn find_triangle(g: &Multigraph, seed: Option<u64>) -> Option<[u64; 3]> {
    let vertices = match seed {
        Some(s) if g.has_vertex(s) => vec![s],
        _ => g.vertices(),
    };

    for vi in vertices {
        let ns = g.neighbors(vi);
        for (i, &vj) in ns.iter().enumerate() {
            for &vk in ns[i + 1..].iter() {
                if g.has_edge(vj, vk) {
                    return Some([vi, vj, vk]);
                }
            }
        }
    }

    None
}

/// Find the maximal zigzag through a triangle containing the seed (or
/// through any triangle when the seed is unset or absent), and return
/// its vertices in standard zigzag order.
///
/// `Ok(None)` means no triangle through the seed exists; it is the
/// normal end-of-growth signal for chain decomposition, not an error.
/// A closed zigzag (the graph is a single 1-zigzag) is returned with
/// the starting vertex repeated at the end.
///
/// The caller's graph is never mutated; expansion consumes edges of an
/// internal working copy so that each triangle is matured exactly once.
pub fn find_zigzag(g: &Multigraph, seed: Option<u64>) -> Result<Option<Vec<u64>>, Error> {
    let tri = match find_triangle(g, seed) {
        Some(tri) => tri,
        None => return Ok(None),
    };

    let mut h = g.clone();
    let mut z: Vec<u64> = tri.to_vec();
    let mut used: FnvHashSet<u64> = z.iter().copied().collect();

    // Open edges of the zigzag found so far, waiting to be matured
    // into a further triangle.
    let mut queue: VecDeque<(u64, u64)> = VecDeque::new();
    for i in 0..2 {
        for j in (i + 1)..3 {
            queue.push_back((tri[i], tri[j]));
            h.delete_edge(tri[i], tri[j]);
        }
    }

    while let Some((a, b)) = queue.pop_front() {
        let fresh: Vec<u64> = h
            .common_neighbors(a, b)
            .into_iter()
            .filter(|c| !used.contains(c))
            .collect();

        if fresh.len() > 1 {
            // Two distinct completions of the same open edge.
            return Err(Error::TripleTriangle { u: a, v: b });
        }

        if let Some(&c) = fresh.first() {
            z.push(c);
            used.insert(c);
            queue.push_back((c, a));
            queue.push_back((c, b));
            h.delete_edge(c, a);
            h.delete_edge(c, b);
        }
    }

    let ordered = order_zigzag(g, &z, seed)?;
    Ok(Some(ordered))
}

/// Put the unordered vertex set of a maximal zigzag into standard
/// zigzag order: endpoints first and last, consecutive triples forming
/// the triangles in path order.
fn order_zigzag(g: &Multigraph, z: &[u64], seed: Option<u64>) -> Result<Vec<u64>, Error> {
    if z.len() == 3 {
        return Ok(order_triangle(g, z, seed));
    }

    let mut sub = g.induced_subgraph(z);

    // A degree-2 vertex of the induced subgraph is an endpoint. If
    // none exists the zigzag closes on itself.
    let start = z.iter().copied().find(|&v| sub.degree(v) == 2);
    let start = match start {
        Some(start) => start,
        None => return order_closed(&sub, z),
    };

    let next = sub
        .neighbors(start)
        .into_iter()
        .find(|&n| sub.degree(n) == 3);
    let next = match next {
        Some(next) => next,
        None => return Err(Error::NotAZigzag(z.to_vec())),
    };

    let mut ordered = vec![start, next];
    sub.delete_edge(start, next);

    // Each consecutive pair has one unconsumed common neighbor, the
    // apex of the next triangle along the path.
    let mut index = 0;
    while ordered.len() < z.len() {
        let (a, b) = (ordered[index], ordered[index + 1]);
        let apex = match sub.common_neighbors(a, b).first() {
            Some(&apex) => apex,
            None => return Err(Error::NotAZigzag(z.to_vec())),
        };
        ordered.push(apex);
        sub.delete_edge(a, apex);
        sub.delete_edge(b, apex);
        index += 1;
    }

    Ok(ordered)
}

/// Order a single triangle. Which vertex takes the middle position
/// depends on membership in neighboring zigzags: a vertex lying in two
/// maximal zigzags belongs at an end, decided by its triangle count in
/// the ambient graph.
fn order_triangle(g: &Multigraph, z: &[u64], seed: Option<u64>) -> Vec<u64> {
    let mut ordered = vec![z[0], z[1], z[2]];

    if g.vertex_triangles(z[1]) == 2 {
        ordered = vec![z[0], z[2], z[1]];
    }

    if seed != Some(z[0]) && g.vertex_triangles(z[0]) == 1 && g.vertex_triangles(z[1]) == 2 {
        ordered = vec![z[1], z[0], z[2]];
    }

    ordered
}

/// Greedy closed walk over a zigzag with no endpoints. Returns the
/// walk with the first vertex repeated at the end.
fn order_closed(sub: &Multigraph, z: &[u64]) -> Result<Vec<u64>, Error> {
    let start = z[0];
    let second = match sub.neighbors(start).first() {
        Some(&second) => second,
        None => return Err(Error::NotAZigzag(z.to_vec())),
    };

    let mut ordered = vec![start, second];
    let mut used: FnvHashSet<u64> = ordered.iter().copied().collect();

    while ordered.len() < z.len() {
        let (a, b) = (ordered[ordered.len() - 2], ordered[ordered.len() - 1]);
        let apex = sub
            .common_neighbors(a, b)
            .into_iter()
            .find(|c| !used.contains(c));
        match apex {
            Some(apex) => {
                ordered.push(apex);
                used.insert(apex);
            }
            None => return Err(Error::NotAZigzag(z.to_vec())),
        }
    }

    ordered.push(start);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multigraph::{complete, one_zigzag, zigzag};

    #[test]
    fn triangle_in_k5() {
        let g = complete(5);
        assert_eq!(find_triangle(&g, None), Some([0, 1, 2]));
        assert_eq!(find_triangle(&g, Some(3)), Some([3, 0, 1]));
    }

    #[test]
    fn no_triangle_in_a_cycle() {
        let g = Multigraph::from_edges((0..5).map(|i| (i, (i + 1) % 5)));
        assert_eq!(find_triangle(&g, None), None);
        assert!(find_zigzag(&g, None).unwrap().is_none());
    }

    #[test]
    fn open_zigzag_is_ordered_end_to_end() {
        let g = zigzag(3);
        let z = find_zigzag(&g, None).unwrap().unwrap();
        assert_eq!(z, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn seeded_search_starts_at_the_seed_end() {
        let g = zigzag(3);
        let z = find_zigzag(&g, Some(4)).unwrap().unwrap();
        assert_eq!(z, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn absent_seed_falls_back_to_full_search() {
        let g = zigzag(2);
        let z = find_zigzag(&g, Some(99)).unwrap().unwrap();
        assert_eq!(z.len(), 4);
    }

    #[test]
    fn single_triangle_puts_the_shared_vertex_at_an_end() {
        // Two triangles sharing the vertex 1: {0, 1, 4} and {1, 2, 3}.
        let g = Multigraph::from_edges(vec![(0, 1), (0, 4), (1, 4), (1, 2), (1, 3), (2, 3)]);
        let z = find_zigzag(&g, None).unwrap().unwrap();
        assert_eq!(z, vec![1, 0, 4]);
    }

    #[test]
    fn closed_zigzag_repeats_its_start() {
        let g = one_zigzag(4);
        let z = find_zigzag(&g, None).unwrap().unwrap();
        assert_eq!(z.len(), g.order() + 1);
        assert_eq!(z.first(), z.last());
        let mut inner = z[..z.len() - 1].to_vec();
        inner.sort_unstable();
        assert_eq!(inner, g.vertices());
    }

    #[test]
    fn triple_triangle_is_rejected() {
        // The edge (0, 1) completes to a triangle through 2, 3 and 4.
        let g = Multigraph::from_edges(vec![
            (0, 1),
            (0, 2),
            (1, 2),
            (0, 3),
            (1, 3),
            (0, 4),
            (1, 4),
        ]);
        match find_zigzag(&g, None) {
            Err(Error::TripleTriangle { .. }) => {}
            other => panic!("expected a triple triangle error, got {:?}", other),
        }
    }

    #[test]
    fn k5_contains_triple_triangles() {
        assert!(matches!(
            find_zigzag(&complete(5), None),
            Err(Error::TripleTriangle { .. })
        ));
    }
}
