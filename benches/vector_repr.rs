use k5chains::{
    chains::decompose,
    encode::vector_form,
    expansion::double_triangle_expansion,
    multigraph::{complete, Multigraph},
    synthesize::synthesize,
    zigzag::find_triangle,
};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Grow a descendant of the given order by repeated double-triangle
/// expansion, alternating the triangle orientation so the result has
/// a mix of chains and chords rather than a single closed zigzag.
fn descendant(order: usize) -> Multigraph {
    let mut g = complete(5);
    let mut flip = false;
    while g.order() < order {
        let t = find_triangle(&g, None).unwrap();
        let tri = if flip { [t[1], t[0], t[2]] } else { t };
        g = double_triangle_expansion(&g, &tri, 0).unwrap();
        flip = !flip;
    }
    g
}

fn chain_decomposition(c: &mut Criterion) {
    let g = descendant(40);
    c.bench_with_input(
        BenchmarkId::new("chain decomposition", "order 40"),
        &g,
        |b, g| {
            b.iter(|| decompose(g, true).unwrap());
        },
    );
}

fn encoding(c: &mut Criterion) {
    let g = descendant(40);
    c.bench_with_input(BenchmarkId::new("vector form", "order 40"), &g, |b, g| {
        b.iter(|| vector_form(g).unwrap());
    });
}

fn synthesis(c: &mut Criterion) {
    let v = vector_form(&descendant(40)).unwrap();
    c.bench_with_input(BenchmarkId::new("synthesize", "order 40"), &v, |b, v| {
        b.iter(|| synthesize(&v.chains, &v.chords).unwrap());
    });
}

criterion_group!(benches, chain_decomposition, encoding, synthesis);
criterion_main!(benches);
