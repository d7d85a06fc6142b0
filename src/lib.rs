//! Chain and zigzag decompositions of the 4-regular descendants of K5.
//!
//! A descendant of K5 is any 4-regular multigraph reachable from K5 by
//! double-triangle expansions. Its triangles organize into zigzags,
//! the zigzags glue end to end into chains, and the edges left over
//! once the chains are subtracted are its chords. Reading triangle
//! counts and chord lengths off a canonicalized decomposition gives a
//! compact vector representation that is invariant under relabeling
//! and can be turned back into the graph.
//!
//! The usual round trip is [`encode::vector_form`] one way and
//! [`synthesize::synthesize`] the other; [`expansion`] holds the
//! double-triangle moves that generate descendants in the first place.

pub mod canonical;
pub mod chains;
pub mod encode;
pub mod error;
pub mod expansion;
pub mod multigraph;
pub mod synthesize;
pub mod vector;
pub mod zigzag;

pub use crate::chains::{decompose, Chain, ChainDecomposition, Zigzag};
pub use crate::encode::{vector_form, vector_forms};
pub use crate::error::Error;
pub use crate::expansion::{
    double_triangle_ancestor, double_triangle_expansion, double_triangle_reduction,
    is_k5_descendant,
};
pub use crate::multigraph::Multigraph;
pub use crate::synthesize::synthesize;
pub use crate::vector::VectorRepr;
