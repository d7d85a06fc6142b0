use thiserror::Error;

/// Errors raised by the decomposition and vector machinery. All of these
/// are fatal precondition violations and propagate uncaught; the expected
/// "no zigzag here" outcome is an `Ok(None)`, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An open edge had more than one triangle-completing common
    /// neighbor, so the graph contains a triple triangle and is not a
    /// pseudo-descendant.
    #[error("triple triangle at edge ({u}, {v}): graph is not a pseudo-descendant")]
    TripleTriangle { u: u64, v: u64 },

    /// A chord endpoint could not be resolved to a position index. This
    /// indicates a mismatch between the decomposition and the graph, not
    /// a property of valid input.
    #[error("vertex {vertex} has no attachment position")]
    AmbiguousPosition { vertex: u64 },

    /// A chain or chord vector inconsistent with the position and degree
    /// budget it implies.
    #[error("malformed vector: {reason}")]
    MalformedVector { reason: String },

    /// The vertices handed to an expansion do not form a triangle, or
    /// the expansion choice points past the middle vertex's neighbors.
    #[error("vertices {0:?} do not form an expandable triangle")]
    NotATriangle(Vec<u64>),

    /// The vertices handed to a reduction do not form a proper double
    /// triangle.
    #[error("vertices {0:?} do not form a proper double triangle")]
    NotADoubleTriangle(Vec<u64>),

    /// The induced subgraph on a discovered zigzag vertex set could not
    /// be walked as a zigzag. Like `TripleTriangle`, this means the
    /// input violates the pseudo-descendant precondition.
    #[error("induced subgraph on {0:?} is not a zigzag")]
    NotAZigzag(Vec<u64>),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedVector {
            reason: reason.into(),
        }
    }
}
