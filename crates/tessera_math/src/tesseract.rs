//! Tesseract (4D hypercube) wireframe dataset
//!
//! A tesseract has 16 vertices (all combinations of ±h for x,y,z,w) and
//! 32 edges. Every vertex has degree 4, so the edge graph is Eulerian and
//! the whole wireframe can be drawn as one closed walk of 33 indices that
//! visits each edge exactly once.

use crate::Vec4;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Number of tesseract vertices
pub const VERTEX_COUNT: usize = 16;
/// Number of tesseract edges
pub const EDGE_COUNT: usize = 32;
/// Length of a closed Euler walk over all edges (first index repeated at the end)
pub const CYCLE_LENGTH: usize = EDGE_COUNT + 1;

/// Euler cycle over the standard vertex numbering (bit 0 = x, 1 = y, 2 = z, 3 = w)
pub const STANDARD_EDGE_CYCLE: [usize; CYCLE_LENGTH] = [
    0, 1, 3, 2, 0, 4, 5, 7, 6, 4, 12, 13, 15, 14, 12, 8, 9,
    13, 5, 1, 9, 11, 15, 7, 3, 11, 10, 14, 6, 2, 10, 8, 0,
];

/// Why a vertex/edge dataset was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Wrong number of vertices
    VertexCount(usize),
    /// A vertex has a NaN or infinite component
    NonFiniteVertex(usize),
    /// Wrong number of cycle indices
    CycleLength(usize),
    /// Cycle index outside the vertex array
    IndexOutOfRange { position: usize, index: usize },
    /// The walk does not return to its starting vertex
    OpenCycle { first: usize, last: usize },
    /// Two consecutive indices are not joined by a hypercube edge
    NotAnEdge { from: usize, to: usize },
    /// A hypercube edge is traversed more than once
    DuplicateEdge { from: usize, to: usize },
    /// The vertices do not form an axis-aligned hypercube (wrong edge count)
    NotAHypercube { edges: usize },
    /// Side length of a generated tesseract is zero, negative or not finite
    InvalidSize(f32),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::VertexCount(n) => {
                write!(f, "expected {} vertices, got {}", VERTEX_COUNT, n)
            }
            DatasetError::NonFiniteVertex(i) => write!(f, "vertex {} is not finite", i),
            DatasetError::CycleLength(n) => {
                write!(f, "expected {} cycle indices, got {}", CYCLE_LENGTH, n)
            }
            DatasetError::IndexOutOfRange { position, index } => {
                write!(f, "cycle entry {} references missing vertex {}", position, index)
            }
            DatasetError::OpenCycle { first, last } => {
                write!(f, "cycle starts at {} but ends at {}", first, last)
            }
            DatasetError::NotAnEdge { from, to } => {
                write!(f, "vertices {} and {} are not joined by an edge", from, to)
            }
            DatasetError::DuplicateEdge { from, to } => {
                write!(f, "edge {}-{} is traversed more than once", from, to)
            }
            DatasetError::NotAHypercube { edges } => {
                write!(f, "vertices form {} edges, expected {}", edges, EDGE_COUNT)
            }
            DatasetError::InvalidSize(size) => {
                write!(f, "tesseract size must be positive and finite, got {}", size)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Serializable form of a dataset, as stored in RON asset files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseractData {
    pub vertices: Vec<Vec4>,
    pub cycle: Vec<usize>,
}

/// A validated tesseract wireframe: 16 vertices plus a 33-entry Euler cycle
#[derive(Clone, Debug)]
pub struct Tesseract4D {
    vertices: [Vec4; VERTEX_COUNT],
    cycle: [usize; CYCLE_LENGTH],
}

impl Tesseract4D {
    /// The standard tesseract with the given full side length
    pub fn new(size: f32) -> Self {
        let h = size * 0.5;
        // Vertex i takes +h on axis d when bit d of i is set
        let vertices = std::array::from_fn(|i| {
            let c = |bit: usize| if (i >> bit) & 1 == 1 { h } else { -h };
            Vec4::new(c(0), c(1), c(2), c(3))
        });

        Self {
            vertices,
            cycle: STANDARD_EDGE_CYCLE,
        }
    }

    /// The standard tesseract from a configured size, validated like any
    /// external dataset
    pub fn with_size(size: f32) -> Result<Self, DatasetError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(DatasetError::InvalidSize(size));
        }
        let generated = Self::new(size);
        Self::from_parts(generated.vertices(), generated.cycle())
    }

    /// Build from externally supplied data, checking every invariant.
    ///
    /// Adjacency is geometric: two vertices are joined by an edge when they
    /// differ in exactly one coordinate.
    pub fn from_parts(vertices: &[Vec4], cycle: &[usize]) -> Result<Self, DatasetError> {
        if vertices.len() != VERTEX_COUNT {
            return Err(DatasetError::VertexCount(vertices.len()));
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(DatasetError::NonFiniteVertex(i));
        }
        if cycle.len() != CYCLE_LENGTH {
            return Err(DatasetError::CycleLength(cycle.len()));
        }
        if let Some((position, &index)) = cycle.iter().enumerate().find(|(_, &i)| i >= VERTEX_COUNT) {
            return Err(DatasetError::IndexOutOfRange { position, index });
        }
        if cycle[0] != cycle[CYCLE_LENGTH - 1] {
            return Err(DatasetError::OpenCycle {
                first: cycle[0],
                last: cycle[CYCLE_LENGTH - 1],
            });
        }

        let edge_total = (0..VERTEX_COUNT)
            .flat_map(|a| ((a + 1)..VERTEX_COUNT).map(move |b| (a, b)))
            .filter(|&(a, b)| is_edge(vertices[a], vertices[b]))
            .count();
        if edge_total != EDGE_COUNT {
            return Err(DatasetError::NotAHypercube { edges: edge_total });
        }

        // 32 distinct edges in a 32-step walk means every edge appears once
        let mut seen = HashSet::with_capacity(EDGE_COUNT);
        for pair in cycle.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !is_edge(vertices[from], vertices[to]) {
                return Err(DatasetError::NotAnEdge { from, to });
            }
            if !seen.insert((from.min(to), from.max(to))) {
                return Err(DatasetError::DuplicateEdge { from, to });
            }
        }

        let mut verts = [Vec4::ZERO; VERTEX_COUNT];
        verts.copy_from_slice(vertices);
        let mut indices = [0usize; CYCLE_LENGTH];
        indices.copy_from_slice(cycle);

        Ok(Self {
            vertices: verts,
            cycle: indices,
        })
    }

    /// Validate a deserialized dataset
    pub fn from_data(data: &TesseractData) -> Result<Self, DatasetError> {
        Self::from_parts(&data.vertices, &data.cycle)
    }

    /// Serializable copy of this dataset
    pub fn to_data(&self) -> TesseractData {
        TesseractData {
            vertices: self.vertices.to_vec(),
            cycle: self.cycle.to_vec(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec4; VERTEX_COUNT] {
        &self.vertices
    }

    #[inline]
    pub fn cycle(&self) -> &[usize; CYCLE_LENGTH] {
        &self.cycle
    }

    /// The 32 edges as consecutive index pairs of the cycle
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cycle.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Default for Tesseract4D {
    fn default() -> Self {
        Self::new(2.0)
    }
}

/// Two vertices share an edge when exactly one coordinate differs
fn is_edge(a: Vec4, b: Vec4) -> bool {
    let differing = a
        .to_array()
        .iter()
        .zip(b.to_array().iter())
        .filter(|(p, q)| p != q)
        .count();
    differing == 1
}
