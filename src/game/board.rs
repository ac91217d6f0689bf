use std::fmt::Display;

use smallvec::SmallVec;

use crate::BoardError;

/// Number of edges bounding every cell.
pub const CELL_SIDES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A line between two adjacent vertices. Drawing it is a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: usize,
    pub vertex_a: usize,
    pub vertex_b: usize,
    pub orientation: Orientation,
}

impl Edge {
    pub fn new(id: usize, vertex_a: usize, vertex_b: usize, orientation: Orientation) -> Self {
        Self {
            id,
            vertex_a,
            vertex_b,
            orientation,
        }
    }

    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.vertex_a == a && self.vertex_b == b) || (self.vertex_a == b && self.vertex_b == a)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        };
        write!(
            f,
            "Edge {}: {} -> {} ({})",
            self.id, self.vertex_a, self.vertex_b, tag
        )
    }
}

/// A unit square, captured once its four edges (top, right, bottom, left) are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: usize,
    pub edge_ids: [usize; CELL_SIDES],
}

impl Cell {
    pub fn new(id: usize, edge_ids: [usize; CELL_SIDES]) -> Self {
        Self { id, edge_ids }
    }
}

/// Immutable graph of vertices, edges and cells with precomputed adjacency.
///
/// Built once (usually by a [`BoardShape`](crate::BoardShape)) and shared
/// read-only between every game state played on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    vertex_count: usize,
    edges: Vec<Edge>,
    cells: Vec<Cell>,
    edges_to_cells: Vec<SmallVec<[usize; 2]>>,
    cell_edges: Vec<[usize; CELL_SIDES]>,
}

impl Board {
    /// Validates the structure and precomputes the edge/cell mappings.
    pub fn new(
        vertex_count: usize,
        edges: Vec<Edge>,
        cells: Vec<Cell>,
    ) -> Result<Self, BoardError> {
        if vertex_count == 0 {
            return Err(BoardError::NonPositiveVertexCount);
        }
        if edges.is_empty() {
            return Err(BoardError::NoEdges);
        }

        for (index, edge) in edges.iter().enumerate() {
            if edge.id != index {
                return Err(BoardError::EdgeIdMismatch {
                    index,
                    id: edge.id,
                });
            }
            for vertex in [edge.vertex_a, edge.vertex_b] {
                if vertex >= vertex_count {
                    return Err(BoardError::EdgeVertexOutOfRange {
                        edge: edge.id,
                        vertex,
                        vertex_count,
                    });
                }
            }
            if edge.vertex_a == edge.vertex_b {
                return Err(BoardError::DegenerateEdge {
                    edge: edge.id,
                    vertex: edge.vertex_a,
                });
            }
        }

        for (index, cell) in cells.iter().enumerate() {
            if cell.id != index {
                return Err(BoardError::CellIdMismatch {
                    index,
                    id: cell.id,
                });
            }
            if let Some(&edge) = cell.edge_ids.iter().find(|&&e| e >= edges.len()) {
                return Err(BoardError::CellEdgeOutOfRange {
                    cell: cell.id,
                    edge,
                });
            }
            for (i, &edge) in cell.edge_ids.iter().enumerate() {
                if cell.edge_ids[..i].contains(&edge) {
                    return Err(BoardError::DuplicateCellEdge {
                        cell: cell.id,
                        edge,
                    });
                }
            }
        }

        let mut edges_to_cells = vec![SmallVec::new(); edges.len()];
        for cell in &cells {
            for &edge in &cell.edge_ids {
                edges_to_cells[edge].push(cell.id);
            }
        }
        let cell_edges = cells.iter().map(|cell| cell.edge_ids).collect();

        Ok(Self {
            vertex_count,
            edges,
            cells,
            edges_to_cells,
            cell_edges,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells (zero, one or two) bounded by `edge`. Panics if `edge` is out of range.
    pub fn edges_to_cells(&self, edge: usize) -> &[usize] {
        &self.edges_to_cells[edge]
    }

    /// The four edges of `cell`. Panics if `cell` is out of range.
    pub fn cell_edges(&self, cell: usize) -> &[usize; CELL_SIDES] {
        &self.cell_edges[cell]
    }

    /// Id of the edge joining two vertices, if any.
    pub fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.edges
            .iter()
            .find(|edge| edge.connects(a, b))
            .map(|edge| edge.id)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Board: {} vertices, {} edges, {} cells",
            self.vertex_count,
            self.edges.len(),
            self.cells.len()
        )
    }
}
