use std::collections::HashMap;
use std::sync::Arc;

use crate::{Board, BoardError, Cell, Edge, Orientation};

/// Integer lattice position of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A board together with the lattice position of each of its vertices.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub board: Arc<Board>,
    /// `points[v]` is the position of vertex `v`.
    pub points: Vec<Point>,
}

impl BoardLayout {
    pub fn vertex_at(&self, point: Point) -> Option<usize> {
        self.points.iter().position(|&p| p == point)
    }
}

/// Produces a board layout.
pub trait BoardShape {
    fn build(&self) -> Result<BoardLayout, BoardError>;
}

/// Diamond ("galleta") shaped board: rows widen towards a doubled middle row
/// and narrow again below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalletaShape {
    radius: u32,
}

impl GalletaShape {
    pub const MIN_RADIUS: u32 = 2;
    pub const MAX_RADIUS: u32 = 10;

    pub fn new(radius: u32) -> Result<Self, BoardError> {
        if radius < Self::MIN_RADIUS {
            return Err(BoardError::RadiusTooSmall(radius));
        }
        if radius > Self::MAX_RADIUS {
            return Err(BoardError::RadiusTooLarge(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Difficulty label shown next to the board size.
    pub fn complexity(&self) -> &'static str {
        match self.radius {
            2 => "Very easy (tutorial)",
            3 => "Easy",
            4 => "Medium",
            5 => "Hard",
            _ => "Very hard",
        }
    }

    fn points(&self) -> Result<Vec<Point>, BoardError> {
        let r = i32::try_from(self.radius).map_err(|_| BoardError::RadiusTooLarge(self.radius))?;
        let mut points = Vec::new();
        let mut push_row = |y: i32, half_width: i32| {
            for x in -half_width..=half_width + 1 {
                points.push(Point::new(x, y));
            }
        };

        for y in -r..=0 {
            push_row(y, r - y.abs());
        }
        // The widest row appears twice.
        push_row(1, r);
        for y in 2..=r + 1 {
            push_row(y, r - (y - 1));
        }
        Ok(points)
    }
}

impl BoardShape for GalletaShape {
    fn build(&self) -> Result<BoardLayout, BoardError> {
        let points = self.points()?;
        let index: HashMap<Point, usize> =
            points.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut edges = Vec::new();
        let mut edge_lookup: HashMap<(usize, usize), usize> = HashMap::new();
        for (a, point) in points.iter().enumerate() {
            let neighbours = [
                (Point::new(point.x + 1, point.y), Orientation::Horizontal),
                (Point::new(point.x, point.y + 1), Orientation::Vertical),
            ];
            for (neighbour, orientation) in neighbours {
                if let Some(&b) = index.get(&neighbour) {
                    let id = edges.len();
                    edges.push(Edge::new(id, a, b, orientation));
                    edge_lookup.insert((a.min(b), a.max(b)), id);
                }
            }
        }

        let find = |a: usize, b: usize| edge_lookup.get(&(a.min(b), a.max(b))).copied();
        let mut cells = Vec::new();
        for &Point { x, y } in &points {
            let (Some(&tl), Some(&tr), Some(&bl), Some(&br)) = (
                index.get(&Point::new(x, y)),
                index.get(&Point::new(x + 1, y)),
                index.get(&Point::new(x, y + 1)),
                index.get(&Point::new(x + 1, y + 1)),
            ) else {
                continue;
            };
            if let (Some(top), Some(right), Some(bottom), Some(left)) =
                (find(tl, tr), find(tr, br), find(bl, br), find(tl, bl))
            {
                cells.push(Cell::new(cells.len(), [top, right, bottom, left]));
            }
        }

        let board = Board::new(points.len(), edges, cells)?;
        Ok(BoardLayout {
            board: Arc::new(board),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_small_radius() {
        assert_eq!(GalletaShape::new(1), Err(BoardError::RadiusTooSmall(1)));
        assert!(GalletaShape::new(2).is_ok());
    }

    #[test]
    fn test_rejects_large_radius() {
        assert!(GalletaShape::new(GalletaShape::MAX_RADIUS).is_ok());
        assert_eq!(
            GalletaShape::new(GalletaShape::MAX_RADIUS + 1),
            Err(BoardError::RadiusTooLarge(GalletaShape::MAX_RADIUS + 1))
        );
        assert_eq!(
            GalletaShape::new(2_147_483_648),
            Err(BoardError::RadiusTooLarge(2_147_483_648))
        );
    }

    #[test]
    fn test_largest_radius_builds() {
        let layout = GalletaShape::new(GalletaShape::MAX_RADIUS)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(layout.points.len(), layout.board.vertex_count());
        assert!(layout.board.cell_count() > 0);
    }

    #[test]
    fn test_complexity_labels() {
        let label = |radius| GalletaShape::new(radius).unwrap().complexity();
        assert_eq!(label(2), "Very easy (tutorial)");
        assert_eq!(label(3), "Easy");
        assert_eq!(label(4), "Medium");
        assert_eq!(label(5), "Hard");
        assert_eq!(label(8), "Very hard");
    }

    #[test]
    fn test_radius_two_counts() {
        let layout = GalletaShape::new(2).unwrap().build().unwrap();
        assert_eq!(layout.board.vertex_count(), 24);
        assert_eq!(layout.board.edge_count(), 36);
        assert_eq!(layout.board.cell_count(), 13);
        assert_eq!(layout.points.len(), 24);
    }

    #[test]
    fn test_first_cell_is_the_top_square() {
        let layout = GalletaShape::new(2).unwrap().build().unwrap();
        let cell = layout.board.cells()[0];
        let board = &layout.board;

        // Top edge joins the two vertices of the first row.
        let top = board.edges()[cell.edge_ids[0]];
        assert_eq!(top.orientation, Orientation::Horizontal);
        assert_eq!(layout.points[top.vertex_a], Point::new(0, -2));
        assert_eq!(layout.points[top.vertex_b], Point::new(1, -2));

        let left = board.edges()[cell.edge_ids[3]];
        assert_eq!(left.orientation, Orientation::Vertical);
        assert_eq!(layout.points[left.vertex_b], Point::new(0, -1));
    }

    #[test]
    fn test_every_edge_touches_at_most_two_cells() {
        for radius in 2..=5 {
            let layout = GalletaShape::new(radius).unwrap().build().unwrap();
            let board = &layout.board;
            let mut interior = 0;
            for edge in 0..board.edge_count() {
                let n = board.edges_to_cells(edge).len();
                assert!((1..=2).contains(&n), "edge {edge} touches {n} cells");
                if n == 2 {
                    interior += 1;
                }
            }
            // Each cell has four sides; interior edges are counted twice.
            assert_eq!(board.edge_count() + interior, 4 * board.cell_count());
        }
    }

    #[test]
    fn test_shape_is_vertically_symmetric() {
        let layout = GalletaShape::new(3).unwrap().build().unwrap();
        // Mirror y -> 1 - y maps the diamond onto itself.
        for p in &layout.points {
            assert!(
                layout.vertex_at(Point::new(p.x, 1 - p.y)).is_some(),
                "{p:?} has no mirror"
            );
        }
    }
}
