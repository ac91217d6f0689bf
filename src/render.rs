//! Plain-text board rendering.
//!
//! Every lattice column is five characters wide. The vertex row holds
//! `o` plus a four character horizontal slot, and the row beneath it holds
//! a three character vertical slot plus a two character cell slot.

use std::collections::HashMap;
use std::fmt::Write;

use crate::{BoardLayout, GameState, Point};

const EMPTY_COLUMN: &str = "     ";

/// Renders `state` on `layout` with a score header and a legend.
pub fn render(layout: &BoardLayout, state: &GameState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_header(&mut out, state);
    out.push('\n');
    let _ = write_grid(&mut out, layout, state);
    out.push('\n');
    out.push_str(LEGEND);
    out
}

const LEGEND: &str =
    "  Legend: o = dot, ---- / | = drawn line, 12 = free line id, 0 / 1 = cell owner\n";

fn write_header(out: &mut String, state: &GameState) -> std::fmt::Result {
    let [first, second] = state.scores();
    writeln!(out, "  Player 0: {first} cells    Player 1: {second} cells")?;
    if state.is_terminal() {
        writeln!(out, "  Game over")
    } else {
        writeln!(out, "  To move: Player {}", state.current_player())
    }
}

fn write_grid(out: &mut String, layout: &BoardLayout, state: &GameState) -> std::fmt::Result {
    let Some(bounds) = Bounds::of(&layout.points) else {
        return Ok(());
    };
    let board = &layout.board;
    let vertices: HashMap<Point, usize> = layout
        .points
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, i))
        .collect();
    // A horizontal edge is the top side of at most one cell.
    let cell_below: HashMap<usize, usize> = board
        .cells()
        .iter()
        .map(|cell| (cell.edge_ids[0], cell.id))
        .collect();

    let edge_to =
        |v: usize, point: Point| vertices.get(&point).and_then(|&w| board.find_edge(v, w));

    for y in bounds.min_y..=bounds.max_y {
        let mut dots = String::from("  ");
        let mut sides = String::from("  ");
        for x in bounds.min_x..=bounds.max_x {
            let Some(&v) = vertices.get(&Point::new(x, y)) else {
                dots.push_str(EMPTY_COLUMN);
                sides.push_str(EMPTY_COLUMN);
                continue;
            };

            dots.push('o');
            let right = edge_to(v, Point::new(x + 1, y));
            match right {
                Some(edge) if state.is_edge_taken(edge) => dots.push_str("----"),
                Some(edge) => write!(dots, "{edge:^4}")?,
                None => dots.push_str("    "),
            }

            match edge_to(v, Point::new(x, y + 1)) {
                Some(edge) if state.is_edge_taken(edge) => sides.push_str("|  "),
                Some(edge) => write!(sides, "{edge:<3}")?,
                None => sides.push_str("   "),
            }
            let owner = right
                .and_then(|edge| cell_below.get(&edge))
                .and_then(|&cell| state.cell_owner(cell));
            match owner {
                Some(owner) => write!(sides, "{:<2}", owner.index())?,
                None => sides.push_str("  "),
            }
        }
        writeln!(out, "{}", dots.trim_end())?;
        if y < bounds.max_y {
            writeln!(out, "{}", sides.trim_end())?;
        }
    }
    Ok(())
}

struct Bounds {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl Bounds {
    fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }
}
