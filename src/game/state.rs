use std::fmt::Display;
use std::sync::Arc;

use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

use crate::{Board, GameError, PlayerId};

/// Drawing a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(usize);

impl Move {
    pub fn new(edge_id: usize) -> Self {
        Move(edge_id)
    }

    pub fn edge_id(self) -> usize {
        self.0
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move: Edge {}", self.0)
    }
}

/// Everything needed to invert one [`GameState::apply`].
///
/// Not `Clone`: [`GameState::undo`] consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an applied move must be undone with GameState::undo or dropped explicitly"]
pub struct AppliedResult {
    mv: Move,
    captured: SmallVec<[usize; 2]>,
    player: PlayerId,
    ply: usize,
}

impl AppliedResult {
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Cells completed by this move, in adjacency order.
    pub fn captured_cells(&self) -> &[usize] {
        &self.captured
    }

    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }

    /// The player who drew the edge.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// True when the mover keeps the turn.
    pub fn gave_extra_turn(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl Display for AppliedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.captured.is_empty() {
            write!(
                f,
                "Applied {} by Player {}: No captures",
                self.mv, self.player
            )
        } else {
            write!(
                f,
                "Applied {} by Player {}: Captured {} cell(s)",
                self.mv,
                self.player,
                self.captured.len()
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerId),
    Tie,
}

/// Mutable game position over a shared [`Board`].
///
/// The only way to advance the game is [`apply`](Self::apply), and the only
/// way back is [`undo`](Self::undo) with the results presented in reverse
/// order of application.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Arc<Board>,
    edges_taken: FixedBitSet,
    cells_owned: FixedBitSet,
    cell_owners: Vec<Option<PlayerId>>,
    scores: [u32; 2],
    current_player: PlayerId,
    remaining_edges: usize,
    ply: usize,
}

impl GameState {
    /// New game on `board` with player 0 to move.
    pub fn new(board: Arc<Board>) -> Self {
        Self::with_starting_player(board, PlayerId::FIRST)
    }

    pub fn with_starting_player(board: Arc<Board>, starting_player: PlayerId) -> Self {
        let edge_count = board.edge_count();
        let cell_count = board.cell_count();
        Self {
            board,
            edges_taken: FixedBitSet::with_capacity(edge_count),
            cells_owned: FixedBitSet::with_capacity(cell_count),
            cell_owners: vec![None; cell_count],
            scores: [0; 2],
            current_player: starting_player,
            remaining_edges: edge_count,
            ply: 0,
        }
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn edges_taken(&self) -> &FixedBitSet {
        &self.edges_taken
    }

    pub fn cells_owned(&self) -> &FixedBitSet {
        &self.cells_owned
    }

    pub fn cell_owners(&self) -> &[Option<PlayerId>] {
        &self.cell_owners
    }

    /// Owner of `cell`, or `None` if it is free or out of range.
    pub fn cell_owner(&self, cell: usize) -> Option<PlayerId> {
        self.cell_owners.get(cell).copied().flatten()
    }

    pub fn is_edge_taken(&self, edge: usize) -> bool {
        self.edges_taken.contains(edge)
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn remaining_edges(&self) -> usize {
        self.remaining_edges
    }

    /// Number of applied moves not yet undone.
    pub fn pending_undos(&self) -> usize {
        self.ply
    }

    pub fn is_terminal(&self) -> bool {
        self.remaining_edges == 0
    }

    /// Legal moves (undrawn edges) in ascending edge order.
    pub fn generate_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.edges_taken.zeroes().map(Move::new)
    }

    /// Draws the edge of `mv` for the current player.
    ///
    /// Completing cells awards them to the mover, who then keeps the turn;
    /// otherwise the turn passes to the opponent.
    pub fn apply(&mut self, mv: Move) -> Result<AppliedResult, GameError> {
        let edge = mv.edge_id();
        let edge_count = self.board.edge_count();
        if edge >= edge_count {
            return Err(GameError::EdgeOutOfRange { edge, edge_count });
        }
        if self.edges_taken.contains(edge) {
            return Err(GameError::EdgeAlreadyDrawn(edge));
        }
        Ok(self.apply_unchecked(mv))
    }

    /// Search hot path: `mv` must come from [`generate_moves`](Self::generate_moves).
    pub(crate) fn apply_unchecked(&mut self, mv: Move) -> AppliedResult {
        let edge = mv.edge_id();
        debug_assert!(
            !self.edges_taken.contains(edge),
            "edge {edge} already drawn"
        );

        self.edges_taken.insert(edge);
        self.remaining_edges -= 1;

        let player = self.current_player;
        let mut captured = SmallVec::new();
        for &cell in self.board.edges_to_cells(edge) {
            if self.cells_owned.contains(cell) {
                continue;
            }
            let drawn = self
                .board
                .cell_edges(cell)
                .iter()
                .filter(|&&e| self.edges_taken.contains(e))
                .count();
            if drawn == crate::CELL_SIDES {
                self.cells_owned.insert(cell);
                self.cell_owners[cell] = Some(player);
                self.scores[player.index()] += 1;
                captured.push(cell);
            }
        }

        if captured.is_empty() {
            self.current_player = player.other();
        }

        let result = AppliedResult {
            mv,
            captured,
            player,
            ply: self.ply,
        };
        self.ply += 1;
        result
    }

    /// Reverts `result`. Results must be undone in exact reverse order of application.
    pub fn undo(&mut self, result: AppliedResult) {
        debug_assert_eq!(
            result.ply + 1,
            self.ply,
            "undo out of order: result applied at ply {}, state at ply {}",
            result.ply, self.ply
        );
        let edge = result.mv.edge_id();
        debug_assert!(self.edges_taken.contains(edge), "edge {edge} is not drawn");

        self.ply -= 1;
        self.edges_taken.set(edge, false);
        self.remaining_edges += 1;

        for &cell in &result.captured {
            self.cells_owned.set(cell, false);
            self.cell_owners[cell] = None;
            self.scores[result.player.index()] -= 1;
        }

        if result.captured.is_empty() {
            self.current_player = result.player;
        }
    }

    pub fn winner(&self) -> Result<Outcome, GameError> {
        if !self.is_terminal() {
            return Err(GameError::GameNotOver);
        }
        let [first, second] = self.scores;
        Ok(match first.cmp(&second) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerId::FIRST),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerId::SECOND),
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }

    /// How many of the cell's four edges are drawn.
    pub fn count_drawn_edges(&self, cell: usize) -> Result<usize, GameError> {
        let cell_count = self.board.cell_count();
        if cell >= cell_count {
            return Err(GameError::CellOutOfRange { cell, cell_count });
        }
        Ok(self.drawn_edges(cell))
    }

    pub(crate) fn drawn_edges(&self, cell: usize) -> usize {
        self.board
            .cell_edges(cell)
            .iter()
            .filter(|&&e| self.edges_taken.contains(e))
            .count()
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GameState: Player {}, Scores [{}, {}], Remaining Edges: {}",
            self.current_player, self.scores[0], self.scores[1], self.remaining_edges
        )
    }
}
