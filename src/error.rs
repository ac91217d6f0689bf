//! Error types for board construction, game play and configuration.

use std::path::PathBuf;

/// Structural problems found while building a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("vertex count must be positive")]
    NonPositiveVertexCount,

    #[error("board must have at least one edge")]
    NoEdges,

    #[error("edge at index {index} has incorrect id {id}")]
    EdgeIdMismatch { index: usize, id: usize },

    #[error("cell at index {index} has incorrect id {id}")]
    CellIdMismatch { index: usize, id: usize },

    #[error("cell {cell} references invalid edge {edge}")]
    CellEdgeOutOfRange { cell: usize, edge: usize },

    #[error("edge {edge} references invalid vertex {vertex} (vertex count {vertex_count})")]
    EdgeVertexOutOfRange {
        edge: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("edge {edge} connects vertex {vertex} to itself")]
    DegenerateEdge { edge: usize, vertex: usize },

    #[error("cell {cell} lists edge {edge} more than once")]
    DuplicateCellEdge { cell: usize, edge: usize },

    #[error("radius must be at least 2, got {0}")]
    RadiusTooSmall(u32),

    #[error("radius must be at most 10, got {0}")]
    RadiusTooLarge(u32),
}

/// Contract violations raised by the game state, the search and the AI player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid edge id {edge} (board has {edge_count} edges)")]
    EdgeOutOfRange { edge: usize, edge_count: usize },

    #[error("edge {0} has already been drawn")]
    EdgeAlreadyDrawn(usize),

    #[error("invalid cell id {cell} (board has {cell_count} cells)")]
    CellOutOfRange { cell: usize, cell_count: usize },

    #[error("player must be 0 or 1, got {0}")]
    InvalidPlayer(usize),

    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    #[error("cannot determine winner before the game ends")]
    GameNotOver,

    #[error("the game is already over")]
    GameOver,

    #[error("it is not player {player}'s turn (current player is {current})")]
    NotPlayersTurn { player: usize, current: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::CellEdgeOutOfRange { cell: 2, edge: 40 };
        assert_eq!(err.to_string(), "cell 2 references invalid edge 40");
        assert_eq!(
            BoardError::RadiusTooLarge(11).to_string(),
            "radius must be at most 10, got 11"
        );
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::NotPlayersTurn {
            player: 1,
            current: 0,
        };
        assert_eq!(
            err.to_string(),
            "it is not player 1's turn (current player is 0)"
        );
        assert_eq!(
            GameError::EdgeAlreadyDrawn(7).to_string(),
            "edge 7 has already been drawn"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: depth must be >= 1"
        );
    }
}
