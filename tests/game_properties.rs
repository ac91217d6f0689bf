use std::sync::Arc;

use galleta::{
    AiPlayer, AppliedResult, Board, BoardShape, Cell, DotsEvaluator, Edge, Evaluator, GalletaShape,
    GameError, GameState, MinimaxAlphaBeta, Move, Orientation, Outcome, PlayerId, SearchStrategy,
};
use proptest::prelude::*;

// ============================================================================
// HELPERS
// ============================================================================

fn galleta_state(radius: u32) -> GameState {
    let layout = GalletaShape::new(radius).unwrap().build().unwrap();
    GameState::new(layout.board)
}

fn minimax_player(player: PlayerId, depth: u32) -> AiPlayer {
    let strategy = Box::new(MinimaxAlphaBeta::new(DotsEvaluator));
    AiPlayer::new(player, strategy, depth).unwrap()
}

#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    edges: Vec<usize>,
    cells: Vec<usize>,
    owners: Vec<Option<PlayerId>>,
    scores: [u32; 2],
    current: PlayerId,
    remaining: usize,
    pending: usize,
}

fn snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        edges: state.edges_taken().ones().collect(),
        cells: state.cells_owned().ones().collect(),
        owners: state.cell_owners().to_vec(),
        scores: state.scores(),
        current: state.current_player(),
        remaining: state.remaining_edges(),
        pending: state.pending_undos(),
    }
}

fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let board = state.board();
    prop_assert_eq!(
        state.remaining_edges(),
        board.edge_count() - state.edges_taken().count_ones(..)
    );

    for cell in 0..board.cell_count() {
        let closed = board
            .cell_edges(cell)
            .iter()
            .all(|&e| state.is_edge_taken(e));
        prop_assert_eq!(state.cells_owned().contains(cell), closed);
        prop_assert_eq!(state.cell_owner(cell).is_some(), closed);
        prop_assert_eq!(state.count_drawn_edges(cell).unwrap() == 4, closed);
    }

    for player in [PlayerId::FIRST, PlayerId::SECOND] {
        let owned = state
            .cell_owners()
            .iter()
            .filter(|&&owner| owner == Some(player))
            .count();
        prop_assert_eq!(state.score(player) as usize, owned);
    }
    Ok(())
}

/// Plays one legal move per pick until the picks run out or the game ends.
fn play_picks(state: &mut GameState, picks: &[prop::sample::Index]) -> Vec<AppliedResult> {
    let mut history = Vec::new();
    for pick in picks {
        if state.is_terminal() {
            break;
        }
        let moves: Vec<Move> = state.generate_moves().collect();
        history.push(state.apply(*pick.get(&moves)).unwrap());
    }
    history
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_single_cell_game() {
    let edges = vec![
        Edge::new(0, 0, 1, Orientation::Horizontal),
        Edge::new(1, 1, 3, Orientation::Vertical),
        Edge::new(2, 2, 3, Orientation::Horizontal),
        Edge::new(3, 0, 2, Orientation::Vertical),
    ];
    let cells = vec![Cell::new(0, [0, 1, 2, 3])];
    let mut state = GameState::new(Arc::new(Board::new(4, edges, cells).unwrap()));

    let expected_players = [PlayerId::SECOND, PlayerId::FIRST, PlayerId::SECOND];
    for (edge, expected) in (0..3).zip(expected_players) {
        let result = state.apply(Move::new(edge)).unwrap();
        assert_eq!(result.captured_count(), 0);
        assert_eq!(state.current_player(), expected);
    }

    let last = state.apply(Move::new(3)).unwrap();
    assert_eq!(last.captured_cells(), &[0]);
    assert_eq!(state.current_player(), PlayerId::SECOND);
    assert_eq!(state.scores(), [0, 1]);
    assert!(state.is_terminal());
    assert_eq!(state.winner(), Ok(Outcome::Winner(PlayerId::SECOND)));
    assert_eq!(DotsEvaluator.evaluate(&state, PlayerId::SECOND), 10_000);
    assert_eq!(DotsEvaluator.evaluate(&state, PlayerId::FIRST), -10_000);

    state.undo(last);
    assert_eq!(state.scores(), [0, 0]);
    assert_eq!(state.remaining_edges(), 1);
    assert_eq!(state.winner(), Err(GameError::GameNotOver));
}

#[test]
fn test_ai_players_finish_a_game() {
    let mut state = galleta_state(2);
    let players = [
        minimax_player(PlayerId::FIRST, 2),
        minimax_player(PlayerId::SECOND, 1),
    ];

    while !state.is_terminal() {
        let mv = players[state.current_player().index()]
            .get_move(&mut state)
            .unwrap();
        let _result = state.apply(mv).unwrap();
    }

    let [a, b] = state.scores();
    assert_eq!(a + b, 13);
    let expected = if a > b {
        Outcome::Winner(PlayerId::FIRST)
    } else {
        Outcome::Winner(PlayerId::SECOND)
    };
    assert_eq!(state.winner(), Ok(expected));
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_undo_in_reverse_restores_initial_state(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..60),
    ) {
        let mut state = galleta_state(2);
        let initial = snapshot(&state);

        let history = play_picks(&mut state, &picks);
        prop_assert_eq!(state.pending_undos(), history.len());
        for result in history.into_iter().rev() {
            state.undo(result);
        }

        prop_assert_eq!(snapshot(&state), initial);
    }

    #[test]
    fn prop_invariants_hold_after_every_move(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..60),
    ) {
        let mut state = galleta_state(2);
        for pick in &picks {
            if state.is_terminal() {
                break;
            }
            let mover = state.current_player();
            let moves: Vec<Move> = state.generate_moves().collect();
            let result = state.apply(*pick.get(&moves)).unwrap();

            prop_assert_eq!(result.player(), mover);
            if result.captured_count() == 0 {
                prop_assert_eq!(state.current_player(), mover.other());
            } else {
                prop_assert_eq!(state.current_player(), mover);
            }
            for &cell in result.captured_cells() {
                prop_assert_eq!(state.cell_owner(cell), Some(mover));
            }
            check_invariants(&state)?;
        }
    }

    #[test]
    fn prop_generated_moves_are_exactly_the_free_edges(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..36),
    ) {
        let mut state = galleta_state(2);
        let _history = play_picks(&mut state, &picks);

        let moves: Vec<usize> = state.generate_moves().map(Move::edge_id).collect();
        let free: Vec<usize> = (0..state.board().edge_count())
            .filter(|&e| !state.is_edge_taken(e))
            .collect();
        prop_assert_eq!(&moves, &free);
        prop_assert_eq!(moves.len(), state.remaining_edges());
        for &edge in &moves {
            prop_assert!(state.clone().apply(Move::new(edge)).is_ok());
        }
        let taken: Vec<usize> = state.edges_taken().ones().collect();
        for edge in taken {
            prop_assert_eq!(
                state.apply(Move::new(edge)).err(),
                Some(GameError::EdgeAlreadyDrawn(edge))
            );
        }
    }

    #[test]
    fn prop_evaluation_is_zero_sum(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..60),
    ) {
        let mut state = galleta_state(2);
        let _history = play_picks(&mut state, &picks);

        let first = DotsEvaluator.evaluate(&state, PlayerId::FIRST);
        let second = DotsEvaluator.evaluate(&state, PlayerId::SECOND);
        prop_assert_eq!(first, -second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_search_returns_legal_move_and_restores_state(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..34),
        depth in 1u32..=2,
    ) {
        let mut state = galleta_state(2);
        let _history = play_picks(&mut state, &picks);
        prop_assume!(!state.is_terminal());

        let before = snapshot(&state);
        let player = state.current_player();
        let engine = MinimaxAlphaBeta::new(DotsEvaluator);
        let first = engine.search(&mut state, player, depth).unwrap();
        prop_assert_eq!(snapshot(&state), before);
        prop_assert!(!state.is_edge_taken(first.best_move.edge_id()));

        let second = engine.search(&mut state, player, depth).unwrap();
        prop_assert_eq!(first, second);
    }
}
