//! # Galleta
//!
//! Dots-and-boxes on a diamond ("galleta") board, with a negamax alpha-beta
//! computer player.
//!
//! ## Modules
//!
//! - [`game`]: board structure, reversible [`GameState`], shape generator
//! - [`bot`]: [`Evaluator`] and [`SearchStrategy`] traits, the heuristic
//!   evaluator, minimax search, random bot and [`AiPlayer`]
//! - [`render`]: plain-text board rendering
//! - [`config`]: game configuration loading and validation
//! - [`cli`]: interactive terminal front end
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use galleta::{
//!     AiPlayer, BoardShape, DotsEvaluator, GalletaShape, GameState, MinimaxAlphaBeta, PlayerId,
//! };
//!
//! let layout = GalletaShape::new(2).unwrap().build().unwrap();
//! let mut state = GameState::new(layout.board);
//! let search = Box::new(MinimaxAlphaBeta::new(DotsEvaluator));
//! let ai = AiPlayer::new(PlayerId::FIRST, search, 2).unwrap();
//!
//! let mv = ai.get_move(&mut state).unwrap();
//! let _result = state.apply(mv).unwrap();
//! assert_eq!(state.remaining_edges(), 35);
//! ```

pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod render;

pub use bot::*;
pub use config::*;
pub use error::*;
pub use game::*;
