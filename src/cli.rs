//! Interactive terminal front end: main menu, game setup and the game loop.
//!
//! Input goes through [`LineSource`] so the loop can be driven by rustyline
//! in the binary and by scripted lines in tests.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

use crate::render::render;
use crate::{
    AiPlayer, AppliedResult, BoardLayout, BoardShape, DotsEvaluator, GalletaShape, GameConfig,
    GameMode, GameState, MinimaxAlphaBeta, Move, Outcome, PlayerId,
};

/// Somewhere to read user input from, one line at a time.
pub trait LineSource {
    /// Returns `None` once the input is closed.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Line editor on the controlling terminal.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialise line editor")?;
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                record_history(self.editor.add_history_entry(line.as_str()));
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reports whether a line made it into the editor history. Failures are
/// logged and otherwise ignored.
fn record_history(result: rustyline::Result<bool>) -> bool {
    match result {
        Ok(added) => added,
        Err(e) => {
            warn!(error = %e, "failed to record input history");
            false
        }
    }
}

/// Pre-recorded input lines.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// A parsed line of input during a human turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw(Move),
    Surrender,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Some(Command::Surrender);
    }
    input.parse().ok().map(|edge| Command::Draw(Move::new(edge)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(GameMode),
    Instructions,
    Quit,
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Play(GameMode::HumanVsAi)),
        "2" => Some(MenuChoice::Play(GameMode::AiVsAi)),
        "3" => Some(MenuChoice::Play(GameMode::HumanVsHuman)),
        "4" => Some(MenuChoice::Instructions),
        "5" | "q" => Some(MenuChoice::Quit),
        _ => None,
    }
}

const SIZE_OPTIONS: [(&str, u32); 4] = [("1", 2), ("2", 3), ("3", 4), ("4", 5)];

/// Board radius for a size option. Unknown options give the easy board.
pub fn radius_for_choice(input: &str) -> u32 {
    let input = input.trim();
    SIZE_OPTIONS
        .iter()
        .find(|(key, _)| *key == input)
        .map_or(3, |&(_, radius)| radius)
}

fn size_menu() -> String {
    let mut menu = String::from("Board size:\n");
    for (key, radius) in SIZE_OPTIONS {
        if let Ok(shape) = GalletaShape::new(radius) {
            menu.push_str(&format!("  {key}. {} (radius {radius})\n", shape.complexity()));
        }
    }
    menu
}

/// Search depth for a difficulty option. Unknown options give normal.
pub fn depth_for_choice(input: &str) -> u32 {
    match input.trim() {
        "1" => 2,
        "3" => 4,
        "4" => 5,
        _ => 3,
    }
}

fn is_yes(input: &str) -> bool {
    matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "s" | "si"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Outcome),
    Surrendered(PlayerId),
    /// Input closed before the game was over.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub end: GameEnd,
    pub scores: [u32; 2],
}

enum HumanTurn {
    Played(AppliedResult),
    Surrendered,
    Closed,
}

/// One game in progress, with an optional computer player in each seat.
pub struct GameSession {
    layout: BoardLayout,
    state: GameState,
    seats: [Option<AiPlayer>; 2],
}

impl GameSession {
    pub fn new(config: &GameConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let layout = GalletaShape::new(config.radius)?.build()?;
        let state =
            GameState::with_starting_player(Arc::clone(&layout.board), config.starting_player);

        let computer = |player: PlayerId| {
            let strategy = Box::new(MinimaxAlphaBeta::new(DotsEvaluator));
            AiPlayer::new(player, strategy, config.depth)
        };
        let seats = match config.mode {
            GameMode::HumanVsHuman => [None, None],
            GameMode::AiVsAi => [
                Some(computer(PlayerId::FIRST)?),
                Some(computer(PlayerId::SECOND)?),
            ],
            GameMode::HumanVsAi => {
                let ai = computer(config.ai_player)?;
                if config.ai_player == PlayerId::FIRST {
                    [Some(ai), None]
                } else {
                    [None, Some(ai)]
                }
            }
        };

        info!(
            radius = config.radius,
            depth = config.depth,
            mode = %config.mode,
            edges = state.board().edge_count(),
            cells = state.board().cell_count(),
            "game created"
        );
        Ok(Self {
            layout,
            state,
            seats,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn play(
        &mut self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> anyhow::Result<GameSummary> {
        while !self.state.is_terminal() {
            write!(out, "\n{}", render(&self.layout, &self.state))?;
            let player = self.state.current_player();

            let result = match &self.seats[player.index()] {
                Some(ai) => {
                    writeln!(out, "  Player {player} (AI) is thinking...")?;
                    let mv = ai.get_move(&mut self.state)?;
                    writeln!(out, "  Player {player} draws line {}", mv.edge_id())?;
                    self.state.apply(mv)?
                }
                None => match human_turn(&mut self.state, player, input, out)? {
                    HumanTurn::Played(result) => result,
                    HumanTurn::Surrendered => {
                        info!(player = player.index(), "player surrendered");
                        return self.finish(GameEnd::Surrendered(player), out);
                    }
                    HumanTurn::Closed => return self.finish(GameEnd::Abandoned, out),
                },
            };

            if result.gave_extra_turn() {
                info!(player = player.index(), cells = ?result.captured_cells(), "cells captured");
                writeln!(
                    out,
                    "  Player {player} captured {} cell(s) and moves again!",
                    result.captured_count()
                )?;
            }
        }

        let outcome = self.state.winner()?;
        self.finish(GameEnd::Finished(outcome), out)
    }

    fn finish(&self, end: GameEnd, out: &mut dyn Write) -> anyhow::Result<GameSummary> {
        let scores = self.state.scores();
        write!(out, "\n{}", render(&self.layout, &self.state))?;
        writeln!(out, "\n  ===== GAME OVER =====\n")?;
        writeln!(
            out,
            "  Final score: Player 0: {} - Player 1: {}",
            scores[0], scores[1]
        )?;
        match end {
            GameEnd::Finished(Outcome::Winner(winner)) => writeln!(
                out,
                "  Winner: Player {winner} ({} cells vs {})",
                scores[winner.index()],
                scores[winner.other().index()]
            )?,
            GameEnd::Finished(Outcome::Tie) => writeln!(out, "  It's a tie!")?,
            GameEnd::Surrendered(player) => writeln!(
                out,
                "  Player {player} surrendered. Player {} wins.",
                player.other()
            )?,
            GameEnd::Abandoned => writeln!(out, "  Game abandoned.")?,
        }
        info!(?end, ?scores, "game finished");
        Ok(GameSummary { end, scores })
    }
}

fn human_turn(
    state: &mut GameState,
    player: PlayerId,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<HumanTurn> {
    let prompt = format!("  Player {player}, line to draw (q to surrender): ");
    loop {
        let Some(line) = input.read_line(&prompt)? else {
            return Ok(HumanTurn::Closed);
        };
        match parse_command(&line) {
            Some(Command::Surrender) => {
                let Some(answer) = input.read_line("  Really surrender? (y/n): ")? else {
                    return Ok(HumanTurn::Closed);
                };
                if is_yes(&answer) {
                    return Ok(HumanTurn::Surrendered);
                }
            }
            Some(Command::Draw(mv)) => match state.apply(mv) {
                Ok(result) => return Ok(HumanTurn::Played(result)),
                Err(e) => writeln!(out, "  Invalid line: {e}. Try again.")?,
            },
            None => writeln!(out, "  Please enter a line number, or q to surrender.")?,
        }
    }
}

const MENU: &str = "\
===================== MAIN MENU =====================

  1. Human vs AI
  2. AI vs AI
  3. Human vs Human
  4. Instructions
  5. Quit
";

const DIFFICULTY_MENU: &str = "\
AI difficulty:
  1. Easy (depth 2)
  2. Normal (depth 3)
  3. Hard (depth 4)
  4. Expert (depth 5)
";

pub const INSTRUCTIONS: &str = "\
===================== INSTRUCTIONS =====================

GOAL
  Capture more cells than your opponent.

HOW TO PLAY
  1. Players take turns drawing a line between two adjacent dots.
  2. Drawing the fourth side of a cell captures it.
  3. Capturing a cell earns another turn.
  4. The game ends when every line has been drawn.
  5. Whoever holds more cells wins.

ON SCREEN
  Numbers are lines still free to draw.
  ---- and | are lines already drawn.
  0 and 1 inside a cell show who owns it.

STRATEGY
  Avoid leaving a cell with three sides drawn.
  Long chains of captures decide the endgame.
";

/// Runs the main menu until the user quits or input closes.
/// `base` supplies settings the menu does not ask for.
pub fn run_menu(
    base: &GameConfig,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "Galleta: dots and boxes with a minimax alpha-beta AI\n"
    )?;
    loop {
        write!(out, "\n{MENU}")?;
        let Some(choice) = input.read_line("Choose an option: ")? else {
            return Ok(());
        };
        match parse_menu_choice(&choice) {
            Some(MenuChoice::Play(mode)) => {
                let Some(config) = configure_game(base, mode, input, out)? else {
                    return Ok(());
                };
                GameSession::new(&config)?.play(input, out)?;
            }
            Some(MenuChoice::Instructions) => write!(out, "\n{INSTRUCTIONS}")?,
            Some(MenuChoice::Quit) => {
                writeln!(out, "\nThanks for playing!")?;
                return Ok(());
            }
            None => writeln!(out, "\nInvalid option.")?,
        }
    }
}

fn configure_game(
    base: &GameConfig,
    mode: GameMode,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> anyhow::Result<Option<GameConfig>> {
    write!(out, "\n{}", size_menu())?;
    let Some(size) = input.read_line("Option: ")? else {
        return Ok(None);
    };
    let mut config = GameConfig {
        radius: radius_for_choice(&size),
        mode,
        ..base.clone()
    };

    if mode.uses_ai() {
        write!(out, "\n{DIFFICULTY_MENU}")?;
        let Some(difficulty) = input.read_line("Option: ")? else {
            return Ok(None);
        };
        config.depth = depth_for_choice(&difficulty);
    }
    Ok(Some(config))
}
