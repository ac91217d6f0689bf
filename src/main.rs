use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use galleta::cli::{GameSession, Terminal, run_menu};
use galleta::{GameConfig, GameMode, PlayerId};
use tracing_subscriber::EnvFilter;

/// Dots and boxes on a diamond board against a minimax alpha-beta AI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with game settings. Flags given on the command line win.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board radius (2 to 10).
    #[arg(long)]
    radius: Option<u32>,

    /// AI search depth in plies.
    #[arg(long)]
    depth: Option<u32>,

    /// Play a single game in this mode instead of showing the menu.
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Seat (0 or 1) taken by the AI in human-vs-ai games.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    ai_player: Option<u8>,

    /// Show the interactive menu even when a mode is given.
    #[arg(long)]
    menu: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(seat) = self.ai_player {
            config.ai_player = PlayerId::try_from(usize::from(seat))?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.game_config()?;
    let mut terminal = Terminal::new()?;
    let mut stdout = std::io::stdout();

    if args.mode.is_some() && !args.menu {
        GameSession::new(&config)?.play(&mut terminal, &mut stdout)?;
    } else {
        run_menu(&config, &mut terminal, &mut stdout)?;
    }
    Ok(())
}
