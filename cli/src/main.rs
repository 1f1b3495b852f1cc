use anyhow::Context;
use clap::Parser;
use minesweep_core::{CellCount, Coord, Difficulty, GameConfig, Session, SessionConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use web_time::Instant;

use command::Command;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty preset to start with
    #[arg(short, long, default_value = "Beginner")]
    difficulty: String,

    /// Width of a custom board
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Height of a custom board
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Mines on a custom board
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Session config as JSON, flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Place mines before the first reveal
    #[arg(long)]
    no_first_click_safety: bool,

    /// Leave mines unflagged after a win
    #[arg(long)]
    no_auto_flag: bool,
}

impl Args {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Could not parse {}", path.display()))?
            }
            None => SessionConfig::default(),
        };

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_first_click_safety {
            config.policy.first_click_safe = false;
        }
        if self.no_auto_flag {
            config.policy.auto_flag_on_win = false;
        }
        Ok(config)
    }

    fn custom(&self) -> Option<GameConfig> {
        Some(GameConfig::new_unchecked(
            (self.width?, self.height?),
            self.mines?,
        ))
    }
}

/// Converts wall-clock time into one-second ticks.
struct Clock {
    last: Instant,
}

impl Clock {
    const PERIOD: Duration = Duration::from_secs(1);

    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn catch_up(&mut self, session: &mut Session) {
        while self.last.elapsed() >= Self::PERIOD {
            self.last += Self::PERIOD;
            session.tick();
        }
    }
}

fn start(session: &mut Session, difficulty: &str) -> minesweep_core::Result<()> {
    session.select(difficulty)?;
    session.start()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut session = Session::new(args.session_config()?);
    session.subscribe(|won| {
        if won {
            println!("Congratulations!");
        } else {
            println!("Game over!");
        }
    });

    match args.custom() {
        Some(config) => {
            if let Some(custom) = session.custom_mut() {
                *custom = config;
            }
            start(&mut session, Difficulty::CUSTOM)?;
        }
        None => start(&mut session, &args.difficulty)?,
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut clock = Clock::new();
    let mut lines = stdin.lock().lines();

    loop {
        clock.catch_up(&mut session);
        if let Some(board) = session.board() {
            print!("{}", render::board(board));
        }
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        clock.catch_up(&mut session);

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(command::CommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let result = match command {
            Command::Reveal(x, y) => session.reveal(x, y).map(|outcome| {
                if !outcome.has_update() {
                    log::debug!("nothing to reveal at ({}, {})", x, y);
                }
            }),
            Command::Flag(x, y) => session.toggle_flag(x, y).map(|_| ()),
            Command::Reset => session.reset(),
            Command::New(difficulty) => {
                session.hard_reset();
                let name = match difficulty {
                    Some(name) => name,
                    None => {
                        let names: Vec<_> = session
                            .difficulties()
                            .iter()
                            .map(|difficulty| difficulty.name.as_str())
                            .collect();
                        println!("difficulties: {}", names.join(", "));
                        continue;
                    }
                };
                start(&mut session, &name)
            }
            Command::Help => {
                println!("{}", command::HELP);
                Ok(())
            }
            Command::Quit => break,
        };

        if let Some(haptic) = session.take_haptic() {
            log::trace!("haptic {:?}: {:?}", haptic, haptic.pattern());
        }
        if let Err(e) = result {
            println!("{e}");
        }
    }

    Ok(())
}
