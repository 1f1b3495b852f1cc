use core::fmt;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::*;

/// Called with `won` once a board reaches a terminal state.
pub type GameOverListener = Box<dyn FnMut(bool)>;

/// Difficulty selection and the lifecycle of the board being played.
pub struct Session {
    difficulties: Vec<Difficulty>,
    /// Index into `difficulties`.
    selected: Option<usize>,
    board: Option<Board>,
    policy: Policy,
    seeds: SmallRng,
    listeners: Vec<GameOverListener>,
    game_over_sent: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("session seed: {}", seed);
        Self {
            difficulties: Difficulty::presets(),
            selected: None,
            board: None,
            policy: config.policy,
            seeds: SmallRng::seed_from_u64(seed),
            listeners: Vec::new(),
            game_over_sent: false,
        }
    }

    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    /// The user-editable preset. Edits apply to the next `start` or `reset`,
    /// also while Custom is selected.
    pub fn custom_mut(&mut self) -> Option<&mut GameConfig> {
        self.difficulties
            .iter_mut()
            .find(|difficulty| difficulty.is_custom())
            .map(|difficulty| &mut difficulty.config)
    }

    pub fn selected(&self) -> Option<&Difficulty> {
        self.selected.and_then(|index| self.difficulties.get(index))
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| GameError::UnknownDifficulty(name.to_string()))?;
        self.selected = Some(index);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.difficulties
            .iter()
            .position(|difficulty| difficulty.name.eq_ignore_ascii_case(name))
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Applies to boards created from now on.
    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    pub fn started(&self) -> bool {
        self.board.is_some()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Starts a game at the selected difficulty, replacing any running one.
    pub fn start(&mut self) -> Result<()> {
        let board = self.create_board()?;
        self.install(board);
        Ok(())
    }

    /// Stores `difficulty` in the catalog, replacing a preset of the same name,
    /// then selects and starts it. Nothing changes when it does not validate.
    pub fn start_with(&mut self, difficulty: Difficulty) -> Result<()> {
        difficulty.config.validate()?;
        let index = match self.position(&difficulty.name) {
            Some(index) => {
                self.difficulties[index].config = difficulty.config;
                index
            }
            None => {
                self.difficulties.push(difficulty);
                self.difficulties.len() - 1
            }
        };
        self.selected = Some(index);
        self.start()
    }

    /// Replaces the board with a fresh one at the same difficulty.
    pub fn reset(&mut self) -> Result<()> {
        if !self.started() {
            return Err(GameError::NotStarted);
        }
        log::debug!("reset");
        self.start()
    }

    /// Drops the board and the selection.
    pub fn hard_reset(&mut self) {
        log::debug!("hard reset");
        self.board = None;
        self.selected = None;
        self.game_over_sent = false;
    }

    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<RevealOutcome> {
        let outcome = self.board_mut()?.reveal((x, y))?;
        if outcome.is_game_over() {
            self.notify_game_over();
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        self.board_mut()?.toggle_flag((x, y))
    }

    pub fn press(&mut self, x: Coord, y: Coord) -> Result<()> {
        self.board_mut()?.press((x, y))
    }

    pub fn release(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.release();
        }
    }

    /// Host timer callback, once per second.
    pub fn tick(&mut self) -> bool {
        self.board.as_mut().is_some_and(Board::tick)
    }

    pub fn take_haptic(&mut self) -> Option<Haptic> {
        self.board.as_mut().and_then(Board::take_haptic)
    }

    fn board_mut(&mut self) -> Result<&mut Board> {
        self.board.as_mut().ok_or(GameError::NotStarted)
    }

    fn create_board(&mut self) -> Result<Board> {
        let difficulty = self.selected().ok_or(GameError::NoDifficultySelected)?;
        let config = difficulty.config;
        config.validate()?;
        log::info!("Started a new game! Difficulty: {}", difficulty.name);
        Board::new(config, self.policy, self.seeds.next_u64())
    }

    fn install(&mut self, board: Board) {
        self.board = Some(board);
        self.game_over_sent = false;
    }

    fn notify_game_over(&mut self) {
        if self.game_over_sent {
            return;
        }
        let Some(board) = self.board.as_ref() else {
            return;
        };
        self.game_over_sent = true;

        let won = board.won();
        if won {
            log::info!("Congratulations!");
        } else {
            log::info!("Game over!");
        }
        for listener in &mut self.listeners {
            listener(won);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("selected", &self.selected())
            .field("board", &self.board)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
