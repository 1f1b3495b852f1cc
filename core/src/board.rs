use hashbrown::HashSet;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Mines not placed yet, waiting for the first reveal
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One-second game clock, driven by the host calling [`Board::tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Timer {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Status face shown above the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Worried,
    Winner,
    Dead,
}

impl Mood {
    pub const fn class(self) -> &'static str {
        match self {
            Self::Happy => "status-happy",
            Self::Worried => "status-worried",
            Self::Winner => "status-winner",
            Self::Dead => "status-dead",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    used_flags: CellCount,
    revealed_safe: CellCount,
    mines_shown: CellCount,
    state: GameState,
    initialized: bool,
    armed: bool,
    elapsed_secs: u32,
    timer: Timer,
    policy: Policy,
    seed: u64,
    haptic: Option<Haptic>,
}

impl Board {
    /// Builds an empty board; mines are placed now, or on the first reveal when
    /// the policy asks for a safe first click.
    pub fn new(config: GameConfig, policy: Policy, seed: u64) -> Result<Self> {
        if config.width() == 0 || config.height() == 0 {
            return Err(GameError::InvalidCoords);
        }
        if config.mines >= config.total_cells() {
            return Err(GameError::TooManyMines {
                mines: config.mines,
                cells: config.total_cells(),
            });
        }

        let mut board = Self::blank(config, policy, seed);
        if !policy.first_click_safe {
            board.initialize();
        }
        Ok(board)
    }

    /// Builds a board whose mines are already placed as in `layout`.
    pub fn from_layout(layout: &MineLayout, policy: Policy) -> Self {
        let mut board = Self::blank(layout.game_config(), policy, 0);
        board.apply_layout(layout);
        board
    }

    fn blank(config: GameConfig, policy: Policy, seed: u64) -> Self {
        let (width, height) = config.size;
        let cells = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(y, x)| Cell::new((x as Coord, y as Coord)),
        );
        Self {
            config,
            cells,
            used_flags: 0,
            revealed_safe: 0,
            mines_shown: 0,
            state: GameState::NotStarted,
            initialized: false,
            armed: false,
            elapsed_secs: 0,
            timer: Timer::Idle,
            policy,
            seed,
            haptic: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn used_flags(&self) -> CellCount {
        self.used_flags
    }

    /// Mines not flagged yet, negative when the player over-flags.
    pub fn flags_remaining(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.used_flags)
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.revealed_safe
    }

    /// Mines exposed when the game was lost.
    pub fn mines_shown(&self) -> CellCount {
        self.mines_shown
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn timer(&self) -> Timer {
        self.timer
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    pub fn mood(&self) -> Mood {
        match self.state {
            GameState::Won => Mood::Winner,
            GameState::Lost => Mood::Dead,
            _ if self.armed => Mood::Worried,
            _ => Mood::Happy,
        }
    }

    /// Elapsed time as `07s` or `02m 05s`.
    pub fn elapsed_display(&self) -> String {
        let minutes = self.elapsed_secs / 60;
        if minutes > 0 {
            format!("{:02}m {:02}s", minutes, self.elapsed_secs % 60)
        } else {
            format!("{:02}s", self.elapsed_secs)
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.config.size;
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell_unchecked(coords))
    }

    pub fn cell_mut(&mut self, coords: Coord2) -> Result<CellHandle<'_>> {
        let coords = self.validate_coords(coords)?;
        Ok(CellHandle::new(self, coords))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    /// Coordinates of the in-bounds cells around `coords`.
    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells.iter_neighbors(coords))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        Ok(self.cell_mut(coords)?.reveal())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        Ok(self.cell_mut(coords)?.toggle_flag())
    }

    pub fn press(&mut self, coords: Coord2) -> Result<()> {
        self.cell_mut(coords)?.press();
        Ok(())
    }

    pub fn release(&mut self) {
        self.armed = false;
    }

    /// Advances the clock by one second if it is running.
    pub fn tick(&mut self) -> bool {
        if matches!(self.timer, Timer::Running) {
            self.elapsed_secs += 1;
            true
        } else {
            false
        }
    }

    /// Vibration requested by the last move, cleared on read.
    pub fn take_haptic(&mut self) -> Option<Haptic> {
        self.haptic.take()
    }

    pub(crate) fn cell_unchecked(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut_unchecked(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn arm(&mut self) {
        self.armed = true;
    }

    pub(crate) fn use_flag(&mut self) {
        self.used_flags += 1;
    }

    pub(crate) fn remove_flag(&mut self) {
        self.used_flags = self.used_flags.saturating_sub(1);
    }

    pub(crate) fn set_haptic(&mut self, haptic: Haptic) {
        if self.policy.haptics {
            self.haptic = Some(haptic);
        }
    }

    /// Counts a safe cell that was just revealed, placing the mines first if this
    /// is the opening move.
    pub(crate) fn on_cell_revealed(&mut self, coords: Coord2) {
        self.revealed_safe += 1;
        log::trace!("Revealed {:?}, {} safe cells open", coords, self.revealed_safe);

        if !self.initialized {
            self.initialize();
        }
    }

    pub(crate) fn on_mine_triggered(&mut self, coords: Coord2) -> RevealOutcome {
        log::debug!("Mine triggered at {:?}", coords);

        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            if !cell.is_revealed {
                cell.is_revealed = true;
                self.mines_shown += 1;
            }
        }

        self.set_haptic(Haptic::MineHit);
        self.end_game(false);
        RevealOutcome::HitMine
    }

    /// Opens the zero region around `start` together with its numbered border.
    pub(crate) fn cascade(&mut self, start: Coord2) {
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut to_visit = vec![start];

        while let Some(current) = to_visit.pop() {
            for next in self.cells.iter_neighbors(current) {
                if !visited.insert(next) {
                    continue;
                }

                let cell = &mut self.cells[next.to_nd_index()];
                debug_assert!(!cell.is_mine, "zero cell next to a mine at {next:?}");

                if cell.adjacent_mines == 0 {
                    to_visit.push(next);
                }
                if !cell.is_revealed {
                    cell.is_revealed = true;
                    self.revealed_safe += 1;
                    log::trace!("Flood opened {:?}, mine count: {}", next, cell.adjacent_mines);
                }
                if cell.is_flagged {
                    cell.is_flagged = false;
                    self.used_flags = self.used_flags.saturating_sub(1);
                }
            }
        }

        log::trace!("Flood from {:?} visited {} cells", start, visited.len());
    }

    pub(crate) fn check_win(&mut self) -> RevealOutcome {
        if self.revealed_safe < self.config.safe_cells() {
            return RevealOutcome::Revealed;
        }

        if self.policy.auto_flag_on_win {
            self.auto_flag();
        }
        self.end_game(true);
        RevealOutcome::Won
    }

    fn auto_flag(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine && !cell.is_flagged {
                cell.is_flagged = true;
                self.used_flags += 1;
            }
        }
    }

    fn initialize(&mut self) {
        let candidates: Vec<Coord2> = self
            .cells
            .iter()
            .filter(|cell| !cell.is_revealed)
            .map(Cell::coords)
            .collect();
        let layout = RandomMinefieldGenerator::new(self.seed).generate(self.config, &candidates);

        if layout.mine_count() != self.config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                self.config.mines
            );
        }
        self.apply_layout(&layout);
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for cell in self.cells.iter_mut() {
            cell.is_mine = layout.contains_mine(cell.coords);
            cell.adjacent_mines = if cell.is_mine {
                0
            } else {
                layout.adjacent_mine_count(cell.coords)
            };
        }
        self.config.mines = layout.mine_count();
        self.initialized = true;
        self.start_playing();
    }

    fn start_playing(&mut self) {
        if matches!(self.state, GameState::NotStarted) {
            self.state = GameState::Playing;
            self.timer = Timer::Running;
            log::debug!("Timer started");
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        if matches!(self.timer, Timer::Running) {
            self.timer = Timer::Stopped;
            log::debug!("Timer stopped at {}s", self.elapsed_secs);
        }
        log::debug!("Game ended, won: {}", won);
    }
}

/// Formats a three digit counter, clamped to what the display can show.
pub fn format_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}
