use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use policy::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod policy;
mod session;
mod types;

/// Smallest allowed board side.
pub const MIN_SIDE: Coord = 5;
/// Largest allowed board side.
pub const MAX_SIDE: Coord = 45;
/// Fewest mines a playable board may have.
pub const MIN_MINES: CellCount = 2;
/// Fewest safe cells a playable board must keep.
pub const MIN_SAFE_CELLS: CellCount = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a configuration that passes [`GameConfig::validate`], or the first
    /// violated constraint.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Checks the bounds a session enforces before starting a game.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if !(MIN_SIDE..=MAX_SIDE).contains(&width) {
            return Err(GameError::WidthOutOfRange { width });
        }
        if !(MIN_SIDE..=MAX_SIDE).contains(&height) {
            return Err(GameError::HeightOutOfRange { height });
        }
        if self.mines < MIN_MINES {
            return Err(GameError::TooFewMines { mines: self.mines });
        }
        if self.safe_cells() < MIN_SAFE_CELLS {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((8, 8), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn custom() -> Self {
        Self::new_unchecked((20, 20), 50)
    }
}

/// Named difficulty preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: String,
    pub config: GameConfig,
}

impl Difficulty {
    pub const CUSTOM: &'static str = "Custom";

    pub fn new(name: impl Into<String>, config: GameConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.name == Self::CUSTOM
    }

    /// Beginner, Intermediate, Expert and an editable Custom preset.
    pub fn presets() -> Vec<Self> {
        vec![
            Self::new("Beginner", GameConfig::beginner()),
            Self::new("Intermediate", GameConfig::intermediate()),
            Self::new("Expert", GameConfig::expert()),
            Self::new(Self::CUSTOM, GameConfig::custom()),
        ]
    }
}

/// A fixed placement of mines, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            layout.place_mine(coords);
        }

        if layout.mine_count >= layout.total_cells() {
            return Err(GameError::TooManyMines {
                mines: layout.mine_count,
                cells: layout.total_cells(),
            });
        }

        Ok(layout)
    }

    /// Returns `false` when `coords` already held a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords] {
            return false;
        }
        self[coords] = true;
        self.mine_count += 1;
        true
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the in-bounds neighbors, never counting `coords` itself.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((y, x), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the input layer should swallow the event that caused this mark,
    /// e.g. to keep the context menu from opening.
    pub const fn prevents_default(self) -> bool {
        self.has_update()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
