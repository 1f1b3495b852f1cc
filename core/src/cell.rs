use bitflags::bitflags;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// State of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) coords: Coord2,
    pub(crate) is_mine: bool,
    pub(crate) is_flagged: bool,
    pub(crate) is_revealed: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_flagged: false,
            is_revealed: false,
            adjacent_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn x(&self) -> Coord {
        self.coords.0
    }

    pub const fn y(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden and not flagged, the only state a reveal acts on.
    pub const fn is_covered(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn text(&self) -> CellText {
        if self.is_revealed && self.is_mine {
            CellText::Mine
        } else if self.is_revealed && self.adjacent_mines > 0 {
            CellText::Count(self.adjacent_mines)
        } else if self.is_flagged {
            CellText::Flag
        } else {
            CellText::Blank
        }
    }

    pub fn style(&self) -> CellStyle {
        let mut style = CellStyle::empty();
        style.set(
            CellStyle::ADJACENT,
            !self.is_mine && self.adjacent_mines > 0,
        );
        style.set(CellStyle::FLAGGED, self.is_flagged);
        style.set(CellStyle::MINE, self.is_mine);
        style.set(CellStyle::REVEALED, self.is_revealed);
        style
    }

    /// Class carrying the adjacency digit, e.g. `cell-adjacent-3`.
    pub fn adjacency_class(&self) -> Option<String> {
        self.style()
            .contains(CellStyle::ADJACENT)
            .then(|| format!("cell-adjacent-{}", self.adjacent_mines))
    }
}

/// What a cell shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellText {
    Blank,
    Flag,
    Mine,
    Count(u8),
}

impl fmt::Display for CellText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("\u{a0}"),
            Self::Flag => f.write_str("⚐"),
            Self::Mine => f.write_str("✺"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

bitflags! {
    /// Style tags, each present independently of the others.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CellStyle: u8 {
        const ADJACENT = 1;
        const FLAGGED  = 1 << 1;
        const MINE     = 1 << 2;
        const REVEALED = 1 << 3;
    }
}

/// A cell together with the board it belongs to, through which all of its
/// mutations go.
#[derive(Debug)]
pub struct CellHandle<'a> {
    board: &'a mut Board,
    coords: Coord2,
}

impl<'a> CellHandle<'a> {
    pub(crate) fn new(board: &'a mut Board, coords: Coord2) -> Self {
        Self { board, coords }
    }

    pub fn cell(&self) -> &Cell {
        self.board.cell_unchecked(self.coords)
    }

    pub fn reveal(&mut self) -> RevealOutcome {
        let cell = *self.cell();
        if self.board.is_game_over() || cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        self.board.release();

        if cell.is_mine {
            return self.board.on_mine_triggered(self.coords);
        }

        self.board.cell_mut_unchecked(self.coords).is_revealed = true;
        self.board.on_cell_revealed(self.coords);

        if self.cell().adjacent_mines == 0 {
            self.board.cascade(self.coords);
        }

        self.board.check_win()
    }

    pub fn toggle_flag(&mut self) -> MarkOutcome {
        let cell = *self.cell();
        if self.board.is_game_over() || cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        self.board.release();

        let flagged = !cell.is_flagged;
        self.board.cell_mut_unchecked(self.coords).is_flagged = flagged;
        if flagged {
            self.board.use_flag();
            self.board.set_haptic(Haptic::FlagPlaced);
            MarkOutcome::Flagged
        } else {
            self.board.remove_flag();
            self.board.set_haptic(Haptic::FlagRemoved);
            MarkOutcome::Unflagged
        }
    }

    /// Mouse or touch held down on this cell.
    pub fn press(&mut self) {
        if self.cell().is_covered() {
            self.board.arm();
        }
    }

    pub fn release(&mut self) {
        self.board.release();
    }
}
