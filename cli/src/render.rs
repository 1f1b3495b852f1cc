use core::fmt::Write;
use minesweep_core::{Board, Cell, CellText, Mood, format_counter};

fn face(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => ":)",
        Mood::Worried => ":o",
        Mood::Winner => "B)",
        Mood::Dead => "X(",
    }
}

fn glyph(cell: &Cell) -> String {
    match cell.text() {
        CellText::Blank if cell.is_revealed() => " ".to_string(),
        CellText::Blank => "·".to_string(),
        text => text.to_string(),
    }
}

/// Status line followed by the grid with column and row numbers.
pub fn board(board: &Board) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  {}",
        format_counter(board.flags_remaining()),
        face(board.mood()),
        board.elapsed_display()
    );

    out.push_str("   ");
    for x in 0..board.width() {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');

    for (y, row) in board.rows().enumerate() {
        let _ = write!(out, "{:>3}", y);
        for cell in row.iter() {
            let _ = write!(out, "{:>3}", glyph(cell));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{MineLayout, Policy};

    #[test]
    fn renders_revealed_flagged_and_hidden_cells() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(0, 0), (4, 4)]).unwrap();
        let mut game = Board::from_layout(&layout, Policy::default());
        game.reveal((1, 0)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let text = board(&game);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "001  :)  00s");
        assert_eq!(lines[1], "     0  1  2  3  4");
        assert_eq!(lines[2], "  0  ⚐  1  ·  ·  ·");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn lost_board_shows_mines() {
        let layout = MineLayout::from_mine_coords((5, 5), &[(0, 0), (4, 4)]).unwrap();
        let mut game = Board::from_layout(&layout, Policy::default());
        game.reveal((4, 4)).unwrap();

        let text = board(&game);

        assert!(text.starts_with("002  X("));
        assert_eq!(text.matches('✺').count(), 2);
    }
}
