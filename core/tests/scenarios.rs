use minesweep_core::*;

/// A wall of mines down column 3 plus two in the top-left corner.
const WALL: [Coord2; 10] = [
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
    (3, 4),
    (3, 5),
    (3, 6),
    (3, 7),
    (0, 0),
    (0, 1),
];

fn wall_board() -> Board {
    let layout = MineLayout::from_mine_coords((8, 8), &WALL).unwrap();
    Board::from_layout(&layout, Policy::default())
}

fn revealed(board: &Board) -> Vec<Coord2> {
    board
        .cells()
        .filter(|cell| cell.is_revealed())
        .map(Cell::coords)
        .collect()
}

#[test]
fn corner_reveal_cascades_to_the_wall() {
    let mut board = wall_board();

    assert_eq!(board.reveal((7, 7)).unwrap(), RevealOutcome::Revealed);

    let expected: Vec<Coord2> = (0..8)
        .flat_map(|y| (4..8).map(move |x| (x, y)))
        .collect();
    assert_eq!(revealed(&board), expected);
    assert_eq!(board.revealed_safe(), 32);
    for y in 0..8 {
        assert!(board.cell((4, y)).unwrap().adjacent_mines() > 0);
        assert_eq!(board.cell((5, y)).unwrap().adjacent_mines(), 0);
    }
    assert_eq!(board.state(), GameState::Playing);
}

#[test]
fn flagged_cell_cannot_be_revealed() {
    let mut board = wall_board();
    board.reveal((7, 7)).unwrap();

    assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::Flagged);
    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);

    let cell = board.cell((0, 0)).unwrap();
    assert!(cell.is_flagged());
    assert!(!cell.is_revealed());
    assert_eq!(board.state(), GameState::Playing);
}

#[test]
fn clearing_the_left_side_wins_with_every_mine_flagged() {
    let mut board = wall_board();
    board.reveal((7, 7)).unwrap();
    board.toggle_flag((3, 4)).unwrap();

    let mut outcomes = Vec::new();
    for y in 0..8 {
        for x in 0..3 {
            if !WALL.contains(&(x, y)) {
                outcomes.push(board.reveal((x, y)).unwrap());
            }
        }
    }

    assert!(!outcomes.contains(&RevealOutcome::HitMine));
    assert_eq!(
        outcomes.iter().filter(|&&outcome| outcome == RevealOutcome::Won).count(),
        1
    );
    assert!(board.won());
    assert_eq!(board.revealed_safe(), 54);
    assert_eq!(board.used_flags(), board.mine_count());
    assert!(WALL.iter().all(|&mine| board.cell(mine).unwrap().is_flagged()));
    assert_eq!(board.mood(), Mood::Winner);
}

#[test]
fn hitting_a_mine_freezes_the_board() {
    let mut board = wall_board();
    board.reveal((7, 7)).unwrap();
    board.toggle_flag((0, 0)).unwrap();

    assert_eq!(board.reveal((3, 3)).unwrap(), RevealOutcome::HitMine);
    assert_eq!(board.state(), GameState::Lost);
    assert_eq!(board.mines_shown(), 10);
    assert!(WALL.iter().all(|&mine| board.cell(mine).unwrap().is_revealed()));

    let snapshot: Vec<Cell> = board.cells().copied().collect();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(board.reveal((x, y)).unwrap(), RevealOutcome::NoChange);
            assert_eq!(board.toggle_flag((x, y)).unwrap(), MarkOutcome::NoChange);
        }
    }
    assert_eq!(board.cells().copied().collect::<Vec<_>>(), snapshot);
    assert_eq!(board.mood(), Mood::Dead);
}

#[test]
fn first_click_is_never_a_mine() {
    let config = GameConfig::beginner();
    for seed in 0..1000u64 {
        let mut board = Board::new(config, Policy::default(), seed).unwrap();
        let coords = ((seed % 8) as Coord, ((seed / 8) % 8) as Coord);

        let outcome = board.reveal(coords).unwrap();

        assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}");
        assert!(!board.cell(coords).unwrap().is_mine(), "seed {seed}");
        assert_eq!(board.cells().filter(|cell| cell.is_mine()).count(), 10);
    }
}

#[test]
fn session_rejects_board_without_two_safe_cells() {
    let mut session = Session::new(SessionConfig {
        seed: Some(1),
        ..SessionConfig::default()
    });

    let error = session
        .start_with(Difficulty::new(
            Difficulty::CUSTOM,
            GameConfig::new_unchecked((4, 4), 16),
        ))
        .unwrap_err();
    assert!(error.is_invalid_difficulty());
    assert!(!session.started());

    let error = session
        .start_with(Difficulty::new(
            Difficulty::CUSTOM,
            GameConfig::new_unchecked((5, 5), 24),
        ))
        .unwrap_err();
    assert_eq!(error, GameError::TooManyMines { mines: 24, cells: 25 });
    assert!(!session.started());

    session
        .start_with(Difficulty::new(
            Difficulty::CUSTOM,
            GameConfig::new_unchecked((5, 5), 23),
        ))
        .unwrap();
    assert!(session.started());
}

#[test]
fn session_plays_through_a_preset() {
    let mut session = Session::new(SessionConfig {
        seed: Some(99),
        ..SessionConfig::default()
    });
    session.select("Beginner").unwrap();
    session.start().unwrap();

    assert!(session.press(4, 4).is_ok());
    assert_eq!(session.board().unwrap().mood(), Mood::Worried);
    session.release();
    assert_eq!(session.board().unwrap().mood(), Mood::Happy);

    assert_ne!(session.reveal(4, 4).unwrap(), RevealOutcome::HitMine);
    assert_eq!(session.reveal(8, 0), Err(GameError::InvalidCoords));
    assert!(session.board().unwrap().initialized());
}
