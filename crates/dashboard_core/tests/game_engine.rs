use dashboard_core::game::{
    Cell, GameEngine, GameStatus, InvalidMove, Player, BOARD_CELLS, WIN_LINES,
};

#[test]
fn every_win_line_ends_the_game_for_x() {
    for line in WIN_LINES {
        let mut game = GameEngine::new();
        let others: Vec<usize> = (0..9).filter(|cell| !line.contains(cell)).collect();

        assert_eq!(game.play(line[0]).unwrap(), GameStatus::InProgress);
        assert_eq!(game.play(others[0]).unwrap(), GameStatus::InProgress);
        assert_eq!(game.play(line[1]).unwrap(), GameStatus::InProgress);
        assert_eq!(game.play(others[1]).unwrap(), GameStatus::InProgress);
        assert_eq!(game.play(line[2]).unwrap(), GameStatus::Won(Player::X));
        assert_eq!(game.winning_line(), Some(line));
    }
}

#[test]
fn full_board_without_line_is_a_draw() {
    let mut game = GameEngine::new();
    let mut last = GameStatus::InProgress;
    for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        last = game.play(cell).unwrap();
    }

    assert_eq!(last, GameStatus::Draw);
    assert!(game.board().iter().all(|cell| !cell.is_empty()));
    assert_eq!(game.winning_line(), None);
}

#[test]
fn win_on_the_ninth_move_beats_draw() {
    let mut game = GameEngine::new();
    let mut last = GameStatus::InProgress;
    for cell in [2, 0, 3, 1, 5, 4, 7, 6, 8] {
        last = game.play(cell).unwrap();
    }

    assert_eq!(last, GameStatus::Won(Player::X));
    assert_eq!(game.winning_line(), Some([2, 5, 8]));
}

#[test]
fn rejected_moves_leave_state_untouched() {
    let mut game = GameEngine::new();
    game.play(4).unwrap();
    let before = game.clone();

    assert_eq!(game.play(4), Err(InvalidMove::Occupied(4)));
    assert_eq!(game.play(9), Err(InvalidMove::OutOfRange(9)));
    assert_eq!(game, before);
    assert_eq!(game.current_player(), Player::O);
}

#[test]
fn finished_game_is_frozen_until_reset() {
    let mut game = GameEngine::new();
    for cell in [0, 3, 1, 4, 2] {
        game.play(cell).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Won(Player::X));

    let frozen = game.clone();
    assert_eq!(
        game.play(8),
        Err(InvalidMove::GameOver(GameStatus::Won(Player::X)))
    );
    assert_eq!(game, frozen);

    game.reset();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.current_player(), Player::X);
    assert!(game.board().iter().all(|cell| *cell == Cell::Empty));
}

#[test]
fn column_zero_wins_for_x() {
    let mut game = GameEngine::new();
    for cell in [0, 1, 3, 4] {
        game.play(cell).unwrap();
    }

    assert_eq!(game.play(6).unwrap(), GameStatus::Won(Player::X));
    assert_eq!(game.winning_line(), Some([0, 3, 6]));
}

#[test]
fn draw_rejects_every_further_move() {
    let mut game = GameEngine::new();
    for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        game.play(cell).unwrap();
    }
    let frozen = game.clone();

    for cell in 0..BOARD_CELLS {
        assert_eq!(
            game.play(cell),
            Err(InvalidMove::GameOver(GameStatus::Draw))
        );
    }
    assert_eq!(game, frozen);
}

#[test]
fn every_reachable_game_obeys_the_rules() {
    let mut terminal_states = 0;
    walk(&GameEngine::new(), &mut terminal_states);
    // 255_168 distinct move sequences end in a win or a draw.
    assert_eq!(terminal_states, 255_168);
}

fn walk(game: &GameEngine, terminal_states: &mut usize) {
    let completed = completed_lines(game);

    match game.status() {
        GameStatus::InProgress => {
            assert!(completed.is_empty());
            let mut moved = false;
            for cell in 0..BOARD_CELLS {
                let mut next = game.clone();
                match next.play(cell) {
                    Ok(status) => {
                        moved = true;
                        assert_eq!(status, next.status());
                        if status == GameStatus::InProgress {
                            assert_eq!(next.current_player(), game.current_player().opponent());
                        }
                        walk(&next, terminal_states);
                    }
                    Err(err) => {
                        assert_eq!(err, InvalidMove::Occupied(cell));
                        assert_eq!(&next, game);
                    }
                }
            }
            assert!(moved, "in-progress game must have a legal move");
        }
        status => {
            *terminal_states += 1;
            match status {
                GameStatus::Won(winner) => {
                    assert_eq!(winner, game.current_player());
                    // The final mark may complete two lines at once, but
                    // only for the winner.
                    assert!(!completed.is_empty());
                    assert!(completed.iter().all(|(_, owner)| *owner == winner));
                    let line = game.winning_line().unwrap();
                    assert!(completed.iter().any(|(won, _)| *won == line));
                }
                _ => {
                    assert!(completed.is_empty());
                    assert!(game.board().iter().all(|cell| !cell.is_empty()));
                    assert_eq!(game.winning_line(), None);
                }
            }

            for cell in 0..BOARD_CELLS {
                let mut next = game.clone();
                assert_eq!(next.play(cell), Err(InvalidMove::GameOver(status)));
                assert_eq!(&next, game);
            }
        }
    }
}

fn completed_lines(game: &GameEngine) -> Vec<([usize; 3], Player)> {
    let board = game.board();
    WIN_LINES
        .iter()
        .filter_map(|&line| {
            let owner = board[line[0]].owner()?;
            line.iter()
                .all(|&cell| board[cell] == Cell::from(owner))
                .then_some((line, owner))
        })
        .collect()
}
