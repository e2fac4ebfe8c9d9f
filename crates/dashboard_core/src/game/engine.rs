use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Number of cells on the 3x3 board.
pub const BOARD_CELLS: usize = 9;

/// Rows, columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::X => Some(Player::X),
            Self::O => Some(Player::O),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Self::X,
            Player::O => Self::O,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Won(player) => write!(f, "{player} won"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Reason a move was refused. The game state is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("cell {0} is out of range 0..=8")]
    OutOfRange(usize),
    #[error("cell {0} is already occupied")]
    Occupied(usize),
    #[error("game is over ({0}); reset to play again")]
    GameOver(GameStatus),
}

/// Board, turn and outcome of one tic-tac-toe game.
///
/// Both players are driven through the same `play` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: [Cell; BOARD_CELLS],
    current_player: Player,
    status: GameStatus,
    winning_line: Option<[usize; 3]>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            board: [Cell::Empty; BOARD_CELLS],
            current_player: Player::X,
            status: GameStatus::InProgress,
            winning_line: None,
        }
    }

    pub fn board(&self) -> &[Cell; BOARD_CELLS] {
        &self.board
    }

    /// Player whose turn it is; after a win this is the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cell indices of the completed line once the game is won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Places the current player's mark on `cell`.
    ///
    /// # Errors
    /// Returns [`InvalidMove`] without touching state when the game is over,
    /// `cell` is outside `0..=8`, or the cell is occupied.
    pub fn play(&mut self, cell: usize) -> Result<GameStatus, InvalidMove> {
        if self.status.is_terminal() {
            return Err(InvalidMove::GameOver(self.status));
        }
        if cell >= BOARD_CELLS {
            return Err(InvalidMove::OutOfRange(cell));
        }
        if !self.board[cell].is_empty() {
            return Err(InvalidMove::Occupied(cell));
        }

        self.board[cell] = self.current_player.into();

        if let Some(line) = find_winning_line(&self.board) {
            self.winning_line = Some(line);
            self.status = GameStatus::Won(self.current_player);
        } else if self.board.iter().all(|cell| !cell.is_empty()) {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = self.current_player.opponent();
        }

        Ok(self.status)
    }

    /// Returns to the initial state regardless of the current one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn find_winning_line(board: &[Cell; BOARD_CELLS]) -> Option<[usize; 3]> {
    WIN_LINES.iter().copied().find(|&[a, b, c]| {
        !board[a].is_empty() && board[a] == board[b] && board[a] == board[c]
    })
}
