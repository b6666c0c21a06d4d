use super::{Game, Status, play};
use crate::error::{GameError, Result};
use crate::grid::{Grid, Position};
use crate::options::PlayOptions;
use crate::terminal::{Key, TerminalGuard};
use crossterm::style::Stylize;
use log::debug;
use rand::Rng;

pub const SIZE: usize = 9;
const BOX: usize = 3;
const LOSS_EXIT_CODE: i32 = 1;
const RANDOM_FILL_WRITES: usize = 18;
const PROMPT: &str = "Enter row (1-9), column (1-9), and number (1-9) to fill (e.g. 1 2 3) or 'q' to quit: ";

const BASE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generator
{
    /// The classic base puzzle with every cell blanked on a coin flip.
    BaseBlanked,
    /// Eighteen random writes of 0-8 with no uniqueness check, so the result
    /// is almost never solvable.
    RandomFill,
}

impl Generator
{
    pub fn generate(self, rng: &mut impl Rng) -> Board
    {
        match self {
            Generator::BaseBlanked => {
                let mut board = Board::from_rows(BASE);
                for row in 0..SIZE {
                    for col in 0..SIZE {
                        if rng.gen_bool(0.5) {
                            board.set(row, col, 0);
                        }
                    }
                }
                board
            }
            Generator::RandomFill => {
                let mut board = Board::empty();
                for _ in 0..RANDOM_FILL_WRITES {
                    let row = rng.gen_range(0..SIZE);
                    let col = rng.gen_range(0..SIZE);
                    let value = rng.gen_range(0..9);
                    board.set(row, col, value);
                }
                board
            }
        }
    }
}

/// A 9x9 board, 0 meaning empty. Rows and columns are zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board
{
    cells: Grid<u8>,
}

impl Board
{
    pub fn empty() -> Self
    {
        Self {
            cells: Grid::filled(SIZE, SIZE, 0),
        }
    }

    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Self
    {
        Self {
            cells: Grid::from_fn(SIZE, SIZE, |pos| rows[pos.row as usize][pos.col as usize]),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> u8
    {
        self.cells
            .get(Position::new(row as i32, col as i32))
            .copied()
            .unwrap_or(0)
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8)
    {
        self.cells.set(Position::new(row as i32, col as i32), value);
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool
    {
        self.get(row, col) != 0
    }

    pub fn is_complete(&self) -> bool
    {
        self.cells.iter().all(|(_, value)| *value != 0)
    }

    pub fn allows(&self, row: usize, col: usize, value: u8) -> bool
    {
        if (0..SIZE).any(|i| self.get(row, i) == value || self.get(i, col) == value) {
            return false;
        }
        let (top, left) = ((row / BOX) * BOX, (col / BOX) * BOX);
        !(top..top + BOX).any(|r| (left..left + BOX).any(|c| self.get(r, c) == value))
    }

    pub fn has_duplicates(&self) -> bool
    {
        let units = (0..SIZE).flat_map(|i| {
            let row: Vec<(usize, usize)> = (0..SIZE).map(|c| (i, c)).collect();
            let col: Vec<(usize, usize)> = (0..SIZE).map(|r| (r, i)).collect();
            let (top, left) = ((i / BOX) * BOX, (i % BOX) * BOX);
            let block: Vec<(usize, usize)> = (0..SIZE).map(|k| (top + k / BOX, left + k % BOX)).collect();
            [row, col, block]
        });
        for unit in units {
            let mut seen = [false; 10];
            for (r, c) in unit {
                let value = self.get(r, c) as usize;
                if value == 0 {
                    continue;
                }
                if value >= seen.len() || seen[value] {
                    return true;
                }
                seen[value] = true;
            }
        }
        false
    }

    pub fn lines(&self) -> Vec<String>
    {
        let mut lines = Vec::with_capacity(SIZE + 2);
        for row in 0..SIZE {
            let mut line = String::new();
            for col in 0..SIZE {
                match self.get(row, col) {
                    0 => line.push_str(". "),
                    value => line.push_str(&format!("{value} ")),
                }
                if (col + 1) % BOX == 0 && col != SIZE - 1 {
                    line.push_str("| ");
                }
            }
            lines.push(line.trim_end().to_string());
            if (row + 1) % BOX == 0 && row != SIZE - 1 {
                lines.push("------|-------|------".to_string());
            }
        }
        lines
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict
{
    Accepted,
    Occupied,
    Conflict,
}

pub struct SudokuGame
{
    board: Board,
    pending: Vec<u8>,
    status: Status,
    last: Option<Verdict>,
}

impl SudokuGame
{
    pub fn new(board: Board) -> Self
    {
        let status = if board.is_complete() {
            Status::Won
        } else {
            Status::Running
        };
        Self {
            board,
            pending: Vec::with_capacity(3),
            status,
            last: None,
        }
    }

    pub fn board(&self) -> &Board
    {
        &self.board
    }

    pub fn pending(&self) -> &[u8]
    {
        &self.pending
    }

    pub fn last_verdict(&self) -> Option<Verdict>
    {
        self.last
    }

    /// Fills one cell; `row`, `col` and `value` are 1-9. Anything but an
    /// accepted move ends the game.
    pub fn enter(&mut self, row: u8, col: u8, value: u8) -> Result<Verdict>
    {
        if ![row, col, value].iter().all(|digit| (1..=9).contains(digit)) {
            return Err(GameError::InvalidOption(format!(
                "sudoku entry {row} {col} {value} is outside 1-9"
            )));
        }
        let (row, col) = (row as usize - 1, col as usize - 1);
        let verdict = if self.board.is_filled(row, col) {
            Verdict::Occupied
        } else if !self.board.allows(row, col, value) {
            Verdict::Conflict
        } else {
            self.board.set(row, col, value);
            Verdict::Accepted
        };
        debug!("sudoku entry ({row}, {col}) = {value}: {verdict:?}");

        self.last = Some(verdict);
        self.status = match verdict {
            Verdict::Accepted if self.board.is_complete() => Status::Won,
            Verdict::Accepted => Status::Running,
            Verdict::Occupied | Verdict::Conflict => Status::Lost,
        };
        Ok(verdict)
    }
}

impl Game for SudokuGame
{
    fn status(&self) -> Status
    {
        self.status
    }

    fn handle_key(&mut self, key: Key) -> Result<()>
    {
        if self.status.is_over() {
            return Ok(());
        }
        match key {
            key if key.is_quit() => self.status = Status::Quit,
            Key::Char(ch @ '1'..='9') => {
                self.pending.push(ch as u8 - b'0');
                if let &[row, col, value] = self.pending.as_slice() {
                    self.pending.clear();
                    self.enter(row, col, value)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn frame(&self) -> Vec<String>
    {
        let mut lines = vec![format!("{}", "Sudoku Game".bold().blue()), String::new()];
        lines.extend(self.board.lines());
        lines.push(String::new());

        match self.status {
            Status::Running => {
                if self.last == Some(Verdict::Accepted) {
                    lines.push("Move accepted!".to_string());
                }
                let typed: Vec<String> = self.pending.iter().map(u8::to_string).collect();
                lines.push(format!("{PROMPT}{}", typed.join(" ")));
            }
            Status::Won => lines.push(format!("{}", "Congratulations! You solved the Sudoku!".green().bold())),
            Status::Lost => {
                let message = match self.last {
                    Some(Verdict::Occupied) => "Cell already filled! You lost!",
                    _ => "Invalid move! You lost!",
                };
                lines.push(format!("{}", message.red().bold()));
            }
            Status::Quit => lines.push(format!("{}", "Exiting the game...".red().bold())),
        }
        lines
    }
}

pub fn run(generator: Generator, args: &[String]) -> Result<i32>
{
    let options = PlayOptions::from_args(args, false)?;
    let board = generator.generate(&mut options.rng());
    let mut game = SudokuGame::new(board);
    let status = {
        let mut term = TerminalGuard::enter()?;
        play(&mut game, &mut term)?
    };
    Ok(status.exit_code(options.loss_code_or(LOSS_EXIT_CODE)))
}
