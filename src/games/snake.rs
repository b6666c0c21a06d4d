use super::{Game, Status, play};
use crate::error::{GameError, Result};
use crate::grid::{Direction, Grid, Position};
use crate::options::PlayOptions;
use crate::terminal::{Key, TerminalGuard};
use crossterm::style::Stylize;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const WIDTH: usize = 30;
pub const HEIGHT: usize = 10;
const INITIAL_CAPACITY: usize = 10;
const LOSS_EXIT_CODE: i32 = 0;

const HEAD: char = 'O';
const SEGMENT: char = '#';
const FOOD: char = 'X';
const EMPTY: char = '.';

pub struct SnakeGame
{
    rows: usize,
    cols: usize,
    body: Vec<Position>,
    food: Position,
    score: u32,
    status: Status,
    rng: StdRng,
}

impl SnakeGame
{
    pub fn new(rng: StdRng) -> Result<Self>
    {
        Self::with_size(HEIGHT, WIDTH, rng)
    }

    pub fn with_size(rows: usize, cols: usize, rng: StdRng) -> Result<Self>
    {
        let mut body = Vec::with_capacity(INITIAL_CAPACITY);
        body.push(Position::new((rows / 2) as i32, (cols / 2) as i32));
        let mut game = Self {
            rows,
            cols,
            body,
            food: Position::new(0, 0),
            score: 0,
            status: Status::Running,
            rng,
        };
        game.respawn_food()?;
        Ok(game)
    }

    /// Resumes from an explicit layout. The score is derived from the body
    /// length so that `body.len() == score + 1` holds from the start.
    pub fn from_parts(rows: usize, cols: usize, body: Vec<Position>, food: Position, rng: StdRng) -> Result<Self>
    {
        if body.is_empty() {
            return Err(GameError::InvalidOption("a snake needs a head".to_string()));
        }
        let score = (body.len() - 1) as u32;
        Ok(Self {
            rows,
            cols,
            body,
            food,
            score,
            status: Status::Running,
            rng,
        })
    }

    pub fn head(&self) -> Position
    {
        self.body[0]
    }

    pub fn body(&self) -> &[Position]
    {
        &self.body
    }

    pub fn food(&self) -> Position
    {
        self.food
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    fn in_bounds(&self, pos: Position) -> bool
    {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    pub fn step(&mut self, direction: Direction) -> Result<()>
    {
        if self.status.is_over() {
            return Ok(());
        }

        let candidate = self.head().step(direction);
        if !self.in_bounds(candidate) || self.body[1..].contains(&candidate) {
            debug!("snake crashed at {candidate:?} with score {}", self.score);
            self.status = Status::Lost;
            return Ok(());
        }

        self.body.insert(0, candidate);
        let vacated = self.body.pop();

        if candidate == self.food {
            self.score += 1;
            if let Some(tail) = vacated {
                self.body.push(tail);
            }
            self.respawn_food()?;
        }
        Ok(())
    }

    fn respawn_food(&mut self) -> Result<()>
    {
        let free: Vec<Position> = Grid::filled(self.rows, self.cols, ())
            .positions()
            .filter(|pos| !self.body.contains(pos))
            .collect();
        self.food = *free
            .choose(&mut self.rng)
            .ok_or(GameError::GridSaturated { what: "food" })?;
        Ok(())
    }

    fn board(&self) -> Grid<char>
    {
        let mut board = Grid::filled(self.rows, self.cols, EMPTY);
        board.set(self.food, FOOD);
        for segment in &self.body[1..] {
            board.set(*segment, SEGMENT);
        }
        board.set(self.head(), HEAD);
        board
    }
}

impl Game for SnakeGame
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
            Key::Char(ch) => {
                if let Some(direction) = Direction::from_key(ch) {
                    self.step(direction)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn frame(&self) -> Vec<String>
    {
        let board = self.board();
        let mut lines = Vec::with_capacity(self.rows + 3);
        lines.push(format!("Score: {}", self.score));
        for row in 0..board.rows() {
            lines.push(board.row(row).iter().collect());
        }
        match self.status {
            Status::Running => {}
            Status::Lost => {
                lines.push(format!("{}", "Game Over: Snake hit the border or itself.".red().bold()));
                lines.push(format!("Final Score: {}", self.score));
            }
            Status::Won | Status::Quit => lines.push(format!("Game Over! Final Score: {}", self.score)),
        }
        lines
    }
}

pub fn run(args: &[String]) -> Result<i32>
{
    let options = PlayOptions::from_args(args, false)?;
    let mut game = SnakeGame::new(options.rng())?;
    let status = {
        let mut term = TerminalGuard::enter()?;
        play(&mut game, &mut term)?
    };
    Ok(status.exit_code(options.loss_code_or(LOSS_EXIT_CODE)))
}
