//! Save-the-princess maze games.
//!
//! The warrior starts in the top-left corner of a randomly walled maze and
//! has to reach the princess. Bandits and poison cost a life, pills give one
//! back and candy only counts towards the HUD. Walls are independent coin
//! flips, so the princess is not always reachable.

use super::{Game, Status, play};
use crate::error::{GameError, Result};
use crate::grid::{Direction, Grid, Position};
use crate::options::PlayOptions;
use crate::terminal::{Key, TerminalGuard};
use crossterm::style::Stylize;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Duration;

const LOSS_EXIT_CODE: i32 = 0;
const START: Position = Position::new(0, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile
{
    Open,
    Wall,
    Warrior,
    Princess,
    Bandit,
    LifePill,
    Poison,
    Candy,
}

impl Tile
{
    pub fn symbol(self) -> char
    {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
            Tile::Warrior => 'W',
            Tile::Princess => 'P',
            Tile::Bandit => 'B',
            Tile::LifePill => 'L',
            Tile::Poison => 'X',
            Tile::Candy => 'C',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self>
    {
        match ch {
            '.' => Some(Tile::Open),
            '#' => Some(Tile::Wall),
            'W' => Some(Tile::Warrior),
            'P' => Some(Tile::Princess),
            'B' => Some(Tile::Bandit),
            'L' => Some(Tile::LifePill),
            'X' => Some(Tile::Poison),
            'C' => Some(Tile::Candy),
            _ => None,
        }
    }

    pub fn is_special(self) -> bool
    {
        !matches!(self, Tile::Open | Tile::Wall)
    }

    pub fn alters_life(self) -> bool
    {
        matches!(self, Tile::Bandit | Tile::Poison | Tile::LifePill)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RescueConfig
{
    pub title: Option<&'static str>,
    pub life_label: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub bandits: usize,
    pub life_pills: usize,
    pub poisons: usize,
    pub blocks: usize,
    pub candies: usize,
    pub start_life: i32,
    pub wall_chance: f64,
    pub delay: Option<Duration>,
    pub quit_message: &'static str,
}

impl RescueConfig
{
    pub fn classic() -> Self
    {
        Self {
            title: None,
            life_label: "Life",
            rows: 20,
            cols: 40,
            bandits: 10,
            life_pills: 3,
            poisons: 5,
            blocks: 15,
            candies: 0,
            start_life: 3,
            wall_chance: 0.25,
            delay: None,
            quit_message: "Game exited gracefully.",
        }
    }

    pub fn compact() -> Self
    {
        Self {
            title: Some("Save the Princess Game"),
            life_label: "Life Points Left",
            rows: 15,
            cols: 20,
            bandits: 15,
            candies: 4,
            quit_message: "Exiting...",
            ..Self::classic()
        }
    }

    pub fn with_options(mut self, options: &PlayOptions) -> Self
    {
        if options.delay.is_some() {
            self.delay = options.delay;
        }
        self
    }
}

pub struct RescueGame
{
    maze: Grid<Tile>,
    warrior: Position,
    life: i32,
    candies: u32,
    show_candies: bool,
    status: Status,
    title: Option<&'static str>,
    life_label: &'static str,
    quit_message: &'static str,
    delay: Option<Duration>,
}

impl RescueGame
{
    pub fn generate(config: &RescueConfig, rng: &mut impl Rng) -> Result<Self>
    {
        let (rows, cols) = (config.rows, config.cols);
        let mut maze = Grid::from_fn(rows, cols, |pos| {
            if is_border(pos, rows, cols) || rng.gen_bool(config.wall_chance) {
                Tile::Wall
            } else {
                Tile::Open
            }
        });

        for col in 0..cols {
            maze.set(Position::new(0, col as i32), Tile::Open);
        }
        for row in 0..rows {
            maze.set(Position::new(row as i32, cols as i32 - 1), Tile::Open);
        }
        maze.set(START, Tile::Warrior);

        let mut open: Vec<Position> = maze
            .iter()
            .filter(|(pos, tile)| **tile == Tile::Open && is_interior(*pos, rows, cols))
            .map(|(pos, _)| pos)
            .collect();
        open.shuffle(rng);

        place(&mut maze, &mut open, Tile::Princess, 1, "the princess")?;
        place(&mut maze, &mut open, Tile::Bandit, config.bandits, "a bandit")?;
        place(&mut maze, &mut open, Tile::LifePill, config.life_pills, "a life pill")?;
        place(&mut maze, &mut open, Tile::Poison, config.poisons, "poison")?;
        place(&mut maze, &mut open, Tile::Wall, config.blocks, "a block")?;
        place(&mut maze, &mut open, Tile::Candy, config.candies, "candy")?;

        debug!(
            "generated {rows}x{cols} maze, {} open interior cells left",
            open.len()
        );

        Ok(Self {
            maze,
            warrior: START,
            life: config.start_life,
            candies: 0,
            show_candies: config.candies > 0,
            status: Status::Running,
            title: config.title,
            life_label: config.life_label,
            quit_message: config.quit_message,
            delay: config.delay,
        })
    }

    pub fn from_layout(lines: &[&str], life: i32) -> Result<Self>
    {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut tiles = Vec::with_capacity(rows * cols);
        for line in lines {
            if line.chars().count() != cols {
                return Err(GameError::InvalidOption("maze rows differ in length".to_string()));
            }
            for ch in line.chars() {
                let tile = Tile::from_symbol(ch)
                    .ok_or_else(|| GameError::InvalidOption(format!("unknown maze symbol '{ch}'")))?;
                tiles.push(tile);
            }
        }

        let mut tiles = tiles.into_iter();
        let maze = Grid::from_fn(rows, cols, |_| tiles.next().unwrap_or(Tile::Wall));
        let warrior = {
            let mut warriors = maze.iter().filter(|(_, tile)| **tile == Tile::Warrior);
            match (warriors.next(), warriors.next()) {
                (Some((pos, _)), None) => pos,
                _ => return Err(GameError::InvalidOption("maze needs exactly one warrior".to_string())),
            }
        };
        let show_candies = maze.iter().any(|(_, tile)| *tile == Tile::Candy);

        let config = RescueConfig::classic();
        Ok(Self {
            maze,
            warrior,
            life,
            candies: 0,
            show_candies,
            status: Status::Running,
            title: config.title,
            life_label: config.life_label,
            quit_message: config.quit_message,
            delay: None,
        })
    }

    pub fn maze(&self) -> &Grid<Tile>
    {
        &self.maze
    }

    pub fn warrior(&self) -> Position
    {
        self.warrior
    }

    pub fn life(&self) -> i32
    {
        self.life
    }

    pub fn candies(&self) -> u32
    {
        self.candies
    }

    pub fn count(&self, tile: Tile) -> usize
    {
        self.maze.iter().filter(|(_, t)| **t == tile).count()
    }

    pub fn step(&mut self, direction: Direction)
    {
        if self.status.is_over() {
            return;
        }

        let target = self.warrior.step(direction);
        let tile = match self.maze.get(target) {
            Some(tile) if *tile != Tile::Wall => *tile,
            _ => return,
        };

        match tile {
            Tile::LifePill => self.life += 1,
            Tile::Bandit | Tile::Poison => self.life -= 1,
            Tile::Candy => self.candies += 1,
            Tile::Princess => {
                self.status = Status::Won;
                return;
            }
            Tile::Open | Tile::Warrior | Tile::Wall => {}
        }

        self.maze.set(self.warrior, Tile::Open);
        self.warrior = target;
        self.maze.set(target, Tile::Warrior);

        if self.life <= 0 {
            self.status = Status::Lost;
        }
    }
}

impl Game for RescueGame
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
                    self.step(direction);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn frame(&self) -> Vec<String>
    {
        let mut lines = Vec::with_capacity(self.maze.rows() + 4);
        if let Some(title) = self.title {
            lines.push(format!("{}", title.bold().blue()));
        }
        let mut hud = format!("{}: {}", self.life_label, self.life);
        if self.show_candies {
            hud.push_str(&format!("  Candy: {}", self.candies));
        }
        lines.push(hud);
        for row in 0..self.maze.rows() {
            lines.push(self.maze.row(row).iter().map(|tile| tile.symbol()).collect());
        }
        match self.status {
            Status::Running => {}
            Status::Won => lines.push(format!("{}", "Congratulations! You saved the princess!".green().bold())),
            Status::Lost => lines.push(format!("{}", "Game Over! You lost all your life points.".red().bold())),
            Status::Quit => lines.push(self.quit_message.to_string()),
        }
        lines
    }

    fn tick_delay(&self) -> Option<Duration>
    {
        self.delay
    }
}

fn is_border(pos: Position, rows: usize, cols: usize) -> bool
{
    pos.row == 0 || pos.col == 0 || pos.row as usize == rows - 1 || pos.col as usize == cols - 1
}

fn is_interior(pos: Position, rows: usize, cols: usize) -> bool
{
    !is_border(pos, rows, cols)
}

fn place(maze: &mut Grid<Tile>, open: &mut Vec<Position>, tile: Tile, count: usize, what: &'static str) -> Result<()>
{
    for _ in 0..count {
        let pos = open.pop().ok_or(GameError::GridSaturated { what })?;
        maze.set(pos, tile);
    }
    Ok(())
}

pub fn run(config: RescueConfig, args: &[String]) -> Result<i32>
{
    let options = PlayOptions::from_args(args, true)?;
    let config = config.with_options(&options);
    let mut rng = options.rng();
    let mut game = RescueGame::generate(&config, &mut rng)?;
    let status = {
        let mut term = TerminalGuard::enter()?;
        play(&mut game, &mut term)?
    };
    Ok(status.exit_code(options.loss_code_or(LOSS_EXIT_CODE)))
}
