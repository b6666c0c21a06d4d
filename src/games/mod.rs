pub mod rescue;
pub mod snake;
pub mod sudoku;

use crate::error::{GameError, Result};
use crate::terminal::{Console, Key};
use log::info;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status
{
    Running,
    Won,
    Lost,
    Quit,
}

impl Status
{
    pub fn is_over(self) -> bool
    {
        self != Status::Running
    }

    pub fn exit_code(self, loss_code: i32) -> i32
    {
        match self {
            Status::Lost => loss_code,
            Status::Running | Status::Won | Status::Quit => 0,
        }
    }
}

pub trait Game
{
    fn status(&self) -> Status;

    fn handle_key(&mut self, key: Key) -> Result<()>;

    fn frame(&self) -> Vec<String>;

    fn tick_delay(&self) -> Option<Duration>
    {
        None
    }
}

/// Render, read one key, apply it, repeat until the game is over.
/// The last frame drawn is always the finished board. The tick delay only
/// applies while the game is still running.
pub fn play<G, C>(game: &mut G, console: &mut C) -> Result<Status>
where
    G: Game + ?Sized,
    C: Console + ?Sized,
{
    loop {
        console.draw(&game.frame())?;
        let status = game.status();
        if status.is_over() {
            info!("game finished: {status:?}");
            return Ok(status);
        }

        let key = console.read_key()?;
        game.handle_key(key)?;

        if !game.status().is_over() {
            if let Some(delay) = game.tick_delay() {
                std::thread::sleep(delay);
            }
        }
    }
}

pub struct GameDescriptor
{
    pub name: &'static str,
    pub binary: &'static str,
    pub description: &'static str,
    run: fn(&[String]) -> Result<i32>,
}

impl GameDescriptor
{
    pub fn run(&self, args: &[String]) -> Result<i32>
    {
        (self.run)(args)
    }
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![
        GameDescriptor {
            name: "snake",
            binary: "game_snake",
            description: "Eat the food, don't bite yourself or the border",
            run: snake::run,
        },
        GameDescriptor {
            name: "rescue",
            binary: "game_rescue",
            description: "Cross a 20x40 maze to save the princess",
            run: |args| rescue::run(rescue::RescueConfig::classic(), args),
        },
        GameDescriptor {
            name: "rescue-compact",
            binary: "game_rescue_compact",
            description: "Save the princess in a tighter 15x20 maze with candy",
            run: |args| rescue::run(rescue::RescueConfig::compact(), args),
        },
        GameDescriptor {
            name: "sudoku",
            binary: "game_sudoku",
            description: "Sudoku from a classic puzzle with random blanks",
            run: |args| sudoku::run(sudoku::Generator::BaseBlanked, args),
        },
        GameDescriptor {
            name: "sudoku-random",
            binary: "game_sudoku_random",
            description: "Sudoku seeded with random digits (rarely solvable)",
            run: |args| sudoku::run(sudoku::Generator::RandomFill, args),
        },
    ]
}

pub fn find(name: &str) -> Option<GameDescriptor>
{
    registry()
        .into_iter()
        .find(|game| game.name.eq_ignore_ascii_case(name) || game.binary == name)
}

pub fn run_game(name: &str, args: &[String]) -> Result<i32>
{
    let game = find(name).ok_or_else(|| GameError::InvalidOption(format!("Unknown game '{name}'. Run with --help.")))?;
    game.run(args)
}

pub fn run_binary(name: &str) -> !
{
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run_game(name, &args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Logging stays off unless `RUST_LOG` asks for it; output goes to stderr.
pub fn init_logging()
{
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
        .format_timestamp(None)
        .try_init();
}
