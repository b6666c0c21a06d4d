//! Menu that lists `game_*` executables in a directory and runs them one at
//! a time as child processes.

use crate::error::{GameError, Result};
use crate::terminal::{Console, Key, TerminalGuard};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

pub const DEFAULT_DIR: &str = "mount";
pub const DIR_ENV: &str = "ARCADE_DIR";
pub const ENTRY_PREFIX: &str = "game_";
pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEntry
{
    pub name: String,
    pub path: PathBuf,
}

/// `--dir` wins over `ARCADE_DIR`, which wins over `mount`.
pub fn game_dir(flag: Option<&str>) -> PathBuf
{
    match flag {
        Some(dir) => PathBuf::from(dir),
        None => std::env::var_os(DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR)),
    }
}

pub fn discover(dir: &Path) -> Result<Vec<GameEntry>>
{
    let listing = fs::read_dir(dir)
        .map_err(|err| GameError::Launch(format!("Failed to open directory '{}': {err}", dir.display())))?;

    let mut entries = Vec::new();
    for entry in listing {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(ENTRY_PREFIX) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        entries.push(GameEntry { name, path });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.truncate(MAX_ENTRIES);
    Ok(entries)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction
{
    Stay,
    Launch(usize),
    Exit,
}

pub struct Menu
{
    entries: Vec<GameEntry>,
    selected: usize,
}

impl Menu
{
    pub fn new(entries: Vec<GameEntry>) -> Self
    {
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[GameEntry]
    {
        &self.entries
    }

    pub fn selected(&self) -> usize
    {
        self.selected
    }

    pub fn handle_key(&mut self, key: Key) -> MenuAction
    {
        match key {
            key if key.is_quit() => MenuAction::Exit,
            Key::Char('w') => {
                self.selected = self.selected.saturating_sub(1);
                MenuAction::Stay
            }
            Key::Char('s') => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
                MenuAction::Stay
            }
            Key::Enter if !self.entries.is_empty() => MenuAction::Launch(self.selected),
            _ => MenuAction::Stay,
        }
    }

    pub fn frame(&self) -> Vec<String>
    {
        let mut lines = vec![
            "=== Video Game Console ===".to_string(),
            "Use 'w' and 's' to select a game, 'Enter' to start, and 'q' to exit.".to_string(),
            String::new(),
        ];
        for (idx, entry) in self.entries.iter().enumerate() {
            let marker = if idx == self.selected { "->" } else { "  " };
            lines.push(format!("{marker} {}", entry.name));
        }
        lines
    }

    pub fn step<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<MenuAction>
    {
        console.draw(&self.frame())?;
        let key = console.read_key()?;
        Ok(self.handle_key(key))
    }
}

pub fn launch(entry: &GameEntry) -> Result<ExitStatus>
{
    info!("launching {}", entry.path.display());
    Command::new(&entry.path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|err| GameError::Launch(format!("Failed to start {}: {err}", entry.name)))
}

pub fn run(dir: &Path) -> Result<()>
{
    let entries = discover(dir)?;
    if entries.is_empty() {
        return Err(GameError::Launch(format!("No games found in the '{}' directory.", dir.display())));
    }
    let mut menu = Menu::new(entries);

    loop {
        let action = {
            let mut term = TerminalGuard::enter()?;
            menu.step(&mut term)?
        };

        match action {
            MenuAction::Stay => {}
            MenuAction::Exit => return Ok(()),
            MenuAction::Launch(index) => {
                let entry = menu.entries()[index].clone();
                {
                    let mut term = TerminalGuard::enter()?;
                    term.draw(&[format!("Starting game: {}", entry.name)])?;
                }

                match launch(&entry) {
                    Ok(status) => {
                        info!("{} exited with {status}", entry.name);
                        println!();
                        if let Some(code) = status.code().filter(|code| *code != 0) {
                            println!("Game exited with status {code}.");
                        }
                    }
                    Err(err) => {
                        warn!("{err}");
                        println!("{err}");
                    }
                }
                println!("Game exited. Returning to the main menu...");
                println!("Press any key to continue...");

                let mut term = TerminalGuard::enter()?;
                term.read_key()?;
            }
        }
    }
}
