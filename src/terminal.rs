use crate::error::{GameError, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use log::{debug, warn};
use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::sync::Once;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key
{
    Char(char),
    Enter,
    /// Ctrl+C. Raw mode turns it into a key press instead of SIGINT.
    Interrupt,
    Other,
}

impl Key
{
    pub fn is_quit(self) -> bool
    {
        matches!(self, Key::Char('q') | Key::Interrupt)
    }
}

pub trait Console
{
    fn read_key(&mut self) -> Result<Key>;

    fn draw(&mut self, lines: &[String]) -> Result<()>;
}

pub struct TerminalGuard
{
    stdout: Stdout,
    active: bool,
}

impl TerminalGuard
{
    pub fn enter() -> Result<Self>
    {
        install_termination_hook();
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().map_err(GameError::TerminalInit)?;
        if let Err(err) = execute!(stdout, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(GameError::TerminalInit(err));
        }
        debug!("terminal switched to raw mode");
        Ok(Self {
            stdout,
            active: true,
        })
    }

    /// Puts the original terminal mode back. Safe to call more than once.
    pub fn restore(&mut self)
    {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(self.stdout, Show);
        let _ = terminal::disable_raw_mode();
        debug!("terminal restored");
    }

    pub fn is_active(&self) -> bool
    {
        self.active
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        self.restore();
    }
}

impl Console for TerminalGuard
{
    fn read_key(&mut self) -> Result<Key>
    {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(map_key(key));
            }
        }
    }

    fn draw(&mut self, lines: &[String]) -> Result<()>
    {
        let output = format!("{}\r\n", lines.join("\r\n"));
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }
}

pub fn map_key(event: KeyEvent) -> Key
{
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    }
}

static TERMINATION_HOOK: Once = Once::new();

pub fn install_termination_hook()
{
    TERMINATION_HOOK.call_once(|| {
        let result = ctrlc::set_handler(|| {
            let _ = execute!(io::stdout(), Show);
            let _ = terminal::disable_raw_mode();
            println!("\r\nGame exited gracefully.");
            std::process::exit(0);
        });
        if let Err(err) = result {
            warn!("termination hook not installed: {err}");
        }
    });
}

/// Replays a fixed key script and records every frame drawn.
/// Once the script runs out every read returns [`Key::Interrupt`].
#[derive(Debug, Default)]
pub struct ScriptedConsole
{
    keys: VecDeque<Key>,
    frames: Vec<Vec<String>>,
}

impl ScriptedConsole
{
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self
    {
        Self {
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
        }
    }

    pub fn from_chars(script: &str) -> Self
    {
        Self::new(script.chars().map(|ch| match ch {
            '\n' => Key::Enter,
            other => Key::Char(other),
        }))
    }

    pub fn frames(&self) -> &[Vec<String>]
    {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[String]>
    {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn remaining(&self) -> usize
    {
        self.keys.len()
    }
}

impl Console for ScriptedConsole
{
    fn read_key(&mut self) -> Result<Key>
    {
        Ok(self.keys.pop_front().unwrap_or(Key::Interrupt))
    }

    fn draw(&mut self, lines: &[String]) -> Result<()>
    {
        self.frames.push(lines.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn ctrl_c_is_an_interrupt()
    {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), Key::Interrupt);
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(map_key(plain), Key::Char('c'));
        assert_eq!(map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), Key::Enter);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), Key::Other);
    }

    #[test]
    fn quit_keys()
    {
        assert!(Key::Char('q').is_quit());
        assert!(Key::Interrupt.is_quit());
        assert!(!Key::Char('Q').is_quit());
        assert!(!Key::Enter.is_quit());
    }

    #[test]
    fn scripted_console_replays_then_interrupts()
    {
        let mut console = ScriptedConsole::from_chars("w\n");
        assert_eq!(console.read_key().unwrap(), Key::Char('w'));
        assert_eq!(console.read_key().unwrap(), Key::Enter);
        assert_eq!(console.remaining(), 0);
        assert_eq!(console.read_key().unwrap(), Key::Interrupt);

        console.draw(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(console.frames().len(), 1);
        assert_eq!(console.last_frame().unwrap(), &["a".to_string(), "b".to_string()]);
    }
}
