use std::fs;
use std::path::PathBuf;
use terminal_arcade::launcher::{self, MAX_ENTRIES, Menu, MenuAction};
use terminal_arcade::terminal::ScriptedConsole;

struct ScratchDir
{
    path: PathBuf,
}

impl ScratchDir
{
    fn new(tag: &str) -> Self
    {
        let path = std::env::temp_dir().join(format!("arcade-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn touch(&self, name: &str)
    {
        fs::write(self.path.join(name), b"#!/bin/sh\n").unwrap();
    }
}

impl Drop for ScratchDir
{
    fn drop(&mut self)
    {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[test]
fn discovers_prefixed_files_in_name_order()
{
    let dir = ScratchDir::new("discover");
    dir.touch("game_sudoku");
    dir.touch("game_snake");
    dir.touch("readme.txt");
    dir.touch("snake_game");
    fs::create_dir(dir.path.join("game_dir")).unwrap();

    let entries = launcher::discover(&dir.path).unwrap();
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["game_snake", "game_sudoku"]);
    assert_eq!(entries[0].path, dir.path.join("game_snake"));
}

#[test]
fn at_most_ten_entries()
{
    let dir = ScratchDir::new("limit");
    for idx in 0..(MAX_ENTRIES + 3) {
        dir.touch(&format!("game_{idx:02}"));
    }
    let entries = launcher::discover(&dir.path).unwrap();
    assert_eq!(entries.len(), MAX_ENTRIES);
    assert_eq!(entries[0].name, "game_00");
}

#[test]
fn empty_directory_is_an_error_for_the_menu()
{
    let dir = ScratchDir::new("empty");
    assert!(launcher::discover(&dir.path).unwrap().is_empty());
    let err = launcher::run(&dir.path).unwrap_err();
    assert!(err.to_string().contains("No games found"));
}

#[test]
fn menu_navigation_script()
{
    let dir = ScratchDir::new("menu");
    dir.touch("game_a");
    dir.touch("game_b");
    dir.touch("game_c");
    let mut menu = Menu::new(launcher::discover(&dir.path).unwrap());
    let mut console = ScriptedConsole::from_chars("sss\n");

    let mut actions = Vec::new();
    loop {
        let action = menu.step(&mut console).unwrap();
        actions.push(action);
        if action != MenuAction::Stay {
            break;
        }
    }
    assert_eq!(actions.last(), Some(&MenuAction::Launch(2)));
    assert_eq!(menu.entries()[menu.selected()].name, "game_c");
    assert_eq!(console.frames().len(), 4);
}
