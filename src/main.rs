use std::env;
use std::path::Path;
use terminal_arcade::{games, launcher};

fn main()
{
    games::init_logging();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32, String>
{
    let mut args: Vec<String> = env::args().skip(1).collect();
    let dir_flag = take_dir_flag(&mut args)?;
    let dir = launcher::game_dir(dir_flag.as_deref());

    let command = if args.is_empty() {
        None
    } else {
        Some(args.remove(0))
    };
    match command.as_deref() {
        None => {
            launcher::run(&dir).map_err(|err| err.to_string())?;
            Ok(0)
        }
        Some("list") => {
            list_games(&dir);
            Ok(0)
        }
        Some("-h") | Some("--help") => {
            print_help();
            Ok(0)
        }
        Some(name) => games::run_game(name, &args).map_err(|err| err.to_string()),
    }
}

fn take_dir_flag(args: &mut Vec<String>) -> Result<Option<String>, String>
{
    let Some(first) = args.first() else {
        return Ok(None);
    };
    if let Some(dir) = first.strip_prefix("--dir=") {
        let dir = dir.to_string();
        args.remove(0);
        return Ok(Some(dir));
    }
    if first == "--dir" {
        if args.len() < 2 {
            return Err("Expected value after --dir".to_string());
        }
        args.remove(0);
        return Ok(Some(args.remove(0)));
    }
    Ok(None)
}

fn list_games(dir: &Path)
{
    println!("Built-in games:");
    for game in games::registry() {
        println!("  {:<15} - {}", game.name, game.description);
    }
    println!();
    match launcher::discover(dir) {
        Ok(entries) if !entries.is_empty() => {
            println!("Found in '{}':", dir.display());
            for entry in entries {
                println!("  {}", entry.name);
            }
        }
        Ok(_) => println!("No games found in '{}'.", dir.display()),
        Err(err) => println!("{err}"),
    }
}

fn print_help()
{
    println!("arcade");
    println!("\nUsage:");
    println!("  arcade [--dir=PATH]          pick a game_* binary from PATH (default: mount)");
    println!("  arcade [--dir=PATH] list");
    println!("  arcade <game> [--seed=N] [--loss-code=N] [--delay-ms=N]");
    println!("\nGames:");
    for game in games::registry() {
        println!("  {:<15} ({})", game.name, game.binary);
    }
    println!("\nNotes:");
    println!("  Set {} to change the default game directory.", launcher::DIR_ENV);
    println!("  --delay-ms only applies to the rescue games.");
    println!("  Set RUST_LOG=debug to log to stderr.");
}
