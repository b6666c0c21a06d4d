use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use terminal_arcade::games::rescue::{RescueConfig, RescueGame, Tile};
use terminal_arcade::games::{Game, Status, play};
use terminal_arcade::grid::Position;
use terminal_arcade::terminal::{Key, ScriptedConsole};

fn life_items(game: &RescueGame) -> usize
{
    game.count(Tile::Bandit) + game.count(Tile::Poison) + game.count(Tile::LifePill)
}

#[test]
fn reaching_the_princess_wins_on_last_life()
{
    let mut game = RescueGame::from_layout(&["W.P", "###"], 1).unwrap();
    let mut console = ScriptedConsole::from_chars("ddd");
    assert_eq!(play(&mut game, &mut console).unwrap(), Status::Won);
    assert_eq!(console.remaining(), 1);
    assert_eq!(game.life(), 1);
    assert_eq!(Status::Won.exit_code(0), 0);
}

#[test]
fn hazard_on_last_life_loses_before_next_read()
{
    let mut game = RescueGame::from_layout(&["WXP"], 1).unwrap();
    let mut console = ScriptedConsole::from_chars("dd");
    assert_eq!(play(&mut game, &mut console).unwrap(), Status::Lost);
    assert_eq!(console.remaining(), 1, "the second key is never read");
    assert_eq!(game.life(), 0);
    assert_eq!(game.warrior(), Position::new(0, 1));
    assert!(console
        .last_frame()
        .unwrap()
        .iter()
        .any(|line| line.contains("Game Over!")));
}

#[test]
fn bandit_then_poison_drains_life()
{
    let mut game = RescueGame::from_layout(&["WBX.P"], 2).unwrap();
    let mut console = ScriptedConsole::from_chars("dddd");
    assert_eq!(play(&mut game, &mut console).unwrap(), Status::Lost);
    assert_eq!(game.warrior(), Position::new(0, 2));
    assert_eq!(console.remaining(), 2);
}

#[test]
fn random_walk_keeps_one_warrior_and_clears_behind_it()
{
    let keys: Vec<char> = "wasdx".chars().collect();
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = RescueGame::generate(&RescueConfig::compact(), &mut rng).unwrap();

        for _ in 0..300 {
            if game.status().is_over() {
                break;
            }
            let before = game.warrior();
            let items_before = life_items(&game);
            let key = *keys.choose(&mut rng).unwrap();
            game.handle_key(Key::Char(key)).unwrap();

            assert_eq!(game.count(Tile::Warrior), 1);
            if game.warrior() != before {
                assert_eq!(game.maze().get(before), Some(&Tile::Open));
                assert_eq!(game.maze().get(game.warrior()), Some(&Tile::Warrior));
            }
            let items_after = life_items(&game);
            assert!(items_after <= items_before && items_before - items_after <= 1);
        }
    }
}

#[test]
fn quit_key_ends_a_generated_game()
{
    let mut rng = StdRng::seed_from_u64(8);
    let mut game = RescueGame::generate(&RescueConfig::classic(), &mut rng).unwrap();
    let mut console = ScriptedConsole::from_chars("q");
    assert_eq!(play(&mut game, &mut console).unwrap(), Status::Quit);
    let frame = console.last_frame().unwrap();
    assert_eq!(frame.len(), 1 + 20 + 1);
    assert_eq!(frame[0], "Life: 3");
    assert!(frame[1].starts_with('W'));
    assert_eq!(frame.last().unwrap(), "Game exited gracefully.");
}
