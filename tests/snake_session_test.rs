use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use terminal_arcade::games::snake::{HEIGHT, SnakeGame, WIDTH};
use terminal_arcade::games::{Game, Status, play};
use terminal_arcade::grid::Position;
use terminal_arcade::terminal::{Key, ScriptedConsole};

#[test]
fn body_length_tracks_score_on_random_walks()
{
    let keys: Vec<char> = "wasd".chars().collect();
    for seed in 0..30u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = SnakeGame::new(StdRng::seed_from_u64(seed + 1000)).unwrap();

        for _ in 0..500 {
            if game.status().is_over() {
                break;
            }
            let key = *keys.choose(&mut rng).unwrap();
            game.handle_key(Key::Char(key)).unwrap();

            assert_eq!(game.body().len(), game.score() as usize + 1);
            if game.status() == Status::Running {
                let head = game.head();
                assert!(!game.body()[1..].contains(&head));
                assert!(!game.body().contains(&game.food()));
            }
        }
    }
}

#[test]
fn running_into_the_wall_ends_the_loop()
{
    let mut game = SnakeGame::new(StdRng::seed_from_u64(4)).unwrap();
    // Head starts on row 5, so six moves up leave the board.
    let mut console = ScriptedConsole::from_chars("wwwwwwww");
    let status = play(&mut game, &mut console).unwrap();
    assert_eq!(status, Status::Lost);
    assert_eq!(console.remaining(), 2);
    assert_eq!(status.exit_code(0), 0);
    assert_eq!(game.head().row, 0);
}

#[test]
fn eating_food_through_the_loop()
{
    let start = Position::new(5, 15);
    let mut game = SnakeGame::from_parts(HEIGHT, WIDTH, vec![start], Position::new(5, 17), StdRng::seed_from_u64(1)).unwrap();
    let mut console = ScriptedConsole::from_chars("ddq");
    assert_eq!(play(&mut game, &mut console).unwrap(), Status::Quit);
    assert_eq!(game.score(), 1);
    assert_eq!(game.body(), &[Position::new(5, 17), Position::new(5, 16)]);
    let frame = console.last_frame().unwrap();
    assert_eq!(frame[0], "Score: 1");
    assert_eq!(frame.len(), 1 + HEIGHT + 1);
    assert!(frame.last().unwrap().contains("Final Score: 1"));
}
