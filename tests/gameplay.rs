//! End-to-end games driven through the public API, without a terminal.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ringsnake::board::Cell;
use ringsnake::config::Config;
use ringsnake::game::{SnakeGame, TickOutcome};
use ringsnake::input::Direction::{self, *};
use ringsnake::lifecycle::{DeathReason, Lifecycle, Reveal, Status};

fn new_game(config: &Config, seed: u64) -> SnakeGame<ChaCha8Rng> {
    let lifecycle = Lifecycle::new(config.input_queue_capacity);
    SnakeGame::new(config, lifecycle, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

fn remove_food(game: &mut SnakeGame<ChaCha8Rng>) {
    let board = game.board_mut();
    for pos in 0..board.cells().len() {
        if board.cell(pos) == Cell::Food {
            board.set_cell(pos, Cell::Empty);
        }
    }
}

#[test]
fn vertical_then_horizontal_in_one_tick_applies_the_turn() {
    let config = Config { initial_snake_length: 4, ..Config::default() };
    let mut game = new_game(&config, 3);
    remove_food(&mut game);

    game.lifecycle().enqueue(Up);
    game.tick();
    assert_eq!(game.lifecycle().direction(), Some(Up));

    game.lifecycle().enqueue(Down);
    game.lifecycle().enqueue(Left);
    assert_eq!(game.tick(), TickOutcome::Moved);
    assert_eq!(game.lifecycle().direction(), Some(Left));
    assert!(!game.lifecycle().has_pending());
    assert_eq!(game.board().head(), (9, 9));
}

#[test]
fn overflowing_keys_are_dropped_silently() {
    let config = Config::default();
    let game = new_game(&config, 3);
    assert!(game.lifecycle().enqueue(Up));
    assert!(game.lifecycle().enqueue(Left));
    assert!(game.lifecycle().enqueue(Down));
    assert!(!game.lifecycle().enqueue(Right));
    assert_eq!(game.lifecycle().status(), Status::Running);
}

#[test]
fn running_into_the_right_wall_then_revealing_the_body() {
    let config = Config { width: 9, height: 5, initial_snake_length: 3, ..Config::default() };
    let mut game = new_game(&config, 11);
    remove_food(&mut game);

    game.lifecycle().enqueue(Right);
    let mut outcome = TickOutcome::Idle;
    for _ in 0..10 {
        outcome = game.tick();
        if let TickOutcome::Died(_) = outcome {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Died(DeathReason::WallCollision));
    assert_eq!(game.ticks(), 4);

    let frozen = game.board().cells().to_vec();
    let mut reveal = Reveal::new(game.board());
    while reveal.step(game.board_mut()) {}
    assert_eq!(reveal.progress(), 4);
    assert_eq!(game.board().cells(), &frozen[..]);

    let board = game.board();
    let dead_snake = (0..board.cells().len())
        .filter(|&pos| board.cell(pos).is_snake() && board.is_dead(pos))
        .count();
    assert_eq!(dead_snake, 3);
}

#[test]
fn tempo_rises_by_the_increment_on_each_meal() {
    let config = Config {
        width: 12,
        height: 3,
        initial_snake_length: 1,
        tempo_increment_per_food: 0.5,
        ..Config::default()
    };
    let mut game = new_game(&config, 5);
    remove_food(&mut game);
    // Head starts at (5, 1); line up food to the right.
    for x in 6..9 {
        let pos = game.board().pos(x, 1);
        game.board_mut().set_cell(pos, Cell::Food);
    }

    game.lifecycle().enqueue(Right);
    let mut last = game.tempo().ticks_per_second();
    for _ in 0..3 {
        assert_eq!(game.tick(), TickOutcome::Ate);
        let now = game.tempo().ticks_per_second();
        assert!((now - last - 0.5).abs() < 1e-9);
        last = now;
    }
    assert_eq!(game.board().snake_length(), 4);
}

fn direction(i: u8) -> Direction {
    match i % 4 {
        0 => Up,
        1 => Down,
        2 => Left,
        _ => Right,
    }
}

proptest! {
    #[test]
    fn visible_body_matches_length_and_age(
        length in 1usize..12,
        turns in prop::collection::vec(0u8..4, 1..60),
    ) {
        let config = Config { width: 15, height: 15, initial_snake_length: length, ..Config::default() };
        let mut game = new_game(&config, 9);
        remove_food(&mut game);

        for turn in turns {
            game.lifecycle().enqueue(direction(turn));
            let tempo_before = game.tempo().ticks_per_second();
            match game.tick() {
                TickOutcome::Died(_) => break,
                _ => {
                    let expected = length.min(game.ticks() as usize + 1);
                    prop_assert_eq!(game.board().snake_cells(), expected);
                    prop_assert!(game.tempo().ticks_per_second() >= tempo_before);
                }
            }
        }
    }

    #[test]
    fn food_never_lands_on_an_occupied_cell(seed in any::<u64>()) {
        let config = Config { width: 6, height: 6, initial_snake_length: 1, ..Config::default() };
        let mut game = new_game(&config, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        loop {
            let before = game.board().cells().to_vec();
            match game.board_mut().place_food(&mut rng) {
                Ok(pos) => {
                    prop_assert_eq!(before[pos], Cell::Empty);
                    let changed = before
                        .iter()
                        .zip(game.board().cells())
                        .filter(|(a, b)| a != b)
                        .count();
                    prop_assert_eq!(changed, 1);
                }
                Err(_) => {
                    prop_assert_eq!(&before[..], game.board().cells());
                    break;
                }
            }
        }
        let board = game.board();
        prop_assert_eq!(board.cells().iter().filter(|c| **c == Cell::Empty).count(), 0);
        prop_assert_eq!(board.cells().iter().filter(|c| **c == Cell::Head).count(), 1);
    }
}
